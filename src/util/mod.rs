//! Utility types and functions for advcopy.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - Case-insensitive text helpers for name matching

mod error;
mod text;

pub use error::*;
pub use text::*;
