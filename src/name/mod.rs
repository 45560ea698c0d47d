//! Name grammar shared by every resolver operation.
//!
//! All pipeline addressing is carried in names: scene and shot ids
//! (`SC17`, `SH100`), role tags (`MODEL`, `VFX`, ...), `+...+` wrapped
//! root containers and `CAM-` camera marker labels. This module turns
//! those strings into typed values once, so the rest of the crate never
//! does ad hoc substring tests on raw names.

mod id;
mod marker;
mod root;
mod tag;

pub use id::*;
pub use marker::*;
pub use root::*;
pub use tag::*;
