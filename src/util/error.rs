//! Error types for the advcopy library.
//!
//! Only precondition violations surface as [`Error`]. Absent containers,
//! markers or shots are normal outcomes and are reported as `None` by the
//! query functions, never as errors.

use thiserror::Error;

/// Main error type for hierarchy and planning operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A container or object name was empty where one is required
    #[error("name cannot be empty")]
    EmptyName,

    /// A container id does not refer to a live arena slot
    #[error("stale container id {index}")]
    StaleContainer { index: usize },

    /// An object id does not refer to a live arena slot
    #[error("stale object id {index}")]
    StaleObject { index: usize },

    /// Container/object names are globally unique; creation would collide
    #[error("name already in use: {0}")]
    DuplicateName(String),

    /// Attach target already has a parent container
    #[error("container '{child}' is already a child of '{parent}'")]
    AlreadyParented { child: String, parent: String },

    /// Attach would make a container its own ancestor
    #[error("attaching '{child}' under '{parent}' would create a cycle")]
    WouldCycle { child: String, parent: String },

    /// Unlink of an object that is not a member of the container
    #[error("object '{object}' is not linked into '{container}'")]
    NotLinked { object: String, container: String },

    /// Frame span with start after end
    #[error("invalid frame span: start {start} > end {end}")]
    InvalidSpan { start: i32, end: i32 },

    /// Name template with bad placeholder syntax
    #[error("invalid name template: {0}")]
    BadTemplate(String),

    /// Name template expanded without a value for a required placeholder
    #[error("template placeholder '{{{0}}}' has no value in this context")]
    MissingTemplateField(&'static str),

    /// Malformed project snapshot
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid-snapshot error from a message.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::InvalidSnapshot(msg.into())
    }

    /// Create a bad-template error from a message.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::BadTemplate(msg.into())
    }
}

/// Result type alias for advcopy operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::InvalidSpan { start: 10, end: 5 };
        assert!(e.to_string().contains("10"));
        assert!(e.to_string().contains("5"));

        let e = Error::DuplicateName("MODEL-SC17-SH100".to_string());
        assert!(e.to_string().contains("MODEL-SC17-SH100"));

        let e = Error::MissingTemplateField("shot");
        assert!(e.to_string().contains("{shot}"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
