//! Error types and error code constants for tugdoc.
//!
//! This module provides a unified error type (`DocError`) for every fallible
//! tugdoc operation, in a form suitable for JSON output.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad input from caller, unknown style)
//! - `3`: Resolution errors (file not found)
//! - `10`: Internal errors (parser failure, contract violations, I/O)
//!
//! ## What is not an error
//!
//! Degraded results never surface here. A default value whose type cannot be
//! inferred renders as `TYPE`, a docstring without an `Args:` section simply
//! has no preserved parameter descriptions, and a malformed parameter line is
//! read as a continuation of the previous entry.

use std::fmt;

use thiserror::Error;

use crate::types::SubjectKind;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad input, malformed request).
    InvalidArguments = 2,
    /// Resolution errors (file not found).
    ResolutionError = 3,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for library and CLI output.
#[derive(Debug, Error)]
pub enum DocError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// No docstring style is registered under this name.
    #[error("unknown docstring style '{name}' (available: {available})")]
    UnknownStyle { name: String, available: String },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// A query or renderer received a node of the wrong kind.
    ///
    /// Callers route by subject kind; reaching this is a contract violation.
    #[error("expected a {expected} node, found '{found}'")]
    SubjectMismatch {
        expected: SubjectKind,
        found: String,
    },

    /// The parser produced no tree.
    #[error("failed to parse source: {message}")]
    ParseFailed { message: String },

    /// I/O error while reading input or writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

/// Result type for tugdoc operations.
pub type DocResult<T> = Result<T, DocError>;

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&DocError> for OutputErrorCode {
    fn from(err: &DocError) -> Self {
        match err {
            DocError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            DocError::UnknownStyle { .. } => OutputErrorCode::InvalidArguments,
            DocError::FileNotFound { .. } => OutputErrorCode::ResolutionError,
            DocError::SubjectMismatch { .. } => OutputErrorCode::InternalError,
            DocError::ParseFailed { .. } => OutputErrorCode::InternalError,
            DocError::Io(_) => OutputErrorCode::InternalError,
            DocError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<DocError> for OutputErrorCode {
    fn from(err: DocError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl DocError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        DocError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        DocError::FileNotFound { path: path.into() }
    }

    /// Create a subject mismatch error.
    pub fn subject_mismatch(expected: SubjectKind, found: impl Into<String>) -> Self {
        DocError::SubjectMismatch {
            expected,
            found: found.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        DocError::InternalError {
            message: message.into(),
        }
    }

    /// Get the output error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod error_code_mapping {
        use super::*;

        #[test]
        fn invalid_arguments_maps_to_2() {
            let err = DocError::invalid_args("bad location");
            assert_eq!(err.error_code(), OutputErrorCode::InvalidArguments);
            assert_eq!(err.error_code().code(), 2);
        }

        #[test]
        fn unknown_style_maps_to_invalid_arguments() {
            let err = DocError::UnknownStyle {
                name: "numpy".to_string(),
                available: "google".to_string(),
            };
            assert_eq!(
                OutputErrorCode::from(&err),
                OutputErrorCode::InvalidArguments
            );
        }

        #[test]
        fn file_not_found_maps_to_resolution() {
            let err = DocError::file_not_found("missing.py");
            assert_eq!(err.error_code().code(), 3);
        }

        #[test]
        fn contract_violation_maps_to_internal() {
            let err = DocError::subject_mismatch(SubjectKind::Function, "class_definition");
            assert_eq!(err.error_code(), OutputErrorCode::InternalError);
        }

        #[test]
        fn io_maps_to_internal() {
            let err = DocError::from(std::io::Error::other("disk on fire"));
            assert_eq!(err.error_code().code(), 10);
        }
    }

    mod error_display {
        use super::*;

        #[test]
        fn subject_mismatch_display() {
            let err = DocError::subject_mismatch(SubjectKind::Function, "class_definition");
            assert_eq!(
                err.to_string(),
                "expected a function node, found 'class_definition'"
            );
        }

        #[test]
        fn unknown_style_display() {
            let err = DocError::UnknownStyle {
                name: "rest".to_string(),
                available: "google".to_string(),
            };
            assert_eq!(
                err.to_string(),
                "unknown docstring style 'rest' (available: google)"
            );
        }

        #[test]
        fn file_not_found_display() {
            let err = DocError::file_not_found("a.py");
            assert_eq!(err.to_string(), "file not found: a.py");
        }
    }

    #[test]
    fn code_values() {
        assert_eq!(OutputErrorCode::InvalidArguments.code(), 2);
        assert_eq!(OutputErrorCode::ResolutionError.code(), 3);
        assert_eq!(OutputErrorCode::InternalError.code(), 10);
        assert_eq!(format!("{}", OutputErrorCode::InternalError), "10");
    }
}
