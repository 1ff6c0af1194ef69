//! JSON output types and serialization for CLI responses.
//!
//! ## Design Principles
//!
//! 1. **Status first:** Every response has `status` as first field
//! 2. **Deterministic:** Same input -> same output (field order, array ordering)
//! 3. **Versioned:** Schema version in response enables forward compatibility

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::{DocError, OutputErrorCode};
use crate::facts::Subject;

pub use crate::types::{Location, SubjectInfo};

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Errors
// ============================================================================

/// Error details for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Error-specific structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    /// Create from a DocError.
    pub fn from_error(err: &DocError) -> Self {
        let code = OutputErrorCode::from(err).code();
        let message = err.to_string();

        let details = match err {
            DocError::FileNotFound { path } => Some(serde_json::json!({ "path": path })),
            DocError::UnknownStyle { name, .. } => Some(serde_json::json!({
                "style": name,
                "available": crate::style::AVAILABLE_STYLES,
            })),
            DocError::SubjectMismatch { expected, found } => Some(serde_json::json!({
                "expected": expected,
                "found": found,
            })),
            _ => None,
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

/// Error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error details.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a DocError.
    pub fn from_error(err: &DocError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }

    /// Create an error response with just code and message.
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo {
                code,
                message: message.into(),
                details: None,
            },
        }
    }
}

// ============================================================================
// Response Structs
// ============================================================================

/// Response for the generate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Where the docstring was generated.
    pub location: Location,
    /// The subject the position resolved to.
    pub subject: SubjectInfo,
    /// Style used for rendering.
    pub style: String,
    /// Rendered docstring body (text between the quotes).
    pub docstring: String,
}

impl GenerateResponse {
    /// Create a new generate response.
    pub fn new(
        location: Location,
        subject: SubjectInfo,
        style: impl Into<String>,
        docstring: impl Into<String>,
    ) -> Self {
        GenerateResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            location,
            subject,
            style: style.into(),
            docstring: docstring.into(),
        }
    }
}

/// Response for the facts command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactsResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Where the facts were extracted.
    pub location: Location,
    /// Extracted facts, tagged by `kind`.
    pub subject: Subject,
}

impl FactsResponse {
    /// Create a new facts response.
    pub fn new(location: Location, subject: Subject) -> Self {
        FactsResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            location,
            subject,
        }
    }
}

/// Response for the styles command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Registered style names.
    pub styles: Vec<String>,
    /// Style used when `--style` is omitted.
    pub default: String,
}

impl StylesResponse {
    /// List the registered styles.
    pub fn new() -> Self {
        StylesResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            styles: crate::style::AVAILABLE_STYLES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default: crate::style::DEFAULT_STYLE.to_string(),
        }
    }
}

impl Default for StylesResponse {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Emitters
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

// ============================================================================
// Tests
// ============================================================================
