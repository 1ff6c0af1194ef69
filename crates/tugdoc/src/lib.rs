//! tugdoc - Google-style docstring synthesis for Python.
//!
//! This crate provides the CLI binary and the library front door.
//!
//! ## Modules
//!
//! - `cli` - CLI command implementations

pub mod cli;

// Re-export the generation API for convenience
pub use tugdoc_core::error::{DocError, DocResult, OutputErrorCode};
pub use tugdoc_core::facts::Subject;
pub use tugdoc_core::output::{ErrorInfo, ErrorResponse, SCHEMA_VERSION};
pub use tugdoc_core::style::{DocstringStyle, AVAILABLE_STYLES, DEFAULT_STYLE};
pub use tugdoc_core::types::{Location, Position, SubjectInfo, SubjectKind};
pub use tugdoc_python::{extract_subject, generate_docstring, infer_type, Generated};
