//! Core infrastructure for tugdoc.
//!
//! This crate provides the language-agnostic half of docstring synthesis:
//! - Facts model (parameters, returns, yields, raises, attributes)
//! - Existing-docstring parsing (header / parameter blocks / footer)
//! - Docstring styles and the Google renderer
//! - Error types and error codes
//! - JSON output types for CLI responses
//! - Text utilities (positions, whitespace, indentation)

pub mod error;
pub mod existing;
pub mod facts;
pub mod google;
pub mod output;
pub mod style;
pub mod text;
pub mod types;
