//! Python language support for tugdoc.
//!
//! This crate extracts docstring facts from Python source using tree-sitter.
//! It includes:
//! - Parser setup and node helpers
//! - Tree queries (subject lookup, parameters, returns, yields, raises, attributes)
//! - Literal type inference for defaults and attribute values
//! - The generation entry points tying facts to a docstring style

pub mod generate;
pub mod literal;
pub mod parse;
pub mod query;

pub use generate::{extract_subject, generate_docstring, Generated};
pub use literal::infer_type;
