//! CLI command implementations.
//!
//! Provides the helpers behind each `tugdoc` subcommand:
//! - `generate` - Render a docstring for the subject at a location
//! - `facts` - Dump the facts extracted for the subject at a location
//! - `styles` - List the registered docstring styles
//!
//! Every helper returns the text to print on stdout. Errors are `DocError`s;
//! turning them into a JSON error envelope and exit code is the caller's job.

use std::fs;
use std::io;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;
use tracing::info;
use tugdoc_core::error::{DocError, DocResult};
use tugdoc_core::output::{emit_response, FactsResponse, GenerateResponse, StylesResponse};
use tugdoc_core::style::DEFAULT_STYLE;
use tugdoc_core::types::Location;
use tugdoc_python::{extract_subject, generate_docstring};

/// Output format for the generate command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The docstring body exactly as rendered (default).
    #[default]
    Text,
    /// Full JSON response.
    Json,
}

/// Per-invocation options for the generate command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Docstring style name.
    pub style: String,
    /// How to print the result.
    pub format: OutputFormat,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            style: DEFAULT_STYLE.to_string(),
            format: OutputFormat::default(),
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Generate a docstring for the subject at `at` ("file:line:col").
pub fn run_generate(at: &str, options: &GenerateOptions) -> DocResult<String> {
    let location = parse_location(at)?;
    let source = read_source(&location.file)?;

    let generated = generate_docstring(&source, location.position(), &options.style)?;
    info!(
        file = %location.file,
        kind = %generated.subject.kind,
        style = %generated.style,
        "generated docstring"
    );

    match options.format {
        OutputFormat::Text => Ok(generated.docstring),
        OutputFormat::Json => to_json(&GenerateResponse::new(
            location,
            generated.subject,
            generated.style,
            generated.docstring,
        )),
    }
}

/// Extract the facts for the subject at `at` as a JSON response.
pub fn run_facts(at: &str) -> DocResult<String> {
    let location = parse_location(at)?;
    let source = read_source(&location.file)?;
    let subject = extract_subject(&source, location.position())?;
    to_json(&FactsResponse::new(location, subject))
}

/// List the registered styles as a JSON response.
pub fn run_styles() -> DocResult<String> {
    to_json(&StylesResponse::new())
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse a "file:line:col" location argument.
pub fn parse_location(at: &str) -> DocResult<Location> {
    Location::parse(at).ok_or_else(|| {
        DocError::invalid_args(format!(
            "invalid location format '{at}', expected path:line:col"
        ))
    })
}

/// Read a Python source file.
fn read_source(path: &str) -> DocResult<String> {
    match fs::read_to_string(Path::new(path)) {
        Ok(source) => Ok(source),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DocError::file_not_found(path)),
        Err(e) => Err(DocError::Io(e)),
    }
}

fn to_json<T: Serialize>(response: &T) -> DocResult<String> {
    let mut buf = Vec::new();
    emit_response(response, &mut buf)?;
    String::from_utf8(buf).map_err(|e| DocError::internal(format!("JSON output is not UTF-8: {e}")))
}

// ============================================================================
// Tests
// ============================================================================
