//! Common types shared between error, facts and output modules.
//!
//! This module contains types that are used by several modules,
//! avoiding circular dependencies.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Position Type
// ============================================================================

/// A cursor position in source text.
///
/// Both fields are 1-indexed (matching editor conventions). Columns count
/// Unicode scalar values, not bytes. Column 0 is read as column 1; line 0
/// is rejected by the generation entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, chars).
    pub col: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

// ============================================================================
// Location Type
// ============================================================================

/// Location in a source file.
///
/// - `file`: Path as given by the caller (required)
/// - `line`: 1-indexed line number (required)
/// - `col`: 1-indexed column (required)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    /// File path.
    pub file: String,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub col: u32,
}

impl Location {
    /// Create a new location.
    pub fn new(file: impl Into<String>, line: u32, col: u32) -> Self {
        Location {
            file: file.into(),
            line,
            col,
        }
    }

    /// Parse a location from "path:line:col" format.
    ///
    /// This parsing is robust against paths containing colons (e.g., Windows paths).
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.rsplitn(3, ':').collect();
        if parts.len() != 3 || parts[2].is_empty() {
            return None;
        }
        let col: u32 = parts[0].parse().ok()?;
        let line: u32 = parts[1].parse().ok()?;
        let file = parts[2].to_string();
        Some(Location::new(file, line, col))
    }

    /// The position part of this location.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }
}

// ============================================================================
// Subject Types
// ============================================================================

/// The kind of node a docstring is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    /// A `def` (or `async def`) statement.
    Function,
    /// A `class` statement.
    Class,
    /// The whole file.
    Module,
}

impl SubjectKind {
    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Function => "function",
            SubjectKind::Class => "class",
            SubjectKind::Module => "module",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subject summary for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectInfo {
    /// Subject kind.
    pub kind: SubjectKind,
    /// Function or class name; absent for modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 1-indexed line of the definition (1 for modules).
    pub line: u32,
}
