//! Text utilities for positions, whitespace and indentation.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Columns count Unicode scalar values (chars), not bytes
//! - Byte offsets are **0-indexed**
//! - Line/column values of 0 are treated as 1

use crate::types::Position;

// ============================================================================
// Position Conversions
// ============================================================================

/// Convert a 1-indexed position to a byte offset.
///
/// A column beyond the end of its line clamps to the line end; a line beyond
/// the end of the content returns the content length.
pub fn position_to_byte_offset(content: &str, position: Position) -> usize {
    let line = position.line.max(1);
    let col = position.col.max(1);

    let mut current_line = 1u32;
    let mut line_start = 0usize;

    if line > 1 {
        let mut found = false;
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                current_line += 1;
                if current_line == line {
                    line_start = i + 1;
                    found = true;
                    break;
                }
            }
        }
        if !found {
            return content.len();
        }
    }

    let mut current_col = 1u32;
    for (j, c) in content[line_start..].char_indices() {
        if current_col == col || c == '\n' {
            return line_start + j;
        }
        current_col += 1;
    }
    content.len()
}

// ============================================================================
// Whitespace Utilities
// ============================================================================

/// Collapse every run of whitespace (newlines included) to a single space.
///
/// Leading and trailing whitespace is removed.
///
/// ```
/// use tugdoc_core::text::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("{\n    2:3\n}"), "{ 2:3 }");
/// assert_eq!(collapse_whitespace("  a   b "), "a b");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The leading spaces and tabs of a line.
pub fn indentation(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// Remove up to `width` leading whitespace characters from a line.
///
/// Stops at the first non-whitespace character, so text is never cut.
pub fn dedent_by(line: &str, width: usize) -> &str {
    let mut cut = 0;
    for (count, (i, ch)) in line.char_indices().enumerate() {
        if count == width || !(ch == ' ' || ch == '\t') {
            return &line[i..];
        }
        cut = i + ch.len_utf8();
    }
    &line[cut..]
}

/// Remove the common indentation of all non-blank lines.
///
/// Blank lines do not participate in the minimum and are emptied.
pub fn dedent(text: &str) -> String {
    let width = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indentation(line).chars().count())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                dedent_by(line, width)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================
