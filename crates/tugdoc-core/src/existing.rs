//! Parsing of a pre-existing docstring into preserved regions.
//!
//! A docstring is split on blank lines into paragraphs and partitioned into:
//!
//! ```text
//! """Summary line.                  <- header (paragraphs before "Args:")
//!
//!     Longer description.           <- header
//!
//!     Args:                         <- parameter section
//!         x (int): The x value.     <- params["x"]
//!             Continued.            <- params["x"] (continuation)
//!         y: The y value.           <- params["y"]
//!
//!     Note:                         <- footer
//!         Something else.
//!     """
//! ```
//!
//! The grammar is line-prefix based: a parameter entry starts at any line
//! matching `name`, an optional parenthesized type, and a colon. Anything
//! else inside the section continues the previous entry. The parser never
//! fails; unrecognized shapes degrade to "nothing preserved".

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::{dedent, dedent_by, indentation};

/// Start of a parameter entry: `name (type):` with the type optional.
///
/// `*args:` / `**kwargs:` entries also open a block so their fixed text never
/// runs into the previous entry; those blocks are not preserved.
static PARAM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\*{0,2})(\w+)\s*(\(.*\))?:").unwrap());

/// The rest of an entry that holds nothing but the rendered default.
static DEFAULT_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*default: ``(.*)``\s*$").unwrap());

/// Section headers the renderers generate themselves.
///
/// Paragraphs starting with one of these are regenerated from facts on every
/// run and are never carried over as preserved free text.
pub const GENERATED_SECTIONS: &[&str] = &["Args:", "Returns:", "Yields:", "Raises:", "Attributes:"];

/// Indentation of a preserved parameter entry inside the rendered section.
const ENTRY_INDENT: &str = "    ";

/// Regions of an existing docstring that survive regeneration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingDocstring {
    /// Free text before the first section.
    pub header: Option<String>,
    /// Preserved parameter entries keyed by name, each ending in `\n`.
    pub params: BTreeMap<String, String>,
    /// Paragraphs after the parameter section.
    pub footer: Option<Vec<String>>,
}

impl ExistingDocstring {
    /// Parse a raw docstring literal (quotes included).
    ///
    /// `None` yields an empty result.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return ExistingDocstring::default();
        };

        let body = strip_quotes(raw);
        let paragraphs = split_paragraphs(body);

        let args_index = paragraphs
            .iter()
            .position(|p| p.trim_start().starts_with("Args:"));

        let (header_end, footer_start) = match args_index {
            Some(i) => (i, Some(i + 1)),
            None => {
                // No parameter section: the header runs up to the first
                // generated section, which then opens the footer.
                match paragraphs.iter().position(|p| is_generated_section(p)) {
                    Some(i) => (i, Some(i)),
                    None => (paragraphs.len(), None),
                }
            }
        };

        let header = normalize_header(&paragraphs[..header_end].join("\n\n"));
        let params = args_index
            .map(|i| parse_params(paragraphs[i]))
            .unwrap_or_default();
        let footer = footer_start.map(|start| {
            paragraphs[start..]
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
        });

        tracing::trace!(
            has_header = header.is_some(),
            params = params.len(),
            footer = footer.as_ref().map_or(0, Vec::len),
            "parsed existing docstring"
        );

        ExistingDocstring {
            header,
            params,
            footer,
        }
    }

    /// The preserved entry for a parameter.
    ///
    /// Entries with nothing after their `name (type):` prefix, or only the
    /// rendered default, carry no written text and are left to be
    /// regenerated.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|entry| has_description(entry))
    }

    /// Footer paragraphs that carry human-written text.
    ///
    /// Generated sections and blank paragraphs are dropped; the rest are
    /// dedented and stripped of surrounding blank lines.
    pub fn preserved_footer(&self) -> Vec<String> {
        self.footer
            .iter()
            .flatten()
            .filter(|p| !p.trim().is_empty() && !is_generated_section(p))
            .map(|p| dedent(p).trim_start_matches('\n').trim_end().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// True when the paragraph opens one of the [`GENERATED_SECTIONS`].
pub fn is_generated_section(paragraph: &str) -> bool {
    let trimmed = paragraph.trim_start();
    GENERATED_SECTIONS
        .iter()
        .any(|section| trimmed.starts_with(section))
}

/// Split a parameter entry after its `name (type):` prefix.
///
/// Returns the prefix, whether the prefix names a type, and the rest of the
/// entry (continuation lines included).
pub fn split_entry(entry: &str) -> Option<(&str, bool, &str)> {
    let caps = PARAM_LINE.captures(entry)?;
    let end = caps.get(0)?.end();
    Some((&entry[..end], caps.get(3).is_some(), &entry[end..]))
}

/// False for an empty entry and for one holding only a rendered default.
fn has_description(entry: &str) -> bool {
    let rest = split_entry(entry).map_or(entry, |(_, _, rest)| rest);
    if rest.trim().is_empty() {
        return false;
    }
    match DEFAULT_ONLY.captures(rest) {
        Some(caps) => caps[1].contains("`` "),
        None => true,
    }
}

/// Split a docstring body on blank lines.
///
/// When no paragraph opens with `Args:`, an `Args:` line inside a paragraph
/// starts a paragraph of its own, so text written directly above the section
/// stays a header.
fn split_paragraphs(body: &str) -> Vec<&str> {
    let mut paragraphs: Vec<&str> = body.split("\n\n").collect();
    if paragraphs.iter().any(|p| p.trim_start().starts_with("Args:")) {
        return paragraphs;
    }

    let split = paragraphs.iter().enumerate().find_map(|(index, p)| {
        p.match_indices('\n')
            .map(|(i, _)| i)
            .find(|&i| p[i + 1..].trim_start().starts_with("Args:"))
            .map(|i| (index, i))
    });
    if let Some((index, i)) = split {
        tracing::debug!(paragraph = index, "splitting Args: section from its paragraph");
        let paragraph = paragraphs[index];
        paragraphs.splice(index..=index, [&paragraph[..i], &paragraph[i + 1..]]);
    }
    paragraphs
}

/// Strip the string prefix and the enclosing quotes from a docstring literal.
fn strip_quotes(raw: &str) -> &str {
    let text = raw.trim();
    let text = text.trim_start_matches(['r', 'R', 'u', 'U']);
    for quote in ["\"\"\"", "'''"] {
        if text.len() >= 6 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[3..text.len() - 3];
        }
    }
    for quote in ["\"", "'"] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

fn normalize_header(header: &str) -> Option<String> {
    let header = header.trim_start_matches(['\n', '\r']).trim_end();
    if header.trim().is_empty() {
        None
    } else {
        Some(header.to_string())
    }
}

/// Split an `Args:` paragraph into per-parameter entries.
///
/// Entries are re-indented so their first line sits at [`ENTRY_INDENT`];
/// continuation lines keep their indentation relative to the entry.
fn parse_params(paragraph: &str) -> BTreeMap<String, String> {
    let mut blocks: Vec<(String, bool, Vec<&str>)> = Vec::new();

    let lines = paragraph
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Args:"))
        .skip(1);
    for line in lines {
        if let Some(caps) = PARAM_LINE.captures(line) {
            let starred = !caps[1].is_empty();
            blocks.push((caps[2].to_string(), starred, vec![line]));
        } else if let Some((_, _, block)) = blocks.last_mut() {
            block.push(line);
        }
    }

    let entry_width = blocks
        .first()
        .map(|(_, _, lines)| indentation(lines[0]).chars().count())
        .unwrap_or(0);

    let mut params = BTreeMap::new();
    for (name, starred, mut lines) in blocks {
        if starred {
            continue;
        }
        while lines.len() > 1 && lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let mut text = lines
            .iter()
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    format!("{ENTRY_INDENT}{}", dedent_by(line, entry_width))
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        text.push('\n');
        params.insert(name, text);
    }
    params
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_docstring_is_empty() {
        let parsed = ExistingDocstring::parse(None);
        assert_eq!(parsed.header, None);
        assert!(parsed.params.is_empty());
        assert_eq!(parsed.footer, None);
    }

    mod quotes {
        use super::*;

        #[test]
        fn triple_quotes() {
            assert_eq!(strip_quotes("'''abc'''"), "abc");
            assert_eq!(strip_quotes("\"\"\"abc\"\"\""), "abc");
        }

        #[test]
        fn prefixed_and_single_quotes() {
            assert_eq!(strip_quotes("r\"\"\"a\\b\"\"\""), "a\\b");
            assert_eq!(strip_quotes("'abc'"), "abc");
            assert_eq!(strip_quotes("\"\""), "");
        }
    }

    mod header {
        use super::*;

        #[test]
        fn single_line_docstring_is_all_header() {
            let parsed = ExistingDocstring::parse(Some("'''I already have a description.'''"));
            assert_eq!(
                parsed.header.as_deref(),
                Some("I already have a description.")
            );
            assert!(parsed.params.is_empty());
            assert_eq!(parsed.footer, None);
        }

        #[test]
        fn header_stops_at_args() {
            let raw = "'''Summary.\n\n    More detail.\n\n    Args:\n        x: The x.\n    '''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(
                parsed.header.as_deref(),
                Some("Summary.\n\n    More detail.")
            );
        }

        #[test]
        fn header_stops_at_other_section_without_args() {
            let raw = "'''Summary.\n\n    Returns:\n        int: x\n    '''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.header.as_deref(), Some("Summary."));
            assert!(parsed.params.is_empty());
            let footer = parsed.footer.unwrap();
            assert_eq!(footer.len(), 1);
            assert!(footer[0].trim_start().starts_with("Returns:"));
        }

        #[test]
        fn leading_newlines_are_dropped() {
            let raw = "\"\"\"\nSummary.\n\"\"\"";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.header.as_deref(), Some("Summary."));
        }

        #[test]
        fn blank_header_is_absent() {
            let raw = "'''\n\nArgs:\n    x: The x.\n'''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.header, None);
            assert!(parsed.params.contains_key("x"));
        }
    }

    mod params {
        use super::*;

        #[test]
        fn single_entry() {
            let raw = "'''I already have a description.\n\n    Args:\n        p2 (int): p2 already has a description\n    '''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(
                parsed.param("p2"),
                Some("    p2 (int): p2 already has a description\n")
            );
            assert_eq!(parsed.footer, Some(vec![]));
        }

        #[test]
        fn continuation_lines_stay_with_their_entry() {
            let raw = "'''Args:\n        a (int): first\n            more about a\n        b: second\n'''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(
                parsed.param("a"),
                Some("    a (int): first\n        more about a\n")
            );
            assert_eq!(parsed.param("b"), Some("    b: second\n"));
        }

        #[test]
        fn lines_before_first_entry_are_ignored() {
            let raw = "'''Args:\n    - not an entry\n    x: the x\n'''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.params.len(), 1);
            assert_eq!(parsed.param("x"), Some("    x: the x\n"));
        }

        #[test]
        fn already_rendered_section_is_stable() {
            let raw = "\"\"\"\nSummary.\n\nArgs:\n    x (int): the x\n    *args: Variable length argument list.\n\n\"\"\"";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.param("x"), Some("    x (int): the x\n"));
            assert_eq!(parsed.params.len(), 1);
            assert_eq!(parsed.param("args"), None);
        }

        #[test]
        fn section_line_is_not_an_entry() {
            let raw = "\"\"\"\n\n\nArgs:\n    p2 (int):  default: ``2``\n\n\"\"\"";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.params.len(), 1);
            assert_eq!(
                parsed.params.get("p2").map(String::as_str),
                Some("    p2 (int):  default: ``2``\n")
            );
        }

        #[test]
        fn entry_without_description_is_not_preserved() {
            let raw = "'''Args:\n    x (TYPE): \n    y (int): kept\n'''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert!(parsed.params.contains_key("x"));
            assert_eq!(parsed.param("x"), None);
            assert_eq!(parsed.param("y"), Some("    y (int): kept\n"));
        }

        #[test]
        fn rendered_default_alone_is_not_a_description() {
            let raw = "'''Args:\n    p (int):  default: ``{'a': 1}``\n    q (int):  default: ``3`` the count\n'''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.param("p"), None);
            assert_eq!(
                parsed.param("q"),
                Some("    q (int):  default: ``3`` the count\n")
            );
        }

        #[test]
        fn args_line_without_blank_line_above() {
            let raw = "'''Summary.\n    Args:\n        x: the x\n    '''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.header.as_deref(), Some("Summary."));
            assert_eq!(parsed.param("x"), Some("    x: the x\n"));
        }
    }

    #[test]
    fn split_entry_prefix() {
        assert_eq!(
            split_entry("    p2 (int): kept\n"),
            Some(("    p2 (int):", true, " kept\n"))
        );
        assert_eq!(split_entry("    p2: kept\n"), Some(("    p2:", false, " kept\n")));
        assert_eq!(split_entry("not an entry"), None);
    }

    mod footer {
        use super::*;

        #[test]
        fn footer_after_args() {
            let raw = "'''Summary.\n\n    Args:\n        x: The x.\n\n    Note:\n        Be careful.\n    '''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(
                parsed.preserved_footer(),
                vec!["Note:\n    Be careful.".to_string()]
            );
        }

        #[test]
        fn rendered_footer_loses_surrounding_blank_lines() {
            let raw = "\"\"\"\n\n\nRaises:\n    E: \n\n\nNote:\n    Be careful.\n\n\"\"\"";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.header, None);
            assert_eq!(
                parsed.preserved_footer(),
                vec!["Note:\n    Be careful.".to_string()]
            );
        }

        #[test]
        fn generated_sections_are_not_preserved() {
            let raw = "'''Args:\n    x: The x.\n\nReturns:\n    int: 1\n\nRaises:\n    ValueError: \n\nSee also other.\n'''";
            let parsed = ExistingDocstring::parse(Some(raw));
            assert_eq!(parsed.preserved_footer(), vec!["See also other.".to_string()]);
        }
    }
}
