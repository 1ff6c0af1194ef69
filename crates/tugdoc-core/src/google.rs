//! Google-style docstring rendering.
//!
//! Output layout for a function (sections appear only when they have
//! entries):
//!
//! ```text
//! \n
//! <header>
//! \n\nArgs:\n
//!     name (type):  default: ``value``\n
//!     *args: Variable length argument list.\n
//!     **kwargs: Arbitrary keyword arguments.\n
//! \n\nReturns:\n
//!     type: expression\n
//! \n\nYields:\n
//!     type: expression\n
//! \n\nRaises:\n
//!     Name: \n
//! \n\n<footer paragraph>\n
//! \n
//! ```
//!
//! Classes and modules swap the function sections for a single
//! `Attributes:` section. The result is the text between the quotes; quoting
//! and indentation are the caller's concern.

use crate::existing::{split_entry, ExistingDocstring};
use crate::facts::{AttributeFact, ClassFacts, FunctionFacts, ModuleFacts, ParameterFact, ReturnFact};
use crate::style::DocstringStyle;

/// Body of a module docstring with nothing to say.
pub const EMPTY_MODULE: &str = "\n\nEmpty Module\n\n";

const INDENT: &str = "    ";

/// The Google docstring style.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleStyle;

impl DocstringStyle for GoogleStyle {
    fn name(&self) -> &'static str {
        "google"
    }

    fn function_docstring(&self, facts: &FunctionFacts) -> String {
        let existing = ExistingDocstring::parse(facts.docstring.as_deref());
        let mut out = String::from("\n");
        push_header(&mut out, existing.header.as_deref());

        if !facts.params.is_empty() {
            out.push_str("\n\nArgs:\n");
            for param in &facts.params {
                out.push_str(&param_entry(param, &existing));
            }
        }

        if !facts.returns.is_empty() {
            push_values(&mut out, "Returns:", &facts.returns);
        } else if let Some(annotation) = &facts.return_annotation {
            out.push_str("\n\nReturns:\n");
            out.push_str(&format!("{INDENT}{annotation}: \n"));
        }

        if !facts.yields.is_empty() {
            push_values(&mut out, "Yields:", &facts.yields);
        }

        if !facts.raises.is_empty() {
            out.push_str("\n\nRaises:\n");
            for raise in &facts.raises {
                out.push_str(&format!("{INDENT}{}: \n", raise.exception_name));
            }
        }

        push_footer(&mut out, &existing);
        out.push('\n');

        tracing::debug!(function = %facts.name, "rendered google docstring");
        out
    }

    fn class_docstring(&self, facts: &ClassFacts) -> String {
        let existing = ExistingDocstring::parse(facts.docstring.as_deref());
        let mut out = String::from("\n");
        push_header(&mut out, existing.header.as_deref());
        push_attributes(&mut out, &facts.attributes);
        push_footer(&mut out, &existing);
        out.push('\n');

        tracing::debug!(class = %facts.name, "rendered google docstring");
        out
    }

    fn module_docstring(&self, facts: &ModuleFacts) -> String {
        let existing = ExistingDocstring::parse(facts.docstring.as_deref());
        // The placeholder is output, never input.
        let header = existing
            .header
            .as_deref()
            .filter(|header| *header != EMPTY_MODULE.trim());

        let mut out = String::from("\n");
        push_header(&mut out, header);
        push_attributes(&mut out, &facts.attributes);
        push_footer(&mut out, &existing);
        out.push('\n');

        if out.trim().is_empty() {
            return EMPTY_MODULE.to_string();
        }
        out
    }
}

// ============================================================================
// Sections
// ============================================================================

fn push_header(out: &mut String, header: Option<&str>) {
    if let Some(header) = header {
        out.push_str(header);
    }
}

fn push_values(out: &mut String, section: &str, values: &[ReturnFact]) {
    out.push_str("\n\n");
    out.push_str(section);
    out.push('\n');
    for value in values {
        out.push_str(&format!("{INDENT}{}: {}\n", value.doc_type(), value.expression));
    }
}

fn push_attributes(out: &mut String, attributes: &[AttributeFact]) {
    if attributes.is_empty() {
        return;
    }
    out.push_str("\n\nAttributes:\n");
    for attribute in attributes {
        out.push_str(&format!(
            "{INDENT}{} ({}): {}\n",
            attribute.name,
            attribute.doc_type(),
            attribute.value
        ));
    }
}

fn push_footer(out: &mut String, existing: &ExistingDocstring) {
    for paragraph in existing.preserved_footer() {
        out.push_str("\n\n");
        out.push_str(&paragraph);
        out.push('\n');
    }
}

/// One `Args:` entry, preferring the preserved description.
fn param_entry(param: &ParameterFact, existing: &ExistingDocstring) -> String {
    match param.star_count() {
        1 => return format!("{INDENT}*{}: Variable length argument list.\n", param.name),
        2 => return format!("{INDENT}**{}: Arbitrary keyword arguments.\n", param.name),
        _ => {}
    }

    let suffix = param
        .default
        .as_deref()
        .map(|default| format!(" default: ``{default}``"))
        .unwrap_or_default();

    match existing.param(&param.name) {
        Some(preserved) if !suffix.is_empty() && !preserved.contains("default:") => {
            merge_default(preserved, param, &suffix)
        }
        Some(preserved) => preserved.to_string(),
        None => format!("{INDENT}{} ({}): {suffix}\n", param.name, param.doc_type()),
    }
}

/// Insert the default suffix after the entry's `name (type):` prefix.
///
/// A prefix without a type gains the derived one.
fn merge_default(preserved: &str, param: &ParameterFact, suffix: &str) -> String {
    match split_entry(preserved) {
        Some((prefix, true, rest)) => format!("{prefix} {suffix}{rest}"),
        Some((_, false, rest)) => {
            format!("{INDENT}{} ({}): {suffix}{rest}", param.name, param.doc_type())
        }
        None => preserved.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
