//! Docstring style trait and registry.
//!
//! A style turns extracted facts into docstring text. Renderers are pure:
//! facts in, `String` out. The caller picks a style by name with
//! [`style_by_name`] and the renderer by subject kind with
//! [`DocstringStyle::render`].

use crate::error::{DocError, DocResult};
use crate::facts::{ClassFacts, FunctionFacts, ModuleFacts, Subject};
use crate::google::GoogleStyle;

/// Names accepted by [`style_by_name`].
pub const AVAILABLE_STYLES: &[&str] = &["google"];

/// The style used when none is requested.
pub const DEFAULT_STYLE: &str = "google";

/// A docstring format.
pub trait DocstringStyle: Send + Sync {
    /// Registry name of the style.
    fn name(&self) -> &'static str;

    /// Render the docstring body for a function.
    fn function_docstring(&self, facts: &FunctionFacts) -> String;

    /// Render the docstring body for a class.
    fn class_docstring(&self, facts: &ClassFacts) -> String;

    /// Render the docstring body for a module.
    fn module_docstring(&self, facts: &ModuleFacts) -> String;

    /// Render by subject kind.
    fn render(&self, subject: &Subject) -> String {
        match subject {
            Subject::Function(facts) => self.function_docstring(facts),
            Subject::Class(facts) => self.class_docstring(facts),
            Subject::Module(facts) => self.module_docstring(facts),
        }
    }
}

/// Look up a style by name (ASCII case-insensitive).
pub fn style_by_name(name: &str) -> DocResult<Box<dyn DocstringStyle>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "google" => Ok(Box::new(GoogleStyle)),
        _ => Err(DocError::UnknownStyle {
            name: name.to_string(),
            available: AVAILABLE_STYLES.join(", "),
        }),
    }
}
