//! Facts extracted from a syntax tree for docstring synthesis.
//!
//! Facts are plain owned data built fresh for each generation call by a
//! language front end (see `tugdoc-python`) and consumed by the style
//! renderers. Nothing here knows about the parser that produced them.
//!
//! # Ordering
//!
//! - Parameters keep declaration order, `*args` / `**kwargs` included.
//! - Returns, yields and raises keep source order and are never deduplicated.
//! - Attributes keep source order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{SubjectInfo, SubjectKind};

/// Placeholder type name used whenever no concrete type is known.
pub const UNKNOWN_TYPE: &str = "TYPE";

// ============================================================================
// Parameters
// ============================================================================

/// Parameter kind classification for Python functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Standard named parameter (default).
    Regular,
    /// Positional-only parameter (before `/` separator).
    PositionalOnly,
    /// Keyword-only parameter (after `*` or `*args`).
    KeywordOnly,
    /// Variadic positional parameter (`*args`).
    VarArgs,
    /// Variadic keyword parameter (`**kwargs`).
    KwArgs,
}

impl ParamKind {
    /// Number of leading stars in the declaration: 0, 1 or 2.
    pub fn star_count(&self) -> u8 {
        match self {
            ParamKind::VarArgs => 1,
            ParamKind::KwArgs => 2,
            _ => 0,
        }
    }

    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Regular => "regular",
            ParamKind::PositionalOnly => "positional_only",
            ParamKind::KeywordOnly => "keyword_only",
            ParamKind::VarArgs => "var_args",
            ParamKind::KwArgs => "kwargs",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declared function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterFact {
    /// Parameter name, without stars.
    pub name: String,
    /// Parameter kind.
    pub kind: ParamKind,
    /// Annotation source text (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Default value source text (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Type inferred from the default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred_type: Option<String>,
}

impl ParameterFact {
    /// Create a parameter with no annotation and no default.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        ParameterFact {
            name: name.into(),
            kind,
            annotation: None,
            default: None,
            inferred_type: None,
        }
    }

    /// Set the annotation.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Set the default value source text.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the type inferred from the default value.
    pub fn with_inferred_type(mut self, inferred: impl Into<String>) -> Self {
        self.inferred_type = Some(inferred.into());
        self
    }

    /// Star-arity: 0 for ordinary parameters, 1 for `*args`, 2 for `**kwargs`.
    pub fn star_count(&self) -> u8 {
        self.kind.star_count()
    }

    /// The type to document: annotation, else the inferred default type,
    /// else [`UNKNOWN_TYPE`].
    pub fn doc_type(&self) -> &str {
        if let Some(annotation) = &self.annotation {
            return annotation;
        }
        match (&self.default, &self.inferred_type) {
            (Some(_), Some(inferred)) => inferred.as_str(),
            _ => UNKNOWN_TYPE,
        }
    }
}

// ============================================================================
// Returns, Yields, Raises
// ============================================================================

/// Whether a value leaves the function by `return` or `yield`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    Return,
    Yield,
}

/// A `return` statement or `yield` expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnFact {
    /// Return or yield.
    pub kind: ReturnKind,
    /// The enclosing function's return annotation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
    /// The returned/yielded expression with whitespace runs collapsed.
    /// Empty for a bare `return` / `yield`.
    pub expression: String,
}

impl ReturnFact {
    /// Create a new return or yield fact.
    pub fn new(kind: ReturnKind, declared_type: Option<String>, expression: impl Into<String>) -> Self {
        ReturnFact {
            kind,
            declared_type,
            expression: expression.into(),
        }
    }

    /// The type to document: the declared type or [`UNKNOWN_TYPE`].
    pub fn doc_type(&self) -> &str {
        self.declared_type.as_deref().unwrap_or(UNKNOWN_TYPE)
    }
}

/// A `raise` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseFact {
    /// Leftmost identifier of the raised expression.
    pub exception_name: String,
}

impl RaiseFact {
    /// Create a new raise fact.
    pub fn new(exception_name: impl Into<String>) -> Self {
        RaiseFact {
            exception_name: exception_name.into(),
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// An assignment directly inside a class or module body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFact {
    /// Assignment target source text.
    pub name: String,
    /// Right-hand side source text, trimmed. Empty for a bare annotation.
    pub value: String,
    /// Annotation source text (`x: int = 1`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Type inferred from `value`.
    pub inferred_type: String,
}

impl AttributeFact {
    /// Create a new attribute fact.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        inferred_type: impl Into<String>,
    ) -> Self {
        AttributeFact {
            name: name.into(),
            value: value.into(),
            annotation: None,
            inferred_type: inferred_type.into(),
        }
    }

    /// Set the annotation.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// The type to document: annotation, else the inferred type.
    pub fn doc_type(&self) -> &str {
        self.annotation.as_deref().unwrap_or(&self.inferred_type)
    }
}

// ============================================================================
// Subjects
// ============================================================================

/// Facts about a function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFacts {
    /// Function name.
    pub name: String,
    /// 1-indexed line of the `def`.
    pub line: u32,
    /// Declared parameters, in order.
    pub params: Vec<ParameterFact>,
    /// Return annotation source text (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_annotation: Option<String>,
    /// `return` statements, in source order.
    pub returns: Vec<ReturnFact>,
    /// `yield` expressions, in source order.
    pub yields: Vec<ReturnFact>,
    /// `raise` statements, in source order.
    pub raises: Vec<RaiseFact>,
    /// Raw docstring literal, quotes included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
}

/// Facts about a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFacts {
    /// Class name.
    pub name: String,
    /// 1-indexed line of the `class`.
    pub line: u32,
    /// Direct-body assignments, in source order.
    pub attributes: Vec<AttributeFact>,
    /// Raw docstring literal, quotes included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
}

/// Facts about a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFacts {
    /// Top-level assignments, in source order.
    pub attributes: Vec<AttributeFact>,
    /// Raw docstring literal, quotes included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
}

/// The node a docstring is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Subject {
    Function(FunctionFacts),
    Class(ClassFacts),
    Module(ModuleFacts),
}

impl Subject {
    /// The subject kind.
    pub fn kind(&self) -> SubjectKind {
        match self {
            Subject::Function(_) => SubjectKind::Function,
            Subject::Class(_) => SubjectKind::Class,
            Subject::Module(_) => SubjectKind::Module,
        }
    }

    /// Function or class name; `None` for modules.
    pub fn name(&self) -> Option<&str> {
        match self {
            Subject::Function(f) => Some(&f.name),
            Subject::Class(c) => Some(&c.name),
            Subject::Module(_) => None,
        }
    }

    /// The raw docstring literal, if the subject has one.
    pub fn docstring(&self) -> Option<&str> {
        match self {
            Subject::Function(f) => f.docstring.as_deref(),
            Subject::Class(c) => c.docstring.as_deref(),
            Subject::Module(m) => m.docstring.as_deref(),
        }
    }

    /// Summary for output.
    pub fn info(&self) -> SubjectInfo {
        let line = match self {
            Subject::Function(f) => f.line,
            Subject::Class(c) => c.line,
            Subject::Module(_) => 1,
        };
        SubjectInfo {
            kind: self.kind(),
            name: self.name().map(str::to_string),
            line,
        }
    }
}
