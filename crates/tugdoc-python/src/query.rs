// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tree queries over tree-sitter-python syntax trees.
//!
//! Each query takes the node of a subject (a `function_definition`,
//! `class_definition` or `module`) and answers one question about it:
//! its parameters, its docstring literal, the `return`/`yield`/`raise`
//! nodes that belong to it, or its direct-body assignments.
//!
//! Queries that belong to one subject kind check the node kind first and
//! return [`DocError::SubjectMismatch`] for anything else.
//!
//! # Scope
//!
//! `return`, `yield` and `raise` are collected from the subject's own body in
//! source order. Nested `def`, `class` and `lambda` bodies are separate scopes
//! and are never entered; decorator expressions of a nested definition are.

use tree_sitter::Node;
use tugdoc_core::error::{DocError, DocResult};
use tugdoc_core::facts::{ParamKind, ParameterFact};
use tugdoc_core::text::{collapse_whitespace, position_to_byte_offset};
use tugdoc_core::types::{Position, SubjectKind};

use crate::parse::{named_children, node_text};

const FUNCTION: &str = "function_definition";
const CLASS: &str = "class_definition";
const MODULE: &str = "module";

// ============================================================================
// Subject Lookup
// ============================================================================

/// Find the innermost function or class containing `position`.
///
/// A position on a decorator resolves to the decorated definition. Anything
/// outside every definition resolves to the module (`root`).
pub fn find_subject<'t>(root: Node<'t>, source: &str, position: Position) -> Node<'t> {
    let offset = position_to_byte_offset(source, position);
    let Some(mut node) = root.descendant_for_byte_range(offset, offset) else {
        return root;
    };
    loop {
        match node.kind() {
            FUNCTION | CLASS => return node,
            "decorated_definition" => {
                if let Some(definition) = node.child_by_field_name("definition") {
                    return definition;
                }
            }
            _ => {}
        }
        match node.parent() {
            Some(parent) => node = parent,
            None => return root,
        }
    }
}

/// The subject kind of a node, if it is one.
pub fn subject_kind(node: Node<'_>) -> Option<SubjectKind> {
    match node.kind() {
        FUNCTION => Some(SubjectKind::Function),
        CLASS => Some(SubjectKind::Class),
        MODULE => Some(SubjectKind::Module),
        _ => None,
    }
}

fn expect_kind(node: Node<'_>, expected: SubjectKind) -> DocResult<()> {
    if subject_kind(node) == Some(expected) {
        Ok(())
    } else {
        Err(DocError::subject_mismatch(expected, node.kind()))
    }
}

/// Name of a function or class.
pub fn definition_name(definition: Node<'_>, source: &str) -> String {
    definition
        .child_by_field_name("name")
        .map(|name| node_text(name, source).to_string())
        .unwrap_or_default()
}

// ============================================================================
// Parameters
// ============================================================================

/// Declared parameters of a function, in order.
///
/// The bare `*` and `/` separators are not parameters; they only change the
/// kind of the parameters around them.
pub fn params(function: Node<'_>, source: &str) -> DocResult<Vec<ParameterFact>> {
    expect_kind(function, SubjectKind::Function)?;
    let Some(parameters) = function.child_by_field_name("parameters") else {
        return Ok(Vec::new());
    };

    let mut result: Vec<ParameterFact> = Vec::new();
    let mut keyword_only = false;
    for child in named_children(parameters) {
        match child.kind() {
            "keyword_separator" => keyword_only = true,
            "positional_separator" => {
                for param in result.iter_mut().filter(|p| p.kind == ParamKind::Regular) {
                    param.kind = ParamKind::PositionalOnly;
                }
            }
            _ => {
                let Some(param) = parameter(child, source, keyword_only) else {
                    tracing::debug!(kind = child.kind(), "skipping unsupported parameter");
                    continue;
                };
                if param.kind == ParamKind::VarArgs {
                    keyword_only = true;
                }
                result.push(param);
            }
        }
    }
    Ok(result)
}

fn parameter(node: Node<'_>, source: &str, keyword_only: bool) -> Option<ParameterFact> {
    let regular = if keyword_only {
        ParamKind::KeywordOnly
    } else {
        ParamKind::Regular
    };
    let text = |n: Node<'_>| node_text(n, source).to_string();

    match node.kind() {
        "identifier" => Some(ParameterFact::new(text(node), regular)),
        "list_splat_pattern" | "dictionary_splat_pattern" => splat(node, source),
        "typed_parameter" => {
            let annotation = node.child_by_field_name("type")?;
            let target = named_children(node)
                .into_iter()
                .find(|child| child.id() != annotation.id())?;
            let param = match target.kind() {
                "identifier" => ParameterFact::new(text(target), regular),
                _ => splat(target, source)?,
            };
            Some(param.with_annotation(text(annotation)))
        }
        "default_parameter" => {
            let name = node.child_by_field_name("name")?;
            if name.kind() != "identifier" {
                return None;
            }
            let value = node.child_by_field_name("value")?;
            Some(ParameterFact::new(text(name), regular).with_default(text(value)))
        }
        "typed_default_parameter" => {
            let name = node.child_by_field_name("name")?;
            let annotation = node.child_by_field_name("type")?;
            let value = node.child_by_field_name("value")?;
            Some(
                ParameterFact::new(text(name), regular)
                    .with_annotation(text(annotation))
                    .with_default(text(value)),
            )
        }
        _ => None,
    }
}

/// `*args` or `**kwargs`.
fn splat(node: Node<'_>, source: &str) -> Option<ParameterFact> {
    let kind = match node.kind() {
        "list_splat_pattern" => ParamKind::VarArgs,
        "dictionary_splat_pattern" => ParamKind::KwArgs,
        _ => return None,
    };
    let name = named_children(node).into_iter().next()?;
    Some(ParameterFact::new(node_text(name, source), kind))
}

/// Return annotation of a function.
pub fn return_annotation(function: Node<'_>, source: &str) -> DocResult<Option<String>> {
    expect_kind(function, SubjectKind::Function)?;
    Ok(function
        .child_by_field_name("return_type")
        .map(|annotation| node_text(annotation, source).to_string()))
}

// ============================================================================
// Docstring
// ============================================================================

/// The docstring literal of a function, class or module.
///
/// That is the first statement of the body when it is a lone string
/// expression.
pub fn doc_node(subject: Node<'_>) -> Option<Node<'_>> {
    let body = match subject_kind(subject)? {
        SubjectKind::Module => subject,
        SubjectKind::Function | SubjectKind::Class => subject.child_by_field_name("body")?,
    };
    let first = named_children(body).into_iter().next()?;
    if first.kind() != "expression_statement" {
        return None;
    }
    match named_children(first).as_slice() {
        [string] if matches!(string.kind(), "string" | "concatenated_string") => Some(*string),
        _ => None,
    }
}

// ============================================================================
// Returns, Yields, Raises
// ============================================================================

/// `return` statements of a function, in source order.
pub fn return_stmts(function: Node<'_>) -> DocResult<Vec<Node<'_>>> {
    collect_in_scope(function, "return_statement")
}

/// `yield` expressions of a function, in source order.
pub fn yield_exprs(function: Node<'_>) -> DocResult<Vec<Node<'_>>> {
    collect_in_scope(function, "yield")
}

/// `raise` statements of a function, in source order.
pub fn raise_stmts(function: Node<'_>) -> DocResult<Vec<Node<'_>>> {
    collect_in_scope(function, "raise_statement")
}

fn collect_in_scope<'t>(function: Node<'t>, kind: &str) -> DocResult<Vec<Node<'t>>> {
    expect_kind(function, SubjectKind::Function)?;
    let mut found = Vec::new();
    if let Some(body) = function.child_by_field_name("body") {
        walk_scope(body, kind, &mut found);
    }
    Ok(found)
}

fn walk_scope<'t>(node: Node<'t>, kind: &str, found: &mut Vec<Node<'t>>) {
    for child in named_children(node) {
        if matches!(child.kind(), FUNCTION | CLASS | "lambda") {
            continue;
        }
        if child.kind() == kind {
            found.push(child);
        }
        walk_scope(child, kind, found);
    }
}

/// The text after a `return`/`yield` keyword, whitespace collapsed.
///
/// Empty for a bare `return` or `yield`. For `yield from x` this is
/// `from x`.
pub fn value_expression(statement: Node<'_>, source: &str) -> String {
    let mut cursor = statement.walk();
    let start = statement
        .children(&mut cursor)
        .next()
        .map_or(statement.start_byte(), |keyword| keyword.end_byte());
    let text = source.get(start..statement.end_byte()).unwrap_or("");
    collapse_whitespace(text)
}

/// Name of the raised exception: the leftmost identifier of the raised
/// expression.
///
/// `None` for a bare `raise` or an expression without an identifier.
pub fn exception_name(raise: Node<'_>, source: &str) -> Option<String> {
    let mut node = named_children(raise).into_iter().next()?;
    loop {
        if node.kind() == "identifier" {
            return Some(node_text(node, source).to_string());
        }
        node = named_children(node).into_iter().next()?;
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// Source parts of an attribute assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentParts {
    /// Target text.
    pub name: String,
    /// Right-hand side text, trimmed. Chained assignments yield the final
    /// value; a bare annotation yields an empty string.
    pub value: String,
    /// Annotation text for `x: T = v`.
    pub annotation: Option<String>,
}

/// Assignments among the direct statements of a class body or module.
pub fn assignments(container: Node<'_>) -> DocResult<Vec<Node<'_>>> {
    let body = match subject_kind(container) {
        Some(SubjectKind::Module) => container,
        Some(SubjectKind::Class) => match container.child_by_field_name("body") {
            Some(body) => body,
            None => return Ok(Vec::new()),
        },
        _ => return Err(DocError::subject_mismatch(SubjectKind::Class, container.kind())),
    };

    Ok(named_children(body)
        .into_iter()
        .filter(|statement| statement.kind() == "expression_statement")
        .flat_map(named_children)
        .filter(|expr| matches!(expr.kind(), "assignment" | "augmented_assignment"))
        .collect())
}

/// Split an `assignment` or `augmented_assignment` into its parts.
pub fn assignment_parts(assignment: Node<'_>, source: &str) -> AssignmentParts {
    let text = |n: Node<'_>| node_text(n, source).trim().to_string();
    let name = assignment
        .child_by_field_name("left")
        .map(text)
        .unwrap_or_default();
    let annotation = assignment.child_by_field_name("type").map(text);

    let mut value = assignment.child_by_field_name("right");
    while let Some(inner) = value {
        if !matches!(inner.kind(), "assignment" | "augmented_assignment") {
            break;
        }
        value = inner.child_by_field_name("right");
    }

    AssignmentParts {
        name,
        value: value.map(text).unwrap_or_default(),
        annotation,
    }
}

// ============================================================================
// Tests
// ============================================================================
