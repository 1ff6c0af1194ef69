// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Literal type inference for default values and attribute right-hand sides.
//!
//! An expression is classified by evaluating it as a Python literal: numbers,
//! strings, bytes, booleans, `None`, `...`, and lists, tuples, dicts and sets
//! of literals. Operators are limited to a sign on a number and `real ± imag`
//! for complex numbers. Anything else (names, calls, arithmetic, f-strings)
//! is not a literal.
//!
//! When evaluation fails two fallbacks classify set-like text:
//!
//! 1. text starting with `set(` is a `set`
//! 2. text that becomes a list literal once `{`/`}` are rewritten to `[`/`]`
//!    is a `set` (recovers sets whose elements are not hashable)
//!
//! Everything else is [`UNKNOWN_TYPE`]. Inference never fails.

use tree_sitter::Node;
use tugdoc_core::facts::UNKNOWN_TYPE;

use crate::parse::{named_children, node_text, parse_python};

/// Kind of a successfully evaluated literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    Complex,
    Str,
    Bytes,
    Bool,
    NoneType,
    Ellipsis,
    List,
    Tuple { hashable: bool },
    Dict,
    Set,
}

impl LiteralKind {
    /// Python class name of values of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralKind::Int => "int",
            LiteralKind::Float => "float",
            LiteralKind::Complex => "complex",
            LiteralKind::Str => "str",
            LiteralKind::Bytes => "bytes",
            LiteralKind::Bool => "bool",
            LiteralKind::NoneType => "NoneType",
            LiteralKind::Ellipsis => "ellipsis",
            LiteralKind::List => "list",
            LiteralKind::Tuple { .. } => "tuple",
            LiteralKind::Dict => "dict",
            LiteralKind::Set => "set",
        }
    }

    fn is_hashable(&self) -> bool {
        match self {
            LiteralKind::List | LiteralKind::Dict | LiteralKind::Set => false,
            LiteralKind::Tuple { hashable } => *hashable,
            _ => true,
        }
    }
}

/// Infer the documented type of an expression's source text.
pub fn infer_type(text: &str) -> &'static str {
    let text = text.trim();
    if let Some(kind) = literal_kind(text) {
        return kind.type_name();
    }
    if text.starts_with("set(") {
        return "set";
    }
    let rewritten = text.replace('{', "[").replace('}', "]");
    if literal_kind(&rewritten) == Some(LiteralKind::List) {
        return "set";
    }
    UNKNOWN_TYPE
}

/// Evaluate text as a single Python literal expression.
pub fn literal_kind(text: &str) -> Option<LiteralKind> {
    let tree = parse_python(text).ok()?;
    let root = tree.root_node();
    if root.has_error() {
        return None;
    }

    let statements = named_children(root);
    let [statement] = statements.as_slice() else {
        return None;
    };
    if statement.kind() != "expression_statement" {
        return None;
    }

    // `1, 2` and `1,` parse as bare expressions separated by commas.
    let expressions = named_children(*statement);
    let mut cursor = statement.walk();
    let has_comma = statement.children(&mut cursor).any(|c| c.kind() == ",");
    match expressions.as_slice() {
        [single] if !has_comma => evaluate(*single, text),
        items => sequence(items, text).map(|hashable| LiteralKind::Tuple { hashable }),
    }
}

fn evaluate(node: Node<'_>, source: &str) -> Option<LiteralKind> {
    match node.kind() {
        "integer" | "float" => number(node, source),
        "string" => string_kind(node, source),
        "concatenated_string" => {
            let mut parts = named_children(node)
                .into_iter()
                .map(|part| string_kind(part, source));
            let first = parts.next()??;
            for part in parts {
                if part? != first {
                    return None;
                }
            }
            Some(first)
        }
        "true" | "false" => Some(LiteralKind::Bool),
        "none" => Some(LiteralKind::NoneType),
        "ellipsis" => Some(LiteralKind::Ellipsis),
        "parenthesized_expression" => {
            let children = named_children(node);
            let [inner] = children.as_slice() else {
                return None;
            };
            evaluate(*inner, source)
        }
        "list" => sequence(&named_children(node), source).map(|_| LiteralKind::List),
        "tuple" | "expression_list" => {
            sequence(&named_children(node), source).map(|hashable| LiteralKind::Tuple { hashable })
        }
        "set" => {
            let hashable = sequence(&named_children(node), source)?;
            hashable.then_some(LiteralKind::Set)
        }
        "dictionary" => {
            for pair in named_children(node) {
                if pair.kind() != "pair" {
                    return None;
                }
                let key = evaluate(pair.child_by_field_name("key")?, source)?;
                evaluate(pair.child_by_field_name("value")?, source)?;
                if !key.is_hashable() {
                    return None;
                }
            }
            Some(LiteralKind::Dict)
        }
        "unary_operator" => signed_number(node, source),
        "binary_operator" => {
            let operator = node.child_by_field_name("operator")?;
            if !matches!(operator.kind(), "+" | "-") {
                return None;
            }
            let left = signed_number(node.child_by_field_name("left")?, source)?;
            let right = number(node.child_by_field_name("right")?, source)?;
            let real = matches!(left, LiteralKind::Int | LiteralKind::Float);
            (real && right == LiteralKind::Complex).then_some(LiteralKind::Complex)
        }
        "call" => {
            // `set()` is the one call that evaluates: the empty set.
            let function = node.child_by_field_name("function")?;
            let arguments = node.child_by_field_name("arguments")?;
            let empty_set = node_text(function, source) == "set"
                && arguments.kind() == "argument_list"
                && named_children(arguments).is_empty();
            empty_set.then_some(LiteralKind::Set)
        }
        _ => None,
    }
}

/// Evaluate every element; returns whether all elements are hashable.
fn sequence(items: &[Node<'_>], source: &str) -> Option<bool> {
    let mut hashable = true;
    for item in items {
        hashable &= evaluate(*item, source)?.is_hashable();
    }
    Some(hashable)
}

/// A numeric constant, without sign.
fn number(node: Node<'_>, source: &str) -> Option<LiteralKind> {
    let node = unparenthesize(node);
    let text = node_text(node, source);
    match node.kind() {
        "integer" | "float" if text.ends_with(['j', 'J']) => Some(LiteralKind::Complex),
        "integer" => Some(LiteralKind::Int),
        "float" => Some(LiteralKind::Float),
        _ => None,
    }
}

/// A numeric constant with at most one leading `+` or `-`.
fn signed_number(node: Node<'_>, source: &str) -> Option<LiteralKind> {
    let node = unparenthesize(node);
    if node.kind() != "unary_operator" {
        return number(node, source);
    }
    let operator = node.child_by_field_name("operator")?;
    if !matches!(operator.kind(), "+" | "-") {
        return None;
    }
    number(node.child_by_field_name("argument")?, source)
}

fn unparenthesize(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        match named_children(node).as_slice() {
            [inner] => node = *inner,
            _ => break,
        }
    }
    node
}

/// `str` or `bytes` from the string prefix; f-strings are not literals.
fn string_kind(node: Node<'_>, source: &str) -> Option<LiteralKind> {
    if node.kind() != "string" {
        return None;
    }
    let text = node_text(node, source);
    let prefix: String = text
        .chars()
        .take_while(|c| *c != '\'' && *c != '"')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if prefix.contains('f') || prefix.contains('t') {
        None
    } else if prefix.contains('b') {
        Some(LiteralKind::Bytes)
    } else {
        Some(LiteralKind::Str)
    }
}

// ============================================================================
// Tests
// ============================================================================
