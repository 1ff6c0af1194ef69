//! Docstring generation entry points.
//!
//! ```text
//! source ──parse──▶ tree ──find_subject──▶ node ──queries──▶ Subject facts
//!                                                             │ infer_type
//!                                                             ▼
//!                                            DocstringStyle::render ──▶ String
//! ```

use serde::Serialize;
use tracing::{debug, debug_span, warn};
use tree_sitter::Node;
use tugdoc_core::error::{DocError, DocResult};
use tugdoc_core::facts::{
    AttributeFact, ClassFacts, FunctionFacts, ModuleFacts, RaiseFact, ReturnFact, ReturnKind,
    Subject,
};
use tugdoc_core::style::style_by_name;
use tugdoc_core::types::{Position, SubjectInfo, SubjectKind};

use crate::literal::infer_type;
use crate::parse::{node_text, parse_python, start_line};
use crate::query;

/// A rendered docstring and what it was rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    /// The subject the position resolved to.
    pub subject: SubjectInfo,
    /// Name of the style used.
    pub style: String,
    /// Docstring body: the text between the quotes.
    pub docstring: String,
}

/// Generate a docstring for the subject at `position`.
///
/// The style is resolved before the source is parsed, so an unknown style
/// fails without touching the source.
pub fn generate_docstring(source: &str, position: Position, style_name: &str) -> DocResult<Generated> {
    let style = style_by_name(style_name)?;
    let _span = debug_span!("generate_docstring", %position, style = style.name()).entered();

    let subject = extract_subject(source, position)?;
    let docstring = style.render(&subject);
    debug!(kind = %subject.kind(), bytes = docstring.len(), "generated docstring");

    Ok(Generated {
        subject: subject.info(),
        style: style.name().to_string(),
        docstring,
    })
}

/// Extract the facts of the subject at `position`.
///
/// Line 0 is rejected; column 0 is read as column 1.
pub fn extract_subject(source: &str, position: Position) -> DocResult<Subject> {
    if position.line == 0 {
        return Err(DocError::invalid_args(format!(
            "lines are 1-indexed, got {position}"
        )));
    }

    let tree = parse_python(source)?;
    let root = tree.root_node();
    if root.has_error() {
        warn!("source has syntax errors; facts may be incomplete");
    }

    let node = query::find_subject(root, source, position);
    match query::subject_kind(node) {
        Some(SubjectKind::Function) => function_facts(node, source).map(Subject::Function),
        Some(SubjectKind::Class) => class_facts(node, source).map(Subject::Class),
        Some(SubjectKind::Module) => module_facts(node, source).map(Subject::Module),
        None => Err(DocError::internal(format!(
            "position {position} resolved to '{}'",
            node.kind()
        ))),
    }
}

// ============================================================================
// Fact Builders
// ============================================================================

fn function_facts(function: Node<'_>, source: &str) -> DocResult<FunctionFacts> {
    let mut params = query::params(function, source)?;
    for param in params.iter_mut().filter(|p| p.annotation.is_none()) {
        if let Some(default) = &param.default {
            param.inferred_type = Some(infer_type(default).to_string());
        }
    }

    let return_annotation = query::return_annotation(function, source)?;
    let values = |nodes: Vec<Node<'_>>, kind: ReturnKind| -> Vec<ReturnFact> {
        nodes
            .into_iter()
            .map(|node| {
                ReturnFact::new(
                    kind,
                    return_annotation.clone(),
                    query::value_expression(node, source),
                )
            })
            .collect()
    };
    let returns = values(query::return_stmts(function)?, ReturnKind::Return);
    let yields = values(query::yield_exprs(function)?, ReturnKind::Yield);

    let mut raises = Vec::new();
    for raise in query::raise_stmts(function)? {
        match query::exception_name(raise, source) {
            Some(name) => raises.push(RaiseFact::new(name)),
            None => debug!(
                line = start_line(raise),
                "skipping raise without an exception name"
            ),
        }
    }

    Ok(FunctionFacts {
        name: query::definition_name(function, source),
        line: start_line(function),
        params,
        return_annotation,
        returns,
        yields,
        raises,
        docstring: docstring(function, source),
    })
}

fn class_facts(class: Node<'_>, source: &str) -> DocResult<ClassFacts> {
    Ok(ClassFacts {
        name: query::definition_name(class, source),
        line: start_line(class),
        attributes: attributes(class, source)?,
        docstring: docstring(class, source),
    })
}

fn module_facts(module: Node<'_>, source: &str) -> DocResult<ModuleFacts> {
    Ok(ModuleFacts {
        attributes: attributes(module, source)?,
        docstring: docstring(module, source),
    })
}

fn attributes(container: Node<'_>, source: &str) -> DocResult<Vec<AttributeFact>> {
    Ok(query::assignments(container)?
        .into_iter()
        .map(|assignment| {
            let parts = query::assignment_parts(assignment, source);
            let inferred = infer_type(&parts.value);
            let attribute = AttributeFact::new(parts.name, parts.value, inferred);
            match parts.annotation {
                Some(annotation) => attribute.with_annotation(annotation),
                None => attribute,
            }
        })
        .collect())
}

fn docstring(subject: Node<'_>, source: &str) -> Option<String> {
    query::doc_node(subject).map(|doc| node_text(doc, source).to_string())
}

// ============================================================================
// Tests
// ============================================================================
