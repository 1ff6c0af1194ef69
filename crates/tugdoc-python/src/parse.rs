//! Parser setup and node text helpers.
//!
//! tree-sitter is error-recovering: source with syntax errors still yields a
//! tree, with `ERROR` nodes where recovery happened. Callers decide whether
//! that is acceptable.

use tree_sitter::{Node, Parser, Tree};
use tugdoc_core::error::{DocError, DocResult};

/// Parse Python source into a syntax tree.
pub fn parse_python(source: &str) -> DocResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| DocError::internal(format!("failed to load Python grammar: {e}")))?;
    parser.parse(source, None).ok_or_else(|| DocError::ParseFailed {
        message: "parser returned no tree".to_string(),
    })
}

/// Source text covered by a node.
pub fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Named children, skipping comments and other extras.
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();
    children
}

/// 1-indexed line on which a node starts.
pub fn start_line(node: Node<'_>) -> u32 {
    u32::try_from(node.start_position().row + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_source() {
        let source = "def f(x):\n    return x\n";
        let tree = parse_python(source).unwrap();
        let root = tree.root_node();
        assert_eq!(root.kind(), "module");
        assert!(!root.has_error());
        let children = named_children(root);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].kind(), "function_definition");
        assert_eq!(start_line(children[0]), 1);
    }

    #[test]
    fn syntax_errors_still_produce_a_tree() {
        let tree = parse_python("def f(:\n    pass\n").unwrap();
        assert!(tree.root_node().has_error());
    }

    #[test]
    fn comments_are_skipped() {
        let source = "# leading\nx = 1\n";
        let tree = parse_python(source).unwrap();
        let children = named_children(tree.root_node());
        assert_eq!(children.len(), 1);
        assert_eq!(node_text(children[0], source), "x = 1");
    }
}
