//! Single preorder pass over a parsed file.
//!
//! Collects the node list the comment map walks, the raw comments with the
//! line facts grouping needs, and the first syntax error in the tree.

use ast_grep_core::{Doc, Node};

use super::NodeId;
use crate::comments::{RawComment, SpanNode};

/// List wrappers with no counterpart in Go's own syntax tree.
const TRANSPARENT_KINDS: &[&str] = &[
    "statement_list",
    "import_spec_list",
    "expression_list",
    "argument_list",
    "type_arguments",
];

/// Zero-width tokens that are legitimate statement terminators.
const TERMINATOR_KINDS: &[&str] = &["\n", ";", "\0", ""];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub line: u32,
    pub message: String,
}

#[derive(Debug, Default)]
pub(crate) struct Scan {
    pub nodes: Vec<SpanNode>,
    pub comments: Vec<RawComment>,
    pub error: Option<SyntaxError>,
}

pub(crate) fn scan_tree<D: Doc>(file: usize, root: &Node<D>) -> Scan {
    let mut scanner = Scanner {
        file,
        scan: Scan::default(),
        last_token_line: None,
        token_since_comment: true,
    };
    scanner.walk(root);
    scanner.scan
}

/// Whether Go's comment association treats this kind as a grouping node
/// (file, declaration, spec, field, or statement).
fn is_important(kind: &str) -> bool {
    matches!(
        kind,
        "source_file"
            | "function_declaration"
            | "method_declaration"
            | "type_declaration"
            | "import_declaration"
            | "const_declaration"
            | "var_declaration"
            | "import_spec"
            | "type_spec"
            | "type_alias"
            | "const_spec"
            | "var_spec"
            | "parameter_declaration"
            | "variadic_parameter_declaration"
            | "type_parameter_declaration"
            | "field_declaration"
            | "method_elem"
            | "method_spec"
            | "block"
            | "short_var_declaration"
    ) || kind.ends_with("_statement")
}

struct Scanner {
    file: usize,
    scan: Scan,
    /// Start line of the most recent non-comment token.
    last_token_line: Option<u32>,
    token_since_comment: bool,
}

impl Scanner {
    /// Preorder walk with an explicit stack; binary expressions nest one
    /// level per operand.
    fn walk<D: Doc>(&mut self, root: &Node<'_, D>) {
        let mut stack = vec![(root.clone(), 0_usize)];
        while let Some((node, depth)) = stack.pop() {
            let children: Vec<_> = node.children().collect();
            self.visit(&node, depth, children.is_empty());
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
    }

    fn visit<D: Doc>(&mut self, node: &Node<'_, D>, depth: usize, leaf: bool) {
        let kind = node.kind();
        let kind = kind.as_ref();
        let range = node.range();
        let start_line = line_of(node.start_pos().line());
        let end_line = line_of(node.end_pos().line());

        if kind == "comment" {
            self.scan.comments.push(RawComment {
                start: range.start,
                start_line,
                end_line,
                text: node.text().to_string(),
                trailing: self.last_token_line == Some(start_line),
                follows_comment: !self.token_since_comment,
            });
            self.token_since_comment = false;
            return;
        }

        if self.scan.error.is_none() {
            if kind == "ERROR" {
                self.scan.error = Some(SyntaxError {
                    line: start_line,
                    message: format!("unexpected `{}`", snippet(&node.text())),
                });
            } else if depth > 0 && range.is_empty() && !TERMINATOR_KINDS.contains(&kind) {
                self.scan.error = Some(SyntaxError {
                    line: start_line,
                    message: format!("missing `{kind}`"),
                });
            }
        }

        if node.is_named() && !TRANSPARENT_KINDS.contains(&kind) {
            self.scan.nodes.push(SpanNode {
                id: NodeId {
                    file: self.file,
                    start: range.start,
                    end: range.end,
                    depth,
                },
                start_line,
                end_line,
                important: is_important(kind),
            });
        }

        if leaf && !range.is_empty() {
            self.last_token_line = Some(start_line);
            self.token_since_comment = true;
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn line_of(row: usize) -> u32 {
    row as u32 + 1
}

fn snippet(text: &str) -> String {
    let first = text.lines().next().unwrap_or_default().trim();
    if first.chars().count() > 40 {
        let cut: String = first.chars().take(40).collect();
        format!("{cut}...")
    } else {
        first.to_string()
    }
}
