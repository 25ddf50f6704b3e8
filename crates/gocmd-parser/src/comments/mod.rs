//! Comment groups and their association with syntax nodes.
//!
//! Grouping and association follow the rules `go/parser` and `go/ast`
//! apply, so a comment ends up on the same declaration, field, or name a
//! Go programmer would expect:
//! - a comment on the same line as the token before it starts a trailing
//!   group that only absorbs further comments on that line
//! - otherwise comments on adjacent lines form one group
//! - each group is then attached to a node by [`CommentMap::associate`]

mod map;

pub use map::{CommentIndex, CommentMap};

use crate::syntax::NodeId;

/// A comment as the scanner saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub start: usize,
    pub start_line: u32,
    pub end_line: u32,
    /// Full text including the `//` or `/* */` markers.
    pub text: String,
    /// The previous non-comment token sits on the comment's first line.
    pub trailing: bool,
    /// No token separates this comment from the previous comment.
    pub follows_comment: bool,
}

/// A node in preorder, as seen by the association pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanNode {
    pub id: NodeId,
    pub start_line: u32,
    pub end_line: u32,
    /// File, declaration, spec, field, or statement.
    pub important: bool,
}

impl SpanNode {
    const fn start(&self) -> usize {
        self.id.start
    }

    const fn end(&self) -> usize {
        self.id.end
    }
}

/// A run of comments with no tokens or blank lines between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub start: usize,
    pub start_line: u32,
    pub end_line: u32,
    pub comments: Vec<String>,
}

impl CommentGroup {
    fn new(comment: RawComment) -> Self {
        Self {
            start: comment.start,
            start_line: comment.start_line,
            end_line: comment.end_line,
            comments: vec![comment.text],
        }
    }

    /// Comment text without markers.
    ///
    /// Directive lines such as `//go:generate` are dropped, trailing
    /// whitespace is trimmed, leading blank lines are removed and runs of
    /// blank lines collapse to one. Every line ends in `\n`; an empty
    /// group yields `""`.
    #[must_use]
    pub fn text(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        for comment in &self.comments {
            let body = if let Some(rest) = comment.strip_prefix("//") {
                match rest.strip_prefix(' ') {
                    Some(stripped) => stripped,
                    None if is_directive(rest) => continue,
                    None => rest,
                }
            } else if let Some(rest) = comment.strip_prefix("/*") {
                rest.strip_suffix("*/").unwrap_or(rest)
            } else {
                comment.as_str()
            };
            lines.extend(body.split('\n').map(str::trim_end));
        }

        let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
        for line in lines {
            let previous_blank = kept.last().is_none_or(|l| l.is_empty());
            if !line.is_empty() || !previous_blank {
                kept.push(line);
            }
        }
        if kept.is_empty() {
            return String::new();
        }
        if kept.last().is_some_and(|l| !l.is_empty()) {
            kept.push("");
        }
        kept.join("\n")
    }
}

/// `//line`, `//extern`, `//export`, and `//tool:cmd` style directives.
fn is_directive(rest: &str) -> bool {
    if rest.starts_with("line ") || rest.starts_with("extern ") || rest.starts_with("export ") {
        return true;
    }
    let Some(colon) = rest.find(':') else {
        return false;
    };
    let (tool, after) = rest.split_at(colon);
    let lower_alnum = |c: u8| c.is_ascii_lowercase() || c.is_ascii_digit();
    !tool.is_empty()
        && tool.bytes().all(lower_alnum)
        && after.as_bytes().get(1).copied().is_some_and(lower_alnum)
}

/// Fold scanner comments into groups.
pub(crate) fn group(comments: Vec<RawComment>) -> Vec<CommentGroup> {
    let mut groups: Vec<CommentGroup> = Vec::new();
    // Whether the open group is a trailing group (absorbs same-line only).
    let mut open_trailing = false;
    for comment in comments {
        match groups.last_mut() {
            Some(current) if comment.follows_comment => {
                let reach = u32::from(!open_trailing);
                if comment.start_line <= current.end_line + reach {
                    current.end_line = comment.end_line;
                    current.comments.push(comment.text);
                    continue;
                }
                open_trailing = false;
            }
            _ => open_trailing = comment.trailing,
        }
        groups.push(CommentGroup::new(comment));
    }
    groups
}

/// Join the text of every group with a single space.
///
/// No groups yields `""`; each group keeps its trailing newline, so two
/// groups `"a\n"` and `"b\n"` combine to `"a\n b\n"`.
#[must_use]
pub fn combine(groups: &[CommentGroup]) -> String {
    groups
        .iter()
        .map(CommentGroup::text)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn group_of(comments: &[&str]) -> CommentGroup {
        CommentGroup {
            start: 0,
            start_line: 1,
            end_line: 1,
            comments: comments.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    fn raw(line: u32, text: &str, trailing: bool, follows_comment: bool) -> RawComment {
        RawComment {
            start: line as usize * 100,
            start_line: line,
            end_line: line,
            text: text.to_string(),
            trailing,
            follows_comment,
        }
    }

    #[rstest]
    #[case::single_line(&["// Foo does things."], "Foo does things.\n")]
    #[case::no_space(&["//tight"], "tight\n")]
    #[case::multi_line(&["// one", "// two"], "one\ntwo\n")]
    #[case::block(&["/* block */"], " block\n")]
    #[case::block_lines(&["/*\nfirst\n  second  \n*/"], "first\n  second\n")]
    #[case::directive_dropped(&["// doc", "//go:generate stringer"], "doc\n")]
    #[case::line_directive(&["//line foo.go:10", "// doc"], "doc\n")]
    #[case::spaced_directive_kept(&["// go:generate x"], "go:generate x\n")]
    #[case::blank_runs_collapse(&["// a", "//", "//", "// b"], "a\n\nb\n")]
    #[case::leading_blank_removed(&["//", "// a"], "a\n")]
    #[case::trailing_blank_kept_once(&["// a", "//"], "a\n")]
    #[case::only_blank(&["//"], "")]
    fn text_rendering(#[case] comments: &[&str], #[case] expected: &str) {
        assert_eq!(group_of(comments).text(), expected);
    }

    #[test]
    fn adjacent_lines_group_together() {
        let groups = group(vec![
            raw(1, "// a", false, false),
            raw(2, "// b", false, true),
            raw(4, "// c", false, true),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].comments, vec!["// a", "// b"]);
        assert_eq!(groups[0].end_line, 2);
        assert_eq!(groups[1].comments, vec!["// c"]);
    }

    #[test]
    fn trailing_group_stops_at_line_end() {
        let groups = group(vec![
            raw(1, "/* x */", true, false),
            raw(1, "// y", true, true),
            raw(2, "// next line", false, true),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].comments, vec!["/* x */", "// y"]);
        assert_eq!(groups[1].comments, vec!["// next line"]);
    }

    #[test]
    fn tokens_between_comments_split_groups() {
        let groups = group(vec![
            raw(1, "// a", false, false),
            raw(2, "// b", true, false),
        ]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn combine_joins_with_space() {
        assert_eq!(combine(&[]), "");
        let a = group_of(&["// a"]);
        let b = group_of(&["// b"]);
        assert_eq!(combine(&[a.clone()]), "a\n");
        assert_eq!(combine(&[a, b]), "a\n b\n");
    }

    #[test]
    fn directive_detection() {
        assert!(is_directive("go:generate stringer"));
        assert!(is_directive("go:build linux"));
        assert!(is_directive("export Foo"));
        assert!(!is_directive("Go:generate"));
        assert!(!is_directive("note: not a directive"));
        assert!(!is_directive("http://example.com"));
    }
}
