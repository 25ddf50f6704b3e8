//! ast-grep wrapper and Go source file classification.

use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// Whether a path names a Go source file.
#[must_use]
pub fn is_go_source(file_path: &str) -> bool {
    file_path
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| ext == "go" && !stem.is_empty() && !stem.ends_with('/'))
}

/// Whether a path names a Go test file (`*_test.go`).
#[must_use]
pub fn is_test_source(file_path: &str) -> bool {
    is_go_source(file_path) && file_path.ends_with("_test.go")
}

/// Parse Go source code into an ast-grep tree.
///
/// tree-sitter always produces a tree; syntax errors show up as `ERROR`
/// or zero-width missing nodes, which the scanner reports.
#[must_use]
pub fn parse_source(source: &str) -> AstTree {
    use ast_grep_language::LanguageExt;
    SupportLang::Go.ast_grep(source)
}
