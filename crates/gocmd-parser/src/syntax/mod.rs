//! Owned syntax model of the Go declarations gocmd cares about.
//!
//! The ast-grep tree borrows its source, so each file is lowered once into
//! these plain structs. Every node that can carry comments or a resolved
//! type keeps the [`NodeId`] of the tree node it came from; the comment map
//! and the type checker are keyed by those ids.

pub(crate) mod lower;
pub(crate) mod scan;

use std::path::PathBuf;

/// Identity of one tree node inside a package.
///
/// A byte span alone is ambiguous (a parameter declared only by its type
/// spans exactly the same bytes as that type), so the tree depth is part of
/// the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// Index of the file in load order.
    pub file: usize,
    pub start: usize,
    pub end: usize,
    pub depth: usize,
}

impl NodeId {
    /// Whether `other` lies inside this node's span in the same file.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub id: NodeId,
    pub name: String,
}

impl Ident {
    /// Go exports identifiers that begin with an upper-case letter.
    #[must_use]
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

#[must_use]
pub fn is_exported(name: &str) -> bool {
    name.starts_with(char::is_uppercase)
}

// ── Type expressions ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A type as written in source, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub id: NodeId,
    /// 1-based line, for error reporting.
    pub line: u32,
    pub kind: TypeExprKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExprKind {
    Name(String),
    Qualified {
        package: String,
        name: String,
    },
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array {
        len: String,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func {
        params: FieldList,
        results: FieldList,
    },
    Struct(FieldList),
    /// Embedded types, unions, and method signatures (as `Func`).
    Interface(Vec<TypeExpr>),
    /// `A | B` in a constraint.
    Union(Vec<TypeExpr>),
    /// `~T` in a constraint.
    Approx(Box<TypeExpr>),
    Paren(Box<TypeExpr>),
    /// A node kind the lowering does not model; kept as source text.
    Unknown(String),
}

// ── Fields and declarations ───────────────────────────────────────

/// One entry of a parameter, result, receiver, type-parameter, or struct
/// field list: zero or more names sharing a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: NodeId,
    pub names: Vec<Ident>,
    /// For a variadic parameter this is the element type.
    pub ty: TypeExpr,
    pub variadic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    pub fields: Vec<Field>,
}

impl FieldList {
    /// Number of declared entries: named fields count once per name,
    /// unnamed fields count once.
    #[must_use]
    pub fn num_fields(&self) -> usize {
        self.fields.iter().map(|f| f.names.len().max(1)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every declared name, in order.
    pub fn names(&self) -> impl Iterator<Item = &Ident> {
        self.fields.iter().flat_map(|f| f.names.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub id: NodeId,
    pub name: Ident,
    /// `Some` for methods, even when the receiver list is malformed.
    pub receiver: Option<FieldList>,
    pub type_params: FieldList,
    pub params: FieldList,
    pub results: FieldList,
    /// Header text up to the body, whitespace-normalized.
    pub signature: String,
    pub line: u32,
}

impl FuncDecl {
    #[must_use]
    pub const fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.type_params.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub id: NodeId,
    pub name: Ident,
    pub type_params: FieldList,
    /// `type A = B` rather than `type A B`.
    pub alias: bool,
    pub ty: TypeExpr,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub id: NodeId,
    /// Explicit name: an identifier, `.` or `_`.
    pub name: Option<String>,
    pub path: String,
}

impl ImportSpec {
    /// Whether `qualifier` can refer to this import in file scope.
    ///
    /// Imported packages are never loaded, so an unaliased import answers to
    /// both its last path element and [`assumed_package_name`]: the package
    /// at `k8s.io/api/core/v1` declares `package v1`.
    #[must_use]
    pub fn binds(&self, qualifier: &str) -> bool {
        match self.name.as_deref() {
            Some("_" | ".") => false,
            Some(name) => name == qualifier,
            None => {
                let last = self.path.rsplit('/').next().unwrap_or(&self.path);
                last == qualifier || assumed_package_name(&self.path) == qualifier
            }
        }
    }

    #[must_use]
    pub fn is_dot(&self) -> bool {
        self.name.as_deref() == Some(".")
    }
}

/// Guess the package name of an import path without loading it: the last
/// path element, skipping a `vN` major-version element, without a `go-`
/// prefix, cut at the first character that cannot appear in an identifier.
#[must_use]
pub fn assumed_package_name(path: &str) -> String {
    let mut elements = path.rsplit('/');
    let mut base = elements.next().unwrap_or(path);
    let is_version = base
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()));
    if is_version {
        if let Some(parent) = elements.next() {
            base = parent;
        }
    }
    identifier_prefix(base.strip_prefix("go-").unwrap_or(base)).to_string()
}

fn identifier_prefix(text: &str) -> &str {
    let end = text
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    &text[..end]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub id: NodeId,
    pub specs: Vec<TypeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub id: NodeId,
    pub specs: Vec<ImportSpec>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Func(FuncDecl),
    Type(TypeDecl),
    Import(ImportDecl),
    /// `const` and `var` declarations; only their span matters here.
    Other(NodeId),
}

impl Decl {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        match self {
            Self::Func(f) => f.id,
            Self::Type(t) => t.id,
            Self::Import(i) => i.id,
            Self::Other(id) => *id,
        }
    }
}

/// Per-file facts that survive merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub index: usize,
    pub path: PathBuf,
    /// Package clause name; empty when the clause is missing.
    pub package: String,
    /// Byte offset of the package clause.
    pub package_offset: usize,
    /// Every import spec of this file, duplicates included.
    pub imports: Vec<ImportSpec>,
}

impl SourceFile {
    /// Look up an import by a name it binds in this file.
    #[must_use]
    pub fn import_named(&self, name: &str) -> Option<&ImportSpec> {
        self.imports.iter().find(|spec| spec.binds(name))
    }

    pub fn dot_imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.imports.iter().filter(|spec| spec.is_dot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(start: usize, end: usize) -> NodeId {
        NodeId {
            file: 0,
            start,
            end,
            depth: 1,
        }
    }

    fn ident(name: &str) -> Ident {
        Ident {
            id: id(0, name.len()),
            name: name.to_string(),
        }
    }

    fn field(names: &[&str]) -> Field {
        Field {
            id: id(0, 1),
            names: names.iter().map(|n| ident(n)).collect(),
            ty: TypeExpr {
                id: id(0, 1),
                line: 1,
                kind: TypeExprKind::Name("int".to_string()),
            },
            variadic: false,
        }
    }

    #[test]
    fn exported_names_start_upper_case() {
        assert!(is_exported("Foo"));
        assert!(is_exported("Ünicode"));
        assert!(!is_exported("foo"));
        assert!(!is_exported("_Foo"));
        assert!(!is_exported(""));
    }

    #[test]
    fn num_fields_counts_names() {
        let list = FieldList {
            fields: vec![field(&["a", "b"]), field(&[]), field(&["c"])],
        };
        assert_eq!(list.num_fields(), 4);
        let names: Vec<_> = list.names().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn contains_requires_same_file() {
        let outer = id(0, 10);
        let inner = id(2, 5);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        let other_file = NodeId { file: 1, ..inner };
        assert!(!outer.contains(&other_file));
    }

    #[test]
    fn assumed_names_follow_go_tooling() {
        assert_eq!(assumed_package_name("fmt"), "fmt");
        assert_eq!(assumed_package_name("net/http"), "http");
        assert_eq!(assumed_package_name("github.com/mattn/go-isatty"), "isatty");
        assert_eq!(assumed_package_name("gopkg.in/yaml.v3"), "yaml");
        assert_eq!(assumed_package_name("github.com/urfave/cli/v2"), "cli");
    }

    fn import(name: Option<&str>, path: &str) -> ImportSpec {
        ImportSpec {
            id: id(0, 1),
            name: name.map(str::to_string),
            path: path.to_string(),
        }
    }

    #[test]
    fn names_bound_by_special_imports() {
        assert!(import(None, "net/http").binds("http"));
        assert!(!import(Some("h"), "net/http").binds("http"));
        assert!(import(Some("h"), "net/http").binds("h"));
        assert!(!import(Some("_"), "net/http").binds("_"));
        assert!(!import(Some("."), "net/http").binds("http"));
        assert!(import(Some("."), "net/http").is_dot());
    }

    #[test]
    fn versioned_paths_bind_both_names() {
        let core = import(None, "k8s.io/api/core/v1");
        assert!(core.binds("v1"));
        assert!(core.binds("core"));
        assert!(!core.binds("api"));

        let isatty = import(None, "github.com/mattn/go-isatty");
        assert!(isatty.binds("isatty"));
        assert!(!isatty.binds("go"));
    }
}
