//! Loading one Go package directory into a single merged unit.
//!
//! Files are parsed independently, grouped by package clause, and the one
//! non-test package is merged: declarations keep file order, duplicate
//! imports (same path) are dropped, and only comments attached to a
//! retained declaration survive.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::comments::{self, CommentMap};
use crate::error::ParserError;
use crate::parser::{is_go_source, is_test_source, parse_source};
use crate::syntax::lower::lower_file;
use crate::syntax::scan::scan_tree;
use crate::syntax::{Decl, ImportSpec, NodeId, SourceFile};

/// Which files of a directory take part in the package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Glob patterns matched against file names; matching files are skipped.
    pub exclude: Vec<String>,
}

impl LoadOptions {
    fn exclude_set(&self) -> Result<GlobSet, ParserError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| ParserError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| ParserError::InvalidPattern {
            pattern: self.exclude.join(", "),
            message: e.to_string(),
        })
    }
}

/// One parsed file before merging.
#[derive(Debug)]
struct ParsedFile {
    file: SourceFile,
    decls: Vec<Decl>,
    comments: CommentMap,
    build_ignored: bool,
}

/// A merged, syntactically valid Go package.
#[derive(Debug)]
pub struct Package {
    name: String,
    directory: PathBuf,
    files: Vec<SourceFile>,
    decls: Vec<Decl>,
    imports: Vec<ImportSpec>,
    comments: CommentMap,
}

impl Package {
    /// Build a package from in-memory sources, in the order given.
    ///
    /// # Errors
    /// Returns `ParserError::ParseFailed` for a file with syntax errors,
    /// `ParserError::NoPackage` when only test packages (or no files) remain,
    /// and `ParserError::MultiplePackages` when more than one non-test
    /// package clause is present.
    pub fn from_sources<P, S>(directory: impl AsRef<Path>, sources: &[(P, S)]) -> Result<Self, ParserError>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let directory = directory.as_ref();
        let mut parsed = Vec::with_capacity(sources.len());
        for (index, (path, source)) in sources.iter().enumerate() {
            let file = parse_file(index, path.as_ref(), source.as_ref())?;
            if file.build_ignored {
                tracing::debug!(file = %path.as_ref().display(), "skipping file with ignore build constraint");
                continue;
            }
            parsed.push(file);
        }

        let mut by_package: BTreeMap<String, Vec<ParsedFile>> = BTreeMap::new();
        for file in parsed {
            if file.file.package.ends_with("_test") {
                continue;
            }
            by_package
                .entry(file.file.package.clone())
                .or_default()
                .push(file);
        }

        let path = directory.display().to_string();
        if by_package.len() > 1 {
            return Err(ParserError::MultiplePackages {
                path,
                names: by_package.into_keys().collect(),
            });
        }
        let Some((name, files)) = by_package.pop_first() else {
            return Err(ParserError::NoPackage { path });
        };

        Ok(merge(name, directory.to_path_buf(), files))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Files that make up the package, in load order.
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Look up a file by its load index.
    #[must_use]
    pub fn file(&self, index: usize) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.index == index)
    }

    /// Top-level declarations of every file, in file then source order.
    #[must_use]
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// Import specs with duplicates (same path) removed.
    #[must_use]
    pub fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    #[must_use]
    pub const fn comments(&self) -> &CommentMap {
        &self.comments
    }
}

/// Read and merge the package in `directory`.
///
/// Only `*.go` files directly inside the directory are read; `_test.go`
/// files and names matching `options.exclude` are skipped. Files are
/// processed in name order.
///
/// # Errors
/// Returns `ParserError::Io` when the directory cannot be listed,
/// `ParserError::Read` when a file cannot be read, and everything
/// [`Package::from_sources`] returns.
pub fn load_package(directory: impl AsRef<Path>, options: &LoadOptions) -> Result<Package, ParserError> {
    let directory = directory.as_ref();
    let exclude = options.exclude_set()?;
    tracing::debug!(dir = %directory.display(), "loading package");

    let mut paths = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_go_source(&name) || is_test_source(&name) {
            continue;
        }
        if exclude.is_match(&name) {
            tracing::debug!(file = %name, "excluded by pattern");
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let source = fs::read_to_string(&path).map_err(|source| ParserError::Read {
            path: path.display().to_string(),
            source,
        })?;
        sources.push((path, source));
    }
    tracing::debug!(files = sources.len(), "read package sources");

    Package::from_sources(directory, &sources)
}

fn parse_file(index: usize, path: &Path, source: &str) -> Result<ParsedFile, ParserError> {
    let tree = parse_source(source);
    let root = tree.root();
    let scan = scan_tree(index, &root);
    if let Some(error) = scan.error {
        return Err(ParserError::ParseFailed {
            file: path.display().to_string(),
            line: error.line,
            message: error.message,
        });
    }

    let lowered = lower_file(index, path, &root);
    if lowered.file.package.is_empty() {
        return Err(ParserError::ParseFailed {
            file: path.display().to_string(),
            line: 1,
            message: "expected 'package' clause".to_string(),
        });
    }

    let package_offset = lowered.file.package_offset;
    let build_ignored = scan
        .comments
        .iter()
        .take_while(|c| c.start < package_offset)
        .any(|c| is_ignore_constraint(&c.text));

    let groups = comments::group(scan.comments);
    let comments = CommentMap::associate(&scan.nodes, groups);

    Ok(ParsedFile {
        file: lowered.file,
        decls: lowered.decls,
        comments,
        build_ignored,
    })
}

/// `//go:build ignore` or `// +build ignore`, the conventional way to keep
/// a generator program out of its directory's package.
fn is_ignore_constraint(comment: &str) -> bool {
    let expr = comment
        .strip_prefix("//go:build")
        .or_else(|| comment.strip_prefix("// +build"));
    expr.is_some_and(|e| e.split_whitespace().eq(["ignore"]))
}

fn merge(name: String, directory: PathBuf, parsed: Vec<ParsedFile>) -> Package {
    let mut seen = HashSet::new();
    let mut files = Vec::with_capacity(parsed.len());
    let mut decls = Vec::new();
    let mut imports = Vec::new();
    let mut comments = CommentMap::default();

    for file in parsed {
        let mut kept: Vec<NodeId> = Vec::with_capacity(file.decls.len());
        for decl in file.decls {
            let decl = match decl {
                Decl::Import(mut import) => {
                    import.specs.retain(|spec| seen.insert(spec.path.clone()));
                    if import.specs.is_empty() {
                        continue;
                    }
                    imports.extend(import.specs.iter().cloned());
                    Decl::Import(import)
                }
                other => other,
            };
            kept.push(decl.id());
            decls.push(decl);
        }
        comments.extend(file.comments.retain_within(&kept));
        files.push(file.file);
    }

    tracing::debug!(
        package = %name,
        files = files.len(),
        decls = decls.len(),
        comments = comments.len(),
        "merged package"
    );
    Package {
        name,
        directory,
        files,
        decls,
        imports,
        comments,
    }
}
