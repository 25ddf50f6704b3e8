//! # gocmd-parser
//!
//! ast-grep-based Go package loading and command extraction for gocmd.
//!
//! [`extract_catalog`] loads every non-test file of one package directory,
//! checks declaration types, and returns the exported functions a command
//! can call:
//! - package-level, exported, not a method, without type parameters
//! - returning nothing or exactly the predeclared `error`
//! - with parameters reduced to basic types and pointers to them
//!
//! Doc comments come from a comment map built per file, so both functions
//! and individual parameters carry their documentation.

pub mod comments;
pub mod error;
pub mod extract;
pub mod filter;
pub mod package;
pub mod parser;
pub mod syntax;
pub mod typecheck;

use std::path::Path;

use gocmd_core::Catalog;

pub use comments::{CommentGroup, CommentIndex, CommentMap, combine};
pub use error::ParserError;
pub use extract::{Diagnostic, DiagnosticSink, ExtractOptions, TracingSink, extract};
pub use filter::{Candidate, ReturnShape, select};
pub use package::{LoadOptions, Package, load_package};
pub use typecheck::{Type, TypeInfo, TypeResolver, check};

/// Options for [`extract_catalog_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogOptions {
    pub load: LoadOptions,
    pub extract: ExtractOptions,
}

/// Catalog of the package in `directory` with default options.
///
/// Diagnostics go to `tracing` at warn level.
///
/// # Errors
///
/// Returns `ParserError` when the directory cannot be read, holds no single
/// non-test package, fails to parse, or fails to type-check.
pub fn extract_catalog(directory: impl AsRef<Path>) -> Result<Catalog, ParserError> {
    extract_catalog_with(directory, &CatalogOptions::default(), &mut TracingSink)
}

/// Catalog of the package in `directory`, reporting diagnostics to `sink`.
///
/// # Errors
///
/// See [`extract_catalog`]; an invalid exclude pattern is also an error.
pub fn extract_catalog_with(
    directory: impl AsRef<Path>,
    options: &CatalogOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Catalog, ParserError> {
    let package = load_package(directory, &options.load)?;
    catalog_for(&package, &options.extract, sink)
}

/// Check an already loaded package and extract its catalog.
///
/// # Errors
///
/// Returns `ParserError::TypeCheck` for the first declaration whose types
/// do not resolve.
pub fn catalog_for(
    package: &Package,
    options: &ExtractOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Catalog, ParserError> {
    let info = check(package)?;
    let candidates = select(package, &info);
    let functions = extract(&candidates, &info, package.comments(), options, sink);
    tracing::debug!(
        package = package.name(),
        files = package.files().len(),
        functions = functions.len(),
        "extracted catalog"
    );
    Ok(Catalog {
        package: package.name().to_string(),
        directory: package.directory().display().to_string(),
        functions,
    })
}
