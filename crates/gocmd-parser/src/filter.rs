//! Selection of functions a command can call.
//!
//! Two passes over the merged package: keep exported package-level
//! functions without type parameters, then keep those that return nothing
//! or exactly the predeclared `error`.

use crate::package::Package;
use crate::syntax::{Decl, FuncDecl, SourceFile};
use crate::typecheck::TypeResolver;

/// Which return-shape rule admitted a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    Void,
    Error,
}

impl ReturnShape {
    #[must_use]
    pub const fn returns_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A function that passed both filters.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub decl: &'a FuncDecl,
    pub file: &'a SourceFile,
    pub shape: ReturnShape,
}

/// Run both passes, preserving declaration order.
#[must_use]
pub fn select<'a>(package: &'a Package, resolver: &dyn TypeResolver) -> Vec<Candidate<'a>> {
    let exported = exported_funcs(package);
    let total = exported.len();
    let candidates: Vec<Candidate<'a>> = exported
        .into_iter()
        .filter_map(|decl| {
            let shape = return_shape(decl, resolver)?;
            let file = package.file(decl.id.file)?;
            Some(Candidate { decl, file, shape })
        })
        .collect();
    tracing::debug!(
        exported = total,
        selected = candidates.len(),
        "filtered exported functions"
    );
    candidates
}

/// Package-level functions (not methods) whose name is exported.
///
/// Generic functions are left out; a caller cannot instantiate them.
#[must_use]
pub fn exported_funcs(package: &Package) -> Vec<&FuncDecl> {
    package
        .decls()
        .iter()
        .filter_map(|decl| match decl {
            Decl::Func(func)
                if !func.is_method() && !func.is_generic() && func.name.is_exported() =>
            {
                Some(func)
            }
            _ => None,
        })
        .collect()
}

/// `Void` for no results, `Error` for one unnamed-or-single-named result of
/// the universe `error` type, `None` otherwise.
#[must_use]
pub fn return_shape(decl: &FuncDecl, resolver: &dyn TypeResolver) -> Option<ReturnShape> {
    match decl.results.num_fields() {
        0 => Some(ReturnShape::Void),
        1 => {
            let field = decl.results.fields.first()?;
            resolver
                .field_type(field)
                .filter(|ty| ty.is_error())
                .map(|_| ReturnShape::Error)
        }
        _ => None,
    }
}
