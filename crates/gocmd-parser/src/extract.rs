//! Catalog entries for the selected functions.
//!
//! Parameters are kept only when their type is a basic type or a pointer
//! to one. An `unsafe.Pointer` parameter is reported through a
//! [`DiagnosticSink`] and then, depending on [`UnsafePointerPolicy`], ends
//! parameter collection or is skipped.

use std::fmt;

use gocmd_core::{BasicKind, ExposedFunction, Parameter, SourceLocation, UnsafePointerPolicy};

use crate::comments::{CommentIndex, combine};
use crate::filter::Candidate;
use crate::syntax::Field;
use crate::typecheck::{ShapeClass, Type, TypeResolver};

/// Tunables for [`extract`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub unsafe_pointer: UnsafePointerPolicy,
}

/// A non-fatal finding produced during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A parameter of type `unsafe.Pointer` (or a pointer to it).
    UnsafePointer { function: String, parameter: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsafePointer {
                function,
                parameter,
            } => write!(
                f,
                "Can't create command for function {function:?} because its parameter {parameter:?} is an unsafe.Pointer."
            ),
        }
    }
}

/// Receiver of extraction diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Writes each diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnsafePointer {
                function,
                parameter,
            } => tracing::warn!(%function, %parameter, "{diagnostic}"),
        }
    }
}

/// Build one [`ExposedFunction`] per candidate, in candidate order.
pub fn extract(
    candidates: &[Candidate<'_>],
    resolver: &dyn TypeResolver,
    comments: &dyn CommentIndex,
    options: &ExtractOptions,
    sink: &mut dyn DiagnosticSink,
) -> Vec<ExposedFunction> {
    candidates
        .iter()
        .map(|candidate| extract_function(candidate, resolver, comments, options, sink))
        .collect()
}

fn extract_function(
    candidate: &Candidate<'_>,
    resolver: &dyn TypeResolver,
    comments: &dyn CommentIndex,
    options: &ExtractOptions,
    sink: &mut dyn DiagnosticSink,
) -> ExposedFunction {
    let decl = candidate.decl;
    let mut parameters = Vec::with_capacity(decl.params.num_fields());

    for field in &decl.params.fields {
        let Some((kind, is_pointer)) = basic_shape(resolver, field) else {
            continue;
        };
        if kind == BasicKind::UnsafePointer {
            let parameter = field
                .names
                .first()
                .map_or_else(|| "_".to_string(), |ident| ident.name.clone());
            sink.report(Diagnostic::UnsafePointer {
                function: decl.name.name.clone(),
                parameter,
            });
            match options.unsafe_pointer {
                UnsafePointerPolicy::Truncate => break,
                UnsafePointerPolicy::Skip => continue,
            }
        }

        let field_doc = combine(comments.comments_for(field.id));
        for ident in &field.names {
            let own = combine(comments.comments_for(ident.id));
            parameters.push(Parameter {
                name: ident.name.clone(),
                kind,
                is_pointer,
                doc_comment: if own.is_empty() { field_doc.clone() } else { own },
            });
        }
    }

    ExposedFunction {
        name: decl.name.name.clone(),
        parameters,
        returns_error: candidate.shape.returns_error(),
        doc_comment: combine(comments.comments_for(decl.id)),
        signature: decl.signature.clone(),
        location: SourceLocation {
            file: candidate.file.path.display().to_string(),
            line: decl.line,
        },
    }
}

/// `(kind, is_pointer)` for a basic or pointer-to-basic field.
fn basic_shape(resolver: &dyn TypeResolver, field: &Field) -> Option<(BasicKind, bool)> {
    match resolver.field_type(field).map_or(ShapeClass::Other, Type::shape) {
        ShapeClass::Primitive(kind) => Some((kind, false)),
        ShapeClass::PointerTo(kind) => Some((kind, true)),
        ShapeClass::Other => None,
    }
}

#[cfg(test)]
mod tests;
