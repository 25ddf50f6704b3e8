//! Resolution of written types against package and universe scope.
//!
//! Only signatures and type declarations are checked; function bodies and
//! `const`/`var` initializers are ignored. Imported packages are not
//! loaded: `unsafe.Pointer` resolves to its basic kind and every other
//! qualified name becomes an opaque named type.

mod checker;

use std::collections::HashMap;
use std::fmt;

use gocmd_core::BasicKind;

pub use checker::check;

use crate::syntax::{ChanDir, Field, NodeId, TypeExpr};

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Predeclared basic type, or an alias of one.
    Basic(BasicKind),
    /// A defined type. `package` is `None` for `error` and `comparable`.
    Named {
        package: Option<String>,
        name: String,
        args: Vec<Type>,
    },
    TypeParam(String),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array {
        len: String,
        elem: Box<Type>,
    },
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<Type>,
    },
    Func {
        params: Vec<Type>,
        results: Vec<Type>,
        variadic: bool,
    },
    Struct(Vec<Type>),
    Interface(Vec<Type>),
    Union(Vec<Type>),
    Approx(Box<Type>),
    /// Source text of a construct the checker does not model.
    Opaque(String),
}

/// How a parameter type relates to the basic kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeClass {
    Primitive(BasicKind),
    PointerTo(BasicKind),
    Other,
}

impl Type {
    /// Classify after unwrapping at most one pointer.
    #[must_use]
    pub fn shape(&self) -> ShapeClass {
        match self {
            Self::Basic(kind) => ShapeClass::Primitive(*kind),
            Self::Pointer(inner) => match inner.as_ref() {
                Self::Basic(kind) => ShapeClass::PointerTo(*kind),
                _ => ShapeClass::Other,
            },
            _ => ShapeClass::Other,
        }
    }

    /// The universe `error` interface, not a package type that shadows it.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.to_string() == "error"
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[Type], sep: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(kind) => write!(f, "{kind}"),
            Self::Named {
                package,
                name,
                args,
            } => {
                if let Some(package) = package {
                    write!(f, "{package}.")?;
                }
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("[")?;
                    write_list(f, args, ", ")?;
                    f.write_str("]")?;
                }
                Ok(())
            }
            Self::TypeParam(name) => f.write_str(name),
            Self::Pointer(inner) => write!(f, "*{inner}"),
            Self::Slice(elem) => write!(f, "[]{elem}"),
            Self::Array { len, elem } => write!(f, "[{len}]{elem}"),
            Self::Map { key, value } => write!(f, "map[{key}]{value}"),
            Self::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            Self::Func {
                params,
                results,
                variadic,
            } => {
                f.write_str("func(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match param {
                        Self::Slice(elem) if *variadic && i + 1 == params.len() => {
                            write!(f, "...{elem}")?;
                        }
                        _ => write!(f, "{param}")?,
                    }
                }
                f.write_str(")")?;
                match results.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, " {single}"),
                    many => {
                        f.write_str(" (")?;
                        write_list(f, many, ", ")?;
                        f.write_str(")")
                    }
                }
            }
            Self::Struct(fields) => {
                f.write_str("struct{")?;
                write_list(f, fields, "; ")?;
                f.write_str("}")
            }
            Self::Interface(elems) => {
                f.write_str("interface{")?;
                write_list(f, elems, "; ")?;
                f.write_str("}")
            }
            Self::Union(terms) => write_list(f, terms, " | "),
            Self::Approx(inner) => write!(f, "~{inner}"),
            Self::Opaque(text) => f.write_str(text),
        }
    }
}

/// Type lookups the filter and extractor need.
pub trait TypeResolver {
    /// Resolved type of a written type expression.
    fn type_of(&self, expr: &TypeExpr) -> Option<&Type>;

    /// Declared type of every name in `field`; `[]T` for a variadic `...T`.
    fn field_type(&self, field: &Field) -> Option<&Type>;
}

/// Results of a successful [`check`].
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    exprs: HashMap<NodeId, Type>,
    fields: HashMap<NodeId, Type>,
}

impl TypeInfo {
    pub(crate) fn record_expr(&mut self, id: NodeId, ty: Type) {
        self.exprs.insert(id, ty);
    }

    pub(crate) fn record_field(&mut self, id: NodeId, ty: Type) {
        self.fields.insert(id, ty);
    }

    /// Number of resolved type expressions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

impl TypeResolver for TypeInfo {
    fn type_of(&self, expr: &TypeExpr) -> Option<&Type> {
        self.exprs.get(&expr.id)
    }

    fn field_type(&self, field: &Field) -> Option<&Type> {
        self.fields.get(&field.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(package: Option<&str>, name: &str) -> Type {
        Type::Named {
            package: package.map(str::to_string),
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    #[test]
    fn shape_unwraps_one_pointer() {
        let int = Type::Basic(BasicKind::Int);
        assert_eq!(int.shape(), ShapeClass::Primitive(BasicKind::Int));
        let ptr = Type::Pointer(Box::new(int.clone()));
        assert_eq!(ptr.shape(), ShapeClass::PointerTo(BasicKind::Int));
        let ptr_ptr = Type::Pointer(Box::new(ptr));
        assert_eq!(ptr_ptr.shape(), ShapeClass::Other);
        assert_eq!(Type::Slice(Box::new(int)).shape(), ShapeClass::Other);
        assert_eq!(named(Some("time"), "Duration").shape(), ShapeClass::Other);
    }

    #[test]
    fn only_universe_error_is_error() {
        assert!(named(None, "error").is_error());
        assert!(!named(Some("./pkg"), "error").is_error());
        assert!(!named(Some("errors"), "Error").is_error());
    }

    #[test]
    fn display_matches_go_spelling() {
        let int = || Box::new(Type::Basic(BasicKind::Int));
        assert_eq!(Type::Basic(BasicKind::UnsafePointer).to_string(), "unsafe.Pointer");
        assert_eq!(Type::Pointer(int()).to_string(), "*int");
        assert_eq!(
            Type::Map {
                key: Box::new(Type::Basic(BasicKind::String)),
                value: Box::new(Type::Slice(int())),
            }
            .to_string(),
            "map[string][]int"
        );
        assert_eq!(
            Type::Chan {
                dir: ChanDir::Recv,
                elem: int()
            }
            .to_string(),
            "<-chan int"
        );
        assert_eq!(
            Type::Func {
                params: vec![Type::Basic(BasicKind::Int), Type::Slice(int())],
                results: vec![named(None, "error")],
                variadic: true,
            }
            .to_string(),
            "func(int, ...int) error"
        );
        let pair = Type::Named {
            package: Some("p".to_string()),
            name: "Pair".to_string(),
            args: vec![Type::TypeParam("K".to_string()), Type::Basic(BasicKind::Bool)],
        };
        assert_eq!(pair.to_string(), "p.Pair[K, bool]");
        assert_eq!(Type::Interface(Vec::new()).to_string(), "interface{}");
    }
}
