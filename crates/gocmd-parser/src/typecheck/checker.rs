use std::collections::{HashMap, HashSet};

use gocmd_core::BasicKind;

use super::{Type, TypeInfo};
use crate::error::ParserError;
use crate::package::Package;
use crate::syntax::{Decl, FieldList, FuncDecl, TypeExpr, TypeExprKind, TypeSpec};

/// Resolve every type written in the package's signatures and type
/// declarations.
///
/// # Errors
/// Returns `ParserError::TypeCheck` for undefined names, redeclared types or
/// functions, recursive aliases, malformed receivers, and methods on
/// non-local types.
pub fn check(package: &Package) -> Result<TypeInfo, ParserError> {
    let mut checker = Checker::new(package)?;
    checker.check_type_decls()?;
    checker.check_funcs()?;
    tracing::debug!(
        package = package.name(),
        resolved = checker.info.len(),
        "type check complete"
    );
    Ok(checker.info)
}

/// Names visible while resolving one declaration.
struct Scope<'p> {
    file: usize,
    type_params: Vec<&'p str>,
}

impl<'p> Scope<'p> {
    fn new(file: usize, type_params: &'p FieldList) -> Self {
        Self {
            file,
            type_params: type_params.names().map(|i| i.name.as_str()).collect(),
        }
    }
}

struct Checker<'p> {
    package: &'p Package,
    /// Package path used to qualify local named types.
    path: String,
    types: HashMap<&'p str, &'p TypeSpec>,
    aliases: HashMap<&'p str, Type>,
    resolving: Vec<&'p str>,
    info: TypeInfo,
}

fn universe(name: &str) -> Option<Type> {
    if let Some(kind) = BasicKind::from_predeclared(name) {
        return Some(Type::Basic(kind));
    }
    match name {
        "error" | "comparable" => Some(Type::Named {
            package: None,
            name: name.to_string(),
            args: Vec::new(),
        }),
        "any" => Some(Type::Interface(Vec::new())),
        _ => None,
    }
}

impl<'p> Checker<'p> {
    fn new(package: &'p Package) -> Result<Self, ParserError> {
        let mut checker = Self {
            package,
            path: package.directory().display().to_string(),
            types: HashMap::new(),
            aliases: HashMap::new(),
            resolving: Vec::new(),
            info: TypeInfo::default(),
        };

        for decl in package.decls() {
            let Decl::Type(decl) = decl else { continue };
            for spec in &decl.specs {
                let name = spec.name.name.as_str();
                if name == "_" {
                    continue;
                }
                if checker.types.insert(name, spec).is_some() {
                    return Err(checker.error(
                        spec.id.file,
                        spec.line,
                        format!("{name} redeclared in this block"),
                    ));
                }
            }
        }

        let mut funcs = HashSet::new();
        for decl in package.decls() {
            let Decl::Func(func) = decl else { continue };
            let name = func.name.name.as_str();
            if func.is_method() || matches!(name, "init" | "_") {
                continue;
            }
            if checker.types.contains_key(name) || !funcs.insert(name) {
                return Err(checker.error(
                    func.id.file,
                    func.line,
                    format!("{name} redeclared in this block"),
                ));
            }
        }

        Ok(checker)
    }

    fn error(&self, file: usize, line: u32, message: String) -> ParserError {
        ParserError::TypeCheck {
            file: self
                .package
                .file(file)
                .map(|f| f.path.display().to_string())
                .unwrap_or_default(),
            line,
            message,
        }
    }

    fn check_type_decls(&mut self) -> Result<(), ParserError> {
        let package = self.package;
        for decl in package.decls() {
            let Decl::Type(decl) = decl else { continue };
            for spec in &decl.specs {
                let scope = Scope::new(spec.id.file, &spec.type_params);
                self.check_type_params(&spec.type_params, &scope)?;
                if spec.alias && spec.name.name != "_" {
                    self.alias_target(spec)?;
                } else {
                    self.resolve(&spec.ty, &scope)?;
                }
            }
        }
        Ok(())
    }

    fn check_funcs(&mut self) -> Result<(), ParserError> {
        let package = self.package;
        for decl in package.decls() {
            let Decl::Func(func) = decl else { continue };
            self.check_func(func)?;
        }
        Ok(())
    }

    fn check_func(&mut self, func: &'p FuncDecl) -> Result<(), ParserError> {
        let mut scope = Scope::new(func.id.file, &func.type_params);

        if let Some(receiver) = &func.receiver {
            let field = match (receiver.num_fields(), receiver.fields.first()) {
                (1, Some(field)) => field,
                (0, _) | (_, None) => {
                    return Err(self.error(
                        func.id.file,
                        func.line,
                        format!("method {} has no receiver", func.name.name),
                    ));
                }
                _ => {
                    return Err(self.error(
                        func.id.file,
                        func.line,
                        format!("method {} has multiple receivers", func.name.name),
                    ));
                }
            };
            scope.type_params.extend(receiver_type_params(&field.ty));
            let ty = self.resolve(&field.ty, &scope)?;
            self.info.record_field(field.id, ty.clone());
            let base = match ty {
                Type::Pointer(inner) => *inner,
                other => other,
            };
            let local = matches!(&base, Type::Named { package: Some(p), .. } if *p == self.path);
            if !local {
                return Err(self.error(
                    func.id.file,
                    func.line,
                    format!("cannot define new methods on non-local type {base}"),
                ));
            }
        }

        self.check_type_params(&func.type_params, &scope)?;
        self.resolve_fields(&func.params, &scope)?;
        self.resolve_fields(&func.results, &scope)?;
        Ok(())
    }

    fn check_type_params(
        &mut self,
        params: &'p FieldList,
        scope: &Scope<'p>,
    ) -> Result<(), ParserError> {
        self.resolve_fields(params, scope).map(|_| ())
    }

    /// Resolve each field's type and record it; returns one type per name.
    fn resolve_fields(
        &mut self,
        list: &'p FieldList,
        scope: &Scope<'p>,
    ) -> Result<Vec<Type>, ParserError> {
        let mut types = Vec::with_capacity(list.num_fields());
        for field in &list.fields {
            let mut ty = self.resolve(&field.ty, scope)?;
            if field.variadic {
                ty = Type::Slice(Box::new(ty));
            }
            self.info.record_field(field.id, ty.clone());
            for _ in 0..field.names.len().max(1) {
                types.push(ty.clone());
            }
        }
        Ok(types)
    }

    fn resolve(&mut self, expr: &'p TypeExpr, scope: &Scope<'p>) -> Result<Type, ParserError> {
        let ty = match &expr.kind {
            TypeExprKind::Name(name) => self.resolve_name(name, scope, expr.line)?,
            TypeExprKind::Qualified { package, name } => {
                self.resolve_qualified(package, name, scope.file, expr.line)?
            }
            TypeExprKind::Generic { base, args } => {
                let base = self.resolve(base, scope)?;
                let resolved = args
                    .iter()
                    .map(|arg| self.resolve(arg, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                match base {
                    Type::Named { package, name, .. } => Type::Named {
                        package,
                        name,
                        args: resolved,
                    },
                    other => other,
                }
            }
            TypeExprKind::Pointer(inner) => Type::Pointer(Box::new(self.resolve(inner, scope)?)),
            TypeExprKind::Slice(elem) => Type::Slice(Box::new(self.resolve(elem, scope)?)),
            TypeExprKind::Array { len, elem } => Type::Array {
                len: len.clone(),
                elem: Box::new(self.resolve(elem, scope)?),
            },
            TypeExprKind::Map { key, value } => Type::Map {
                key: Box::new(self.resolve(key, scope)?),
                value: Box::new(self.resolve(value, scope)?),
            },
            TypeExprKind::Chan { dir, elem } => Type::Chan {
                dir: *dir,
                elem: Box::new(self.resolve(elem, scope)?),
            },
            TypeExprKind::Func { params, results } => Type::Func {
                params: self.resolve_fields(params, scope)?,
                results: self.resolve_fields(results, scope)?,
                variadic: params.fields.last().is_some_and(|f| f.variadic),
            },
            TypeExprKind::Struct(fields) => Type::Struct(self.resolve_fields(fields, scope)?),
            TypeExprKind::Interface(elems) => Type::Interface(self.resolve_all(elems, scope)?),
            TypeExprKind::Union(terms) => Type::Union(self.resolve_all(terms, scope)?),
            TypeExprKind::Approx(inner) => Type::Approx(Box::new(self.resolve(inner, scope)?)),
            TypeExprKind::Paren(inner) => self.resolve(inner, scope)?,
            TypeExprKind::Unknown(text) => Type::Opaque(text.clone()),
        };
        self.info.record_expr(expr.id, ty.clone());
        Ok(ty)
    }

    fn resolve_all(
        &mut self,
        exprs: &'p [TypeExpr],
        scope: &Scope<'p>,
    ) -> Result<Vec<Type>, ParserError> {
        exprs.iter().map(|e| self.resolve(e, scope)).collect()
    }

    /// Type parameters, then package types, then the universe, then names
    /// a dot import may provide.
    fn resolve_name(
        &mut self,
        name: &str,
        scope: &Scope<'p>,
        line: u32,
    ) -> Result<Type, ParserError> {
        if scope.type_params.contains(&name) {
            return Ok(Type::TypeParam(name.to_string()));
        }
        if let Some(&spec) = self.types.get(name) {
            if spec.alias {
                return self.alias_target(spec);
            }
            return Ok(Type::Named {
                package: Some(self.path.clone()),
                name: name.to_string(),
                args: Vec::new(),
            });
        }
        if let Some(ty) = universe(name) {
            return Ok(ty);
        }
        let dot = self
            .package
            .file(scope.file)
            .and_then(|f| f.dot_imports().next());
        if let Some(dot) = dot {
            return Ok(Type::Named {
                package: Some(dot.path.clone()),
                name: name.to_string(),
                args: Vec::new(),
            });
        }
        Err(self.error(scope.file, line, format!("undefined: {name}")))
    }

    fn resolve_qualified(
        &self,
        qualifier: &str,
        name: &str,
        file: usize,
        line: u32,
    ) -> Result<Type, ParserError> {
        let in_file = self
            .package
            .file(file)
            .and_then(|f| f.import_named(qualifier));
        let spec = in_file.or_else(|| {
            self.package
                .imports()
                .iter()
                .find(|spec| spec.binds(qualifier))
        });
        let Some(spec) = spec else {
            return Err(self.error(file, line, format!("undefined: {qualifier}")));
        };
        if spec.path == "unsafe" {
            if name == "Pointer" {
                return Ok(Type::Basic(BasicKind::UnsafePointer));
            }
            return Err(self.error(file, line, format!("undefined: unsafe.{name}")));
        }
        Ok(Type::Named {
            package: Some(spec.path.clone()),
            name: name.to_string(),
            args: Vec::new(),
        })
    }

    fn alias_target(&mut self, spec: &'p TypeSpec) -> Result<Type, ParserError> {
        let name = spec.name.name.as_str();
        if let Some(ty) = self.aliases.get(name) {
            return Ok(ty.clone());
        }
        if self.resolving.contains(&name) {
            return Err(self.error(
                spec.id.file,
                spec.line,
                format!("invalid recursive type alias {name}"),
            ));
        }
        self.resolving.push(name);
        let scope = Scope::new(spec.id.file, &spec.type_params);
        let result = self.resolve(&spec.ty, &scope);
        self.resolving.pop();
        let ty = result?;
        self.aliases.insert(name, ty.clone());
        Ok(ty)
    }
}

/// Names a generic receiver such as `*Pair[K, V]` binds for the method.
fn receiver_type_params(expr: &TypeExpr) -> Vec<&str> {
    match &expr.kind {
        TypeExprKind::Pointer(inner) | TypeExprKind::Paren(inner) => receiver_type_params(inner),
        TypeExprKind::Generic { args, .. } => args
            .iter()
            .filter_map(|arg| match &arg.kind {
                TypeExprKind::Name(name) => Some(name.as_str()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
