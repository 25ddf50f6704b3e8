//! Lowering of tree-sitter-go nodes into the owned syntax model.

use std::path::Path;

use ast_grep_core::{Doc, Node};

use super::scan::line_of;
use super::{
    ChanDir, Decl, Field, FieldList, FuncDecl, Ident, ImportDecl, ImportSpec, NodeId, SourceFile,
    TypeDecl, TypeExpr, TypeExprKind, TypeSpec,
};

/// A lowered file: per-file facts plus its top-level declarations.
#[derive(Debug)]
pub(crate) struct Lowered {
    pub file: SourceFile,
    pub decls: Vec<Decl>,
}

pub(crate) fn lower_file<D: Doc>(index: usize, path: &Path, root: &Node<D>) -> Lowered {
    let mut file = SourceFile {
        index,
        path: path.to_path_buf(),
        package: String::new(),
        package_offset: usize::MAX,
        imports: Vec::new(),
    };
    let mut decls = Vec::new();

    for child in root.children() {
        match child.kind().as_ref() {
            "package_clause" => {
                if let Some(name) = child
                    .children()
                    .find(|c| c.kind().as_ref() == "package_identifier")
                {
                    file.package = name.text().to_string();
                    file.package_offset = child.range().start;
                }
            }
            "import_declaration" => {
                let decl = lower_import_decl(index, &child);
                file.imports.extend(decl.specs.iter().cloned());
                decls.push(Decl::Import(decl));
            }
            "function_declaration" | "method_declaration" => {
                if let Some(func) = lower_func(index, &child) {
                    decls.push(Decl::Func(func));
                }
            }
            "type_declaration" => decls.push(Decl::Type(lower_type_decl(index, &child))),
            "const_declaration" | "var_declaration" => decls.push(Decl::Other(id_of(index, &child))),
            _ => {}
        }
    }

    Lowered { file, decls }
}

// ── helpers ───────────────────────────────────────────────────────

fn id_of<D: Doc>(file: usize, node: &Node<D>) -> NodeId {
    let range = node.range();
    NodeId {
        file,
        start: range.start,
        end: range.end,
        depth: node.ancestors().count(),
    }
}

fn line<D: Doc>(node: &Node<D>) -> u32 {
    line_of(node.start_pos().line())
}

fn ident<D: Doc>(file: usize, node: &Node<D>) -> Ident {
    Ident {
        id: id_of(file, node),
        name: node.text().to_string(),
    }
}

fn named_children<'r, D: Doc>(node: &Node<'r, D>) -> Vec<Node<'r, D>> {
    node.children()
        .filter(|c| c.is_named() && c.kind().as_ref() != "comment")
        .collect()
}

fn first_named<'r, D: Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    named_children(node).into_iter().next()
}

/// Header text up to the body, whitespace-normalized.
fn signature_text<D: Doc>(node: &Node<D>) -> String {
    let text = node.text();
    let end = node.field("body").map_or(text.len(), |body| {
        body.range().start.saturating_sub(node.range().start)
    });
    let header = text.get(..end).unwrap_or(text.as_ref());
    header.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── declarations ──────────────────────────────────────────────────

fn lower_func<D: Doc>(file: usize, node: &Node<D>) -> Option<FuncDecl> {
    let name = ident(file, &node.field("name")?);
    let receiver = (node.kind().as_ref() == "method_declaration").then(|| {
        node.field("receiver")
            .map(|list| lower_params(file, &list))
            .unwrap_or_default()
    });
    let type_params = node
        .field("type_parameters")
        .map(|list| lower_type_params(file, &list))
        .unwrap_or_default();
    let params = node
        .field("parameters")
        .map(|list| lower_params(file, &list))
        .unwrap_or_default();
    let results = node
        .field("result")
        .map(|result| lower_results(file, &result))
        .unwrap_or_default();

    Some(FuncDecl {
        id: id_of(file, node),
        name,
        receiver,
        type_params,
        params,
        results,
        signature: signature_text(node),
        line: line(node),
    })
}

fn lower_type_decl<D: Doc>(file: usize, node: &Node<D>) -> TypeDecl {
    let specs = node
        .children()
        .filter(|c| matches!(c.kind().as_ref(), "type_spec" | "type_alias"))
        .filter_map(|spec| lower_type_spec(file, &spec))
        .collect();
    TypeDecl {
        id: id_of(file, node),
        specs,
    }
}

fn lower_type_spec<D: Doc>(file: usize, node: &Node<D>) -> Option<TypeSpec> {
    let name = ident(file, &node.field("name")?);
    let ty = lower_type(file, &node.field("type")?);
    let type_params = node
        .field("type_parameters")
        .map(|list| lower_type_params(file, &list))
        .unwrap_or_default();
    Some(TypeSpec {
        id: id_of(file, node),
        name,
        type_params,
        alias: node.kind().as_ref() == "type_alias",
        ty,
        line: line(node),
    })
}

fn lower_import_decl<D: Doc>(file: usize, node: &Node<D>) -> ImportDecl {
    let mut specs = Vec::new();
    for child in node.children() {
        match child.kind().as_ref() {
            "import_spec" => specs.extend(lower_import_spec(file, &child)),
            "import_spec_list" => specs.extend(
                child
                    .children()
                    .filter(|c| c.kind().as_ref() == "import_spec")
                    .filter_map(|c| lower_import_spec(file, &c)),
            ),
            _ => {}
        }
    }
    ImportDecl {
        id: id_of(file, node),
        specs,
    }
}

fn lower_import_spec<D: Doc>(file: usize, node: &Node<D>) -> Option<ImportSpec> {
    let path = node.field("path")?;
    Some(ImportSpec {
        id: id_of(file, node),
        name: node.field("name").map(|n| n.text().to_string()),
        path: path.text().trim_matches(['"', '`']).to_string(),
    })
}

// ── field lists ───────────────────────────────────────────────────

fn lower_params<D: Doc>(file: usize, list: &Node<D>) -> FieldList {
    let fields = list
        .children()
        .filter_map(|child| match child.kind().as_ref() {
            "parameter_declaration" => lower_param(file, &child, false),
            "variadic_parameter_declaration" => lower_param(file, &child, true),
            _ => None,
        })
        .collect();
    FieldList { fields }
}

fn lower_param<D: Doc>(file: usize, node: &Node<D>, variadic: bool) -> Option<Field> {
    let ty = lower_type(file, &node.field("type")?);
    let names = node
        .children()
        .filter(|c| c.kind().as_ref() == "identifier")
        .map(|c| ident(file, &c))
        .collect();
    Some(Field {
        id: id_of(file, node),
        names,
        ty,
        variadic,
    })
}

/// A result is either a parenthesized list or a single bare type.
fn lower_results<D: Doc>(file: usize, node: &Node<D>) -> FieldList {
    if node.kind().as_ref() == "parameter_list" {
        return lower_params(file, node);
    }
    FieldList {
        fields: vec![Field {
            id: id_of(file, node),
            names: Vec::new(),
            ty: lower_type(file, node),
            variadic: false,
        }],
    }
}

fn lower_type_params<D: Doc>(file: usize, list: &Node<D>) -> FieldList {
    let fields = list
        .children()
        .filter(|c| c.kind().as_ref() == "type_parameter_declaration")
        .filter_map(|decl| {
            let constraint = decl.field("type").or_else(|| {
                named_children(&decl)
                    .into_iter()
                    .rfind(|c| c.kind().as_ref() != "identifier")
            })?;
            let names = decl
                .children()
                .filter(|c| c.kind().as_ref() == "identifier")
                .map(|c| ident(file, &c))
                .collect();
            Some(Field {
                id: id_of(file, &decl),
                names,
                ty: lower_type(file, &constraint),
                variadic: false,
            })
        })
        .collect();
    FieldList { fields }
}

fn lower_struct_fields<D: Doc>(file: usize, node: &Node<D>) -> FieldList {
    let Some(list) = node
        .children()
        .find(|c| c.kind().as_ref() == "field_declaration_list")
    else {
        return FieldList::default();
    };
    let fields = list
        .children()
        .filter(|c| c.kind().as_ref() == "field_declaration")
        .filter_map(|decl| {
            let ty_node = decl.field("type")?;
            let names: Vec<Ident> = decl
                .children()
                .filter(|c| c.kind().as_ref() == "field_identifier")
                .map(|c| ident(file, &c))
                .collect();
            let mut ty = lower_type(file, &ty_node);
            let embedded_pointer =
                names.is_empty() && decl.children().any(|c| c.kind().as_ref() == "*");
            if embedded_pointer {
                ty = TypeExpr {
                    id: id_of(file, &decl),
                    line: line(&decl),
                    kind: TypeExprKind::Pointer(Box::new(ty)),
                };
            }
            Some(Field {
                id: id_of(file, &decl),
                names,
                ty,
                variadic: false,
            })
        })
        .collect();
    FieldList { fields }
}

fn lower_interface<D: Doc>(file: usize, node: &Node<D>) -> Vec<TypeExpr> {
    named_children(node)
        .iter()
        .map(|elem| match elem.kind().as_ref() {
            "method_elem" | "method_spec" => TypeExpr {
                id: id_of(file, elem),
                line: line(elem),
                kind: func_kind(file, elem),
            },
            _ => lower_type(file, elem),
        })
        .collect()
}

// ── types ─────────────────────────────────────────────────────────

fn func_kind<D: Doc>(file: usize, node: &Node<D>) -> TypeExprKind {
    TypeExprKind::Func {
        params: node
            .field("parameters")
            .map(|list| lower_params(file, &list))
            .unwrap_or_default(),
        results: node
            .field("result")
            .map(|result| lower_results(file, &result))
            .unwrap_or_default(),
    }
}

fn chan_dir(text: &str) -> ChanDir {
    if text.starts_with("<-") {
        return ChanDir::Recv;
    }
    let after = text.trim_start_matches("chan").trim_start();
    if after.starts_with("<-") {
        ChanDir::Send
    } else {
        ChanDir::Both
    }
}

/// Lower a child type, falling back to the parent's text when the grammar
/// produced no child (only in trees the scanner already rejected).
fn sub<'r, D: Doc>(file: usize, parent: &Node<'r, D>, child: Option<Node<'r, D>>) -> Box<TypeExpr> {
    Box::new(child.map_or_else(
        || TypeExpr {
            id: id_of(file, parent),
            line: line(parent),
            kind: TypeExprKind::Unknown(parent.text().to_string()),
        },
        |c| lower_type(file, &c),
    ))
}

pub(crate) fn lower_type<D: Doc>(file: usize, node: &Node<D>) -> TypeExpr {
    let kind = match node.kind().as_ref() {
        "type_identifier" | "identifier" => TypeExprKind::Name(node.text().to_string()),
        "qualified_type" => match (node.field("package"), node.field("name")) {
            (Some(package), Some(name)) => TypeExprKind::Qualified {
                package: package.text().to_string(),
                name: name.text().to_string(),
            },
            _ => TypeExprKind::Unknown(node.text().to_string()),
        },
        "generic_type" => TypeExprKind::Generic {
            base: sub(file, node, node.field("type")),
            args: node
                .field("type_arguments")
                .map(|args| {
                    named_children(&args)
                        .iter()
                        .map(|arg| lower_type(file, arg))
                        .collect()
                })
                .unwrap_or_default(),
        },
        "pointer_type" => TypeExprKind::Pointer(sub(file, node, first_named(node))),
        "parenthesized_type" => TypeExprKind::Paren(sub(file, node, first_named(node))),
        "negated_type" => TypeExprKind::Approx(sub(file, node, first_named(node))),
        "slice_type" => TypeExprKind::Slice(sub(file, node, node.field("element"))),
        "array_type" | "implicit_length_array_type" => TypeExprKind::Array {
            len: node
                .field("length")
                .map_or_else(|| "...".to_string(), |len| len.text().to_string()),
            elem: sub(file, node, node.field("element")),
        },
        "map_type" => TypeExprKind::Map {
            key: sub(file, node, node.field("key")),
            value: sub(file, node, node.field("value")),
        },
        "channel_type" => TypeExprKind::Chan {
            dir: chan_dir(&node.text()),
            elem: sub(file, node, node.field("value")),
        },
        "function_type" => func_kind(file, node),
        "struct_type" => TypeExprKind::Struct(lower_struct_fields(file, node)),
        "interface_type" => TypeExprKind::Interface(lower_interface(file, node)),
        "type_elem" | "type_constraint" | "constraint_elem" => {
            let mut terms: Vec<TypeExpr> = named_children(node)
                .iter()
                .map(|term| lower_type(file, term))
                .collect();
            if terms.len() == 1 {
                if let Some(term) = terms.pop() {
                    return term;
                }
            }
            TypeExprKind::Union(terms)
        }
        _ => TypeExprKind::Unknown(node.text().to_string()),
    };
    TypeExpr {
        id: id_of(file, node),
        line: line(node),
        kind,
    }
}
