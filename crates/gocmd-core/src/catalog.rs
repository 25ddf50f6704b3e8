//! The catalog of exposed functions handed to command generators.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::BasicKind;
use crate::errors::CoreError;

/// Where a declaration starts in the package sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceLocation {
    /// File path as it was read from the package directory.
    pub file: String,
    /// 1-based line of the `func` keyword.
    pub line: u32,
}

/// One argument of an exposed function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    pub name: String,
    /// Basic kind of the parameter, or of its pointee when `is_pointer` is set.
    pub kind: BasicKind,
    pub is_pointer: bool,
    /// Comment attached to this name, else the comment of its field group.
    pub doc_comment: String,
}

/// An exported, non-method function whose signature a command can call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExposedFunction {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// The single result is the predeclared `error` type.
    pub returns_error: bool,
    pub doc_comment: String,
    /// Declaration header up to the body, whitespace-normalized.
    pub signature: String,
    pub location: SourceLocation,
}

impl ExposedFunction {
    /// Look up a parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Every exposed function of one package, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    /// Package clause name.
    pub package: String,
    /// Directory the package was loaded from.
    pub directory: String,
    pub functions: Vec<ExposedFunction>,
}

impl Catalog {
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&ExposedFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Like [`Catalog::function`], but a missing name is an error.
    ///
    /// # Errors
    /// Returns `CoreError::NotFound` when no function has that name.
    pub fn require(&self, name: &str) -> Result<&ExposedFunction, CoreError> {
        self.function(name).ok_or_else(|| CoreError::NotFound {
            package: self.package.clone(),
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Catalog {
        Catalog {
            package: "tools".to_string(),
            directory: "./tools".to_string(),
            functions: vec![ExposedFunction {
                name: "Foo".to_string(),
                parameters: vec![Parameter {
                    name: "path".to_string(),
                    kind: BasicKind::String,
                    is_pointer: false,
                    doc_comment: String::new(),
                }],
                returns_error: true,
                doc_comment: "Foo does things.\n".to_string(),
                signature: "func Foo(path string) error".to_string(),
                location: SourceLocation {
                    file: "./tools/foo.go".to_string(),
                    line: 3,
                },
            }],
        }
    }

    #[test]
    fn lookup_by_name() {
        let catalog = sample();
        assert_eq!(catalog.len(), 1);
        let foo = catalog.function("Foo").expect("Foo present");
        assert_eq!(foo.parameter("path").map(|p| p.kind), Some(BasicKind::String));
        assert!(foo.parameter("missing").is_none());
    }

    #[test]
    fn require_reports_package_and_name() {
        let catalog = sample();
        let err = catalog.require("Bar").expect_err("Bar is absent");
        assert_eq!(err.to_string(), "Function not found in package tools: Bar");
    }

    #[test]
    fn serialized_field_names_are_stable() {
        let value = serde_json::to_value(sample()).expect("serialize catalog");
        let function = &value["functions"][0];
        assert_eq!(function["returns_error"], serde_json::json!(true));
        assert_eq!(function["parameters"][0]["kind"], serde_json::json!("string"));
        assert_eq!(function["parameters"][0]["is_pointer"], serde_json::json!(false));
        assert_eq!(function["location"]["line"], serde_json::json!(3));
    }
}
