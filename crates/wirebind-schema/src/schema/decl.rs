//! Declarations.
//!
//! A `Decl` is a named schema node of one of four variants: struct, union,
//! newtype or type alias. The variants form a closed sum so that codec
//! dispatch over them is exhaustive.

use super::annotations::Annotation;
use super::type_expr::TypeExpr;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named schema declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Decl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: DeclType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// The variant payload of a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum DeclType {
    Struct(Struct),
    Union(Union),
    NewType(NewType),
    TypeAlias(TypeAlias),
}

/// A product type with named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Struct {
    pub type_params: Vec<String>,
    pub fields: Vec<Field>,
}

/// A sum type. Classified as an enumeration when every field is void.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Union {
    pub type_params: Vec<String>,
    pub fields: Vec<Field>,
}

/// A distinct named wrapping of an underlying type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewType {
    pub type_params: Vec<String>,
    pub type_expr: TypeExpr,
}

/// A transparent name for an existing type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeAlias {
    pub type_params: Vec<String>,
    pub type_expr: TypeExpr,
}

/// A field of a struct or union.
///
/// The serialized name is the wire form of the field and must be unique
/// within its declaration; the logical name keys in-memory values. The
/// default, when present, is the raw JSON of the field's wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub serialized_name: String,
    pub type_expr: TypeExpr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl Decl {
    pub fn new(name: impl Into<String>, type_: DeclType) -> Self {
        Decl {
            name: name.into(),
            type_,
            annotations: vec![],
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

impl Union {
    /// A union is an enumeration iff every field's payload type is void.
    pub fn is_enum(&self) -> bool {
        self.fields.iter().all(|f| f.type_expr.is_void())
    }
}

impl Field {
    /// A field whose wire name equals its logical name, with no default
    pub fn new(name: impl Into<String>, type_expr: TypeExpr) -> Self {
        let name = name.into();
        Field {
            serialized_name: name.clone(),
            name,
            type_expr,
            default: None,
        }
    }

    pub fn with_serialized_name(mut self, serialized_name: impl Into<String>) -> Self {
        self.serialized_name = serialized_name.into();
        self
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }
}
