//! A value paired with its own type description.
//!
//! A `Dynamic` carries a JSON-encoded value together with the type
//! expression it was encoded against, so it can be shipped through untyped
//! channels and safely re-extracted where the expected type is known.

use crate::schema::TypeExpr;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dynamic {
    pub type_expr: TypeExpr,
    pub value: serde_json::Value,
}

impl Dynamic {
    pub fn new(type_expr: TypeExpr, value: serde_json::Value) -> Self {
        Dynamic { type_expr, value }
    }
}
