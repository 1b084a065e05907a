//! Schema-level annotations: metadata attached to declarations, encoded in
//! the same JSON wire format as ordinary values.

use crate::naming::ScopedName;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single annotation: the scoped name of its type plus its JSON encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub name: ScopedName,
    pub value: serde_json::Value,
}

impl Annotation {
    pub fn new(name: ScopedName, value: serde_json::Value) -> Self {
        Annotation { name, value }
    }
}
