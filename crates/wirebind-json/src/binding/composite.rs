//! Codecs for declared composite types: structs, unions and enumerations.
//!
//! Each constructor binds the declaration's type parameters into a fresh
//! scope, then records its fields with deferred codecs. Nothing nested is
//! resolved during the constructor's own execution, which is what makes
//! mutually recursive declarations safe to bind.

use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use wirebind_schema::{DeclResolver, Struct, TypeExpr, Union};

use super::{BoundParams, Codec, bind_type_params, build_codec, deferred};
use crate::error::ParseError;
use crate::memo::Memo;
use crate::value::Value;

/// One field of a struct codec.
struct FieldCodec {
    /// Logical name, keying in-memory values
    name: String,
    /// Wire name, keying the JSON object
    serialized_name: String,
    codec: Memo<Rc<Codec>>,
    /// Deferred decode of the declared default's raw JSON, when present.
    /// The outcome is cached either way; a malformed default re-propagates
    /// its error on every decode that needs it.
    default: Option<Memo<Result<Value, ParseError>>>,
}

/// Codec for a struct declaration applied to concrete type arguments.
pub(crate) struct StructCodec {
    fields: Vec<FieldCodec>,
}

impl StructCodec {
    pub(crate) fn build(
        resolver: &Rc<dyn DeclResolver>,
        decl_name: &str,
        struct_: &Struct,
        args: &[TypeExpr],
        bound: &BoundParams,
    ) -> Self {
        let scope = bind_type_params(resolver, decl_name, &struct_.type_params, args, bound);
        let fields = struct_
            .fields
            .iter()
            .map(|field| {
                let default = field.default.as_ref().map(|raw| {
                    let resolver = Rc::clone(resolver);
                    let texpr = field.type_expr.clone();
                    let scope = scope.clone();
                    let raw = raw.clone();
                    Memo::new(move || build_codec(&resolver, &texpr, &scope).decode(&raw))
                });
                FieldCodec {
                    name: field.name.clone(),
                    serialized_name: field.serialized_name.clone(),
                    codec: deferred(resolver, &field.type_expr, &scope),
                    default,
                }
            })
            .collect();
        StructCodec { fields }
    }

    pub(crate) fn encode(&self, value: &Value) -> JsonValue {
        let members = match value {
            Value::Object(members) => members,
            other => panic!("encode: expected a struct value, got {other:?}"),
        };
        let mut json = serde_json::Map::with_capacity(self.fields.len());
        for fd in &self.fields {
            // An absent member encodes as null; only bindings whose wire
            // form tolerates absence (void, nullable) accept that.
            let encoded = match members.get(fd.name.as_str()) {
                Some(member) => fd.codec.get().encode(member),
                None => fd.codec.get().encode(&Value::Null),
            };
            json.insert(fd.serialized_name.clone(), encoded);
        }
        JsonValue::Object(json)
    }

    pub(crate) fn decode(&self, json: &JsonValue) -> Result<Value, ParseError> {
        let JsonValue::Object(obj) = json else {
            return Err(ParseError::new("expected an object"));
        };
        let mut result = IndexMap::with_capacity(self.fields.len());
        for fd in &self.fields {
            match obj.get(&fd.serialized_name) {
                None => match &fd.default {
                    Some(default) => {
                        let value = default.get().clone()?;
                        result.insert(fd.name.clone(), value);
                    }
                    None => {
                        return Err(ParseError::new(format!(
                            "missing field {}",
                            fd.serialized_name
                        )));
                    }
                },
                Some(member) => match fd.codec.get().decode(member) {
                    Ok(value) => {
                        result.insert(fd.name.clone(), value);
                    }
                    Err(mut e) => {
                        e.push_field(fd.serialized_name.as_str());
                        return Err(e);
                    }
                },
            }
        }
        Ok(Value::Object(result))
    }
}

/// One variant of a union codec.
struct VariantCodec {
    name: String,
    serialized_name: String,
    is_void: bool,
    codec: Memo<Rc<Codec>>,
}

/// Codec for a union declaration with at least one non-void field.
pub(crate) struct UnionCodec {
    variants: Vec<VariantCodec>,
}

impl UnionCodec {
    pub(crate) fn build(
        resolver: &Rc<dyn DeclResolver>,
        decl_name: &str,
        union: &Union,
        args: &[TypeExpr],
        bound: &BoundParams,
    ) -> Self {
        let scope = bind_type_params(resolver, decl_name, &union.type_params, args, bound);
        let variants = union
            .fields
            .iter()
            .map(|field| VariantCodec {
                name: field.name.clone(),
                serialized_name: field.serialized_name.clone(),
                is_void: field.type_expr.is_void(),
                codec: deferred(resolver, &field.type_expr, &scope),
            })
            .collect();
        UnionCodec { variants }
    }

    fn lookup(&self, serialized_name: &str) -> Result<&VariantCodec, ParseError> {
        self.variants
            .iter()
            .find(|v| v.serialized_name == serialized_name)
            .ok_or_else(|| ParseError::new(format!("invalid union field {serialized_name}")))
    }

    pub(crate) fn encode(&self, value: &Value) -> JsonValue {
        let (tag, payload) = match value {
            Value::Variant { tag, value } => (tag, value),
            other => panic!("encode: expected a union value, got {other:?}"),
        };
        let Some(variant) = self.variants.iter().find(|v| &v.name == tag) else {
            panic!("encode: unknown union variant {tag}");
        };
        if variant.is_void {
            JsonValue::String(variant.serialized_name.clone())
        } else {
            let Some(payload) = payload else {
                panic!("encode: union variant {tag} requires a payload");
            };
            let mut json = serde_json::Map::with_capacity(1);
            json.insert(
                variant.serialized_name.clone(),
                variant.codec.get().encode(payload),
            );
            JsonValue::Object(json)
        }
    }

    pub(crate) fn decode(&self, json: &JsonValue) -> Result<Value, ParseError> {
        match json {
            // A bare string selects a void-payload field
            JsonValue::String(s) => {
                let variant = self.lookup(s)?;
                if !variant.is_void {
                    return Err(ParseError::new(format!(
                        "union field {s} needs an associated value"
                    )));
                }
                Ok(Value::unit_variant(variant.name.clone()))
            }
            // An object selects by its single key; ambiguous multi-key
            // objects are rejected rather than decoded by iteration order
            JsonValue::Object(obj) => {
                let mut entries = obj.iter();
                let Some((key, payload)) = entries.next() else {
                    return Err(ParseError::new("union without a property"));
                };
                if entries.next().is_some() {
                    return Err(ParseError::new("expected a single-keyed object for union"));
                }
                let variant = self.lookup(key)?;
                match variant.codec.get().decode(payload) {
                    Ok(value) => {
                        if variant.is_void {
                            Ok(Value::unit_variant(variant.name.clone()))
                        } else {
                            Ok(Value::variant(variant.name.clone(), value))
                        }
                    }
                    Err(mut e) => {
                        e.push_field(key.as_str());
                        Err(e)
                    }
                }
            }
            _ => Err(ParseError::new("expected an object or string")),
        }
    }
}

/// Codec for a union whose fields are all void: the wire form collapses to
/// a bare tag string, and the in-memory value is the field's ordinal.
pub(crate) struct EnumCodec {
    serialized_names: Vec<String>,
}

impl EnumCodec {
    pub(crate) fn build(union: &Union) -> Self {
        EnumCodec {
            serialized_names: union
                .fields
                .iter()
                .map(|f| f.serialized_name.clone())
                .collect(),
        }
    }

    pub(crate) fn encode(&self, value: &Value) -> JsonValue {
        let ordinal = match value {
            Value::Number(n) => n.as_u64(),
            other => panic!("encode: expected an enum ordinal, got {other:?}"),
        };
        let Some(ordinal) = ordinal else {
            panic!("encode: enum ordinal must be a non-negative integer");
        };
        match self.serialized_names.get(ordinal as usize) {
            Some(name) => JsonValue::String(name.clone()),
            None => panic!("encode: enum ordinal {ordinal} out of range"),
        }
    }

    pub(crate) fn decode(&self, json: &JsonValue) -> Result<Value, ParseError> {
        let JsonValue::String(s) = json else {
            return Err(ParseError::new("expected a string for enum"));
        };
        match self.serialized_names.iter().position(|name| name == s) {
            Some(ordinal) => Ok(Value::Number(serde_json::Number::from(ordinal as u64))),
            None => Err(ParseError::new(format!("invalid string for enum: {s}"))),
        }
    }
}
