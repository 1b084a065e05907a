//! Codecs for the primitive vocabulary: atomic scalars and the
//! parametrized containers (vector, string-keyed map, nullable, bytes).

use std::rc::Rc;

use base64::{Engine, engine::general_purpose::STANDARD};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use wirebind_schema::{DeclResolver, Primitive, TypeExpr};

use super::{BoundParams, Codec, deferred};
use crate::error::ParseError;
use crate::memo::Memo;
use crate::value::Value;

/// Build the codec for a primitive type expression.
pub(crate) fn build(
    resolver: &Rc<dyn DeclResolver>,
    primitive: Primitive,
    params: &[TypeExpr],
    bound: &BoundParams,
) -> Rc<Codec> {
    match primitive {
        Primitive::Void => Rc::new(Codec::Scalar(ScalarCodec::new(ScalarKind::Null))),
        Primitive::Bool => Rc::new(Codec::Scalar(ScalarCodec::new(ScalarKind::Bool))),
        Primitive::Int8
        | Primitive::Int16
        | Primitive::Int32
        | Primitive::Int64
        | Primitive::Word8
        | Primitive::Word16
        | Primitive::Word32
        | Primitive::Word64
        | Primitive::Float
        | Primitive::Double => Rc::new(Codec::Scalar(ScalarCodec::new(ScalarKind::Number))),
        Primitive::String => Rc::new(Codec::Scalar(ScalarCodec::new(ScalarKind::String))),
        Primitive::Json => Rc::new(Codec::Scalar(ScalarCodec::new(ScalarKind::Json))),
        Primitive::Bytes => Rc::new(Codec::Bytes(BytesCodec)),
        Primitive::Vector => Rc::new(Codec::Vector(VectorCodec {
            element: element(resolver, primitive, params, bound),
        })),
        Primitive::StringMap => Rc::new(Codec::StringMap(StringMapCodec {
            element: element(resolver, primitive, params, bound),
        })),
        Primitive::Nullable => Rc::new(Codec::Nullable(NullableCodec {
            element: element(resolver, primitive, params, bound),
        })),
    }
}

fn element(
    resolver: &Rc<dyn DeclResolver>,
    primitive: Primitive,
    params: &[TypeExpr],
    bound: &BoundParams,
) -> Memo<Rc<Codec>> {
    match params {
        [texpr] => deferred(resolver, texpr, bound),
        _ => panic!("{primitive} takes one type argument, got {}", params.len()),
    }
}

/// The JSON kind an atomic scalar asserts on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarKind {
    Null,
    Bool,
    Number,
    String,
    /// Opaque JSON: any kind passes
    Json,
}

impl ScalarKind {
    fn expected(self) -> &'static str {
        match self {
            ScalarKind::Null => "a null",
            ScalarKind::Bool => "a bool",
            ScalarKind::Number => "a number",
            ScalarKind::String => "a string",
            ScalarKind::Json => "a json value",
        }
    }
}

/// Identity-pass codec for an atomic scalar.
///
/// Encode passes the value through; decode asserts the JSON kind and
/// nothing more. There are no numeric-range checks.
pub(crate) struct ScalarCodec {
    kind: ScalarKind,
}

impl ScalarCodec {
    pub(crate) fn new(kind: ScalarKind) -> Self {
        ScalarCodec { kind }
    }

    pub(crate) fn encode(&self, value: &Value) -> JsonValue {
        match (self.kind, value) {
            (ScalarKind::Null, Value::Null) => JsonValue::Null,
            (ScalarKind::Bool, Value::Bool(b)) => JsonValue::Bool(*b),
            (ScalarKind::Number, Value::Number(n)) => JsonValue::Number(n.clone()),
            (ScalarKind::String, Value::String(s)) => JsonValue::String(s.clone()),
            (ScalarKind::Json, Value::Json(v)) => v.clone(),
            (kind, other) => panic!("encode: expected {} value, got {other:?}", kind.expected()),
        }
    }

    pub(crate) fn decode(&self, json: &JsonValue) -> Result<Value, ParseError> {
        match (self.kind, json) {
            (ScalarKind::Null, JsonValue::Null) => Ok(Value::Null),
            (ScalarKind::Bool, JsonValue::Bool(b)) => Ok(Value::Bool(*b)),
            (ScalarKind::Number, JsonValue::Number(n)) => Ok(Value::Number(n.clone())),
            (ScalarKind::String, JsonValue::String(s)) => Ok(Value::String(s.clone())),
            (ScalarKind::Json, any) => Ok(Value::Json(any.clone())),
            (kind, _) => Err(ParseError::new(format!("expected {}", kind.expected()))),
        }
    }
}

/// Byte sequences travel as standard-alphabet base64 strings.
pub(crate) struct BytesCodec;

impl BytesCodec {
    pub(crate) fn encode(&self, value: &Value) -> JsonValue {
        match value {
            Value::Bytes(bytes) => JsonValue::String(STANDARD.encode(bytes)),
            other => panic!("encode: expected a bytes value, got {other:?}"),
        }
    }

    pub(crate) fn decode(&self, json: &JsonValue) -> Result<Value, ParseError> {
        let JsonValue::String(s) = json else {
            return Err(ParseError::new("expected a string"));
        };
        STANDARD
            .decode(s)
            .map(Value::Bytes)
            .map_err(|_| ParseError::new("invalid base64 string"))
    }
}

/// An ordered sequence of one element type.
pub(crate) struct VectorCodec {
    pub(crate) element: Memo<Rc<Codec>>,
}

impl VectorCodec {
    pub(crate) fn encode(&self, value: &Value) -> JsonValue {
        match value {
            Value::Array(items) => {
                let element = self.element.get();
                JsonValue::Array(items.iter().map(|item| element.encode(item)).collect())
            }
            other => panic!("encode: expected an array value, got {other:?}"),
        }
    }

    pub(crate) fn decode(&self, json: &JsonValue) -> Result<Value, ParseError> {
        let JsonValue::Array(items) = json else {
            return Err(ParseError::new("expected an array"));
        };
        let element = self.element.get();
        let mut result = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match element.decode(item) {
                Ok(value) => result.push(value),
                // Fail fast on the first bad element; no partial result
                Err(mut e) => {
                    e.push_index(index);
                    return Err(e);
                }
            }
        }
        Ok(Value::Array(result))
    }
}

/// A string-keyed map of one element type. Key order is irrelevant on the
/// wire; keys are unique by construction of JSON objects.
pub(crate) struct StringMapCodec {
    pub(crate) element: Memo<Rc<Codec>>,
}

impl StringMapCodec {
    pub(crate) fn encode(&self, value: &Value) -> JsonValue {
        match value {
            Value::Object(entries) => {
                let element = self.element.get();
                JsonValue::Object(
                    entries
                        .iter()
                        .map(|(key, value)| (key.clone(), element.encode(value)))
                        .collect(),
                )
            }
            other => panic!("encode: expected an object value, got {other:?}"),
        }
    }

    pub(crate) fn decode(&self, json: &JsonValue) -> Result<Value, ParseError> {
        let JsonValue::Object(entries) = json else {
            return Err(ParseError::new("expected an object"));
        };
        let element = self.element.get();
        let mut result = IndexMap::with_capacity(entries.len());
        for (key, value) in entries {
            match element.decode(value) {
                Ok(decoded) => {
                    result.insert(key.clone(), decoded);
                }
                Err(mut e) => {
                    e.push_field(key.as_str());
                    return Err(e);
                }
            }
        }
        Ok(Value::Object(result))
    }
}

/// JSON null maps bidirectionally to the explicit absent value; anything
/// else passes through the element codec.
pub(crate) struct NullableCodec {
    pub(crate) element: Memo<Rc<Codec>>,
}

impl NullableCodec {
    pub(crate) fn encode(&self, value: &Value) -> JsonValue {
        match value {
            Value::Null => JsonValue::Null,
            other => self.element.get().encode(other),
        }
    }

    pub(crate) fn decode(&self, json: &JsonValue) -> Result<Value, ParseError> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            other => self.element.get().decode(other),
        }
    }
}
