//! Type expressions.
//!
//! A `TypeExpr` references a primitive, a declared type or a type parameter,
//! together with an ordered list of type arguments. Type expressions are
//! immutable; codecs hold them by value.

use crate::naming::ScopedName;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A type expression: a reference plus its type arguments.
///
/// # Examples
///
/// ```rust,ignore
/// // Vector<String>
/// let v = TypeExpr::primitive1(Primitive::Vector, TypeExpr::primitive(Primitive::String));
/// // demo.Pair<Int32, Bool>
/// let p = TypeExpr::reference(
///     ScopedName::new("demo", "Pair"),
///     vec![
///         TypeExpr::primitive(Primitive::Int32),
///         TypeExpr::primitive(Primitive::Bool),
///     ],
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeExpr {
    pub type_ref: TypeRef,
    pub parameters: Vec<TypeExpr>,
}

/// The head of a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TypeRef {
    /// A built-in primitive type
    Primitive(Primitive),
    /// A reference to a declared type
    Reference(ScopedName),
    /// A type parameter bound by the enclosing declaration
    TypeParam(String),
}

/// The primitive type vocabulary.
///
/// Scalars carry no type arguments; `Vector`, `StringMap` and `Nullable`
/// take exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub enum Primitive {
    Void,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Word8,
    Word16,
    Word32,
    Word64,
    Float,
    Double,
    String,
    Bytes,
    Json,
    Vector,
    StringMap,
    Nullable,
}

/// Error from parsing a primitive type name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown primitive type: {0}")]
pub struct UnknownPrimitive(pub String);

impl TypeExpr {
    pub fn new(type_ref: TypeRef, parameters: Vec<TypeExpr>) -> Self {
        TypeExpr {
            type_ref,
            parameters,
        }
    }

    /// A primitive scalar with no type arguments
    pub fn primitive(p: Primitive) -> Self {
        TypeExpr::new(TypeRef::Primitive(p), vec![])
    }

    /// A parametrized primitive with a single type argument
    pub fn primitive1(p: Primitive, arg: TypeExpr) -> Self {
        TypeExpr::new(TypeRef::Primitive(p), vec![arg])
    }

    /// A reference to a declared type
    pub fn reference(name: ScopedName, parameters: Vec<TypeExpr>) -> Self {
        TypeExpr::new(TypeRef::Reference(name), parameters)
    }

    /// A type parameter occurrence
    pub fn type_param(name: impl Into<String>) -> Self {
        TypeExpr::new(TypeRef::TypeParam(name.into()), vec![])
    }

    /// True when this expression is the `Void` primitive
    pub fn is_void(&self) -> bool {
        matches!(self.type_ref, TypeRef::Primitive(Primitive::Void))
    }
}

impl Primitive {
    /// Canonical name, as it appears in schema source
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Void => "Void",
            Primitive::Bool => "Bool",
            Primitive::Int8 => "Int8",
            Primitive::Int16 => "Int16",
            Primitive::Int32 => "Int32",
            Primitive::Int64 => "Int64",
            Primitive::Word8 => "Word8",
            Primitive::Word16 => "Word16",
            Primitive::Word32 => "Word32",
            Primitive::Word64 => "Word64",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::String => "String",
            Primitive::Bytes => "Bytes",
            Primitive::Json => "Json",
            Primitive::Vector => "Vector",
            Primitive::StringMap => "StringMap",
            Primitive::Nullable => "Nullable",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Void" => Ok(Primitive::Void),
            "Bool" => Ok(Primitive::Bool),
            "Int8" => Ok(Primitive::Int8),
            "Int16" => Ok(Primitive::Int16),
            "Int32" => Ok(Primitive::Int32),
            "Int64" => Ok(Primitive::Int64),
            "Word8" => Ok(Primitive::Word8),
            "Word16" => Ok(Primitive::Word16),
            "Word32" => Ok(Primitive::Word32),
            "Word64" => Ok(Primitive::Word64),
            "Float" => Ok(Primitive::Float),
            "Double" => Ok(Primitive::Double),
            "String" => Ok(Primitive::String),
            "Bytes" => Ok(Primitive::Bytes),
            "Json" => Ok(Primitive::Json),
            "Vector" => Ok(Primitive::Vector),
            "StringMap" => Ok(Primitive::StringMap),
            "Nullable" => Ok(Primitive::Nullable),
            _ => Err(UnknownPrimitive(s.to_string())),
        }
    }
}

impl From<Primitive> for String {
    fn from(p: Primitive) -> String {
        p.name().to_string()
    }
}

impl TryFrom<String> for Primitive {
    type Error = UnknownPrimitive;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Primitive::Void)]
    #[case(Primitive::Int32)]
    #[case(Primitive::Word64)]
    #[case(Primitive::StringMap)]
    #[case(Primitive::Nullable)]
    fn test_primitive_name_round_trip(#[case] p: Primitive) {
        assert_eq!(p.name().parse::<Primitive>().unwrap(), p);
    }

    #[test]
    fn test_unknown_primitive() {
        let err = "Int128".parse::<Primitive>().unwrap_err();
        assert_eq!(err.to_string(), "unknown primitive type: Int128");
    }

    #[test]
    fn test_is_void() {
        assert!(TypeExpr::primitive(Primitive::Void).is_void());
        assert!(!TypeExpr::primitive(Primitive::Bool).is_void());
        assert!(!TypeExpr::type_param("T").is_void());
    }

    #[test]
    fn test_type_expr_serde_round_trip() {
        let texpr = TypeExpr::primitive1(
            Primitive::Vector,
            TypeExpr::reference(ScopedName::new("demo", "Person"), vec![]),
        );
        let json = serde_json::to_string(&texpr).unwrap();
        let parsed: TypeExpr = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, texpr);
    }
}
