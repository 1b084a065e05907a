//! Binding construction.
//!
//! [`JsonBinding`] is the public facade: a matched encode/decode pair for
//! one resolved type expression. Construction recursively dispatches over
//! the type grammar, resolving declarations through the supplied resolver
//! and deferring nested codecs behind [`Memo`] cells so recursive schemas
//! terminate.
//!
//! Construction-time defects (an unsupported type shape, an unbound type
//! parameter, a type-argument arity mismatch) panic: they signal a
//! codec/schema mismatch, never a data problem. Decode-time data errors are
//! [`ParseError`].

pub mod composite;
pub mod primitive;

use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value as JsonValue;
use tracing::{debug, trace};
use wirebind_schema::{Annotation, DeclResolver, DeclType, Dynamic, TypeExpr, TypeRef};

use crate::error::ParseError;
use crate::memo::Memo;
use crate::value::Value;
use self::composite::{EnumCodec, StructCodec, UnionCodec};
use self::primitive::{BytesCodec, NullableCodec, ScalarCodec, StringMapCodec, VectorCodec};

/// Type parameters in scope during one recursive construction pass.
///
/// Created fresh at each declaration boundary and never mutated afterwards;
/// scopes do not leak outward past the declaration that introduced them.
pub(crate) type BoundParams = HashMap<String, Rc<Codec>>;

/// The wire-shape interpreter for one resolved type expression.
///
/// A closed sum: adding a schema construct means adding a variant here and
/// getting every dispatch site checked by the compiler. Newtypes and type
/// aliases are transparent and need no variant of their own.
pub(crate) enum Codec {
    Scalar(ScalarCodec),
    Bytes(BytesCodec),
    Vector(VectorCodec),
    StringMap(StringMapCodec),
    Nullable(NullableCodec),
    Struct(StructCodec),
    Union(UnionCodec),
    Enum(EnumCodec),
}

impl Codec {
    /// Encode a value into its JSON wire form.
    ///
    /// Total under the precondition that `value` matches the shape this
    /// codec was built for; violations panic.
    pub(crate) fn encode(&self, value: &Value) -> JsonValue {
        match self {
            Codec::Scalar(c) => c.encode(value),
            Codec::Bytes(c) => c.encode(value),
            Codec::Vector(c) => c.encode(value),
            Codec::StringMap(c) => c.encode(value),
            Codec::Nullable(c) => c.encode(value),
            Codec::Struct(c) => c.encode(value),
            Codec::Union(c) => c.encode(value),
            Codec::Enum(c) => c.encode(value),
        }
    }

    /// Decode a JSON wire value, or fail with a path-annotated error.
    pub(crate) fn decode(&self, json: &JsonValue) -> Result<Value, ParseError> {
        match self {
            Codec::Scalar(c) => c.decode(json),
            Codec::Bytes(c) => c.decode(json),
            Codec::Vector(c) => c.decode(json),
            Codec::StringMap(c) => c.decode(json),
            Codec::Nullable(c) => c.decode(json),
            Codec::Struct(c) => c.decode(json),
            Codec::Union(c) => c.decode(json),
            Codec::Enum(c) => c.decode(json),
        }
    }
}

/// Build the codec for a type expression under the given parameter scope.
pub(crate) fn build_codec(
    resolver: &Rc<dyn DeclResolver>,
    texpr: &TypeExpr,
    bound: &BoundParams,
) -> Rc<Codec> {
    match &texpr.type_ref {
        TypeRef::Primitive(p) => primitive::build(resolver, *p, &texpr.parameters, bound),
        TypeRef::Reference(name) => {
            let decl = resolver.resolve(name);
            trace!(decl = %name, "building codec for declaration");
            match &decl.type_ {
                DeclType::Struct(s) => Rc::new(Codec::Struct(StructCodec::build(
                    resolver,
                    &decl.name,
                    s,
                    &texpr.parameters,
                    bound,
                ))),
                DeclType::Union(u) => {
                    if u.is_enum() {
                        Rc::new(Codec::Enum(EnumCodec::build(u)))
                    } else {
                        Rc::new(Codec::Union(UnionCodec::build(
                            resolver,
                            &decl.name,
                            u,
                            &texpr.parameters,
                            bound,
                        )))
                    }
                }
                // Newtypes and type aliases differ only in schema
                // bookkeeping; both pass straight through to the
                // underlying type with their own parameters in scope.
                DeclType::NewType(n) => {
                    let scope = bind_type_params(
                        resolver,
                        &decl.name,
                        &n.type_params,
                        &texpr.parameters,
                        bound,
                    );
                    build_codec(resolver, &n.type_expr, &scope)
                }
                DeclType::TypeAlias(t) => {
                    let scope = bind_type_params(
                        resolver,
                        &decl.name,
                        &t.type_params,
                        &texpr.parameters,
                        bound,
                    );
                    build_codec(resolver, &t.type_expr, &scope)
                }
            }
        }
        TypeRef::TypeParam(name) => match bound.get(name) {
            Some(codec) => Rc::clone(codec),
            // The builder binds every declaration's parameters before
            // descending into its fields, so an absent entry is an internal
            // scoping defect, not a user error.
            None => panic!("unbound type parameter {name}"),
        },
    }
}

/// Map a declaration's type-parameter names against the supplied type
/// arguments into a fresh scope for that declaration's own traversal.
///
/// Argument codecs are built eagerly in the *outer* scope.
pub(crate) fn bind_type_params(
    resolver: &Rc<dyn DeclResolver>,
    decl_name: &str,
    names: &[String],
    args: &[TypeExpr],
    bound: &BoundParams,
) -> BoundParams {
    if names.len() != args.len() {
        panic!(
            "{decl_name} takes {} type arguments, got {}",
            names.len(),
            args.len()
        );
    }
    names
        .iter()
        .zip(args)
        .map(|(name, arg)| (name.clone(), build_codec(resolver, arg, bound)))
        .collect()
}

/// A deferred codec for a nested type expression.
///
/// The thunk owns clones of the resolver, expression and scope, and runs
/// only on first use, never during the enclosing constructor.
pub(crate) fn deferred(
    resolver: &Rc<dyn DeclResolver>,
    texpr: &TypeExpr,
    bound: &BoundParams,
) -> Memo<Rc<Codec>> {
    let resolver = Rc::clone(resolver);
    let texpr = texpr.clone();
    let bound = bound.clone();
    Memo::new(move || build_codec(&resolver, &texpr, &bound))
}

/// A de/serializer for one resolved type expression.
///
/// Bindings are immutable and stateless once built; they may be retained
/// and reused for any number of encode/decode calls.
pub struct JsonBinding {
    type_expr: TypeExpr,
    codec: Rc<Codec>,
}

impl JsonBinding {
    /// Build the binding for a type expression.
    ///
    /// # Panics
    ///
    /// Panics on construction defects: an unresolvable declaration, an
    /// unsupported type shape, or a type-argument arity mismatch.
    pub fn new(resolver: &Rc<dyn DeclResolver>, type_expr: TypeExpr) -> Self {
        let codec = build_codec(resolver, &type_expr, &BoundParams::new());
        debug!(type_expr = ?type_expr.type_ref, "built json binding");
        JsonBinding { type_expr, codec }
    }

    /// The type expression this binding was built for.
    pub fn type_expr(&self) -> &TypeExpr {
        &self.type_expr
    }

    /// Encode a value into its JSON wire form.
    ///
    /// Total under the precondition that the value matches the bound type;
    /// violations panic.
    pub fn to_json(&self, value: &Value) -> JsonValue {
        self.codec.encode(value)
    }

    /// Decode a JSON wire value, failing with a path-annotated [`ParseError`].
    pub fn from_json(&self, json: &JsonValue) -> Result<Value, ParseError> {
        self.codec.decode(json)
    }

    /// Like [`from_json`](Self::from_json), but failures are converted into
    /// a generic error carrying the rendered message.
    pub fn from_json_any(&self, json: &JsonValue) -> anyhow::Result<Value> {
        self.from_json(json)
            .map_err(|e| anyhow::Error::msg(e.to_string()))
    }

    /// Look up and decode the annotation whose type matches this binding.
    ///
    /// Returns `Ok(None)` when this binding's type expression is not a
    /// declared-type reference, or when no annotation matches.
    pub fn get_annotation(&self, annotations: &[Annotation]) -> anyhow::Result<Option<Value>> {
        let TypeRef::Reference(name) = &self.type_expr.type_ref else {
            return Ok(None);
        };
        match annotations.iter().find(|a| &a.name == name) {
            Some(annotation) => Ok(Some(self.from_json_any(&annotation.value)?)),
            None => Ok(None),
        }
    }

    /// Wrap a value in a [`Dynamic`] carrying this binding's type expression.
    pub fn to_dynamic(&self, value: &Value) -> Dynamic {
        Dynamic::new(self.type_expr.clone(), self.to_json(value))
    }

    /// Extract a value from a [`Dynamic`].
    ///
    /// Returns `Ok(None)` when the dynamic's type expression differs from
    /// this binding's; a decode failure of a matching dynamic propagates.
    pub fn from_dynamic(&self, dynamic: &Dynamic) -> Result<Option<Value>, ParseError> {
        if dynamic.type_expr == self.type_expr {
            self.from_json(&dynamic.value).map(Some)
        } else {
            Ok(None)
        }
    }
}
