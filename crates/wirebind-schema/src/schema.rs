//! Schema model.
//!
//! The runtime description of the types a codec is driven by: type
//! expressions, declarations, fields and annotations. Values of these types
//! are created once at schema-load time (typically by generated code) and
//! outlive every binding built from them.

pub mod annotations;
pub mod decl;
pub mod type_expr;

pub use annotations::Annotation;
pub use decl::{Decl, DeclType, Field, NewType, Struct, TypeAlias, Union};
pub use type_expr::{Primitive, TypeExpr, TypeRef, UnknownPrimitive};
