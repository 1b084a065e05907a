//! Runtime JSON codec for schema-described algebraic data types.
//!
//! Given a type expression and a declaration resolver, [`JsonBinding::new`]
//! builds a matched encode/decode pair for that type: structs, tagged
//! unions, enumerations, newtypes, type aliases and generics, including
//! recursive and mutually recursive schemas. Decode failures carry the JSON
//! path at which they occurred.

pub mod binding;
pub mod error;
pub mod memo;
pub mod value;

pub use binding::JsonBinding;
pub use error::ParseError;
pub use value::Value;
