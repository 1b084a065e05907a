pub mod dynamic;
pub mod naming;
pub mod resolver;
pub mod schema;

// Re-export the commonly used model types for convenience
pub use dynamic::Dynamic;
pub use naming::ScopedName;
pub use resolver::{DeclResolver, MapResolver};
pub use schema::{
    Annotation, Decl, DeclType, Field, NewType, Primitive, Struct, TypeAlias, TypeExpr, TypeRef,
    Union,
};
