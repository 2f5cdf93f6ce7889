pub mod element;
pub mod query;
pub mod type_ref;

// Re-export commonly used types
pub use element::{
    AnnotatedElement, ClassElement, ClassKind, ElementId, FieldElement, MethodElement,
    ParameterElement,
};
pub use query::ElementQuery;
pub use type_ref::TypeRef;
