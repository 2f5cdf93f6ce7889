//! Annotation metadata: single-element facts, hierarchies and the replaceable view

pub mod hierarchy;
pub mod metadata;
pub mod names;
pub mod value;

pub use hierarchy::{AnnotationMetadataHierarchy, AnnotationView};
pub use metadata::{AnnotationMetadata, AnnotationMetadataBuilder, AnnotationSource};
pub use value::{AnnotationValue, MemberValue};
