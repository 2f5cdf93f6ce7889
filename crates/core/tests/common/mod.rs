//! Model builders shared by the integration tests
#![allow(dead_code)]

use beanforge_core::annotation::names;
use beanforge_core::{AnnotationMetadata, AnnotationValue, ClassElement, ClassIndex, MemberValue, TypeRef};

pub fn string() -> TypeRef {
    TypeRef::concrete("java.lang.String")
}

pub fn singleton() -> AnnotationMetadata {
    AnnotationMetadata::builder()
        .annotation(names::SINGLETON)
        .stereotype(names::SCOPE)
        .build()
}

/// `@Adapter(target)`
pub fn adapter(target: &str) -> AnnotationMetadata {
    AnnotationMetadata::builder()
        .annotate(AnnotationValue::new(names::ADAPTER).with_member(names::MEMBER_VALUE, MemberValue::class(target)))
        .stereotype(names::ADAPTER)
        .build()
}

/// An annotation bound to around interceptors
pub fn logged() -> AnnotationMetadata {
    AnnotationMetadata::builder()
        .annotation("com.acme.Logged")
        .interceptor_binding("com.acme.Logged", "AROUND")
        .build()
}

/// An annotation meta-annotated with around advice
pub fn traced() -> AnnotationMetadata {
    AnnotationMetadata::builder()
        .annotation("com.acme.Traced")
        .stereotype(names::AROUND)
        .build()
}

pub fn inject() -> AnnotationMetadata {
    AnnotationMetadata::builder().annotation(names::INJECT).build()
}

/// `java.lang` types used in assignability checks
pub fn java_lang() -> ClassIndex {
    ClassIndex::new()
        .with_class(ClassElement::new("java.lang.Number").with_kind(beanforge_core::ClassKind::AbstractClass))
        .with_class(ClassElement::new("java.lang.Integer").with_super_type("java.lang.Number"))
        .with_class(ClassElement::new("java.lang.String").with_super_type("java.lang.CharSequence"))
}
