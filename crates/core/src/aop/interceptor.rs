//! Interceptor bindings and advice detection

use crate::annotation::{AnnotationSource, AnnotationValue, names};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterceptorKind {
    Around,
    Introduction,
}

impl InterceptorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterceptorKind::Around => "AROUND",
            InterceptorKind::Introduction => "INTRODUCTION",
        }
    }

    /// Reads the `kind` member of a binding annotation; an absent member means AROUND
    fn of_binding(binding: &AnnotationValue) -> &str {
        binding
            .string_value(names::MEMBER_KIND)
            .unwrap_or(InterceptorKind::Around.as_str())
    }
}

impl fmt::Display for InterceptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An interceptor kind paired with the binding annotation that selects interceptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterceptorBinding {
    pub kind: InterceptorKind,
    pub binding: AnnotationValue,
}

impl InterceptorBinding {
    /// The binding annotation's target type, when it names one
    pub fn binding_type(&self) -> Option<&str> {
        self.binding.string_value(names::MEMBER_VALUE)
    }
}

/// Every binding annotation in `metadata` whose kind matches `kind`, without duplicates
pub fn resolve_interceptor_binding<S>(metadata: &S, kind: InterceptorKind) -> Vec<InterceptorBinding>
where
    S: AnnotationSource + ?Sized,
{
    let mut bindings: Vec<InterceptorBinding> = Vec::new();
    for value in metadata.values_by_name(names::INTERCEPTOR_BINDING) {
        if InterceptorKind::of_binding(value) != kind.as_str() {
            continue;
        }
        if bindings.iter().any(|b| &b.binding == value) {
            continue;
        }
        bindings.push(InterceptorBinding {
            kind,
            binding: value.clone(),
        });
    }
    tracing::trace!("Resolved {} {} bindings", bindings.len(), kind);
    bindings
}

/// Around advice is present, directly or through a binding of kind AROUND
pub fn has_around_stereotype<S>(metadata: &S) -> bool
where
    S: AnnotationSource + ?Sized,
{
    if metadata.has_stereotype(names::AROUND) {
        return true;
    }
    metadata.has_declared_stereotype(names::INTERCEPTOR_BINDING_DEFINITIONS)
        && any_around(metadata.values_by_name(names::INTERCEPTOR_BINDING))
}

/// Around advice is declared on the element itself
pub fn has_declared_around_advice<S>(metadata: &S) -> bool
where
    S: AnnotationSource + ?Sized,
{
    if metadata.has_declared_stereotype(names::AROUND) {
        return true;
    }
    metadata.has_declared_stereotype(names::INTERCEPTOR_BINDING_DEFINITIONS)
        && any_around(metadata.declared_values_by_name(names::INTERCEPTOR_BINDING))
}

fn any_around(bindings: Vec<&AnnotationValue>) -> bool {
    bindings
        .into_iter()
        .any(|b| InterceptorKind::of_binding(b) == InterceptorKind::Around.as_str())
}
