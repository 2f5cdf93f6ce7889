use super::value::{AnnotationValue, MemberValue};
use super::names;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Read-only queries shared by every kind of annotation view
pub trait AnnotationSource {
    /// Annotation present on the element, literally or inherited
    fn has_annotation(&self, name: &str) -> bool;

    /// Annotation present literally on the element
    fn has_declared_annotation(&self, name: &str) -> bool;

    /// Annotation present, or reachable through a meta-annotation, declared or inherited
    fn has_stereotype(&self, name: &str) -> bool;

    /// Annotation present, or reachable through a meta-annotation, on the element itself
    fn has_declared_stereotype(&self, name: &str) -> bool;

    fn values_by_name(&self, name: &str) -> Vec<&AnnotationValue>;

    fn declared_values_by_name(&self, name: &str) -> Vec<&AnnotationValue>;

    /// First value of `member` found on an annotation called `name`
    fn value(&self, name: &str, member: &str) -> Option<&MemberValue>;

    fn string_value(&self, name: &str, member: &str) -> Option<&str> {
        self.value(name, member).and_then(MemberValue::as_str)
    }

    fn has_any_stereotype(&self, names: &[String]) -> bool {
        names.iter().any(|name| self.has_stereotype(name))
    }
}

/// Annotation facts of one element, split into what is written on the element and what it
/// inherits through stereotypes or the type hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnnotationMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    declared_annotations: Vec<AnnotationValue>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    declared_stereotypes: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    inherited_annotations: Vec<AnnotationValue>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    inherited_stereotypes: BTreeSet<String>,
}

impl AnnotationMetadata {
    pub fn builder() -> AnnotationMetadataBuilder {
        AnnotationMetadataBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.declared_annotations.is_empty()
            && self.declared_stereotypes.is_empty()
            && self.inherited_annotations.is_empty()
            && self.inherited_stereotypes.is_empty()
    }

    pub fn declared_annotation_names(&self) -> BTreeSet<&str> {
        self.declared_annotations
            .iter()
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Adds or amends a declared annotation in place
    pub fn annotate(&mut self, name: &str, amend: impl FnOnce(&mut AnnotationValue)) {
        match self.declared_annotations.iter_mut().find(|a| a.name == name) {
            Some(existing) => amend(existing),
            None => {
                let mut value = AnnotationValue::new(name);
                amend(&mut value);
                self.declared_annotations.push(value);
            }
        }
    }

    /// md5 digest of the canonical JSON form
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        format!("{:x}", md5::compute(bytes))
    }
}

impl AnnotationSource for AnnotationMetadata {
    fn has_annotation(&self, name: &str) -> bool {
        self.declared_annotations
            .iter()
            .chain(self.inherited_annotations.iter())
            .any(|a| a.name == name)
    }

    fn has_declared_annotation(&self, name: &str) -> bool {
        self.declared_annotations.iter().any(|a| a.name == name)
    }

    fn has_stereotype(&self, name: &str) -> bool {
        self.has_annotation(name)
            || self.declared_stereotypes.contains(name)
            || self.inherited_stereotypes.contains(name)
    }

    fn has_declared_stereotype(&self, name: &str) -> bool {
        self.has_declared_annotation(name) || self.declared_stereotypes.contains(name)
    }

    fn values_by_name(&self, name: &str) -> Vec<&AnnotationValue> {
        self.declared_annotations
            .iter()
            .chain(self.inherited_annotations.iter())
            .filter(|a| a.name == name)
            .collect()
    }

    fn declared_values_by_name(&self, name: &str) -> Vec<&AnnotationValue> {
        self.declared_annotations
            .iter()
            .filter(|a| a.name == name)
            .collect()
    }

    fn value(&self, name: &str, member: &str) -> Option<&MemberValue> {
        self.values_by_name(name)
            .into_iter()
            .find_map(|a| a.member(member))
    }
}

/// Fluent construction of [`AnnotationMetadata`], mostly used by model producers and tests
#[derive(Debug, Default)]
pub struct AnnotationMetadataBuilder {
    metadata: AnnotationMetadata,
}

impl AnnotationMetadataBuilder {
    /// Declares an annotation without members
    pub fn annotation(self, name: &str) -> Self {
        self.annotate(AnnotationValue::new(name))
    }

    pub fn annotate(mut self, value: AnnotationValue) -> Self {
        self.metadata.declared_annotations.push(value);
        self
    }

    /// Declares a meta-annotation reachable from one of the declared annotations
    pub fn stereotype(mut self, name: &str) -> Self {
        self.metadata.declared_stereotypes.insert(name.to_string());
        self
    }

    pub fn inherit(mut self, value: AnnotationValue) -> Self {
        self.metadata.inherited_annotations.push(value);
        self
    }

    pub fn inherited_stereotype(mut self, name: &str) -> Self {
        self.metadata.inherited_stereotypes.insert(name.to_string());
        self
    }

    /// Declares an interceptor binding, registering the binding container as a stereotype
    pub fn interceptor_binding(mut self, binding: &str, kind: &str) -> Self {
        self.metadata.declared_stereotypes.insert(names::INTERCEPTOR_BINDING_DEFINITIONS.to_string());
        self.metadata.declared_annotations.push(
            AnnotationValue::new(names::INTERCEPTOR_BINDING)
                .with_member(names::MEMBER_VALUE, MemberValue::class(binding))
                .with_member(names::MEMBER_KIND, kind),
        );
        self
    }

    pub fn build(self) -> AnnotationMetadata {
        self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_stereotype_implies_stereotype() {
        let metadata = AnnotationMetadata::builder()
            .annotation("com.acme.Traced")
            .stereotype(names::AROUND)
            .inherited_stereotype(names::SCOPE)
            .build();

        for name in ["com.acme.Traced", names::AROUND] {
            assert!(metadata.has_declared_stereotype(name));
            assert!(metadata.has_stereotype(name));
        }
        assert!(metadata.has_stereotype(names::SCOPE));
        assert!(!metadata.has_declared_stereotype(names::SCOPE));
    }

    #[test]
    fn test_declared_values_exclude_inherited() {
        let metadata = AnnotationMetadata::builder()
            .annotate(AnnotationValue::new("com.acme.A").with_member("x", 1i64))
            .inherit(AnnotationValue::new("com.acme.A").with_member("x", 2i64))
            .build();

        assert_eq!(metadata.values_by_name("com.acme.A").len(), 2);
        assert_eq!(metadata.declared_values_by_name("com.acme.A").len(), 1);
        assert_eq!(metadata.value("com.acme.A", "x"), Some(&MemberValue::Int(1)));
    }

    #[test]
    fn test_annotate_amends_existing_annotation() {
        let mut metadata = AnnotationMetadata::builder()
            .annotate(AnnotationValue::new(names::ADAPTER).with_member("value", "com.acme.Fn"))
            .build();
        let before = metadata.fingerprint();

        metadata.annotate(names::ADAPTER, |a| a.set_member("adaptedMethod", "run"));

        assert_eq!(metadata.declared_values_by_name(names::ADAPTER).len(), 1);
        assert_eq!(metadata.string_value(names::ADAPTER, "adaptedMethod"), Some("run"));
        assert_eq!(metadata.string_value(names::ADAPTER, "value"), Some("com.acme.Fn"));
        assert_ne!(before, metadata.fingerprint());
    }

    #[test]
    fn test_interceptor_binding_registers_container() {
        let metadata = AnnotationMetadata::builder()
            .interceptor_binding("com.acme.Logged", "AROUND")
            .build();

        assert!(metadata.has_declared_stereotype(names::INTERCEPTOR_BINDING_DEFINITIONS));
        assert_eq!(
            metadata.string_value(names::INTERCEPTOR_BINDING, names::MEMBER_VALUE),
            Some("com.acme.Logged")
        );
    }
}
