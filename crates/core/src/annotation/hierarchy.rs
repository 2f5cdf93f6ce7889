use super::metadata::{AnnotationMetadata, AnnotationSource};
use super::value::{AnnotationValue, MemberValue};
use serde::Serialize;
use std::sync::Arc;

/// Ordered stack of metadata sources, innermost (element-level) first.
///
/// Presence queries consult every source; member lookups return the innermost
/// explicit value; declared queries only see the innermost source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationMetadataHierarchy {
    sources: Vec<Arc<AnnotationMetadata>>,
}

impl AnnotationMetadataHierarchy {
    pub fn new(declared: Arc<AnnotationMetadata>, enclosing: Vec<Arc<AnnotationMetadata>>) -> Self {
        let mut sources = Vec::with_capacity(enclosing.len() + 1);
        sources.push(declared);
        sources.extend(enclosing);
        Self { sources }
    }

    /// Places `declared` on top of every source of the enclosing view
    pub fn nested(enclosing: &AnnotationView, declared: Arc<AnnotationMetadata>) -> Self {
        Self::new(declared, enclosing.sources())
    }

    /// Only the innermost source's facts
    pub fn declared_metadata(&self) -> &Arc<AnnotationMetadata> {
        &self.sources[0]
    }

    pub fn sources(&self) -> &[Arc<AnnotationMetadata>] {
        &self.sources
    }
}

impl AnnotationSource for AnnotationMetadataHierarchy {
    fn has_annotation(&self, name: &str) -> bool {
        self.sources.iter().any(|s| s.has_annotation(name))
    }

    fn has_declared_annotation(&self, name: &str) -> bool {
        self.declared_metadata().has_declared_annotation(name)
    }

    fn has_stereotype(&self, name: &str) -> bool {
        self.sources.iter().any(|s| s.has_stereotype(name))
    }

    fn has_declared_stereotype(&self, name: &str) -> bool {
        self.declared_metadata().has_declared_stereotype(name)
    }

    fn values_by_name(&self, name: &str) -> Vec<&AnnotationValue> {
        self.sources
            .iter()
            .flat_map(|s| s.values_by_name(name))
            .collect()
    }

    fn declared_values_by_name(&self, name: &str) -> Vec<&AnnotationValue> {
        self.declared_metadata().declared_values_by_name(name)
    }

    fn value(&self, name: &str, member: &str) -> Option<&MemberValue> {
        self.sources.iter().find_map(|s| s.value(name, member))
    }
}

/// The replaceable annotation view of a declaration element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnnotationView {
    Single(Arc<AnnotationMetadata>),
    Hierarchy(AnnotationMetadataHierarchy),
}

impl AnnotationView {
    /// Facts that belong to the element itself: the innermost source of a hierarchy
    pub fn element_metadata(&self) -> Arc<AnnotationMetadata> {
        match self {
            AnnotationView::Single(metadata) => metadata.clone(),
            AnnotationView::Hierarchy(hierarchy) => hierarchy.declared_metadata().clone(),
        }
    }

    pub fn sources(&self) -> Vec<Arc<AnnotationMetadata>> {
        match self {
            AnnotationView::Single(metadata) => vec![metadata.clone()],
            AnnotationView::Hierarchy(hierarchy) => hierarchy.sources().to_vec(),
        }
    }

    /// Mutable access to the element-level facts, detached from any other holder
    pub fn element_metadata_mut(&mut self) -> &mut AnnotationMetadata {
        match self {
            AnnotationView::Single(metadata) => Arc::make_mut(metadata),
            AnnotationView::Hierarchy(hierarchy) => Arc::make_mut(&mut hierarchy.sources[0]),
        }
    }

    /// Digest over every source, in order
    pub fn fingerprint(&self) -> String {
        let joined = self
            .sources()
            .iter()
            .map(|s| s.fingerprint())
            .collect::<Vec<_>>()
            .join(":");
        format!("{:x}", md5::compute(joined.as_bytes()))
    }

    fn source(&self) -> &dyn AnnotationSource {
        match self {
            AnnotationView::Single(metadata) => metadata.as_ref(),
            AnnotationView::Hierarchy(hierarchy) => hierarchy,
        }
    }
}

impl From<AnnotationMetadata> for AnnotationView {
    fn from(metadata: AnnotationMetadata) -> Self {
        AnnotationView::Single(Arc::new(metadata))
    }
}

impl From<Arc<AnnotationMetadata>> for AnnotationView {
    fn from(metadata: Arc<AnnotationMetadata>) -> Self {
        AnnotationView::Single(metadata)
    }
}

impl From<AnnotationMetadataHierarchy> for AnnotationView {
    fn from(hierarchy: AnnotationMetadataHierarchy) -> Self {
        AnnotationView::Hierarchy(hierarchy)
    }
}

impl AnnotationSource for AnnotationView {
    fn has_annotation(&self, name: &str) -> bool {
        self.source().has_annotation(name)
    }

    fn has_declared_annotation(&self, name: &str) -> bool {
        self.source().has_declared_annotation(name)
    }

    fn has_stereotype(&self, name: &str) -> bool {
        self.source().has_stereotype(name)
    }

    fn has_declared_stereotype(&self, name: &str) -> bool {
        self.source().has_declared_stereotype(name)
    }

    fn values_by_name(&self, name: &str) -> Vec<&AnnotationValue> {
        self.source().values_by_name(name)
    }

    fn declared_values_by_name(&self, name: &str) -> Vec<&AnnotationValue> {
        self.source().declared_values_by_name(name)
    }

    fn value(&self, name: &str, member: &str) -> Option<&MemberValue> {
        self.source().value(name, member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_with_x(x: i64) -> Arc<AnnotationMetadata> {
        Arc::new(
            AnnotationMetadata::builder()
                .annotate(AnnotationValue::new("com.acme.A").with_member("x", x))
                .build(),
        )
    }

    #[test]
    fn test_innermost_value_wins() {
        let class_level: AnnotationView = a_with_x(1).into();
        let hierarchy = AnnotationMetadataHierarchy::nested(&class_level, a_with_x(2));

        assert_eq!(hierarchy.value("com.acme.A", "x"), Some(&MemberValue::Int(2)));
        assert_eq!(hierarchy.values_by_name("com.acme.A").len(), 2);
        assert_eq!(hierarchy.declared_metadata().as_ref(), a_with_x(2).as_ref());
    }

    #[test]
    fn test_outer_members_fill_gaps() {
        let class_level: AnnotationView = Arc::new(
            AnnotationMetadata::builder()
                .annotate(AnnotationValue::new("com.acme.A").with_member("y", "outer"))
                .build(),
        )
        .into();
        let hierarchy = AnnotationMetadataHierarchy::nested(&class_level, a_with_x(2));

        assert_eq!(hierarchy.string_value("com.acme.A", "y"), Some("outer"));
        assert!(hierarchy.has_stereotype("com.acme.A"));
    }

    #[test]
    fn test_declared_queries_only_see_innermost() {
        let class_level: AnnotationView = Arc::new(
            AnnotationMetadata::builder()
                .annotation("com.acme.Singleton")
                .build(),
        )
        .into();
        let hierarchy = AnnotationMetadataHierarchy::nested(&class_level, a_with_x(2));

        assert!(hierarchy.has_annotation("com.acme.Singleton"));
        assert!(!hierarchy.has_declared_annotation("com.acme.Singleton"));
        assert!(hierarchy.has_declared_annotation("com.acme.A"));
    }

    #[test]
    fn test_element_metadata_of_hierarchy_is_innermost() {
        let class_level: AnnotationView = a_with_x(1).into();
        let view: AnnotationView = AnnotationMetadataHierarchy::nested(&class_level, a_with_x(2)).into();

        assert_eq!(view.element_metadata(), a_with_x(2));
        assert_eq!(view.sources().len(), 2);
    }

    #[test]
    fn test_mutating_detaches_from_shared_source() {
        let shared = a_with_x(1);
        let mut view = AnnotationView::Single(shared.clone());

        view.element_metadata_mut()
            .annotate("com.acme.B", |_| {});

        assert!(view.has_annotation("com.acme.B"));
        assert!(!shared.has_annotation("com.acme.B"));
    }
}
