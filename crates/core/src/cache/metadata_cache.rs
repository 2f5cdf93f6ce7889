use crate::{
    annotation::AnnotationView,
    types::{AnnotatedElement, ElementId},
};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Process-wide map from element identity to its current annotation view.
///
/// Elements without an entry answer with their source metadata. Entries are only
/// written by planning code, either durably or for the duration of a guarded mutation.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: RwLock<HashMap<ElementId, AnnotationView>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view of `element`
    pub fn view<E: AnnotatedElement>(&self, element: &E) -> AnnotationView {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&element.id())
            .cloned()
            .unwrap_or_else(|| AnnotationView::Single(element.source_metadata().clone()))
    }

    pub fn get(&self, id: &ElementId) -> Option<AnnotationView> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(id).cloned()
    }

    /// Durably replaces the view of `element`
    pub fn replace<E: AnnotatedElement>(&self, element: &E, view: AnnotationView) {
        let id = element.id();
        debug!("Replacing annotation view of {}", id);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(id, view);
    }

    /// Exact entry for `id`, `None` when the element has never been replaced
    pub fn snapshot(&self, id: &ElementId) -> Option<AnnotationView> {
        self.get(id)
    }

    /// Puts back a snapshot; `None` removes the entry so the source metadata shows again
    pub fn restore(&self, id: &ElementId, snapshot: Option<AnnotationView>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match snapshot {
            Some(view) => {
                entries.insert(id.clone(), view);
            }
            None => {
                entries.remove(id);
            }
        }
    }

    /// Digest of the current view of `element`
    pub fn fingerprint<E: AnnotatedElement>(&self, element: &E) -> String {
        self.view(element).fingerprint()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{AnnotationMetadata, AnnotationSource, names};
    use crate::types::ClassElement;

    #[test]
    fn test_unreplaced_element_answers_with_source() {
        let cache = MetadataCache::new();
        let class = ClassElement::new("com.acme.Greeter").annotated(
            AnnotationMetadata::builder().annotation(names::SINGLETON).build(),
        );

        assert!(cache.view(&class).has_annotation(names::SINGLETON));
        assert!(cache.snapshot(&class.id()).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_replace_then_restore_absent_snapshot() {
        let cache = MetadataCache::new();
        let class = ClassElement::new("com.acme.Greeter");
        let before = cache.fingerprint(&class);
        let snapshot = cache.snapshot(&class.id());

        cache.replace(
            &class,
            AnnotationMetadata::builder().annotation(names::BEAN).build().into(),
        );
        assert!(cache.view(&class).has_annotation(names::BEAN));
        assert_ne!(before, cache.fingerprint(&class));

        cache.restore(&class.id(), snapshot);
        assert_eq!(before, cache.fingerprint(&class));
        assert!(cache.is_empty());
    }
}
