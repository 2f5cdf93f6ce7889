//! Element isolation
//!
//! Planning code sometimes needs to attach metadata to an element that other consumers
//! also read through the shared [`MetadataCache`]. [`ElementGuard::guarded`] hands the
//! mutator a private copy and puts the cache entry back exactly as it was afterwards.

use crate::{
    annotation::{AnnotationValue, AnnotationView},
    cache::MetadataCache,
    error::Result,
    types::{AnnotatedElement, ElementId},
};
use tracing::debug;

/// A private copy of an element with its own annotation view
#[derive(Debug, Clone)]
pub struct Isolated<E> {
    element: E,
    view: AnnotationView,
}

impl<E: AnnotatedElement> Isolated<E> {
    pub fn new(element: E, view: AnnotationView) -> Self {
        Self { element, view }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn annotation_metadata(&self) -> &AnnotationView {
        &self.view
    }

    /// Adds or amends an element-level annotation on the copy
    pub fn annotate(&mut self, name: &str, amend: impl FnOnce(&mut AnnotationValue)) {
        self.view.element_metadata_mut().annotate(name, amend);
    }
}

/// Puts a cache entry back when dropped, whichever way the guarded call exits
struct RestoreOnDrop<'a> {
    cache: &'a MetadataCache,
    id: ElementId,
    snapshot: Option<AnnotationView>,
}

impl Drop for RestoreOnDrop<'_> {
    fn drop(&mut self) {
        debug!("Restoring annotation view of {}", self.id);
        self.cache.restore(&self.id, self.snapshot.take());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ElementGuard<'a> {
    cache: &'a MetadataCache,
}

impl<'a> ElementGuard<'a> {
    pub fn new(cache: &'a MetadataCache) -> Self {
        Self { cache }
    }

    /// Runs `mutator` against an isolated copy of `element`.
    ///
    /// Shared elements get a copy sourced from their read-only metadata, and the cache
    /// entry is restored afterwards even when the mutator fails or panics. Synthetic
    /// methods and primitive classes are owned by their creator, so their edits are kept.
    pub fn guarded<E, R>(
        &self,
        element: &E,
        mutator: impl FnOnce(&mut Isolated<E>) -> Result<R>,
    ) -> Result<R>
    where
        E: AnnotatedElement,
    {
        if !element.is_shared() {
            let mut isolated = Isolated::new(element.clone(), self.cache.view(element));
            let result = mutator(&mut isolated);
            self.cache.replace(element, isolated.view);
            return result;
        }

        let id = element.id();
        let _restore = RestoreOnDrop {
            cache: self.cache,
            snapshot: self.cache.snapshot(&id),
            id,
        };
        debug!("Isolating {}", element);
        let mut isolated = Isolated::new(
            element.clone(),
            AnnotationView::Single(element.source_metadata().clone()),
        );
        mutator(&mut isolated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        annotation::{AnnotationMetadata, AnnotationSource, names},
        error::Error,
        types::{ClassElement, MethodElement},
    };
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn target() -> MethodElement {
        MethodElement::new("com.acme.Fn", "apply")
            .abstract_method()
            .annotated(AnnotationMetadata::builder().annotation(names::EXECUTABLE).build())
    }

    #[test]
    fn test_edits_do_not_leak_into_cache() -> Result<()> {
        let cache = MetadataCache::new();
        let method = target();
        let before = cache.fingerprint(&method);

        let seen = ElementGuard::new(&cache).guarded(&method, |copy| {
            copy.annotate(names::ADAPTER, |a| a.set_member("adaptedMethod", "run"));
            Ok(copy.annotation_metadata().has_annotation(names::ADAPTER))
        })?;

        assert!(seen);
        assert_eq!(before, cache.fingerprint(&method));
        assert!(!cache.view(&method).has_annotation(names::ADAPTER));
        assert!(!method.annotations.has_annotation(names::ADAPTER));
        Ok(())
    }

    #[test]
    fn test_restores_on_error() {
        let cache = MetadataCache::new();
        let method = target();
        let before = cache.fingerprint(&method);

        let result: Result<()> = ElementGuard::new(&cache).guarded(&method, |copy| {
            copy.annotate(names::ADAPTER, |_| {});
            cache.replace(copy.element(), copy.annotation_metadata().clone());
            Err(Error::signature_mismatch(copy.element(), "Argument lengths don't match."))
        });

        assert!(result.is_err());
        assert_eq!(before, cache.fingerprint(&method));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_restores_on_panic() {
        let cache = MetadataCache::new();
        let method = target();
        let replaced: AnnotationView = AnnotationMetadata::builder().annotation(names::BEAN).build().into();
        cache.replace(&method, replaced.clone());

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let _: Result<()> = ElementGuard::new(&cache).guarded(&method, |copy| {
                cache.replace(copy.element(), AnnotationView::Single(Default::default()));
                panic!("mutator failed");
            });
        }));

        assert!(outcome.is_err());
        assert_eq!(cache.get(&method.id()), Some(replaced));
    }

    #[test]
    fn test_private_elements_keep_their_edits() -> Result<()> {
        let cache = MetadataCache::new();
        let synthetic = target().synthetic();

        ElementGuard::new(&cache).guarded(&synthetic, |copy| {
            copy.annotate(names::ADAPTER, |_| {});
            Ok(())
        })?;
        assert!(cache.view(&synthetic).has_annotation(names::ADAPTER));

        let primitive = ClassElement::new("int").with_kind(crate::types::ClassKind::Primitive);
        ElementGuard::new(&cache).guarded(&primitive, |copy| {
            copy.annotate(names::BEAN, |_| {});
            Ok(())
        })?;
        assert!(cache.view(&primitive).has_annotation(names::BEAN));
        Ok(())
    }
}
