use super::guard::ElementGuard;
use crate::{
    annotation::{AnnotationMetadata, AnnotationMetadataHierarchy, AnnotationView},
    aop::AopPlanner,
    cache::MetadataCache,
    config::OverrideResolver,
    error::{Error, Result},
    interfaces::{ConfigurationPropertiesTest, DeclarationModel},
    types::{AnnotatedElement, ClassElement, MethodElement},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Collaborators available while one class is classified and planned
#[derive(Clone, Copy)]
pub struct PlanningContext<'a> {
    pub model: &'a dyn DeclarationModel,
    pub cache: &'a MetadataCache,
    pub aop: &'a dyn AopPlanner,
    pub configuration: &'a dyn ConfigurationPropertiesTest,
    pub overrides: &'a OverrideResolver,
    pub foreign_singletons: &'a [String],
    /// Shared by every adaptation of one compilation unit
    pub adapted_method_index: &'a AtomicUsize,
}

impl<'a> PlanningContext<'a> {
    pub fn guard(&self) -> ElementGuard<'a> {
        ElementGuard::new(self.cache)
    }

    pub fn class(&self, name: &str) -> Result<&'a ClassElement> {
        self.model
            .class(name)
            .ok_or_else(|| Error::ClassNotFound(name.to_string()))
    }

    /// Next value of the adaptation counter, starting at 1
    pub fn next_adapted_index(&self) -> usize {
        self.adapted_method_index.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Simple name used for the generated plans of `class`
    pub fn bean_name<'c>(&self, class: &'c ClassElement) -> &'c str
    where
        'a: 'c,
    {
        self.overrides
            .bean_name(&class.name)
            .unwrap_or_else(|| class.simple_name())
    }

    pub fn view<E: AnnotatedElement>(&self, element: &E) -> AnnotationView {
        self.cache.view(element)
    }

    /// Element-level facts of `element`, ignoring any enclosing metadata merged into its view
    pub fn element_annotation_metadata<E: AnnotatedElement>(&self, element: &E) -> Arc<AnnotationMetadata> {
        self.cache.view(element).element_metadata()
    }

    /// The method's own facts layered over the full metadata of `class`
    pub fn merged_method_view(&self, class: &ClassElement, method: &MethodElement) -> AnnotationView {
        let class_view = self.cache.view(class);
        AnnotationMetadataHierarchy::nested(&class_view, self.element_annotation_metadata(method)).into()
    }

    /// Durably replaces the method's view with [`merged_method_view`](Self::merged_method_view)
    pub fn adjust_method_to_include_class_metadata(
        &self,
        class: &ClassElement,
        method: &MethodElement,
    ) -> AnnotationView {
        let merged = self.merged_method_view(class, method);
        self.cache.replace(method, merged.clone());
        merged
    }
}
