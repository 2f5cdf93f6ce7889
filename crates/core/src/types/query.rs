use super::element::{FieldElement, MethodElement};
use crate::annotation::AnnotationMetadata;
use std::fmt;
use std::sync::Arc;

type MetadataPredicate = Arc<dyn Fn(&AnnotationMetadata) -> bool + Send + Sync>;

/// Filter for [`DeclarationModel::enclosed_methods`](crate::interfaces::DeclarationModel) and
/// friends. The default query matches every member, inherited ones included.
#[derive(Clone, Default)]
pub struct ElementQuery {
    only_abstract: bool,
    only_concrete: bool,
    only_declared: bool,
    annotated: Option<MetadataPredicate>,
}

impl ElementQuery {
    pub fn all_methods() -> Self {
        Self::default()
    }

    pub fn all_fields() -> Self {
        Self::default()
    }

    pub fn only_abstract(mut self) -> Self {
        self.only_abstract = true;
        self
    }

    pub fn only_concrete(mut self) -> Self {
        self.only_concrete = true;
        self
    }

    /// Skip members inherited from super types
    pub fn only_declared(mut self) -> Self {
        self.only_declared = true;
        self
    }

    pub fn annotated(
        mut self,
        predicate: impl Fn(&AnnotationMetadata) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.annotated = Some(Arc::new(predicate));
        self
    }

    pub fn is_only_declared(&self) -> bool {
        self.only_declared
    }

    pub fn matches_method(&self, method: &MethodElement) -> bool {
        if self.only_abstract && !method.is_abstract {
            return false;
        }
        if self.only_concrete && method.is_abstract {
            return false;
        }
        self.matches_metadata(&method.annotations)
    }

    pub fn matches_field(&self, field: &FieldElement) -> bool {
        self.matches_metadata(&field.annotations)
    }

    fn matches_metadata(&self, metadata: &AnnotationMetadata) -> bool {
        self.annotated
            .as_ref()
            .is_none_or(|predicate| predicate(metadata))
    }
}

impl fmt::Debug for ElementQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementQuery")
            .field("only_abstract", &self.only_abstract)
            .field("only_concrete", &self.only_concrete)
            .field("only_declared", &self.only_declared)
            .field("annotated", &self.annotated.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{AnnotationSource, names};

    #[test]
    fn test_abstract_and_annotated_filters() {
        let injected = MethodElement::new("com.acme.A", "setDep").annotated(
            AnnotationMetadata::builder().annotation(names::INJECT).build(),
        );
        let abstract_method = MethodElement::new("com.acme.A", "run").abstract_method();

        let query = ElementQuery::all_methods()
            .only_concrete()
            .annotated(|m| m.has_declared_annotation(names::INJECT));
        assert!(query.matches_method(&injected));
        assert!(!query.matches_method(&abstract_method));

        let query = ElementQuery::all_methods().only_abstract();
        assert!(query.matches_method(&abstract_method));
        assert!(!query.matches_method(&injected));
    }
}
