//! In-memory declaration model
//!
//! Holds the classes produced by a program introspector, usually loaded from the
//! JSON document it writes (`{"classes": [...]}`).

use crate::{
    error::Result,
    interfaces::DeclarationModel,
    types::ClassElement,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    classes: BTreeMap<String, ClassElement>,
}

#[derive(Serialize, Deserialize)]
struct ModelDocument {
    #[serde(default)]
    classes: Vec<ClassElement>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_classes(classes: impl IntoIterator<Item = ClassElement>) -> Self {
        let mut index = Self::new();
        for class in classes {
            index.insert(class);
        }
        index
    }

    pub fn with_class(mut self, class: ClassElement) -> Self {
        self.insert(class);
        self
    }

    /// Inserts or replaces a class; returns the previous declaration
    pub fn insert(&mut self, class: ClassElement) -> Option<ClassElement> {
        self.classes.insert(class.name.clone(), class)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let document: ModelDocument = serde_json::from_str(contents)?;
        Ok(Self::from_classes(document.classes))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let index = Self::from_json(&contents)?;
        tracing::debug!("Loaded {} classes from {:?}", index.len(), path);
        Ok(index)
    }

    pub fn to_json(&self) -> Result<String> {
        let document = ModelDocument {
            classes: self.classes.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Merges another index into this one; later declarations replace earlier ones
    pub fn extend(&mut self, other: ClassIndex) {
        self.classes.extend(other.classes);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl DeclarationModel for ClassIndex {
    fn class(&self, name: &str) -> Option<&ClassElement> {
        self.classes.get(name)
    }

    fn classes(&self) -> Vec<&ClassElement> {
        self.classes.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        annotation::{AnnotationMetadata, AnnotationSource, names},
        types::{ElementQuery, FieldElement, MethodElement, TypeRef},
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn numbers() -> ClassIndex {
        ClassIndex::new()
            .with_class(ClassElement::new("java.lang.Number").with_kind(crate::types::ClassKind::AbstractClass))
            .with_class(ClassElement::new("java.lang.Integer").with_super_type("java.lang.Number"))
            .with_class(ClassElement::new("java.lang.String").with_super_type("java.lang.CharSequence"))
    }

    #[test]
    fn test_assignability_follows_super_types() {
        let model = numbers();
        let integer = TypeRef::concrete("java.lang.Integer");
        let number = TypeRef::concrete("java.lang.Number");

        assert!(model.is_assignable(&integer, "java.lang.Number"));
        assert!(model.is_assignable(&integer, "java.lang.Integer"));
        assert!(!model.is_assignable(&number, "java.lang.Integer"));
        assert!(model.is_assignable(&number, names::OBJECT));
        assert!(model.is_assignable(&TypeRef::concrete("java.lang.String"), "java.lang.CharSequence"));
    }

    #[test]
    fn test_primitive_assignability_only_widens() {
        let model = numbers();
        let int = TypeRef::concrete("int");

        assert!(model.is_assignable(&int, "int"));
        assert!(model.is_assignable(&int, "long"));
        assert!(!model.is_assignable(&TypeRef::concrete("long"), "int"));
        assert!(!model.is_assignable(&int, "java.lang.String"));
        assert!(!model.is_assignable(&int, names::OBJECT));
    }

    #[test]
    fn test_enclosed_methods_flatten_interface_hierarchy() {
        let model = ClassIndex::new()
            .with_class(
                ClassElement::interface("com.acme.Base")
                    .with_method(MethodElement::new("", "close").abstract_method()),
            )
            .with_class(
                ClassElement::interface("com.acme.Child")
                    .with_super_type("com.acme.Base")
                    .with_method(MethodElement::new("", "run").abstract_method())
                    .with_method(MethodElement::new("", "describe")),
            );
        let child = model.class("com.acme.Child").unwrap();

        let abstract_methods = model.enclosed_methods(child, &ElementQuery::all_methods().only_abstract());
        let names: Vec<_> = abstract_methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["run", "close"]);
        assert_eq!(abstract_methods[1].declaring_type, "com.acme.Base");

        let declared = model.enclosed_methods(child, &ElementQuery::all_methods().only_declared());
        assert_eq!(declared.len(), 2);
    }

    #[test]
    fn test_subtype_override_hides_inherited_method() {
        let model = ClassIndex::new()
            .with_class(
                ClassElement::interface("com.acme.Fn")
                    .with_method(MethodElement::new("", "apply").abstract_method()),
            )
            .with_class(
                ClassElement::new("com.acme.Impl")
                    .with_super_type("com.acme.Fn")
                    .with_method(MethodElement::new("", "apply")),
            );
        let class = model.class("com.acme.Impl").unwrap();

        assert!(model
            .enclosed_methods(class, &ElementQuery::all_methods().only_abstract())
            .is_empty());
    }

    #[test]
    fn test_enclosed_field_with_predicate() {
        let model = ClassIndex::new().with_class(
            ClassElement::new("com.acme.Service")
                .with_field(FieldElement::new("", "plain", TypeRef::concrete("int")))
                .with_field(
                    FieldElement::new("", "dep", TypeRef::concrete("com.acme.Dep")).annotated(
                        AnnotationMetadata::builder().annotation(names::INJECT).build(),
                    ),
                ),
        );
        let class = model.class("com.acme.Service").unwrap();

        let field = model.enclosed_field(
            class,
            &ElementQuery::all_fields().annotated(|m| m.has_stereotype(names::INJECT)),
        );
        assert_eq!(field.map(|f| f.name), Some("dep".to_string()));
    }

    #[test]
    fn test_load_model_document() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{"classes": [{{"name": "com.acme.Greeter", "kind": "interface"}}]}}"#
        )?;

        let index = ClassIndex::load(file.path())?;
        assert_eq!(index.len(), 1);
        assert!(index.class("com.acme.Greeter").unwrap().is_interface());

        let round = ClassIndex::from_json(&index.to_json()?)?;
        assert_eq!(round.len(), 1);
        Ok(())
    }
}
