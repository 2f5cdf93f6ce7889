use super::type_ref::TypeRef;
use crate::annotation::AnnotationMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identity of a declaration element, used as the metadata cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Any element whose annotation view can be replaced during planning
pub trait AnnotatedElement: Clone + fmt::Display {
    fn id(&self) -> ElementId;

    /// Facts supplied by the declaration model, never mutated
    fn source_metadata(&self) -> &Arc<AnnotationMetadata>;

    /// Whether other consumers can observe this element's view through the shared cache.
    /// Synthetic methods and primitive types are private to their creator.
    fn is_shared(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    AbstractClass,
    Interface,
    Primitive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassElement {
    pub name: String,
    /// Defaults to the prefix of `name`; a name without dots lives in the unnamed package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    /// Direct superclass and implemented interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub super_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_constructor: Option<MethodElement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodElement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldElement>,
    #[serde(default)]
    pub annotations: Arc<AnnotationMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MethodElement {
    pub name: String,
    pub declaring_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterElement>,
    #[serde(default = "TypeRef::void")]
    pub return_type: TypeRef,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_abstract: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_final: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_private: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_synthetic: bool,
    /// Suspending (coroutine) method
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_suspend: bool,
    /// Interface default method
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    #[serde(default)]
    pub annotations: Arc<AnnotationMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterElement {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub annotations: Arc<AnnotationMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FieldElement {
    pub name: String,
    pub declaring_type: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
    #[serde(default)]
    pub annotations: Arc<AnnotationMetadata>,
}

fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

impl ClassElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            kind: ClassKind::Class,
            type_parameters: Vec::new(),
            super_types: Vec::new(),
            primary_constructor: None,
            methods: Vec::new(),
            fields: Vec::new(),
            annotations: Arc::default(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name).with_kind(ClassKind::Interface)
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn annotated(mut self, metadata: AnnotationMetadata) -> Self {
        self.annotations = Arc::new(metadata);
        self
    }

    pub fn with_type_parameter(mut self, variable: impl Into<String>) -> Self {
        self.type_parameters.push(variable.into());
        self
    }

    pub fn with_super_type(mut self, name: impl Into<String>) -> Self {
        self.super_types.push(name.into());
        self
    }

    pub fn with_primary_constructor(mut self, constructor: MethodElement) -> Self {
        self.primary_constructor = Some(constructor);
        self
    }

    /// Adds a method, re-homing it onto this class
    pub fn with_method(mut self, mut method: MethodElement) -> Self {
        method.declaring_type = self.name.clone();
        self.methods.push(method);
        self
    }

    pub fn with_field(mut self, mut field: FieldElement) -> Self {
        field.declaring_type = self.name.clone();
        self.fields.push(field);
        self
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Package the class lives in; `None` for the unnamed package
    pub fn package_name(&self) -> Option<&str> {
        match &self.package {
            Some(package) if package.is_empty() => None,
            Some(package) => Some(package),
            None => self.name.rsplit_once('.').map(|(package, _)| package),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, ClassKind::AbstractClass | ClassKind::Interface)
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == ClassKind::Primitive
    }

    pub fn as_type(&self) -> TypeRef {
        TypeRef::concrete(self.name.clone())
    }
}

impl AnnotatedElement for ClassElement {
    fn id(&self) -> ElementId {
        ElementId(self.name.clone())
    }

    fn source_metadata(&self) -> &Arc<AnnotationMetadata> {
        &self.annotations
    }

    fn is_shared(&self) -> bool {
        !self.is_primitive()
    }
}

impl fmt::Display for ClassElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl MethodElement {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_type: declaring_type.into(),
            parameters: Vec::new(),
            return_type: TypeRef::void(),
            is_abstract: false,
            is_static: false,
            is_final: false,
            is_private: false,
            is_synthetic: false,
            is_suspend: false,
            is_default: false,
            annotations: Arc::default(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.parameters.push(ParameterElement {
            name: name.into(),
            type_ref,
            annotations: Arc::default(),
        });
        self
    }

    pub fn returning(mut self, type_ref: TypeRef) -> Self {
        self.return_type = type_ref;
        self
    }

    pub fn annotated(mut self, metadata: AnnotationMetadata) -> Self {
        self.annotations = Arc::new(metadata);
        self
    }

    pub fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    pub fn synthetic(mut self) -> Self {
        self.is_synthetic = true;
        self
    }

    pub fn suspend(mut self) -> Self {
        self.is_suspend = true;
        self
    }

    /// Name plus erased parameter types; overriding methods share it
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.erased_parameter_types().join(","))
    }

    pub fn erased_parameter_types(&self) -> Vec<String> {
        self.parameters
            .iter()
            .map(|p| p.type_ref.erased_name())
            .collect()
    }

    /// Can a generated subclass override this method
    pub fn is_overridable(&self) -> bool {
        !self.is_static && !self.is_private && !self.is_final
    }
}

impl AnnotatedElement for MethodElement {
    fn id(&self) -> ElementId {
        ElementId(format!("{}#{}", self.declaring_type, self.signature()))
    }

    fn source_metadata(&self) -> &Arc<AnnotationMetadata> {
        &self.annotations
    }

    fn is_shared(&self) -> bool {
        !self.is_synthetic
    }
}

impl fmt::Display for MethodElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_ref, p.name))
            .collect::<Vec<_>>();
        write!(
            f,
            "{} {}.{}({})",
            self.return_type,
            simple_name(&self.declaring_type),
            self.name,
            params.join(", ")
        )
    }
}

impl FieldElement {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            declaring_type: declaring_type.into(),
            type_ref,
            is_static: false,
            annotations: Arc::default(),
        }
    }

    pub fn annotated(mut self, metadata: AnnotationMetadata) -> Self {
        self.annotations = Arc::new(metadata);
        self
    }

    pub fn static_field(mut self) -> Self {
        self.is_static = true;
        self
    }
}

impl AnnotatedElement for FieldElement {
    fn id(&self) -> ElementId {
        ElementId(format!("{}.{}", self.declaring_type, self.name))
    }

    fn source_metadata(&self) -> &Arc<AnnotationMetadata> {
        &self.annotations
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.type_ref, simple_name(&self.declaring_type), self.name)
    }
}
