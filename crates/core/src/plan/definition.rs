use super::BeanDefinitionVisitor;
use crate::{
    annotation::AnnotationView,
    aop::InterceptorBinding,
    types::{FieldElement, MethodElement, TypeRef},
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanKind {
    Bean,
    /// Produced by a factory method of the owning class
    FactoryMethod { method: String },
    AroundProxy {
        settings: BTreeMap<String, bool>,
        /// Definition the proxy wraps
        target: String,
    },
    IntroductionProxy { interface: String },
    /// Implements `interface` by delegating to `source_method`
    AdaptedMethod { source_method: String, interface: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionKind {
    Constructor,
    Method,
    Field,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "artifact", rename_all = "snake_case")]
pub enum PlanArtifact {
    DefaultConstructor,
    TypeArguments {
        interface: String,
        arguments: BTreeMap<String, TypeRef>,
    },
    InterceptorBinding { bindings: Vec<InterceptorBinding> },
    AroundMethod {
        declaring_type: String,
        method: MethodElement,
        metadata: AnnotationView,
    },
    IntroductionMethod {
        declaring_type: String,
        method: MethodElement,
        metadata: AnnotationView,
    },
    OriginatingElement { type_name: String },
    InjectionPoint { member: String, kind: InjectionKind },
    ConfigurationProperty { field: FieldElement },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeanDefinitionPlan {
    pub package: String,
    pub name: String,
    pub kind: PlanKind,
    /// Qualified name of the class the definition is for
    pub bean_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    artifacts: Vec<PlanArtifact>,
}

impl BeanDefinitionPlan {
    pub fn new(
        package: impl Into<String>,
        name: impl Into<String>,
        kind: PlanKind,
        bean_type: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            kind,
            bean_type: bean_type.into(),
            interfaces: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    pub fn with_interfaces(mut self, interfaces: Vec<String>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    pub fn artifacts(&self) -> &[PlanArtifact] {
        &self.artifacts
    }

    pub fn around_methods(&self) -> Vec<&MethodElement> {
        self.artifacts
            .iter()
            .filter_map(|a| match a {
                PlanArtifact::AroundMethod { method, .. } => Some(method),
                _ => None,
            })
            .collect()
    }

    pub fn introduction_methods(&self) -> Vec<&MethodElement> {
        self.artifacts
            .iter()
            .filter_map(|a| match a {
                PlanArtifact::IntroductionMethod { method, .. } => Some(method),
                _ => None,
            })
            .collect()
    }

    pub fn originating_elements(&self) -> Vec<&str> {
        self.artifacts
            .iter()
            .filter_map(|a| match a {
                PlanArtifact::OriginatingElement { type_name } => Some(type_name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every recorded type-argument binding for `interface`, in order
    pub fn type_arguments(&self, interface: &str) -> Vec<&BTreeMap<String, TypeRef>> {
        self.artifacts
            .iter()
            .filter_map(|a| match a {
                PlanArtifact::TypeArguments { interface: i, arguments } if i == interface => Some(arguments),
                _ => None,
            })
            .collect()
    }

    pub fn interceptor_bindings(&self) -> Vec<&InterceptorBinding> {
        self.artifacts
            .iter()
            .filter_map(|a| match a {
                PlanArtifact::InterceptorBinding { bindings } => Some(bindings),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Annotation view recorded with the around or introduction entry for `method_name`
    pub fn method_metadata(&self, method_name: &str) -> Option<&AnnotationView> {
        self.artifacts.iter().find_map(|a| match a {
            PlanArtifact::AroundMethod { method, metadata, .. }
            | PlanArtifact::IntroductionMethod { method, metadata, .. }
                if method.name == method_name =>
            {
                Some(metadata)
            }
            _ => None,
        })
    }

    fn push(&mut self, artifact: PlanArtifact) {
        tracing::trace!("{}: {:?}", self.name, artifact);
        self.artifacts.push(artifact);
    }
}

impl BeanDefinitionVisitor for BeanDefinitionPlan {
    fn visit_default_constructor(&mut self) {
        self.push(PlanArtifact::DefaultConstructor);
    }

    fn visit_type_arguments(&mut self, interface: &str, arguments: BTreeMap<String, TypeRef>) {
        self.push(PlanArtifact::TypeArguments {
            interface: interface.to_string(),
            arguments,
        });
    }

    fn visit_interceptor_binding(&mut self, bindings: Vec<InterceptorBinding>) {
        self.push(PlanArtifact::InterceptorBinding { bindings });
    }

    fn visit_around_method(&mut self, declaring_type: &str, method: &MethodElement, metadata: &AnnotationView) {
        self.push(PlanArtifact::AroundMethod {
            declaring_type: declaring_type.to_string(),
            method: method.clone(),
            metadata: metadata.clone(),
        });
    }

    fn visit_introduction_method(
        &mut self,
        declaring_type: &str,
        method: &MethodElement,
        metadata: &AnnotationView,
    ) {
        self.push(PlanArtifact::IntroductionMethod {
            declaring_type: declaring_type.to_string(),
            method: method.clone(),
            metadata: metadata.clone(),
        });
    }

    fn add_originating_element(&mut self, type_name: &str) {
        self.push(PlanArtifact::OriginatingElement {
            type_name: type_name.to_string(),
        });
    }

    fn visit_injection_point(&mut self, member: &str, kind: InjectionKind) {
        self.push(PlanArtifact::InjectionPoint {
            member: member.to_string(),
            kind,
        });
    }

    fn visit_configuration_property(&mut self, field: &FieldElement) {
        self.push(PlanArtifact::ConfigurationProperty { field: field.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationMetadata;

    #[test]
    fn test_visits_append_in_order() {
        let mut plan = BeanDefinitionPlan::new("com.acme", "$Greeter$Definition", PlanKind::Bean, "com.acme.Greeter");
        let method = MethodElement::new("com.acme.Greeter", "greet");
        let view: AnnotationView = AnnotationMetadata::default().into();

        plan.visit_default_constructor();
        plan.visit_around_method("com.acme.Greeter", &method, &view);
        plan.visit_around_method("com.acme.Greeter", &method, &view);
        plan.add_originating_element("com.acme.Base");

        assert_eq!(plan.artifacts().len(), 4);
        assert_eq!(plan.artifacts()[0], PlanArtifact::DefaultConstructor);
        assert_eq!(plan.around_methods().len(), 2);
        assert_eq!(plan.originating_elements(), vec!["com.acme.Base"]);
        assert_eq!(plan.qualified_name(), "com.acme.$Greeter$Definition");
    }

    #[test]
    fn test_plan_serializes_tagged_artifacts() -> crate::Result<()> {
        let mut plan = BeanDefinitionPlan::new("com.acme", "$Greeter$Definition", PlanKind::Bean, "com.acme.Greeter");
        plan.visit_type_arguments(
            "com.acme.Fn",
            BTreeMap::from([("T".to_string(), TypeRef::concrete("java.lang.String"))]),
        );

        let json = serde_json::to_value(&plan)?;
        assert_eq!(json["kind"]["type"], "bean");
        assert_eq!(json["artifacts"][0]["artifact"], "type_arguments");
        assert_eq!(json["artifacts"][0]["arguments"]["T"]["name"], "java.lang.String");
        Ok(())
    }
}
