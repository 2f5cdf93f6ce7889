//! Generated-artifact plans
//!
//! A plan is the hand-off to the emitters: everything planning decided about one
//! generated definition, recorded as an append-only list of artifacts.

pub mod definition;

pub use definition::{BeanDefinitionPlan, InjectionKind, PlanArtifact, PlanKind};

use crate::{
    annotation::AnnotationView,
    aop::InterceptorBinding,
    types::{FieldElement, MethodElement, TypeRef},
};
use std::collections::BTreeMap;

pub const DEFINITION_SUFFIX: &str = "$Definition";
pub const INTERCEPTED_SUFFIX: &str = "$Intercepted";

/// `$Greeter$Definition` for bean name `Greeter`
pub fn definition_name(bean_name: &str) -> String {
    format!("${bean_name}{DEFINITION_SUFFIX}")
}

/// Operations an emitter accepts while a definition is being planned.
///
/// Every call appends; nothing recorded earlier is removed or overwritten.
pub trait BeanDefinitionVisitor {
    fn visit_default_constructor(&mut self);

    /// Binds the type variables of `interface` to concrete types
    fn visit_type_arguments(&mut self, interface: &str, arguments: BTreeMap<String, TypeRef>);

    fn visit_interceptor_binding(&mut self, bindings: Vec<InterceptorBinding>);

    fn visit_around_method(&mut self, declaring_type: &str, method: &MethodElement, metadata: &AnnotationView);

    fn visit_introduction_method(
        &mut self,
        declaring_type: &str,
        method: &MethodElement,
        metadata: &AnnotationView,
    );

    /// Records a type whose change invalidates this definition
    fn add_originating_element(&mut self, type_name: &str);

    fn visit_injection_point(&mut self, member: &str, kind: InjectionKind);

    fn visit_configuration_property(&mut self, field: &FieldElement);
}
