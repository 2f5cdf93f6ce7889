//! AOP planning: interception proxies, introductions and method adaptation

mod adapter;
pub mod interceptor;
mod planner;

pub use interceptor::{
    InterceptorBinding, InterceptorKind, has_around_stereotype, has_declared_around_advice,
    resolve_interceptor_binding,
};
pub use planner::DefaultAopPlanner;

use crate::{
    annotation::AnnotationSource,
    error::Result,
    plan::{BeanDefinitionPlan, BeanDefinitionVisitor},
    processing::PlanningContext,
    types::{ClassElement, MethodElement},
};

/// Builds the proxy-shaped plans requested by the bean processors.
///
/// Handed to the planner at construction; processors only see it through the
/// planning context.
pub trait AopPlanner: Send + Sync {
    /// Plan for a method carrying the adapter annotation, `None` if it is not a candidate
    fn visit_adapted_method(
        &self,
        ctx: &PlanningContext<'_>,
        class: &ClassElement,
        source: &MethodElement,
    ) -> Result<Option<BeanDefinitionPlan>>;

    /// Adds `method` to an introduction plan when it needs interception
    fn visit_introspected_method(
        &self,
        ctx: &PlanningContext<'_>,
        plan: &mut dyn BeanDefinitionVisitor,
        class: &ClassElement,
        method: &MethodElement,
    );

    fn create_introduction_plan(
        &self,
        ctx: &PlanningContext<'_>,
        class: &ClassElement,
    ) -> Result<BeanDefinitionPlan>;

    /// Proxy wrapping `existing`, configured from the around settings found in `metadata`
    fn create_around_plan(
        &self,
        ctx: &PlanningContext<'_>,
        existing: &BeanDefinitionPlan,
        metadata: &dyn AnnotationSource,
        force_proxy_target: bool,
    ) -> BeanDefinitionPlan;

    /// Records the method's around bindings, then the around entry itself
    fn visit_around_method(
        &self,
        ctx: &PlanningContext<'_>,
        plan: &mut dyn BeanDefinitionVisitor,
        bean_type: &str,
        method: &MethodElement,
    );
}
