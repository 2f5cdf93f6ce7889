use super::{
    AopPlanner, adapter,
    interceptor::{
        InterceptorKind, has_around_stereotype, has_declared_around_advice, resolve_interceptor_binding,
    },
};
use crate::{
    annotation::{AnnotationSource, names},
    error::Result,
    plan::{BeanDefinitionPlan, BeanDefinitionVisitor, INTERCEPTED_SUFFIX, PlanKind, definition_name},
    processing::PlanningContext,
    types::{ClassElement, ElementQuery, MethodElement},
};
use std::collections::BTreeMap;
use tracing::debug;

/// The planner used unless the host supplies its own
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAopPlanner;

impl DefaultAopPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Merges class metadata into the method, records its bindings and origin, and
    /// introduces it when it has no body
    fn add_to_introduction(
        ctx: &PlanningContext<'_>,
        plan: &mut dyn BeanDefinitionVisitor,
        class: &ClassElement,
        method: &MethodElement,
    ) {
        let merged = ctx.adjust_method_to_include_class_metadata(class, method);

        if has_around_stereotype(&merged) {
            plan.visit_interceptor_binding(resolve_interceptor_binding(&merged, InterceptorKind::Around));
        }

        if class.name != method.declaring_type {
            plan.add_originating_element(&method.declaring_type);
        }

        // Concrete methods never reach the plan from here; around entries come from the processors
        if method.is_abstract {
            plan.visit_introduction_method(&method.declaring_type, method, &merged);
        }
    }
}

impl AopPlanner for DefaultAopPlanner {
    fn visit_adapted_method(
        &self,
        ctx: &PlanningContext<'_>,
        class: &ClassElement,
        source: &MethodElement,
    ) -> Result<Option<BeanDefinitionPlan>> {
        adapter::adapt(ctx, class, source)
    }

    fn visit_introspected_method(
        &self,
        ctx: &PlanningContext<'_>,
        plan: &mut dyn BeanDefinitionVisitor,
        class: &ClassElement,
        method: &MethodElement,
    ) {
        if method.is_abstract
            || has_declared_around_advice(&ctx.view(class))
            || has_declared_around_advice(&ctx.view(method))
        {
            Self::add_to_introduction(ctx, plan, class, method);
        }
    }

    fn create_introduction_plan(
        &self,
        ctx: &PlanningContext<'_>,
        class: &ClassElement,
    ) -> Result<BeanDefinitionPlan> {
        let metadata = ctx.view(class);

        let mut bindings = resolve_interceptor_binding(&metadata, InterceptorKind::Around);
        bindings.extend(resolve_interceptor_binding(&metadata, InterceptorKind::Introduction));

        let interfaces = metadata
            .value(names::INTRODUCTION, names::MEMBER_INTERFACES)
            .map(|v| v.as_strings())
            .unwrap_or_default()
            .into_iter()
            .map(|name| ctx.class(name))
            .collect::<Result<Vec<_>>>()?;

        let mut plan = BeanDefinitionPlan::new(
            class.package_name().unwrap_or_default(),
            format!("{}{INTERCEPTED_SUFFIX}", definition_name(ctx.bean_name(class))),
            PlanKind::IntroductionProxy {
                interface: class.name.clone(),
            },
            class.name.clone(),
        )
        .with_interfaces(interfaces.iter().map(|i| i.name.clone()).collect());
        debug!("Created introduction plan {} for {}", plan.name, class);

        if !bindings.is_empty() {
            plan.visit_interceptor_binding(bindings);
        }

        for interface in interfaces {
            for method in ctx.model.enclosed_methods(interface, &ElementQuery::all_methods()) {
                Self::add_to_introduction(ctx, &mut plan, class, &method);
            }
        }

        Ok(plan)
    }

    fn create_around_plan(
        &self,
        _ctx: &PlanningContext<'_>,
        existing: &BeanDefinitionPlan,
        metadata: &dyn AnnotationSource,
        force_proxy_target: bool,
    ) -> BeanDefinitionPlan {
        let mut settings = BTreeMap::new();
        for around in metadata.values_by_name(names::AROUND) {
            for (member, value) in &around.members {
                if let Some(enabled) = value.as_bool() {
                    settings.entry(member.clone()).or_insert(enabled);
                }
            }
        }
        if force_proxy_target {
            settings.insert(names::MEMBER_PROXY_TARGET.to_string(), true);
        }

        let mut plan = BeanDefinitionPlan::new(
            existing.package.clone(),
            format!("{}{INTERCEPTED_SUFFIX}", existing.name),
            PlanKind::AroundProxy {
                settings,
                target: existing.qualified_name(),
            },
            existing.bean_type.clone(),
        );
        debug!("Created around plan {} for {}", plan.name, existing.bean_type);

        let bindings = resolve_interceptor_binding(metadata, InterceptorKind::Around);
        if !bindings.is_empty() {
            plan.visit_interceptor_binding(bindings);
        }
        plan
    }

    fn visit_around_method(
        &self,
        ctx: &PlanningContext<'_>,
        plan: &mut dyn BeanDefinitionVisitor,
        bean_type: &str,
        method: &MethodElement,
    ) {
        let metadata = ctx.view(method);
        let bindings = resolve_interceptor_binding(&metadata, InterceptorKind::Around);
        if !bindings.is_empty() {
            plan.visit_interceptor_binding(bindings);
        }
        plan.visit_around_method(bean_type, method, &metadata);
    }
}
