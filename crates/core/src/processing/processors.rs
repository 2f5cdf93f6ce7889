//! What each bean strategy plans

use super::{PlanningContext, bean_builder::BeanBuilder};
use crate::{
    annotation::{AnnotationSource, names},
    aop::has_around_stereotype,
    error::Result,
    plan::{BeanDefinitionPlan, BeanDefinitionVisitor, InjectionKind, PlanKind, definition_name},
    types::{ClassElement, ElementQuery},
};
use tracing::debug;

/// Definition plan, an around proxy when needed, and any adapted methods
pub(crate) fn simple(
    ctx: &PlanningContext<'_>,
    class: &ClassElement,
    aop_proxy: bool,
) -> Result<Vec<BeanDefinitionPlan>> {
    let builder = BeanBuilder::new(ctx, class);
    let definition = builder.definition_plan();
    let around = builder.around_plan(&definition, aop_proxy);
    let adapted = builder.adapted_plans()?;

    let mut plans = vec![definition];
    plans.extend(around);
    plans.extend(adapted);
    Ok(plans)
}

/// The factory class as a simple bean, then one plan per producer method
pub(crate) fn factory(
    ctx: &PlanningContext<'_>,
    class: &ClassElement,
    aop_proxy: bool,
) -> Result<Vec<BeanDefinitionPlan>> {
    let mut plans = simple(ctx, class, aop_proxy)?;
    let builder = BeanBuilder::new(ctx, class);
    let bean_name = ctx.bean_name(class);

    let producers = ElementQuery::all_methods()
        .only_concrete()
        .only_declared()
        .annotated(|m| m.has_stereotype(names::BEAN));
    for (index, method) in ctx.model.enclosed_methods(class, &producers).into_iter().enumerate() {
        let produced_type = method.return_type.name().to_string();
        let mut plan = BeanDefinitionPlan::new(
            builder.package(),
            definition_name(&format!("{bean_name}${}{index}", method.name)),
            PlanKind::FactoryMethod {
                method: method.name.clone(),
            },
            produced_type.clone(),
        );
        plan.add_originating_element(&class.name);
        for parameter in &method.parameters {
            plan.visit_injection_point(
                &format!("{}#{}", method.name, parameter.name),
                InjectionKind::Method,
            );
        }
        debug!("Producer {} yields {}", method, produced_type);

        let method_metadata = ctx.view(&method);
        let proxy = if has_around_stereotype(&method_metadata) {
            let mut proxy = ctx.aop.create_around_plan(ctx, &plan, &method_metadata, true);
            if let Some(produced) = ctx.model.class(&produced_type) {
                for target in builder.overridable_methods(produced) {
                    ctx.adjust_method_to_include_class_metadata(produced, &target);
                    ctx.aop.visit_around_method(ctx, &mut proxy, &produced.name, &target);
                }
            }
            Some(proxy)
        } else {
            None
        };

        plans.push(plan);
        plans.extend(proxy);
    }
    Ok(plans)
}

/// Definition plan with one property per instance field
pub(crate) fn configuration_properties(
    ctx: &PlanningContext<'_>,
    class: &ClassElement,
) -> Result<Vec<BeanDefinitionPlan>> {
    let mut plan = BeanBuilder::new(ctx, class).definition_plan();
    for field in ctx.model.enclosed_fields(class, &ElementQuery::all_fields()) {
        if !field.is_static {
            plan.visit_configuration_property(&field);
        }
    }
    Ok(vec![plan])
}

/// Introduction proxy implementing an interface and its extra introduced interfaces
pub(crate) fn introduction_interface(
    ctx: &PlanningContext<'_>,
    class: &ClassElement,
) -> Result<Vec<BeanDefinitionPlan>> {
    let mut plan = ctx.aop.create_introduction_plan(ctx, class)?;
    for method in ctx.model.enclosed_methods(class, &ElementQuery::all_methods()) {
        ctx.aop.visit_introspected_method(ctx, &mut plan, class, &method);
    }
    Ok(vec![plan])
}

/// Introduction proxy over an abstract or advised class. Abstract methods are introduced;
/// with `around`, concrete methods carrying around advice are intercepted as well.
pub(crate) fn introduction_proxy(
    ctx: &PlanningContext<'_>,
    class: &ClassElement,
    around: bool,
) -> Result<Vec<BeanDefinitionPlan>> {
    let mut plan = ctx.aop.create_introduction_plan(ctx, class)?;
    for method in ctx.model.enclosed_methods(class, &ElementQuery::all_methods()) {
        if method.is_abstract {
            ctx.aop.visit_introspected_method(ctx, &mut plan, class, &method);
            continue;
        }
        if around && method.is_overridable() && method.declaring_type != names::OBJECT {
            let merged = ctx.merged_method_view(class, &method);
            if has_around_stereotype(&merged) {
                ctx.adjust_method_to_include_class_metadata(class, &method);
                ctx.aop.visit_around_method(ctx, &mut plan, &class.name, &method);
            }
        }
    }
    Ok(vec![plan])
}
