//! Single-abstract-method adaptation
//!
//! A bean method annotated with the adapter annotation is exposed as an implementation
//! of a functional interface. The interface's only abstract method is matched against
//! the bean method argument by argument, binding interface type variables on the way.

use crate::{
    annotation::{AnnotationSource, MemberValue, names},
    error::{Error, Result},
    plan::{BeanDefinitionPlan, BeanDefinitionVisitor, PlanKind},
    processing::{Isolated, PlanningContext},
    types::{ClassElement, ElementQuery, MethodElement},
};
use std::collections::BTreeMap;
use tracing::debug;

pub(super) fn adapt(
    ctx: &PlanningContext<'_>,
    class: &ClassElement,
    source: &MethodElement,
) -> Result<Option<BeanDefinitionPlan>> {
    let method_metadata = ctx.element_annotation_metadata(source);
    let Some(interface) = method_metadata
        .string_value(names::ADAPTER, names::MEMBER_VALUE)
        .and_then(|name| ctx.model.class(name))
    else {
        return Ok(None);
    };

    if !interface.is_interface() {
        return Err(Error::unsupported_target(
            source,
            format!("Class to adapt [{}] is not an interface", interface.name),
        ));
    }

    let name = format!(
        "{}${}${}{}",
        ctx.bean_name(class),
        interface.simple_name(),
        source.name,
        ctx.next_adapted_index()
    );
    let mut plan = BeanDefinitionPlan::new(
        class.package_name().unwrap_or_default(),
        name,
        PlanKind::AdaptedMethod {
            source_method: source.name.clone(),
            interface: interface.name.clone(),
        },
        class.name.clone(),
    )
    .with_interfaces(vec![interface.name.clone()]);
    debug!("Adapting {} to {} as {}", source, interface, plan.name);

    plan.visit_default_constructor();

    let methods = ctx
        .model
        .enclosed_methods(interface, &ElementQuery::all_methods().only_abstract());
    let target = match methods.as_slice() {
        [] => {
            return Err(Error::unsupported_target(
                source,
                format!(
                    "Interface to adapt [{}] is not a SAM type. No methods found.",
                    interface.name
                ),
            ));
        }
        [target] => target,
        _ => {
            return Err(Error::unsupported_target(
                source,
                format!(
                    "Interface to adapt [{}] is not a SAM type. More than one abstract method declared.",
                    interface.name
                ),
            ));
        }
    };

    ctx.guard().guarded(target, |target_method| {
        link_target(ctx, class, source, interface, target_method, &mut plan)
    })?;

    Ok(Some(plan))
}

/// Checks the signatures, binds type variables and records the linkage on the isolated target
fn link_target(
    ctx: &PlanningContext<'_>,
    class: &ClassElement,
    source: &MethodElement,
    interface: &ClassElement,
    target_method: &mut Isolated<MethodElement>,
    plan: &mut BeanDefinitionPlan,
) -> Result<()> {
    let target = target_method.element().clone();

    if target.parameters.len() != source.parameters.len() {
        return Err(Error::signature_mismatch(
            source,
            format!("Cannot adapt method [{source}] to target method [{target}]. Argument lengths don't match."),
        ));
    }
    if source.is_suspend {
        return Err(Error::UnsupportedMethodKind {
            element: source.to_string(),
            message: format!(
                "Cannot adapt method [{source}] to target method [{target}]. Suspending methods are not supported here."
            ),
        });
    }

    let mut generic_types = BTreeMap::new();
    for (i, (target_param, source_param)) in target.parameters.iter().zip(&source.parameters).enumerate() {
        let target_type = &target_param.type_ref;
        let source_type = &source_param.type_ref;

        if let Some(variable) = target_type.placeholder_variable() {
            if interface.type_parameters.iter().any(|p| p == variable) {
                generic_types
                    .entry(variable.to_string())
                    .or_insert_with(|| source_type.clone());
            }
        }

        if !ctx.model.is_assignable(source_type, target_type.name()) {
            return Err(Error::signature_mismatch(
                source,
                format!(
                    "Cannot adapt method [{source}] to target method [{target}]. Type [{}] is not a subtype of type [{}] for argument at position {i}",
                    source_type.name(),
                    target_type.name()
                ),
            ));
        }
    }

    if !generic_types.is_empty() {
        plan.visit_type_arguments(&interface.name, generic_types);
    }

    let argument_types: Vec<MemberValue> = source
        .parameters
        .iter()
        .map(|p| MemberValue::class(p.type_ref.erased_name()))
        .collect();
    let qualifier = ctx
        .view(class)
        .string_value(names::NAMED, names::MEMBER_VALUE)
        .filter(|q| !q.trim().is_empty())
        .map(str::to_string);

    target_method.annotate(names::ADAPTER, |adapter| {
        adapter.set_member(names::adapter::ADAPTED_BEAN, MemberValue::class(class.name.clone()));
        adapter.set_member(names::adapter::ADAPTED_METHOD, source.name.clone());
        adapter.set_member(names::adapter::ADAPTED_ARGUMENT_TYPES, argument_types);
        if let Some(qualifier) = qualifier {
            adapter.set_member(names::adapter::ADAPTED_QUALIFIER, qualifier);
        }
    });

    plan.visit_around_method(&interface.name, target_method.element(), target_method.annotation_metadata());
    Ok(())
}
