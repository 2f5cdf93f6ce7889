//! Pieces shared by the bean processors

use super::PlanningContext;
use crate::{
    annotation::{AnnotationMetadata, AnnotationSource, names},
    aop::has_around_stereotype,
    error::{Error, Result},
    plan::{BeanDefinitionPlan, BeanDefinitionVisitor, InjectionKind, PlanKind, definition_name},
    types::{AnnotatedElement, ClassElement, ElementQuery, MethodElement},
};
use tracing::debug;

/// Members carrying one of these are injection points
pub(crate) fn is_injection_point(metadata: &AnnotationMetadata) -> bool {
    metadata.has_stereotype(names::INJECT)
        || metadata.has_stereotype(names::VALUE)
        || metadata.has_stereotype(names::PROPERTY)
}

pub(crate) fn check_package(class: &ClassElement) -> Result<()> {
    if class.package_name().is_none() {
        return Err(Error::IllegalLocation {
            element: class.name.clone(),
            message: "Beans cannot be in the default package".to_string(),
        });
    }
    Ok(())
}

pub(crate) struct BeanBuilder<'c, 'a> {
    ctx: &'c PlanningContext<'a>,
    class: &'c ClassElement,
}

impl<'c, 'a> BeanBuilder<'c, 'a> {
    pub(crate) fn new(ctx: &'c PlanningContext<'a>, class: &'c ClassElement) -> Self {
        Self { ctx, class }
    }

    pub(crate) fn package(&self) -> &'c str {
        self.class.package_name().unwrap_or_default()
    }

    /// Definition plan for the class itself with its constructor and injection points
    pub(crate) fn definition_plan(&self) -> BeanDefinitionPlan {
        let mut plan = BeanDefinitionPlan::new(
            self.package(),
            definition_name(self.ctx.bean_name(self.class)),
            PlanKind::Bean,
            self.class.name.clone(),
        );
        debug!("Created definition plan {} for {}", plan.name, self.class);

        match &self.class.primary_constructor {
            Some(constructor) if !constructor.parameters.is_empty() => {
                plan.visit_injection_point(&constructor.id().to_string(), InjectionKind::Constructor);
            }
            _ => plan.visit_default_constructor(),
        }

        let declared = ElementQuery::all_methods()
            .only_concrete()
            .only_declared()
            .annotated(is_injection_point);
        for method in self.ctx.model.enclosed_methods(self.class, &declared) {
            plan.visit_injection_point(&method.id().to_string(), InjectionKind::Method);
        }

        let fields = ElementQuery::all_fields().only_declared().annotated(is_injection_point);
        for field in self.ctx.model.enclosed_fields(self.class, &fields) {
            plan.visit_injection_point(&field.id().to_string(), InjectionKind::Field);
        }

        plan
    }

    /// Concrete methods a generated subclass may intercept
    pub(crate) fn overridable_methods(&self, class: &ClassElement) -> Vec<MethodElement> {
        self.ctx
            .model
            .enclosed_methods(class, &ElementQuery::all_methods().only_concrete())
            .into_iter()
            .filter(|m| m.is_overridable() && m.declaring_type != names::OBJECT)
            .collect()
    }

    /// Around proxy over `definition`. Every overridable method is intercepted for a proxy
    /// type, otherwise only the methods whose merged metadata carries around advice.
    /// Producer methods are advised through their own proxies.
    pub(crate) fn around_plan(
        &self,
        definition: &BeanDefinitionPlan,
        aop_proxy: bool,
    ) -> Option<BeanDefinitionPlan> {
        let advised: Vec<MethodElement> = self
            .overridable_methods(self.class)
            .into_iter()
            .filter(|m| !self.ctx.element_annotation_metadata(m).has_stereotype(names::BEAN))
            .filter(|m| aop_proxy || has_around_stereotype(&self.ctx.merged_method_view(self.class, m)))
            .collect();
        if advised.is_empty() && !aop_proxy {
            return None;
        }

        let class_metadata = self.ctx.view(self.class);
        let mut proxy = self
            .ctx
            .aop
            .create_around_plan(self.ctx, definition, &class_metadata, false);
        for method in &advised {
            self.ctx.adjust_method_to_include_class_metadata(self.class, method);
            self.ctx
                .aop
                .visit_around_method(self.ctx, &mut proxy, &self.class.name, method);
        }
        Some(proxy)
    }

    /// One plan per declared method carrying the adapter annotation
    pub(crate) fn adapted_plans(&self) -> Result<Vec<BeanDefinitionPlan>> {
        let mut plans = Vec::new();
        let query = ElementQuery::all_methods()
            .only_declared()
            .annotated(|m| m.has_stereotype(names::ADAPTER));
        for method in self.ctx.model.enclosed_methods(self.class, &query) {
            if let Some(plan) = self.ctx.aop.visit_adapted_method(self.ctx, self.class, &method)? {
                plans.push(plan);
            }
        }
        Ok(plans)
    }
}
