use super::{BeanStrategy, PlanningContext, bean_builder::is_injection_point};
use crate::{
    annotation::{AnnotationSource, AnnotationView, names},
    aop::has_around_stereotype,
    error::{Error, Result},
    types::{ClassElement, ElementQuery},
};
use tracing::debug;

/// Selects exactly one strategy per class; the first matching rule wins
pub struct BeanClassifier<'c, 'a> {
    ctx: &'c PlanningContext<'a>,
}

impl<'c, 'a> BeanClassifier<'c, 'a> {
    pub fn new(ctx: &'c PlanningContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn classify(&self, class: &ClassElement) -> Result<BeanStrategy> {
        let strategy = self.select(class)?;
        debug!("Classified {} as {}", class, strategy);
        Ok(strategy)
    }

    fn select(&self, class: &ClassElement) -> Result<BeanStrategy> {
        if self.ctx.overrides.is_skipped(&class.name) {
            return Ok(BeanStrategy::Empty);
        }

        let metadata = self.ctx.view(class);
        let is_abstract = class.is_abstract();
        let is_introduction = metadata.has_stereotype(names::INTRODUCTION);

        if self.ctx.configuration.is_configuration_properties(class, &metadata) {
            if class.is_interface() {
                return Ok(BeanStrategy::IntroductionInterface);
            }
            return Ok(BeanStrategy::ConfigurationProperties);
        }

        let aop_proxy = self.is_aop_proxy_type(class, &metadata);
        if !is_abstract && metadata.has_stereotype(names::FACTORY) {
            return Ok(BeanStrategy::Factory { aop_proxy });
        }

        if aop_proxy {
            if is_introduction {
                return Ok(BeanStrategy::IntroductionProxySupported { around: true });
            }
            return Ok(BeanStrategy::Simple { aop_proxy: true });
        }

        if is_introduction {
            if class.is_interface() {
                return Ok(BeanStrategy::IntroductionInterface);
            }
            return Ok(BeanStrategy::IntroductionProxySupported { around: false });
        }

        // Abstract classes only become beans through explicit bean metadata
        if self.is_declared_bean(class, &metadata)
            || (!is_abstract && (self.contains_inject_method(class) || self.contains_inject_field(class)))
        {
            if let Some(marker) = self
                .ctx
                .foreign_singletons
                .iter()
                .find(|marker| metadata.has_stereotype(marker))
            {
                return Err(Error::DisallowedAnnotation {
                    element: class.name.clone(),
                    message: format!(
                        "Class annotated with {marker} instead of {}. Import {} to use dependency injection.",
                        names::SINGLETON,
                        names::SINGLETON
                    ),
                });
            }
            return Ok(BeanStrategy::Simple { aop_proxy: false });
        }

        Ok(BeanStrategy::Empty)
    }

    /// Concrete, not an interceptor itself, and advised with around advice
    fn is_aop_proxy_type(&self, class: &ClassElement, metadata: &AnnotationView) -> bool {
        !class.is_abstract()
            && !self.ctx.model.is_assignable(&class.as_type(), names::INTERCEPTOR_TYPE)
            && has_around_stereotype(metadata)
    }

    fn is_declared_bean(&self, class: &ClassElement, metadata: &AnnotationView) -> bool {
        if is_declared_bean_in_metadata(metadata) {
            return true;
        }
        if class.is_abstract() {
            return false;
        }
        metadata.has_stereotype(names::EXECUTABLE)
            || metadata.has_stereotype(names::QUALIFIER)
            || class
                .primary_constructor
                .as_ref()
                .is_some_and(|constructor| self.ctx.view(constructor).has_stereotype(names::INJECT))
    }

    fn contains_inject_method(&self, class: &ClassElement) -> bool {
        let query = ElementQuery::all_methods()
            .only_concrete()
            .only_declared()
            .annotated(is_injection_point);
        self.ctx.model.enclosed_method(class, &query).is_some()
    }

    fn contains_inject_field(&self, class: &ClassElement) -> bool {
        let query = ElementQuery::all_fields().only_declared().annotated(is_injection_point);
        self.ctx.model.enclosed_field(class, &query).is_some()
    }
}

pub fn is_declared_bean_in_metadata<S: AnnotationSource + ?Sized>(metadata: &S) -> bool {
    metadata.has_declared_stereotype(names::BEAN)
        || metadata.has_stereotype(names::SCOPE)
        || metadata.has_stereotype(names::DEFAULT_SCOPE)
}
