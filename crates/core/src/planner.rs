//! Main planner that coordinates classification and plan building

use crate::{
    aop::{AopPlanner, DefaultAopPlanner},
    cache::MetadataCache,
    config::{Config, OverrideResolver},
    error::Result,
    interfaces::{ConfigurationPropertiesTest, DeclarationModel},
    plan::BeanDefinitionPlan,
    processing::{BeanClassifier, BeanStrategy, PlanningContext},
    services::StereotypeConfigurationTest,
};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tracing::{debug, warn};

/// Result of planning one class in batch mode
#[derive(Debug)]
pub struct ClassPlanOutcome {
    pub class_name: String,
    pub result: Result<(BeanStrategy, Vec<BeanDefinitionPlan>)>,
}

impl ClassPlanOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn plans(&self) -> &[BeanDefinitionPlan] {
        match &self.result {
            Ok((_, plans)) => plans,
            Err(_) => &[],
        }
    }
}

/// Owns one compilation unit's planning state: the model, the shared metadata cache and
/// the adaptation counter
pub struct Planner {
    model: Box<dyn DeclarationModel>,
    config: Config,
    overrides: OverrideResolver,
    cache: MetadataCache,
    aop: Arc<dyn AopPlanner>,
    configuration: Box<dyn ConfigurationPropertiesTest>,
    adapted_method_index: AtomicUsize,
}

impl Planner {
    pub fn new(model: impl DeclarationModel + 'static) -> Result<Self> {
        Self::with_config(model, Config::default())
    }

    pub fn with_config(model: impl DeclarationModel + 'static, config: Config) -> Result<Self> {
        let overrides = OverrideResolver::new(&config.overrides)?;
        let configuration = StereotypeConfigurationTest::new(config.configuration_properties.clone());
        debug!(
            "Planner configured with {} overrides and {} configuration stereotypes",
            overrides.len(),
            config.configuration_properties.len()
        );

        Ok(Self {
            model: Box::new(model),
            config,
            overrides,
            cache: MetadataCache::new(),
            aop: Arc::new(DefaultAopPlanner::new()),
            configuration: Box::new(configuration),
            adapted_method_index: AtomicUsize::new(0),
        })
    }

    pub fn with_aop_planner(mut self, aop: Arc<dyn AopPlanner>) -> Self {
        self.aop = aop;
        self
    }

    pub fn with_configuration_test(mut self, test: impl ConfigurationPropertiesTest + 'static) -> Self {
        self.configuration = Box::new(test);
        self
    }

    pub fn context(&self) -> PlanningContext<'_> {
        PlanningContext {
            model: self.model.as_ref(),
            cache: &self.cache,
            aop: self.aop.as_ref(),
            configuration: self.configuration.as_ref(),
            overrides: &self.overrides,
            foreign_singletons: &self.config.foreign_singletons,
            adapted_method_index: &self.adapted_method_index,
        }
    }

    pub fn classify(&self, class_name: &str) -> Result<BeanStrategy> {
        let ctx = self.context();
        let class = ctx.class(class_name)?;
        BeanClassifier::new(&ctx).classify(class)
    }

    /// Classifies and plans one class
    pub fn plan_class(&self, class_name: &str) -> Result<(BeanStrategy, Vec<BeanDefinitionPlan>)> {
        let ctx = self.context();
        let class = ctx.class(class_name)?;
        let strategy = BeanClassifier::new(&ctx).classify(class)?;
        let plans = strategy.plan(&ctx, class)?;
        debug!("Planned {} definitions for {}", plans.len(), class_name);
        Ok((strategy, plans))
    }

    /// Plans every class of the model in order. A failing class is reported in its
    /// outcome and does not stop the others.
    pub fn plan_all(&self) -> Vec<ClassPlanOutcome> {
        self.model
            .classes()
            .into_iter()
            .map(|class| {
                let result = self.plan_class(&class.name);
                if let Err(e) = &result {
                    warn!("Planning {} failed: {}", class.name, e);
                }
                ClassPlanOutcome {
                    class_name: class.name.clone(),
                    result,
                }
            })
            .collect()
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    pub fn model(&self) -> &dyn DeclarationModel {
        self.model.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
