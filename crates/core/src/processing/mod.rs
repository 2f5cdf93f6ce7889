//! Bean classification and the per-strategy processors

mod bean_builder;
pub mod classifier;
pub mod context;
pub mod guard;
mod processors;

pub use classifier::{BeanClassifier, is_declared_bean_in_metadata};
pub use context::PlanningContext;
pub use guard::{ElementGuard, Isolated};

use crate::{error::Result, plan::BeanDefinitionPlan, types::ClassElement};
use serde::Serialize;
use std::fmt;

/// How a class is turned into generated definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BeanStrategy {
    /// A plain bean, proxied when the class carries around advice
    Simple { aop_proxy: bool },
    Factory { aop_proxy: bool },
    ConfigurationProperties,
    IntroductionInterface,
    /// Introduction advice on a class; `around` adds interception of its concrete methods
    IntroductionProxySupported { around: bool },
    Empty,
}

impl BeanStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            BeanStrategy::Simple { .. } => "simple",
            BeanStrategy::Factory { .. } => "factory",
            BeanStrategy::ConfigurationProperties => "configuration_properties",
            BeanStrategy::IntroductionInterface => "introduction_interface",
            BeanStrategy::IntroductionProxySupported { .. } => "introduction_proxy_supported",
            BeanStrategy::Empty => "empty",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BeanStrategy::Empty)
    }

    /// Builds every plan this strategy produces for `class`. A failure yields no plans.
    pub fn plan(&self, ctx: &PlanningContext<'_>, class: &ClassElement) -> Result<Vec<BeanDefinitionPlan>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        bean_builder::check_package(class)?;

        match *self {
            BeanStrategy::Simple { aop_proxy } => processors::simple(ctx, class, aop_proxy),
            BeanStrategy::Factory { aop_proxy } => processors::factory(ctx, class, aop_proxy),
            BeanStrategy::ConfigurationProperties => processors::configuration_properties(ctx, class),
            BeanStrategy::IntroductionInterface => processors::introduction_interface(ctx, class),
            BeanStrategy::IntroductionProxySupported { around } => {
                processors::introduction_proxy(ctx, class, around)
            }
            BeanStrategy::Empty => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for BeanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeanStrategy::Simple { aop_proxy: true }
            | BeanStrategy::Factory { aop_proxy: true }
            | BeanStrategy::IntroductionProxySupported { around: true } => {
                write!(f, "{} (around)", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}
