//! beanforge - compile-time planning for dependency injection and AOP
//!
//! This crate provides functionality to:
//! - Classify declared classes into bean strategies
//! - Plan the generated definitions, interception proxies and introductions for each class
//! - Adapt bean methods to single-abstract-method interfaces
//! - Isolate speculative annotation edits from the shared metadata cache
pub mod annotation;
pub mod aop;
pub mod cache;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod plan;
pub mod planner;
pub mod processing;
pub mod services;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use annotation::{AnnotationMetadata, AnnotationSource, AnnotationValue, AnnotationView, MemberValue};
pub use aop::{AopPlanner, DefaultAopPlanner, InterceptorBinding, InterceptorKind};
pub use cache::MetadataCache;
pub use config::Config;
pub use interfaces::{ConfigurationPropertiesTest, DeclarationModel};
pub use plan::{BeanDefinitionPlan, BeanDefinitionVisitor, PlanArtifact, PlanKind};
pub use planner::{ClassPlanOutcome, Planner};
pub use processing::{BeanStrategy, ElementGuard, PlanningContext};
pub use services::ClassIndex;
