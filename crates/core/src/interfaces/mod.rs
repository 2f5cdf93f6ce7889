//! Collaborator interfaces
//!
//! The planner consumes a declaration model and a configuration-properties test,
//! and produces plans through the bean definition visitor. Each seam is a trait so
//! hosts can supply their own implementation.

pub mod configuration;
pub mod declaration_model;

pub use configuration::ConfigurationPropertiesTest;
pub use declaration_model::DeclarationModel;
pub use crate::plan::BeanDefinitionVisitor;
