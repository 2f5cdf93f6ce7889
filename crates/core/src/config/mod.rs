//! Configuration management for beanforge

mod settings;
pub mod override_config;
pub mod validation;

// Re-export main types
pub use override_config::{Override, OverrideResolver};
pub use settings::{CONFIG_FILE_NAMES, Config};
pub use validation::{ConfigValidator, MainConfigValidator};
