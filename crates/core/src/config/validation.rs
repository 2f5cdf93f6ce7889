//! Configuration validation for ensuring configs are valid before use

use crate::{
    config::{Config, Override},
    error::{Error, Result},
};

/// Trait for validating configurations
pub trait ConfigValidator {
    /// Validate the entire configuration
    fn validate(&self, config: &Config) -> Result<()>;

    /// Validate a specific override
    fn validate_override(&self, override_config: &Override) -> Result<()>;
}

/// Main configuration validator
#[derive(Debug, Default)]
pub struct MainConfigValidator;

impl MainConfigValidator {
    pub fn new() -> Self {
        Self
    }

    fn validate_names(&self, key: &str, names: &[String]) -> Result<()> {
        if let Some(name) = names.iter().find(|n| !is_qualified_name(n)) {
            return Err(Error::ConfigError(format!(
                "Invalid annotation name '{name}' in {key}"
            )));
        }
        Ok(())
    }
}

impl ConfigValidator for MainConfigValidator {
    fn validate(&self, config: &Config) -> Result<()> {
        self.validate_names("configuration_properties", &config.configuration_properties)?;
        self.validate_names("foreign_singletons", &config.foreign_singletons)?;
        for override_config in &config.overrides {
            self.validate_override(override_config)?;
        }
        Ok(())
    }

    fn validate_override(&self, override_config: &Override) -> Result<()> {
        override_config.compile()?;

        if let Some(bean_name) = &override_config.bean_name {
            if bean_name.is_empty() || !bean_name.chars().all(is_identifier_char) {
                return Err(Error::ConfigError(format!(
                    "Override for '{}' has invalid bean_name '{bean_name}'",
                    override_config.pattern
                )));
            }
        }
        Ok(())
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_qualified_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(|part| !part.is_empty() && part.chars().all(is_identifier_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MainConfigValidator::new().validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_bean_name_must_be_simple() {
        let validator = MainConfigValidator::new();
        let bad = Override {
            bean_name: Some("com.acme.Primary".to_string()),
            ..Override::new(".*")
        };
        assert!(matches!(
            validator.validate_override(&bad),
            Err(Error::ConfigError(_))
        ));

        let good = Override {
            bean_name: Some("Primary".to_string()),
            ..Override::new(".*")
        };
        assert!(validator.validate_override(&good).is_ok());
    }

    #[test]
    fn test_stereotype_names_are_checked() {
        let config = Config {
            configuration_properties: vec!["com..Broken".to_string()],
            ..Default::default()
        };
        let err = MainConfigValidator::new().validate(&config).unwrap_err();
        assert!(err.to_string().contains("configuration_properties"));
    }
}
