use crate::{
    annotation::names,
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ConfigValidator, MainConfigValidator, Override};

pub const CONFIG_FILE_NAMES: &[&str] = &[".beanforge.json", "beanforge.json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Stereotypes that make a class a configuration-properties holder
    #[serde(default = "default_configuration_properties")]
    pub configuration_properties: Vec<String>,

    /// Singleton markers from other ecosystems, rejected on beans
    #[serde(default = "default_foreign_singletons")]
    pub foreign_singletons: Vec<String>,

    // Overrides for specific classes
    #[serde(default)]
    pub overrides: Vec<Override>,
}

fn default_configuration_properties() -> Vec<String> {
    vec![names::CONFIGURATION_READER.to_string()]
}

fn default_foreign_singletons() -> Vec<String> {
    vec!["groovy.lang.Singleton".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            configuration_properties: default_configuration_properties(),
            foreign_singletons: default_foreign_singletons(),
            overrides: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        MainConfigValidator::new().validate(&config)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        MainConfigValidator::new().validate(self)?;
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// First override whose pattern matches `class_name`
    pub fn get_override_for(&self, class_name: &str) -> Option<&Override> {
        self.overrides.iter().find(|override_| {
            override_
                .compile()
                .is_ok_and(|pattern| pattern.is_match(class_name))
        })
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Config from the nearest config file above `start_path`, or the defaults
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_serialization() -> Result<()> {
        let config = Config {
            overrides: vec![Override {
                bean_name: Some("Primary".to_string()),
                ..Override::new(r"com\.acme\.Greeter")
            }],
            ..Default::default()
        };

        let json = serde_json::to_string_pretty(&config)?;
        assert!(json.contains(r#""match""#));

        let parsed: Config = serde_json::from_str(&json)?;
        assert_eq!(parsed.overrides, config.overrides);
        assert_eq!(parsed.configuration_properties, vec![names::CONFIGURATION_READER]);
        Ok(())
    }

    #[test]
    fn test_missing_keys_take_defaults() -> Result<()> {
        let parsed: Config = serde_json::from_str("{}")?;
        assert_eq!(parsed.foreign_singletons, vec!["groovy.lang.Singleton"]);
        assert!(parsed.overrides.is_empty());
        Ok(())
    }

    #[test]
    fn test_get_override_for() {
        let config = Config {
            overrides: vec![Override {
                skip: Some(true),
                ..Override::new(r"com\.acme\.internal\..*")
            }],
            ..Default::default()
        };

        assert!(config.get_override_for("com.acme.internal.Cache").is_some());
        assert!(config.get_override_for("com.acme.Greeter").is_none());
    }

    #[test]
    fn test_find_config_file_walks_up() -> Result<()> {
        let dir = TempDir::new()?;
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested)?;
        let config_path = dir.path().join(".beanforge.json");
        Config::default().save_to_file(&config_path)?;

        assert_eq!(Config::find_config_file(&nested), Some(config_path));
        let loaded = Config::discover(&nested)?;
        assert_eq!(loaded.configuration_properties, vec![names::CONFIGURATION_READER]);
        Ok(())
    }

    #[test]
    fn test_load_rejects_invalid_pattern() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join(".beanforge.json");
        std::fs::write(&config_path, r#"{"overrides": [{"match": "com.acme.("}]}"#)?;

        assert!(matches!(
            Config::load_from_file(&config_path),
            Err(Error::PatternError(_))
        ));
        Ok(())
    }
}
