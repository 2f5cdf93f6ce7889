use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Per-class adjustment, selected by a regex over the qualified class name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Override {
    #[serde(rename = "match")]
    pub pattern: String,

    /// Simple name used instead of the class's own when naming generated plans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bean_name: Option<String>,
    /// Classify the class as producing nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<bool>,
}

impl Override {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    pub fn is_skip(&self) -> bool {
        self.skip.unwrap_or(false)
    }

    /// The pattern must match the whole qualified name
    pub fn compile(&self) -> Result<Regex> {
        Ok(Regex::new(&format!("^(?:{})$", self.pattern))?)
    }
}

/// Overrides with their patterns compiled once; the first matching entry wins
#[derive(Debug, Clone, Default)]
pub struct OverrideResolver {
    entries: Vec<(Regex, Override)>,
}

impl OverrideResolver {
    pub fn new(overrides: &[Override]) -> Result<Self> {
        let entries = overrides
            .iter()
            .map(|o| Ok((o.compile()?, o.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn resolve(&self, class_name: &str) -> Option<&Override> {
        self.entries
            .iter()
            .find(|(pattern, _)| pattern.is_match(class_name))
            .map(|(_, o)| o)
    }

    /// Bean name override for `class_name`, if any
    pub fn bean_name(&self, class_name: &str) -> Option<&str> {
        self.resolve(class_name).and_then(|o| o.bean_name.as_deref())
    }

    pub fn is_skipped(&self, class_name: &str) -> bool {
        self.resolve(class_name).is_some_and(Override::is_skip)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_override_wins() -> Result<()> {
        let resolver = OverrideResolver::new(&[
            Override {
                bean_name: Some("Primary".to_string()),
                ..Override::new(r"com\.acme\.Greeter")
            },
            Override {
                skip: Some(true),
                ..Override::new(r"com\.acme\..*")
            },
        ])?;

        assert_eq!(resolver.bean_name("com.acme.Greeter"), Some("Primary"));
        assert!(!resolver.is_skipped("com.acme.Greeter"));
        assert!(resolver.is_skipped("com.acme.Other"));
        assert!(resolver.resolve("org.acme.Other").is_none());
        Ok(())
    }

    #[test]
    fn test_pattern_is_anchored() -> Result<()> {
        let resolver = OverrideResolver::new(&[Override {
            skip: Some(true),
            ..Override::new("Greeter")
        }])?;

        assert!(!resolver.is_skipped("com.acme.Greeter"));
        assert!(resolver.is_skipped("Greeter"));
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = OverrideResolver::new(&[Override::new("com.acme.(")]);
        assert!(matches!(result, Err(crate::Error::PatternError(_))));
    }
}
