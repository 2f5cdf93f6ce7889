use crate::{
    annotation::{AnnotationSource, AnnotationView},
    interfaces::ConfigurationPropertiesTest,
    types::ClassElement,
};

/// Matches classes carrying any of a fixed set of stereotypes
#[derive(Debug, Clone)]
pub struct StereotypeConfigurationTest {
    stereotypes: Vec<String>,
}

impl StereotypeConfigurationTest {
    pub fn new(stereotypes: Vec<String>) -> Self {
        Self { stereotypes }
    }
}

impl ConfigurationPropertiesTest for StereotypeConfigurationTest {
    fn is_configuration_properties(&self, _class: &ClassElement, metadata: &AnnotationView) -> bool {
        metadata.has_any_stereotype(&self.stereotypes)
    }
}
