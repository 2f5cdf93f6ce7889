//! Configuration-properties detection interface

use crate::{annotation::AnnotationView, types::ClassElement};

/// Decides whether a class is a configuration-properties holder
pub trait ConfigurationPropertiesTest: Send + Sync {
    fn is_configuration_properties(&self, class: &ClassElement, metadata: &AnnotationView) -> bool;
}
