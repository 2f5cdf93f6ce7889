//! Default implementations of the collaborator interfaces

pub mod class_index;
pub mod stereotype_configuration;

pub use class_index::ClassIndex;
pub use stereotype_configuration::StereotypeConfigurationTest;
