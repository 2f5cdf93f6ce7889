pub mod formatter;

pub use formatter::{describe_artifact, describe_kind, print_plan, print_strategy};
