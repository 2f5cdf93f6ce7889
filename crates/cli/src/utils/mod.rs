pub mod model;

pub use model::{load_config, load_model, model_files};
