use anyhow::{Context, Result};
use beanforge_core::Planner;
use std::path::Path;
use tracing::debug;

use crate::display::formatter::print_strategy;
use crate::utils::model::{load_config, load_model};

pub fn classify_command(model_path: &Path, config_path: Option<&Path>) -> Result<()> {
    debug!("Classifying model: {}", model_path.display());

    let config = load_config(config_path, model_path)?;
    let model = load_model(model_path)?;
    let planner = Planner::with_config(model, config).context("Failed to create planner")?;

    let names: Vec<String> = planner.model().classes().iter().map(|c| c.name.clone()).collect();
    println!("🔍 Classifying {} classes from {}", names.len(), model_path.display());
    println!("{}", "=".repeat(80));

    let mut failures = 0;
    for name in names {
        match planner.classify(&name) {
            Ok(strategy) => print_strategy(&name, &strategy),
            Err(e) => {
                failures += 1;
                println!("  {name:<50} ❌ {e}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} classes failed to classify");
    }
    Ok(())
}
