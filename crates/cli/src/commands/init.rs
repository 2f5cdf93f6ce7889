use anyhow::{Context, Result};
use beanforge_core::Config;
use std::{env, path::Path};
use tracing::info;

pub fn init_command(cwd: Option<&Path>, force: bool) -> Result<()> {
    let project_root = match cwd {
        Some(cwd) => cwd.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    let config_path = project_root.join(".beanforge.json");
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    info!("Wrote {}", config_path.display());

    println!("✅ Created config: {}", config_path.display());
    Ok(())
}
