use anyhow::{Context, Result};
use beanforge_core::{ClassIndex, Config};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Model files under `path`: the file itself, or every *.json file below a directory.
/// Config files are skipped.
pub fn model_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("Model not found: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        let file_path = entry.path();
        let is_json = file_path.extension().and_then(|s| s.to_str()) == Some("json");
        let is_config = file_path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|name| beanforge_core::config::CONFIG_FILE_NAMES.contains(&name));
        if entry.file_type().is_file() && is_json && !is_config {
            files.push(file_path.to_path_buf());
        }
    }
    Ok(files)
}

/// Loads and merges every model file under `path`
pub fn load_model(path: &Path) -> Result<ClassIndex> {
    let mut index = ClassIndex::new();
    for file in model_files(path)? {
        debug!("Loading model {}", file.display());
        let part = ClassIndex::load(&file)
            .with_context(|| format!("Failed to load model {}", file.display()))?;
        index.extend(part);
    }
    Ok(index)
}

/// The explicit config, or the one discovered above the model
pub fn load_config(explicit: Option<&Path>, model: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    let start = if model.is_dir() {
        model
    } else {
        model.parent().unwrap_or(model)
    };
    Config::discover(start).context("Failed to load discovered config")
}
