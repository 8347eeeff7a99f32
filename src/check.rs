use std::path::Path;

use crate::config::{load_config, PlatenConfig};
use crate::error::Result;

/// Result of checking a platen.toml.
pub struct CheckResult {
    pub config: PlatenConfig,
    pub warnings: Vec<String>,
}

/// Load and validate a config, then check that the files it points at exist.
pub fn check_config(path: &Path) -> Result<CheckResult> {
    let config = load_config(path)?;
    let mut warnings = Vec::new();

    if let Some(root) = &config.template.root {
        if !root.is_dir() {
            warnings.push(format!("Template root not found: {}", root.display()));
        }
    }

    if let Some(file) = &config.template.file {
        let resolved = match &config.template.root {
            Some(root) if file.is_relative() => root.join(file),
            _ => file.clone(),
        };
        if !resolved.is_file() {
            warnings.push(format!("Default template not found: {}", resolved.display()));
        }
    }

    Ok(CheckResult { config, warnings })
}
