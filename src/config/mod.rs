pub mod schema;

use std::path::Path;

use crate::error::{PlatenError, Result};

pub use schema::PlatenConfig;

pub const CONFIG_FILE: &str = "platen.toml";

/// Load and validate a PlatenConfig from a platen.toml file.
///
/// `path` may be the file itself or the directory containing it. A relative
/// `template.root` is resolved against the config file's directory.
pub fn load_config(path: &Path) -> Result<PlatenConfig> {
    let config_path = if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    };

    if !config_path.exists() {
        return Err(PlatenError::ConfigNotFound { path: config_path });
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| PlatenError::Io {
        context: format!("reading {}", config_path.display()),
        source: e,
    })?;

    let mut config: PlatenConfig =
        toml::from_str(&content).map_err(|e| PlatenError::ConfigParse { source: e })?;

    config.validate()?;

    if let (Some(root), Some(base)) = (&config.template.root, config_path.parent()) {
        if root.is_relative() {
            config.template.root = Some(base.join(root));
        }
    }

    Ok(config)
}
