pub mod adapter;
pub mod capture;
pub mod check;
pub mod config;
pub mod engine;
pub mod error;
pub mod filters;
pub mod translator;

use std::path::{Path, PathBuf};

use tera::Value;

use crate::adapter::{Parameters, TemplateAdapter};
use crate::config::{load_config, PlatenConfig};
use crate::engine::TeraEngine;
use crate::error::{PlatenError, Result};

pub use crate::adapter::AfterFilter;
pub use crate::engine::{Filter, RenderingEngine};
pub use crate::translator::Translator;

pub struct RenderOptions {
    /// Template file; falls back to `template.file` from the config.
    pub file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Overrides `template.root` from the config.
    pub root: Option<PathBuf>,
    /// `KEY=VALUE` parameters; these win over the config's defaults.
    pub data: Vec<String>,
    /// Log failures and produce empty output instead of returning an error.
    pub safe: bool,
}

/// Parse a `KEY=VALUE` pair. Values are read as JSON when possible, otherwise as text.
pub fn parse_data_pair(input: &str) -> Result<(String, Value)> {
    let (key, raw) = input
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| PlatenError::InvalidData {
            input: input.to_string(),
        })?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Render a single template with a Tera engine, optionally driven by a platen.toml.
pub fn render_template(options: RenderOptions) -> Result<String> {
    let config = match &options.config {
        Some(path) => load_config(path)?,
        None => PlatenConfig::default(),
    };

    let mut engine = match options.root.as_ref().or(config.template.root.as_ref()) {
        Some(root) => TeraEngine::with_root(root),
        None => TeraEngine::new(),
    };

    let mut adapter = TemplateAdapter::new(&mut engine);
    if let Some(file) = options.file.or(config.template.file) {
        adapter.set_file(file);
    }

    let explicit = options
        .data
        .iter()
        .map(|pair| parse_data_pair(pair))
        .collect::<Result<Parameters>>()?;
    adapter
        .set_parameters(explicit)
        .set_parameters(config.parameters);

    for name in &config.render.after_filters {
        if let Some(f) = filters::builtin(name) {
            adapter.add_after_filter(f);
        }
    }

    if options.safe || !config.render.strict {
        Ok(adapter.render_safe())
    } else {
        adapter.render_or_throw()
    }
}

/// Write rendered text to `path`, creating missing parent directories.
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PlatenError::Io {
            context: format!("creating directory {}", parent.display()),
            source: e,
        })?;
    }
    std::fs::write(path, text).map_err(|e| PlatenError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })
}
