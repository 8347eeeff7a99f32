use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::adapter::Parameters;
use crate::error::{PlatenError, Result};
use crate::filters;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlatenConfig {
    #[serde(default)]
    pub template: TemplateSection,

    /// Default parameters. Explicitly passed parameters take precedence.
    #[serde(default)]
    pub parameters: Parameters,

    #[serde(default)]
    pub render: RenderSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TemplateSection {
    /// Base directory for relative template files.
    pub root: Option<PathBuf>,
    /// Template rendered when none is given on the command line.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderSection {
    /// Propagate render failures instead of logging them and producing empty output.
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Built-in after-render filters, applied in order.
    #[serde(default)]
    pub after_filters: Vec<String>,
}

fn default_strict() -> bool {
    true
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            strict: default_strict(),
            after_filters: Vec::new(),
        }
    }
}

impl PlatenConfig {
    pub fn validate(&self) -> Result<()> {
        for name in &self.render.after_filters {
            if filters::builtin(name).is_none() {
                return Err(PlatenError::ConfigInvalid {
                    reason: format!(
                        "unknown after filter '{name}' (expected one of: {})",
                        filters::BUILTIN_NAMES.join(", ")
                    ),
                });
            }
        }

        if let Some(file) = &self.template.file {
            if file.as_os_str().is_empty() {
                return Err(PlatenError::ConfigInvalid {
                    reason: "'template.file' must not be empty".into(),
                });
            }
        }

        Ok(())
    }
}
