#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Boxed error used at the collaborator seams (engine filters, post-filters).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error, Diagnostic)]
pub enum PlatenError {
    #[error("Template adapter is not configured: {reason}")]
    #[diagnostic(help("Call set_file() or pass a template file before rendering"))]
    Configuration { reason: String },

    #[error("Template rendering failed for {}", template.display())]
    #[diagnostic(help("Check the template syntax and the parameters passed to it"))]
    Render {
        template: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("After-render filter #{index} failed for {}", template.display())]
    AfterFilter {
        template: PathBuf,
        index: usize,
        #[source]
        source: BoxError,
    },

    #[error("Rendered output of {} is not valid UTF-8", template.display())]
    RenderOutput {
        template: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Config not found at {path}")]
    #[diagnostic(help("Pass the path to a platen.toml file or the directory containing it"))]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse platen.toml")]
    #[diagnostic(help("Check the TOML syntax in your platen.toml file"))]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {reason}")]
    ConfigInvalid { reason: String },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid parameter '{input}'")]
    #[diagnostic(help("Parameters are passed as KEY=VALUE"))]
    InvalidData { input: String },
}

impl PlatenError {
    /// True for failures raised while producing output (engine, post-filters, decoding).
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            PlatenError::Render { .. }
                | PlatenError::AfterFilter { .. }
                | PlatenError::RenderOutput { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlatenError>;
