pub mod tera;

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use ::tera::Value;

use crate::adapter::Parameters;
use crate::error::BoxError;

pub use self::tera::TeraEngine;

/// A rendering-time filter: receives the piped value and the keyword arguments.
pub type Filter = Arc<dyn Fn(&Value, &HashMap<String, Value>) -> Result<Value, BoxError> + Send + Sync>;

/// Wrap a closure as a [`Filter`].
pub fn filter<F>(f: F) -> Filter
where
    F: Fn(&Value, &HashMap<String, Value>) -> Result<Value, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The template engine a [`TemplateAdapter`](crate::adapter::TemplateAdapter) delegates to.
///
/// Parsing, compilation and escaping are entirely the engine's business.
pub trait RenderingEngine {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Render `template` against `parameters`, writing the text to `sink`.
    fn render(
        &self,
        template: &Path,
        parameters: &Parameters,
        sink: &mut dyn Write,
    ) -> Result<(), Self::Error>;

    /// Register (`Some`) or remove (`None`) a filter.
    ///
    /// A `None` name addresses the engine's unnamed fallback filter.
    fn register_filter(&mut self, name: Option<&str>, filter: Option<Filter>);
}
