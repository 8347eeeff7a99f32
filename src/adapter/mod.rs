pub mod parameters;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tera::Value;

use crate::capture::capture;
use crate::engine::{filter, Filter, RenderingEngine};
use crate::error::{BoxError, PlatenError, Result};
use crate::translator::{translate_filter, Translator, TRANSLATE_FILTER};

pub use parameters::Parameters;

/// A text transform applied to the rendered output.
pub type AfterFilter = Box<dyn Fn(String) -> std::result::Result<String, BoxError>>;

/// Binds a template file and its parameters to a [`RenderingEngine`] for one render.
///
/// Rendering itself is delegated. The adapter adds deferred file binding, an
/// existing-wins parameter bag, translator wiring and an ordered chain of
/// after-render filters.
pub struct TemplateAdapter<'e, E: RenderingEngine> {
    engine: &'e mut E,
    file: Option<PathBuf>,
    parameters: Parameters,
    after_filters: Vec<AfterFilter>,
}

impl<'e, E: RenderingEngine> TemplateAdapter<'e, E> {
    pub fn new(engine: &'e mut E) -> Self {
        Self {
            engine,
            file: None,
            parameters: Parameters::new(),
            after_filters: Vec::new(),
        }
    }

    /// Set the template file. Existence is checked by the engine at render time.
    pub fn set_file(&mut self, file: impl Into<PathBuf>) -> &mut Self {
        self.file = Some(file.into());
        self
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Register a rendering-time filter directly on the engine.
    ///
    /// Unlike the other setters this returns the engine, not the adapter, so
    /// chained calls continue on the engine. `None` registers the engine's
    /// unnamed fallback filter.
    pub fn add_filter<F>(&mut self, name: Option<&str>, f: F) -> &mut E
    where
        F: Fn(&Value, &HashMap<String, Value>) -> std::result::Result<Value, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.engine.register_filter(name, Some(filter(f)));
        &mut *self.engine
    }

    /// Register an already shared filter on the engine; see [`Self::add_filter`].
    pub fn add_shared_filter(&mut self, name: Option<&str>, f: Filter) -> &mut E {
        self.engine.register_filter(name, Some(f));
        &mut *self.engine
    }

    /// Append an after-render filter. Filters run in registration order.
    pub fn add_after_filter<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(String) -> String + 'static,
    {
        self.after_filters.push(Box::new(move |text| Ok(f(text))));
        self
    }

    /// Append an after-render filter that may fail; a failure aborts the render.
    pub fn try_add_after_filter<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(String) -> std::result::Result<String, BoxError> + 'static,
    {
        self.after_filters.push(Box::new(f));
        self
    }

    /// Merge `parameters` in. Keys already set keep their current value.
    pub fn set_parameters(&mut self, parameters: impl Into<Parameters>) -> &mut Self {
        self.parameters.merge_missing(parameters.into());
        self
    }

    /// Set a single parameter, overwriting any previous value.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.parameters.set(name, value);
        self
    }

    /// A copy of the current parameters.
    pub fn parameters(&self) -> Parameters {
        self.parameters.clone()
    }

    /// Bind `translator` as the engine's `translate` filter, or remove it with `None`.
    pub fn set_translator(&mut self, translator: Option<Arc<dyn Translator>>) -> &mut Self {
        self.engine
            .register_filter(Some(TRANSLATE_FILTER), translator.map(translate_filter));
        self
    }

    /// Render the template and run the output through the after-render filters.
    pub fn render(&self) -> Result<String> {
        let file = self.file.as_deref().ok_or_else(|| PlatenError::Configuration {
            reason: "no template file set".into(),
        })?;

        tracing::debug!(
            template = %file.display(),
            parameters = self.parameters.len(),
            after_filters = self.after_filters.len(),
            "rendering template"
        );

        let bytes = capture(|sink| self.engine.render(file, &self.parameters, sink)).map_err(|e| {
            PlatenError::Render {
                template: file.to_path_buf(),
                source: Box::new(e),
            }
        })?;
        let mut text = String::from_utf8(bytes).map_err(|e| PlatenError::RenderOutput {
            template: file.to_path_buf(),
            source: e,
        })?;

        for (index, after) in self.after_filters.iter().enumerate() {
            text = after(text).map_err(|source| PlatenError::AfterFilter {
                template: file.to_path_buf(),
                index,
                source,
            })?;
        }

        Ok(text)
    }

    /// String conversion that propagates failures. Same as [`Self::render`].
    pub fn render_or_throw(&self) -> Result<String> {
        self.render()
    }

    /// String conversion that never fails: errors are logged and an empty string returned.
    pub fn render_safe(&self) -> String {
        match self.render() {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(
                    template = ?self.file,
                    error = %err,
                    "template rendering failed"
                );
                String::new()
            }
        }
    }
}

impl<E: RenderingEngine> fmt::Display for TemplateAdapter<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_safe())
    }
}

impl<E: RenderingEngine> fmt::Debug for TemplateAdapter<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateAdapter")
            .field("file", &self.file)
            .field("parameters", &self.parameters)
            .field("after_filters", &self.after_filters.len())
            .finish()
    }
}
