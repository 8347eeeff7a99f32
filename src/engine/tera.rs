use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tera::{Context, Tera, Value};

use super::{Filter, RenderingEngine};
use crate::adapter::Parameters;

/// Argument under which the fallback filter receives the name it was invoked as.
pub const FILTER_NAME_ARG: &str = "filter_name";

/// [`RenderingEngine`] backed by Tera.
///
/// Template files are read on every render; relative paths resolve against the
/// root, or against the template's own directory when no root is set. Templates
/// pulled in with `include` or `extends` are loaded from that same base on demand.
#[derive(Default)]
pub struct TeraEngine {
    root: Option<PathBuf>,
    filters: BTreeMap<String, Filter>,
    fallback: Option<Filter>,
}

impl TeraEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Base directory and Tera template name for `template`.
    fn locate(&self, template: &Path) -> (PathBuf, String) {
        if let Some(root) = &self.root {
            if template.is_relative() {
                return (root.clone(), template_name(template));
            }
            if let Ok(relative) = template.strip_prefix(root) {
                return (root.clone(), template_name(relative));
            }
        }
        let base = template.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = template
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (base, name)
    }

    fn try_render(
        &self,
        sources: &BTreeMap<String, String>,
        bound: &BTreeSet<String>,
        name: &str,
        context: &Context,
    ) -> tera::Result<String> {
        let mut tera = Tera::default();
        tera.add_raw_templates(sources.iter())?;
        for (filter_name, filter) in &self.filters {
            tera.register_filter(filter_name, adapt(filter.clone()));
        }
        if let Some(fallback) = &self.fallback {
            for missing in bound {
                tera.register_filter(missing, bind_fallback(missing.clone(), fallback.clone()));
            }
        }
        tera.render(name, context)
    }
}

impl RenderingEngine for TeraEngine {
    type Error = tera::Error;

    /// Renders until Tera stops reporting missing templates or filters: each
    /// missing template found under the base is loaded, each missing filter is
    /// bound to the fallback, then the render is retried.
    fn render(
        &self,
        template: &Path,
        parameters: &Parameters,
        sink: &mut dyn Write,
    ) -> tera::Result<()> {
        let (base, name) = self.locate(template);
        let mut sources = BTreeMap::new();
        sources.insert(name.clone(), read_source(&base, &name)?);

        let context = build_context(parameters);
        let mut bound = BTreeSet::new();
        let output = loop {
            let err = match self.try_render(&sources, &bound, &name, &context) {
                Ok(output) => break output,
                Err(err) => err,
            };

            let dependency = missing_templates(&err).into_iter().find(|candidate| {
                !sources.contains_key(candidate) && is_loadable(&base, candidate)
            });
            if let Some(dependency) = dependency {
                let source = read_source(&base, &dependency)?;
                sources.insert(dependency, source);
                continue;
            }

            match (&self.fallback, missing_filter(&err)) {
                (Some(_), Some(missing)) if bound.insert(missing.clone()) => continue,
                _ => return Err(err),
            }
        };

        sink.write_all(output.as_bytes())
            .map_err(|e| tera::Error::chain("Failed to write rendered output", e))
    }

    fn register_filter(&mut self, name: Option<&str>, filter: Option<Filter>) {
        match (name, filter) {
            (Some(name), Some(filter)) => {
                self.filters.insert(name.to_string(), filter);
            }
            (Some(name), None) => {
                self.filters.remove(name);
            }
            (None, filter) => self.fallback = filter,
        }
    }
}

pub fn build_context(parameters: &Parameters) -> Context {
    let mut context = Context::new();
    for (key, value) in parameters {
        context.insert(key, value);
    }
    context
}

fn adapt(filter: Filter) -> impl tera::Filter {
    move |value: &Value, args: &HashMap<String, Value>| {
        filter(value, args).map_err(|e| tera::Error::msg(e.to_string()))
    }
}

fn bind_fallback(name: String, fallback: Filter) -> impl tera::Filter {
    move |value: &Value, args: &HashMap<String, Value>| {
        let mut args = args.clone();
        args.insert(FILTER_NAME_ARG.to_string(), Value::String(name.clone()));
        fallback(value, &args).map_err(|e| tera::Error::msg(e.to_string()))
    }
}

/// Template names use `/` separators regardless of platform.
fn template_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A dependency may only be loaded from inside the base directory.
fn is_loadable(base: &Path, name: &str) -> bool {
    let relative = Path::new(name);
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
        && base.join(relative).is_file()
}

fn read_source(base: &Path, name: &str) -> tera::Result<String> {
    let path = base.join(name);
    std::fs::read_to_string(&path).map_err(|e| {
        tera::Error::chain(format!("Failed to read template '{}'", path.display()), e)
    })
}

/// First error kind in the chain that `pick` recognises.
fn find_in_chain<T>(err: &tera::Error, pick: impl Fn(&tera::ErrorKind) -> Option<T>) -> Option<T> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(found) = e.downcast_ref::<tera::Error>().and_then(|te| pick(&te.kind)) {
            return Some(found);
        }
        current = e.source();
    }
    None
}

/// Name of the filter Tera could not find.
fn missing_filter(err: &tera::Error) -> Option<String> {
    find_in_chain(err, |kind| match kind {
        tera::ErrorKind::FilterNotFound(name) => Some(name.clone()),
        _ => None,
    })
}

/// Candidate names for a template Tera could not find.
///
/// Includes report their candidates as `[a, b]`.
fn missing_templates(err: &tera::Error) -> Vec<String> {
    find_in_chain(err, |kind| match kind {
        tera::ErrorKind::MissingParent { parent, .. } => Some(vec![parent.clone()]),
        tera::ErrorKind::TemplateNotFound(names) => Some(
            names
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split(", ")
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    })
    .unwrap_or_default()
}
