use std::sync::Arc;

use tera::Value;

use crate::engine::{filter, Filter};

/// Name of the engine filter the translator is bound to.
pub const TRANSLATE_FILTER: &str = "translate";

/// Locale-aware message lookup.
pub trait Translator: Send + Sync {
    fn translate(&self, message: &str, count: Option<i64>) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, Option<i64>) -> String + Send + Sync,
{
    fn translate(&self, message: &str, count: Option<i64>) -> String {
        self(message, count)
    }
}

/// Expose a translator as the `translate` filter: `{{ "msg" | translate(count=2) }}`.
pub fn translate_filter(translator: Arc<dyn Translator>) -> Filter {
    filter(move |value, args| {
        let message = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let count = match args.get("count") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                whole_number(v)
                    .ok_or_else(|| format!("translate: 'count' must be a whole number, got {v}"))?,
            ),
        };
        Ok(Value::String(translator.translate(&message, count)))
    })
}

/// Integer value of `v`, accepting floats without a fractional part (Tera math yields `2.0`).
fn whole_number(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    v.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}
