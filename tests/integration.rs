use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;
use serde_json::json;
use tera::Value;

use platen::adapter::TemplateAdapter;
use platen::engine::TeraEngine;
use platen::error::PlatenError;
use platen::check::check_config;
use platen::{parse_data_pair, render_template, write_output, RenderOptions, Translator};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn templates_dir() -> PathBuf {
    fixture_path("mail").join("templates")
}

fn options() -> RenderOptions {
    RenderOptions {
        file: None,
        config: Some(fixture_path("mail")),
        root: None,
        data: Vec::new(),
        safe: false,
    }
}

fn english(message: &str, count: Option<i64>) -> String {
    let base = match message {
        "greeting" => "Hello",
        "item" => "item",
        other => other,
    };
    match count {
        Some(n) if n != 1 => format!("{n} {base}s"),
        Some(n) => format!("{n} {base}"),
        None => base.to_string(),
    }
}

#[test]
fn test_render_with_config_defaults() {
    let text = render_template(options()).unwrap();
    assert_eq!(text, "Hello friend,\r\nwelcome to Example Shop.");
}

#[test]
fn test_explicit_data_wins_over_config_parameters() {
    let text = render_template(RenderOptions {
        data: vec!["name=Ada".to_string()],
        ..options()
    })
    .unwrap();
    assert_eq!(text, "Hello Ada,\r\nwelcome to Example Shop.");
}

#[test]
fn test_missing_filter_is_render_error_in_strict_mode() {
    let err = render_template(RenderOptions {
        file: Some(PathBuf::from("money.txt")),
        ..options()
    })
    .unwrap_err();
    assert!(matches!(err, PlatenError::Render { .. }));
}

#[test]
fn test_safe_mode_downgrades_failures() {
    let text = render_template(RenderOptions {
        file: Some(PathBuf::from("money.txt")),
        safe: true,
        ..options()
    })
    .unwrap();
    assert_eq!(text, "");
}

#[test]
fn test_template_syntax_error_is_render_error() {
    let err = render_template(RenderOptions {
        file: Some(PathBuf::from("broken.txt")),
        ..options()
    })
    .unwrap_err();
    assert!(err.is_render_error());
}

#[test]
fn test_no_file_and_no_config_is_configuration_error() {
    let err = render_template(RenderOptions {
        file: None,
        config: None,
        root: Some(templates_dir()),
        data: Vec::new(),
        safe: false,
    })
    .unwrap_err();
    assert!(matches!(err, PlatenError::Configuration { .. }));
}

#[test]
fn test_invalid_data_pair() {
    let err = render_template(RenderOptions {
        data: vec!["no-equals-sign".to_string()],
        ..options()
    })
    .unwrap_err();
    assert!(matches!(err, PlatenError::InvalidData { .. }));
}

#[rstest]
#[case("name=Ada", "name", json!("Ada"))]
#[case("count=3", "count", json!(3))]
#[case("vip=true", "vip", json!(true))]
#[case("tags=[\"a\",\"b\"]", "tags", json!(["a", "b"]))]
#[case("eq=a=b", "eq", json!("a=b"))]
#[case("empty=", "empty", json!(""))]
fn test_parse_data_pair(#[case] input: &str, #[case] key: &str, #[case] value: Value) {
    assert_eq!(parse_data_pair(input).unwrap(), (key.to_string(), value));
}

#[test]
fn test_translator_wired_into_tera() {
    let mut engine = TeraEngine::with_root(templates_dir());
    let mut adapter = TemplateAdapter::new(&mut engine);
    let translator: Arc<dyn Translator> = Arc::new(english);
    adapter
        .set_file("greeting.html")
        .set_translator(Some(translator))
        .set_parameters([("name", json!("Ada & Bob")), ("items", json!(2))]);

    assert_eq!(
        adapter.render().unwrap(),
        "<p>Hello Ada &amp; Bob</p>\n<p>2 items</p>\n"
    );
}

#[test]
fn test_clearing_translator_removes_filter() {
    let mut engine = TeraEngine::with_root(templates_dir());
    {
        let mut adapter = TemplateAdapter::new(&mut engine);
        let translator: Arc<dyn Translator> = Arc::new(english);
        adapter.set_translator(Some(translator));
    }
    assert!(engine.has_filter("translate"));

    let mut adapter = TemplateAdapter::new(&mut engine);
    adapter
        .set_translator(None)
        .set_file("greeting.html")
        .set_parameter("name", "Ada")
        .set_parameter("items", 1);
    assert!(adapter.render().is_err());
    drop(adapter);
    assert!(!engine.has_filter("translate"));
}

#[test]
fn test_engine_filter_via_adapter() {
    let mut engine = TeraEngine::with_root(templates_dir());
    let mut adapter = TemplateAdapter::new(&mut engine);
    adapter.add_filter(Some("money"), |value, _| {
        let amount = value.as_f64().ok_or("money expects a number")?;
        Ok(Value::String(format!("${amount:.2}")))
    });
    adapter
        .set_file("money.txt")
        .set_parameter("amount", 12.5)
        .add_after_filter(|s| s.trim_end().to_string());

    assert_eq!(adapter.render().unwrap(), "Total: $12.50");
}

#[test]
fn test_adapter_displays_rendered_text() {
    let mut engine = TeraEngine::with_root(templates_dir());
    let mut adapter = TemplateAdapter::new(&mut engine);
    adapter
        .set_file("welcome.txt")
        .set_parameters([("name", "Grace"), ("site", "the lab")])
        .add_after_filter(|s| s.trim().to_string());

    assert_eq!(adapter.to_string(), "Hello Grace,\nwelcome to the lab.");
}

#[test]
fn test_layout_from_config_root() {
    let text = render_template(RenderOptions {
        file: Some(PathBuf::from("receipt.txt")),
        data: vec!["name=Ada".to_string()],
        ..options()
    })
    .unwrap();
    assert_eq!(text, "Thanks, Ada!\r\n-- Example Shop");
}

#[test]
fn test_translate_count_computed_by_tera() {
    let mut engine = TeraEngine::with_root(templates_dir());
    let mut adapter = TemplateAdapter::new(&mut engine);
    let translator: Arc<dyn Translator> = Arc::new(english);
    adapter
        .set_file("count.txt")
        .set_translator(Some(translator))
        .set_parameter("items", 2);

    assert_eq!(adapter.render().unwrap(), "2 items");
}

#[test]
fn test_write_output_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/mail/welcome.eml");

    let text = render_template(options()).unwrap();
    write_output(&path, &text).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn test_write_output_to_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = write_output(dir.path(), "text").unwrap_err();
    assert!(matches!(err, PlatenError::Io { .. }));
}

#[test]
fn test_check_fixture_config() {
    let result = check_config(&fixture_path("mail")).unwrap();
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert_eq!(result.config.parameters.len(), 2);
    assert_eq!(result.config.render.after_filters, vec!["trim", "crlf"]);
}
