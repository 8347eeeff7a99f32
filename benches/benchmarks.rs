use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::PathBuf;

use platen::adapter::TemplateAdapter;
use platen::engine::TeraEngine;

fn templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mail/templates")
}

fn bench_render(c: &mut Criterion) {
    let mut engine = TeraEngine::with_root(templates_dir());
    let mut adapter = TemplateAdapter::new(&mut engine);
    adapter
        .set_file("welcome.txt")
        .set_parameters([("name", "Bench"), ("site", "Benchmark Shop")]);

    c.bench_function("render_welcome", |b| {
        b.iter(|| black_box(adapter.render().unwrap()))
    });
}

fn bench_render_with_after_filters(c: &mut Criterion) {
    let mut engine = TeraEngine::with_root(templates_dir());
    let mut adapter = TemplateAdapter::new(&mut engine);
    adapter
        .set_file("welcome.txt")
        .set_parameters([("name", "Bench"), ("site", "Benchmark Shop")]);
    for name in platen::filters::BUILTIN_NAMES {
        if let Some(f) = platen::filters::builtin(name) {
            adapter.add_after_filter(f);
        }
    }

    c.bench_function("render_welcome_after_filters", |b| {
        b.iter(|| black_box(adapter.render().unwrap()))
    });
}

criterion_group!(benches, bench_render, bench_render_with_after_filters);
criterion_main!(benches);
