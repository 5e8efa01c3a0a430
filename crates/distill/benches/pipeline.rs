//! Pipeline benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use distill::{analyze, filter, AnalyzeOptions};
use serde_json::{json, Value};

const SMALL_TREE: &str = r#"{
  "id": "1:1",
  "name": "Login",
  "type": "FRAME",
  "absoluteBoundingBox": {"x": 0, "y": 0, "width": 300, "height": 150},
  "children": [
    {"id": "1:2", "name": "Email Input", "type": "FRAME",
     "absoluteBoundingBox": {"x": 0, "y": 0, "width": 300, "height": 36}},
    {"id": "1:3", "name": "Submit Button", "type": "FRAME",
     "absoluteBoundingBox": {"x": 0, "y": 60, "width": 100, "height": 40}}
  ]
}"#;

/// A page of `rows` card rows, each card holding a title, a body and a button.
fn card_grid(rows: usize, per_row: usize) -> Value {
    let cards: Vec<Value> = (0..rows * per_row)
        .map(|i| {
            let (x, y) = ((i % per_row) as f64 * 320.0, (i / per_row) as f64 * 220.0);
            json!({
                "id": format!("{i}:1"),
                "name": format!("Card {i}"),
                "type": "FRAME",
                "absoluteBoundingBox": {"x": x, "y": y, "width": 300, "height": 200},
                "fills": [{"type": "SOLID", "color": {"r": 1.0, "g": 1.0, "b": 1.0}}],
                "effects": [{"type": "DROP_SHADOW", "radius": 4}],
                "exportSettings": [],
                "children": [
                    {"id": format!("{i}:2"), "name": "Title", "type": "TEXT", "characters": "Title",
                     "absoluteBoundingBox": {"x": x + 10.0, "y": y + 10.0, "width": 200, "height": 24}},
                    {"id": format!("{i}:3"), "name": "Body", "type": "TEXT", "characters": "Body copy",
                     "absoluteBoundingBox": {"x": x + 10.0, "y": y + 50.0, "width": 280, "height": 80}},
                    {"id": format!("{i}:4"), "name": "Action", "type": "FRAME", "cornerRadius": 4,
                     "absoluteBoundingBox": {"x": x + 10.0, "y": y + 150.0, "width": 100, "height": 36},
                     "children": [{"id": format!("{i}:5"), "name": "Label", "type": "TEXT", "characters": "Go"}]}
                ]
            })
        })
        .collect();

    json!({
        "id": "0:1",
        "name": "Dashboard",
        "type": "FRAME",
        "absoluteBoundingBox": {"x": 0, "y": 0, "width": 1280, "height": rows as f64 * 220.0},
        "children": cards
    })
}

fn analyze_small(c: &mut Criterion) {
    let tree: Value = serde_json::from_str(SMALL_TREE).unwrap();
    let options = AnalyzeOptions::default();
    c.bench_function("analyze_small", |b| b.iter(|| analyze(black_box(&tree), &options)));
}

fn analyze_cards(c: &mut Criterion) {
    let tree = card_grid(25, 4);
    let options = AnalyzeOptions::default();
    c.bench_function("analyze_100_cards", |b| b.iter(|| analyze(black_box(&tree), &options)));
}

fn filter_cards(c: &mut Criterion) {
    let tree = card_grid(25, 4);
    c.bench_function("filter_100_cards", |b| b.iter(|| filter::filter(black_box(&tree), None)));
}

criterion_group!(benches, analyze_small, analyze_cards, filter_cards);
criterion_main!(benches);
