//! Performance benchmarks for twirl.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Style table parsing (embedded and generated tables)
//! - Style table loading from disk
//! - Status line rendering, the per-tick cost of a spinner
//! - CLI argument parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs;
use tempfile::TempDir;

use twirl::cli::Cli;
use twirl::config::StyleTable;
use twirl::feedback::line::status_line;

/// Helper to build style JSON with N entries.
fn styles_json(num_styles: usize) -> String {
    let styles: serde_json::Map<String, serde_json::Value> = (0..num_styles)
        .map(|i| {
            (
                format!("style-{i:04}"),
                serde_json::json!({
                    "interval": 80 + (i % 5) * 10,
                    "frames": ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
                }),
            )
        })
        .collect();
    serde_json::to_string_pretty(&styles).unwrap()
}

// ============================================================================
// Style table benchmarks
// ============================================================================

fn bench_embedded_parse(c: &mut Criterion) {
    c.bench_function("embedded_parse", |b| {
        b.iter(|| {
            let table = StyleTable::embedded().unwrap();
            black_box(table)
        })
    });
}

fn bench_table_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_parse");

    for size in [10, 100, 1000].iter() {
        let json = styles_json(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let table = StyleTable::from_json_str(black_box(&json)).unwrap();
                black_box(table)
            })
        });
    }

    group.finish();
}

fn bench_table_load(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("spinners.json");
    fs::write(&path, styles_json(100)).unwrap();

    c.bench_function("table_load", |b| {
        b.iter(|| {
            let table = StyleTable::from_path(black_box(&path)).unwrap();
            black_box(table)
        })
    });

    drop(temp);
}

fn bench_table_lookup(c: &mut Criterion) {
    let table = StyleTable::from_json_str(&styles_json(1000)).unwrap();

    c.bench_function("table_lookup", |b| {
        b.iter(|| {
            let style = table.get(black_box("style-0500")).unwrap();
            black_box(style)
        })
    });
}

// ============================================================================
// Rendering benchmarks
// ============================================================================

fn bench_status_line(c: &mut Criterion) {
    let table = StyleTable::embedded().unwrap();
    let style = table.get("dots").unwrap();
    let mut tick = 0usize;

    c.bench_function("status_line", |b| {
        b.iter(|| {
            tick = tick.wrapping_add(1);
            let line = status_line(style.frame(black_box(tick)), black_box("Step 3/5…"));
            black_box(line)
        })
    });
}

// ============================================================================
// CLI benchmarks
// ============================================================================

fn bench_cli_parsing(c: &mut Criterion) {
    use clap::Parser;

    c.bench_function("cli_parsing", |b| {
        b.iter(|| {
            let result = Cli::try_parse_from(black_box([
                "twirl", "demo", "--style", "line", "--steps", "3",
            ]));
            black_box(result)
        })
    });
}

criterion_group!(
    benches,
    bench_embedded_parse,
    bench_table_parse,
    bench_table_load,
    bench_table_lookup,
    bench_status_line,
    bench_cli_parsing,
);

criterion_main!(benches);
