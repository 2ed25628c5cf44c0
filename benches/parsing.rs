//! Benchmarks for greetpack parsing and grouping.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- parse_export`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use greetpack::GreetingRecord;
use greetpack::calendar::DateGrouper;
use greetpack::config::ParserConfig;
use greetpack::output::to_json;
use greetpack::parser::GreetingParser;
use greetpack::parsing::translate_tapbacks;

use chrono::Utc;

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_export(count: usize) -> String {
    let mut blocks = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Me" } else { "+15551234567" };
        let day = (i / 4) % 28 + 1;
        let hour = i % 12 + 1;
        let minute = i % 60;
        let content = if i % 3 == 0 {
            "Good morning!".to_string()
        } else {
            format!("Message number {}", i)
        };
        let tapbacks = if i % 5 == 0 {
            "\nTapbacks:\nLoved by Me\nLaughed at by +15551234567"
        } else {
            ""
        };
        blocks.push(format!(
            "Jan {}, 2024 {}:{:02}:00 AM\n{}\n{}{}",
            day, hour, minute, sender, content, tapbacks
        ));
    }
    blocks.join("\n\n")
}

fn generate_records(count: usize) -> Vec<GreetingRecord> {
    let base = 1704438060000_i64;
    (0..count)
        .map(|i| {
            let sender = if i % 2 == 0 { "ry" } else { "bb" };
            GreetingRecord::new(base + i as i64 * 3_600_000, "Good morning!", sender)
        })
        .collect()
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parse_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_export");
    let parser = GreetingParser::with_timezone(ParserConfig::default(), Utc).unwrap();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let export = generate_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &export, |b, export| {
            b.iter(|| {
                let records = parser.parse_str(black_box(export)).unwrap();
                black_box(records)
            });
        });
    }
    group.finish();
}

fn bench_translate_tapbacks(c: &mut Criterion) {
    let tapbacks = [
        "Loved by Me",
        "Laughed at by +15551234567",
        "Emphasized by Me",
        "Reacted 🔥 to a message",
    ];

    c.bench_function("translate_tapbacks", |b| {
        b.iter(|| black_box(translate_tapbacks(black_box(&tapbacks))));
    });
}

// =============================================================================
// Grouping Benchmarks
// =============================================================================

fn bench_group_by_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by_day");
    let grouper = DateGrouper::with_timezone(Utc);

    for size in [100_usize, 1_000, 10_000, 100_000] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                let doc = grouper.group(black_box(records.clone()), "bench.txt");
                black_box(doc)
            });
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let parser = GreetingParser::with_timezone(ParserConfig::default(), Utc).unwrap();
    let grouper = DateGrouper::with_timezone(Utc);

    for size in [1_000_usize, 10_000, 50_000] {
        let export = generate_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &export, |b, export| {
            b.iter(|| {
                // Full pipeline: parse -> group -> json
                let records = parser.parse_str(black_box(export)).unwrap();
                let doc = grouper.group(records, "bench.txt");
                let json = to_json(&doc).unwrap();
                black_box(json)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_parse_export,
    bench_translate_tapbacks,
    bench_group_by_day,
    bench_full_pipeline,
);

criterion_main!(benches);
