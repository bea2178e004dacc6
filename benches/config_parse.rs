//! Configuration-string and statistics benchmarks
//!
//! Covers:
//! - Parser throughput on realistic metadata strings
//! - Parser scaling with entry count and nesting depth
//! - app_metadata extraction
//! - Statistics grouping
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench config_parse
//!
//! # Specific categories
//! cargo bench --bench config_parse -- "parse/"
//! cargo bench --bench config_parse -- "stats/"
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use enginelens::{extract_app_metadata, parse_config, parse_config_with, ParseLimits};
use enginelens_core::testing::InMemoryEngine;
use enginelens_stats::{export_table, group_entries};

// =============================================================================
// Constants and Configuration
// =============================================================================

/// Metadata string shaped like a real table's configuration.
const TABLE_METADATA: &str = "access_pattern_hint=none,allocation_size=4KB,\
app_metadata=(formatVersion=2,infoObj=\"{\\\"v\\\": 2, \\\"key\\\": {\\\"a\\\": 1}}\",unique=true),\
block_allocation=best,block_compressor=snappy,cache_resident=false,checksum=on,\
collator=\"\",columns=\"\",dictionary=0,encryption=(keyid=\"\",name=none),format=btree,\
huffman_key=none,huffman_value=none,ignore_in_memory_cache_size=false,immutable=false,\
internal_item_max=0,internal_key_max=0,internal_key_truncate=true,\
internal_page_max=4KB,key_format=u,key_gap=10,leaf_item_max=0,leaf_key_max=0,\
leaf_page_max=32KB,leaf_value_max=64MB,log=(enabled=true),memory_page_image_max=0,\
memory_page_max=10m,os_cache_dirty_max=0,os_cache_max=0,prefix_compression=false,\
prefix_compression_min=4,split_deepen_min_child=0,split_deepen_per_child=0,\
split_pct=90,type=file,value_format=u";

/// Entry counts for scaling benchmarks.
const ENTRY_COUNTS: &[usize] = &[8, 64, 512, 4096];

/// Nesting depths for scaling benchmarks.
const DEPTHS: &[usize] = &[1, 8, 32, 64];

// =============================================================================
// Helper Functions
// =============================================================================

fn flat_config(entries: usize) -> String {
    (0..entries)
        .map(|i| match i % 4 {
            0 => format!("key_{}={}", i, i),
            1 => format!("key_{}=true", i),
            2 => format!("key_{}=value_{}", i, i),
            _ => format!("key_{}=\"quoted value {}\"", i, i),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn nested_config(depth: usize) -> String {
    let mut s = String::new();
    for _ in 0..depth {
        s.push_str("a=(");
    }
    s.push_str("leaf=1");
    for _ in 0..depth {
        s.push(')');
    }
    s
}

fn statistics(count: usize) -> Vec<(String, u64)> {
    const GROUPS: &[&str] = &["cache", "btree", "block-manager", "compression", "cursor"];
    (0..count)
        .map(|i| {
            let label = format!("{}: counter {}", GROUPS[i % GROUPS.len()], i);
            (label, i as u64)
        })
        .collect()
}

// =============================================================================
// Parser
// =============================================================================

fn parse_realistic(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse/realistic");
    group.throughput(Throughput::Bytes(TABLE_METADATA.len() as u64));

    group.bench_function("default", |b| {
        b.iter(|| parse_config(black_box(TABLE_METADATA)).unwrap())
    });

    let limits = ParseLimits::new(1024 * 1024, 64);
    group.bench_function("bounded", |b| {
        b.iter(|| parse_config_with(black_box(TABLE_METADATA), &limits).unwrap())
    });

    group.bench_function("owned", |b| {
        b.iter(|| parse_config(black_box(TABLE_METADATA)).unwrap().into_owned())
    });

    group.finish();
}

fn parse_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse/entries");
    for &count in ENTRY_COUNTS {
        let input = flat_config(count);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| parse_config(black_box(input)).unwrap())
        });
    }
    group.finish();

    let mut group = c.benchmark_group("parse/depth");
    for &depth in DEPTHS {
        let input = nested_config(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &input, |b, input| {
            b.iter(|| parse_config(black_box(input)).unwrap())
        });
    }
    group.finish();
}

fn extract(c: &mut Criterion) {
    c.bench_function("parse/app_metadata", |b| {
        b.iter(|| extract_app_metadata(black_box(TABLE_METADATA)).unwrap())
    });
}

// =============================================================================
// Statistics
// =============================================================================

fn stats_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats/group");
    for &count in ENTRY_COUNTS {
        let entries = statistics(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| group_entries(entries.iter().map(|(l, v)| (l.as_str(), *v))).unwrap())
        });
    }
    group.finish();

    let engine = InMemoryEngine::new().with_statistics("statistics:table:bench", statistics(512));
    c.bench_function("stats/export_512", |b| {
        b.iter(|| export_table(&engine, black_box("statistics:table:bench"), "").unwrap())
    });
}

criterion_group! {
    name = parser;
    config = Criterion::default();
    targets = parse_realistic, parse_scaling, extract
}

criterion_group! {
    name = stats;
    config = Criterion::default();
    targets = stats_grouping
}

criterion_main!(parser, stats);
