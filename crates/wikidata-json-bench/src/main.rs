//! Round-trip benchmark over a dump of item documents.
//!
//! Reads one entity API document per line (a bare JSON array dump with
//! trailing commas also works), parses each with the strict decoder,
//! re-serializes it and checks the output is structurally equal to the input.

use std::fs;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{info, warn};
use wikidata_json::{CodecError, DecodeOptions, ErrorKind, Item};

#[derive(Default)]
struct Stats {
    lines: usize,
    bytes: usize,
    parsed: usize,
    identical: usize,
    mismatched: usize,
    invalid_identifier: usize,
    unknown_value_kind: usize,
    schema_violation: usize,
    claims: usize,
    parse_time: Duration,
    serialize_time: Duration,
}

impl Stats {
    fn record_error(&mut self, err: &CodecError) {
        match err.kind() {
            ErrorKind::InvalidIdentifier => self.invalid_identifier += 1,
            ErrorKind::UnknownValueKind => self.unknown_value_kind += 1,
            ErrorKind::SchemaViolation => self.schema_violation += 1,
        }
    }

    fn rejected(&self) -> usize {
        self.invalid_identifier + self.unknown_value_kind + self.schema_violation
    }
}

/// Strips dump framing: the surrounding `[`/`]` lines and trailing commas.
fn document_text(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    match trimmed {
        "" | "[" | "]" => None,
        text => Some(text),
    }
}

fn roundtrip(text: &str, options: &DecodeOptions, stats: &mut Stats) {
    let parse_start = Instant::now();
    let item = match Item::parse_with_options(text, options) {
        Ok(item) => item,
        Err(err) => {
            stats.parse_time += parse_start.elapsed();
            stats.record_error(&err);
            return;
        }
    };
    stats.parse_time += parse_start.elapsed();
    stats.parsed += 1;
    stats.claims += item.claim_count();

    let serialize_start = Instant::now();
    let output = item.serialize();
    stats.serialize_time += serialize_start.elapsed();

    let same = match (
        serde_json::from_str::<Value>(text),
        serde_json::from_str::<Value>(&output),
    ) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    };
    if same {
        stats.identical += 1;
    } else {
        stats.mismatched += 1;
        warn!(item = %item.id, "serialized item differs from input");
    }
}

fn throughput(bytes: usize, time: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / time.as_secs_f64().max(f64::EPSILON)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Some(data_path) = std::env::args().nth(1) else {
        eprintln!("usage: bench-roundtrip <items.jsonl>");
        return ExitCode::from(2);
    };

    info!(path = %data_path, version = wikidata_json::VERSION, "loading items");
    let data = match fs::read_to_string(&data_path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to read {data_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let options = DecodeOptions::default();
    let mut stats = Stats::default();
    let total_start = Instant::now();
    for text in data.lines().filter_map(document_text) {
        stats.lines += 1;
        stats.bytes += text.len();
        roundtrip(text, &options, &mut stats);
    }
    let total_time = total_start.elapsed();

    println!("\n=== Round-trip ===");
    println!("Documents: {}", stats.lines);
    println!("Parsed:    {} ({} claims)", stats.parsed, stats.claims);
    println!("Identical: {}", stats.identical);
    println!("Differing: {}", stats.mismatched);
    println!(
        "Rejected:  {} (identifier {}, value kind {}, schema {})",
        stats.rejected(),
        stats.invalid_identifier,
        stats.unknown_value_kind,
        stats.schema_violation
    );

    println!("\n=== Timing ===");
    println!(
        "Parse:     {:?} ({:.2} MB/s)",
        stats.parse_time,
        throughput(stats.bytes, stats.parse_time)
    );
    println!("Serialize: {:?}", stats.serialize_time);
    println!("Total:     {:?}", total_time);

    if stats.mismatched > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
