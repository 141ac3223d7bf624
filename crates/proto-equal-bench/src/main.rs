//! Benchmark for message equality.
//!
//! Times the engine on empty, identical and deeply nested instances.
//!
//! Usage: `bench-equal [--iters N] [--json PATH]`

use std::fs;
use std::hint::black_box;
use std::time::{Duration, Instant};

use proto_equal::{
    Comparator, EqualityEngine, FieldSchema, Kind, Message, MessageBuilder, MessageSchema,
    SchemaModel,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ALL_TYPES: &str = "bench.TestAllTypes";
const NESTED: &str = "bench.TestAllTypes.NestedMessage";
const FOREIGN: &str = "bench.ForeignMessage";

const DEFAULT_ITERS: u32 = 1_000_000;
const NESTED_DEPTH: usize = 20;

// =============================================================================
// SCHEMA
// =============================================================================

const SCALARS: &[(&str, Kind)] = &[
    ("int32", Kind::Int32),
    ("int64", Kind::Int64),
    ("uint32", Kind::Uint32),
    ("uint64", Kind::Uint64),
    ("sint32", Kind::Sint32),
    ("sint64", Kind::Sint64),
    ("fixed32", Kind::Fixed32),
    ("fixed64", Kind::Fixed64),
    ("sfixed32", Kind::Sfixed32),
    ("sfixed64", Kind::Sfixed64),
    ("float", Kind::Float),
    ("double", Kind::Double),
    ("bool", Kind::Bool),
    ("string", Kind::String),
    ("bytes", Kind::Bytes),
];

fn build_model() -> SchemaModel {
    let mut number = 0u32;
    let mut next = || {
        number += 1;
        number
    };

    let mut all = MessageSchema::new(ALL_TYPES);
    for &(suffix, kind) in SCALARS {
        all.add_field(FieldSchema::new(format!("singular_{suffix}"), next(), kind));
        all.add_field(
            FieldSchema::new(format!("optional_{suffix}"), next(), kind)
                .synthetic_oneof(format!("_optional_{suffix}")),
        );
        all.add_field(FieldSchema::new(format!("repeated_{suffix}"), next(), kind).repeated());
        all.add_field(FieldSchema::map(
            format!("map_string_{suffix}"),
            next(),
            Kind::String,
            FieldSchema::new("value", 2, kind),
        ));
    }
    all.add_field(FieldSchema::message("optional_nested_message", next(), NESTED));
    all.add_field(FieldSchema::message("repeated_nested_message", next(), NESTED).repeated());
    all.add_field(FieldSchema::message("optional_foreign_message", next(), FOREIGN));
    all.add_field(FieldSchema::new("oneof_uint32", next(), Kind::Uint32).in_oneof("oneof_field"));
    all.add_field(FieldSchema::message("oneof_nested_message", next(), NESTED).in_oneof("oneof_field"));
    all.add_field(FieldSchema::new("oneof_string", next(), Kind::String).in_oneof("oneof_field"));
    all.add_field(FieldSchema::message("duration", next(), "google.protobuf.Duration"));
    all.add_field(FieldSchema::message("timestamp", next(), "google.protobuf.Timestamp"));
    all.add_field(FieldSchema::message("any", next(), "google.protobuf.Any"));

    let nested = MessageSchema::new(NESTED)
        .field(FieldSchema::new("a", 1, Kind::Int32).optional())
        .field(FieldSchema::message("corecursive", 2, ALL_TYPES));
    let foreign = MessageSchema::new(FOREIGN)
        .field(FieldSchema::new("c", 1, Kind::Int32).optional())
        .field(FieldSchema::new("d", 2, Kind::Int32).optional());

    SchemaModel::new().message(all).message(nested).message(foreign)
}

fn make_nested(depth: usize) -> Option<Message> {
    let mut current: Option<Message> = None;
    for _ in 0..depth {
        let nested = match current.take() {
            Some(inner) => MessageBuilder::new(NESTED).set("corecursive", inner),
            None => MessageBuilder::new(NESTED),
        };
        current = Some(
            MessageBuilder::new(ALL_TYPES)
                .set("optional_nested_message", nested.build())
                .build(),
        );
    }
    current
}

// =============================================================================
// TIMING
// =============================================================================

#[derive(Debug, Serialize)]
struct CaseResult {
    name: &'static str,
    iterations: u32,
    equal: bool,
    total_ns: u128,
    ns_per_op: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    version: &'static str,
    cases: Vec<CaseResult>,
}

fn time_case(
    name: &'static str,
    iters: u32,
    cmp: &Comparator<'_>,
    a: Option<&Message>,
    b: Option<&Message>,
) -> CaseResult {
    let equal = cmp.equal(a, b);

    let start = Instant::now();
    for _ in 0..iters {
        black_box(cmp.equal(black_box(a), black_box(b)));
    }
    let elapsed: Duration = start.elapsed();

    let ns_per_op = elapsed.as_nanos() as f64 / f64::from(iters.max(1));
    println!("{:<36} {:>10.1} ns/op  (equal = {})", name, ns_per_op, equal);

    CaseResult {
        name,
        iterations: iters,
        equal,
        total_ns: elapsed.as_nanos(),
        ns_per_op,
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut iters = DEFAULT_ITERS;
    let mut json_path: Option<String> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--iters" => {
                iters = args
                    .next()
                    .and_then(|n| n.parse().ok())
                    .expect("--iters takes a positive integer");
            }
            "--json" => json_path = Some(args.next().expect("--json takes a path")),
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: bench-equal [--iters N] [--json PATH]");
                std::process::exit(2);
            }
        }
    }

    let bind_start = Instant::now();
    let engine = EqualityEngine::bind(&build_model()).expect("Failed to bind schema");
    println!("Bound {} message types in {:?}", engine.message_names().count(), bind_start.elapsed());
    tracing::info!(iters, "running equality benchmarks");

    let all_types = engine.comparator(ALL_TYPES).expect("TestAllTypes is bound");
    let foreign = engine.comparator(FOREIGN).expect("ForeignMessage is bound");

    let small_x = Message::new(FOREIGN);
    let small_y = Message::new(FOREIGN);
    let large_x = Message::new(ALL_TYPES);
    let large_y = Message::new(ALL_TYPES);
    let nested_x = make_nested(NESTED_DEPTH);
    let nested_y = make_nested(NESTED_DEPTH);
    let nested_z = make_nested(NESTED_DEPTH + 1);

    println!("\n=== Equality ({} iterations) ===", iters);
    let cases = vec![
        time_case("SmallEmpty", iters, &foreign, Some(&small_x), Some(&small_y)),
        time_case("IdenticalPtrEmpty", iters, &foreign, Some(&small_x), Some(&small_x)),
        time_case("LargeEmpty", iters, &all_types, Some(&large_x), Some(&large_y)),
        time_case(
            "DeeplyNestedEqual",
            iters,
            &all_types,
            nested_x.as_ref(),
            nested_y.as_ref(),
        ),
        time_case(
            "DeeplyNestedDifferent",
            iters,
            &all_types,
            nested_x.as_ref(),
            nested_z.as_ref(),
        ),
        time_case(
            "DeeplyNestedIdenticalPtr",
            iters,
            &all_types,
            nested_x.as_ref(),
            nested_x.as_ref(),
        ),
    ];

    if let Some(path) = json_path {
        let report = Report {
            version: proto_equal::VERSION,
            cases,
        };
        let json = serde_json::to_string_pretty(&report).expect("Failed to serialize report");
        fs::write(&path, json).expect("Failed to write report");
        println!("\nReport written to {}", path);
    }
}
