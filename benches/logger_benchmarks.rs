//! Criterion benchmarks for rust_slog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_slog::prelude::*;
use rust_slog::fields;
use std::fmt;
use std::io::{self, Write};
use std::thread;

#[derive(Debug)]
struct BenchError;

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("boom")
    }
}

impl std::error::Error for BenchError {}

fn discard_logger() -> Logger {
    Logger::builder()
        .handler(Level::Debug, DiscardHandler::new())
        .build()
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let logger = discard_logger();

    group.bench_function("no_fields", |b| {
        b.iter(|| logger.info(black_box("login")));
    });

    group.bench_function("filtered", |b| {
        let quiet = Logger::builder()
            .handler(Level::Error, DiscardHandler::new())
            .build();
        b.iter(|| quiet.debug(black_box("not delivered")));
    });

    group.bench_function("no_handlers", |b| {
        let empty = Logger::new();
        b.iter(|| empty.info(black_box("nobody listening")));
    });

    group.finish();
}

// ============================================================================
// Field Benchmarks
// ============================================================================

fn bench_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("fields");
    group.throughput(Throughput::Elements(1));

    let logger = discard_logger();

    group.bench_function("small", |b| {
        b.iter(|| {
            logger
                .with_fields(fields! { "file" => "sloth.png", "type" => "image/png" })
                .info(black_box("upload"))
        });
    });

    group.bench_function("medium", |b| {
        b.iter(|| {
            logger
                .with_fields(fields! {
                    "file" => "sloth.png",
                    "type" => "image/png",
                    "size" => 1024,
                    "user" => "tobi",
                    "region" => "us-east-1",
                })
                .info(black_box("upload"))
        });
    });

    group.bench_function("large", |b| {
        let base = logger.with_fields(fields! {
            "service" => "uploader",
            "version" => "1.2.3",
            "region" => "us-east-1",
            "host" => "node-17",
        });
        b.iter(|| {
            base.with_field("file", "sloth.png")
                .with_field("size", 1024)
                .with_field("attempt", 2)
                .with_field("cached", false)
                .with_field("ratio", 0.75)
                .info(black_box("upload"))
        });
    });

    group.bench_function("with_error", |b| {
        b.iter(|| logger.with_error(Some(&BenchError)).error(black_box("upload failed")));
    });

    group.finish();
}

// ============================================================================
// Handler Benchmarks
// ============================================================================

fn bench_handlers(c: &mut Criterion) {
    let mut group = c.benchmark_group("handlers");
    group.throughput(Throughput::Elements(1));

    let json = Logger::builder()
        .handler(Level::Debug, JsonHandler::new(io::sink()))
        .build()
        .with_field("file", "sloth.png");
    group.bench_function("json", |b| b.iter(|| json.info(black_box("upload"))));

    let logfmt = Logger::builder()
        .handler(Level::Debug, LogfmtHandler::new(io::sink()))
        .build()
        .with_field("file", "sloth.png");
    group.bench_function("logfmt", |b| b.iter(|| logfmt.info(black_box("upload"))));

    #[cfg(feature = "console")]
    {
        let text = Logger::builder()
            .handler(Level::Debug, TextHandler::new(io::sink()).with_colors(false))
            .build()
            .with_field("file", "sloth.png");
        group.bench_function("text", |b| b.iter(|| text.info(black_box("upload"))));
    }

    group.finish();
}

// ============================================================================
// Trace and Writer Benchmarks
// ============================================================================

fn bench_trace_and_writer(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_writer");
    let logger = discard_logger();

    group.throughput(Throughput::Elements(1));
    group.bench_function("trace_stop", |b| {
        b.iter(|| logger.trace(Level::Info, black_box("op")).stop(None));
    });

    let payload = "a line of subprocess output\n".repeat(64);
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("writer_64_lines", |b| {
        b.iter(|| {
            let mut writer = logger.writer(Level::Info);
            writer.write_all(black_box(payload.as_bytes())).unwrap();
            writer.close()
        });
    });

    group.finish();
}

// ============================================================================
// Concurrency Benchmarks
// ============================================================================

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel");
    let threads = 4;
    let per_thread = 1000;
    group.throughput(Throughput::Elements((threads * per_thread) as u64));

    let logger = discard_logger();
    let base = logger.with_field("service", "uploader");

    group.bench_function("shared_context", |b| {
        b.iter(|| {
            thread::scope(|scope| {
                for _ in 0..threads {
                    let base = &base;
                    scope.spawn(move || {
                        for _ in 0..per_thread {
                            let _ = base.with_field("file", "sloth.png").info("upload");
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_dispatch,
    bench_fields,
    bench_handlers,
    bench_trace_and_writer,
    bench_parallel
);
criterion_main!(benches);
