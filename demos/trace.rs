//! Timed operation example
//!
//! Shows explicit `stop`, the closure form and automatic completion when a
//! trace leaves scope.
//!
//! Run with: cargo run --example trace

use rust_slog::prelude::*;
use std::fmt;
use std::thread;
use std::time::Duration;

#[derive(Debug)]
struct Timeout;

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("timed out")
    }
}

impl std::error::Error for Timeout {}

fn upload(ctx: &impl Context, file: &str, fail: bool) -> std::result::Result<usize, Timeout> {
    ctx.with_field("file", file)
        .traced(Level::Info, "upload", || {
            thread::sleep(Duration::from_millis(25));
            if fail {
                Err(Timeout)
            } else {
                Ok(1024)
            }
        })
}

fn main() -> Result<()> {
    println!("=== rust_slog - Trace Example ===\n");

    let logger = Logger::builder()
        .handler(Level::Debug, AutoHandler::stderr())
        .build();
    let ctx = logger.with_field("worker", 1);

    println!("1. Explicit stop:");
    let trace = ctx.trace(Level::Info, "resize");
    thread::sleep(Duration::from_millis(10));
    trace.stop(None)?;

    println!("\n2. Closure form:");
    let _ = upload(&ctx, "sloth.png", false);
    let _ = upload(&ctx, "huge.iso", true);

    println!("\n3. Completed on scope exit:");
    {
        let _trace = ctx.trace(Level::Debug, "cleanup");
        thread::sleep(Duration::from_millis(5));
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
