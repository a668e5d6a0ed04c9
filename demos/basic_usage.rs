//! Basic logger usage example
//!
//! Demonstrates handler registration, field contexts and per-handler
//! thresholds.
//!
//! Run with: cargo run --example basic_usage

use rust_slog::prelude::*;
use rust_slog::{fields, info};
use std::fmt;
use std::io;

#[derive(Debug)]
struct QuotaExceeded;

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("storage quota exceeded")
    }
}

impl std::error::Error for QuotaExceeded {}

fn main() -> Result<()> {
    println!("=== rust_slog - Basic Usage Example ===\n");

    // Text on a terminal, JSON when stderr is redirected; plus a JSON copy
    // of warnings and worse on stdout
    let logger = Logger::builder()
        .handler(Level::Debug, AutoHandler::stderr())
        .handler(Level::Warn, JsonHandler::new(io::stdout()))
        .build();

    println!("1. Logging at different levels:");
    logger.debug("cache warmed")?;
    logger.info("server started")?;
    logger.warn("disk usage above 80%")?;
    logger.error("upstream unavailable")?;

    println!("\n2. Field contexts:");
    let request = logger.with_fields(fields! { "method" => "PUT", "path" => "/upload" });
    let upload = request.with_field("file", "sloth.png");
    upload.info("upload started")?;
    info!(upload, "received {} bytes", 4096)?;
    upload.with_error(Some(&QuotaExceeded)).error("upload rejected")?;
    request.info("request finished")?;

    println!("\n3. Configured from JSON:");
    let configured = LoggerConfig::from_json(r#"{"level": "info", "format": "logfmt"}"#)?.build()?;
    configured.with_field("source", "config").info("hello from logfmt")?;
    configured.debug("hidden by the info threshold")?;

    let metrics = logger.metrics();
    println!(
        "\nDispatched {} entries, {} deliveries, {} failures",
        metrics.dispatched(),
        metrics.delivered(),
        metrics.failed()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
