//! Line writer example
//!
//! Folds the output of a child process into structured log entries, one
//! entry per line.
//!
//! Run with: cargo run --example line_writer

use rust_slog::prelude::*;
use std::io;
use std::process::{Command, Stdio};

fn main() -> Result<()> {
    println!("=== rust_slog - Line Writer Example ===\n");

    let logger = Logger::builder()
        .handler(Level::Debug, CliHandler::stderr())
        .build();

    let mut child = Command::new("ls")
        .arg("-l")
        .stdout(Stdio::piped())
        .spawn()?;
    let mut stdout = child.stdout.take().ok_or_else(|| LoggerError::other("child has no stdout"))?;

    let mut writer = logger.with_field("command", "ls -l").writer(Level::Info);
    io::copy(&mut stdout, &mut writer)?;
    writer.close()?;

    let status = child.wait()?;
    logger.with_field("status", status.to_string()).info("command finished")?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
