//! Development-friendly text handler

use super::{paint, write_colored_fields, COLORS};
use crate::core::{Entry, Handler, Result};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::time::Instant;

/// Colored, column-aligned output for local development.
///
/// Each line is the upper-case level right-aligned in six columns, the
/// whole seconds since the handler was created, the message padded to 25
/// columns and then the fields in key order:
///
/// ```text
///   INFO[0003] upload complete           file=sloth.png size=1024
/// ```
pub struct TextHandler<W> {
    writer: Mutex<W>,
    start: Instant,
    use_colors: bool,
}

impl TextHandler<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TextHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            start: Instant::now(),
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn format_entry(&self, entry: &Entry) -> String {
        let level = entry.level();
        let label = paint(format!("{:>6}", level.label()), level, self.use_colors);

        let mut line = format!(
            "{}[{:04}] {:<25}",
            label,
            self.start.elapsed().as_secs(),
            entry.message()
        );
        write_colored_fields(&mut line, entry, self.use_colors.then(|| COLORS[level]));
        line.push('\n');
        line
    }
}

impl<W: Write + Send> Handler for TextHandler<W> {
    fn handle(&self, entry: &Entry) -> Result<()> {
        let line = self.format_entry(entry);
        self.writer.lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn name(&self) -> &str {
        "text"
    }
}
