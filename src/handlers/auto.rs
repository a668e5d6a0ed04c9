//! Handler that picks its format from the destination

use super::JsonHandler;
#[cfg(feature = "console")]
use super::TextHandler;
use crate::core::{Entry, Handler, Result};
use std::io::{self, IsTerminal, Write};

enum Inner<W> {
    #[cfg(feature = "console")]
    Text(TextHandler<W>),
    Json(JsonHandler<W>),
}

/// Human-readable text for terminals, JSON lines for everything else
/// (files, pipes, log collectors).
///
/// Without the `console` feature every destination gets JSON.
pub struct AutoHandler<W> {
    inner: Inner<W>,
}

impl AutoHandler<io::Stderr> {
    pub fn stderr() -> Self {
        let stderr = io::stderr();
        let is_terminal = stderr.is_terminal();
        Self::new(stderr, is_terminal)
    }
}

impl AutoHandler<io::Stdout> {
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let is_terminal = stdout.is_terminal();
        Self::new(stdout, is_terminal)
    }
}

impl<W: Write + Send> AutoHandler<W> {
    /// Wrap `writer`, using text output when `is_terminal` holds
    pub fn new(writer: W, is_terminal: bool) -> Self {
        Self {
            inner: select(writer, is_terminal),
        }
    }

    /// Name of the handler actually doing the writing
    pub fn selected(&self) -> &str {
        match &self.inner {
            #[cfg(feature = "console")]
            Inner::Text(handler) => handler.name(),
            Inner::Json(handler) => handler.name(),
        }
    }
}

#[cfg(feature = "console")]
fn select<W: Write + Send>(writer: W, is_terminal: bool) -> Inner<W> {
    if is_terminal {
        Inner::Text(TextHandler::new(writer))
    } else {
        Inner::Json(JsonHandler::new(writer))
    }
}

#[cfg(not(feature = "console"))]
fn select<W: Write + Send>(writer: W, _is_terminal: bool) -> Inner<W> {
    Inner::Json(JsonHandler::new(writer))
}

impl<W: Write + Send> Handler for AutoHandler<W> {
    fn handle(&self, entry: &Entry) -> Result<()> {
        match &self.inner {
            #[cfg(feature = "console")]
            Inner::Text(handler) => handler.handle(entry),
            Inner::Json(handler) => handler.handle(entry),
        }
    }

    fn name(&self) -> &str {
        "auto"
    }
}
