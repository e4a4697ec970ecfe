//! Terminal output rendering.
//!
//! Writes [`RenderedLine`] segments to the output stream. The color decision
//! is made exactly once at startup: when the destination is not an
//! interactive terminal (or color is disabled), styles are dropped and the
//! output contains no ANSI escape sequences at all.
//!
//! Each line is composed into an internal buffer and written in one call,
//! then flushed, so downstream consumers see records in real time and an
//! interrupt can never leave a partially written escape sequence behind.

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;

use crate::cli::ColorMode;
use crate::formatter::RenderedLine;

/// Segment writer over an output stream.
pub struct Renderer<W: Write> {
    out: W,
    color: bool,
    buf: String,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            buf: String::with_capacity(512),
        }
    }

    /// Write one rendered line followed by a newline, then flush.
    ///
    /// Write failures (e.g. a broken downstream pipe) propagate to the
    /// caller; the consumer is gone, so there is nothing to retry.
    pub fn write_line(&mut self, line: &RenderedLine) -> io::Result<()> {
        self.buf.clear();
        for seg in &line.segments {
            if self.color && let Some(style) = seg.style {
                let _ = write!(self.buf, "{}", seg.text.as_str().style(style));
            } else {
                self.buf.push_str(&seg.text);
            }
        }
        self.buf.push('\n');
        self.out.write_all(self.buf.as_bytes())?;
        self.out.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Resolve the effective color decision, once, at startup.
///
/// `auto` enables color only when stdout is a TTY, `NO_COLOR` is unset, and
/// the terminal is not `dumb`.
pub fn resolve_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if !io::stdout().is_terminal() {
                return false;
            }
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            if std::env::var("TERM").is_ok_and(|v| v == "dumb") {
                return false;
            }
            true
        }
    }
}
