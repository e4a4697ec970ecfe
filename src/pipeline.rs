//! Streaming pipeline controller.
//!
//! Wires reader → parser → formatter → renderer into a single sequential
//! pass. Each input line is fully parsed, formatted, and rendered before the
//! next line is read, which bounds memory to one in-flight record and makes
//! output order exactly match input order. Backpressure is the blocking
//! write itself: a slow consumer throttles the reader, no buffering logic
//! needed.
//!
//! State machine: `Running → Draining → Terminated`. End of input enters
//! `Draining` (final flush) before terminating; an interrupt skips draining
//! and terminates immediately. Rendered lines are written whole, so an
//! interrupt never leaves an open escape sequence.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Config;
use crate::error::JlvError;
use crate::formatter;
use crate::reader::LineReader;
use crate::render::Renderer;

/// Pipeline lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Draining,
    Terminated,
}

/// How a pipeline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// End of input reached and all output flushed.
    Drained,
    /// Interrupted by the user before end of input.
    Interrupted,
}

/// The single-threaded streaming pipeline.
pub struct Pipeline<R, W: Write> {
    reader: LineReader<R>,
    renderer: Renderer<W>,
    state: State,
}

impl<R: BufRead, W: Write> Pipeline<R, W> {
    pub fn new(reader: LineReader<R>, renderer: Renderer<W>) -> Self {
        Self {
            reader,
            renderer,
            state: State::Running,
        }
    }

    /// Run the pipeline to completion.
    ///
    /// `interrupted` is checked between records; once set, the pipeline
    /// terminates without draining. I/O errors on either stream abort the
    /// run; the caller reports them and exits non-zero.
    pub fn run(&mut self, config: &Config, interrupted: &AtomicBool) -> Result<Outcome, JlvError> {
        loop {
            match self.state {
                State::Running => {
                    if interrupted.load(Ordering::Relaxed) {
                        self.state = State::Terminated;
                        return Ok(Outcome::Interrupted);
                    }
                    match self.reader.next_line()? {
                        Some(line) => {
                            if let Some(rendered) = formatter::format_line(&line, config) {
                                self.renderer.write_line(&rendered)?;
                            }
                        }
                        None => self.state = State::Draining,
                    }
                }
                State::Draining => {
                    self.renderer.flush()?;
                    self.state = State::Terminated;
                }
                State::Terminated => return Ok(Outcome::Drained),
            }
        }
    }

    #[cfg(test)]
    fn state(&self) -> State {
        self.state
    }
}
