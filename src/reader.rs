//! Newline-delimited line reader over an arbitrary byte stream.
//!
//! Pulls raw bytes from a [`BufRead`] source and splits them into discrete
//! record boundaries. Lines may be arbitrarily long (bounded only by memory),
//! and a final line without a trailing newline is still yielded. End of
//! stream is signaled distinctly from an empty line.

use std::io::{self, BufRead};

/// A pull-based line source over a byte stream.
///
/// The internal byte buffer is reused across calls; each returned line is a
/// fresh `String`. Input is declared UTF-8, so invalid sequences are decoded
/// lossily rather than dropping the line.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(512),
        }
    }

    /// Pull the next line from the stream.
    ///
    /// Returns `Ok(Some(line))` with the trailing `\n` (and `\r`) stripped,
    /// `Ok(None)` at end of stream. Read errors propagate; the caller is
    /// expected to terminate the pipeline, not retry.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        let n = self.inner.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
