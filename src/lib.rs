//! `jlv` — streaming JSON log viewer.
//!
//! This library provides the core pipeline behind the `jlv` CLI tool: read
//! newline-delimited JSON log records from a stream, decode them with
//! graceful degradation (malformed lines pass through verbatim), extract the
//! well-known level/timestamp/message fields, and render each record as one
//! colorized human-readable line in real time.
//!
//! # Example
//!
//! ```
//! use jlv::{Config, format_line};
//!
//! let config = Config::default();
//!
//! let line = format_line(r#"{"level":"info","msg":"hello","port":8080}"#, &config).unwrap();
//! assert_eq!(line.plain(), "info hello port=8080");
//!
//! let raw = format_line("not json at all", &config).unwrap();
//! assert_eq!(raw.plain(), "not json at all");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod level;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod render;
pub mod substitute;
pub mod timestamp;

// Re-export primary API types for convenience.
pub use config::Config;
pub use error::JlvError;
pub use formatter::{RenderedLine, Segment, format_line};
pub use level::{Level, LevelField};
pub use pipeline::{Outcome, Pipeline, State};
pub use reader::LineReader;
pub use record::{LogRecord, ParsedLine, parse_line};
pub use render::{Renderer, resolve_color};
pub use substitute::Substitution;
pub use timestamp::Timestamp;
