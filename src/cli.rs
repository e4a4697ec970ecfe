//! Command-line argument definitions for `jlv`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use clap::{Parser, ValueEnum};

/// Render JSON-structured log lines as colorized human-readable text.
///
/// Reads newline-delimited JSON log records from a file or stdin and writes
/// one rendered line per input line to stdout in real time. Lines that are
/// not JSON objects pass through unchanged.
#[derive(Debug, Parser)]
#[command(name = "jlv", version, about, long_about = None)]
pub struct Cli {
    /// Input file to read, `-` for stdin.
    #[arg(value_name = "FILE", default_value = "-")]
    pub input: String,

    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    /// Overrides the config file; defaults to `auto` when neither is given.
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Minimum severity level to display.
    ///
    /// Records below this level are suppressed. Non-JSON lines always pass
    /// through.
    #[arg(short = 'l', long, value_parser = parse_level_arg)]
    pub level: Option<String>,

    /// Override the JSON key used for the log message field.
    #[arg(short = 'm', long)]
    pub message_key: Option<String>,

    /// Override the JSON key used for the log level field.
    #[arg(long)]
    pub level_key: Option<String>,

    /// Override the JSON key used for the timestamp field.
    #[arg(short = 't', long)]
    pub timestamp_key: Option<String>,

    /// Render these fields first, in the given order (comma-separated).
    #[arg(short = 'p', long, value_delimiter = ',')]
    pub prioritize: Option<Vec<String>>,

    /// Only show these extra fields (comma-separated).
    ///
    /// Cannot be used with `--exclude-fields`.
    #[arg(
        short = 'i',
        long,
        value_delimiter = ',',
        conflicts_with = "exclude_fields"
    )]
    pub include_fields: Option<Vec<String>>,

    /// Hide these extra fields (comma-separated).
    ///
    /// Cannot be used with `--include-fields`.
    #[arg(
        short = 'e',
        long,
        value_delimiter = ',',
        conflicts_with = "include_fields"
    )]
    pub exclude_fields: Option<Vec<String>>,

    /// Output structured records as their original JSON instead of rendered
    /// text.
    ///
    /// Non-JSON lines are suppressed in this mode.
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Maximum character length for extra field values.
    ///
    /// Values exceeding this length are truncated with `…`.
    /// Set to `0` to disable truncation.
    #[arg(short = 'M', long)]
    pub max_field_length: Option<usize>,

    /// Replace placeholders in the message with values from the context field.
    #[arg(short = 's', long)]
    pub substitute: bool,

    /// JSON key holding the substitution context (object or array).
    #[arg(short = 'c', long)]
    pub context_key: Option<String>,

    /// Placeholder format, with the literal word `key` as the capture
    /// position. Example: `[[key]]` or `${key}`.
    #[arg(short = 'F', long)]
    pub placeholder_format: Option<String>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

/// Parse level argument, accepting the same aliases as level fields in
/// records (e.g. `warning`, `critical`).
fn parse_level_arg(s: &str) -> Result<String, String> {
    match crate::level::Level::from_str_loose(s) {
        Some(_) => Ok(s.to_lowercase()),
        None => Err(format!(
            "invalid level '{s}': expected one of trace, debug, info, warn, error, fatal (or an alias)"
        )),
    }
}
