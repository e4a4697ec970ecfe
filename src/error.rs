//! Error types for the `jlv` application.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use thiserror::Error;

/// Errors that can occur in `jlv`.
///
/// Maps to exit codes: [`Config`](Self::Config) → exit 1,
/// [`Io`](Self::Io) → exit 2.
#[derive(Debug, Error)]
pub enum JlvError {
    /// Configuration error (unreadable config file, bad placeholder format).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error on the input or output stream. Stream-level failures are
    /// fatal: the pipeline terminates without retrying.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}
