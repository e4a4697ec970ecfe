//! Message placeholder substitution.
//!
//! Some frameworks log a message template (`"user {id} logged in"`) next to a
//! context field holding the values. With substitution enabled, placeholders
//! in the message are replaced from that context before formatting. The
//! context value can be an object (`{key}` placeholders) or an array (`{0}`
//! placeholders). Placeholders with no matching context entry are left as
//! written.

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::JlvError;

/// A compiled placeholder substitution rule.
///
/// Built once at startup from the configured placeholder format, where the
/// literal word `key` marks the capture position (e.g. `{key}`, `[[key]]`,
/// `${key}`).
#[derive(Debug, Clone)]
pub struct Substitution {
    pub context_key: String,
    pattern: Regex,
}

impl Substitution {
    pub const DEFAULT_PLACEHOLDER_FORMAT: &'static str = "{key}";
    pub const DEFAULT_CONTEXT_KEY: &'static str = "context";
    const KEY_DELIMITER: &'static str = "key";

    pub fn new(context_key: &str, placeholder_format: &str) -> Result<Self, JlvError> {
        let (prefix, suffix) = placeholder_format
            .split_once(Self::KEY_DELIMITER)
            .ok_or_else(|| {
                JlvError::Config(format!(
                    "placeholder format '{placeholder_format}' is missing the `key` identifier"
                ))
            })?;
        let pattern = Regex::new(&format!(
            "{}([A-Za-z0-9_-]+){}",
            regex::escape(prefix),
            regex::escape(suffix)
        ))
        .map_err(|e| JlvError::Config(format!("invalid placeholder format: {e}")))?;

        Ok(Self {
            context_key: context_key.to_string(),
            pattern,
        })
    }

    /// Replace placeholders in `message` with values from the record's
    /// context field.
    ///
    /// Returns `None` when the record carries no context field, leaving the
    /// message untouched.
    pub fn apply(
        &self,
        message: &str,
        rest: &serde_json::Map<String, serde_json::Value>,
    ) -> Option<String> {
        let context = rest.get(&self.context_key)?;

        Some(
            self.pattern
                .replace_all(message, |caps: &Captures<'_>| {
                    let key = &caps[1];
                    let value = match context {
                        Value::Object(o) => o.get(key),
                        Value::Array(a) => key.parse::<usize>().ok().and_then(|i| a.get(i)),
                        _ => None,
                    };
                    match value {
                        Some(value) => value_text(value),
                        // Unresolvable placeholder stays as written
                        None => caps[0].to_string(),
                    }
                })
                .into_owned(),
        )
    }
}

impl Default for Substitution {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CONTEXT_KEY, Self::DEFAULT_PLACEHOLDER_FORMAT)
            .expect("default placeholder format parses")
    }
}

/// Inline text for a substituted value: strings unquoted, everything else
/// compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
