//! Structured log record decoding with graceful degradation.
//!
//! Each input line is decoded independently: a strict JSON object parse is
//! attempted first, and any failure (malformed syntax, non-object top level)
//! degrades to a raw pass-through line instead of failing the pipeline. A
//! mixed stream of structured and unstructured lines renders without
//! interruption.

use crate::config::Config;
use crate::fields;
use crate::level::LevelField;
use crate::timestamp::Timestamp;

/// The parsed classification of an input line.
#[derive(Debug)]
pub enum ParsedLine {
    /// Entire line is a valid JSON object.
    Record(LogRecord),
    /// Line has non-JSON text before a valid JSON object.
    Prefixed { prefix: String, record: LogRecord },
    /// Line contains no valid JSON object — rendered verbatim.
    Raw,
}

/// A structured log entry extracted from a JSON object.
///
/// Well-known fields are pulled out according to the config overrides or the
/// alias tables; everything else stays in [`rest`](Self::rest) in its
/// original insertion order.
#[derive(Debug)]
pub struct LogRecord {
    pub level: Option<LevelField>,
    pub timestamp: Option<Timestamp>,
    pub message: Option<String>,
    /// Remaining fields in source order.
    pub rest: serde_json::Map<String, serde_json::Value>,
    /// The original raw JSON text (for `--json` mode passthrough).
    pub raw_json: String,
}

/// Parse a single input line into a [`ParsedLine`].
///
/// Detection strategy:
/// 1. Lines starting with `{` → try parsing as a JSON object
/// 2. Lines containing `{` → try prefixed JSON (prefix text + JSON object)
/// 3. Everything else → [`ParsedLine::Raw`]
///
/// JSON arrays and scalars are treated as [`ParsedLine::Raw`] since they are
/// not log entries.
pub fn parse_line(line: &str, config: &Config) -> ParsedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ParsedLine::Raw;
    }

    if trimmed.starts_with('{') {
        if let Some(record) = try_parse_json(trimmed, config) {
            return ParsedLine::Record(record);
        }
        return ParsedLine::Raw;
    }

    // Prefixed JSON detection: scan for the first '{'
    if let Some(brace_pos) = trimmed.find('{') {
        let json_part = &trimmed[brace_pos..];
        if let Some(record) = try_parse_json(json_part, config) {
            let prefix = trimmed[..brace_pos].trim_end().to_string();
            return ParsedLine::Prefixed { prefix, record };
        }
    }

    ParsedLine::Raw
}

/// Try to parse a string as a JSON object and extract the well-known fields.
fn try_parse_json(s: &str, config: &Config) -> Option<LogRecord> {
    let parsed: serde_json::Value = serde_json::from_str(s).ok()?;

    let serde_json::Value::Object(mut map) = parsed else {
        return None;
    };

    let level = extract_level(&mut map, config);
    let timestamp = extract_timestamp(&mut map, config);
    let message = extract_message(&mut map, config);

    Some(LogRecord {
        level,
        timestamp,
        message,
        rest: map,
        raw_json: s.to_string(),
    })
}

/// Extract the level field using config override or alias table.
fn extract_level(
    map: &mut serde_json::Map<String, serde_json::Value>,
    config: &Config,
) -> Option<LevelField> {
    if let Some(ref key) = config.level_key {
        map.shift_remove(key.as_str())
            .and_then(|v| LevelField::from_json_value(&v, config.level_aliases.as_ref()))
    } else {
        fields::find_and_remove(map, fields::LEVEL_ALIASES)
            .and_then(|(_, v)| LevelField::from_json_value(&v, config.level_aliases.as_ref()))
    }
}

/// Extract the timestamp field using config override or alias table.
fn extract_timestamp(
    map: &mut serde_json::Map<String, serde_json::Value>,
    config: &Config,
) -> Option<Timestamp> {
    if let Some(ref key) = config.timestamp_key {
        map.shift_remove(key.as_str())
            .and_then(|v| Timestamp::from_json_value(&v))
    } else {
        fields::find_and_remove(map, fields::TIMESTAMP_ALIASES)
            .and_then(|(_, v)| Timestamp::from_json_value(&v))
    }
}

/// Extract the message field using config override or alias table.
fn extract_message(
    map: &mut serde_json::Map<String, serde_json::Value>,
    config: &Config,
) -> Option<String> {
    let value = if let Some(ref key) = config.message_key {
        map.shift_remove(key.as_str())
    } else {
        fields::find_and_remove(map, fields::MESSAGE_ALIASES).map(|(_, v)| v)
    };
    value.and_then(value_to_string)
}

/// Convert a JSON value to its string representation. `null` counts as absent.
fn value_to_string(v: serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
