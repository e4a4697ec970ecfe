//! Field extraction and line formatting for structured log records.
//!
//! Turns a parsed record into a [`RenderedLine`]: a sequence of styled text
//! segments that concatenate to exactly one output line. Well-known fields
//! render first in fixed priority order (level → timestamp → message),
//! followed by any prioritized fields from the config, then all remaining
//! fields as `key=value` pairs in their original insertion order. Nested
//! objects and arrays render as compact inline JSON.
//!
//! Record values never carry raw control characters into the output: newlines
//! and tabs are escaped to a visible representation, everything else in the
//! control range is stripped. This preserves the one-output-line-per-input-line
//! invariant.

use std::borrow::Cow;

use owo_colors::Style;

use crate::config::Config;
use crate::record::{self, LogRecord, ParsedLine};

/// One styled run of text within a rendered line.
///
/// `style` is advisory: the renderer applies it only when color output is
/// enabled.
#[derive(Debug)]
pub struct Segment {
    pub text: String,
    pub style: Option<Style>,
}

/// The final text buffer for one record, as a sequence of styled segments.
///
/// Produced by the formatter, consumed immediately by the renderer, then
/// discarded. Segment text contains no unescaped control characters.
#[derive(Debug, Default)]
pub struct RenderedLine {
    pub segments: Vec<Segment>,
}

impl RenderedLine {
    fn push(&mut self, text: impl Into<String>) {
        self.segments.push(Segment {
            text: text.into(),
            style: None,
        });
    }

    fn push_styled(&mut self, text: impl Into<String>, style: Style) {
        self.segments.push(Segment {
            text: text.into(),
            style: Some(style),
        });
    }

    /// Push a separating space unless the line is still empty.
    fn sep(&mut self) {
        if !self.segments.is_empty() {
            self.push(" ");
        }
    }

    /// The line's text with all styling ignored.
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Format a single input line.
///
/// Returns `None` when the line produces no output at all (suppressed by the
/// minimum-level filter, or a non-JSON line in `--json` mode). An empty input
/// line still yields an empty `RenderedLine` so the 1:1 input/output line
/// mapping holds.
pub fn format_line(line: &str, config: &Config) -> Option<RenderedLine> {
    match record::parse_line(line, config) {
        ParsedLine::Record(record) => format_structured(&record, None, config),
        ParsedLine::Prefixed { prefix, record } => {
            format_structured(&record, Some(&prefix), config)
        }
        ParsedLine::Raw => {
            if config.json_output {
                // Non-JSON lines are suppressed in --json mode
                return None;
            }
            let mut out = RenderedLine::default();
            out.push(sanitize(line).into_owned());
            Some(out)
        }
    }
}

fn format_structured(
    record: &LogRecord,
    prefix: Option<&str>,
    config: &Config,
) -> Option<RenderedLine> {
    if below_min_level(record, config) {
        return None;
    }
    if config.json_output {
        let mut out = RenderedLine::default();
        out.push(sanitize(&record.raw_json).into_owned());
        return Some(out);
    }
    Some(format_record(record, prefix, config))
}

/// Check if a record falls below the configured minimum level.
///
/// Records without a recognized level always pass: the filter cannot be
/// evaluated for them.
fn below_min_level(record: &LogRecord, config: &Config) -> bool {
    match (&config.min_level, &record.level) {
        (Some(min), Some(field)) => match field.level {
            Some(level) => level < *min,
            None => false,
        },
        _ => false,
    }
}

/// Compose a [`RenderedLine`] from a [`LogRecord`].
///
/// Output shape:
/// ```text
/// error 10:30:00.123 boom code=500 region=eu-west-1
/// ```
fn format_record(record: &LogRecord, prefix: Option<&str>, config: &Config) -> RenderedLine {
    let mut out = RenderedLine::default();

    // Level: raw text, styled only when recognized
    if let Some(ref field) = record.level {
        let text = sanitize(&field.raw).into_owned();
        match field.level {
            Some(level) => {
                let style = level.style_with_color(config.level_color(level));
                out.push_styled(text, style);
            }
            None => out.push(text),
        }
    }

    // Timestamp, bold
    if let Some(ref ts) = record.timestamp {
        out.sep();
        let text = sanitize(&ts.format_with(&config.timestamp_format)).into_owned();
        out.push_styled(text, Style::new().bold());
    }

    // Prefix text from a prefixed-JSON line, bold cyan
    if let Some(pfx) = prefix {
        out.sep();
        out.push_styled(sanitize(pfx).into_owned(), Style::new().cyan().bold());
    }

    // Message, plain; absent → omitted, no placeholder
    if let Some(ref msg) = record.message {
        let msg = match config.substitution {
            Some(ref subst) => subst
                .apply(msg, &record.rest)
                .map_or_else(|| Cow::Borrowed(msg.as_str()), Cow::Owned),
            None => Cow::Borrowed(msg.as_str()),
        };
        out.sep();
        out.push(sanitize(&msg).into_owned());
    }

    // Prioritized fields first, in the configured order
    for key in &config.prioritize {
        if let Some(value) = record.rest.get(key.as_str())
            && field_visible(key, config)
        {
            push_field(&mut out, key, value, config);
        }
    }

    // Remaining fields in original insertion order
    for (key, value) in &record.rest {
        if config.prioritize.iter().any(|p| p == key) {
            continue;
        }
        if field_visible(key, config) {
            push_field(&mut out, key, value, config);
        }
    }

    out
}

/// Include/exclude filtering; applies to prioritized and remaining fields
/// alike.
fn field_visible(key: &str, config: &Config) -> bool {
    if let Some(ref include) = config.include_fields
        && !include.iter().any(|f| f == key)
    {
        return false;
    }
    if let Some(ref exclude) = config.exclude_fields
        && exclude.iter().any(|f| f == key)
    {
        return false;
    }
    true
}

/// Key text style for `key=value` segments.
const KEY_STYLE: Style = Style::new().truecolor(150, 150, 150).bold();

fn push_field(out: &mut RenderedLine, key: &str, value: &serde_json::Value, config: &Config) {
    let val_str = format_value(value);
    let val_display = truncate_value(&val_str, config.max_field_length);

    out.sep();
    out.push_styled(sanitize(key).into_owned(), KEY_STYLE);
    out.push("=");
    out.push(sanitize(&val_display).into_owned());
}

/// Format a JSON value for display.
///
/// - Strings: unquoted
/// - Numbers: source representation (no precision loss)
/// - Bools: as-is
/// - Arrays and objects: compact JSON, not prettified
/// - Null: "null"
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Truncate a value string to `max_len` characters, appending `…` if truncated.
///
/// If `max_len` is `0`, no truncation is applied.
fn truncate_value(s: &str, max_len: usize) -> String {
    if max_len == 0 || s.chars().count() <= max_len {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_len).collect();
    format!("{truncated}…")
}

/// Escape or strip control characters so the result fits on one output line.
///
/// Newlines, carriage returns, and tabs become their visible escape form;
/// all other control characters are dropped.
pub fn sanitize(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
