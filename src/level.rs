//! Log level representation with parsing, display, and colorization.
//!
//! Supports both string-based levels (e.g., `"info"`, `"warn"`) and numeric
//! levels used by frameworks like bunyan and pino (e.g., 30 = info, 40 = warn).
//! Includes aliases from major logging frameworks for case-insensitive matching.
//!
//! A level field keeps its source text: recognized levels render that text
//! with the palette color applied, unrecognized levels render the raw string
//! uncolored. Nothing is replaced by a blank placeholder.

use std::fmt;

use owo_colors::Style;

/// Canonical log level enumeration.
///
/// Ordered by severity (ascending) for `>=` filtering via [`Ord`].
/// Each variant has a numeric discriminant matching the bunyan/pino convention:
/// - [`Trace`](Self::Trace) = 10
/// - [`Debug`](Self::Debug) = 20
/// - [`Info`](Self::Info) = 30
/// - [`Warn`](Self::Warn) = 40
/// - [`Error`](Self::Error) = 50
/// - [`Fatal`](Self::Fatal) = 60
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace = 10,
    Debug = 20,
    Info = 30,
    Warn = 40,
    Error = 50,
    Fatal = 60,
}

/// A level field as it appeared in the source record.
///
/// `raw` is the text rendered to the user; `level` is the canonical
/// classification used for styling and minimum-level filtering, `None` when
/// the value did not match the closed enumeration.
#[derive(Debug, Clone)]
pub struct LevelField {
    pub level: Option<Level>,
    pub raw: String,
}

impl LevelField {
    /// Extract a level field from a [`serde_json::Value`].
    ///
    /// - Strings match the alias tables (custom aliases first) case-insensitively;
    ///   the source spelling is preserved as `raw`.
    /// - Numbers classify via the bunyan/pino convention and display the
    ///   canonical level name.
    /// - `null` is treated as absent.
    /// - Other shapes keep their compact JSON text, unclassified.
    pub fn from_json_value(
        value: &serde_json::Value,
        custom_aliases: Option<&std::collections::HashMap<String, Level>>,
    ) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => {
                let level = custom_aliases
                    .and_then(|aliases| aliases.get(&s.to_lowercase()).copied())
                    .or_else(|| Level::from_str_loose(s));
                Some(Self {
                    level,
                    raw: s.clone(),
                })
            }
            serde_json::Value::Number(n) => {
                #[allow(clippy::cast_possible_truncation)]
                let numeric = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
                let level = Level::from_numeric(numeric);
                Some(Self {
                    level: Some(level),
                    raw: level.name().to_string(),
                })
            }
            serde_json::Value::Null => None,
            other => Some(Self {
                level: None,
                raw: other.to_string(),
            }),
        }
    }
}

impl Level {
    /// Canonical lowercase name for the level.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Returns the [`Style`] for this level's text when colors are enabled.
    ///
    /// Palette:
    /// - Trace: cyan bold
    /// - Debug: blue bold
    /// - Info: green bold
    /// - Warn: yellow bold
    /// - Error: red bold
    /// - Fatal: magenta bold
    pub const fn style(self) -> Style {
        match self {
            Self::Trace => Style::new().cyan().bold(),
            Self::Debug => Style::new().blue().bold(),
            Self::Info => Style::new().green().bold(),
            Self::Warn => Style::new().yellow().bold(),
            Self::Error => Style::new().red().bold(),
            Self::Fatal => Style::new().magenta().bold(),
        }
    }

    /// Returns the [`Style`] for this level, using a custom color if provided.
    ///
    /// If `custom_color` is `None`, falls back to the default palette.
    pub fn style_with_color(self, custom_color: Option<&str>) -> Style {
        match custom_color {
            Some(color) => color_name_to_style(color),
            None => self.style(),
        }
    }

    /// Parse a string into a [`Level`], case-insensitive.
    ///
    /// Returns `None` for unrecognized strings.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" | "trc" => Some(Self::Trace),
            "debug" | "dbg" => Some(Self::Debug),
            "info" | "inf" | "information" => Some(Self::Info),
            "warn" | "warning" | "wrn" => Some(Self::Warn),
            "error" | "err" | "fatal_error" => Some(Self::Error),
            "fatal" | "critical" | "crit" | "panic" | "emerg" | "emergency" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Parse a numeric value into a [`Level`] using nearest-match rounding.
    ///
    /// Uses bunyan/pino numeric convention:
    /// - 10 = trace, 20 = debug, 30 = info, 40 = warn, 50 = error, 60 = fatal
    pub const fn from_numeric(n: i64) -> Self {
        match n {
            ..=14 => Self::Trace,
            15..=24 => Self::Debug,
            25..=34 => Self::Info,
            35..=44 => Self::Warn,
            45..=54 => Self::Error,
            55.. => Self::Fatal,
        }
    }
}

/// Convert a color name string to an [`owo_colors::Style`].
///
/// Supports standard ANSI colors and bright variants. All styles are bold.
/// Unknown colors fall back to white bold.
fn color_name_to_style(color: &str) -> Style {
    match color.to_lowercase().as_str() {
        "black" => Style::new().black().bold(),
        "red" => Style::new().red().bold(),
        "green" => Style::new().green().bold(),
        "yellow" => Style::new().yellow().bold(),
        "blue" => Style::new().blue().bold(),
        "magenta" | "purple" => Style::new().magenta().bold(),
        "cyan" => Style::new().cyan().bold(),
        "bright_black" => Style::new().bright_black().bold(),
        "bright_red" => Style::new().bright_red().bold(),
        "bright_green" => Style::new().bright_green().bold(),
        "bright_yellow" => Style::new().bright_yellow().bold(),
        "bright_blue" => Style::new().bright_blue().bold(),
        "bright_magenta" => Style::new().bright_magenta().bold(),
        "bright_cyan" => Style::new().bright_cyan().bold(),
        "bright_white" => Style::new().bright_white().bold(),
        // "white" and unknown colors
        _ => Style::new().white().bold(),
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_loose_basic() {
        assert_eq!(Level::from_str_loose("info"), Some(Level::Info));
        assert_eq!(Level::from_str_loose("INFO"), Some(Level::Info));
        assert_eq!(Level::from_str_loose("Info"), Some(Level::Info));
        assert_eq!(Level::from_str_loose("warn"), Some(Level::Warn));
        assert_eq!(Level::from_str_loose("WARNING"), Some(Level::Warn));
        assert_eq!(Level::from_str_loose("error"), Some(Level::Error));
        assert_eq!(Level::from_str_loose("debug"), Some(Level::Debug));
        assert_eq!(Level::from_str_loose("trace"), Some(Level::Trace));
        assert_eq!(Level::from_str_loose("fatal"), Some(Level::Fatal));
        assert_eq!(Level::from_str_loose("critical"), Some(Level::Fatal));
        assert_eq!(Level::from_str_loose("panic"), Some(Level::Fatal));
    }

    #[test]
    fn test_from_str_loose_unknown() {
        assert_eq!(Level::from_str_loose("verbose"), None);
        assert_eq!(Level::from_str_loose(""), None);
        assert_eq!(Level::from_str_loose("nonsense"), None);
    }

    #[test]
    fn test_from_numeric() {
        assert_eq!(Level::from_numeric(10), Level::Trace);
        assert_eq!(Level::from_numeric(20), Level::Debug);
        assert_eq!(Level::from_numeric(30), Level::Info);
        assert_eq!(Level::from_numeric(40), Level::Warn);
        assert_eq!(Level::from_numeric(50), Level::Error);
        assert_eq!(Level::from_numeric(60), Level::Fatal);
    }

    #[test]
    fn test_from_numeric_boundaries() {
        assert_eq!(Level::from_numeric(14), Level::Trace);
        assert_eq!(Level::from_numeric(15), Level::Debug);
        assert_eq!(Level::from_numeric(24), Level::Debug);
        assert_eq!(Level::from_numeric(25), Level::Info);
        assert_eq!(Level::from_numeric(44), Level::Warn);
        assert_eq!(Level::from_numeric(45), Level::Error);
        assert_eq!(Level::from_numeric(55), Level::Fatal);
        assert_eq!(Level::from_numeric(i64::MIN), Level::Trace);
        assert_eq!(Level::from_numeric(i64::MAX), Level::Fatal);
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_field_preserves_source_spelling() {
        let val = serde_json::Value::String("ERROR".to_string());
        let field = LevelField::from_json_value(&val, None).unwrap();
        assert_eq!(field.level, Some(Level::Error));
        assert_eq!(field.raw, "ERROR");
    }

    #[test]
    fn test_field_unrecognized_keeps_raw() {
        let val = serde_json::Value::String("verbose".to_string());
        let field = LevelField::from_json_value(&val, None).unwrap();
        assert!(field.level.is_none());
        assert_eq!(field.raw, "verbose");
    }

    #[test]
    fn test_field_numeric_uses_canonical_name() {
        let val = serde_json::json!(30);
        let field = LevelField::from_json_value(&val, None).unwrap();
        assert_eq!(field.level, Some(Level::Info));
        assert_eq!(field.raw, "info");
    }

    #[test]
    fn test_field_null_is_absent() {
        assert!(LevelField::from_json_value(&serde_json::json!(null), None).is_none());
    }

    #[test]
    fn test_field_custom_alias() {
        let mut aliases = std::collections::HashMap::new();
        aliases.insert("verbose".to_string(), Level::Debug);
        let val = serde_json::Value::String("verbose".to_string());
        let field = LevelField::from_json_value(&val, Some(&aliases)).unwrap();
        assert_eq!(field.level, Some(Level::Debug));
        assert_eq!(field.raw, "verbose");
    }

    #[test]
    fn test_field_float_truncation() {
        // 29.9 as f64 cast to i64 = 29, which is in the Info range (25..=34)
        let val = serde_json::json!(29.9);
        let field = LevelField::from_json_value(&val, None).unwrap();
        assert_eq!(field.level, Some(Level::Info));
    }

    #[test]
    fn test_field_bool_unclassified() {
        let field = LevelField::from_json_value(&serde_json::json!(true), None).unwrap();
        assert!(field.level.is_none());
        assert_eq!(field.raw, "true");
    }

    #[test]
    fn test_display_is_canonical_name() {
        assert_eq!(Level::Warn.to_string(), "warn");
    }
}
