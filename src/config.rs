//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/jlv/config.toml` or `$XDG_CONFIG_HOME/jlv/config.toml`)
//! 3. Built-in defaults
//!
//! The resulting [`Config`] is immutable for the process lifetime and passed
//! by reference into the formatter and renderer — no ambient globals.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::{Cli, ColorMode};
use crate::error::JlvError;
use crate::level::Level;
use crate::substitute::Substitution;

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults (useful in tests and benchmarks).
#[derive(Debug, Clone)]
pub struct Config {
    /// Color output mode (auto/always/never).
    pub color_mode: ColorMode,
    /// Minimum log level to display; records below this are suppressed.
    pub min_level: Option<Level>,
    /// Custom JSON key for the message field (overrides alias table).
    pub message_key: Option<String>,
    /// Custom JSON key for the level field (overrides alias table).
    pub level_key: Option<String>,
    /// Custom JSON key for the timestamp field (overrides alias table).
    pub timestamp_key: Option<String>,
    /// Fields rendered first, in this order, before the remaining fields.
    pub prioritize: Vec<String>,
    /// Whitelist of extra fields to display (mutually exclusive with `exclude_fields`).
    pub include_fields: Option<Vec<String>>,
    /// Blacklist of extra fields to hide (mutually exclusive with `include_fields`).
    pub exclude_fields: Option<Vec<String>>,
    /// Output raw JSON instead of rendered text (for piping to other tools).
    pub json_output: bool,
    /// Maximum character length for extra field values before truncation. 0 = no limit.
    pub max_field_length: usize,
    /// Timestamp display format string (strftime-compatible).
    pub timestamp_format: String,
    /// Custom level name aliases mapping string → [`Level`].
    pub level_aliases: Option<HashMap<String, Level>>,
    /// Per-level color overrides (color name, see the palette documentation).
    pub level_colors: Option<HashMap<Level, String>>,
    /// Message placeholder substitution, when enabled.
    pub substitution: Option<Substitution>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            min_level: None,
            message_key: None,
            level_key: None,
            timestamp_key: None,
            prioritize: Vec::new(),
            include_fields: None,
            exclude_fields: None,
            json_output: false,
            max_field_length: 120,
            timestamp_format: "%H:%M:%S%.3f".to_string(),
            level_aliases: None,
            level_colors: None,
            substitution: None,
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, JlvError> {
        let mut config = Self::default();

        let config_path = cli.config.clone().unwrap_or_else(Self::default_config_path);
        if config_path.exists() {
            let file_config = FileConfig::load(&config_path)?;
            config.apply_file_config(file_config);
        }

        if let Some(color) = cli.color {
            config.color_mode = color;
        }

        if let Some(ref level_str) = cli.level {
            config.min_level = Level::from_str_loose(level_str);
        }

        if cli.message_key.is_some() {
            config.message_key.clone_from(&cli.message_key);
        }
        if cli.level_key.is_some() {
            config.level_key.clone_from(&cli.level_key);
        }
        if cli.timestamp_key.is_some() {
            config.timestamp_key.clone_from(&cli.timestamp_key);
        }
        if let Some(ref prioritize) = cli.prioritize {
            config.prioritize.clone_from(prioritize);
        }
        if cli.include_fields.is_some() {
            config.include_fields.clone_from(&cli.include_fields);
        }
        if cli.exclude_fields.is_some() {
            config.exclude_fields.clone_from(&cli.exclude_fields);
        }

        config.json_output = cli.json;
        if let Some(max_len) = cli.max_field_length {
            config.max_field_length = max_len;
        }

        if cli.substitute || cli.context_key.is_some() || cli.placeholder_format.is_some() {
            let context_key = cli
                .context_key
                .as_deref()
                .unwrap_or(Substitution::DEFAULT_CONTEXT_KEY);
            let placeholder = cli
                .placeholder_format
                .as_deref()
                .unwrap_or(Substitution::DEFAULT_PLACEHOLDER_FORMAT);
            config.substitution = Some(Substitution::new(context_key, placeholder)?);
        }

        Ok(config)
    }

    /// Color override for a level, if one was configured.
    pub fn level_color(&self, level: Level) -> Option<&str> {
        self.level_colors
            .as_ref()
            .and_then(|colors| colors.get(&level))
            .map(String::as_str)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/jlv/config.toml` or `~/.config/jlv/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("jlv").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("jlv")
                .join("config.toml")
        } else {
            PathBuf::from(".config/jlv/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) {
        if let Some(color) = file.color {
            self.color_mode = match color.as_str() {
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                _ => ColorMode::Auto,
            };
        }

        if let Some(level) = file.level {
            self.min_level = Level::from_str_loose(&level);
        }

        if let Some(format) = file.timestamp_format {
            self.timestamp_format = format;
        }

        if let Some(max_len) = file.max_field_length {
            self.max_field_length = max_len;
        }

        if let Some(prioritize) = file.prioritize {
            self.prioritize = prioritize;
        }

        if let Some(keys) = file.keys {
            if let Some(msg) = keys.message {
                self.message_key = Some(msg);
            }
            if let Some(lvl) = keys.level {
                self.level_key = Some(lvl);
            }
            if let Some(ts) = keys.timestamp {
                self.timestamp_key = Some(ts);
            }
        }

        if let Some(levels) = file.levels {
            let mut aliases = HashMap::new();
            for (key, value) in levels {
                if let Some(level) = Level::from_str_loose(&value) {
                    aliases.insert(key.to_lowercase(), level);
                }
            }
            if !aliases.is_empty() {
                self.level_aliases = Some(aliases);
            }
        }

        if let Some(colors) = file.colors {
            let mut overrides = HashMap::new();
            for (key, value) in colors {
                if let Some(level) = Level::from_str_loose(&key) {
                    overrides.insert(level, value);
                }
            }
            if !overrides.is_empty() {
                self.level_colors = Some(overrides);
            }
        }
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Deserialize)]
struct FileConfig {
    color: Option<String>,
    level: Option<String>,
    timestamp_format: Option<String>,
    max_field_length: Option<usize>,
    prioritize: Option<Vec<String>>,
    keys: Option<KeysConfig>,
    levels: Option<HashMap<String, String>>,
    colors: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct KeysConfig {
    message: Option<String>,
    level: Option<String>,
    timestamp: Option<String>,
}

impl FileConfig {
    fn load(path: &PathBuf) -> Result<Self, JlvError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JlvError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
