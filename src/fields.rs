//! Canonical field alias tables for auto-detecting well-known log fields.
//!
//! Aliases are ordered by frequency of use across frameworks (logrus, zap,
//! slog, pino, bunyan, structlog). First match wins during field extraction.
//! A config key override bypasses the table entirely.

/// Known aliases for timestamp fields.
pub const TIMESTAMP_ALIASES: &[&str] = &[
    "time",
    "ts",
    "timestamp",
    "@timestamp",
    "datetime",
    "date",
    "t",
    "logged_at",
    "created_at",
];

/// Known aliases for level/severity fields.
pub const LEVEL_ALIASES: &[&str] = &[
    "level",
    "severity",
    "loglevel",
    "log_level",
    "lvl",
    "priority",
    "log.level",
];

/// Known aliases for message fields.
pub const MESSAGE_ALIASES: &[&str] = &[
    "msg",
    "message",
    "text",
    "log",
    "body",
    "event",
    "short_message",
];

/// Look up the first matching alias key in a JSON object.
///
/// Returns the key name and removes it from the map if found. Removal uses
/// `shift_remove` so the insertion order of the remaining fields is
/// undisturbed.
pub fn find_and_remove(
    map: &mut serde_json::Map<String, serde_json::Value>,
    aliases: &[&str],
) -> Option<(String, serde_json::Value)> {
    for &alias in aliases {
        if let Some(val) = map.shift_remove(alias) {
            return Some((alias.to_string(), val));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_and_remove_first_match() {
        let mut map = serde_json::Map::new();
        map.insert("ts".to_string(), json!(1_234_567_890));
        map.insert("time".to_string(), json!("2026-01-01T00:00:00Z"));

        // "time" is first in TIMESTAMP_ALIASES, so it wins
        let result = find_and_remove(&mut map, TIMESTAMP_ALIASES);
        assert!(result.is_some());
        let (key, _val) = result.unwrap();
        assert_eq!(key, "time");
        // "time" removed from map
        assert!(!map.contains_key("time"));
        // "ts" still present
        assert!(map.contains_key("ts"));
    }

    #[test]
    fn test_find_and_remove_none() {
        let mut map = serde_json::Map::new();
        map.insert("foo".to_string(), json!("bar"));

        let result = find_and_remove(&mut map, TIMESTAMP_ALIASES);
        assert!(result.is_none());
    }

    #[test]
    fn test_find_and_remove_preserves_order_of_rest() {
        let mut map = serde_json::Map::new();
        map.insert("zebra".to_string(), json!(1));
        map.insert("level".to_string(), json!("info"));
        map.insert("alpha".to_string(), json!(2));

        let result = find_and_remove(&mut map, LEVEL_ALIASES);
        assert!(result.is_some());

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zebra", "alpha"]);
    }

    #[test]
    fn test_find_and_remove_empty_aliases() {
        let mut map = serde_json::Map::new();
        map.insert("foo".to_string(), json!("bar"));
        let result = find_and_remove(&mut map, &[]);
        assert!(result.is_none());
        // Map unchanged
        assert!(map.contains_key("foo"));
    }

    #[test]
    fn test_find_and_remove_returns_value() {
        let mut map = serde_json::Map::new();
        map.insert("severity".to_string(), json!("error"));
        let result = find_and_remove(&mut map, LEVEL_ALIASES);
        let (key, val) = result.unwrap();
        assert_eq!(key, "severity");
        assert_eq!(val, json!("error"));
        assert!(map.is_empty());
    }
}
