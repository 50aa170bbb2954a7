//! Named timestamp patterns.
//!
//! Patterns are strftime strings validated once at registration. A stored
//! pattern is never modified afterwards, so lookups hand out shared
//! `Arc<str>` values and formatting happens outside any lock.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::{LogError, LogResult};

/// Full date and time, e.g. `2026-01-21 14:30:45`.
pub const TIMESTAMP: &str = "timestamp";
/// Date only, e.g. `2026-01-21`.
pub const DATE: &str = "date";
/// Time only, e.g. `14:30:45`.
pub const TIME: &str = "time";

const BUILTIN: [(&str, &str); 3] = [
    (TIMESTAMP, "%Y-%m-%d %H:%M:%S"),
    (DATE, "%Y-%m-%d"),
    (TIME, "%H:%M:%S"),
];

/// Registry of named timestamp formatters.
#[derive(Debug)]
pub struct Timestamps {
    patterns: RwLock<HashMap<String, Arc<str>>>,
}

impl Timestamps {
    /// Create a service holding the `timestamp`, `date` and `time` patterns.
    pub fn new() -> Self {
        let patterns = BUILTIN
            .iter()
            .map(|(name, pattern)| (name.to_string(), Arc::from(*pattern)))
            .collect();
        Self {
            patterns: RwLock::new(patterns),
        }
    }

    /// Register (or replace) a custom pattern under `name`.
    pub fn register(&self, name: impl Into<String>, pattern: &str) -> LogResult<()> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LogError::InvalidPattern(pattern.to_string()));
        }
        self.patterns.write().insert(name.into(), Arc::from(pattern));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.read().contains_key(name)
    }

    /// Pattern string for `name`, falling back to the full timestamp.
    pub fn pattern(&self, name: &str) -> Arc<str> {
        let patterns = self.patterns.read();
        match patterns.get(name) {
            Some(p) => p.clone(),
            None => patterns
                .get(TIMESTAMP)
                .cloned()
                .unwrap_or_else(|| Arc::from(BUILTIN[0].1)),
        }
    }

    /// Current UTC instant rendered with the named pattern.
    pub fn format(&self, name: &str) -> String {
        self.format_at(name, Utc::now())
    }

    /// `instant` rendered with the named pattern.
    pub fn format_at(&self, name: &str, instant: DateTime<Utc>) -> String {
        let pattern = self.pattern(name);
        let mut out = String::new();
        // Patterns are validated on registration; a failure here leaves the partial output.
        let _ = write!(out, "{}", instant.format(&pattern));
        out
    }
}

impl Default for Timestamps {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 21, 14, 30, 45).unwrap()
    }

    #[test]
    fn test_builtin_patterns() {
        let ts = Timestamps::new();
        assert_eq!(ts.format_at(TIMESTAMP, instant()), "2026-01-21 14:30:45");
        assert_eq!(ts.format_at(DATE, instant()), "2026-01-21");
        assert_eq!(ts.format_at(TIME, instant()), "14:30:45");
    }

    #[test]
    fn test_unknown_name_falls_back_to_timestamp() {
        let ts = Timestamps::new();
        assert_eq!(ts.format_at("nope", instant()), "2026-01-21 14:30:45");
    }

    #[test]
    fn test_format_uses_current_instant() {
        let ts = Timestamps::new();
        let before = Utc::now() - chrono::Duration::seconds(1);
        // Unknown names fall back to the full timestamp pattern.
        let rendered = ts.format("nope");
        let after = Utc::now() + chrono::Duration::seconds(1);

        let parsed = chrono::NaiveDateTime::parse_from_str(&rendered, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc();
        assert!(before <= parsed && parsed <= after, "{} outside window", rendered);
    }

    #[test]
    fn test_register_custom_pattern() {
        let ts = Timestamps::new();
        ts.register("compact", "%Y%m%dT%H%M").unwrap();
        assert!(ts.contains("compact"));
        assert_eq!(ts.format_at("compact", instant()), "20260121T1430");
        // Existing lookups are unaffected.
        assert_eq!(ts.format_at(TIME, instant()), "14:30:45");
    }

    #[test]
    fn test_register_rejects_invalid_pattern() {
        let ts = Timestamps::new();
        let err = ts.register("broken", "%Q").unwrap_err();
        assert!(matches!(err, LogError::InvalidPattern(_)));
        assert!(!ts.contains("broken"));
    }

    #[test]
    fn test_shared_across_threads() {
        let ts = Arc::new(Timestamps::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ts = ts.clone();
                std::thread::spawn(move || {
                    ts.register(format!("p{}", i), "%H").unwrap();
                    ts.format_at(DATE, instant())
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), "2026-01-21");
        }
        assert!(ts.contains("p3"));
    }
}
