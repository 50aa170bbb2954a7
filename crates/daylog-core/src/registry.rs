//! Name-keyed logger registry.
//!
//! At most one [`Logger`] exists per name in a registry. Prefer handing
//! `Arc<Logger>` values to the code that needs them; [`Registry::latest`]
//! and [`Registry::global`] exist for call sites that have no logger of
//! their own, such as a library borrowing its host application's logger.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::error::LogResult;
use crate::format::SchemeRegistry;
use crate::logger::{Logger, LoggerDefaults};
use crate::settings::SettingsStore;
use crate::timestamp::Timestamps;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Multiton of named loggers.
pub struct Registry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    latest: Mutex<Option<Arc<Logger>>>,
    defaults: LoggerDefaults,
    clock: Arc<dyn Clock>,
    timestamps: Arc<Timestamps>,
}

impl Registry {
    /// Registry handing out loggers with the built-in defaults.
    pub fn new() -> Self {
        Self::with_defaults(LoggerDefaults::default())
    }

    pub fn with_defaults(defaults: LoggerDefaults) -> Self {
        Self::with_clock(defaults, Arc::new(SystemClock))
    }

    pub fn with_clock(defaults: LoggerDefaults, clock: Arc<dyn Clock>) -> Self {
        Self {
            loggers: Mutex::new(HashMap::new()),
            latest: Mutex::new(None),
            defaults,
            clock,
            timestamps: Arc::new(Timestamps::new()),
        }
    }

    /// Registry seeded from a settings store.
    ///
    /// Missing settings are written back with their defaults.
    pub fn from_store(store: &mut SettingsStore, schemes: &SchemeRegistry) -> LogResult<Self> {
        let defaults = LoggerDefaults::from_store(store, schemes)?;
        Ok(Self::with_defaults(defaults))
    }

    /// Process-wide registry with built-in defaults.
    ///
    /// A fallback for code that cannot be handed a registry or logger.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    pub fn defaults(&self) -> &LoggerDefaults {
        &self.defaults
    }

    /// Timestamp patterns shared by every logger of this registry.
    pub fn timestamps(&self) -> &Arc<Timestamps> {
        &self.timestamps
    }

    /// Return the logger named `name`, creating it on first use.
    ///
    /// The lookup and the creation happen under one lock, so concurrent
    /// callers always receive the same instance.
    pub fn get_or_create(&self, name: &str) -> Arc<Logger> {
        let (logger, created) = {
            let mut loggers = self.loggers.lock();
            let mut created = false;
            let logger = loggers
                .entry(name.to_string())
                .or_insert_with(|| {
                    created = true;
                    Arc::new(Logger::with_clock(
                        name,
                        &self.defaults,
                        self.clock.clone(),
                        self.timestamps.clone(),
                    ))
                })
                .clone();
            *self.latest.lock() = Some(logger.clone());
            (logger, created)
        };

        if created {
            tracing::debug!(logger = name, "logger created");
        }
        logger
    }

    /// Existing logger named `name`. Does not touch [`latest`](Self::latest).
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.lock().get(name).cloned()
    }

    /// The logger most recently returned by [`get_or_create`](Self::get_or_create).
    pub fn latest(&self) -> Option<Arc<Logger>> {
        self.latest.lock().clone()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;

    #[test]
    fn test_same_name_same_instance() {
        let registry = Registry::new();
        let a = registry.get_or_create("app");
        let b = registry.get_or_create("app");
        let other = registry.get_or_create("db");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &other));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["app", "db"]);
    }

    #[test]
    fn test_configuration_persists_across_lookups() {
        let registry = Registry::new();
        registry.get_or_create("app").set_threshold(Severity::Trace);
        assert_eq!(registry.get_or_create("app").threshold(), Severity::Trace);
    }

    #[test]
    fn test_latest_tracks_get_or_create() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.latest().is_none());

        let app = registry.get_or_create("app");
        let db = registry.get_or_create("db");
        assert!(Arc::ptr_eq(&registry.latest().unwrap(), &db));

        // Fetching an existing logger also counts as use.
        registry.get_or_create("app");
        assert!(Arc::ptr_eq(&registry.latest().unwrap(), &app));

        // Plain lookups do not.
        registry.get("db").unwrap();
        assert!(Arc::ptr_eq(&registry.latest().unwrap(), &app));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registries_are_isolated() {
        let first = Registry::new();
        let second = Registry::new();
        assert!(!Arc::ptr_eq(&first.get_or_create("app"), &second.get_or_create("app")));
    }

    #[test]
    fn test_global_is_shared() {
        let a = Registry::global().get_or_create("registry-global-test");
        let b = Registry::global().get_or_create("registry-global-test");
        assert!(Arc::ptr_eq(&a, &b));
    }
}
