//! Named format schemes.
//!
//! A scheme is a factory producing a [`FormatTemplate`]. The three presets
//! are registered up front; hosts add their own with [`SchemeRegistry::register`]
//! and select one by name from settings.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::field::HeaderField;
use super::template::{FormatBuilder, FormatTemplate};

pub const MINIMAL: &str = "minimal";
pub const DEFAULT: &str = "default";
pub const COMPLETE: &str = "complete";

type SchemeFactory = dyn Fn() -> FormatTemplate + Send + Sync;

/// `[severity]`
pub fn minimal() -> FormatTemplate {
    FormatBuilder::new().field(HeaderField::severity()).build()
}

/// `[time] [thread/severity]`
pub fn default_scheme() -> FormatTemplate {
    FormatBuilder::new()
        .field(HeaderField::pattern(crate::timestamp::TIME))
        .close_section()
        .field(HeaderField::thread())
        .literal("/")
        .field(HeaderField::severity())
        .build()
}

/// `[timestamp] [logger] [thread/severity]`
pub fn complete() -> FormatTemplate {
    FormatBuilder::new()
        .field(HeaderField::pattern(crate::timestamp::TIMESTAMP))
        .close_section()
        .field(HeaderField::logger())
        .close_section()
        .field(HeaderField::thread())
        .literal("/")
        .field(HeaderField::severity())
        .build()
}

/// Scheme name to template factory.
pub struct SchemeRegistry {
    schemes: RwLock<HashMap<String, Arc<SchemeFactory>>>,
}

impl SchemeRegistry {
    /// A registry holding the `minimal`, `default` and `complete` presets.
    pub fn new() -> Self {
        let registry = Self {
            schemes: RwLock::new(HashMap::new()),
        };
        registry.register(MINIMAL, minimal);
        registry.register(DEFAULT, default_scheme);
        registry.register(COMPLETE, complete);
        registry
    }

    /// Add or replace a scheme.
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> FormatTemplate + Send + Sync + 'static,
    {
        self.schemes.write().insert(name.into(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemes.read().contains_key(name)
    }

    /// Build the template for `name`, or `None` when it is not registered.
    pub fn build(&self, name: &str) -> Option<FormatTemplate> {
        let factory = self.schemes.read().get(name).cloned()?;
        Some(factory())
    }

    /// Registered scheme names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.schemes.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
