//! Header fields: the text fragments that make up a line prefix.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::timestamp::{self, Timestamps};

/// Everything a field may draw on when rendering one line.
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
    /// Severity name of the message being emitted
    pub severity: &'a str,
    /// Name of the emitting logger
    pub logger: &'a str,
    /// Name of the calling thread
    pub thread: &'a str,
    /// Instant sampled once for the whole line
    pub now: DateTime<Utc>,
    /// Pattern lookup for timestamp fields
    pub timestamps: &'a Timestamps,
}

type RenderFn = dyn Fn(&FieldContext<'_>) -> String + Send + Sync;

#[derive(Clone)]
enum Kind {
    Literal(Arc<str>),
    Pattern(Arc<str>),
    Severity,
    Thread,
    Logger,
    Custom(Arc<RenderFn>),
}

/// One fragment of a header.
#[derive(Clone)]
pub struct HeaderField {
    label: Arc<str>,
    kind: Kind,
}

impl HeaderField {
    /// Fixed text.
    pub fn literal(text: &str) -> Self {
        Self {
            label: Arc::from(text),
            kind: Kind::Literal(Arc::from(text)),
        }
    }

    /// The line's instant rendered with a registered timestamp pattern.
    ///
    /// Unregistered names fall back to the full timestamp at render time.
    pub fn pattern(name: &str) -> Self {
        Self {
            label: Arc::from(name),
            kind: Kind::Pattern(Arc::from(name)),
        }
    }

    /// Severity name, supplied per call rather than when the template is built.
    pub fn severity() -> Self {
        Self {
            label: Arc::from("severity"),
            kind: Kind::Severity,
        }
    }

    /// Name of the thread that made the log call.
    pub fn thread() -> Self {
        Self {
            label: Arc::from("thread"),
            kind: Kind::Thread,
        }
    }

    pub fn logger() -> Self {
        Self {
            label: Arc::from("logger"),
            kind: Kind::Logger,
        }
    }

    /// A user-supplied field.
    ///
    /// `render` runs while the owning logger's lock is held. It must not log
    /// through that logger, directly or via `tracing` when a
    /// [`FacadeLayer`](crate::FacadeLayer) for it is the subscriber: the lock
    /// is not reentrant and the call deadlocks.
    pub fn from_fn<F>(label: &str, render: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            label: Arc::from(label),
            kind: Kind::Custom(Arc::new(render)),
        }
    }

    /// Look up one of the default named fields.
    ///
    /// Names: `timestamp`, `date`, `time`, `severity`, `thread`, `logger`,
    /// `slash`, `dash`, `colon`, `space`.
    pub fn named(name: &str) -> Option<Self> {
        let field = match name.trim() {
            timestamp::TIMESTAMP => Self::pattern(timestamp::TIMESTAMP),
            timestamp::DATE => Self::pattern(timestamp::DATE),
            timestamp::TIME => Self::pattern(timestamp::TIME),
            "severity" => Self::severity(),
            "thread" => Self::thread(),
            "logger" => Self::logger(),
            "slash" => Self::literal("/"),
            "dash" => Self::literal("-"),
            "colon" => Self::literal(":"),
            "space" => Self::literal(" "),
            _ => return None,
        };
        Some(field)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn render(&self, ctx: &FieldContext<'_>) -> String {
        match &self.kind {
            Kind::Literal(text) => text.to_string(),
            Kind::Pattern(name) => ctx.timestamps.format_at(name, ctx.now),
            Kind::Severity => ctx.severity.to_string(),
            Kind::Thread => ctx.thread.to_string(),
            Kind::Logger => ctx.logger.to_string(),
            Kind::Custom(render) => render(ctx),
        }
    }
}

impl fmt::Debug for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HeaderField").field(&self.label).finish()
    }
}
