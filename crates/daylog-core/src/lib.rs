//! Daylog Core Library
//!
//! Named loggers with severity gating, a buildable line-prefix format, and
//! console plus one-file-per-day output.
//!
//! ## Overview
//!
//! ```text
//! caller ──▶ Facade ──▶ Logger ──▶ FormatTemplate + Timestamps ──▶ Sink
//!            (gate,      (gate,      (header: "[time] [thread/      (console,
//!             template)   lock)       severity]")                   day file)
//! ```
//!
//! - Loggers are obtained from a [`Registry`], which hands out exactly one
//!   instance per name.
//! - Every configuration change and every emitted line on a logger is
//!   serialized by that logger's lock.
//! - Lines go to `<directory>/<name> - <YYYY-MM-DD>.log`; the date is taken
//!   at write time, so a new day starts a new file without any rollover step.
//! - Emitting never fails: file errors are reported on the logger's
//!   diagnostic stream. Only configuration calls return [`LogError`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use daylog_core::{Facade, Registry, Severity};
//!
//! let registry = Registry::new();
//! let logger = registry.get_or_create("app");
//! logger.set_threshold(Severity::Debug);
//! logger.set_directory("logs")?;
//!
//! logger.success("started");
//!
//! let log = Facade::new(logger);
//! log.debug_2("{} of {} workers ready", &3, &4);
//! # Ok::<(), daylog_core::LogError>(())
//! ```

pub mod clock;
pub mod error;
pub mod facade;
pub mod format;
pub mod logger;
pub mod registry;
pub mod settings;
pub mod severity;
pub mod sink;
pub mod timestamp;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LogError, LogResult};
pub use facade::{Facade, FacadeLayer, Marker};
pub use format::{FieldContext, FormatBuilder, FormatTemplate, HeaderField, SchemeRegistry};
pub use logger::{log_file_path, Logger, LoggerDefaults, NamingScheme};
pub use registry::Registry;
pub use settings::SettingsStore;
pub use severity::{Color, Severity};
pub use sink::{SharedBuffer, Sink};
pub use timestamp::Timestamps;
