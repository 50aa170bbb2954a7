//! Consumer-facing logging interface.
//!
//! [`Facade`] wraps one [`Logger`] and exposes, for every severity, the
//! usual matrix of entry points: an is-enabled predicate, a plain message,
//! `{}` templates with one, two or any number of arguments, an error
//! attachment, and marker-qualified versions of each. The matrix is
//! generated from a table over four primitives:
//!
//! ```text
//! gate        Facade::is_enabled         threshold check, before anything else
//! substitute  template::substitute       fill `{}` placeholders
//! compose     compose()                  "(marker) " prefix, " [Type: msg]" suffix
//! emit        Logger::log                header, console, day file
//! ```
//!
//! Template arguments are `&dyn Display` and are only rendered once the
//! gate has passed.
//!
//! [`FacadeLayer`] puts the same logger behind the `tracing` macros.

mod layer;
pub mod template;

pub use layer::{FacadeLayer, MARKER_FIELD};

use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;

use crate::logger::Logger;
use crate::severity::Severity;

/// A named tag qualifying a message, rendered as `(<name>) `.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    name: String,
}

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Error details attached to a message.
struct Attachment {
    kind: &'static str,
    message: String,
}

impl Attachment {
    fn of<E: Error + ?Sized>(err: &E) -> Self {
        Self {
            kind: short_type_name(std::any::type_name::<E>()),
            message: err.to_string(),
        }
    }
}

/// Last path segment of a type name, without generic arguments.
///
/// Trait objects render as their principal trait, so a
/// `dyn Error + Send + Sync` is reported as `Error`.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.strip_prefix("dyn ").unwrap_or(full);
    let base = base.split(" + ").next().unwrap_or(base);
    let base = base.split('<').next().unwrap_or(base);
    base.rsplit("::").next().unwrap_or(base)
}

fn compose(marker: Option<&Marker>, message: &str, attachment: Option<&Attachment>) -> String {
    let mut text = String::with_capacity(message.len() + 32);
    if let Some(marker) = marker {
        text.push('(');
        text.push_str(marker.name());
        text.push_str(") ");
    }
    text.push_str(message);
    if let Some(attachment) = attachment {
        text.push_str(" [");
        text.push_str(attachment.kind);
        text.push_str(": ");
        text.push_str(&attachment.message);
        text.push(']');
    }
    text
}

/// Logging interface bound to one logger.
#[derive(Debug, Clone)]
pub struct Facade {
    logger: Arc<Logger>,
}

impl Facade {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn name(&self) -> &str {
        self.logger.name()
    }

    /// Gate check against the logger's current threshold.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.logger.is_enabled(severity)
    }

    /// Generic entry point behind every generated method.
    ///
    /// With no arguments the message is used verbatim; otherwise it is a
    /// `{}` template.
    pub fn log(&self, severity: Severity, marker: Option<&Marker>, message: &str, args: &[&dyn Display]) {
        if !self.is_enabled(severity) {
            return;
        }
        let text = if args.is_empty() {
            compose(marker, message, None)
        } else {
            compose(marker, &template::substitute(message, args), None)
        };
        self.logger.log(&text, severity, severity.color());
    }

    /// Log `message` with `err` appended as `[<type>: <message>]`.
    pub fn log_error<E: Error + ?Sized>(&self, severity: Severity, marker: Option<&Marker>, message: &str, err: &E) {
        if !self.is_enabled(severity) {
            return;
        }
        let text = compose(marker, message, Some(&Attachment::of(err)));
        self.logger.log(&text, severity, severity.color());
    }
}

/// Generates the per-severity method matrix from one row per severity.
macro_rules! facade_methods {
    ($(
        $severity:expr => [
            $enabled:ident, $msg:ident, $one:ident, $two:ident, $args:ident, $err:ident,
            $m_msg:ident, $m_one:ident, $m_two:ident, $m_args:ident, $m_err:ident $(,)?
        ]
    ),* $(,)?) => {
        impl Facade {
            $(
                pub fn $enabled(&self) -> bool {
                    self.is_enabled($severity)
                }

                pub fn $msg(&self, msg: &str) {
                    self.log($severity, None, msg, &[]);
                }

                pub fn $one(&self, format: &str, arg: &dyn Display) {
                    self.log($severity, None, format, &[arg]);
                }

                pub fn $two(&self, format: &str, arg1: &dyn Display, arg2: &dyn Display) {
                    self.log($severity, None, format, &[arg1, arg2]);
                }

                pub fn $args(&self, format: &str, args: &[&dyn Display]) {
                    self.log($severity, None, format, args);
                }

                pub fn $err<E: Error + ?Sized>(&self, msg: &str, err: &E) {
                    self.log_error($severity, None, msg, err);
                }

                pub fn $m_msg(&self, marker: &Marker, msg: &str) {
                    self.log($severity, Some(marker), msg, &[]);
                }

                pub fn $m_one(&self, marker: &Marker, format: &str, arg: &dyn Display) {
                    self.log($severity, Some(marker), format, &[arg]);
                }

                pub fn $m_two(&self, marker: &Marker, format: &str, arg1: &dyn Display, arg2: &dyn Display) {
                    self.log($severity, Some(marker), format, &[arg1, arg2]);
                }

                pub fn $m_args(&self, marker: &Marker, format: &str, args: &[&dyn Display]) {
                    self.log($severity, Some(marker), format, args);
                }

                pub fn $m_err<E: Error + ?Sized>(&self, marker: &Marker, msg: &str, err: &E) {
                    self.log_error($severity, Some(marker), msg, err);
                }
            )*
        }
    };
}

facade_methods! {
    Severity::Fatal => [
        is_fatal_enabled, fatal, fatal_1, fatal_2, fatal_args, fatal_error,
        fatal_marked, fatal_marked_1, fatal_marked_2, fatal_marked_args, fatal_marked_error,
    ],
    Severity::Error => [
        is_error_enabled, error, error_1, error_2, error_args, error_error,
        error_marked, error_marked_1, error_marked_2, error_marked_args, error_marked_error,
    ],
    Severity::Warning => [
        is_warning_enabled, warning, warning_1, warning_2, warning_args, warning_error,
        warning_marked, warning_marked_1, warning_marked_2, warning_marked_args, warning_marked_error,
    ],
    Severity::Success => [
        is_success_enabled, success, success_1, success_2, success_args, success_error,
        success_marked, success_marked_1, success_marked_2, success_marked_args, success_marked_error,
    ],
    Severity::Info => [
        is_info_enabled, info, info_1, info_2, info_args, info_error,
        info_marked, info_marked_1, info_marked_2, info_marked_args, info_marked_error,
    ],
    Severity::Debug => [
        is_debug_enabled, debug, debug_1, debug_2, debug_args, debug_error,
        debug_marked, debug_marked_1, debug_marked_2, debug_marked_args, debug_marked_error,
    ],
    Severity::Trace => [
        is_trace_enabled, trace, trace_1, trace_2, trace_args, trace_error,
        trace_marked, trace_marked_1, trace_marked_2, trace_marked_args, trace_marked_error,
    ],
}
