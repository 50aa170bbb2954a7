//! Tracing Layer that forwards events to a [`Facade`].
//!
//! Installing the layer lets code written against the `tracing` macros log
//! through a daylog logger. The logger's threshold is consulted in
//! [`Layer::enabled`], so suppressed events never have their fields
//! evaluated, and callsites register as `sometimes` so a threshold change
//! takes effect on the very next event.

use std::fmt::Write as FmtWrite;

use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use super::{Facade, Marker};
use crate::severity::Severity;

/// Field whose value becomes the message marker.
pub const MARKER_FIELD: &str = "marker";

/// A tracing Layer writing events through a daylog logger.
pub struct FacadeLayer {
    facade: Facade,
}

impl FacadeLayer {
    pub fn new(facade: Facade) -> Self {
        Self { facade }
    }

    pub fn facade(&self) -> &Facade {
        &self.facade
    }
}

fn severity_for(level: &Level) -> Severity {
    if *level == Level::ERROR {
        Severity::Error
    } else if *level == Level::WARN {
        Severity::Warning
    } else if *level == Level::INFO {
        Severity::Info
    } else if *level == Level::DEBUG {
        Severity::Debug
    } else {
        Severity::Trace
    }
}

impl<S> Layer<S> for FacadeLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        metadata.is_span() || self.facade.is_enabled(severity_for(metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let severity = severity_for(event.metadata().level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let mut message = String::new();
        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<String> = scope.from_root().map(|span| span.name().to_string()).collect();
            if !spans.is_empty() {
                let _ = write!(message, "{}: ", spans.join(" > "));
            }
        }
        message.push_str(visitor.message.as_deref().unwrap_or_default());
        message.push_str(&visitor.fields);

        let marker = visitor.marker.map(Marker::new);
        self.facade.log(severity, marker.as_ref(), &message, &[]);
    }
}

/// Collects the message, the marker and the remaining fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    marker: Option<String>,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, field: &Field, value: &dyn std::fmt::Display) {
        let _ = write!(self.fields, " {}={}", field.name(), value);
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);

        match field.name() {
            "message" => self.message = Some(buf),
            MARKER_FIELD => self.marker = Some(buf),
            _ => self.push_field(field, &buf),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            MARKER_FIELD => self.marker = Some(value.to_string()),
            _ => self.push_field(field, &value),
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push_field(field, &value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatTemplate;
    use crate::logger::{Logger, LoggerDefaults};
    use crate::sink::SharedBuffer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::prelude::*;

    fn layer() -> (FacadeLayer, SharedBuffer) {
        let defaults = LoggerDefaults {
            ansi: false,
            use_file: false,
            template: FormatTemplate::empty(),
            ..LoggerDefaults::default()
        };
        let logger = Arc::new(Logger::new("tracing", &defaults));
        let console = SharedBuffer::new();
        logger.set_console(Box::new(console.clone()));
        (FacadeLayer::new(Facade::new(logger)), console)
    }

    #[test]
    fn test_layer_forwards_events() {
        let (layer, console) = layer();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Test message");
            tracing::warn!(count = 42, "Warning with field");
            tracing::error!(marker = "AUDIT", "denied");
            tracing::debug!("below threshold");
        });

        assert_eq!(
            console.contents(),
            "Test message\nWarning with field count=42\n(AUDIT) denied\n"
        );
    }

    #[test]
    fn test_layer_includes_span_scope() {
        let (layer, console) = layer();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("sync");
            let _guard = span.enter();
            tracing::info!("inside");
        });

        assert_eq!(console.contents(), "sync: inside\n");
    }

    #[test]
    fn test_threshold_changes_apply_immediately() {
        let (layer, console) = layer();
        let logger = layer.facade().logger().clone();
        let subscriber = tracing_subscriber::registry().with(layer);

        static EVALUATED: AtomicUsize = AtomicUsize::new(0);
        fn expensive() -> usize {
            EVALUATED.fetch_add(1, Ordering::SeqCst)
        }

        tracing::subscriber::with_default(subscriber, || {
            for _ in 0..2 {
                tracing::debug!(value = expensive(), "tick");
                logger.set_threshold(Severity::Debug);
            }
        });

        assert_eq!(EVALUATED.load(Ordering::SeqCst), 1);
        assert_eq!(console.contents(), "tick value=0\n");
    }
}
