//! crates/logging/src/tracing_bridge.rs
//! Forwarding of `tracing` events into a [`Log`] implementor.
//!
//! Libraries that emit through the `tracing` macros can share a scoped
//! logger's destinations and level mask by installing [`ScopedLayer`] on a
//! subscriber. Event levels map onto logger levels as follows:
//!
//! | tracing | logger   |
//! |---------|----------|
//! | TRACE   | `TRACE`  |
//! | DEBUG   | `DEBUG0` |
//! | INFO    | `INFO`   |
//! | WARN    | `WARN`   |
//! | ERROR   | `ERROR`  |
//!
//! The rendered message is the event's `message` field followed by its
//! remaining fields as `name=value` pairs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logging::{ScopedLayer, diagnostics};
//!
//! logging::install_tracing(ScopedLayer::new(diagnostics::shared()));
//! tracing::info!(peer = %addr, "accepted");
//! ```

use std::fmt::{self, Write as _};

use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::levels::Level;
use crate::line::Callsite;
use crate::log::Log;

/// A tracing-subscriber layer that writes events through a [`Log`].
pub struct ScopedLayer<L> {
    logger: L,
}

impl<L: Log> ScopedLayer<L> {
    /// Wraps `logger`.
    #[must_use]
    pub const fn new(logger: L) -> Self {
        Self { logger }
    }

    /// Returns the wrapped logger.
    #[must_use]
    pub const fn logger(&self) -> &L {
        &self.logger
    }

    const fn map_level(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::TRACE => Level::TRACE,
            tracing::Level::DEBUG => Level::DEBUG0,
            tracing::Level::INFO => Level::INFO,
            tracing::Level::WARN => Level::WARN,
            tracing::Level::ERROR => Level::ERROR,
        }
    }
}

impl<S, L> Layer<S> for ScopedLayer<L>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    L: Log + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::map_level(metadata.level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let callsite = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => Callsite::new(file, line),
            _ => Callsite::new(metadata.target(), 0),
        };
        self.logger
            .log(level, callsite, format_args!("{}", visitor.finish()));
    }
}

/// Collects the `message` field and the remaining fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={value}", field.name());
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field, format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            self.push_field(field, format_args!("{value}"));
        }
    }
}

/// Installs `layer` as the global default subscriber.
///
/// Does nothing if a global subscriber is already set.
pub fn install_tracing<L: Log + 'static>(layer: ScopedLayer<L>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::registry().with(layer).try_init();
}

/// Installs `layer` behind an additional filter layer, such as an
/// `EnvFilter` built from `RUST_LOG`.
pub fn install_tracing_with_filter<L, F>(layer: ScopedLayer<L>, filter: F)
where
    L: Log + 'static,
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
