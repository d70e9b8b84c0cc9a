//! crates/logging/src/diagnostics.rs
//! The facility's own reporting channel.
//!
//! Loggers and sinks report their own failures (a write that could not be
//! completed, a rotation that could not open its next file) through a
//! separate diagnostic logger rather than through the destination that just
//! failed. Components receive that channel by injection as a [`Diagnostics`]
//! value; the default is the lazily created process-wide console logger
//! returned by [`shared`].
//!
//! # Hazard
//!
//! Reports are written while the reporting component may still hold its own
//! lock. A diagnostic logger whose writer is, directly or through other
//! loggers, the same rotating sink that is reporting will therefore deadlock.
//! Bind diagnostics to a console or to an unrelated file.

use std::sync::{Arc, OnceLock};

use crate::levels::LevelMask;
use crate::scoped::ScopedLogger;
use crate::writer;

/// Scope label used by the process-wide diagnostic logger.
pub const DIAGNOSTIC_SCOPE: &str = "CORE";

static SHARED: OnceLock<Arc<ScopedLogger>> = OnceLock::new();

/// Where a component sends reports about its own failures.
#[derive(Clone, Debug, Default)]
pub enum Diagnostics {
    /// Report through the process-wide logger returned by [`shared`].
    #[default]
    Shared,
    /// Report through an explicitly supplied logger.
    Logger(Arc<ScopedLogger>),
    /// Drop every report.
    Disabled,
}

impl Diagnostics {
    /// Resolves the channel to a concrete logger, if any.
    #[must_use]
    pub fn logger(&self) -> Option<Arc<ScopedLogger>> {
        match self {
            Self::Shared => Some(shared()),
            Self::Logger(logger) => Some(Arc::clone(logger)),
            Self::Disabled => None,
        }
    }
}

impl From<Arc<ScopedLogger>> for Diagnostics {
    fn from(logger: Arc<ScopedLogger>) -> Self {
        Self::Logger(logger)
    }
}

/// Builds a console diagnostic logger: every severity on standard output,
/// all levels enabled, scope [`DIAGNOSTIC_SCOPE`], and no further fallback.
#[must_use]
pub fn console() -> ScopedLogger {
    ScopedLogger::console_mirrored(
        writer::stdout(),
        LevelMask::ALL,
        DIAGNOSTIC_SCOPE,
        Diagnostics::Disabled,
    )
}

/// Returns the process-wide diagnostic logger, creating it on first use.
///
/// Once created the logger lives until the process exits.
#[must_use]
pub fn shared() -> Arc<ScopedLogger> {
    Arc::clone(SHARED.get_or_init(|| Arc::new(console())))
}

/// Installs `logger` as the process-wide diagnostic logger.
///
/// Succeeds only before the first call to [`shared`]; afterwards the rejected
/// logger is handed back.
pub fn install(logger: Arc<ScopedLogger>) -> Result<(), Arc<ScopedLogger>> {
    SHARED.set(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Level;

    #[test]
    fn shared_logger_is_a_singleton() {
        let a = shared();
        let b = shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.scope(), DIAGNOSTIC_SCOPE);
        assert!(a.enabled(Level::debug(0)));
        assert!(a.enabled(Level::ERROR));
    }

    #[test]
    fn disabled_channel_resolves_to_nothing() {
        assert!(Diagnostics::Disabled.logger().is_none());
        assert!(Diagnostics::default().logger().is_some());
    }

    #[test]
    fn explicit_channel_resolves_to_the_given_logger() {
        let logger = Arc::new(console());
        let channel = Diagnostics::from(Arc::clone(&logger));
        let resolved = channel.logger().expect("explicit logger");
        assert!(Arc::ptr_eq(&resolved, &logger));
    }
}
