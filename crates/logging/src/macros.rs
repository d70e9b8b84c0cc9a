//! crates/logging/src/macros.rs
//! Call-site macros that check the level before formatting.
//!
//! Each macro takes any [`Log`](crate::Log) implementor followed by
//! `format_args!`-style arguments. The arguments are not evaluated when the
//! level is closed, and the record is attributed to the macro's call site.

/// Emit a trace record.
///
/// # Example
/// ```ignore
/// trace_log!(logger, "polling {} sockets", count);
/// ```
#[macro_export]
macro_rules! trace_log {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::TRACE, $($arg)+)
    };
}

/// Emit a debug record at a sub-level.
///
/// # Example
/// ```ignore
/// debug_log!(logger, 2, "cache miss for {}", key);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($logger:expr, $n:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::debug($n), $($arg)+)
    };
}

/// Emit an info record.
///
/// # Example
/// ```ignore
/// info_log!(logger, "listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info_log {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Emit a warning record.
///
/// # Example
/// ```ignore
/// warn_log!(logger, "retrying after {:?}", delay);
/// ```
#[macro_export]
macro_rules! warn_log {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::WARN, $($arg)+)
    };
}

/// Emit an error record.
///
/// # Example
/// ```ignore
/// error_log!(logger, "request failed: {}", err);
/// ```
#[macro_export]
macro_rules! error_log {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::ERROR, $($arg)+)
    };
}

/// Emit a record at an explicit [`Level`](crate::Level).
///
/// The level-specific macros expand to this one.
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if $crate::Log::enabled(logger, level) {
            $crate::Log::log(
                logger,
                level,
                $crate::Callsite::caller(),
                ::core::format_args!($($arg)+),
            );
        }
    }};
}
