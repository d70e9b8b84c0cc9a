//! crates/logging-sink/src/constraints.rs
//! Configuration of a rotating sink.
//!
//! All types are plain data with `Default` implementations. With the `serde`
//! feature they can be loaded from any serde format; missing fields take
//! their defaults.

use std::path::PathBuf;

/// Schedule kind that rotates once a day at a fixed time.
pub const SCHEDULE_DAILY: &str = "daily";

/// Schedule kind that rotates at a fixed interval after each rotation.
pub const SCHEDULE_DURATION: &str = "duration";

/// File-name pattern used when none is configured.
pub const DEFAULT_FILE_NAME: &str = "[year][month][day]-[hour][minute][second].log";

/// Where log files live and when they are rotated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SinkConstraints {
    /// Directory holding the current file and its history.
    pub directory: PathBuf,
    /// `time` format description applied to the local time at each
    /// rotation, e.g. `[year][month][day]-[hour][minute][second].log`.
    pub file_name: String,
    /// Rotation triggers and retention.
    pub rotation: RotationPolicy,
}

impl Default for SinkConstraints {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_name: DEFAULT_FILE_NAME.to_owned(),
            rotation: RotationPolicy::default(),
        }
    }
}

impl SinkConstraints {
    /// Creates constraints for `directory` using `file_name` as the pattern,
    /// with no rotation triggers and unbounded history.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            rotation: RotationPolicy::default(),
        }
    }

    /// Rotates before a write that would bring the file to `bytes` or more.
    /// Zero disables size rotation.
    #[must_use]
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.rotation.max_size = bytes;
        self
    }

    /// Keeps at most `files` log files, the current one included. Zero keeps
    /// every file.
    #[must_use]
    pub fn with_history(mut self, files: usize) -> Self {
        self.rotation.history = files;
        self
    }

    /// Sets the time-based rotation schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.rotation.schedule = schedule;
        self
    }
}

/// Rotation triggers and retention.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RotationPolicy {
    /// Size threshold in bytes; zero disables size rotation.
    pub max_size: u64,
    /// Time-based trigger.
    pub schedule: Schedule,
    /// Maximum number of files kept, the current one included; zero keeps
    /// everything.
    pub history: usize,
}

/// A time-based rotation trigger.
///
/// `kind` is matched case-insensitively against [`SCHEDULE_DAILY`] and
/// [`SCHEDULE_DURATION`]; any other value, including the empty default,
/// arms no timer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Schedule {
    /// `daily`, `duration`, or anything else for none.
    pub kind: String,
    /// `HH:MM:SS` for daily schedules, a human-readable interval such as
    /// `90s` or `1h 30m` for duration schedules.
    pub parameter: String,
}

/// Interpreted form of [`Schedule::kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleKind {
    /// No timer is armed.
    None,
    /// Rotate every day at a fixed local time.
    Daily,
    /// Rotate a fixed interval after every rotation.
    Duration,
}

impl Schedule {
    /// No time-based rotation.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Rotates every day at `time_of_day` (`HH:MM:SS`, local time).
    #[must_use]
    pub fn daily(time_of_day: impl Into<String>) -> Self {
        Self {
            kind: SCHEDULE_DAILY.to_owned(),
            parameter: time_of_day.into(),
        }
    }

    /// Rotates `interval` after every rotation, e.g. `"15m"`.
    #[must_use]
    pub fn every(interval: impl Into<String>) -> Self {
        Self {
            kind: SCHEDULE_DURATION.to_owned(),
            parameter: interval.into(),
        }
    }

    /// Interprets [`kind`](Self::kind).
    #[must_use]
    pub fn kind(&self) -> ScheduleKind {
        let kind = self.kind.trim();
        if kind.eq_ignore_ascii_case(SCHEDULE_DAILY) {
            ScheduleKind::Daily
        } else if kind.eq_ignore_ascii_case(SCHEDULE_DURATION) {
            ScheduleKind::Duration
        } else {
            ScheduleKind::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_kinds_are_case_insensitive() {
        assert_eq!(Schedule::daily("00:00:00").kind(), ScheduleKind::Daily);
        assert_eq!(Schedule::every("1h").kind(), ScheduleKind::Duration);
        let shouting = Schedule {
            kind: " DAILY ".to_owned(),
            parameter: String::new(),
        };
        assert_eq!(shouting.kind(), ScheduleKind::Daily);
    }

    #[test]
    fn unknown_kinds_arm_nothing() {
        assert_eq!(Schedule::none().kind(), ScheduleKind::None);
        let weekly = Schedule {
            kind: "weekly".to_owned(),
            parameter: "mon".to_owned(),
        };
        assert_eq!(weekly.kind(), ScheduleKind::None);
    }

    #[test]
    fn builders_fill_the_policy() {
        let constraints = SinkConstraints::new("/var/log/app", "[year].log")
            .with_max_size(1024)
            .with_history(3)
            .with_schedule(Schedule::every("10m"));
        assert_eq!(constraints.directory, PathBuf::from("/var/log/app"));
        assert_eq!(constraints.rotation.max_size, 1024);
        assert_eq!(constraints.rotation.history, 3);
        assert_eq!(constraints.rotation.schedule.parameter, "10m");
    }

    #[test]
    fn defaults_disable_rotation_triggers() {
        let constraints = SinkConstraints::default();
        assert_eq!(constraints.file_name, DEFAULT_FILE_NAME);
        assert_eq!(constraints.rotation.max_size, 0);
        assert_eq!(constraints.rotation.history, 0);
        assert_eq!(constraints.rotation.schedule.kind(), ScheduleKind::None);
    }
}
