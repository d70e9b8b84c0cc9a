//! crates/logging-sink/src/schedule.rs
//! Delay until the next scheduled rotation.

use std::time::Duration;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, Time};

use crate::constraints::{Schedule, ScheduleKind};
use crate::error::SinkError;

const TIME_OF_DAY: &[FormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]:[second padding:zero]");

/// Computes how long after `now` the next scheduled rotation is due.
///
/// Daily schedules aim at the configured time of day on `now`'s date and
/// move to the following day once that moment has passed. Duration
/// schedules always return their interval. `None` means no timer should be
/// armed: the schedule kind is unrecognised or the delay is zero.
///
/// # Errors
///
/// Returns [`SinkError::InvalidTimeOfDay`] or [`SinkError::InvalidDuration`]
/// when the schedule parameter cannot be parsed.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use logging_sink::{Schedule, next_delay};
/// use time::macros::datetime;
///
/// let now = datetime!(2024-05-01 23:00:00 UTC);
/// let delay = next_delay(&Schedule::daily("01:30:00"), now)?;
/// assert_eq!(delay, Some(Duration::from_secs(150 * 60)));
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
pub fn next_delay(schedule: &Schedule, now: OffsetDateTime) -> Result<Option<Duration>, SinkError> {
    let delay = match schedule.kind() {
        ScheduleKind::None => return Ok(None),
        ScheduleKind::Daily => until_time_of_day(&schedule.parameter, now)?,
        ScheduleKind::Duration => humantime::parse_duration(schedule.parameter.trim()).map_err(
            |source| SinkError::InvalidDuration {
                value: schedule.parameter.clone(),
                source,
            },
        )?,
    };

    Ok((!delay.is_zero()).then_some(delay))
}

fn until_time_of_day(parameter: &str, now: OffsetDateTime) -> Result<Duration, SinkError> {
    let time_of_day =
        Time::parse(parameter.trim(), TIME_OF_DAY).map_err(|source| SinkError::InvalidTimeOfDay {
            value: parameter.to_owned(),
            source,
        })?;

    let mut target = now.replace_time(time_of_day);
    if now > target {
        target += time::Duration::DAY;
    }

    Ok(Duration::try_from(target - now).unwrap_or_default())
}
