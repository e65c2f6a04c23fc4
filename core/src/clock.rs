//! Time-of-day parsing and target instant resolution
//!
//! All values live in the local wall-clock frame of the running process.
//! `PrimitiveDateTime` carries no offset, so comparisons are plain
//! calendar/clock comparisons.

use std::fmt;
use std::str::FromStr;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::error::FormatError;

/// Two-digit, zero-padded, 24-hour `HH:MM:SS`
const TIME_OF_DAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

const INSTANT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

// ─────────────────────────────────────────────────────────────────────────────
// Time of Day
// ─────────────────────────────────────────────────────────────────────────────

/// An hour/minute/second triple without date or timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(Time);

impl TimeOfDay {
    /// Parse a strict `HH:MM:SS` string.
    ///
    /// Each field must be exactly two digits. Surrounding whitespace is not
    /// stripped here; callers trim user input first.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        Time::parse(input, TIME_OF_DAY_FORMAT)
            .map(Self)
            .map_err(|_| FormatError {
                input: input.to_string(),
            })
    }

    pub fn hour(&self) -> u8 {
        self.0.hour()
    }

    pub fn minute(&self) -> u8 {
        self.0.minute()
    }

    pub fn second(&self) -> u8 {
        self.0.second()
    }

    pub fn as_time(&self) -> Time {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Time> for TimeOfDay {
    fn from(time: Time) -> Self {
        // Sub-second precision is not part of a time of day
        Self(time.replace_nanosecond(0).unwrap_or(time))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clock
// ─────────────────────────────────────────────────────────────────────────────

/// Source of the current local wall-clock instant
pub trait Clock {
    fn now(&self) -> PrimitiveDateTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> PrimitiveDateTime {
        (**self).now()
    }
}

/// Clock backed by the operating system
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    /// Offset captured at construction, used when the platform refuses to
    /// report the local offset later on (e.g. once other threads exist).
    fallback_offset: UtcOffset,
}

impl SystemClock {
    /// Create a clock, capturing the local UTC offset.
    ///
    /// Call this while the process is still single-threaded.
    pub fn new() -> Self {
        let fallback_offset = match UtcOffset::current_local_offset() {
            Ok(offset) => offset,
            Err(e) => {
                tracing::warn!(error = %e, "local UTC offset unavailable, using UTC");
                UtcOffset::UTC
            }
        };
        tracing::debug!(offset = %fallback_offset, "system clock initialized");
        Self { fallback_offset }
    }

    /// Clock with an explicit fallback offset
    pub fn with_offset(offset: UtcOffset) -> Self {
        Self {
            fallback_offset: offset,
        }
    }

    pub fn offset(&self) -> UtcOffset {
        self.fallback_offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> PrimitiveDateTime {
        let now = OffsetDateTime::now_local().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "using captured UTC offset");
            OffsetDateTime::now_utc().to_offset(self.fallback_offset)
        });
        PrimitiveDateTime::new(now.date(), now.time())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Target Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve the instant at which the alarm fires.
///
/// Today's date combined with `tod`, or the same time tomorrow when that is
/// not strictly after `now`.
pub fn resolve_target(tod: TimeOfDay, now: PrimitiveDateTime) -> PrimitiveDateTime {
    let candidate = PrimitiveDateTime::new(now.date(), tod.as_time());
    if candidate <= now {
        candidate.saturating_add(Duration::DAY)
    } else {
        candidate
    }
}

/// Render an instant as `YYYY-MM-DD HH:MM:SS`
pub fn format_instant(instant: PrimitiveDateTime) -> String {
    instant.format(INSTANT_FORMAT).unwrap_or_else(|_| {
        // Only reachable for years outside four digits
        format!("{} {}", instant.date(), TimeOfDay::from(instant.time()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, time};

    fn tod(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn test_parse_valid_times() {
        let t = tod("07:05:09");
        assert_eq!((t.hour(), t.minute(), t.second()), (7, 5, 9));

        let t = tod("00:00:00");
        assert_eq!((t.hour(), t.minute(), t.second()), (0, 0, 0));

        let t = tod("23:59:59");
        assert_eq!((t.hour(), t.minute(), t.second()), (23, 59, 59));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in [
            "25:00:00", "24:00:00", "12:60:00", "12:00:60", "9:00:00", "9:5:3", "abc", "",
            "10:00", "10:00:00:00", "10-00-00", " 10:00:00", "10:00:00 ", "1O:00:00",
        ] {
            let err = TimeOfDay::parse(input).unwrap_err();
            assert_eq!(err.input, input);
            assert_eq!(err.to_string(), "Time must be in HH:MM:SS format.");
        }
    }

    #[test]
    fn test_from_str_and_display() {
        let t: TimeOfDay = "09:59:59".parse().unwrap();
        assert_eq!(t.to_string(), "09:59:59");
        assert!("9:59:59".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_from_time_drops_subseconds() {
        let t = TimeOfDay::from(time!(10:00:01.5));
        assert_eq!(t, tod("10:00:01"));
    }

    #[test]
    fn test_resolve_earlier_time_rolls_to_tomorrow() {
        let now = datetime!(2025-01-01 10:00:00);
        assert_eq!(
            resolve_target(tod("09:59:59"), now),
            datetime!(2025-01-02 09:59:59)
        );
    }

    #[test]
    fn test_resolve_later_time_stays_today() {
        let now = datetime!(2025-01-01 10:00:00);
        assert_eq!(
            resolve_target(tod("10:00:01"), now),
            datetime!(2025-01-01 10:00:01)
        );
    }

    #[test]
    fn test_resolve_equal_time_rolls_to_tomorrow() {
        let now = datetime!(2025-01-01 10:00:00);
        assert_eq!(
            resolve_target(tod("10:00:00"), now),
            datetime!(2025-01-02 10:00:00)
        );

        // Sub-second progress past the time of day also counts as passed
        let now = datetime!(2025-01-01 10:00:00.250);
        assert_eq!(
            resolve_target(tod("10:00:00"), now),
            datetime!(2025-01-02 10:00:00)
        );
    }

    #[test]
    fn test_resolve_crosses_month_and_year() {
        let now = datetime!(2024-12-31 23:30:00);
        assert_eq!(
            resolve_target(tod("06:00:00"), now),
            datetime!(2025-01-01 06:00:00)
        );

        let now = datetime!(2024-02-28 12:00:00);
        assert_eq!(
            resolve_target(tod("11:00:00"), now),
            datetime!(2024-02-29 11:00:00)
        );
    }

    #[test]
    fn test_resolve_is_idempotent_and_future() {
        let now = datetime!(2025-06-15 18:42:07);
        for input in ["00:00:00", "18:42:07", "18:42:08", "23:59:59"] {
            let first = resolve_target(tod(input), now);
            let second = resolve_target(tod(input), now);
            assert_eq!(first, second);
            assert!(first > now, "{input} resolved to {first}");
        }
    }

    #[test]
    fn test_format_instant() {
        assert_eq!(
            format_instant(datetime!(2025-01-02 09:59:59)),
            "2025-01-02 09:59:59"
        );
        assert_eq!(
            format_instant(datetime!(2025-03-04 05:06:07.890)),
            "2025-03-04 05:06:07"
        );
    }

    #[test]
    fn test_fixed_offset_clock_reports_offset() {
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        assert_eq!(SystemClock::with_offset(offset).offset(), offset);
    }
}
