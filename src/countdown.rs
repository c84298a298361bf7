//! Countdowns
//!
//! Remaining time until a promotion ends, decomposed for display.

use std::fmt;

use jiff::Timestamp;

/// Seconds in one day.
const DAY: i64 = 86_400;

/// Seconds in one hour.
const HOUR: i64 = 3_600;

/// Seconds in one minute.
const MINUTE: i64 = 60;

/// Remaining time until an end timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// The end has already passed.
    Expired,

    /// Time still remaining. Each unit is the remainder after extracting
    /// the larger units.
    Remaining {
        /// Whole days remaining
        days: i64,

        /// Whole hours remaining after days
        hours: i64,

        /// Whole minutes remaining after hours
        minutes: i64,

        /// Whole seconds remaining after minutes
        seconds: i64,
    },
}

impl Countdown {
    /// Compute the countdown from `now` to `ends_at`.
    ///
    /// A remainder of zero or less is [`Countdown::Expired`].
    #[must_use]
    pub fn until(ends_at: Timestamp, now: Timestamp) -> Self {
        let total = ends_at.duration_since(now).as_secs();

        if total <= 0 {
            return Countdown::Expired;
        }

        Countdown::Remaining {
            days: total / DAY,
            hours: total % DAY / HOUR,
            minutes: total % HOUR / MINUTE,
            seconds: total % MINUTE,
        }
    }

    /// Whether the end has passed.
    pub fn is_expired(&self) -> bool {
        matches!(self, Countdown::Expired)
    }

    /// Total whole seconds remaining; zero once expired.
    #[must_use]
    pub fn total_seconds(&self) -> i64 {
        match self {
            Countdown::Expired => 0,
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => days * DAY + hours * HOUR + minutes * MINUTE + seconds,
        }
    }

    /// Whether the end falls within the next 24 hours (and has not passed).
    #[must_use]
    pub fn is_ending_soon(&self) -> bool {
        !self.is_expired() && self.total_seconds() <= DAY
    }
}

impl fmt::Display for Countdown {
    /// Renders the largest two units, e.g. `3d 4h`, `2h 5m`, `12m 30s`, `45s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Expired => write!(f, "Expired"),
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => {
                if *days > 0 {
                    write!(f, "{days}d {hours}h")
                } else if *hours > 0 {
                    write!(f, "{hours}h {minutes}m")
                } else if *minutes > 0 {
                    write!(f, "{minutes}m {seconds}s")
                } else {
                    write!(f, "{seconds}s")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn at(s: &str) -> Result<Timestamp, jiff::Error> {
        s.parse()
    }

    #[test]
    fn until_decomposes_remaining_time() -> TestResult {
        let countdown = Countdown::until(at("2025-06-18T15:04:05Z")?, at("2025-06-15T12:00:00Z")?);

        assert_eq!(
            countdown,
            Countdown::Remaining {
                days: 3,
                hours: 3,
                minutes: 4,
                seconds: 5,
            }
        );

        Ok(())
    }

    #[test]
    fn until_past_end_is_expired() -> TestResult {
        let countdown = Countdown::until(at("2025-06-15T12:00:00Z")?, at("2025-06-16T12:00:00Z")?);

        assert!(countdown.is_expired());
        assert_eq!(countdown.total_seconds(), 0);
        assert_eq!(countdown.to_string(), "Expired");

        Ok(())
    }

    #[test]
    fn until_exactly_now_is_expired() -> TestResult {
        let now = at("2025-06-15T12:00:00Z")?;

        assert!(Countdown::until(now, now).is_expired());

        Ok(())
    }

    #[test]
    fn total_seconds_recomposes_units() -> TestResult {
        let countdown = Countdown::until(at("2025-06-18T15:04:05Z")?, at("2025-06-15T12:00:00Z")?);

        assert_eq!(
            countdown.total_seconds(),
            3 * 86_400 + 3 * 3_600 + 4 * 60 + 5
        );

        Ok(())
    }

    #[test]
    fn display_uses_largest_two_units() -> TestResult {
        let start = at("2025-06-15T12:00:00Z")?;

        assert_eq!(
            Countdown::until(at("2025-06-18T15:04:05Z")?, start).to_string(),
            "3d 3h"
        );
        assert_eq!(
            Countdown::until(at("2025-06-15T14:30:00Z")?, start).to_string(),
            "2h 30m"
        );
        assert_eq!(
            Countdown::until(at("2025-06-15T12:12:30Z")?, start).to_string(),
            "12m 30s"
        );
        assert_eq!(
            Countdown::until(at("2025-06-15T12:00:45Z")?, start).to_string(),
            "45s"
        );

        Ok(())
    }

    #[test]
    fn display_keeps_zero_smaller_unit() -> TestResult {
        let start = at("2025-06-15T12:00:00Z")?;

        assert_eq!(
            Countdown::until(at("2025-06-16T12:00:00Z")?, start).to_string(),
            "1d 0h"
        );

        Ok(())
    }

    #[test]
    fn ending_soon_is_within_one_day() -> TestResult {
        let start = at("2025-06-15T12:00:00Z")?;

        assert!(Countdown::until(at("2025-06-15T13:00:00Z")?, start).is_ending_soon());
        assert!(Countdown::until(at("2025-06-16T12:00:00Z")?, start).is_ending_soon());
        assert!(!Countdown::until(at("2025-06-16T12:00:01Z")?, start).is_ending_soon());
        assert!(!Countdown::until(at("2025-06-14T12:00:00Z")?, start).is_ending_soon());

        Ok(())
    }
}
