//! Countdown timer derivation.
//!
//! The timer is a read-only observer: everything is a pure function of the
//! recorded start instant and an injected `now`, so callers (and tests)
//! never depend on the wall clock directly.

use chrono::{DateTime, Utc};

/// Length of the timed phase in seconds (10 minutes).
pub const TIME_LIMIT_SECS: u64 = 600;

/// Whole seconds since the timer started. Clock skew backwards clamps to 0.
pub fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - start).num_seconds().max(0) as u64
}

/// Seconds left in the timed phase; 0 once the limit is reached.
pub fn remaining_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    TIME_LIMIT_SECS.saturating_sub(elapsed_seconds(start, now))
}

/// `mm:ss` rendering used by the countdown display and the results screen.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_elapsed_and_remaining_at_65_seconds() {
        let now = t0() + Duration::milliseconds(65_000);
        assert_eq!(elapsed_seconds(t0(), now), 65);
        assert_eq!(remaining_seconds(t0(), now), 535);
    }

    #[test]
    fn test_remaining_stops_at_zero() {
        let now = t0() + Duration::seconds(1000);
        assert_eq!(elapsed_seconds(t0(), now), 1000);
        assert_eq!(remaining_seconds(t0(), now), 0);
    }

    #[test]
    fn test_backwards_clock_clamps() {
        let now = t0() - Duration::seconds(5);
        assert_eq!(elapsed_seconds(t0(), now), 0);
        assert_eq!(remaining_seconds(t0(), now), TIME_LIMIT_SECS);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(65), "01:05");
        assert_eq!(format_mmss(600), "10:00");
    }
}
