//! Fare computation.
//!
//! Trips departing in the day window `[06:00, 21:00]` (inclusive at both
//! ends, minute precision) pay the base fare. Everything else pays the night
//! rate of one and a half times the base, rounded up to the next minor unit.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// First minute of the day window, counted from midnight.
pub const DAY_WINDOW_START_MINUTE: u32 = 6 * 60;
/// Last minute of the day window, counted from midnight.
pub const DAY_WINDOW_END_MINUTE: u32 = 21 * 60;
/// Base fare used when no override is configured: 50.00.
pub const DEFAULT_BASE_FARE: Fare = Fare::from_minor_units(5_000);

/// Monetary amount in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fare(u64);

impl Fare {
    /// Wrap an amount expressed in minor units.
    #[must_use]
    pub const fn from_minor_units(amount: u64) -> Self {
        Self(amount)
    }

    /// Amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// One and a half times the amount, rounded up.
    #[must_use]
    pub const fn night_rate(self) -> Self {
        Self(self.0.saturating_mul(3).div_ceil(2))
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Maps a departure time to its fare.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use shuttle_pool::domain::{Fare, PricingRule};
///
/// let rule = PricingRule::default();
/// let evening = NaiveTime::from_hms_opt(21, 1, 0).expect("valid time");
/// assert_eq!(rule.fare_for(evening), Fare::from_minor_units(7_500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRule {
    base: Fare,
}

impl PricingRule {
    /// Build a rule around a custom base fare.
    #[must_use]
    pub const fn new(base: Fare) -> Self {
        Self { base }
    }

    /// Fare charged inside the day window.
    #[must_use]
    pub const fn base(&self) -> Fare {
        self.base
    }

    /// Fare for a trip departing at `time`.
    #[must_use]
    pub fn fare_for(&self, time: NaiveTime) -> Fare {
        if is_day_time(time) {
            self.base
        } else {
            self.base.night_rate()
        }
    }
}

impl Default for PricingRule {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_FARE)
    }
}

fn is_day_time(time: NaiveTime) -> bool {
    let minute = time.hour() * 60 + time.minute();
    (DAY_WINDOW_START_MINUTE..=DAY_WINDOW_END_MINUTE).contains(&minute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    #[rstest]
    #[case(at(5, 59), 7_500)]
    #[case(at(6, 0), 5_000)]
    #[case(at(14, 0), 5_000)]
    #[case(at(21, 0), 5_000)]
    #[case(at(21, 1), 7_500)]
    #[case(at(0, 0), 7_500)]
    #[case(at(23, 30), 7_500)]
    fn default_rule_prices_day_and_night(#[case] time: NaiveTime, #[case] expected: u64) {
        assert_eq!(
            PricingRule::default().fare_for(time),
            Fare::from_minor_units(expected)
        );
    }

    #[rstest]
    fn seconds_within_the_last_day_minute_still_pay_base() {
        let time = NaiveTime::from_hms_opt(21, 0, 45).expect("valid time");
        assert_eq!(PricingRule::default().fare_for(time), DEFAULT_BASE_FARE);
    }

    #[rstest]
    #[case(5_000, 7_500)]
    #[case(3_333, 5_000)]
    #[case(1, 2)]
    #[case(0, 0)]
    fn night_rate_rounds_up(#[case] base: u64, #[case] expected: u64) {
        assert_eq!(
            Fare::from_minor_units(base).night_rate(),
            Fare::from_minor_units(expected)
        );
    }

    #[rstest]
    fn displays_major_and_minor_units() {
        assert_eq!(Fare::from_minor_units(7_505).to_string(), "75.05");
    }
}
