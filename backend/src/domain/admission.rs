//! Lead-time admission control.
//!
//! Trips must be booked, and later edited, at least [`LEAD_TIME_HOURS`] hours
//! ahead of their scheduled local date-time. The comparison runs on naive
//! local date-times so daylight-saving transitions are not taken into account.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Minimum notice, in hours, between now and a trip's departure.
pub const LEAD_TIME_HOURS: i64 = 72;

/// Whether a trip at `date` and `time` falls inside the lead-time window
/// relative to `now`, and therefore must be refused.
///
/// Past trips are always inside the window. A trip exactly
/// [`LEAD_TIME_HOURS`] hours away is admitted.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use shuttle_pool::domain::is_within_lead_time;
///
/// let now = NaiveDate::from_ymd_opt(2026, 3, 2)
///     .and_then(|d| d.and_hms_opt(9, 0, 0))
///     .expect("valid timestamp");
/// let date = NaiveDate::from_ymd_opt(2026, 3, 4).expect("valid date");
/// let time = NaiveTime::from_hms_opt(12, 0, 0).expect("valid time");
/// assert!(is_within_lead_time(date, time, now));
/// ```
#[must_use]
pub fn is_within_lead_time(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
    date.and_time(time) - now < TimeDelta::hours(LEAD_TIME_HOURS)
}
