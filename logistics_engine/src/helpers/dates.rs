//! Deadline arithmetic.
//!
//! Every function that depends on the current time has an `_at` twin that takes "now" explicitly. The plain versions
//! simply call the twin with `Utc::now()`.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// An order with less than this many hours left before its dispatch deadline is considered at risk.
pub const DEFAULT_RISK_THRESHOLD_HOURS: f64 = 6.0;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an ISO-8601 timestamp as sent by the marketplaces.
///
/// Accepts RFC 3339 (with an offset or a trailing `Z`), timestamps without an offset (taken as UTC), and bare dates
/// (midnight UTC). Missing, blank or malformed input gives `None`.
pub fn parse_date(s: Option<&str>) -> Option<DateTime<Utc>> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = NAIVE_FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(s, f).ok()) {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

pub fn is_delayed(deadline: &DateTime<Utc>) -> bool {
    is_delayed_at(deadline, &Utc::now())
}

/// True once `now` is strictly past the deadline.
pub fn is_delayed_at(deadline: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    now > deadline
}

pub fn hours_until_deadline(deadline: &DateTime<Utc>) -> f64 {
    hours_until_deadline_at(deadline, &Utc::now())
}

/// Signed number of hours from `now` until the deadline. Negative once the deadline has passed.
pub fn hours_until_deadline_at(deadline: &DateTime<Utc>, now: &DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let millis = (*deadline - *now).num_milliseconds() as f64;
    millis / 3_600_000.0
}

pub fn is_at_risk(deadline: &DateTime<Utc>, threshold_hours: f64) -> bool {
    is_at_risk_at(deadline, threshold_hours, &Utc::now())
}

/// True iff the deadline is still ahead, but less than `threshold_hours` away.
///
/// Orders that are already overdue are delayed, not at risk. Both boundaries are exclusive.
pub fn is_at_risk_at(deadline: &DateTime<Utc>, threshold_hours: f64, now: &DateTime<Utc>) -> bool {
    let hours = hours_until_deadline_at(deadline, now);
    0.0 < hours && hours < threshold_hours
}

/// The delay tracking values that are written alongside an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayState {
    pub is_delayed: bool,
    /// Whole hours past the deadline. Zero if the order is not delayed.
    pub hours_delayed: i64,
}

impl DelayState {
    pub fn assess(deadline: &DateTime<Utc>, now: &DateTime<Utc>) -> Self {
        if is_delayed_at(deadline, now) {
            let hours_delayed = (*now - *deadline).num_hours();
            Self { is_delayed: true, hours_delayed }
        } else {
            Self { is_delayed: false, hours_delayed: 0 }
        }
    }
}
