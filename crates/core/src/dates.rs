//! Calendar date parsing, formatting and offset arithmetic.
//!
//! All dates are naive calendar dates. Timestamps are rendered as ISO-8601 without a zone.

use crate::constants::{AVERAGE_DAYS_PER_MONTH, DATE_FORMAT};
use crate::{ServiceError, ServiceResult};
use chrono::{Days, Months, NaiveDate, Utc};

const DATE_HINT: &str = "Use YYYY-MM-DD.";

/// Parse a `YYYY-MM-DD` field value.
///
/// # Errors
///
/// Returns [`ServiceError::InputFormat`] naming `field` if `value` is not a valid date.
pub fn parse_date(field: &str, value: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ServiceError::input_format(field, DATE_HINT))
}

/// `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Midnight of `date` as a naive ISO-8601 timestamp, `YYYY-MM-DDT00:00:00`.
pub fn start_of_day(date: NaiveDate) -> String {
    format!("{}T00:00:00", format_date(date))
}

/// Current UTC time as a naive ISO-8601 timestamp with microseconds.
pub fn now_timestamp() -> String {
    Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn out_of_range() -> ServiceError {
    ServiceError::InvalidRange("Resulting date is outside the supported calendar range.".into())
}

pub fn add_days(date: NaiveDate, days: u64) -> ServiceResult<NaiveDate> {
    date.checked_add_days(Days::new(days)).ok_or_else(out_of_range)
}

pub fn sub_days(date: NaiveDate, days: u64) -> ServiceResult<NaiveDate> {
    date.checked_sub_days(Days::new(days)).ok_or_else(out_of_range)
}

/// Add a possibly fractional number of months.
///
/// Whole months use calendar-month arithmetic (a day past the end of the target month clamps
/// to its last day, so 31 Jan + 1 month is 28/29 Feb). The fractional remainder becomes
/// `trunc(fraction × 30.4375)` days, applied after the months.
pub fn add_fractional_months(date: NaiveDate, months: f64) -> ServiceResult<NaiveDate> {
    if !months.is_finite() || months < 0.0 || months > f64::from(u32::MAX) {
        return Err(ServiceError::InvalidRange(format!(
            "Month offset must be a non-negative number, got {months}."
        )));
    }

    let whole = months.trunc() as u32;
    let extra_days = (months.fract() * AVERAGE_DAYS_PER_MONTH).trunc() as u64;

    let shifted = date
        .checked_add_months(Months::new(whole))
        .ok_or_else(out_of_range)?;
    add_days(shifted, extra_days)
}
