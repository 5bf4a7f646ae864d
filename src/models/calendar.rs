//! Service calendar: planning windows and weekly service dates.
//!
//! The year is divided into three-month cycles anchored at a configurable
//! start month. Scheduling always targets the cycle *after* the one that
//! contains today.
//!
//! # Example
//! With cycles starting in March, a date in February belongs to the
//! December–February cycle, so the next window is March 1 – May 31.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RotaError};

/// Month used when the configured cycle start is missing or invalid.
pub const DEFAULT_CYCLE_START_MONTH: u32 = 1;

/// Length of one planning cycle in months.
pub const CYCLE_LENGTH_MONTHS: i32 = 3;

/// Date format accepted by [`parse_service_dates`].
pub const SERVICE_DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive date range [start, end].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWindow {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl ServiceWindow {
    /// Creates a new window.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether a date falls within this window.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered (0 if `end < start`).
    pub fn len_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    /// All occurrences of `weekday` in the window, ascending.
    ///
    /// Starts from the first matching day on or after `start` and steps
    /// seven days at a time until past `end`.
    pub fn occurrences(&self, weekday: Weekday) -> Vec<NaiveDate> {
        let offset = (7 + weekday.num_days_from_monday()
            - self.start.weekday().num_days_from_monday())
            % 7;

        let mut dates = Vec::new();
        let mut next = self.start.checked_add_days(Days::new(u64::from(offset)));
        while let Some(date) = next {
            if date > self.end {
                break;
            }
            dates.push(date);
            next = date.checked_add_days(Days::new(7));
        }
        dates
    }

    /// All Sundays in the window, ascending.
    pub fn sundays(&self) -> Vec<NaiveDate> {
        self.occurrences(Weekday::Sun)
    }
}

/// Applies the default to a raw cycle start month.
///
/// Anything outside 1-12 (or missing) becomes [`DEFAULT_CYCLE_START_MONTH`].
pub fn normalize_cycle_start_month(raw: Option<u32>) -> u32 {
    match raw {
        Some(month @ 1..=12) => month,
        Some(month) => {
            tracing::warn!(
                month,
                default = DEFAULT_CYCLE_START_MONTH,
                "Cycle start month out of range, using default"
            );
            DEFAULT_CYCLE_START_MONTH
        }
        None => DEFAULT_CYCLE_START_MONTH,
    }
}

/// Computes the planning window following the cycle that contains `today`.
///
/// Months are handled as an absolute index (`year * 12 + month0`) so
/// cycles that straddle a year boundary need no special casing.
pub fn next_cycle_window(today: NaiveDate, cycle_start_month: Option<u32>) -> Result<ServiceWindow> {
    let start_month0 = normalize_cycle_start_month(cycle_start_month) as i32 - 1;
    let today_abs = today.year() * 12 + today.month0() as i32;

    let offset = (today.month0() as i32 - start_month0).rem_euclid(12);
    let current_cycle_abs = today_abs - offset % CYCLE_LENGTH_MONTHS;
    let next_cycle_abs = current_cycle_abs + CYCLE_LENGTH_MONTHS;

    let start = first_of_month(next_cycle_abs)?;
    let following = first_of_month(next_cycle_abs + CYCLE_LENGTH_MONTHS)?;
    let end = following.pred_opt().ok_or(RotaError::DateOutOfRange {
        year: following.year(),
        month: following.month(),
    })?;

    Ok(ServiceWindow::new(start, end))
}

/// Service dates for the next planning cycle.
pub fn upcoming_service_dates(
    today: NaiveDate,
    cycle_start_month: Option<u32>,
    weekday: Weekday,
) -> Result<Vec<NaiveDate>> {
    let window = next_cycle_window(today, cycle_start_month)?;
    let dates = window.occurrences(weekday);
    tracing::debug!(
        start = %window.start,
        end = %window.end,
        count = dates.len(),
        "Resolved service dates"
    );
    Ok(dates)
}

/// Parses `YYYY-MM-DD` strings into dates, failing on the first bad entry.
pub fn parse_service_dates<S: AsRef<str>>(raw: &[S]) -> Result<Vec<NaiveDate>> {
    raw.iter()
        .map(|s| {
            let input = s.as_ref().trim();
            NaiveDate::parse_from_str(input, SERVICE_DATE_FORMAT).map_err(|source| {
                RotaError::InvalidDate {
                    input: input.to_string(),
                    source,
                }
            })
        })
        .collect()
}

/// Checks that dates are strictly ascending (no repeats).
pub fn ensure_ascending(dates: &[NaiveDate]) -> Result<()> {
    for pair in dates.windows(2) {
        if pair[1] <= pair[0] {
            return Err(RotaError::UnsortedDates {
                previous: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

fn first_of_month(abs_month: i32) -> Result<NaiveDate> {
    let year = abs_month.div_euclid(12);
    let month = abs_month.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(RotaError::DateOutOfRange { year, month })
}
