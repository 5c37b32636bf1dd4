//! Clock and Day Ranges
//!
//! "Now" comes from a [`Clock`] so date-derived queries can be pinned in
//! tests. Days are calendar days in the local time zone.

use chrono::{DateTime, Days, Local, NaiveDate};

use super::error::{ViewError, ViewResult};

/// Day format used on the wire and in the query fields
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Today's date in the local time zone
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Format a day as zero-padded `YYYY-MM-DD`
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

fn days_before(today: NaiveDate, days: u32) -> ViewResult<NaiveDate> {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or(ViewError::OffsetOutOfRange(days))
}

/// Day range for a quick report.
///
/// Starts `offset_days` before `today`. With a window the range covers
/// `window_days` days from the start, otherwise it runs through today.
pub fn quick_range(
    today: NaiveDate,
    offset_days: u32,
    window_days: Option<u32>,
) -> ViewResult<(NaiveDate, NaiveDate)> {
    let start = days_before(today, offset_days)?;
    let end = match window_days {
        None => today,
        Some(0) => return Err(ViewError::EmptyWindow),
        Some(window) => start
            .checked_add_days(Days::new(u64::from(window - 1)))
            .ok_or(ViewError::WindowOutOfRange(window))?,
    };
    Ok((start, end))
}

/// Day range from `today - from_days` through `today - to_days`
pub fn days_back_range(
    today: NaiveDate,
    from_days: u32,
    to_days: u32,
) -> ViewResult<(NaiveDate, NaiveDate)> {
    Ok((days_before(today, from_days)?, days_before(today, to_days)?))
}
