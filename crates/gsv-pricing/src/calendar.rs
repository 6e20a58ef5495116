use chrono::{Datelike, NaiveDate};

/// Year whose January 1st is month index 0.
pub const EPOCH_YEAR: i32 = 2020;

/// Days in the month containing `date` (28..=31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (y, m) = (date.year(), date.month());
    let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    match (
        NaiveDate::from_ymd_opt(y, m, 1),
        NaiveDate::from_ymd_opt(ny, nm, 1),
    ) {
        (Some(this), Some(next)) => (next - this).num_days() as u32,
        // Only reachable at the edge of chrono's date range.
        _ => 31,
    }
}

/// Continuous month index fed to price models.
///
/// `day / days_in_month + (year - 2020) * 12 + (month - 1)`, so Jan 1st 2020
/// is `1/31` and the last day of a month lands on the next whole number.
pub fn time_index(date: NaiveDate) -> f64 {
    date.day() as f64 / days_in_month(date) as f64
        + ((date.year() - EPOCH_YEAR) * 12) as f64
        + (date.month() - 1) as f64
}

/// Whole calendar months from `start` to `end` (end >= start), counting a
/// month only once its day-of-month is reached.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = (end.year() - start.year()) as i64 * 12
        + end.month() as i64
        - start.month() as i64;
    if end.day() < start.day() {
        months -= 1;
    }
    months
}
