//! Date-based project metrics
//!
//! Pure functions over project dates. The `_at` variants take the
//! reference day explicitly; the plain forms use the local calendar date.

use chrono::{Local, NaiveDate};

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Progress through the planned date range as a whole percentage.
///
/// See [`progress_percent_at`].
pub fn progress_percent(start_date: NaiveDate, end_date: NaiveDate) -> u8 {
    progress_percent_at(start_date, end_date, today())
}

/// Progress through `start_date..end_date` as of `today`, in `0..=100`.
///
/// The ratio is floored, never rounded. A range that ends on or before its
/// start always reports 100.
pub fn progress_percent_at(start_date: NaiveDate, end_date: NaiveDate, today: NaiveDate) -> u8 {
    let total_days = (end_date - start_date).num_days();
    if total_days <= 0 {
        return 100;
    }

    let elapsed_days = (today - start_date).num_days();
    let percent = (elapsed_days * 100).div_euclid(total_days);
    percent.clamp(0, 100) as u8
}

/// Days left until `end_date`, see [`days_remaining_at`]
pub fn days_remaining(end_date: NaiveDate) -> i64 {
    days_remaining_at(end_date, today())
}

/// Days from `today` until `end_date`; negative once the end date has passed
pub fn days_remaining_at(end_date: NaiveDate, today: NaiveDate) -> i64 {
    (end_date - today).num_days()
}
