use chrono::{Datelike, Days, Months, NaiveDate};

/// Inclusive first and last day of the month containing `today`.
pub fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today - Days::new(u64::from(today.day0()));
    let last = first + Months::new(1) - Days::new(1);
    (first, last)
}
