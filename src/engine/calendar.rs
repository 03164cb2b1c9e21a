//! Working-day calendar arithmetic.
//!
//! The holiday calendar itself is external; the engine consumes a
//! snapshot of it through [`EngineConfig`] and only does the counting.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::config::EngineConfig;

/// Returns true if the date is a working day: Monday through Friday and
/// not a configured holiday.
pub fn is_working_day(date: NaiveDate, config: &EngineConfig) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !config.is_holiday(date)
}

/// Counts working days in the inclusive range `[start, end]`, excluding
/// weekends and configured holidays.
///
/// Callers validate the range first; an inverted range counts as zero.
pub fn working_days_between(start: NaiveDate, end: NaiveDate, config: &EngineConfig) -> Decimal {
    let mut days: i64 = 0;
    let mut current = start;
    while current <= end {
        if is_working_day(current, config) {
            days += 1;
        }
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    Decimal::new(days, 0)
}
