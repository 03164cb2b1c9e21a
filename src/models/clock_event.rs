//! Clock event model.
//!
//! A clock event is the raw attendance record for one employee on one
//! date: at most one clock-in and one clock-out. Rows are created on
//! clock-in, mutated once on clock-out, and never deleted.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw clock-in/clock-out record for one employee on one date.
///
/// The `(employee_id, date)` pair is the unique key; the clock ledger
/// enforces that atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// The employee the event belongs to.
    pub employee_id: String,
    /// The date of the event.
    pub date: NaiveDate,
    /// The recorded clock-in time, if any.
    pub clock_in: Option<NaiveTime>,
    /// The recorded clock-out time, if any.
    pub clock_out: Option<NaiveTime>,
}

impl ClockEvent {
    /// Calculates the worked hours for this event.
    ///
    /// Returns `None` until both clock-in and clock-out are recorded.
    /// The result is fractional hours rounded to two decimal places,
    /// matching what the ledger persists.
    ///
    /// # Examples
    ///
    /// ```
    /// use workforce_engine::models::ClockEvent;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let event = ClockEvent {
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     clock_in: NaiveTime::from_hms_opt(9, 0, 0),
    ///     clock_out: NaiveTime::from_hms_opt(17, 30, 0),
    /// };
    /// assert_eq!(event.hours_worked(), Some(Decimal::new(85, 1))); // 8.5
    /// ```
    pub fn hours_worked(&self) -> Option<Decimal> {
        let clock_in = self.clock_in?;
        let clock_out = self.clock_out?;

        let minutes = (clock_out - clock_in).num_minutes();
        if minutes < 0 {
            return None;
        }

        let hours = Decimal::new(minutes, 0) / Decimal::new(60, 0);
        Some(hours.round_dp(2))
    }

    /// Returns true if a clock-in has been recorded without a clock-out.
    pub fn is_open(&self) -> bool {
        self.clock_in.is_some() && self.clock_out.is_none()
    }
}
