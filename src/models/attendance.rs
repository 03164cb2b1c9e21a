//! Attendance status and the derived attendance record.
//!
//! An [`AttendanceRecord`] is a value object computed from a clock event,
//! the approved-leave lookup, and the work schedule. It is never stored;
//! the classifier recomputes it on read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The classified status of one employee on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Clocked in on or before the late threshold.
    Present,
    /// Clocked in after the late threshold.
    Late,
    /// No clock event on a past working day.
    Absent,
    /// Worked hours fell below the half-day threshold.
    HalfDay,
    /// An approved leave application covers the date.
    OnLeave,
}

impl AttendanceStatus {
    /// Returns the snake_case wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::HalfDay => "half_day",
            AttendanceStatus::OnLeave => "on_leave",
        }
    }
}

/// The derived attendance classification for one employee on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record describes.
    pub employee_id: String,
    /// The date the record describes.
    pub date: NaiveDate,
    /// The classified status.
    pub status: AttendanceStatus,
    /// Worked hours, zero until a clock-out is recorded (and always
    /// zero for leave and absence).
    pub hours_worked: Decimal,
    /// True while the classification is not yet terminal: the employee
    /// clocked in today but has not clocked out.
    pub provisional: bool,
}
