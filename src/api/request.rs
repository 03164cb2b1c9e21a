//! Request types for the workforce engine API.
//!
//! JSON bodies for the clock and leave endpoints, plus the query
//! parameter structures for the read endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{DecisionOutcome, LeaveStatus};

/// Request body for the `/clock-in` and `/clock-out` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The employee punching the clock.
    pub employee_id: String,
    /// Timestamp of the punch. Defaults to the server clock when
    /// omitted.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

/// Request body for the `/leave-applications` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveApplicationRequest {
    /// The applicant.
    pub employee_id: String,
    /// Configured leave type identifier (e.g. "annual").
    pub leave_type_id: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason shown to the approver.
    #[serde(default)]
    pub reason: String,
}

/// Request body for the `/leave-applications/:id/decision` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// The deciding manager or admin.
    pub approver_id: String,
    /// Whether the application is approved or rejected.
    pub outcome: DecisionOutcome,
    /// Reason recorded on rejection. Ignored on approval.
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// Request body for the `/leave-applications/:id/cancel` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    /// The employee or manager requesting the cancellation.
    pub requester_id: String,
}

/// Query parameters for the `/attendance` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceQuery {
    /// The employee whose attendance is requested.
    pub employee_id: String,
    /// First day of the window (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the window (inclusive).
    pub end_date: NaiveDate,
}

/// Query parameters for the `/attendance/statistics` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsQuery {
    /// The employee whose statistics are requested.
    pub employee_id: String,
    /// Calendar year of the window.
    pub year: i32,
    /// Calendar month of the window, 1 through 12.
    pub month: u32,
}

/// Query parameters for the `/leave-applications` list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationsQuery {
    /// The employee whose applications are requested.
    pub employee_id: String,
    /// Restrict to one status when present.
    #[serde(default)]
    pub status: Option<LeaveStatus>,
}

/// Query parameters for the `/leave-balances` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BalancesQuery {
    /// The employee whose balances are requested.
    pub employee_id: String,
    /// Balance year. Defaults to the current year when omitted.
    #[serde(default)]
    pub year: Option<i32>,
}
