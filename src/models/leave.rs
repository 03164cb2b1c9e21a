//! Leave application and leave balance models.
//!
//! The leave workflow exclusively owns status transitions on
//! [`LeaveApplication`]; the balance ledger exclusively owns mutation of
//! `used_days`/`remaining_days` on [`LeaveBalance`]. Applications are
//! never deleted; cancellation is a status, not a deletion.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The lifecycle status of a leave application.
///
/// Transitions: `Pending -> {Approved, Rejected, Cancelled}` and
/// `Approved -> Cancelled`. `Rejected` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted and awaiting a decision.
    Pending,
    /// Approved; balance has been debited.
    Approved,
    /// Rejected by an approver. Terminal.
    Rejected,
    /// Cancelled by the owner or an approver. Terminal.
    Cancelled,
}

impl LeaveStatus {
    /// Returns true for statuses that permit no further transition at all.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LeaveStatus::Rejected | LeaveStatus::Cancelled)
    }

    /// Returns the snake_case wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }
}

/// The outcome an approver selects when deciding an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Approve the application and debit the balance.
    Approved,
    /// Reject the application; the balance is untouched.
    Rejected,
}

/// A leave application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Unique identifier for the application.
    pub id: Uuid,
    /// The employee requesting leave.
    pub employee_id: String,
    /// The configured leave type being drawn against.
    pub leave_type_id: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Working days in the range minus holidays. Computed at submission
    /// and immutable thereafter.
    pub total_days: Decimal,
    /// The applicant's stated reason.
    pub reason: String,
    /// Current lifecycle status.
    pub status: LeaveStatus,
    /// The approver who decided the application, once decided.
    pub approved_by: Option<String>,
    /// The approver's reason when rejecting.
    pub rejection_reason: Option<String>,
    /// When the application was submitted.
    pub applied_on: NaiveDateTime,
    /// When the application was approved or rejected.
    pub decided_on: Option<NaiveDateTime>,
}

/// Per-employee, per-leave-type, per-year balance counters.
///
/// Invariant: `remaining_days == total_allocated - used_days` holds after
/// every committed mutation, and `used_days` never goes negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The leave type the balance draws against.
    pub leave_type_id: String,
    /// The calendar year the balance covers.
    pub year: i32,
    /// Days allocated for the year.
    pub total_allocated: Decimal,
    /// Days consumed by approved applications.
    pub used_days: Decimal,
    /// Derived: `total_allocated - used_days`.
    pub remaining_days: Decimal,
}

impl LeaveBalance {
    /// Creates a fresh balance with nothing used.
    pub fn new(
        employee_id: impl Into<String>,
        leave_type_id: impl Into<String>,
        year: i32,
        total_allocated: Decimal,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            leave_type_id: leave_type_id.into(),
            year,
            total_allocated,
            used_days: Decimal::ZERO,
            remaining_days: total_allocated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!LeaveStatus::Pending.is_terminal());
        assert!(!LeaveStatus::Approved.is_terminal());
        assert!(LeaveStatus::Rejected.is_terminal());
        assert!(LeaveStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_decision_outcome_deserializes() {
        let outcome: DecisionOutcome = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(outcome, DecisionOutcome::Approved);
        let outcome: DecisionOutcome = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(outcome, DecisionOutcome::Rejected);
    }

    #[test]
    fn test_new_balance_has_full_remainder() {
        let balance = LeaveBalance::new("emp_001", "annual", 2026, Decimal::new(20, 0));
        assert_eq!(balance.used_days, Decimal::ZERO);
        assert_eq!(balance.remaining_days, Decimal::new(20, 0));
        assert_eq!(
            balance.remaining_days,
            balance.total_allocated - balance.used_days
        );
    }

    #[test]
    fn test_application_round_trip() {
        let application = LeaveApplication {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            leave_type_id: "annual".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 8).unwrap(),
            total_days: Decimal::new(30, 1),
            reason: "family trip".to_string(),
            status: LeaveStatus::Pending,
            approved_by: None,
            rejection_reason: None,
            applied_on: NaiveDate::from_ymd_opt(2026, 3, 20)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap(),
            decided_on: None,
        };

        let json = serde_json::to_string(&application).unwrap();
        let deserialized: LeaveApplication = serde_json::from_str(&json).unwrap();
        assert_eq!(application, deserialized);
    }
}
