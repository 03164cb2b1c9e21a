//! Error types for the Attendance & Leave Lifecycle Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the engine. Variants fall
//! into five groups: validation, state-conflict, authorization, resource,
//! and infrastructure errors. Every failure path in the engine surfaces
//! one of these variants; nothing is silently swallowed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Attendance & Leave Lifecycle Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use workforce_engine::error::EngineError;
///
/// let error = EngineError::AlreadyClockedIn {
///     employee_id: "emp_001".to_string(),
///     date: chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Employee 'emp_001' already clocked in on 2026-03-02"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The referenced employee does not exist or is inactive.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee identifier that was not found.
        employee_id: String,
    },

    /// The referenced leave type is not configured.
    #[error("Leave type not found: {leave_type_id}")]
    LeaveTypeNotFound {
        /// The leave type identifier that was not found.
        leave_type_id: String,
    },

    /// The referenced leave application does not exist.
    #[error("Leave application not found: {application_id}")]
    ApplicationNotFound {
        /// The application identifier that was not found.
        application_id: String,
    },

    /// A leave range had its end date before its start date.
    #[error("Invalid leave range: end date {end} is before start date {start}")]
    InvalidRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A clock-out time preceded the recorded clock-in time.
    #[error("Invalid clock interval for employee '{employee_id}': clock-out precedes clock-in")]
    InvalidInterval {
        /// The employee whose interval was invalid.
        employee_id: String,
    },

    /// The employee already has a clock-in recorded for the day.
    #[error("Employee '{employee_id}' already clocked in on {date}")]
    AlreadyClockedIn {
        /// The employee who attempted the duplicate clock-in.
        employee_id: String,
        /// The date of the existing clock-in.
        date: NaiveDate,
    },

    /// The employee already has a clock-out recorded for the day.
    #[error("Employee '{employee_id}' already clocked out on {date}")]
    AlreadyClockedOut {
        /// The employee who attempted the duplicate clock-out.
        employee_id: String,
        /// The date of the existing clock-out.
        date: NaiveDate,
    },

    /// Clock-out was attempted without an open clock-in for the day.
    #[error("No open clock-in for employee '{employee_id}' on {date}")]
    NoOpenClockIn {
        /// The employee who attempted to clock out.
        employee_id: String,
        /// The date with no open clock-in.
        date: NaiveDate,
    },

    /// A decision was attempted on an application that is no longer pending.
    #[error("Leave application '{application_id}' is not pending (status: {status})")]
    NotPending {
        /// The application identifier.
        application_id: String,
        /// The application's current status.
        status: String,
    },

    /// A transition was attempted from a terminal status.
    #[error("Leave application '{application_id}' is already terminal (status: {status})")]
    AlreadyTerminal {
        /// The application identifier.
        application_id: String,
        /// The application's current terminal status.
        status: String,
    },

    /// The requester is not permitted to act on the application.
    #[error("Employee '{approver_id}' is not authorized to act on behalf of '{employee_id}'")]
    NotAuthorized {
        /// The employee who attempted the action.
        approver_id: String,
        /// The employee the action targeted.
        employee_id: String,
    },

    /// The manager hierarchy contains a cycle.
    #[error("Cyclic manager hierarchy detected at employee '{employee_id}'")]
    CyclicHierarchy {
        /// The employee at which the cycle was detected.
        employee_id: String,
    },

    /// An approval would consume more days than the balance allocates.
    #[error(
        "Insufficient leave balance for employee '{employee_id}': \
         requested {requested} days, {remaining} remaining"
    )]
    InsufficientBalance {
        /// The employee whose balance was insufficient.
        employee_id: String,
        /// The days the approval would have consumed.
        requested: Decimal,
        /// The days remaining before the approval.
        remaining: Decimal,
    },

    /// Cancellation of an approved application was attempted on or after
    /// its start date while the time-gate policy is enabled.
    #[error(
        "Leave application '{application_id}' can no longer be cancelled: \
         leave started on {start_date}"
    )]
    CancellationWindowClosed {
        /// The application identifier.
        application_id: String,
        /// The application's start date.
        start_date: NaiveDate,
    },

    /// The backing store could not be accessed.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
