//! Core data models for the Attendance & Leave Lifecycle Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod clock_event;
mod employee;
mod leave;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use clock_event::ClockEvent;
pub use employee::{Employee, EmployeeRole};
pub use leave::{DecisionOutcome, LeaveApplication, LeaveBalance, LeaveStatus};
