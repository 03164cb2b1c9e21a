//! HTTP API module for the workforce engine.
//!
//! This module provides the REST endpoints for clock punches,
//! attendance queries, and the leave application lifecycle.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApplicationsQuery, AttendanceQuery, BalancesQuery, CancelRequest, ClockRequest,
    DecisionRequest, LeaveApplicationRequest, StatisticsQuery,
};
pub use response::{ApiError, ClockResponse};
pub use state::AppState;
