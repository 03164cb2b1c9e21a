//! Response types for the workforce engine API.
//!
//! This module defines the error response structures and the mapping
//! from engine errors to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AttendanceRecord, ClockEvent};

/// Response body for the `/clock-in` and `/clock-out` endpoints.
///
/// Carries the updated clock event together with the attendance record
/// derived from it. The record is provisional after a clock-in and final
/// after a clock-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockResponse {
    /// The clock event after the punch.
    pub event: ClockEvent,
    /// The attendance classification for the punched day.
    pub record: Option<AttendanceRecord>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            EngineError::EmployeeNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::LeaveTypeNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("LEAVE_TYPE_NOT_FOUND", message),
            ),
            EngineError::ApplicationNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("APPLICATION_NOT_FOUND", message),
            ),
            EngineError::InvalidRange { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_RANGE", message),
            ),
            EngineError::InvalidInterval { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_INTERVAL", message),
            ),
            EngineError::InsufficientBalance { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INSUFFICIENT_BALANCE", message),
            ),
            EngineError::CancellationWindowClosed { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("CANCELLATION_WINDOW_CLOSED", message),
            ),
            EngineError::AlreadyClockedIn { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::new("ALREADY_CLOCKED_IN", message),
            ),
            EngineError::AlreadyClockedOut { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::new("ALREADY_CLOCKED_OUT", message),
            ),
            EngineError::NoOpenClockIn { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::new("NO_OPEN_CLOCK_IN", message),
            ),
            EngineError::NotPending { .. } => {
                Self::new(StatusCode::CONFLICT, ApiError::new("NOT_PENDING", message))
            }
            EngineError::AlreadyTerminal { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::new("ALREADY_TERMINAL", message),
            ),
            EngineError::NotAuthorized { .. } => Self::new(
                StatusCode::FORBIDDEN,
                ApiError::new("NOT_AUTHORIZED", message),
            ),
            EngineError::CyclicHierarchy { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("HIERARCHY_ERROR", message),
            ),
            EngineError::StoreUnavailable { .. } => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("STORE_UNAVAILABLE", message),
            ),
        }
    }
}
