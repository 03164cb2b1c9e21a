//! HTTP request handlers for the workforce engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Datelike, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::request::{
    ApplicationsQuery, AttendanceQuery, BalancesQuery, CancelRequest, ClockRequest,
    DecisionRequest, LeaveApplicationRequest, StatisticsQuery,
};
use super::response::{ApiError, ApiErrorResponse, ClockResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/clock-in", post(clock_in_handler))
        .route("/clock-out", post(clock_out_handler))
        .route("/attendance", get(attendance_handler))
        .route("/attendance/statistics", get(statistics_handler))
        .route(
            "/leave-applications",
            post(submit_leave_handler).get(list_applications_handler),
        )
        .route("/leave-applications/:id/decision", put(decision_handler))
        .route("/leave-applications/:id/cancel", put(cancel_handler))
        .route("/leave-balances", get(balances_handler))
        .with_state(state)
}

/// Builds a JSON success response with an explicit content type.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Builds the error response for a failed engine operation.
fn error_response(correlation_id: Uuid, error: crate::error::EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    let api_error: ApiErrorResponse = error.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response())
        }
    }
}

fn effective_time(requested: Option<NaiveDateTime>) -> NaiveDateTime {
    requested.unwrap_or_else(|| Utc::now().naive_utc())
}

/// Handler for POST /clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let timestamp = effective_time(request.timestamp);
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        timestamp = %timestamp,
        "Processing clock-in"
    );

    let event = match state.clock().clock_in(&request.employee_id, timestamp) {
        Ok(event) => event,
        Err(err) => return error_response(correlation_id, err),
    };
    let record = match state
        .classifier()
        .classify(&request.employee_id, event.date, timestamp.date())
    {
        Ok(record) => record,
        Err(err) => return error_response(correlation_id, err),
    };
    json_response(StatusCode::OK, &ClockResponse { event, record })
}

/// Handler for POST /clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let timestamp = effective_time(request.timestamp);
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        timestamp = %timestamp,
        "Processing clock-out"
    );

    let event = match state.clock().clock_out(&request.employee_id, timestamp) {
        Ok(event) => event,
        Err(err) => return error_response(correlation_id, err),
    };
    let record = match state
        .classifier()
        .classify(&request.employee_id, event.date, timestamp.date())
    {
        Ok(record) => record,
        Err(err) => return error_response(correlation_id, err),
    };
    json_response(StatusCode::OK, &ClockResponse { event, record })
}

/// Handler for GET /attendance.
async fn attendance_handler(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let today = Utc::now().date_naive();
    match state.classifier().classify_range(
        &query.employee_id,
        query.start_date,
        query.end_date,
        today,
    ) {
        Ok(records) => json_response(StatusCode::OK, &records),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /attendance/statistics.
async fn statistics_handler(
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let today = Utc::now().date_naive();
    match state
        .classifier()
        .monthly_statistics(&query.employee_id, query.year, query.month, today)
    {
        Ok(stats) => json_response(StatusCode::OK, &stats),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /leave-applications.
async fn submit_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveApplicationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        leave_type = %request.leave_type_id,
        start_date = %request.start_date,
        end_date = %request.end_date,
        "Processing leave application"
    );

    match state.workflow().submit(
        &request.employee_id,
        &request.leave_type_id,
        request.start_date,
        request.end_date,
        &request.reason,
        Utc::now().naive_utc(),
    ) {
        Ok(application) => {
            info!(
                correlation_id = %correlation_id,
                application_id = %application.id,
                total_days = %application.total_days,
                "Leave application submitted"
            );
            json_response(StatusCode::CREATED, &application)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /leave-applications.
async fn list_applications_handler(
    State(state): State<AppState>,
    Query(query): Query<ApplicationsQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state
        .workflow()
        .applications_for(&query.employee_id, query.status)
    {
        Ok(applications) => json_response(StatusCode::OK, &applications),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /leave-applications/:id/decision.
async fn decision_handler(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        application_id = %application_id,
        approver_id = %request.approver_id,
        outcome = ?request.outcome,
        "Processing leave decision"
    );

    match state.workflow().decide(
        application_id,
        &request.approver_id,
        request.outcome,
        request.rejection_reason,
        Utc::now().naive_utc(),
    ) {
        Ok(application) => json_response(StatusCode::OK, &application),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /leave-applications/:id/cancel.
async fn cancel_handler(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    payload: Result<Json<CancelRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        application_id = %application_id,
        requester_id = %request.requester_id,
        "Processing leave cancellation"
    );

    match state.workflow().cancel(
        application_id,
        &request.requester_id,
        Utc::now().naive_utc(),
    ) {
        Ok(application) => json_response(StatusCode::OK, &application),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /leave-balances.
async fn balances_handler(
    State(state): State<AppState>,
    Query(query): Query<BalancesQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    match state.balances().balances_for(&query.employee_id, year) {
        Ok(balances) => json_response(StatusCode::OK, &balances),
        Err(err) => error_response(correlation_id, err),
    }
}
