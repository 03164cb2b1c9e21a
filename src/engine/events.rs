//! Event descriptors for the external notification sink.
//!
//! The engine only produces descriptors; delivery is an external
//! concern. A sink failure never fails the operation that emitted the
//! event, so [`EventSink::publish`] is infallible by contract.

use std::sync::Mutex;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// The kind of lifecycle change an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveEventKind {
    /// A new application was submitted.
    Submitted,
    /// An application was approved.
    Approved,
    /// An application was rejected.
    Rejected,
    /// An application was cancelled.
    Cancelled,
}

/// A descriptor of one leave lifecycle change, addressed to a recipient.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveEvent {
    /// Unique identifier for the event.
    pub event_id: Uuid,
    /// The kind of change.
    pub kind: LeaveEventKind,
    /// The application the event concerns.
    pub application_id: Uuid,
    /// The applicant.
    pub employee_id: String,
    /// Who should be notified, when anyone should.
    pub recipient_id: Option<String>,
    /// Human-readable summary for the notification body.
    pub message: String,
    /// When the change happened.
    pub occurred_at: NaiveDateTime,
}

/// Consumer seam for leave events.
pub trait EventSink: Send + Sync {
    /// Accepts one event descriptor for external delivery.
    fn publish(&self, event: LeaveEvent);
}

/// Default sink: logs the descriptor through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, event: LeaveEvent) {
        info!(
            event_id = %event.event_id,
            kind = ?event.kind,
            application_id = %event.application_id,
            employee_id = %event.employee_id,
            recipient_id = event.recipient_id.as_deref().unwrap_or("-"),
            message = %event.message,
            "Leave event emitted"
        );
    }
}

/// Sink that retains every published event, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<LeaveEvent>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything published so far.
    pub fn events(&self) -> Vec<LeaveEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: LeaveEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
