//! Clock ledger: raw clock-in/clock-out capture.
//!
//! The ledger owns [`ClockEvent`] rows. Rows are created on clock-in,
//! mutated once on clock-out, and never deleted. Uniqueness of the
//! `(employee_id, date)` key is enforced inside a single lock hold, so
//! two concurrent clock-ins for the same employee and day yield exactly
//! one success.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::error::{EngineError, EngineResult};
use crate::models::ClockEvent;
use crate::store::Store;

/// Records raw clock events per employee per day.
#[derive(Clone)]
pub struct ClockLedger {
    store: Arc<Store>,
}

impl ClockLedger {
    /// Creates a ledger over the shared store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Records a clock-in for the employee on the timestamp's date.
    ///
    /// Fails with `AlreadyClockedIn` if a clock-in is already recorded
    /// for that day, and `EmployeeNotFound` for unknown or inactive
    /// employees.
    pub fn clock_in(&self, employee_id: &str, timestamp: NaiveDateTime) -> EngineResult<ClockEvent> {
        self.store.get_active_employee(employee_id)?;

        let date = timestamp.date();
        let key = (employee_id.to_string(), date);

        let mut events = self.store.clock_events()?;
        if let Some(existing) = events.get(&key) {
            if existing.clock_in.is_some() {
                return Err(EngineError::AlreadyClockedIn {
                    employee_id: employee_id.to_string(),
                    date,
                });
            }
        }

        let event = events
            .entry(key)
            .or_insert_with(|| ClockEvent {
                employee_id: employee_id.to_string(),
                date,
                clock_in: None,
                clock_out: None,
            });
        event.clock_in = Some(timestamp.time());
        Ok(event.clone())
    }

    /// Records a clock-out for the employee on the timestamp's date.
    ///
    /// Fails with `NoOpenClockIn` when no clock-in exists for the day,
    /// `AlreadyClockedOut` on a duplicate, and `InvalidInterval` when
    /// the clock-out would precede the recorded clock-in.
    pub fn clock_out(
        &self,
        employee_id: &str,
        timestamp: NaiveDateTime,
    ) -> EngineResult<ClockEvent> {
        self.store.get_active_employee(employee_id)?;

        let date = timestamp.date();
        let key = (employee_id.to_string(), date);

        let mut events = self.store.clock_events()?;
        let event = events.get_mut(&key).ok_or_else(|| EngineError::NoOpenClockIn {
            employee_id: employee_id.to_string(),
            date,
        })?;

        let clock_in = event.clock_in.ok_or_else(|| EngineError::NoOpenClockIn {
            employee_id: employee_id.to_string(),
            date,
        })?;
        if event.clock_out.is_some() {
            return Err(EngineError::AlreadyClockedOut {
                employee_id: employee_id.to_string(),
                date,
            });
        }
        if timestamp.time() < clock_in {
            return Err(EngineError::InvalidInterval {
                employee_id: employee_id.to_string(),
            });
        }

        event.clock_out = Some(timestamp.time());
        Ok(event.clone())
    }
}
