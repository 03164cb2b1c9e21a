//! In-memory backing store for the engine.
//!
//! The store is the single source of truth for clock events, leave
//! balances, and leave applications; employee reference data is held in
//! a read-mostly section. Each section sits behind its own lock and
//! every read-modify-write completes inside a single guard hold, which
//! gives the per-key linearizability the engine requires. A poisoned
//! lock surfaces as [`EngineError::StoreUnavailable`] instead of
//! panicking the calling handler.
//!
//! Lock order is fixed as applications -> employees -> balances; the
//! workflow relies on this when it holds the application guard across a
//! balance delta so that status and balance commit as one unit.
//!
//! Acquisition itself carries no deadline: only poisoning maps to
//! [`EngineError::StoreUnavailable`], and a contended [`Mutex::lock`]
//! blocks for as long as the holder runs. Critical sections here are a
//! handful of map operations, so the wait is short in practice; a store
//! backed by an external service would need a real acquisition timeout
//! feeding the same error.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{ClockEvent, Employee, LeaveApplication, LeaveBalance};

/// Unique key for a clock event row.
pub type ClockKey = (String, NaiveDate);

/// Unique key for a leave balance row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BalanceKey {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The leave type the balance draws against.
    pub leave_type_id: String,
    /// The calendar year the balance covers.
    pub year: i32,
}

/// The engine's shared state store.
#[derive(Debug, Default)]
pub struct Store {
    employees: RwLock<HashMap<String, Employee>>,
    clock_events: Mutex<HashMap<ClockKey, ClockEvent>>,
    balances: Mutex<HashMap<BalanceKey, LeaveBalance>>,
    applications: Mutex<HashMap<Uuid, LeaveApplication>>,
}

fn poisoned(section: &str) -> EngineError {
    EngineError::StoreUnavailable {
        message: format!("{} lock poisoned", section),
    }
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the clock event section.
    pub fn clock_events(&self) -> EngineResult<MutexGuard<'_, HashMap<ClockKey, ClockEvent>>> {
        self.clock_events.lock().map_err(|_| poisoned("clock_events"))
    }

    /// Locks the balance section.
    pub fn balances(&self) -> EngineResult<MutexGuard<'_, HashMap<BalanceKey, LeaveBalance>>> {
        self.balances.lock().map_err(|_| poisoned("balances"))
    }

    /// Locks the application section.
    pub fn applications(
        &self,
    ) -> EngineResult<MutexGuard<'_, HashMap<Uuid, LeaveApplication>>> {
        self.applications.lock().map_err(|_| poisoned("applications"))
    }

    /// Takes a read lock on the employee section.
    pub fn employees(&self) -> EngineResult<RwLockReadGuard<'_, HashMap<String, Employee>>> {
        self.employees.read().map_err(|_| poisoned("employees"))
    }

    /// Takes a write lock on the employee section.
    pub fn employees_mut(
        &self,
    ) -> EngineResult<RwLockWriteGuard<'_, HashMap<String, Employee>>> {
        self.employees.write().map_err(|_| poisoned("employees"))
    }

    /// Inserts or replaces an employee reference record.
    pub fn upsert_employee(&self, employee: Employee) -> EngineResult<()> {
        self.employees_mut()?.insert(employee.id.clone(), employee);
        Ok(())
    }

    /// Fetches an active employee by id.
    ///
    /// Inactive and unknown employees both surface as `EmployeeNotFound`;
    /// the engine never acts on behalf of an inactive employee.
    pub fn get_active_employee(&self, employee_id: &str) -> EngineResult<Employee> {
        let employees = self.employees()?;
        employees
            .get(employee_id)
            .filter(|e| e.is_active)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Fetches a clock event by key, if present.
    pub fn get_clock_event(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<ClockEvent>> {
        let events = self.clock_events()?;
        Ok(events.get(&(employee_id.to_string(), date)).cloned())
    }
}
