//! Configuration types for the engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// The configured work window and classification thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkSchedule {
    /// The standard start-of-day time.
    pub work_start_time: NaiveTime,
    /// The standard end-of-day time.
    pub work_end_time: NaiveTime,
    /// Minutes after `work_start_time` before a clock-in counts as late.
    pub late_arrival_threshold_minutes: u32,
    /// Worked hours below this count classify a completed day as half-day.
    pub half_day_hours_threshold: Decimal,
    /// When true, an approved application may only be cancelled before
    /// its start date.
    #[serde(default)]
    pub cancel_approved_only_before_start: bool,
}

impl WorkSchedule {
    /// The latest clock-in time still classified as present.
    pub fn late_threshold(&self) -> NaiveTime {
        self.work_start_time + TimeDelta::minutes(i64::from(self.late_arrival_threshold_minutes))
    }
}

/// A configured leave type.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypeConfig {
    /// The human-readable name of the leave type.
    pub name: String,
    /// Days allocated per year when a balance is first materialized.
    pub annual_default_days: Decimal,
}

/// Leave types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// Map of leave type id to its configuration.
    pub leave_types: HashMap<String, LeaveTypeConfig>,
}

/// A configured public holiday.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Holidays configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// The configured holiday calendar.
    pub holidays: Vec<Holiday>,
}

/// The complete engine configuration loaded from YAML files.
///
/// Immutable once constructed; components receive it at construction
/// time rather than reading ambient global state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    schedule: WorkSchedule,
    leave_types: HashMap<String, LeaveTypeConfig>,
    holidays: Vec<Holiday>,
}

impl EngineConfig {
    /// Creates an EngineConfig from its component parts.
    pub fn new(
        schedule: WorkSchedule,
        leave_types: HashMap<String, LeaveTypeConfig>,
        holidays: Vec<Holiday>,
    ) -> Self {
        Self {
            schedule,
            leave_types,
            holidays,
        }
    }

    /// Returns the work schedule.
    pub fn schedule(&self) -> &WorkSchedule {
        &self.schedule
    }

    /// Returns all configured leave types.
    pub fn leave_types(&self) -> &HashMap<String, LeaveTypeConfig> {
        &self.leave_types
    }

    /// Returns the configured holiday calendar.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Returns true if the date is a configured holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }
}
