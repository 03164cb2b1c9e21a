//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, HolidaysConfig, LeaveTypeConfig, LeaveTypesConfig, WorkSchedule};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query the work schedule, leave types, and
/// holiday calendar.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/workforce/
/// ├── schedule.yaml     # Work window and classification thresholds
/// ├── leave_types.yaml  # Leave types with annual default allocations
/// └── holidays.yaml     # Public holiday calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use workforce_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/workforce").unwrap();
/// let leave_type = loader.get_leave_type("annual").unwrap();
/// println!("Annual allocation: {} days", leave_type.annual_default_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains
    /// invalid YAML, or fails validation (for example a work window
    /// that ends before it starts).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule_path = path.join("schedule.yaml");
        let schedule = Self::load_yaml::<WorkSchedule>(&schedule_path)?;

        let leave_types_path = path.join("leave_types.yaml");
        let leave_types_config = Self::load_yaml::<LeaveTypesConfig>(&leave_types_path)?;

        let holidays_path = path.join("holidays.yaml");
        let holidays_config = Self::load_yaml::<HolidaysConfig>(&holidays_path)?;

        Self::validate(&schedule, &leave_types_config, &schedule_path)?;

        let config = EngineConfig::new(
            schedule,
            leave_types_config.leave_types,
            holidays_config.holidays,
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration, for embedding and tests.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects configurations that cannot classify anything sensibly.
    fn validate(
        schedule: &WorkSchedule,
        leave_types: &LeaveTypesConfig,
        schedule_path: &Path,
    ) -> EngineResult<()> {
        if schedule.work_end_time <= schedule.work_start_time {
            return Err(EngineError::ConfigParseError {
                path: schedule_path.display().to_string(),
                message: "work_end_time must be after work_start_time".to_string(),
            });
        }
        if schedule.half_day_hours_threshold < Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: schedule_path.display().to_string(),
                message: "half_day_hours_threshold must not be negative".to_string(),
            });
        }
        for (id, leave_type) in &leave_types.leave_types {
            if leave_type.annual_default_days < Decimal::ZERO {
                return Err(EngineError::ConfigParseError {
                    path: schedule_path.display().to_string(),
                    message: format!("leave type '{}' has a negative annual allocation", id),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Gets a leave type by its id.
    ///
    /// Returns `LeaveTypeNotFound` for unknown ids.
    pub fn get_leave_type(&self, leave_type_id: &str) -> EngineResult<&LeaveTypeConfig> {
        self.config
            .leave_types()
            .get(leave_type_id)
            .ok_or_else(|| EngineError::LeaveTypeNotFound {
                leave_type_id: leave_type_id.to_string(),
            })
    }
}
