//! Configuration loading and management for the engine.
//!
//! This module provides functionality to load the engine configuration
//! from YAML files: the work schedule and classification thresholds,
//! the leave types with their annual allocations, and the holiday
//! calendar snapshot.
//!
//! # Example
//!
//! ```no_run
//! use workforce_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/workforce").unwrap();
//! println!("Work starts at {}", config.config().schedule().work_start_time);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, Holiday, LeaveTypeConfig, LeaveTypesConfig, WorkSchedule};
