//! Attendance and leave lifecycle engine.
//!
//! This crate tracks employee clock punches, derives attendance
//! classifications on demand, and drives leave applications through an
//! approval workflow backed by per-year leave balances. State lives in
//! an in-memory store; the HTTP API in [`api`] exposes the engine over
//! REST.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
