//! Employee model and related types.
//!
//! Employee records are owned by an external system; the engine references
//! them read-only for hierarchy resolution and approval authorization.

use serde::{Deserialize, Serialize};

/// The role an employee holds within the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Administrative capability: may approve any application.
    Admin,
    /// Manages direct reports; may approve their applications.
    Manager,
    /// Regular employee with no approval capability.
    Employee,
}

/// A reference-data employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, used in event descriptors.
    pub full_name: String,
    /// The employee's direct manager, if any. Self-referential; the
    /// hierarchy resolver guards against cycles rather than trusting
    /// this to form a forest.
    pub manager_id: Option<String>,
    /// The employee's role.
    pub role: EmployeeRole,
    /// Whether the employee is active. Inactive employees cannot clock
    /// in, submit leave, or approve anything.
    pub is_active: bool,
}

impl Employee {
    /// Returns true if the employee holds the administrative capability.
    pub fn is_admin(&self) -> bool {
        self.role == EmployeeRole::Admin
    }
}
