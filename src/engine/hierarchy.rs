//! Hierarchy resolver: manager chains and approval authorization.
//!
//! The employee table is self-referential through `manager_id`, so the
//! resolver never assumes tree shape: the upward walk keeps a visited
//! set and a depth guard equal to the employee count, and reports
//! `CyclicHierarchy` on a revisit.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{EngineError, EngineResult};
use crate::store::Store;

/// Resolves approval chains over the employee -> manager relation.
#[derive(Clone)]
pub struct HierarchyResolver {
    store: Arc<Store>,
}

impl HierarchyResolver {
    /// Creates a resolver over the shared store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Returns the ordered chain of manager ids above the employee,
    /// nearest manager first. The employee itself is not included.
    pub fn approver_chain_for(&self, employee_id: &str) -> EngineResult<Vec<String>> {
        let employees = self.store.employees()?;
        let depth_guard = employees.len();

        let mut employee =
            employees
                .get(employee_id)
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    employee_id: employee_id.to_string(),
                })?;

        let mut visited: HashSet<&str> = HashSet::from([employee_id]);
        let mut chain = Vec::new();

        while let Some(manager_id) = employee.manager_id.as_deref() {
            if !visited.insert(manager_id) || chain.len() >= depth_guard {
                return Err(EngineError::CyclicHierarchy {
                    employee_id: manager_id.to_string(),
                });
            }
            let manager =
                employees
                    .get(manager_id)
                    .ok_or_else(|| EngineError::EmployeeNotFound {
                        employee_id: manager_id.to_string(),
                    })?;
            chain.push(manager.id.clone());
            employee = manager;
        }

        Ok(chain)
    }

    /// Succeeds if the approver may decide applications for the employee:
    /// either the employee's direct manager or an active admin.
    pub fn is_authorized_approver(&self, approver_id: &str, employee_id: &str) -> EngineResult<()> {
        let approver = self.store.get_active_employee(approver_id)?;
        if approver.is_admin() {
            return Ok(());
        }

        let employees = self.store.employees()?;
        let employee = employees
            .get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;

        if employee.manager_id.as_deref() == Some(approver_id) {
            Ok(())
        } else {
            Err(EngineError::NotAuthorized {
                approver_id: approver_id.to_string(),
                employee_id: employee_id.to_string(),
            })
        }
    }
}
