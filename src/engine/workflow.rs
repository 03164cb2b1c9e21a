//! Leave workflow: the approval state machine.
//!
//! Transitions: `PENDING -> {APPROVED, REJECTED, CANCELLED}` and
//! `APPROVED -> CANCELLED`; `REJECTED` and `CANCELLED` are terminal.
//! The workflow consults the hierarchy resolver for authorization and
//! the balance ledger for accounting. A decision's status transition
//! and balance delta commit as one unit: the application guard is held
//! across the delta, so there is never an observable state where one
//! changed without the other, and two decides racing on the same
//! application cannot both debit.
//!
//! Balance policy is no-hold: `submit` neither checks nor reserves
//! balance; `InsufficientBalance` can only surface from `decide`.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::engine::balance::BalanceLedger;
use crate::engine::calendar::working_days_between;
use crate::engine::events::{EventSink, LeaveEvent, LeaveEventKind};
use crate::engine::hierarchy::HierarchyResolver;
use crate::error::{EngineError, EngineResult};
use crate::models::{DecisionOutcome, LeaveApplication, LeaveStatus};
use crate::store::Store;

/// Drives leave applications through their lifecycle.
#[derive(Clone)]
pub struct LeaveWorkflow {
    store: Arc<Store>,
    config: Arc<ConfigLoader>,
    hierarchy: HierarchyResolver,
    balances: BalanceLedger,
    sink: Arc<dyn EventSink>,
}

impl LeaveWorkflow {
    /// Creates a workflow over the shared store, configuration, and
    /// event sink.
    pub fn new(store: Arc<Store>, config: Arc<ConfigLoader>, sink: Arc<dyn EventSink>) -> Self {
        let hierarchy = HierarchyResolver::new(Arc::clone(&store));
        let balances = BalanceLedger::new(Arc::clone(&store), Arc::clone(&config));
        Self {
            store,
            config,
            hierarchy,
            balances,
            sink,
        }
    }

    /// Submits a new leave application in `PENDING` state.
    ///
    /// `total_days` is the count of working days in the range minus
    /// holidays, fixed at submission. No balance is checked or reserved
    /// here (no-hold policy).
    pub fn submit(
        &self,
        employee_id: &str,
        leave_type_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: &str,
        now: NaiveDateTime,
    ) -> EngineResult<LeaveApplication> {
        let employee = self.store.get_active_employee(employee_id)?;
        let leave_type = self.config.get_leave_type(leave_type_id)?;

        if end_date < start_date {
            return Err(EngineError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }

        let total_days = working_days_between(start_date, end_date, self.config.config());

        let application = LeaveApplication {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            leave_type_id: leave_type_id.to_string(),
            start_date,
            end_date,
            total_days,
            reason: reason.to_string(),
            status: LeaveStatus::Pending,
            approved_by: None,
            rejection_reason: None,
            applied_on: now,
            decided_on: None,
        };

        self.store
            .applications()?
            .insert(application.id, application.clone());

        self.sink.publish(LeaveEvent {
            event_id: Uuid::new_v4(),
            kind: LeaveEventKind::Submitted,
            application_id: application.id,
            employee_id: employee_id.to_string(),
            recipient_id: employee.manager_id.clone(),
            message: format!(
                "{} has applied for {} from {} to {}",
                employee.full_name, leave_type.name, start_date, end_date
            ),
            occurred_at: now,
        });

        Ok(application)
    }

    /// Approves or rejects a pending application.
    ///
    /// Authorization comes from the hierarchy resolver. On approval the
    /// balance delta `+total_days` applies first; if it fails with
    /// `InsufficientBalance` the application stays `PENDING` untouched.
    pub fn decide(
        &self,
        application_id: Uuid,
        approver_id: &str,
        outcome: DecisionOutcome,
        rejection_reason: Option<String>,
        now: NaiveDateTime,
    ) -> EngineResult<LeaveApplication> {
        let approver = self.store.get_active_employee(approver_id)?;

        let updated = {
            let mut applications = self.store.applications()?;
            let application = applications.get_mut(&application_id).ok_or_else(|| {
                EngineError::ApplicationNotFound {
                    application_id: application_id.to_string(),
                }
            })?;

            if application.status.is_terminal() {
                return Err(EngineError::AlreadyTerminal {
                    application_id: application_id.to_string(),
                    status: application.status.as_str().to_string(),
                });
            }
            if application.status != LeaveStatus::Pending {
                return Err(EngineError::NotPending {
                    application_id: application_id.to_string(),
                    status: application.status.as_str().to_string(),
                });
            }

            self.hierarchy
                .is_authorized_approver(approver_id, &application.employee_id)?;

            match outcome {
                DecisionOutcome::Approved => {
                    // Application guard is held across the delta: status
                    // and balance commit or fail together.
                    self.balances.apply_delta(
                        &application.employee_id,
                        &application.leave_type_id,
                        application.start_date.year(),
                        application.total_days,
                    )?;
                    application.status = LeaveStatus::Approved;
                }
                DecisionOutcome::Rejected => {
                    application.status = LeaveStatus::Rejected;
                    application.rejection_reason = rejection_reason;
                }
            }
            application.approved_by = Some(approver_id.to_string());
            application.decided_on = Some(now);
            application.clone()
        };

        let kind = match outcome {
            DecisionOutcome::Approved => LeaveEventKind::Approved,
            DecisionOutcome::Rejected => LeaveEventKind::Rejected,
        };
        self.sink.publish(LeaveEvent {
            event_id: Uuid::new_v4(),
            kind,
            application_id,
            employee_id: updated.employee_id.clone(),
            recipient_id: Some(updated.employee_id.clone()),
            message: format!(
                "Your leave application from {} to {} has been {} by {}",
                updated.start_date,
                updated.end_date,
                updated.status.as_str(),
                approver.full_name
            ),
            occurred_at: now,
        });

        Ok(updated)
    }

    /// Cancels a pending or approved application.
    ///
    /// A pending application may only be cancelled by its owner; an
    /// approved one by its owner or an authorized approver, optionally
    /// gated to before `start_date` by configuration. Cancelling an
    /// approved application restores its balance before transitioning.
    pub fn cancel(
        &self,
        application_id: Uuid,
        requester_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<LeaveApplication> {
        self.store.get_active_employee(requester_id)?;

        let (updated, recipient) = {
            let mut applications = self.store.applications()?;
            let application = applications.get_mut(&application_id).ok_or_else(|| {
                EngineError::ApplicationNotFound {
                    application_id: application_id.to_string(),
                }
            })?;

            let is_owner = application.employee_id == requester_id;
            match application.status {
                LeaveStatus::Rejected | LeaveStatus::Cancelled => {
                    return Err(EngineError::AlreadyTerminal {
                        application_id: application_id.to_string(),
                        status: application.status.as_str().to_string(),
                    });
                }
                LeaveStatus::Pending => {
                    if !is_owner {
                        return Err(EngineError::NotAuthorized {
                            approver_id: requester_id.to_string(),
                            employee_id: application.employee_id.clone(),
                        });
                    }
                }
                LeaveStatus::Approved => {
                    if !is_owner {
                        self.hierarchy
                            .is_authorized_approver(requester_id, &application.employee_id)?;
                    }
                    let schedule = self.config.config().schedule();
                    if schedule.cancel_approved_only_before_start
                        && now.date() >= application.start_date
                    {
                        return Err(EngineError::CancellationWindowClosed {
                            application_id: application_id.to_string(),
                            start_date: application.start_date,
                        });
                    }
                    // Restore the balance before the status flips; both
                    // happen under the application guard.
                    self.balances.apply_delta(
                        &application.employee_id,
                        &application.leave_type_id,
                        application.start_date.year(),
                        -application.total_days,
                    )?;
                }
            }

            application.status = LeaveStatus::Cancelled;
            let updated = application.clone();

            let employees = self.store.employees()?;
            let recipient = employees
                .get(&updated.employee_id)
                .and_then(|e| e.manager_id.clone());
            (updated, recipient)
        };

        self.sink.publish(LeaveEvent {
            event_id: Uuid::new_v4(),
            kind: LeaveEventKind::Cancelled,
            application_id,
            employee_id: updated.employee_id.clone(),
            recipient_id: recipient,
            message: format!(
                "Leave application from {} to {} has been cancelled",
                updated.start_date, updated.end_date
            ),
            occurred_at: now,
        });

        Ok(updated)
    }

    /// Returns true if an approved application covers the date for the
    /// employee. Read-only; used by the attendance classifier.
    pub fn has_approved_leave(&self, employee_id: &str, date: NaiveDate) -> EngineResult<bool> {
        let applications = self.store.applications()?;
        Ok(applications.values().any(|a| {
            a.employee_id == employee_id
                && a.status == LeaveStatus::Approved
                && a.start_date <= date
                && date <= a.end_date
        }))
    }

    /// Returns the employee's applications, newest first, optionally
    /// filtered by status.
    pub fn applications_for(
        &self,
        employee_id: &str,
        status: Option<LeaveStatus>,
    ) -> EngineResult<Vec<LeaveApplication>> {
        let applications = self.store.applications()?;
        let mut result: Vec<LeaveApplication> = applications
            .values()
            .filter(|a| a.employee_id == employee_id)
            .filter(|a| status.is_none_or(|s| a.status == s))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.applied_on.cmp(&a.applied_on));
        Ok(result)
    }
}
