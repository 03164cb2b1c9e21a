//! Balance ledger: atomic deltas on leave balances.
//!
//! This is the only component allowed to mutate `used_days` and
//! `remaining_days`. Every delta is a read-modify-write completed inside
//! one balance-lock hold, so concurrent approve/cancel calls against the
//! same `(employee, leave type, year)` tuple serialize cleanly.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::LeaveBalance;
use crate::store::{BalanceKey, Store};

/// Holds and mutates per-employee, per-leave-type, per-year balances.
#[derive(Clone)]
pub struct BalanceLedger {
    store: Arc<Store>,
    config: Arc<ConfigLoader>,
}

impl BalanceLedger {
    /// Creates a ledger over the shared store and configuration.
    pub fn new(store: Arc<Store>, config: Arc<ConfigLoader>) -> Self {
        Self { store, config }
    }

    /// Atomically adds `delta_days` to `used_days` for the keyed balance.
    ///
    /// A missing balance row is materialized from the leave type's
    /// configured annual default before the delta applies. A positive
    /// delta that would push `used_days` past `total_allocated` fails
    /// with `InsufficientBalance` and mutates nothing; restorative
    /// negative deltas are never blocked. `remaining_days` is recomputed
    /// in the same critical section.
    pub fn apply_delta(
        &self,
        employee_id: &str,
        leave_type_id: &str,
        year: i32,
        delta_days: Decimal,
    ) -> EngineResult<LeaveBalance> {
        let annual_default = self.config.get_leave_type(leave_type_id)?.annual_default_days;

        let key = BalanceKey {
            employee_id: employee_id.to_string(),
            leave_type_id: leave_type_id.to_string(),
            year,
        };

        let mut balances = self.store.balances()?;
        let balance = balances
            .entry(key)
            .or_insert_with(|| LeaveBalance::new(employee_id, leave_type_id, year, annual_default));

        if delta_days > Decimal::ZERO
            && balance.used_days + delta_days > balance.total_allocated
        {
            return Err(EngineError::InsufficientBalance {
                employee_id: employee_id.to_string(),
                requested: delta_days,
                remaining: balance.remaining_days,
            });
        }

        // used_days never goes negative, even on an over-restore
        balance.used_days = (balance.used_days + delta_days).max(Decimal::ZERO);
        balance.remaining_days = balance.total_allocated - balance.used_days;
        Ok(balance.clone())
    }

    /// Returns all balances for the employee and year, one per
    /// configured leave type. Missing rows are materialized lazily,
    /// this query being their first reference.
    pub fn balances_for(&self, employee_id: &str, year: i32) -> EngineResult<Vec<LeaveBalance>> {
        self.store.get_active_employee(employee_id)?;
        let leave_types: Vec<(String, Decimal)> = self
            .config
            .config()
            .leave_types()
            .iter()
            .map(|(id, lt)| (id.clone(), lt.annual_default_days))
            .collect();

        let mut balances = self.store.balances()?;
        let mut result: Vec<LeaveBalance> = leave_types
            .into_iter()
            .map(|(leave_type_id, annual_default)| {
                let key = BalanceKey {
                    employee_id: employee_id.to_string(),
                    leave_type_id: leave_type_id.clone(),
                    year,
                };
                balances
                    .entry(key)
                    .or_insert_with(|| {
                        LeaveBalance::new(employee_id, &leave_type_id, year, annual_default)
                    })
                    .clone()
            })
            .collect();
        result.sort_by(|a, b| a.leave_type_id.cmp(&b.leave_type_id));
        Ok(result)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, LeaveTypeConfig, WorkSchedule};
    use crate::models::{Employee, EmployeeRole};
    use chrono::NaiveTime;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn test_config() -> Arc<ConfigLoader> {
        let schedule = WorkSchedule {
            work_start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            work_end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            late_arrival_threshold_minutes: 15,
            half_day_hours_threshold: Decimal::new(40, 1),
            cancel_approved_only_before_start: false,
        };
        let leave_types = HashMap::from([
            (
                "annual".to_string(),
                LeaveTypeConfig {
                    name: "Annual Leave".to_string(),
                    annual_default_days: Decimal::new(20, 0),
                },
            ),
            (
                "sick".to_string(),
                LeaveTypeConfig {
                    name: "Sick Leave".to_string(),
                    annual_default_days: Decimal::new(12, 0),
                },
            ),
        ]);
        Arc::new(ConfigLoader::from_config(EngineConfig::new(
            schedule,
            leave_types,
            vec![],
        )))
    }

    fn ledger() -> BalanceLedger {
        let store = Arc::new(Store::new());
        store
            .upsert_employee(Employee {
                id: "emp_001".to_string(),
                full_name: "Asha Rao".to_string(),
                manager_id: None,
                role: EmployeeRole::Employee,
                is_active: true,
            })
            .unwrap();
        BalanceLedger::new(store, test_config())
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_first_delta_materializes_balance() {
        let ledger = ledger();
        let balance = ledger
            .apply_delta("emp_001", "annual", 2026, dec("3"))
            .unwrap();

        assert_eq!(balance.total_allocated, dec("20"));
        assert_eq!(balance.used_days, dec("3"));
        assert_eq!(balance.remaining_days, dec("17"));
    }

    #[test]
    fn test_positive_delta_past_allocation_fails() {
        let ledger = ledger();
        ledger
            .apply_delta("emp_001", "annual", 2026, dec("18"))
            .unwrap();

        let result = ledger.apply_delta("emp_001", "annual", 2026, dec("3"));
        match result {
            Err(EngineError::InsufficientBalance {
                requested,
                remaining,
                ..
            }) => {
                assert_eq!(requested, dec("3"));
                assert_eq!(remaining, dec("2"));
            }
            other => panic!("Expected InsufficientBalance, got {:?}", other),
        }

        // A failed delta mutates nothing
        let balance = ledger
            .apply_delta("emp_001", "annual", 2026, Decimal::ZERO)
            .unwrap();
        assert_eq!(balance.used_days, dec("18"));
    }

    #[test]
    fn test_exact_fit_delta_succeeds() {
        let ledger = ledger();
        ledger
            .apply_delta("emp_001", "annual", 2026, dec("18"))
            .unwrap();
        let balance = ledger
            .apply_delta("emp_001", "annual", 2026, dec("2"))
            .unwrap();
        assert_eq!(balance.used_days, dec("20"));
        assert_eq!(balance.remaining_days, Decimal::ZERO);
    }

    #[test]
    fn test_negative_delta_restores() {
        let ledger = ledger();
        ledger
            .apply_delta("emp_001", "annual", 2026, dec("5"))
            .unwrap();
        let balance = ledger
            .apply_delta("emp_001", "annual", 2026, dec("-5"))
            .unwrap();

        assert_eq!(balance.used_days, Decimal::ZERO);
        assert_eq!(balance.remaining_days, dec("20"));
    }

    #[test]
    fn test_negative_delta_never_blocked() {
        let ledger = ledger();
        ledger
            .apply_delta("emp_001", "annual", 2026, dec("20"))
            .unwrap();
        // Full allocation used; a restore still succeeds
        let balance = ledger
            .apply_delta("emp_001", "annual", 2026, dec("-1"))
            .unwrap();
        assert_eq!(balance.used_days, dec("19"));
    }

    #[test]
    fn test_over_restore_clamps_at_zero() {
        let ledger = ledger();
        let balance = ledger
            .apply_delta("emp_001", "annual", 2026, dec("-4"))
            .unwrap();
        assert_eq!(balance.used_days, Decimal::ZERO);
        assert_eq!(balance.remaining_days, dec("20"));
    }

    #[test]
    fn test_unknown_leave_type_fails() {
        let ledger = ledger();
        let result = ledger.apply_delta("emp_001", "sabbatical", 2026, dec("1"));
        assert!(matches!(
            result,
            Err(EngineError::LeaveTypeNotFound { .. })
        ));
    }

    #[test]
    fn test_years_are_independent() {
        let ledger = ledger();
        ledger
            .apply_delta("emp_001", "annual", 2026, dec("20"))
            .unwrap();
        let balance = ledger
            .apply_delta("emp_001", "annual", 2027, dec("5"))
            .unwrap();
        assert_eq!(balance.used_days, dec("5"));
        assert_eq!(balance.year, 2027);
    }

    #[test]
    fn test_balances_for_materializes_all_types() {
        let ledger = ledger();
        let balances = ledger.balances_for("emp_001", 2026).unwrap();

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].leave_type_id, "annual");
        assert_eq!(balances[0].total_allocated, dec("20"));
        assert_eq!(balances[1].leave_type_id, "sick");
        assert_eq!(balances[1].total_allocated, dec("12"));
    }

    #[test]
    fn test_concurrent_deltas_serialize() {
        let ledger = ledger();
        // 10 threads each trying to consume 3 of 20 days: at most 6 can fit
        let threads: Vec<_> = (0..10)
            .map(|_| {
                let ledger = ledger.clone();
                std::thread::spawn(move || ledger.apply_delta("emp_001", "annual", 2026, dec("3")))
            })
            .collect();

        let results: Vec<_> = threads.into_iter().map(|t| t.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 6);

        let balance = ledger
            .apply_delta("emp_001", "annual", 2026, Decimal::ZERO)
            .unwrap();
        assert_eq!(balance.used_days, dec("18"));
        assert_eq!(
            balance.remaining_days,
            balance.total_allocated - balance.used_days
        );
    }

    proptest! {
        // The derived-field invariant holds after any sequence of deltas.
        #[test]
        fn prop_remaining_always_allocated_minus_used(deltas in prop::collection::vec(-10i64..=10, 1..40)) {
            let ledger = ledger();
            for delta in deltas {
                let _ = ledger.apply_delta("emp_001", "annual", 2026, Decimal::new(delta, 0));
                let balance = ledger
                    .apply_delta("emp_001", "annual", 2026, Decimal::ZERO)
                    .unwrap();
                prop_assert_eq!(
                    balance.remaining_days,
                    balance.total_allocated - balance.used_days
                );
                prop_assert!(balance.used_days >= Decimal::ZERO);
                prop_assert!(balance.used_days <= balance.total_allocated);
            }
        }
    }
}
