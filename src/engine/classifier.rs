//! Attendance classification.
//!
//! Classification is a pure projection over the clock ledger, the leave
//! workflow, and the work schedule. Nothing here is persisted: the same
//! inputs always reproduce the same record, and an approved leave or a
//! late clock-out changes the answer retroactively.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::ConfigLoader;
use crate::engine::calendar::is_working_day;
use crate::engine::workflow::LeaveWorkflow;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AttendanceStatus, ClockEvent};
use crate::store::Store;

/// Derives attendance records on demand from clock events, approved
/// leave, and the configured work schedule.
#[derive(Clone)]
pub struct AttendanceClassifier {
    store: Arc<Store>,
    config: Arc<ConfigLoader>,
    workflow: LeaveWorkflow,
}

/// Per-status day counts and total worked hours for one employee over
/// one calendar month.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MonthlyStatistics {
    /// Employee the statistics were computed for.
    pub employee_id: String,
    /// Calendar year of the window.
    pub year: i32,
    /// Calendar month of the window, 1 through 12.
    pub month: u32,
    /// Days classified `PRESENT`.
    pub present_days: u32,
    /// Days classified `LATE`.
    pub late_days: u32,
    /// Days classified `HALF_DAY`.
    pub half_days: u32,
    /// Days classified `ABSENT`.
    pub absent_days: u32,
    /// Days classified `ON_LEAVE`.
    pub leave_days: u32,
    /// Sum of worked hours across all classified days.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_hours_worked: Decimal,
}

impl AttendanceClassifier {
    /// Creates a classifier over the shared store, configuration, and
    /// workflow.
    pub fn new(store: Arc<Store>, config: Arc<ConfigLoader>, workflow: LeaveWorkflow) -> Self {
        Self {
            store,
            config,
            workflow,
        }
    }

    /// Classifies one day for one employee.
    ///
    /// Returns `None` for future dates and for days with nothing to
    /// report: a non-working day with no clock event, or `today` before
    /// any clock event exists (absence is only assigned to past working
    /// days). A record for a day whose clock event is still open
    /// carries zero hours; when that day is `today` the record is
    /// marked provisional.
    pub fn classify(
        &self,
        employee_id: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>> {
        if date > today {
            return Ok(None);
        }

        if self.workflow.has_approved_leave(employee_id, date)? {
            return Ok(Some(AttendanceRecord {
                employee_id: employee_id.to_string(),
                date,
                status: AttendanceStatus::OnLeave,
                hours_worked: Decimal::ZERO,
                provisional: false,
            }));
        }

        let event = self.store.get_clock_event(employee_id, date)?;
        let working = is_working_day(date, self.config.config());

        let Some(event) = event else {
            // Absence is only a verdict on finished days: today stays
            // unreported until a clock event or approved leave appears.
            if working && date < today {
                return Ok(Some(AttendanceRecord {
                    employee_id: employee_id.to_string(),
                    date,
                    status: AttendanceStatus::Absent,
                    hours_worked: Decimal::ZERO,
                    provisional: false,
                }));
            }
            return Ok(None);
        };

        Ok(Some(self.classify_event(&event, date == today)))
    }

    /// Classifies a single clock event against the work schedule.
    fn classify_event(&self, event: &ClockEvent, is_today: bool) -> AttendanceRecord {
        let schedule = self.config.config().schedule();
        let late_threshold = schedule.late_threshold();

        let arrival_status = match event.clock_in {
            Some(clock_in) if clock_in > late_threshold => AttendanceStatus::Late,
            _ => AttendanceStatus::Present,
        };

        match event.hours_worked() {
            Some(hours) => {
                let status = if hours < schedule.half_day_hours_threshold {
                    AttendanceStatus::HalfDay
                } else {
                    arrival_status
                };
                AttendanceRecord {
                    employee_id: event.employee_id.clone(),
                    date: event.date,
                    status,
                    hours_worked: hours,
                    provisional: false,
                }
            }
            // Open interval: the arrival verdict stands, hours are not
            // yet known.
            None => AttendanceRecord {
                employee_id: event.employee_id.clone(),
                date: event.date,
                status: arrival_status,
                hours_worked: Decimal::ZERO,
                provisional: is_today,
            },
        }
    }

    /// Classifies every day in `[start, end]`, skipping days with
    /// nothing to report. Inverted ranges yield an empty list.
    pub fn classify_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let mut records = Vec::new();
        let mut day = start;
        while day <= end {
            if let Some(record) = self.classify(employee_id, day, today)? {
                records.push(record);
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        Ok(records)
    }

    /// Aggregates one calendar month of classifications into per-status
    /// counts and a worked-hours total.
    pub fn monthly_statistics(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> EngineResult<MonthlyStatistics> {
        let mut stats = MonthlyStatistics {
            employee_id: employee_id.to_string(),
            year,
            month,
            present_days: 0,
            late_days: 0,
            half_days: 0,
            absent_days: 0,
            leave_days: 0,
            total_hours_worked: Decimal::ZERO,
        };

        let Some(start) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Ok(stats);
        };
        let end = match start.checked_add_months(chrono::Months::new(1)) {
            Some(next) => next.pred_opt().unwrap_or(start),
            None => start,
        };

        for record in self.classify_range(employee_id, start, end, today)? {
            match record.status {
                AttendanceStatus::Present => stats.present_days += 1,
                AttendanceStatus::Late => stats.late_days += 1,
                AttendanceStatus::HalfDay => stats.half_days += 1,
                AttendanceStatus::Absent => stats.absent_days += 1,
                AttendanceStatus::OnLeave => stats.leave_days += 1,
            }
            stats.total_hours_worked += record.hours_worked;
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, Holiday, LeaveTypeConfig, WorkSchedule};
    use crate::engine::clock::ClockLedger;
    use crate::engine::events::{EventSink, RecordingSink};
    use crate::models::{DecisionOutcome, Employee, EmployeeRole};
    use chrono::{NaiveDateTime, NaiveTime};
    use std::collections::HashMap;
    use std::str::FromStr;

    struct Fixture {
        classifier: AttendanceClassifier,
        clock: ClockLedger,
        workflow: LeaveWorkflow,
    }

    fn fixture() -> Fixture {
        let schedule = WorkSchedule {
            work_start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            work_end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            late_arrival_threshold_minutes: 15,
            half_day_hours_threshold: Decimal::new(40, 1),
            cancel_approved_only_before_start: false,
        };
        let leave_types = HashMap::from([(
            "annual".to_string(),
            LeaveTypeConfig {
                name: "Annual Leave".to_string(),
                annual_default_days: Decimal::new(20, 0),
            },
        )]);
        let holidays = vec![Holiday {
            date: date("2026-04-10"),
            name: "Founders Day".to_string(),
        }];
        let config = Arc::new(ConfigLoader::from_config(EngineConfig::new(
            schedule,
            leave_types,
            holidays,
        )));

        let store = Arc::new(Store::new());
        for (id, manager, role) in [
            ("lead", None, EmployeeRole::Manager),
            ("dev", Some("lead"), EmployeeRole::Employee),
        ] {
            store
                .upsert_employee(Employee {
                    id: id.to_string(),
                    full_name: format!("Employee {}", id),
                    manager_id: manager.map(String::from),
                    role,
                    is_active: true,
                })
                .unwrap();
        }

        let sink = Arc::new(RecordingSink::new()) as Arc<dyn EventSink>;
        let workflow = LeaveWorkflow::new(Arc::clone(&store), Arc::clone(&config), sink);
        let classifier =
            AttendanceClassifier::new(Arc::clone(&store), config, workflow.clone());
        let clock = ClockLedger::new(store);
        Fixture {
            classifier,
            clock,
            workflow,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const TODAY: &str = "2026-04-30";

    fn classify(f: &Fixture, day: &str) -> Option<AttendanceRecord> {
        f.classifier.classify("dev", date(day), date(TODAY)).unwrap()
    }

    #[test]
    fn test_on_time_full_day_is_present() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-06 08:58:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-06 18:00:00")).unwrap();

        let record = classify(&f, "2026-04-06").unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.hours_worked, dec("9.03"));
        assert!(!record.provisional);
    }

    #[test]
    fn test_arrival_past_threshold_is_late() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-06 09:16:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-06 18:00:00")).unwrap();

        let record = classify(&f, "2026-04-06").unwrap();
        assert_eq!(record.status, AttendanceStatus::Late);
    }

    #[test]
    fn test_arrival_exactly_at_threshold_is_present() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-06 09:15:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-06 18:00:00")).unwrap();

        let record = classify(&f, "2026-04-06").unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_short_day_is_half_day_even_when_late() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-06 10:00:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-06 13:00:00")).unwrap();

        let record = classify(&f, "2026-04-06").unwrap();
        assert_eq!(record.status, AttendanceStatus::HalfDay);
        assert_eq!(record.hours_worked, dec("3.00"));
    }

    #[test]
    fn test_exactly_threshold_hours_is_not_half_day() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-06 09:00:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-06 13:00:00")).unwrap();

        let record = classify(&f, "2026-04-06").unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.hours_worked, dec("4.00"));
    }

    #[test]
    fn test_past_working_day_without_event_is_absent() {
        let f = fixture();
        let record = classify(&f, "2026-04-06").unwrap();
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert_eq!(record.hours_worked, Decimal::ZERO);
    }

    #[test]
    fn test_today_without_event_is_not_yet_absent() {
        let f = fixture();
        // TODAY is a Thursday working day; before any clock event it has
        // nothing to report, while the same situation yesterday does.
        assert!(classify(&f, TODAY).is_none());
        assert_eq!(
            classify(&f, "2026-04-29").unwrap().status,
            AttendanceStatus::Absent
        );
    }

    #[test]
    fn test_weekend_and_holiday_without_event_yield_nothing() {
        let f = fixture();
        assert!(classify(&f, "2026-04-04").is_none()); // Saturday
        assert!(classify(&f, "2026-04-10").is_none()); // Founders Day
    }

    #[test]
    fn test_weekend_with_clock_event_is_still_classified() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-04 10:00:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-04 16:00:00")).unwrap();

        let record = classify(&f, "2026-04-04").unwrap();
        assert_eq!(record.status, AttendanceStatus::Late);
        assert_eq!(record.hours_worked, dec("6.00"));
    }

    #[test]
    fn test_future_date_is_not_classified() {
        let f = fixture();
        assert!(classify(&f, "2026-05-01").is_none());
    }

    #[test]
    fn test_open_event_today_is_provisional() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-30 09:05:00")).unwrap();

        let record = classify(&f, TODAY).unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.hours_worked, Decimal::ZERO);
        assert!(record.provisional);
    }

    #[test]
    fn test_open_event_in_the_past_is_not_provisional() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-06 09:05:00")).unwrap();

        let record = classify(&f, "2026-04-06").unwrap();
        assert_eq!(record.hours_worked, Decimal::ZERO);
        assert!(!record.provisional);
    }

    #[test]
    fn test_approved_leave_wins_over_clock_event() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-06 09:00:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-06 18:00:00")).unwrap();

        let application = f
            .workflow
            .submit(
                "dev",
                "annual",
                date("2026-04-06"),
                date("2026-04-07"),
                "trip",
                at("2026-03-20 10:00:00"),
            )
            .unwrap();
        f.workflow
            .decide(
                application.id,
                "lead",
                DecisionOutcome::Approved,
                None,
                at("2026-03-21 09:00:00"),
            )
            .unwrap();

        let record = classify(&f, "2026-04-06").unwrap();
        assert_eq!(record.status, AttendanceStatus::OnLeave);
        assert_eq!(record.hours_worked, Decimal::ZERO);
    }

    #[test]
    fn test_classification_is_retroactive_after_approval() {
        let f = fixture();
        // Absent before approval
        assert_eq!(
            classify(&f, "2026-04-06").unwrap().status,
            AttendanceStatus::Absent
        );

        let application = f
            .workflow
            .submit(
                "dev",
                "annual",
                date("2026-04-06"),
                date("2026-04-06"),
                "trip",
                at("2026-03-20 10:00:00"),
            )
            .unwrap();
        f.workflow
            .decide(
                application.id,
                "lead",
                DecisionOutcome::Approved,
                None,
                at("2026-03-21 09:00:00"),
            )
            .unwrap();

        assert_eq!(
            classify(&f, "2026-04-06").unwrap().status,
            AttendanceStatus::OnLeave
        );
    }

    #[test]
    fn test_classify_range_skips_unreportable_days() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-06 09:00:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-06 18:00:00")).unwrap();

        // Mon 06 worked, Tue-Thu absent, Fri 10 holiday, Sat-Sun skipped
        let records = f
            .classifier
            .classify_range("dev", date("2026-04-06"), date("2026-04-12"), date(TODAY))
            .unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].status, AttendanceStatus::Present);
        assert!(records[1..]
            .iter()
            .all(|r| r.status == AttendanceStatus::Absent));
    }

    #[test]
    fn test_classify_range_inverted_is_empty() {
        let f = fixture();
        let records = f
            .classifier
            .classify_range("dev", date("2026-04-12"), date("2026-04-06"), date(TODAY))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_monthly_statistics_counts_and_hours() {
        let f = fixture();
        f.clock.clock_in("dev", at("2026-04-06 09:00:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-06 18:00:00")).unwrap();
        f.clock.clock_in("dev", at("2026-04-07 09:30:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-07 18:00:00")).unwrap();
        f.clock.clock_in("dev", at("2026-04-08 09:00:00")).unwrap();
        f.clock.clock_out("dev", at("2026-04-08 12:00:00")).unwrap();

        let application = f
            .workflow
            .submit(
                "dev",
                "annual",
                date("2026-04-09"),
                date("2026-04-09"),
                "trip",
                at("2026-03-20 10:00:00"),
            )
            .unwrap();
        f.workflow
            .decide(
                application.id,
                "lead",
                DecisionOutcome::Approved,
                None,
                at("2026-03-21 09:00:00"),
            )
            .unwrap();

        let stats = f
            .classifier
            .monthly_statistics("dev", 2026, 4, date(TODAY))
            .unwrap();
        assert_eq!(stats.present_days, 1);
        assert_eq!(stats.late_days, 1);
        assert_eq!(stats.half_days, 1);
        assert_eq!(stats.leave_days, 1);
        // April 2026 has 22 working days; the holiday and TODAY (no
        // event yet) are unreportable, leaving 20, minus the 4 above.
        assert_eq!(stats.absent_days, 16);
        assert_eq!(stats.total_hours_worked, dec("20.50"));
    }
}
