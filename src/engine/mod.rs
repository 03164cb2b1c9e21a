//! Core engine: clock ledger, attendance classification, balance
//! accounting, the leave workflow, hierarchy resolution, and the event
//! sink.

pub mod balance;
pub mod calendar;
pub mod classifier;
pub mod clock;
pub mod events;
pub mod hierarchy;
pub mod workflow;

pub use balance::BalanceLedger;
pub use calendar::{is_working_day, working_days_between};
pub use classifier::{AttendanceClassifier, MonthlyStatistics};
pub use clock::ClockLedger;
pub use events::{EventSink, LeaveEvent, LeaveEventKind, RecordingSink, TracingSink};
pub use hierarchy::HierarchyResolver;
pub use workflow::LeaveWorkflow;
