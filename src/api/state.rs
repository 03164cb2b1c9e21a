//! Application state for the workforce engine API.
//!
//! The state wires the shared store and configuration into the engine
//! components once, at construction; handlers clone the state cheaply.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::engine::{
    AttendanceClassifier, BalanceLedger, ClockLedger, EventSink, LeaveWorkflow, TracingSink,
};
use crate::store::Store;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    config: Arc<ConfigLoader>,
    clock: ClockLedger,
    classifier: AttendanceClassifier,
    workflow: LeaveWorkflow,
    balances: BalanceLedger,
}

impl AppState {
    /// Creates the application state with the given configuration and
    /// event sink over an empty store.
    pub fn new(config: ConfigLoader, sink: Arc<dyn EventSink>) -> Self {
        let store = Arc::new(Store::new());
        let config = Arc::new(config);
        let workflow = LeaveWorkflow::new(Arc::clone(&store), Arc::clone(&config), sink);
        let classifier = AttendanceClassifier::new(
            Arc::clone(&store),
            Arc::clone(&config),
            workflow.clone(),
        );
        let clock = ClockLedger::new(Arc::clone(&store));
        let balances = BalanceLedger::new(Arc::clone(&store), Arc::clone(&config));
        Self {
            store,
            config,
            clock,
            classifier,
            workflow,
            balances,
        }
    }

    /// Creates the state with a tracing event sink.
    pub fn with_tracing_sink(config: ConfigLoader) -> Self {
        Self::new(config, Arc::new(TracingSink))
    }

    /// Returns the shared store, used to seed employees.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the clock ledger.
    pub fn clock(&self) -> &ClockLedger {
        &self.clock
    }

    /// Returns the attendance classifier.
    pub fn classifier(&self) -> &AttendanceClassifier {
        &self.classifier
    }

    /// Returns the leave workflow.
    pub fn workflow(&self) -> &LeaveWorkflow {
        &self.workflow
    }

    /// Returns the balance ledger.
    pub fn balances(&self) -> &BalanceLedger {
        &self.balances
    }
}
