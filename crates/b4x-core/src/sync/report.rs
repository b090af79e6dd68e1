//! Results of executing a sync plan

use serde::{Deserialize, Serialize};

use super::plan::SyncAction;
use super::remote::RemoteTarget;

/// What happened to one planned action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: SyncAction,
    /// Failure message; `None` when the call succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionOutcome {
    pub fn succeeded(action: SyncAction) -> Self {
        Self {
            action,
            error: None,
        }
    }

    pub fn failed(action: SyncAction, error: impl Into<String>) -> Self {
        Self {
            action,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Report from a sync run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub target: RemoteTarget,
    /// Whether every call succeeded
    pub success: bool,
    /// One entry per planned action, in execution order
    pub outcomes: Vec<ActionOutcome>,
    /// Files that were already in sync
    pub unchanged: usize,
    /// Files left alone (ignored, protected or unreadable)
    pub skipped: usize,
}

impl SyncReport {
    pub fn new(target: RemoteTarget) -> Self {
        Self {
            target,
            success: true,
            outcomes: Vec::new(),
            unchanged: 0,
            skipped: 0,
        }
    }

    pub fn record(&mut self, outcome: ActionOutcome) {
        if !outcome.is_success() {
            self.success = false;
        }
        self.outcomes.push(outcome);
    }

    pub fn created(&self) -> usize {
        self.count_ok(|a| matches!(a, SyncAction::Create { .. }))
    }

    pub fn updated(&self) -> usize {
        self.count_ok(|a| matches!(a, SyncAction::Update { .. }))
    }

    pub fn deleted(&self) -> usize {
        self.count_ok(|a| matches!(a, SyncAction::Delete { .. }))
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    fn count_ok(&self, predicate: impl Fn(&SyncAction) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.is_success() && predicate(&o.action))
            .count()
    }
}
