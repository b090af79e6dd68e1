//! Sync execution
//!
//! Runs a [`SyncPlan`] against a [`RemoteStore`], one call at a time. A
//! failing call is recorded and the run moves on to the next action.

use std::io;

use super::plan::{SyncAction, SyncPlan};
use super::remote::{RemoteStore, RemoteTarget};
use super::report::{ActionOutcome, SyncReport};

/// Commit message for uploaded files
pub const CREATE_MESSAGE: &str = "Added file";
/// Commit message for changed files
pub const UPDATE_MESSAGE: &str = "Updated file";
/// Commit message for removed files
pub const DELETE_MESSAGE: &str = "Deleted file";

/// Executes sync plans against one remote target.
pub struct SyncExecutor<'a, S: RemoteStore + ?Sized> {
    store: &'a S,
    target: &'a RemoteTarget,
}

impl<'a, S: RemoteStore + ?Sized> SyncExecutor<'a, S> {
    pub fn new(store: &'a S, target: &'a RemoteTarget) -> Self {
        Self { store, target }
    }

    /// Execute every action of `plan` in order.
    ///
    /// `read` supplies file content for creates and updates. `observe` is
    /// called after each action, for progress output.
    pub fn execute<R, O>(&self, plan: &SyncPlan, mut read: R, mut observe: O) -> SyncReport
    where
        R: FnMut(&str) -> io::Result<Vec<u8>>,
        O: FnMut(&ActionOutcome),
    {
        let mut report = SyncReport::new(self.target.clone());
        report.unchanged = plan.unchanged.len();
        report.skipped = plan.ignored.len() + plan.protected.len() + plan.unreadable.len();

        for action in &plan.actions {
            let outcome = match self.apply(action, &mut read) {
                Ok(()) => {
                    tracing::info!(action = action.verb(), path = action.path(), "Remote updated");
                    ActionOutcome::succeeded(action.clone())
                }
                Err(message) => {
                    tracing::warn!(
                        action = action.verb(),
                        path = action.path(),
                        error = %message,
                        "Remote call failed, continuing"
                    );
                    ActionOutcome::failed(action.clone(), message)
                }
            };
            observe(&outcome);
            report.record(outcome);
        }

        report
    }

    fn apply<R>(&self, action: &SyncAction, read: &mut R) -> Result<(), String>
    where
        R: FnMut(&str) -> io::Result<Vec<u8>>,
    {
        match action {
            SyncAction::Create { path } => {
                let content = read(path).map_err(|e| e.to_string())?;
                self.store
                    .create(self.target, path, &content, CREATE_MESSAGE)
                    .map_err(|e| e.to_string())
            }
            SyncAction::Update {
                path,
                expected_hash,
            } => {
                let content = read(path).map_err(|e| e.to_string())?;
                self.store
                    .update(self.target, path, &content, UPDATE_MESSAGE, expected_hash)
                    .map_err(|e| e.to_string())
            }
            SyncAction::Delete {
                path,
                expected_hash,
            } => self
                .store
                .delete(self.target, path, DELETE_MESSAGE, expected_hash)
                .map_err(|e| e.to_string()),
        }
    }
}
