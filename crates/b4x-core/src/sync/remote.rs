//! The remote store seam
//!
//! Sync never talks HTTP itself. It drives a [`RemoteStore`], which the CLI
//! backs with the GitHub contents API and tests back with an in-memory map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Remote path to blob hash, one consistent snapshot per run.
pub type RemoteListing = BTreeMap<String, String>;

/// The repository and branch a sync run is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTarget {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RemoteTarget {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

/// Calls a [`RemoteStore`] can make, used in errors and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteOperation {
    Exists,
    List,
    Create,
    Update,
    Delete,
}

impl RemoteOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content-addressed remote file tree.
///
/// Implementations must be synchronous. `exists` and `list` are expected to
/// enforce their own timeouts; mutations run without one.
pub trait RemoteStore {
    /// Whether the repository exists.
    ///
    /// `Ok(false)` means the store answered "not found". Transport failures
    /// must be reported as errors, never as `false`.
    fn exists(&self, target: &RemoteTarget) -> Result<bool>;

    /// Recursively list every file of the branch with its blob hash.
    fn list(&self, target: &RemoteTarget) -> Result<RemoteListing>;

    /// Create a new file.
    fn create(&self, target: &RemoteTarget, path: &str, content: &[u8], message: &str)
    -> Result<()>;

    /// Replace a file whose current blob hash is `expected_hash`.
    fn update(
        &self,
        target: &RemoteTarget,
        path: &str,
        content: &[u8],
        message: &str,
        expected_hash: &str,
    ) -> Result<()>;

    /// Delete a file whose current blob hash is `expected_hash`.
    fn delete(
        &self,
        target: &RemoteTarget,
        path: &str,
        message: &str,
        expected_hash: &str,
    ) -> Result<()>;
}
