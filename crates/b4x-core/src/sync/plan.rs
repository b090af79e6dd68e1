//! Sync planning
//!
//! Planning compares the local inventory with one remote snapshot and decides
//! the calls to make. It performs no remote calls itself, which keeps dry
//! runs and tests free of any store.

use std::collections::BTreeSet;
use std::io;

use serde::{Deserialize, Serialize};

use b4x_fs::{NormalizedPath, compute_file_blob_hash, list_files};

use super::ignore::IgnoreRules;
use super::remote::RemoteListing;
use crate::Result;

/// Remote file never deleted unless configured otherwise.
pub const DEFAULT_PROTECTED: &str = "README.md";

/// One remote mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SyncAction {
    /// Upload a file missing remotely.
    Create { path: String },
    /// Replace a remote file whose content differs.
    Update { path: String, expected_hash: String },
    /// Remove a remote file that no longer exists locally.
    Delete { path: String, expected_hash: String },
}

impl SyncAction {
    pub fn path(&self) -> &str {
        match self {
            Self::Create { path } | Self::Update { path, .. } | Self::Delete { path, .. } => path,
        }
    }

    /// Short verb for progress output.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// A local file whose content could not be read for hashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadableFile {
    pub path: String,
    pub message: String,
}

/// The outcome of planning: the calls to make plus what was left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPlan {
    /// Creates and updates in local enumeration order, then deletes.
    pub actions: Vec<SyncAction>,
    /// Local files whose hash already matches the remote.
    pub unchanged: Vec<String>,
    /// Local files excluded by ignore rules.
    pub ignored: Vec<String>,
    /// Remote files kept only because they are protected.
    pub protected: Vec<String>,
    /// Local files that could not be hashed; they are neither uploaded nor
    /// deleted remotely.
    pub unreadable: Vec<UnreadableFile>,
}

impl SyncPlan {
    /// Whether the remote already mirrors the local tree.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn creates(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Create { .. }))
    }

    pub fn updates(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Update { .. }))
    }

    pub fn deletes(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Delete { .. }))
    }

    fn count(&self, predicate: impl Fn(&SyncAction) -> bool) -> usize {
        self.actions.iter().filter(|a| predicate(a)).count()
    }
}

/// Computes the calls that make a remote mirror the local tree.
#[derive(Debug, Clone)]
pub struct SyncPlanner {
    ignore: IgnoreRules,
    protected: Vec<String>,
}

impl SyncPlanner {
    /// A planner with the given ignore rules and `README.md` protected.
    pub fn new(ignore: IgnoreRules) -> Self {
        Self {
            ignore,
            protected: vec![DEFAULT_PROTECTED.to_string()],
        }
    }

    /// Replace the protected remote names.
    pub fn with_protected<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignore_rules(&self) -> &IgnoreRules {
        &self.ignore
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|name| name == path)
    }

    /// Plan against `remote` for the given local paths.
    ///
    /// `local` is the complete enumeration, in order. `hash` is called once
    /// per non-ignored path and must return the blob hash of its content.
    ///
    /// Remote entries are deleted when they are not protected and not in the
    /// local set after ignore filtering, so the remote copy of an ignored
    /// file is removed. Files that fail to hash still count as present.
    pub fn plan<S, H>(&self, local: &[S], remote: &RemoteListing, mut hash: H) -> SyncPlan
    where
        S: AsRef<str>,
        H: FnMut(&str) -> io::Result<String>,
    {
        let mut plan = SyncPlan::default();
        let mut present: BTreeSet<&str> = BTreeSet::new();

        for path in local {
            let path = path.as_ref();
            if self.ignore.is_ignored(path) {
                tracing::debug!(path, "Ignored");
                plan.ignored.push(path.to_string());
                continue;
            }
            present.insert(path);

            let local_hash = match hash(path) {
                Ok(h) => h,
                Err(e) => {
                    tracing::warn!(path, error = %e, "Could not hash file, skipping");
                    plan.unreadable.push(UnreadableFile {
                        path: path.to_string(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            match remote.get(path) {
                None => {
                    tracing::debug!(path, "Missing remotely");
                    plan.actions.push(SyncAction::Create {
                        path: path.to_string(),
                    });
                }
                Some(existing) if *existing != local_hash => {
                    tracing::debug!(path, remote = %existing, local = %local_hash, "Changed");
                    plan.actions.push(SyncAction::Update {
                        path: path.to_string(),
                        expected_hash: existing.clone(),
                    });
                }
                Some(_) => {
                    tracing::debug!(path, "Up to date");
                    plan.unchanged.push(path.to_string());
                }
            }
        }

        for (path, remote_hash) in remote {
            if self.is_protected(path) {
                if !present.contains(path.as_str()) {
                    plan.protected.push(path.clone());
                }
                continue;
            }
            if present.contains(path.as_str()) {
                continue;
            }
            tracing::debug!(path = %path, "Missing locally");
            plan.actions.push(SyncAction::Delete {
                path: path.clone(),
                expected_hash: remote_hash.clone(),
            });
        }

        plan
    }

    /// Enumerate `root` and plan with blob hashes read from disk.
    pub fn plan_directory(&self, root: &NormalizedPath, remote: &RemoteListing) -> Result<SyncPlan> {
        let native = root.to_native();
        let local: Vec<String> = list_files(&native)?
            .into_iter()
            .map(NormalizedPath::into_string)
            .collect();
        let plan = self.plan(&local, remote, |path| {
            compute_file_blob_hash(&native.join(path))
        });
        tracing::info!(
            root = %root,
            creates = plan.creates(),
            updates = plan.updates(),
            deletes = plan.deletes(),
            "Planned sync"
        );
        Ok(plan)
    }
}
