//! Shared fixtures for b4x-core integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;

use b4x_core::{Error, RemoteListing, RemoteOperation, RemoteStore, RemoteTarget, Result};
use b4x_fs::compute_blob_hash;

/// A call received by [`RecordingRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { path: String, message: String },
    Update { path: String, expected: String },
    Delete { path: String, expected: String },
}

/// In-memory store that records every mutation and applies it to its
/// listing, so repeated runs see their own effects.
#[derive(Default)]
pub struct RecordingRemote {
    files: RefCell<RemoteListing>,
    calls: RefCell<Vec<Call>>,
    failing: BTreeSet<String>,
    missing: bool,
    list_fails: bool,
}

impl RecordingRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the remote with `path` holding `content`.
    pub fn with_file(self, path: &str, content: &[u8]) -> Self {
        self.with_hash(path, &compute_blob_hash(content))
    }

    pub fn with_hash(self, path: &str, hash: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.to_string(), hash.to_string());
        self
    }

    /// Every mutation of `path` fails.
    pub fn failing_on(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    /// `exists` answers "not found".
    pub fn missing(mut self) -> Self {
        self.missing = true;
        self
    }

    pub fn list_fails(mut self) -> Self {
        self.list_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn listing(&self) -> RemoteListing {
        self.files.borrow().clone()
    }

    fn check(&self, operation: RemoteOperation, path: &str) -> Result<()> {
        if self.failing.contains(path) {
            return Err(Error::remote(operation, Some(path), "409 Conflict"));
        }
        Ok(())
    }
}

impl RemoteStore for RecordingRemote {
    fn exists(&self, _target: &RemoteTarget) -> Result<bool> {
        Ok(!self.missing)
    }

    fn list(&self, _target: &RemoteTarget) -> Result<RemoteListing> {
        if self.list_fails {
            return Err(Error::remote(RemoteOperation::List, None, "connection reset"));
        }
        Ok(self.listing())
    }

    fn create(
        &self,
        _target: &RemoteTarget,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> Result<()> {
        self.calls.borrow_mut().push(Call::Create {
            path: path.to_string(),
            message: message.to_string(),
        });
        self.check(RemoteOperation::Create, path)?;
        self.files
            .borrow_mut()
            .insert(path.to_string(), compute_blob_hash(content));
        Ok(())
    }

    fn update(
        &self,
        _target: &RemoteTarget,
        path: &str,
        content: &[u8],
        _message: &str,
        expected_hash: &str,
    ) -> Result<()> {
        self.calls.borrow_mut().push(Call::Update {
            path: path.to_string(),
            expected: expected_hash.to_string(),
        });
        self.check(RemoteOperation::Update, path)?;
        self.files
            .borrow_mut()
            .insert(path.to_string(), compute_blob_hash(content));
        Ok(())
    }

    fn delete(
        &self,
        _target: &RemoteTarget,
        path: &str,
        _message: &str,
        expected_hash: &str,
    ) -> Result<()> {
        self.calls.borrow_mut().push(Call::Delete {
            path: path.to_string(),
            expected: expected_hash.to_string(),
        });
        self.check(RemoteOperation::Delete, path)?;
        self.files.borrow_mut().remove(path);
        Ok(())
    }
}

pub fn target() -> RemoteTarget {
    RemoteTarget::new("octo", "app", "main")
}
