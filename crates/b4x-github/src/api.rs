//! Request and response bodies of the contents API

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    /// Path from the repository root
    pub path: String,
    /// Blob hash for files, tree hash for directories
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// Body of a create or update (`PUT /contents/{path}`).
#[derive(Debug, Clone, Serialize)]
pub struct PutContent<'a> {
    pub message: &'a str,
    /// Base64 file content
    pub content: String,
    pub branch: &'a str,
    /// Current blob hash; required when replacing an existing file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

impl<'a> PutContent<'a> {
    pub fn new(message: &'a str, content: &[u8], branch: &'a str, sha: Option<&'a str>) -> Self {
        Self {
            message,
            content: STANDARD.encode(content),
            branch,
            sha,
        }
    }
}

/// Body of a delete (`DELETE /contents/{path}`).
#[derive(Debug, Clone, Serialize)]
pub struct DeleteContent<'a> {
    pub message: &'a str,
    pub sha: &'a str,
    pub branch: &'a str,
}

/// Error body GitHub sends with 4xx answers.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
