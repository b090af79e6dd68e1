//! Blocking GitHub contents API client

use std::time::Duration;

use ureq::{Agent, AgentBuilder, Request};
use url::Url;

use b4x_core::sync::ApiKey;
use b4x_core::{RemoteListing, RemoteOperation, RemoteStore, RemoteTarget};

use crate::api::{ContentEntry, DeleteContent, EntryKind, PutContent};
use crate::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Sent as `User-Agent`; GitHub rejects requests without one.
pub const USER_AGENT: &str = "b4x_cba";

/// Upper bound for the existence check and each listing request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(11);

/// GitHub REST client scoped to one API key.
pub struct GitHubClient {
    base: Url,
    key: ApiKey,
    /// For mutations, no timeout
    agent: Agent,
    /// For `exists` and `list`
    probe: Agent,
}

impl GitHubClient {
    /// Client for `api.github.com`.
    pub fn new(key: ApiKey) -> Result<Self> {
        Self::with_base_url(key, DEFAULT_API_BASE)
    }

    /// Client for another API root, such as a GitHub Enterprise server
    /// (`https://ghe.example.com/api/v3`).
    pub fn with_base_url(key: ApiKey, base: &str) -> Result<Self> {
        let invalid = |message: String| Error::InvalidBaseUrl {
            url: base.to_string(),
            message,
        };
        let base = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".to_string()));
        }

        Ok(Self {
            base,
            key,
            agent: AgentBuilder::new().user_agent(USER_AGENT).build(),
            probe: AgentBuilder::new()
                .user_agent(USER_AGENT)
                .timeout(PROBE_TIMEOUT)
                .build(),
        })
    }

    /// `{base}/repos/{owner}/{repo}` followed by `extra` segments.
    ///
    /// Every segment is percent-encoded on its own, so file names with
    /// spaces or `#` stay one path segment.
    pub fn repo_url(&self, target: &RemoteTarget, extra: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| Error::InvalidBaseUrl {
                url: self.base.to_string(),
                message: "not a hierarchical URL".to_string(),
            })?;
            segments
                .pop_if_empty()
                .extend(["repos", target.owner.as_str(), target.repo.as_str()])
                .extend(extra.iter().filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    /// `{base}/repos/{owner}/{repo}/contents/{path}`
    pub fn contents_url(&self, target: &RemoteTarget, path: &str) -> Result<Url> {
        let mut extra = vec!["contents"];
        extra.extend(path.split('/'));
        self.repo_url(target, &extra)
    }

    fn authorize(&self, request: Request) -> Request {
        request
            .set("Authorization", &format!("token {}", self.key.expose()))
            .set("Accept", "application/vnd.github+json")
    }

    fn fetch_dir(&self, target: &RemoteTarget, dir: &str) -> Result<Vec<ContentEntry>> {
        let mut url = self.contents_url(target, dir)?;
        url.query_pairs_mut().append_pair("ref", &target.branch);

        tracing::debug!(dir, "Listing remote directory");
        let response = self
            .authorize(self.probe.request_url("GET", &url))
            .call()?;
        response
            .into_json()
            .map_err(|e| Error::Decode(e.to_string()))
    }

    /// Add files of `entries` to `out`, descending into directories by
    /// their full path.
    fn collect(
        &self,
        target: &RemoteTarget,
        entries: Vec<ContentEntry>,
        out: &mut RemoteListing,
    ) -> Result<()> {
        for entry in entries {
            match entry.kind {
                EntryKind::File => {
                    out.insert(entry.path, entry.sha);
                }
                EntryKind::Dir => {
                    let children = self.fetch_dir(target, &entry.path)?;
                    self.collect(target, children, out)?;
                }
                other => tracing::debug!(path = %entry.path, kind = ?other, "Skipping remote entry"),
            }
        }
        Ok(())
    }

    fn put(
        &self,
        target: &RemoteTarget,
        path: &str,
        content: &[u8],
        message: &str,
        sha: Option<&str>,
    ) -> Result<()> {
        let url = self.contents_url(target, path)?;
        let body = PutContent::new(message, content, &target.branch, sha);
        self.authorize(self.agent.request_url("PUT", &url))
            .send_json(&body)?;
        Ok(())
    }
}

impl RemoteStore for GitHubClient {
    fn exists(&self, target: &RemoteTarget) -> b4x_core::Result<bool> {
        let request = self
            .repo_url(target, &[])
            .map(|url| self.authorize(self.probe.request_url("GET", &url)))
            .map_err(|e| e.into_remote(RemoteOperation::Exists, None))?;

        match request.call().map_err(Error::from) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e.into_remote(RemoteOperation::Exists, None)),
        }
    }

    fn list(&self, target: &RemoteTarget) -> b4x_core::Result<RemoteListing> {
        let root = match self.fetch_dir(target, "") {
            Ok(entries) => entries,
            // An empty repository has no root tree yet
            Err(e) if e.is_not_found() => {
                tracing::info!(target = %target, "Remote repository is empty");
                return Ok(RemoteListing::new());
            }
            Err(e) => return Err(e.into_remote(RemoteOperation::List, None)),
        };

        let mut listing = RemoteListing::new();
        self.collect(target, root, &mut listing)
            .map_err(|e| e.into_remote(RemoteOperation::List, None))?;
        tracing::debug!(target = %target, files = listing.len(), "Listed remote files");
        Ok(listing)
    }

    fn create(
        &self,
        target: &RemoteTarget,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> b4x_core::Result<()> {
        self.put(target, path, content, message, None)
            .map_err(|e| e.into_remote(RemoteOperation::Create, Some(path)))
    }

    fn update(
        &self,
        target: &RemoteTarget,
        path: &str,
        content: &[u8],
        message: &str,
        expected_hash: &str,
    ) -> b4x_core::Result<()> {
        self.put(target, path, content, message, Some(expected_hash))
            .map_err(|e| e.into_remote(RemoteOperation::Update, Some(path)))
    }

    fn delete(
        &self,
        target: &RemoteTarget,
        path: &str,
        message: &str,
        expected_hash: &str,
    ) -> b4x_core::Result<()> {
        let body = DeleteContent {
            message,
            sha: expected_hash,
            branch: &target.branch,
        };
        self.contents_url(target, path)
            .and_then(|url| {
                self.authorize(self.agent.request_url("DELETE", &url))
                    .send_json(&body)?;
                Ok(())
            })
            .map_err(|e| e.into_remote(RemoteOperation::Delete, Some(path)))
    }
}
