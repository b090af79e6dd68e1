//! API key resolution
//!
//! The key is resolved once, before any remote call, by walking a
//! [`CredentialChain`]. The resulting [`ApiKey`] is handed to the remote
//! client; sync code never reads the environment or key files itself.

use std::fmt;
use std::path::PathBuf;

use b4x_fs::{NormalizedPath, ProjectPath, io};

use crate::{Error, Result};

/// Environment variable checked first.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Folder under the user config directory holding the fallback key file.
pub const CONFIG_DIR_NAME: &str = "b4x-actions";

/// An API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// A place an API key may come from.
pub trait CredentialProvider {
    /// Human readable source, for logs and error messages.
    fn describe(&self) -> String;

    /// `Ok(None)` when this source has no key; errors when it has one that
    /// is unusable.
    fn api_key(&self) -> Result<Option<ApiKey>>;
}

/// Reads the key from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredential {
    fn describe(&self) -> String {
        format!("environment variable {}", self.var)
    }

    fn api_key(&self) -> Result<Option<ApiKey>> {
        Ok(std::env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(ApiKey))
    }
}

/// Reads the key from a text file. An existing but empty file is an error.
#[derive(Debug, Clone)]
pub struct FileCredential {
    path: NormalizedPath,
}

impl FileCredential {
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Write `key` to this file, replacing any previous key. On Unix the
    /// file is readable by its owner only.
    pub fn store(&self, key: &ApiKey) -> Result<()> {
        io::write_private(&self.path, key.expose())?;
        tracing::info!(path = %self.path, "Stored API key");
        Ok(())
    }
}

impl CredentialProvider for FileCredential {
    fn describe(&self) -> String {
        self.path.to_string()
    }

    fn api_key(&self) -> Result<Option<ApiKey>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let key = io::read_text(&self.path)?.trim().to_string();
        if key.is_empty() {
            return Err(Error::Credentials {
                message: format!("API key file {} is empty", self.path),
            });
        }
        Ok(Some(ApiKey(key)))
    }
}

/// Ordered credential sources; the first one with a key wins.
#[derive(Default)]
pub struct CredentialChain {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// `GITHUB_TOKEN`, then the install folder key file, then the key file
    /// under the user config directory.
    pub fn standard(install_dir: Option<&NormalizedPath>) -> Self {
        let mut chain = Self::new().with(EnvCredential::new(TOKEN_ENV_VAR));
        if let Some(dir) = install_dir {
            chain = chain.with(FileCredential::new(dir.join(ProjectPath::ApiKeyFile.as_str())));
        }
        if let Some(path) = user_key_file() {
            chain = chain.with(FileCredential::new(path));
        }
        chain
    }

    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Sources in lookup order.
    pub fn sources(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.describe()).collect()
    }

    /// The first key found, or `None` when no source has one.
    pub fn resolve(&self) -> Result<Option<ApiKey>> {
        for provider in &self.providers {
            if let Some(key) = provider.api_key()? {
                tracing::debug!(source = %provider.describe(), "Resolved API key");
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

/// `<config_dir>/b4x-actions/github_api_key.txt`
fn user_key_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(CONFIG_DIR_NAME)
            .join(ProjectPath::ApiKeyFile.as_str())
    })
}
