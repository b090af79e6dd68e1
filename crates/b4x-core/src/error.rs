//! Error types for b4x-core

use std::path::PathBuf;

use crate::sync::{RemoteOperation, RemoteTarget};

/// Result type for b4x-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in b4x-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source path of an action does not exist
    #[error("Source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// version.txt does not hold a `major.minor.build` version
    #[error("Invalid version '{content}': {reason}")]
    InvalidVersion { content: String, reason: String },

    /// A date/time format could not be converted
    #[error("Invalid date/time format '{format}': {reason}")]
    InvalidFormat { format: String, reason: String },

    /// A `%JAR%` style variable was used but no jar exists in Objects
    #[error("{variable} is used but no .jar file exists in {objects}")]
    MissingJar { variable: String, objects: PathBuf },

    /// An ignore pattern could not be compiled
    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidIgnorePattern { pattern: String, message: String },

    /// A required setting was not given on the command line or in config
    #[error("Missing setting: {name}. {hint}")]
    MissingSetting { name: String, hint: String },

    /// No usable API key
    #[error("Credentials unavailable: {message}")]
    Credentials { message: String },

    /// The remote repository does not exist (or is not visible with the key)
    #[error("Repository {target} not found")]
    RepositoryNotFound { target: RemoteTarget },

    /// A call against the remote store failed
    #[error("Remote {operation} failed{}: {message}", .path.as_ref().map(|p| format!(" for {p}")).unwrap_or_default())]
    Remote {
        operation: RemoteOperation,
        path: Option<String>,
        message: String,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from b4x-fs
    #[error(transparent)]
    Fs(#[from] b4x_fs::Error),

    /// Archive error
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a remote error for `operation`, optionally tied to a file path.
    pub fn remote(
        operation: RemoteOperation,
        path: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::Remote {
            operation,
            path: path.map(str::to_string),
            message: message.into(),
        }
    }

    /// Whether this error aborts a sync run before any mutation.
    pub fn is_sync_abort(&self) -> bool {
        matches!(
            self,
            Self::RepositoryNotFound { .. }
                | Self::Remote {
                    operation: RemoteOperation::Exists | RemoteOperation::List,
                    ..
                }
        )
    }
}
