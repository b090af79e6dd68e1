//! Error types for b4x-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from b4x-core
    #[error(transparent)]
    Core(#[from] b4x_core::Error),

    /// Error from b4x-fs
    #[error(transparent)]
    Fs(#[from] b4x_fs::Error),

    /// Error from b4x-github
    #[error(transparent)]
    GitHub(#[from] b4x_github::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// Report could not be rendered as JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// `compile-only` stops the build pipeline on purpose
    #[error("Compile only: stopping the build after compilation")]
    CompileOnly,
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 1 | any other failure, and `compile-only` |
    /// | 3 | sync aborted before any change (repository missing, listing failed) |
    /// | 4 | no usable API key |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(e) if e.is_sync_abort() => 3,
            Self::Core(b4x_core::Error::Credentials { .. }) => 4,
            _ => 1,
        }
    }
}
