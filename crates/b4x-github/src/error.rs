//! Error types for b4x-github

use b4x_core::RemoteOperation;

/// Result type for b4x-github operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to GitHub
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API base URL cannot be used to build request URLs
    #[error("Invalid API base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// GitHub answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never got an answer (DNS, TLS, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not what the API documents
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl Error {
    /// Whether GitHub answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Convert to a core error for the given remote call.
    pub fn into_remote(self, operation: RemoteOperation, path: Option<&str>) -> b4x_core::Error {
        b4x_core::Error::remote(operation, path, self.to_string())
    }
}

impl From<ureq::Error> for Error {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                let message = serde_json::from_str::<crate::api::ErrorBody>(&body)
                    .map(|e| e.message)
                    .unwrap_or(body);
                Self::Status { status, message }
            }
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}
