//! Error types for the runner client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the GitLab API
#[derive(Debug, Error)]
pub enum Error {
    /// Identifier could not be turned into a path segment
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Base URL or joined endpoint URL is malformed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Options could not be encoded as a query string
    #[error("failed to encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// Options could not be encoded as a JSON body
    #[error("failed to encode request body: {0}")]
    Body(#[source] serde_json::Error),

    /// Header value contains bytes HTTP does not allow
    #[error("invalid header value for {name}: {value:?}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
        /// Rejected value
        value: String,
    },

    /// Request could not be assembled
    #[error("failed to build request: {0}")]
    Build(#[source] reqwest::Error),

    /// Network failure while sending the request or reading the response
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// API returned a non-2xx status code
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body as sent by the server
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}
