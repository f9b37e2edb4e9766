//! Client error types.

/// Errors that can occur when using the SubRow client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// SubRow API returned an error response.
    #[error("SubRow API error: {status} - {error}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        error: String,
        /// Machine-readable error code.
        code: Option<String>,
    },

    /// Request or response JSON could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A 2xx response decoded as JSON but did not match the result shape
    /// the calling operation declared. Signals a client-side contract
    /// violation, not a server fault.
    #[error("unexpected response shape for `{path}`: {source}")]
    UnexpectedResponseType {
        /// Resource-relative path of the failed call.
        path: String,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// True for the internal shape-mismatch error, which callers should
    /// treat as a bug report rather than an API condition.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::UnexpectedResponseType { .. })
    }

    /// Error for an operation that declared a result shape but received an
    /// empty body.
    pub(crate) fn empty_response(path: &str) -> Self {
        Self::UnexpectedResponseType {
            path: path.to_string(),
            source: serde::de::Error::custom("response body was empty"),
        }
    }
}
