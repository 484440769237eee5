use thiserror::Error;

/// Errors returned by the upstream gateway.
///
/// A barcode lookup miss is not an error; it surfaces as `Ok(None)` from
/// [`crate::OffClient::product_by_barcode`].
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request exceeded its deadline. Never retried here; retry policy
    /// belongs to callers, and the upstream is a rate-limited public API.
    #[error("upstream request timed out")]
    Timeout,

    /// Network failure or a non-2xx HTTP status.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// The base URL handed to the client could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The response body was not the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Unavailable(e.to_string())
        }
    }
}
