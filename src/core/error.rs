use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum YsError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The upstream service answered with its maintenance placeholder page
    /// instead of a JSON payload.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The JSON envelope carried a structured API error.
    #[error("yahoo error: {0}")]
    Api(String),

    /// An expected report module was absent from the payload.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// A report module was present but structurally unparsable.
    #[error("module format unexpected: {0}")]
    ModuleFormat(String),

    /// The caller violated the request contract (e.g. no symbols, no modules,
    /// or writing both a value and an error to one result field). Raised
    /// before any network activity.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl YsError {
    /// `true` when the error is a request deadline expiry.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
