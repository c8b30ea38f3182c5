use potaful_store::StoreError;

/// Errors from the pot service, recommendation webhook and weather clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, or `Error: <status>`.
        message: String,
    },

    /// 2xx response whose envelope status is not `SUCCESS`.
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// Envelope reported success but carried no `data`.
    #[error("Response is missing its data payload")]
    MissingData,

    /// No auth token is available for an authenticated call.
    #[error("Token not found")]
    MissingToken,

    /// Caller-supplied input failed validation before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A base URL could not be parsed or extended.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The recommendation webhook returned an empty list.
    #[error("No recommendations found")]
    NoRecommendations,

    /// Persisting session data failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for client return values.
pub type ApiResult<T> = Result<T, ApiError>;
