//! Error types for retail availability operations

use thiserror::Error;

/// Retail pipeline errors
#[derive(Debug, Error)]
pub enum RetailError {
    /// Requested max-count is not a positive decimal number
    #[error("{mention} `{value}` is not a valid max value, use a positive whole number")]
    InvalidMaxValue { mention: String, value: String },

    /// Unprivileged caller asked for more results than the default cap
    #[error("{mention} you can only request up to {cap} results, `{requested}` is over the limit")]
    QuotaExceeded {
        mention: String,
        requested: u32,
        cap: u32,
    },

    /// Upstream API answered with a non-success status
    #[error("API call failed with status {status}: {body}")]
    UpstreamCallFailed { status: u16, body: String },

    /// Search matched no products
    #[error("No product was found with query {query}")]
    NoResults { query: String },

    /// Stock API returned a different number of records than products submitted
    #[error("Correlation mismatch: {products} products but {availabilities} availabilities")]
    CorrelationMismatch {
        products: usize,
        availabilities: usize,
    },

    /// Response body was not the expected JSON document
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Command parsing error
    #[error("Command error: {0}")]
    CommandError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Chat delivery failed
    #[error("Delivery error: {0}")]
    DeliveryError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl RetailError {
    /// Whether the error is a request rejection that should be shown to the caller verbatim
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidMaxValue { .. } | Self::QuotaExceeded { .. } | Self::CommandError(_)
        )
    }
}

/// Result type alias for retail operations
pub type Result<T> = std::result::Result<T, RetailError>;

/// Convert environment lookup failures into configuration errors
impl From<potlis_utils::EnvError> for RetailError {
    fn from(err: potlis_utils::EnvError) -> Self {
        RetailError::ConfigError(err.to_string())
    }
}
