//! Error types for the AI Music API client.

use thiserror::Error;

/// Errors that can occur when interacting with the AI Music API.
#[derive(Error, Debug)]
pub enum AiMusicError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response not covered by a specific variant
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_code: Option<String>,
    },

    /// Authentication failed (invalid API key)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Account does not have enough credits for the operation
    #[error("Insufficient credits: {0}")]
    InsufficientCredits(String),

    /// Invalid parameter, rejected client-side or by the API
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested resource does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the API
    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        /// Seconds to wait before retrying, from the Retry-After header
        retry_after: Option<u64>,
    },

    /// Generation task reached a terminal failure state
    #[error("Task {task_id} failed: {message}")]
    TaskFailed {
        task_id: String,
        message: String,
        error_code: Option<String>,
    },

    /// Polling exhausted its attempt budget or wall-clock deadline
    #[error("Operation timed out after {waited_secs}s")]
    Timeout { waited_secs: u64 },

    /// Failed to parse an API response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid base URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// No API key provided
    #[error("API key is required (pass it explicitly or set AIMUSIC_API_KEY)")]
    MissingApiKey,

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error during upload/download
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Webhook verification or dispatch error
    #[error("Webhook error: {0}")]
    Webhook(String),
}

/// Result type for AI Music API operations.
pub type Result<T> = std::result::Result<T, AiMusicError>;

impl AiMusicError {
    /// Whether the failure is transient and the request may be retried.
    ///
    /// Rate limits, gateway-class server errors and timeout/connect
    /// transport failures are retryable; everything else is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => matches!(status, 408 | 500 | 502 | 503 | 504),
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The API error code, when the response carried one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Api { error_code, .. } | Self::TaskFailed { error_code, .. } => {
                error_code.as_deref()
            }
            _ => None,
        }
    }
}
