//! Client, retry and polling configuration.

use crate::error::{AiMusicError, Result};
use std::collections::HashSet;
use std::env;
use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.aimusicapi.ai";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "AIMUSIC_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "AIMUSIC_BASE_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an AI Music API client.
///
/// # Example
///
/// ```
/// use aimusic_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("my_api_key")
///     .with_base_url("https://api.example.com")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as a Bearer token with every request
    pub api_key: String,
    /// Base URL for API endpoints
    pub base_url: String,
    /// Default request timeout
    pub timeout: Duration,
    /// Retry behavior for transient failures
    pub retry: RetryConfig,
    /// Polling behavior for long-running tasks
    pub poll: PollConfig,
}

impl ClientConfig {
    /// Create a config with the given API key and defaults for everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            poll: PollConfig::default(),
        }
    }

    /// Build a config from `AIMUSIC_API_KEY` and `AIMUSIC_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(AiMusicError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        Ok(config)
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Override the polling configuration.
    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}

/// Configuration for the transport retry loop.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
    /// Base delay for the first retry
    pub initial_delay: Duration,
    /// Upper bound on any single retry delay
    pub max_delay: Duration,
    /// Multiplier applied per attempt
    pub exponential_base: f64,
    /// HTTP status codes that are retried
    pub retry_statuses: HashSet<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            exponential_base: 2.0,
            retry_statuses: [408, 429, 500, 502, 503, 504].into_iter().collect(),
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Whether the retry loop may retry after this error.
    pub(crate) fn should_retry(&self, err: &AiMusicError) -> bool {
        match err {
            AiMusicError::RateLimited { .. } => self.retry_statuses.contains(&429),
            AiMusicError::Api { status, .. } => self.retry_statuses.contains(status),
            AiMusicError::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Delay before retry number `attempt` (zero-based).
    ///
    /// A rate-limit response with a Retry-After header takes precedence
    /// over the exponential schedule; both are capped at `max_delay`.
    pub(crate) fn delay_for(&self, attempt: u32, err: &AiMusicError) -> Duration {
        if let AiMusicError::RateLimited {
            retry_after: Some(secs),
            ..
        } = err
        {
            return Duration::from_secs(*secs).min(self.max_delay);
        }

        let backoff =
            self.initial_delay.as_secs_f64() * self.exponential_base.powi(attempt as i32);
        Duration::from_secs_f64(backoff).min(self.max_delay)
    }
}

/// Configuration for task polling.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Maximum number of status checks
    pub max_attempts: u32,
    /// Delay between status checks
    pub interval: Duration,
    /// Overall wall-clock deadline, if any
    pub timeout: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval: Duration::from_secs(5),
            timeout: Some(Duration::from_secs(300)),
        }
    }
}

impl PollConfig {
    /// Create a poll config with the given attempt budget and interval
    /// and no wall-clock deadline.
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            timeout: None,
        }
    }

    /// Set the overall wall-clock deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let retry = RetryConfig::default();
        assert_eq!(retry.max_retries, 3);
        assert!(retry.retry_statuses.contains(&429));
        assert!(!retry.retry_statuses.contains(&401));

        let poll = PollConfig::default();
        assert_eq!(poll.max_attempts, 60);
        assert_eq!(poll.interval, Duration::from_secs(5));
    }

    #[test]
    fn exponential_backoff_is_capped() {
        let retry = RetryConfig {
            initial_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(15),
            ..RetryConfig::default()
        };
        let err = AiMusicError::Api {
            status: 503,
            message: "unavailable".into(),
            error_code: None,
        };

        assert_eq!(retry.delay_for(0, &err), Duration::from_secs(10));
        // 10 * 2^1 = 20, capped at 15
        assert_eq!(retry.delay_for(1, &err), Duration::from_secs(15));
    }

    #[test]
    fn retry_after_overrides_backoff() {
        let retry = RetryConfig::default();
        let err = AiMusicError::RateLimited {
            message: "slow down".into(),
            retry_after: Some(7),
        };
        assert_eq!(retry.delay_for(3, &err), Duration::from_secs(7));
    }

    #[test]
    fn client_errors_are_not_retried() {
        let retry = RetryConfig::default();
        assert!(!retry.should_retry(&AiMusicError::AuthenticationFailed("nope".into())));
        assert!(!retry.should_retry(&AiMusicError::NotFound("gone".into())));
        assert!(retry.should_retry(&AiMusicError::Api {
            status: 502,
            message: "bad gateway".into(),
            error_code: None,
        }));
    }
}
