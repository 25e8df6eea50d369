//! Shared HTTP transport for all model clients.
//!
//! One `HttpClient` owns the connection pool, the auth header, the
//! status-to-error mapping and the retry loop; the model clients only
//! shape payloads and pick endpoints.

use crate::config::{ClientConfig, RetryConfig};
use crate::error::{AiMusicError, Result};
use crate::types::ErrorResponse;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Timeout for multipart file uploads.
pub(crate) const UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP transport with Bearer auth, retry and error mapping.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpClient {
    /// Build a transport from a client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AiMusicError::MissingApiKey);
        }

        let base_url = normalize_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| AiMusicError::AuthenticationFailed("API key is not valid in an HTTP header".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("aimusic-client-rust/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AiMusicError::Request)?;

        Ok(Self {
            http,
            base_url,
            retry: config.retry.clone(),
        })
    }

    /// The normalized base URL this transport talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        self.execute(RequestSpec {
            method: Method::GET,
            path,
            query,
            json: None,
            multipart: None,
            timeout: None,
        })
        .await
    }

    /// POST a JSON body and parse a JSON response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let json = serde_json::to_value(body)
            .map_err(|e| AiMusicError::Parse(format!("Failed to encode request body: {}", e)))?;

        self.execute(RequestSpec {
            method: Method::POST,
            path,
            query: &[],
            json: Some(json),
            multipart: None,
            timeout: None,
        })
        .await
    }

    /// POST a multipart form (file uploads) and parse a JSON response.
    ///
    /// The form parts are buffered so the request can be rebuilt if the
    /// retry loop decides to resend it.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: UploadForm,
        timeout: Option<Duration>,
    ) -> Result<T> {
        self.execute(RequestSpec {
            method: Method::POST,
            path,
            query: &[],
            json: None,
            multipart: Some(form),
            timeout,
        })
        .await
    }

    async fn execute<T: DeserializeOwned>(&self, spec: RequestSpec<'_>) -> Result<T> {
        let mut attempt: u32 = 0;
        loop {
            let err = match self.send_once(&spec).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if attempt >= self.retry.max_retries || !self.retry.should_retry(&err) {
                return Err(err);
            }

            let delay = self.retry.delay_for(attempt, &err);
            warn!(
                error = %err,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Transient failure, retrying request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send_once<T: DeserializeOwned>(&self, spec: &RequestSpec<'_>) -> Result<T> {
        let request = self.build_request(spec)?;
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| AiMusicError::Parse(format!("Failed to parse response: {}", e)))
        } else {
            Err(error_from_response(response).await)
        }
    }

    fn build_request(&self, spec: &RequestSpec<'_>) -> Result<RequestBuilder> {
        let url = format!("{}/{}", self.base_url, spec.path.trim_start_matches('/'));
        debug!(method = %spec.method, url = %url, "Sending request");

        let mut request = self.http.request(spec.method.clone(), &url);

        if !spec.query.is_empty() {
            request = request.query(spec.query);
        }
        if let Some(json) = &spec.json {
            request = request.json(json);
        }
        if let Some(form) = &spec.multipart {
            request = request.multipart(form.to_form()?);
        }
        if let Some(timeout) = spec.timeout {
            request = request.timeout(timeout);
        }

        Ok(request)
    }
}

struct RequestSpec<'a> {
    method: Method,
    path: &'a str,
    query: &'a [(&'a str, &'a str)],
    json: Option<serde_json::Value>,
    multipart: Option<UploadForm>,
    timeout: Option<Duration>,
}

/// Multipart form contents, buffered so a request can be rebuilt per attempt.
#[derive(Default)]
pub struct UploadForm {
    parts: Vec<UploadPart>,
}

enum UploadPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: &'static str,
        bytes: Vec<u8>,
    },
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(UploadPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a file field from in-memory bytes.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: &'static str,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(UploadPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime,
            bytes,
        });
        self
    }

    fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        for part in &self.parts {
            form = match part {
                UploadPart::Text { name, value } => form.text(name.clone(), value.clone()),
                UploadPart::File {
                    name,
                    file_name,
                    mime,
                    bytes,
                } => {
                    let file_part = Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(mime)
                        .map_err(AiMusicError::Request)?;
                    form.part(name.clone(), file_part)
                }
            };
        }
        Ok(form)
    }
}

/// Map a non-2xx response to a typed error, decoding the error body when
/// it is JSON and falling back to the raw text otherwise.
async fn error_from_response(response: Response) -> AiMusicError {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let body = response.text().await.unwrap_or_default();
    let (message, error_code) = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => (parsed.error, parsed.error_code),
        Err(_) if !body.is_empty() => (body, None),
        Err(_) => (format!("HTTP {}", status), None),
    };

    debug!(status, message = %message, "API returned error response");

    match status {
        400 => AiMusicError::InvalidParameter(message),
        401 => AiMusicError::AuthenticationFailed(message),
        402 => AiMusicError::InsufficientCredits(message),
        404 => AiMusicError::NotFound(message),
        429 => AiMusicError::RateLimited {
            message,
            retry_after,
        },
        _ => AiMusicError::Api {
            status,
            message,
            error_code,
        },
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(AiMusicError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let parsed = Url::parse(raw).map_err(|e| AiMusicError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AiMusicError::InvalidUrl(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
