//! Nuro model client.
//!
//! Nuro generates complete songs up to four minutes long in roughly
//! thirty seconds, with or without vocals.

use crate::config::{ClientConfig, PollConfig};
use crate::error::{AiMusicError, Result};
use crate::http::HttpClient;
use crate::task::{self, TaskState, TaskStatus};
use crate::types::{default_pending, default_true, MusicResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Parameters for Nuro music generation.
#[derive(Debug, Clone, Serialize)]
pub struct NuroCreateParams {
    /// Music generation prompt
    pub prompt: String,
    /// Duration in seconds (30-240)
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Set by the client according to the endpoint used
    pub(crate) has_vocals: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl NuroCreateParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            duration: 240,
            style: None,
            has_vocals: true,
            webhook_url: None,
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.duration < 30 || self.duration > 240 {
            return Err(AiMusicError::InvalidParameter(format!(
                "duration must be between 30 and 240 seconds, got {}",
                self.duration
            )));
        }
        Ok(())
    }
}

/// A Nuro clip with model-specific fields.
#[derive(Debug, Clone, Deserialize)]
pub struct NuroClip {
    #[serde(flatten)]
    pub music: MusicResult,
    /// Nuro model version, e.g. "Nuro-1.0"
    pub model_version: Option<String>,
    pub has_vocals: Option<bool>,
    /// Generation time in seconds
    pub generation_time: Option<u32>,
}

/// Task response returned by Nuro endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct NuroTaskResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    pub task_id: String,
    #[serde(default = "default_pending")]
    pub status: TaskStatus,
    /// Estimated completion time in seconds
    pub estimated_time: Option<u32>,
    pub message: Option<String>,
    pub error: Option<String>,
    #[serde(default)]
    pub clips: Vec<NuroClip>,
}

impl TaskState for NuroTaskResponse {
    fn status(&self) -> TaskStatus {
        self.status
    }

    fn failure_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Client for the Nuro music generation API.
pub struct NuroClient {
    http: Arc<HttpClient>,
    poll: PollConfig,
}

impl NuroClient {
    /// Create a standalone Nuro client with its own transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let poll = config.poll.clone();
        Ok(Self {
            http: Arc::new(HttpClient::new(&config)?),
            poll,
        })
    }

    pub(crate) fn from_shared(http: Arc<HttpClient>, poll: PollConfig) -> Self {
        Self { http, poll }
    }

    /// Create a song with vocals.
    pub async fn create_vocal_music(&self, params: NuroCreateParams) -> Result<NuroTaskResponse> {
        params.validate()?;
        let params = NuroCreateParams {
            has_vocals: true,
            ..params
        };
        debug!(duration = params.duration, "Creating Nuro vocal track");
        self.http
            .post("/nuro/v1/music/create/vocal", &params)
            .await
    }

    /// Create an instrumental song (no vocals).
    pub async fn create_instrumental_music(
        &self,
        params: NuroCreateParams,
    ) -> Result<NuroTaskResponse> {
        params.validate()?;
        let params = NuroCreateParams {
            has_vocals: false,
            ..params
        };
        debug!(duration = params.duration, "Creating Nuro instrumental track");
        self.http
            .post("/nuro/v1/music/create/instrumental", &params)
            .await
    }

    /// Get the current status and result of a task.
    pub async fn get_task(&self, task_id: &str) -> Result<NuroTaskResponse> {
        self.http
            .get("/nuro/v1/music/get", &[("task_id", task_id)])
            .await
    }

    /// Poll a task until it completes, fails or times out.
    pub async fn wait_for_completion(&self, task_id: &str) -> Result<NuroTaskResponse> {
        task::wait_for_completion(&self.poll, task_id, || self.get_task(task_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_range() {
        assert!(NuroCreateParams::new("x").with_duration(29).validate().is_err());
        assert!(NuroCreateParams::new("x").with_duration(30).validate().is_ok());
        assert!(NuroCreateParams::new("x").with_duration(240).validate().is_ok());
        assert!(NuroCreateParams::new("x").with_duration(241).validate().is_err());
    }

    #[test]
    fn params_serialize_vocal_flag() {
        let params = NuroCreateParams::new("ambient pads").with_style("downtempo");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["prompt"], "ambient pads");
        assert_eq!(json["has_vocals"], true);
        assert_eq!(json["style"], "downtempo");
        assert!(json.get("webhook_url").is_none());
    }
}
