//! Producer model client (FUZZ-2.0).
//!
//! Producer trades breadth for speed: one unified endpoint covers
//! creation and every modification operation, with ~30 second turnaround.

use crate::config::{ClientConfig, PollConfig};
use crate::error::{AiMusicError, Result};
use crate::http::{HttpClient, UploadForm, UPLOAD_TIMEOUT};
use crate::task::{self, TaskState, TaskStatus};
use crate::types::{default_pending, default_true, AudioFormat, MusicResult};
use crate::util::mime_type_for_file;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Operations supported by the unified Producer endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerOperation {
    Create,
    Extend,
    Cover,
    Replace,
    SwapVocal,
    SwapInstrumental,
    Variation,
}

/// A section of a track, in seconds from the start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReplaceSection {
    pub start: u32,
    pub end: u32,
}

/// Parameters for [`ProducerClient::create_music`].
#[derive(Debug, Clone, Serialize)]
pub struct ProducerCreateParams {
    pub operation: ProducerOperation,
    /// Music description (for the create operation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Audio ID (for extend/modify operations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_id: Option<String>,
    /// Audio URL (for the cover operation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Duration in seconds (10-240)
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Vocal style (for swap_vocal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocal_style: Option<String>,
    /// Instrumental style (for swap_instrumental)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrumental_style: Option<String>,
    /// Section to replace (for the replace operation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_section: Option<ReplaceSection>,
    /// Variation intensity, 0.0-1.0 (for the variation operation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl ProducerCreateParams {
    pub fn new(operation: ProducerOperation) -> Self {
        Self {
            operation,
            description: None,
            audio_id: None,
            audio_url: None,
            duration: 60,
            style: None,
            vocal_style: None,
            instrumental_style: None,
            replace_section: None,
            variation_intensity: None,
            webhook_url: None,
        }
    }

    /// Shorthand for a plain create operation.
    pub fn create(description: impl Into<String>) -> Self {
        Self::new(ProducerOperation::Create).with_description(description)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_audio_id(mut self, audio_id: impl Into<String>) -> Self {
        self.audio_id = Some(audio_id.into());
        self
    }

    pub fn with_audio_url(mut self, audio_url: impl Into<String>) -> Self {
        self.audio_url = Some(audio_url.into());
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_vocal_style(mut self, vocal_style: impl Into<String>) -> Self {
        self.vocal_style = Some(vocal_style.into());
        self
    }

    pub fn with_instrumental_style(mut self, instrumental_style: impl Into<String>) -> Self {
        self.instrumental_style = Some(instrumental_style.into());
        self
    }

    pub fn with_replace_section(mut self, start: u32, end: u32) -> Self {
        self.replace_section = Some(ReplaceSection { start, end });
        self
    }

    pub fn with_variation_intensity(mut self, intensity: f64) -> Self {
        self.variation_intensity = Some(intensity);
        self
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.duration < 10 || self.duration > 240 {
            return Err(AiMusicError::InvalidParameter(format!(
                "duration must be between 10 and 240 seconds, got {}",
                self.duration
            )));
        }
        if let Some(intensity) = self.variation_intensity {
            if !(0.0..=1.0).contains(&intensity) {
                return Err(AiMusicError::InvalidParameter(format!(
                    "variation_intensity must be between 0.0 and 1.0, got {}",
                    intensity
                )));
            }
        }
        if let Some(section) = self.replace_section {
            if section.start >= section.end {
                return Err(AiMusicError::InvalidParameter(format!(
                    "replace_section start ({}) must be before end ({})",
                    section.start, section.end
                )));
            }
        }
        Ok(())
    }
}

/// A Producer clip with model-specific fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerClip {
    #[serde(flatten)]
    pub music: MusicResult,
    /// Producer model version, e.g. "FUZZ-2.0"
    pub model_version: Option<String>,
    /// Generation time in seconds
    pub generation_time: Option<u32>,
    pub operation: Option<ProducerOperation>,
}

/// Task response returned by Producer endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerTaskResponse {
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
    pub clips: Vec<ProducerClip>,
    /// Actual generation time in seconds
    pub generation_time: Option<u32>,
}

impl TaskState for ProducerTaskResponse {
    fn status(&self) -> TaskStatus {
        self.status
    }

    fn failure_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Response from a Producer track upload.
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerUploadResponse {
    pub audio_id: String,
    pub audio_url: String,
    /// Audio duration in seconds
    pub duration: Option<u32>,
}

/// Response with a format-specific download URL.
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerDownloadResponse {
    pub clip_id: String,
    pub format: AudioFormat,
    pub download_url: String,
    /// File size in bytes
    pub file_size: Option<u64>,
}

#[derive(Serialize)]
struct DownloadRequest<'a> {
    clip_id: &'a str,
    format: AudioFormat,
}

/// Client for the Producer API (FUZZ-2.0 model).
pub struct ProducerClient {
    http: Arc<HttpClient>,
    poll: PollConfig,
}

impl ProducerClient {
    /// Create a standalone Producer client with its own transport.
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

    /// Create or modify music.
    ///
    /// One endpoint handles every [`ProducerOperation`]; the fields the
    /// operation needs are set through the params builder.
    pub async fn create_music(&self, params: ProducerCreateParams) -> Result<ProducerTaskResponse> {
        params.validate()?;
        debug!(operation = ?params.operation, duration = params.duration, "Submitting Producer job");
        self.http.post("/producer/v1/music/create", &params).await
    }

    /// Upload an audio file to use as input for other operations.
    pub async fn upload_music(&self, file_path: &Path) -> Result<ProducerUploadResponse> {
        if !file_path.exists() {
            return Err(AiMusicError::FileNotFound(file_path.display().to_string()));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("track")
            .to_string();
        let bytes = tokio::fs::read(file_path).await?;

        debug!(file = %file_path.display(), size = bytes.len(), "Uploading track to Producer");

        let form = UploadForm::new().file("file", file_name, mime_type_for_file(file_path), bytes);
        self.http
            .post_multipart("/producer/v1/music/upload", form, Some(UPLOAD_TIMEOUT))
            .await
    }

    /// Get a download URL for a clip in the requested format.
    pub async fn download_music(
        &self,
        clip_id: &str,
        format: AudioFormat,
    ) -> Result<ProducerDownloadResponse> {
        self.http
            .post(
                "/producer/v1/music/download",
                &DownloadRequest { clip_id, format },
            )
            .await
    }

    /// Get the current status and result of a task.
    pub async fn get_task(&self, task_id: &str) -> Result<ProducerTaskResponse> {
        self.http
            .get("/producer/v1/music/get", &[("task_id", task_id)])
            .await
    }

    /// Poll a task until it completes, fails or times out.
    pub async fn wait_for_completion(&self, task_id: &str) -> Result<ProducerTaskResponse> {
        task::wait_for_completion(&self.poll, task_id, || self.get_task(task_id)).await
    }
}
