//! Shared types for AI Music API requests and responses.

use crate::task::TaskStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_pending() -> TaskStatus {
    TaskStatus::Pending
}

fn default_completed() -> TaskStatus {
    TaskStatus::Completed
}

// =============================================================================
// Enumerations
// =============================================================================

/// Voice gender for vocal generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    Female,
    Random,
}

/// Supported audio formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }
}

/// Music generation models exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicModel {
    Suno,
    #[serde(rename = "suno-v4")]
    SunoV4,
    Producer,
    Nuro,
    Riffusion,
    Udio,
}

// =============================================================================
// Music Results
// =============================================================================

/// Metadata attached to a generated clip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MusicMetadata {
    pub title: Option<String>,
    /// Duration in seconds
    pub duration: Option<u32>,
    pub style: Option<String>,
    pub description: Option<String>,
    pub lyrics: Option<String>,
    pub model: Option<MusicModel>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A generated music clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicResult {
    pub clip_id: String,
    /// URL to the audio file
    pub audio_url: String,
    /// URL to the video render, if available
    pub video_url: Option<String>,
    /// URL to the cover image, if available
    pub image_url: Option<String>,
    #[serde(default)]
    pub metadata: MusicMetadata,
    #[serde(default = "default_completed")]
    pub status: TaskStatus,
}

// =============================================================================
// Account Types
// =============================================================================

/// Credit balance for the account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsInfo {
    pub total: u32,
    pub used: u32,
    pub available: u32,
    pub monthly_quota: Option<u32>,
}

// =============================================================================
// Webhook Configuration
// =============================================================================

/// Webhook registration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Webhook endpoint URL
    pub url: String,
    /// Signing secret used to verify deliveries
    pub secret: Option<String>,
    /// Event types to deliver
    #[serde(default = "WebhookConfig::default_events")]
    pub events: Vec<String>,
}

impl WebhookConfig {
    /// Create a config for the given endpoint with the default event set.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            secret: None,
            events: Self::default_events(),
        }
    }

    /// Set the signing secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    fn default_events() -> Vec<String> {
        vec!["task.completed".to_string(), "task.failed".to_string()]
    }
}

// =============================================================================
// Error Payload
// =============================================================================

/// Error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: Option<String>,
    pub details: Option<serde_json::Value>,
    /// Request ID for support/debugging
    pub request_id: Option<String>,
}
