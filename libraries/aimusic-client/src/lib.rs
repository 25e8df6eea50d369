//! AI Music API client
//!
//! HTTP client library for the AI Music generation API, covering the
//! Suno, Producer and Nuro backend models.
//!
//! # Features
//!
//! - **Unified client**: one [`AiMusicClient`] sharing a single HTTP
//!   transport across all model clients
//! - **Retry**: transient failures (rate limits, gateway errors, network
//!   timeouts) are retried with exponential backoff
//! - **Task polling**: one polling loop drives every long-running
//!   generation task to its terminal state
//! - **Webhooks**: HMAC-SHA256 signature verification and async event
//!   dispatch
//!
//! # Example
//!
//! ```no_run
//! use aimusic_client::{AiMusicClient, SunoCreateParams, VoiceGender};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads AIMUSIC_API_KEY (and optionally AIMUSIC_BASE_URL)
//!     let client = AiMusicClient::from_env()?;
//!
//!     let task = client
//!         .suno()
//!         .create_music(
//!             SunoCreateParams::new("upbeat electronic dance music")
//!                 .with_duration(60)
//!                 .with_voice_gender(VoiceGender::Female),
//!         )
//!         .await?;
//!     println!("Task ID: {}", task.task_id);
//!
//!     let completed = client.suno().wait_for_completion(&task.task_id).await?;
//!     for clip in &completed.clips {
//!         println!("Audio URL: {}", clip.music.audio_url);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod download;
mod error;
mod http;
mod nuro;
mod producer;
mod suno;
mod task;
mod types;
mod util;
mod webhook;

// Main client and configuration
pub use client::AiMusicClient;
pub use config::{ClientConfig, PollConfig, RetryConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{AiMusicError, Result};

// Transport (for advanced use and extension)
pub use http::{HttpClient, UploadForm};

// Task lifecycle
pub use task::{wait_for_completion, TaskState, TaskStatus};

// Shared models
pub use types::{
    AudioFormat, CreditsInfo, ErrorResponse, MusicMetadata, MusicModel, MusicResult, VoiceGender,
    WebhookConfig,
};

// Model clients
pub use nuro::{NuroClient, NuroClip, NuroCreateParams, NuroTaskResponse};
pub use producer::{
    ProducerClient, ProducerClip, ProducerCreateParams, ProducerDownloadResponse,
    ProducerOperation, ProducerTaskResponse, ProducerUploadResponse, ReplaceSection,
};
pub use suno::{
    PersonaStatus, SunoClient, SunoClip, SunoConcatParams, SunoCoverParams, SunoCreateParams,
    SunoDescribeParams, SunoExtendParams, SunoLyricsParams, SunoMidiResponse, SunoPersonaMusicParams,
    SunoPersonaParams, SunoPersonaResponse, SunoStemsBasic, SunoStemsFull, SunoTaskResponse,
    SunoUploadMetadata, SunoUploadResponse, SunoWavResponse,
};

// Webhooks
pub use webhook::{
    sign_payload, verify_signature, WebhookEvent, WebhookHandler, SIGNATURE_HEADER,
};

// Downloads and helpers
pub use download::{download_audio, download_file, download_file_with_timeout};
pub use util::{
    estimate_credits, format_duration, parse_clip_id, sanitize_filename, validate_audio_url,
};
