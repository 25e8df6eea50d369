//! Suno model client.
//!
//! Suno is the most capable backend: vocals, instrumentals, stem
//! separation, voice personas, WAV conversion and MIDI extraction.

use crate::config::{ClientConfig, PollConfig};
use crate::error::{AiMusicError, Result};
use crate::http::{HttpClient, UploadForm, UPLOAD_TIMEOUT};
use crate::task::{self, TaskState, TaskStatus};
use crate::types::{default_pending, default_true, MusicResult, VoiceGender};
use crate::util::mime_type_for_file;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const PERSONA_POLL_ATTEMPTS: u32 = 60;
const PERSONA_POLL_INTERVAL: Duration = Duration::from_secs(10);

// =============================================================================
// Request Parameters
// =============================================================================

/// Parameters for [`SunoClient::create_music`].
#[derive(Debug, Clone, Serialize)]
pub struct SunoCreateParams {
    /// Music description or prompt
    pub description: String,
    /// Duration in seconds (10-240)
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_gender: Option<VoiceGender>,
    /// Auto-generate lyrics from the description
    pub auto_lyrics: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl SunoCreateParams {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            duration: 30,
            voice_gender: None,
            auto_lyrics: false,
            webhook_url: None,
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_voice_gender(mut self, voice_gender: VoiceGender) -> Self {
        self.voice_gender = Some(voice_gender);
        self
    }

    pub fn with_auto_lyrics(mut self) -> Self {
        self.auto_lyrics = true;
        self
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    fn validate(&self) -> Result<()> {
        validate_duration(self.duration, 10, 240)
    }
}

/// Parameters for [`SunoClient::create_music_with_lyrics`].
#[derive(Debug, Clone, Serialize)]
pub struct SunoLyricsParams {
    /// Song lyrics
    pub lyrics: String,
    /// Musical style, e.g. "rock, guitar, drums"
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_gender: Option<VoiceGender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl SunoLyricsParams {
    pub fn new(lyrics: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            lyrics: lyrics.into(),
            style: style.into(),
            title: None,
            voice_gender: None,
            webhook_url: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_voice_gender(mut self, voice_gender: VoiceGender) -> Self {
        self.voice_gender = Some(voice_gender);
        self
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }
}

/// Parameters for [`SunoClient::describe_music`].
#[derive(Debug, Clone, Serialize)]
pub struct SunoDescribeParams {
    /// Short music description (max 200 chars)
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_gender: Option<VoiceGender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl SunoDescribeParams {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            voice_gender: None,
            webhook_url: None,
        }
    }

    pub fn with_voice_gender(mut self, voice_gender: VoiceGender) -> Self {
        self.voice_gender = Some(voice_gender);
        self
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.description.chars().count() > 200 {
            return Err(AiMusicError::InvalidParameter(
                "description must be at most 200 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for [`SunoClient::extend_music`].
#[derive(Debug, Clone, Serialize)]
pub struct SunoExtendParams {
    /// Clip ID to extend
    pub audio_id: String,
    /// Extension duration in seconds (10-120)
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl SunoExtendParams {
    pub fn new(audio_id: impl Into<String>) -> Self {
        Self {
            audio_id: audio_id.into(),
            duration: 30,
            webhook_url: None,
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    fn validate(&self) -> Result<()> {
        validate_duration(self.duration, 10, 120)
    }
}

/// Parameters for [`SunoClient::concat_music`].
#[derive(Debug, Clone, Serialize)]
pub struct SunoConcatParams {
    /// Clip IDs to concatenate, in order (2-10)
    pub clip_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl SunoConcatParams {
    pub fn new(clip_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            clip_ids: clip_ids.into_iter().map(Into::into).collect(),
            webhook_url: None,
        }
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.clip_ids.len() < 2 || self.clip_ids.len() > 10 {
            return Err(AiMusicError::InvalidParameter(format!(
                "concat requires 2-10 clips, got {}",
                self.clip_ids.len()
            )));
        }
        Ok(())
    }
}

/// Parameters for [`SunoClient::cover_music`].
#[derive(Debug, Clone, Serialize)]
pub struct SunoCoverParams {
    /// URL of the original song
    pub audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_gender: Option<VoiceGender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl SunoCoverParams {
    pub fn new(audio_url: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            style: None,
            voice_gender: None,
            webhook_url: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_voice_gender(mut self, voice_gender: VoiceGender) -> Self {
        self.voice_gender = Some(voice_gender);
        self
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }
}

/// Parameters for [`SunoClient::create_persona`].
#[derive(Debug, Clone, Serialize)]
pub struct SunoPersonaParams {
    /// Reference audio URL to train the persona on
    pub audio_url: String,
    pub persona_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SunoPersonaParams {
    pub fn new(audio_url: impl Into<String>, persona_name: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            persona_name: persona_name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Parameters for [`SunoClient::create_persona_music`].
#[derive(Debug, Clone, Serialize)]
pub struct SunoPersonaMusicParams {
    /// Trained persona ID
    pub persona_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Duration in seconds (10-240)
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl SunoPersonaMusicParams {
    pub fn new(persona_id: impl Into<String>) -> Self {
        Self {
            persona_id: persona_id.into(),
            description: None,
            lyrics: None,
            style: None,
            duration: 30,
            webhook_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = Some(lyrics.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    fn validate(&self) -> Result<()> {
        validate_duration(self.duration, 10, 240)
    }
}

/// Optional metadata sent with [`SunoClient::upload_music`].
#[derive(Debug, Clone, Default)]
pub struct SunoUploadMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

fn validate_duration(duration: u32, min: u32, max: u32) -> Result<()> {
    if duration < min || duration > max {
        return Err(AiMusicError::InvalidParameter(format!(
            "duration must be between {} and {} seconds, got {}",
            min, max, duration
        )));
    }
    Ok(())
}

// =============================================================================
// Responses
// =============================================================================

/// A Suno clip with model-specific fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SunoClip {
    #[serde(flatten)]
    pub music: MusicResult,
    /// Suno model version, e.g. "v4"
    pub model_version: Option<String>,
    pub has_vocals: Option<bool>,
    pub voice_gender: Option<VoiceGender>,
    pub persona_id: Option<String>,
}

/// Task response returned by Suno endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SunoTaskResponse {
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
    pub clips: Vec<SunoClip>,
}

impl TaskState for SunoTaskResponse {
    fn status(&self) -> TaskStatus {
        self.status
    }

    fn failure_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Basic stem separation: vocals + instrumental.
#[derive(Debug, Clone, Deserialize)]
pub struct SunoStemsBasic {
    pub song_id: String,
    pub vocals_url: String,
    pub instrumental_url: String,
}

/// Full stem separation: 12 isolated tracks.
#[derive(Debug, Clone, Deserialize)]
pub struct SunoStemsFull {
    pub song_id: String,
    pub lead_vocals_url: String,
    pub backing_vocals_url: String,
    pub drums_url: String,
    pub bass_url: String,
    pub piano_url: String,
    pub guitar_url: String,
    pub strings_url: String,
    pub synth_url: String,
    pub brass_url: String,
    pub woodwinds_url: String,
    pub fx_url: String,
    pub other_url: String,
}

/// Training state of a voice persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaStatus {
    Training,
    Ready,
    Failed,
}

/// A voice persona, possibly still training.
#[derive(Debug, Clone, Deserialize)]
pub struct SunoPersonaResponse {
    pub persona_id: String,
    pub persona_name: String,
    pub status: PersonaStatus,
    /// Training progress percentage (0-100)
    pub training_progress: Option<u8>,
}

impl TaskState for SunoPersonaResponse {
    fn status(&self) -> TaskStatus {
        match self.status {
            PersonaStatus::Training => TaskStatus::Processing,
            PersonaStatus::Ready => TaskStatus::Completed,
            PersonaStatus::Failed => TaskStatus::Failed,
        }
    }

    fn failure_message(&self) -> Option<&str> {
        match self.status {
            PersonaStatus::Failed => Some("persona training failed"),
            _ => None,
        }
    }
}

/// Response from a track upload.
#[derive(Debug, Clone, Deserialize)]
pub struct SunoUploadResponse {
    /// ID of the uploaded audio, usable in other operations
    pub audio_id: String,
    pub audio_url: String,
}

/// High-quality WAV conversion result.
#[derive(Debug, Clone, Deserialize)]
pub struct SunoWavResponse {
    pub song_id: String,
    pub wav_url: String,
    /// File size in bytes, when reported
    pub file_size: Option<u64>,
}

/// MIDI extraction result.
#[derive(Debug, Clone, Deserialize)]
pub struct SunoMidiResponse {
    pub clip_id: String,
    pub midi_url: String,
    pub has_vocals: Option<bool>,
    pub has_drums: Option<bool>,
    pub has_bass: Option<bool>,
}

#[derive(Serialize)]
struct SongRequest<'a> {
    song_id: &'a str,
}

#[derive(Serialize)]
struct ClipRequest<'a> {
    clip_id: &'a str,
}

#[derive(Deserialize)]
struct QueuedTask {
    task_id: String,
}

/// Endpoints that answer either with the finished payload or a queued task.
#[derive(Deserialize)]
#[serde(untagged)]
enum DeferredReply<S> {
    Ready(S),
    Queued(QueuedTask),
}

/// Task snapshot that carries the finished payload inline once completed.
#[derive(Deserialize)]
struct DeferredTask<S> {
    #[serde(default = "default_pending")]
    status: TaskStatus,
    message: Option<String>,
    error: Option<String>,
    #[serde(flatten)]
    payload: Option<S>,
}

impl<S> TaskState for DeferredTask<S> {
    fn status(&self) -> TaskStatus {
        self.status
    }

    fn failure_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for the Suno V4 music generation API.
pub struct SunoClient {
    http: Arc<HttpClient>,
    poll: PollConfig,
}

impl SunoClient {
    /// Create a standalone Suno client with its own transport.
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

    /// Create music from a description.
    pub async fn create_music(&self, params: SunoCreateParams) -> Result<SunoTaskResponse> {
        params.validate()?;
        debug!(duration = params.duration, "Creating Suno track");
        self.http.post("/suno/v1/music/create", &params).await
    }

    /// Create music with custom lyrics.
    pub async fn create_music_with_lyrics(
        &self,
        params: SunoLyricsParams,
    ) -> Result<SunoTaskResponse> {
        debug!(style = %params.style, "Creating Suno track with lyrics");
        self.http
            .post("/suno/v1/music/create-with-lyrics", &params)
            .await
    }

    /// Generate music from a short description (describe-to-music).
    pub async fn describe_music(&self, params: SunoDescribeParams) -> Result<SunoTaskResponse> {
        params.validate()?;
        self.http.post("/suno/v1/music/describe", &params).await
    }

    /// Extend an existing track.
    pub async fn extend_music(&self, params: SunoExtendParams) -> Result<SunoTaskResponse> {
        params.validate()?;
        debug!(audio_id = %params.audio_id, duration = params.duration, "Extending Suno track");
        self.http.post("/suno/v1/music/extend", &params).await
    }

    /// Concatenate multiple clips into one track.
    pub async fn concat_music(&self, params: SunoConcatParams) -> Result<SunoTaskResponse> {
        params.validate()?;
        debug!(clips = params.clip_ids.len(), "Concatenating Suno clips");
        self.http.post("/suno/v1/music/concat", &params).await
    }

    /// Create a cover version of an existing song.
    pub async fn cover_music(&self, params: SunoCoverParams) -> Result<SunoTaskResponse> {
        self.http.post("/suno/v1/music/cover", &params).await
    }

    /// Separate a song into vocals and instrumental.
    ///
    /// When the server queues the separation, this polls until the stems
    /// are ready.
    pub async fn stems_basic(&self, song_id: &str) -> Result<SunoStemsBasic> {
        self.stems("/suno/v1/stems/basic", song_id).await
    }

    /// Separate a song into 12 isolated stem tracks.
    pub async fn stems_full(&self, song_id: &str) -> Result<SunoStemsFull> {
        self.stems("/suno/v1/stems/full", song_id).await
    }

    async fn stems<S: DeserializeOwned>(&self, path: &str, song_id: &str) -> Result<S> {
        let reply: DeferredReply<S> = self.http.post(path, &SongRequest { song_id }).await?;

        match reply {
            DeferredReply::Ready(stems) => Ok(stems),
            DeferredReply::Queued(queued) => {
                debug!(task_id = %queued.task_id, song_id = %song_id, "Stem separation queued");
                let done: DeferredTask<S> =
                    task::wait_for_completion(&self.poll, &queued.task_id, || {
                        self.fetch_deferred(&queued.task_id)
                    })
                    .await?;
                done.payload.ok_or_else(|| {
                    AiMusicError::Parse(
                        "completed stem separation did not include stem URLs".to_string(),
                    )
                })
            }
        }
    }

    async fn fetch_deferred<S: DeserializeOwned>(&self, task_id: &str) -> Result<DeferredTask<S>> {
        self.http
            .get("/suno/v1/music/get", &[("task_id", task_id)])
            .await
    }

    /// Create a custom voice persona from reference audio.
    ///
    /// Training is asynchronous; use [`SunoClient::wait_for_persona`] to
    /// block until it finishes.
    pub async fn create_persona(&self, params: SunoPersonaParams) -> Result<SunoPersonaResponse> {
        info!(persona_name = %params.persona_name, "Creating Suno persona");
        self.http.post("/suno/v1/persona/create", &params).await
    }

    /// Get the training status of a persona.
    pub async fn get_persona_status(&self, persona_id: &str) -> Result<SunoPersonaResponse> {
        self.http
            .get(&format!("/suno/v1/persona/{}/status", persona_id), &[])
            .await
    }

    /// Poll until persona training reaches `ready` or `failed`.
    pub async fn wait_for_persona(&self, persona_id: &str) -> Result<SunoPersonaResponse> {
        let poll = PollConfig::new(PERSONA_POLL_ATTEMPTS, PERSONA_POLL_INTERVAL);
        task::wait_for_completion(&poll, persona_id, || self.get_persona_status(persona_id)).await
    }

    /// Create music sung with a trained persona voice.
    pub async fn create_persona_music(
        &self,
        params: SunoPersonaMusicParams,
    ) -> Result<SunoTaskResponse> {
        params.validate()?;
        self.http
            .post("/suno/v1/persona/music/create", &params)
            .await
    }

    /// Upload an audio file for processing.
    pub async fn upload_music(
        &self,
        file_path: &Path,
        metadata: Option<SunoUploadMetadata>,
    ) -> Result<SunoUploadResponse> {
        if !file_path.exists() {
            return Err(AiMusicError::FileNotFound(file_path.display().to_string()));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("track")
            .to_string();
        let bytes = tokio::fs::read(file_path).await?;

        debug!(file = %file_path.display(), size = bytes.len(), "Uploading track to Suno");

        let mut form =
            UploadForm::new().file("file", file_name, mime_type_for_file(file_path), bytes);
        if let Some(meta) = metadata {
            if let Some(title) = meta.title {
                form = form.text("title", title);
            }
            if let Some(description) = meta.description {
                form = form.text("description", description);
            }
        }

        self.http
            .post_multipart("/suno/v1/music/upload", form, Some(UPLOAD_TIMEOUT))
            .await
    }

    /// Convert a song to high-quality WAV.
    ///
    /// When the conversion is queued, this polls until it completes and
    /// returns the converted file URL.
    pub async fn get_wav(&self, song_id: &str) -> Result<SunoWavResponse> {
        let reply: DeferredReply<SunoWavResponse> =
            self.http.post("/suno/v1/music/wav", &SongRequest { song_id }).await?;

        match reply {
            DeferredReply::Ready(wav) => Ok(wav),
            DeferredReply::Queued(queued) => {
                debug!(task_id = %queued.task_id, "WAV conversion queued");
                let done = self.wait_for_completion(&queued.task_id).await?;
                let clip = done.clips.first().ok_or_else(|| {
                    AiMusicError::Parse("completed WAV conversion had no clips".to_string())
                })?;
                Ok(SunoWavResponse {
                    song_id: song_id.to_string(),
                    wav_url: clip.music.audio_url.clone(),
                    file_size: None,
                })
            }
        }
    }

    /// Extract MIDI data from a clip.
    pub async fn get_midi(&self, clip_id: &str) -> Result<SunoMidiResponse> {
        self.http
            .post("/suno/v1/music/midi", &ClipRequest { clip_id })
            .await
    }

    /// Get the current status and result of a task.
    pub async fn get_task(&self, task_id: &str) -> Result<SunoTaskResponse> {
        self.http
            .get("/suno/v1/music/get", &[("task_id", task_id)])
            .await
    }

    /// Poll a task until it completes, fails or times out.
    pub async fn wait_for_completion(&self, task_id: &str) -> Result<SunoTaskResponse> {
        task::wait_for_completion(&self.poll, task_id, || self.get_task(task_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_params_serialization_skips_unset_options() {
        let params = SunoCreateParams::new("lofi beats");
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["description"], "lofi beats");
        assert_eq!(json["duration"], 30);
        assert_eq!(json["auto_lyrics"], false);
        assert!(json.get("voice_gender").is_none());
        assert!(json.get("webhook_url").is_none());
    }

    #[test]
    fn create_params_duration_range() {
        assert!(SunoCreateParams::new("x").with_duration(9).validate().is_err());
        assert!(SunoCreateParams::new("x").with_duration(10).validate().is_ok());
        assert!(SunoCreateParams::new("x").with_duration(240).validate().is_ok());
        assert!(SunoCreateParams::new("x").with_duration(241).validate().is_err());
    }

    #[test]
    fn extend_params_duration_range() {
        assert!(SunoExtendParams::new("clip_1").with_duration(120).validate().is_ok());
        assert!(SunoExtendParams::new("clip_1").with_duration(121).validate().is_err());
    }

    #[test]
    fn concat_params_clip_count() {
        assert!(SunoConcatParams::new(["a"]).validate().is_err());
        assert!(SunoConcatParams::new(["a", "b"]).validate().is_ok());
        let eleven: Vec<String> = (0..11).map(|i| format!("clip_{}", i)).collect();
        assert!(SunoConcatParams::new(eleven).validate().is_err());
    }

    #[test]
    fn describe_params_length_limit() {
        assert!(SunoDescribeParams::new("short").validate().is_ok());
        assert!(SunoDescribeParams::new("x".repeat(201)).validate().is_err());
    }

    #[test]
    fn task_response_defaults() {
        let response: SunoTaskResponse =
            serde_json::from_str(r#"{"task_id": "task_1"}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.status, TaskStatus::Pending);
        assert!(response.clips.is_empty());
    }

    #[test]
    fn deferred_reply_distinguishes_ready_from_queued() {
        let ready: DeferredReply<SunoStemsBasic> = serde_json::from_str(
            r#"{"song_id": "s1", "vocals_url": "https://cdn/v.mp3", "instrumental_url": "https://cdn/i.mp3"}"#,
        )
        .unwrap();
        assert!(matches!(ready, DeferredReply::Ready(_)));

        let queued: DeferredReply<SunoStemsBasic> =
            serde_json::from_str(r#"{"task_id": "task_9"}"#).unwrap();
        match queued {
            DeferredReply::Queued(task) => assert_eq!(task.task_id, "task_9"),
            DeferredReply::Ready(_) => panic!("expected queued reply"),
        }
    }

    #[test]
    fn persona_status_maps_to_task_lifecycle() {
        let persona = SunoPersonaResponse {
            persona_id: "p1".into(),
            persona_name: "voice".into(),
            status: PersonaStatus::Training,
            training_progress: Some(40),
        };
        assert_eq!(TaskState::status(&persona), TaskStatus::Processing);

        let failed = SunoPersonaResponse {
            status: PersonaStatus::Failed,
            ..persona
        };
        assert_eq!(TaskState::status(&failed), TaskStatus::Failed);
        assert!(failed.failure_message().is_some());
    }
}
