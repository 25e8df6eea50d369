//! Unified AI Music API client.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::nuro::NuroClient;
use crate::producer::ProducerClient;
use crate::suno::SunoClient;
use crate::types::CreditsInfo;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Main client for the AI Music API.
///
/// Provides unified access to all music generation models:
/// - **Suno V4**: most capable, supports vocals, stems, personas
/// - **Producer**: fast generation (~30 s), high quality
/// - **Nuro**: full-length songs (up to 4 minutes)
///
/// All model clients share one HTTP transport and connection pool.
///
/// # Example
///
/// ```no_run
/// use aimusic_client::{AiMusicClient, ClientConfig, SunoCreateParams};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AiMusicClient::new(ClientConfig::new("your_api_key"))?;
///
///     let task = client
///         .suno()
///         .create_music(SunoCreateParams::new("upbeat electronic dance music").with_duration(60))
///         .await?;
///
///     let completed = client.suno().wait_for_completion(&task.task_id).await?;
///     println!("Music URL: {}", completed.clips[0].music.audio_url);
///     Ok(())
/// }
/// ```
pub struct AiMusicClient {
    http: Arc<HttpClient>,
    suno: SunoClient,
    producer: ProducerClient,
    nuro: NuroClient,
}

impl AiMusicClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Arc::new(HttpClient::new(&config)?);
        Ok(Self {
            suno: SunoClient::from_shared(http.clone(), config.poll.clone()),
            producer: ProducerClient::from_shared(http.clone(), config.poll.clone()),
            nuro: NuroClient::from_shared(http.clone(), config.poll.clone()),
            http,
        })
    }

    /// Create a client from `AIMUSIC_API_KEY` and `AIMUSIC_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The Suno model client.
    pub fn suno(&self) -> &SunoClient {
        &self.suno
    }

    /// The Producer model client.
    pub fn producer(&self) -> &ProducerClient {
        &self.producer
    }

    /// The Nuro model client.
    pub fn nuro(&self) -> &NuroClient {
        &self.nuro
    }

    /// Get the current credit balance.
    pub async fn get_credits(&self) -> Result<CreditsInfo> {
        self.http.get("/api/v1/credits", &[]).await
    }

    /// Generate song lyrics from a prompt.
    pub async fn generate_lyrics(
        &self,
        prompt: &str,
        num_variations: u32,
    ) -> Result<Vec<String>> {
        #[derive(Serialize)]
        struct LyricsRequest<'a> {
            prompt: &'a str,
            num_variations: u32,
        }

        #[derive(Deserialize)]
        struct LyricsResponse {
            #[serde(default)]
            lyrics: Vec<String>,
        }

        debug!(num_variations, "Generating lyrics");

        let response: LyricsResponse = self
            .http
            .post(
                "/api/v1/lyrics/generate",
                &LyricsRequest {
                    prompt,
                    num_variations,
                },
            )
            .await?;

        Ok(response.lyrics)
    }
}
