//! Basic usage: one generation per model, plus a credit check.
//!
//! Requires `AIMUSIC_API_KEY` to be set.

use aimusic_client::{
    AiMusicClient, NuroCreateParams, ProducerCreateParams, SunoCreateParams, VoiceGender,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = AiMusicClient::from_env()?;

    // Check the credit balance first
    let credits = client.get_credits().await?;
    println!("Credits: {} available of {}", credits.available, credits.total);

    // Suno: short clip with female vocals
    println!("\n=== Suno ===");
    let task = client
        .suno()
        .create_music(
            SunoCreateParams::new("upbeat electronic dance music with strong bass")
                .with_duration(30)
                .with_voice_gender(VoiceGender::Female),
        )
        .await?;
    println!("Task ID: {}", task.task_id);

    let completed = client.suno().wait_for_completion(&task.task_id).await?;
    for clip in &completed.clips {
        println!("Clip {}: {}", clip.music.clip_id, clip.music.audio_url);
    }

    // Producer: fast generation
    println!("\n=== Producer ===");
    let task = client
        .producer()
        .create_music(
            ProducerCreateParams::create("energetic rock track with guitar solos")
                .with_duration(60),
        )
        .await?;
    let completed = client.producer().wait_for_completion(&task.task_id).await?;
    if let Some(secs) = completed.generation_time {
        println!("Generated in {}s", secs);
    }
    println!("Audio URL: {}", completed.clips[0].music.audio_url);

    // Nuro: full-length song
    println!("\n=== Nuro ===");
    let task = client
        .nuro()
        .create_vocal_music(
            NuroCreateParams::new("epic orchestral soundtrack with choir").with_style("cinematic"),
        )
        .await?;
    let completed = client.nuro().wait_for_completion(&task.task_id).await?;
    println!("Audio URL: {}", completed.clips[0].music.audio_url);

    Ok(())
}
