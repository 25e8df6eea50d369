//! Producer operations: create, upload + extend, vocal swap, download.
//!
//! Requires `AIMUSIC_API_KEY` to be set. Pass a path to an audio file as
//! the first argument to run the upload steps.

use aimusic_client::{
    estimate_credits, AiMusicClient, AudioFormat, ProducerCreateParams, ProducerOperation,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = AiMusicClient::from_env()?;

    println!(
        "A Producer create costs about {} credits",
        estimate_credits("producer", "create")
    );

    // Plain creation
    println!("\n=== Create ===");
    let task = client
        .producer()
        .create_music(ProducerCreateParams::create("funky disco groove with slap bass"))
        .await?;
    let created = client.producer().wait_for_completion(&task.task_id).await?;
    let clip_id = created.clips[0].music.clip_id.clone();
    println!("Clip: {}", clip_id);

    // Vocal swap on the generated clip
    println!("\n=== Swap Vocals ===");
    let task = client
        .producer()
        .create_music(
            ProducerCreateParams::new(ProducerOperation::SwapVocal)
                .with_audio_id(&clip_id)
                .with_vocal_style("opera singer, dramatic"),
        )
        .await?;
    let swapped = client.producer().wait_for_completion(&task.task_id).await?;
    println!("Swapped clip: {}", swapped.clips[0].music.audio_url);

    // Upload a local file and extend it
    if let Some(file) = std::env::args().nth(1) {
        println!("\n=== Upload and Extend ===");
        let upload = client.producer().upload_music(Path::new(&file)).await?;
        println!("Uploaded as {}", upload.audio_id);

        let task = client
            .producer()
            .create_music(
                ProducerCreateParams::new(ProducerOperation::Extend)
                    .with_audio_id(&upload.audio_id)
                    .with_duration(30),
            )
            .await?;
        let extended = client.producer().wait_for_completion(&task.task_id).await?;
        println!("Extended: {}", extended.clips[0].music.audio_url);
    }

    // WAV download link
    println!("\n=== Download ===");
    let download = client
        .producer()
        .download_music(&clip_id, AudioFormat::Wav)
        .await?;
    println!("Download URL: {}", download.download_url);

    Ok(())
}
