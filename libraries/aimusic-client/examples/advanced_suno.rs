//! Advanced Suno workflows: custom lyrics, extend + concat, stems and
//! WAV download.
//!
//! Requires `AIMUSIC_API_KEY` to be set.

use aimusic_client::{
    download_audio, AiMusicClient, SunoConcatParams, SunoCreateParams, SunoExtendParams,
    SunoLyricsParams, VoiceGender,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = AiMusicClient::from_env()?;

    // Custom lyrics
    println!("=== Custom Lyrics ===");
    let lyrics = "Verse 1:\n\
                  Walking down the street on a sunny day\n\
                  Feeling all the vibes in every way\n\n\
                  Chorus:\n\
                  This is my song, sing along\n\
                  Life is beautiful, nothing's wrong";

    let task = client
        .suno()
        .create_music_with_lyrics(
            SunoLyricsParams::new(lyrics, "indie rock, acoustic guitar, drums")
                .with_title("My Sunny Day")
                .with_voice_gender(VoiceGender::Male),
        )
        .await?;
    let song = client.suno().wait_for_completion(&task.task_id).await?;
    println!("Created: {:?}", song.clips[0].music.metadata.title);

    // Extend, then stitch both clips together
    println!("\n=== Extend and Concatenate ===");
    let task = client
        .suno()
        .create_music(SunoCreateParams::new("calm piano melody").with_duration(30))
        .await?;
    let first = client.suno().wait_for_completion(&task.task_id).await?;
    let first_clip = first.clips[0].music.clip_id.clone();
    println!("Clip 1: {}", first_clip);

    let task = client
        .suno()
        .extend_music(SunoExtendParams::new(&first_clip).with_duration(30))
        .await?;
    let extended = client.suno().wait_for_completion(&task.task_id).await?;
    let second_clip = extended.clips[0].music.clip_id.clone();
    println!("Clip 2 (extended): {}", second_clip);

    let task = client
        .suno()
        .concat_music(SunoConcatParams::new([first_clip, second_clip]))
        .await?;
    let full = client.suno().wait_for_completion(&task.task_id).await?;
    println!("Full track: {}", full.clips[0].music.audio_url);

    // Stem separation
    println!("\n=== Stems ===");
    let song_id = &full.clips[0].music.clip_id;
    let stems = client.suno().stems_basic(song_id).await?;
    println!("Vocals: {}", stems.vocals_url);
    println!("Instrumental: {}", stems.instrumental_url);

    // WAV conversion + local download
    println!("\n=== WAV Download ===");
    let wav = client.suno().get_wav(song_id).await?;
    let path = download_audio(&wav.wav_url, "output/full_track.wav").await?;
    println!("Saved to {}", path.display());

    Ok(())
}
