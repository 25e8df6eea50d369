//! Downloading generated audio to disk.

use crate::error::{AiMusicError, Result};
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Download a file from a URL, streaming it to `dest`.
///
/// Parent directories are created as needed. Returns the destination path.
pub async fn download_file(url: &str, dest: impl AsRef<Path>) -> Result<PathBuf> {
    download_file_with_timeout(url, dest, DOWNLOAD_TIMEOUT).await
}

/// [`download_file`] with an explicit timeout.
pub async fn download_file_with_timeout(
    url: &str,
    dest: impl AsRef<Path>,
    timeout: Duration,
) -> Result<PathBuf> {
    let dest = dest.as_ref();
    debug!(url = %url, dest = %dest.display(), "Downloading file");

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(AiMusicError::Request)?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(AiMusicError::Api {
            status: status.as_u16(),
            message,
            error_code: None,
        });
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = File::create(dest).await?;
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await?;

    info!(dest = %dest.display(), bytes = downloaded, "Download complete");
    Ok(dest.to_path_buf())
}

/// Download a generated audio file.
pub async fn download_audio(url: &str, dest: impl AsRef<Path>) -> Result<PathBuf> {
    download_file(url, dest).await
}
