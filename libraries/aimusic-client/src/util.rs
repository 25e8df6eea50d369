//! Small helpers shared across the SDK.

use std::path::Path;

/// Format a duration in seconds as a human-readable string.
///
/// Examples: `30s`, `1m 30s`, `1h 1m 1s`.
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{}s", seconds);
    }

    let minutes = seconds / 60;
    let seconds = seconds % 60;

    if minutes < 60 {
        return if seconds > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}m", minutes)
        };
    }

    let hours = minutes / 60;
    let minutes = minutes % 60;

    let mut parts = vec![format!("{}h", hours)];
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 {
        parts.push(format!("{}s", seconds));
    }
    parts.join(" ")
}

/// Strip characters that are invalid in filenames.
///
/// Falls back to `unnamed` if nothing usable remains.
pub fn sanitize_filename(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .map(|c| {
            if matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = sanitized.trim_matches(|c| c == '.' || c == ' ');
    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Extract a clip ID from a clip URL, or pass an ID through unchanged.
pub fn parse_clip_id(identifier: &str) -> &str {
    if identifier.contains("://") {
        let parts: Vec<&str> = identifier.split('/').collect();
        for (i, part) in parts.iter().enumerate() {
            if *part == "clip" && i + 1 < parts.len() {
                return parts[i + 1];
            }
        }
    }
    identifier
}

/// Whether a URL looks like it points to an audio file.
pub fn validate_audio_url(url: &str) -> bool {
    const AUDIO_EXTENSIONS: [&str; 6] = [".mp3", ".wav", ".ogg", ".flac", ".m4a", ".aac"];
    let url = url.to_lowercase();
    AUDIO_EXTENSIONS
        .iter()
        .any(|ext| url.ends_with(ext) || url.contains(ext))
}

/// Estimate the credit cost of an operation.
///
/// Costs follow the published API pricing; unknown combinations default
/// to 10.
pub fn estimate_credits(model: &str, operation: &str) -> u32 {
    match (
        model.to_lowercase().as_str(),
        operation.to_lowercase().as_str(),
    ) {
        ("suno", "create" | "extend" | "cover" | "wav") => 10,
        ("suno", "concat" | "midi") => 5,
        ("suno", "stems_basic") => 20,
        ("suno", "stems_full" | "persona") => 50,
        ("producer", "create" | "extend" | "cover" | "replace" | "variation") => 10,
        ("producer", "swap_vocal" | "swap_instrumental") => 15,
        ("nuro", "vocal") => 20,
        ("nuro", "instrumental") => 15,
        ("riffusion", "create" | "extend" | "cover") => 5,
        _ => 10,
    }
}

/// MIME type for an audio file, by extension.
pub(crate) fn mime_type_for_file(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("m4a") | Some("aac") => "audio/mp4",
        _ => "application/octet-stream",
    }
}
