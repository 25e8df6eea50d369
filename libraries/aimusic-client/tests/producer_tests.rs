//! Tests for the Producer model client against a mock server.

use aimusic_client::{
    AiMusicError, AudioFormat, ClientConfig, PollConfig, ProducerClient, ProducerCreateParams,
    ProducerOperation, RetryConfig, TaskStatus,
};
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn producer_client(base_url: &str) -> ProducerClient {
    let config = ClientConfig::new("test_api_key_12345")
        .with_base_url(base_url)
        .with_retry(RetryConfig::disabled())
        .with_poll(PollConfig::new(10, Duration::from_millis(1)));
    ProducerClient::new(config).unwrap()
}

#[tokio::test]
async fn test_create_music() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/producer/v1/music/create"))
        .and(body_partial_json(serde_json::json!({
            "operation": "create",
            "description": "energetic EDM track",
            "duration": 60
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "task_id": "task_prod_1",
            "status": "pending",
            "estimated_time": 30
        })))
        .mount(&mock_server)
        .await;

    let client = producer_client(&mock_server.uri());
    let result = client
        .create_music(ProducerCreateParams::create("energetic EDM track"))
        .await
        .unwrap();

    assert_eq!(result.task_id, "task_prod_1");
    assert_eq!(result.status, TaskStatus::Pending);
}

#[tokio::test]
async fn test_swap_vocal_payload_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/producer/v1/music/create"))
        .and(body_partial_json(serde_json::json!({
            "operation": "swap_vocal",
            "audio_id": "clip_abc123",
            "vocal_style": "opera singer, dramatic"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "task_prod_2",
            "status": "pending"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = producer_client(&mock_server.uri());
    let result = client
        .create_music(
            ProducerCreateParams::new(ProducerOperation::SwapVocal)
                .with_audio_id("clip_abc123")
                .with_vocal_style("opera singer, dramatic"),
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_replace_section_payload_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/producer/v1/music/create"))
        .and(body_partial_json(serde_json::json!({
            "operation": "replace",
            "replace_section": {"start": 10, "end": 30}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "task_prod_3",
            "status": "pending"
        })))
        .mount(&mock_server)
        .await;

    let client = producer_client(&mock_server.uri());
    let result = client
        .create_music(
            ProducerCreateParams::new(ProducerOperation::Replace)
                .with_audio_id("clip_abc123")
                .with_replace_section(10, 30),
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_invalid_variation_intensity_rejected_client_side() {
    let client = producer_client("https://example.com");
    let result = client
        .create_music(
            ProducerCreateParams::new(ProducerOperation::Variation).with_variation_intensity(2.0),
        )
        .await;

    assert!(matches!(result, Err(AiMusicError::InvalidParameter(_))));
}

#[tokio::test]
async fn test_get_task_with_generation_time() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/producer/v1/music/get"))
        .and(query_param("task_id", "task_prod_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "task_prod_1",
            "status": "completed",
            "generation_time": 28,
            "clips": [{
                "clip_id": "clip_prod_1",
                "audio_url": "https://cdn.example.com/prod/clip_prod_1.mp3",
                "model_version": "FUZZ-2.0",
                "operation": "create"
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = producer_client(&mock_server.uri());
    let result = client.get_task("task_prod_1").await.unwrap();

    assert_eq!(result.generation_time, Some(28));
    assert_eq!(result.clips[0].model_version.as_deref(), Some("FUZZ-2.0"));
    assert_eq!(result.clips[0].operation, Some(ProducerOperation::Create));
}

#[tokio::test]
async fn test_wait_for_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/producer/v1/music/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "task_prod_1",
            "status": "processing"
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/producer/v1/music/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "task_prod_1",
            "status": "completed",
            "clips": [{
                "clip_id": "clip_prod_1",
                "audio_url": "https://cdn.example.com/prod/clip_prod_1.mp3"
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = producer_client(&mock_server.uri());
    let result = client.wait_for_completion("task_prod_1").await.unwrap();

    assert_eq!(result.status, TaskStatus::Completed);
    assert_eq!(result.clips.len(), 1);
}

#[tokio::test]
async fn test_upload_music() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/producer/v1/music/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "audio_id": "audio_prod_1",
            "audio_url": "https://cdn.example.com/uploads/audio_prod_1.mp3",
            "duration": 185
        })))
        .mount(&mock_server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
    file.write_all(b"fake audio content").unwrap();

    let client = producer_client(&mock_server.uri());
    let upload = client.upload_music(file.path()).await.unwrap();

    assert_eq!(upload.audio_id, "audio_prod_1");
    assert_eq!(upload.duration, Some(185));
}

#[tokio::test]
async fn test_upload_music_file_not_found() {
    let client = producer_client("https://example.com");
    let result = client
        .upload_music(std::path::Path::new("/nonexistent/file.mp3"))
        .await;

    assert!(matches!(result, Err(AiMusicError::FileNotFound(_))));
}

#[tokio::test]
async fn test_download_music_wav() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/producer/v1/music/download"))
        .and(body_partial_json(serde_json::json!({
            "clip_id": "clip_abc123",
            "format": "wav"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "clip_id": "clip_abc123",
            "format": "wav",
            "download_url": "https://cdn.example.com/dl/clip_abc123.wav",
            "file_size": 42000000
        })))
        .mount(&mock_server)
        .await;

    let client = producer_client(&mock_server.uri());
    let download = client
        .download_music("clip_abc123", AudioFormat::Wav)
        .await
        .unwrap();

    assert_eq!(download.format, AudioFormat::Wav);
    assert!(download.download_url.ends_with(".wav"));
    assert_eq!(download.file_size, Some(42000000));
}
