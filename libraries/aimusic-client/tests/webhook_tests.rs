//! Tests for webhook signature verification and event dispatch.

use aimusic_client::{sign_payload, AiMusicError, TaskStatus, WebhookHandler};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn completed_payload() -> String {
    serde_json::json!({
        "event_type": "task.completed",
        "task_id": "task_123",
        "status": "completed",
        "model": "suno",
        "clip_id": "clip_456",
        "audio_url": "https://cdn.example.com/clip_456.mp3"
    })
    .to_string()
}

#[tokio::test]
async fn test_dispatch_runs_registered_handlers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handler = WebhookHandler::new();

    let counter = calls.clone();
    handler.on("task.completed", move |event| {
        let counter = counter.clone();
        async move {
            assert_eq!(event.task_id, "task_123");
            assert_eq!(event.status, TaskStatus::Completed);
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    let event = handler.parse_event(&completed_payload()).unwrap();
    handler.dispatch(&event).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dispatch_only_matching_event_type() {
    let completed_calls = Arc::new(AtomicUsize::new(0));
    let failed_calls = Arc::new(AtomicUsize::new(0));
    let mut handler = WebhookHandler::new();

    let counter = completed_calls.clone();
    handler.on("task.completed", move |_event| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    let counter = failed_calls.clone();
    handler.on("task.failed", move |_event| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    let event = handler.parse_event(&completed_payload()).unwrap();
    handler.dispatch(&event).await;

    assert_eq!(completed_calls.load(Ordering::SeqCst), 1);
    assert_eq!(failed_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failing_handler_does_not_stop_the_rest() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handler = WebhookHandler::new();

    handler.on("task.completed", |_event| async {
        Err(AiMusicError::Webhook("handler exploded".to_string()))
    });

    let counter = calls.clone();
    handler.on("task.completed", move |_event| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    let event = handler.parse_event(&completed_payload()).unwrap();
    handler.dispatch(&event).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_handle_request_with_valid_signature() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handler = WebhookHandler::with_secret("my_secret");

    let counter = calls.clone();
    handler.on("task.completed", move |_event| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    let payload = completed_payload();
    let signature = sign_payload(&payload, "my_secret");

    handler
        .handle_request(&payload, Some(&signature))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_handle_request_with_invalid_signature() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handler = WebhookHandler::with_secret("my_secret");

    let counter = calls.clone();
    handler.on("task.completed", move |_event| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    let payload = completed_payload();
    let signature = sign_payload(&payload, "wrong_secret");

    let result = handler.handle_request(&payload, Some(&signature)).await;

    assert!(matches!(result, Err(AiMusicError::Webhook(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_handle_request_without_signature_skips_verification() {
    // Matches API behavior for unsigned deliveries: with no signature
    // header the payload is processed as-is.
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handler = WebhookHandler::with_secret("my_secret");

    let counter = calls.clone();
    handler.on("task.completed", move |_event| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    handler
        .handle_request(&completed_payload(), None)
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_handle_request_rejects_malformed_payload() {
    let handler = WebhookHandler::new();
    let result = handler.handle_request("{not json", None).await;

    assert!(matches!(result, Err(AiMusicError::Webhook(_))));
}

#[tokio::test]
async fn test_failed_event_carries_error() {
    let handler = WebhookHandler::new();
    let event = handler
        .parse_event(
            &serde_json::json!({
                "event_type": "task.failed",
                "task_id": "task_999",
                "status": "failed",
                "model": "producer",
                "error": "generation backend crashed",
                "metadata": {"attempt": "2"}
            })
            .to_string(),
        )
        .unwrap();

    assert_eq!(event.status, TaskStatus::Failed);
    assert_eq!(event.error.as_deref(), Some("generation backend crashed"));
    assert_eq!(
        event.metadata.as_ref().and_then(|m| m.get("attempt")).map(String::as_str),
        Some("2")
    );
}
