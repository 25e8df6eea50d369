//! Webhook handling: register handlers, verify a signed delivery and
//! dispatch it.
//!
//! The delivery here is simulated so the example runs offline; in a real
//! service the payload and `X-Webhook-Signature` header come from the
//! request your HTTP framework hands you.

use aimusic_client::{sign_payload, WebhookConfig, WebhookHandler};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = WebhookConfig::new("https://example.com/webhooks/aimusic")
        .with_secret("your_webhook_secret");
    let mut handler = WebhookHandler::from_config(&config);

    handler.on("task.completed", |event| async move {
        println!("Task completed: {}", event.task_id);
        if let Some(url) = &event.audio_url {
            println!("Audio URL: {}", url);
        }
        if let Some(model) = &event.model {
            println!("Model: {}", model);
        }
        Ok(())
    });

    handler.on("task.failed", |event| async move {
        println!("Task failed: {}", event.task_id);
        if let Some(error) = &event.error {
            println!("Error: {}", error);
        }
        Ok(())
    });

    // Simulate a signed delivery from the API
    let payload = serde_json::json!({
        "event_type": "task.completed",
        "task_id": "task_abc123",
        "status": "completed",
        "model": "suno",
        "clip_id": "clip_xyz",
        "audio_url": "https://cdn.example.com/clip_xyz.mp3"
    })
    .to_string();
    let signature = sign_payload(&payload, "your_webhook_secret");

    handler.handle_request(&payload, Some(&signature)).await?;

    // A tampered payload is rejected
    let tampered = payload.replace("clip_xyz", "clip_evil");
    match handler.handle_request(&tampered, Some(&signature)).await {
        Err(e) => println!("Tampered delivery rejected: {}", e),
        Ok(()) => println!("unexpected: tampered delivery accepted"),
    }

    Ok(())
}
