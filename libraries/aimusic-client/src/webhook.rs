//! Webhook verification and event dispatch.
//!
//! Deliveries are signed with HMAC-SHA256 over the raw request body; the
//! hex-encoded digest arrives in the `X-Webhook-Signature` header.

use crate::error::{AiMusicError, Result};
use crate::task::TaskStatus;
use crate::types::WebhookConfig;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, error, warn};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// A webhook event delivered by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event type, e.g. `task.completed` or `task.failed`
    pub event_type: String,
    pub task_id: String,
    pub status: TaskStatus,
    /// Model that produced the task (suno, producer, nuro)
    pub model: Option<String>,
    pub clip_id: Option<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
    /// Error message if the task failed
    pub error: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
}

/// Compute the hex HMAC-SHA256 signature for a payload.
pub fn sign_payload(payload: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a delivery signature against the raw payload.
///
/// Comparison happens in constant time; a malformed (non-hex) signature
/// is simply invalid.
pub fn verify_signature(payload: &str, signature: &str, secret: &str) -> bool {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());

    match hex::decode(signature) {
        Ok(decoded) => mac.verify_slice(&decoded).is_ok(),
        Err(_) => false,
    }
}

type HandlerFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;
type EventHandler = Box<dyn Fn(WebhookEvent) -> HandlerFuture + Send + Sync>;

/// Handler for webhook events from the AI Music API.
///
/// # Example
///
/// ```
/// use aimusic_client::{WebhookEvent, WebhookHandler};
///
/// let mut handler = WebhookHandler::with_secret("my_secret");
/// handler.on("task.completed", |event: WebhookEvent| async move {
///     println!("Task {} finished: {:?}", event.task_id, event.audio_url);
///     Ok(())
/// });
/// ```
#[derive(Default)]
pub struct WebhookHandler {
    secret: Option<String>,
    handlers: HashMap<String, Vec<EventHandler>>,
}

impl WebhookHandler {
    /// Create a handler without signature verification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler that verifies deliveries with the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            handlers: HashMap::new(),
        }
    }

    /// Create a handler from a webhook registration config.
    pub fn from_config(config: &WebhookConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            handlers: HashMap::new(),
        }
    }

    /// Register an async handler for an event type.
    ///
    /// Multiple handlers may be registered for the same type; they run in
    /// registration order.
    pub fn on<F, Fut>(&mut self, event_type: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(WebhookEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.handlers
            .entry(event_type.into())
            .or_default()
            .push(Box::new(move |event| Box::pin(handler(event))));
        self
    }

    /// Verify a delivery signature.
    ///
    /// Errors if no secret is configured.
    pub fn verify_signature(&self, payload: &str, signature: &str) -> Result<bool> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| AiMusicError::Webhook("webhook secret not configured".to_string()))?;
        Ok(verify_signature(payload, signature, secret))
    }

    /// Parse a raw payload into a [`WebhookEvent`].
    pub fn parse_event(&self, payload: &str) -> Result<WebhookEvent> {
        serde_json::from_str(payload)
            .map_err(|e| AiMusicError::Webhook(format!("invalid event payload: {}", e)))
    }

    /// Dispatch an event to every handler registered for its type.
    ///
    /// A failing handler is logged and does not stop the remaining ones.
    pub async fn dispatch(&self, event: &WebhookEvent) {
        let Some(handlers) = self.handlers.get(&event.event_type) else {
            warn!(event_type = %event.event_type, "No handlers registered for event");
            return;
        };

        debug!(
            event_type = %event.event_type,
            task_id = %event.task_id,
            handlers = handlers.len(),
            "Dispatching webhook event"
        );

        for handler in handlers {
            if let Err(e) = handler(event.clone()).await {
                error!(event_type = %event.event_type, error = %e, "Webhook handler failed");
            }
        }
    }

    /// Handle an incoming webhook request end to end.
    ///
    /// Verifies the signature when a secret is configured and a signature
    /// was provided, then parses and dispatches the event.
    pub async fn handle_request(&self, payload: &str, signature: Option<&str>) -> Result<()> {
        if let (Some(_), Some(signature)) = (&self.secret, signature) {
            if !self.verify_signature(payload, signature)? {
                return Err(AiMusicError::Webhook(
                    "invalid webhook signature".to_string(),
                ));
            }
        }

        let event = self.parse_event(payload)?;
        self.dispatch(&event).await;
        Ok(())
    }
}
