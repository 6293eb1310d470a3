//! Provider payloads and messaging error definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Text message as the provider expects it.
#[derive(Debug, Serialize)]
pub struct TextMessage<'a> {
    pub messaging_product: &'static str,
    /// Recipient exactly as the caller sent it, number or string.
    pub to: &'a Value,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
pub struct TextBody<'a> {
    pub body: &'a str,
}

impl<'a> TextMessage<'a> {
    pub fn new(to: &'a Value, body: &'a str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to,
            kind: "text",
            text: TextBody { body },
        }
    }
}

/// Body of `POST /whatsapp/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendRequest {
    pub to: Value,
    pub message: String,
}

/// Body of `POST /whatsapp/bulk-send`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkSendRequest {
    pub numbers: Vec<Value>,
    pub message: String,
}

/// Aggregate result of a bulk send. Per-number detail is not kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub successful: usize,
    pub failed: usize,
}

impl BulkOutcome {
    pub fn record<T, E>(mut self, result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => self.successful += 1,
            Err(_) => self.failed += 1,
        }
        self
    }
}

/// Errors that can occur while relaying a message.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Connection failed or the request could not be built.
    #[error("messaging request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("messaging provider returned status {status}")]
    Api { status: u16, body: Option<Value> },
}

impl MessagingError {
    /// What the caller gets back as `data`: the provider's error body when it
    /// sent one, otherwise the error description.
    pub fn detail(&self) -> Value {
        match self {
            MessagingError::Api { body: Some(body), .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

/// Result type for messaging operations.
pub type MessagingResult<T> = Result<T, MessagingError>;
