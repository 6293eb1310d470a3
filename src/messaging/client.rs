//! Messaging provider client.
//!
//! # Responsibilities
//! - Post text messages with bearer-token auth
//! - Surface the provider's body on both success and failure
//! - Relay one text to many numbers, one call at a time
//!
//! # Design Decisions
//! - Recipients are forwarded as the caller typed them; the provider validates
//! - Bulk sends are strictly sequential, with no batching

use futures_util::stream::{self, StreamExt};
use reqwest::Client;
use serde_json::Value;

use crate::config::MessagingConfig;
use crate::messaging::types::{BulkOutcome, MessagingError, MessagingResult, TextMessage};
use crate::observability::metrics;

/// Client for the messaging provider.
#[derive(Clone)]
pub struct MessagingClient {
    http: Client,
    config: MessagingConfig,
}

impl MessagingClient {
    /// Create a new client. Does not contact the provider.
    pub fn new(http: Client, config: MessagingConfig) -> Self {
        Self { http, config }
    }

    /// Send one text message, returning the provider's response body.
    pub async fn send_text(&self, to: &Value, body: &str) -> MessagingResult<Value> {
        let result = self.post(TextMessage::new(to, body)).await;
        metrics::record_message(result.is_ok());
        result
    }

    /// Send the same text to every number in order.
    ///
    /// Each call is awaited before the next one starts. A failed number is
    /// logged and counted; it never stops the rest.
    pub async fn send_bulk(&self, numbers: &[Value], body: &str) -> BulkOutcome {
        stream::iter(numbers)
            .fold(BulkOutcome::default(), move |outcome, number| async move {
                let result = self.send_text(number, body).await;
                if let Err(e) = &result {
                    tracing::warn!(to = %number, error = %e, "Bulk send failed for number");
                }
                outcome.record(&result)
            })
            .await
    }

    async fn post(&self, message: TextMessage<'_>) -> MessagingResult<Value> {
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.token)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(&text);

        if status.is_success() {
            Ok(body.unwrap_or(Value::Null))
        } else {
            Err(MessagingError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// JSON when possible, raw text otherwise, nothing for an empty body.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}
