use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};

use crate::http::response::{rejected, respond, ApiResponse};
use crate::http::server::AppState;
use crate::messaging::{BulkSendRequest, SendRequest};

/// Relay a single text. On failure the provider's error body is returned as `data`.
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let Json(request) = match payload {
        Ok(p) => p,
        Err(rejection) => return respond("whatsapp_send", start, rejected("whatsapp_send", rejection)),
    };

    let body = match state.messaging.send_text(&request.to, &request.message).await {
        Ok(provider_body) => ApiResponse::ok("Message sent successfully", provider_body),
        Err(e) => {
            tracing::error!(to = %request.to, error = %e, "Failed to send message");
            ApiResponse::fail_with("Failed to send message", e.detail())
        }
    };

    respond("whatsapp_send", start, body)
}

/// Relay one text to many numbers.
///
/// Always reports success once the loop finishes, even when every send
/// failed; only the counts tell the caller what happened.
pub async fn bulk_send(
    State(state): State<AppState>,
    payload: Result<Json<BulkSendRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let Json(request) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return respond("whatsapp_bulk_send", start, rejected("whatsapp_bulk_send", rejection))
        }
    };

    let outcome = state.messaging.send_bulk(&request.numbers, &request.message).await;
    tracing::info!(
        total = request.numbers.len(),
        successful = outcome.successful,
        failed = outcome.failed,
        "Bulk send finished"
    );

    let message = format!(
        "Bulk messages processed. Successful: {}, Failed: {}",
        outcome.successful, outcome.failed
    );
    respond("whatsapp_bulk_send", start, ApiResponse::ok(message, outcome))
}
