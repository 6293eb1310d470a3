//! Uniform response envelope.
//!
//! Every API route answers with `{success, message, data}`. The status is
//! 200 when `success` is true and 400 for every failure, including upstream
//! outages and malformed bodies. Callers are expected to read the body.

use std::time::Instant;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::observability::metrics;

/// Response body shared by all routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T = Value> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Failure that still carries detail for the caller.
    pub fn fail_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.success {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Record metrics for the route and turn the envelope into a response.
pub fn respond<T: Serialize>(route: &'static str, start: Instant, body: ApiResponse<T>) -> Response {
    metrics::record_request(route, body.status().as_u16(), start);
    body.into_response()
}

/// Envelope for a body the JSON extractor refused.
pub fn rejected(route: &'static str, rejection: JsonRejection) -> ApiResponse {
    tracing::warn!(route, error = %rejection.body_text(), "Rejected request body");
    ApiResponse::fail("Invalid request body")
}
