//! Student payloads and store error definitions.
//!
//! # Design Decisions
//! - Field values are held as raw JSON so a number is never refused or rewritten
//! - Only `parentPhone` is renamed on the way to the store

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fields accepted when creating a student.
///
/// Deserialized from the API body (camelCase) and serialized in the store's
/// column naming. Absent fields are left out of the insert entirely. Values
/// are forwarded as given; column types are the store's business.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NewStudent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    /// Lookup key. Number or string, whatever the table uses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll: Option<Value>,

    #[serde(
        rename(serialize = "parent_phone", deserialize = "parentPhone"),
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_phone: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<Value>,
}

/// The subset of columns the update route may touch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    #[serde(
        rename(serialize = "parent_phone", deserialize = "parentPhone"),
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_phone: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<Value>,
}

/// Errors that can occur while talking to the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, TLS or body transfer failed.
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Store answered with a non-success status.
    #[error("store rejected request (status {status}): {body}")]
    Rejected { status: u16, body: String },

    /// Success status but the body was not JSON.
    #[error("unreadable store response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configured project URL could not be turned into a table endpoint.
    #[error("invalid store URL '{0}'")]
    InvalidUrl(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
