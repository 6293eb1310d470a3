//! Hosted table client for the student roster.
//!
//! # Responsibilities
//! - Build table endpoints from the configured project URL
//! - Attach API key headers to every call
//! - Issue select / insert / update / delete with `roll` equality filters
//! - Turn transport failures and non-2xx answers into `StoreError`
//!
//! # Design Decisions
//! - No retries; one failed call is one failed request
//! - The `roll` path segment goes into the filter as text, the store coerces it

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::config::StoreConfig;
use crate::store::types::{NewStudent, StoreError, StoreResult, StudentUpdate};

const PREFER_REPRESENTATION: &str = "return=representation";

/// Client for the student table.
#[derive(Clone)]
pub struct StoreClient {
    http: Client,
    config: StoreConfig,
}

impl StoreClient {
    /// Create a new client. Does not contact the store.
    pub fn new(http: Client, config: StoreConfig) -> Self {
        Self { http, config }
    }

    /// Fetch every row of the table.
    pub async fn list(&self) -> StoreResult<Value> {
        let url = self.table_url()?;
        let req = self.http.get(url).query(&[("select", "*")]);
        self.execute("select", req).await
    }

    /// Insert one row, returning the stored representation.
    pub async fn insert(&self, student: &NewStudent) -> StoreResult<Value> {
        let url = self.table_url()?;
        let req = self
            .http
            .post(url)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(student);
        self.execute("insert", req).await
    }

    /// Update the rows matching `roll`. No match yields an empty array.
    pub async fn update(&self, roll: &str, update: &StudentUpdate) -> StoreResult<Value> {
        let url = self.table_url()?;
        let req = self
            .http
            .patch(url)
            .query(&[("roll", roll_filter(roll))])
            .header("Prefer", PREFER_REPRESENTATION)
            .json(update);
        self.execute("update", req).await
    }

    /// Delete the rows matching `roll`. No match yields an empty array.
    pub async fn delete(&self, roll: &str) -> StoreResult<Value> {
        let url = self.table_url()?;
        let req = self
            .http
            .delete(url)
            .query(&[("roll", roll_filter(roll))])
            .header("Prefer", PREFER_REPRESENTATION);
        self.execute("delete", req).await
    }

    fn table_url(&self) -> StoreResult<Url> {
        let raw = format!(
            "{}/rest/v1/{}",
            self.config.url.trim_end_matches('/'),
            self.config.table
        );
        Url::parse(&raw).map_err(|_| StoreError::InvalidUrl(self.config.url.clone()))
    }

    async fn execute(&self, op: &'static str, req: RequestBuilder) -> StoreResult<Value> {
        let mut req = req.header("apikey", &self.config.api_key);
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key)) {
            req = req.header(AUTHORIZATION, bearer);
        }

        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        tracing::debug!(op, status = %status, bytes = bytes.len(), "Store call completed");

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn roll_filter(roll: &str) -> String {
    format!("eq.{}", roll)
}
