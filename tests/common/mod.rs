//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use roster_relay::config::AppConfig;
use roster_relay::http::HttpServer;
use roster_relay::lifecycle::Shutdown;

pub const STORE_KEY: &str = "test-service-key";

/// A running relay bound to an ephemeral port.
pub struct TestApp {
    pub base_url: String,
    pub api_url: String,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestApp {
    pub async fn spawn(config: AppConfig) -> Self {
        let prefix = config.listener.path_prefix.trim_end_matches('/').to_string();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config);
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, rx).await;
        });

        let base_url = format!("http://{}", addr);
        Self {
            api_url: format!("{}{}", base_url, prefix),
            base_url,
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
            shutdown,
        }
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(format!("{}{}", self.api_url, path)).send().await.unwrap();
        read(res).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .post(format!("{}{}", self.api_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        read(res).await
    }

    pub async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .put(format!("{}{}", self.api_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        read(res).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .delete(format!("{}{}", self.api_url, path))
            .send()
            .await
            .unwrap();
        read(res).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

async fn read(res: reqwest::Response) -> (StatusCode, Value) {
    let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
    let body = res.json::<Value>().await.unwrap();
    (status, body)
}

/// Config pointing both upstreams at the given URLs.
pub fn test_config(store_url: &str, messaging_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.store.url = store_url.to_string();
    config.store.api_key = STORE_KEY.to_string();
    config.messaging.api_url = messaging_url.to_string();
    config.messaging.token = "test-token".to_string();
    config
}

/// An address nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// In-memory stand-in for the hosted student table.
///
/// Understands `select=*`, `roll=eq.<value>` filters and rejects duplicate
/// rolls with 409 the way a unique constraint would.
#[derive(Clone, Default)]
pub struct MockStore {
    rows: Arc<Mutex<Vec<Value>>>,
}

impl MockStore {
    pub async fn start() -> (Self, String) {
        let store = MockStore::default();
        let app = Router::new()
            .route(
                "/rest/v1/students",
                get(select_rows)
                    .post(insert_row)
                    .patch(update_rows)
                    .delete(delete_rows),
            )
            .with_state(store.clone());

        let url = serve(app).await;
        (store, url)
    }

    pub fn rows(&self) -> Vec<Value> {
        self.rows.lock().unwrap().clone()
    }
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn roll_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn roll_filter(query: &HashMap<String, String>) -> Option<String> {
    query
        .get("roll")
        .and_then(|f| f.strip_prefix("eq."))
        .map(str::to_string)
}

fn authorized(headers: &HeaderMap) -> bool {
    let api_key = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    let expected_bearer = format!("Bearer {}", STORE_KEY);
    api_key == Some(STORE_KEY) && bearer == Some(expected_bearer.as_str())
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid API key"}))).into_response()
}

async fn select_rows(State(store): State<MockStore>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(Value::Array(store.rows())).into_response()
}

async fn insert_row(
    State(store): State<MockStore>,
    headers: HeaderMap,
    Json(row): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut rows = store.rows.lock().unwrap();
    let roll = row.get("roll").map(roll_key);
    if roll.is_some() && rows.iter().any(|r| r.get("roll").map(roll_key) == roll) {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint \"students_roll_key\""
            })),
        )
            .into_response();
    }
    rows.push(row.clone());
    (StatusCode::CREATED, Json(json!([row]))).into_response()
}

async fn update_rows(
    State(store): State<MockStore>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(patch): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let target = roll_filter(&query);
    let mut rows = store.rows.lock().unwrap();
    let mut updated = Vec::new();
    for row in rows.iter_mut() {
        if row.get("roll").map(roll_key) == target {
            if let (Some(obj), Some(changes)) = (row.as_object_mut(), patch.as_object()) {
                for (k, v) in changes {
                    obj.insert(k.clone(), v.clone());
                }
            }
            updated.push(row.clone());
        }
    }
    Json(Value::Array(updated)).into_response()
}

async fn delete_rows(
    State(store): State<MockStore>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let target = roll_filter(&query);
    let mut rows = store.rows.lock().unwrap();
    let (removed, kept): (Vec<Value>, Vec<Value>) = rows
        .drain(..)
        .partition(|row| row.get("roll").map(roll_key) == target);
    *rows = kept;
    Json(Value::Array(removed)).into_response()
}

/// Backend that answers every request with the same status and body.
pub async fn start_fixed_backend(status: StatusCode, body: Value) -> String {
    let app = Router::new().fallback(move || {
        let body = body.clone();
        async move { (status, Json(body)) }
    });
    serve(app).await
}
