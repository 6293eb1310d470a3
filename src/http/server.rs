//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers under the configured prefix
//! - Wire up middleware (CORS, request ID, tracing)
//! - Build the shared upstream clients once and inject them as state
//! - Serve until shutdown is requested

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{make_span, UuidRequestId};
use crate::http::response::{respond, ApiResponse};
use crate::http::{students, whatsapp};
use crate::lifecycle::signals;
use crate::messaging::MessagingClient;
use crate::store::StoreClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<StoreClient>,
    pub messaging: Arc<MessagingClient>,
}

impl AppState {
    /// Build the process-wide context. Both clients share one connection pool.
    pub fn new(config: AppConfig) -> Self {
        let http = reqwest::Client::new();
        Self {
            store: Arc::new(StoreClient::new(http.clone(), config.store.clone())),
            messaging: Arc::new(MessagingClient::new(http, config.messaging.clone())),
            config: Arc::new(config),
        }
    }
}

/// HTTP server for the roster relay.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(config);
        let config = state.config.clone();
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/students", get(students::list_students))
            .route("/student", post(students::create_student))
            .route(
                "/student/{roll}",
                put(students::update_student).delete(students::delete_student),
            )
            .route("/whatsapp/send", post(whatsapp::send_message))
            .route("/whatsapp/bulk-send", post(whatsapp::bulk_send));

        let prefix = normalize_prefix(&config.listener.path_prefix);
        let router = if prefix.is_empty() {
            api
        } else {
            Router::new().nest(&prefix, api)
        };

        router
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(make_span))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
            // Outermost: Cors requires a `Default` response body.
            .layer(cors_layer())
    }

    /// Run the server until `shutdown` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.listener.path_prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown requested"),
                    _ = signals::wait_for_signal() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// All origins, methods and headers.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// "" and "/" mean no prefix; otherwise a leading slash and no trailing one.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

async fn health_handler(State(state): State<AppState>) -> axum::response::Response {
    let start = Instant::now();
    let data = json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "path_prefix": normalize_prefix(&state.config.listener.path_prefix),
    });
    respond("health", start, ApiResponse::ok("Service is running", data))
}
