//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, request ID, tracing)
//!     → students.rs / whatsapp.rs (extract params, one upstream call each)
//!     → response.rs (uniform {success, message, data} envelope)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod students;
pub mod whatsapp;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::ApiResponse;
pub use server::{AppState, HttpServer};
