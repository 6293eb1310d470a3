//! Student roster and messaging relay.
//!
//! Thin HTTP layer over a hosted student table and a WhatsApp-style
//! messaging API. Every route is one round trip upstream, reshaped into
//! a `{success, message, data}` envelope.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod messaging;
pub mod observability;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
