//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (SUPABASE_*, WHATSAPP_*, PORT)
//!     → AppConfig (immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Upstream URLs and credentials are not checked at startup

pub mod loader;
pub mod schema;

pub use loader::{load, ConfigError};
pub use schema::AppConfig;
pub use schema::ListenerConfig;
pub use schema::MessagingConfig;
pub use schema::ObservabilityConfig;
pub use schema::StoreConfig;
