//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and clients produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every HTTP span
//! - Upstream error detail is logged here, never returned for roster routes

pub mod logging;
pub mod metrics;
