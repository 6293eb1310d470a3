//! Student roster backed by a hosted table API.
//!
//! Every operation is a single round trip; nothing is cached between requests.

pub mod client;
pub mod types;

pub use client::StoreClient;
pub use types::{NewStudent, StoreError, StoreResult, StudentUpdate};
