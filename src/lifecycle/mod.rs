//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → server stops accepting → in-flight requests finish → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → same graceful path
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
