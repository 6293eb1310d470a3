//! Transactional message relay.

pub mod client;
pub mod types;

pub use client::MessagingClient;
pub use types::{
    BulkOutcome, BulkSendRequest, MessagingError, MessagingResult, SendRequest, TextMessage,
};
