//! Error types for the queue handler.

use thiserror::Error;

/// Errors raised by [`SendMessageHandler`](crate::SendMessageHandler).
#[derive(Error, Debug)]
pub enum QueueError {
    /// A required collaborator was not configured.
    #[error("invalid queue handler configuration: {0}")]
    InvalidConfiguration(String),

    /// The transport reported success without an acknowledgment.
    #[error("send to {queue} returned no acknowledgment")]
    AcknowledgmentMissing {
        /// The destination queue.
        queue: String,
    },

    /// The serialized payload exceeds the transport's message size limit.
    #[error("message body is {size} bytes, limit is {max}")]
    PayloadTooLarge {
        /// The body size in bytes.
        size: usize,
        /// The limit in bytes.
        max: usize,
    },

    /// The arguments could not be encoded.
    #[error("failed to encode message body: {0}")]
    Serialization(#[from] serde_json::Error),
}
