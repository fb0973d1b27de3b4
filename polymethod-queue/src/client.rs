//! The transport seam.

use crate::message::{SendMessageAck, SendMessageRequest};
use polymethod_core::BoxError;
use std::sync::Arc;

/// A queue transport able to send one message.
///
/// `Ok(None)` means the transport claimed success without acknowledging the
/// message; the handler treats that as fatal. Timeouts and retries are the
/// transport's own business.
pub trait QueueClient: Send + Sync {
    /// Send `request` and return the transport's acknowledgment.
    fn send_message(&self, request: &SendMessageRequest) -> Result<Option<SendMessageAck>, BoxError>;
}

impl<C: QueueClient + ?Sized> QueueClient for Arc<C> {
    fn send_message(&self, request: &SendMessageRequest) -> Result<Option<SendMessageAck>, BoxError> {
        (**self).send_message(request)
    }
}

impl<C: QueueClient + ?Sized> QueueClient for Box<C> {
    fn send_message(&self, request: &SendMessageRequest) -> Result<Option<SendMessageAck>, BoxError> {
        (**self).send_message(request)
    }
}
