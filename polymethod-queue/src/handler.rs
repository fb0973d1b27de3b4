//! # Send Message Handler
//!
//! Turns a method call into one outbound queue message.
//!
//! For every call the handler builds a [`SendMessageRequest`]: the body comes
//! from the payload mapper (a JSON array of all arguments by default), and
//! each optional field (deduplication id, group id, delay, attributes,
//! system attributes) comes from its own mapper when one is configured. The
//! request goes out through the [`QueueClient`], and the acknowledgment is
//! turned into the caller's reply by the reply mapper.
//!
//! Required collaborators are checked when the handler is built, never on
//! first use.
//!
//! Bodies longer than [`MAX_MESSAGE_SIZE`] are refused with
//! [`QueueError::PayloadTooLarge`] before anything is sent, instead of being
//! left for the queue service to reject. This is stricter than a bare send
//! client, which only knows the limit as a constant.

use crate::{
    client::QueueClient,
    error::QueueError,
    mapper::{ArgumentMapper, ReplyMapper, json_array, unit_reply},
    message::{
        MessageAttributeValue, MessageSystemAttributeValue, SendMessageAck, SendMessageRequest,
    },
};
use polymethod_core::{Args, BoxError, Handler, Reply};
use std::{collections::HashMap, fmt, sync::Arc};

/// Largest message body the handler will send, in bytes.
pub const MAX_MESSAGE_SIZE: usize = 1024 * 255;

/// A [`Handler`] that sends each call as a queue message.
pub struct SendMessageHandler {
    queue_url: String,
    client: Arc<dyn QueueClient>,
    payload: ArgumentMapper<String>,
    deduplication_id: Option<ArgumentMapper<String>>,
    group_id: Option<ArgumentMapper<String>>,
    delay_seconds: Option<ArgumentMapper<u32>>,
    attributes: Option<ArgumentMapper<HashMap<String, MessageAttributeValue>>>,
    system_attributes: Option<ArgumentMapper<HashMap<String, MessageSystemAttributeValue>>>,
    reply: ReplyMapper,
}

impl SendMessageHandler {
    /// Start configuring a handler. No defaults are filled in.
    pub fn builder() -> SendMessageHandlerBuilder {
        SendMessageHandlerBuilder::default()
    }

    /// A handler sending the JSON-encoded arguments to `queue_url` and
    /// replying with unit.
    pub fn new(
        queue_url: impl Into<String>,
        client: impl QueueClient + 'static,
    ) -> Result<Self, QueueError> {
        Self::defaults(queue_url, client).build()
    }

    /// Like [`new`](Self::new), with a fixed delivery delay.
    pub fn with_delay(
        queue_url: impl Into<String>,
        client: impl QueueClient + 'static,
        delay_seconds: u32,
    ) -> Result<Self, QueueError> {
        Self::defaults(queue_url, client)
            .delay_seconds(move |_| Ok(delay_seconds))
            .build()
    }

    fn defaults(
        queue_url: impl Into<String>,
        client: impl QueueClient + 'static,
    ) -> SendMessageHandlerBuilder {
        Self::builder()
            .queue_url(queue_url)
            .client(client)
            .payload(json_array())
            .reply(unit_reply())
    }

    /// The destination queue.
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// Build the request for one call without sending it.
    pub fn request(&self, args: &Args) -> Result<SendMessageRequest, BoxError> {
        let body = (self.payload)(args)?;
        if body.len() > MAX_MESSAGE_SIZE {
            return Err(QueueError::PayloadTooLarge {
                size: body.len(),
                max: MAX_MESSAGE_SIZE,
            }
            .into());
        }

        let mut request = SendMessageRequest::new(self.queue_url.clone(), body);
        if let Some(dedup) = &self.deduplication_id {
            request.message_deduplication_id = Some(dedup(args)?);
        }
        if let Some(group) = &self.group_id {
            request.message_group_id = Some(group(args)?);
        }
        if let Some(delay) = &self.delay_seconds {
            request.delay_seconds = Some(delay(args)?);
        }
        if let Some(attributes) = &self.attributes {
            request.message_attributes = attributes(args)?;
        }
        if let Some(system_attributes) = &self.system_attributes {
            request.message_system_attributes = system_attributes(args)?;
        }
        Ok(request)
    }
}

impl Handler for SendMessageHandler {
    fn handle(&self, args: Args) -> Result<Reply, BoxError> {
        let request = self.request(&args)?;
        let ack: SendMessageAck =
            self.client
                .send_message(&request)?
                .ok_or_else(|| QueueError::AcknowledgmentMissing {
                    queue: self.queue_url.clone(),
                })?;

        tracing::debug!(
            queue = %self.queue_url,
            message_id = ack.message_id.as_deref().unwrap_or("-"),
            bytes = request.message_body.len(),
            "message sent"
        );
        (self.reply)(&args, &request, &ack)
    }
}

impl fmt::Debug for SendMessageHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendMessageHandler")
            .field("queue_url", &self.queue_url)
            .field("deduplication_id", &self.deduplication_id.is_some())
            .field("group_id", &self.group_id.is_some())
            .field("delay_seconds", &self.delay_seconds.is_some())
            .field("attributes", &self.attributes.is_some())
            .field("system_attributes", &self.system_attributes.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`SendMessageHandler`].
#[derive(Default)]
pub struct SendMessageHandlerBuilder {
    queue_url: Option<String>,
    client: Option<Arc<dyn QueueClient>>,
    payload: Option<ArgumentMapper<String>>,
    deduplication_id: Option<ArgumentMapper<String>>,
    group_id: Option<ArgumentMapper<String>>,
    delay_seconds: Option<ArgumentMapper<u32>>,
    attributes: Option<ArgumentMapper<HashMap<String, MessageAttributeValue>>>,
    system_attributes: Option<ArgumentMapper<HashMap<String, MessageSystemAttributeValue>>>,
    reply: Option<ReplyMapper>,
}

impl SendMessageHandlerBuilder {
    /// The destination queue. Required.
    pub fn queue_url(mut self, queue_url: impl Into<String>) -> Self {
        self.queue_url = Some(queue_url.into());
        self
    }

    /// The transport. Required.
    pub fn client(mut self, client: impl QueueClient + 'static) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// The body encoder. Required; [`json_array`] is the usual choice.
    pub fn payload<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.payload = Some(Box::new(f));
        self
    }

    /// Derive a deduplication id per call.
    pub fn deduplication_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.deduplication_id = Some(Box::new(f));
        self
    }

    /// Derive a message group id per call.
    pub fn group_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.group_id = Some(Box::new(f));
        self
    }

    /// Derive a delivery delay per call.
    pub fn delay_seconds<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args) -> Result<u32, BoxError> + Send + Sync + 'static,
    {
        self.delay_seconds = Some(Box::new(f));
        self
    }

    /// Derive custom message attributes per call.
    pub fn attributes<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args) -> Result<HashMap<String, MessageAttributeValue>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.attributes = Some(Box::new(f));
        self
    }

    /// Derive system attributes per call.
    pub fn system_attributes<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args) -> Result<HashMap<String, MessageSystemAttributeValue>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.system_attributes = Some(Box::new(f));
        self
    }

    /// Map the acknowledgment to the caller's reply. Required;
    /// [`unit_reply`] discards it.
    pub fn reply<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args, &SendMessageRequest, &SendMessageAck) -> Result<Reply, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.reply = Some(Box::new(f));
        self
    }

    /// Validate the configuration and build the handler.
    pub fn build(self) -> Result<SendMessageHandler, QueueError> {
        let queue_url = self
            .queue_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| missing("queue url"))?;
        let client = self.client.ok_or_else(|| missing("queue client"))?;
        let payload = self.payload.ok_or_else(|| missing("payload mapper"))?;
        let reply = self.reply.ok_or_else(|| missing("reply mapper"))?;

        Ok(SendMessageHandler {
            queue_url,
            client,
            payload,
            deduplication_id: self.deduplication_id,
            group_id: self.group_id,
            delay_seconds: self.delay_seconds,
            attributes: self.attributes,
            system_attributes: self.system_attributes,
            reply,
        })
    }
}

fn missing(what: &str) -> QueueError {
    QueueError::InvalidConfiguration(format!("{what} is required"))
}
