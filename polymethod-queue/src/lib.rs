//! # polymethod-queue
//!
//! A [`Handler`](polymethod_core::Handler) that turns method calls into
//! asynchronous queue messages.
//!
//! The handler owns no network code: it builds a [`SendMessageRequest`] from
//! the call arguments and hands it to a [`QueueClient`] supplied by the
//! caller. Serialization of the body, deduplication and group ids, delay and
//! attributes are each computed by their own pluggable mapper.
//!
//! ```rust,ignore
//! let handler = SendMessageHandler::builder()
//!     .queue_url("https://queue.example/orders")
//!     .client(my_client)
//!     .payload(json_array())
//!     .group_id(|args| Ok(args.downcast_ref::<Order>(0)?.customer.clone()))
//!     .reply(message_id_reply())
//!     .build()?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod client;
mod error;
mod handler;
mod mapper;
mod message;

pub use client::QueueClient;
pub use error::QueueError;
pub use handler::{MAX_MESSAGE_SIZE, SendMessageHandler, SendMessageHandlerBuilder};
pub use mapper::{ArgumentMapper, ReplyMapper, json_array, message_id_reply, unit_reply};
pub use message::{
    MessageAttributeValue, MessageSystemAttributeValue, SendMessageAck, SendMessageRequest,
};
