//! Pluggable mappings from call arguments to message fields.

use crate::{
    error::QueueError,
    message::{SendMessageAck, SendMessageRequest},
};
use polymethod_core::{Args, BoxError, Reply};

/// Maps call arguments to one message field.
pub type ArgumentMapper<T> = Box<dyn Fn(&Args) -> Result<T, BoxError> + Send + Sync>;

/// Maps a sent message and its acknowledgment to the caller-facing reply.
pub type ReplyMapper =
    Box<dyn Fn(&Args, &SendMessageRequest, &SendMessageAck) -> Result<Reply, BoxError> + Send + Sync>;

/// Encode the whole argument list as a JSON array.
pub fn json_array() -> impl Fn(&Args) -> Result<String, BoxError> + Send + Sync + 'static {
    |args: &Args| {
        let value = args.to_json().map_err(QueueError::Serialization)?;
        Ok(serde_json::to_string(&value).map_err(QueueError::Serialization)?)
    }
}

/// Reply with unit, whatever the acknowledgment says.
pub fn unit_reply()
-> impl Fn(&Args, &SendMessageRequest, &SendMessageAck) -> Result<Reply, BoxError> + Send + Sync + 'static
{
    |_: &Args, _: &SendMessageRequest, _: &SendMessageAck| Ok(Reply::unit())
}

/// Reply with the message id assigned by the queue, as an `Option<String>`.
pub fn message_id_reply()
-> impl Fn(&Args, &SendMessageRequest, &SendMessageAck) -> Result<Reply, BoxError> + Send + Sync + 'static
{
    |_: &Args, _: &SendMessageRequest, ack: &SendMessageAck| Ok(Reply::new(ack.message_id.clone()))
}
