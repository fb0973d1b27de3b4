//! A trait method bound to the queue send handler.

#![cfg(all(feature = "macros", feature = "queue"))]

use polymethod::{
    BoxError, ParamType, RegistryBuilder,
    queue::{QueueClient, SendMessageAck, SendMessageHandler, SendMessageRequest},
};
use pretty_assertions::assert_eq;
use serde::Serialize;
use std::sync::{Arc, Mutex};

#[derive(Serialize, Debug, Clone)]
pub struct Order {
    pub id: u32,
    pub customer: String,
}

#[polymethod::interface]
pub trait OrderEvents: Send + Sync {
    fn placed(&self, order: Order) -> Result<(), BoxError>;
    fn cancelled(&self, id: u32, reason: String) -> Result<(), BoxError>;
}

#[derive(Default)]
struct MockQueue {
    sent: Mutex<Vec<SendMessageRequest>>,
}

impl QueueClient for MockQueue {
    fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<Option<SendMessageAck>, BoxError> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(Some(SendMessageAck::with_message_id("m-1")))
    }
}

#[test]
fn test_trait_calls_become_messages() {
    let queue = Arc::new(MockQueue::default());
    let events = RegistryBuilder::for_interface::<dyn OrderEvents>()
        .with_method_params(
            "placed",
            &[ParamType::of::<Order>()],
            SendMessageHandler::new("orders", queue.clone()).unwrap(),
        )
        .unwrap()
        .with_method_params(
            "cancelled",
            &[ParamType::of::<u32>(), ParamType::of::<String>()],
            SendMessageHandler::with_delay("cancellations", queue.clone(), 30).unwrap(),
        )
        .unwrap()
        .build_proxy::<dyn OrderEvents>()
        .unwrap();

    events
        .placed(Order {
            id: 7,
            customer: "dude".to_string(),
        })
        .unwrap();
    events.cancelled(7, "changed my mind".to_string()).unwrap();

    let sent = queue.sent.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![
            SendMessageRequest::new("orders", r#"[{"id":7,"customer":"dude"}]"#),
            SendMessageRequest {
                delay_seconds: Some(30),
                ..SendMessageRequest::new("cancellations", r#"[7,"changed my mind"]"#)
            },
        ]
    );
}
