//! # polymethod - Piecemeal Interface Implementation
//!
//! `polymethod` implements a trait one method at a time. Each method is bound
//! to its own [`Handler`]; a [`Registry`] routes every call to the handler
//! registered under the method's exact signature, and a generated proxy makes
//! the registry usable wherever the trait is expected.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use polymethod::{BoxError, ParamType, RegistryBuilder, Reply, handler_fn};
//!
//! #[polymethod::interface]
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self, name: String) -> Result<String, BoxError>;
//!     fn reset(&self) -> Result<(), BoxError>;
//! }
//!
//! let greeter: Box<dyn Greeter> = RegistryBuilder::for_interface::<dyn Greeter>()
//!     .with_method_params(
//!         "greet",
//!         &[ParamType::of::<String>()],
//!         handler_fn(|args| Ok(Reply::new(format!("hi {}", args.downcast_ref::<String>(0)?)))),
//!     )?
//!     .build_proxy::<dyn Greeter>()?;
//!
//! assert_eq!(greeter.greet("dude".into())?, "hi dude");
//! // `reset` was never bound
//! assert!(greeter.reset().is_err());
//! ```
//!
//! ## Crates
//!
//! - `polymethod-core`: method keys, metadata tables, values, the handler contract
//! - `polymethod-std`: registry, builder, standard handlers, test doubles
//! - `polymethod-macros`: `#[interface]` (feature `macros`, on by default)
//! - `polymethod-queue`: the message-queue send handler (feature `queue`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use polymethod_core::{
    // Values
    Argument,
    // Error types
    ArgumentError,
    Args,
    BoxError,
    BuildError,
    // Metadata
    DescriptorBuilder,
    // Routing seam
    Dispatch,
    // Handler
    FnHandler,
    Handler,
    Interface,
    InterfaceDescriptor,
    // Identity
    InterfaceId,
    InvokeError,
    MethodDescriptor,
    MethodKey,
    ParamType,
    Proxied,
    Reply,
    args,
    handler_fn,
};

#[doc(hidden)]
pub use polymethod_core::__private;

// Registry
pub use polymethod_std::{Registry, RegistryBuilder, advice, handlers, testing};

/// Generate the metadata table and a forwarding proxy for a trait.
#[cfg(feature = "macros")]
pub use polymethod_macros::interface;

/// Message-queue integration.
#[cfg(feature = "queue")]
pub mod queue {
    pub use polymethod_queue::{
        ArgumentMapper, MAX_MESSAGE_SIZE, MessageAttributeValue, MessageSystemAttributeValue,
        QueueClient, QueueError, ReplyMapper, SendMessageAck, SendMessageHandler,
        SendMessageHandlerBuilder, SendMessageRequest, json_array, message_id_reply, unit_reply,
    };
}

/// The commonly used names.
pub mod prelude {
    pub use crate::{
        Args, BoxError, Handler, Interface, InvokeError, ParamType, Proxied, Registry,
        RegistryBuilder, Reply, args, handler_fn,
    };
}
