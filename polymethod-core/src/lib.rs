//! # polymethod-core
//!
//! Core traits and types for the polymethod dispatch registry.
//!
//! An interface (a Rust trait) is implemented piecemeal: every method is
//! bound to its own [`Handler`], and calls are routed by [`MethodKey`]. This
//! crate holds the vocabulary shared by registries, proxies and handler
//! adapters; the registry itself lives in `polymethod-std`.
//!
//! # Building Blocks
//!
//! - [`MethodKey`] - Canonical method identity: interface, name, parameter types
//! - [`InterfaceDescriptor`] - Metadata table of one interface
//! - [`Args`] / [`Reply`] - Heterogeneous call arguments and type-erased results
//! - [`Handler`] - The per-method behavior contract
//! - [`Dispatch`] - The routing seam proxies call into
//!
//! # Error Types
//!
//! - [`BuildError`] - Registry construction errors
//! - [`InvokeError`] - Call routing errors
//! - [`ArgumentError`] - Argument access errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatch;
mod error;
mod handler;
mod interface;
mod key;
mod proxy;
mod value;

// Re-exports
pub use dispatch::Dispatch;
pub use error::{ArgumentError, BoxError, BuildError, InvokeError};
pub use handler::{FnHandler, Handler, handler_fn};
pub use interface::{DescriptorBuilder, Interface, InterfaceDescriptor, MethodDescriptor, Proxied};
pub use key::{InterfaceId, MethodKey, ParamType};
pub use value::{Argument, Args, Reply};

/// Items used by code that `#[polymethod::interface]` generates.
#[doc(hidden)]
pub mod __private {
    pub use crate::proxy::{HandlerError, ViaAny, ViaError};
}
