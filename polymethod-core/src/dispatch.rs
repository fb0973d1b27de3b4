//! The routing seam between generated proxies and registries.

use crate::{
    error::InvokeError,
    interface::MethodDescriptor,
    key::InterfaceId,
    value::{Args, Reply},
};

/// Routes method calls to their implementations.
///
/// Generated proxies hold an `Arc<dyn Dispatch>` and forward every trait
/// method through [`Dispatch::invoke`].
pub trait Dispatch: Send + Sync {
    /// The single interface this dispatcher implements.
    fn interface(&self) -> InterfaceId;

    /// Whether `interface` is exactly the implemented interface.
    ///
    /// Identity only; there is no notion of sub- or super-interfaces.
    fn implements_interface(&self, interface: &InterfaceId) -> bool {
        self.interface() == *interface
    }

    /// Whether `method` belongs to the implemented interface and is bound.
    fn implements_method(&self, method: &MethodDescriptor) -> bool;

    /// Invoke `method` with `args`.
    fn invoke(&self, method: &MethodDescriptor, args: Args) -> Result<Reply, InvokeError>;
}
