//! # Dispatch Registry
//!
//! An immutable table from [`MethodKey`] to [`Handler`] for exactly one
//! target interface. Calls are routed by the key derived from the method
//! descriptor; a handler's result or failure is returned as is.
//!
//! Registries are produced by [`RegistryBuilder`] and never change after
//! that, so a built registry can be shared and invoked from any number of
//! threads.

use crate::builder::RegistryBuilder;
use polymethod_core::{
    Args, BuildError, Dispatch, Handler, Interface, InterfaceId, InvokeError, MethodDescriptor,
    MethodKey, Proxied, Reply,
};
use std::{collections::HashMap, fmt, sync::Arc};

/// An immutable method table implementing one interface.
pub struct Registry {
    interface: InterfaceId,
    methods: HashMap<MethodKey, Arc<dyn Handler>>,
}

impl Registry {
    pub(crate) fn new(interface: InterfaceId, methods: HashMap<MethodKey, Arc<dyn Handler>>) -> Self {
        Self { interface, methods }
    }

    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The interface this registry implements.
    pub fn interface(&self) -> InterfaceId {
        self.interface
    }

    /// Whether `interface` is exactly the target interface.
    pub fn implements_interface(&self, interface: &InterfaceId) -> bool {
        self.interface == *interface
    }

    /// Whether `I` is exactly the target interface.
    pub fn implements<I: Interface + ?Sized>(&self) -> bool {
        self.implements_interface(&I::id())
    }

    /// Whether `method` is declared by the target interface and bound.
    pub fn implements_method(&self, method: &MethodDescriptor) -> bool {
        method.interface() == self.interface && self.methods.contains_key(method.key())
    }

    /// Invoke `method` with `args`.
    ///
    /// A bound handler's failure comes back as [`InvokeError::Handler`]
    /// carrying the handler's own error; an unbound method is
    /// [`InvokeError::NotImplemented`].
    pub fn invoke(&self, method: &MethodDescriptor, args: Args) -> Result<Reply, InvokeError> {
        let key = method.key();
        match self.methods.get(key) {
            Some(handler) => {
                tracing::trace!(method = %key, args = args.len(), "invoking handler");
                handler.handle(args).map_err(InvokeError::Handler)
            }
            None => {
                tracing::debug!(method = %key, "no handler bound");
                Err(InvokeError::NotImplemented(key.clone()))
            }
        }
    }

    /// The bound method keys, in no particular order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodKey> {
        self.methods.keys()
    }

    /// Number of bound methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether no method is bound.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Materialize this registry as an object implementing `I`.
    pub fn into_proxy<I: Proxied + ?Sized>(self) -> Result<Box<I>, BuildError> {
        Arc::new(self).proxy::<I>()
    }

    /// Materialize a shared registry as an object implementing `I`.
    pub fn proxy<I: Proxied + ?Sized>(self: &Arc<Self>) -> Result<Box<I>, BuildError> {
        if !self.implements::<I>() {
            return Err(BuildError::InterfaceMismatch {
                expected: I::descriptor().name(),
                actual: self.interface.name(),
            });
        }
        Ok(I::proxy(self.clone()))
    }
}

impl Dispatch for Registry {
    fn interface(&self) -> InterfaceId {
        self.interface
    }

    fn implements_method(&self, method: &MethodDescriptor) -> bool {
        Registry::implements_method(self, method)
    }

    fn invoke(&self, method: &MethodDescriptor, args: Args) -> Result<Reply, InvokeError> {
        Registry::invoke(self, method, args)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("interface", &self.interface)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::fixtures::{MockTarget, OtherTarget, method};
    use polymethod_core::{Args, Dispatch, Interface, InvokeError, Reply, args, handler_fn};
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
    };

    fn registry() -> Registry {
        Registry::builder()
            .with_target::<MockTarget>()
            .with_named_method("string_return", handler_fn(|_| Ok(Reply::new("a-string".to_string()))))
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_implements_interface_is_exact() {
        let registry = registry();

        assert!(registry.implements::<MockTarget>());
        assert!(registry.implements_interface(&MockTarget::id()));
        assert!(!registry.implements::<OtherTarget>());
        assert_eq!(registry.interface(), MockTarget::id());
    }

    #[test]
    fn test_implements_method() {
        let registry = registry();

        assert!(registry.implements_method(method::<MockTarget>("string_return")));
        assert!(!registry.implements_method(method::<MockTarget>("noop")));
        assert!(!registry.implements_method(method::<OtherTarget>("byte_value")));
    }

    #[test]
    fn test_unbound_method_is_not_implemented() {
        let registry = registry();

        for args in [Args::new(), args!["x".to_string()], args![1_u8, true]] {
            let err = registry
                .invoke(method::<MockTarget>("noop"), args)
                .unwrap_err();
            assert!(matches!(&err, InvokeError::NotImplemented(key) if key.name() == "noop"));
        }

        let err = registry
            .invoke(method::<OtherTarget>("byte_value"), Args::new())
            .unwrap_err();
        assert!(err.is_not_implemented());
    }

    #[test]
    fn test_handler_failure_passes_through() {
        #[derive(Debug, thiserror::Error)]
        #[error("this is a handler error")]
        struct Boom;

        let registry = Registry::builder()
            .with_target::<MockTarget>()
            .with_named_method("throws_error", handler_fn(|_| Err(Boom.into())))
            .unwrap()
            .build()
            .unwrap();

        let err = registry
            .invoke(method::<MockTarget>("throws_error"), Args::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "this is a handler error");
        assert!(err.into_handler_error().unwrap().is::<Boom>());
    }

    #[test]
    fn test_dispatch_trait_object() {
        let dispatch: Arc<dyn Dispatch> = Arc::new(registry());

        assert!(dispatch.implements_interface(&MockTarget::id()));
        let reply = dispatch
            .invoke(method::<MockTarget>("string_return"), Args::new())
            .unwrap();
        assert_eq!(reply.downcast::<String>().unwrap(), "a-string");
    }

    #[test]
    fn test_concurrent_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let registry = Registry::builder()
            .with_target::<MockTarget>()
            .with_method_params(
                "boolean_boolean_return",
                &[polymethod_core::ParamType::of::<bool>()],
                handler_fn(move |args| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Reply::new(*args.downcast_ref::<bool>(0)?))
                }),
            )
            .unwrap()
            .build()
            .unwrap();

        thread::scope(|s| {
            for i in 0..8 {
                let registry = &registry;
                s.spawn(move || {
                    for _ in 0..100 {
                        let reply = registry
                            .invoke(method::<MockTarget>("boolean_boolean_return"), args![i % 2 == 0])
                            .unwrap();
                        assert_eq!(reply.downcast::<bool>().unwrap(), i % 2 == 0);
                    }
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 800);
    }
}
