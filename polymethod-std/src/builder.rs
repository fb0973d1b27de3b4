//! Builder for [`Registry`].
//!
//! The builder is a plain, single-threaded accumulator. Bindings are keyed by
//! [`MethodKey`]; binding the same method twice keeps the later handler. The
//! target interface can be replaced, in which case bindings made against the
//! previous target are discarded so every key always belongs to the target.
//!
//! [`build`](RegistryBuilder::build) takes a snapshot: the builder stays
//! usable afterwards and further bindings never reach registries that were
//! already built.

use crate::registry::Registry;
use polymethod_core::{
    BuildError, Handler, Interface, InterfaceDescriptor, MethodDescriptor, MethodKey, ParamType,
    Proxied,
};
use std::{collections::HashMap, sync::Arc};

/// Builder for constructing a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    target: Option<&'static InterfaceDescriptor>,
    methods: HashMap<MethodKey, Arc<dyn Handler>>,
}

impl RegistryBuilder {
    /// Create a builder with no target interface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder targeting `I`.
    pub fn for_interface<I: Interface + ?Sized>() -> Self {
        Self::new().with_target::<I>()
    }

    /// Set the target interface.
    pub fn with_target<I: Interface + ?Sized>(self) -> Self {
        self.with_target_descriptor(I::descriptor())
    }

    /// Set the target interface from its metadata table.
    pub fn with_target_descriptor(mut self, target: &'static InterfaceDescriptor) -> Self {
        if let Some(previous) = self.target {
            if previous.id() != target.id() && !self.methods.is_empty() {
                tracing::debug!(
                    from = previous.name(),
                    to = target.name(),
                    dropped = self.methods.len(),
                    "target interface replaced, dropping bindings"
                );
                self.methods.clear();
            }
        }
        self.target = Some(target);
        self
    }

    /// The current target interface, if any.
    pub fn target(&self) -> Option<&'static InterfaceDescriptor> {
        self.target
    }

    /// Bind `handler` to a fully resolved method.
    pub fn with_method(
        self,
        method: &MethodDescriptor,
        handler: impl Handler,
    ) -> Result<Self, BuildError> {
        self.with_shared_method(method, Arc::new(handler))
    }

    /// Bind a handler that may be shared with other methods or registries.
    pub fn with_shared_method(
        mut self,
        method: &MethodDescriptor,
        handler: Arc<dyn Handler>,
    ) -> Result<Self, BuildError> {
        let target = self.require_target()?;
        if method.interface() != target.id() {
            return Err(BuildError::ForeignMethod {
                method: method.key().clone(),
                target: target.name(),
            });
        }

        if self.methods.insert(method.key().clone(), handler).is_some() {
            tracing::trace!(method = %method.key(), "replaced existing binding");
        }
        Ok(self)
    }

    /// Bind `handler` to the target's only zero-parameter method called `name`.
    pub fn with_named_method(self, name: &str, handler: impl Handler) -> Result<Self, BuildError> {
        let target = self.require_target()?;
        let mut candidates = target.overloads(name).filter(|m| m.params().is_empty());
        match (candidates.next(), candidates.next()) {
            (Some(method), None) => self.with_method(method, handler),
            _ => Err(no_such_method(target, name, &[])),
        }
    }

    /// Bind `handler` to the target method with this exact name and parameter list.
    pub fn with_method_params(
        self,
        name: &str,
        params: &[ParamType],
        handler: impl Handler,
    ) -> Result<Self, BuildError> {
        let target = self.require_target()?;
        match target.find(name, params) {
            Some(method) => self.with_method(method, handler),
            None => Err(no_such_method(target, name, params)),
        }
    }

    /// Build a registry from the current bindings.
    ///
    /// Unbound interface methods are allowed and fail when called.
    pub fn build(&self) -> Result<Registry, BuildError> {
        let target = self.require_target()?;
        tracing::debug!(
            interface = target.name(),
            bound = self.methods.len(),
            declared = target.methods().len(),
            "built registry"
        );
        Ok(Registry::new(target.id(), self.methods.clone()))
    }

    /// Build a registry and materialize it as an object implementing `I`.
    pub fn build_proxy<I: Proxied + ?Sized>(&self) -> Result<Box<I>, BuildError> {
        self.build()?.into_proxy::<I>()
    }

    fn require_target(&self) -> Result<&'static InterfaceDescriptor, BuildError> {
        self.target.ok_or_else(|| {
            BuildError::InvalidConfiguration("no target interface has been set".to_string())
        })
    }
}

fn no_such_method(target: &InterfaceDescriptor, name: &str, params: &[ParamType]) -> BuildError {
    BuildError::NoSuchMethod {
        interface: target.name(),
        name: name.to_string(),
        params: params.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::RegistryBuilder;
    use crate::fixtures::{MockTarget, OtherTarget, method};
    use polymethod_core::{Args, BuildError, InvokeError, ParamType, Reply, args, handler_fn};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn test_build_without_target() {
        let result = RegistryBuilder::new().build();
        assert!(matches!(result, Err(BuildError::InvalidConfiguration(_))));

        let result = RegistryBuilder::new().with_named_method("noop", handler_fn(|_| Ok(Reply::unit())));
        assert!(matches!(result, Err(BuildError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_named_method_requires_single_nullary_overload() {
        let stub = || handler_fn(|_| Ok(Reply::unit()));

        // declared, but only with parameters
        let result = RegistryBuilder::for_interface::<MockTarget>()
            .with_named_method("boolean_boolean_return", stub());
        assert!(matches!(result, Err(BuildError::NoSuchMethod { .. })));

        // not declared at all
        let result = RegistryBuilder::for_interface::<MockTarget>().with_named_method("missing", stub());
        assert!(matches!(result, Err(BuildError::NoSuchMethod { .. })));

        // two zero-parameter overloads
        let result =
            RegistryBuilder::for_interface::<MockTarget>().with_named_method("overloaded", stub());
        assert!(matches!(result, Err(BuildError::NoSuchMethod { ref name, .. }) if name == "overloaded"));

        let registry = RegistryBuilder::for_interface::<MockTarget>()
            .with_named_method("noop", stub())
            .unwrap()
            .build()
            .unwrap();
        assert!(registry.implements_method(method::<MockTarget>("noop")));
    }

    #[test]
    fn test_method_params_resolution() {
        let registry = RegistryBuilder::for_interface::<MockTarget>()
            .with_method_params(
                "string_double_string_return",
                &[ParamType::of::<String>(), ParamType::of::<f64>()],
                handler_fn(|args| {
                    let text = args.downcast_ref::<String>(0)?;
                    let number = args.downcast_ref::<f64>(1)?;
                    Ok(Reply::new(format!("{text}/{number}")))
                }),
            )
            .unwrap()
            .with_method_params("overloaded", &[ParamType::of::<u32>()], handler_fn(|_| Ok(Reply::unit())))
            .unwrap()
            .build()
            .unwrap();

        let reply = registry
            .invoke(
                method::<MockTarget>("string_double_string_return"),
                args!["x".to_string(), 1.5_f64],
            )
            .unwrap();
        assert_eq!(reply.downcast::<String>().unwrap(), "x/1.5");

        let result = RegistryBuilder::for_interface::<MockTarget>().with_method_params(
            "string_double_string_return",
            &[ParamType::of::<f64>(), ParamType::of::<String>()],
            handler_fn(|_| Ok(Reply::unit())),
        );
        match result {
            Err(err @ BuildError::NoSuchMethod { .. }) => assert_eq!(
                err.to_string(),
                "no such method: MockTarget::string_double_string_return(f64, alloc::string::String)"
            ),
            other => panic!("expected NoSuchMethod, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_rebinding_keeps_last_handler() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let (a, b) = (first.clone(), second.clone());

        let registry = RegistryBuilder::for_interface::<MockTarget>()
            .with_named_method(
                "noop",
                handler_fn(move |_| {
                    a.fetch_add(1, Ordering::SeqCst);
                    Ok(Reply::unit())
                }),
            )
            .unwrap()
            .with_method(
                method::<MockTarget>("noop"),
                handler_fn(move |_| {
                    b.fetch_add(1, Ordering::SeqCst);
                    Ok(Reply::unit())
                }),
            )
            .unwrap()
            .build()
            .unwrap();

        registry
            .invoke(method::<MockTarget>("noop"), Args::new())
            .unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_foreign_method_rejected() {
        let result = RegistryBuilder::for_interface::<MockTarget>().with_method(
            method::<OtherTarget>("noop"),
            handler_fn(|_| Ok(Reply::unit())),
        );
        assert!(matches!(result, Err(BuildError::ForeignMethod { target: "MockTarget", .. })));
    }

    #[test]
    fn test_replacing_target_drops_old_bindings() {
        let builder = RegistryBuilder::for_interface::<MockTarget>()
            .with_named_method("noop", handler_fn(|_| Ok(Reply::unit())))
            .unwrap()
            .with_target::<OtherTarget>();

        let registry = builder.build().unwrap();
        assert!(registry.implements::<OtherTarget>());
        assert!(!registry.implements::<MockTarget>());
        assert!(registry.is_empty());

        // same target again keeps what was bound
        let registry = RegistryBuilder::for_interface::<OtherTarget>()
            .with_named_method("byte_value", handler_fn(|_| Ok(Reply::new(7_u8))))
            .unwrap()
            .with_target::<OtherTarget>()
            .build()
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_build_is_a_snapshot() {
        let builder = RegistryBuilder::for_interface::<MockTarget>()
            .with_named_method("string_return", handler_fn(|_| Ok(Reply::new("first".to_string()))))
            .unwrap();
        let first = builder.build().unwrap();

        let builder = builder
            .with_named_method("string_return", handler_fn(|_| Ok(Reply::new("second".to_string()))))
            .unwrap()
            .with_named_method("noop", handler_fn(|_| Ok(Reply::unit())))
            .unwrap();
        let second = builder.build().unwrap();

        let call = |registry: &crate::Registry| {
            registry
                .invoke(method::<MockTarget>("string_return"), Args::new())
                .unwrap()
                .downcast::<String>()
                .unwrap()
        };
        assert_eq!(call(&first), "first");
        assert_eq!(call(&second), "second");
        assert!(matches!(
            first.invoke(method::<MockTarget>("noop"), Args::new()),
            Err(InvokeError::NotImplemented(_))
        ));
        assert!(second.invoke(method::<MockTarget>("noop"), Args::new()).is_ok());
    }

    #[test]
    fn test_partial_implementation_builds() {
        let registry = RegistryBuilder::for_interface::<MockTarget>().build().unwrap();
        assert!(registry.is_empty());
        assert!(registry.implements::<MockTarget>());
    }
}
