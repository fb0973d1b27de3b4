//! # Interface Metadata
//!
//! A language-native metadata table describing the methods of one interface.
//! Builders consult it to turn a method name (and optionally a parameter type
//! list) into a fully resolved [`MethodDescriptor`].
//!
//! Tables are normally produced by `#[polymethod::interface]`, which builds
//! them once per trait. They can also be written by hand:
//!
//! ```rust,ignore
//! struct Clock;
//!
//! impl Interface for Clock {
//!     fn descriptor() -> &'static InterfaceDescriptor {
//!         static TABLE: LazyLock<InterfaceDescriptor> = LazyLock::new(|| {
//!             InterfaceDescriptor::builder::<Clock>("Clock")
//!                 .method("now", vec![], ParamType::of::<u64>())
//!                 .build()
//!         });
//!         &TABLE
//!     }
//! }
//! ```

use crate::{
    dispatch::Dispatch,
    key::{InterfaceId, MethodKey, ParamType},
};
use std::{borrow::Cow, sync::Arc};

/// One row of an interface metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    key: MethodKey,
    returns: ParamType,
}

impl MethodDescriptor {
    /// Describe `interface::name(params...) -> returns`.
    pub fn new(
        interface: InterfaceId,
        name: impl Into<Cow<'static, str>>,
        params: Vec<ParamType>,
        returns: ParamType,
    ) -> Self {
        Self {
            key: MethodKey::new(interface, name, params),
            returns,
        }
    }

    /// The lookup key derived from this signature.
    pub fn key(&self) -> &MethodKey {
        &self.key
    }

    /// The declaring interface.
    pub fn interface(&self) -> InterfaceId {
        self.key.interface()
    }

    /// The method name.
    pub fn name(&self) -> &str {
        self.key.name()
    }

    /// The ordered parameter types.
    pub fn params(&self) -> &[ParamType] {
        self.key.params()
    }

    /// The declared return type.
    pub fn returns(&self) -> ParamType {
        self.returns
    }
}

/// The metadata table of one interface.
#[derive(Debug, Clone)]
pub struct InterfaceDescriptor {
    id: InterfaceId,
    methods: Vec<MethodDescriptor>,
}

impl InterfaceDescriptor {
    /// Start a table for the interface represented by `I`.
    pub fn builder<I: ?Sized + 'static>(name: &'static str) -> DescriptorBuilder {
        DescriptorBuilder {
            id: InterfaceId::of::<I>(name),
            methods: Vec::new(),
        }
    }

    /// The interface identity.
    pub fn id(&self) -> InterfaceId {
        self.id
    }

    /// The interface display name.
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// All declared methods, in declaration order.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// All declared methods called `name`.
    pub fn overloads<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a MethodDescriptor> {
        self.methods.iter().filter(move |m| m.name() == name)
    }

    /// The method with exactly this name and ordered parameter list.
    pub fn find(&self, name: &str, params: &[ParamType]) -> Option<&MethodDescriptor> {
        self.overloads(name).find(|m| m.params() == params)
    }
}

/// Builder for [`InterfaceDescriptor`].
pub struct DescriptorBuilder {
    id: InterfaceId,
    methods: Vec<MethodDescriptor>,
}

impl DescriptorBuilder {
    /// Declare a method.
    pub fn method(
        mut self,
        name: impl Into<Cow<'static, str>>,
        params: Vec<ParamType>,
        returns: ParamType,
    ) -> Self {
        self.methods
            .push(MethodDescriptor::new(self.id, name, params, returns));
        self
    }

    /// Finish the table.
    pub fn build(self) -> InterfaceDescriptor {
        InterfaceDescriptor {
            id: self.id,
            methods: self.methods,
        }
    }
}

/// A type standing for an interface that has a metadata table.
///
/// Implemented by `#[polymethod::interface]` for `dyn Trait`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no interface metadata",
    label = "missing `Interface` implementation",
    note = "Annotate the trait with `#[polymethod::interface]` or implement `Interface` by hand."
)]
pub trait Interface: 'static {
    /// The process-wide metadata table for this interface.
    fn descriptor() -> &'static InterfaceDescriptor;

    /// The interface identity.
    fn id() -> InterfaceId {
        Self::descriptor().id()
    }
}

/// An interface that can be materialized as an object forwarding every call
/// to a [`Dispatch`].
pub trait Proxied: Interface {
    /// Wrap `dispatch` in an object implementing this interface.
    fn proxy(dispatch: Arc<dyn Dispatch>) -> Box<Self>;
}
