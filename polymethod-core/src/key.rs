//! # Method Identity
//!
//! Canonical identifiers used as lookup keys by a dispatch registry.
//!
//! A [`MethodKey`] is the triple *(declaring interface, method name, ordered
//! parameter types)*. Two keys are equal iff all three components are equal.
//! The return type is deliberately not part of the key: it never takes part
//! in overload resolution.
//!
//! Type identity is exact. [`InterfaceId`] and [`ParamType`] compare by
//! [`TypeId`], so `String` and `&'static str` are different parameter types
//! and a sub-trait is a different interface from its super-trait.

use crate::interface::Interface;
use std::{
    any::{TypeId, type_name},
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

/// Identity of an interface (a trait, or any marker type standing in for one).
///
/// Equality and hashing use the [`TypeId`] only; the name is for display.
#[derive(Clone, Copy)]
pub struct InterfaceId {
    id: TypeId,
    name: &'static str,
}

impl InterfaceId {
    /// Identity of the interface represented by `I`, displayed as `name`.
    ///
    /// For trait interfaces `I` is the trait object type, e.g. `dyn Greeter`.
    pub fn of<I: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<I>(),
            name,
        }
    }

    /// The underlying type id.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The display name of the interface.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for InterfaceId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InterfaceId {}

impl Hash for InterfaceId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InterfaceId").field(&self.name).finish()
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A parameter (or return) type in a method signature.
#[derive(Clone, Copy)]
pub struct ParamType {
    id: TypeId,
    name: &'static str,
}

impl ParamType {
    /// The parameter type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Whether this is exactly `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// The underlying type id.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name, as reported by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParamType {}

impl Hash for ParamType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Canonical key of a method signature.
///
/// Displayed as `Interface::name(T1, T2)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    interface: InterfaceId,
    name: Cow<'static, str>,
    params: Vec<ParamType>,
}

impl MethodKey {
    /// Build the key for `interface::name(params...)`.
    pub fn new(
        interface: InterfaceId,
        name: impl Into<Cow<'static, str>>,
        params: Vec<ParamType>,
    ) -> Self {
        Self {
            interface,
            name: name.into(),
            params,
        }
    }

    /// Build the key for a method of the typed interface `I`.
    pub fn of<I: Interface + ?Sized>(
        name: impl Into<Cow<'static, str>>,
        params: Vec<ParamType>,
    ) -> Self {
        Self::new(I::id(), name, params)
    }

    /// The declaring interface.
    pub fn interface(&self) -> InterfaceId {
        self.interface
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered parameter types.
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}({})",
            self.interface,
            self.name,
            ParamList(&self.params)
        )
    }
}

impl fmt::Debug for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodKey({self})")
    }
}

/// Comma separated rendering of a parameter list.
pub(crate) struct ParamList<'a>(pub(crate) &'a [ParamType]);

impl fmt::Display for ParamList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InterfaceId, MethodKey, ParamType};

    struct Target;
    struct Other;

    #[test]
    fn test_equal_inputs_produce_equal_keys() {
        let a = MethodKey::new(
            InterfaceId::of::<Target>("Target"),
            "join",
            vec![ParamType::of::<String>(), ParamType::of::<f64>()],
        );
        let b = MethodKey::new(
            InterfaceId::of::<Target>("Target"),
            String::from("join"),
            vec![ParamType::of::<String>(), ParamType::of::<f64>()],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_overloads_are_distinct() {
        let iface = InterfaceId::of::<Target>("Target");
        let unary = MethodKey::new(iface, "flag", vec![ParamType::of::<bool>()]);
        let nullary = MethodKey::new(iface, "flag", Vec::new());
        let reordered = MethodKey::new(
            iface,
            "flag",
            vec![ParamType::of::<bool>(), ParamType::of::<u8>()],
        );
        let swapped = MethodKey::new(
            iface,
            "flag",
            vec![ParamType::of::<u8>(), ParamType::of::<bool>()],
        );

        assert_ne!(unary, nullary);
        assert_ne!(reordered, swapped);
    }

    #[test]
    fn test_interface_is_part_of_the_key() {
        let a = MethodKey::new(InterfaceId::of::<Target>("Same"), "noop", Vec::new());
        let b = MethodKey::new(InterfaceId::of::<Other>("Same"), "noop", Vec::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let key = MethodKey::new(
            InterfaceId::of::<Target>("Target"),
            "join",
            vec![ParamType::of::<u32>(), ParamType::of::<bool>()],
        );
        assert_eq!(key.to_string(), "Target::join(u32, bool)");
    }
}
