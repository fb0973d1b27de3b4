//! Call arguments and replies.
//!
//! Arguments are heterogeneous and owned. Any `Serialize + Debug` value that is
//! `Send + Sync + 'static` can be passed, and handlers either downcast them
//! back to concrete types or render them as JSON without knowing their types.
//!
//! JSON objects keep the field order of the serialized type.
//!
//! Replies are type-erased; the caller decides what to downcast them into.

use crate::error::ArgumentError;
use serde::Serialize;
use std::{
    any::{Any, type_name},
    fmt,
};

/// A single call argument.
///
/// Blanket-implemented for every `Serialize + Debug + Send + Sync + 'static`
/// type; there is no need to implement it by hand.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be passed as a call argument",
    label = "must be `Serialize + Debug + Send + Sync + 'static`",
    note = "Interface methods take owned arguments so they can outlive the call site."
)]
pub trait Argument: Any + Send + Sync + fmt::Debug {
    /// Borrow as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Convert into a boxed `Any` for downcasting by value.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// The concrete type name.
    fn type_name(&self) -> &'static str;

    /// Render as JSON.
    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error>;
}

impl<T> Argument for T
where
    T: Serialize + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// The ordered arguments of one call.
#[derive(Debug, Default)]
pub struct Args {
    values: Vec<Box<dyn Argument>>,
}

impl Args {
    /// No arguments.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append an argument, builder style.
    pub fn with<T: Argument>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Append an argument.
    pub fn push<T: Argument>(&mut self, value: T) {
        self.values.push(Box::new(value));
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The argument at `index`.
    pub fn get(&self, index: usize) -> Option<&dyn Argument> {
        self.values.get(index).map(|value| value.as_ref())
    }

    /// Iterate over the arguments in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Argument> {
        self.values.iter().map(|value| value.as_ref())
    }

    /// Borrow the argument at `index` as a `T`.
    pub fn downcast_ref<T: 'static>(&self, index: usize) -> Result<&T, ArgumentError> {
        let value = self.values.get(index).ok_or(ArgumentError::Missing {
            index,
            len: self.values.len(),
        })?;
        value
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| ArgumentError::TypeMismatch {
                index,
                expected: type_name::<T>(),
                actual: value.type_name(),
            })
    }

    /// Take ownership of every argument, in order.
    pub fn into_vec(self) -> Vec<Box<dyn Argument>> {
        self.values
    }

    /// Render the whole argument list as a JSON array.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.values
            .iter()
            .map(|value| value.to_json())
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array)
    }
}

impl From<Vec<Box<dyn Argument>>> for Args {
    fn from(values: Vec<Box<dyn Argument>>) -> Self {
        Self { values }
    }
}

impl FromIterator<Box<dyn Argument>> for Args {
    fn from_iter<I: IntoIterator<Item = Box<dyn Argument>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Args {
    type Item = Box<dyn Argument>;
    type IntoIter = std::vec::IntoIter<Box<dyn Argument>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Build an [`Args`] from a list of expressions.
///
/// ```rust,ignore
/// let args = args!["a-string", 42_u32];
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new()$(.with($value))+
    };
}

/// The type-erased result of a call.
pub struct Reply {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Reply {
    /// Wrap a value.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// The "no result" reply.
    pub fn unit() -> Self {
        Self::new(())
    }

    /// Whether the reply holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Whether this is the unit reply.
    pub fn is_unit(&self) -> bool {
        self.is::<()>()
    }

    /// The concrete type name of the held value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the held value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the held value as a `T`, or get the reply back unchanged.
    pub fn downcast<T: Any>(self) -> Result<T, Reply> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|value| Reply { value, type_name })
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reply").field(&self.type_name).finish()
    }
}
