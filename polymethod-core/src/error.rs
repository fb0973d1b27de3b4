//! Error types for polymethod.
//!
//! - [`BuildError`] - Raised while assembling a registry
//! - [`InvokeError`] - Raised while routing a call
//! - [`ArgumentError`] - Raised by handlers reading their arguments

use crate::key::{MethodKey, ParamList, ParamType};
use thiserror::Error;

/// A boxed error type for handler failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while building a registry.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The name / parameter list does not resolve to exactly one declared method.
    #[error("no such method: {interface}::{name}({})", ParamList(.params))]
    NoSuchMethod {
        /// The target interface.
        interface: &'static str,
        /// The requested method name.
        name: String,
        /// The requested parameter types.
        params: Vec<ParamType>,
    },

    /// Required configuration is missing.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A method declared by another interface was bound.
    #[error("method {method} does not belong to target interface {target}")]
    ForeignMethod {
        /// The offending method.
        method: MethodKey,
        /// The target interface.
        target: &'static str,
    },

    /// A registry was materialized as an interface it does not implement.
    #[error("registry implements {actual}, not {expected}")]
    InterfaceMismatch {
        /// The requested interface.
        expected: &'static str,
        /// The registry's target interface.
        actual: &'static str,
    },
}

/// Errors raised while routing a call.
#[derive(Error, Debug)]
pub enum InvokeError {
    /// No handler is bound for the method.
    #[error("method implementation {0} was not found")]
    NotImplemented(MethodKey),

    /// The bound handler failed. The handler's own error, untouched.
    #[error(transparent)]
    Handler(BoxError),

    /// The handler replied with a value of the wrong type.
    #[error("method {method} expected a reply of type {expected}, got {actual}")]
    UnexpectedReply {
        /// The invoked method.
        method: MethodKey,
        /// The declared return type.
        expected: &'static str,
        /// The type the handler produced.
        actual: &'static str,
    },
}

impl InvokeError {
    /// Whether the method had no bound handler.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, InvokeError::NotImplemented(_))
    }

    /// The handler's error, if the handler failed.
    pub fn handler_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            InvokeError::Handler(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Take back the handler's error, if the handler failed.
    pub fn into_handler_error(self) -> Option<BoxError> {
        match self {
            InvokeError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors raised by handlers reading their arguments.
#[derive(Error, Debug)]
pub enum ArgumentError {
    /// Fewer arguments than expected.
    #[error("argument {index} missing, call has {len} argument(s)")]
    Missing {
        /// The requested position.
        index: usize,
        /// The number of arguments passed.
        len: usize,
    },

    /// The argument is of another type.
    #[error("argument {index} is {actual}, expected {expected}")]
    TypeMismatch {
        /// The requested position.
        index: usize,
        /// The requested type.
        expected: &'static str,
        /// The passed type.
        actual: &'static str,
    },
}
