//! # Around Advice
//!
//! The seam an outside interception layer uses to redirect a call into a
//! single pre-bound handler. The interception layer owns the "when": it
//! decides which calls to divert and passes their raw arguments here. This
//! module only owns the "what": run the handler and hand back its reply.
//!
//! ```rust,ignore
//! struct Intercepted<S> {
//!     inner: S,
//!     advice: AroundAdvice,
//! }
//!
//! impl<S: ExampleService> ExampleService for Intercepted<S> {
//!     fn local(&self, arg: String) -> String {
//!         self.inner.local(arg)
//!     }
//!
//!     fn overridden(&self, arg: String) -> Result<String, BoxError> {
//!         self.advice.call(args![arg])
//!     }
//! }
//! ```

use polymethod_core::{Args, BoxError, Handler, Reply};
use std::{any::type_name, sync::Arc};
use thiserror::Error;

/// The advised call replied with an unexpected type.
#[derive(Error, Debug)]
#[error("advised call expected a reply of type {expected}, got {actual}")]
pub struct UnexpectedReply {
    /// The requested type.
    pub expected: &'static str,
    /// The type the handler produced.
    pub actual: &'static str,
}

/// Runs one pre-bound handler on behalf of an interception layer.
#[derive(Clone)]
pub struct AroundAdvice {
    handler: Arc<dyn Handler>,
}

impl AroundAdvice {
    /// Advise calls with `handler`.
    pub fn new(handler: impl Handler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Advise calls with a shared handler.
    pub fn from_shared(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    /// Run the handler with the intercepted call's arguments.
    pub fn proceed(&self, args: Args) -> Result<Reply, BoxError> {
        self.handler.handle(args)
    }

    /// Run the handler and take its reply as a `T`.
    pub fn call<T: 'static>(&self, args: Args) -> Result<T, BoxError> {
        self.proceed(args)?.downcast::<T>().map_err(|reply| {
            UnexpectedReply {
                expected: type_name::<T>(),
                actual: reply.type_name(),
            }
            .into()
        })
    }
}
