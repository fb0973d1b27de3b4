//! # Handler Contract
//!
//! A handler is the unit of behavior bound to one method. It receives the
//! call's arguments in declaration order and produces a [`Reply`] or fails.
//!
//! # Usage Patterns
//!
//! 1. **Closure**: `handler_fn(|args| Ok(Reply::new(args.len())))`
//! 2. **Struct implementation**: `impl Handler for MyHandler`
//! 3. **Delegation / adapters**: see `polymethod-std` and `polymethod-queue`
//!
//! The dispatcher does not check arguments against the bound signature. A
//! handler that receives arguments it cannot use fails with its own error,
//! usually an [`ArgumentError`] from [`Args::downcast_ref`].
//!
//! [`ArgumentError`]: crate::ArgumentError

use crate::{
    error::BoxError,
    value::{Args, Reply},
};

/// The pluggable implementation of one interface method.
///
/// Handlers are shared by the registry for its whole lifetime and may be
/// invoked from several threads at once.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle method calls",
    label = "missing `Handler` implementation",
    note = "Closures need an explicit signature; wrap them with `handler_fn`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Handle one call.
    fn handle(&self, args: Args) -> Result<Reply, BoxError>;
}

// Blanket impl for functions
impl<F> Handler for F
where
    F: Fn(Args) -> Result<Reply, BoxError> + Send + Sync + 'static,
{
    fn handle(&self, args: Args) -> Result<Reply, BoxError> {
        (self)(args)
    }
}

/// A [`Handler`] built from a closure.
#[derive(Clone, Copy)]
pub struct FnHandler<F>(F);

/// Wrap a closure as a [`Handler`], pinning its signature for inference.
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(Args) -> Result<Reply, BoxError> + Send + Sync + 'static,
{
    FnHandler(f)
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(Args) -> Result<Reply, BoxError> + Send + Sync + 'static,
{
    fn handle(&self, args: Args) -> Result<Reply, BoxError> {
        (self.0)(args)
    }
}
