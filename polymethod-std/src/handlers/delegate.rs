//! Delegation to a pre-existing object.

use polymethod_core::{Args, BoxError, Handler, Reply};
use std::sync::Arc;

/// A handler forwarding calls to an existing object.
///
/// The forwarding function unpacks the arguments and calls the matching
/// method on the target.
///
/// ```rust,ignore
/// let handler = Delegate::new(Arc::new(RealGreeter), |greeter, args| {
///     let name = args.downcast_ref::<String>(0)?;
///     Ok(Reply::new(greeter.greet(name.clone())?))
/// });
/// ```
pub struct Delegate<T: ?Sized, F> {
    target: Arc<T>,
    call: F,
}

impl<T: ?Sized, F> Delegate<T, F> {
    /// Forward calls to `target` through `call`.
    pub fn new(target: Arc<T>, call: F) -> Self
    where
        F: Fn(&T, Args) -> Result<Reply, BoxError>,
    {
        Self { target, call }
    }

    /// The object calls are forwarded to.
    pub fn target(&self) -> &Arc<T> {
        &self.target
    }
}

impl<T, F> Handler for Delegate<T, F>
where
    T: ?Sized + Send + Sync + 'static,
    F: Fn(&T, Args) -> Result<Reply, BoxError> + Send + Sync + 'static,
{
    fn handle(&self, args: Args) -> Result<Reply, BoxError> {
        (self.call)(&self.target, args)
    }
}
