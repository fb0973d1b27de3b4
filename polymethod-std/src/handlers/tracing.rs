use polymethod_core::{Args, BoxError, Handler, Reply};

/// A handler wrapper that instruments every call with a `tracing` span.
///
/// The span records the wrapper's name and the call arguments; a failing
/// call is additionally logged at `warn` level.
pub struct TracingHandler<H> {
    inner: H,
    name: &'static str,
}

impl<H> TracingHandler<H> {
    /// Create a new `TracingHandler` wrapper around a handler.
    pub const fn new(inner: H, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The wrapped handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: Clone> Clone for TracingHandler<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<H: Handler> Handler for TracingHandler<H> {
    fn handle(&self, args: Args) -> Result<Reply, BoxError> {
        let span = tracing::info_span!("handle", handler = %self.name, args = ?args);
        let _entered = span.enter();

        let result = self.inner.handle(args);
        match &result {
            Ok(reply) => tracing::trace!(reply = reply.type_name(), "handler returned"),
            Err(err) => tracing::warn!(error = %err, "handler failed"),
        }
        result
    }
}
