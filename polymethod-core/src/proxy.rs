//! Support code for generated proxies.
//!
//! A proxy method returns `Result<T, E>`. Routing failures reach `E` through
//! `From<InvokeError>`, but a handler's own failure must reach the caller as
//! the handler produced it. [`HandlerError::convert`] picks the conversion at
//! the call site:
//!
//! - `E` is an error type: the boxed error is downcast to `E` when it is one
//! - `E` is [`BoxError`]: the box is returned as is
//! - otherwise the box is carried in [`InvokeError::Handler`]
//!
//! The choice is made by method resolution on `&HandlerError<E>`: the impl
//! for `HandlerError<E>` (needs `E: Error`) is found before the one for
//! `&HandlerError<E>`.

use crate::error::{BoxError, InvokeError};
use std::{any::Any, error::Error, marker::PhantomData};

/// Converts a handler's failure into the proxy's error type `E`.
pub struct HandlerError<E>(PhantomData<fn() -> E>);

impl<E> HandlerError<E> {
    /// Converter targeting `E`.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for HandlerError<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Conversion for error types that implement [`Error`].
pub trait ViaError<E> {
    /// Recover an `E` thrown by the handler, or wrap the foreign error.
    fn convert(&self, source: BoxError) -> E;
}

impl<E> ViaError<E> for HandlerError<E>
where
    E: Error + From<InvokeError> + Send + Sync + 'static,
{
    fn convert(&self, source: BoxError) -> E {
        match source.downcast::<E>() {
            Ok(err) => *err,
            Err(source) => E::from(InvokeError::Handler(source)),
        }
    }
}

/// Conversion for every other `E`, [`BoxError`] included.
pub trait ViaAny<E> {
    /// Hand the box over unchanged when `E` is [`BoxError`], else wrap it.
    fn convert(&self, source: BoxError) -> E;
}

impl<E> ViaAny<E> for &HandlerError<E>
where
    E: From<InvokeError> + 'static,
{
    fn convert(&self, source: BoxError) -> E {
        let mut slot = Some(source);
        let same = (&mut slot as &mut dyn Any)
            .downcast_mut::<Option<E>>()
            .and_then(Option::take);
        match (same, slot) {
            (Some(err), _) => err,
            (None, Some(source)) => E::from(InvokeError::Handler(source)),
            (None, None) => unreachable!("the box is only taken when `E` is `BoxError`"),
        }
    }
}
