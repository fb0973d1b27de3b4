//! Standard handler implementations.

pub mod delegate;
pub mod tracing;

pub use delegate::Delegate;
pub use self::tracing::TracingHandler;
