//! # polymethod-std
//!
//! Standard implementations for the polymethod dispatch registry.
//!
//! This crate provides:
//! - **Registry**: [`Registry`], the immutable method table, and its [`RegistryBuilder`]
//! - **Standard handlers**: [`Delegate`](handlers::Delegate), [`TracingHandler`](handlers::TracingHandler)
//! - **Interception seam**: [`AroundAdvice`](advice::AroundAdvice)
//! - **Test doubles**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use polymethod_core;

// Modules
pub mod advice;
pub mod builder;
pub mod handlers;
pub mod registry;
pub mod testing;

#[cfg(test)]
mod fixtures;

pub use builder::RegistryBuilder;
pub use registry::Registry;
