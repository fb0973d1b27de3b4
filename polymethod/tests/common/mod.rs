#![allow(dead_code)]

use polymethod::{BoxError, InvokeError};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use thiserror::Error;

// ============================================================================
// Test Interfaces
// ============================================================================

#[polymethod::interface]
pub trait MockTarget: Send + Sync {
    fn string_double_string_return(&self, text: String, number: f64) -> Result<String, BoxError>;
    fn string_return(&self) -> Result<String, BoxError>;
    fn boolean_return(&self) -> Result<bool, BoxError>;
    fn boolean_boolean_return(&self, flag: bool) -> Result<bool, BoxError>;
    fn noop(&self) -> Result<(), BoxError>;
    fn throws_error(&self) -> Result<(), BoxError>;
}

/// Extends another interface; gets a metadata table but no proxy.
#[polymethod::interface]
pub trait ExtendedTarget: MockTarget {
    fn extra(&self) -> Result<(), BoxError>;
}

#[derive(Error, Debug)]
#[error("boom")]
pub struct Boom;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,
    #[error(transparent)]
    Dispatch(#[from] InvokeError),
}

#[polymethod::interface(name = "Calc", proxy = "CalcClient")]
pub trait Calculator: Send + Sync {
    fn divide(&self, dividend: u64, divisor: u64) -> Result<u64, CalcError>;
    fn record(&self, entry: Entry) -> Result<(), CalcError>;
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub label: String,
    pub value: u64,
}

// ============================================================================
// Real Implementations
// ============================================================================

/// A plain implementation calls can be delegated to.
pub struct MockImpl {
    pub seen: Mutex<Vec<String>>,
}

impl MockImpl {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl MockTarget for MockImpl {
    fn string_double_string_return(&self, text: String, number: f64) -> Result<String, BoxError> {
        self.seen.lock().unwrap().push(format!("{text}:{number}"));
        Ok(format!("{text}{number}"))
    }

    fn string_return(&self) -> Result<String, BoxError> {
        Ok("a-string".to_string())
    }

    fn boolean_return(&self) -> Result<bool, BoxError> {
        Ok(true)
    }

    fn boolean_boolean_return(&self, flag: bool) -> Result<bool, BoxError> {
        Ok(!flag)
    }

    fn noop(&self) -> Result<(), BoxError> {
        Ok(())
    }

    fn throws_error(&self) -> Result<(), BoxError> {
        Err("bad things, man!".into())
    }
}
