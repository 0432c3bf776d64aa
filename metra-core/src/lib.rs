//! Metra Core - Fundamental numeric type
//!
//! This crate provides the scalar used throughout Metra:
//! - `Number`: Exact arbitrary precision rational numbers
//! - `NumberError`: Structured numeric errors
//!
//! Unit conversion factors must compose without drift, so `Number` is
//! rational at heart; transcendental operations take an explicit decimal
//! precision and are the only approximate paths.

mod number;

pub use number::{Number, NumberError, DEFAULT_PRECISION};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError, DEFAULT_PRECISION};
}
