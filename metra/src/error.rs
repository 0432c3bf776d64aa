//! Error types for unit algebra operations

use metra_core::NumberError;
use thiserror::Error;

/// Errors raised by dimension, unit and system operations
#[derive(Debug, Error)]
pub enum UnitError {
    /// A fractional root was requested for a dimension whose exponents
    /// are not all divisible by the root index
    #[error("Cannot take root {n} of dimension {dimension}")]
    InvalidDimension { dimension: String, n: i32 },

    /// Conversion was requested between units of different dimensions
    #[error("Cannot convert {from} to {to}: incompatible dimensions")]
    IncompatibleDimension { from: String, to: String },

    /// A quantity kind is already mapped to a different unit in the system
    #[error("Quantity kind {kind} is already mapped to {existing}, rejecting {rejected}")]
    DuplicateQuantityMapping {
        kind: String,
        existing: String,
        rejected: String,
    },

    /// Numeric failure while applying a converter
    #[error("Numeric error: {0}")]
    Number(#[from] NumberError),
}
