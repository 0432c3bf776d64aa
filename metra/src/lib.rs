//! Metra - Physical Quantity and Unit Algebra
//!
//! Units as composable values with dimensional analysis. Conversion
//! factors are exact rationals wherever possible, so chained
//! conversions never drift.
//!
//! Building blocks:
//! - Dimension: seven-exponent vectors ([L], [M], [T], [I], [Θ], [N], [J])
//! - UnitConverter: identity, rational, float, π power, offset, log, chains
//! - Unit: base, alternate, transformed and product units
//! - MetricPrefix / BinaryPrefix: exact decimal and binary scaling
//! - QuantityKind: named kinds, dimension-checked or open
//! - SystemOfUnits: named unit registries with kind mappings
//! - Quantity: a value paired with its unit

mod converter;
mod dimension;
mod error;
mod kind;
mod prefix;
mod quantity;
mod system;
mod unit;

pub use converter::UnitConverter;
pub use dimension::Dimension;
pub use error::UnitError;
pub use kind::QuantityKind;
pub use prefix::{BinaryPrefix, MetricPrefix};
pub use quantity::Quantity;
pub use system::SystemOfUnits;
pub use unit::Unit;

pub use metra_core::{Number, NumberError, DEFAULT_PRECISION};
