//! Values paired with their unit

use std::fmt;

use metra_core::Number;

use crate::error::UnitError;
use crate::unit::Unit;

/// An amount of something: a value and the unit it is expressed in
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    value: Number,
    unit: Unit,
}

impl Quantity {
    pub fn new(value: Number, unit: Unit) -> Quantity {
        Quantity { value, unit }
    }

    pub fn value(&self) -> &Number {
        &self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Re-expresses this quantity in another unit of the same dimension
    pub fn to(&self, target: &Unit) -> Result<Quantity, UnitError> {
        let converter = self.unit.converter_to(target)?;
        let value = converter.convert(&self.value)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Sum, expressed in the unit of the left operand
    pub fn add(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        let other = other.to(&self.unit)?;
        Ok(Quantity::new(self.value.add(&other.value), self.unit.clone()))
    }

    /// Difference, expressed in the unit of the left operand
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        let other = other.to(&self.unit)?;
        Ok(Quantity::new(self.value.sub(&other.value), self.unit.clone()))
    }

    /// Product; units multiply
    pub fn mul(&self, other: &Quantity) -> Quantity {
        Quantity::new(
            self.value.mul(&other.value),
            self.unit.multiply(&other.unit),
        )
    }

    /// Quotient; units divide
    pub fn div(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        let value = self.value.checked_div(&other.value)?;
        Ok(Quantity::new(value, self.unit.divide(&other.unit)))
    }

    /// Scales the value, keeping the unit
    pub fn scale(&self, factor: &Number) -> Quantity {
        Quantity::new(self.value.mul(factor), self.unit.clone())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_one() {
            return write!(f, "{}", self.value);
        }
        write!(f, "{} {}", self.value, self.unit)
    }
}
