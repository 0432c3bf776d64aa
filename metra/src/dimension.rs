//! Physical dimensions as integer exponent vectors
//!
//! Every dimension is a vector of seven signed exponents over the base
//! dimensions length, mass, time, electric current, temperature, amount
//! of substance and luminous intensity. Multiplication adds exponent
//! vectors, division subtracts them, so dimensional arithmetic is exact
//! and commutative.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// Index of the length exponent
pub const LENGTH: usize = 0;
/// Index of the mass exponent
pub const MASS: usize = 1;
/// Index of the time exponent
pub const TIME: usize = 2;
/// Index of the electric current exponent
pub const CURRENT: usize = 3;
/// Index of the temperature exponent
pub const TEMPERATURE: usize = 4;
/// Index of the amount of substance exponent
pub const AMOUNT: usize = 5;
/// Index of the luminous intensity exponent
pub const LUMINOSITY: usize = 6;

const SYMBOLS: [&str; 7] = ["L", "M", "T", "I", "Θ", "N", "J"];

/// A physical dimension as a vector of base dimension exponents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i32; 7],
}

impl Dimension {
    /// The dimensionless dimension, all exponents zero
    pub const NONE: Dimension = Dimension {
        exponents: [0, 0, 0, 0, 0, 0, 0],
    };

    /// Length [L]
    pub const LENGTH: Dimension = Dimension::base(LENGTH);
    /// Mass [M]
    pub const MASS: Dimension = Dimension::base(MASS);
    /// Time [T]
    pub const TIME: Dimension = Dimension::base(TIME);
    /// Electric current [I]
    pub const ELECTRIC_CURRENT: Dimension = Dimension::base(CURRENT);
    /// Thermodynamic temperature [Θ]
    pub const TEMPERATURE: Dimension = Dimension::base(TEMPERATURE);
    /// Amount of substance [N]
    pub const AMOUNT_OF_SUBSTANCE: Dimension = Dimension::base(AMOUNT);
    /// Luminous intensity [J]
    pub const LUMINOUS_INTENSITY: Dimension = Dimension::base(LUMINOSITY);

    const fn base(index: usize) -> Dimension {
        let mut exponents = [0i32; 7];
        exponents[index] = 1;
        Dimension { exponents }
    }

    /// Creates a dimension from explicit exponents in storage order
    pub const fn new(exponents: [i32; 7]) -> Dimension {
        Dimension { exponents }
    }

    /// Returns true when every exponent is zero
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Product of two dimensions, adding exponents componentwise
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut exponents = [0i32; 7];
        for i in 0..7 {
            exponents[i] = self.exponents[i] + other.exponents[i];
        }
        Dimension { exponents }
    }

    /// Quotient of two dimensions, subtracting exponents componentwise
    pub fn divide(&self, other: &Dimension) -> Dimension {
        let mut exponents = [0i32; 7];
        for i in 0..7 {
            exponents[i] = self.exponents[i] - other.exponents[i];
        }
        Dimension { exponents }
    }

    /// Raises the dimension to an integer power
    pub fn pow(&self, n: i32) -> Dimension {
        let mut exponents = [0i32; 7];
        for i in 0..7 {
            exponents[i] = self.exponents[i] * n;
        }
        Dimension { exponents }
    }

    /// Takes the n-th root of the dimension
    ///
    /// Fails unless n is positive and divides every exponent exactly.
    pub fn root(&self, n: i32) -> Result<Dimension, UnitError> {
        if n <= 0 || self.exponents.iter().any(|&e| e % n != 0) {
            return Err(UnitError::InvalidDimension {
                dimension: self.to_string(),
                n,
            });
        }
        let mut exponents = [0i32; 7];
        for i in 0..7 {
            exponents[i] = self.exponents[i] / n;
        }
        Ok(Dimension { exponents })
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::NONE
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut positive: Vec<(&str, i32)> = Vec::new();
        let mut negative: Vec<(&str, i32)> = Vec::new();
        for (i, &e) in self.exponents.iter().enumerate() {
            if e > 0 {
                positive.push((SYMBOLS[i], e));
            } else if e < 0 {
                negative.push((SYMBOLS[i], -e));
            }
        }
        positive.sort_by(|a, b| a.0.cmp(b.0));
        negative.sort_by(|a, b| a.0.cmp(b.0));

        let token = |(symbol, exponent): &(&str, i32)| {
            if *exponent == 1 {
                format!("[{symbol}]")
            } else {
                format!("[{symbol}]^{exponent}")
            }
        };

        if positive.is_empty() {
            write!(f, "1")?;
        } else {
            let joined: Vec<String> = positive.iter().map(token).collect();
            write!(f, "{}", joined.join("·"))?;
        }
        if !negative.is_empty() {
            let joined: Vec<String> = negative.iter().map(token).collect();
            write!(f, "/{}", joined.join("·"))?;
        }
        Ok(())
    }
}
