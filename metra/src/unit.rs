//! Units of measurement as an algebraic data type
//!
//! A unit is a base symbol, an alternate symbol for a derived product,
//! a transformation of a parent unit by a converter, or a product of
//! factors with integer exponents. Every unit can resolve itself to its
//! system unit (the unprefixed, untransformed combination of base and
//! alternate units) together with the converter that maps values to it.
//!
//! Equality is semantic: two units are equal when their system units
//! match and their converters to them are equal. The kilo prefix on a
//! gram therefore equals the kilogram itself, while a megatonne keeps
//! its own two-level structure yet still compares equal to 10^9 kg.

use std::fmt;
use std::sync::Arc;

use metra_core::Number;

use crate::converter::UnitConverter;
use crate::dimension::Dimension;
use crate::error::UnitError;
use crate::kind::QuantityKind;
use crate::prefix::{BinaryPrefix, MetricPrefix};

/// A unit of measurement
#[derive(Debug, Clone)]
pub enum Unit {
    /// A base unit with its own symbol and dimension
    Base { symbol: String, dimension: Dimension },
    /// A distinct named unit for the same quantity as its parent
    Alternate { parent: Arc<Unit>, symbol: String },
    /// A unit whose values map to the parent through a converter
    Transformed {
        parent: Arc<Unit>,
        converter: UnitConverter,
    },
    /// A product of factor units raised to non-zero integer exponents
    ///
    /// Factors are never products themselves; nested products flatten
    /// on construction. The empty product is the dimensionless one.
    Product { factors: Vec<(Unit, i32)> },
}

impl Unit {
    /// Creates a base unit
    pub fn base(symbol: &str, dimension: Dimension) -> Unit {
        Unit::Base {
            symbol: symbol.to_string(),
            dimension,
        }
    }

    /// The dimensionless unit one, the empty product
    pub fn one() -> Unit {
        Unit::Product {
            factors: Vec::new(),
        }
    }

    /// Returns true for the dimensionless unit one
    pub fn is_one(&self) -> bool {
        matches!(self, Unit::Product { factors } if factors.is_empty())
    }

    /// Gives this unit a distinct symbol of its own
    pub fn alternate(&self, symbol: &str) -> Unit {
        Unit::Alternate {
            parent: Arc::new(self.clone()),
            symbol: symbol.to_string(),
        }
    }

    /// Derives a unit whose values map to this one through `converter`
    ///
    /// An identity converter derives nothing and returns the unit
    /// itself. Transformations never flatten: transforming an already
    /// transformed unit nests, which keeps prefix structure visible.
    pub fn transform(&self, converter: UnitConverter) -> Unit {
        if converter.is_identity() {
            return self.clone();
        }
        Unit::Transformed {
            parent: Arc::new(self.clone()),
            converter,
        }
    }

    /// Scales this unit up by an exact rational factor
    pub fn multiply_ratio(&self, dividend: i128, divisor: i128) -> Unit {
        self.transform(UnitConverter::rational(dividend, divisor))
    }

    /// Scales this unit down by an exact rational factor
    pub fn divide_ratio(&self, dividend: i128, divisor: i128) -> Unit {
        self.transform(UnitConverter::rational(divisor, dividend))
    }

    /// Scales this unit up by a floating point factor
    pub fn multiply_factor(&self, factor: f64) -> Unit {
        self.transform(UnitConverter::multiply(factor))
    }

    /// Scales this unit down by a floating point factor
    pub fn divide_factor(&self, factor: f64) -> Unit {
        self.transform(UnitConverter::multiply(1.0 / factor))
    }

    /// Shifts this unit by a constant offset
    pub fn shift(&self, amount: Number) -> Unit {
        self.transform(UnitConverter::offset(amount))
    }

    /// Applies a metric prefix
    pub fn prefix(&self, prefix: MetricPrefix) -> Unit {
        self.transform(prefix.converter())
    }

    /// Applies a binary prefix
    pub fn prefix_binary(&self, prefix: BinaryPrefix) -> Unit {
        self.transform(prefix.converter())
    }

    /// Product of two units
    pub fn multiply(&self, other: &Unit) -> Unit {
        let mut factors = Vec::new();
        self.collect_factors(&mut factors, 1);
        other.collect_factors(&mut factors, 1);
        Unit::product_from(factors)
    }

    /// Quotient of two units
    pub fn divide(&self, other: &Unit) -> Unit {
        let mut factors = Vec::new();
        self.collect_factors(&mut factors, 1);
        other.collect_factors(&mut factors, -1);
        Unit::product_from(factors)
    }

    /// Raises this unit to an integer power
    pub fn pow(&self, n: i32) -> Unit {
        if n == 1 {
            return self.clone();
        }
        let mut factors = Vec::new();
        self.collect_factors(&mut factors, n);
        Unit::product_from(factors)
    }

    fn collect_factors(&self, out: &mut Vec<(Unit, i32)>, scale: i32) {
        if scale == 0 {
            return;
        }
        match self {
            Unit::Product { factors } => {
                for (unit, exponent) in factors {
                    out.push((unit.clone(), exponent * scale));
                }
            }
            other => out.push((other.clone(), scale)),
        }
    }

    /// Builds a flattened product, merging equal factors and collapsing
    /// trivial results to the bare unit or to one
    fn product_from(raw: Vec<(Unit, i32)>) -> Unit {
        let mut factors: Vec<(Unit, i32)> = Vec::new();
        for (unit, exponent) in raw {
            if exponent == 0 {
                continue;
            }
            match factors.iter_mut().find(|(existing, _)| *existing == unit) {
                Some((_, e)) => *e += exponent,
                None => factors.push((unit, exponent)),
            }
        }
        factors.retain(|(_, e)| *e != 0);
        if factors.len() == 1 && factors[0].1 == 1 {
            return factors.swap_remove(0).0;
        }
        Unit::Product { factors }
    }

    /// The symbol of a base or alternate unit
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Unit::Base { symbol, .. } | Unit::Alternate { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    /// The physical dimension of this unit
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Base { dimension, .. } => *dimension,
            Unit::Alternate { parent, .. } | Unit::Transformed { parent, .. } => parent.dimension(),
            Unit::Product { factors } => factors
                .iter()
                .fold(Dimension::NONE, |acc, (unit, exponent)| {
                    acc.multiply(&unit.dimension().pow(*exponent))
                }),
        }
    }

    /// The unprefixed, untransformed unit this unit is defined against
    pub fn system_unit(&self) -> Unit {
        match self {
            Unit::Base { .. } | Unit::Alternate { .. } => self.clone(),
            Unit::Transformed { parent, .. } => parent.system_unit(),
            Unit::Product { factors } => {
                let mut out = Unit::one();
                for (unit, exponent) in factors {
                    out = out.multiply(&unit.system_unit().pow(*exponent));
                }
                out
            }
        }
    }

    /// The converter from values in this unit to values in its system unit
    pub fn to_system_converter(&self) -> UnitConverter {
        match self {
            Unit::Base { .. } | Unit::Alternate { .. } => UnitConverter::identity(),
            Unit::Transformed { parent, converter } => {
                converter.concatenate(&parent.to_system_converter())
            }
            Unit::Product { factors } => {
                let mut acc = UnitConverter::identity();
                for (unit, exponent) in factors {
                    let step = unit.to_system_converter();
                    let step = if *exponent < 0 { step.invert() } else { step };
                    for _ in 0..exponent.unsigned_abs() {
                        acc = acc.concatenate(&step);
                    }
                }
                acc
            }
        }
    }

    /// The converter from values in this unit to values in `target`
    ///
    /// Fails when the dimensions differ.
    pub fn converter_to(&self, target: &Unit) -> Result<UnitConverter, UnitError> {
        if self.dimension() != target.dimension() {
            return Err(UnitError::IncompatibleDimension {
                from: format!("{} ({})", self, self.dimension()),
                to: format!("{} ({})", target, target.dimension()),
            });
        }
        Ok(self
            .to_system_converter()
            .concatenate(&target.to_system_converter().invert()))
    }

    /// Views this unit as a unit of the given quantity kind
    ///
    /// Checked kinds verify the dimension; open kinds accept any unit.
    pub fn as_kind(&self, kind: &QuantityKind) -> Result<Unit, UnitError> {
        if let Some(wanted) = kind.dimension() {
            if wanted != self.dimension() {
                return Err(UnitError::IncompatibleDimension {
                    from: format!("{} ({})", self, self.dimension()),
                    to: format!("{} ({})", kind.name(), wanted),
                });
            }
        }
        Ok(self.clone())
    }

    /// Structural identity, without converter semantics
    ///
    /// Stricter than `==`: two units are structurally the same only
    /// when they were built the same way. The kilogram base unit and a
    /// kilo prefix on the gram compare equal but are not structurally
    /// the same. Product factors compare as multisets. Label registries
    /// key on this identity.
    pub fn same_structure(&self, other: &Unit) -> bool {
        match (self, other) {
            (
                Unit::Base {
                    symbol: s1,
                    dimension: d1,
                },
                Unit::Base {
                    symbol: s2,
                    dimension: d2,
                },
            ) => s1 == s2 && d1 == d2,
            (
                Unit::Alternate {
                    parent: p1,
                    symbol: s1,
                },
                Unit::Alternate {
                    parent: p2,
                    symbol: s2,
                },
            ) => s1 == s2 && p1.same_structure(p2),
            (
                Unit::Transformed {
                    parent: p1,
                    converter: c1,
                },
                Unit::Transformed {
                    parent: p2,
                    converter: c2,
                },
            ) => c1 == c2 && p1.same_structure(p2),
            (Unit::Product { factors: f1 }, Unit::Product { factors: f2 }) => {
                if f1.len() != f2.len() {
                    return false;
                }
                let mut used = vec![false; f2.len()];
                'outer: for (unit, exponent) in f1 {
                    for (i, (candidate, e)) in f2.iter().enumerate() {
                        if !used[i] && exponent == e && unit.same_structure(candidate) {
                            used[i] = true;
                            continue 'outer;
                        }
                    }
                    return false;
                }
                true
            }
            _ => false,
        }
    }
}

/// Two units are equal when they resolve to the same system unit with
/// equal converters to it
impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.system_unit().same_structure(&other.system_unit())
            && self.to_system_converter() == other.to_system_converter()
    }
}

fn superscript(n: i32) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    let mut out = String::new();
    if n < 0 {
        out.push('⁻');
    }
    for b in n.unsigned_abs().to_string().bytes() {
        out.push(DIGITS[(b - b'0') as usize]);
    }
    out
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Base { symbol, .. } | Unit::Alternate { symbol, .. } => write!(f, "{symbol}"),
            Unit::Transformed { parent, converter } => {
                if let Some(prefix) = MetricPrefix::for_converter(converter) {
                    write!(f, "{}{}", prefix.symbol(), parent)
                } else if let Some(prefix) = BinaryPrefix::for_converter(converter) {
                    write!(f, "{}{}", prefix.symbol(), parent)
                } else {
                    write!(f, "{}{}", parent, converter.suffix())
                }
            }
            Unit::Product { factors } => {
                let mut numerator: Vec<String> = Vec::new();
                let mut denominator: Vec<String> = Vec::new();
                for (unit, exponent) in factors {
                    let rendered = unit.to_string();
                    if *exponent > 0 {
                        if *exponent == 1 {
                            numerator.push(rendered);
                        } else {
                            numerator.push(format!("{}{}", rendered, superscript(*exponent)));
                        }
                    } else if *exponent == -1 {
                        denominator.push(rendered);
                    } else {
                        denominator.push(format!("{}{}", rendered, superscript(-exponent)));
                    }
                }
                if numerator.is_empty() {
                    write!(f, "1")?;
                } else {
                    write!(f, "{}", numerator.join("·"))?;
                }
                for part in denominator {
                    write!(f, "/{part}")?;
                }
                Ok(())
            }
        }
    }
}
