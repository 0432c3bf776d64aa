//! Converters between commensurate units
//!
//! A converter maps values expressed in one unit to values expressed in
//! another unit of the same dimension. Converters compose: the result of
//! concatenation is normalized so that identity steps vanish, nested
//! chains flatten, adjacent steps of the same shape merge, and runs of
//! commuting scale steps sort into a fixed kind order (rational, float,
//! π power). Composition order of pure scalings therefore never affects
//! converter identity. Exact rational factors stay exact through
//! composition and inversion.

use metra_core::{Number, NumberError, DEFAULT_PRECISION};

/// A conversion function between two units of the same dimension
#[derive(Debug, Clone)]
pub enum UnitConverter {
    /// The identity conversion
    Identity,
    /// Exact multiplication by dividend/divisor
    ///
    /// Always reduced, divisor positive, dividend non-zero. The reduced
    /// form 1/1 is never constructed, it collapses to `Identity`.
    Rational { dividend: i128, divisor: i128 },
    /// Multiplication by an arbitrary floating point factor
    Multiply { factor: f64 },
    /// Exact multiplication by an integer power of π
    PowerOfPi { exponent: i32 },
    /// Addition of a constant offset
    Offset { amount: Number },
    /// Logarithm in the given base, or its exponential inverse
    Log { base: f64, inverted: bool },
    /// Two or more non-mergeable steps applied in order
    Chain { steps: Vec<UnitConverter> },
}

impl UnitConverter {
    /// The identity conversion
    pub fn identity() -> UnitConverter {
        UnitConverter::Identity
    }

    /// Exact multiplication by `dividend / divisor`
    ///
    /// The fraction is reduced and sign-normalized; a unit fraction
    /// collapses to the identity. Both arguments must be non-zero.
    pub fn rational(dividend: i128, divisor: i128) -> UnitConverter {
        debug_assert!(dividend != 0 && divisor != 0);
        let (dividend, divisor) = reduce(dividend, divisor);
        if dividend == 1 && divisor == 1 {
            return UnitConverter::Identity;
        }
        UnitConverter::Rational { dividend, divisor }
    }

    /// Multiplication by a floating point factor
    ///
    /// A factor of exactly 1.0 collapses to the identity.
    pub fn multiply(factor: f64) -> UnitConverter {
        debug_assert!(factor.is_finite() && factor != 0.0);
        if factor == 1.0 {
            return UnitConverter::Identity;
        }
        UnitConverter::Multiply { factor }
    }

    /// Multiplication by π raised to an integer exponent
    pub fn pi_power(exponent: i32) -> UnitConverter {
        if exponent == 0 {
            return UnitConverter::Identity;
        }
        UnitConverter::PowerOfPi { exponent }
    }

    /// Addition of a constant offset
    pub fn offset(amount: Number) -> UnitConverter {
        if amount.is_zero() {
            return UnitConverter::Identity;
        }
        UnitConverter::Offset { amount }
    }

    /// Logarithm in the given base
    pub fn log(base: f64) -> UnitConverter {
        debug_assert!(base.is_finite() && base > 0.0 && base != 1.0);
        UnitConverter::Log {
            base,
            inverted: false,
        }
    }

    /// Returns true for the identity conversion
    pub fn is_identity(&self) -> bool {
        matches!(self, UnitConverter::Identity)
    }

    /// Returns true when the conversion is a pure scaling
    ///
    /// Offsets and logarithms make a conversion non-linear; a chain is
    /// linear only when every step is.
    pub fn is_linear(&self) -> bool {
        match self {
            UnitConverter::Offset { .. } | UnitConverter::Log { .. } => false,
            UnitConverter::Chain { steps } => steps.iter().all(UnitConverter::is_linear),
            _ => true,
        }
    }

    /// Composes this conversion with another, applying `self` first
    pub fn concatenate(&self, next: &UnitConverter) -> UnitConverter {
        let mut steps = Vec::new();
        self.collect_steps(&mut steps);
        next.collect_steps(&mut steps);
        canonicalize(steps)
    }

    /// Returns the inverse conversion
    pub fn invert(&self) -> UnitConverter {
        match self {
            UnitConverter::Identity => UnitConverter::Identity,
            UnitConverter::Rational { dividend, divisor } => {
                UnitConverter::rational(*divisor, *dividend)
            }
            UnitConverter::Multiply { factor } => UnitConverter::multiply(1.0 / factor),
            UnitConverter::PowerOfPi { exponent } => UnitConverter::PowerOfPi {
                exponent: -exponent,
            },
            UnitConverter::Offset { amount } => UnitConverter::Offset {
                amount: amount.neg(),
            },
            UnitConverter::Log { base, inverted } => UnitConverter::Log {
                base: *base,
                inverted: !inverted,
            },
            UnitConverter::Chain { steps } => {
                let reversed: Vec<UnitConverter> =
                    steps.iter().rev().map(UnitConverter::invert).collect();
                canonicalize(reversed)
            }
        }
    }

    /// Applies the conversion to a value
    pub fn convert(&self, value: &Number) -> Result<Number, NumberError> {
        match self {
            UnitConverter::Identity => Ok(value.clone()),
            UnitConverter::Rational { dividend, divisor } => {
                Ok(value.mul(&Number::from_ratio(*dividend, *divisor)))
            }
            UnitConverter::Multiply { factor } => Ok(value.mul(&Number::from_f64(*factor))),
            UnitConverter::PowerOfPi { exponent } => {
                Ok(value.mul(&Number::pi(DEFAULT_PRECISION).pow(*exponent)))
            }
            UnitConverter::Offset { amount } => Ok(value.add(amount)),
            UnitConverter::Log { base, inverted } => {
                let ln_base = Number::from_f64(*base).ln(DEFAULT_PRECISION)?;
                if *inverted {
                    // base^x computed as exp(x · ln base)
                    Ok(value.mul(&ln_base).exp(DEFAULT_PRECISION))
                } else {
                    value.ln(DEFAULT_PRECISION)?.checked_div(&ln_base)
                }
            }
            UnitConverter::Chain { steps } => {
                let mut current = value.clone();
                for step in steps {
                    current = step.convert(&current)?;
                }
                Ok(current)
            }
        }
    }

    /// Textual tail appended after a parent symbol when rendering a
    /// transformed unit, e.g. `*3600`, `/1000`, `+273.15`, `*4*π`
    ///
    /// Float factors render in their shortest round-trip form, which
    /// always carries a `.` or an exponent marker, keeping them lexically
    /// apart from exact integer factors.
    pub fn suffix(&self) -> String {
        match self {
            UnitConverter::Identity => String::new(),
            UnitConverter::Rational { dividend, divisor } if *divisor == 1 => {
                format!("*{dividend}")
            }
            UnitConverter::Rational {
                dividend: 1,
                divisor,
            } => format!("/{divisor}"),
            UnitConverter::Rational { dividend, divisor } => format!("*{dividend}/{divisor}"),
            UnitConverter::Multiply { factor } => format!("*{factor:?}"),
            UnitConverter::PowerOfPi { exponent: 1 } => "*π".to_string(),
            UnitConverter::PowerOfPi { exponent: -1 } => "/π".to_string(),
            UnitConverter::PowerOfPi { exponent } => format!("*π^{exponent}"),
            UnitConverter::Offset { amount } => {
                if amount.is_negative() {
                    format!("-{}", amount.abs())
                } else {
                    format!("+{amount}")
                }
            }
            UnitConverter::Log { base, inverted } => {
                if *inverted {
                    format!("*exp{base}")
                } else {
                    format!("*log{base}")
                }
            }
            UnitConverter::Chain { steps } => steps.iter().map(UnitConverter::suffix).collect(),
        }
    }

    fn collect_steps(&self, out: &mut Vec<UnitConverter>) {
        match self {
            UnitConverter::Identity => {}
            UnitConverter::Chain { steps } => {
                for step in steps {
                    step.collect_steps(out);
                }
            }
            other => out.push(other.clone()),
        }
    }
}

/// Reduces a fraction and normalizes the divisor to be positive
fn reduce(dividend: i128, divisor: i128) -> (i128, i128) {
    let g = gcd(dividend.unsigned_abs(), divisor.unsigned_abs());
    let mut dividend = dividend / g as i128;
    let mut divisor = divisor / g as i128;
    if divisor < 0 {
        dividend = -dividend;
        divisor = -divisor;
    }
    (dividend, divisor)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Cancels common factors across a numerator and a denominator
fn cancel(dividend: i128, divisor: i128) -> (i128, i128) {
    let g = gcd(dividend.unsigned_abs(), divisor.unsigned_abs()) as i128;
    (dividend / g, divisor / g)
}

/// Merges two adjacent steps of the same shape, if possible
///
/// Returns `None` when the steps cannot merge, including rational
/// products whose reduced terms overflow `i128`.
fn merge(first: &UnitConverter, second: &UnitConverter) -> Option<UnitConverter> {
    match (first, second) {
        (
            UnitConverter::Rational {
                dividend: p1,
                divisor: q1,
            },
            UnitConverter::Rational {
                dividend: p2,
                divisor: q2,
            },
        ) => {
            // cross-cancel before multiplying to keep products in range
            let (p1, q2) = cancel(*p1, *q2);
            let (p2, q1) = cancel(*p2, *q1);
            let dividend = p1.checked_mul(p2)?;
            let divisor = q1.checked_mul(q2)?;
            Some(UnitConverter::rational(dividend, divisor))
        }
        (UnitConverter::Multiply { factor: f1 }, UnitConverter::Multiply { factor: f2 }) => {
            let factor = f1 * f2;
            if !factor.is_finite() || factor == 0.0 {
                return None;
            }
            Some(UnitConverter::multiply(factor))
        }
        (
            UnitConverter::PowerOfPi { exponent: e1 },
            UnitConverter::PowerOfPi { exponent: e2 },
        ) => Some(UnitConverter::pi_power(e1 + e2)),
        (UnitConverter::Offset { amount: a1 }, UnitConverter::Offset { amount: a2 }) => {
            Some(UnitConverter::offset(a1.add(a2)))
        }
        _ => None,
    }
}

/// Sort key for commuting scale steps; non-scale steps pin their run
fn scale_rank(converter: &UnitConverter) -> Option<u8> {
    match converter {
        UnitConverter::Rational { .. } => Some(0),
        UnitConverter::Multiply { .. } => Some(1),
        UnitConverter::PowerOfPi { .. } => Some(2),
        _ => None,
    }
}

/// Rebuilds a canonical converter from a flat list of steps
///
/// Adjacent same-shape steps merge with cascade, then runs of scale
/// steps bubble into kind order and re-merge until nothing moves. The
/// sort never crosses an offset or a logarithm, which do not commute
/// with scaling.
fn canonicalize(steps: Vec<UnitConverter>) -> UnitConverter {
    let mut out = merge_adjacent(steps);
    loop {
        let mut swapped = false;
        let mut i = 0;
        while i + 1 < out.len() {
            if let (Some(a), Some(b)) = (scale_rank(&out[i]), scale_rank(&out[i + 1])) {
                if a > b {
                    out.swap(i, i + 1);
                    swapped = true;
                }
            }
            i += 1;
        }
        if !swapped {
            break;
        }
        out = merge_adjacent(out);
    }
    match out.len() {
        0 => UnitConverter::Identity,
        1 => out.remove(0),
        _ => UnitConverter::Chain { steps: out },
    }
}

/// Merges adjacent steps with cascade: when a merge produces the
/// identity, the two neighbors it separated become adjacent and may
/// merge in turn
fn merge_adjacent(steps: Vec<UnitConverter>) -> Vec<UnitConverter> {
    let mut out: Vec<UnitConverter> = Vec::new();
    for step in steps {
        if step.is_identity() {
            continue;
        }
        let mut pending = Some(step);
        while let Some(current) = pending.take() {
            match out.last().and_then(|tail| merge(tail, &current)) {
                Some(merged) => {
                    out.pop();
                    if !merged.is_identity() {
                        pending = Some(merged);
                    }
                }
                None => out.push(current),
            }
        }
    }
    out
}

/// Equality is semantic for scalings: an exact rational equals a float
/// factor whose value matches the quotient of its terms exactly.
impl PartialEq for UnitConverter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (UnitConverter::Identity, UnitConverter::Identity) => true,
            (
                UnitConverter::Rational {
                    dividend: p1,
                    divisor: q1,
                },
                UnitConverter::Rational {
                    dividend: p2,
                    divisor: q2,
                },
            ) => p1 == p2 && q1 == q2,
            (UnitConverter::Multiply { factor: f1 }, UnitConverter::Multiply { factor: f2 }) => {
                f1 == f2
            }
            (UnitConverter::Rational { dividend, divisor }, UnitConverter::Multiply { factor })
            | (UnitConverter::Multiply { factor }, UnitConverter::Rational { dividend, divisor }) => {
                *dividend as f64 / *divisor as f64 == *factor
            }
            (
                UnitConverter::PowerOfPi { exponent: e1 },
                UnitConverter::PowerOfPi { exponent: e2 },
            ) => e1 == e2,
            (UnitConverter::Offset { amount: a1 }, UnitConverter::Offset { amount: a2 }) => {
                a1 == a2
            }
            (
                UnitConverter::Log {
                    base: b1,
                    inverted: i1,
                },
                UnitConverter::Log {
                    base: b2,
                    inverted: i2,
                },
            ) => b1 == b2 && i1 == i2,
            (UnitConverter::Chain { steps: s1 }, UnitConverter::Chain { steps: s2 }) => s1 == s2,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degree_converter() -> UnitConverter {
        UnitConverter::rational(1, 180).concatenate(&UnitConverter::pi_power(1))
    }

    #[test]
    fn rational_reduces_and_normalizes() {
        let half = UnitConverter::rational(2, 4);
        assert!(matches!(
            half,
            UnitConverter::Rational {
                dividend: 1,
                divisor: 2
            }
        ));
        let negated = UnitConverter::rational(3, -6);
        assert!(matches!(
            negated,
            UnitConverter::Rational {
                dividend: -1,
                divisor: 2
            }
        ));
        assert!(UnitConverter::rational(5, 5).is_identity());
    }

    #[test]
    fn multiply_one_is_identity() {
        assert!(UnitConverter::multiply(1.0).is_identity());
        assert!(!UnitConverter::multiply(2.0).is_identity());
        assert!(UnitConverter::pi_power(0).is_identity());
        assert!(UnitConverter::offset(Number::zero()).is_identity());
    }

    #[test]
    fn concatenate_merges_rationals() {
        let arc_second = UnitConverter::rational(1, 180).concatenate(&UnitConverter::rational(1, 60));
        assert!(matches!(
            arc_second,
            UnitConverter::Rational {
                dividend: 1,
                divisor: 10800
            }
        ));
    }

    #[test]
    fn concatenate_with_identity_is_noop() {
        let c = UnitConverter::rational(1000, 1);
        assert_eq!(c.concatenate(&UnitConverter::identity()), c);
        assert_eq!(UnitConverter::identity().concatenate(&c), c);
    }

    #[test]
    fn concatenate_with_inverse_cancels() {
        let c = UnitConverter::rational(1000, 1);
        assert!(c.concatenate(&c.invert()).is_identity());

        let chain = degree_converter();
        assert!(chain.concatenate(&chain.invert()).is_identity());
    }

    #[test]
    fn cancellation_cascades_through_chains() {
        let chain = UnitConverter::rational(2, 1)
            .concatenate(&UnitConverter::pi_power(1))
            .concatenate(&UnitConverter::pi_power(-1))
            .concatenate(&UnitConverter::rational(1, 2));
        assert!(chain.is_identity());
    }

    #[test]
    fn chain_has_at_least_two_steps() {
        let chain = degree_converter();
        match &chain {
            UnitConverter::Chain { steps } => {
                assert_eq!(steps.len(), 2);
                assert!(matches!(steps[0], UnitConverter::Rational { .. }));
                assert!(matches!(steps[1], UnitConverter::PowerOfPi { .. }));
            }
            other => panic!("expected chain, got {other:?}"),
        }
    }

    #[test]
    fn invert_twice_restores_structure() {
        let chain = degree_converter();
        assert_eq!(chain.invert().invert(), chain);

        let rational = UnitConverter::rational(254, 100);
        assert_eq!(rational.invert().invert(), rational);

        let log = UnitConverter::log(10.0);
        assert_eq!(log.invert().invert(), log);
    }

    #[test]
    fn degree_to_radian_value() {
        let one = Number::one();
        let radians = degree_converter().convert(&one).unwrap();
        assert!(radians
            .as_decimal(45)
            .starts_with("0.0174532925199432957692369076848861271344287"));
    }

    #[test]
    fn radian_to_degree_value() {
        let one = Number::one();
        let degrees = degree_converter().invert().convert(&one).unwrap();
        assert!(degrees
            .as_decimal(30)
            .starts_with("57.2957795130823208767981548141"));
    }

    #[test]
    fn pi_power_scales_by_pi() {
        let c = UnitConverter::pi_power(1);
        assert!(c.is_linear());
        let v = c.convert(&Number::from_i64(100)).unwrap();
        assert!(v.as_decimal(4).starts_with("314.15"));
        let back = c.invert().convert(&v).unwrap();
        assert!(back.as_decimal(10).starts_with("100.0000000000"));
    }

    #[test]
    fn offset_shifts_values() {
        let to_kelvin = UnitConverter::offset(Number::from_str("273.15").unwrap());
        let freezing = to_kelvin.convert(&Number::zero()).unwrap();
        assert_eq!(freezing, Number::from_str("273.15").unwrap());
        let back = to_kelvin.invert().convert(&freezing).unwrap();
        assert!(back.is_zero());
        assert!(to_kelvin.concatenate(&to_kelvin.invert()).is_identity());
    }

    #[test]
    fn linearity() {
        assert!(UnitConverter::identity().is_linear());
        assert!(UnitConverter::rational(1, 2).is_linear());
        assert!(UnitConverter::multiply(2.5).is_linear());
        assert!(UnitConverter::pi_power(-1).is_linear());
        assert!(!UnitConverter::offset(Number::one()).is_linear());
        assert!(!UnitConverter::log(10.0).is_linear());
        let chain = UnitConverter::rational(1, 10).concatenate(&UnitConverter::log(10.0).invert());
        assert!(!chain.is_linear());
    }

    #[test]
    fn decibel_chain_delogs() {
        // x dB -> 10^(x/10)
        let from_decibel =
            UnitConverter::rational(1, 10).concatenate(&UnitConverter::log(10.0).invert());
        let ratio = from_decibel.convert(&Number::from_i64(20)).unwrap();
        let rendered = ratio.as_decimal(4);
        assert!(rendered.starts_with("100.000") || rendered.starts_with("99.999"));
    }

    #[test]
    fn log_converter_round_trips() {
        let log10 = UnitConverter::log(10.0);
        let two = log10.convert(&Number::from_i64(100)).unwrap();
        let rendered = two.as_decimal(6);
        assert!(rendered.starts_with("2.000000") || rendered.starts_with("1.999999"));
    }

    #[test]
    fn rational_overflow_stays_chained() {
        let big = UnitConverter::rational(10i128.pow(30), 1);
        let product = big.concatenate(&big);
        assert!(matches!(&product, UnitConverter::Chain { steps } if steps.len() == 2));
        let v = product.convert(&Number::one()).unwrap();
        assert_eq!(v, Number::from_str("1e60").unwrap());
    }

    #[test]
    fn semantic_equality_with_floats() {
        assert_eq!(
            UnitConverter::rational(1, 1_000_000),
            UnitConverter::multiply(1e-6)
        );
        assert_eq!(
            UnitConverter::multiply(1000.0),
            UnitConverter::rational(1000, 1)
        );
        assert_ne!(UnitConverter::rational(1, 3), UnitConverter::multiply(0.3));
        assert_ne!(
            UnitConverter::rational(1, 10),
            UnitConverter::pi_power(1)
        );
    }

    #[test]
    fn scale_composition_order_does_not_matter() {
        let a = UnitConverter::rational(1, 180).concatenate(&UnitConverter::pi_power(1));
        let b = UnitConverter::pi_power(1).concatenate(&UnitConverter::rational(1, 180));
        assert_eq!(a, b);

        // Reordering makes separated same-shape steps merge
        let c = UnitConverter::rational(4, 1)
            .concatenate(&UnitConverter::pi_power(1))
            .concatenate(&UnitConverter::rational(1, 4));
        assert_eq!(c, UnitConverter::pi_power(1));

        // Offsets pin the runs around them
        let shift = UnitConverter::offset(Number::from_i64(32));
        let d = UnitConverter::rational(9, 5).concatenate(&shift);
        let e = shift.concatenate(&UnitConverter::rational(9, 5));
        assert_ne!(d, e);
    }

    #[test]
    fn suffix_rendering() {
        assert_eq!(UnitConverter::rational(3600, 1).suffix(), "*3600");
        assert_eq!(UnitConverter::rational(1, 1000).suffix(), "/1000");
        assert_eq!(UnitConverter::rational(5, 18).suffix(), "*5/18");
        assert_eq!(UnitConverter::multiply(1.602176634e-19).suffix(), "*1.602176634e-19");
        assert_eq!(UnitConverter::pi_power(1).suffix(), "*π");
        assert_eq!(
            UnitConverter::offset(Number::from_str("273.15").unwrap()).suffix(),
            "+273.15"
        );
        let sphere = UnitConverter::rational(4, 1).concatenate(&UnitConverter::pi_power(1));
        assert_eq!(sphere.suffix(), "*4*π");
    }

    #[test]
    fn mixed_scalings_stay_exact_where_possible() {
        let exact = UnitConverter::rational(1000, 1);
        let inexact = UnitConverter::multiply(2.5);
        let chain = exact.concatenate(&inexact);
        match &chain {
            UnitConverter::Chain { steps } => assert_eq!(steps.len(), 2),
            other => panic!("expected chain, got {other:?}"),
        }
        let v = chain.convert(&Number::from_i64(2)).unwrap();
        assert_eq!(v, Number::from_i64(5000));
    }
}
