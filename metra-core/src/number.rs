//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-ratio (RBig) for exact rational arithmetic, so unit
//! conversion factors compose without drift. Transcendentals (ln, exp,
//! sqrt) bridge through dashu-float (DBig) at an explicit decimal
//! precision and come back as exact rationals of the computed decimal.

use dashu_float::ops::SquareRoot;
use dashu_float::DBig;
use dashu_int::ops::{BitTest, DivRem};
use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Default precision for transcendental evaluation (decimal digits)
pub const DEFAULT_PRECISION: u32 = 50;

/// Exact rational number
///
/// Built on dashu-ratio's RBig. Arithmetic is exact; only the
/// explicitly precision-parameterized operations approximate.
/// All operations return Results or new Numbers - never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: RBig,
}

impl Number {
    // ========== Construction ==========

    /// Create from string representation
    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumberError::ParseError(s.to_string()));
        }

        // Rational format "a/b" with integer parts
        if s.contains('/') {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() != 2 {
                return Err(NumberError::ParseError(s.to_string()));
            }
            let num = parse_int(parts[0].trim())
                .ok_or_else(|| NumberError::ParseError(s.to_string()))?;
            let den = parse_int(parts[1].trim())
                .ok_or_else(|| NumberError::ParseError(s.to_string()))?;
            if den == IBig::ZERO {
                return Err(NumberError::DivisionByZero);
            }
            let negative = (num < IBig::ZERO) != (den < IBig::ZERO);
            let num = abs_int(num);
            let den = abs_int(den);
            let num = if negative { -num } else { num };
            let den = UBig::try_from(den).map_err(|_| NumberError::ParseError(s.to_string()))?;
            return Ok(Self { inner: RBig::from_parts(num, den) });
        }

        // Decimal, optionally with scientific exponent: mantissa [e exp]
        let (mantissa, exp) = match s.find(['e', 'E']) {
            Some(pos) => {
                let exp: i32 = s[pos + 1..]
                    .parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                (&s[..pos], exp)
            }
            None => (s, 0),
        };

        let (sign, body) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };

        let (int_part, frac_part) = match body.find('.') {
            Some(pos) => (&body[..pos], &body[pos + 1..]),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(NumberError::ParseError(s.to_string()));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(NumberError::ParseError(s.to_string()));
        }

        let digits = format!("{}{}", int_part, frac_part);
        let digits = if digits.is_empty() { "0".to_string() } else { digits };
        let mantissa: IBig = digits
            .parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;
        let mantissa = if sign { -mantissa } else { mantissa };

        let net_exp = exp as i64 - frac_part.len() as i64;
        let inner = if net_exp >= 0 {
            let num = mantissa * IBig::from(10).pow(net_exp as usize);
            RBig::from_parts(num, UBig::ONE)
        } else {
            let den = UBig::from(10u8).pow((-net_exp) as usize);
            RBig::from_parts(mantissa, den)
        };
        Ok(Self { inner })
    }

    /// Create from i64
    pub fn from_i64(n: i64) -> Self {
        Self { inner: RBig::from(n) }
    }

    /// Create from i128
    pub fn from_i128(n: i128) -> Self {
        Self { inner: RBig::from_parts(IBig::from(n), UBig::ONE) }
    }

    /// Create from ratio (exact)
    pub fn from_ratio(num: i128, den: i128) -> Self {
        if den == 0 {
            return Self::zero();
        }
        let negative = (num < 0) != (den < 0);
        let num = IBig::from(num.unsigned_abs());
        let num = if negative { -num } else { num };
        Self { inner: RBig::from_parts(num, UBig::from(den.unsigned_abs())) }
    }

    /// Create from f64 via its shortest round-trip decimal, so the value
    /// is the decimal a human wrote rather than the raw binary expansion
    pub fn from_f64(f: f64) -> Self {
        if f.is_nan() || f.is_infinite() {
            return Self::zero();
        }
        Self::from_str(&format!("{:?}", f)).unwrap_or_else(|_| Self::zero())
    }

    /// Zero
    pub fn zero() -> Self {
        Self { inner: RBig::ZERO }
    }

    /// One
    pub fn one() -> Self {
        Self { inner: RBig::ONE }
    }

    /// Pi - from high-precision string constant
    pub fn pi(precision: u32) -> Self {
        const PI_STR: &str = "3.14159265358979323846264338327950288419716939937510582097494459230781640628620899862803482534211706798214808651328230664709384460955058223172535940812848111745028410270193852110555964462294895493038196442881097566593344612847564823378678316527120190914564856692346034861045432664821339360726024914127372458700660631558817488152092096282925409171536436789259036001133053054882046652138414695194151160943305727036575959195309218611738193261179310511854807446237996274956735188575272489122793818301194912";

        let end_pos = (precision as usize + 2).min(PI_STR.len());
        Self::from_str(&PI_STR[..end_pos]).unwrap_or_else(|_| Self::from_ratio(355, 113))
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == RBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < RBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        let (_, den) = self.inner.clone().into_parts();
        den == UBig::ONE
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Negation
    pub fn neg(&self) -> Self {
        Self { inner: -self.inner.clone() }
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Integer power (exact)
    pub fn pow(&self, exp: i32) -> Self {
        if exp == 0 {
            return Self::one();
        }

        let abs_exp = exp.unsigned_abs();
        let mut result = Self::one();

        // Simple repeated multiplication
        for _ in 0..abs_exp {
            result = result.mul(self);
        }

        if exp < 0 {
            Self::one().checked_div(&result).unwrap_or_else(|_| Self::zero())
        } else {
            result
        }
    }

    // ========== Transcendental Functions ==========

    /// Square root
    pub fn sqrt(&self, precision: u32) -> Result<Self, NumberError> {
        if self.is_negative() {
            return Err(NumberError::DomainError(
                "square root of negative number".to_string(),
            ));
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }

        let val = self.to_decimal(precision);
        Ok(Self::from_decimal(val.sqrt()))
    }

    /// Natural logarithm
    pub fn ln(&self, precision: u32) -> Result<Self, NumberError> {
        if self.is_zero() || self.is_negative() {
            return Err(NumberError::DomainError(
                "logarithm of non-positive number".to_string(),
            ));
        }

        let val = self.to_decimal(precision);
        Ok(Self::from_decimal(val.ln()))
    }

    /// Exponential function (e^x)
    pub fn exp(&self, precision: u32) -> Self {
        let val = self.to_decimal(precision);
        Self::from_decimal(val.exp())
    }

    // ========== Conversions ==========

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        let (num, den) = self.inner.clone().into_parts();
        if den != UBig::ONE {
            return None;
        }
        num.try_into().ok()
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> Option<f64> {
        // Work from the decimal representation: significand * 10^exponent
        let (significand, exponent) = self.to_decimal(30).into_repr().into_parts();

        let sig_f64: f64 = if significand.bit_len() <= 53 {
            match TryInto::<i64>::try_into(significand.clone()) {
                Ok(i) => i as f64,
                Err(_) => {
                    let is_neg = significand < IBig::ZERO;
                    let abs_sig = if is_neg { -significand.clone() } else { significand };
                    match TryInto::<u64>::try_into(abs_sig) {
                        Ok(u) => {
                            if is_neg {
                                -(u as f64)
                            } else {
                                u as f64
                            }
                        }
                        Err(_) => return None,
                    }
                }
            }
        } else {
            // Shift right to fit in 53 bits, re-apply the shifted bits
            let extra_bits = significand.bit_len() - 53;
            let shifted = &significand >> extra_bits;
            let shifted_i64: i64 = shifted.try_into().ok()?;
            (shifted_i64 as f64) * 2_f64.powi(extra_bits as i32)
        };

        let result = if exponent == 0 {
            sig_f64
        } else if exponent > 0 && exponent <= 308 {
            sig_f64 * 10_f64.powi(exponent as i32)
        } else if exponent < 0 && exponent >= -308 {
            sig_f64 / 10_f64.powi((-exponent) as i32)
        } else {
            return None;
        };

        if result.is_finite() {
            Some(result)
        } else {
            None
        }
    }

    // ========== Display ==========

    /// Render as decimal string with the given number of decimal places,
    /// computed exactly from the rational (round half away from zero)
    pub fn as_decimal(&self, places: u32) -> String {
        let neg = self.is_negative();
        let (num, den) = self.inner.clone().into_parts();
        let num = abs_int(num);
        let den = IBig::from(den);

        let scale = IBig::from(10).pow(places as usize);
        let (mut q, r) = (num * &scale).div_rem(den.clone());
        if &r * IBig::from(2) >= den {
            q += IBig::ONE;
        }

        let sign = if neg && q != IBig::ZERO { "-" } else { "" };
        if places == 0 {
            return format!("{}{}", sign, q);
        }
        let int_part = &q / &scale;
        let frac_part = &q % &scale;
        format!(
            "{}{}.{:0>width$}",
            sign,
            int_part,
            frac_part.to_string(),
            width = places as usize
        )
    }

    /// Render with N significant figures
    pub fn as_sigfigs(&self, sigfigs: u32) -> String {
        if let Some(f) = self.to_f64() {
            if f == 0.0 {
                return "0".to_string();
            }

            let sigfigs = sigfigs.max(1) as usize;
            let exp = f.abs().log10().floor() as i32;

            if exp >= -3 && exp <= 4 {
                let decimal_places = if exp >= 0 {
                    (sigfigs as i32 - exp - 1).max(0) as usize
                } else {
                    sigfigs + (-exp - 1) as usize
                };
                format!("{:.prec$}", f, prec = decimal_places)
            } else {
                let mantissa = f / 10_f64.powi(exp);
                let decimal_places = sigfigs - 1;
                format!("{:.prec$}e{}", mantissa, exp, prec = decimal_places)
            }
        } else {
            format!("{}", self.inner)
        }
    }

    // ========== Decimal Bridge ==========

    /// View as a DBig at the given decimal precision
    fn to_decimal(&self, precision: u32) -> DBig {
        let (num, den) = self.inner.clone().into_parts();
        let num = DBig::from_parts(num, 0).with_precision(precision as usize).value();
        let den = DBig::from_parts(IBig::from(den), 0)
            .with_precision(precision as usize)
            .value();
        num / den
    }

    /// Exact rational of a finite decimal
    fn from_decimal(d: DBig) -> Self {
        let (sig, exp) = d.into_repr().into_parts();
        if exp >= 0 {
            let num = sig * IBig::from(10).pow(exp as usize);
            Self { inner: RBig::from_parts(num, UBig::ONE) }
        } else {
            let den = UBig::from(10u8).pow((-exp) as usize);
            Self { inner: RBig::from_parts(sig, den) }
        }
    }
}

fn parse_int(s: &str) -> Option<IBig> {
    let s = s.strip_prefix('+').unwrap_or(s);
    if s.is_empty() {
        return None;
    }
    let body = s.strip_prefix('-').unwrap_or(s);
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn abs_int(n: IBig) -> IBig {
    if n < IBig::ZERO {
        -n
    } else {
        n
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_integer() {
            let (num, _) = self.inner.clone().into_parts();
            return write!(f, "{}", num);
        }
        // Magnitudes below the decimal window keep their leading digits
        if self.abs() < Self::from_ratio(1, 10_000_000_000) {
            return write!(f, "{}", self.as_sigfigs(10));
        }
        let s = self.as_decimal(10);
        write!(f, "{}", s.trim_end_matches('0').trim_end_matches('.'))
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.cmp(&other.inner)
    }
}
