//! Metric and binary unit prefixes
//!
//! Every prefix scales by an exact rational, so prefixed conversions
//! never pick up floating point drift. The largest factors (10^24 and
//! 2^80) still fit an i128 rational.

use crate::converter::UnitConverter;

/// SI decimal prefixes from yotta (10^24) down to yocto (10^-24)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricPrefix {
    Yotta,
    Zetta,
    Exa,
    Peta,
    Tera,
    Giga,
    Mega,
    Kilo,
    Hecto,
    Deka,
    Deci,
    Centi,
    Milli,
    Micro,
    Nano,
    Pico,
    Femto,
    Atto,
    Zepto,
    Yocto,
}

impl MetricPrefix {
    /// All metric prefixes, largest first
    pub const ALL: [MetricPrefix; 20] = [
        MetricPrefix::Yotta,
        MetricPrefix::Zetta,
        MetricPrefix::Exa,
        MetricPrefix::Peta,
        MetricPrefix::Tera,
        MetricPrefix::Giga,
        MetricPrefix::Mega,
        MetricPrefix::Kilo,
        MetricPrefix::Hecto,
        MetricPrefix::Deka,
        MetricPrefix::Deci,
        MetricPrefix::Centi,
        MetricPrefix::Milli,
        MetricPrefix::Micro,
        MetricPrefix::Nano,
        MetricPrefix::Pico,
        MetricPrefix::Femto,
        MetricPrefix::Atto,
        MetricPrefix::Zepto,
        MetricPrefix::Yocto,
    ];

    /// The canonical prefix symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            MetricPrefix::Yotta => "Y",
            MetricPrefix::Zetta => "Z",
            MetricPrefix::Exa => "E",
            MetricPrefix::Peta => "P",
            MetricPrefix::Tera => "T",
            MetricPrefix::Giga => "G",
            MetricPrefix::Mega => "M",
            MetricPrefix::Kilo => "k",
            MetricPrefix::Hecto => "h",
            MetricPrefix::Deka => "da",
            MetricPrefix::Deci => "d",
            MetricPrefix::Centi => "c",
            MetricPrefix::Milli => "m",
            // GREEK SMALL LETTER MU is canonical for micro
            MetricPrefix::Micro => "μ",
            MetricPrefix::Nano => "n",
            MetricPrefix::Pico => "p",
            MetricPrefix::Femto => "f",
            MetricPrefix::Atto => "a",
            MetricPrefix::Zepto => "z",
            MetricPrefix::Yocto => "y",
        }
    }

    /// Alternate spellings accepted when parsing
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            // MICRO SIGN, the legacy codepoint
            MetricPrefix::Micro => &["µ"],
            _ => &[],
        }
    }

    /// The decimal exponent of the prefix factor
    pub fn exponent(&self) -> i32 {
        match self {
            MetricPrefix::Yotta => 24,
            MetricPrefix::Zetta => 21,
            MetricPrefix::Exa => 18,
            MetricPrefix::Peta => 15,
            MetricPrefix::Tera => 12,
            MetricPrefix::Giga => 9,
            MetricPrefix::Mega => 6,
            MetricPrefix::Kilo => 3,
            MetricPrefix::Hecto => 2,
            MetricPrefix::Deka => 1,
            MetricPrefix::Deci => -1,
            MetricPrefix::Centi => -2,
            MetricPrefix::Milli => -3,
            MetricPrefix::Micro => -6,
            MetricPrefix::Nano => -9,
            MetricPrefix::Pico => -12,
            MetricPrefix::Femto => -15,
            MetricPrefix::Atto => -18,
            MetricPrefix::Zepto => -21,
            MetricPrefix::Yocto => -24,
        }
    }

    /// The exact scaling converter for this prefix
    pub fn converter(&self) -> UnitConverter {
        let e = self.exponent();
        if e >= 0 {
            UnitConverter::rational(10i128.pow(e as u32), 1)
        } else {
            UnitConverter::rational(1, 10i128.pow(e.unsigned_abs()))
        }
    }

    /// Recognizes a converter as a metric prefix factor
    pub fn for_converter(converter: &UnitConverter) -> Option<MetricPrefix> {
        Self::ALL.iter().copied().find(|p| &p.converter() == converter)
    }
}

/// IEC binary prefixes from kibi (2^10) up to yobi (2^80)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryPrefix {
    Kibi,
    Mebi,
    Gibi,
    Tebi,
    Pebi,
    Exbi,
    Zebi,
    Yobi,
}

impl BinaryPrefix {
    /// All binary prefixes, smallest first
    pub const ALL: [BinaryPrefix; 8] = [
        BinaryPrefix::Kibi,
        BinaryPrefix::Mebi,
        BinaryPrefix::Gibi,
        BinaryPrefix::Tebi,
        BinaryPrefix::Pebi,
        BinaryPrefix::Exbi,
        BinaryPrefix::Zebi,
        BinaryPrefix::Yobi,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryPrefix::Kibi => "Ki",
            BinaryPrefix::Mebi => "Mi",
            BinaryPrefix::Gibi => "Gi",
            BinaryPrefix::Tebi => "Ti",
            BinaryPrefix::Pebi => "Pi",
            BinaryPrefix::Exbi => "Ei",
            BinaryPrefix::Zebi => "Zi",
            BinaryPrefix::Yobi => "Yi",
        }
    }

    /// The binary exponent of the prefix factor
    pub fn exponent(&self) -> u32 {
        match self {
            BinaryPrefix::Kibi => 10,
            BinaryPrefix::Mebi => 20,
            BinaryPrefix::Gibi => 30,
            BinaryPrefix::Tebi => 40,
            BinaryPrefix::Pebi => 50,
            BinaryPrefix::Exbi => 60,
            BinaryPrefix::Zebi => 70,
            BinaryPrefix::Yobi => 80,
        }
    }

    /// The exact scaling converter for this prefix
    pub fn converter(&self) -> UnitConverter {
        UnitConverter::rational(2i128.pow(self.exponent()), 1)
    }

    /// Recognizes a converter as a binary prefix factor
    pub fn for_converter(converter: &UnitConverter) -> Option<BinaryPrefix> {
        Self::ALL.iter().copied().find(|p| &p.converter() == converter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metra_core::Number;

    #[test]
    fn metric_prefixes_are_exact_rationals() {
        assert!(matches!(
            MetricPrefix::Kilo.converter(),
            UnitConverter::Rational {
                dividend: 1000,
                divisor: 1
            }
        ));
        assert!(matches!(
            MetricPrefix::Micro.converter(),
            UnitConverter::Rational {
                dividend: 1,
                divisor: 1_000_000
            }
        ));
        assert!(matches!(
            MetricPrefix::Yotta.converter(),
            UnitConverter::Rational { divisor: 1, .. }
        ));
    }

    #[test]
    fn binary_prefixes_are_powers_of_two() {
        assert!(matches!(
            BinaryPrefix::Kibi.converter(),
            UnitConverter::Rational {
                dividend: 1024,
                divisor: 1
            }
        ));
        let yobi = BinaryPrefix::Yobi.converter();
        let v = yobi.convert(&Number::one()).unwrap();
        assert_eq!(v, Number::from_i128(2i128.pow(80)));
    }

    #[test]
    fn prefix_round_trip_through_converter() {
        for prefix in MetricPrefix::ALL {
            assert_eq!(MetricPrefix::for_converter(&prefix.converter()), Some(prefix));
        }
        for prefix in BinaryPrefix::ALL {
            assert_eq!(BinaryPrefix::for_converter(&prefix.converter()), Some(prefix));
        }
    }

    #[test]
    fn recognition_rejects_other_factors() {
        assert_eq!(MetricPrefix::for_converter(&UnitConverter::rational(3600, 1)), None);
        assert_eq!(MetricPrefix::for_converter(&UnitConverter::identity()), None);
        assert_eq!(BinaryPrefix::for_converter(&UnitConverter::rational(1000, 1)), None);
    }

    #[test]
    fn micro_uses_greek_mu_with_micro_sign_alias() {
        assert_eq!(MetricPrefix::Micro.symbol(), "\u{03bc}");
        assert_eq!(MetricPrefix::Micro.aliases(), &["\u{00b5}"]);
        assert!(MetricPrefix::Kilo.aliases().is_empty());
    }

    #[test]
    fn prefixes_compose_with_each_other() {
        let milli_kilo = MetricPrefix::Milli
            .converter()
            .concatenate(&MetricPrefix::Kilo.converter());
        assert!(milli_kilo.is_identity());

        let kilo_kilo = MetricPrefix::Kilo
            .converter()
            .concatenate(&MetricPrefix::Kilo.converter());
        assert_eq!(kilo_kilo, MetricPrefix::Mega.converter());
    }
}
