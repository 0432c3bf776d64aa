//! Symbols, aliases and locale label data for the shipped catalogs
//!
//! The bootstrap installs spellings for both systems, SI first, so the
//! 2019 `eV` and `u` claim their spellings before the legacy constants.
//! The bundle data mirrors the labels for locale-aware formatting, with
//! `kph` for the kilometre per hour available only through bundles.

use std::sync::LazyLock;

use metra::Unit;
use metra_format::{
    BundleCatalog, EbnfUnitFormat, FormatError, SimpleUnitFormat, SymbolMap,
};
use tracing::error;

use crate::{non_si, si};

fn install(map: &mut SymbolMap) {
    map.label(&si::METRE, "m");
    map.label(&si::KILOGRAM, "kg");
    map.label(&si::SECOND, "s");
    map.label(&si::AMPERE, "A");
    map.label(&si::KELVIN, "K");
    map.label(&si::MOLE, "mol");
    map.label(&si::CANDELA, "cd");

    map.label(&si::RADIAN, "rad");
    map.label(&si::STERADIAN, "sr");
    map.label(&si::BIT, "bit");

    map.label(&si::HERTZ, "Hz");
    map.label(&si::NEWTON, "N");
    map.label(&si::PASCAL, "Pa");
    map.label(&si::JOULE, "J");
    map.label(&si::WATT, "W");
    map.label(&si::COULOMB, "C");
    map.label(&si::VOLT, "V");
    map.label(&si::FARAD, "F");
    map.label(&si::OHM, "Ω");
    map.label(&si::SIEMENS, "S");
    map.label(&si::WEBER, "Wb");
    map.label(&si::TESLA, "T");
    map.label(&si::HENRY, "H");
    map.label(&si::LUMEN, "lm");
    map.label(&si::LUX, "lx");
    map.label(&si::BECQUEREL, "Bq");
    map.label(&si::GRAY, "Gy");
    map.label(&si::SIEVERT, "Sv");
    map.label(&si::KATAL, "kat");

    map.label(&si::AMPERE_TURN, "At");
    map.label(&si::FARAD_PER_METRE, "ε");

    map.label(&si::GRAM, "g");
    map.label(&si::CELSIUS, "°C");
    map.label(&si::LITRE, "l");
    map.label(&si::HECTARE, "ha");
    map.label(&si::TONNE, "t");
    map.label(&si::MINUTE, "min");
    map.label(&si::HOUR, "h");
    map.label(&si::DAY, "d");
    map.label(&si::PLANCK, "ℎ");
    map.label(&si::ELECTRON_VOLT, "eV");
    map.label(&si::UNIFIED_ATOMIC_MASS, "u");

    map.alias(&si::CELSIUS, "℃");
    map.alias(&si::CELSIUS, "Celsius");
    map.alias(&si::LITRE, "L");
    map.alias(&si::KILOGRAM, "kilogram");
    map.alias(&si::HERTZ, "hertz");

    map.label(&non_si::DEGREE, "deg");
    map.alias(&non_si::DEGREE, "°");
    map.label(&non_si::MINUTE_ANGLE, "'");
    map.label(&non_si::REVOLUTION, "rev");
    // The legacy constants display the historical spelling but the
    // spelling itself keeps resolving to the 2019 units
    map.label(&non_si::ELECTRON_VOLT, "eV");
    map.label(&non_si::UNIFIED_ATOMIC_MASS, "u");
    map.label(&non_si::ASTRONOMICAL_UNIT, "UA");
    map.label(&non_si::PI, "π");
    map.label(&non_si::BEL, "B");
    map.label(&non_si::ATOM, "atom");
    map.label(&non_si::ANGSTROM, "Å");
    map.label(&non_si::LIGHT_YEAR, "ly");
    map.label(&non_si::ATMOSPHERE, "atm");
    map.label(&non_si::BAR, "b");
    map.label(&non_si::RAD, "rd");
    map.label(&non_si::ROENTGEN, "r");
}

/// A fresh symbol map carrying both catalogs
pub fn symbol_map() -> SymbolMap {
    let mut map = SymbolMap::new();
    install(&mut map);
    map
}

/// The compact format over the shipped catalogs
pub fn simple_format() -> SimpleUnitFormat {
    SimpleUnitFormat::with_symbols(symbol_map())
}

/// The expression format over the shipped catalogs
pub fn ebnf_format() -> EbnfUnitFormat {
    EbnfUnitFormat::with_symbols(symbol_map())
}

const UNITS_DEFAULT: &[(&str, &str)] = &[
    ("METRE", "m"),
    ("KILOGRAM", "kg"),
    ("SECOND", "s"),
    ("AMPERE", "A"),
    ("KELVIN", "K"),
    ("MOLE", "mol"),
    ("CANDELA", "cd"),
    ("RADIAN", "rad"),
    ("STERADIAN", "sr"),
    ("BIT", "bit"),
    ("HERTZ", "Hz"),
    ("NEWTON", "N"),
    ("PASCAL", "Pa"),
    ("JOULE", "J"),
    ("WATT", "W"),
    ("COULOMB", "C"),
    ("VOLT", "V"),
    ("FARAD", "F"),
    ("OHM", "Ω"),
    ("SIEMENS", "S"),
    ("WEBER", "Wb"),
    ("TESLA", "T"),
    ("HENRY", "H"),
    ("LUMEN", "lm"),
    ("LUX", "lx"),
    ("BECQUEREL", "Bq"),
    ("GRAY", "Gy"),
    ("SIEVERT", "Sv"),
    ("KATAL", "kat"),
    ("AMPERE_TURN", "At"),
    ("FARAD_PER_METRE", "ε"),
    ("GRAM", "g"),
    ("CELSIUS", "°C"),
    ("CELSIUS.1", "℃"),
    ("CELSIUS.2", "Celsius"),
    ("LITRE", "l"),
    ("LITRE.1", "L"),
    ("HECTARE", "ha"),
    ("TONNE", "t"),
    ("MINUTE", "min"),
    ("HOUR", "h"),
    ("DAY", "d"),
    ("PLANCK", "ℎ"),
    ("ELECTRON_VOLT", "eV"),
    ("UNIFIED_ATOMIC_MASS", "u"),
    ("KILOMETRES_PER_HOUR", "kph"),
    ("DEGREE", "deg"),
    ("MINUTE_ANGLE", "'"),
    ("ASTRONOMICAL_UNIT", "UA"),
    ("PI", "π"),
    ("BEL", "B"),
    ("ATOM", "atom"),
    ("ANGSTROM", "Å"),
    ("LIGHT_YEAR", "ly"),
    ("BAR", "b"),
    ("ATMOSPHERE", "atm"),
    ("ROENTGEN", "r"),
];

const SI_DEFAULT: &[(&str, &str)] = &[
    ("BIT", "bit"),
    ("AMPERE_TURN", "At"),
    ("BECQUEREL", "Bq"),
    ("CANDELA", "cd"),
    ("CELSIUS", "°C"),
    ("CELSIUS.1", "℃"),
    ("CELSIUS.2", "Celsius"),
    ("COULOMB", "C"),
    ("FARAD", "F"),
    ("GRAM", "g"),
    ("GRAY", "Gy"),
    ("HENRY", "H"),
    ("HERTZ", "Hz"),
    ("JOULE", "J"),
    ("KATAL", "kat"),
    ("KELVIN", "K"),
    ("KILOGRAM", "kg"),
    ("KILOGRAM.1", "kilogram"),
    ("LUMEN", "lm"),
    ("LUX", "lx"),
    ("METRE", "m"),
    ("MOLE", "mol"),
    ("NEWTON", "N"),
    ("OHM", "Ohm"),
    ("PASCAL", "Pa"),
    ("RADIAN", "rad"),
    ("ROENTGEN", "r"),
    ("SECOND", "s"),
    ("MINUTE", "min"),
    ("SIEMENS", "S"),
    ("SIEVERT", "Sv"),
    ("STERADIAN", "sr"),
    ("TESLA", "T"),
    ("VOLT", "V"),
    ("WATT", "W"),
    ("WEBER", "Wb"),
    ("KILOMETRES_PER_HOUR", "kph"),
];

const SI_LOCALE: &[(&str, &str)] = &[
    ("BIT", "b"),
    ("AMPERE_TURN", "At"),
    ("BECQUEREL", "Bq"),
    ("CANDELA", "cd"),
    ("CELSIUS", "°C"),
    ("CELSIUS.1", "℃"),
    ("CELSIUS.2", "Celsius"),
    ("COULOMB", "C"),
    ("FARAD", "F"),
    ("GRAM", "g"),
    ("GRAY", "Gy"),
    ("HENRY", "H"),
    ("HERTZ", "Hz"),
    ("JOULE", "J"),
    ("KATAL", "kat"),
    ("KELVIN", "K"),
    ("KILOGRAM", "kg"),
    ("KILOGRAM.1", "kilogram"),
    ("LUMEN", "lm"),
    ("LUX", "lx"),
    ("METRE", "m"),
    ("MOLE", "mol"),
    ("NEWTON", "N"),
    ("OHM", "Ω"),
    ("PASCAL", "Pa"),
    ("RADIAN", "rad"),
    ("ROENTGEN", "R"),
    ("SECOND", "s"),
    ("MINUTE", "min"),
    ("SIEMENS", "S"),
    ("SIEVERT", "Sv"),
    ("STERADIAN", "sr"),
    ("TESLA", "T"),
    ("VOLT", "V"),
    ("WATT", "W"),
    ("WEBER", "Wb"),
];

static CATALOG: LazyLock<BundleCatalog> = LazyLock::new(build_catalog);

fn build_catalog() -> BundleCatalog {
    let mut catalog = BundleCatalog::new();
    catalog.add_family("units", UNITS_DEFAULT);
    catalog.add_family("si", SI_DEFAULT);
    if let Err(error) = catalog.add_locale("si", "si", SI_LOCALE) {
        error!(%error, "label bundle bootstrap failed");
    }
    catalog
}

/// The shipped label bundles
pub fn bundle_catalog() -> &'static BundleCatalog {
    &CATALOG
}

fn unit_for_key(key: &str) -> Option<Unit> {
    let unit = match key {
        "METRE" => si::METRE.clone(),
        "KILOGRAM" => si::KILOGRAM.clone(),
        "SECOND" => si::SECOND.clone(),
        "AMPERE" => si::AMPERE.clone(),
        "KELVIN" => si::KELVIN.clone(),
        "MOLE" => si::MOLE.clone(),
        "CANDELA" => si::CANDELA.clone(),
        "RADIAN" => si::RADIAN.clone(),
        "STERADIAN" => si::STERADIAN.clone(),
        "BIT" => si::BIT.clone(),
        "HERTZ" => si::HERTZ.clone(),
        "NEWTON" => si::NEWTON.clone(),
        "PASCAL" => si::PASCAL.clone(),
        "JOULE" => si::JOULE.clone(),
        "WATT" => si::WATT.clone(),
        "COULOMB" => si::COULOMB.clone(),
        "VOLT" => si::VOLT.clone(),
        "FARAD" => si::FARAD.clone(),
        "OHM" => si::OHM.clone(),
        "SIEMENS" => si::SIEMENS.clone(),
        "WEBER" => si::WEBER.clone(),
        "TESLA" => si::TESLA.clone(),
        "HENRY" => si::HENRY.clone(),
        "LUMEN" => si::LUMEN.clone(),
        "LUX" => si::LUX.clone(),
        "BECQUEREL" => si::BECQUEREL.clone(),
        "GRAY" => si::GRAY.clone(),
        "SIEVERT" => si::SIEVERT.clone(),
        "KATAL" => si::KATAL.clone(),
        "AMPERE_TURN" => si::AMPERE_TURN.clone(),
        "FARAD_PER_METRE" => si::FARAD_PER_METRE.clone(),
        "GRAM" => si::GRAM.clone(),
        "CELSIUS" => si::CELSIUS.clone(),
        "LITRE" => si::LITRE.clone(),
        "HECTARE" => si::HECTARE.clone(),
        "TONNE" => si::TONNE.clone(),
        "MINUTE" => si::MINUTE.clone(),
        "HOUR" => si::HOUR.clone(),
        "DAY" => si::DAY.clone(),
        "PLANCK" => si::PLANCK.clone(),
        "ELECTRON_VOLT" => si::ELECTRON_VOLT.clone(),
        "UNIFIED_ATOMIC_MASS" => si::UNIFIED_ATOMIC_MASS.clone(),
        "KILOMETRES_PER_HOUR" => si::KILOMETRE_PER_HOUR.clone(),
        "DEGREE" => non_si::DEGREE.clone(),
        "MINUTE_ANGLE" => non_si::MINUTE_ANGLE.clone(),
        "ASTRONOMICAL_UNIT" => non_si::ASTRONOMICAL_UNIT.clone(),
        "PI" => non_si::PI.clone(),
        "BEL" => non_si::BEL.clone(),
        "ATOM" => non_si::ATOM.clone(),
        "ANGSTROM" => non_si::ANGSTROM.clone(),
        "LIGHT_YEAR" => non_si::LIGHT_YEAR.clone(),
        "BAR" => non_si::BAR.clone(),
        "ATMOSPHERE" => non_si::ATMOSPHERE.clone(),
        "ROENTGEN" => non_si::ROENTGEN.clone(),
        _ => return None,
    };
    Some(unit)
}

/// Splits `CELSIUS.1` style alias keys from plain ones
fn alias_base(key: &str) -> Option<&str> {
    let (base, suffix) = key.split_once('.')?;
    if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
        Some(base)
    } else {
        None
    }
}

fn bundle_symbols(family: &str, locale: &str) -> Result<SymbolMap, FormatError> {
    let bundle = bundle_catalog().resolve(family, locale)?;
    let mut map = SymbolMap::new();
    for key in bundle.key_set() {
        let text = bundle.get(&key)?;
        match alias_base(&key) {
            Some(base) => {
                if let Some(unit) = unit_for_key(base) {
                    map.alias(&unit, text);
                }
            }
            None => {
                if let Some(unit) = unit_for_key(&key) {
                    map.label(&unit, text);
                }
            }
        }
    }
    Ok(map)
}

/// The compact format with labels from a bundle
pub fn localized_simple_format(
    family: &str,
    locale: &str,
) -> Result<SimpleUnitFormat, FormatError> {
    Ok(SimpleUnitFormat::with_symbols(bundle_symbols(
        family, locale,
    )?))
}

/// The expression format with labels from a bundle
pub fn localized_ebnf_format(family: &str, locale: &str) -> Result<EbnfUnitFormat, FormatError> {
    Ok(EbnfUnitFormat::with_symbols(bundle_symbols(
        family, locale,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use metra::{BinaryPrefix, MetricPrefix};

    #[test]
    fn bootstrap_covers_both_catalogs() {
        let f = simple_format();
        assert_eq!(f.format(&si::METRE), "m");
        assert_eq!(f.format(&si::OHM), "Ω");
        assert_eq!(f.format(&si::CELSIUS), "°C");
        assert_eq!(f.format(&si::PLANCK), "ℎ");
        assert_eq!(f.format(&non_si::ANGSTROM), "Å");
        assert_eq!(f.format(&non_si::BAR), "b");
        assert_eq!(f.format(&non_si::DEGREE), "deg");
    }

    #[test]
    fn aliases_resolve_without_rendering() {
        let f = ebnf_format();
        assert_eq!(f.parse("°").unwrap(), *non_si::DEGREE);
        assert_eq!(f.parse("L").unwrap(), *si::LITRE);
        assert_eq!(f.parse("kilogram").unwrap(), *si::KILOGRAM);
        assert_eq!(f.parse("hertz").unwrap(), *si::HERTZ);
        assert_eq!(f.parse("℃").unwrap(), *si::CELSIUS);
        assert_eq!(f.parse("Celsius").unwrap(), *si::CELSIUS);
        assert_eq!(f.format(&non_si::DEGREE), "deg");
    }

    #[test]
    fn legacy_spellings_resolve_to_the_2019_units() {
        let f = simple_format();
        // Both electron volts display as "eV"
        assert_eq!(f.format(&si::ELECTRON_VOLT), "eV");
        assert_eq!(f.format(&non_si::ELECTRON_VOLT), "eV");
        // but the spelling belongs to the 2019 definition
        assert_eq!(f.parse("eV").unwrap(), *si::ELECTRON_VOLT);
        assert_ne!(f.parse("eV").unwrap(), *non_si::ELECTRON_VOLT);
        assert_eq!(f.parse("u").unwrap(), *si::UNIFIED_ATOMIC_MASS);
    }

    #[test]
    fn prefixes_stack_on_labeled_units() {
        let f = simple_format();
        assert_eq!(f.format(&si::METRE.prefix(MetricPrefix::Kilo)), "km");
        assert_eq!(f.format(&si::METRE.prefix(MetricPrefix::Micro)), "μm");
        assert_eq!(f.format(&si::TONNE.prefix(MetricPrefix::Mega)), "Mt");
        assert_eq!(f.format(&si::TONNE.prefix_binary(BinaryPrefix::Kibi)), "Kit");
        assert_eq!(
            f.format(&si::ELECTRON_VOLT.prefix(MetricPrefix::Milli)),
            "meV"
        );
        assert_eq!(
            f.format(&si::METRE.prefix(MetricPrefix::Mega).prefix_binary(BinaryPrefix::Kibi)),
            "KiMm"
        );
        assert_eq!(f.format(&non_si::DECIBEL), "dB");
    }

    #[test]
    fn prefixed_spellings_parse_back() {
        let f = simple_format();
        assert_eq!(
            f.parse("μm").unwrap(),
            si::METRE.prefix(MetricPrefix::Micro)
        );
        // The legacy micro sign resolves like the Greek letter
        assert_eq!(
            f.parse("µm").unwrap(),
            si::METRE.prefix(MetricPrefix::Micro)
        );
        assert_eq!(
            f.parse("meV").unwrap(),
            si::ELECTRON_VOLT.prefix(MetricPrefix::Milli)
        );
        assert_eq!(
            f.parse("KiMm").unwrap(),
            si::METRE.prefix(MetricPrefix::Mega).prefix_binary(BinaryPrefix::Kibi)
        );
        assert_eq!(f.parse("dam").unwrap(), si::METRE.prefix(MetricPrefix::Deka));
        assert_eq!(f.parse("dB").unwrap(), *non_si::DECIBEL);
        // "cd" is the candela, never centi on the day
        assert_eq!(f.parse("cd").unwrap(), *si::CANDELA);
    }

    #[test]
    fn relabeling_keeps_old_spellings_parsable() {
        let mut f = simple_format();
        f.label(&si::HECTARE, "Ha");
        assert_eq!(f.format(&si::HECTARE), "Ha");
        assert_eq!(f.parse("Ha").unwrap(), *si::HECTARE);
        assert_eq!(f.parse("ha").unwrap(), *si::HECTARE);
    }

    #[test]
    fn units_bundle_has_57_keys() {
        let bundle = bundle_catalog().resolve("units", "").unwrap();
        assert_eq!(bundle.key_set().len(), 57);
        assert_eq!(bundle.get("KILOMETRES_PER_HOUR").unwrap(), "kph");
        assert_eq!(bundle.get("CELSIUS.1").unwrap(), "℃");
    }

    #[test]
    fn si_bundle_localizes_over_its_default() {
        let default = bundle_catalog().resolve("si", "").unwrap();
        assert_eq!(default.key_set().len(), 37);
        assert_eq!(default.get("BIT").unwrap(), "bit");
        assert_eq!(default.get("OHM").unwrap(), "Ohm");

        let localized = bundle_catalog().resolve("si", "si").unwrap();
        assert_eq!(localized.key_set().len(), 37);
        assert_eq!(localized.get("BIT").unwrap(), "b");
        assert_eq!(localized.get("OHM").unwrap(), "Ω");
        assert_eq!(localized.get("ROENTGEN").unwrap(), "R");
        // Only the default carries the speed label
        assert_eq!(localized.get("KILOMETRES_PER_HOUR").unwrap(), "kph");
    }

    #[test]
    fn bundles_are_shared_on_repeated_resolution() {
        let first = bundle_catalog().resolve("si", "si").unwrap();
        let second = bundle_catalog().resolve("si", "si").unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert!(matches!(
            bundle_catalog().resolve("imperial", ""),
            Err(FormatError::UnknownBundle(_))
        ));
        assert!(matches!(
            first.get("FURLONG"),
            Err(FormatError::MissingKey { .. })
        ));
    }

    #[test]
    fn localized_formats_label_from_their_bundle() {
        let si_locale = localized_simple_format("si", "si").unwrap();
        assert_eq!(si_locale.format(&si::BIT), "b");
        assert_eq!(si_locale.format(&non_si::ROENTGEN), "R");
        assert_eq!(si_locale.format(&si::KILOMETRE_PER_HOUR), "kph");

        let default = localized_simple_format("units", "").unwrap();
        assert_eq!(default.format(&si::KILOMETRE_PER_HOUR), "kph");
        assert_eq!(default.format(&non_si::ATMOSPHERE), "atm");

        // The bootstrap formats render the product structurally
        assert_eq!(simple_format().format(&si::KILOMETRE_PER_HOUR), "km/h");
    }

    #[test]
    fn localized_ebnf_parses_localized_spellings() {
        let f = localized_ebnf_format("si", "si").unwrap();
        assert_eq!(f.parse("b").unwrap(), *si::BIT);
        assert_eq!(f.parse("kph").unwrap(), *si::KILOMETRE_PER_HOUR);
        assert_eq!(f.parse("m/s").unwrap(), *si::METRE_PER_SECOND);
    }
}
