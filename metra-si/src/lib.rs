//! Metra SI - The Shipped Unit Catalogs
//!
//! Ready-made registries for the International System and the common
//! units outside it, with the symbols and locale labels to spell them:
//!
//! - [`si`] - SI base, derived, accepted and product units
//! - [`non_si`] - degree, bar, electron volt and other units in wide use
//! - [`labels`] - symbol maps, unit formats and label bundles
//!
//! The statics hand out shared `Unit` values, so catalog units compare
//! cheaply and label registries key on the exact published structure.

pub mod labels;
pub mod non_si;
pub mod si;

use metra::SystemOfUnits;

/// All unit systems shipped with this crate
pub fn systems() -> Vec<&'static SystemOfUnits> {
    vec![&*si::SI, &*non_si::NON_SI]
}

/// Looks a shipped system up by its registry name
pub fn system_for_name(name: &str) -> Option<&'static SystemOfUnits> {
    systems().into_iter().find(|system| system.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metra::{MetricPrefix, Number, Quantity, QuantityKind};

    #[test]
    fn systems_are_published_by_name() {
        assert_eq!(systems().len(), 2);
        assert!(system_for_name("SI").is_some());
        assert!(system_for_name("Non-SI Units").is_some());
        assert!(system_for_name("CGS").is_none());
        assert_eq!(system_for_name("SI").map(|s| s.len()), Some(57));
    }

    #[test]
    fn every_catalog_unit_survives_a_format_parse_cycle() {
        let f = labels::ebnf_format();
        for system in systems() {
            for unit in system.units() {
                // The legacy constants share their spelling with the
                // 2019 definitions and parse back as those
                if *unit == *non_si::ELECTRON_VOLT || *unit == *non_si::UNIFIED_ATOMIC_MASS {
                    continue;
                }
                let text = f.format(unit);
                let parsed = f.parse(&text).unwrap();
                assert_eq!(parsed, *unit, "round trip through {text:?}");
            }
        }
    }

    #[test]
    fn open_kinds_accept_what_checked_kinds_refuse() {
        let f = labels::ebnf_format();
        let consumption = f.parse("kg/h/l").unwrap();
        assert!(consumption.as_kind(&QuantityKind::MASS).is_err());
        assert!(consumption.as_kind(&QuantityKind::DIMENSIONLESS).is_err());
        assert!(consumption.as_kind(&QuantityKind::DENSITY).is_ok());
    }

    #[test]
    fn quantities_convert_between_catalog_units() {
        let angle = Quantity::new(Number::from_i64(90), non_si::DEGREE.clone());
        let turned = angle.to(&non_si::REVOLUTION).unwrap();
        assert_eq!(turned.value().as_decimal(2), "0.25");

        let pressure = Quantity::new(Number::from_i64(2), non_si::BAR.clone());
        let pascals = pressure.to(&si::PASCAL).unwrap();
        assert_eq!(pascals.value(), &Number::from_i64(200_000));
    }

    #[test]
    fn quantity_arithmetic_spans_the_catalogs() {
        let distance = Quantity::new(
            Number::from_i64(120),
            si::METRE.prefix(MetricPrefix::Kilo),
        );
        let time = Quantity::new(Number::from_i64(2), si::HOUR.clone());
        let speed = distance.div(&time).unwrap();
        let si_speed = speed.to(&si::METRE_PER_SECOND).unwrap();
        assert_eq!(si_speed.value().as_decimal(3), "16.667");

        let walked = Quantity::new(Number::from_i64(10), si::METRE.clone());
        assert_eq!(walked.to_string(), "10 m");
        let total = walked
            .add(&Quantity::new(Number::from_i64(2), si::METRE.prefix(MetricPrefix::Kilo)))
            .unwrap();
        assert_eq!(total.to_string(), "2010 m");
    }

    #[test]
    fn registered_kinds_pick_catalog_defaults() {
        let system = system_for_name("SI").unwrap();
        assert_eq!(
            system.unit_for_kind(&QuantityKind::SPEED),
            Some(&*si::METRE_PER_SECOND)
        );
        let system = system_for_name("Non-SI Units").unwrap();
        assert_eq!(
            system.unit_for_kind(&QuantityKind::ANGLE),
            Some(&*non_si::DEGREE)
        );
        assert_eq!(system.unit_for_kind(&QuantityKind::SPEED), None);
    }
}
