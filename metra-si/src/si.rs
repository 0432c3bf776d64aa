//! The International System of Units
//!
//! Every unit is a `LazyLock` constant usable on its own. [`SI`] is
//! the assembled system with its quantity kind mapping.

use std::sync::LazyLock;

use metra::{
    Dimension, MetricPrefix, Number, QuantityKind, SystemOfUnits, Unit, UnitError,
};
use tracing::error;

// Base units

pub static METRE: LazyLock<Unit> = LazyLock::new(|| Unit::base("m", Dimension::LENGTH));
pub static KILOGRAM: LazyLock<Unit> = LazyLock::new(|| Unit::base("kg", Dimension::MASS));
pub static SECOND: LazyLock<Unit> = LazyLock::new(|| Unit::base("s", Dimension::TIME));
pub static AMPERE: LazyLock<Unit> =
    LazyLock::new(|| Unit::base("A", Dimension::ELECTRIC_CURRENT));
pub static KELVIN: LazyLock<Unit> = LazyLock::new(|| Unit::base("K", Dimension::TEMPERATURE));
pub static MOLE: LazyLock<Unit> =
    LazyLock::new(|| Unit::base("mol", Dimension::AMOUNT_OF_SUBSTANCE));
pub static CANDELA: LazyLock<Unit> =
    LazyLock::new(|| Unit::base("cd", Dimension::LUMINOUS_INTENSITY));

// Dimensionless derived units

pub static RADIAN: LazyLock<Unit> = LazyLock::new(|| Unit::one().alternate("rad"));
pub static STERADIAN: LazyLock<Unit> = LazyLock::new(|| Unit::one().alternate("sr"));
pub static BIT: LazyLock<Unit> = LazyLock::new(|| Unit::one().alternate("bit"));

// Named derived units

pub static HERTZ: LazyLock<Unit> =
    LazyLock::new(|| Unit::one().divide(&SECOND).alternate("Hz"));
pub static NEWTON: LazyLock<Unit> = LazyLock::new(|| {
    METRE
        .multiply(&KILOGRAM)
        .divide(&SECOND.pow(2))
        .alternate("N")
});
pub static PASCAL: LazyLock<Unit> =
    LazyLock::new(|| NEWTON.divide(&METRE.pow(2)).alternate("Pa"));
pub static JOULE: LazyLock<Unit> = LazyLock::new(|| NEWTON.multiply(&METRE).alternate("J"));
pub static WATT: LazyLock<Unit> = LazyLock::new(|| JOULE.divide(&SECOND).alternate("W"));
pub static COULOMB: LazyLock<Unit> =
    LazyLock::new(|| SECOND.multiply(&AMPERE).alternate("C"));
pub static VOLT: LazyLock<Unit> = LazyLock::new(|| WATT.divide(&AMPERE).alternate("V"));
pub static FARAD: LazyLock<Unit> = LazyLock::new(|| COULOMB.divide(&VOLT).alternate("F"));
pub static OHM: LazyLock<Unit> = LazyLock::new(|| VOLT.divide(&AMPERE).alternate("Ω"));
pub static SIEMENS: LazyLock<Unit> = LazyLock::new(|| AMPERE.divide(&VOLT).alternate("S"));
pub static WEBER: LazyLock<Unit> = LazyLock::new(|| VOLT.multiply(&SECOND).alternate("Wb"));
pub static TESLA: LazyLock<Unit> =
    LazyLock::new(|| WEBER.divide(&METRE.pow(2)).alternate("T"));
pub static HENRY: LazyLock<Unit> = LazyLock::new(|| WEBER.divide(&AMPERE).alternate("H"));
pub static LUMEN: LazyLock<Unit> =
    LazyLock::new(|| CANDELA.multiply(&STERADIAN).alternate("lm"));
pub static LUX: LazyLock<Unit> = LazyLock::new(|| LUMEN.divide(&METRE.pow(2)).alternate("lx"));
pub static BECQUEREL: LazyLock<Unit> =
    LazyLock::new(|| Unit::one().divide(&SECOND).alternate("Bq"));
pub static GRAY: LazyLock<Unit> = LazyLock::new(|| JOULE.divide(&KILOGRAM).alternate("Gy"));
pub static SIEVERT: LazyLock<Unit> =
    LazyLock::new(|| JOULE.divide(&KILOGRAM).alternate("Sv"));
pub static KATAL: LazyLock<Unit> = LazyLock::new(|| MOLE.divide(&SECOND).alternate("kat"));

/// Magnetomotive force, distinct from the plain ampere
pub static AMPERE_TURN: LazyLock<Unit> = LazyLock::new(|| AMPERE.alternate("At"));
/// Electric permittivity
pub static FARAD_PER_METRE: LazyLock<Unit> =
    LazyLock::new(|| FARAD.divide(&METRE).alternate("ε"));

// Accepted transformed units

pub static GRAM: LazyLock<Unit> = LazyLock::new(|| KILOGRAM.divide_ratio(1000, 1));
pub static CELSIUS: LazyLock<Unit> =
    LazyLock::new(|| KELVIN.shift(Number::from_ratio(27315, 100)));
pub static LITRE: LazyLock<Unit> = LazyLock::new(|| METRE.pow(3).divide_ratio(1000, 1));
pub static HECTARE: LazyLock<Unit> =
    LazyLock::new(|| METRE.pow(2).multiply_ratio(10_000, 1));
pub static TONNE: LazyLock<Unit> = LazyLock::new(|| KILOGRAM.multiply_ratio(1000, 1));
pub static MINUTE: LazyLock<Unit> = LazyLock::new(|| SECOND.multiply_ratio(60, 1));
pub static HOUR: LazyLock<Unit> = LazyLock::new(|| SECOND.multiply_ratio(3600, 1));
pub static DAY: LazyLock<Unit> = LazyLock::new(|| SECOND.multiply_ratio(86_400, 1));
/// Planck constant, exact since the 2019 redefinition
pub static PLANCK: LazyLock<Unit> =
    LazyLock::new(|| JOULE_SECOND.multiply_factor(6.62607015e-34));
/// Electron volt, exact since the 2019 redefinition
pub static ELECTRON_VOLT: LazyLock<Unit> =
    LazyLock::new(|| JOULE.multiply_factor(1.602176634e-19));
/// Unified atomic mass, CODATA 2018
pub static UNIFIED_ATOMIC_MASS: LazyLock<Unit> =
    LazyLock::new(|| KILOGRAM.multiply_factor(1.66053906660e-27));

// Product units

pub static SQUARE_METRE: LazyLock<Unit> = LazyLock::new(|| METRE.pow(2));
pub static CUBIC_METRE: LazyLock<Unit> = LazyLock::new(|| METRE.pow(3));
pub static METRE_PER_SECOND: LazyLock<Unit> = LazyLock::new(|| METRE.divide(&SECOND));
pub static METRE_PER_SQUARE_SECOND: LazyLock<Unit> =
    LazyLock::new(|| METRE.divide(&SECOND.pow(2)));
pub static KILOMETRE_PER_HOUR: LazyLock<Unit> =
    LazyLock::new(|| METRE.prefix(MetricPrefix::Kilo).divide(&HOUR));
pub static JOULE_SECOND: LazyLock<Unit> = LazyLock::new(|| JOULE.multiply(&SECOND));
pub static NEWTON_PER_SQUARE_AMPERE: LazyLock<Unit> =
    LazyLock::new(|| NEWTON.divide(&AMPERE.pow(2)));
pub static RECIPROCAL_METRE: LazyLock<Unit> = LazyLock::new(|| METRE.pow(-1));
pub static PASCAL_SECOND: LazyLock<Unit> = LazyLock::new(|| PASCAL.multiply(&SECOND));
pub static CANDELA_PER_SQUARE_METRE: LazyLock<Unit> =
    LazyLock::new(|| CANDELA.divide(&METRE.pow(2)));
pub static SQUARE_METRE_PER_SECOND: LazyLock<Unit> =
    LazyLock::new(|| METRE.pow(2).divide(&SECOND));
pub static AMPERE_PER_METRE: LazyLock<Unit> = LazyLock::new(|| AMPERE.divide(&METRE));
pub static COULOMB_PER_KILOGRAM: LazyLock<Unit> =
    LazyLock::new(|| COULOMB.divide(&KILOGRAM));
pub static WATT_PER_STERADIAN: LazyLock<Unit> = LazyLock::new(|| WATT.divide(&STERADIAN));
pub static WATT_PER_STERADIAN_PER_SQUARE_METRE: LazyLock<Unit> =
    LazyLock::new(|| WATT_PER_STERADIAN.divide(&METRE.pow(2)));

/// The SI system: 57 units with their quantity kind mapping
pub static SI: LazyLock<SystemOfUnits> = LazyLock::new(build);

fn build() -> SystemOfUnits {
    let mut system = SystemOfUnits::new("SI");
    if let Err(error) = register(&mut system) {
        error!(%error, "SI catalog bootstrap rejected a unit");
    }
    system
}

fn register(system: &mut SystemOfUnits) -> Result<(), UnitError> {
    system.add_unit_for_kind(METRE.clone(), QuantityKind::LENGTH)?;
    system.add_unit_for_kind(KILOGRAM.clone(), QuantityKind::MASS)?;
    system.add_unit_for_kind(SECOND.clone(), QuantityKind::DURATION)?;
    system.add_unit_for_kind(AMPERE.clone(), QuantityKind::ELECTRIC_CURRENT)?;
    system.add_unit_for_kind(KELVIN.clone(), QuantityKind::TEMPERATURE)?;
    system.add_unit_for_kind(MOLE.clone(), QuantityKind::AMOUNT_OF_SUBSTANCE)?;
    system.add_unit_for_kind(CANDELA.clone(), QuantityKind::LUMINOUS_INTENSITY)?;

    system.add_unit_for_kind(RADIAN.clone(), QuantityKind::ANGLE)?;
    system.add_unit_for_kind(STERADIAN.clone(), QuantityKind::SOLID_ANGLE)?;
    system.add_unit_for_kind(BIT.clone(), QuantityKind::INFORMATION)?;

    system.add_unit_for_kind(HERTZ.clone(), QuantityKind::FREQUENCY)?;
    system.add_unit_for_kind(NEWTON.clone(), QuantityKind::FORCE)?;
    system.add_unit_for_kind(PASCAL.clone(), QuantityKind::PRESSURE)?;
    system.add_unit_for_kind(JOULE.clone(), QuantityKind::ENERGY)?;
    system.add_unit_for_kind(WATT.clone(), QuantityKind::POWER)?;
    system.add_unit_for_kind(COULOMB.clone(), QuantityKind::ELECTRIC_CHARGE)?;
    system.add_unit_for_kind(VOLT.clone(), QuantityKind::ELECTRIC_POTENTIAL)?;
    system.add_unit_for_kind(FARAD.clone(), QuantityKind::ELECTRIC_CAPACITANCE)?;
    system.add_unit_for_kind(OHM.clone(), QuantityKind::ELECTRIC_RESISTANCE)?;
    system.add_unit_for_kind(SIEMENS.clone(), QuantityKind::ELECTRIC_CONDUCTANCE)?;
    system.add_unit_for_kind(WEBER.clone(), QuantityKind::MAGNETIC_FLUX)?;
    system.add_unit_for_kind(TESLA.clone(), QuantityKind::MAGNETIC_FLUX_DENSITY)?;
    system.add_unit_for_kind(HENRY.clone(), QuantityKind::ELECTRIC_INDUCTANCE)?;
    system.add_unit_for_kind(LUMEN.clone(), QuantityKind::LUMINOUS_FLUX)?;
    system.add_unit_for_kind(LUX.clone(), QuantityKind::ILLUMINANCE)?;
    system.add_unit_for_kind(BECQUEREL.clone(), QuantityKind::RADIOACTIVITY)?;
    system.add_unit_for_kind(GRAY.clone(), QuantityKind::RADIATION_DOSE_ABSORBED)?;
    system.add_unit_for_kind(SIEVERT.clone(), QuantityKind::RADIATION_DOSE_EFFECTIVE)?;
    system.add_unit_for_kind(KATAL.clone(), QuantityKind::CATALYTIC_ACTIVITY)?;

    system.add_unit_for_kind(AMPERE_TURN.clone(), QuantityKind::MAGNETOMOTIVE_FORCE)?;
    system.add_unit_for_kind(FARAD_PER_METRE.clone(), QuantityKind::PERMITTIVITY)?;

    system.add_unit(GRAM.clone());
    system.add_unit(CELSIUS.clone());
    system.add_unit(LITRE.clone());
    system.add_unit(HECTARE.clone());
    system.add_unit(TONNE.clone());
    system.add_unit(MINUTE.clone());
    system.add_unit(HOUR.clone());
    system.add_unit(DAY.clone());
    system.add_unit(PLANCK.clone());
    system.add_unit(ELECTRON_VOLT.clone());
    system.add_unit(UNIFIED_ATOMIC_MASS.clone());

    system.add_unit_for_kind(SQUARE_METRE.clone(), QuantityKind::AREA)?;
    system.add_unit_for_kind(CUBIC_METRE.clone(), QuantityKind::VOLUME)?;
    system.add_unit_for_kind(METRE_PER_SECOND.clone(), QuantityKind::SPEED)?;
    system.add_unit_for_kind(METRE_PER_SQUARE_SECOND.clone(), QuantityKind::ACCELERATION)?;
    system.add_unit(KILOMETRE_PER_HOUR.clone());
    system.add_unit_for_kind(JOULE_SECOND.clone(), QuantityKind::ACTION)?;
    system.add_unit(NEWTON_PER_SQUARE_AMPERE.clone());
    system.add_unit_for_kind(RECIPROCAL_METRE.clone(), QuantityKind::WAVENUMBER)?;
    system.add_unit_for_kind(PASCAL_SECOND.clone(), QuantityKind::DYNAMIC_VISCOSITY)?;
    system.add_unit_for_kind(CANDELA_PER_SQUARE_METRE.clone(), QuantityKind::LUMINANCE)?;
    system.add_unit_for_kind(
        SQUARE_METRE_PER_SECOND.clone(),
        QuantityKind::KINEMATIC_VISCOSITY,
    )?;
    system.add_unit_for_kind(AMPERE_PER_METRE.clone(), QuantityKind::MAGNETIC_FIELD_STRENGTH)?;
    system.add_unit_for_kind(
        COULOMB_PER_KILOGRAM.clone(),
        QuantityKind::IONIZING_RADIATION,
    )?;
    system.add_unit_for_kind(WATT_PER_STERADIAN.clone(), QuantityKind::RADIANT_INTENSITY)?;
    system.add_unit_for_kind(
        WATT_PER_STERADIAN_PER_SQUARE_METRE.clone(),
        QuantityKind::RADIANCE,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use metra::{Quantity, UnitConverter};

    #[test]
    fn the_system_has_57_units() {
        assert_eq!(SI.len(), 57);
        assert_eq!(SI.name(), "SI");
    }

    #[test]
    fn kinds_resolve_to_their_units() {
        assert_eq!(SI.unit_for_kind(&QuantityKind::LENGTH), Some(&*METRE));
        assert_eq!(SI.unit_for_kind(&QuantityKind::FORCE), Some(&*NEWTON));
        assert_eq!(
            SI.unit_for_kind(&QuantityKind::SPEED),
            Some(&*METRE_PER_SECOND)
        );
        assert_eq!(SI.unit_for_kind(&QuantityKind::DENSITY), None);
    }

    #[test]
    fn derived_units_carry_derived_dimensions() {
        assert!(VOLT.as_kind(&QuantityKind::ELECTRIC_POTENTIAL).is_ok());
        assert!(TESLA.as_kind(&QuantityKind::MAGNETIC_FLUX_DENSITY).is_ok());
        assert!(KATAL.as_kind(&QuantityKind::CATALYTIC_ACTIVITY).is_ok());
        assert!(VOLT.as_kind(&QuantityKind::ENERGY).is_err());
    }

    #[test]
    fn kilo_of_gram_is_the_kilogram() {
        assert_eq!(GRAM.prefix(MetricPrefix::Kilo), *KILOGRAM);
        assert!(GRAM.converter_to(&KILOGRAM).is_ok());
    }

    #[test]
    fn kilometre_per_hour_converts_exactly() {
        let converter = KILOMETRE_PER_HOUR.converter_to(&METRE_PER_SECOND).unwrap();
        assert_eq!(
            converter,
            UnitConverter::rational(5, 18),
        );
        let speed = Quantity::new(Number::from_i64(36), KILOMETRE_PER_HOUR.clone());
        let converted = speed.to(&METRE_PER_SECOND).unwrap();
        assert_eq!(converted.value(), &Number::from_i64(10));
    }

    #[test]
    fn celsius_is_an_offset_on_kelvin() {
        let freezing = Quantity::new(Number::zero(), CELSIUS.clone());
        let kelvin = freezing.to(&KELVIN).unwrap();
        assert_eq!(kelvin.value(), &Number::from_ratio(27315, 100));
        assert_eq!(CELSIUS.system_unit(), *KELVIN);
    }

    #[test]
    fn accepted_time_units_chain_to_the_second() {
        let day = Quantity::new(Number::one(), DAY.clone());
        assert_eq!(day.to(&SECOND).unwrap().value(), &Number::from_i64(86_400));
        assert_eq!(
            Quantity::new(Number::one(), HOUR.clone())
                .to(&MINUTE)
                .unwrap()
                .value(),
            &Number::from_i64(60)
        );
    }

    #[test]
    fn registration_is_idempotent() {
        let mut system = SI.clone();
        assert!(!system.add_unit(METRE.clone()));
        assert!(!system.add_unit(GRAM.prefix(MetricPrefix::Kilo)));
        assert_eq!(system.len(), 57);
    }

    #[test]
    fn kind_remapping_is_rejected() {
        let mut system = SI.clone();
        let err = system.add_unit_for_kind(KILOMETRE_PER_HOUR.clone(), QuantityKind::SPEED);
        assert!(matches!(
            err,
            Err(UnitError::DuplicateQuantityMapping { .. })
        ));
        assert_eq!(system.len(), 57);
    }

    #[test]
    fn electron_volt_scales_the_joule() {
        let energy = Quantity::new(Number::one(), ELECTRON_VOLT.clone());
        let joules = energy.to(&JOULE).unwrap();
        assert_eq!(joules.value().to_f64(), Some(1.602176634e-19));
    }

    #[test]
    fn litre_and_micrometre_convert_exactly() {
        let litre = Quantity::new(Number::one(), LITRE.clone());
        let millilitre = LITRE.prefix(MetricPrefix::Milli);
        assert_eq!(
            litre.to(&millilitre).unwrap().value(),
            &Number::from_i64(1000)
        );

        let metre = Quantity::new(Number::one(), METRE.clone());
        let micrometre = METRE.prefix(MetricPrefix::Micro);
        assert_eq!(
            metre.to(&micrometre).unwrap().value(),
            &Number::from_i64(1_000_000)
        );

        let gram = Quantity::new(Number::one(), GRAM.clone());
        let nanogram = GRAM.prefix(MetricPrefix::Nano);
        assert_eq!(
            gram.to(&nanogram).unwrap().value(),
            &Number::from_i64(1_000_000_000)
        );
    }

    #[test]
    fn product_units_resolve_to_system_units() {
        assert_eq!(KILOMETRE_PER_HOUR.system_unit(), *METRE_PER_SECOND);
        assert_eq!(PLANCK.system_unit(), *JOULE_SECOND);
        assert_eq!(LITRE.system_unit(), *CUBIC_METRE);
    }
}
