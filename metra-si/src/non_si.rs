//! Units outside the SI but accepted for use with it
//!
//! Mostly historical and astronomical units defined against their SI
//! counterparts. A few constants are kept for direct use without being
//! registered in the system.

use std::sync::LazyLock;

use metra::{MetricPrefix, QuantityKind, SystemOfUnits, Unit, UnitConverter, UnitError};
use tracing::error;

use crate::si::{
    AMPERE_TURN, BECQUEREL, COULOMB, GRAY, JOULE, KELVIN, KILOGRAM, LUX, METRE,
    METRE_PER_SECOND, METRE_PER_SQUARE_SECOND, MOLE, NEWTON, PASCAL, RADIAN, SECOND, SIEVERT,
    STERADIAN, TESLA, WEBER,
};

const AVOGADRO_CONSTANT: f64 = 6.02214199e23;
const ELEMENTARY_CHARGE_COULOMBS: f64 = 1.602176462e-19;

fn pi_scaled(dividend: i128, divisor: i128) -> UnitConverter {
    UnitConverter::rational(dividend, divisor).concatenate(&UnitConverter::pi_power(1))
}

// Angle

pub static DEGREE: LazyLock<Unit> = LazyLock::new(|| RADIAN.transform(pi_scaled(1, 180)));
pub static MINUTE_ANGLE: LazyLock<Unit> =
    LazyLock::new(|| RADIAN.transform(pi_scaled(1, 180 * 60)));
pub static SECOND_ANGLE: LazyLock<Unit> =
    LazyLock::new(|| RADIAN.transform(pi_scaled(1, 180 * 60 * 60)));
/// One full turn
pub static REVOLUTION: LazyLock<Unit> = LazyLock::new(|| RADIAN.transform(pi_scaled(2, 1)));

// Mass and energy, the CODATA 2006 values the 2019 revision replaced

pub static ELECTRON_VOLT: LazyLock<Unit> =
    LazyLock::new(|| JOULE.multiply_factor(1.602176487e-19));
pub static UNIFIED_ATOMIC_MASS: LazyLock<Unit> =
    LazyLock::new(|| KILOGRAM.multiply_factor(1.660538782e-27));
pub static ATOMIC_MASS: LazyLock<Unit> =
    LazyLock::new(|| KILOGRAM.multiply_factor(1e-3 / AVOGADRO_CONSTANT));
pub static ELECTRON_MASS: LazyLock<Unit> =
    LazyLock::new(|| KILOGRAM.multiply_factor(9.10938188e-31));

// Length

pub static ASTRONOMICAL_UNIT: LazyLock<Unit> =
    LazyLock::new(|| METRE.multiply_factor(1.49597871e11));
pub static ANGSTROM: LazyLock<Unit> =
    LazyLock::new(|| METRE.divide_ratio(10_000_000_000, 1));
pub static LIGHT_YEAR: LazyLock<Unit> = LazyLock::new(|| METRE.multiply_factor(9.460528405e15));
pub static PARSEC: LazyLock<Unit> = LazyLock::new(|| METRE.multiply_factor(30856770e9));

// Dimensionless

pub static PI: LazyLock<Unit> =
    LazyLock::new(|| Unit::one().transform(UnitConverter::pi_power(1)));
/// Base ten logarithmic ratio
pub static BEL: LazyLock<Unit> =
    LazyLock::new(|| Unit::one().transform(UnitConverter::log(10.0).invert()));
pub static DECIBEL: LazyLock<Unit> = LazyLock::new(|| BEL.prefix(MetricPrefix::Deci));
pub static ATOM: LazyLock<Unit> = LazyLock::new(|| MOLE.divide_factor(AVOGADRO_CONSTANT));

// Time

pub static DAY_SIDEREAL: LazyLock<Unit> = LazyLock::new(|| SECOND.multiply_factor(86164.09));
pub static YEAR_SIDEREAL: LazyLock<Unit> =
    LazyLock::new(|| SECOND.multiply_factor(31558149.54));
pub static YEAR_JULIAN: LazyLock<Unit> = LazyLock::new(|| SECOND.multiply_ratio(31_557_600, 1));

// Electric charge

pub static ELEMENTARY_CHARGE: LazyLock<Unit> =
    LazyLock::new(|| COULOMB.multiply_factor(ELEMENTARY_CHARGE_COULOMBS));
pub static FARADAY: LazyLock<Unit> =
    LazyLock::new(|| COULOMB.multiply_factor(ELEMENTARY_CHARGE_COULOMBS * AVOGADRO_CONSTANT));
pub static FRANKLIN: LazyLock<Unit> = LazyLock::new(|| COULOMB.multiply_factor(3.3356e-10));

// Photometry and magnetism

pub static LAMBERT: LazyLock<Unit> = LazyLock::new(|| LUX.multiply_ratio(10_000, 1));
pub static MAXWELL: LazyLock<Unit> = LazyLock::new(|| WEBER.divide_ratio(100_000_000, 1));
pub static GAUSS: LazyLock<Unit> = LazyLock::new(|| TESLA.divide_ratio(10_000, 1));

// Force and pressure

pub static DYNE: LazyLock<Unit> = LazyLock::new(|| NEWTON.divide_ratio(100_000, 1));
pub static ATMOSPHERE: LazyLock<Unit> = LazyLock::new(|| PASCAL.multiply_ratio(101_325, 1));
pub static BAR: LazyLock<Unit> = LazyLock::new(|| PASCAL.multiply_ratio(100_000, 1));
pub static MILLIMETRE_OF_MERCURY: LazyLock<Unit> =
    LazyLock::new(|| PASCAL.multiply_factor(133.322));
pub static INCH_OF_MERCURY: LazyLock<Unit> =
    LazyLock::new(|| PASCAL.multiply_factor(3386.388));

// Radiation

pub static RAD: LazyLock<Unit> = LazyLock::new(|| GRAY.divide_ratio(100, 1));
pub static REM: LazyLock<Unit> = LazyLock::new(|| SIEVERT.divide_ratio(100, 1));
pub static CURIE: LazyLock<Unit> =
    LazyLock::new(|| BECQUEREL.multiply_ratio(37_000_000_000, 1));
pub static RUTHERFORD: LazyLock<Unit> = LazyLock::new(|| BECQUEREL.multiply_ratio(1_000_000, 1));
pub static ROENTGEN: LazyLock<Unit> =
    LazyLock::new(|| COULOMB.divide(&KILOGRAM).multiply_factor(2.58e-4));

// Others

/// Full solid angle, deliberately unlabeled
pub static SPHERE: LazyLock<Unit> = LazyLock::new(|| STERADIAN.transform(pi_scaled(4, 1)));
pub static FRAMES_PER_SECOND: LazyLock<Unit> = LazyLock::new(|| Unit::one().divide(&SECOND));

// Constants kept for direct use, not registered

pub static RANKINE: LazyLock<Unit> = LazyLock::new(|| KELVIN.multiply_ratio(5, 9));
pub static SPEED_OF_LIGHT: LazyLock<Unit> =
    LazyLock::new(|| METRE_PER_SECOND.multiply_ratio(299_792_458, 1));
pub static STANDARD_GRAVITY: LazyLock<Unit> =
    LazyLock::new(|| METRE_PER_SQUARE_SECOND.multiply_ratio(980_665, 100_000));
pub static GILBERT: LazyLock<Unit> = LazyLock::new(|| {
    AMPERE_TURN.transform(
        UnitConverter::rational(5, 2).concatenate(&UnitConverter::pi_power(-1)),
    )
});
pub static ERG: LazyLock<Unit> = LazyLock::new(|| JOULE.divide_ratio(10_000_000, 1));
pub static KILOGRAM_FORCE: LazyLock<Unit> =
    LazyLock::new(|| NEWTON.multiply_ratio(980_665, 100_000));
pub static POUND_FORCE: LazyLock<Unit> = LazyLock::new(|| {
    NEWTON.multiply_ratio(45_359_237 * 980_665, 100_000_000 * 100_000)
});

/// The non-SI system: 36 units accepted for use with the SI
pub static NON_SI: LazyLock<SystemOfUnits> = LazyLock::new(build);

fn build() -> SystemOfUnits {
    let mut system = SystemOfUnits::new("Non-SI Units");
    if let Err(error) = register(&mut system) {
        error!(%error, "non-SI catalog bootstrap rejected a unit");
    }
    system
}

fn register(system: &mut SystemOfUnits) -> Result<(), UnitError> {
    system.add_unit_for_kind(DEGREE.clone(), QuantityKind::ANGLE)?;
    system.add_unit(MINUTE_ANGLE.clone());
    system.add_unit(crate::si::TONNE.clone());
    system.add_unit(ELECTRON_VOLT.clone());
    system.add_unit(UNIFIED_ATOMIC_MASS.clone());
    system.add_unit(ASTRONOMICAL_UNIT.clone());
    system.add_unit(crate::si::HECTARE.clone());
    system.add_unit(PI.clone());
    system.add_unit(BEL.clone());
    system.add_unit(ATOM.clone());
    system.add_unit(ANGSTROM.clone());
    system.add_unit(LIGHT_YEAR.clone());
    system.add_unit(DAY_SIDEREAL.clone());
    system.add_unit(YEAR_SIDEREAL.clone());
    system.add_unit(YEAR_JULIAN.clone());
    system.add_unit(ATOMIC_MASS.clone());
    system.add_unit(ELECTRON_MASS.clone());
    system.add_unit(ELEMENTARY_CHARGE.clone());
    system.add_unit(FARADAY.clone());
    system.add_unit(FRANKLIN.clone());
    system.add_unit(REVOLUTION.clone());
    system.add_unit(LAMBERT.clone());
    system.add_unit(MAXWELL.clone());
    system.add_unit(GAUSS.clone());
    system.add_unit(DYNE.clone());
    system.add_unit_for_kind(ATMOSPHERE.clone(), QuantityKind::PRESSURE)?;
    system.add_unit(BAR.clone());
    system.add_unit(MILLIMETRE_OF_MERCURY.clone());
    system.add_unit(INCH_OF_MERCURY.clone());
    system.add_unit_for_kind(RAD.clone(), QuantityKind::RADIATION_DOSE_ABSORBED)?;
    system.add_unit_for_kind(REM.clone(), QuantityKind::RADIATION_DOSE_EFFECTIVE)?;
    system.add_unit_for_kind(CURIE.clone(), QuantityKind::RADIOACTIVITY)?;
    system.add_unit(RUTHERFORD.clone());
    system.add_unit(SPHERE.clone());
    system.add_unit_for_kind(FRAMES_PER_SECOND.clone(), QuantityKind::FRAME_RATE)?;
    system.add_unit_for_kind(ROENTGEN.clone(), QuantityKind::IONIZING_RADIATION)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use metra::{Number, Quantity};

    #[test]
    fn the_system_has_36_units() {
        assert_eq!(NON_SI.len(), 36);
        assert_eq!(NON_SI.name(), "Non-SI Units");
    }

    #[test]
    fn degree_converts_to_radians_at_high_precision() {
        let converter = DEGREE.converter_to(&RADIAN).unwrap();
        let one_degree = converter.convert(&Number::one()).unwrap();
        // pi / 180 to well past double precision
        assert!(one_degree
            .as_decimal(45)
            .starts_with("0.0174532925199432957692369076848861271344287"));

        let inverse = RADIAN.converter_to(&DEGREE).unwrap();
        let one_radian = inverse.convert(&Number::one()).unwrap();
        assert!(one_radian
            .as_decimal(30)
            .starts_with("57.295779513082320876798154814"));
    }

    #[test]
    fn angle_minutes_compose_from_degree() {
        let converter = DEGREE.converter_to(&MINUTE_ANGLE).unwrap();
        let minutes = converter.convert(&Number::one()).unwrap();
        assert_eq!(minutes, Number::from_i64(60));
        let seconds = MINUTE_ANGLE
            .converter_to(&SECOND_ANGLE)
            .unwrap()
            .convert(&Number::one())
            .unwrap();
        assert_eq!(seconds, Number::from_i64(60));
    }

    #[test]
    fn revolution_is_two_pi_radians() {
        let radians = REVOLUTION
            .converter_to(&RADIAN)
            .unwrap()
            .convert(&Number::one())
            .unwrap();
        assert!(radians.as_decimal(12).starts_with("6.2831853071"));
    }

    #[test]
    fn julian_year_is_exact() {
        let quantity = Quantity::new(Number::one(), YEAR_JULIAN.clone());
        assert_eq!(
            quantity.to(&SECOND).unwrap().value(),
            &Number::from_i64(31_557_600)
        );
    }

    #[test]
    fn decibel_is_a_tenth_of_the_bel() {
        assert_eq!(
            *DECIBEL,
            Unit::one().transform(
                UnitConverter::rational(1, 10).concatenate(&UnitConverter::log(10.0).invert())
            )
        );
    }

    #[test]
    fn bel_delogs_its_values() {
        let converter = BEL.converter_to(&Unit::one()).unwrap();
        let ratio = converter.convert(&Number::from_i64(2)).unwrap();
        let text = ratio.as_decimal(6);
        assert!(
            text.starts_with("100.000") || text.starts_with("99.999"),
            "2 B should be close to a ratio of 100, got {text}"
        );
    }

    #[test]
    fn sphere_is_four_pi_steradians() {
        assert_eq!(
            *SPHERE,
            STERADIAN.transform(
                UnitConverter::rational(4, 1).concatenate(&UnitConverter::pi_power(1))
            )
        );
        let steradians = SPHERE
            .converter_to(&STERADIAN)
            .unwrap()
            .convert(&Number::one())
            .unwrap();
        assert!(steradians.as_decimal(12).starts_with("12.566370614359"));
    }

    #[test]
    fn pressure_units_scale_the_pascal() {
        let atmosphere = Quantity::new(Number::one(), ATMOSPHERE.clone());
        assert_eq!(
            atmosphere.to(&PASCAL).unwrap().value(),
            &Number::from_i64(101_325)
        );
        let bar = Quantity::new(Number::one(), BAR.clone());
        assert_eq!(
            bar.to(&PASCAL).unwrap().value(),
            &Number::from_i64(100_000)
        );
    }

    #[test]
    fn legacy_constants_differ_from_the_2019_values() {
        assert_ne!(*ELECTRON_VOLT, *crate::si::ELECTRON_VOLT);
        assert_ne!(*UNIFIED_ATOMIC_MASS, *crate::si::UNIFIED_ATOMIC_MASS);
    }

    #[test]
    fn shared_units_register_once() {
        let tonnes: Vec<&Unit> = NON_SI
            .units()
            .iter()
            .filter(|unit| *unit == &*crate::si::TONNE)
            .collect();
        assert_eq!(tonnes.len(), 1);
    }

    #[test]
    fn rankine_scales_kelvin() {
        let converter = RANKINE.converter_to(&KELVIN).unwrap();
        assert_eq!(converter, UnitConverter::rational(5, 9));
    }

    #[test]
    fn frames_per_second_is_a_reciprocal_second() {
        assert_eq!(*FRAMES_PER_SECOND, SECOND.pow(-1));
        assert_eq!(
            NON_SI.unit_for_kind(&QuantityKind::FRAME_RATE),
            Some(&*FRAMES_PER_SECOND)
        );
    }
}
