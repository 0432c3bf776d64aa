//! Named kinds of physical quantity
//!
//! A kind pairs a name with an optional dimension. Kinds with a
//! dimension are checked: asking for a unit of that kind verifies the
//! unit's dimension. Kinds without one are open vocabulary, useful for
//! quantities like density or luminance whose dimension the caller
//! does not want enforced.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// A named kind of quantity, optionally tied to a dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantityKind {
    name: Cow<'static, str>,
    dimension: Option<Dimension>,
}

macro_rules! checked_kind {
    ($(#[$doc:meta])* $konst:ident, $name:literal, $dim:expr) => {
        $(#[$doc])*
        pub const $konst: QuantityKind = QuantityKind {
            name: Cow::Borrowed($name),
            dimension: Some($dim),
        };
    };
}

macro_rules! open_kind {
    ($(#[$doc:meta])* $konst:ident, $name:literal) => {
        $(#[$doc])*
        pub const $konst: QuantityKind = QuantityKind {
            name: Cow::Borrowed($name),
            dimension: None,
        };
    };
}

impl QuantityKind {
    checked_kind!(DIMENSIONLESS, "Dimensionless", Dimension::NONE);
    checked_kind!(ANGLE, "Angle", Dimension::NONE);
    checked_kind!(SOLID_ANGLE, "SolidAngle", Dimension::NONE);
    checked_kind!(INFORMATION, "Information", Dimension::NONE);
    checked_kind!(LENGTH, "Length", Dimension::LENGTH);
    checked_kind!(MASS, "Mass", Dimension::MASS);
    checked_kind!(DURATION, "Duration", Dimension::TIME);
    checked_kind!(ELECTRIC_CURRENT, "ElectricCurrent", Dimension::ELECTRIC_CURRENT);
    checked_kind!(TEMPERATURE, "Temperature", Dimension::TEMPERATURE);
    checked_kind!(AMOUNT_OF_SUBSTANCE, "AmountOfSubstance", Dimension::AMOUNT_OF_SUBSTANCE);
    checked_kind!(LUMINOUS_INTENSITY, "LuminousIntensity", Dimension::LUMINOUS_INTENSITY);
    checked_kind!(
        FREQUENCY,
        "Frequency",
        Dimension::new([0, 0, -1, 0, 0, 0, 0])
    );
    checked_kind!(AREA, "Area", Dimension::new([2, 0, 0, 0, 0, 0, 0]));
    checked_kind!(VOLUME, "Volume", Dimension::new([3, 0, 0, 0, 0, 0, 0]));
    checked_kind!(SPEED, "Speed", Dimension::new([1, 0, -1, 0, 0, 0, 0]));
    checked_kind!(
        ACCELERATION,
        "Acceleration",
        Dimension::new([1, 0, -2, 0, 0, 0, 0])
    );
    checked_kind!(FORCE, "Force", Dimension::new([1, 1, -2, 0, 0, 0, 0]));
    checked_kind!(PRESSURE, "Pressure", Dimension::new([-1, 1, -2, 0, 0, 0, 0]));
    checked_kind!(ENERGY, "Energy", Dimension::new([2, 1, -2, 0, 0, 0, 0]));
    checked_kind!(POWER, "Power", Dimension::new([2, 1, -3, 0, 0, 0, 0]));
    checked_kind!(
        ELECTRIC_CHARGE,
        "ElectricCharge",
        Dimension::new([0, 0, 1, 1, 0, 0, 0])
    );
    checked_kind!(
        ELECTRIC_POTENTIAL,
        "ElectricPotential",
        Dimension::new([2, 1, -3, -1, 0, 0, 0])
    );
    checked_kind!(
        ELECTRIC_CAPACITANCE,
        "ElectricCapacitance",
        Dimension::new([-2, -1, 4, 2, 0, 0, 0])
    );
    checked_kind!(
        ELECTRIC_RESISTANCE,
        "ElectricResistance",
        Dimension::new([2, 1, -3, -2, 0, 0, 0])
    );
    checked_kind!(
        ELECTRIC_CONDUCTANCE,
        "ElectricConductance",
        Dimension::new([-2, -1, 3, 2, 0, 0, 0])
    );
    checked_kind!(
        MAGNETIC_FLUX,
        "MagneticFlux",
        Dimension::new([2, 1, -2, -1, 0, 0, 0])
    );
    checked_kind!(
        MAGNETIC_FLUX_DENSITY,
        "MagneticFluxDensity",
        Dimension::new([0, 1, -2, -1, 0, 0, 0])
    );
    checked_kind!(
        ELECTRIC_INDUCTANCE,
        "ElectricInductance",
        Dimension::new([2, 1, -2, -2, 0, 0, 0])
    );
    checked_kind!(
        LUMINOUS_FLUX,
        "LuminousFlux",
        Dimension::new([0, 0, 0, 0, 0, 0, 1])
    );
    checked_kind!(
        ILLUMINANCE,
        "Illuminance",
        Dimension::new([-2, 0, 0, 0, 0, 0, 1])
    );
    checked_kind!(
        RADIOACTIVITY,
        "Radioactivity",
        Dimension::new([0, 0, -1, 0, 0, 0, 0])
    );
    checked_kind!(
        RADIATION_DOSE_ABSORBED,
        "RadiationDoseAbsorbed",
        Dimension::new([2, 0, -2, 0, 0, 0, 0])
    );
    checked_kind!(
        RADIATION_DOSE_EFFECTIVE,
        "RadiationDoseEffective",
        Dimension::new([2, 0, -2, 0, 0, 0, 0])
    );
    checked_kind!(
        CATALYTIC_ACTIVITY,
        "CatalyticActivity",
        Dimension::new([0, 0, -1, 0, 0, 1, 0])
    );
    checked_kind!(
        DYNAMIC_VISCOSITY,
        "DynamicViscosity",
        Dimension::new([-1, 1, -1, 0, 0, 0, 0])
    );
    checked_kind!(
        KINEMATIC_VISCOSITY,
        "KinematicViscosity",
        Dimension::new([2, 0, -1, 0, 0, 0, 0])
    );

    open_kind!(DENSITY, "Density");
    open_kind!(LUMINANCE, "Luminance");
    open_kind!(ACTION, "Action");
    open_kind!(MAGNETOMOTIVE_FORCE, "MagnetomotiveForce");
    open_kind!(MAGNETIC_FIELD_STRENGTH, "MagneticFieldStrength");
    open_kind!(IONIZING_RADIATION, "IonizingRadiation");
    open_kind!(RADIANT_INTENSITY, "RadiantIntensity");
    open_kind!(RADIANCE, "Radiance");
    open_kind!(WAVENUMBER, "Wavenumber");
    open_kind!(PERMITTIVITY, "Permittivity");
    open_kind!(FRAME_RATE, "FrameRate");

    /// Creates an open kind with no dimension constraint
    pub fn custom(name: &str) -> QuantityKind {
        QuantityKind {
            name: Cow::Owned(name.to_string()),
            dimension: None,
        }
    }

    /// Creates a checked kind tied to a dimension
    pub fn checked(name: &str, dimension: Dimension) -> QuantityKind {
        QuantityKind {
            name: Cow::Owned(name.to_string()),
            dimension: Some(dimension),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dimension this kind enforces, if any
    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }
}

impl std::fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_kinds_carry_dimensions() {
        assert_eq!(QuantityKind::LENGTH.dimension(), Some(Dimension::LENGTH));
        assert_eq!(QuantityKind::ANGLE.dimension(), Some(Dimension::NONE));
        assert_eq!(
            QuantityKind::SPEED.dimension(),
            Some(Dimension::LENGTH.divide(&Dimension::TIME))
        );
        let energy = Dimension::MASS
            .multiply(&Dimension::LENGTH.pow(2))
            .divide(&Dimension::TIME.pow(2));
        assert_eq!(QuantityKind::ENERGY.dimension(), Some(energy));
    }

    #[test]
    fn open_kinds_have_no_dimension() {
        assert_eq!(QuantityKind::DENSITY.dimension(), None);
        assert_eq!(QuantityKind::LUMINANCE.dimension(), None);
        assert_eq!(QuantityKind::custom("Vorticity").dimension(), None);
    }

    #[test]
    fn kinds_compare_by_name_and_dimension() {
        assert_eq!(QuantityKind::LENGTH, QuantityKind::LENGTH);
        assert_ne!(QuantityKind::LENGTH, QuantityKind::MASS);
        // Same zero dimension, different names
        assert_ne!(QuantityKind::ANGLE, QuantityKind::DIMENSIONLESS);
        assert_eq!(
            QuantityKind::custom("Density"),
            QuantityKind::DENSITY
        );
    }

    #[test]
    fn radioactivity_and_frequency_share_a_dimension() {
        assert_eq!(
            QuantityKind::RADIOACTIVITY.dimension(),
            QuantityKind::FREQUENCY.dimension()
        );
        assert_ne!(QuantityKind::RADIOACTIVITY, QuantityKind::FREQUENCY);
    }

    #[test]
    fn display_is_the_name() {
        assert_eq!(QuantityKind::TEMPERATURE.to_string(), "Temperature");
        assert_eq!(QuantityKind::custom("SpectralFlux").to_string(), "SpectralFlux");
    }
}
