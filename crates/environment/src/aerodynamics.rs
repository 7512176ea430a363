//! Aerodynamic coefficient settings for vehicles flying through an atmosphere.

use astro_core::{ConfigurationError, validate};

#[derive(Debug, Clone, PartialEq)]
pub enum AerodynamicCoefficientSettings {
    /// Constant drag, side-force, and lift coefficients in the aerodynamic frame.
    Constant {
        reference_area: f64,
        drag_coefficient: f64,
        side_force_coefficient: f64,
        lift_coefficient: f64,
    },
}

impl AerodynamicCoefficientSettings {
    pub fn constant(
        reference_area: f64,
        drag_coefficient: f64,
        side_force_coefficient: f64,
        lift_coefficient: f64,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::Constant {
            reference_area: validate::positive("aerodynamic reference area", reference_area)?,
            drag_coefficient: validate::non_negative("drag coefficient", drag_coefficient)?,
            side_force_coefficient: validate::finite(
                "side force coefficient",
                side_force_coefficient,
            )?,
            lift_coefficient: validate::finite("lift coefficient", lift_coefficient)?,
        })
    }

    /// Drag-only coefficients.
    pub fn drag_only(reference_area: f64, drag_coefficient: f64) -> Result<Self, ConfigurationError> {
        Self::constant(reference_area, drag_coefficient, 0.0, 0.0)
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Constant {
                reference_area,
                drag_coefficient,
                side_force_coefficient,
                lift_coefficient,
            } => Self::constant(
                *reference_area,
                *drag_coefficient,
                *side_force_coefficient,
                *lift_coefficient,
            )
            .map(drop),
        }
    }

    pub fn reference_area(&self) -> f64 {
        match self {
            Self::Constant { reference_area, .. } => *reference_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_drag_coefficient_is_rejected() {
        assert!(AerodynamicCoefficientSettings::drag_only(4.0, -1.2).is_err());
        assert!(AerodynamicCoefficientSettings::drag_only(-4.0, 1.2).is_err());
        let coefficients = AerodynamicCoefficientSettings::drag_only(4.0, 1.2).unwrap();
        assert_eq!(coefficients.reference_area(), 4.0);
    }
}
