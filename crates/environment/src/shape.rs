//! Body shape settings.

use astro_core::{ConfigurationError, validate};

#[derive(Debug, Clone, PartialEq)]
pub enum BodyShapeSettings {
    Spherical { radius: f64 },
    /// Mean radius read from the planetary constants kernel.
    SphericalSpice,
    OblateSpheroid {
        equatorial_radius: f64,
        flattening: f64,
    },
}

impl BodyShapeSettings {
    pub fn spherical(radius: f64) -> Result<Self, ConfigurationError> {
        Ok(Self::Spherical {
            radius: validate::positive("shape radius", radius)?,
        })
    }

    pub fn oblate_spheroid(
        equatorial_radius: f64,
        flattening: f64,
    ) -> Result<Self, ConfigurationError> {
        validate::positive("equatorial radius", equatorial_radius)?;
        validate::non_negative("flattening", flattening)?;
        if flattening >= 1.0 {
            return Err(ConfigurationError::OutOfRange {
                quantity: "flattening",
                value: flattening,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(Self::OblateSpheroid {
            equatorial_radius,
            flattening,
        })
    }

    /// Re-run the constructor checks on a value that may have been built directly.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Spherical { radius } => Self::spherical(*radius).map(drop),
            Self::SphericalSpice => Ok(()),
            Self::OblateSpheroid {
                equatorial_radius,
                flattening,
            } => Self::oblate_spheroid(*equatorial_radius, *flattening).map(drop),
        }
    }

    /// Radius used for altitude computations when known without kernels.
    pub fn average_radius(&self) -> Option<f64> {
        match self {
            Self::Spherical { radius } => Some(*radius),
            Self::SphericalSpice => None,
            Self::OblateSpheroid {
                equatorial_radius,
                flattening,
            } => Some(equatorial_radius * (1.0 - flattening / 3.0)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Spherical { .. } => "spherical",
            Self::SphericalSpice => "spherical_spice",
            Self::OblateSpheroid { .. } => "oblate_spheroid",
        }
    }
}
