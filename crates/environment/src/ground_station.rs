//! Ground stations fixed on a body's surface.

use std::f64::consts::{FRAC_PI_2, PI};

use astro_core::vector::Vector3;
use astro_core::{ConfigurationError, validate};

/// Where a station sits in the body-fixed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StationPosition {
    /// Body-fixed Cartesian position (m).
    Cartesian(Vector3),
    /// Altitude (m) above the body shape, latitude and longitude (rad).
    /// Converting it to a position needs the body's shape model.
    Geodetic {
        altitude: f64,
        latitude: f64,
        longitude: f64,
    },
}

impl StationPosition {
    pub fn cartesian(position: Vector3) -> Result<Self, ConfigurationError> {
        if position.iter().any(|x| !x.is_finite()) {
            return Err(ConfigurationError::NonFinite {
                quantity: "ground station position",
            });
        }
        Ok(Self::Cartesian(position))
    }

    pub fn geodetic(altitude: f64, latitude: f64, longitude: f64) -> Result<Self, ConfigurationError> {
        Ok(Self::Geodetic {
            altitude: validate::finite("ground station altitude", altitude)?,
            latitude: validate::in_range("ground station latitude", latitude, -FRAC_PI_2, FRAC_PI_2)?,
            longitude: validate::in_range("ground station longitude", longitude, -PI, 2.0 * PI)?,
        })
    }

    pub fn needs_shape_model(&self) -> bool {
        matches!(self, Self::Geodetic { .. })
    }

    fn check(&self) -> Result<(), ConfigurationError> {
        match *self {
            Self::Cartesian(position) => Self::cartesian(position).map(drop),
            Self::Geodetic {
                altitude,
                latitude,
                longitude,
            } => Self::geodetic(altitude, latitude, longitude).map(drop),
        }
    }
}

/// Named station attached to a body.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundStationSettings {
    name: String,
    position: StationPosition,
}

impl GroundStationSettings {
    pub fn new(name: impl Into<String>, position: StationPosition) -> Result<Self, ConfigurationError> {
        let name = name.into();
        validate::name("ground station name", &name)?;
        position.check()?;
        Ok(Self { name, position })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &StationPosition {
        &self.position
    }
}
