//! Default settings for the Sun, the planets, and the Moon.

use astro_core::constants::SOLAR_LUMINOSITY;
use astro_core::units::rotation_rate_from_period_hours;
use astro_core::ConfigurationError;
use nalgebra::UnitQuaternion;
use tracing::info;

use crate::atmosphere::AtmosphereSettings;
use crate::body::BodySettings;
use crate::ephemeris::EphemerisSettings;
use crate::gravity::GravityFieldSettings;
use crate::radiation::{LuminositySettings, RadiationSourceSettings};
use crate::registry::BodyListSettings;
use crate::rotation::RotationModelSettings;
use crate::shape::BodyShapeSettings;

/// Exponential atmosphere parameters: scale height (m), temperature (K),
/// surface density (kg/m³), specific gas constant (J/(kg K)).
#[derive(Debug, Clone, Copy)]
pub struct ExponentialAtmosphereData {
    pub scale_height: f64,
    pub temperature: f64,
    pub surface_density: f64,
    pub gas_constant: f64,
}

/// Physical data used to build default settings for one body.
#[derive(Debug, Clone, Copy)]
pub struct BodyData {
    pub name: &'static str,
    pub gravitational_parameter: f64,
    pub mean_radius: f64,
    /// Sidereal rotation period in hours; negative for retrograde rotation.
    pub rotation_period_hours: f64,
    pub atmosphere: Option<ExponentialAtmosphereData>,
}

pub const BODY_CATALOG: &[BodyData] = &[
    BodyData {
        name: "Sun",
        gravitational_parameter: 1.327_124_400_18e20,
        mean_radius: 6.957e8,
        rotation_period_hours: 609.12,
        atmosphere: None,
    },
    BodyData {
        name: "Mercury",
        gravitational_parameter: 2.203_2e13,
        mean_radius: 2.439_7e6,
        rotation_period_hours: 1_407.6,
        atmosphere: None,
    },
    BodyData {
        name: "Venus",
        gravitational_parameter: 3.248_59e14,
        mean_radius: 6.051_8e6,
        rotation_period_hours: -5_832.6,
        atmosphere: None,
    },
    BodyData {
        name: "Earth",
        gravitational_parameter: 3.986_004_418e14,
        mean_radius: 6.371e6,
        rotation_period_hours: 23.934_5,
        atmosphere: Some(ExponentialAtmosphereData {
            scale_height: 7_200.0,
            temperature: 246.0,
            surface_density: 1.225,
            gas_constant: 287.0,
        }),
    },
    BodyData {
        name: "Moon",
        gravitational_parameter: 4.902_800_1e12,
        mean_radius: 1.737_4e6,
        rotation_period_hours: 655.72,
        atmosphere: None,
    },
    BodyData {
        name: "Mars",
        gravitational_parameter: 4.282_837e13,
        mean_radius: 3.389_5e6,
        rotation_period_hours: 24.622_9,
        atmosphere: Some(ExponentialAtmosphereData {
            scale_height: 11_100.0,
            temperature: 210.0,
            surface_density: 0.020,
            gas_constant: 191.8,
        }),
    },
    BodyData {
        name: "Jupiter",
        gravitational_parameter: 1.266_865_34e17,
        mean_radius: 6.991_1e7,
        rotation_period_hours: 9.925,
        atmosphere: None,
    },
    BodyData {
        name: "Saturn",
        gravitational_parameter: 3.793_118_7e16,
        mean_radius: 5.823_2e7,
        rotation_period_hours: 10.656,
        atmosphere: None,
    },
    BodyData {
        name: "Uranus",
        gravitational_parameter: 5.793_939e15,
        mean_radius: 2.536_2e7,
        rotation_period_hours: -17.24,
        atmosphere: None,
    },
    BodyData {
        name: "Neptune",
        gravitational_parameter: 6.836_529e15,
        mean_radius: 2.462_2e7,
        rotation_period_hours: 16.11,
        atmosphere: None,
    },
];

/// Catalog lookup, case-insensitive.
pub fn body_data(name: &str) -> Option<&'static BodyData> {
    BODY_CATALOG
        .iter()
        .find(|data| data.name.eq_ignore_ascii_case(name))
}

/// Default settings for one catalogued body, expressed relative to the global frame.
pub fn default_settings_for(
    data: &BodyData,
    frame_origin: &str,
    frame_orientation: &str,
) -> Result<BodySettings, ConfigurationError> {
    let mut body = BodySettings::new();
    body.set_gravity_field(GravityFieldSettings::central(data.gravitational_parameter)?);
    body.set_ephemeris(EphemerisSettings::direct_spice(frame_origin, frame_orientation)?);
    body.set_rotation_model(RotationModelSettings::simple(
        frame_orientation,
        format!("IAU_{}", data.name),
        UnitQuaternion::identity(),
        0.0,
        rotation_rate_from_period_hours(data.rotation_period_hours),
    )?);
    body.set_shape_model(BodyShapeSettings::spherical(data.mean_radius)?);
    if let Some(atmosphere) = data.atmosphere {
        body.set_atmosphere(AtmosphereSettings::exponential(
            atmosphere.scale_height,
            atmosphere.temperature,
            atmosphere.surface_density,
            atmosphere.gas_constant,
        )?);
    }
    if data.name == "Sun" {
        body.set_radiation_source(RadiationSourceSettings::isotropic_point_source(
            LuminositySettings::constant(SOLAR_LUMINOSITY)?,
        ));
    }
    Ok(body)
}

/// Registry holding default settings for each named body, in the order given.
pub fn default_body_settings<S: AsRef<str>>(
    names: &[S],
    frame_origin: &str,
    frame_orientation: &str,
) -> Result<BodyListSettings, ConfigurationError> {
    let mut bodies = BodyListSettings::new(frame_origin, frame_orientation)?;
    for name in names {
        let name = name.as_ref();
        let data = body_data(name).ok_or_else(|| ConfigurationError::UnknownBody {
            name: name.to_string(),
            context: "the default body catalog".to_string(),
        })?;
        bodies.insert(
            data.name,
            default_settings_for(data, frame_origin, frame_orientation)?,
        )?;
    }
    info!(bodies = bodies.len(), "created default body settings");
    Ok(bodies)
}
