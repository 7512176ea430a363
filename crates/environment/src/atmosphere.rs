//! Atmosphere and wind model settings.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use astro_core::vector::Vector3;
use astro_core::{ConfigurationError, validate};

/// Density callback: `(altitude_m, longitude_rad, latitude_rad, time_s) -> kg/m³`.
pub type DensityFn = dyn Fn(f64, f64, f64, f64) -> f64 + Send + Sync;

/// Shared handle to a user supplied density function.
#[derive(Clone)]
pub struct DensityFunction(Arc<DensityFn>);

impl DensityFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64, f64, f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn density(&self, altitude: f64, longitude: f64, latitude: f64, time: f64) -> f64 {
        (self.0)(altitude, longitude, latitude, time)
    }
}

impl fmt::Debug for DensityFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DensityFunction(..)")
    }
}

/// Independent variables a tabulated atmosphere may be indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmosphereIndependentVariable {
    Altitude,
    Longitude,
    Latitude,
    Time,
}

/// Quantities a tabulated atmosphere file may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmosphereDependentVariable {
    Density,
    Pressure,
    Temperature,
    GasConstant,
    SpecificHeatRatio,
}

/// Atmosphere model attached to a body.
#[derive(Debug, Clone)]
pub enum AtmosphereSettings {
    /// Isothermal exponential atmosphere.
    Exponential {
        scale_height: f64,
        constant_temperature: f64,
        density_at_zero_altitude: f64,
        specific_gas_constant: f64,
        ratio_of_specific_heats: f64,
    },
    /// Atmosphere read from a table on disk at body creation time.
    Tabulated {
        file: PathBuf,
        independent_variables: Vec<AtmosphereIndependentVariable>,
        dependent_variables: Vec<AtmosphereDependentVariable>,
    },
    /// NRLMSISE-00 driven by a space-weather file.
    Nrlmsise00 { space_weather_file: PathBuf },
    /// Density-only model evaluated by a user callback.
    Custom { density_function: DensityFunction },
    /// Another atmosphere with its density multiplied by a constant factor.
    Scaled {
        base: Box<AtmosphereSettings>,
        scaling_factor: f64,
    },
}

impl AtmosphereSettings {
    pub const DEFAULT_RATIO_OF_SPECIFIC_HEATS: f64 = 1.4;

    /// Exponential atmosphere with the default ratio of specific heats.
    pub fn exponential(
        scale_height: f64,
        constant_temperature: f64,
        density_at_zero_altitude: f64,
        specific_gas_constant: f64,
    ) -> Result<Self, ConfigurationError> {
        Self::exponential_with_heat_ratio(
            scale_height,
            constant_temperature,
            density_at_zero_altitude,
            specific_gas_constant,
            Self::DEFAULT_RATIO_OF_SPECIFIC_HEATS,
        )
    }

    pub fn exponential_with_heat_ratio(
        scale_height: f64,
        constant_temperature: f64,
        density_at_zero_altitude: f64,
        specific_gas_constant: f64,
        ratio_of_specific_heats: f64,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::Exponential {
            scale_height: validate::positive("scale height", scale_height)?,
            constant_temperature: validate::positive("temperature", constant_temperature)?,
            density_at_zero_altitude: validate::positive(
                "density at zero altitude",
                density_at_zero_altitude,
            )?,
            specific_gas_constant: validate::positive(
                "specific gas constant",
                specific_gas_constant,
            )?,
            ratio_of_specific_heats: validate::positive(
                "ratio of specific heats",
                ratio_of_specific_heats,
            )?,
        })
    }

    pub fn tabulated(
        file: impl Into<PathBuf>,
        independent_variables: Vec<AtmosphereIndependentVariable>,
        dependent_variables: Vec<AtmosphereDependentVariable>,
    ) -> Result<Self, ConfigurationError> {
        let file = file.into();
        if file.as_os_str().is_empty() {
            return Err(ConfigurationError::EmptyName {
                what: "tabulated atmosphere file",
            });
        }
        if independent_variables.is_empty() {
            return Err(ConfigurationError::EmptyList {
                what: "tabulated atmosphere independent variables".to_string(),
            });
        }
        if !dependent_variables.contains(&AtmosphereDependentVariable::Density) {
            return Err(ConfigurationError::invalid(
                "tabulated atmosphere must provide density",
            ));
        }
        Ok(Self::Tabulated {
            file,
            independent_variables,
            dependent_variables,
        })
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64, f64, f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom {
            density_function: DensityFunction::new(f),
        }
    }

    /// Wrap `base` so that its density is multiplied by `scaling_factor`.
    pub fn scaled(base: AtmosphereSettings, scaling_factor: f64) -> Result<Self, ConfigurationError> {
        validate::positive("atmosphere scaling factor", scaling_factor)?;
        Ok(Self::Scaled {
            base: Box::new(base),
            scaling_factor,
        })
    }

    /// Re-run the constructor checks on a value that may have been built directly.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Exponential {
                scale_height,
                constant_temperature,
                density_at_zero_altitude,
                specific_gas_constant,
                ratio_of_specific_heats,
            } => Self::exponential_with_heat_ratio(
                *scale_height,
                *constant_temperature,
                *density_at_zero_altitude,
                *specific_gas_constant,
                *ratio_of_specific_heats,
            )
            .map(drop),
            Self::Tabulated {
                file,
                independent_variables,
                dependent_variables,
            } => Self::tabulated(
                file.clone(),
                independent_variables.clone(),
                dependent_variables.clone(),
            )
            .map(drop),
            Self::Nrlmsise00 { space_weather_file } => {
                if space_weather_file.as_os_str().is_empty() {
                    Err(ConfigurationError::EmptyName {
                        what: "space weather file",
                    })
                } else {
                    Ok(())
                }
            }
            Self::Custom { .. } => Ok(()),
            Self::Scaled {
                base,
                scaling_factor,
            } => {
                validate::positive("atmosphere scaling factor", *scaling_factor)?;
                base.check()
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Exponential { .. } => "exponential",
            Self::Tabulated { .. } => "tabulated",
            Self::Nrlmsise00 { .. } => "nrlmsise00",
            Self::Custom { .. } => "custom",
            Self::Scaled { .. } => "scaled",
        }
    }
}

/// Wind model layered on top of an atmosphere.
#[derive(Debug, Clone, PartialEq)]
pub enum WindModelSettings {
    /// Constant wind velocity (m/s) expressed in the named frame.
    Constant { velocity: Vector3, frame: String },
    /// Atmosphere co-rotates with the body (zero wind in the body-fixed frame).
    CoRotating,
}

impl WindModelSettings {
    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Constant { velocity, frame } => {
                if velocity.iter().any(|v| !v.is_finite()) {
                    return Err(ConfigurationError::NonFinite {
                        quantity: "wind velocity",
                    });
                }
                validate::name("wind frame", frame)
            }
            Self::CoRotating => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_fields_read_back_unchanged() {
        let atmosphere = AtmosphereSettings::exponential(7_200.0, 290.0, 1.225, 287.06).unwrap();
        match atmosphere {
            AtmosphereSettings::Exponential {
                scale_height,
                constant_temperature,
                density_at_zero_altitude,
                specific_gas_constant,
                ratio_of_specific_heats,
            } => {
                assert_eq!(scale_height, 7_200.0);
                assert_eq!(constant_temperature, 290.0);
                assert_eq!(density_at_zero_altitude, 1.225);
                assert_eq!(specific_gas_constant, 287.06);
                assert_eq!(ratio_of_specific_heats, 1.4);
            }
            other => panic!("unexpected atmosphere {other:?}"),
        }
    }

    #[test]
    fn exponential_rejects_negative_scale_height() {
        let err = AtmosphereSettings::exponential(-7_200.0, 290.0, 1.225, 287.06).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonPositive {
                quantity: "scale height",
                ..
            }
        ));
    }

    #[test]
    fn tabulated_requires_density_column() {
        let result = AtmosphereSettings::tabulated(
            "mars_table.dat",
            vec![AtmosphereIndependentVariable::Altitude],
            vec![AtmosphereDependentVariable::Pressure],
        );
        assert!(result.is_err());
    }

    #[test]
    fn scaled_atmosphere_wraps_its_base() {
        let base = AtmosphereSettings::exponential(7_200.0, 290.0, 1.225, 287.06).unwrap();
        assert!(AtmosphereSettings::scaled(base.clone(), 0.0).is_err());
        let scaled = AtmosphereSettings::scaled(base, 1.5).unwrap();
        assert_eq!(scaled.label(), "scaled");
        match &scaled {
            AtmosphereSettings::Scaled {
                base,
                scaling_factor,
            } => {
                assert_eq!(*scaling_factor, 1.5);
                assert_eq!(base.label(), "exponential");
            }
            other => panic!("unexpected atmosphere {other:?}"),
        }
        assert!(scaled.check().is_ok());
    }

    #[test]
    fn check_catches_directly_built_values() {
        let broken = AtmosphereSettings::Scaled {
            base: Box::new(AtmosphereSettings::Exponential {
                scale_height: -1.0,
                constant_temperature: 290.0,
                density_at_zero_altitude: 1.225,
                specific_gas_constant: 287.06,
                ratio_of_specific_heats: 1.4,
            }),
            scaling_factor: 2.0,
        };
        assert!(matches!(
            broken.check(),
            Err(ConfigurationError::NonPositive {
                quantity: "scale height",
                ..
            })
        ));
    }

    #[test]
    fn custom_density_function_is_shared() {
        let atmosphere = AtmosphereSettings::custom(|h, _, _, _| 1.2 * (-h / 8_000.0).exp());
        let copy = atmosphere.clone();
        if let AtmosphereSettings::Custom { density_function } = copy {
            assert!((density_function.density(0.0, 0.0, 0.0, 0.0) - 1.2).abs() < 1e-12);
        } else {
            panic!("expected custom atmosphere");
        }
        assert_eq!(atmosphere.label(), "custom");
    }
}
