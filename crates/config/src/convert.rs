//! Conversion of manifest records into validated settings.

use std::collections::BTreeMap;

use astro_accelerations::{
    AccelerationSettings, SelectedAccelerationMap, ThrustDirectionSettings, ThrustSettings,
};
use astro_core::ConfigurationError;
use astro_core::units::deg_to_rad;
use astro_environment::atmosphere::{AtmosphereDependentVariable, AtmosphereIndependentVariable};
use astro_environment::ephemeris::TableEpoch;
use astro_environment::rotation::quaternion_from_components;
use astro_environment::{
    AerodynamicCoefficientSettings, AtmosphereSettings, BodyListSettings, BodySettings,
    BodyShapeSettings, EphemerisSettings, GravityFieldSettings, GroundStationSettings,
    IauConventions, LuminositySettings, OccultingBodies, PanelNormal,
    PanelRadiosityModelSettings, PanelSettings, RadiationPressureInterfaceSettings,
    RadiationPressureTargetSettings, RadiationSourceSettings, RotationModelSettings,
    SphericalHarmonicsGravity, StationPosition, SurfacePropertyDistribution, WindModelSettings,
    default_body_settings,
};
use nalgebra::DMatrix;
use tracing::info;

use crate::{
    AccelerationConfig, AccelerationModelConfig, AerodynamicConfig, AtmosphereConfig,
    AtmosphereVariableConfig, BodyConfig, ConfigError, EphemerisConfig, EphemerisModelConfig,
    GravityFieldConfig, GroundStationConfig, IauConventionsConfig, OccultingConfig, PanelConfig,
    RadiationSourceConfig, RadiationTargetConfig, RadiosityModelConfig, RotationConfig,
    ScenarioConfig, ShapeConfig, StationPositionConfig, SurfaceModelConfig,
    SurfacePropertyConfig, ThrustDirectionConfig, WindConfig,
};

/// Global frame used to fill in frame names a manifest leaves out.
#[derive(Debug, Clone, Copy)]
pub struct FrameDefaults<'a> {
    pub origin: &'a str,
    pub orientation: &'a str,
}

impl ScenarioConfig {
    fn frames(&self) -> FrameDefaults<'_> {
        FrameDefaults {
            origin: self.frame_origin(),
            orientation: self.frame_orientation(),
        }
    }

    /// Build the body registry: default bodies first, then every manifest
    /// entry applied on top in order. Cross references are validated.
    pub fn build_bodies(&self) -> Result<BodyListSettings, ConfigError> {
        let mut bodies =
            default_body_settings(&self.default_bodies, self.frame_origin(), self.frame_orientation())?;
        for body in &self.bodies {
            let settings = bodies.add_empty(body.name.clone())?;
            body.apply_to(settings, self.frames())
                .map_err(|err| err.for_body(&body.name))?;
        }
        bodies.validate()?;
        info!(bodies = bodies.len(), "body settings assembled");
        Ok(bodies)
    }

    /// Build the selected acceleration map in manifest order.
    pub fn build_accelerations(&self) -> Result<SelectedAccelerationMap, ConfigError> {
        let mut selected = SelectedAccelerationMap::new();
        for entry in &self.accelerations {
            let models = entry.to_settings().map_err(|err| match err {
                ConfigError::Invalid(source) => ConfigError::Acceleration {
                    undergoing: entry.undergoing.clone(),
                    exerting: entry.exerting.clone(),
                    source,
                },
                other => other,
            })?;
            selected.extend(entry.undergoing.clone(), entry.exerting.clone(), models);
        }
        Ok(selected)
    }
}

impl ConfigError {
    fn for_body(self, body: &str) -> Self {
        match self {
            Self::Invalid(source) => Self::Body {
                body: body.to_string(),
                source,
            },
            other => other,
        }
    }
}

impl BodyConfig {
    /// Overwrite every model present in this entry on `settings`.
    pub fn apply_to(
        &self,
        settings: &mut BodySettings,
        frames: FrameDefaults<'_>,
    ) -> Result<(), ConfigError> {
        if let Some(mass) = self.mass_kg {
            settings.set_constant_mass(mass)?;
        }
        if let Some(gravity) = &self.gravity_field {
            settings.set_gravity_field(gravity.try_into()?);
        }
        if let Some(atmosphere) = &self.atmosphere {
            settings.set_atmosphere(atmosphere.try_into()?);
        }
        if let Some(wind) = &self.wind {
            settings.set_wind(wind.to_settings(frames)?);
        }
        if let Some(ephemeris) = &self.ephemeris {
            settings.set_ephemeris(ephemeris.to_settings(&self.name, frames)?);
        }
        if let Some(rotation) = &self.rotation_model {
            settings.set_rotation_model(rotation.to_settings(frames)?);
        }
        if let Some(shape) = &self.shape_model {
            settings.set_shape_model(shape.try_into()?);
        }
        if let Some(aero) = &self.aerodynamic_coefficients {
            settings.set_aerodynamic_coefficients(aero.try_into()?);
        }
        if let Some(source) = &self.radiation_source {
            settings.set_radiation_source(source.try_into()?);
        }
        if let Some(target) = &self.radiation_pressure_target {
            settings.set_radiation_pressure_target(target.try_into()?);
        }
        for interface in &self.radiation_pressure_interfaces {
            settings.set_radiation_pressure_interface(RadiationPressureInterfaceSettings::cannonball(
                interface.source_body.clone(),
                interface.reference_area,
                interface.radiation_pressure_coefficient,
                interface.occulting_bodies.clone(),
            )?);
        }
        for station in &self.ground_stations {
            settings.add_ground_station(station.try_into()?)?;
        }
        Ok(())
    }
}

impl TryFrom<&GroundStationConfig> for GroundStationSettings {
    type Error = ConfigError;

    fn try_from(value: &GroundStationConfig) -> Result<Self, Self::Error> {
        let position = match &value.position {
            StationPositionConfig::Cartesian { position } => StationPosition::cartesian(*position)?,
            StationPositionConfig::Geodetic {
                altitude,
                latitude_deg,
                longitude_deg,
            } => StationPosition::geodetic(
                *altitude,
                deg_to_rad(*latitude_deg),
                deg_to_rad(*longitude_deg),
            )?,
            StationPositionConfig::Unsupported => {
                return Err(ConfigError::Unsupported {
                    category: "ground station position",
                });
            }
        };
        Ok(GroundStationSettings::new(value.name.clone(), position)?)
    }
}

fn with_moment_of_inertia(
    field: SphericalHarmonicsGravity,
    scaled_mean_moment_of_inertia: Option<f64>,
) -> Result<SphericalHarmonicsGravity, ConfigurationError> {
    match scaled_mean_moment_of_inertia {
        Some(value) => field.with_scaled_mean_moment_of_inertia(value),
        None => Ok(field),
    }
}

fn matrix_from_rows(what: &'static str, rows: &[Vec<f64>]) -> Result<DMatrix<f64>, ConfigError> {
    let ncols = rows.first().map(Vec::len).unwrap_or(0);
    if let Some(bad) = rows.iter().find(|row| row.len() != ncols) {
        return Err(ConfigurationError::DimensionMismatch {
            what,
            expected: format!("{ncols} columns in every row"),
            found: format!("a row with {} columns", bad.len()),
        }
        .into());
    }
    Ok(DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}

impl TryFrom<&GravityFieldConfig> for GravityFieldSettings {
    type Error = ConfigError;

    fn try_from(value: &GravityFieldConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            GravityFieldConfig::Central {
                gravitational_parameter,
            } => GravityFieldSettings::central(*gravitational_parameter)?,
            GravityFieldConfig::CentralSpice => GravityFieldSettings::CentralSpice,
            GravityFieldConfig::SphericalHarmonics {
                gravitational_parameter,
                reference_radius,
                cosine_coefficients,
                sine_coefficients,
                associated_reference_frame,
                normalized,
                scaled_mean_moment_of_inertia,
            } => GravityFieldSettings::SphericalHarmonics(with_moment_of_inertia(
                SphericalHarmonicsGravity::new(
                    *gravitational_parameter,
                    *reference_radius,
                    matrix_from_rows("cosine coefficient rows", cosine_coefficients)?,
                    matrix_from_rows("sine coefficient rows", sine_coefficients)?,
                    associated_reference_frame.clone(),
                )?
                .with_normalization(*normalized),
                *scaled_mean_moment_of_inertia,
            )?),
            GravityFieldConfig::Zonal {
                gravitational_parameter,
                reference_radius,
                zonal_coefficients,
                associated_reference_frame,
                scaled_mean_moment_of_inertia,
            } => GravityFieldSettings::SphericalHarmonics(with_moment_of_inertia(
                SphericalHarmonicsGravity::from_zonal(
                    *gravitational_parameter,
                    *reference_radius,
                    zonal_coefficients,
                    associated_reference_frame.clone(),
                )?,
                *scaled_mean_moment_of_inertia,
            )?),
            GravityFieldConfig::Unsupported => {
                return Err(ConfigError::Unsupported {
                    category: "gravity field",
                });
            }
        })
    }
}

fn independent_variable(
    v: AtmosphereVariableConfig,
) -> Result<AtmosphereIndependentVariable, ConfigError> {
    Ok(match v {
        AtmosphereVariableConfig::Altitude => AtmosphereIndependentVariable::Altitude,
        AtmosphereVariableConfig::Longitude => AtmosphereIndependentVariable::Longitude,
        AtmosphereVariableConfig::Latitude => AtmosphereIndependentVariable::Latitude,
        AtmosphereVariableConfig::Time => AtmosphereIndependentVariable::Time,
        other => {
            return Err(ConfigurationError::invalid(format!(
                "{other:?} cannot index a tabulated atmosphere"
            ))
            .into());
        }
    })
}

fn dependent_variable(
    v: AtmosphereVariableConfig,
) -> Result<AtmosphereDependentVariable, ConfigError> {
    Ok(match v {
        AtmosphereVariableConfig::Density => AtmosphereDependentVariable::Density,
        AtmosphereVariableConfig::Pressure => AtmosphereDependentVariable::Pressure,
        AtmosphereVariableConfig::Temperature => AtmosphereDependentVariable::Temperature,
        AtmosphereVariableConfig::GasConstant => AtmosphereDependentVariable::GasConstant,
        AtmosphereVariableConfig::SpecificHeatRatio => {
            AtmosphereDependentVariable::SpecificHeatRatio
        }
        other => {
            return Err(ConfigurationError::invalid(format!(
                "{other:?} is not a tabulated atmosphere output"
            ))
            .into());
        }
    })
}

impl TryFrom<&AtmosphereConfig> for AtmosphereSettings {
    type Error = ConfigError;

    fn try_from(value: &AtmosphereConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            AtmosphereConfig::Exponential {
                scale_height,
                constant_temperature,
                density_at_zero_altitude,
                specific_gas_constant,
                ratio_of_specific_heats,
            } => AtmosphereSettings::exponential_with_heat_ratio(
                *scale_height,
                *constant_temperature,
                *density_at_zero_altitude,
                *specific_gas_constant,
                ratio_of_specific_heats.unwrap_or(AtmosphereSettings::DEFAULT_RATIO_OF_SPECIFIC_HEATS),
            )?,
            AtmosphereConfig::Tabulated {
                file,
                independent_variables,
                dependent_variables,
            } => AtmosphereSettings::tabulated(
                file.clone(),
                independent_variables
                    .iter()
                    .copied()
                    .map(independent_variable)
                    .collect::<Result<_, _>>()?,
                dependent_variables
                    .iter()
                    .copied()
                    .map(dependent_variable)
                    .collect::<Result<_, _>>()?,
            )?,
            AtmosphereConfig::Nrlmsise00 { space_weather_file } => AtmosphereSettings::Nrlmsise00 {
                space_weather_file: space_weather_file.clone(),
            },
            AtmosphereConfig::Scaled {
                base,
                scaling_factor,
            } => AtmosphereSettings::scaled(base.as_ref().try_into()?, *scaling_factor)?,
            AtmosphereConfig::Unsupported => {
                return Err(ConfigError::Unsupported {
                    category: "atmosphere",
                });
            }
        })
    }
}

impl WindConfig {
    fn to_settings(&self, frames: FrameDefaults<'_>) -> Result<WindModelSettings, ConfigError> {
        match self {
            WindConfig::Constant { velocity, frame } => {
                if velocity.iter().any(|v| !v.is_finite()) {
                    return Err(ConfigurationError::NonFinite {
                        quantity: "wind velocity",
                    }
                    .into());
                }
                Ok(WindModelSettings::Constant {
                    velocity: *velocity,
                    frame: frame.clone().unwrap_or_else(|| frames.orientation.to_string()),
                })
            }
            WindConfig::CoRotating => Ok(WindModelSettings::CoRotating),
            WindConfig::Unsupported => Err(ConfigError::Unsupported { category: "wind" }),
        }
    }
}

impl EphemerisConfig {
    fn to_settings(
        &self,
        body: &str,
        frames: FrameDefaults<'_>,
    ) -> Result<EphemerisSettings, ConfigError> {
        let origin = self.frame_origin.as_deref().unwrap_or(frames.origin);
        let orientation = self.frame_orientation.as_deref().unwrap_or(frames.orientation);
        ephemeris_settings(&self.model, body, origin, orientation)
    }
}

fn ephemeris_settings(
    model: &EphemerisModelConfig,
    body: &str,
    origin: &str,
    orientation: &str,
) -> Result<EphemerisSettings, ConfigError> {
    Ok(match model {
        EphemerisModelConfig::DirectSpice {
            correct_for_stellar_aberration,
            correct_for_light_time,
        } => EphemerisSettings::direct_spice(origin, orientation)?
            .with_spice_corrections(*correct_for_stellar_aberration, *correct_for_light_time),
        EphemerisModelConfig::InterpolatedSpice {
            initial_time,
            final_time,
            time_step,
            interpolation_order,
        } => EphemerisSettings::interpolated_spice(
            origin,
            orientation,
            *initial_time,
            *final_time,
            *time_step,
            *interpolation_order,
        )?,
        EphemerisModelConfig::ApproximateJplPlanet { body: planet } => {
            EphemerisSettings::approximate_jpl_planet(planet.as_deref().unwrap_or(body))?
        }
        EphemerisModelConfig::Constant { state } => {
            EphemerisSettings::constant(*state, origin, orientation)?
        }
        EphemerisModelConfig::Keplerian {
            initial_elements,
            epoch,
            central_body_gravitational_parameter,
        } => EphemerisSettings::keplerian(
            *initial_elements,
            *epoch,
            *central_body_gravitational_parameter,
            origin,
            orientation,
        )?,
        EphemerisModelConfig::Tabulated { states } => {
            let mut table = BTreeMap::new();
            for entry in states {
                if table.insert(TableEpoch(entry.epoch), entry.state).is_some() {
                    return Err(ConfigurationError::invalid(format!(
                        "tabulated ephemeris lists epoch {} twice",
                        entry.epoch
                    ))
                    .into());
                }
            }
            EphemerisSettings::tabulated(table, origin, orientation)?
        }
        EphemerisModelConfig::Scaled {
            base,
            scaling_factor,
        } => ephemeris_settings(base, body, origin, orientation)?.scaled(*scaling_factor)?,
        EphemerisModelConfig::Unsupported => {
            return Err(ConfigError::Unsupported {
                category: "ephemeris",
            });
        }
    })
}

impl RotationConfig {
    fn to_settings(&self, frames: FrameDefaults<'_>) -> Result<RotationModelSettings, ConfigError> {
        let base = |frame: &Option<String>| {
            frame
                .clone()
                .unwrap_or_else(|| frames.orientation.to_string())
        };
        Ok(match self {
            RotationConfig::Simple {
                base_frame,
                target_frame,
                initial_orientation,
                initial_time,
                rotation_rate,
            } => RotationModelSettings::simple(
                base(base_frame),
                target_frame.clone(),
                quaternion_from_components(*initial_orientation)?,
                *initial_time,
                *rotation_rate,
            )?,
            RotationConfig::SimpleFromSpice {
                base_frame,
                target_frame,
                spice_frame,
                initial_time,
            } => RotationModelSettings::simple_from_spice(
                base(base_frame),
                target_frame.clone(),
                spice_frame.clone(),
                *initial_time,
            )?,
            RotationConfig::Spice {
                base_frame,
                target_frame,
            } => RotationModelSettings::spice(base(base_frame), target_frame.clone())?,
            RotationConfig::Synchronous {
                central_body,
                base_frame,
                target_frame,
            } => RotationModelSettings::synchronous(
                central_body.clone(),
                base(base_frame),
                target_frame.clone(),
            )?,
            RotationConfig::ConstantOrientation {
                base_frame,
                target_frame,
                orientation,
            } => RotationModelSettings::constant_orientation(
                base(base_frame),
                target_frame.clone(),
                quaternion_from_components(*orientation)?,
            )?,
            RotationConfig::GcrsToItrs {
                precession_nutation_theory,
                base_frame,
            } => RotationModelSettings::gcrs_to_itrs(
                (*precession_nutation_theory).into(),
                base_frame.clone().unwrap_or_else(|| "J2000".to_string()),
            )?,
            RotationConfig::Unsupported => {
                return Err(ConfigError::Unsupported {
                    category: "rotation",
                });
            }
        })
    }
}

impl From<IauConventionsConfig> for IauConventions {
    fn from(value: IauConventionsConfig) -> Self {
        match value {
            IauConventionsConfig::Iau2000A => IauConventions::Iau2000A,
            IauConventionsConfig::Iau2000B => IauConventions::Iau2000B,
            IauConventionsConfig::Iau2006 => IauConventions::Iau2006,
        }
    }
}

impl TryFrom<&ShapeConfig> for BodyShapeSettings {
    type Error = ConfigError;

    fn try_from(value: &ShapeConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            ShapeConfig::Spherical { radius } => BodyShapeSettings::spherical(*radius)?,
            ShapeConfig::SphericalSpice => BodyShapeSettings::SphericalSpice,
            ShapeConfig::OblateSpheroid {
                equatorial_radius,
                flattening,
            } => BodyShapeSettings::oblate_spheroid(*equatorial_radius, *flattening)?,
            ShapeConfig::Unsupported => {
                return Err(ConfigError::Unsupported { category: "shape" });
            }
        })
    }
}

impl TryFrom<&AerodynamicConfig> for AerodynamicCoefficientSettings {
    type Error = ConfigError;

    fn try_from(value: &AerodynamicConfig) -> Result<Self, Self::Error> {
        match value {
            AerodynamicConfig::Constant {
                reference_area,
                drag_coefficient,
                side_force_coefficient,
                lift_coefficient,
            } => Ok(AerodynamicCoefficientSettings::constant(
                *reference_area,
                *drag_coefficient,
                *side_force_coefficient,
                *lift_coefficient,
            )?),
            AerodynamicConfig::Unsupported => Err(ConfigError::Unsupported {
                category: "aerodynamic coefficient",
            }),
        }
    }
}

impl TryFrom<&RadiationSourceConfig> for RadiationSourceSettings {
    type Error = ConfigError;

    fn try_from(value: &RadiationSourceConfig) -> Result<Self, Self::Error> {
        match value {
            RadiationSourceConfig::IsotropicPointSource {
                luminosity,
                irradiance,
                distance,
            } => {
                let luminosity = match (luminosity, irradiance, distance) {
                    (Some(l), None, None) => LuminositySettings::constant(*l)?,
                    (None, Some(e), Some(d)) => LuminositySettings::irradiance_at_distance(*e, *d)?,
                    _ => {
                        return Err(ConfigurationError::invalid(
                            "isotropic point source needs either `luminosity` or `irradiance` with `distance`",
                        )
                        .into());
                    }
                };
                Ok(RadiationSourceSettings::isotropic_point_source(luminosity))
            }
            RadiationSourceConfig::Extended {
                panel_radiosity_models,
                panels_per_ring,
                occulting_bodies,
            } => Ok(RadiationSourceSettings::extended(
                panel_radiosity_models
                    .iter()
                    .map(PanelRadiosityModelSettings::try_from)
                    .collect::<Result<_, _>>()?,
                panels_per_ring.clone(),
                occulting_bodies.clone(),
            )?),
            RadiationSourceConfig::Unsupported => Err(ConfigError::Unsupported {
                category: "radiation source",
            }),
        }
    }
}

impl TryFrom<SurfacePropertyConfig> for SurfacePropertyDistribution {
    type Error = ConfigError;

    fn try_from(value: SurfacePropertyConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            SurfacePropertyConfig::Constant(v) => SurfacePropertyDistribution::constant(v)?,
            SurfacePropertyConfig::Model(SurfaceModelConfig::KnockeAlbedo) => {
                SurfacePropertyDistribution::KnockeAlbedo
            }
            SurfacePropertyConfig::Model(SurfaceModelConfig::KnockeEmissivity) => {
                SurfacePropertyDistribution::KnockeEmissivity
            }
            SurfacePropertyConfig::Model(SurfaceModelConfig::Dlam1Albedo) => {
                SurfacePropertyDistribution::Dlam1Albedo
            }
        })
    }
}

impl TryFrom<&RadiosityModelConfig> for PanelRadiosityModelSettings {
    type Error = ConfigError;

    fn try_from(value: &RadiosityModelConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            RadiosityModelConfig::Albedo {
                albedo,
                original_source,
            } => PanelRadiosityModelSettings::albedo((*albedo).try_into()?, original_source.clone())?,
            RadiosityModelConfig::DelayedThermal {
                emissivity,
                original_source,
            } => PanelRadiosityModelSettings::delayed_thermal(
                (*emissivity).try_into()?,
                original_source.clone(),
            )?,
            RadiosityModelConfig::AngleBasedThermal {
                min_temperature,
                max_temperature,
                emissivity,
                original_source,
            } => PanelRadiosityModelSettings::angle_based_thermal(
                *min_temperature,
                *max_temperature,
                *emissivity,
                original_source.clone(),
            )?,
            RadiosityModelConfig::Unsupported => {
                return Err(ConfigError::Unsupported {
                    category: "panel radiosity",
                });
            }
        })
    }
}

impl TryFrom<&OccultingConfig> for OccultingBodies {
    type Error = ConfigError;

    fn try_from(value: &OccultingConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            OccultingConfig::List(names) => OccultingBodies::global(names.iter().cloned())?,
            OccultingConfig::PerSource(map) => OccultingBodies::per_source(map.clone())?,
        })
    }
}

impl TryFrom<&PanelConfig> for PanelSettings {
    type Error = ConfigError;

    fn try_from(value: &PanelConfig) -> Result<Self, Self::Error> {
        let normal = match (&value.normal, &value.tracking_body) {
            (Some(direction), None) => PanelNormal::fixed(*direction)?,
            (None, Some(body)) => PanelNormal::tracking(body.clone(), value.towards)?,
            _ => {
                return Err(ConfigurationError::invalid(
                    "panel needs exactly one of `normal` or `tracking_body`",
                )
                .into());
            }
        };
        Ok(PanelSettings::new(
            value.area,
            value.specular_reflectivity,
            value.diffuse_reflectivity,
            value.instantaneous_reradiation,
            normal,
        )?)
    }
}

impl TryFrom<&RadiationTargetConfig> for RadiationPressureTargetSettings {
    type Error = ConfigError;

    fn try_from(value: &RadiationTargetConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            RadiationTargetConfig::Cannonball {
                reference_area,
                radiation_pressure_coefficient,
                occulting_bodies,
            } => RadiationPressureTargetSettings::cannonball(
                *reference_area,
                *radiation_pressure_coefficient,
                occulting_bodies.try_into()?,
            )?,
            RadiationTargetConfig::Paneled {
                panels,
                occulting_bodies,
            } => RadiationPressureTargetSettings::paneled(
                panels
                    .iter()
                    .map(PanelSettings::try_from)
                    .collect::<Result<_, _>>()?,
                occulting_bodies.try_into()?,
            )?,
            RadiationTargetConfig::Unsupported => {
                return Err(ConfigError::Unsupported {
                    category: "radiation pressure target",
                });
            }
        })
    }
}

impl AccelerationConfig {
    fn to_settings(&self) -> Result<Vec<AccelerationSettings>, ConfigError> {
        self.models
            .iter()
            .map(AccelerationSettings::try_from)
            .collect()
    }
}

impl TryFrom<&AccelerationModelConfig> for AccelerationSettings {
    type Error = ConfigError;

    fn try_from(value: &AccelerationModelConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            AccelerationModelConfig::PointMassGravity => AccelerationSettings::point_mass_gravity(),
            AccelerationModelConfig::SphericalHarmonicGravity {
                maximum_degree,
                maximum_order,
            } => AccelerationSettings::spherical_harmonic_gravity(*maximum_degree, *maximum_order)?,
            AccelerationModelConfig::MutualSphericalHarmonicGravity {
                maximum_degree_exerting,
                maximum_order_exerting,
                maximum_degree_undergoing,
                maximum_order_undergoing,
                maximum_degree_central,
                maximum_order_central,
            } => AccelerationSettings::mutual_spherical_harmonic_gravity(
                (*maximum_degree_exerting, *maximum_order_exerting),
                (*maximum_degree_undergoing, *maximum_order_undergoing),
                (*maximum_degree_central, *maximum_order_central),
            )?,
            AccelerationModelConfig::Aerodynamic => AccelerationSettings::aerodynamic(),
            AccelerationModelConfig::RadiationPressure => AccelerationSettings::radiation_pressure(),
            AccelerationModelConfig::RelativisticCorrection {
                schwarzschild,
                lense_thirring,
                de_sitter,
                primary_body,
                central_body_angular_momentum,
            } => AccelerationSettings::relativistic_correction(
                *schwarzschild,
                *lense_thirring,
                *de_sitter,
                primary_body.clone(),
                *central_body_angular_momentum,
            )?,
            AccelerationModelConfig::Empirical {
                constant,
                sine,
                cosine,
            } => AccelerationSettings::empirical(*constant, *sine, *cosine)?,
            AccelerationModelConfig::Thrust {
                thrust_magnitude,
                specific_impulse,
                direction,
            } => {
                let direction = match direction {
                    ThrustDirectionConfig::ColinearWithState {
                        central_body,
                        along_velocity,
                        opposite,
                    } => ThrustDirectionSettings::ColinearWithState {
                        central_body: central_body.clone(),
                        along_velocity: *along_velocity,
                        opposite: *opposite,
                    },
                    ThrustDirectionConfig::FixedInertial { direction } => {
                        ThrustDirectionSettings::FixedInertial(*direction)
                    }
                    ThrustDirectionConfig::Unsupported => {
                        return Err(ConfigError::Unsupported {
                            category: "thrust direction",
                        });
                    }
                };
                AccelerationSettings::thrust(ThrustSettings::constant(
                    direction,
                    *thrust_magnitude,
                    *specific_impulse,
                )?)
            }
            AccelerationModelConfig::DirectTidalDissipation {
                k2_love_number,
                time_lag,
                include_direct_radial_component,
                tide_on_planet,
            } => AccelerationSettings::direct_tidal_dissipation(
                *k2_love_number,
                *time_lag,
                *include_direct_radial_component,
                *tide_on_planet,
            )?,
            AccelerationModelConfig::MomentumWheelDesaturation {
                thrust_mid_times,
                delta_v_values,
                total_maneuver_time,
                maneuver_rise_time,
            } => AccelerationSettings::momentum_wheel_desaturation(
                thrust_mid_times.clone(),
                delta_v_values.clone(),
                *total_maneuver_time,
                *maneuver_rise_time,
            )?,
            AccelerationModelConfig::Unsupported => {
                return Err(ConfigError::Unsupported {
                    category: "acceleration",
                });
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_scenario_yaml;

    #[test]
    fn manifest_entries_override_default_bodies() {
        let scenario = parse_scenario_yaml(
            r#"
default_bodies: [Sun, Earth]
bodies:
  - name: Earth
    atmosphere:
      type: exponential
      scale_height: 7200.0
      constant_temperature: 290.0
      density_at_zero_altitude: 1.225
      specific_gas_constant: 287.06
"#,
        )
        .unwrap();
        let bodies = scenario.build_bodies().unwrap();
        match bodies["Earth"].atmosphere.as_ref().unwrap() {
            AtmosphereSettings::Exponential {
                constant_temperature,
                specific_gas_constant,
                ..
            } => {
                assert_eq!(*constant_temperature, 290.0);
                assert_eq!(*specific_gas_constant, 287.06);
            }
            other => panic!("unexpected atmosphere {other:?}"),
        }
        assert!(bodies["Earth"].gravity_field.is_some());
    }

    #[test]
    fn ragged_coefficient_rows_are_rejected() {
        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Earth
    gravity_field:
      type: spherical_harmonics
      gravitational_parameter: 3.986e14
      reference_radius: 6378137.0
      associated_reference_frame: IAU_Earth
      cosine_coefficients: [[1.0, 0.0], [0.0]]
      sine_coefficients: [[0.0, 0.0], [0.0, 0.0]]
"#,
        )
        .unwrap();
        let err = scenario.build_bodies().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Body {
                source: ConfigurationError::DimensionMismatch { .. },
                ..
            }
        ));
    }

    #[test]
    fn negative_cannonball_area_names_the_body() {
        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Vehicle
    radiation_pressure_target:
      type: cannonball
      reference_area: -4.0
      radiation_pressure_coefficient: 1.2
"#,
        )
        .unwrap();
        let err = scenario.build_bodies().unwrap_err();
        assert!(err.to_string().contains("Vehicle"), "{err}");
    }

    #[test]
    fn panel_needs_exactly_one_normal() {
        let panel = PanelConfig {
            area: 1.0,
            specular_reflectivity: 0.1,
            diffuse_reflectivity: 0.1,
            instantaneous_reradiation: false,
            normal: Some([1.0, 0.0, 0.0]),
            tracking_body: Some("Sun".to_string()),
            towards: true,
        };
        assert!(PanelSettings::try_from(&panel).is_err());
    }

    #[test]
    fn unsupported_acceleration_is_reported() {
        let scenario = parse_scenario_yaml(
            r#"
accelerations:
  - undergoing: Vehicle
    exerting: Earth
    models:
      - type: yarkovsky
"#,
        )
        .unwrap();
        let err = scenario.build_accelerations().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Unsupported {
                category: "acceleration"
            }
        ));
    }

    #[test]
    fn acceleration_lists_keep_manifest_order() {
        let scenario = parse_scenario_yaml(
            r#"
accelerations:
  - undergoing: Vehicle
    exerting: Earth
    models:
      - type: point_mass_gravity
      - type: aerodynamic
  - undergoing: Vehicle
    exerting: Earth
    models:
      - type: empirical
        constant: [0.0, 0.0, 1.0e-9]
"#,
        )
        .unwrap();
        let selected = scenario.build_accelerations().unwrap();
        let kinds: Vec<_> = selected
            .get("Vehicle", "Earth")
            .iter()
            .map(|a| a.kind().name())
            .collect();
        assert_eq!(kinds, vec!["point_mass_gravity", "aerodynamic", "empirical"]);
    }

    #[test]
    fn quasi_impulsive_shot_reads_as_desaturation() {
        let scenario = parse_scenario_yaml(
            r#"
accelerations:
  - undergoing: Vehicle
    exerting: Vehicle
    models:
      - type: quasi_impulsive_shot
        thrust_mid_times: [100.0, 900.0]
        delta_v_values: [[0.01, 0.0, 0.0], [0.0, 0.02, 0.0]]
        total_maneuver_time: 60.0
        maneuver_rise_time: 10.0
"#,
        )
        .unwrap();
        let selected = scenario.build_accelerations().unwrap();
        let kinds: Vec<_> = selected
            .get("Vehicle", "Vehicle")
            .iter()
            .map(|a| a.kind().name())
            .collect();
        assert_eq!(kinds, vec!["momentum_wheel_desaturation"]);
    }

    #[test]
    fn scaled_models_wrap_their_base() {
        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Mars
    ephemeris:
      type: scaled
      scaling_factor: 1.001
      base:
        type: direct_spice
    atmosphere:
      type: scaled
      scaling_factor: 0.8
      base:
        type: exponential
        scale_height: 11100.0
        constant_temperature: 210.0
        density_at_zero_altitude: 0.02
        specific_gas_constant: 191.0
"#,
        )
        .unwrap();
        let bodies = scenario.build_bodies().unwrap();
        let mars = &bodies["Mars"];
        let ephemeris = mars.ephemeris.as_ref().unwrap();
        assert_eq!(ephemeris.label(), "scaled");
        assert!(ephemeris.uses_spice());
        match mars.atmosphere.as_ref().unwrap() {
            AtmosphereSettings::Scaled {
                base,
                scaling_factor,
            } => {
                assert_eq!(*scaling_factor, 0.8);
                assert!(matches!(**base, AtmosphereSettings::Exponential { .. }));
            }
            other => panic!("unexpected atmosphere {other:?}"),
        }
    }

    #[test]
    fn gcrs_to_itrs_defaults_to_j2000_and_iau_2006() {
        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Earth
    rotation_model:
      type: gcrs_to_itrs
"#,
        )
        .unwrap();
        let bodies = scenario.build_bodies().unwrap();
        match bodies["Earth"].rotation_model.as_ref().unwrap() {
            RotationModelSettings::GcrsToItrs {
                precession_nutation_theory,
                base_frame,
                target_frame,
            } => {
                assert_eq!(*precession_nutation_theory, IauConventions::Iau2006);
                assert_eq!(base_frame, "J2000");
                assert_eq!(target_frame, "ITRS");
            }
            other => panic!("unexpected rotation {other:?}"),
        }

        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Earth
    rotation_model:
      type: gcrs_to_itrs
      base_frame: ECLIPJ2000
"#,
        )
        .unwrap();
        assert!(scenario.build_bodies().is_err());
    }

    #[test]
    fn moment_of_inertia_is_carried_onto_the_field() {
        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Earth
    gravity_field:
      type: zonal
      gravitational_parameter: 3.986004418e14
      reference_radius: 6378137.0
      associated_reference_frame: IAU_Earth
      zonal_coefficients: [1.08263e-3]
      scaled_mean_moment_of_inertia: 0.3307
"#,
        )
        .unwrap();
        let bodies = scenario.build_bodies().unwrap();
        match bodies["Earth"].gravity_field.as_ref().unwrap() {
            GravityFieldSettings::SphericalHarmonics(field) => {
                assert_eq!(field.scaled_mean_moment_of_inertia(), Some(0.3307));
                assert!(field.inertia_tensor().is_some());
            }
            other => panic!("unexpected gravity field {other:?}"),
        }
    }

    #[test]
    fn extended_source_mixes_constants_and_named_models() {
        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Earth
    radiation_source:
      type: extended
      panels_per_ring: [6, 12]
      occulting_bodies: [Moon]
      panel_radiosity_models:
        - type: albedo
          albedo: knocke_albedo
          original_source: Sun
        - type: delayed_thermal
          emissivity: 0.95
          original_source: Sun
"#,
        )
        .unwrap();
        let bodies = scenario.build_bodies().unwrap();
        match bodies["Earth"].radiation_source.as_ref().unwrap() {
            RadiationSourceSettings::Extended {
                panel_radiosity_models,
                panels_per_ring,
                ..
            } => {
                assert_eq!(panels_per_ring, &vec![6, 12]);
                assert_eq!(
                    panel_radiosity_models[0],
                    PanelRadiosityModelSettings::albedo(
                        SurfacePropertyDistribution::KnockeAlbedo,
                        "Sun"
                    )
                    .unwrap()
                );
                assert_eq!(panel_radiosity_models[1].original_source(), "Sun");
            }
            other => panic!("unexpected source {other:?}"),
        }

        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Earth
    radiation_source:
      type: extended
      panels_per_ring: [6]
      panel_radiosity_models:
        - type: delayed_thermal
          emissivity: 1.4
          original_source: Sun
"#,
        )
        .unwrap();
        assert!(scenario.build_bodies().is_err());
    }

    #[test]
    fn geodetic_station_angles_are_read_in_degrees() {
        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Earth
    ground_stations:
      - name: Madrid
        position:
          type: geodetic
          altitude: 830.0
          latitude_deg: 40.43
          longitude_deg: -4.25
      - name: Origin
        position:
          type: cartesian
          position: [6378137.0, 0.0, 0.0]
"#,
        )
        .unwrap();
        let bodies = scenario.build_bodies().unwrap();
        let stations = &bodies["Earth"].ground_stations;
        assert_eq!(stations.len(), 2);
        match stations[0].position() {
            StationPosition::Geodetic {
                altitude, latitude, ..
            } => {
                assert_eq!(*altitude, 830.0);
                assert!((latitude - 40.43_f64.to_radians()).abs() < 1e-12);
            }
            other => panic!("unexpected position {other:?}"),
        }

        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Earth
    ground_stations:
      - name: Pole
        position:
          type: geodetic
          latitude_deg: 95.0
          longitude_deg: 0.0
"#,
        )
        .unwrap();
        assert!(scenario.build_bodies().is_err());
    }
}
