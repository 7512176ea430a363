//! Acceleration model descriptors.

use std::fmt;
use std::sync::Arc;

use astro_core::vector::{self, Vector3};
use astro_core::{ConfigurationError, validate};

/// Discriminant of [`AccelerationSettings`], used for diagnostics and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccelerationKind {
    PointMassGravity,
    SphericalHarmonicGravity,
    MutualSphericalHarmonicGravity,
    Aerodynamic,
    RadiationPressure,
    RelativisticCorrection,
    Empirical,
    Thrust,
    DirectTidalDissipation,
    MomentumWheelDesaturation,
}

impl AccelerationKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::PointMassGravity => "point_mass_gravity",
            Self::SphericalHarmonicGravity => "spherical_harmonic_gravity",
            Self::MutualSphericalHarmonicGravity => "mutual_spherical_harmonic_gravity",
            Self::Aerodynamic => "aerodynamic",
            Self::RadiationPressure => "radiation_pressure",
            Self::RelativisticCorrection => "relativistic_correction",
            Self::Empirical => "empirical",
            Self::Thrust => "thrust",
            Self::DirectTidalDissipation => "direct_tidal_dissipation",
            Self::MomentumWheelDesaturation => "momentum_wheel_desaturation",
        }
    }

    /// Kinds a body exerts on itself (its own propulsion).
    pub fn is_self_exerted(self) -> bool {
        matches!(self, Self::Thrust | Self::MomentumWheelDesaturation)
    }
}

impl fmt::Display for AccelerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of a thrust acceleration.
#[derive(Debug, Clone, PartialEq)]
pub enum ThrustDirectionSettings {
    /// Along (or against) the velocity or position relative to `central_body`.
    ColinearWithState {
        central_body: String,
        along_velocity: bool,
        opposite: bool,
    },
    /// Fixed unit vector in the inertial frame.
    FixedInertial(Vector3),
}

impl ThrustDirectionSettings {
    /// Normalize a fixed direction and check the central body name.
    fn checked(self) -> Result<Self, ConfigurationError> {
        match &self {
            Self::FixedInertial(v) => Ok(Self::FixedInertial(vector::normalize(v, "thrust direction")?)),
            Self::ColinearWithState { central_body, .. } => {
                validate::name("thrust direction central body", central_body)?;
                Ok(self)
            }
        }
    }

    fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::FixedInertial(v) => {
                vector::normalize(v, "thrust direction")?;
                if (vector::norm(v) - 1.0).abs() > 1e-9 {
                    return Err(ConfigurationError::invalid(
                        "fixed thrust direction is not a unit vector",
                    ));
                }
                Ok(())
            }
            Self::ColinearWithState { central_body, .. } => {
                validate::name("thrust direction central body", central_body)
            }
        }
    }
}

/// Scalar callback of time (s).
pub type ScalarFn = dyn Fn(f64) -> f64 + Send + Sync;

/// Shared handle to a user supplied function of time. Two handles are equal
/// when they share the same callback.
#[derive(Clone)]
pub struct TimeFunction(Arc<ScalarFn>);

impl TimeFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn value(&self, time: f64) -> f64 {
        (self.0)(time)
    }
}

impl fmt::Debug for TimeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimeFunction(..)")
    }
}

impl PartialEq for TimeFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Engine on/off callback of time (s).
pub type SwitchFn = dyn Fn(f64) -> bool + Send + Sync;

#[derive(Clone)]
pub struct EngineSwitch(Arc<SwitchFn>);

impl EngineSwitch {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn is_on(&self, time: f64) -> bool {
        (self.0)(time)
    }
}

impl fmt::Debug for EngineSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EngineSwitch(..)")
    }
}

impl PartialEq for EngineSwitch {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Magnitude of a thrust acceleration.
#[derive(Debug, Clone, PartialEq)]
pub enum ThrustMagnitudeSettings {
    Constant {
        thrust_magnitude: f64,
        specific_impulse: f64,
    },
    /// Thrust (N) and specific impulse (s) from callbacks of time. Without an
    /// engine switch the engine is always on.
    Custom {
        thrust_magnitude: TimeFunction,
        specific_impulse: TimeFunction,
        engine_switch: Option<EngineSwitch>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrustSettings {
    pub direction: ThrustDirectionSettings,
    pub magnitude: ThrustMagnitudeSettings,
}

impl ThrustSettings {
    pub fn constant(
        direction: ThrustDirectionSettings,
        thrust_magnitude: f64,
        specific_impulse: f64,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            direction: direction.checked()?,
            magnitude: ThrustMagnitudeSettings::Constant {
                thrust_magnitude: validate::positive("thrust magnitude", thrust_magnitude)?,
                specific_impulse: validate::positive("specific impulse", specific_impulse)?,
            },
        })
    }

    /// Thrust whose magnitude and specific impulse are evaluated by callbacks.
    pub fn custom<F, G>(
        direction: ThrustDirectionSettings,
        thrust_magnitude: F,
        specific_impulse: G,
    ) -> Result<Self, ConfigurationError>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        G: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Ok(Self {
            direction: direction.checked()?,
            magnitude: ThrustMagnitudeSettings::Custom {
                thrust_magnitude: TimeFunction::new(thrust_magnitude),
                specific_impulse: TimeFunction::new(specific_impulse),
                engine_switch: None,
            },
        })
    }

    /// Attach an engine on/off callback; only custom magnitudes take one.
    pub fn with_engine_switch<H>(mut self, is_engine_on: H) -> Result<Self, ConfigurationError>
    where
        H: Fn(f64) -> bool + Send + Sync + 'static,
    {
        match &mut self.magnitude {
            ThrustMagnitudeSettings::Custom { engine_switch, .. } => {
                *engine_switch = Some(EngineSwitch::new(is_engine_on));
                Ok(self)
            }
            ThrustMagnitudeSettings::Constant { .. } => Err(ConfigurationError::invalid(
                "an engine switch needs a custom thrust magnitude",
            )),
        }
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        self.direction.check()?;
        if let ThrustMagnitudeSettings::Constant {
            thrust_magnitude,
            specific_impulse,
        } = self.magnitude
        {
            validate::positive("thrust magnitude", thrust_magnitude)?;
            validate::positive("specific impulse", specific_impulse)?;
        }
        Ok(())
    }
}

/// One acceleration term exerted by one body on another.
#[derive(Debug, Clone, PartialEq)]
pub enum AccelerationSettings {
    PointMassGravity,
    SphericalHarmonicGravity {
        maximum_degree: usize,
        maximum_order: usize,
    },
    MutualSphericalHarmonicGravity {
        maximum_degree_exerting: usize,
        maximum_order_exerting: usize,
        maximum_degree_undergoing: usize,
        maximum_order_undergoing: usize,
        maximum_degree_central: usize,
        maximum_order_central: usize,
    },
    Aerodynamic,
    RadiationPressure,
    RelativisticCorrection {
        schwarzschild: bool,
        lense_thirring: bool,
        de_sitter: bool,
        primary_body: Option<String>,
        central_body_angular_momentum: Option<Vector3>,
    },
    Empirical {
        constant: Vector3,
        sine: Vector3,
        cosine: Vector3,
    },
    Thrust(ThrustSettings),
    DirectTidalDissipation {
        k2_love_number: f64,
        time_lag: f64,
        include_direct_radial_component: bool,
        tide_on_planet: bool,
    },
    MomentumWheelDesaturation {
        thrust_mid_times: Vec<f64>,
        delta_v_values: Vec<Vector3>,
        total_maneuver_time: f64,
        maneuver_rise_time: f64,
    },
}

fn check_degree_order(
    what: &str,
    degree: usize,
    order: usize,
) -> Result<(), ConfigurationError> {
    if order > degree {
        return Err(ConfigurationError::invalid(format!(
            "{what}: order {order} exceeds degree {degree}"
        )));
    }
    Ok(())
}

impl AccelerationSettings {
    pub fn point_mass_gravity() -> Self {
        Self::PointMassGravity
    }

    pub fn spherical_harmonic_gravity(
        maximum_degree: usize,
        maximum_order: usize,
    ) -> Result<Self, ConfigurationError> {
        check_degree_order("spherical harmonic gravity", maximum_degree, maximum_order)?;
        Ok(Self::SphericalHarmonicGravity {
            maximum_degree,
            maximum_order,
        })
    }

    pub fn mutual_spherical_harmonic_gravity(
        (maximum_degree_exerting, maximum_order_exerting): (usize, usize),
        (maximum_degree_undergoing, maximum_order_undergoing): (usize, usize),
        (maximum_degree_central, maximum_order_central): (usize, usize),
    ) -> Result<Self, ConfigurationError> {
        check_degree_order(
            "mutual spherical harmonics (exerting body)",
            maximum_degree_exerting,
            maximum_order_exerting,
        )?;
        check_degree_order(
            "mutual spherical harmonics (undergoing body)",
            maximum_degree_undergoing,
            maximum_order_undergoing,
        )?;
        check_degree_order(
            "mutual spherical harmonics (central body)",
            maximum_degree_central,
            maximum_order_central,
        )?;
        Ok(Self::MutualSphericalHarmonicGravity {
            maximum_degree_exerting,
            maximum_order_exerting,
            maximum_degree_undergoing,
            maximum_order_undergoing,
            maximum_degree_central,
            maximum_order_central,
        })
    }

    pub fn aerodynamic() -> Self {
        Self::Aerodynamic
    }

    pub fn radiation_pressure() -> Self {
        Self::RadiationPressure
    }

    pub fn relativistic_correction(
        schwarzschild: bool,
        lense_thirring: bool,
        de_sitter: bool,
        primary_body: Option<String>,
        central_body_angular_momentum: Option<Vector3>,
    ) -> Result<Self, ConfigurationError> {
        if !(schwarzschild || lense_thirring || de_sitter) {
            return Err(ConfigurationError::invalid(
                "relativistic correction enables no terms",
            ));
        }
        if de_sitter && primary_body.is_none() {
            return Err(ConfigurationError::invalid(
                "de Sitter correction requires a primary body",
            ));
        }
        if let Some(primary) = &primary_body {
            validate::name("relativistic primary body", primary)?;
        }
        match central_body_angular_momentum {
            None if lense_thirring => {
                return Err(ConfigurationError::invalid(
                    "Lense-Thirring correction requires the central body angular momentum",
                ));
            }
            Some(h) if h.iter().any(|x| !x.is_finite()) => {
                return Err(ConfigurationError::NonFinite {
                    quantity: "central body angular momentum",
                });
            }
            _ => {}
        }
        Ok(Self::RelativisticCorrection {
            schwarzschild,
            lense_thirring,
            de_sitter,
            primary_body,
            central_body_angular_momentum,
        })
    }

    pub fn empirical(
        constant: Vector3,
        sine: Vector3,
        cosine: Vector3,
    ) -> Result<Self, ConfigurationError> {
        if constant.iter().chain(&sine).chain(&cosine).any(|x| !x.is_finite()) {
            return Err(ConfigurationError::NonFinite {
                quantity: "empirical acceleration component",
            });
        }
        Ok(Self::Empirical {
            constant,
            sine,
            cosine,
        })
    }

    pub fn thrust(settings: ThrustSettings) -> Self {
        Self::Thrust(settings)
    }

    pub fn direct_tidal_dissipation(
        k2_love_number: f64,
        time_lag: f64,
        include_direct_radial_component: bool,
        tide_on_planet: bool,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::DirectTidalDissipation {
            k2_love_number: validate::non_negative("k2 Love number", k2_love_number)?,
            time_lag: validate::non_negative("tidal time lag", time_lag)?,
            include_direct_radial_component,
            tide_on_planet,
        })
    }

    pub fn momentum_wheel_desaturation(
        thrust_mid_times: Vec<f64>,
        delta_v_values: Vec<Vector3>,
        total_maneuver_time: f64,
        maneuver_rise_time: f64,
    ) -> Result<Self, ConfigurationError> {
        if thrust_mid_times.is_empty() {
            return Err(ConfigurationError::EmptyList {
                what: "momentum wheel desaturation times".to_string(),
            });
        }
        if thrust_mid_times.len() != delta_v_values.len() {
            return Err(ConfigurationError::DimensionMismatch {
                what: "momentum wheel desaturation delta-v values",
                expected: thrust_mid_times.len().to_string(),
                found: delta_v_values.len().to_string(),
            });
        }
        for time in &thrust_mid_times {
            validate::finite("momentum wheel desaturation time", *time)?;
        }
        if delta_v_values.iter().flatten().any(|dv| !dv.is_finite()) {
            return Err(ConfigurationError::NonFinite {
                quantity: "momentum wheel desaturation delta-v",
            });
        }
        if thrust_mid_times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ConfigurationError::invalid(
                "momentum wheel desaturation times must be strictly increasing",
            ));
        }
        validate::positive("total maneuver time", total_maneuver_time)?;
        validate::non_negative("maneuver rise time", maneuver_rise_time)?;
        if maneuver_rise_time > total_maneuver_time / 2.0 {
            return Err(ConfigurationError::invalid(format!(
                "maneuver rise time {maneuver_rise_time} exceeds half the maneuver duration {total_maneuver_time}"
            )));
        }
        Ok(Self::MomentumWheelDesaturation {
            thrust_mid_times,
            delta_v_values,
            total_maneuver_time,
            maneuver_rise_time,
        })
    }

    /// Re-run the constructor checks on a value that may have been built directly.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::PointMassGravity | Self::Aerodynamic | Self::RadiationPressure => Ok(()),
            Self::SphericalHarmonicGravity {
                maximum_degree,
                maximum_order,
            } => Self::spherical_harmonic_gravity(*maximum_degree, *maximum_order).map(drop),
            Self::MutualSphericalHarmonicGravity {
                maximum_degree_exerting,
                maximum_order_exerting,
                maximum_degree_undergoing,
                maximum_order_undergoing,
                maximum_degree_central,
                maximum_order_central,
            } => Self::mutual_spherical_harmonic_gravity(
                (*maximum_degree_exerting, *maximum_order_exerting),
                (*maximum_degree_undergoing, *maximum_order_undergoing),
                (*maximum_degree_central, *maximum_order_central),
            )
            .map(drop),
            Self::RelativisticCorrection {
                schwarzschild,
                lense_thirring,
                de_sitter,
                primary_body,
                central_body_angular_momentum,
            } => Self::relativistic_correction(
                *schwarzschild,
                *lense_thirring,
                *de_sitter,
                primary_body.clone(),
                *central_body_angular_momentum,
            )
            .map(drop),
            Self::Empirical {
                constant,
                sine,
                cosine,
            } => Self::empirical(*constant, *sine, *cosine).map(drop),
            Self::Thrust(thrust) => thrust.check(),
            Self::DirectTidalDissipation {
                k2_love_number,
                time_lag,
                include_direct_radial_component,
                tide_on_planet,
            } => Self::direct_tidal_dissipation(
                *k2_love_number,
                *time_lag,
                *include_direct_radial_component,
                *tide_on_planet,
            )
            .map(drop),
            Self::MomentumWheelDesaturation {
                thrust_mid_times,
                delta_v_values,
                total_maneuver_time,
                maneuver_rise_time,
            } => Self::momentum_wheel_desaturation(
                thrust_mid_times.clone(),
                delta_v_values.clone(),
                *total_maneuver_time,
                *maneuver_rise_time,
            )
            .map(drop),
        }
    }

    pub fn kind(&self) -> AccelerationKind {
        match self {
            Self::PointMassGravity => AccelerationKind::PointMassGravity,
            Self::SphericalHarmonicGravity { .. } => AccelerationKind::SphericalHarmonicGravity,
            Self::MutualSphericalHarmonicGravity { .. } => {
                AccelerationKind::MutualSphericalHarmonicGravity
            }
            Self::Aerodynamic => AccelerationKind::Aerodynamic,
            Self::RadiationPressure => AccelerationKind::RadiationPressure,
            Self::RelativisticCorrection { .. } => AccelerationKind::RelativisticCorrection,
            Self::Empirical { .. } => AccelerationKind::Empirical,
            Self::Thrust(_) => AccelerationKind::Thrust,
            Self::DirectTidalDissipation { .. } => AccelerationKind::DirectTidalDissipation,
            Self::MomentumWheelDesaturation { .. } => AccelerationKind::MomentumWheelDesaturation,
        }
    }
}
