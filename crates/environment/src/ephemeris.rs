//! Ephemeris settings: where a body is, relative to a frame origin.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use astro_core::{ConfigurationError, validate};

/// Cartesian state `[x, y, z, vx, vy, vz]` in metres and metres per second.
pub type CartesianState = [f64; 6];

/// Keplerian elements `[a, e, i, argument of periapsis, RAAN, true anomaly]`
/// in metres and radians.
pub type KeplerianElements = [f64; 6];

/// State callback: `time_s -> CartesianState`.
pub type StateFn = dyn Fn(f64) -> CartesianState + Send + Sync;

/// Shared handle to a user supplied state function.
#[derive(Clone)]
pub struct StateFunction(Arc<StateFn>);

impl StateFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> CartesianState + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn state(&self, time: f64) -> CartesianState {
        (self.0)(time)
    }
}

impl fmt::Debug for StateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateFunction(..)")
    }
}

/// Planets covered by the approximate JPL analytical ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApproximatePlanet {
    Mercury,
    Venus,
    EarthMoonBarycenter,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl ApproximatePlanet {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "MERCURY" => Some(Self::Mercury),
            "VENUS" => Some(Self::Venus),
            "EARTH" | "EMB" | "EARTH MOON BARYCENTER" | "EARTH BARYCENTER" => {
                Some(Self::EarthMoonBarycenter)
            }
            "MARS" => Some(Self::Mars),
            "JUPITER" => Some(Self::Jupiter),
            "SATURN" => Some(Self::Saturn),
            "URANUS" => Some(Self::Uranus),
            "NEPTUNE" => Some(Self::Neptune),
            _ => None,
        }
    }
}

/// The model that produces a body's state.
#[derive(Debug, Clone)]
pub enum EphemerisModel {
    /// Query SPICE at every evaluation.
    DirectSpice {
        correct_for_stellar_aberration: bool,
        correct_for_light_time: bool,
    },
    /// Sample SPICE once on a fixed grid and interpolate.
    InterpolatedSpice {
        initial_time: f64,
        final_time: f64,
        time_step: f64,
        interpolation_order: usize,
    },
    /// Analytical approximation of a planet's heliocentric orbit.
    ApproximateJplPlanet { body: ApproximatePlanet },
    /// Fixed state.
    Constant { state: CartesianState },
    /// Unperturbed two-body orbit.
    Keplerian {
        initial_elements: KeplerianElements,
        epoch: f64,
        central_body_gravitational_parameter: f64,
    },
    /// Discrete states interpolated in time.
    Tabulated {
        states: BTreeMap<TableEpoch, CartesianState>,
    },
    /// States produced by a user callback.
    Custom { state_function: StateFunction },
    /// Another model with every state component multiplied by a constant factor.
    Scaled {
        base: Box<EphemerisModel>,
        scaling_factor: f64,
    },
}

impl EphemerisModel {
    pub fn uses_spice(&self) -> bool {
        match self {
            Self::DirectSpice { .. } | Self::InterpolatedSpice { .. } => true,
            Self::Scaled { base, .. } => base.uses_spice(),
            _ => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DirectSpice { .. } => "direct_spice",
            Self::InterpolatedSpice { .. } => "interpolated_spice",
            Self::ApproximateJplPlanet { .. } => "approximate_jpl_planet",
            Self::Constant { .. } => "constant",
            Self::Keplerian { .. } => "keplerian",
            Self::Tabulated { .. } => "tabulated",
            Self::Custom { .. } => "custom",
            Self::Scaled { .. } => "scaled",
        }
    }
}

/// Totally ordered epoch key for tabulated ephemerides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableEpoch(pub f64);

impl Eq for TableEpoch {}

impl PartialOrd for TableEpoch {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TableEpoch {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Ephemeris model plus the frame its states are expressed in.
#[derive(Debug, Clone)]
pub struct EphemerisSettings {
    pub frame_origin: String,
    pub frame_orientation: String,
    pub model: EphemerisModel,
}

impl EphemerisSettings {
    fn with_model(
        frame_origin: impl Into<String>,
        frame_orientation: impl Into<String>,
        model: EphemerisModel,
    ) -> Result<Self, ConfigurationError> {
        let frame_origin = frame_origin.into();
        let frame_orientation = frame_orientation.into();
        validate::name("ephemeris frame origin", &frame_origin)?;
        validate::name("ephemeris frame orientation", &frame_orientation)?;
        Ok(Self {
            frame_origin,
            frame_orientation,
            model,
        })
    }

    pub fn direct_spice(
        frame_origin: impl Into<String>,
        frame_orientation: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_model(
            frame_origin,
            frame_orientation,
            EphemerisModel::DirectSpice {
                correct_for_stellar_aberration: false,
                correct_for_light_time: false,
            },
        )
    }

    pub fn interpolated_spice(
        frame_origin: impl Into<String>,
        frame_orientation: impl Into<String>,
        initial_time: f64,
        final_time: f64,
        time_step: f64,
        interpolation_order: usize,
    ) -> Result<Self, ConfigurationError> {
        validate::finite("interpolation initial time", initial_time)?;
        validate::finite("interpolation final time", final_time)?;
        validate::positive("interpolation time step", time_step)?;
        if final_time <= initial_time {
            return Err(ConfigurationError::invalid(format!(
                "interpolation window is empty: final time {final_time} is not after initial time {initial_time}"
            )));
        }
        if time_step > final_time - initial_time {
            return Err(ConfigurationError::invalid(format!(
                "interpolation time step {time_step} exceeds window length {}",
                final_time - initial_time
            )));
        }
        if interpolation_order == 0 {
            return Err(ConfigurationError::invalid(
                "interpolation order must be at least 1",
            ));
        }
        Self::with_model(
            frame_origin,
            frame_orientation,
            EphemerisModel::InterpolatedSpice {
                initial_time,
                final_time,
                time_step,
                interpolation_order,
            },
        )
    }

    pub fn approximate_jpl_planet(body: &str) -> Result<Self, ConfigurationError> {
        let body = ApproximatePlanet::from_name(body).ok_or_else(|| {
            ConfigurationError::invalid(format!(
                "`{body}` has no approximate JPL planet ephemeris"
            ))
        })?;
        Self::with_model("Sun", "ECLIPJ2000", EphemerisModel::ApproximateJplPlanet { body })
    }

    pub fn constant(
        state: CartesianState,
        frame_origin: impl Into<String>,
        frame_orientation: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        if state.iter().any(|x| !x.is_finite()) {
            return Err(ConfigurationError::NonFinite {
                quantity: "constant ephemeris state",
            });
        }
        Self::with_model(frame_origin, frame_orientation, EphemerisModel::Constant { state })
    }

    pub fn keplerian(
        initial_elements: KeplerianElements,
        epoch: f64,
        central_body_gravitational_parameter: f64,
        frame_origin: impl Into<String>,
        frame_orientation: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        validate::positive(
            "central body gravitational parameter",
            central_body_gravitational_parameter,
        )?;
        validate::finite("Keplerian epoch", epoch)?;
        let [a, e, i, ..] = initial_elements;
        validate::non_negative("eccentricity", e)?;
        validate::in_range("inclination", i, 0.0, std::f64::consts::PI)?;
        if initial_elements.iter().any(|x| !x.is_finite()) {
            return Err(ConfigurationError::NonFinite {
                quantity: "Keplerian elements",
            });
        }
        if e == 1.0 {
            return Err(ConfigurationError::invalid(
                "parabolic orbits (e = 1) cannot be described by a semi-major axis",
            ));
        }
        if (e < 1.0 && a <= 0.0) || (e > 1.0 && a >= 0.0) {
            return Err(ConfigurationError::invalid(format!(
                "semi-major axis {a} is inconsistent with eccentricity {e}"
            )));
        }
        Self::with_model(
            frame_origin,
            frame_orientation,
            EphemerisModel::Keplerian {
                initial_elements,
                epoch,
                central_body_gravitational_parameter,
            },
        )
    }

    pub fn tabulated(
        states: BTreeMap<TableEpoch, CartesianState>,
        frame_origin: impl Into<String>,
        frame_orientation: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        if states.len() < 2 {
            return Err(ConfigurationError::invalid(format!(
                "tabulated ephemeris needs at least two states, got {}",
                states.len()
            )));
        }
        for (epoch, state) in &states {
            validate::finite("tabulated ephemeris epoch", epoch.0)?;
            if state.iter().any(|x| !x.is_finite()) {
                return Err(ConfigurationError::NonFinite {
                    quantity: "tabulated ephemeris state",
                });
            }
        }
        Self::with_model(frame_origin, frame_orientation, EphemerisModel::Tabulated { states })
    }

    pub fn custom<F>(
        f: F,
        frame_origin: impl Into<String>,
        frame_orientation: impl Into<String>,
    ) -> Result<Self, ConfigurationError>
    where
        F: Fn(f64) -> CartesianState + Send + Sync + 'static,
    {
        Self::with_model(
            frame_origin,
            frame_orientation,
            EphemerisModel::Custom {
                state_function: StateFunction::new(f),
            },
        )
    }

    /// Wrap the current model so every state it produces is multiplied by
    /// `scaling_factor`. The frame is unchanged.
    pub fn scaled(self, scaling_factor: f64) -> Result<Self, ConfigurationError> {
        validate::positive("ephemeris scaling factor", scaling_factor)?;
        let Self {
            frame_origin,
            frame_orientation,
            model,
        } = self;
        Ok(Self {
            frame_origin,
            frame_orientation,
            model: EphemerisModel::Scaled {
                base: Box::new(model),
                scaling_factor,
            },
        })
    }

    /// Re-run the constructor checks on a value that may have been built directly.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        self.check_model(&self.model)
    }

    fn check_model(&self, model: &EphemerisModel) -> Result<(), ConfigurationError> {
        let (origin, orientation) = (self.frame_origin.as_str(), self.frame_orientation.as_str());
        match model {
            EphemerisModel::InterpolatedSpice {
                initial_time,
                final_time,
                time_step,
                interpolation_order,
            } => Self::interpolated_spice(
                origin,
                orientation,
                *initial_time,
                *final_time,
                *time_step,
                *interpolation_order,
            )
            .map(drop),
            EphemerisModel::Constant { state } => Self::constant(*state, origin, orientation).map(drop),
            EphemerisModel::Keplerian {
                initial_elements,
                epoch,
                central_body_gravitational_parameter,
            } => Self::keplerian(
                *initial_elements,
                *epoch,
                *central_body_gravitational_parameter,
                origin,
                orientation,
            )
            .map(drop),
            EphemerisModel::Tabulated { states } => {
                Self::tabulated(states.clone(), origin, orientation).map(drop)
            }
            EphemerisModel::Scaled {
                base,
                scaling_factor,
            } => {
                validate::positive("ephemeris scaling factor", *scaling_factor)?;
                self.check_model(base)
            }
            EphemerisModel::DirectSpice { .. }
            | EphemerisModel::ApproximateJplPlanet { .. }
            | EphemerisModel::Custom { .. } => {
                validate::name("ephemeris frame origin", origin)?;
                validate::name("ephemeris frame orientation", orientation)
            }
        }
    }

    /// Enable aberration corrections on a direct SPICE ephemeris.
    pub fn with_spice_corrections(mut self, stellar_aberration: bool, light_time: bool) -> Self {
        if let EphemerisModel::DirectSpice {
            correct_for_stellar_aberration,
            correct_for_light_time,
        } = &mut self.model
        {
            *correct_for_stellar_aberration = stellar_aberration;
            *correct_for_light_time = light_time;
        }
        self
    }

    /// Whether the model, or the model it scales, reads SPICE kernels.
    pub fn uses_spice(&self) -> bool {
        self.model.uses_spice()
    }

    pub fn label(&self) -> &'static str {
        self.model.label()
    }
}
