//! Rotation model settings.

use astro_core::{ConfigurationError, validate};
use nalgebra::{Quaternion, UnitQuaternion};

/// Precession-nutation theory of the IAU Earth orientation conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IauConventions {
    Iau2000A,
    Iau2000B,
    #[default]
    Iau2006,
}

/// Inertial frames the GCRS to ITRS chain can start from.
pub const GCRS_TO_ITRS_BASE_FRAMES: &[&str] = &["GCRS", "J2000"];

/// Terrestrial frame produced by [`RotationModelSettings::GcrsToItrs`].
pub const ITRS_FRAME: &str = "ITRS";

/// Rotation model attached to a body.
#[derive(Debug, Clone, PartialEq)]
pub enum RotationModelSettings {
    /// Uniform rotation about the target frame's z-axis.
    Simple {
        base_frame: String,
        target_frame: String,
        initial_orientation: UnitQuaternion<f64>,
        initial_time: f64,
        rotation_rate: f64,
    },
    /// Uniform rotation whose initial state is read from SPICE.
    SimpleFromSpice {
        base_frame: String,
        target_frame: String,
        spice_frame: String,
        initial_time: f64,
    },
    /// Orientation queried from SPICE at every evaluation.
    Spice {
        base_frame: String,
        target_frame: String,
    },
    /// Tidally locked to `central_body`.
    Synchronous {
        central_body: String,
        base_frame: String,
        target_frame: String,
    },
    /// Fixed orientation with respect to the base frame.
    ConstantOrientation {
        base_frame: String,
        target_frame: String,
        orientation: UnitQuaternion<f64>,
    },
    /// High-accuracy Earth orientation (precession, nutation, polar motion).
    GcrsToItrs {
        precession_nutation_theory: IauConventions,
        base_frame: String,
        target_frame: String,
    },
}

fn frames(base: String, target: String) -> Result<(String, String), ConfigurationError> {
    validate::name("rotation base frame", &base)?;
    validate::name("rotation target frame", &target)?;
    Ok((base, target))
}

/// Build a unit quaternion from `[w, x, y, z]`, rejecting zero-norm input.
pub fn quaternion_from_components(wxyz: [f64; 4]) -> Result<UnitQuaternion<f64>, ConfigurationError> {
    if wxyz.iter().any(|c| !c.is_finite()) {
        return Err(ConfigurationError::NonFinite {
            quantity: "orientation quaternion",
        });
    }
    let q = Quaternion::new(wxyz[0], wxyz[1], wxyz[2], wxyz[3]);
    UnitQuaternion::try_new(q, f64::EPSILON).ok_or(ConfigurationError::NonPositive {
        quantity: "orientation quaternion norm",
        value: q.norm(),
    })
}

impl RotationModelSettings {
    /// Uniform rotation at `rotation_rate` (rad/s) from `initial_orientation` at `initial_time`.
    pub fn simple(
        base_frame: impl Into<String>,
        target_frame: impl Into<String>,
        initial_orientation: UnitQuaternion<f64>,
        initial_time: f64,
        rotation_rate: f64,
    ) -> Result<Self, ConfigurationError> {
        let (base_frame, target_frame) = frames(base_frame.into(), target_frame.into())?;
        validate::finite("rotation initial time", initial_time)?;
        validate::finite("rotation rate", rotation_rate)?;
        Ok(Self::Simple {
            base_frame,
            target_frame,
            initial_orientation,
            initial_time,
            rotation_rate,
        })
    }

    /// Uniform rotation whose state at `initial_time` comes from `spice_frame`.
    pub fn simple_from_spice(
        base_frame: impl Into<String>,
        target_frame: impl Into<String>,
        spice_frame: impl Into<String>,
        initial_time: f64,
    ) -> Result<Self, ConfigurationError> {
        let (base_frame, target_frame) = frames(base_frame.into(), target_frame.into())?;
        let spice_frame = spice_frame.into();
        validate::name("SPICE frame", &spice_frame)?;
        validate::finite("rotation initial time", initial_time)?;
        Ok(Self::SimpleFromSpice {
            base_frame,
            target_frame,
            spice_frame,
            initial_time,
        })
    }

    /// Rotation read from SPICE between `base_frame` and `target_frame`.
    pub fn spice(
        base_frame: impl Into<String>,
        target_frame: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let (base_frame, target_frame) = frames(base_frame.into(), target_frame.into())?;
        Ok(Self::Spice {
            base_frame,
            target_frame,
        })
    }

    /// Rotation that keeps one face towards `central_body`.
    pub fn synchronous(
        central_body: impl Into<String>,
        base_frame: impl Into<String>,
        target_frame: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let central_body = central_body.into();
        validate::name("synchronous rotation central body", &central_body)?;
        let (base_frame, target_frame) = frames(base_frame.into(), target_frame.into())?;
        Ok(Self::Synchronous {
            central_body,
            base_frame,
            target_frame,
        })
    }

    /// Earth rotation from `base_frame` (GCRS or J2000) to ITRS.
    pub fn gcrs_to_itrs(
        precession_nutation_theory: IauConventions,
        base_frame: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let (base_frame, target_frame) = frames(base_frame.into(), ITRS_FRAME.to_string())?;
        if !GCRS_TO_ITRS_BASE_FRAMES.contains(&base_frame.as_str()) {
            return Err(ConfigurationError::invalid(format!(
                "GCRS to ITRS rotation cannot start from `{base_frame}`; use one of {GCRS_TO_ITRS_BASE_FRAMES:?}"
            )));
        }
        Ok(Self::GcrsToItrs {
            precession_nutation_theory,
            base_frame,
            target_frame,
        })
    }

    /// Fixed orientation of `target_frame` relative to `base_frame`.
    pub fn constant_orientation(
        base_frame: impl Into<String>,
        target_frame: impl Into<String>,
        orientation: UnitQuaternion<f64>,
    ) -> Result<Self, ConfigurationError> {
        let (base_frame, target_frame) = frames(base_frame.into(), target_frame.into())?;
        Ok(Self::ConstantOrientation {
            base_frame,
            target_frame,
            orientation,
        })
    }

    /// Re-run the constructor checks on a value that may have been built directly.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        frames(self.base_frame().to_string(), self.target_frame().to_string())?;
        match self {
            Self::Simple {
                initial_time,
                rotation_rate,
                ..
            } => {
                validate::finite("rotation initial time", *initial_time)?;
                validate::finite("rotation rate", *rotation_rate)?;
            }
            Self::SimpleFromSpice {
                spice_frame,
                initial_time,
                ..
            } => {
                validate::name("SPICE frame", spice_frame)?;
                validate::finite("rotation initial time", *initial_time)?;
            }
            Self::Synchronous { central_body, .. } => {
                validate::name("synchronous rotation central body", central_body)?;
            }
            Self::GcrsToItrs {
                precession_nutation_theory,
                base_frame,
                target_frame,
            } => {
                Self::gcrs_to_itrs(*precession_nutation_theory, base_frame.clone())?;
                if target_frame != ITRS_FRAME {
                    return Err(ConfigurationError::invalid(format!(
                        "GCRS to ITRS rotation must target `{ITRS_FRAME}`, not `{target_frame}`"
                    )));
                }
            }
            Self::Spice { .. } | Self::ConstantOrientation { .. } => {}
        }
        Ok(())
    }

    /// Inertial frame the rotation starts from.
    pub fn base_frame(&self) -> &str {
        match self {
            Self::Simple { base_frame, .. }
            | Self::SimpleFromSpice { base_frame, .. }
            | Self::Spice { base_frame, .. }
            | Self::Synchronous { base_frame, .. }
            | Self::ConstantOrientation { base_frame, .. }
            | Self::GcrsToItrs { base_frame, .. } => base_frame,
        }
    }

    /// Body-fixed frame the rotation ends in.
    pub fn target_frame(&self) -> &str {
        match self {
            Self::Simple { target_frame, .. }
            | Self::SimpleFromSpice { target_frame, .. }
            | Self::Spice { target_frame, .. }
            | Self::Synchronous { target_frame, .. }
            | Self::ConstantOrientation { target_frame, .. }
            | Self::GcrsToItrs { target_frame, .. } => target_frame,
        }
    }

    /// Whether SPICE kernels are read when the model is created.
    pub fn uses_spice(&self) -> bool {
        matches!(self, Self::SimpleFromSpice { .. } | Self::Spice { .. })
    }

    /// Short model name used in summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Simple { .. } => "simple",
            Self::SimpleFromSpice { .. } => "simple_from_spice",
            Self::Spice { .. } => "spice",
            Self::Synchronous { .. } => "synchronous",
            Self::ConstantOrientation { .. } => "constant_orientation",
            Self::GcrsToItrs { .. } => "gcrs_to_itrs",
        }
    }
}
