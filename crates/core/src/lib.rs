//! Core units, constants, and shared primitives for the astro_setup workspace.

pub mod error;

pub use error::ConfigurationError;

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Newtonian constant of gravitation (m³ kg⁻¹ s⁻²).
    pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;
    /// Metres per astronomical unit.
    pub const AU_M: f64 = 149_597_870_700.0;
    /// Nominal solar luminosity (W).
    pub const SOLAR_LUMINOSITY: f64 = 3.828e26;
    /// Name used for the solar-system barycentre as a frame origin.
    pub const SOLAR_SYSTEM_BARYCENTER: &str = "SSB";
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Rotation rate (rad/s) of a body with the given sidereal period in hours.
    #[inline]
    pub fn rotation_rate_from_period_hours(period_hours: f64) -> f64 {
        2.0 * std::f64::consts::PI / (period_hours * 3_600.0)
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    use crate::ConfigurationError;

    /// Alias for a 3D vector; units depend on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector along `v`; zero or non-finite vectors are rejected.
    pub fn normalize(v: &Vector3, quantity: &'static str) -> Result<Vector3, ConfigurationError> {
        let n = norm(v);
        if !n.is_finite() {
            return Err(ConfigurationError::NonFinite { quantity });
        }
        if n == 0.0 {
            return Err(ConfigurationError::NonPositive { quantity, value: n });
        }
        Ok(scale(v, 1.0 / n))
    }
}

/// Validation helpers returning the checked value so they can be used inline.
pub mod validate {
    use crate::ConfigurationError;

    /// Require a finite value.
    pub fn finite(quantity: &'static str, value: f64) -> Result<f64, ConfigurationError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigurationError::NonFinite { quantity })
        }
    }

    /// Require a finite, strictly positive value.
    pub fn positive(quantity: &'static str, value: f64) -> Result<f64, ConfigurationError> {
        finite(quantity, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigurationError::NonPositive { quantity, value })
        }
    }

    /// Require a finite value that is zero or larger.
    pub fn non_negative(quantity: &'static str, value: f64) -> Result<f64, ConfigurationError> {
        finite(quantity, value)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(ConfigurationError::Negative { quantity, value })
        }
    }

    /// Require a finite value inside the closed interval `[min, max]`.
    pub fn in_range(
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<f64, ConfigurationError> {
        finite(quantity, value)?;
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(ConfigurationError::OutOfRange {
                quantity,
                value,
                min,
                max,
            })
        }
    }

    /// Require a non-empty, non-blank name.
    pub fn name(what: &'static str, value: &str) -> Result<(), ConfigurationError> {
        if value.trim().is_empty() {
            Err(ConfigurationError::EmptyName { what })
        } else {
            Ok(())
        }
    }
}
