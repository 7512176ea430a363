//! Gravity field settings.

use astro_core::constants::GRAVITATIONAL_CONSTANT;
use astro_core::{ConfigurationError, validate};
use nalgebra::{DMatrix, Matrix3};

/// Gravity field model attached to a body.
#[derive(Debug, Clone, PartialEq)]
pub enum GravityFieldSettings {
    /// Point-mass field with an explicit gravitational parameter (m³/s²).
    Central { gravitational_parameter: f64 },
    /// Point-mass field whose gravitational parameter is read from SPICE kernels.
    CentralSpice,
    /// Spherical harmonic expansion.
    SphericalHarmonics(SphericalHarmonicsGravity),
}

impl GravityFieldSettings {
    /// Point-mass gravity with a validated gravitational parameter.
    pub fn central(gravitational_parameter: f64) -> Result<Self, ConfigurationError> {
        validate::positive("gravitational parameter", gravitational_parameter)?;
        Ok(Self::Central {
            gravitational_parameter,
        })
    }

    /// Gravitational parameter if it is known without consulting kernels.
    pub fn gravitational_parameter(&self) -> Option<f64> {
        match self {
            Self::Central {
                gravitational_parameter,
            } => Some(*gravitational_parameter),
            Self::CentralSpice => None,
            Self::SphericalHarmonics(sh) => Some(sh.gravitational_parameter()),
        }
    }

    /// Re-run the constructor checks on a value that may have been built directly.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Central {
                gravitational_parameter,
            } => validate::positive("gravitational parameter", *gravitational_parameter).map(drop),
            Self::CentralSpice | Self::SphericalHarmonics(_) => Ok(()),
        }
    }

    /// Spherical harmonic expansion, if this is one.
    pub fn spherical_harmonics(&self) -> Option<&SphericalHarmonicsGravity> {
        match self {
            Self::SphericalHarmonics(sh) => Some(sh),
            _ => None,
        }
    }

    /// Short model name used in summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Central { .. } => "central",
            Self::CentralSpice => "central_spice",
            Self::SphericalHarmonics(_) => "spherical_harmonics",
        }
    }
}

/// Spherical harmonic coefficients with their reference quantities.
///
/// Row `n`, column `m` of each matrix holds the degree-`n`, order-`m`
/// coefficient. Both matrices share a shape and the table never holds more
/// orders than degrees. Fields are private so a value always satisfies these
/// checks.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalHarmonicsGravity {
    gravitational_parameter: f64,
    reference_radius: f64,
    cosine_coefficients: DMatrix<f64>,
    sine_coefficients: DMatrix<f64>,
    associated_reference_frame: String,
    normalized: bool,
    scaled_mean_moment_of_inertia: Option<f64>,
}

impl SphericalHarmonicsGravity {
    /// Geodesy-normalized field from full cosine/sine tables.
    pub fn new(
        gravitational_parameter: f64,
        reference_radius: f64,
        cosine_coefficients: DMatrix<f64>,
        sine_coefficients: DMatrix<f64>,
        associated_reference_frame: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        validate::positive("gravitational parameter", gravitational_parameter)?;
        validate::positive("reference radius", reference_radius)?;
        let associated_reference_frame = associated_reference_frame.into();
        validate::name("associated reference frame", &associated_reference_frame)?;

        if cosine_coefficients.shape() != sine_coefficients.shape() {
            return Err(ConfigurationError::DimensionMismatch {
                what: "sine coefficient matrix",
                expected: shape_label(cosine_coefficients.shape()),
                found: shape_label(sine_coefficients.shape()),
            });
        }
        let (rows, cols) = cosine_coefficients.shape();
        if rows == 0 || cols == 0 {
            return Err(ConfigurationError::EmptyList {
                what: "spherical harmonic coefficient table".to_string(),
            });
        }
        if cols > rows {
            return Err(ConfigurationError::DimensionMismatch {
                what: "spherical harmonic coefficient table (orders must not exceed degrees)",
                expected: format!("at most {rows} columns"),
                found: format!("{cols} columns"),
            });
        }
        if cosine_coefficients.iter().any(|c| !c.is_finite())
            || sine_coefficients.iter().any(|s| !s.is_finite())
        {
            return Err(ConfigurationError::NonFinite {
                quantity: "spherical harmonic coefficient",
            });
        }
        if let Some(degree) = sine_coefficients.column(0).iter().position(|s| *s != 0.0) {
            return Err(ConfigurationError::invalid(format!(
                "order-zero sine coefficient of degree {degree} must be zero"
            )));
        }

        Ok(Self {
            gravitational_parameter,
            reference_radius,
            cosine_coefficients,
            sine_coefficients,
            associated_reference_frame,
            normalized: true,
            scaled_mean_moment_of_inertia: None,
        })
    }

    /// Unnormalized zonal field from `J2, J3, ...` (`C_n0 = -J_n`).
    pub fn from_zonal(
        gravitational_parameter: f64,
        reference_radius: f64,
        zonal_coefficients: &[f64],
        associated_reference_frame: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let rows = zonal_coefficients.len() + 2;
        let mut cosine = DMatrix::zeros(rows, 1);
        cosine[(0, 0)] = 1.0;
        for (i, j) in zonal_coefficients.iter().enumerate() {
            cosine[(i + 2, 0)] = -j;
        }
        let sine = DMatrix::zeros(rows, 1);
        Self::new(
            gravitational_parameter,
            reference_radius,
            cosine,
            sine,
            associated_reference_frame,
        )
        .map(|sh| sh.with_normalization(false))
    }

    /// Mark whether the coefficients are geodesy-normalized (the default).
    pub fn with_normalization(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Attach the mean moment of inertia divided by `M R²` (0.4 for a
    /// uniform sphere), which fixes the body's inertia tensor.
    pub fn with_scaled_mean_moment_of_inertia(
        mut self,
        scaled_mean_moment_of_inertia: f64,
    ) -> Result<Self, ConfigurationError> {
        validate::positive("scaled mean moment of inertia", scaled_mean_moment_of_inertia)?;
        validate::in_range(
            "scaled mean moment of inertia",
            scaled_mean_moment_of_inertia,
            0.0,
            1.0,
        )?;
        self.scaled_mean_moment_of_inertia = Some(scaled_mean_moment_of_inertia);
        Ok(self)
    }

    /// Gravitational parameter (m³/s²).
    pub fn gravitational_parameter(&self) -> f64 {
        self.gravitational_parameter
    }

    /// Reference radius of the expansion (m).
    pub fn reference_radius(&self) -> f64 {
        self.reference_radius
    }

    /// Cosine coefficient table, rows by degree and columns by order.
    pub fn cosine_coefficients(&self) -> &DMatrix<f64> {
        &self.cosine_coefficients
    }

    /// Sine coefficient table, same layout as the cosine one.
    pub fn sine_coefficients(&self) -> &DMatrix<f64> {
        &self.sine_coefficients
    }

    /// Body-fixed frame the coefficients are expressed in.
    pub fn associated_reference_frame(&self) -> &str {
        &self.associated_reference_frame
    }

    /// `true` for geodesy-normalized coefficients.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Mean moment of inertia over `M R²`, if set.
    pub fn scaled_mean_moment_of_inertia(&self) -> Option<f64> {
        self.scaled_mean_moment_of_inertia
    }

    /// Inertia tensor (kg m²) in the associated frame, from the degree-2
    /// coefficients and the scaled mean moment of inertia. `None` until a
    /// mean moment of inertia is set.
    pub fn inertia_tensor(&self) -> Option<Matrix3<f64>> {
        let mean = self.scaled_mean_moment_of_inertia?;
        let degree_two = |table: &DMatrix<f64>, order: usize| {
            let value = table.get((2, order)).copied().unwrap_or(0.0);
            if self.normalized {
                value * degree_two_normalization(order)
            } else {
                value
            }
        };
        let c20 = degree_two(&self.cosine_coefficients, 0);
        let c21 = degree_two(&self.cosine_coefficients, 1);
        let c22 = degree_two(&self.cosine_coefficients, 2);
        let s21 = degree_two(&self.sine_coefficients, 1);
        let s22 = degree_two(&self.sine_coefficients, 2);
        #[rustfmt::skip]
        let scaled = Matrix3::new(
            c20 / 3.0 - 2.0 * c22, -2.0 * s22,            -c21,
            -2.0 * s22,            c20 / 3.0 + 2.0 * c22, -s21,
            -c21,                  -s21,                  -2.0 * c20 / 3.0,
        ) + Matrix3::identity() * mean;
        let mass = self.gravitational_parameter / GRAVITATIONAL_CONSTANT;
        Some(scaled * (mass * self.reference_radius * self.reference_radius))
    }

    /// Highest degree present in the table.
    pub fn max_degree(&self) -> usize {
        self.cosine_coefficients.nrows() - 1
    }

    /// Highest order present in the table.
    pub fn max_order(&self) -> usize {
        self.cosine_coefficients.ncols() - 1
    }

    /// Whether an expansion up to `degree`/`order` can be evaluated from this table.
    pub fn supports(&self, degree: usize, order: usize) -> bool {
        degree <= self.max_degree() && order <= self.max_order()
    }

    /// Copy of the field limited to `degree`/`order`.
    pub fn truncated(
        &self,
        body: &str,
        degree: usize,
        order: usize,
    ) -> Result<Self, ConfigurationError> {
        if !self.supports(degree, order) {
            return Err(ConfigurationError::DegreeOrderExceeded {
                body: body.to_string(),
                requested_degree: degree,
                requested_order: order,
                available_degree: self.max_degree(),
                available_order: self.max_order(),
            });
        }
        let order = order.min(degree);
        Ok(Self {
            cosine_coefficients: self
                .cosine_coefficients
                .view((0, 0), (degree + 1, order + 1))
                .into_owned(),
            sine_coefficients: self
                .sine_coefficients
                .view((0, 0), (degree + 1, order + 1))
                .into_owned(),
            ..self.clone()
        })
    }
}

/// Factor turning a normalized degree-2 coefficient of `order` into an unnormalized one.
fn degree_two_normalization(order: usize) -> f64 {
    match order {
        0 => 5.0_f64.sqrt(),
        1 => (5.0_f64 / 3.0).sqrt(),
        _ => (5.0_f64 / 12.0).sqrt(),
    }
}

fn shape_label((rows, cols): (usize, usize)) -> String {
    format!("{rows}x{cols}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth_like() -> SphericalHarmonicsGravity {
        let cosine = DMatrix::from_row_slice(
            3,
            3,
            &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -4.84e-4, -2.0e-10, 2.44e-6],
        );
        let sine = DMatrix::from_row_slice(3, 3, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.4e-9, -1.4e-6]);
        SphericalHarmonicsGravity::new(3.986_004_418e14, 6_378_137.0, cosine, sine, "IAU_Earth")
            .expect("valid field")
    }

    #[test]
    fn mismatched_coefficient_shapes_are_rejected() {
        let cosine = DMatrix::zeros(3, 3);
        let sine = DMatrix::zeros(3, 2);
        let err = SphericalHarmonicsGravity::new(1.0, 1.0, cosine, sine, "IAU_Earth").unwrap_err();
        assert!(matches!(err, ConfigurationError::DimensionMismatch { .. }));
    }

    #[test]
    fn more_orders_than_degrees_is_rejected() {
        let err = SphericalHarmonicsGravity::new(
            1.0,
            1.0,
            DMatrix::zeros(2, 3),
            DMatrix::zeros(2, 3),
            "IAU_Earth",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::DimensionMismatch { .. }));
    }

    #[test]
    fn nonzero_order_zero_sine_is_rejected() {
        let mut sine = DMatrix::zeros(3, 3);
        sine[(2, 0)] = 1.0e-6;
        let err = SphericalHarmonicsGravity::new(1.0, 1.0, DMatrix::zeros(3, 3), sine, "IAU_Earth")
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::Invalid { .. }));
    }

    #[test]
    fn fields_read_back_unchanged() {
        let field = earth_like();
        assert_eq!(field.gravitational_parameter(), 3.986_004_418e14);
        assert_eq!(field.reference_radius(), 6_378_137.0);
        assert_eq!(field.cosine_coefficients()[(2, 0)], -4.84e-4);
        assert_eq!(field.sine_coefficients()[(2, 2)], -1.4e-6);
        assert_eq!(field.associated_reference_frame(), "IAU_Earth");
        assert_eq!((field.max_degree(), field.max_order()), (2, 2));
        assert!(field.is_normalized());
    }

    #[test]
    fn truncation_respects_table_size() {
        let field = earth_like();
        let truncated = field.truncated("Earth", 2, 0).unwrap();
        assert_eq!(truncated.cosine_coefficients().shape(), (3, 1));
        let err = field.truncated("Earth", 4, 4).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::DegreeOrderExceeded {
                available_degree: 2,
                ..
            }
        ));
    }

    #[test]
    fn zonal_field_stores_negated_j_terms() {
        let field = SphericalHarmonicsGravity::from_zonal(
            4.282_837e13,
            3_396_200.0,
            &[1.960_45e-3],
            "IAU_Mars",
        )
        .unwrap();
        assert_eq!(field.max_degree(), 2);
        assert_eq!(field.max_order(), 0);
        assert_eq!(field.cosine_coefficients()[(2, 0)], -1.960_45e-3);
        assert!(!field.is_normalized());
    }

    #[test]
    fn inertia_tensor_follows_j2() {
        let j2 = 1.082_6e-3;
        let field = SphericalHarmonicsGravity::from_zonal(3.986_004_418e14, 6.378e6, &[j2], "IAU_Earth")
            .unwrap();
        assert!(field.inertia_tensor().is_none());
        let field = field.with_scaled_mean_moment_of_inertia(0.3307).unwrap();
        let tensor = field.inertia_tensor().unwrap();
        let mr2 = 3.986_004_418e14 / GRAVITATIONAL_CONSTANT * 6.378e6 * 6.378e6;
        assert!(((tensor[(2, 2)] - tensor[(0, 0)]) / mr2 - j2).abs() < 1e-12);
        assert_eq!(tensor[(0, 0)], tensor[(1, 1)]);
        assert_eq!(tensor[(0, 1)], 0.0);
    }

    #[test]
    fn normalized_and_unnormalized_tables_give_the_same_tensor() {
        let c20 = -4.841_65e-4;
        let mut cosine = DMatrix::zeros(3, 1);
        cosine[(0, 0)] = 1.0;
        cosine[(2, 0)] = c20;
        let normalized =
            SphericalHarmonicsGravity::new(1.0e14, 6.0e6, cosine.clone(), DMatrix::zeros(3, 1), "IAU_Earth")
                .unwrap()
                .with_scaled_mean_moment_of_inertia(0.33)
                .unwrap();
        cosine[(2, 0)] = c20 * 5.0_f64.sqrt();
        let raw = SphericalHarmonicsGravity::new(1.0e14, 6.0e6, cosine, DMatrix::zeros(3, 1), "IAU_Earth")
            .unwrap()
            .with_normalization(false)
            .with_scaled_mean_moment_of_inertia(0.33)
            .unwrap();
        let difference = normalized.inertia_tensor().unwrap() - raw.inertia_tensor().unwrap();
        assert!(difference.abs().max() < 1e-6 * raw.inertia_tensor().unwrap().abs().max());
    }

    #[test]
    fn scaled_mean_moment_of_inertia_is_bounded() {
        let field = earth_like();
        assert!(field.clone().with_scaled_mean_moment_of_inertia(0.0).is_err());
        assert!(field.clone().with_scaled_mean_moment_of_inertia(1.2).is_err());
        let field = field.with_scaled_mean_moment_of_inertia(0.4).unwrap();
        assert_eq!(field.truncated("Earth", 2, 0).unwrap().scaled_mean_moment_of_inertia(), Some(0.4));
    }

    #[test]
    fn central_gravity_requires_positive_parameter() {
        assert!(GravityFieldSettings::central(-3.0).is_err());
        let field = GravityFieldSettings::central(4.9e12).unwrap();
        assert_eq!(field.gravitational_parameter(), Some(4.9e12));
    }
}
