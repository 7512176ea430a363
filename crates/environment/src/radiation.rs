//! Radiation sources, radiation-pressure targets, and legacy per-source interfaces.

use std::collections::BTreeMap;

use astro_core::vector::{self, Vector3};
use astro_core::{ConfigurationError, validate};
use tracing::warn;

/// Luminosity of an isotropic point source.
#[derive(Debug, Clone, PartialEq)]
pub enum LuminositySettings {
    /// Total emitted power (W).
    Constant(f64),
    /// Derived from an irradiance (W/m²) observed at `distance` (m).
    IrradianceAtDistance { irradiance: f64, distance: f64 },
}

impl LuminositySettings {
    pub fn constant(luminosity: f64) -> Result<Self, ConfigurationError> {
        Ok(Self::Constant(validate::positive("luminosity", luminosity)?))
    }

    pub fn irradiance_at_distance(irradiance: f64, distance: f64) -> Result<Self, ConfigurationError> {
        Ok(Self::IrradianceAtDistance {
            irradiance: validate::positive("irradiance", irradiance)?,
            distance: validate::positive("irradiance reference distance", distance)?,
        })
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Constant(l) => Self::constant(*l).map(drop),
            Self::IrradianceAtDistance {
                irradiance,
                distance,
            } => Self::irradiance_at_distance(*irradiance, *distance).map(drop),
        }
    }

    /// Total luminosity implied by these settings (W).
    pub fn luminosity(&self) -> f64 {
        match self {
            Self::Constant(l) => *l,
            Self::IrradianceAtDistance {
                irradiance,
                distance,
            } => 4.0 * std::f64::consts::PI * distance * distance * irradiance,
        }
    }
}

/// How an optical property varies over the surface of an extended source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfacePropertyDistribution {
    /// Same value everywhere, in `[0, 1]`.
    Constant(f64),
    /// Knocke Earth albedo model.
    KnockeAlbedo,
    /// Knocke Earth infrared emissivity model.
    KnockeEmissivity,
    /// DLAM-1 lunar albedo model.
    Dlam1Albedo,
}

impl SurfacePropertyDistribution {
    pub fn constant(value: f64) -> Result<Self, ConfigurationError> {
        Ok(Self::Constant(validate::in_range(
            "surface property",
            value,
            0.0,
            1.0,
        )?))
    }

    fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Constant(value) => Self::constant(*value).map(drop),
            _ => Ok(()),
        }
    }
}

/// Radiosity model evaluated on every panel of an extended source.
/// Each model re-emits radiation received from `original_source`.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelRadiosityModelSettings {
    /// Diffusely reflected radiation.
    Albedo {
        albedo: SurfacePropertyDistribution,
        original_source: String,
    },
    /// Thermal emission in equilibrium with the average received flux.
    DelayedThermal {
        emissivity: SurfacePropertyDistribution,
        original_source: String,
    },
    /// Thermal emission with a temperature set by the angle to the source,
    /// between `min_temperature` and `max_temperature` (K).
    AngleBasedThermal {
        min_temperature: f64,
        max_temperature: f64,
        emissivity: f64,
        original_source: String,
    },
}

impl PanelRadiosityModelSettings {
    pub fn albedo(
        albedo: SurfacePropertyDistribution,
        original_source: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        albedo.check()?;
        let original_source = original_source.into();
        validate::name("radiosity original source", &original_source)?;
        Ok(Self::Albedo {
            albedo,
            original_source,
        })
    }

    pub fn delayed_thermal(
        emissivity: SurfacePropertyDistribution,
        original_source: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        emissivity.check()?;
        let original_source = original_source.into();
        validate::name("radiosity original source", &original_source)?;
        Ok(Self::DelayedThermal {
            emissivity,
            original_source,
        })
    }

    pub fn angle_based_thermal(
        min_temperature: f64,
        max_temperature: f64,
        emissivity: f64,
        original_source: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        validate::positive("minimum surface temperature", min_temperature)?;
        validate::positive("maximum surface temperature", max_temperature)?;
        if max_temperature < min_temperature {
            return Err(ConfigurationError::invalid(format!(
                "maximum surface temperature {max_temperature} K is below the minimum {min_temperature} K"
            )));
        }
        validate::in_range("emissivity", emissivity, 0.0, 1.0)?;
        let original_source = original_source.into();
        validate::name("radiosity original source", &original_source)?;
        Ok(Self::AngleBasedThermal {
            min_temperature,
            max_temperature,
            emissivity,
            original_source,
        })
    }

    /// Body whose radiation this model re-emits.
    pub fn original_source(&self) -> &str {
        match self {
            Self::Albedo {
                original_source, ..
            }
            | Self::DelayedThermal {
                original_source, ..
            }
            | Self::AngleBasedThermal {
                original_source, ..
            } => original_source,
        }
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Albedo {
                albedo,
                original_source,
            } => Self::albedo(*albedo, original_source.clone()).map(drop),
            Self::DelayedThermal {
                emissivity,
                original_source,
            } => Self::delayed_thermal(*emissivity, original_source.clone()).map(drop),
            Self::AngleBasedThermal {
                min_temperature,
                max_temperature,
                emissivity,
                original_source,
            } => Self::angle_based_thermal(
                *min_temperature,
                *max_temperature,
                *emissivity,
                original_source.clone(),
            )
            .map(drop),
        }
    }
}

/// Body emitting radiation.
#[derive(Debug, Clone, PartialEq)]
pub enum RadiationSourceSettings {
    IsotropicPointSource { luminosity: LuminositySettings },
    /// Surface split into rings of panels that re-emit radiation from other
    /// sources (planetary albedo and infrared).
    Extended {
        panel_radiosity_models: Vec<PanelRadiosityModelSettings>,
        /// Panel count of each ring, from the sub-observer point outwards.
        panels_per_ring: Vec<usize>,
        /// Bodies that may shadow the original sources as seen from a panel.
        occulting_bodies: Vec<String>,
    },
}

impl RadiationSourceSettings {
    pub fn isotropic_point_source(luminosity: LuminositySettings) -> Self {
        Self::IsotropicPointSource { luminosity }
    }

    pub fn extended(
        panel_radiosity_models: Vec<PanelRadiosityModelSettings>,
        panels_per_ring: Vec<usize>,
        occulting_bodies: Vec<String>,
    ) -> Result<Self, ConfigurationError> {
        if panel_radiosity_models.is_empty() {
            return Err(ConfigurationError::EmptyList {
                what: "extended source radiosity models".to_string(),
            });
        }
        if panels_per_ring.is_empty() {
            return Err(ConfigurationError::EmptyList {
                what: "extended source panel rings".to_string(),
            });
        }
        if let Some(ring) = panels_per_ring.iter().position(|&n| n == 0) {
            return Err(ConfigurationError::invalid(format!(
                "extended source ring {ring} has no panels"
            )));
        }
        for name in &occulting_bodies {
            validate::name("occulting body", name)?;
        }
        Ok(Self::Extended {
            panel_radiosity_models,
            panels_per_ring,
            occulting_bodies,
        })
    }

    /// Bodies this source depends on: original sources and occulters.
    pub fn referenced_bodies(&self) -> Vec<&str> {
        match self {
            Self::IsotropicPointSource { .. } => Vec::new(),
            Self::Extended {
                panel_radiosity_models,
                occulting_bodies,
                ..
            } => panel_radiosity_models
                .iter()
                .map(PanelRadiosityModelSettings::original_source)
                .chain(occulting_bodies.iter().map(String::as_str))
                .collect(),
        }
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::IsotropicPointSource { luminosity } => luminosity.check(),
            Self::Extended {
                panel_radiosity_models,
                panels_per_ring,
                occulting_bodies,
            } => {
                for model in panel_radiosity_models {
                    model.check()?;
                }
                Self::extended(
                    panel_radiosity_models.clone(),
                    panels_per_ring.clone(),
                    occulting_bodies.clone(),
                )
                .map(drop)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::IsotropicPointSource { .. } => "isotropic_point_source",
            Self::Extended { .. } => "extended",
        }
    }
}

/// Bodies whose shadow is considered when computing radiation pressure.
#[derive(Debug, Clone, PartialEq)]
pub enum OccultingBodies {
    /// Same occulters for every source. May be empty (no shadowing).
    Global(Vec<String>),
    /// Occulters listed per source body. Every listed source needs at least one occulter.
    PerSource(BTreeMap<String, Vec<String>>),
}

impl Default for OccultingBodies {
    fn default() -> Self {
        Self::Global(Vec::new())
    }
}

impl OccultingBodies {
    pub fn global<I, S>(names: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        for name in &names {
            validate::name("occulting body", name)?;
        }
        Ok(Self::Global(names))
    }

    pub fn per_source(map: BTreeMap<String, Vec<String>>) -> Result<Self, ConfigurationError> {
        for (source, occulters) in &map {
            validate::name("radiation source", source)?;
            if occulters.is_empty() {
                return Err(ConfigurationError::EmptyList {
                    what: format!("occulting bodies for source `{source}`"),
                });
            }
            for name in occulters {
                validate::name("occulting body", name)?;
            }
        }
        Ok(Self::PerSource(map))
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Global(names) => {
                for name in names {
                    validate::name("occulting body", name)?;
                }
                Ok(())
            }
            Self::PerSource(map) => Self::per_source(map.clone()).map(drop),
        }
    }

    /// Occulters that apply to radiation emitted by `source`.
    pub fn for_source(&self, source: &str) -> &[String] {
        match self {
            Self::Global(names) => names,
            Self::PerSource(map) => map.get(source).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Every body name referenced, occulters and per-source keys alike.
    pub fn referenced_bodies(&self) -> Vec<&str> {
        match self {
            Self::Global(names) => names.iter().map(String::as_str).collect(),
            Self::PerSource(map) => map
                .iter()
                .flat_map(|(source, occulters)| {
                    std::iter::once(source.as_str()).chain(occulters.iter().map(String::as_str))
                })
                .collect(),
        }
    }
}

/// Orientation of a panel's outward normal.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelNormal {
    /// Unit vector fixed in the body frame.
    Fixed(Vector3),
    /// Points towards (or away from) another body.
    TrackingBody { body: String, towards: bool },
}

impl PanelNormal {
    pub fn fixed(direction: Vector3) -> Result<Self, ConfigurationError> {
        Ok(Self::Fixed(vector::normalize(&direction, "panel normal")?))
    }

    pub fn tracking(body: impl Into<String>, towards: bool) -> Result<Self, ConfigurationError> {
        let body = body.into();
        validate::name("panel tracking body", &body)?;
        Ok(Self::TrackingBody { body, towards })
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Fixed(direction) => {
                let unit = vector::normalize(direction, "panel normal")?;
                if (vector::norm(direction) - 1.0).abs() > 1e-9 {
                    return Err(ConfigurationError::invalid(format!(
                        "panel normal {direction:?} is not a unit vector; expected {unit:?}"
                    )));
                }
                Ok(())
            }
            Self::TrackingBody { body, .. } => validate::name("panel tracking body", body),
        }
    }
}

/// Single flat panel of a paneled radiation-pressure target.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSettings {
    pub area: f64,
    pub specular_reflectivity: f64,
    pub diffuse_reflectivity: f64,
    pub with_instantaneous_reradiation: bool,
    pub normal: PanelNormal,
}

impl PanelSettings {
    pub fn new(
        area: f64,
        specular_reflectivity: f64,
        diffuse_reflectivity: f64,
        with_instantaneous_reradiation: bool,
        normal: PanelNormal,
    ) -> Result<Self, ConfigurationError> {
        validate::positive("panel area", area)?;
        validate::in_range("specular reflectivity", specular_reflectivity, 0.0, 1.0)?;
        validate::in_range("diffuse reflectivity", diffuse_reflectivity, 0.0, 1.0)?;
        let total = specular_reflectivity + diffuse_reflectivity;
        if total > 1.0 {
            return Err(ConfigurationError::OutOfRange {
                quantity: "specular + diffuse reflectivity",
                value: total,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(Self {
            area,
            specular_reflectivity,
            diffuse_reflectivity,
            with_instantaneous_reradiation,
            normal,
        })
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        self.normal.check()?;
        Self::new(
            self.area,
            self.specular_reflectivity,
            self.diffuse_reflectivity,
            self.with_instantaneous_reradiation,
            self.normal.clone(),
        )
        .map(drop)
    }

    /// Fraction of incoming radiation absorbed by the panel.
    pub fn absorptivity(&self) -> f64 {
        1.0 - self.specular_reflectivity - self.diffuse_reflectivity
    }
}

/// How a body responds to incoming radiation.
#[derive(Debug, Clone, PartialEq)]
pub enum RadiationPressureTargetSettings {
    Cannonball {
        reference_area: f64,
        radiation_pressure_coefficient: f64,
        occulting_bodies: OccultingBodies,
    },
    Paneled {
        panels: Vec<PanelSettings>,
        occulting_bodies: OccultingBodies,
    },
}

impl RadiationPressureTargetSettings {
    pub fn cannonball(
        reference_area: f64,
        radiation_pressure_coefficient: f64,
        occulting_bodies: OccultingBodies,
    ) -> Result<Self, ConfigurationError> {
        validate::positive("cannonball reference area", reference_area)?;
        validate::non_negative(
            "radiation pressure coefficient",
            radiation_pressure_coefficient,
        )?;
        if radiation_pressure_coefficient > 2.0 {
            warn!(
                radiation_pressure_coefficient,
                "radiation pressure coefficient above 2 exceeds a perfect reflector"
            );
        }
        Ok(Self::Cannonball {
            reference_area,
            radiation_pressure_coefficient,
            occulting_bodies,
        })
    }

    pub fn paneled(
        panels: Vec<PanelSettings>,
        occulting_bodies: OccultingBodies,
    ) -> Result<Self, ConfigurationError> {
        if panels.is_empty() {
            return Err(ConfigurationError::EmptyList {
                what: "paneled radiation target panels".to_string(),
            });
        }
        Ok(Self::Paneled {
            panels,
            occulting_bodies,
        })
    }

    /// Append a panel; only paneled targets accept panels.
    pub fn add_panel(&mut self, panel: PanelSettings) -> Result<(), ConfigurationError> {
        match self {
            Self::Paneled { panels, .. } => {
                panels.push(panel);
                Ok(())
            }
            Self::Cannonball { .. } => Err(ConfigurationError::invalid(
                "cannot add a panel to a cannonball radiation target",
            )),
        }
    }

    /// Re-run the constructor checks on a value that may have been built directly.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Cannonball {
                reference_area,
                radiation_pressure_coefficient,
                occulting_bodies,
            } => {
                validate::positive("cannonball reference area", *reference_area)?;
                validate::non_negative(
                    "radiation pressure coefficient",
                    *radiation_pressure_coefficient,
                )?;
                occulting_bodies.check()
            }
            Self::Paneled {
                panels,
                occulting_bodies,
            } => {
                if panels.is_empty() {
                    return Err(ConfigurationError::EmptyList {
                        what: "paneled radiation target panels".to_string(),
                    });
                }
                for panel in panels {
                    panel.check()?;
                }
                occulting_bodies.check()
            }
        }
    }

    pub fn occulting_bodies(&self) -> &OccultingBodies {
        match self {
            Self::Cannonball {
                occulting_bodies, ..
            }
            | Self::Paneled {
                occulting_bodies, ..
            } => occulting_bodies,
        }
    }

    pub fn panels(&self) -> &[PanelSettings] {
        match self {
            Self::Paneled { panels, .. } => panels,
            Self::Cannonball { .. } => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cannonball { .. } => "cannonball",
            Self::Paneled { .. } => "paneled",
        }
    }
}

/// Legacy cannonball interface tied to one specific source body.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiationPressureInterfaceSettings {
    pub source_body: String,
    pub reference_area: f64,
    pub radiation_pressure_coefficient: f64,
    pub occulting_bodies: Vec<String>,
}

impl RadiationPressureInterfaceSettings {
    pub fn cannonball(
        source_body: impl Into<String>,
        reference_area: f64,
        radiation_pressure_coefficient: f64,
        occulting_bodies: Vec<String>,
    ) -> Result<Self, ConfigurationError> {
        let source_body = source_body.into();
        validate::name("radiation source", &source_body)?;
        validate::positive("cannonball reference area", reference_area)?;
        validate::non_negative(
            "radiation pressure coefficient",
            radiation_pressure_coefficient,
        )?;
        for name in &occulting_bodies {
            validate::name("occulting body", name)?;
        }
        Ok(Self {
            source_body,
            reference_area,
            radiation_pressure_coefficient,
            occulting_bodies,
        })
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        Self::cannonball(
            self.source_body.clone(),
            self.reference_area,
            self.radiation_pressure_coefficient,
            self.occulting_bodies.clone(),
        )
        .map(drop)
    }
}
