//! Scenario manifests: serde records for bodies and accelerations, and their
//! loaders. Conversion into validated settings lives in [`convert`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use astro_core::ConfigurationError;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub mod convert;

/// Global frame orientation used when no manifest names one.
pub const DEFAULT_FRAME_ORIENTATION: &str = "ECLIPJ2000";

fn default_true() -> bool {
    true
}

/// Top-level scenario manifest.
///
/// Frame fields stay unset until a manifest names them so that directory
/// merges can tell an explicit frame from a default one.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub frame_origin: Option<String>,
    #[serde(default)]
    pub frame_orientation: Option<String>,
    /// Catalogued bodies created with default settings before `bodies` is applied.
    #[serde(default)]
    pub default_bodies: Vec<String>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub accelerations: Vec<AccelerationConfig>,
}

/// Per-body manifest entry. Present fields overwrite whatever the body already has.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    #[serde(default)]
    pub mass_kg: Option<f64>,
    #[serde(default)]
    pub gravity_field: Option<GravityFieldConfig>,
    #[serde(default)]
    pub atmosphere: Option<AtmosphereConfig>,
    #[serde(default)]
    pub wind: Option<WindConfig>,
    #[serde(default)]
    pub ephemeris: Option<EphemerisConfig>,
    #[serde(default)]
    pub rotation_model: Option<RotationConfig>,
    #[serde(default)]
    pub shape_model: Option<ShapeConfig>,
    #[serde(default)]
    pub aerodynamic_coefficients: Option<AerodynamicConfig>,
    #[serde(default)]
    pub radiation_source: Option<RadiationSourceConfig>,
    #[serde(default)]
    pub radiation_pressure_target: Option<RadiationTargetConfig>,
    #[serde(default)]
    pub radiation_pressure_interfaces: Vec<RadiationInterfaceConfig>,
    #[serde(default)]
    pub ground_stations: Vec<GroundStationConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GravityFieldConfig {
    Central {
        gravitational_parameter: f64,
    },
    CentralSpice,
    SphericalHarmonics {
        gravitational_parameter: f64,
        reference_radius: f64,
        cosine_coefficients: Vec<Vec<f64>>,
        sine_coefficients: Vec<Vec<f64>>,
        associated_reference_frame: String,
        #[serde(default = "default_true")]
        normalized: bool,
        #[serde(default)]
        scaled_mean_moment_of_inertia: Option<f64>,
    },
    Zonal {
        gravitational_parameter: f64,
        reference_radius: f64,
        zonal_coefficients: Vec<f64>,
        associated_reference_frame: String,
        #[serde(default)]
        scaled_mean_moment_of_inertia: Option<f64>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AtmosphereVariableConfig {
    Altitude,
    Longitude,
    Latitude,
    Time,
    Density,
    Pressure,
    Temperature,
    GasConstant,
    SpecificHeatRatio,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AtmosphereConfig {
    Exponential {
        scale_height: f64,
        constant_temperature: f64,
        density_at_zero_altitude: f64,
        specific_gas_constant: f64,
        #[serde(default)]
        ratio_of_specific_heats: Option<f64>,
    },
    Tabulated {
        file: PathBuf,
        independent_variables: Vec<AtmosphereVariableConfig>,
        dependent_variables: Vec<AtmosphereVariableConfig>,
    },
    Nrlmsise00 {
        space_weather_file: PathBuf,
    },
    /// Density of `base` multiplied by `scaling_factor`.
    Scaled {
        base: Box<AtmosphereConfig>,
        scaling_factor: f64,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindConfig {
    Constant {
        velocity: [f64; 3],
        #[serde(default)]
        frame: Option<String>,
    },
    CoRotating,
    #[serde(other)]
    Unsupported,
}

/// Ephemeris entry; frame fields default to the scenario's global frame.
#[derive(Debug, Deserialize, Clone)]
pub struct EphemerisConfig {
    #[serde(default)]
    pub frame_origin: Option<String>,
    #[serde(default)]
    pub frame_orientation: Option<String>,
    #[serde(flatten)]
    pub model: EphemerisModelConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TabulatedStateConfig {
    pub epoch: f64,
    pub state: [f64; 6],
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EphemerisModelConfig {
    DirectSpice {
        #[serde(default)]
        correct_for_stellar_aberration: bool,
        #[serde(default)]
        correct_for_light_time: bool,
    },
    InterpolatedSpice {
        initial_time: f64,
        final_time: f64,
        time_step: f64,
        #[serde(default = "default_interpolation_order")]
        interpolation_order: usize,
    },
    ApproximateJplPlanet {
        #[serde(default)]
        body: Option<String>,
    },
    Constant {
        state: [f64; 6],
    },
    Keplerian {
        initial_elements: [f64; 6],
        epoch: f64,
        central_body_gravitational_parameter: f64,
    },
    Tabulated {
        states: Vec<TabulatedStateConfig>,
    },
    /// States of `base` multiplied by `scaling_factor`, in this entry's frame.
    Scaled {
        base: Box<EphemerisModelConfig>,
        scaling_factor: f64,
    },
    #[serde(other)]
    Unsupported,
}

fn default_interpolation_order() -> usize {
    6
}

fn identity_quaternion() -> [f64; 4] {
    [1.0, 0.0, 0.0, 0.0]
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RotationConfig {
    Simple {
        #[serde(default)]
        base_frame: Option<String>,
        target_frame: String,
        /// `[w, x, y, z]`
        #[serde(default = "identity_quaternion")]
        initial_orientation: [f64; 4],
        #[serde(default)]
        initial_time: f64,
        rotation_rate: f64,
    },
    SimpleFromSpice {
        #[serde(default)]
        base_frame: Option<String>,
        target_frame: String,
        spice_frame: String,
        #[serde(default)]
        initial_time: f64,
    },
    Spice {
        #[serde(default)]
        base_frame: Option<String>,
        target_frame: String,
    },
    Synchronous {
        central_body: String,
        #[serde(default)]
        base_frame: Option<String>,
        target_frame: String,
    },
    ConstantOrientation {
        #[serde(default)]
        base_frame: Option<String>,
        target_frame: String,
        orientation: [f64; 4],
    },
    /// Earth orientation; the base frame defaults to `J2000`.
    GcrsToItrs {
        #[serde(default)]
        precession_nutation_theory: IauConventionsConfig,
        #[serde(default)]
        base_frame: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum IauConventionsConfig {
    #[serde(rename = "iau_2000_a")]
    Iau2000A,
    #[serde(rename = "iau_2000_b")]
    Iau2000B,
    #[default]
    #[serde(rename = "iau_2006")]
    Iau2006,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeConfig {
    Spherical {
        radius: f64,
    },
    SphericalSpice,
    OblateSpheroid {
        equatorial_radius: f64,
        flattening: f64,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AerodynamicConfig {
    Constant {
        reference_area: f64,
        drag_coefficient: f64,
        #[serde(default)]
        side_force_coefficient: f64,
        #[serde(default)]
        lift_coefficient: f64,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RadiationSourceConfig {
    /// Either `luminosity` or `irradiance` with `distance`.
    IsotropicPointSource {
        #[serde(default)]
        luminosity: Option<f64>,
        #[serde(default)]
        irradiance: Option<f64>,
        #[serde(default)]
        distance: Option<f64>,
    },
    Extended {
        panel_radiosity_models: Vec<RadiosityModelConfig>,
        panels_per_ring: Vec<usize>,
        #[serde(default)]
        occulting_bodies: Vec<String>,
    },
    #[serde(other)]
    Unsupported,
}

/// Named surface distribution models of an extended source.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceModelConfig {
    KnockeAlbedo,
    KnockeEmissivity,
    Dlam1Albedo,
}

/// A constant value or the name of a surface distribution model.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(untagged)]
pub enum SurfacePropertyConfig {
    Constant(f64),
    Model(SurfaceModelConfig),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RadiosityModelConfig {
    Albedo {
        albedo: SurfacePropertyConfig,
        original_source: String,
    },
    DelayedThermal {
        emissivity: SurfacePropertyConfig,
        original_source: String,
    },
    AngleBasedThermal {
        min_temperature: f64,
        max_temperature: f64,
        emissivity: f64,
        original_source: String,
    },
    #[serde(other)]
    Unsupported,
}

/// Occulting bodies as a plain list or as a per-source map.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum OccultingConfig {
    List(Vec<String>),
    PerSource(BTreeMap<String, Vec<String>>),
}

impl Default for OccultingConfig {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelConfig {
    pub area: f64,
    pub specular_reflectivity: f64,
    pub diffuse_reflectivity: f64,
    #[serde(default)]
    pub instantaneous_reradiation: bool,
    #[serde(default)]
    pub normal: Option<[f64; 3]>,
    #[serde(default)]
    pub tracking_body: Option<String>,
    #[serde(default = "default_true")]
    pub towards: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RadiationTargetConfig {
    Cannonball {
        reference_area: f64,
        radiation_pressure_coefficient: f64,
        #[serde(default)]
        occulting_bodies: OccultingConfig,
    },
    Paneled {
        panels: Vec<PanelConfig>,
        #[serde(default)]
        occulting_bodies: OccultingConfig,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RadiationInterfaceConfig {
    pub source_body: String,
    pub reference_area: f64,
    pub radiation_pressure_coefficient: f64,
    #[serde(default)]
    pub occulting_bodies: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GroundStationConfig {
    pub name: String,
    pub position: StationPositionConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StationPositionConfig {
    /// Body-fixed position in metres.
    Cartesian { position: [f64; 3] },
    /// Altitude in metres, latitude and longitude in degrees.
    Geodetic {
        #[serde(default)]
        altitude: f64,
        latitude_deg: f64,
        longitude_deg: f64,
    },
    #[serde(other)]
    Unsupported,
}

/// Accelerations acting on `undergoing` due to `exerting`, in order.
#[derive(Debug, Deserialize, Clone)]
pub struct AccelerationConfig {
    pub undergoing: String,
    pub exerting: String,
    pub models: Vec<AccelerationModelConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ThrustDirectionConfig {
    ColinearWithState {
        central_body: String,
        #[serde(default = "default_true")]
        along_velocity: bool,
        #[serde(default)]
        opposite: bool,
    },
    FixedInertial {
        direction: [f64; 3],
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccelerationModelConfig {
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
        #[serde(default)]
        maximum_degree_central: usize,
        #[serde(default)]
        maximum_order_central: usize,
    },
    Aerodynamic,
    RadiationPressure,
    RelativisticCorrection {
        #[serde(default = "default_true")]
        schwarzschild: bool,
        #[serde(default)]
        lense_thirring: bool,
        #[serde(default)]
        de_sitter: bool,
        #[serde(default)]
        primary_body: Option<String>,
        #[serde(default)]
        central_body_angular_momentum: Option<[f64; 3]>,
    },
    Empirical {
        #[serde(default)]
        constant: [f64; 3],
        #[serde(default)]
        sine: [f64; 3],
        #[serde(default)]
        cosine: [f64; 3],
    },
    Thrust {
        thrust_magnitude: f64,
        specific_impulse: f64,
        direction: ThrustDirectionConfig,
    },
    DirectTidalDissipation {
        k2_love_number: f64,
        time_lag: f64,
        #[serde(default)]
        include_direct_radial_component: bool,
        #[serde(default = "default_true")]
        tide_on_planet: bool,
    },
    /// Also accepted as `quasi_impulsive_shot`, which describes the same burns.
    #[serde(alias = "quasi_impulsive_shot")]
    MomentumWheelDesaturation {
        thrust_mid_times: Vec<f64>,
        delta_v_values: Vec<[f64; 3]>,
        total_maneuver_time: f64,
        maneuver_rise_time: f64,
    },
    #[serde(other)]
    Unsupported,
}

/// Errors that can occur while loading or converting scenario manifests.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(#[from] ConfigurationError),
    #[error("invalid settings for body `{body}`: {source}")]
    Body {
        body: String,
        #[source]
        source: ConfigurationError,
    },
    #[error("invalid accelerations of `{undergoing}` due to `{exerting}`: {source}")]
    Acceleration {
        undergoing: String,
        exerting: String,
        #[source]
        source: ConfigurationError,
    },
    #[error("unsupported {category} model type")]
    Unsupported { category: &'static str },
    #[error("scenario files disagree on {field}: `{first}` vs `{second}`")]
    FrameConflict {
        field: &'static str,
        first: String,
        second: String,
    },
}

impl ScenarioConfig {
    /// Global frame origin, `SSB` unless the manifest sets one.
    pub fn frame_origin(&self) -> &str {
        self.frame_origin
            .as_deref()
            .unwrap_or(astro_core::constants::SOLAR_SYSTEM_BARYCENTER)
    }

    /// Global frame orientation, `ECLIPJ2000` unless the manifest sets one.
    pub fn frame_orientation(&self) -> &str {
        self.frame_orientation
            .as_deref()
            .unwrap_or(DEFAULT_FRAME_ORIENTATION)
    }
}

/// Parse a scenario from a YAML string.
pub fn parse_scenario_yaml(contents: &str) -> Result<ScenarioConfig, ConfigError> {
    Ok(serde_yaml::from_str(contents)?)
}

/// Parse a scenario from a TOML string.
pub fn parse_scenario_toml(contents: &str) -> Result<ScenarioConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

/// Load a scenario from a YAML/TOML file, or merge every `*.toml` in a directory.
///
/// Directory entries are read in sorted order. Default bodies, bodies, and
/// accelerations are concatenated; each frame field comes from whichever file
/// sets it, and two files naming different frames is an error.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    if path.is_dir() {
        let mut parts = read_dir_records(path)?.into_iter();
        let Some(mut merged) = parts.next() else {
            return Err(ConfigurationError::EmptyList {
                what: format!("scenario directory {}", path.display()),
            }
            .into());
        };
        for part in parts {
            merge_frame("frame_origin", &mut merged.frame_origin, part.frame_origin)?;
            merge_frame(
                "frame_orientation",
                &mut merged.frame_orientation,
                part.frame_orientation,
            )?;
            merged.default_bodies.extend(part.default_bodies);
            merged.bodies.extend(part.bodies);
            merged.accelerations.extend(part.accelerations);
        }
        Ok(merged)
    } else {
        load_file(path)
    }
}

fn merge_frame(
    field: &'static str,
    merged: &mut Option<String>,
    part: Option<String>,
) -> Result<(), ConfigError> {
    let Some(value) = part else {
        return Ok(());
    };
    match merged.as_deref() {
        Some(first) if first != value => Err(ConfigError::FrameConflict {
            field,
            first: first.to_string(),
            second: value,
        }),
        Some(_) => Ok(()),
        None => {
            *merged = Some(value);
            Ok(())
        }
    }
}

fn load_file(path: &Path) -> Result<ScenarioConfig, ConfigError> {
    debug!(path = %path.display(), "loading scenario");
    let contents = std::fs::read_to_string(path)?;
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        parse_scenario_toml(&contents)
    } else {
        parse_scenario_yaml(&contents)
    }
}

fn read_dir_records(dir: &Path) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            entries.push(path);
        }
    }
    entries.sort();
    entries.iter().map(|path| load_file(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_scenario_uses_frame_defaults() {
        let scenario = parse_scenario_yaml(
            r#"
default_bodies: [Sun, Earth]
bodies:
  - name: Vehicle
    mass_kg: 400
    radiation_pressure_target:
      type: cannonball
      reference_area: 4.0
      radiation_pressure_coefficient: 1.2
      occulting_bodies: [Earth]
accelerations:
  - undergoing: Vehicle
    exerting: Earth
    models:
      - type: spherical_harmonic_gravity
        maximum_degree: 2
        maximum_order: 0
"#,
        )
        .unwrap();
        assert!(scenario.frame_origin.is_none());
        assert_eq!(scenario.frame_origin(), "SSB");
        assert_eq!(scenario.frame_orientation(), "ECLIPJ2000");
        assert_eq!(scenario.default_bodies, vec!["Sun", "Earth"]);
        assert_eq!(scenario.bodies[0].mass_kg, Some(400.0));
        assert!(matches!(
            scenario.bodies[0].radiation_pressure_target,
            Some(RadiationTargetConfig::Cannonball {
                occulting_bodies: OccultingConfig::List(_),
                ..
            })
        ));
    }

    #[test]
    fn per_source_occulters_parse_as_map() {
        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Vehicle
    radiation_pressure_target:
      type: cannonball
      reference_area: 4.0
      radiation_pressure_coefficient: 1.2
      occulting_bodies:
        Sun: [Earth, Moon]
"#,
        )
        .unwrap();
        match &scenario.bodies[0].radiation_pressure_target {
            Some(RadiationTargetConfig::Cannonball {
                occulting_bodies: OccultingConfig::PerSource(map),
                ..
            }) => assert_eq!(map["Sun"], vec!["Earth", "Moon"]),
            other => panic!("unexpected target {other:?}"),
        }
    }

    #[test]
    fn unknown_model_type_is_kept_as_unsupported() {
        let scenario = parse_scenario_yaml(
            r#"
bodies:
  - name: Earth
    gravity_field:
      type: polyhedron
"#,
        )
        .unwrap();
        assert!(matches!(
            scenario.bodies[0].gravity_field,
            Some(GravityFieldConfig::Unsupported)
        ));
    }

    #[test]
    fn ephemeris_frame_fields_flatten_beside_the_tag() {
        let scenario = parse_scenario_toml(
            r#"
[[bodies]]
name = "Vehicle"

[bodies.ephemeris]
type = "keplerian"
frame_origin = "Earth"
initial_elements = [7000000.0, 0.001, 0.9, 0.0, 0.0, 0.0]
epoch = 0.0
central_body_gravitational_parameter = 3.986004418e14
"#,
        )
        .unwrap();
        let ephemeris = scenario.bodies[0].ephemeris.as_ref().unwrap();
        assert_eq!(ephemeris.frame_origin.as_deref(), Some("Earth"));
        assert!(ephemeris.frame_orientation.is_none());
        assert!(matches!(ephemeris.model, EphemerisModelConfig::Keplerian { .. }));
    }

    #[test]
    fn directory_scenarios_merge_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("b_vehicle.toml"),
            "[[bodies]]\nname = \"Vehicle\"\nmass_kg = 10.0\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("a_frame.toml"),
            "frame_origin = \"Earth\"\ndefault_bodies = [\"Earth\"]\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let scenario = load_scenario(dir.path()).unwrap();
        assert_eq!(scenario.frame_origin(), "Earth");
        assert_eq!(scenario.default_bodies, vec!["Earth"]);
        assert_eq!(scenario.bodies.len(), 1);
    }

    #[test]
    fn frame_from_a_later_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), "default_bodies = [\"Earth\"]\n").unwrap();
        std::fs::write(
            dir.path().join("b.toml"),
            "frame_origin = \"Earth\"\nframe_orientation = \"J2000\"\n",
        )
        .unwrap();
        let scenario = load_scenario(dir.path()).unwrap();
        assert_eq!(scenario.frame_origin(), "Earth");
        assert_eq!(scenario.frame_orientation(), "J2000");
    }

    #[test]
    fn conflicting_frames_across_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), "frame_origin = \"Earth\"\n").unwrap();
        std::fs::write(dir.path().join("b.toml"), "frame_origin = \"Earth\"\n").unwrap();
        std::fs::write(dir.path().join("c.toml"), "frame_origin = \"Mars\"\n").unwrap();
        let err = load_scenario(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FrameConflict { field: "frame_origin", ref first, ref second }
                if first == "Earth" && second == "Mars"
        ));
    }

    #[test]
    fn unreadable_directory_entry_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), "default_bodies = [\"Earth\"]\n").unwrap();
        std::fs::create_dir(dir.path().join("b.toml")).unwrap();
        assert!(matches!(load_scenario(dir.path()), Err(ConfigError::Io(_))));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_scenario(dir.path()),
            Err(ConfigError::Invalid(ConfigurationError::EmptyList { .. }))
        ));
    }
}
