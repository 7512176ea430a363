//! Environment model settings for simulated bodies.
//!
//! Every type here is a plain descriptor: constructors validate the physical
//! parameters and nothing is evaluated. A body factory consumes a validated
//! [`BodyListSettings`] once, before any propagation starts.

pub mod aerodynamics;
pub mod atmosphere;
pub mod body;
pub mod defaults;
pub mod ephemeris;
pub mod gravity;
pub mod ground_station;
pub mod kernels;
pub mod radiation;
pub mod registry;
pub mod rotation;
pub mod shape;

pub use aerodynamics::AerodynamicCoefficientSettings;
pub use atmosphere::{AtmosphereSettings, DensityFunction, WindModelSettings};
pub use body::BodySettings;
pub use defaults::default_body_settings;
pub use ephemeris::{EphemerisModel, EphemerisSettings};
pub use gravity::{GravityFieldSettings, SphericalHarmonicsGravity};
pub use ground_station::{GroundStationSettings, StationPosition};
pub use radiation::{
    LuminositySettings, OccultingBodies, PanelNormal, PanelRadiosityModelSettings, PanelSettings,
    RadiationPressureInterfaceSettings, RadiationPressureTargetSettings, RadiationSourceSettings,
    SurfacePropertyDistribution,
};
pub use registry::{BodyId, BodyListSettings};
pub use rotation::{IauConventions, RotationModelSettings};
pub use shape::BodyShapeSettings;

pub use astro_core::ConfigurationError;
