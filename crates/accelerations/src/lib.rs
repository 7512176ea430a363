//! Acceleration model settings keyed by (undergoing body, exerting body).

pub mod resolve;
pub mod selection;
pub mod settings;

pub use resolve::{AccelerationMap, ResolvedPair};
pub use selection::SelectedAccelerationMap;
pub use settings::{
    AccelerationKind, AccelerationSettings, EngineSwitch, ThrustDirectionSettings,
    ThrustMagnitudeSettings, ThrustSettings, TimeFunction,
};
