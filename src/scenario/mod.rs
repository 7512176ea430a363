use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::accelerations::{AccelerationMap, SelectedAccelerationMap};
use crate::config::{self, ConfigError, ScenarioConfig};
use crate::common::ConfigurationError;
use crate::environment::BodyListSettings;
use crate::export::{self, SettingsSummary};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("acceleration selection rejected: {0}")]
    Resolve(#[from] ConfigurationError),
}

/// Fully validated scenario: body registry plus resolved accelerations.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub bodies: BodyListSettings,
    pub selected: SelectedAccelerationMap,
    pub accelerations: AccelerationMap,
}

impl Scenario {
    /// Load a YAML/TOML manifest (or a directory of TOML files) and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let config = config::load_scenario(path)?;
        let scenario = Self::from_config(&config)?;
        info!(
            path = %path.display(),
            bodies = scenario.bodies.len(),
            accelerations = scenario.accelerations.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    pub fn from_config(config: &ScenarioConfig) -> Result<Self, ScenarioError> {
        let bodies = config.build_bodies()?;
        let selected = config.build_accelerations()?;
        let accelerations = AccelerationMap::resolve(&selected, &bodies)?;
        Ok(Self {
            bodies,
            selected,
            accelerations,
        })
    }

    pub fn summary(&self) -> SettingsSummary {
        export::summarize(&self.bodies, &self.accelerations)
    }
}

/// Scenario from YAML text; convenient for embedded manifests and tests.
pub fn parse_yaml(contents: &str) -> Result<Scenario, ScenarioError> {
    Scenario::from_config(&config::parse_scenario_yaml(contents)?)
}
