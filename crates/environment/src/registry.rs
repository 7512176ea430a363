//! Name-keyed registry of body settings with stable integer handles.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Index;

use astro_core::constants::SOLAR_SYSTEM_BARYCENTER;
use astro_core::{ConfigurationError, validate};
use tracing::debug;

use crate::body::BodySettings;
use crate::kernels;
use crate::radiation::PanelNormal;
use crate::rotation::RotationModelSettings;

/// Handle of a body inside a [`BodyListSettings`], assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// All bodies of a simulation plus the global frame they are expressed in.
#[derive(Debug, Clone)]
pub struct BodyListSettings {
    frame_origin: String,
    frame_orientation: String,
    names: Vec<String>,
    bodies: Vec<BodySettings>,
    index: BTreeMap<String, BodyId>,
}

impl BodyListSettings {
    /// Empty registry whose global frame is `frame_origin`/`frame_orientation`.
    pub fn new(
        frame_origin: impl Into<String>,
        frame_orientation: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let frame_origin = frame_origin.into();
        let frame_orientation = frame_orientation.into();
        validate::name("global frame origin", &frame_origin)?;
        validate::name("global frame orientation", &frame_orientation)?;
        Ok(Self {
            frame_origin,
            frame_orientation,
            names: Vec::new(),
            bodies: Vec::new(),
            index: BTreeMap::new(),
        })
    }

    /// Global frame origin; `SSB` or a registered body.
    pub fn frame_origin(&self) -> &str {
        &self.frame_origin
    }

    /// Global frame orientation.
    pub fn frame_orientation(&self) -> &str {
        &self.frame_orientation
    }

    /// Insert settings for `name`. An existing entry is replaced in place and
    /// returned; its handle does not change.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        settings: BodySettings,
    ) -> Result<Option<BodySettings>, ConfigurationError> {
        let name = name.into();
        validate::name("body name", &name)?;
        if let Some(&BodyId(i)) = self.index.get(&name) {
            debug!(body = %name, "replacing body settings");
            return Ok(Some(std::mem::replace(&mut self.bodies[i], settings)));
        }
        let id = BodyId(self.bodies.len());
        debug!(body = %name, id = id.0, "adding body settings");
        self.index.insert(name.clone(), id);
        self.names.push(name);
        self.bodies.push(settings);
        Ok(None)
    }

    /// Add a body with no models yet (typically a vehicle) and return it for editing.
    /// An existing body of the same name is returned untouched.
    pub fn add_empty(&mut self, name: impl Into<String>) -> Result<&mut BodySettings, ConfigurationError> {
        let name = name.into();
        if !self.index.contains_key(&name) {
            self.insert(name.clone(), BodySettings::new())?;
        }
        let BodyId(i) = self.index[&name];
        Ok(&mut self.bodies[i])
    }

    /// Settings of `name`, if registered.
    pub fn get(&self, name: &str) -> Option<&BodySettings> {
        self.index.get(name).map(|id| &self.bodies[id.0])
    }

    /// Mutable settings of `name`, if registered.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut BodySettings> {
        self.index.get(name).map(|id| &mut self.bodies[id.0])
    }

    /// Stable handle of `name`.
    pub fn body_id(&self, name: &str) -> Option<BodyId> {
        self.index.get(name).copied()
    }

    /// Name registered under `id`.
    pub fn name_of(&self, id: BodyId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    /// Settings registered under `id`.
    pub fn by_id(&self, id: BodyId) -> Option<&BodySettings> {
        self.bodies.get(id.0)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Body names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// `(id, name, settings)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &str, &BodySettings)> {
        self.names
            .iter()
            .zip(&self.bodies)
            .enumerate()
            .map(|(i, (name, settings))| (BodyId(i), name.as_str(), settings))
    }

    /// Number of registered bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Re-check every body's models, then every cross-reference between bodies.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.frame_origin != SOLAR_SYSTEM_BARYCENTER && !self.contains(&self.frame_origin) {
            return Err(self.unknown(&self.frame_origin, "the global frame origin".to_string()));
        }
        for (_, name, body) in self.iter() {
            body.check()?;
            if let Some(source) = &body.radiation_source {
                for referenced in source.referenced_bodies() {
                    if referenced == name {
                        return Err(ConfigurationError::invalid(format!(
                            "the radiation source of `{name}` cannot depend on itself"
                        )));
                    }
                    self.require(referenced, || format!("the radiation source of `{name}`"))?;
                }
            }
            for station in &body.ground_stations {
                if station.position().needs_shape_model() && body.shape_model.is_none() {
                    return Err(ConfigurationError::MissingModel {
                        body: name.to_string(),
                        model: "shape",
                        context: format!("the geodetic position of ground station `{}`", station.name()),
                    });
                }
            }
            if let Some(target) = &body.radiation_pressure_target {
                for referenced in target.occulting_bodies().referenced_bodies() {
                    self.require(referenced, || {
                        format!("the radiation pressure target of `{name}`")
                    })?;
                }
                for (i, panel) in target.panels().iter().enumerate() {
                    if let PanelNormal::TrackingBody { body: tracked, .. } = &panel.normal {
                        self.require(tracked, || format!("panel {i} of `{name}`"))?;
                    }
                }
            }
            for (source, interface) in &body.radiation_pressure_interfaces {
                self.require(source, || {
                    format!("the radiation pressure interface of `{name}`")
                })?;
                for occulter in &interface.occulting_bodies {
                    self.require(occulter, || {
                        format!("the `{source}` radiation pressure interface of `{name}`")
                    })?;
                }
            }
            if let Some(RotationModelSettings::Synchronous { central_body, .. }) =
                &body.rotation_model
            {
                if central_body == name {
                    return Err(ConfigurationError::invalid(format!(
                        "`{name}` cannot rotate synchronously with itself"
                    )));
                }
                self.require(central_body, || {
                    format!("the synchronous rotation model of `{name}`")
                })?;
            }
        }
        debug!(bodies = self.len(), "body settings validated");
        Ok(())
    }

    /// Kernels required by every SPICE-backed model in the registry.
    pub fn required_kernels(&self) -> BTreeSet<&'static str> {
        self.iter()
            .filter(|(_, _, body)| body.uses_spice())
            .flat_map(|(_, name, _)| kernels::required_kernels(name))
            .collect()
    }

    fn require(
        &self,
        name: &str,
        context: impl FnOnce() -> String,
    ) -> Result<(), ConfigurationError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(self.unknown(name, context()))
        }
    }

    fn unknown(&self, name: &str, context: String) -> ConfigurationError {
        ConfigurationError::UnknownBody {
            name: name.to_string(),
            context,
        }
    }
}

impl Index<&str> for BodyListSettings {
    type Output = BodySettings;

    /// Panics when `name` is not registered; use [`BodyListSettings::get`] otherwise.
    fn index(&self, name: &str) -> &BodySettings {
        match self.get(name) {
            Some(body) => body,
            None => panic!("no body settings registered for `{name}`"),
        }
    }
}
