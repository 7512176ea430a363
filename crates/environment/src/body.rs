//! Aggregate settings for a single body.

use std::collections::BTreeMap;

use astro_core::{ConfigurationError, validate};
use tracing::debug;

use crate::aerodynamics::AerodynamicCoefficientSettings;
use crate::atmosphere::{AtmosphereSettings, WindModelSettings};
use crate::ephemeris::EphemerisSettings;
use crate::gravity::GravityFieldSettings;
use crate::ground_station::GroundStationSettings;
use crate::radiation::{
    RadiationPressureInterfaceSettings, RadiationPressureTargetSettings, RadiationSourceSettings,
};
use crate::rotation::RotationModelSettings;
use crate::shape::BodyShapeSettings;

/// Every environment model a body may carry. All fields are optional and
/// independently settable; setters overwrite and hand back the previous value.
#[derive(Debug, Clone, Default)]
pub struct BodySettings {
    pub constant_mass: Option<f64>,
    pub gravity_field: Option<GravityFieldSettings>,
    pub atmosphere: Option<AtmosphereSettings>,
    pub wind: Option<WindModelSettings>,
    pub ephemeris: Option<EphemerisSettings>,
    pub rotation_model: Option<RotationModelSettings>,
    pub shape_model: Option<BodyShapeSettings>,
    pub aerodynamic_coefficients: Option<AerodynamicCoefficientSettings>,
    pub radiation_source: Option<RadiationSourceSettings>,
    pub radiation_pressure_target: Option<RadiationPressureTargetSettings>,
    /// Legacy cannonball interfaces keyed by source body.
    pub radiation_pressure_interfaces: BTreeMap<String, RadiationPressureInterfaceSettings>,
    /// Stations in the order they were added.
    pub ground_stations: Vec<GroundStationSettings>,
}

macro_rules! replacing_setter {
    ($fn_name:ident, $field:ident, $ty:ty, $label:literal) => {
        pub fn $fn_name(&mut self, settings: $ty) -> Option<$ty> {
            let previous = self.$field.replace(settings);
            if previous.is_some() {
                debug!(model = $label, "replacing existing body settings");
            }
            previous
        }
    };
}

impl BodySettings {
    pub fn new() -> Self {
        Self::default()
    }

    replacing_setter!(set_gravity_field, gravity_field, GravityFieldSettings, "gravity field");
    replacing_setter!(set_atmosphere, atmosphere, AtmosphereSettings, "atmosphere");
    replacing_setter!(set_wind, wind, WindModelSettings, "wind");
    replacing_setter!(set_ephemeris, ephemeris, EphemerisSettings, "ephemeris");
    replacing_setter!(set_rotation_model, rotation_model, RotationModelSettings, "rotation model");
    replacing_setter!(set_shape_model, shape_model, BodyShapeSettings, "shape model");
    replacing_setter!(
        set_aerodynamic_coefficients,
        aerodynamic_coefficients,
        AerodynamicCoefficientSettings,
        "aerodynamic coefficients"
    );
    replacing_setter!(
        set_radiation_source,
        radiation_source,
        RadiationSourceSettings,
        "radiation source"
    );
    replacing_setter!(
        set_radiation_pressure_target,
        radiation_pressure_target,
        RadiationPressureTargetSettings,
        "radiation pressure target"
    );

    /// Set the body mass (kg); replaces an earlier value.
    pub fn set_constant_mass(&mut self, mass: f64) -> Result<Option<f64>, ConfigurationError> {
        validate::positive("body mass", mass)?;
        let previous = self.constant_mass.replace(mass);
        if previous.is_some() {
            debug!(model = "mass", "replacing existing body settings");
        }
        Ok(previous)
    }

    /// Register a legacy interface for its source body, replacing any earlier one.
    pub fn set_radiation_pressure_interface(
        &mut self,
        interface: RadiationPressureInterfaceSettings,
    ) -> Option<RadiationPressureInterfaceSettings> {
        let previous = self
            .radiation_pressure_interfaces
            .insert(interface.source_body.clone(), interface);
        if previous.is_some() {
            debug!(
                model = "radiation pressure interface",
                "replacing existing body settings"
            );
        }
        previous
    }

    /// Append a ground station. Station names are unique per body.
    pub fn add_ground_station(
        &mut self,
        station: GroundStationSettings,
    ) -> Result<(), ConfigurationError> {
        if self.ground_stations.iter().any(|s| s.name() == station.name()) {
            return Err(ConfigurationError::invalid(format!(
                "ground station `{}` is already defined",
                station.name()
            )));
        }
        debug!(station = station.name(), "adding ground station");
        self.ground_stations.push(station);
        Ok(())
    }

    /// Re-run the constructor checks of every model present.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        if let Some(mass) = self.constant_mass {
            validate::positive("body mass", mass)?;
        }
        if let Some(gravity) = &self.gravity_field {
            gravity.check()?;
        }
        if let Some(atmosphere) = &self.atmosphere {
            atmosphere.check()?;
        }
        if let Some(wind) = &self.wind {
            wind.check()?;
        }
        if let Some(ephemeris) = &self.ephemeris {
            ephemeris.check()?;
        }
        if let Some(rotation) = &self.rotation_model {
            rotation.check()?;
        }
        if let Some(shape) = &self.shape_model {
            shape.check()?;
        }
        if let Some(aero) = &self.aerodynamic_coefficients {
            aero.check()?;
        }
        if let Some(source) = &self.radiation_source {
            source.check()?;
        }
        if let Some(target) = &self.radiation_pressure_target {
            target.check()?;
        }
        for (source, interface) in &self.radiation_pressure_interfaces {
            interface.check()?;
            if *source != interface.source_body {
                return Err(ConfigurationError::invalid(format!(
                    "radiation pressure interface for `{}` is stored under `{source}`",
                    interface.source_body
                )));
            }
        }
        for (i, station) in self.ground_stations.iter().enumerate() {
            if self.ground_stations[..i].iter().any(|s| s.name() == station.name()) {
                return Err(ConfigurationError::invalid(format!(
                    "ground station `{}` is defined twice",
                    station.name()
                )));
            }
        }
        Ok(())
    }

    /// Body-fixed frame name, when a rotation model provides one.
    pub fn body_fixed_frame(&self) -> Option<&str> {
        self.rotation_model
            .as_ref()
            .map(RotationModelSettings::target_frame)
    }

    /// Names of the models present, for summaries and diagnostics.
    pub fn configured_models(&self) -> Vec<&'static str> {
        let mut models = Vec::new();
        if self.constant_mass.is_some() {
            models.push("mass");
        }
        if self.gravity_field.is_some() {
            models.push("gravity_field");
        }
        if self.atmosphere.is_some() {
            models.push("atmosphere");
        }
        if self.wind.is_some() {
            models.push("wind");
        }
        if self.ephemeris.is_some() {
            models.push("ephemeris");
        }
        if self.rotation_model.is_some() {
            models.push("rotation_model");
        }
        if self.shape_model.is_some() {
            models.push("shape_model");
        }
        if self.aerodynamic_coefficients.is_some() {
            models.push("aerodynamic_coefficients");
        }
        if self.radiation_source.is_some() {
            models.push("radiation_source");
        }
        if self.radiation_pressure_target.is_some() {
            models.push("radiation_pressure_target");
        }
        if !self.radiation_pressure_interfaces.is_empty() {
            models.push("radiation_pressure_interfaces");
        }
        if !self.ground_stations.is_empty() {
            models.push("ground_stations");
        }
        models
    }

    /// Whether any model needs SPICE kernels at body creation time.
    pub fn uses_spice(&self) -> bool {
        matches!(self.gravity_field, Some(GravityFieldSettings::CentralSpice))
            || matches!(self.shape_model, Some(BodyShapeSettings::SphericalSpice))
            || self.ephemeris.as_ref().is_some_and(EphemerisSettings::uses_spice)
            || self
                .rotation_model
                .as_ref()
                .is_some_and(RotationModelSettings::uses_spice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_settings_use_last_write_wins() {
        let mut body = BodySettings::new();
        let first = EphemerisSettings::direct_spice("SSB", "ECLIPJ2000").unwrap();
        let second = EphemerisSettings::constant([1.0, 2.0, 3.0, 0.0, 0.0, 0.0], "Sun", "ECLIPJ2000")
            .unwrap();
        assert!(body.set_ephemeris(first).is_none());
        let replaced = body.set_ephemeris(second).expect("first ephemeris is handed back");
        assert_eq!(replaced.label(), "direct_spice");
        let current = body.ephemeris.as_ref().unwrap();
        assert_eq!(current.label(), "constant");
        assert_eq!(current.frame_origin, "Sun");
    }

    #[test]
    fn interfaces_are_keyed_by_source() {
        let mut body = BodySettings::new();
        let sun = RadiationPressureInterfaceSettings::cannonball("Sun", 4.0, 1.2, vec![]).unwrap();
        let sun_again =
            RadiationPressureInterfaceSettings::cannonball("Sun", 5.0, 1.3, vec!["Earth".into()])
                .unwrap();
        let earth = RadiationPressureInterfaceSettings::cannonball("Earth", 4.0, 1.0, vec![]).unwrap();
        body.set_radiation_pressure_interface(sun);
        body.set_radiation_pressure_interface(earth);
        assert!(body.set_radiation_pressure_interface(sun_again).is_some());
        assert_eq!(body.radiation_pressure_interfaces.len(), 2);
        assert_eq!(body.radiation_pressure_interfaces["Sun"].reference_area, 5.0);
    }

    #[test]
    fn mass_must_be_positive() {
        let mut body = BodySettings::new();
        assert!(body.set_constant_mass(-10.0).is_err());
        assert_eq!(body.set_constant_mass(500.0).unwrap(), None);
        assert_eq!(body.set_constant_mass(400.0).unwrap(), Some(500.0));
        assert_eq!(body.configured_models(), vec!["mass"]);
    }

    #[test]
    fn ground_stations_append_with_unique_names() {
        use crate::ground_station::StationPosition;

        let mut body = BodySettings::new();
        let first =
            GroundStationSettings::new("Madrid", StationPosition::geodetic(800.0, 0.7, -0.07).unwrap())
                .unwrap();
        let second =
            GroundStationSettings::new("Canberra", StationPosition::geodetic(650.0, -0.6, 2.6).unwrap())
                .unwrap();
        body.add_ground_station(first.clone()).unwrap();
        body.add_ground_station(second).unwrap();
        assert!(body.add_ground_station(first).is_err());
        let names: Vec<&str> = body.ground_stations.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Madrid", "Canberra"]);
        assert_eq!(body.configured_models(), vec!["ground_stations"]);
    }

    #[test]
    fn check_catches_fields_written_directly() {
        let mut body = BodySettings::new();
        assert!(body.check().is_ok());
        body.constant_mass = Some(-5.0);
        assert!(matches!(body.check(), Err(ConfigurationError::NonPositive { .. })));
        body.constant_mass = Some(5.0);
        let sun = RadiationPressureInterfaceSettings::cannonball("Sun", 4.0, 1.2, vec![]).unwrap();
        body.radiation_pressure_interfaces.insert("Earth".to_string(), sun);
        assert!(body.check().is_err());
    }

    #[test]
    fn spice_usage_is_detected() {
        let mut body = BodySettings::new();
        assert!(!body.uses_spice());
        body.set_gravity_field(GravityFieldSettings::CentralSpice);
        assert!(body.uses_spice());
    }
}
