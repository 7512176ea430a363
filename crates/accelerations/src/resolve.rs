//! Resolution of a selected acceleration map against the body registry.
//!
//! Names are looked up once; the result is an adjacency structure indexed by
//! [`BodyId`] so downstream model creation never repeats string lookups.

use astro_core::ConfigurationError;
use astro_environment::{BodyId, BodyListSettings, BodySettings, GravityFieldSettings};
use tracing::{debug, info};

use crate::selection::SelectedAccelerationMap;
use crate::settings::{AccelerationSettings, ThrustDirectionSettings};

/// Accelerations one body exerts on another, with both handles resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPair {
    pub exerting: BodyId,
    pub accelerations: Vec<AccelerationSettings>,
}

/// Validated accelerations indexed by undergoing body handle.
#[derive(Debug, Clone, Default)]
pub struct AccelerationMap {
    adjacency: Vec<Vec<ResolvedPair>>,
}

struct PairContext<'a> {
    undergoing_name: &'a str,
    exerting_name: &'a str,
    undergoing: &'a BodySettings,
    exerting: &'a BodySettings,
}

impl PairContext<'_> {
    fn describe(&self, settings: &AccelerationSettings) -> String {
        format!(
            "{} acceleration of `{}` due to `{}`",
            settings.kind(),
            self.undergoing_name,
            self.exerting_name
        )
    }

    fn missing(&self, body: &str, model: &'static str, settings: &AccelerationSettings) -> ConfigurationError {
        ConfigurationError::MissingModel {
            body: body.to_string(),
            model,
            context: self.describe(settings),
        }
    }
}

impl AccelerationMap {
    /// Resolve and validate every selected acceleration against `bodies`.
    pub fn resolve(
        selected: &SelectedAccelerationMap,
        bodies: &BodyListSettings,
    ) -> Result<Self, ConfigurationError> {
        let mut adjacency: Vec<Vec<ResolvedPair>> = vec![Vec::new(); bodies.len()];

        for (undergoing_name, exerting_name, accelerations) in selected.iter() {
            let undergoing_id = lookup(bodies, undergoing_name, || {
                format!("accelerations acting on `{undergoing_name}`")
            })?;
            let exerting_id = lookup(bodies, exerting_name, || {
                format!("accelerations of `{undergoing_name}` due to `{exerting_name}`")
            })?;
            let context = PairContext {
                undergoing_name,
                exerting_name,
                undergoing: &bodies[undergoing_name],
                exerting: &bodies[exerting_name],
            };

            for settings in accelerations {
                check_pair(&context, undergoing_id == exerting_id, settings, bodies)?;
                debug!(
                    undergoing = undergoing_name,
                    exerting = exerting_name,
                    kind = %settings.kind(),
                    "resolved acceleration"
                );
            }

            let row = &mut adjacency[undergoing_id.0];
            match row.iter_mut().find(|pair| pair.exerting == exerting_id) {
                Some(pair) => pair.accelerations.extend(accelerations.iter().cloned()),
                None => row.push(ResolvedPair {
                    exerting: exerting_id,
                    accelerations: accelerations.to_vec(),
                }),
            }
        }

        let map = Self { adjacency };
        info!(
            bodies = map.bodies_undergoing().count(),
            accelerations = map.len(),
            "acceleration map resolved"
        );
        Ok(map)
    }

    /// Pairs acting on `undergoing`, in selection order.
    pub fn acting_on(&self, undergoing: BodyId) -> &[ResolvedPair] {
        self.adjacency
            .get(undergoing.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Accelerations on `undergoing` due to `exerting`.
    pub fn get(&self, undergoing: BodyId, exerting: BodyId) -> &[AccelerationSettings] {
        self.acting_on(undergoing)
            .iter()
            .find(|pair| pair.exerting == exerting)
            .map(|pair| pair.accelerations.as_slice())
            .unwrap_or(&[])
    }

    /// Handles of bodies with at least one acceleration acting on them.
    pub fn bodies_undergoing(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_empty())
            .map(|(i, _)| BodyId(i))
    }

    /// Total number of acceleration terms.
    pub fn len(&self) -> usize {
        self.adjacency
            .iter()
            .flatten()
            .map(|pair| pair.accelerations.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lookup(
    bodies: &BodyListSettings,
    name: &str,
    context: impl FnOnce() -> String,
) -> Result<BodyId, ConfigurationError> {
    bodies.body_id(name).ok_or_else(|| ConfigurationError::UnknownBody {
        name: name.to_string(),
        context: context(),
    })
}

fn check_pair(
    ctx: &PairContext<'_>,
    self_exerted: bool,
    settings: &AccelerationSettings,
    bodies: &BodyListSettings,
) -> Result<(), ConfigurationError> {
    settings.check()?;
    let kind = settings.kind();
    if self_exerted != kind.is_self_exerted() {
        return Err(ConfigurationError::invalid(if self_exerted {
            format!("{} cannot be exerted by a body on itself", ctx.describe(settings))
        } else {
            format!("{} must be exerted by the undergoing body itself", ctx.describe(settings))
        }));
    }

    match settings {
        AccelerationSettings::PointMassGravity => {
            ctx.exerting
                .gravity_field
                .as_ref()
                .ok_or_else(|| ctx.missing(ctx.exerting_name, "gravity field", settings))?;
        }
        AccelerationSettings::SphericalHarmonicGravity {
            maximum_degree,
            maximum_order,
        } => {
            require_harmonics(ctx, ctx.exerting_name, ctx.exerting, settings)?
                .truncated(ctx.exerting_name, *maximum_degree, *maximum_order)?;
        }
        AccelerationSettings::MutualSphericalHarmonicGravity {
            maximum_degree_exerting,
            maximum_order_exerting,
            maximum_degree_undergoing,
            maximum_order_undergoing,
            ..
        } => {
            require_harmonics(ctx, ctx.exerting_name, ctx.exerting, settings)?.truncated(
                ctx.exerting_name,
                *maximum_degree_exerting,
                *maximum_order_exerting,
            )?;
            require_harmonics(ctx, ctx.undergoing_name, ctx.undergoing, settings)?.truncated(
                ctx.undergoing_name,
                *maximum_degree_undergoing,
                *maximum_order_undergoing,
            )?;
        }
        AccelerationSettings::Aerodynamic => {
            if ctx.exerting.atmosphere.is_none() {
                return Err(ctx.missing(ctx.exerting_name, "atmosphere", settings));
            }
            if ctx.exerting.shape_model.is_none() {
                return Err(ctx.missing(ctx.exerting_name, "shape", settings));
            }
            if ctx.undergoing.aerodynamic_coefficients.is_none() {
                return Err(ctx.missing(ctx.undergoing_name, "aerodynamic coefficient", settings));
            }
        }
        AccelerationSettings::RadiationPressure => {
            let has_interface = ctx
                .undergoing
                .radiation_pressure_interfaces
                .contains_key(ctx.exerting_name);
            if !has_interface {
                if ctx.exerting.radiation_source.is_none() {
                    return Err(ctx.missing(ctx.exerting_name, "radiation source", settings));
                }
                if ctx.undergoing.radiation_pressure_target.is_none() {
                    return Err(ctx.missing(
                        ctx.undergoing_name,
                        "radiation pressure target",
                        settings,
                    ));
                }
            }
        }
        AccelerationSettings::RelativisticCorrection { primary_body, .. } => {
            if ctx.exerting.gravity_field.is_none() {
                return Err(ctx.missing(ctx.exerting_name, "gravity field", settings));
            }
            if let Some(primary) = primary_body {
                lookup(bodies, primary, || ctx.describe(settings))?;
            }
        }
        AccelerationSettings::Thrust(thrust) => {
            if let ThrustDirectionSettings::ColinearWithState { central_body, .. } =
                &thrust.direction
            {
                lookup(bodies, central_body, || ctx.describe(settings))?;
            }
            if ctx.undergoing.constant_mass.is_none() {
                return Err(ctx.missing(ctx.undergoing_name, "mass", settings));
            }
        }
        AccelerationSettings::DirectTidalDissipation { .. } => {
            if ctx.exerting.gravity_field.is_none() {
                return Err(ctx.missing(ctx.exerting_name, "gravity field", settings));
            }
            if ctx.undergoing.gravity_field.is_none() {
                return Err(ctx.missing(ctx.undergoing_name, "gravity field", settings));
            }
        }
        AccelerationSettings::Empirical { .. }
        | AccelerationSettings::MomentumWheelDesaturation { .. } => {}
    }
    Ok(())
}

fn require_harmonics<'a>(
    ctx: &PairContext<'_>,
    name: &str,
    body: &'a BodySettings,
    settings: &AccelerationSettings,
) -> Result<&'a astro_environment::SphericalHarmonicsGravity, ConfigurationError> {
    body.gravity_field
        .as_ref()
        .and_then(GravityFieldSettings::spherical_harmonics)
        .ok_or_else(|| ctx.missing(name, "spherical harmonic gravity field", settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_environment::{
        AerodynamicCoefficientSettings, AtmosphereSettings, BodyShapeSettings, OccultingBodies,
        RadiationPressureInterfaceSettings, RadiationPressureTargetSettings,
        SphericalHarmonicsGravity, default_body_settings,
    };

    fn bodies() -> BodyListSettings {
        let mut bodies = default_body_settings(&["Sun", "Earth", "Moon"], "SSB", "ECLIPJ2000").unwrap();
        let earth = bodies.get_mut("Earth").unwrap();
        earth.set_gravity_field(GravityFieldSettings::SphericalHarmonics(
            SphericalHarmonicsGravity::from_zonal(3.986e14, 6.378e6, &[1.082_6e-3, -2.5e-6], "IAU_Earth")
                .unwrap(),
        ));
        earth.set_atmosphere(AtmosphereSettings::exponential(7_200.0, 290.0, 1.225, 287.06).unwrap());
        earth.set_shape_model(BodyShapeSettings::spherical(6.371e6).unwrap());
        let vehicle = bodies.add_empty("Vehicle").unwrap();
        vehicle.set_constant_mass(400.0).unwrap();
        vehicle.set_aerodynamic_coefficients(AerodynamicCoefficientSettings::drag_only(4.0, 1.2).unwrap());
        vehicle.set_radiation_pressure_target(
            RadiationPressureTargetSettings::cannonball(
                4.0,
                1.2,
                OccultingBodies::global(["Earth", "Moon"]).unwrap(),
            )
            .unwrap(),
        );
        bodies
    }

    #[test]
    fn resolves_to_handles_in_selection_order() {
        let bodies = bodies();
        let mut selected = SelectedAccelerationMap::new();
        selected
            .add("Vehicle", "Earth", AccelerationSettings::spherical_harmonic_gravity(3, 0).unwrap())
            .add("Vehicle", "Earth", AccelerationSettings::aerodynamic())
            .add("Vehicle", "Sun", AccelerationSettings::point_mass_gravity())
            .add("Vehicle", "Sun", AccelerationSettings::radiation_pressure())
            .add("Vehicle", "Moon", AccelerationSettings::point_mass_gravity());

        let map = AccelerationMap::resolve(&selected, &bodies).unwrap();
        let vehicle = bodies.body_id("Vehicle").unwrap();
        let earth = bodies.body_id("Earth").unwrap();
        let exerting: Vec<BodyId> = map.acting_on(vehicle).iter().map(|p| p.exerting).collect();
        assert_eq!(
            exerting,
            vec![earth, bodies.body_id("Sun").unwrap(), bodies.body_id("Moon").unwrap()]
        );
        assert_eq!(map.get(vehicle, earth).len(), 2);
        assert_eq!(map.len(), 5);
        assert_eq!(map.bodies_undergoing().collect::<Vec<_>>(), vec![vehicle]);
    }

    #[test]
    fn degree_beyond_coefficient_table_is_rejected() {
        let bodies = bodies();
        let mut selected = SelectedAccelerationMap::new();
        selected.add("Vehicle", "Earth", AccelerationSettings::spherical_harmonic_gravity(8, 8).unwrap());
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::DegreeOrderExceeded {
                available_degree: 3,
                available_order: 0,
                ..
            }
        ));
    }

    #[test]
    fn unknown_exerting_body_is_rejected() {
        let bodies = bodies();
        let mut selected = SelectedAccelerationMap::new();
        selected.add("Vehicle", "Jupiter", AccelerationSettings::point_mass_gravity());
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownBody { ref name, .. } if name == "Jupiter"));
    }

    #[test]
    fn gravity_cannot_be_self_exerted_but_thrust_must_be() {
        let bodies = bodies();
        let mut selected = SelectedAccelerationMap::new();
        selected.add("Earth", "Earth", AccelerationSettings::point_mass_gravity());
        assert!(AccelerationMap::resolve(&selected, &bodies).is_err());

        let thrust = crate::settings::ThrustSettings::constant(
            ThrustDirectionSettings::ColinearWithState {
                central_body: "Earth".to_string(),
                along_velocity: true,
                opposite: false,
            },
            0.5,
            3_000.0,
        )
        .unwrap();
        let mut selected = SelectedAccelerationMap::new();
        selected.add("Vehicle", "Earth", AccelerationSettings::thrust(thrust.clone()));
        assert!(AccelerationMap::resolve(&selected, &bodies).is_err());

        let mut selected = SelectedAccelerationMap::new();
        selected.add("Vehicle", "Vehicle", AccelerationSettings::thrust(thrust));
        assert!(AccelerationMap::resolve(&selected, &bodies).is_ok());
    }

    #[test]
    fn aerodynamics_need_an_atmosphere() {
        let bodies = bodies();
        let mut selected = SelectedAccelerationMap::new();
        selected.add("Vehicle", "Moon", AccelerationSettings::aerodynamic());
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingModel {
                model: "atmosphere",
                ..
            }
        ));
    }

    #[test]
    fn radiation_pressure_needs_a_source() {
        let bodies = bodies();
        let mut selected = SelectedAccelerationMap::new();
        selected.add("Vehicle", "Earth", AccelerationSettings::radiation_pressure());
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingModel {
                model: "radiation source",
                ..
            }
        ));
    }

    #[test]
    fn radiation_pressure_can_use_an_interface_alone() {
        let mut bodies = bodies();
        bodies.add_empty("Probe").unwrap().set_radiation_pressure_interface(
            RadiationPressureInterfaceSettings::cannonball("Earth", 2.0, 1.3, vec!["Moon".into()])
                .unwrap(),
        );
        let mut selected = SelectedAccelerationMap::new();
        selected.add("Probe", "Earth", AccelerationSettings::radiation_pressure());
        let map = AccelerationMap::resolve(&selected, &bodies).unwrap();
        assert_eq!(map.len(), 1);

        let mut selected = SelectedAccelerationMap::new();
        selected.add("Probe", "Sun", AccelerationSettings::radiation_pressure());
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingModel {
                model: "radiation pressure target",
                ..
            }
        ));
    }

    #[test]
    fn aerodynamics_need_an_exerting_shape() {
        let mut bodies = bodies();
        let mars = bodies.add_empty("Mars").unwrap();
        mars.set_atmosphere(AtmosphereSettings::exponential(11_100.0, 210.0, 0.02, 191.0).unwrap());
        let mut selected = SelectedAccelerationMap::new();
        selected.add("Vehicle", "Mars", AccelerationSettings::aerodynamic());
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingModel { ref body, model: "shape", .. } if body == "Mars"
        ));
    }

    #[test]
    fn thrust_needs_a_mass() {
        let mut bodies = bodies();
        bodies.add_empty("Tug").unwrap();
        let thrust = crate::settings::ThrustSettings::constant(
            ThrustDirectionSettings::FixedInertial([1.0, 0.0, 0.0]),
            0.5,
            3_000.0,
        )
        .unwrap();
        let mut selected = SelectedAccelerationMap::new();
        selected.add("Tug", "Tug", AccelerationSettings::thrust(thrust));
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingModel { ref body, model: "mass", .. } if body == "Tug"
        ));
    }

    #[test]
    fn relativistic_primary_must_be_registered() {
        let bodies = bodies();
        let mut selected = SelectedAccelerationMap::new();
        selected.add(
            "Vehicle",
            "Earth",
            AccelerationSettings::relativistic_correction(
                true,
                false,
                true,
                Some("Jupiter".to_string()),
                None,
            )
            .unwrap(),
        );
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownBody { ref name, .. } if name == "Jupiter"));
    }

    #[test]
    fn tidal_dissipation_needs_both_gravity_fields() {
        let mut bodies = bodies();
        bodies.add_empty("Io").unwrap();
        let tide = AccelerationSettings::direct_tidal_dissipation(0.3, 600.0, false, true).unwrap();

        let mut selected = SelectedAccelerationMap::new();
        selected.add("Io", "Earth", tide.clone());
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingModel { ref body, model: "gravity field", .. } if body == "Io"
        ));

        let mut selected = SelectedAccelerationMap::new();
        selected.add("Earth", "Io", tide.clone());
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingModel { ref body, model: "gravity field", .. } if body == "Io"
        ));

        let mut selected = SelectedAccelerationMap::new();
        selected.add("Moon", "Earth", tide);
        assert!(AccelerationMap::resolve(&selected, &bodies).is_ok());
    }

    #[test]
    fn directly_built_settings_are_rechecked() {
        let bodies = bodies();
        let mut selected = SelectedAccelerationMap::new();
        selected.add(
            "Vehicle",
            "Earth",
            AccelerationSettings::DirectTidalDissipation {
                k2_love_number: -0.3,
                time_lag: 600.0,
                include_direct_radial_component: false,
                tide_on_planet: true,
            },
        );
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(err, ConfigurationError::Negative { .. }));
    }

    #[test]
    fn mutual_harmonics_need_both_fields() {
        let bodies = bodies();
        let mut selected = SelectedAccelerationMap::new();
        selected.add(
            "Moon",
            "Earth",
            AccelerationSettings::mutual_spherical_harmonic_gravity((2, 0), (2, 2), (0, 0)).unwrap(),
        );
        let err = AccelerationMap::resolve(&selected, &bodies).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingModel { ref body, .. } if body == "Moon"));
    }
}
