use std::sync::Arc;
use std::thread;

use astro_setup::accelerations::{AccelerationMap, AccelerationSettings, SelectedAccelerationMap};
use astro_setup::common::ConfigurationError;
use astro_setup::environment::{
    AtmosphereSettings, BodyListSettings, BodySettings, EphemerisModel, EphemerisSettings,
    OccultingBodies, RadiationPressureTargetSettings, SphericalHarmonicsGravity,
    default_body_settings,
};
use nalgebra::DMatrix;

#[test]
fn earth_exponential_atmosphere_fields_are_unchanged() {
    let mut bodies = BodyListSettings::new("SSB", "ECLIPJ2000").unwrap();
    bodies.add_empty("Earth").unwrap().set_atmosphere(
        AtmosphereSettings::exponential(7200.0, 290.0, 1.225, 287.06).unwrap(),
    );
    match &bodies["Earth"].atmosphere {
        Some(AtmosphereSettings::Exponential {
            scale_height,
            constant_temperature,
            density_at_zero_altitude,
            specific_gas_constant,
            ..
        }) => {
            assert_eq!(
                (
                    *scale_height,
                    *constant_temperature,
                    *density_at_zero_altitude,
                    *specific_gas_constant
                ),
                (7200.0, 290.0, 1.225, 287.06)
            );
        }
        other => panic!("unexpected atmosphere {other:?}"),
    }
}

#[test]
fn second_ephemeris_replaces_the_first() {
    let mut body = BodySettings::new();
    let first = EphemerisSettings::constant([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], "SSB", "J2000").unwrap();
    let second = EphemerisSettings::direct_spice("Sun", "ECLIPJ2000").unwrap();
    assert!(body.set_ephemeris(first).is_none());
    let previous = body.set_ephemeris(second).expect("first ephemeris returned");
    assert!(matches!(previous.model, EphemerisModel::Constant { .. }));
    let current = body.ephemeris.as_ref().unwrap();
    assert_eq!(current.frame_origin, "Sun");
    assert!(matches!(current.model, EphemerisModel::DirectSpice { .. }));
}

#[test]
fn reinserting_a_body_keeps_its_handle() {
    let mut bodies = default_body_settings(&["Sun", "Earth"], "SSB", "ECLIPJ2000").unwrap();
    let earth = bodies.body_id("Earth").unwrap();
    let previous = bodies.insert("Earth", BodySettings::new()).unwrap();
    assert!(previous.is_some_and(|p| p.gravity_field.is_some()));
    assert_eq!(bodies.body_id("Earth"), Some(earth));
    assert!(bodies["Earth"].gravity_field.is_none());
    assert_eq!(bodies.len(), 2);
}

#[test]
fn accelerations_for_one_pair_append_in_order() {
    let bodies = {
        let mut bodies = default_body_settings(&["Earth"], "SSB", "ECLIPJ2000").unwrap();
        bodies.add_empty("Vehicle").unwrap();
        bodies
    };
    let mut selected = SelectedAccelerationMap::new();
    selected.add("Vehicle", "Earth", AccelerationSettings::point_mass_gravity());
    selected.add(
        "Vehicle",
        "Earth",
        AccelerationSettings::empirical([0.0, 0.0, 1e-9], [0.0; 3], [0.0; 3]).unwrap(),
    );
    let map = AccelerationMap::resolve(&selected, &bodies).unwrap();
    let list = map.get(
        bodies.body_id("Vehicle").unwrap(),
        bodies.body_id("Earth").unwrap(),
    );
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], AccelerationSettings::PointMassGravity);
    assert!(matches!(list[1], AccelerationSettings::Empirical { .. }));
}

#[test]
fn negative_cannonball_area_is_rejected() {
    let err = RadiationPressureTargetSettings::cannonball(-1.0, 1.2, OccultingBodies::default())
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::NonPositive { value, .. } if value == -1.0));
    assert!(
        RadiationPressureTargetSettings::cannonball(0.0, 1.2, OccultingBodies::default()).is_err()
    );
}

#[test]
fn mismatched_coefficient_shapes_are_rejected() {
    let err = SphericalHarmonicsGravity::new(
        3.986e14,
        6.378e6,
        DMatrix::zeros(3, 3),
        DMatrix::zeros(3, 2),
        "IAU_Earth",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigurationError::DimensionMismatch { .. }));
}

#[test]
fn unknown_occulting_body_fails_validation() {
    let mut bodies = default_body_settings(&["Sun", "Earth"], "SSB", "ECLIPJ2000").unwrap();
    bodies
        .add_empty("Vehicle")
        .unwrap()
        .set_radiation_pressure_target(
            RadiationPressureTargetSettings::cannonball(
                4.0,
                1.2,
                OccultingBodies::global(["Earth", "Moon"]).unwrap(),
            )
            .unwrap(),
        );
    let err = bodies.validate().unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownBody { ref name, .. } if name == "Moon"));
}

#[test]
fn custom_density_callback_is_shared_across_threads() {
    let atmosphere = Arc::new(AtmosphereSettings::custom(|altitude, _, _, _| {
        1.225 * (-altitude / 7200.0).exp()
    }));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let atmosphere = Arc::clone(&atmosphere);
            thread::spawn(move || match atmosphere.as_ref() {
                AtmosphereSettings::Custom { density_function } => {
                    density_function.density(7200.0 * i as f64, 0.0, 0.0, 0.0)
                }
                _ => f64::NAN,
            })
        })
        .collect();
    let densities: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(densities[0], 1.225);
    assert!(densities.windows(2).all(|w| w[1] < w[0]));
}
