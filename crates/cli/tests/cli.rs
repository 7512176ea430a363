use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn scenario(name: &str) -> String {
    format!("{}/../../data/scenarios/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn check_prints_bodies_and_accelerations() {
    Command::cargo_bin("astro-setup")
        .unwrap()
        .args(["check", &scenario("leo_vehicle.yaml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vehicle"))
        .stdout(predicate::str::contains(
            "Vehicle <- Earth : spherical_harmonic_gravity, aerodynamic",
        ))
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn check_writes_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("summary.json");
    Command::cargo_bin("astro-setup")
        .unwrap()
        .args(["check", &scenario("mars_orbiter")])
        .arg("--json")
        .arg(&json)
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["bodies"][2]["name"], "Orbiter");
}

#[test]
fn check_rejects_excessive_degree() {
    Command::cargo_bin("astro-setup")
        .unwrap()
        .args(["check", &scenario("invalid_degree.yaml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("degree"));
}

#[test]
fn defaults_lists_requested_bodies() {
    Command::cargo_bin("astro-setup")
        .unwrap()
        .args(["defaults", "--bodies", "Earth,Mars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Earth"))
        .stdout(predicate::str::contains("Mars"))
        .stdout(predicate::str::contains("atmosphere"));
}

#[test]
fn defaults_rejects_unknown_body() {
    Command::cargo_bin("astro-setup")
        .unwrap()
        .args(["defaults", "--bodies", "Vulcan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vulcan"));
}

#[test]
fn kernels_lists_standard_set() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("astro-setup")
        .unwrap()
        .args(["kernels", &scenario("leo_vehicle.yaml")])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("de440s.bsp"))
        .stdout(predicate::str::contains("missing"));
}
