//! JSON summaries of assembled settings, for inspection and regression diffs.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use astro_accelerations::AccelerationMap;
use astro_environment::BodyListSettings;
use serde::Serialize;

/// Summary of one registered body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BodySummary {
    pub id: usize,
    pub name: String,
    pub mass_kg: Option<f64>,
    pub gravitational_parameter: Option<f64>,
    pub gravity_field: Option<&'static str>,
    pub atmosphere: Option<&'static str>,
    pub ephemeris: Option<&'static str>,
    pub ephemeris_origin: Option<String>,
    pub rotation_model: Option<&'static str>,
    pub body_fixed_frame: Option<String>,
    pub shape_model: Option<&'static str>,
    pub mean_radius_m: Option<f64>,
    pub radiation_pressure_target: Option<&'static str>,
    pub radiation_source: Option<&'static str>,
    pub ground_stations: Vec<String>,
    pub models: Vec<&'static str>,
}

/// Accelerations acting on one body due to another, after resolution.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccelerationSummary {
    pub undergoing: String,
    pub exerting: String,
    pub models: Vec<&'static str>,
}

/// Envelope written by [`write_summary`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SettingsSummary {
    pub frame_origin: String,
    pub frame_orientation: String,
    pub bodies: Vec<BodySummary>,
    pub accelerations: Vec<AccelerationSummary>,
    pub required_kernels: Vec<&'static str>,
}

/// Build the summary of a body registry and its resolved accelerations.
pub fn summarize(bodies: &BodyListSettings, accelerations: &AccelerationMap) -> SettingsSummary {
    let body_summaries = bodies
        .iter()
        .map(|(id, name, settings)| BodySummary {
            id: id.0,
            name: name.to_string(),
            mass_kg: settings.constant_mass,
            gravitational_parameter: settings
                .gravity_field
                .as_ref()
                .and_then(|g| g.gravitational_parameter()),
            gravity_field: settings.gravity_field.as_ref().map(|g| g.label()),
            atmosphere: settings.atmosphere.as_ref().map(|a| a.label()),
            ephemeris: settings.ephemeris.as_ref().map(|e| e.label()),
            ephemeris_origin: settings.ephemeris.as_ref().map(|e| e.frame_origin.clone()),
            rotation_model: settings.rotation_model.as_ref().map(|r| r.label()),
            body_fixed_frame: settings.body_fixed_frame().map(str::to_string),
            shape_model: settings.shape_model.as_ref().map(|s| s.label()),
            mean_radius_m: settings.shape_model.as_ref().and_then(|s| s.average_radius()),
            radiation_pressure_target: settings
                .radiation_pressure_target
                .as_ref()
                .map(|t| t.label()),
            radiation_source: settings.radiation_source.as_ref().map(|r| r.label()),
            ground_stations: settings
                .ground_stations
                .iter()
                .map(|s| s.name().to_string())
                .collect(),
            models: settings.configured_models(),
        })
        .collect();

    let name = |id| bodies.name_of(id).unwrap_or("?").to_string();
    let mut acceleration_summaries = Vec::new();
    for undergoing in accelerations.bodies_undergoing() {
        for pair in accelerations.acting_on(undergoing) {
            acceleration_summaries.push(AccelerationSummary {
                undergoing: name(undergoing),
                exerting: name(pair.exerting),
                models: pair.accelerations.iter().map(|a| a.kind().name()).collect(),
            });
        }
    }

    SettingsSummary {
        frame_origin: bodies.frame_origin().to_string(),
        frame_orientation: bodies.frame_orientation().to_string(),
        bodies: body_summaries,
        accelerations: acceleration_summaries,
        required_kernels: bodies.required_kernels().into_iter().collect(),
    }
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Write `summary` as pretty JSON to `path` (or stdout for `-`).
pub fn write_summary(path: &Path, summary: &SettingsSummary) -> io::Result<()> {
    let mut writer = writer_for_path(path)?;
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    writer.flush()
}
