use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use astro_setup::common::constants::SOLAR_SYSTEM_BARYCENTER;
use astro_setup::environment::{default_body_settings, kernels};
use astro_setup::export::{self, SettingsSummary};
use astro_setup::scenario::Scenario;

#[derive(Parser)]
#[command(
    name = "astro-setup",
    author,
    version,
    about = "Validate and inspect body and acceleration settings"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `astro_accelerations=trace`)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a scenario manifest, validate every body and resolve accelerations
    Check {
        /// YAML/TOML manifest, or a directory of TOML manifests
        scenario: PathBuf,

        /// Also write the JSON summary to this path (`-` for stdout)
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Print the default settings for catalog bodies
    Defaults {
        /// Comma-separated body names
        #[arg(long, value_delimiter = ',', default_value = "Sun,Earth,Moon")]
        bodies: Vec<String>,

        /// Global frame orientation
        #[arg(long, default_value = "ECLIPJ2000")]
        frame_orientation: String,
    },

    /// List the SPICE kernels a scenario needs
    Kernels {
        scenario: PathBuf,

        /// Directory the kernels are expected in
        #[arg(long, default_value = kernels::LOCAL_SPICE_DIR)]
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Check { scenario, json } => {
            let loaded = Scenario::load(&scenario)
                .with_context(|| format!("scenario {} is invalid", scenario.display()))?;
            let summary = loaded.summary();
            print_summary(&summary);
            if let Some(path) = json {
                export::write_summary(&path, &summary)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            println!("OK");
        }
        Command::Defaults {
            bodies,
            frame_orientation,
        } => {
            let bodies =
                default_body_settings(&bodies, SOLAR_SYSTEM_BARYCENTER, &frame_orientation)?;
            let summary = export::summarize(&bodies, &Default::default());
            print_summary(&summary);
        }
        Command::Kernels { scenario, dir } => {
            let loaded = Scenario::load(&scenario)
                .with_context(|| format!("scenario {} is invalid", scenario.display()))?;
            for filename in loaded.bodies.required_kernels() {
                let path = dir.join(filename);
                let status = if path.exists() { "present" } else { "missing" };
                let kind = kernels::descriptor(filename)
                    .map(|desc| desc.kind.label())
                    .unwrap_or("unknown");
                println!("{filename:<16} {kind:<26} {status:<8} {}", path.display());
            }
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(summary: &SettingsSummary) {
    println!(
        "=== Bodies (frame {} / {}) ===",
        summary.frame_origin, summary.frame_orientation
    );
    for body in &summary.bodies {
        let gm = body
            .gravitational_parameter
            .map(|mu| format!("{mu:.6e} m^3/s^2"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "[{:>2}] {:<10} GM = {:<22} models: {}",
            body.id,
            body.name,
            gm,
            body.models.join(", ")
        );
    }
    if !summary.accelerations.is_empty() {
        println!("=== Accelerations ===");
        for pair in &summary.accelerations {
            println!(
                "{} <- {} : {}",
                pair.undergoing,
                pair.exerting,
                pair.models.join(", ")
            );
        }
    }
    if !summary.required_kernels.is_empty() {
        println!("Kernels: {}", summary.required_kernels.join(", "));
    }
}
