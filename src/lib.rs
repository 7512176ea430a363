//! Environment and acceleration settings for astrodynamics simulations.
//!
//! The member crates hold the descriptors; this facade re-exports them and
//! adds [`scenario`], which takes a manifest from disk to a validated,
//! resolved setup in one call.

pub use astro_accelerations as accelerations;
pub use astro_config as config;
pub use astro_core as common;
pub use astro_environment as environment;
pub use astro_export as export;

pub mod scenario;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
