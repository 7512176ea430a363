//! Standard SPICE kernel set referenced by SPICE-backed settings.
//!
//! Nothing here loads a kernel; the descriptors tell the body factory which
//! files it needs before the settings can be turned into models.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Location where kernels are expected to live by default.
pub const LOCAL_SPICE_DIR: &str = "data/spice";

/// SPICE kernel families referenced by environment settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KernelKind {
    /// SPK: ephemerides (positions and velocities).
    Spk,
    /// LSK: leap seconds (UTC ↔ TDB conversions).
    Lsk,
    /// PCK: body orientation, radii, and gravitational parameters.
    Pck,
    /// FK: reference frame definitions.
    Fk,
}

impl KernelKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Spk => "SPK (ephemeris)",
            Self::Lsk => "LSK (leap seconds)",
            Self::Pck => "PCK (planetary constants)",
            Self::Fk => "FK (reference frames)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelDescriptor {
    pub filename: &'static str,
    pub kind: KernelKind,
    pub description: &'static str,
}

impl KernelDescriptor {
    /// Path of the kernel inside `dir`.
    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.filename)
    }

    /// Path of the kernel inside [`LOCAL_SPICE_DIR`].
    pub fn local_path(self) -> PathBuf {
        self.path_in(Path::new(LOCAL_SPICE_DIR))
    }
}

/// Kernels loaded by a standard setup.
pub const STANDARD_KERNELS: &[&str] = &["de440s.bsp", "naif0012.tls", "pck00011.tpc"];

pub const KERNEL_CATALOG: &[KernelDescriptor] = &[
    KernelDescriptor {
        filename: "de440s.bsp",
        kind: KernelKind::Spk,
        description: "Barycentric states of the Sun, planets, Moon, and Pluto (1550–2650).",
    },
    KernelDescriptor {
        filename: "jup365.bsp",
        kind: KernelKind::Spk,
        description: "Jupiter system satellites.",
    },
    KernelDescriptor {
        filename: "sat455.bsp",
        kind: KernelKind::Spk,
        description: "Saturn system satellites.",
    },
    KernelDescriptor {
        filename: "mar099.bsp",
        kind: KernelKind::Spk,
        description: "Phobos and Deimos.",
    },
    KernelDescriptor {
        filename: "plu060.bsp",
        kind: KernelKind::Spk,
        description: "Pluto system.",
    },
    KernelDescriptor {
        filename: "nep095.bsp",
        kind: KernelKind::Spk,
        description: "Neptune system satellites, including Triton.",
    },
    KernelDescriptor {
        filename: "codes_300ast_20100725.bsp",
        kind: KernelKind::Spk,
        description: "The 300 largest main-belt asteroids.",
    },
    KernelDescriptor {
        filename: "codes_300ast_20100725.tf",
        kind: KernelKind::Fk,
        description: "Frame definitions for the asteroid ephemeris.",
    },
    KernelDescriptor {
        filename: "naif0012.tls",
        kind: KernelKind::Lsk,
        description: "Leap seconds table.",
    },
    KernelDescriptor {
        filename: "pck00011.tpc",
        kind: KernelKind::Pck,
        description: "Orientation models, radii, and constants for the Sun, planets, and major moons.",
    },
];

/// Catalog entry for a kernel filename.
pub fn descriptor(filename: &str) -> Option<&'static KernelDescriptor> {
    KERNEL_CATALOG.iter().find(|d| d.filename == filename)
}

/// Kernels needed to evaluate SPICE-backed models of `body`.
pub fn required_kernels(body: &str) -> BTreeSet<&'static str> {
    let mut deps: BTreeSet<&'static str> = STANDARD_KERNELS.iter().copied().collect();
    let upper = body.to_ascii_uppercase();

    if upper.contains("JUPITER") || matches!(upper.as_str(), "IO" | "EUROPA" | "GANYMEDE" | "CALLISTO")
    {
        deps.insert("jup365.bsp");
    }
    if upper.contains("SATURN") || matches!(upper.as_str(), "TITAN" | "ENCELADUS") {
        deps.insert("sat455.bsp");
    }
    if matches!(upper.as_str(), "PHOBOS" | "DEIMOS") {
        deps.insert("mar099.bsp");
    }
    if upper.contains("NEPTUNE") || upper.contains("TRITON") {
        deps.insert("nep095.bsp");
    }
    if upper.contains("PLUTO") || upper.contains("CHARON") {
        deps.insert("plu060.bsp");
    }
    if matches!(upper.as_str(), "CERES" | "VESTA" | "PALLAS") {
        deps.insert("codes_300ast_20100725.bsp");
        deps.insert("codes_300ast_20100725.tf");
    }
    deps
}
