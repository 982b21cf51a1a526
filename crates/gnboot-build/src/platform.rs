//! Host platform identification and file naming conventions.

use crate::error::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A host platform the generator knows how to bootstrap on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Mac,
    Windows,
    Aix,
}

/// File extensions used for build outputs on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extensions {
    /// Object files, including the leading dot.
    pub object: &'static str,
    /// Static libraries, including the leading dot.
    pub static_library: &'static str,
    /// Executables; empty where the platform uses none.
    pub executable: &'static str,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Platform; 4] = [
        Platform::Linux,
        Platform::Mac,
        Platform::Windows,
        Platform::Aix,
    ];

    /// Parse an OS identifier as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Mac),
            "windows" => Ok(Self::Windows),
            "aix" => Ok(Self::Aix),
            other => Err(BuildError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// The platform this process is running on.
    pub fn host() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Short name, matching the `std::env::consts::OS` spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Mac => "macos",
            Self::Windows => "windows",
            Self::Aix => "aix",
        }
    }

    pub fn is_posix(&self) -> bool {
        !matches!(self, Self::Windows)
    }

    /// Name of the ninja template holding this platform's rule definitions.
    pub fn template_file_name(&self) -> &'static str {
        match self {
            Self::Windows => "build_vs.ninja.template",
            Self::Mac => "build_mac.ninja.template",
            Self::Aix => "build_aix.ninja.template",
            Self::Linux => "build.ninja.template",
        }
    }

    pub fn extensions(&self) -> Extensions {
        match self {
            Self::Windows => Extensions {
                object: ".obj",
                static_library: ".lib",
                executable: ".exe",
            },
            Self::Linux | Self::Mac | Self::Aix => Extensions {
                object: ".o",
                static_library: ".a",
                executable: "",
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
