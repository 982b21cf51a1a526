//! Toolchain profile resolution.
//!
//! A [`ToolchainProfile`] is resolved exactly once per run from the host
//! [`Platform`], the [`BuildMode`] and the environment overrides. Every later
//! stage takes it by reference.

use crate::platform::{Extensions, Platform};
use std::fmt;

/// Debug or release build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    Debug,
    #[default]
    Release,
}

impl BuildMode {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Release => write!(f, "release"),
        }
    }
}

/// Toolchain overrides taken from the environment.
///
/// Binary overrides replace the platform default; flag strings are
/// whitespace-split and appended after the computed flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub cc: Option<String>,
    pub cxx: Option<String>,
    pub ld: Option<String>,
    pub ar: Option<String>,
    pub cflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub ldflags: Vec<String>,
    pub arflags: Vec<String>,
}

impl EnvOverrides {
    /// Read `CC`, `CXX`, `LD`, `AR`, `CFLAGS`, `CXXFLAGS`, `LDFLAGS` and
    /// `ARFLAGS` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build overrides from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // An empty binary override would produce a `cc = ` line; treat it as unset.
        let binary = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let flags = |key: &str| {
            lookup(key)
                .map(|v| v.split_whitespace().map(str::to_string).collect::<Vec<_>>())
                .unwrap_or_default()
        };

        Self {
            cc: binary("CC"),
            cxx: binary("CXX"),
            ld: binary("LD"),
            ar: binary("AR"),
            cflags: flags("CFLAGS"),
            cxxflags: flags("CXXFLAGS"),
            ldflags: flags("LDFLAGS"),
            arflags: flags("ARFLAGS"),
        }
    }
}

/// Resolved compiler identities and flags for one platform and build mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainProfile {
    pub platform: Platform,
    pub mode: BuildMode,
    pub cc: String,
    pub cxx: String,
    pub ar: String,
    pub ld: String,
    /// Flags for every compilation unit.
    pub cflags: Vec<String>,
    /// Flags for C++ compilation units only.
    pub cflags_cc: Vec<String>,
    pub ldflags: Vec<String>,
    pub arflags: Vec<String>,
    pub extensions: Extensions,
}

impl ToolchainProfile {
    /// Resolve the profile for `platform` and `mode`.
    pub fn resolve(platform: Platform, mode: BuildMode, env: &EnvOverrides) -> Self {
        let pick = |over: &Option<String>, default: &str| {
            over.clone().unwrap_or_else(|| default.to_string())
        };

        let (cc, cxx, ar) = match platform {
            Platform::Windows => (
                pick(&env.cc, "cl.exe"),
                pick(&env.cxx, "cl.exe"),
                pick(&env.ar, "lib.exe"),
            ),
            Platform::Aix => (
                pick(&env.cc, "gcc"),
                pick(&env.cxx, "c++"),
                pick(&env.ar, "ar -X64"),
            ),
            Platform::Linux | Platform::Mac => (
                pick(&env.cc, "cc"),
                pick(&env.cxx, "c++"),
                pick(&env.ar, "ar"),
            ),
        };
        // POSIX toolchains link through the C++ driver.
        let ld = match platform {
            Platform::Windows => pick(&env.ld, "link.exe"),
            Platform::Linux | Platform::Mac | Platform::Aix => pick(&env.ld, cxx.as_str()),
        };

        let mut cflags = strings(&["-DNO_TCMALLOC", "-D__STDC_FORMAT_MACROS"]);
        let mut cflags_cc = Vec::new();
        let mut ldflags = Vec::new();

        if platform.is_posix() {
            if mode.is_debug() {
                cflags.extend(strings(&["-O0", "-g"]));
            } else {
                // -O3 miscompiles on some hosts (linux ppc64 big endian), so
                // release stops one level short. CFLAGS can still raise it.
                cflags.extend(strings(&["-O2", "-g0"]));
            }

            cflags.extend(strings(&[
                "-D_FILE_OFFSET_BITS=64",
                "-D__STDC_CONSTANT_MACROS",
                "-D__STDC_FORMAT_MACROS",
                "-pthread",
                "-pipe",
                "-fno-exceptions",
            ]));
            cflags_cc.extend(strings(&["-std=c++14", "-Wno-c++11-narrowing"]));

            if platform == Platform::Aix {
                cflags.push("-maix64".to_string());
                ldflags.extend(strings(&["-maix64", "-Wl,-bbigtoc", "-pthread"]));
            }
        } else {
            if !mode.is_debug() {
                cflags.extend(strings(&["/Ox", "/DNDEBUG", "/GL"]));
                ldflags.extend(strings(&["/LTCG", "/OPT:REF", "/OPT:ICF"]));
            }

            cflags.extend(strings(&[
                "/FS",
                "/Gy",
                "/W3",
                "/wd4244",
                "/Zi",
                "/DWIN32_LEAN_AND_MEAN",
                "/DNOMINMAX",
                "/D_CRT_SECURE_NO_DEPRECATE",
                "/D_SCL_SECURE_NO_DEPRECATE",
                "/D_WIN32_WINNT=0x0A00",
                "/DWINVER=0x0A00",
                "/DUNICODE",
                "/D_UNICODE",
            ]));
            cflags_cc.extend(strings(&["/GR-", "/D_HAS_EXCEPTIONS=0"]));
            ldflags.push("/MACHINE:x64".to_string());
        }

        cflags.extend(env.cflags.iter().cloned());
        cflags_cc.extend(env.cxxflags.iter().cloned());
        ldflags.extend(env.ldflags.iter().cloned());

        Self {
            platform,
            mode,
            cc,
            cxx,
            ar,
            ld,
            cflags,
            cflags_cc,
            ldflags,
            arflags: env.arflags.clone(),
            extensions: platform.extensions(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
