//! Ninja manifest generation for bootstrapping a C/C++ tool from a clean
//! checkout.
//!
//! This crate provides:
//! - Platform detection and toolchain profile resolution
//! - The bootstrap target graph (static libraries and executables)
//! - Ninja manifest emission with escaping and dependency edges
//! - compile_commands.json output
//!
//! # Example
//!
//! ```no_run
//! use gnboot_build::{generate, EnvOverrides, GenerateOptions, Platform};
//!
//! let options = GenerateOptions::new("/path/to/checkout", Platform::host()?);
//! let generated = generate(&options, &EnvOverrides::from_env())?;
//! println!("wrote {}", generated.manifest.display());
//! # Ok::<(), gnboot_build::BuildError>(())
//! ```

mod compile_commands;
mod error;
mod generator;
mod graph;
mod ninja;
mod platform;
mod sources;
mod toolchain;

pub use compile_commands::{CompileCommand, CompileCommands, COMPILE_COMMANDS_NAME};
pub use error::{BuildError, Result};
pub use generator::{generate, render, GenerateOptions, Generated, Rendered};
pub use graph::{
    object_path, CompilationUnit, Executable, StaticLibrary, Target, TargetGraph, TargetSettings,
    Tool,
};
pub use ninja::{
    emit, escape_path, unescape_path, BuildStatement, Manifest, ARCHIVE_RULE, DEPFILE_NAME,
    LINK_RULE, MANIFEST_NAME, REGEN_RULE,
};
pub use platform::{Extensions, Platform};
pub use toolchain::{BuildMode, EnvOverrides, ToolchainProfile};
