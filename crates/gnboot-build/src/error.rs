//! Error types for gnboot-build.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for gnboot-build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while generating a manifest.
#[derive(Error, Diagnostic, Debug)]
pub enum BuildError {
    /// The host platform has no toolchain profile.
    #[error("unsupported host platform: {0}")]
    #[diagnostic(
        code(gnboot::config::platform),
        help("supported platforms are linux, macos, windows and aix")
    )]
    UnsupportedPlatform(String),

    /// The ninja template for the active platform is missing.
    #[error("ninja template not found: {}", path.display())]
    #[diagnostic(
        code(gnboot::config::template),
        help("pass --template-dir to point at the directory holding the *.ninja.template files")
    )]
    TemplateNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// An executable names a static library that is not in the graph.
    #[error("executable `{executable}` depends on unknown static library `{library}`")]
    #[diagnostic(code(gnboot::graph::unresolved))]
    UnresolvedLibrary {
        /// Name of the executable target.
        executable: String,
        /// Name of the missing library.
        library: String,
    },

    /// Two sources map onto the same object file.
    #[error("`{first}` and `{second}` both compile to `{object}`")]
    #[diagnostic(
        code(gnboot::graph::object_collision),
        help("rename one of the sources so their stems differ")
    )]
    ObjectCollision {
        /// The shared object path.
        object: String,
        /// Source seen first.
        first: String,
        /// Source seen second.
        second: String,
    },

    /// A target name was declared twice.
    #[error("target `{0}` is declared more than once")]
    #[diagnostic(code(gnboot::graph::duplicate_target))]
    DuplicateTarget(String),

    /// Two build statements claim the same output.
    #[error("output `{0}` is produced by more than one build statement")]
    #[diagnostic(code(gnboot::manifest::duplicate_output))]
    DuplicateOutput(String),

    /// An archive or link statement consumes something nothing produced.
    #[error("`{output}` consumes `{input}`, which no earlier build statement produces")]
    #[diagnostic(code(gnboot::manifest::dangling_input))]
    DanglingInput {
        /// Output of the offending statement.
        output: String,
        /// The input with no producer.
        input: String,
    },

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    #[diagnostic(code(gnboot::io))]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or write compile_commands.json.
    #[error("compile_commands.json: {0}")]
    #[diagnostic(code(gnboot::compile_commands))]
    Json(#[from] serde_json::Error),
}

impl BuildError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
