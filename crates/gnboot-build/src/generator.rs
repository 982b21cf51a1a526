//! End-to-end generation: resolve, assemble, emit, write.

use crate::compile_commands::{CompileCommands, COMPILE_COMMANDS_NAME};
use crate::error::{BuildError, Result};
use crate::graph::TargetGraph;
use crate::ninja::{self, DEPFILE_NAME, MANIFEST_NAME};
use crate::platform::Platform;
use crate::toolchain::{BuildMode, EnvOverrides, ToolchainProfile};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Everything one generation run needs besides the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Source root the relative source paths resolve against.
    pub root: PathBuf,
    /// Directory receiving the manifest; the build runs from here.
    pub out_dir: PathBuf,
    /// Directory holding the `*.ninja.template` files.
    pub template_dir: PathBuf,
    pub platform: Platform,
    pub mode: BuildMode,
    /// Also write compile_commands.json.
    pub compile_commands: bool,
    /// Generator executable re-run by the regeneration rule.
    pub generator: PathBuf,
}

impl GenerateOptions {
    /// Options with the conventional layout: `<root>/out` and `<root>/build`.
    pub fn new(root: impl Into<PathBuf>, platform: Platform) -> Self {
        let root = root.into();
        Self {
            out_dir: root.join("out"),
            template_dir: root.join("build"),
            root,
            platform,
            mode: BuildMode::Release,
            compile_commands: false,
            generator: PathBuf::from("gnboot"),
        }
    }

    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(self.platform.template_file_name())
    }

    /// Command line that reproduces this run.
    pub fn regen_args(&self) -> Vec<String> {
        let mut args = vec![
            self.generator.display().to_string(),
            "--root".to_string(),
            self.root.display().to_string(),
            "--out-path".to_string(),
            self.out_dir.display().to_string(),
            "--template-dir".to_string(),
            self.template_dir.display().to_string(),
        ];
        if self.mode.is_debug() {
            args.push("--debug".to_string());
        }
        if self.compile_commands {
            args.push("--compile-commands".to_string());
        }
        args
    }
}

/// Paths written by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub manifest: PathBuf,
    pub depfile: PathBuf,
    pub compile_commands: Option<PathBuf>,
    /// Number of build statements in the manifest, regeneration included.
    pub statements: usize,
}

/// Rendered outputs of a run, before anything touches the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub manifest: String,
    pub depfile: String,
    pub compile_commands: Option<String>,
    pub statements: usize,
}

/// Produce the manifest text and companions without writing anything.
pub fn render(options: &GenerateOptions, env: &EnvOverrides) -> Result<Rendered> {
    let template_path = options.template_path();
    let template = read_template(&template_path)?;

    let profile = ToolchainProfile::resolve(options.platform, options.mode, env);
    debug!(
        platform = %profile.platform,
        mode = %profile.mode,
        cc = %profile.cc,
        cxx = %profile.cxx,
        ar = %profile.ar,
        ld = %profile.ld,
        "resolved toolchain"
    );

    let graph = TargetGraph::assemble(options.platform, &options.root)?;

    let mut manifest = ninja::emit(&profile, &graph, &template)?;
    let command = options
        .regen_args()
        .iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ");
    manifest.push_regeneration(&command)?;

    let depfile = format!(
        "{}: {} {}\n",
        MANIFEST_NAME,
        escape_depfile_path(&options.generator),
        escape_depfile_path(&template_path),
    );

    let compile_commands = if options.compile_commands {
        Some(CompileCommands::from_graph(&profile, &graph, &options.out_dir).to_json()?)
    } else {
        None
    };

    Ok(Rendered {
        statements: manifest.statements().len(),
        manifest: manifest.to_string(),
        depfile,
        compile_commands,
    })
}

/// Render and write the manifest, the depfile and, if requested,
/// compile_commands.json into the output directory.
///
/// Everything is rendered before the first write, and each file is
/// replaced atomically, so a failed run leaves no truncated manifest.
pub fn generate(options: &GenerateOptions, env: &EnvOverrides) -> Result<Generated> {
    let rendered = render(options, env)?;

    std::fs::create_dir_all(&options.out_dir)
        .map_err(|e| BuildError::io(&options.out_dir, e))?;

    let compile_commands = match &rendered.compile_commands {
        Some(json) => {
            let path = options.out_dir.join(COMPILE_COMMANDS_NAME);
            write_atomically(&path, json)?;
            Some(path)
        }
        None => None,
    };

    let depfile = options.out_dir.join(DEPFILE_NAME);
    write_atomically(&depfile, &rendered.depfile)?;

    let manifest = options.out_dir.join(MANIFEST_NAME);
    write_atomically(&manifest, &rendered.manifest)?;

    info!(
        manifest = %manifest.display(),
        statements = rendered.statements,
        "wrote manifest"
    );

    Ok(Generated {
        manifest,
        depfile,
        compile_commands,
        statements: rendered.statements,
    })
}

fn read_template(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(BuildError::TemplateNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(BuildError::io(path, e)),
    }
}

fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(|e| BuildError::io(dir, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| BuildError::io(file.path(), e))?;
    file.persist(path).map_err(|e| BuildError::io(path, e.error))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Quote an argument for the shell that runs ninja commands.
fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.chars().any(|c| c.is_whitespace() || c == '"') {
        return arg.to_string();
    }
    format!("\"{}\"", arg.replace('"', "\\\""))
}

fn escape_depfile_path(path: &Path) -> String {
    path.display().to_string().replace(' ', "\\ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regen_args() {
        let mut options = GenerateOptions::new("/src", Platform::Linux);
        options.generator = PathBuf::from("/usr/bin/gnboot");
        assert_eq!(
            options.regen_args(),
            vec![
                "/usr/bin/gnboot",
                "--root",
                "/src",
                "--out-path",
                "/src/out",
                "--template-dir",
                "/src/build",
            ]
        );

        options.mode = BuildMode::Debug;
        options.compile_commands = true;
        let args = options.regen_args();
        assert_eq!(&args[args.len() - 2..], &["--debug", "--compile-commands"]);
    }

    #[test]
    fn test_template_path() {
        let options = GenerateOptions::new("/src", Platform::Windows);
        assert!(options.template_path().ends_with("build/build_vs.ninja.template"));
    }

    #[test]
    fn test_quote_arg() {
        assert_eq!(quote_arg("/usr/bin/gnboot"), "/usr/bin/gnboot");
        assert_eq!(quote_arg("/my src"), "\"/my src\"");
        assert_eq!(quote_arg(""), "\"\"");
        assert_eq!(quote_arg("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_escape_depfile_path() {
        assert_eq!(escape_depfile_path(Path::new("/a b/c")), "/a\\ b/c");
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_template(&dir.path().join("build.ninja.template")).unwrap_err();
        assert!(matches!(err, BuildError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_write_atomically_replaces() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("build.ninja");
        write_atomically(&path, "old\n").unwrap();
        write_atomically(&path, "new\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
        // Only the target file remains; the temporary was renamed into place.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
