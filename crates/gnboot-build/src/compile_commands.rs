//! compile_commands.json output.
//!
//! Editors and clang tooling read this file to learn the exact compile
//! invocation for each source. The entries mirror the compile statements of
//! the manifest, with paths left unescaped.

use crate::graph::{CompilationUnit, TargetGraph, Tool};
use crate::platform::Platform;
use crate::toolchain::ToolchainProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name written next to the manifest.
pub const COMPILE_COMMANDS_NAME: &str = "compile_commands.json";

/// A single compile command from compile_commands.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommand {
    /// The working directory for compilation.
    pub directory: PathBuf,

    /// The source file path.
    pub file: PathBuf,

    /// The full compilation command (space-separated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// The compilation arguments (array form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,

    /// Output file (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl CompileCommand {
    /// Get the compilation arguments as a vector.
    pub fn get_args(&self) -> Vec<String> {
        if let Some(args) = &self.arguments {
            args.clone()
        } else if let Some(cmd) = &self.command {
            // Simple space-split (doesn't handle quoted strings properly)
            cmd.split_whitespace().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        }
    }

    /// Extract include directories from the arguments.
    pub fn get_includes(&self) -> Vec<PathBuf> {
        let args = self.get_args();
        let mut includes = Vec::new();

        let mut i = 0;
        while i < args.len() {
            if args[i] == "-I" && i + 1 < args.len() {
                includes.push(PathBuf::from(&args[i + 1]));
                i += 2;
            } else if let Some(dir) = args[i].strip_prefix("-I") {
                includes.push(PathBuf::from(dir));
                i += 1;
            } else {
                i += 1;
            }
        }

        includes
    }

    /// Extract preprocessor definitions from the arguments, in either the
    /// `-D` or the MSVC `/D` spelling.
    pub fn get_defines(&self) -> Vec<String> {
        self.get_args()
            .iter()
            .filter_map(|arg| arg.strip_prefix("-D").or_else(|| arg.strip_prefix("/D")))
            .filter(|def| !def.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Collection of compile commands (from compile_commands.json).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommands {
    commands: Vec<CompileCommand>,
}

impl CompileCommands {
    /// Build one entry per compilation unit of `graph`, in manifest order.
    ///
    /// `out_dir` is the directory the build runs in; object paths are
    /// relative to it.
    pub fn from_graph(profile: &ToolchainProfile, graph: &TargetGraph, out_dir: &Path) -> Self {
        let libs = graph.static_libraries().map(|lib| &lib.settings);
        let exes = graph.executables().map(|exe| &exe.settings);

        let commands = libs
            .chain(exes)
            .flat_map(|settings| settings.units())
            .map(|unit| {
                let file = graph.source_path(unit.source);
                let object = unit.object_path(profile.extensions.object);
                CompileCommand {
                    directory: out_dir.to_path_buf(),
                    arguments: Some(compile_arguments(profile, graph, &unit, &file, &object)),
                    file,
                    command: None,
                    output: Some(PathBuf::from(object)),
                }
            })
            .collect();

        Self { commands }
    }

    /// Load compile commands from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| crate::BuildError::io(path, e))?;
        Self::from_str(&content)
    }

    /// Parse compile commands from a JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> crate::Result<Self> {
        let commands: Vec<CompileCommand> = serde_json::from_str(json)?;
        Ok(Self { commands })
    }

    /// Serialize to pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> crate::Result<String> {
        let mut json = serde_json::to_string_pretty(&self.commands)?;
        json.push('\n');
        Ok(json)
    }

    /// Get all compile commands.
    pub fn commands(&self) -> &[CompileCommand] {
        &self.commands
    }

    /// Find the compile command for a specific source file.
    pub fn find_command(&self, source: &Path) -> Option<&CompileCommand> {
        self.commands
            .iter()
            .find(|cmd| cmd.file == source || cmd.file.ends_with(source))
    }
}

/// The argument vector the manifest's compile rule runs for `unit`.
fn compile_arguments(
    profile: &ToolchainProfile,
    graph: &TargetGraph,
    unit: &CompilationUnit<'_>,
    file: &Path,
    object: &str,
) -> Vec<String> {
    let compiler = match unit.tool {
        Tool::Cc => &profile.cc,
        Tool::Cxx => &profile.cxx,
    };
    // Binary overrides such as `ar -X64` or `ccache cc` carry their own words.
    let mut args: Vec<String> = compiler.split_whitespace().map(str::to_string).collect();

    if profile.platform == Platform::Windows {
        args.push("/nologo".to_string());
    }
    args.extend(
        graph
            .include_dirs
            .iter()
            .chain(unit.include_dirs)
            .map(|dir| format!("-I{}", dir)),
    );
    args.extend(profile.cflags.iter().chain(unit.cflags).cloned());
    if unit.tool == Tool::Cxx {
        args.extend(profile.cflags_cc.iter().chain(unit.cflags_cc).cloned());
    }

    let file = file.display().to_string();
    match profile.platform {
        Platform::Windows => {
            args.extend(["/c".to_string(), file, format!("/Fo{}", object)]);
        }
        Platform::Linux | Platform::Mac | Platform::Aix => {
            args.extend(["-c".to_string(), file, "-o".to_string(), object.to_string()]);
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Target, TargetSettings};
    use crate::toolchain::{BuildMode, EnvOverrides};

    fn graph() -> TargetGraph {
        let mut graph = TargetGraph::new(Path::new("/src"));
        let mut event = TargetSettings::new(Tool::Cc)
            .with_sources(&["event/poll.c"])
            .with_cflags(&["-DHAVE_CONFIG_H"]);
        event.include_dirs.push("/src/event/linux".to_string());
        graph.add(Target::static_library("event", event)).unwrap();
        graph
            .add(Target::executable(
                "app",
                TargetSettings::new(Tool::Cxx).with_sources(&["app/main.cc"]),
            ))
            .unwrap();
        graph.link_all_libraries();
        graph
    }

    #[test]
    fn test_parse_compile_commands() {
        let json = r#"[
            {
                "directory": "/home/user/project/build",
                "file": "/home/user/project/src/main.cc",
                "command": "g++ -I/usr/include -I../include -DDEBUG=1 -std=c++23 -c main.cc"
            },
            {
                "directory": "/home/user/project/build",
                "file": "/home/user/project/src/utils.cc",
                "arguments": ["g++", "-I/usr/include", "-DNDEBUG", "-c", "utils.cc"]
            }
        ]"#;

        let cmds = CompileCommands::from_str(json).unwrap();

        assert_eq!(cmds.commands().len(), 2);

        let cmd0 = &cmds.commands()[0];
        assert_eq!(cmd0.get_includes().len(), 2);
        assert_eq!(cmd0.get_defines(), vec!["DEBUG=1"]);

        let cmd1 = &cmds.commands()[1];
        assert_eq!(cmd1.get_defines(), vec!["NDEBUG"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_from_graph_posix() {
        let profile = ToolchainProfile::resolve(Platform::Linux, BuildMode::Release, &EnvOverrides::default());
        let cmds = CompileCommands::from_graph(&profile, &graph(), Path::new("/src/out"));

        assert_eq!(cmds.commands().len(), 2);

        let poll = cmds.find_command(Path::new("event/poll.c")).unwrap();
        assert_eq!(poll.directory, PathBuf::from("/src/out"));
        assert_eq!(poll.output, Some(PathBuf::from("event/poll.o")));
        let args = poll.get_args();
        assert_eq!(args[0], "cc");
        assert_eq!(&args[args.len() - 4..], &["-c", "/src/event/poll.c", "-o", "event/poll.o"]);
        assert_eq!(
            poll.get_includes(),
            vec![
                PathBuf::from("/src"),
                PathBuf::from("/src/src"),
                PathBuf::from("/src/event/linux"),
            ]
        );
        assert!(poll.get_defines().contains(&"HAVE_CONFIG_H".to_string()));
        // C units never see the C++-only flags.
        assert!(!args.contains(&"-std=c++14".to_string()));

        let main = cmds.find_command(Path::new("app/main.cc")).unwrap();
        assert_eq!(main.get_args()[0], "c++");
        assert!(main.get_args().contains(&"-std=c++14".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_from_graph_windows() {
        let profile = ToolchainProfile::resolve(Platform::Windows, BuildMode::Release, &EnvOverrides::default());
        let cmds = CompileCommands::from_graph(&profile, &graph(), Path::new("/src/out"));

        let main = cmds.find_command(Path::new("app/main.cc")).unwrap();
        let args = main.get_args();
        assert_eq!(args[0], "cl.exe");
        assert_eq!(args[1], "/nologo");
        assert_eq!(args.last().map(String::as_str), Some("/Foapp/main.obj"));
        assert!(main.get_defines().contains(&"_HAS_EXCEPTIONS=0".to_string()));
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let profile = ToolchainProfile::resolve(Platform::Linux, BuildMode::Debug, &EnvOverrides::default());
        let cmds = CompileCommands::from_graph(&profile, &graph(), Path::new("/src/out"));

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(COMPILE_COMMANDS_NAME);
        std::fs::write(&path, cmds.to_json().unwrap()).unwrap();

        let loaded = CompileCommands::from_file(&path).unwrap();
        assert_eq!(loaded, cmds);
    }
}
