//! Target graph model and assembly.
//!
//! The graph is a name-keyed, insertion-ordered map of [`Target`]s. It is
//! assembled once per run for one [`Platform`], pruned of libraries that have
//! no sources there, validated, and then only read.

use crate::error::{BuildError, Result};
use crate::platform::Platform;
use crate::sources;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Which compiler a compilation unit goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// The C compiler (`$cc`).
    Cc,
    /// The C++ compiler (`$cxx`).
    Cxx,
}

impl Tool {
    /// Name of the ninja rule compiling with this tool.
    pub fn rule_name(&self) -> &'static str {
        match self {
            Self::Cc => "cc",
            Self::Cxx => "cxx",
        }
    }
}

/// Sources and per-target compile settings shared by both target kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSettings {
    pub tool: Tool,
    /// Source files relative to the source root, in build order.
    pub sources: Vec<String>,
    /// Extra include directories, appended after the global ones.
    pub include_dirs: Vec<String>,
    /// Extra flags for every source, appended after the global ones.
    pub cflags: Vec<String>,
    /// Extra flags for C++ sources.
    pub cflags_cc: Vec<String>,
}

impl TargetSettings {
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            sources: Vec::new(),
            include_dirs: Vec::new(),
            cflags: Vec::new(),
            cflags_cc: Vec::new(),
        }
    }

    /// Add source files.
    pub fn with_sources(mut self, sources: &[&str]) -> Self {
        self.add_sources(sources);
        self
    }

    /// Add extra compile flags.
    pub fn with_cflags(mut self, cflags: &[&str]) -> Self {
        self.cflags.extend(cflags.iter().map(|s| s.to_string()));
        self
    }

    pub fn add_sources(&mut self, sources: &[&str]) {
        self.sources.extend(sources.iter().map(|s| s.to_string()));
    }

    /// One compilation unit per source, in source order.
    pub fn units(&self) -> impl Iterator<Item = CompilationUnit<'_>> {
        self.sources.iter().map(move |source| CompilationUnit {
            source,
            tool: self.tool,
            include_dirs: &self.include_dirs,
            cflags: &self.cflags,
            cflags_cc: &self.cflags_cc,
        })
    }
}

/// A static library: archived, never linked on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLibrary {
    pub name: String,
    pub settings: TargetSettings,
}

/// An executable linked from its own objects plus static libraries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    pub name: String,
    pub settings: TargetSettings,
    /// Static-library target names linked in, in order.
    pub libs: Vec<String>,
}

/// A named build artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    StaticLibrary(StaticLibrary),
    Executable(Executable),
}

impl Target {
    pub fn static_library(name: &str, settings: TargetSettings) -> Self {
        Self::StaticLibrary(StaticLibrary {
            name: name.to_string(),
            settings,
        })
    }

    pub fn executable(name: &str, settings: TargetSettings) -> Self {
        Self::Executable(Executable {
            name: name.to_string(),
            settings,
            libs: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::StaticLibrary(lib) => &lib.name,
            Self::Executable(exe) => &exe.name,
        }
    }

    pub fn settings(&self) -> &TargetSettings {
        match self {
            Self::StaticLibrary(lib) => &lib.settings,
            Self::Executable(exe) => &exe.settings,
        }
    }

    /// The compilation units of this target, in source order.
    pub fn units(&self) -> impl Iterator<Item = CompilationUnit<'_>> {
        self.settings().units()
    }
}

/// One source file as it participates in a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilationUnit<'a> {
    pub source: &'a str,
    pub tool: Tool,
    pub include_dirs: &'a [String],
    pub cflags: &'a [String],
    pub cflags_cc: &'a [String],
}

impl CompilationUnit<'_> {
    /// Object file path (unescaped) for the given object extension.
    pub fn object_path(&self, object_ext: &str) -> String {
        object_path(self.source, object_ext)
    }
}

/// Replace the extension of `source` with `object_ext`.
///
/// Only the final component's extension is replaced; leading dots of a file
/// name do not start an extension.
pub fn object_path(source: &str, object_ext: &str) -> String {
    format!("{}{}", strip_extension(source), object_ext)
}

fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    let name = &path[file_start..];
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(dot) => &path[..file_start + leading_dots + dot],
        None => path,
    }
}

/// The complete target graph for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetGraph {
    root: PathBuf,
    /// Include directories passed to every compilation unit.
    pub include_dirs: Vec<String>,
    /// System libraries passed to every link.
    pub system_libs: Vec<String>,
    targets: IndexMap<String, Target>,
}

impl TargetGraph {
    /// Create an empty graph rooted at `root`, with `root` and `root/src` as
    /// global include directories.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            include_dirs: vec![path_string(root), path_string(&root.join("src"))],
            system_libs: Vec::new(),
            targets: IndexMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a source file.
    pub fn source_path(&self, source: &str) -> PathBuf {
        self.root.join(source)
    }

    /// Absolute path of a directory under the root, as used in include lists.
    pub fn root_dir(&self, relative: &str) -> String {
        path_string(&self.root.join(relative))
    }

    /// Insert a target. Names must be unique.
    pub fn add(&mut self, target: Target) -> Result<()> {
        let name = target.name().to_string();
        if self.targets.contains_key(&name) {
            return Err(BuildError::DuplicateTarget(name));
        }
        self.targets.insert(name, target);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }

    /// All targets in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    pub fn static_libraries(&self) -> impl Iterator<Item = &StaticLibrary> {
        self.targets.values().filter_map(|t| match t {
            Target::StaticLibrary(lib) => Some(lib),
            Target::Executable(_) => None,
        })
    }

    pub fn executables(&self) -> impl Iterator<Item = &Executable> {
        self.targets.values().filter_map(|t| match t {
            Target::Executable(exe) => Some(exe),
            Target::StaticLibrary(_) => None,
        })
    }

    /// Drop static libraries with no sources on this platform.
    pub fn prune_empty_libraries(&mut self) {
        self.targets.retain(|name, target| match target {
            Target::StaticLibrary(lib) if lib.settings.sources.is_empty() => {
                debug!(library = %name, "pruning static library with no sources");
                false
            }
            _ => true,
        });
    }

    /// Link every static library into every executable.
    pub fn link_all_libraries(&mut self) {
        let libs: Vec<String> = self.static_libraries().map(|lib| lib.name.clone()).collect();
        for target in self.targets.values_mut() {
            if let Target::Executable(exe) = target {
                exe.libs = libs.clone();
            }
        }
    }

    /// Check referential integrity and object path uniqueness.
    pub fn validate(&self) -> Result<()> {
        for exe in self.executables() {
            for lib in &exe.libs {
                if !matches!(self.targets.get(lib), Some(Target::StaticLibrary(_))) {
                    return Err(BuildError::UnresolvedLibrary {
                        executable: exe.name.clone(),
                        library: lib.clone(),
                    });
                }
            }
        }

        // The object extension is the same for every unit, so stems collide
        // exactly when object paths do.
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for target in self.targets() {
            for unit in target.units() {
                let stem = strip_extension(unit.source);
                if let Some(first) = seen.insert(stem, unit.source) {
                    return Err(BuildError::ObjectCollision {
                        object: stem.to_string(),
                        first: first.to_string(),
                        second: unit.source.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Assemble, prune, link and validate the bootstrap graph for `platform`.
    pub fn assemble(platform: Platform, root: &Path) -> Result<Self> {
        let mut graph = Self::new(root);

        let mut base = TargetSettings::new(Tool::Cxx).with_sources(sources::BASE);
        let dynamic_annotations =
            TargetSettings::new(Tool::Cc).with_sources(sources::DYNAMIC_ANNOTATIONS);
        let mut gn_lib = TargetSettings::new(Tool::Cxx);
        gn_lib.sources = discover_gn_lib_sources(root)?;
        let mut libevent = TargetSettings::new(Tool::Cc).with_cflags(&["-DHAVE_CONFIG_H"]);
        let mut xdg_user_dirs = TargetSettings::new(Tool::Cxx);
        let gn = TargetSettings::new(Tool::Cxx).with_sources(&[sources::GN_MAIN]);

        match platform {
            Platform::Linux => {
                base.add_sources(sources::BASE_SHARED_MEMORY_POSIX);
                base.add_sources(sources::BASE_POSIX);
                base.add_sources(sources::BASE_LINUX_AIX);
                base.add_sources(sources::BASE_LINUX);
                libevent.add_sources(sources::LIBEVENT);
                libevent.add_sources(sources::LIBEVENT_LINUX);
                libevent
                    .include_dirs
                    .push(graph.root_dir("base/third_party/libevent/linux"));
                xdg_user_dirs.add_sources(sources::XDG_USER_DIRS);
                graph.system_libs = to_strings(sources::SYSTEM_LIBS_LINUX);
            }
            Platform::Aix => {
                base.add_sources(sources::BASE_SHARED_MEMORY_POSIX);
                base.add_sources(sources::BASE_POSIX);
                base.add_sources(sources::BASE_LINUX_AIX);
                base.add_sources(sources::BASE_AIX);
                libevent.add_sources(sources::LIBEVENT);
                libevent
                    .include_dirs
                    .push(graph.root_dir("base/third_party/libevent/aix"));
                libevent
                    .include_dirs
                    .push(graph.root_dir("base/third_party/libevent/compat"));
                xdg_user_dirs.add_sources(sources::XDG_USER_DIRS);
                graph.system_libs = to_strings(sources::SYSTEM_LIBS_AIX);
            }
            Platform::Mac => {
                base.add_sources(sources::BASE_SHARED_MEMORY_MAC);
                base.add_sources(sources::BASE_POSIX);
                base.add_sources(sources::BASE_MAC);
                libevent.add_sources(sources::LIBEVENT);
                libevent.add_sources(sources::LIBEVENT_MAC);
                libevent
                    .include_dirs
                    .push(graph.root_dir("base/third_party/libevent/mac"));
                graph.system_libs = to_strings(sources::SYSTEM_LIBS_MAC);
            }
            Platform::Windows => {
                base.add_sources(sources::BASE_SHARED_MEMORY_WIN);
                base.add_sources(sources::BASE_WIN);
                graph.system_libs = to_strings(sources::SYSTEM_LIBS_WIN);
            }
        }

        graph.add(Target::static_library("base", base))?;
        graph.add(Target::static_library("dynamic_annotations", dynamic_annotations))?;
        graph.add(Target::static_library("gn_lib", gn_lib))?;
        graph.add(Target::static_library("libevent", libevent))?;
        graph.add(Target::static_library("xdg_user_dirs", xdg_user_dirs))?;
        graph.add(Target::executable("gn", gn))?;

        graph.prune_empty_libraries();
        graph.link_all_libraries();
        graph.validate()?;

        debug!(
            %platform,
            targets = graph.targets.len(),
            units = graph.targets().map(|t| t.settings().sources.len()).sum::<usize>(),
            "assembled target graph"
        );
        Ok(graph)
    }
}

/// List the `gn_lib` sources under the root, sorted by file name.
fn discover_gn_lib_sources(root: &Path) -> Result<Vec<String>> {
    let dir = root.join(sources::GN_LIB_DIR);
    let mut found = Vec::new();

    for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&dir).to_path_buf();
            BuildError::io(path, e.into())
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".cc")
            || name.ends_with(sources::UNITTEST_SUFFIX)
            || sources::GN_LIB_EXCLUDED.contains(&&*name)
        {
            continue;
        }
        found.push(format!("{}/{}", sources::GN_LIB_DIR, name));
    }

    debug!(dir = %dir.display(), count = found.len(), "discovered gn_lib sources");
    Ok(found)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}
