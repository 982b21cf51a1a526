//! Ninja manifest model and emission.
//!
//! Build statements are held unescaped; escaping happens only when a
//! statement is rendered, so every path goes through [`escape_path`] exactly
//! once.

use crate::error::{BuildError, Result};
use crate::graph::{CompilationUnit, TargetGraph};
use crate::toolchain::ToolchainProfile;
use std::collections::HashSet;
use std::fmt;

/// File name of the generated manifest.
pub const MANIFEST_NAME: &str = "build.ninja";

/// File name of the dependency file listing the generator's own inputs.
pub const DEPFILE_NAME: &str = "build.ninja.d";

/// Rule archiving objects into a static library.
pub const ARCHIVE_RULE: &str = "alink_thin";

/// Rule linking an executable.
pub const LINK_RULE: &str = "link";

/// Rule re-running the generator.
pub const REGEN_RULE: &str = "regen";

/// Escape a path for use in a build statement.
///
/// Spaces become `$ ` and colons become `$:`; nothing else is touched.
pub fn escape_path(path: &str) -> String {
    path.replace(' ', "$ ").replace(':', "$:")
}

/// Undo ninja escaping (`$ `, `$:` and `$$`).
pub fn unescape_path(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ (' ' | ':' | '$')) => out.push(next),
            Some(other) => {
                out.push('$');
                out.push(other);
            }
            None => out.push('$'),
        }
    }
    out
}

/// Escape a command line for a `command =` binding.
pub fn escape_command(command: &str) -> String {
    command.replace('$', "$$")
}

/// One `build` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStatement {
    pub outputs: Vec<String>,
    pub rule: String,
    pub inputs: Vec<String>,
    /// Inputs after `|`.
    pub implicit_inputs: Vec<String>,
    /// Inputs after `||`.
    pub order_only_inputs: Vec<String>,
    /// Statement-scoped bindings, in insertion order.
    pub variables: Vec<(String, String)>,
}

impl BuildStatement {
    pub fn new(output: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            outputs: vec![output.into()],
            rule: rule.into(),
            inputs: Vec::new(),
            implicit_inputs: Vec::new(),
            order_only_inputs: Vec::new(),
            variables: Vec::new(),
        }
    }

    pub fn input(mut self, path: impl Into<String>) -> Self {
        self.inputs.push(path.into());
        self
    }

    pub fn inputs<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn implicit_inputs<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implicit_inputs.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn order_only_inputs<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_only_inputs.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add a `key = value` binding. The value is written verbatim.
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((key.into(), value.into()));
        self
    }

    /// Value of a binding, if present.
    pub fn get_variable(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the explicit inputs are source files rather than outputs of
    /// other statements.
    fn reads_sources(&self) -> bool {
        matches!(self.rule.as_str(), "cc" | "cxx") || self.rule == REGEN_RULE
    }
}

impl fmt::Display for BuildStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "build {}: {}", join_escaped(&self.outputs), self.rule)?;
        if !self.inputs.is_empty() {
            write!(f, " {}", join_escaped(&self.inputs))?;
        }
        if !self.implicit_inputs.is_empty() {
            write!(f, " | {}", join_escaped(&self.implicit_inputs))?;
        }
        if !self.order_only_inputs.is_empty() {
            write!(f, " || {}", join_escaped(&self.order_only_inputs))?;
        }
        writeln!(f)?;

        for (key, value) in &self.variables {
            if value.is_empty() {
                writeln!(f, "  {} =", key)?;
            } else {
                writeln!(f, "  {} = {}", key, value)?;
            }
        }
        Ok(())
    }
}

fn join_escaped(paths: &[String]) -> String {
    paths
        .iter()
        .map(|p| escape_path(p))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A complete manifest: toolchain header, platform template, build
/// statements and the regeneration rule.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    header: Vec<(String, String)>,
    template: String,
    statements: Vec<BuildStatement>,
    regen_command: Option<String>,
    produced: HashSet<String>,
}

impl Manifest {
    /// Start a manifest with the given rule template text.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    /// Add a top-level `key = value` binding to the header.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.header.push((key.into(), value.into()));
    }

    /// Append a statement.
    ///
    /// Fails if one of its outputs is already produced, or if a statement
    /// that consumes build products names an input no earlier statement
    /// produces.
    pub fn push(&mut self, statement: BuildStatement) -> Result<()> {
        if !statement.reads_sources() {
            for input in &statement.inputs {
                self.require_produced(&statement, input)?;
            }
        }
        for input in statement
            .implicit_inputs
            .iter()
            .chain(&statement.order_only_inputs)
        {
            self.require_produced(&statement, input)?;
        }

        for output in &statement.outputs {
            if !self.produced.insert(output.clone()) {
                return Err(BuildError::DuplicateOutput(output.clone()));
            }
        }
        self.statements.push(statement);
        Ok(())
    }

    fn require_produced(&self, statement: &BuildStatement, input: &str) -> Result<()> {
        if self.produced.contains(input) {
            Ok(())
        } else {
            Err(BuildError::DanglingInput {
                output: statement.outputs.join(" "),
                input: input.to_string(),
            })
        }
    }

    /// Append the self-regeneration rule and its build statement.
    ///
    /// `command` is the full generator invocation, unescaped.
    pub fn push_regeneration(&mut self, command: &str) -> Result<()> {
        self.push(
            BuildStatement::new(MANIFEST_NAME, REGEN_RULE)
                .variable("generator", "1")
                .variable("depfile", DEPFILE_NAME),
        )?;
        self.regen_command = Some(escape_command(command));
        Ok(())
    }

    pub fn statements(&self) -> &[BuildStatement] {
        &self.statements
    }

    /// Statements using `rule`, in order.
    pub fn statements_for_rule<'a>(
        &'a self,
        rule: &'a str,
    ) -> impl Iterator<Item = &'a BuildStatement> + 'a {
        self.statements.iter().filter(move |s| s.rule == rule)
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.header {
            writeln!(f, "{} = {}", key, value)?;
        }
        writeln!(f)?;

        f.write_str(&self.template)?;
        if !self.template.is_empty() && !self.template.ends_with('\n') {
            writeln!(f)?;
        }
        writeln!(f)?;

        for statement in &self.statements {
            if statement.rule == REGEN_RULE {
                if let Some(command) = &self.regen_command {
                    writeln!(f)?;
                    writeln!(f, "rule {}", REGEN_RULE)?;
                    writeln!(f, "  command = {}", command)?;
                    writeln!(f, "  description = Regenerating ninja files")?;
                    writeln!(f)?;
                }
            }
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

/// Emit every compile, archive and link statement for `graph`.
///
/// Static libraries come first, each archive right after its objects, then
/// executables. The regeneration rule is left to the caller.
pub fn emit(profile: &ToolchainProfile, graph: &TargetGraph, template: &str) -> Result<Manifest> {
    let ext = &profile.extensions;
    let mut manifest = Manifest::new(template);
    manifest.set_header("cc", profile.cc.as_str());
    manifest.set_header("cxx", profile.cxx.as_str());
    manifest.set_header("ar", profile.ar.as_str());
    manifest.set_header("ld", profile.ld.as_str());

    let archive_path = |name: &str| format!("{}{}", name, ext.static_library);

    for lib in graph.static_libraries() {
        let mut objects = Vec::with_capacity(lib.settings.sources.len());
        for unit in lib.settings.units() {
            objects.push(unit.object_path(ext.object));
            manifest.push(compile_statement(profile, graph, &unit))?;
        }

        manifest.push(
            BuildStatement::new(archive_path(lib.name.as_str()), ARCHIVE_RULE)
                .inputs(objects)
                .variable("arflags", profile.arflags.join(" ")),
        )?;
    }

    for exe in graph.executables() {
        let mut objects = Vec::with_capacity(exe.settings.sources.len());
        for unit in exe.settings.units() {
            objects.push(unit.object_path(ext.object));
            manifest.push(compile_statement(profile, graph, &unit))?;
        }

        let archives: Vec<String> = exe.libs.iter().map(|l| archive_path(l.as_str())).collect();
        let libs_value = archives
            .iter()
            .map(|a| escape_path(a))
            .collect::<Vec<_>>()
            .join(" ");

        manifest.push(
            BuildStatement::new(format!("{}{}", exe.name, ext.executable), LINK_RULE)
                .inputs(objects)
                .order_only_inputs(archives)
                .variable("ldflags", profile.ldflags.join(" "))
                .variable("solibs", graph.system_libs.join(" "))
                .variable("libs", libs_value),
        )?;
    }

    Ok(manifest)
}

/// The `-I` list for a unit: global directories first, then the target's.
pub fn include_flags(graph: &TargetGraph, unit: &CompilationUnit<'_>) -> Vec<String> {
    graph
        .include_dirs
        .iter()
        .chain(unit.include_dirs)
        .map(|dir| format!("-I{}", escape_path(dir)))
        .collect()
}

/// Global flags followed by the unit's own.
pub fn unit_cflags(profile: &ToolchainProfile, unit: &CompilationUnit<'_>) -> Vec<String> {
    profile.cflags.iter().chain(unit.cflags).cloned().collect()
}

pub fn unit_cflags_cc(profile: &ToolchainProfile, unit: &CompilationUnit<'_>) -> Vec<String> {
    profile
        .cflags_cc
        .iter()
        .chain(unit.cflags_cc)
        .cloned()
        .collect()
}

fn compile_statement(
    profile: &ToolchainProfile,
    graph: &TargetGraph,
    unit: &CompilationUnit<'_>,
) -> BuildStatement {
    let source = graph.source_path(unit.source).display().to_string();
    BuildStatement::new(unit.object_path(profile.extensions.object), unit.tool.rule_name())
        .input(source)
        .variable("includes", include_flags(graph, unit).join(" "))
        .variable("cflags", unit_cflags(profile, unit).join(" "))
        .variable("cflags_cc", unit_cflags_cc(profile, unit).join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Target, TargetSettings, Tool};
    use crate::platform::Platform;
    use crate::toolchain::{BuildMode, EnvOverrides};
    use insta::assert_snapshot;
    use std::path::Path;

    fn small_graph(root: &str) -> TargetGraph {
        let mut graph = TargetGraph::new(Path::new(root));
        graph
            .add(Target::static_library(
                "util",
                TargetSettings::new(Tool::Cc)
                    .with_sources(&["util/a.c", "util/b.c"])
                    .with_cflags(&["-DUTIL"]),
            ))
            .unwrap();
        graph
            .add(Target::executable(
                "app",
                TargetSettings::new(Tool::Cxx).with_sources(&["app/main.cc"]),
            ))
            .unwrap();
        graph.system_libs = vec!["-lm".to_string()];
        graph.link_all_libraries();
        graph
    }

    #[test]
    fn test_escape_path() {
        assert_eq!(escape_path("out/gn.o"), "out/gn.o");
        assert_eq!(escape_path("my dir/a b.cc"), "my$ dir/a$ b.cc");
        assert_eq!(escape_path("C:\\src\\gn"), "C$:\\src\\gn");
    }

    #[test]
    fn test_escape_round_trip() {
        for path in ["plain/path.cc", "with space/x.cc", "C:/drive/path", "a: b :c", " lead", "trail "] {
            assert_eq!(unescape_path(&escape_path(path)), path);
        }
    }

    #[test]
    fn test_unescape_dollar() {
        assert_eq!(unescape_path("a$$b"), "a$b");
        assert_eq!(unescape_path("a$xb"), "a$xb");
        assert_eq!(unescape_path("end$"), "end$");
    }

    #[test]
    fn test_escape_command() {
        assert_eq!(escape_command("gen --root /a$b"), "gen --root /a$$b");
    }

    #[test]
    fn test_statement_rendering() {
        let stmt = BuildStatement::new("gn", "link")
            .inputs(["tools/gn/gn main.o"])
            .implicit_inputs(["stamp"])
            .order_only_inputs(["base.a"])
            .variable("ldflags", "")
            .variable("libs", "base.a");

        assert_snapshot!(stmt.to_string(), @r"
        build gn: link tools/gn/gn$ main.o | stamp || base.a
          ldflags =
          libs = base.a
        ");
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let mut manifest = Manifest::new("");
        manifest
            .push(BuildStatement::new("a.o", "cc").input("/src/a.c"))
            .unwrap();
        let err = manifest
            .push(BuildStatement::new("a.o", "cxx").input("/src/a.cc"))
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateOutput(ref o) if o == "a.o"));
    }

    #[test]
    fn test_dangling_input_rejected() {
        let mut manifest = Manifest::new("");
        let err = manifest
            .push(BuildStatement::new("lib.a", ARCHIVE_RULE).input("missing.o"))
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::DanglingInput { ref input, .. } if input == "missing.o"
        ));

        let err = manifest
            .push(BuildStatement::new("app", LINK_RULE).order_only_inputs(["lib.a"]))
            .unwrap_err();
        assert!(matches!(err, BuildError::DanglingInput { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_emit_small_graph() {
        let profile = ToolchainProfile::resolve(Platform::Linux, BuildMode::Debug, &EnvOverrides::default());
        let graph = small_graph("/src");
        let manifest = emit(&profile, &graph, "# rules\n").unwrap();

        let rules: Vec<&str> = manifest.statements().iter().map(|s| s.rule.as_str()).collect();
        assert_eq!(rules, vec!["cc", "cc", ARCHIVE_RULE, "cxx", LINK_RULE]);

        let archive = manifest.statements_for_rule(ARCHIVE_RULE).next().unwrap();
        assert_eq!(archive.outputs, vec!["util.a"]);
        assert_eq!(archive.inputs, vec!["util/a.o", "util/b.o"]);

        let compile = &manifest.statements()[0];
        assert_eq!(compile.inputs, vec!["/src/util/a.c"]);
        assert_eq!(compile.get_variable("includes"), Some("-I/src -I/src/src"));
        let cflags = compile.get_variable("cflags").unwrap();
        assert!(cflags.starts_with("-DNO_TCMALLOC"));
        assert!(cflags.ends_with("-fno-exceptions -DUTIL"));

        let link = manifest.statements_for_rule(LINK_RULE).next().unwrap();
        assert_eq!(link.outputs, vec!["app"]);
        assert_eq!(link.inputs, vec!["app/main.o"]);
        assert_eq!(link.order_only_inputs, vec!["util.a"]);
        assert_eq!(link.get_variable("solibs"), Some("-lm"));
        assert_eq!(link.get_variable("libs"), Some("util.a"));
    }

    #[cfg(unix)]
    #[test]
    fn test_emit_escapes_paths() {
        let profile = ToolchainProfile::resolve(Platform::Windows, BuildMode::Release, &EnvOverrides::default());
        let graph = small_graph("C:/my src");
        let text = emit(&profile, &graph, "").unwrap().to_string();

        assert!(text.contains("build util/a.obj: cc C$:/my$ src/util/a.c\n"));
        assert!(text.contains("  includes = -IC$:/my$ src -IC$:/my$ src/src\n"));
        assert!(text.contains("build util.lib: alink_thin util/a.obj util/b.obj\n"));
        assert!(text.contains("build app.exe: link app/main.obj || util.lib\n"));
    }

    #[test]
    fn test_render_header_and_regen() {
        let mut manifest = Manifest::new("rule cc\n  command = $cc -c $in -o $out");
        manifest.set_header("cc", "clang");
        manifest
            .push(BuildStatement::new("a.o", "cc").input("/src/a.c"))
            .unwrap();
        manifest.push_regeneration("/usr/bin/gnboot --root /src").unwrap();

        assert_snapshot!(manifest.to_string(), @r"
        cc = clang

        rule cc
          command = $cc -c $in -o $out

        build a.o: cc /src/a.c

        rule regen
          command = /usr/bin/gnboot --root /src
          description = Regenerating ninja files

        build build.ninja: regen
          generator = 1
          depfile = build.ninja.d
        ");
    }

    #[test]
    fn test_regeneration_is_unique() {
        let mut manifest = Manifest::new("");
        manifest.push_regeneration("gen").unwrap();
        assert!(matches!(
            manifest.push_regeneration("gen"),
            Err(BuildError::DuplicateOutput(_))
        ));
    }
}
