use clap::Parser;
use gnboot_build::{generate, BuildMode, EnvOverrides, GenerateOptions, Platform};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "gnboot")]
#[command(author, version, about = "Generate a ninja manifest that bootstraps gn")]
struct Cli {
    /// Do a debug build
    #[arg(short, long)]
    debug: bool,

    /// Log more details
    #[arg(short, long)]
    verbose: bool,

    /// Source root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Directory to write build.ninja into (defaults to <root>/out)
    #[arg(long, value_name = "DIR")]
    out_path: Option<PathBuf>,

    /// Directory holding the *.ninja.template files (defaults to <root>/build)
    #[arg(long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Also write compile_commands.json next to the manifest
    #[arg(long)]
    compile_commands: bool,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::ERROR })
        .init();

    let cwd = std::env::current_dir()
        .into_diagnostic()
        .wrap_err("Failed to read the current directory")?;
    let root = cli.root.as_deref().map_or_else(|| cwd.clone(), |r| absolute(&cwd, r));
    let root = root
        .canonicalize()
        .into_diagnostic()
        .wrap_err_with(|| format!("Source root {} is not accessible", root.display()))?;

    let mut options = GenerateOptions::new(&root, Platform::host()?);
    options.mode = BuildMode::from_debug_flag(cli.debug);
    options.compile_commands = cli.compile_commands;
    if let Some(out) = &cli.out_path {
        options.out_dir = absolute(&cwd, out);
    }
    if let Some(dir) = &cli.template_dir {
        options.template_dir = absolute(&cwd, dir);
    }
    options.generator = std::env::current_exe()
        .into_diagnostic()
        .wrap_err("Failed to locate the gnboot executable")?;

    let generated = generate(&options, &EnvOverrides::from_env())?;
    tracing::debug!(
        manifest = %generated.manifest.display(),
        statements = generated.statements,
        "done"
    );

    Ok(())
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
