//! Agent installer CLI - generate and check cluster manifests.
//!
//! This is the entry point for the `agent-installer` binary.

mod commands;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use agent_installer_manifests::{ManifestConfig, ManifestError, ParseMode};
use agent_installer_store::FsStore;

/// Agent installer - generate the `AgentClusterInstall` manifest from an
/// install configuration and check existing manifests.
#[derive(Parser, Debug)]
#[command(name = "agent-installer")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Asset directory holding `install-config.yaml` and generated manifests.
    #[arg(long, env = "AGENT_INSTALLER_DIR", default_value = ".")]
    dir: PathBuf,

    /// Manifest configuration file (YAML).
    #[arg(long, env = "AGENT_INSTALLER_CONFIG")]
    config: Option<PathBuf>,

    /// OpenShift release version for the image set reference.
    #[arg(long, env = "AGENT_INSTALLER_RELEASE_VERSION")]
    release_version: Option<String>,

    /// Namespace used when the install configuration does not set one.
    #[arg(long, env = "AGENT_INSTALLER_NAMESPACE")]
    namespace: Option<String>,

    /// How unknown manifest keys are treated: strict or lenient.
    #[arg(long, env = "AGENT_INSTALLER_PARSE_MODE")]
    parse_mode: Option<ParseMode>,

    /// Log filter, e.g. `debug` or `info,agent_installer_manifests=trace`.
    /// Overrides `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the AgentClusterInstall manifest from install-config.yaml
    Create,
    /// Load the existing AgentClusterInstall manifest and check it
    Validate,
    /// Print the existing AgentClusterInstall manifest
    Show,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {e:#}");
            exit_code(&e)
        }
    }
}

fn init_tracing(log_level: Option<&str>) {
    let filter = log_level.map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,agent_installer=debug".into()),
        EnvFilter::new,
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = manifest_config(args)?;
    let store = FsStore::new(&args.dir);

    tracing::debug!(
        dir = %args.dir.display(),
        release_version = %config.release_version,
        namespace = %config.default_namespace,
        parse_mode = %config.parse_mode,
        "Configuration loaded"
    );

    let mut stdout = io::stdout().lock();
    match args.command {
        Command::Create => commands::create(&store, &config, &mut stdout),
        Command::Validate => commands::validate(&store, &config, &mut stdout),
        Command::Show => commands::show(&store, &config, &mut stdout),
    }
}

/// Build the manifest configuration: file first, then flags and environment.
fn manifest_config(args: &Args) -> Result<ManifestConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => ManifestConfig::default(),
    };

    if let Some(release_version) = &args.release_version {
        config.release_version.clone_from(release_version);
    }
    if let Some(namespace) = &args.namespace {
        config.default_namespace.clone_from(namespace);
    }
    if let Some(parse_mode) = args.parse_mode {
        config.parse_mode = parse_mode;
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<ManifestConfig> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    ManifestConfig::from_yaml(&data)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Exit status: 1 for invalid input, 2 for I/O and other failures.
fn exit_code(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<ManifestError>() {
        Some(e) if e.is_config_error() => ExitCode::from(1),
        _ => ExitCode::from(2),
    }
}
