//! tagcloud CLI
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use tagcloud::{Cli, Commands, commands};
use tagcloud_core::{Config, ConfigLoader, ConfigSources};
use tracing_appender::non_blocking::WorkerGuard;

mod observability;

fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let Some(command) = cli.command.take() else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot enter {}", dir.display()))?;
    }

    let (config, sources) = load_config(cli.config.as_ref())?;
    let _guard = start_logging(&cli, &config)?;
    tracing::debug!(
        config_file = ?sources.primary_file(),
        json = cli.json,
        "configuration loaded"
    );

    let result = match command {
        Commands::Generate(args) => commands::generate::cmd_generate(args, cli.json, &config),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &sources),
    };
    if let Err(err) = &result {
        tracing::error!(error = %err, "tagcloud failed");
    }
    result
}

/// Layered config for the working directory, plus `--config` if given.
fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(&utf8(cwd, "current directory")?);
    if let Some(path) = explicit {
        loader = loader.with_file(&utf8(path.clone(), "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn start_logging(cli: &Cli, config: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    let log_dir = config.log_dir.as_ref().map(|dir| dir.as_std_path().to_path_buf());
    let targets = observability::ObservabilityConfig::from_env_with_overrides(log_dir);
    let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    observability::init_observability(&targets, filter, cli.quiet, cli.verbose)
        .context("failed to initialize logging")
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}
