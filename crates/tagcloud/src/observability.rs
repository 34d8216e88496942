//! Logging setup.
//!
//! Human-readable events go to stderr (warnings and errors unless `-v` is
//! given). Everything the filter admits is also appended as JSON lines to a
//! log file when one can be opened.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_ENV: &str = "TAGCLOUD_LOG_PATH";
const LOG_DIR_ENV: &str = "TAGCLOUD_LOG_DIR";
const LOG_FILE_NAME: &str = "tagcloud.jsonl";

/// Where log output should go.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// JSONL log file, if file logging is wanted.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from, in order: `TAGCLOUD_LOG_PATH`,
    /// `TAGCLOUD_LOG_DIR`, the configured directory, the platform data dir.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_file = non_empty_env(LOG_PATH_ENV)
            .or_else(|| non_empty_env(LOG_DIR_ENV).map(|dir| dir.join(LOG_FILE_NAME)))
            .or_else(|| config_log_dir.map(|dir| dir.join(LOG_FILE_NAME)))
            .or_else(|| default_log_dir().map(|dir| dir.join(LOG_FILE_NAME)));
        Self { log_file }
    }
}

fn non_empty_env(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "tagcloud").map(|d| d.data_local_dir().join("logs"))
}

/// Build the global filter: `RUST_LOG` if set, else the CLI flags, else the
/// configured level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Level shown on stderr.
fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    if std::env::var_os("RUST_LOG").is_some() {
        return LevelFilter::TRACE;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
    quiet: bool,
    verbose: u8,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_level(quiet, verbose));

    let (file_layer, guard) = match config.log_file.as_deref().and_then(open_log_file) {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// Open `path` for appending, creating its directory. `None` if that fails.
fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
