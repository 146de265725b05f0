use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LoggingConfig, ProjectPaths};

const MAX_LOG_SIZE: u64 = 1024 * 1024; // 1MB

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Filter used when `RUST_LOG` is unset.
///
/// Each `--debug` raises a plain configured level one step, up to `trace`.
/// A directive list such as `info,gscript=debug` is used as is without
/// `--debug`, and replaced by `debug` or `trace` with it.
pub fn default_filter(config: &LoggingConfig, verbosity: u8) -> String {
    let level = config.level.trim().to_ascii_lowercase();
    match LEVELS.iter().position(|known| *known == level) {
        Some(index) => {
            let raised = (index + usize::from(verbosity)).min(LEVELS.len() - 1);
            LEVELS[raised].to_string()
        }
        None => match verbosity {
            0 => config.level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        },
    }
}

/// Initialize logging for a component.
///
/// - `component_name`: name of the log file when file logging is enabled
/// - `config.file`: also write logs to `<data dir>/logs/<component>.log`
///
/// Returns a guard that must be kept alive for the duration of the program.
pub fn init_logging(
    component_name: &str,
    config: &LoggingConfig,
    verbosity: u8,
) -> io::Result<Option<WorkerGuard>> {
    let filter = default_filter(config, verbosity);
    let env_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter));

    if !config.file {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .init();
        return Ok(None);
    }

    let log_dir = log_directory()?;
    fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(format!("{}.log", component_name));
    truncate_if_needed(&log_path)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(BufWriter::new(file));

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(io::stderr).with_ansi(true))
        .with(
            fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!("Logging to file: {}", log_path.display());

    Ok(Some(guard))
}

fn log_directory() -> io::Result<PathBuf> {
    let paths = ProjectPaths::new("gscript")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Failed to find home directory"))?;

    Ok(paths.data_dir().join("logs"))
}

/// Truncate the log file once it grows past `MAX_LOG_SIZE`
fn truncate_if_needed(log_path: &Path) -> io::Result<()> {
    if log_path.exists() && fs::metadata(log_path)?.len() > MAX_LOG_SIZE {
        File::create(log_path)?;
    }
    Ok(())
}
