use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::constants::constants;

/// Route `tracing` output to a daily rolling file in the platform data dir.
///
/// The TUI owns the terminal, so log lines never go to stdout or stderr.
/// Filter with `REEL_LOG` (e.g. `REEL_LOG=reel=debug`); defaults to `info`.
/// Keep the returned guard alive until exit so buffered lines get flushed.
///
/// Logging is optional: when it can't be set up, a one-line warning goes to
/// stderr before the terminal is taken over and the app runs without logs.
pub fn init() -> Option<WorkerGuard> {
  let dirs = ProjectDirs::from("", "", "reel")?;
  match init_in(&dirs.data_local_dir().join("logs")) {
    Ok(guard) => Some(guard),
    Err(e) => {
      eprintln!("reel: logging disabled: {:#}", e);
      None
    }
  }
}

fn init_in(log_dir: &Path) -> Result<WorkerGuard> {
  std::fs::create_dir_all(log_dir).with_context(|| format!("Failed to create log dir {}", log_dir.display()))?;

  let c = constants();
  let appender = tracing_appender::rolling::daily(log_dir, &c.log_file_prefix);
  let (writer, guard) = tracing_appender::non_blocking(appender);
  let filter = EnvFilter::try_from_env(&c.log_env_var).unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .try_init()
    .map_err(|e| anyhow::anyhow!(e))
    .context("Failed to install tracing subscriber")?;

  Ok(guard)
}
