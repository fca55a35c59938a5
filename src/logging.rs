//! Diagnostic logging setup.
//!
//! The TUI owns the terminal, so tracing output goes to a log file under
//! the platform state directory instead of stderr. Poll failures and other
//! background errors land here and never interrupt the operator.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter (standard
/// `tracing_subscriber` directive syntax).
pub const ENV_LOG_FILTER: &str = "GRAMDECK_LOG";

const LOG_FILE_NAME: &str = "gramdeck.log";

/// Directory the log file lives in: the platform state dir when available,
/// the cache dir otherwise, `$TMPDIR/gramdeck` as a last resort.
pub fn default_log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("gramdeck")
}

/// Create (truncating) the log file inside `dir`, creating `dir` first.
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = File::create(&path)?;
    Ok((path, file))
}

/// Install the global tracing subscriber writing to the default log file.
///
/// Filter defaults to `info`; [`ENV_LOG_FILTER`] overrides it. Returns the
/// log file path so the shell can mention it on exit.
pub fn init() -> Result<PathBuf> {
    let (path, file) = open_log_file(&default_log_dir())?;
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))?;
    Ok(path)
}
