//! File logging for layout diagnostics.
//!
//! # Responsibility
//! - Route the engine's `event=layout_*` metadata lines to a rolling file.
//! - Let layout events run at their own level, independent of the rest.
//!
//! # Invariants
//! - The logger starts at most once per process; an identical config is a
//!   no-op, a different one is rejected.
//! - Layout events carry counts only, never activity ids or domain data.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "agenda";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
/// Modules whose events make up the layout trace.
const LAYOUT_MODULES: &[&str] = &["agenda_core::layout", "agenda_core::service"];

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    config: LoggingConfig,
    handle: LoggerHandle,
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level for everything outside the layout modules.
    pub level: &'static str,
    /// Level for `layout` and `service` events; `layout_day` is a `debug`
    /// event, `layout_range` an `info` event.
    pub layout_level: &'static str,
    pub log_dir: PathBuf,
}

impl LoggingConfig {
    /// Parses levels (`trace|debug|info|warn|error`, case-insensitive) and an
    /// absolute log directory. Layout events follow `level`.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = parse_level(level)?;
        Ok(Self {
            level,
            layout_level: level,
            log_dir: parse_log_dir(log_dir)?,
        })
    }

    /// Overrides the level used by layout events.
    pub fn with_layout_level(mut self, layout_level: &str) -> Result<Self, String> {
        self.layout_level = parse_level(layout_level)?;
        Ok(self)
    }

    /// `flexi_logger` spec string, e.g. `warn, agenda_core::layout=debug`.
    fn log_spec(&self) -> String {
        let mut spec = self.level.to_string();
        for module in LAYOUT_MODULES {
            spec.push_str(&format!(", {module}={}", self.layout_level));
        }
        spec
    }
}

/// Starts file logging with one level for all events.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    init_logging_with(LoggingConfig::new(level, log_dir)?)
}

/// Starts file logging from a full config.
///
/// # Errors
/// - The directory cannot be created or the backend fails to start.
/// - Logging is already active with a different config.
pub fn init_logging_with(config: LoggingConfig) -> Result<(), String> {
    let active = ACTIVE.get_or_try_init(|| start(config.clone()))?;
    if active.config != config {
        return Err(format!(
            "logging already active as `{}` in `{}`; refusing `{}` in `{}`",
            active.config.log_spec(),
            active.config.log_dir.display(),
            config.log_spec(),
            config.log_dir.display()
        ));
    }
    Ok(())
}

/// Returns `(level, log_dir)` of active logging, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.config.level, active.config.log_dir.clone()))
}

/// Writes buffered lines to the log file. No-op before init.
pub fn flush_logging() {
    if let Some(active) = ACTIVE.get() {
        active.handle.flush();
    }
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(config: LoggingConfig) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&config.log_dir)
        .map_err(|err| format!("cannot create `{}`: {err}", config.log_dir.display()))?;

    let handle = Logger::try_with_str(config.log_spec())
        .map_err(|err| format!("invalid log spec `{}`: {err}", config.log_spec()))?
        .log_to_file(
            FileSpec::default()
                .directory(&config.log_dir)
                .basename(LOG_FILE_BASENAME)
                .suppress_timestamp(),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::opt_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    info!(
        "event=logging_start module=agenda_core status=ok spec=\"{}\" version={}",
        config.log_spec(),
        env!("CARGO_PKG_VERSION")
    );
    Ok(ActiveLogger { config, handle })
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let path = Path::new(log_dir.trim());
    if path.as_os_str().is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    if !path.is_absolute() {
        return Err(format!("log_dir must be absolute, got `{}`", path.display()));
    }
    Ok(path.to_path_buf())
}
