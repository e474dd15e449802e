//! Process-wide rolling file logging.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend at most once per process.
//! - Capture panics as a single sanitized log record.
//!
//! # Invariants
//! - Initialization never panics.
//! - A second init with identical settings is a no-op; any other settings
//!   are rejected.
//! - Records are single-line `event=... module=... status=...` pairs.

use crate::config::CoreConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "upnext";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const RETAINED_LOG_FILES: usize = 3;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    level: &'static str,
    dir: PathBuf,
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Starts rolling file logs at `level` under the absolute `log_dir`.
///
/// # Errors
/// - Unknown level, empty or relative directory.
/// - Directory creation or backend startup failure.
/// - Logging already running with different settings.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), String> {
    let requested = LogSettings {
        level: parse_level(level)?,
        dir: absolute_dir(log_dir.as_ref())?,
    };

    let active = ACTIVE.get_or_try_init(|| start_backend(requested.clone()))?;
    ensure_same_settings(&active.settings, &requested)
}

/// Starts logging from `config` when it names a log directory.
///
/// Returns whether file logging is active afterwards.
pub fn init_from_config(config: &CoreConfig) -> Result<bool, String> {
    match &config.log_dir {
        Some(dir) => init_logging(&config.log_level, dir).map(|()| true),
        None => Ok(logging_status().is_some()),
    }
}

/// `(level, directory)` of the running logger, if any.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.settings.level, active.settings.dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_backend(settings: LogSettings) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&settings.dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            settings.dir.display()
        )
    })?;

    let handle = Logger::try_with_str(settings.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", settings.level))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(RETAINED_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();
    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={}",
        settings.level,
        settings.dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn ensure_same_settings(active: &LogSettings, requested: &LogSettings) -> Result<(), String> {
    if active.dir != requested.dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active.dir.display(),
            requested.dir.display()
        ));
    }
    if active.level != requested.level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            active.level, requested.level
        ));
    }
    Ok(())
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    let lowered = level.trim().to_ascii_lowercase();
    let lookup = if lowered == "warning" { "warn" } else { lowered.as_str() };
    LEVELS
        .iter()
        .find(|known| **known == lookup)
        .copied()
        .ok_or_else(|| {
            format!("unsupported log level `{lowered}`; expected trace|debug|info|warn|error")
        })
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, String> {
    if dir.as_os_str().is_empty() {
        return Err("log directory cannot be empty".to_string());
    }
    if !dir.is_absolute() {
        return Err(format!(
            "log directory must be an absolute path, got `{}`",
            dir.display()
        ));
    }
    Ok(dir.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=logging status=error location={} payload={}",
            location,
            single_line(&payload, PANIC_PAYLOAD_LIMIT)
        );
        previous(panic_info);
    }));
}

/// Flattens line breaks and caps `value` at `limit` characters.
fn single_line(value: &str, limit: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= limit {
        return flattened;
    }
    let mut capped: String = flattened.chars().take(limit).collect();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{absolute_dir, init_logging, logging_status, parse_level, single_line};
    use std::path::Path;

    #[test]
    fn parse_level_normalizes_case_and_aliases() {
        assert_eq!(parse_level("INFO").unwrap(), "info");
        assert_eq!(parse_level(" warning ").unwrap(), "warn");
        assert!(parse_level("verbose").unwrap_err().contains("unsupported"));
    }

    #[test]
    fn relative_directory_is_rejected() {
        let error = absolute_dir(Path::new("logs/dev")).unwrap_err();
        assert!(error.contains("absolute"));
    }

    #[test]
    fn single_line_flattens_and_caps() {
        assert_eq!(single_line("a\nb", 10), "a b");
        let capped = single_line("line1\nline2\rline3", 8);
        assert!(!capped.contains('\n'));
        assert!(!capped.contains('\r'));
        assert!(capped.ends_with("..."));
    }

    #[test]
    fn second_init_must_match_first() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        init_logging("info", first.path()).unwrap();
        init_logging("INFO", first.path()).unwrap();

        let level_error = init_logging("debug", first.path()).unwrap_err();
        assert!(level_error.contains("refusing to switch"));
        let dir_error = init_logging("info", second.path()).unwrap_err();
        assert!(dir_error.contains("refusing to switch"));

        let (level, dir) = logging_status().unwrap();
        assert_eq!(level, "info");
        assert_eq!(dir, first.path());
    }
}
