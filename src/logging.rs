// Conditional logging macros - only active in debug builds

use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

const APP_DIR: &str = "animal-scramble";
const LOG_FILE: &str = "animal-scramble.log";
const DEFAULT_FILTER: &str = "warn";

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Where the full-screen front-end writes its log, if a cache dir exists.
#[must_use]
pub fn get_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE))
}

/// Installs the global logger. `RUST_LOG` overrides the default `warn` filter.
///
/// With `to_file` set, records go to [`get_log_path`] so they don't draw over
/// the terminal UI; otherwise they go to stderr. Falls back to stderr when no
/// log file can be opened. Returns the file in use, if any.
pub fn init_logger(to_file: bool) -> Result<Option<PathBuf>, log::SetLoggerError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    let log_path = if to_file {
        open_log_file().map(|(path, file)| {
            builder.target(Target::Pipe(Box::new(file)));
            path
        })
    } else {
        None
    };

    builder.try_init()?;
    Ok(log_path)
}

fn open_log_file() -> Option<(PathBuf, fs::File)> {
    let path = get_log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    Some((path, file))
}
