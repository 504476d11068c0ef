// Logger setup plus conditional logging macros that are only active in debug builds

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

const DEFAULT_FILTER: &str = "warn";
const LOG_DIR: &str = "hangman";
const LOG_FILE: &str = "hangman.log";

pub enum LogTarget {
    Stderr,
    /// Append to a file. The full-screen interface owns the terminal, so it logs here.
    File(PathBuf),
}

/// Log file under the user cache directory, or the temp directory when there is none.
#[must_use]
pub fn default_log_path() -> PathBuf {
    log_path_in(dirs::cache_dir())
}

fn log_path_in(cache_dir: Option<PathBuf>) -> PathBuf {
    cache_dir
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_DIR)
        .join(LOG_FILE)
}

/// Install `env_logger`, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging(target: LogTarget) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let LogTarget::File(path) = target {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().map_err(io::Error::other)
}

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
