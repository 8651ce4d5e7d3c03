//! Logging bridge for taborder
//!
//! Routes every `log::info!()`/`log::debug!()` call to stderr with a
//! timestamp and the emitting module, so snapshot output on stdout stays
//! clean for piping.
//!
//! Level precedence: explicit level (CLI `--log-level`) > `RUST_LOG` >
//! the level handed in from the config file.

use crate::config::LogLevel;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::OnceLock;

struct StderrLogger {
    level: LevelFilter,
    out: Mutex<std::io::Stderr>,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut out = self.out.lock();
        let _ = writeln!(
            out,
            "[{}] [{:<5}] [{}] {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = self.out.lock().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Level taken from `RUST_LOG`, if it names a plain level
fn level_from_env() -> Option<LevelFilter> {
    let raw = std::env::var("RUST_LOG").ok()?;
    raw.parse::<LogLevel>().ok().map(LogLevel::to_level_filter)
}

/// Resolve the effective level from the three sources
pub fn resolve_level(cli: Option<LogLevel>, config: LogLevel) -> LevelFilter {
    cli.map(LogLevel::to_level_filter)
        .or_else(level_from_env)
        .unwrap_or_else(|| config.to_level_filter())
}

/// Install the logger; later calls only adjust the max level
pub fn init_log_bridge(level: LevelFilter) {
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        out: Mutex::new(std::io::stderr()),
    });
    // Already installed by an earlier call
    let _ = log::set_logger(logger);
    log::set_max_level(level.min(logger.level));
}
