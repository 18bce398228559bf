use std::{
    io::Write as _,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

use log::{LevelFilter, Log, Metadata, Record};

use crate::error::AppError;

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

/// Installs the logger. Can only succeed once per process.
pub fn init(level: LevelFilter) -> Result<(), AppError> {
    let logger = get_logger();
    logger.set_min_level(level);
    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// Writes `LEVEL source -> message` lines to stderr, so they don't mix with the summary.
pub struct AppLogger {
    min_level: Arc<RwLock<LevelFilter>>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: Arc::new(RwLock::new(min_level)),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn format(record: &Record) -> String {
        format!(
            "{:<5} {} -> {}",
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(std::io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
