//! A `log` backend writing to stderr.
//!
//! Lines look like `WARN heapsort::bench: Sorting 5,000,000 elements took 1s`,
//! with the level colored when the terminal allows it.

use anstream::eprintln;
use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;
use log::SetLoggerError;
use owo_colors::OwoColorize;

#[derive(Debug)]
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = record.level();
        let tag = format!("{level:5}");
        match level {
            Level::Error => eprintln!("{} {}: {}", tag.red(), record.target(), record.args()),
            Level::Warn => eprintln!("{} {}: {}", tag.yellow(), record.target(), record.args()),
            Level::Info => eprintln!("{} {}: {}", tag.green(), record.target(), record.args()),
            Level::Debug | Level::Trace => {
                eprintln!("{} {}: {}", tag.dimmed(), record.target(), record.args())
            }
        }
    }

    fn flush(&self) {}
}

/// Installs a [`StderrLogger`] as the global logger.
///
/// Fails if another logger was installed first.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}
