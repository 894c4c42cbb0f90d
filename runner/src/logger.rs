use std::error::Error;

use log::{LevelFilter, Log, Metadata, Record};

/// Writes log records to stderr, leaving stdout to the results.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:>5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the logger.
///
/// * `level` - one of `off`, `error`, `warn`, `info`, `debug`, `trace`;
///             `warn` when unset.
pub fn init(level: Option<&str>) -> Result<(), Box<dyn Error>> {
    let filter = match level {
        Some(level) => level
            .parse::<LevelFilter>()
            .map_err(|_| format!("invalid LOG_LEVEL \"{level}\""))?,
        None => LevelFilter::Warn,
    };

    log::set_logger(&LOGGER).map_err(|err| err.to_string())?;
    log::set_max_level(filter);
    Ok(())
}
