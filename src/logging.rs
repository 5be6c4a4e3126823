use std::env;

use log::{LevelFilter, Log, Metadata, Record};

use crate::config::LOG_ENV_VAR;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {} - {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the stderr logger with the level named by `SEABATTLE_LOG`.
/// Defaults to `info` when the variable is unset or unreadable. Calling it
/// again has no effect.
pub fn init_logging() {
    let level = parse_level(env::var(LOG_ENV_VAR).ok().as_deref());
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}
