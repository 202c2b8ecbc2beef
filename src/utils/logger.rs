// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

/// Installs the stderr logger. Safe to call once per process.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Symbol printed in front of each record
fn icon(level: Level) -> &'static str {
  match level {
    Level::Error => "🔴", // Red Circle
    Level::Warn => "🟠",  // Orange Circle
    Level::Info => "🔵",  // Blue Circle
    Level::Debug => "⚪", // White/Gray Circle
    Level::Trace => "▫️", // Small dot
  }
}

/// Format: "🔴  Degenerate cell: ..."
fn format_record(level: Level, args: &std::fmt::Arguments) -> String {
  format!("{}  {}", icon(level), args)
}

impl log::Log for StderrLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      let msg = format_record(record.level(), record.args());
      let stderr = std::io::stderr();
      let mut handle = stderr.lock();
      let _ = writeln!(handle, "{}", msg);
    }
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}
