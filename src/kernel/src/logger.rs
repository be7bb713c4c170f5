//! Kernel logger.
//!
//! Implements the `log::Log` trait to route log records to the serial
//! port. The VGA terminal never sees log output.

use crate::serial_println;
use log::{LevelFilter, Metadata, Record};

/// Global logger instance.
static LOGGER: SerialLogger = SerialLogger;

/// Logger backed by the COM1 serial port.
struct SerialLogger;

impl log::Log for SerialLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        serial_println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Installs the logger with the given level ceiling.
///
/// Called once from kernel init, before any subsystem logs.
pub fn init(max_level: LevelFilter) {
    log::set_logger(&LOGGER).expect("logger already installed");
    log::set_max_level(max_level);
}
