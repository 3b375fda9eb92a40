//! In-memory `log` backend for asserting on emitted events in unit tests.
//!
//! The logger is process-global and tests run in parallel, so assertions
//! should filter on field values unique to the test.

use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;

static LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};
static INSTALLED: OnceCell<()> = OnceCell::new();

struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

/// Installs the capturing logger at debug level. Idempotent.
pub fn install() {
    INSTALLED.get_or_init(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Debug);
        }
    });
}

/// Captured lines that contain every one of `fields`.
pub fn lines_with(fields: &[&str]) -> Vec<String> {
    LOGGER
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|line| fields.iter().all(|field| line.contains(field)))
        .cloned()
        .collect()
}
