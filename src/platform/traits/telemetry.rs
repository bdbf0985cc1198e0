//! Telemetry output abstraction
//!
//! A telemetry sink receives human-readable key/value lines, typically shown
//! on the driver station display.

use std::sync::{Arc, Mutex};

/// Telemetry sink trait
pub trait TelemetrySink {
    /// Append a key/value line
    fn add_line(&mut self, key: &str, value: &str);
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for Box<S> {
    fn add_line(&mut self, key: &str, value: &str) {
        (**self).add_line(key, value);
    }
}

/// Shared sink: lines are appended under the lock.
///
/// A poisoned lock still accepts lines; telemetry is best-effort.
impl<S: TelemetrySink> TelemetrySink for Arc<Mutex<S>> {
    fn add_line(&mut self, key: &str, value: &str) {
        let mut sink = match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sink.add_line(key, value);
    }
}
