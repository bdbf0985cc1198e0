//! Telemetry Ring Buffer
//!
//! Provides a fixed-capacity ring buffer for telemetry lines.
//! Uses heapless HistoryBuf so the number of retained lines is bounded.
//!
//! ## Features
//!
//! - Fixed capacity of 64 lines
//! - Automatic oldest line eviction when full
//! - Overflow tracking for diagnostics
//! - Oldest-first iteration order

use heapless::HistoryBuf;

use crate::platform::traits::TelemetrySink;

/// Buffer capacity in number of lines
pub const TELEMETRY_BUFFER_SIZE: usize = 64;

/// One key/value telemetry line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryLine {
    pub key: String,
    pub value: String,
}

impl TelemetryLine {
    /// Create a new telemetry line
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Ring buffer sink for telemetry lines
///
/// Stores up to TELEMETRY_BUFFER_SIZE lines. When full, the oldest line
/// is evicted to make room for the new one.
pub struct TelemetryBuffer {
    buffer: HistoryBuf<TelemetryLine, TELEMETRY_BUFFER_SIZE>,
    overflow_count: u32,
}

impl TelemetryBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            buffer: HistoryBuf::new(),
            overflow_count: 0,
        }
    }

    /// Push a line to the buffer
    ///
    /// If the buffer is full, the oldest line is evicted and
    /// overflow_count is incremented.
    pub fn push(&mut self, line: TelemetryLine) {
        if self.buffer.len() == TELEMETRY_BUFFER_SIZE {
            self.overflow_count = self.overflow_count.saturating_add(1);
        }
        self.buffer.write(line);
    }

    /// Return the current number of lines in the buffer
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Return true if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Return the number of lines lost due to buffer overflow
    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Iterate over lines in oldest-first order
    pub fn iter(&self) -> impl Iterator<Item = &TelemetryLine> {
        self.buffer.oldest_ordered()
    }

    /// Most recent value written for `key`, if any
    pub fn latest(&self, key: &str) -> Option<&str> {
        self.iter()
            .filter(|line| line.key == key)
            .last()
            .map(|line| line.value.as_str())
    }

    /// Drain all lines, returning them in oldest-first order
    pub fn drain(&mut self) -> Vec<TelemetryLine> {
        let lines = self.buffer.oldest_ordered().cloned().collect();
        self.buffer.clear();
        lines
    }

    /// Clear all lines from the buffer
    ///
    /// Does not reset overflow_count.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for TelemetryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for TelemetryBuffer {
    fn add_line(&mut self, key: &str, value: &str) {
        self.push(TelemetryLine::new(key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_single_line() {
        let mut sink = TelemetryBuffer::new();
        assert!(sink.is_empty());

        sink.add_line("Slow: ", "true");

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.overflow_count(), 0);
        assert_eq!(sink.latest("Slow: "), Some("true"));
    }

    #[test]
    fn test_push_overflow_evicts_oldest() {
        let mut sink = TelemetryBuffer::new();

        for i in 0..TELEMETRY_BUFFER_SIZE {
            sink.add_line("n", &format!("{}", i));
        }
        assert_eq!(sink.overflow_count(), 0);

        sink.add_line("n", "overflow");

        assert_eq!(sink.len(), TELEMETRY_BUFFER_SIZE);
        assert_eq!(sink.overflow_count(), 1);
        assert_eq!(sink.iter().next().unwrap().value, "1");
        assert_eq!(sink.latest("n"), Some("overflow"));
    }

    #[test]
    fn test_latest_picks_most_recent() {
        let mut sink = TelemetryBuffer::new();
        sink.add_line("L: ", "0.1");
        sink.add_line("R: ", "0.2");
        sink.add_line("L: ", "0.3");

        assert_eq!(sink.latest("L: "), Some("0.3"));
        assert_eq!(sink.latest("R: "), Some("0.2"));
        assert_eq!(sink.latest("missing"), None);
    }

    #[test]
    fn test_drain_clears_but_keeps_overflow() {
        let mut sink = TelemetryBuffer::new();
        for i in 0..TELEMETRY_BUFFER_SIZE + 2 {
            sink.add_line("n", &format!("{}", i));
        }

        let lines = sink.drain();
        assert_eq!(lines.len(), TELEMETRY_BUFFER_SIZE);
        assert_eq!(lines[0].value, "2");
        assert!(sink.is_empty());
        assert_eq!(sink.overflow_count(), 2);
    }

    #[test]
    fn test_shared_sink() {
        use std::sync::{Arc, Mutex};

        let shared = Arc::new(Mutex::new(TelemetryBuffer::new()));
        let mut writer = Arc::clone(&shared);

        writer.add_line("key", "value");
        assert_eq!(shared.lock().unwrap().latest("key"), Some("value"));
    }
}
