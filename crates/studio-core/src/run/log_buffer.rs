use std::collections::VecDeque;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Maximum number of log lines kept per run.
pub const DEFAULT_LOG_CAPACITY: usize = 200;

/// Append-only, bounded log of a run.
///
/// Lines keep their arrival order. Once the buffer is full, each new line
/// evicts exactly the oldest one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl LogBuffer {
    /// Creates a buffer holding at most `capacity` lines (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends a line as-is, evicting the oldest line when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Appends `line` prefixed with an RFC 3339 timestamp.
    pub fn push_at(&mut self, at: DateTime<Utc>, line: &str) {
        self.push(format!(
            "{}  {}",
            at.to_rfc3339_opts(SecondsFormat::Millis, true),
            line
        ));
    }

    /// Appends `line` stamped with the current time.
    pub fn push_now(&mut self, line: &str) {
        self.push_at(Utc::now(), line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// All lines joined by newlines.
    pub fn to_text(&self) -> String {
        self.iter().collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_never_exceeds_capacity() {
        let mut buffer = LogBuffer::with_capacity(DEFAULT_LOG_CAPACITY);
        for i in 0..500 {
            buffer.push(format!("line {i}"));
            assert!(buffer.len() <= DEFAULT_LOG_CAPACITY);
        }
        assert_eq!(buffer.len(), DEFAULT_LOG_CAPACITY);
        assert_eq!(buffer.iter().next(), Some("line 300"));
        assert_eq!(buffer.last(), Some("line 499"));
    }

    #[test]
    fn test_evicts_exactly_the_oldest_line() {
        let mut buffer = LogBuffer::with_capacity(3);
        buffer.push("a");
        buffer.push("b");
        buffer.push("c");
        buffer.push("d");
        assert_eq!(buffer.iter().collect::<Vec<_>>(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut buffer = LogBuffer::with_capacity(0);
        buffer.push("only");
        buffer.push("latest");
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.to_text(), "latest");
    }

    #[test]
    fn test_timestamped_lines() {
        let mut buffer = LogBuffer::default();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        buffer.push_at(at, "step: Load transcript");
        assert_eq!(buffer.last(), Some("2025-03-01T12:30:00.000Z  step: Load transcript"));
    }
}
