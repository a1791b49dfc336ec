use crate::config::BufferConfig;
use crate::log_entry::{LogEntry, START_MSG};
use std::time::Instant;

/// Ordered, append-only sequence of entries plus the start marker used for
/// the elapsed line of a report dump.
///
/// There is no internal locking. Share it behind a mutex when several tasks
/// record into the same buffer.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: Vec<LogEntry>,
    config: BufferConfig,
    start: Instant,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Buffer that flattens into a key/value mapping and keeps its entries
    /// across dumps.
    pub fn story() -> Self {
        Self::with_config(BufferConfig::story())
    }

    pub fn with_config(config: BufferConfig) -> Self {
        let mut buffer = Self {
            entries: Vec::new(),
            config,
            start: Instant::now(),
        };
        buffer.reset();
        buffer
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    pub fn padding(&self) -> usize {
        self.config.pad
    }

    pub fn set_padding(&mut self, pad: usize) {
        self.config.pad = pad;
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last_entry(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Drops every entry, re-seeds the START sentinel and restarts the clock.
    pub fn reset(&mut self) {
        self.entries.clear();
        if self.config.sentinels {
            self.entries.push(LogEntry::sentinel(START_MSG));
        }
        self.start = Instant::now();
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_entry::Level;

    #[test]
    fn new_buffer_holds_start_sentinel() {
        let buffer = LogBuffer::new();
        assert_eq!(buffer.count(), 1);
        assert_eq!(buffer.padding(), 30);

        let first = buffer.last_entry().unwrap();
        assert_eq!(first.level, Level::Debug);
        assert_eq!(first.name, "START");
        assert!(first.message.is_none());
    }

    #[test]
    fn story_buffer_starts_empty() {
        let buffer = LogBuffer::story();
        assert!(buffer.is_empty());
        assert!(buffer.last_entry().is_none());
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut buffer = LogBuffer::new();
        buffer.append(LogEntry::sentinel("a"));
        buffer.append(LogEntry::sentinel("a"));
        buffer.append(LogEntry::sentinel("b"));

        let names: Vec<_> = buffer.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["START", "a", "a", "b"]);
    }

    #[test]
    fn reset_restores_single_sentinel() {
        let mut buffer = LogBuffer::new();
        buffer.append(LogEntry::sentinel("x"));
        buffer.reset();
        assert_eq!(buffer.count(), 1);
        assert_eq!(buffer.entries()[0].name, "START");
    }

    #[test]
    fn padding_is_adjustable() {
        let mut buffer = LogBuffer::new();
        buffer.set_padding(12);
        assert_eq!(buffer.padding(), 12);
    }

    #[test]
    fn elapsed_counts_from_creation() {
        let buffer = LogBuffer::new();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(buffer.elapsed_ms() >= 5);
    }
}
