use crate::error::StoryError;
use crate::log_entry::{Level, LogEntry};
use crate::types::LogBuffer;
use serde_json::Value;
use std::fmt::Display;

/// Append side of a log buffer.
///
/// Functions that want to record take `&mut dyn Recorder` (or
/// `impl Recorder`) instead of reaching for a global. Pass `NoopRecorder` or
/// `None::<LogBuffer>` where nothing should be kept.
pub trait Recorder {
    fn add_entry(&mut self, level: Level, name: String, message: Option<Value>);

    /// Appends a DEBUG entry with a padded header and a value. Always succeeds.
    fn record(&mut self, header: &str, value: Value) -> Result<(), StoryError> {
        self.add_entry(Level::Debug, header.to_string(), Some(value));
        Ok(())
    }

    /// Appends a keyed entry whose value may be absent.
    fn push(&mut self, name: &str, message: Option<Value>) {
        self.add_entry(Level::Debug, name.to_string(), message);
    }

    /// Appends a DEBUG entry holding the values joined as-is. No separators
    /// are inserted, so `&[&1, &2]` records `"12"`.
    fn print(&mut self, values: &[&dyn Display]) {
        self.add_entry(Level::Debug, concat(values), None);
    }

    /// Records a PANIC entry, then hands the same message back as an error.
    fn panic(&mut self, values: &[&dyn Display]) -> Result<(), StoryError> {
        let msg = concat(values);
        self.add_entry(Level::Panic, msg.clone(), None);
        Err(StoryError::Panic(msg))
    }

    fn fatal(&mut self, values: &[&dyn Display]) -> Result<(), StoryError> {
        let msg = concat(values);
        self.add_entry(Level::Fatal, msg.clone(), None);
        Err(StoryError::Fatal(msg))
    }
}

pub fn concat(values: &[&dyn Display]) -> String {
    values.iter().map(|v| v.to_string()).collect()
}

impl Recorder for LogBuffer {
    fn add_entry(&mut self, level: Level, name: String, message: Option<Value>) {
        self.append(LogEntry::new(level, name, message));
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl Recorder for NoopRecorder {
    fn add_entry(&mut self, _level: Level, _name: String, _message: Option<Value>) {}
}

impl<R: Recorder> Recorder for Option<R> {
    fn add_entry(&mut self, level: Level, name: String, message: Option<Value>) {
        if let Some(inner) = self {
            inner.add_entry(level, name, message);
        }
    }
}

impl<R: Recorder + ?Sized> Recorder for &mut R {
    fn add_entry(&mut self, level: Level, name: String, message: Option<Value>) {
        (**self).add_entry(level, name, message);
    }
}
