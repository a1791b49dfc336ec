use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const START_MSG: &str = "START";
pub const END_MSG: &str = "END";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Panic,
    Fatal,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded event.
///
/// Text entries (print, panic, sentinels) keep their text in `name` and carry
/// no message. Record and push entries keep the header or key in `name` and
/// the payload in `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: Level,
    pub name: String,
    pub message: Option<Value>,
    pub time: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(level: Level, name: String, message: Option<Value>) -> Self {
        Self {
            level,
            name,
            message,
            time: Utc::now(),
        }
    }

    pub fn sentinel(name: &str) -> Self {
        Self::new(Level::Debug, name.to_string(), None)
    }

    /// Text shown in the report column, with the name padded to `pad`
    /// when a message is attached.
    pub fn text(&self, pad: usize) -> String {
        match &self.message {
            None => self.name.clone(),
            Some(value) if self.name.is_empty() => value_text(value),
            Some(value) => format!("{:<pad$}{}", self.name, value_text(value), pad = pad),
        }
    }

    /// RFC 3339 timestamp followed by the zone abbreviation.
    pub fn timestamp(&self) -> String {
        format!("{} UTC", self.time.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Strings render bare, everything else as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
