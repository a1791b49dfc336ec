//! In-memory story log: timestamped entries collected in order and flushed
//! either as an aligned text report or as a flattened key/value mapping.
//!
//! ```
//! use serde_json::json;
//! use storylog::{LogBuffer, Recorder};
//!
//! let mut log = LogBuffer::new();
//! log.record("latency", json!(42)).unwrap();
//! let report = log.dump(false);
//! assert_eq!(report.lines().count(), 4);
//! assert_eq!(log.count(), 1);
//! ```

pub mod config;
pub mod dump;
pub mod error;
pub mod line_collector;
pub mod log_entry;
pub mod recorder;
pub mod types;

pub use config::BufferConfig;
pub use error::StoryError;
pub use log_entry::{Level, LogEntry};
pub use recorder::{NoopRecorder, Recorder};
pub use types::LogBuffer;
