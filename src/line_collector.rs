use crate::error::StoryError;
use crate::recorder::Recorder;
use crate::types::LogBuffer;
use log::{debug, info};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Mutex;

const PANIC_PREFIX: &str = "!panic ";
const FATAL_PREFIX: &str = "!fatal ";
const DUMP_COMMAND: &str = "!dump";

#[derive(Debug, PartialEq)]
pub enum LineAction {
    Recorded,
    Skipped,
    Dump,
}

/// Reads lines until EOF, recording each one into the shared buffer.
///
/// Stops at the first `!panic` or `!fatal` line and returns the matching
/// error once the entry is in the buffer.
pub async fn run<R>(reader: R, log_buffer: Arc<Mutex<LogBuffer>>) -> Result<usize, StoryError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut recorded = 0;

    while let Some(line) = lines.next_line().await? {
        let mut buffer = log_buffer.lock().await;
        match apply_line(&mut *buffer, &line)? {
            LineAction::Recorded => recorded += 1,
            LineAction::Skipped => {}
            LineAction::Dump => {
                info!("Intermediate dump of {} entries", buffer.count());
                buffer.dump_default();
            }
        }
    }

    debug!("Input closed after {} recorded lines", recorded);
    Ok(recorded)
}

/// Interprets one input line against a recorder.
pub fn apply_line(recorder: &mut dyn Recorder, line: &str) -> Result<LineAction, StoryError> {
    let line = line.trim_end();
    if line.trim().is_empty() {
        return Ok(LineAction::Skipped);
    }

    if line == DUMP_COMMAND {
        return Ok(LineAction::Dump);
    }

    if let Some(msg) = line.strip_prefix(PANIC_PREFIX) {
        recorder.panic(&[&msg])?;
    } else if let Some(msg) = line.strip_prefix(FATAL_PREFIX) {
        recorder.fatal(&[&msg])?;
    } else if let Some((key, value)) = line.split_once('=') {
        recorder.record(key.trim(), parse_value(value.trim()))?;
    } else {
        recorder.print(&[&line]);
    }

    Ok(LineAction::Recorded)
}

/// JSON when it parses, the raw text otherwise.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
