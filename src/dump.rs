use crate::log_entry::{Level, LogEntry, END_MSG};
use crate::recorder::concat;
use crate::types::LogBuffer;
use log::{debug, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Width of the index column in the text report.
const REPORT_INDEX_WIDTH: usize = 3;
/// Width of the index prefix in flattened keys.
const FLAT_INDEX_WIDTH: usize = 6;

/// One report line, without the trailing newline.
pub fn render_line(index: usize, entry: &LogEntry, pad: usize) -> String {
    format!(
        "{}\t{}  {:0width$}  {}",
        entry.timestamp(),
        entry.level,
        index,
        entry.text(pad),
        width = REPORT_INDEX_WIDTH,
    )
}

fn write_lines(writer: &mut dyn Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}

impl LogBuffer {
    /// Renders the report, writing it to stdout when `print` is set.
    ///
    /// A failed stdout write is logged and the rendered text is still
    /// returned.
    pub fn dump(&mut self, print: bool) -> String {
        if print {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            self.dump_lossy(Some(&mut lock))
        } else {
            self.dump_lossy(None)
        }
    }

    /// Renders once, writes what it can, and settles regardless of write
    /// failures. The returned text is always the text that was written.
    fn dump_lossy(&mut self, writer: Option<&mut dyn Write>) -> String {
        let lines = self.render();
        if let Some(writer) = writer {
            if let Err(e) = write_lines(writer, &lines) {
                warn!("Failed to write log dump: {}", e);
            }
        }
        self.settle(lines)
    }

    /// Dumps using the configured `print` default.
    pub fn dump_default(&mut self) -> String {
        let print = self.config().print;
        self.dump(print)
    }

    /// Renders the report into `writer`, one line per entry.
    ///
    /// Entries are only drained once every line has been written, so a
    /// failing writer leaves the buffer as it was.
    pub fn dump_to(&mut self, writer: &mut dyn Write) -> io::Result<String> {
        let lines = self.render();
        write_lines(writer, &lines)?;
        Ok(self.settle(lines))
    }

    /// Report lines for the stored entries followed by the elapsed and END
    /// lines, which are not stored.
    fn render(&self) -> Vec<String> {
        let elapsed = LogEntry::new(
            Level::Debug,
            concat(&[&"Elapse ", &self.elapsed_ms(), &" ms"]),
            None,
        );
        let end = LogEntry::sentinel(END_MSG);

        let pad = self.padding();
        self.entries()
            .iter()
            .chain([&elapsed, &end])
            .enumerate()
            .map(|(index, entry)| render_line(index, entry, pad))
            .collect()
    }

    fn settle(&mut self, lines: Vec<String>) -> String {
        debug!("Dumped {} log lines", lines.len());

        if self.config().reset_on_dump {
            self.reset();
        }

        lines.join("\n")
    }

    /// Flattens the entries into `<index>.<name> -> message`, or
    /// `<index> -> name` when an entry has no message. Never mutates.
    pub fn flatten(&self) -> BTreeMap<String, Value> {
        self.entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| match &entry.message {
                None => (
                    format!("{:0width$}", index, width = FLAT_INDEX_WIDTH),
                    Value::String(entry.name.clone()),
                ),
                Some(message) => (
                    format!("{:0width$}.{}", index, entry.name, width = FLAT_INDEX_WIDTH),
                    message.clone(),
                ),
            })
            .collect()
    }
}
