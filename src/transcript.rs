//! Transcript logging for parsed input.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::result::ParseResult;

/// A transcript entry: one parsed line of input.
#[derive(Debug, Serialize)]
pub struct TranscriptEntry {
    /// Timestamp of the parse.
    pub timestamp: DateTime<Utc>,
    /// The input line, truncated for the log.
    pub input: String,
    /// Whether a command matched.
    pub matched: bool,
    /// The resolved command name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl TranscriptEntry {
    /// Create an entry from a parse result.
    pub fn new(result: &ParseResult) -> Self {
        let input = result
            .input
            .as_deref()
            .map(|text| truncate(text, 200))
            .unwrap_or_default();

        Self {
            timestamp: Utc::now(),
            input,
            matched: result.matched,
            command: result.command.clone(),
        }
    }
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        text.to_string()
    } else {
        let mut end = max_len - 3;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}

/// Appends transcript entries to a file as JSON lines.
pub struct TranscriptLogger {
    file: File,
}

impl TranscriptLogger {
    /// Open or create a transcript file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write an entry to the transcript.
    pub fn log(&mut self, entry: &TranscriptEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }

    /// Log a parse result.
    pub fn log_parse(&mut self, result: &ParseResult) -> std::io::Result<()> {
        self.log(&TranscriptEntry::new(result))
    }
}
