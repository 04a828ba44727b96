//! Conversation export files.
//!
//! The export endpoint returns arbitrary JSON; the widget stores it verbatim,
//! pretty-printed, in a file named after the current UTC date.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Errors produced while writing an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The payload could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A ready-to-save export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    filename: String,
    contents: String,
}

impl ExportFile {
    /// MIME type of the file contents.
    pub const MIME_TYPE: &'static str = "application/json";

    /// Build the export for `payload`, dated `now`.
    pub fn new(payload: &serde_json::Value, now: DateTime<Utc>) -> Result<Self, ExportError> {
        Ok(Self {
            filename: filename_for(now.date_naive()),
            contents: serde_json::to_string_pretty(payload)?,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

/// `chat-export-YYYY-MM-DD.json`
pub fn filename_for(date: NaiveDate) -> String {
    format!("chat-export-{}.json", date.format("%Y-%m-%d"))
}
