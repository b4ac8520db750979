//! Append-only message log.

use crate::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered writer that appends one line per agent message.
///
/// Flushed by `close` and, failing that, when dropped.
pub struct Transcript {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl Transcript {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::debug!(path = ?path, "Opened message transcript");
        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    /// Write each message on its own line, cut to `max_len` characters.
    /// The step is flushed as a whole.
    pub fn record(&mut self, messages: &[String], max_len: usize) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            for message in messages {
                let line: String = message.chars().take(max_len).collect();
                writeln!(writer, "{line}")?;
            }
            writer.flush()?;
        }
        Ok(())
    }

    /// Flush and release the file. Later records are dropped.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for Transcript {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(path = ?self.path, "Failed to flush message transcript: {}", e);
        }
    }
}
