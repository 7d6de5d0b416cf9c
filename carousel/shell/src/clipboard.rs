//! Clipboard sinks for the shell
//!
//! A terminal has no system clipboard we can rely on, so exported text goes
//! either to a file or to stdout.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use carousel_core::{ClipboardError, ClipboardSink};

/// Writes exported text to a file, replacing its contents
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ClipboardSink for FileClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| ClipboardError::Write(format!("{}: {e}", self.path.display())))?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "Exported text written");
        Ok(())
    }
}

/// Prints exported text to stdout between markers
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutClipboard;

#[async_trait]
impl ClipboardSink for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let block = format!("----- copied -----\n{text}\n------------------\n");
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(block.as_bytes())
            .await
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
