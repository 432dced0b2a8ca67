//! Shell command history file.

use std::path::PathBuf;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;

/// Maximum entries kept in memory.
const MAX_ENTRIES: usize = 1000;

/// Append-only history, one command per line.
pub struct History {
    path: PathBuf,
    entries: Vec<String>,
}

impl History {
    /// Load existing history; a missing file starts empty.
    pub async fn load(path: PathBuf) -> Result<Self, StorageError> {
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).await?;
            let mut lines: Vec<String> = content
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect();
            if lines.len() > MAX_ENTRIES {
                lines.drain(..lines.len() - MAX_ENTRIES);
            }
            lines
        } else {
            Vec::new()
        };

        Ok(Self { path, entries })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Record a line, skipping blanks and immediate repeats.
    pub async fn append(&mut self, line: &str) -> Result<(), StorageError> {
        let line = line.trim();
        if line.is_empty() || self.entries.last().map(String::as_str) == Some(line) {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::DirectoryAccess(format!("{}: {}", parent.display(), e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", line).as_bytes()).await?;
        file.flush().await?;

        self.entries.push(line.to_string());
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }

        Ok(())
    }
}
