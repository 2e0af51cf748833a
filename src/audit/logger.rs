//! Change history for groups, expenses and passwords
//!
//! `audit.log` holds one JSON object per line. Lines are only ever appended,
//! and `finvault history` reads them back.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{FinVaultError, FinVaultResult};

use super::entry::AuditEntry;

/// Appends FinVault change records to `audit.log`
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Record one change; the line is on disk when this returns
    pub fn log(&self, entry: &AuditEntry) -> FinVaultResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| FinVaultError::Io(format!("Cannot open change history: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| FinVaultError::Json(format!("Cannot encode change record: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| FinVaultError::Io(format!("Cannot append change record: {}", e)))?;

        file.flush()
            .map_err(|e| FinVaultError::Io(format!("Cannot flush change history: {}", e)))?;

        Ok(())
    }

    /// Every recorded change in the order it happened
    ///
    /// A line that no longer parses fails the whole read with its line number.
    pub fn read_all(&self) -> FinVaultResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| FinVaultError::Io(format!("Cannot open change history: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                FinVaultError::Io(format!("Cannot read change history line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                FinVaultError::Json(format!(
                    "Unreadable change record on line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` changes, oldest of them first
    pub fn read_recent(&self, count: usize) -> FinVaultResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
