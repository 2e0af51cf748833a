//! Key-value substrate for persisted records
//!
//! Each module persists exactly one named record holding its whole
//! collection. `JsonFileStore` keeps one JSON file per key; `MemoryStore`
//! keeps records in process memory and can be told to fail writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use serde_json::Value;

use crate::config::paths::FinVaultPaths;
use crate::error::{FinVaultError, FinVaultResult};

use super::file_io::{read_json, write_json_atomic};

/// Get/set access to named records
pub trait RecordStore: Send + Sync {
    /// Read a record; `None` when it has never been written
    fn read(&self, key: &str) -> FinVaultResult<Option<Value>>;

    /// Overwrite a record in full
    fn write(&self, key: &str, value: &Value) -> FinVaultResult<()>;
}

/// One `<data_dir>/<key>.json` file per record
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    paths: FinVaultPaths,
}

impl JsonFileStore {
    pub fn new(paths: FinVaultPaths) -> Self {
        Self { paths }
    }
}

impl RecordStore for JsonFileStore {
    fn read(&self, key: &str) -> FinVaultResult<Option<Value>> {
        read_json(self.paths.record_file(key))
    }

    fn write(&self, key: &str, value: &Value) -> FinVaultResult<()> {
        write_json_atomic(self.paths.record_file(key), value)
    }
}

/// In-memory records
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Value>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a storage error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, key: &str) -> FinVaultResult<Option<Value>> {
        let records = self.records.read().map_err(|e| {
            FinVaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, value: &Value) -> FinVaultResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FinVaultError::Storage(format!(
                "Write to record '{}' rejected",
                key
            )));
        }

        let mut records = self.records.write().map_err(|e| {
            FinVaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        records.insert(key.to_string(), value.clone());
        Ok(())
    }
}
