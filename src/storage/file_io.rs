//! JSON files under the FinVault data directory
//!
//! `config.json` and the `data/*.json` record files are replaced whole on
//! every save, never edited in place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinVaultError;

/// Load a record file; `None` means it has not been written yet
pub fn read_json<T, P>(path: P) -> Result<Option<T>, FinVaultError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| FinVaultError::Storage(format!("Cannot open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| {
            FinVaultError::Storage(format!(
                "{} is not valid FinVault data: {}",
                path.display(),
                e
            ))
        })
}

/// Save a record file through a `.json.tmp` sibling and a rename
///
/// A failed save leaves the previous contents readable.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinVaultError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinVaultError::Storage(format!(
                "Cannot create data directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| {
            FinVaultError::Storage(format!("Cannot stage {}: {}", temp_path.display(), e))
        })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FinVaultError::Storage(format!("Cannot encode records: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FinVaultError::Storage(format!("Cannot write {}: {}", path.display(), e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinVaultError::Storage(format!("Cannot sync {}: {}", path.display(), e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinVaultError::Storage(format!("Cannot replace {}: {}", path.display(), e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        name: String,
        amount: f64,
    }

    #[test]
    fn test_read_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let data: Option<Vec<Row>> = read_json(&path).unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");

        let rows = vec![Row {
            name: "Groceries".to_string(),
            amount: 50.0,
        }];

        write_json_atomic(&path, &rows).unwrap();
        let loaded: Option<Vec<Row>> = read_json(&path).unwrap();
        assert_eq!(loaded, Some(rows));
    }

    #[test]
    fn test_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("groups.json");

        write_json_atomic(&path, &Vec::<Row>::new()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("groups.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("nested").join("passwords.json");

        write_json_atomic(&path, &Vec::<Row>::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let result: Result<Option<Vec<Row>>, _> = read_json(&path);
        match result {
            Err(FinVaultError::Storage(msg)) => {
                assert!(msg.contains("broken.json"));
                assert!(msg.contains("not valid FinVault data"));
            }
            other => panic!("expected storage error, got {:?}", other),
        }
    }
}
