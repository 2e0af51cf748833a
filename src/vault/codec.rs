//! Vault export/import blob
//!
//! The blob is standard base64 over the JSON array of entries. This is
//! obfuscation, not encryption: anyone holding the blob can read every
//! password in it.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{FinVaultError, FinVaultResult};
use crate::models::{PasswordCategory, PasswordEntry, PasswordId};

/// Encode entries as an opaque text blob
pub fn export_vault(entries: &[PasswordEntry]) -> FinVaultResult<String> {
    let json = serde_json::to_vec(entries)
        .map_err(|e| FinVaultError::Export(format!("Failed to serialize vault: {}", e)))?;
    Ok(STANDARD.encode(json))
}

/// Entry as found in a blob; ids written by older exports may be numbers
#[derive(Deserialize)]
struct BlobEntry {
    #[serde(default)]
    id: Option<Value>,
    site: String,
    username: String,
    password: String,
    category: PasswordCategory,
}

impl BlobEntry {
    fn into_entry(self) -> PasswordEntry {
        let id = match &self.id {
            Some(Value::String(s)) => s.parse::<PasswordId>().ok(),
            _ => None,
        };

        PasswordEntry {
            id: id.unwrap_or_default(),
            site: self.site,
            username: self.username,
            password: self.password,
            category: self.category,
        }
    }
}

/// Decode a blob produced by `export_vault`
///
/// Fails as a whole on bad base64, bad JSON, an invalid entry or a repeated
/// id; nothing is returned partially.
pub fn import_vault(blob: &str) -> FinVaultResult<Vec<PasswordEntry>> {
    let compact: String = blob.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| FinVaultError::Import(format!("Vault is not valid base64: {}", e)))?;

    let raw: Vec<BlobEntry> = serde_json::from_slice(&bytes)
        .map_err(|e| FinVaultError::Import(format!("Vault contents are not valid: {}", e)))?;

    let entries: Vec<PasswordEntry> = raw.into_iter().map(BlobEntry::into_entry).collect();

    let mut seen = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        entry.validate().map_err(|e| {
            FinVaultError::Import(format!("Entry {} is invalid: {}", index + 1, e))
        })?;
        if !seen.insert(entry.id) {
            return Err(FinVaultError::Import(format!(
                "Entry {} repeats id {}",
                index + 1,
                entry.id
            )));
        }
    }

    Ok(entries)
}
