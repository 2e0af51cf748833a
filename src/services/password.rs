//! Password service
//!
//! Business logic for the password manager: credential CRUD and search,
//! generation, strength scoring and the vault export/import.

use crate::audit::EntityType;
use crate::error::{FinVaultError, FinVaultResult};
use crate::models::{PasswordCategory, PasswordEntry, PasswordId};
use crate::storage::Storage;
use crate::vault::{self, StrengthLevel};

/// Entry as shown in list views, password replaced by the mask
pub fn masked(entry: &PasswordEntry) -> PasswordEntry {
    entry.redacted()
}

/// Service for password entries
pub struct PasswordService<'a> {
    storage: &'a Storage,
}

impl<'a> PasswordService<'a> {
    /// Create a new password service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Store a new credential; every field is required
    pub fn add(
        &self,
        site: &str,
        username: &str,
        password: &str,
        category: PasswordCategory,
    ) -> FinVaultResult<PasswordEntry> {
        let entry = PasswordEntry::new(site.trim(), username.trim(), password, category);
        entry
            .validate()
            .map_err(|e| FinVaultError::Validation(e.to_string()))?;

        self.storage.passwords.push(entry.clone())?;

        self.storage.log_create(
            EntityType::PasswordEntry,
            entry.id.to_string(),
            Some(entry.site.clone()),
            &entry,
        )?;

        Ok(entry)
    }

    /// Replace every field of a credential
    pub fn update(
        &self,
        id: PasswordId,
        site: &str,
        username: &str,
        password: &str,
        category: PasswordCategory,
    ) -> FinVaultResult<PasswordEntry> {
        let before = self
            .storage
            .passwords
            .get(id)?
            .ok_or_else(|| FinVaultError::password_not_found(id.to_string()))?;

        let entry = PasswordEntry {
            id,
            site: site.trim().to_string(),
            username: username.trim().to_string(),
            password: password.to_string(),
            category,
        };
        entry
            .validate()
            .map_err(|e| FinVaultError::Validation(e.to_string()))?;

        if !self.storage.passwords.replace(entry.clone())? {
            return Err(FinVaultError::password_not_found(id.to_string()));
        }

        self.storage.log_update(
            EntityType::PasswordEntry,
            entry.id.to_string(),
            Some(entry.site.clone()),
            &before,
            &entry,
        )?;

        Ok(entry)
    }

    /// Delete a credential
    pub fn delete(&self, id: PasswordId) -> FinVaultResult<PasswordEntry> {
        let entry = self
            .storage
            .passwords
            .remove(id)?
            .ok_or_else(|| FinVaultError::password_not_found(id.to_string()))?;

        self.storage.log_delete(
            EntityType::PasswordEntry,
            entry.id.to_string(),
            Some(entry.site.clone()),
            &entry,
        )?;

        Ok(entry)
    }

    /// Get a credential by ID
    pub fn get(&self, id: PasswordId) -> FinVaultResult<Option<PasswordEntry>> {
        self.storage.passwords.get(id)
    }

    /// Find a credential by ID, or by site when exactly one entry has it
    pub fn find(&self, identifier: &str) -> FinVaultResult<Option<PasswordEntry>> {
        let entries = self.storage.passwords.get_all()?;

        if let Some(entry) = entries.iter().find(|e| e.id.matches(identifier)) {
            return Ok(Some(entry.clone()));
        }

        let wanted = identifier.trim().to_lowercase();
        let by_site: Vec<PasswordEntry> = entries
            .into_iter()
            .filter(|e| e.site.to_lowercase() == wanted)
            .collect();

        match by_site.len() {
            0 => Ok(None),
            1 => Ok(by_site.into_iter().next()),
            n => Err(FinVaultError::Validation(format!(
                "{} entries exist for site '{}'; use the entry ID instead",
                n,
                identifier.trim()
            ))),
        }
    }

    /// All credentials in stored order
    pub fn list(&self) -> FinVaultResult<Vec<PasswordEntry>> {
        self.storage.passwords.get_all()
    }

    /// Credentials whose site, username or category matches the query
    pub fn search(&self, query: &str) -> FinVaultResult<Vec<PasswordEntry>> {
        self.storage.passwords.filter(|e| e.matches(query))
    }

    /// Random password of the given length
    pub fn generate(&self, length: usize) -> String {
        vault::generate_password(length)
    }

    /// Score and label for a candidate password
    pub fn strength(&self, password: &str) -> (u8, StrengthLevel) {
        let score = vault::score_strength(password);
        (score, StrengthLevel::from_score(score))
    }

    /// Encode every stored credential as a vault blob
    pub fn export_vault(&self) -> FinVaultResult<String> {
        vault::export_vault(&self.storage.passwords.get_all()?)
    }

    /// Replace all credentials with the contents of a vault blob
    ///
    /// On any decode error the stored credentials are left as they were.
    pub fn import_vault(&self, blob: &str) -> FinVaultResult<usize> {
        let entries = vault::import_vault(blob)?;
        let previous = self.storage.passwords.count()?;
        let imported = entries.len();

        self.storage.passwords.replace_all(entries)?;
        self.storage
            .log_import(EntityType::PasswordEntry, previous, imported)?;

        Ok(imported)
    }
}
