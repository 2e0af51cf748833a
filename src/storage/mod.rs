//! Storage layer for FinVault
//!
//! Three independent records (groups, expenses, passwords), each loaded into
//! an ordered in-memory `Collection` and written back in full on every
//! mutation. The file-backed store writes JSON atomically.

pub mod collection;
pub mod file_io;
pub mod record_store;
pub mod seed;

pub use collection::{Collection, Identified};
pub use file_io::{read_json, write_json_atomic};
pub use record_store::{JsonFileStore, MemoryStore, RecordStore};
pub use seed::{EXPENSES_KEY, GROUPS_KEY, PASSWORDS_KEY};

use std::sync::Arc;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FinVaultPaths;
use crate::error::FinVaultError;
use crate::models::{Expense, ExpenseId, Group, GroupId, PasswordEntry, PasswordId};

impl Identified for Group {
    type Id = GroupId;

    fn id(&self) -> GroupId {
        self.id
    }
}

impl Identified for Expense {
    type Id = ExpenseId;

    fn id(&self) -> ExpenseId {
        self.id
    }
}

impl Identified for PasswordEntry {
    type Id = PasswordId;

    fn id(&self) -> PasswordId {
        self.id
    }
}

/// Owns the three repositories for one application session
pub struct Storage {
    pub groups: Collection<Group>,
    pub expenses: Collection<Expense>,
    pub passwords: Collection<PasswordEntry>,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// File-backed storage under the given paths, with an audit log
    pub fn new(paths: FinVaultPaths) -> Result<Self, FinVaultError> {
        paths.ensure_directories()?;

        let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new(paths.clone()));
        let mut storage = Self::with_store(store);
        storage.audit = Some(AuditLogger::new(paths.audit_log()));
        Ok(storage)
    }

    /// Storage over an arbitrary record store, without audit logging
    pub fn with_store(store: Arc<dyn RecordStore>) -> Self {
        Self {
            groups: Collection::new(GROUPS_KEY, store.clone(), seed::seed_groups),
            expenses: Collection::new(EXPENSES_KEY, store.clone(), seed::seed_expenses),
            passwords: Collection::new(PASSWORDS_KEY, store, seed::seed_passwords),
            audit: None,
        }
    }

    /// Load all records
    pub fn load_all(&mut self) -> Result<(), FinVaultError> {
        self.groups.load()?;
        self.expenses.load()?;
        self.passwords.load()?;
        Ok(())
    }

    /// Save all records
    pub fn save_all(&self) -> Result<(), FinVaultError> {
        self.groups.save()?;
        self.expenses.save()?;
        self.passwords.save()?;
        Ok(())
    }

    /// The audit logger, if this storage keeps one
    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FinVaultError> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::create(
                entity_type,
                entity_id,
                entity_name,
                entity,
            )),
            None => Ok(()),
        }
    }

    /// Record an update, with a field-level diff summary
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), FinVaultError> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::update(
                entity_type,
                entity_id,
                entity_name,
                before,
                after,
            )),
            None => Ok(()),
        }
    }

    /// Record a whole-collection replacement
    pub fn log_import(
        &self,
        entity_type: EntityType,
        previous: usize,
        imported: usize,
    ) -> Result<(), FinVaultError> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::import(entity_type, previous, imported)),
            None => Ok(()),
        }
    }

    /// Record a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FinVaultError> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::delete(
                entity_type,
                entity_id,
                entity_name,
                entity,
            )),
            None => Ok(()),
        }
    }
}
