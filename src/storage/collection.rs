//! Ordered, persisted entity collection
//!
//! A `Collection` holds one module's entities in insertion order and persists
//! the whole list to its record on every mutation. Mutations run against a
//! copy; the copy is written to the store first and only replaces the
//! in-memory list once the write succeeded, so a failed write leaves both
//! memory and disk at the previous state.

use std::fmt::Display;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinVaultError, FinVaultResult};

use super::record_store::RecordStore;

/// Entities addressable by a unique identifier
pub trait Identified {
    type Id: Copy + PartialEq + Display;

    fn id(&self) -> Self::Id;
}

/// Repository for one record of entities
pub struct Collection<T> {
    key: &'static str,
    store: Arc<dyn RecordStore>,
    items: RwLock<Vec<T>>,
    seed: fn() -> Vec<T>,
}

impl<T> Collection<T>
where
    T: Identified + Clone + Serialize + DeserializeOwned,
{
    /// Create an empty, unloaded collection
    pub fn new(key: &'static str, store: Arc<dyn RecordStore>, seed: fn() -> Vec<T>) -> Self {
        Self {
            key,
            store,
            items: RwLock::new(Vec::new()),
            seed,
        }
    }

    /// Name of the backing record
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load the record, substituting the seed collection when it is missing
    ///
    /// The seed is not written back; it is persisted with the first mutation.
    pub fn load(&self) -> FinVaultResult<()> {
        let loaded = match self.store.read(self.key)? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                FinVaultError::Storage(format!("Failed to parse record '{}': {}", self.key, e))
            })?,
            None => (self.seed)(),
        };

        *self.write_lock()? = loaded;
        Ok(())
    }

    /// Persist the current in-memory list
    pub fn save(&self) -> FinVaultResult<()> {
        let items = self.read_lock()?;
        self.persist(&items)
    }

    /// All entities in stored order
    pub fn get_all(&self) -> FinVaultResult<Vec<T>> {
        Ok(self.read_lock()?.clone())
    }

    /// Get an entity by ID
    pub fn get(&self, id: T::Id) -> FinVaultResult<Option<T>> {
        Ok(self.read_lock()?.iter().find(|item| item.id() == id).cloned())
    }

    /// Entities matching a predicate, in stored order
    pub fn filter<F>(&self, predicate: F) -> FinVaultResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self
            .read_lock()?
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect())
    }

    /// Number of entities
    pub fn count(&self) -> FinVaultResult<usize> {
        Ok(self.read_lock()?.len())
    }

    /// Apply a mutation to a copy of the list, persist it, then swap it in
    ///
    /// If `mutate` returns an error nothing is written and memory is unchanged.
    pub fn mutate<R, F>(&self, mutate: F) -> FinVaultResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> FinVaultResult<R>,
    {
        let mut items = self.write_lock()?;
        let mut next = items.clone();
        let result = mutate(&mut next)?;

        self.persist(&next)?;
        *items = next;
        Ok(result)
    }

    /// Append an entity
    pub fn push(&self, item: T) -> FinVaultResult<()> {
        self.mutate(|items| {
            items.push(item);
            Ok(())
        })
    }

    /// Replace the entity with the same ID; `false` if there is none
    pub fn replace(&self, item: T) -> FinVaultResult<bool> {
        let id = item.id();
        let items = self.read_lock()?;
        if !items.iter().any(|existing| existing.id() == id) {
            return Ok(false);
        }
        drop(items);

        self.mutate(|items| {
            if let Some(slot) = items.iter_mut().find(|existing| existing.id() == id) {
                *slot = item;
            }
            Ok(true)
        })
    }

    /// Remove an entity, returning it if it existed
    pub fn remove(&self, id: T::Id) -> FinVaultResult<Option<T>> {
        if self.get(id)?.is_none() {
            return Ok(None);
        }

        self.mutate(|items| {
            let position = items.iter().position(|item| item.id() == id);
            Ok(position.map(|index| items.remove(index)))
        })
    }

    /// Replace the whole collection
    pub fn replace_all(&self, replacement: Vec<T>) -> FinVaultResult<()> {
        self.mutate(|items| {
            *items = replacement;
            Ok(())
        })
    }

    fn persist(&self, items: &[T]) -> FinVaultResult<()> {
        let value = serde_json::to_value(items).map_err(|e| {
            FinVaultError::Storage(format!("Failed to serialize record '{}': {}", self.key, e))
        })?;
        self.store.write(self.key, &value)
    }

    fn read_lock(&self) -> FinVaultResult<RwLockReadGuard<'_, Vec<T>>> {
        self.items
            .read()
            .map_err(|e| FinVaultError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> FinVaultResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.items
            .write()
            .map_err(|e| FinVaultError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseId};
    use crate::storage::record_store::MemoryStore;

    fn seed() -> Vec<Expense> {
        vec![Expense::new("Groceries", 50.0)]
    }

    fn create_collection() -> (Arc<MemoryStore>, Collection<Expense>) {
        let store = Arc::new(MemoryStore::new());
        let collection = Collection::new("expenses", store.clone(), seed);
        collection.load().unwrap();
        (store, collection)
    }

    #[test]
    fn test_missing_record_loads_seed() {
        let (store, collection) = create_collection();

        assert_eq!(collection.count().unwrap(), 1);
        // Seed is not persisted until the first mutation
        assert!(store.read("expenses").unwrap().is_none());
    }

    #[test]
    fn test_existing_record_wins_over_seed() {
        let store = Arc::new(MemoryStore::new());
        store.write("expenses", &serde_json::json!([])).unwrap();

        let collection: Collection<Expense> = Collection::new("expenses", store, seed);
        collection.load().unwrap();
        assert_eq!(collection.count().unwrap(), 0);
    }

    #[test]
    fn test_push_persists_whole_collection() {
        let (store, collection) = create_collection();
        collection.push(Expense::new("Internet", 30.0)).unwrap();

        let persisted: Vec<Expense> =
            serde_json::from_value(store.read("expenses").unwrap().unwrap()).unwrap();
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[1].name, "Internet");
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let (store, collection) = create_collection();
        store.set_fail_writes(true);

        assert!(collection.push(Expense::new("Internet", 30.0)).is_err());
        assert_eq!(collection.count().unwrap(), 1);
    }

    #[test]
    fn test_failed_mutation_writes_nothing() {
        let (store, collection) = create_collection();

        let result: FinVaultResult<()> = collection.mutate(|items| {
            items.clear();
            Err(FinVaultError::Validation("nope".into()))
        });

        assert!(result.is_err());
        assert_eq!(collection.count().unwrap(), 1);
        assert!(store.read("expenses").unwrap().is_none());
    }

    #[test]
    fn test_replace_and_remove() {
        let (_store, collection) = create_collection();
        let mut first = collection.get_all().unwrap().remove(0);

        first.name = "Food".to_string();
        assert!(collection.replace(first.clone()).unwrap());
        assert_eq!(collection.get(first.id).unwrap().unwrap().name, "Food");

        assert!(!collection.replace(Expense::new("Ghost", 1.0)).unwrap());

        assert!(collection.remove(first.id).unwrap().is_some());
        assert!(collection.remove(ExpenseId::new()).unwrap().is_none());
        assert_eq!(collection.count().unwrap(), 0);
    }

    #[test]
    fn test_reload_sees_persisted_state() {
        let (store, collection) = create_collection();
        collection.push(Expense::new("Internet", 30.0)).unwrap();

        let reloaded: Collection<Expense> = Collection::new("expenses", store, seed);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all().unwrap(), collection.get_all().unwrap());
    }
}
