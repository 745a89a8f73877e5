//! In-memory record stores.
//!
//! A [`Store`] owns one collection behind an `Arc`. Readers take a
//! [`snapshot`](Store::snapshot) and query it at leisure; mutations go
//! through copy-on-write, so a snapshot taken earlier never changes under
//! its holder.
//!
//! [`ResourceStore`] is the CRUD seam the services implement on top of a
//! store.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use backoffice_query::{ListState, OwnedPage, Record};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no record with id '{id}'")]
    NotFound { id: String },
}

/// An owned, injectable record collection.
#[derive(Debug, Clone)]
pub struct Store<R> {
    records: Arc<Vec<R>>,
    next_id: u64,
}

impl<R: Record + Clone> Store<R> {
    /// Creates a store holding `records`; new ids start at `next_id`.
    pub fn new(records: Vec<R>, next_id: u64) -> Self {
        Store {
            records: Arc::new(records),
            next_id,
        }
    }

    /// The current collection.
    pub fn snapshot(&self) -> Arc<Vec<R>> {
        Arc::clone(&self.records)
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hands out the next numeric id.
    pub fn allocate_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    /// Appends a record and returns the new snapshot.
    pub fn insert(&mut self, record: R) -> Arc<Vec<R>> {
        Arc::make_mut(&mut self.records).push(record);
        self.snapshot()
    }

    /// Replaces the record with `id` by `f(old)`.
    pub fn replace<F>(&mut self, id: &str, f: F) -> Result<Arc<Vec<R>>, StoreError>
    where
        F: FnOnce(&R) -> R,
    {
        let index = self.position(id)?;
        let records = Arc::make_mut(&mut self.records);
        let next = f(&records[index]);
        records[index] = next;
        Ok(self.snapshot())
    }

    /// Removes the record with `id`.
    pub fn remove(&mut self, id: &str) -> Result<Arc<Vec<R>>, StoreError> {
        let index = self.position(id)?;
        Arc::make_mut(&mut self.records).remove(index);
        Ok(self.snapshot())
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }
}

/// CRUD operations over one kind of record.
///
/// # Design Notes
///
/// - **Two-stage ID resolution**: `parse_id` validates the ID format before
///   `get` fetches the item, so malformed ids fail early.
///
/// - **Typed input**: `create` and `update` take typed drafts and patches;
///   implementors validate them.
///
/// - **Mutations take `&mut self`**: a store has one owner, and readers
///   work from snapshots.
pub trait ResourceStore {
    /// The record type.
    type Item: Serialize + Clone;

    /// The identifier type.
    type Id: Clone + Display + FromStr;

    /// Input for `create`.
    type Draft;

    /// Input for `update`.
    type Patch;

    /// The error type for storage operations.
    type Error: std::error::Error + 'static;

    /// Parses an ID string into the store's ID type.
    fn parse_id(&self, id_str: &str) -> Result<Self::Id, Self::Error>;

    /// Retrieves an item by ID, returning `None` if not found.
    fn get(&self, id: &Self::Id) -> Result<Option<Self::Item>, Self::Error>;

    /// Creates an error for when an item is not found.
    fn not_found_error(id: &Self::Id) -> Self::Error;

    /// Retrieves an item by ID, returning an error if not found.
    fn resolve(&self, id: &Self::Id) -> Result<Self::Item, Self::Error> {
        self.get(id)?.ok_or_else(|| Self::not_found_error(id))
    }

    /// Runs a list query.
    fn list(&self, state: &ListState) -> Result<OwnedPage<Self::Item>, Self::Error>;

    fn create(&mut self, draft: Self::Draft) -> Result<Self::Item, Self::Error>;

    /// Applies a partial update.
    fn update(&mut self, id: &Self::Id, patch: Self::Patch) -> Result<Self::Item, Self::Error>;

    fn delete(&mut self, id: &Self::Id) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{seed_users, User, UserStatus, NEXT_USER_ID};

    fn users() -> Store<User> {
        Store::new(seed_users(), NEXT_USER_ID)
    }

    #[test]
    fn get_finds_by_id() {
        let store = users();
        assert_eq!(store.get("2").map(|u| u.name.as_str()), Some("Jane Smith"));
        assert!(store.get("99").is_none());
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn ids_are_allocated_in_sequence() {
        let mut store = users();
        assert_eq!(store.allocate_id(), "6");
        assert_eq!(store.allocate_id(), "7");
    }

    #[test]
    fn snapshots_survive_mutation() {
        let mut store = users();
        let before = store.snapshot();

        let mut extra = seed_users().remove(0);
        extra.id = store.allocate_id();
        let after_insert = store.insert(extra);
        let after_replace = store
            .replace("1", |u| User {
                status: UserStatus::Suspended,
                ..u.clone()
            })
            .unwrap();
        let after_remove = store.remove("2").unwrap();

        assert_eq!(before.len(), 5);
        assert_eq!(before[0].status, UserStatus::Active);
        assert_eq!(after_insert.len(), 6);
        assert_eq!(after_insert[0].status, UserStatus::Active);
        assert_eq!(after_replace[0].status, UserStatus::Suspended);
        assert_eq!(after_remove.len(), 5);
        assert!(after_remove.iter().all(|u| u.id != "2"));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn missing_ids_are_reported() {
        let mut store = users();
        assert_eq!(
            store.remove("42"),
            Err(StoreError::NotFound { id: "42".into() })
        );
        assert!(store.replace("42", |u| u.clone()).is_err());
    }
}
