//! Backend collaborator abstraction.
//!
//! This module defines the [`Backend`] trait the worker talks to. The engine
//! only needs three shapes from the authoritative store: read a collection,
//! persist a status change, persist a delete. The transport behind them is
//! opaque.

use crate::domain::entity::Record;
use crate::domain::error::Result;
use crate::domain::status::EntityKind;

/// Authoritative store for dashboard entities.
///
/// # Implementations
///
/// - [`JsonSeedStore`](crate::storage::JsonSeedStore): JSON file with atomic writes
/// - [`InMemoryBackend`](crate::storage::InMemoryBackend): volatile, with failure injection
///
/// # Examples
///
/// ```no_run
/// use hireflow::domain::EntityKind;
/// use hireflow::storage::{Backend, JsonSeedStore};
/// use std::path::PathBuf;
///
/// let store = JsonSeedStore::open(PathBuf::from("/tmp/hireflow/seed.json"))?;
/// let users = store.fetch_collection(EntityKind::User)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Backend: Send {
    /// Returns every entity of `kind`, in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn fetch_collection(&self, kind: EntityKind) -> Result<Vec<Record>>;

    /// Persists a status change, validating it against the transition table.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is missing, the change is illegal, or
    /// the backend refuses it. The stored entity is unchanged on error.
    fn submit_transition(&mut self, kind: EntityKind, id: &str, target: &str) -> Result<()>;

    /// Removes an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is missing or the backend refuses it.
    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()>;
}
