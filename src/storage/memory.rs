//! Volatile backend over seed data.

use crate::domain::entity::Record;
use crate::domain::error::{PortalError, Result};
use crate::domain::status::EntityKind;
use crate::storage::backend::Backend;
use crate::storage::models::SeedData;
use std::collections::HashSet;

/// In-memory [`Backend`] with failure injection.
///
/// Ids passed to [`InMemoryBackend::reject_id`] make every write on them fail,
/// which is how reconciliation rollbacks are exercised without a network.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    data: SeedData,
    rejected: HashSet<String>,
}

impl InMemoryBackend {
    /// Creates a backend serving `data`.
    #[must_use]
    pub fn new(data: SeedData) -> Self {
        Self {
            data,
            rejected: HashSet::new(),
        }
    }

    /// Makes every subsequent write on `id` fail.
    pub fn reject_id(&mut self, id: impl Into<String>) {
        self.rejected.insert(id.into());
    }

    /// Current authoritative data.
    #[must_use]
    pub const fn data(&self) -> &SeedData {
        &self.data
    }

    fn check_policy(&self, kind: EntityKind, id: &str) -> Result<()> {
        if self.rejected.contains(id) {
            tracing::debug!(%kind, id, "write rejected by injected failure");
            return Err(PortalError::Storage(format!("{kind} {id} is locked")));
        }
        Ok(())
    }
}

impl Backend for InMemoryBackend {
    fn fetch_collection(&self, kind: EntityKind) -> Result<Vec<Record>> {
        Ok(self.data.records(kind))
    }

    fn submit_transition(&mut self, kind: EntityKind, id: &str, target: &str) -> Result<()> {
        self.check_policy(kind, id)?;
        self.data.apply_transition(kind, id, target)
    }

    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()> {
        self.check_policy(kind, id)?;
        self.data.remove(kind, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_ids_fail_without_mutation() {
        let mut backend = InMemoryBackend::new(SeedData::builtin());
        backend.reject_id("u-1");
        let before = backend.data().clone();
        assert!(backend.submit_transition(EntityKind::User, "u-1", "suspended").is_err());
        assert!(backend.delete(EntityKind::User, "u-1").is_err());
        assert_eq!(backend.data(), &before);
    }

    #[test]
    fn accepted_writes_are_visible_on_fetch() {
        let mut backend = InMemoryBackend::new(SeedData::builtin());
        backend.submit_transition(EntityKind::User, "u-1", "suspended").unwrap();
        backend.delete(EntityKind::User, "u-2").unwrap();
        let users = backend.fetch_collection(EntityKind::User).unwrap();
        assert_eq!(users[0].status_str(), "suspended");
        assert!(users.iter().all(|r| r.id() != "u-2"));
    }
}
