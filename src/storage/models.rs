//! Seed data container shared by the storage backends.
//!
//! [`SeedData`] holds one collection per entity kind, in source order. It is
//! the on-disk format of [`JsonSeedStore`](crate::storage::JsonSeedStore) and
//! the authoritative state of [`InMemoryBackend`](crate::storage::InMemoryBackend).

use crate::domain::entity::{
    Application, Company, Entity, Interview, Job, Notification, Record, User,
};
use crate::domain::error::{PortalError, Result};
use crate::domain::status::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current version of the seed file format.
pub const SEED_FORMAT_VERSION: u32 = 1;

/// Every entity collection the dashboards display.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "users": [
///     { "id": "u-1", "created_at": 1700000000, "status": "active",
///       "full_name": "Ada Obi", "email": "ada@example.com", "role": "applicant" }
///   ],
///   "jobs": [],
///   "applications": [],
///   "companies": [],
///   "interviews": [],
///   "notifications": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// Version of the file format for future migrations.
    pub version: u32,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub interviews: Vec<Interview>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            version: SEED_FORMAT_VERSION,
            users: Vec::new(),
            jobs: Vec::new(),
            applications: Vec::new(),
            companies: Vec::new(),
            interviews: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

fn to_records<E: Entity>(items: &[E]) -> Vec<Record> {
    items.iter().cloned().map(Entity::into_record).collect()
}

fn transition_in<E: Entity>(items: &mut [E], kind: EntityKind, id: &str, target: &str) -> Result<()> {
    let entity = items
        .iter_mut()
        .find(|e| e.id() == id)
        .ok_or_else(|| PortalError::NotFound {
            kind,
            id: id.to_string(),
        })?;
    let mut record = entity.clone().into_record();
    record.apply_status(target)?;
    *entity = E::from_record(record)
        .ok_or_else(|| PortalError::Storage(format!("{kind} {id} changed kind on update")))?;
    Ok(())
}

fn remove_from<E: Entity>(items: &mut Vec<E>, kind: EntityKind, id: &str) -> Result<()> {
    let index = items
        .iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| PortalError::NotFound {
            kind,
            id: id.to_string(),
        })?;
    items.remove(index);
    Ok(())
}

fn check_unique<E: Entity>(items: &[E], kind: EntityKind) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for entity in items {
        if !seen.insert(entity.id()) {
            return Err(PortalError::Storage(format!(
                "duplicate {kind} id: {}",
                entity.id()
            )));
        }
    }
    Ok(())
}

impl SeedData {
    /// Collection of `kind` as tagged records, in source order.
    #[must_use]
    pub fn records(&self, kind: EntityKind) -> Vec<Record> {
        match kind {
            EntityKind::User => to_records(&self.users),
            EntityKind::Job => to_records(&self.jobs),
            EntityKind::Application => to_records(&self.applications),
            EntityKind::Company => to_records(&self.companies),
            EntityKind::Interview => to_records(&self.interviews),
            EntityKind::Notification => to_records(&self.notifications),
        }
    }

    /// Number of entities of `kind`.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::User => self.users.len(),
            EntityKind::Job => self.jobs.len(),
            EntityKind::Application => self.applications.len(),
            EntityKind::Company => self.companies.len(),
            EntityKind::Interview => self.interviews.len(),
            EntityKind::Notification => self.notifications.len(),
        }
    }

    /// Applies a validated status change to entity `id` of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`], [`PortalError::UnknownStatus`] or
    /// [`PortalError::IllegalTransition`]; the data is unchanged on error.
    pub fn apply_transition(&mut self, kind: EntityKind, id: &str, target: &str) -> Result<()> {
        match kind {
            EntityKind::User => transition_in(&mut self.users, kind, id, target),
            EntityKind::Job => transition_in(&mut self.jobs, kind, id, target),
            EntityKind::Application => transition_in(&mut self.applications, kind, id, target),
            EntityKind::Company => transition_in(&mut self.companies, kind, id, target),
            EntityKind::Interview => transition_in(&mut self.interviews, kind, id, target),
            EntityKind::Notification => transition_in(&mut self.notifications, kind, id, target),
        }
    }

    /// Removes entity `id` of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no such entity exists.
    pub fn remove(&mut self, kind: EntityKind, id: &str) -> Result<()> {
        match kind {
            EntityKind::User => remove_from(&mut self.users, kind, id),
            EntityKind::Job => remove_from(&mut self.jobs, kind, id),
            EntityKind::Application => remove_from(&mut self.applications, kind, id),
            EntityKind::Company => remove_from(&mut self.companies, kind, id),
            EntityKind::Interview => remove_from(&mut self.interviews, kind, id),
            EntityKind::Notification => remove_from(&mut self.notifications, kind, id),
        }
    }

    /// Checks that ids are unique within every kind.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Storage`] naming the first duplicate id.
    pub fn validate(&self) -> Result<()> {
        check_unique(&self.users, EntityKind::User)?;
        check_unique(&self.jobs, EntityKind::Job)?;
        check_unique(&self.applications, EntityKind::Application)?;
        check_unique(&self.companies, EntityKind::Company)?;
        check_unique(&self.interviews, EntityKind::Interview)?;
        check_unique(&self.notifications, EntityKind::Notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::{CompanyStatus, JobStatus, UserStatus};

    #[test]
    fn builtin_is_valid_and_covers_every_kind() {
        let seed = SeedData::builtin();
        seed.validate().unwrap();
        for kind in EntityKind::ALL {
            assert!(seed.count(*kind) > 0, "no {kind} fixtures");
            assert!(seed.records(*kind).iter().all(|r| r.kind() == *kind));
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut seed = SeedData::builtin();
        let copy = seed.companies[0].clone();
        seed.companies.push(copy);
        let err = seed.validate().unwrap_err();
        assert_eq!(err.reason(), "storage");
    }

    #[test]
    fn apply_transition_checks_table() {
        let mut seed = SeedData::builtin();
        let id = seed
            .jobs
            .iter()
            .find(|j| j.status == JobStatus::Archived)
            .map(|j| j.id.clone())
            .unwrap();
        let before = seed.clone();
        let err = seed.apply_transition(EntityKind::Job, &id, "active").unwrap_err();
        assert_eq!(err.reason(), "illegal-transition");
        assert_eq!(seed, before);

        let pending = seed
            .companies
            .iter()
            .find(|c| c.status == CompanyStatus::Pending)
            .map(|c| c.id.clone())
            .unwrap();
        seed.apply_transition(EntityKind::Company, &pending, "verified").unwrap();
    }

    #[test]
    fn apply_transition_validates_status_names_per_kind() {
        let mut seed = SeedData::builtin();
        let before = seed.clone();
        let err = seed.apply_transition(EntityKind::User, "u-1", "hired").unwrap_err();
        assert_eq!(err.reason(), "unknown-status");
        assert_eq!(seed, before);

        seed.apply_transition(EntityKind::User, "u-1", " Suspended ").unwrap();
        let user = seed.users.iter().find(|u| u.id == "u-1").unwrap();
        assert_eq!(user.status, UserStatus::Suspended);
        assert_eq!(seed.users.len(), before.users.len());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut seed = SeedData::default();
        let err = seed.remove(EntityKind::User, "nobody").unwrap_err();
        assert_eq!(err.reason(), "not-found");
    }
}
