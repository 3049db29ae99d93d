//! JSON file-based seed store.
//!
//! Keeps the whole [`SeedData`] in memory and writes it back on every
//! accepted change. A change is applied to a copy first; the in-memory data is
//! replaced only once that copy is on disk, so a failed write leaves both
//! untouched. Writes are atomic (write-to-temp + rename).

use crate::domain::entity::Record;
use crate::domain::error::{PortalError, Result};
use crate::domain::status::EntityKind;
use crate::storage::backend::Backend;
use crate::storage::models::SeedData;
use std::path::{Path, PathBuf};

/// JSON file [`Backend`].
///
/// This type is `Send` but not `Sync`; it is owned by a single worker.
#[derive(Debug)]
pub struct JsonSeedStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy, always equal to the file once the file exists.
    data: SeedData,
}

impl JsonSeedStore {
    /// Opens the seed file at `file_path`.
    ///
    /// A missing file yields the built-in fixtures, which are written out on
    /// the first change. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but contains invalid JSON
    /// - The data contains duplicate ids
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening seed store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::info!(path = ?file_path, "no seed file, using built-in fixtures");
            SeedData::builtin()
        };

        Ok(Self {
            file_path,
            data,
        })
    }

    fn load_from_file(path: &Path) -> Result<SeedData> {
        let contents = std::fs::read_to_string(path)?;
        let data: SeedData = serde_json::from_str(&contents)
            .map_err(|e| PortalError::Storage(format!("failed to parse seed file: {e}")))?;
        data.validate()?;

        tracing::debug!(
            version = data.version,
            users = data.users.len(),
            jobs = data.jobs.len(),
            applications = data.applications.len(),
            "loaded seed data"
        );
        Ok(data)
    }

    /// Atomically replaces the file with `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temp write or the rename fails.
    fn write_file(&self, data: &SeedData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| PortalError::Storage(format!("failed to serialize seed data: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.file_path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(path = ?self.file_path, "seed data saved");
        Ok(())
    }

    /// Applies `change` to a copy, persists it, then adopts it.
    fn commit<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut SeedData) -> Result<()>,
    {
        let mut next = self.data.clone();
        change(&mut next)?;
        self.write_file(&next)?;
        self.data = next;
        Ok(())
    }

    /// Current in-memory data.
    #[must_use]
    pub const fn data(&self) -> &SeedData {
        &self.data
    }

    /// Location of the seed file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl Backend for JsonSeedStore {
    fn fetch_collection(&self, kind: EntityKind) -> Result<Vec<Record>> {
        let _span = tracing::debug_span!("json_fetch_collection", %kind).entered();
        Ok(self.data.records(kind))
    }

    fn submit_transition(&mut self, kind: EntityKind, id: &str, target: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_submit_transition", %kind, id, target).entered();
        self.commit(|data| data.apply_transition(kind, id, target))
    }

    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_delete", %kind, id).entered();
        self.commit(|data| data.remove(kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let store = JsonSeedStore::open(dir.path().join("nested/seed.json")).unwrap();
        assert_eq!(store.data(), &SeedData::builtin());
        assert!(!store.path().exists());
    }

    #[test]
    fn accepted_change_is_persisted_atomically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        {
            let mut store = JsonSeedStore::open(path.clone()).unwrap();
            store.submit_transition(EntityKind::Company, "c-2", "verified").unwrap();
            store.delete(EntityKind::Job, "j-6").unwrap();
        }
        assert!(!path.with_extension("tmp").exists());

        let reopened = JsonSeedStore::open(path).unwrap();
        let companies = reopened.fetch_collection(EntityKind::Company).unwrap();
        let designly = companies.iter().find(|r| r.id() == "c-2").unwrap();
        assert_eq!(designly.status_str(), "verified");
        assert!(reopened.data().jobs.iter().all(|j| j.id != "j-6"));
    }

    #[test]
    fn illegal_change_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        let mut store = JsonSeedStore::open(path.clone()).unwrap();
        let err = store.submit_transition(EntityKind::Job, "j-6", "active").unwrap_err();
        assert_eq!(err.reason(), "illegal-transition");
        drop(store);
        assert!(!path.exists());
    }

    #[test]
    fn failed_write_keeps_previous_data() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        let path = sub.join("seed.json");
        let mut store = JsonSeedStore::open(path.clone()).unwrap();
        std::fs::remove_dir(&sub).unwrap();

        let err = store.submit_transition(EntityKind::Company, "c-2", "verified").unwrap_err();
        assert_eq!(err.reason(), "io");
        assert!(store.delete(EntityKind::Job, "j-6").is_err());

        assert_eq!(store.data(), &SeedData::builtin());
        drop(store);
        assert!(!path.exists());
    }

    #[test]
    fn invalid_and_duplicate_files_are_storage_errors() {
        let dir = TempDir::new().unwrap();
        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "{ not json").unwrap();
        assert_eq!(JsonSeedStore::open(garbage).unwrap_err().reason(), "storage");

        let mut seed = SeedData::builtin();
        let copy = seed.users[0].clone();
        seed.users.push(copy);
        let dupes = dir.path().join("dupes.json");
        std::fs::write(&dupes, serde_json::to_string(&seed).unwrap()).unwrap();
        assert_eq!(JsonSeedStore::open(dupes).unwrap_err().reason(), "storage");
    }
}
