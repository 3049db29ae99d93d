//! Hireflow: the status-lifecycle and filtered-view engine behind a three-role
//! job portal dashboard.
//!
//! Applicants, recruiters and admins all work with list screens over a handful
//! of entity kinds (users, jobs, applications, companies, interviews,
//! notifications). Every screen does the same four things: it splits the
//! collection into status tabs, narrows it by dropdown filters and free-text
//! search, pages through the result, and lets the user move a row to another
//! status. This crate implements those four things once.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime shim (main.rs)                             │  ← stdin events, stdout view models
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - View engine and pagination                       │
//! │  - Optimistic dispatch and reconciliation           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - View models │   │ - Seed data   │   │ - Requests    │
//! │               │   │ - JSON I/O    │   │ - Responses   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure                │
//! │  - Statuses and transition tables                   │
//! │  - Entities, actions, errors                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Entity and status model, transition engine, errors
//! - [`app`]: Screen state, view engine, pagination, action coordinator
//! - [`ui`]: Serializable view models for the rendering layer
//! - [`worker`]: Backend request/response protocol and worker
//! - [`storage`]: Seed fixtures and backends
//! - [`infrastructure`]: Data directory resolution
//! - [`observability`]: OpenTelemetry tracing to a JSON-lines file
//!
//! # Example
//!
//! ```rust
//! use hireflow::app::screens::ADMIN_USERS;
//! use hireflow::domain::{ActionName, User};
//! use hireflow::worker::PortalWorker;
//! use hireflow::storage::{InMemoryBackend, SeedData};
//! use hireflow::{handle_event, initialize, Action, Config, Event};
//!
//! let mut worker = PortalWorker::new(Box::new(InMemoryBackend::new(SeedData::builtin())));
//! let mut state = initialize::<User>(&Config::default(), &ADMIN_USERS);
//!
//! let mut pending = vec![
//!     Event::Refresh,
//!     Event::Perform { action: ActionName::Suspend, id: "u-1".to_string() },
//! ];
//! pending.reverse();
//! while let Some(event) = pending.pop() {
//!     let (_rerender, actions) = handle_event(&mut state, &event)?;
//!     for action in actions {
//!         if let Action::PostToBackend(request) = action {
//!             let response = worker.handle_message(request);
//!             pending.push(Event::BackendResponse { response });
//!         }
//!     }
//! }
//! assert_eq!(state.pending_count(), 0);
//! # Ok::<(), hireflow::PortalError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, Event, ScreenState};
pub use domain::{Entity, PortalError, Result};
pub use ui::ScreenViewModel;

use app::screens::{ScreenConfig, SCREEN_NAMES};
use domain::Actor;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Rows per page when nothing is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Prefix of environment variables read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "HIREFLOW_";

/// Seed file name inside the data directory.
pub const DEFAULT_SEED_FILE: &str = "seeds.json";

/// Runtime configuration.
///
/// Loaded from a TOML file, a flat string map or `HIREFLOW_*` environment
/// variables. Every key is optional.
///
/// ```toml
/// page_size = 25
/// screen = "recruiter-candidates"
/// actor = "recruiter"
/// seed_file = "~/hireflow/seeds.json"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rows per page. Zero falls back to [`DEFAULT_PAGE_SIZE`].
    pub page_size: usize,

    /// Screen to run, one of [`SCREEN_NAMES`]. Default: `"admin-users"`
    pub screen: String,

    /// Role the screen acts for. Default: admin
    pub actor: Actor,

    /// Seed file path. Default: `seeds.json` in the data directory.
    pub seed_file: Option<String>,

    /// Overrides the data directory used for traces and the default seed file.
    pub data_dir: Option<String>,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            screen: "admin-users".to_string(),
            actor: Actor::default(),
            seed_file: None,
            data_dir: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from a flat string map.
    ///
    /// Unparseable values fall back to their defaults with a warning.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use hireflow::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("actor".to_string(), "recruiter".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 25);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let page_size = map.get("page_size").map_or(defaults.page_size, |raw| {
            raw.trim().parse::<usize>().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "invalid page_size, using default");
                defaults.page_size
            })
        });

        let actor = map.get("actor").map_or(defaults.actor, |raw| {
            raw.parse::<Actor>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid actor, using default");
                defaults.actor
            })
        });

        let non_empty = |key: &str| {
            map.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            page_size,
            screen: non_empty("screen").unwrap_or(defaults.screen),
            actor,
            seed_file: non_empty("seed_file"),
            data_dir: non_empty("data_dir"),
            trace_level: non_empty("trace_level"),
        }
    }

    /// Builds a configuration from `HIREFLOW_*` environment variables.
    ///
    /// `HIREFLOW_PAGE_SIZE=25` sets `page_size`, and so on for every key.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_pairs(std::env::vars())
    }

    fn from_env_pairs<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let map: BTreeMap<String, String> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_ascii_lowercase(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Io`] if the file cannot be read and
    /// [`PortalError::Config`] if it is not valid TOML, has unknown keys, or
    /// names a screen that does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| PortalError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Config`] for an unknown screen name.
    pub fn validate(&self) -> Result<()> {
        if SCREEN_NAMES.contains(&self.screen.as_str()) {
            Ok(())
        } else {
            Err(PortalError::Config(format!(
                "unknown screen '{}', expected one of: {}",
                self.screen,
                SCREEN_NAMES.join(", ")
            )))
        }
    }

    /// Rows per page as a non-zero count.
    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size)
            .or_else(|| NonZeroUsize::new(DEFAULT_PAGE_SIZE))
            .unwrap_or(NonZeroUsize::MIN)
    }

    /// Resolved path of the seed file.
    #[must_use]
    pub fn seed_path(&self) -> PathBuf {
        self.seed_file.as_deref().map_or_else(
            || infrastructure::get_data_dir(self.data_dir.as_deref()).join(DEFAULT_SEED_FILE),
            |file| PathBuf::from(infrastructure::expand_tilde(file)),
        )
    }
}

/// Creates an empty screen ready for its first `Refresh`.
///
/// # Example
///
/// ```rust
/// use hireflow::app::screens::RECRUITER_JOBS;
/// use hireflow::domain::Job;
/// use hireflow::{initialize, Config};
///
/// let state = initialize::<Job>(&Config::default(), &RECRUITER_JOBS);
/// assert!(state.items.is_empty());
/// ```
pub fn initialize<E: Entity + 'static>(
    config: &Config,
    screen: &'static ScreenConfig<E::Status>,
) -> ScreenState<E> {
    tracing::debug!(screen = screen.name, actor = ?config.actor, "initializing screen");
    ScreenState::new(screen, Vec::new(), config.page_size(), config.actor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_map(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn map_values_are_parsed() {
        let config = Config::from_map(&map(&[
            ("page_size", " 25 "),
            ("screen", "recruiter-jobs"),
            ("actor", "Recruiter"),
            ("trace_level", "debug"),
            ("seed_file", ""),
        ]));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.screen, "recruiter-jobs");
        assert_eq!(config.actor, Actor::Recruiter);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.seed_file, None);
    }

    #[rstest]
    #[case("page_size", "lots")]
    #[case("actor", "superuser")]
    fn bad_map_values_fall_back(#[case] key: &str, #[case] value: &str) {
        assert_eq!(Config::from_map(&map(&[(key, value)])), Config::default());
    }

    #[test]
    fn env_vars_with_prefix_feed_the_map() {
        let config = Config::from_env_pairs([
            ("HIREFLOW_PAGE_SIZE".to_string(), "7".to_string()),
            ("HIREFLOW_SCREEN".to_string(), "admin-jobs".to_string()),
            ("PAGE_SIZE".to_string(), "99".to_string()),
            ("HOME".to_string(), "/home/ada".to_string()),
        ]);
        assert_eq!(config.page_size, 7);
        assert_eq!(config.screen, "admin-jobs");
        assert_eq!(config.actor, Actor::Admin);
    }

    #[rstest]
    #[case(0, 10)]
    #[case(1, 1)]
    #[case(50, 50)]
    fn page_size_is_never_zero(#[case] configured: usize, #[case] expected: usize) {
        let config = Config {
            page_size: configured,
            ..Config::default()
        };
        assert_eq!(config.page_size().get(), expected);
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 5\nscreen = \"admin-notifications\"\nactor = \"admin\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.screen, "admin-notifications");
        assert_eq!(config.trace_level, None);
    }

    #[rstest]
    #[case("screen = \"nowhere\"")]
    #[case("colour = \"blue\"")]
    #[case("page_size = \"ten\"")]
    fn invalid_toml_is_a_config_error(#[case] body: &str) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{body}").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert_eq!(err.reason(), "config");
    }

    #[test]
    fn seed_path_defaults_into_data_dir() {
        let config = Config {
            data_dir: Some("/tmp/hf".to_string()),
            ..Config::default()
        };
        assert_eq!(config.seed_path(), PathBuf::from("/tmp/hf/seeds.json"));

        let explicit = Config {
            seed_file: Some("/srv/seeds.json".to_string()),
            ..config
        };
        assert_eq!(explicit.seed_path(), PathBuf::from("/srv/seeds.json"));
    }

    #[test]
    fn initialize_uses_config_page_size_and_actor() {
        let config = Config {
            page_size: 3,
            actor: Actor::Recruiter,
            ..Config::default()
        };
        let state = initialize::<domain::Job>(&config, &app::screens::RECRUITER_JOBS);
        assert_eq!(state.page_size.get(), 3);
        assert_eq!(state.actor, Actor::Recruiter);
        assert_eq!(state.page_index, 0);
    }
}
