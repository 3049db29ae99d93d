//! Application layer: the filtered-view engine and the action coordinator.
//!
//! This layer sits between the runtime (main.rs) and the domain, worker and
//! storage layers. Data flows one way:
//!
//! ```text
//! collection → View (tab ∧ filters ∧ search) → paginate → ScreenViewModel
//! Perform → dispatch (optimistic) → BackendRequest … BackendResponse → reconcile
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`coordinator`]: Optimistic dispatch and reconciliation
//! - [`handler`]: Event processing
//! - [`pagination`]: Page slicing
//! - [`screens`]: Static per-screen tab tables and search fields
//! - [`state`]: Per-screen state container and view model computation
//! - [`view`]: Composite filter, search and tab predicate

pub mod actions;
pub mod coordinator;
pub mod handler;
pub mod pagination;
pub mod screens;
pub mod state;
pub mod view;

pub use actions::{Action, Notice, NoticeLevel};
pub use coordinator::{dispatch, Reconciliation, ServerOutcome};
pub use handler::{handle_event, Event};
pub use pagination::{clamp_page_index, paginate, Page, PageInfo};
pub use screens::{ScreenConfig, TabSpec};
pub use state::ScreenState;
pub use view::{apply_view, tab_counts, View, ViewSpec};
