//! Error types for the hireflow engine.
//!
//! This module defines the centralized error type [`PortalError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.
//!
//! Nothing here is fatal to the process. Every variant degrades to "collection
//! unchanged, error surfaced": callers turn the error into a user-visible notice
//! or a log line and carry on.

use crate::domain::action::ActionName;
use crate::domain::status::EntityKind;
use thiserror::Error;

/// The main error type for hireflow operations.
///
/// The first group of variants is the engine taxonomy (illegal transitions,
/// reconciliation failures, missing entities). The remaining variants wrap
/// configuration, persistence and worker plumbing failures.
#[derive(Debug, Error)]
pub enum PortalError {
    /// The requested status change is not in the kind's transition table.
    ///
    /// Raised before any backend call is made; the collection is untouched.
    #[error("illegal-transition: {kind} cannot move from {from} to {to}")]
    IllegalTransition {
        /// Entity kind the transition was requested on.
        kind: EntityKind,
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// The backend rejected an optimistically applied action.
    ///
    /// By the time this error is returned the entity has already been rolled
    /// back to its pre-action state.
    #[error("backend rejected {action} on {kind} {id}: {message}")]
    Reconciliation {
        /// Entity kind of the rolled back entity.
        kind: EntityKind,
        /// Identifier of the rolled back entity.
        id: String,
        /// Action that was rolled back.
        action: ActionName,
        /// Message reported by the backend.
        message: String,
    },

    /// An action targeted an id that is not in the collection.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind that was searched.
        kind: EntityKind,
        /// Identifier that was not found.
        id: String,
    },

    /// The named action has no meaning for this entity kind.
    #[error("action {action} is not available for {kind}")]
    UnsupportedAction {
        /// Entity kind the action was dispatched on.
        kind: EntityKind,
        /// The unsupported action.
        action: ActionName,
    },

    /// A second action was dispatched on an entity whose previous action has
    /// not been reconciled yet.
    #[error("{kind} {id} already has an action awaiting confirmation")]
    ActionInFlight {
        /// Entity kind of the busy entity.
        kind: EntityKind,
        /// Identifier of the busy entity.
        id: String,
    },

    /// A status string does not name a status of the given kind.
    #[error("unknown {kind} status: {value}")]
    UnknownStatus {
        /// Entity kind whose status set was consulted.
        kind: EntityKind,
        /// The unrecognised value.
        value: String,
    },

    /// An action name could not be parsed.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// A tab index outside the screen's tab table.
    #[error("screen {screen} has no tab {tab}")]
    UnknownTab {
        /// Screen name.
        screen: &'static str,
        /// Requested tab index.
        tab: usize,
    },

    /// A backend response referenced a ticket that is not pending.
    #[error("no pending action for ticket {0}")]
    UnknownTicket(u64),

    /// Seed storage failed to load, validate or persist.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Communication with the backend worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PortalError {
    /// Short machine-readable reason code, as surfaced to the rendering layer.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::IllegalTransition { .. } => "illegal-transition",
            Self::Reconciliation { .. } => "reconciliation-failure",
            Self::NotFound { .. } => "not-found",
            Self::UnsupportedAction { .. } => "unsupported-action",
            Self::ActionInFlight { .. } => "action-in-flight",
            Self::UnknownStatus { .. } => "unknown-status",
            Self::UnknownAction(_) => "unknown-action",
            Self::UnknownTab { .. } => "unknown-tab",
            Self::UnknownTicket(_) => "unknown-ticket",
            Self::Storage(_) => "storage",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Worker(_) => "worker",
            Self::Config(_) => "config",
        }
    }

    /// Whether the error should be shown to the user as a toast.
    ///
    /// `NotFound` and `UnknownTicket` are logged only.
    #[must_use]
    pub const fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::IllegalTransition { .. }
                | Self::Reconciliation { .. }
                | Self::UnsupportedAction { .. }
                | Self::ActionInFlight { .. }
        )
    }
}

/// A specialized `Result` type for hireflow operations.
pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_transition_reason_matches_toast_code() {
        let err = PortalError::IllegalTransition {
            kind: EntityKind::Application,
            from: "hired".to_string(),
            to: "pending".to_string(),
        };
        assert_eq!(err.reason(), "illegal-transition");
        assert!(err.is_user_visible());
        assert_eq!(
            err.to_string(),
            "illegal-transition: application cannot move from hired to pending"
        );
    }

    #[test]
    fn not_found_is_logged_only() {
        let err = PortalError::NotFound {
            kind: EntityKind::User,
            id: "u-404".to_string(),
        };
        assert!(!err.is_user_visible());
        assert_eq!(err.reason(), "not-found");
    }
}
