//! Side effects requested by the event handler.
//!
//! The handler never talks to the backend or the renderer directly. It returns
//! a `Vec<Action>` and the runtime executes them in order: backend requests go
//! to the worker, notices are shown to the user.

use crate::domain::error::PortalError;
use crate::worker::BackendRequest;
use serde::Serialize;

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    /// Machine-readable reason code, e.g. `illegal-transition`.
    pub reason: Option<&'static str>,
    pub message: String,
}

impl Notice {
    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            reason: None,
            message: message.into(),
        }
    }

    /// Error notice carrying the error's reason code.
    #[must_use]
    pub fn from_error(error: &PortalError) -> Self {
        Self {
            level: NoticeLevel::Error,
            reason: Some(error.reason()),
            message: error.to_string(),
        }
    }
}

/// Commands executed by the runtime after an event is handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sends a request to the backend worker.
    PostToBackend(BackendRequest),

    /// Shows a notice to the user.
    Notify(Notice),
}
