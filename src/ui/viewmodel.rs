//! View model types representing renderable screen state.
//!
//! View models are computed from a `ScreenState` snapshot and handed to the
//! rendering collaborator as JSON. They carry no business logic, only
//! display-ready data: tab badges, the rows of the current page, the page
//! position and any pending notice.
//!
//! # Example
//!
//! ```rust
//! use hireflow::ui::viewmodel::TabInfo;
//!
//! let tab = TabInfo { label: "Active".to_string(), count: 3, active: true };
//! assert!(tab.active);
//! ```

use crate::app::actions::Notice;
use crate::app::pagination::PageInfo;
use crate::domain::action::ActionName;
use serde::Serialize;

/// Complete view model for one list screen.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenViewModel {
    /// Heading of the screen.
    pub title: String,

    /// One entry per tab, with badge counts over the unfiltered collection.
    pub tabs: Vec<TabInfo>,

    /// Rows of the current page, in source order.
    pub rows: Vec<RowInfo>,

    /// Page position and totals of the filtered collection.
    pub page: PageInfo,

    /// Current search text; `None` when the search box is empty.
    pub search_bar: Option<SearchBarInfo>,

    /// Toast to show, if any.
    pub notice: Option<Notice>,

    /// Placeholder shown instead of an empty table.
    pub empty_state: Option<EmptyState>,
}

/// A tab header with its badge count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabInfo {
    pub label: String,
    pub count: usize,
    pub active: bool,
}

/// Display information for a single table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowInfo {
    pub id: String,
    /// Primary label (name or title).
    pub title: String,
    /// Wire name of the status, used for the status chip.
    pub status: String,
    /// Whether the status is terminal for its kind.
    pub is_terminal: bool,
    /// Relative age, e.g. `3d ago`.
    pub age: String,
    /// Whether an action on this row is awaiting backend confirmation.
    pub pending: bool,
    /// Actions the row menu offers; empty while pending.
    pub available_actions: Vec<ActionName>,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchBarInfo {
    pub query: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    /// Primary message (e.g., "No results").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
