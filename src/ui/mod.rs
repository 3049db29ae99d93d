//! Rendering boundary.
//!
//! Rendering itself belongs to an external collaborator. This layer only
//! defines the display-ready [`ScreenViewModel`] it consumes:
//!
//! ```text
//! ScreenState → compute_viewmodel → ScreenViewModel → JSON → renderer
//! ```

pub mod viewmodel;

pub use viewmodel::{EmptyState, RowInfo, ScreenViewModel, SearchBarInfo, TabInfo};
