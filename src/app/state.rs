//! Per-screen state and view model computation.
//!
//! [`ScreenState`] is the single owner of a screen's collection. Filters,
//! search and paging only change the [`ViewSpec`] and page index; the
//! collection itself changes only through [`ScreenState::begin_action`],
//! [`ScreenState::finish_action`] and [`ScreenState::replace_items`].
//!
//! # Example
//!
//! ```rust
//! use hireflow::app::screens::ADMIN_USERS;
//! use hireflow::app::ScreenState;
//! use hireflow::domain::{Actor, User};
//! use std::num::NonZeroUsize;
//!
//! let page_size = NonZeroUsize::new(10).unwrap();
//! let state: ScreenState<User> = ScreenState::new(&ADMIN_USERS, vec![], page_size, Actor::Admin);
//! let vm = state.compute_viewmodel(0)?;
//! assert_eq!(vm.page.total_count, 0);
//! # Ok::<(), hireflow::domain::PortalError>(())
//! ```

use crate::app::actions::Notice;
use crate::app::coordinator::{dispatch, Reconciliation, ServerOutcome};
use crate::app::pagination::{clamp_page_index, paginate};
use crate::app::screens::ScreenConfig;
use crate::app::view::{apply_view, tab_counts, View, ViewSpec};
use crate::domain::action::{ActionName, Actor};
use crate::domain::entity::{time_ago, Entity};
use crate::domain::error::{PortalError, Result};
use crate::domain::status::Lifecycle;
use crate::ui::viewmodel::{EmptyState, RowInfo, ScreenViewModel, SearchBarInfo, TabInfo};
use crate::worker::BackendRequest;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

/// Owned state of one list screen.
#[derive(Debug)]
pub struct ScreenState<E: Entity + 'static> {
    /// Static configuration of the screen.
    pub screen: &'static ScreenConfig<E::Status>,

    /// The screen's own copy of the collection, in source order.
    pub items: Vec<E>,

    /// Tab, filters and search text.
    pub view: ViewSpec<E::Status>,

    /// Zero-based page index into the filtered collection.
    pub page_index: usize,

    /// Rows per page.
    pub page_size: NonZeroUsize,

    /// Role the screen acts for.
    pub actor: Actor,

    /// Last notice to show; cleared by `DismissNotice`.
    pub notice: Option<Notice>,

    pending: BTreeMap<u64, Reconciliation<E>>,
    next_ticket: u64,
}

impl<E: Entity + 'static> ScreenState<E> {
    /// Creates a screen over `items` with the default view.
    #[must_use]
    pub fn new(
        screen: &'static ScreenConfig<E::Status>,
        items: Vec<E>,
        page_size: NonZeroUsize,
        actor: Actor,
    ) -> Self {
        Self {
            screen,
            items,
            view: ViewSpec::default(),
            page_index: 0,
            page_size,
            actor,
            notice: None,
            pending: BTreeMap::new(),
            next_ticket: 1,
        }
    }

    fn compiled_view(&self) -> Result<View<'static, E::Status>> {
        View::compile(self.screen, &self.view)
    }

    /// Entities passing the current view, in source order.
    ///
    /// # Errors
    ///
    /// Returns the compile error of an invalid view spec.
    pub fn visible(&self) -> Result<Vec<&E>> {
        let view = self.compiled_view()?;
        Ok(apply_view(&self.items, &view))
    }

    fn visible_count(&self) -> Result<usize> {
        self.visible().map(|rows| rows.len())
    }

    /// Pulls the page index back into range of the filtered total.
    fn clamp_page(&mut self) -> Result<()> {
        let total = self.visible_count()?;
        self.page_index = clamp_page_index(self.page_index, total, self.page_size);
        Ok(())
    }

    /// Switches tab and returns to the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::UnknownTab`] for an index outside the tab table;
    /// the current tab is kept.
    pub fn select_tab(&mut self, tab: usize) -> Result<()> {
        if self.screen.tab(tab).is_none() {
            return Err(PortalError::UnknownTab {
                screen: self.screen.name,
                tab,
            });
        }
        self.view.tab = tab;
        self.page_index = 0;
        Ok(())
    }

    /// Replaces the search text and returns to the first page.
    pub fn set_search(&mut self, query: &str) {
        self.view.search_query = query.to_string();
        self.page_index = 0;
    }

    /// Appends a typed character to the search text.
    pub fn push_search_char(&mut self, ch: char) {
        self.view.search_query.push(ch);
        self.page_index = 0;
    }

    /// Removes the last character of the search text.
    pub fn pop_search_char(&mut self) {
        self.view.search_query.pop();
        self.page_index = 0;
    }

    /// Sets the status filter from a dropdown value (`"all"` clears it).
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::UnknownStatus`] for an unknown status name.
    pub fn set_status_filter(&mut self, value: &str) -> Result<()> {
        self.view.status_filter = ViewSpec::<E::Status>::parse_status_filter(value)?;
        self.page_index = 0;
        Ok(())
    }

    /// Sets the category filter from a dropdown value (`"all"` clears it).
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Config`] when the screen has no category field.
    pub fn set_category_filter(&mut self, value: &str) -> Result<()> {
        let filter = ViewSpec::<E::Status>::parse_category_filter(value);
        if filter.is_some() && self.screen.category_field.is_none() {
            return Err(PortalError::Config(format!(
                "screen {} has no category filter",
                self.screen.name
            )));
        }
        self.view.category_filter = filter;
        self.page_index = 0;
        Ok(())
    }

    /// Advances one page, stopping at the last.
    ///
    /// # Errors
    ///
    /// Returns the compile error of an invalid view spec.
    pub fn next_page(&mut self) -> Result<()> {
        self.page_index = self.page_index.saturating_add(1);
        self.clamp_page()
    }

    /// Goes back one page, stopping at the first.
    pub fn prev_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Jumps to `page`, clamped to the last page.
    ///
    /// # Errors
    ///
    /// Returns the compile error of an invalid view spec.
    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        self.page_index = page;
        self.clamp_page()
    }

    /// Changes the page size and clamps the page index back into range.
    ///
    /// # Errors
    ///
    /// Returns the compile error of an invalid view spec.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) -> Result<()> {
        self.page_size = page_size;
        self.clamp_page()
    }

    /// Replaces the collection with a fresh backend snapshot.
    ///
    /// Entities with an action in flight keep their optimistic state; their
    /// reconciliation will settle them.
    ///
    /// # Errors
    ///
    /// Returns the compile error of an invalid view spec.
    pub fn replace_items(&mut self, items: Vec<E>) -> Result<()> {
        let optimistic: Vec<E> = self
            .items
            .iter()
            .filter(|e| self.is_in_flight(e.id()))
            .cloned()
            .collect();
        let pending = &self.pending;
        self.items = items;
        self.items
            .retain(|e| !pending.values().any(|p| p.target.is_none() && p.id == e.id()));
        for entity in optimistic {
            if let Some(slot) = self.items.iter_mut().find(|e| e.id() == entity.id()) {
                *slot = entity;
            }
        }
        self.clamp_page()
    }

    /// Whether `id` has an action awaiting confirmation.
    #[must_use]
    pub fn is_in_flight(&self, id: &str) -> bool {
        self.pending.values().any(|pending| pending.id == id)
    }

    /// Number of actions awaiting confirmation.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn take_ticket(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    /// Builds a request for a fresh copy of the collection.
    pub fn fetch_request(&mut self) -> BackendRequest {
        let ticket = self.take_ticket();
        BackendRequest::fetch_collection(ticket, <E::Status as Lifecycle>::KIND)
    }

    /// Applies `action` to `id` optimistically and returns the backend request
    /// that confirms it.
    ///
    /// # Errors
    ///
    /// - [`PortalError::ActionInFlight`] when `id` already has an action
    ///   awaiting confirmation.
    /// - Any error of [`dispatch`]; the collection is then unchanged.
    pub fn begin_action(&mut self, action: ActionName, id: &str) -> Result<BackendRequest> {
        let kind = <E::Status as Lifecycle>::KIND;
        if self.is_in_flight(id) {
            return Err(PortalError::ActionInFlight {
                kind,
                id: id.to_string(),
            });
        }

        let reconciliation = dispatch(&mut self.items, action, id, self.actor)?;
        let ticket = self.take_ticket();
        let request = match reconciliation.target {
            Some(target) => {
                BackendRequest::submit_transition(ticket, kind, id.to_string(), target.as_str().to_string())
            }
            None => BackendRequest::delete_entity(ticket, kind, id.to_string()),
        };
        self.pending.insert(ticket, reconciliation);
        self.clamp_page()?;
        Ok(request)
    }

    /// Settles the action behind `ticket`.
    ///
    /// # Errors
    ///
    /// - [`PortalError::UnknownTicket`] when no action is pending under `ticket`.
    /// - [`PortalError::Reconciliation`] after rolling back a rejected action.
    pub fn finish_action(&mut self, ticket: u64, outcome: ServerOutcome) -> Result<()> {
        let reconciliation = self
            .pending
            .remove(&ticket)
            .ok_or(PortalError::UnknownTicket(ticket))?;
        let result = reconciliation.reconcile(&mut self.items, outcome);
        self.clamp_page()?;
        result
    }

    fn row_actions(&self, entity: &E) -> Vec<ActionName> {
        let status = entity.status();
        ActionName::ALL
            .iter()
            .copied()
            .filter(|action| {
                action.is_destructive()
                    || E::Status::target_for(*action).is_some_and(|target| status.can_transition_to(target))
            })
            .collect()
    }

    fn row_info(&self, entity: &E, now: i64) -> RowInfo {
        let pending = self.is_in_flight(entity.id());
        RowInfo {
            id: entity.id().to_string(),
            title: entity.title().to_string(),
            status: entity.status().as_str().to_string(),
            is_terminal: entity.status().is_terminal(),
            age: time_ago(entity.created_at(), now),
            pending,
            available_actions: if pending { Vec::new() } else { self.row_actions(entity) },
        }
    }

    /// Computes the renderable view model at time `now` (Unix seconds).
    ///
    /// # Errors
    ///
    /// Returns the compile error of an invalid view spec.
    pub fn compute_viewmodel(&self, now: i64) -> Result<ScreenViewModel> {
        let visible = self.visible()?;
        let page = paginate(&visible, self.page_index, self.page_size);

        let counts = tab_counts(&self.items, self.screen);
        let tabs = self
            .screen
            .tabs
            .iter()
            .zip(counts)
            .enumerate()
            .map(|(index, (tab, count))| TabInfo {
                label: tab.label.to_string(),
                count,
                active: index == self.view.tab,
            })
            .collect();

        let rows: Vec<RowInfo> = page.rows.iter().map(|entity| self.row_info(entity, now)).collect();

        let empty_state = rows.is_empty().then(|| {
            if self.items.is_empty() {
                EmptyState {
                    message: "Nothing here yet".to_string(),
                    subtitle: format!("{} will appear here once created", self.screen.title),
                }
            } else {
                EmptyState {
                    message: "No results".to_string(),
                    subtitle: "Try another tab, filter or search".to_string(),
                }
            }
        });

        let query = self.view.search_query.as_str();
        Ok(ScreenViewModel {
            title: self.screen.title.to_string(),
            tabs,
            rows,
            page: page.info(),
            search_bar: (!query.is_empty()).then(|| SearchBarInfo {
                query: self.view.search_query.clone(),
            }),
            notice: self.notice.clone(),
            empty_state,
        })
    }
}
