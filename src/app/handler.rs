//! Event handling for a list screen.
//!
//! [`handle_event`] is the single entry point through which user input and
//! backend responses reach a [`ScreenState`]. It mutates the state, then
//! returns whether a re-render is needed together with the side effects to
//! execute.
//!
//! ```text
//! Event → handle_event → ScreenState mutation → Vec<Action>
//!              ↑                                     ↓
//!              └──────── BackendResponse ◄──── worker
//! ```
//!
//! Engine errors never escape as failures of the handler. Errors a user can act
//! on become an [`Action::Notify`] and are remembered as the screen notice;
//! stale tickets and vanished ids are logged and ignored.

use crate::app::actions::{Action, Notice};
use crate::app::coordinator::ServerOutcome;
use crate::app::state::ScreenState;
use crate::domain::action::ActionName;
use crate::domain::entity::Entity;
use crate::domain::error::{PortalError, Result};
use crate::worker::BackendResponse;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Events triggered by user input or backend responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Requests a fresh copy of the collection from the backend.
    Refresh,
    /// Switches to tab `tab`.
    SelectTab { tab: usize },
    /// Replaces the search text.
    SetSearch { query: String },
    /// Appends a character to the search text.
    Char { ch: char },
    /// Removes the last search character.
    Backspace,
    /// Empties the search text.
    ClearSearch,
    /// Sets the status dropdown; `"all"` clears it.
    SetStatusFilter { value: String },
    /// Sets the category dropdown; `"all"` clears it.
    SetCategoryFilter { value: String },
    NextPage,
    PrevPage,
    GoToPage { page: usize },
    SetPageSize { size: NonZeroUsize },
    /// Performs a row action on entity `id`.
    Perform { action: ActionName, id: String },
    /// Clears the current notice.
    DismissNotice,
    /// Delivers a backend response.
    BackendResponse { response: BackendResponse },
}

/// Processes an event, mutates screen state, and returns actions to execute.
///
/// # Returns
///
/// `(rerender, actions)`: whether the view model changed, and the side
/// effects to run in order.
///
/// # Errors
///
/// Only errors that indicate a broken screen configuration propagate; every
/// engine error is converted into a notice or a log line.
pub fn handle_event<E: Entity + 'static>(
    state: &mut ScreenState<E>,
    event: &Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", screen = state.screen.name, event_type = ?event).entered();

    let outcome = match event {
        Event::Refresh => Ok(vec![Action::PostToBackend(state.fetch_request())]),
        Event::SelectTab { tab } => state.select_tab(*tab).map(|()| vec![]),
        Event::SetSearch { query } => {
            state.set_search(query);
            Ok(vec![])
        }
        Event::Char { ch } => {
            state.push_search_char(*ch);
            Ok(vec![])
        }
        Event::Backspace => {
            state.pop_search_char();
            Ok(vec![])
        }
        Event::ClearSearch => {
            state.set_search("");
            Ok(vec![])
        }
        Event::SetStatusFilter { value } => state.set_status_filter(value).map(|()| vec![]),
        Event::SetCategoryFilter { value } => state.set_category_filter(value).map(|()| vec![]),
        Event::NextPage => state.next_page().map(|()| vec![]),
        Event::PrevPage => {
            state.prev_page();
            Ok(vec![])
        }
        Event::GoToPage { page } => state.go_to_page(*page).map(|()| vec![]),
        Event::SetPageSize { size } => state.set_page_size(*size).map(|()| vec![]),
        Event::Perform { action, id } => state
            .begin_action(*action, id)
            .map(|request| vec![Action::PostToBackend(request)]),
        Event::DismissNotice => {
            state.notice = None;
            Ok(vec![])
        }
        Event::BackendResponse { response } => handle_backend_response(state, response),
    };

    match outcome {
        Ok(actions) => Ok((true, actions)),
        Err(error) => surface(state, error),
    }
}

fn handle_backend_response<E: Entity + 'static>(
    state: &mut ScreenState<E>,
    response: &BackendResponse,
) -> Result<Vec<Action>> {
    match response {
        BackendResponse::CollectionFetched { kind, records, .. } => {
            let items: Vec<E> = records.iter().cloned().filter_map(E::from_record).collect();
            if items.len() != records.len() {
                tracing::warn!(
                    expected = %kind,
                    dropped = records.len() - items.len(),
                    "ignoring records of another kind"
                );
            }
            tracing::debug!(count = items.len(), "collection fetched");
            state.replace_items(items)?;
            Ok(vec![])
        }
        BackendResponse::Confirmed { ticket } => {
            state.finish_action(*ticket, ServerOutcome::Confirmed)?;
            Ok(vec![])
        }
        BackendResponse::Rejected { ticket, message } | BackendResponse::Error { ticket, message } => {
            state.finish_action(
                *ticket,
                ServerOutcome::Rejected {
                    message: message.clone(),
                },
            )?;
            Ok(vec![])
        }
    }
}

/// Routes an engine error to the user or to the log.
fn surface<E: Entity + 'static>(
    state: &mut ScreenState<E>,
    error: PortalError,
) -> Result<(bool, Vec<Action>)> {
    if error.is_user_visible() {
        tracing::info!(reason = error.reason(), error = %error, "action failed");
        let notice = Notice::from_error(&error);
        state.notice = Some(notice.clone());
        return Ok((true, vec![Action::Notify(notice)]));
    }

    match error {
        PortalError::NotFound { .. } | PortalError::UnknownTicket(_) => {
            tracing::debug!(error = %error, "ignoring stale event");
            Ok((false, vec![]))
        }
        PortalError::UnknownTab { .. }
        | PortalError::UnknownStatus { .. }
        | PortalError::Config(_) => {
            tracing::warn!(error = %error, "invalid view input ignored");
            Ok((false, vec![]))
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::ADMIN_USERS;
    use crate::domain::action::Actor;
    use crate::domain::entity::User;
    use crate::domain::status::{EntityKind, UserStatus};
    use crate::worker::BackendRequest;

    fn state() -> ScreenState<User> {
        let users = ["u1", "u2"]
            .iter()
            .map(|id| User {
                id: (*id).to_string(),
                created_at: 0,
                status: UserStatus::Active,
                full_name: format!("Name {id}"),
                email: format!("{id}@x.com"),
                role: "applicant".to_string(),
                phone: None,
            })
            .collect();
        ScreenState::new(&ADMIN_USERS, users, NonZeroUsize::new(10).unwrap(), Actor::Admin)
    }

    fn perform(action: ActionName, id: &str) -> Event {
        Event::Perform {
            action,
            id: id.to_string(),
        }
    }

    #[test]
    fn perform_posts_submit_transition() {
        let mut s = state();
        let (rerender, actions) = handle_event(&mut s, &perform(ActionName::Suspend, "u1")).unwrap();
        assert!(rerender);
        match actions.as_slice() {
            [Action::PostToBackend(BackendRequest::SubmitTransition { kind, id, target, .. })] => {
                assert_eq!(*kind, EntityKind::User);
                assert_eq!(id, "u1");
                assert_eq!(target, "suspended");
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn illegal_transition_becomes_notice_without_backend_call() {
        let mut s = state();
        let (_, actions) = handle_event(&mut s, &perform(ActionName::Activate, "u1")).unwrap();
        match actions.as_slice() {
            [Action::Notify(notice)] => assert_eq!(notice.reason, Some("illegal-transition")),
            other => panic!("unexpected actions: {other:?}"),
        }
        assert!(s.notice.is_some());
        handle_event(&mut s, &Event::DismissNotice).unwrap();
        assert!(s.notice.is_none());
    }

    #[test]
    fn rejection_rolls_back_and_notifies() {
        let mut s = state();
        let (_, actions) = handle_event(&mut s, &perform(ActionName::Suspend, "u1")).unwrap();
        let [Action::PostToBackend(request)] = actions.as_slice() else {
            panic!("expected a backend request");
        };
        let response = BackendResponse::Rejected {
            ticket: request.ticket(),
            message: "locked".to_string(),
        };
        let (_, actions) = handle_event(&mut s, &Event::BackendResponse { response }).unwrap();
        assert!(matches!(actions.as_slice(), [Action::Notify(_)]));
        assert_eq!(s.items[0].status, UserStatus::Active);
    }

    #[test]
    fn stale_ticket_and_missing_id_are_ignored() {
        let mut s = state();
        let response = BackendResponse::Confirmed { ticket: 99 };
        let (rerender, actions) = handle_event(&mut s, &Event::BackendResponse { response }).unwrap();
        assert!(!rerender);
        assert!(actions.is_empty());

        let (rerender, actions) = handle_event(&mut s, &perform(ActionName::Suspend, "gone")).unwrap();
        assert!(!rerender);
        assert!(actions.is_empty());
    }

    #[test]
    fn refresh_replaces_items_from_matching_records() {
        let mut s = state();
        let (_, actions) = handle_event(&mut s, &Event::Refresh).unwrap();
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToBackend(BackendRequest::FetchCollection { .. })]
        ));

        let mut fresh = s.items[0].clone();
        fresh.status = UserStatus::Suspended;
        let response = BackendResponse::CollectionFetched {
            ticket: 1,
            kind: EntityKind::User,
            records: vec![fresh.into_record()],
        };
        handle_event(&mut s, &Event::BackendResponse { response }).unwrap();
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.items[0].status, UserStatus::Suspended);
    }

    #[test]
    fn events_decode_from_json() {
        let event: Event = serde_json::from_str(r#"{"event":"perform","action":"mark_failed","id":"n1"}"#).unwrap();
        assert_eq!(event, perform(ActionName::MarkFailed, "n1"));
        let event: Event = serde_json::from_str(r#"{"event":"set_page_size","size":25}"#).unwrap();
        assert_eq!(event, Event::SetPageSize { size: NonZeroUsize::new(25).unwrap() });
    }
}
