//! Action coordinator: optimistic updates and their reconciliation.
//!
//! [`dispatch`] resolves a named action against the entity's kind, validates
//! it with the transition engine and applies it to the owned collection at
//! once. The returned [`Reconciliation`] remembers what the entity looked like
//! before, so that [`Reconciliation::reconcile`] can keep the change or roll
//! it back when the backend answers. Each reconciliation touches only its own
//! entity, so several may be outstanding at the same time.

use crate::domain::action::{ActionName, Actor};
use crate::domain::entity::Entity;
use crate::domain::error::{PortalError, Result};
use crate::domain::status::{EntityKind, Lifecycle};
use crate::domain::transition::request_transition;
use serde::{Deserialize, Serialize};

/// Authoritative answer from the backend for one dispatched action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ServerOutcome {
    /// The backend applied the change; the optimistic state stands.
    Confirmed,
    /// The backend refused the change; the optimistic state is undone.
    Rejected {
        /// Reason reported by the backend.
        message: String,
    },
}

/// State needed to undo an optimistic update.
#[derive(Debug, Clone)]
enum Prior<E: Entity> {
    Status(E::Status),
    Removed {
        entity: E,
        index: usize,
        predecessor: Option<String>,
        successor: Option<String>,
    },
}

/// Pending confirmation of one optimistic update.
#[derive(Debug, Clone)]
pub struct Reconciliation<E: Entity> {
    /// Kind of the affected entity.
    pub kind: EntityKind,
    /// Identifier of the affected entity.
    pub id: String,
    /// Action that was applied.
    pub action: ActionName,
    /// New status, or `None` for a delete.
    pub target: Option<E::Status>,
    prior: Prior<E>,
}

impl<E: Entity> Reconciliation<E> {
    /// Status the entity had before the action, if it was a status change.
    #[must_use]
    pub fn prior_status(&self) -> Option<E::Status> {
        match &self.prior {
            Prior::Status(status) => Some(*status),
            Prior::Removed { .. } => None,
        }
    }

    /// Settles the optimistic update against the backend's answer.
    ///
    /// On [`ServerOutcome::Confirmed`] nothing changes. On
    /// [`ServerOutcome::Rejected`] the entity is restored (status reverted, or
    /// a deleted entity re-inserted after its former predecessor) and the
    /// failure is returned for the user. No other entity is touched.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Reconciliation`] after rolling back a rejected
    /// action.
    pub fn reconcile(self, collection: &mut Vec<E>, outcome: ServerOutcome) -> Result<()> {
        let _span = tracing::debug_span!(
            "reconcile",
            kind = %self.kind,
            id = %self.id,
            action = %self.action
        )
        .entered();

        let message = match outcome {
            ServerOutcome::Confirmed => {
                tracing::debug!("optimistic update confirmed");
                return Ok(());
            }
            ServerOutcome::Rejected { message } => message,
        };

        match self.prior {
            Prior::Status(previous) => {
                match collection.iter_mut().find(|e| e.id() == self.id) {
                    Some(entity) => entity.set_status(previous),
                    None => tracing::warn!("entity gone before rollback, nothing to restore"),
                }
            }
            Prior::Removed {
                entity,
                index,
                predecessor,
                successor,
            } => {
                if collection.iter().any(|e| e.id() == self.id) {
                    tracing::warn!("deleted entity already present, skipping re-insert");
                } else {
                    let at = reinsert_index(collection, predecessor.as_deref(), successor.as_deref(), index);
                    collection.insert(at, entity);
                }
            }
        }

        tracing::info!(message = %message, "optimistic update rolled back");
        Err(PortalError::Reconciliation {
            kind: self.kind,
            id: self.id,
            action: self.action,
            message,
        })
    }
}

/// Slot for a re-inserted entity: after its former predecessor, else before
/// its former successor, else the original index clamped to the length.
fn reinsert_index<E: Entity>(
    collection: &[E],
    predecessor: Option<&str>,
    successor: Option<&str>,
    index: usize,
) -> usize {
    let position = |id: &str| collection.iter().position(|e| e.id() == id);
    predecessor
        .and_then(position)
        .map(|pos| pos + 1)
        .or_else(|| successor.and_then(position))
        .unwrap_or_else(|| index.min(collection.len()))
}

/// Applies `action` to the entity `id` in `collection` optimistically.
///
/// Status actions resolve to a target through the kind's action table and are
/// validated by the transition engine. `delete` bypasses the engine and
/// removes the entity. On any error the collection is left unchanged.
///
/// # Errors
///
/// - [`PortalError::NotFound`] when `id` is not in the collection.
/// - [`PortalError::UnsupportedAction`] when the kind has no such action.
/// - [`PortalError::IllegalTransition`] when the current status forbids it.
pub fn dispatch<E: Entity>(
    collection: &mut Vec<E>,
    action: ActionName,
    id: &str,
    actor: Actor,
) -> Result<Reconciliation<E>> {
    let kind = <E::Status as Lifecycle>::KIND;
    let _span = tracing::debug_span!("dispatch", %kind, id, %action, actor = ?actor).entered();

    let index = collection
        .iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| PortalError::NotFound {
            kind,
            id: id.to_string(),
        })?;

    if action.is_destructive() {
        let predecessor = index
            .checked_sub(1)
            .and_then(|i| collection.get(i))
            .map(|e| e.id().to_string());
        let successor = collection.get(index + 1).map(|e| e.id().to_string());
        let entity = collection.remove(index);
        tracing::debug!(index, "entity removed optimistically");
        return Ok(Reconciliation {
            kind,
            id: id.to_string(),
            action,
            target: None,
            prior: Prior::Removed {
                entity,
                index,
                predecessor,
                successor,
            },
        });
    }

    let target = E::Status::target_for(action).ok_or(PortalError::UnsupportedAction { kind, action })?;
    let entity = &mut collection[index];
    let previous = entity.status();
    let next = request_transition(&*entity, target, actor)?;
    entity.set_status(next);
    tracing::debug!(from = %previous, to = %next, "status updated optimistically");

    Ok(Reconciliation {
        kind,
        id: id.to_string(),
        action,
        target: Some(next),
        prior: Prior::Status(previous),
    })
}
