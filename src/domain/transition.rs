//! Transition engine.
//!
//! Validates a requested status change against the kind's transition table
//! and returns the next status. The engine never mutates its input; callers
//! apply the returned status themselves.

use crate::domain::action::Actor;
use crate::domain::entity::Entity;
use crate::domain::error::{PortalError, Result};
use crate::domain::status::Lifecycle;

/// Checks `from -> to` against the transition table of `S`.
///
/// # Errors
///
/// Returns [`PortalError::IllegalTransition`] when the pair is not listed.
pub fn check_transition<S: Lifecycle>(from: S, to: S) -> Result<S> {
    if from.can_transition_to(to) {
        Ok(to)
    } else {
        Err(PortalError::IllegalTransition {
            kind: S::KIND,
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}

/// Requests a status transition for `entity` on behalf of `actor`.
///
/// Pure over the entity's current status and `target`; the actor is recorded
/// in the trace span only.
///
/// # Errors
///
/// Returns [`PortalError::IllegalTransition`] when the entity's current status
/// does not allow a move to `target`.
pub fn request_transition<E: Entity>(entity: &E, target: E::Status, actor: Actor) -> Result<E::Status> {
    let from = entity.status();
    let _span = tracing::debug_span!(
        "request_transition",
        kind = %entity.kind(),
        id = entity.id(),
        from = %from,
        to = %target,
        actor = ?actor
    )
    .entered();

    let result = check_transition(from, target);
    match &result {
        Ok(_) => tracing::debug!("transition accepted"),
        Err(e) => tracing::debug!(error = %e, "transition rejected"),
    }
    result
}

/// Every legal `(from, to)` pair of `S`, in table order.
#[must_use]
pub fn transition_table<S: Lifecycle>() -> Vec<(S, S)> {
    S::ALL
        .iter()
        .flat_map(|&from| from.allowed_targets().iter().map(move |&to| (from, to)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Application;
    use crate::domain::status::{
        ApplicationStatus, CompanyStatus, InterviewStatus, JobStatus, NotificationStatus,
        UserStatus,
    };

    fn sound<S: Lifecycle>(expected: &[(S, S)]) {
        for &from in S::ALL {
            for &to in S::ALL {
                let listed = expected.contains(&(from, to));
                match check_transition(from, to) {
                    Ok(next) => {
                        assert!(listed, "{} {from} -> {to} accepted but not listed", S::KIND);
                        assert_eq!(next, to);
                    }
                    Err(e) => {
                        assert!(!listed, "{} {from} -> {to} listed but rejected", S::KIND);
                        assert_eq!(e.reason(), "illegal-transition");
                    }
                }
            }
        }
        assert_eq!(transition_table::<S>().len(), expected.len());
    }

    #[test]
    fn user_table() {
        use UserStatus::*;
        sound(&[(Active, Suspended), (Suspended, Active), (Inactive, Active)]);
    }

    #[test]
    fn job_table() {
        use JobStatus::*;
        sound(&[
            (Draft, Active),
            (Draft, Archived),
            (Active, Paused),
            (Paused, Active),
            (Active, Closed),
            (Paused, Closed),
            (Closed, Archived),
        ]);
    }

    #[test]
    fn application_table() {
        use ApplicationStatus::*;
        sound(&[
            (Pending, Reviewed),
            (Reviewed, Shortlisted),
            (Shortlisted, Interview),
            (Interview, Hired),
            (Interview, Rejected),
            (Pending, Rejected),
            (Reviewed, Rejected),
            (Shortlisted, Rejected),
        ]);
    }

    #[test]
    fn company_table() {
        use CompanyStatus::*;
        sound(&[
            (Pending, Verified),
            (Pending, Suspended),
            (Verified, Suspended),
            (Suspended, Verified),
        ]);
    }

    #[test]
    fn interview_table() {
        use InterviewStatus::*;
        sound(&[
            (Scheduled, Completed),
            (Scheduled, Cancelled),
            (Scheduled, Rescheduled),
            (Rescheduled, Scheduled),
        ]);
    }

    #[test]
    fn notification_table() {
        use NotificationStatus::*;
        sound(&[
            (Draft, Scheduled),
            (Draft, Sent),
            (Scheduled, Draft),
            (Scheduled, Sent),
            (Scheduled, Failed),
        ]);
    }

    #[test]
    fn hired_application_cannot_return_to_pending() {
        let app = Application {
            id: "a-1".to_string(),
            created_at: 0,
            status: ApplicationStatus::Hired,
            candidate_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            job_id: "j-1".to_string(),
            job_title: "Engineer".to_string(),
            experience: None,
        };
        let err = request_transition(&app, ApplicationStatus::Pending, Actor::Recruiter).unwrap_err();
        assert_eq!(err.reason(), "illegal-transition");
        assert_eq!(app.status, ApplicationStatus::Hired);
    }
}
