//! Named user actions and the roles that perform them.

use crate::domain::error::PortalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-initiated action as exposed by the dashboard buttons and menus.
///
/// Each action resolves, per entity kind, to a target status through
/// [`Lifecycle::target_for`](crate::domain::status::Lifecycle::target_for).
/// [`ActionName::Delete`] has no target status and removes the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionName {
    Activate,
    Suspend,
    Verify,
    Reinstate,
    Publish,
    Pause,
    Resume,
    Close,
    Archive,
    Review,
    Shortlist,
    ScheduleInterview,
    Hire,
    Reject,
    Complete,
    Cancel,
    Reschedule,
    Confirm,
    Schedule,
    Unschedule,
    Send,
    MarkFailed,
    Delete,
}

impl ActionName {
    /// Every action, in menu order.
    pub const ALL: &'static [Self] = &[
        Self::Activate,
        Self::Suspend,
        Self::Verify,
        Self::Reinstate,
        Self::Publish,
        Self::Pause,
        Self::Resume,
        Self::Close,
        Self::Archive,
        Self::Review,
        Self::Shortlist,
        Self::ScheduleInterview,
        Self::Hire,
        Self::Reject,
        Self::Complete,
        Self::Cancel,
        Self::Reschedule,
        Self::Confirm,
        Self::Schedule,
        Self::Unschedule,
        Self::Send,
        Self::MarkFailed,
        Self::Delete,
    ];

    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Suspend => "suspend",
            Self::Verify => "verify",
            Self::Reinstate => "reinstate",
            Self::Publish => "publish",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Close => "close",
            Self::Archive => "archive",
            Self::Review => "review",
            Self::Shortlist => "shortlist",
            Self::ScheduleInterview => "schedule_interview",
            Self::Hire => "hire",
            Self::Reject => "reject",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Reschedule => "reschedule",
            Self::Confirm => "confirm",
            Self::Schedule => "schedule",
            Self::Unschedule => "unschedule",
            Self::Send => "send",
            Self::MarkFailed => "mark_failed",
            Self::Delete => "delete",
        }
    }

    /// Destructive actions bypass the transition engine and remove the entity.
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::Delete)
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionName {
    type Err = PortalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PortalError::UnknownAction(value.to_string()))
    }
}

/// Dashboard role performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Applicant,
    Recruiter,
    #[default]
    Admin,
}

impl FromStr for Actor {
    type Err = PortalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "applicant" => Ok(Self::Applicant),
            "recruiter" => Ok(Self::Recruiter),
            "admin" => Ok(Self::Admin),
            other => Err(PortalError::Config(format!("unknown actor role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_case_insensitively() {
        assert_eq!("suspend".parse::<ActionName>().ok(), Some(ActionName::Suspend));
        assert_eq!(" HIRE ".parse::<ActionName>().ok(), Some(ActionName::Hire));
        assert_eq!(
            "schedule_interview".parse::<ActionName>().ok(),
            Some(ActionName::ScheduleInterview)
        );
        assert!(matches!(
            "explode".parse::<ActionName>(),
            Err(PortalError::UnknownAction(_))
        ));
    }

    #[test]
    fn serde_and_display_agree() {
        for action in ActionName::ALL {
            let json = serde_json::to_string(action).unwrap();
            assert_eq!(json, format!("\"{action}\""));
        }
    }

    #[test]
    fn only_delete_is_destructive() {
        let destructive: Vec<_> = ActionName::ALL
            .iter()
            .filter(|a| a.is_destructive())
            .collect();
        assert_eq!(destructive, vec![&ActionName::Delete]);
    }
}
