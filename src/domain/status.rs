//! Entity kinds, their status enumerations and the transition tables.
//!
//! Every entity kind carries a closed set of statuses. The [`Lifecycle`] trait
//! gives the engine a uniform view over those sets: which statuses exist,
//! which moves are legal from each one, which are terminal, and which status a
//! named dashboard action resolves to.
//!
//! # Transition tables
//!
//! ```text
//! User          active -> suspended      inactive -> active     suspended -> active
//! Job           draft -> active|archived active -> paused|closed
//!               paused -> active|closed  closed -> archived
//! Application   pending -> reviewed -> shortlisted -> interview -> hired
//!               any open status -> rejected
//! Company       pending -> verified|suspended  verified <-> suspended
//! Interview     scheduled -> completed|cancelled|rescheduled  rescheduled -> scheduled
//! Notification  draft -> scheduled|sent  scheduled -> draft|sent|failed
//! ```

use crate::domain::action::ActionName;
use crate::domain::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

/// The six entity kinds managed by the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Job,
    Application,
    Company,
    Interview,
    Notification,
}

impl EntityKind {
    /// Every kind.
    pub const ALL: &'static [Self] = &[
        Self::User,
        Self::Job,
        Self::Application,
        Self::Company,
        Self::Interview,
        Self::Notification,
    ];

    /// Lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Job => "job",
            Self::Application => "application",
            Self::Company => "company",
            Self::Interview => "interview",
            Self::Notification => "notification",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform access to a kind's status set and transition table.
///
/// Implementors are plain `Copy` enums. The provided methods cover parsing and
/// transition checks so that each implementation only states its tables.
pub trait Lifecycle:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Entity kind this status set belongs to.
    const KIND: EntityKind;

    /// Every status of the kind, in display order.
    const ALL: &'static [Self];

    /// Lowercase wire name.
    fn as_str(self) -> &'static str;

    /// Statuses reachable from `self` in one step.
    fn allowed_targets(self) -> &'static [Self];

    /// Terminal statuses admit no transitions other than explicit reversals.
    fn is_terminal(self) -> bool;

    /// Target status a named action resolves to for this kind, if any.
    fn target_for(action: ActionName) -> Option<Self>;

    /// Whether `self -> target` appears in the transition table.
    fn can_transition_to(self, target: Self) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Parses a wire name, ignoring ASCII case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::UnknownStatus`] when `value` names no status of
    /// this kind.
    fn parse(value: &str) -> Result<Self> {
        let wanted = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PortalError::UnknownStatus {
                kind: Self::KIND,
                value: value.to_string(),
            })
    }
}

/// Declares a status enum with its wire names and a `Display` impl.
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            const fn text(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.text())
            }
        }
    };
}

status_enum! {
    /// Account status of a portal user.
    UserStatus {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

status_enum! {
    /// Publication status of a job posting.
    JobStatus {
        Draft => "draft",
        Active => "active",
        Paused => "paused",
        Closed => "closed",
        /// Withdrawn from every listing; terminal.
        Archived => "archived",
    }
}

status_enum! {
    /// Pipeline stage of an application (a candidate from the recruiter's side).
    ApplicationStatus {
        Pending => "pending",
        Reviewed => "reviewed",
        Shortlisted => "shortlisted",
        Interview => "interview",
        Hired => "hired",
        Rejected => "rejected",
    }
}

status_enum! {
    /// Verification status of an employer company.
    CompanyStatus {
        Pending => "pending",
        Verified => "verified",
        Suspended => "suspended",
    }
}

status_enum! {
    /// Status of a scheduled interview.
    InterviewStatus {
        Scheduled => "scheduled",
        Completed => "completed",
        Cancelled => "cancelled",
        Rescheduled => "rescheduled",
    }
}

status_enum! {
    /// Delivery status of an admin broadcast notification.
    NotificationStatus {
        Draft => "draft",
        Scheduled => "scheduled",
        Sent => "sent",
        Failed => "failed",
    }
}

impl Lifecycle for UserStatus {
    const KIND: EntityKind = EntityKind::User;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn as_str(self) -> &'static str {
        self.text()
    }

    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Suspended],
            Self::Inactive | Self::Suspended => &[Self::Active],
        }
    }

    fn is_terminal(self) -> bool {
        false
    }

    fn target_for(action: ActionName) -> Option<Self> {
        match action {
            ActionName::Activate | ActionName::Reinstate => Some(Self::Active),
            ActionName::Suspend => Some(Self::Suspended),
            _ => None,
        }
    }
}

impl Lifecycle for JobStatus {
    const KIND: EntityKind = EntityKind::Job;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn as_str(self) -> &'static str {
        self.text()
    }

    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Active, Self::Archived],
            Self::Active => &[Self::Paused, Self::Closed],
            Self::Paused => &[Self::Active, Self::Closed],
            Self::Closed => &[Self::Archived],
            Self::Archived => &[],
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Archived)
    }

    fn target_for(action: ActionName) -> Option<Self> {
        match action {
            ActionName::Publish | ActionName::Resume => Some(Self::Active),
            ActionName::Pause => Some(Self::Paused),
            ActionName::Close => Some(Self::Closed),
            ActionName::Archive => Some(Self::Archived),
            _ => None,
        }
    }
}

impl Lifecycle for ApplicationStatus {
    const KIND: EntityKind = EntityKind::Application;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn as_str(self) -> &'static str {
        self.text()
    }

    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Reviewed, Self::Rejected],
            Self::Reviewed => &[Self::Shortlisted, Self::Rejected],
            Self::Shortlisted => &[Self::Interview, Self::Rejected],
            Self::Interview => &[Self::Hired, Self::Rejected],
            Self::Hired | Self::Rejected => &[],
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }

    fn target_for(action: ActionName) -> Option<Self> {
        match action {
            ActionName::Review => Some(Self::Reviewed),
            ActionName::Shortlist => Some(Self::Shortlisted),
            ActionName::ScheduleInterview => Some(Self::Interview),
            ActionName::Hire => Some(Self::Hired),
            ActionName::Reject => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl Lifecycle for CompanyStatus {
    const KIND: EntityKind = EntityKind::Company;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn as_str(self) -> &'static str {
        self.text()
    }

    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Verified, Self::Suspended],
            Self::Verified => &[Self::Suspended],
            // reinstatement
            Self::Suspended => &[Self::Verified],
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Suspended)
    }

    fn target_for(action: ActionName) -> Option<Self> {
        match action {
            ActionName::Verify | ActionName::Reinstate => Some(Self::Verified),
            ActionName::Suspend => Some(Self::Suspended),
            _ => None,
        }
    }
}

impl Lifecycle for InterviewStatus {
    const KIND: EntityKind = EntityKind::Interview;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn as_str(self) -> &'static str {
        self.text()
    }

    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Scheduled => &[Self::Completed, Self::Cancelled, Self::Rescheduled],
            Self::Rescheduled => &[Self::Scheduled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    fn target_for(action: ActionName) -> Option<Self> {
        match action {
            ActionName::Complete => Some(Self::Completed),
            ActionName::Cancel => Some(Self::Cancelled),
            ActionName::Reschedule => Some(Self::Rescheduled),
            ActionName::Confirm => Some(Self::Scheduled),
            _ => None,
        }
    }
}

impl Lifecycle for NotificationStatus {
    const KIND: EntityKind = EntityKind::Notification;
    const ALL: &'static [Self] = Self::VARIANTS;

    fn as_str(self) -> &'static str {
        self.text()
    }

    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Scheduled, Self::Sent],
            Self::Scheduled => &[Self::Draft, Self::Sent, Self::Failed],
            Self::Sent | Self::Failed => &[],
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Sent | Self::Failed)
    }

    fn target_for(action: ActionName) -> Option<Self> {
        match action {
            ActionName::Schedule => Some(Self::Scheduled),
            ActionName::Unschedule => Some(Self::Draft),
            ActionName::Send => Some(Self::Sent),
            ActionName::MarkFailed => Some(Self::Failed),
            _ => None,
        }
    }
}

fn names<S: Lifecycle>() -> BTreeSet<&'static str> {
    S::ALL.iter().map(|status| status.as_str()).collect()
}

fn terminal<S: Lifecycle>(status: &str) -> Result<bool> {
    S::parse(status).map(|parsed| parsed.is_terminal())
}

/// Returns the wire names of every status of `kind`.
#[must_use]
pub fn valid_statuses(kind: EntityKind) -> BTreeSet<&'static str> {
    match kind {
        EntityKind::User => names::<UserStatus>(),
        EntityKind::Job => names::<JobStatus>(),
        EntityKind::Application => names::<ApplicationStatus>(),
        EntityKind::Company => names::<CompanyStatus>(),
        EntityKind::Interview => names::<InterviewStatus>(),
        EntityKind::Notification => names::<NotificationStatus>(),
    }
}

/// Whether `status` is terminal for `kind`.
///
/// # Errors
///
/// Returns [`PortalError::UnknownStatus`] when `status` is not a status of `kind`.
pub fn is_terminal(kind: EntityKind, status: &str) -> Result<bool> {
    match kind {
        EntityKind::User => terminal::<UserStatus>(status),
        EntityKind::Job => terminal::<JobStatus>(status),
        EntityKind::Application => terminal::<ApplicationStatus>(status),
        EntityKind::Company => terminal::<CompanyStatus>(status),
        EntityKind::Interview => terminal::<InterviewStatus>(status),
        EntityKind::Notification => terminal::<NotificationStatus>(status),
    }
}
