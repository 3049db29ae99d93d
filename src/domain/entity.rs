//! Entity records shown on the dashboards.
//!
//! Each record has the common shape `{ id, created_at, status, ...domain fields }`.
//! The [`Entity`] trait exposes that shape to the generic view engine and the
//! action coordinator; [`Record`] is the kind-tagged union used on the backend
//! boundary and in seed files.

use crate::domain::error::Result;
use crate::domain::status::{
    ApplicationStatus, CompanyStatus, EntityKind, InterviewStatus, JobStatus, Lifecycle,
    NotificationStatus, UserStatus,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Common view of every dashboard entity.
///
/// Field access is by name so that screens can configure which fields are
/// searchable or filterable without per-kind code. A name the entity does not
/// have, or an optional field that is unset, yields `None`.
pub trait Entity: Clone + fmt::Debug {
    /// Status enumeration of this kind.
    type Status: Lifecycle;

    /// Identifier, unique within a collection.
    fn id(&self) -> &str;

    /// Creation time as a Unix timestamp.
    fn created_at(&self) -> i64;

    /// Current status.
    fn status(&self) -> Self::Status;

    /// Replaces the status. Only the action coordinator and the backend call this.
    fn set_status(&mut self, status: Self::Status);

    /// Looks up a textual field by name.
    fn field(&self, name: &str) -> Option<&str>;

    /// Primary label for a table row.
    fn title(&self) -> &str;

    /// Extracts an entity of this kind from a tagged record.
    fn from_record(record: Record) -> Option<Self>;

    /// Wraps the entity into a tagged record.
    fn into_record(self) -> Record;

    /// Kind of the entity.
    fn kind(&self) -> EntityKind {
        <Self::Status as Lifecycle>::KIND
    }
}

macro_rules! record_conversions {
    ($variant:ident) => {
        fn from_record(record: Record) -> Option<Self> {
            match record {
                Record::$variant(entity) => Some(entity),
                _ => None,
            }
        }

        fn into_record(self) -> Record {
            Record::$variant(self)
        }
    };
}

/// A portal account (applicant, recruiter or admin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub created_at: i64,
    pub status: UserStatus,
    pub full_name: String,
    pub email: String,
    /// Dashboard role of the account: `applicant`, `recruiter` or `admin`.
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Entity for User {
    type Status = UserStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn status(&self) -> UserStatus {
        self.status
    }

    fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "status" => Some(self.status.as_str()),
            "full_name" => Some(&self.full_name),
            "email" => Some(&self.email),
            "role" => Some(&self.role),
            "phone" => self.phone.as_deref(),
            _ => None,
        }
    }

    fn title(&self) -> &str {
        &self.full_name
    }

    record_conversions!(User);
}

/// A job posting owned by a recruiter's company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub created_at: i64,
    pub status: JobStatus,
    pub title: String,
    pub company: String,
    pub location: String,
    /// `full-time`, `part-time`, `contract`, `internship` or `remote`.
    pub job_type: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub applicants: u32,
}

impl Entity for Job {
    type Status = JobStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn status(&self) -> JobStatus {
        self.status
    }

    fn set_status(&mut self, status: JobStatus) {
        self.status = status;
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "status" => Some(self.status.as_str()),
            "title" => Some(&self.title),
            "company" => Some(&self.company),
            "location" => Some(&self.location),
            "job_type" => Some(&self.job_type),
            "salary" => self.salary.as_deref(),
            _ => None,
        }
    }

    fn title(&self) -> &str {
        &self.title
    }

    record_conversions!(Job);
}

/// An application to a job; recruiters see it as a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub created_at: i64,
    pub status: ApplicationStatus,
    pub candidate_name: String,
    pub email: String,
    pub job_id: String,
    pub job_title: String,
    #[serde(default)]
    pub experience: Option<String>,
}

impl Entity for Application {
    type Status = ApplicationStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn status(&self) -> ApplicationStatus {
        self.status
    }

    fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "status" => Some(self.status.as_str()),
            "candidate_name" => Some(&self.candidate_name),
            "email" => Some(&self.email),
            "job_id" => Some(&self.job_id),
            "job_title" => Some(&self.job_title),
            "experience" => self.experience.as_deref(),
            _ => None,
        }
    }

    fn title(&self) -> &str {
        &self.candidate_name
    }

    record_conversions!(Application);
}

/// An employer company registered on the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub created_at: i64,
    pub status: CompanyStatus,
    pub name: String,
    pub industry: String,
    pub location: String,
    pub email: String,
}

impl Entity for Company {
    type Status = CompanyStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn status(&self) -> CompanyStatus {
        self.status
    }

    fn set_status(&mut self, status: CompanyStatus) {
        self.status = status;
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "status" => Some(self.status.as_str()),
            "name" => Some(&self.name),
            "industry" => Some(&self.industry),
            "location" => Some(&self.location),
            "email" => Some(&self.email),
            _ => None,
        }
    }

    fn title(&self) -> &str {
        &self.name
    }

    record_conversions!(Company);
}

/// An interview slot between a candidate and an interviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub id: String,
    pub created_at: i64,
    pub status: InterviewStatus,
    pub candidate_name: String,
    pub job_title: String,
    pub interviewer: String,
    /// `video`, `phone` or `onsite`.
    pub mode: String,
    pub scheduled_for: i64,
}

impl Entity for Interview {
    type Status = InterviewStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn status(&self) -> InterviewStatus {
        self.status
    }

    fn set_status(&mut self, status: InterviewStatus) {
        self.status = status;
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "status" => Some(self.status.as_str()),
            "candidate_name" => Some(&self.candidate_name),
            "job_title" => Some(&self.job_title),
            "interviewer" => Some(&self.interviewer),
            "mode" => Some(&self.mode),
            _ => None,
        }
    }

    fn title(&self) -> &str {
        &self.candidate_name
    }

    record_conversions!(Interview);
}

/// A broadcast notification composed by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub created_at: i64,
    pub status: NotificationStatus,
    pub title: String,
    /// `all`, `applicants`, `recruiters` or `admins`.
    pub audience: String,
    /// `email`, `push` or `in-app`.
    pub channel: String,
    #[serde(default)]
    pub scheduled_for: Option<i64>,
}

impl Entity for Notification {
    type Status = NotificationStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn status(&self) -> NotificationStatus {
        self.status
    }

    fn set_status(&mut self, status: NotificationStatus) {
        self.status = status;
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "status" => Some(self.status.as_str()),
            "title" => Some(&self.title),
            "audience" => Some(&self.audience),
            "channel" => Some(&self.channel),
            _ => None,
        }
    }

    fn title(&self) -> &str {
        &self.title
    }

    record_conversions!(Notification);
}

/// Kind-tagged entity record.
///
/// Serialized with a `kind` discriminator so that a single JSON array can carry
/// entities of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    User(User),
    Job(Job),
    Application(Application),
    Company(Company),
    Interview(Interview),
    Notification(Notification),
}

impl Record {
    /// Kind of the wrapped entity.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(e) => e.kind(),
            Self::Job(e) => e.kind(),
            Self::Application(e) => e.kind(),
            Self::Company(e) => e.kind(),
            Self::Interview(e) => e.kind(),
            Self::Notification(e) => e.kind(),
        }
    }

    /// Identifier of the wrapped entity.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::User(e) => e.id(),
            Self::Job(e) => e.id(),
            Self::Application(e) => e.id(),
            Self::Company(e) => e.id(),
            Self::Interview(e) => e.id(),
            Self::Notification(e) => e.id(),
        }
    }

    /// Wire name of the wrapped entity's status.
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::User(e) => e.status().as_str(),
            Self::Job(e) => e.status().as_str(),
            Self::Application(e) => e.status().as_str(),
            Self::Company(e) => e.status().as_str(),
            Self::Interview(e) => e.status().as_str(),
            Self::Notification(e) => e.status().as_str(),
        }
    }

    /// Applies a status given by wire name, validating it against the kind's
    /// transition table first.
    ///
    /// # Errors
    ///
    /// - [`PortalError::UnknownStatus`](crate::domain::PortalError::UnknownStatus)
    ///   when `target` is not a status of the record's kind.
    /// - [`PortalError::IllegalTransition`](crate::domain::PortalError::IllegalTransition)
    ///   when the move is not in the table; the record is unchanged.
    pub fn apply_status(&mut self, target: &str) -> Result<()> {
        match self {
            Self::User(e) => apply_status_str(e, target),
            Self::Job(e) => apply_status_str(e, target),
            Self::Application(e) => apply_status_str(e, target),
            Self::Company(e) => apply_status_str(e, target),
            Self::Interview(e) => apply_status_str(e, target),
            Self::Notification(e) => apply_status_str(e, target),
        }
    }
}

/// Returns a human-readable string describing how long ago `timestamp` was.
///
/// - Less than 1 minute (or in the future): "just now"
/// - Less than 1 hour: "Xm ago"
/// - Less than 1 day: "Xh ago"
/// - 1 day or more: "Xd ago"
#[must_use]
pub fn time_ago(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        let mins = diff / SECONDS_PER_MINUTE;
        format!("{mins}m ago")
    } else if diff < SECONDS_PER_DAY {
        let hours = diff / SECONDS_PER_HOUR;
        format!("{hours}h ago")
    } else {
        let days = diff / SECONDS_PER_DAY;
        format!("{days}d ago")
    }
}

/// Parses a status name for `E` and checks it against the transition table
/// before applying it. Used where statuses arrive as strings.
fn apply_status_str<E: Entity>(entity: &mut E, target: &str) -> Result<()> {
    let target = E::Status::parse(target)?;
    let next = crate::domain::transition::check_transition(entity.status(), target)?;
    entity.set_status(next);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            created_at: 1_700_000_000,
            status: UserStatus::Active,
            full_name: "John Carter".to_string(),
            email: "JOHN@x.com".to_string(),
            role: "applicant".to_string(),
            phone: None,
        }
    }

    #[test]
    fn unknown_and_unset_fields_are_none() {
        let u = user();
        assert_eq!(u.field("email"), Some("JOHN@x.com"));
        assert_eq!(u.field("phone"), None);
        assert_eq!(u.field("salary"), None);
        assert_eq!(u.field("status"), Some("active"));
    }

    #[test]
    fn record_round_trips_through_tagged_json() {
        let record = user().into_record();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "user");
        assert_eq!(json["status"], "active");
        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), EntityKind::User);
        assert_eq!(User::from_record(back), Some(user()));
    }

    #[test]
    fn from_record_rejects_other_kinds() {
        let record = user().into_record();
        assert!(Job::from_record(record).is_none());
    }

    #[test]
    fn apply_status_str_checks_table() {
        let mut u = user();
        apply_status_str(&mut u, "suspended").unwrap();
        assert_eq!(u.status, UserStatus::Suspended);
        let err = apply_status_str(&mut u, "inactive").unwrap_err();
        assert_eq!(err.reason(), "illegal-transition");
        assert_eq!(u.status, UserStatus::Suspended);
    }

    #[test]
    fn record_apply_status_validates_by_kind() {
        let mut record = user().into_record();
        record.apply_status("suspended").unwrap();
        assert_eq!(record.status_str(), "suspended");
        let err = record.apply_status("hired").unwrap_err();
        assert_eq!(err.reason(), "unknown-status");
    }

    #[test]
    fn time_ago_buckets() {
        let now = 1_700_000_000;
        assert_eq!(time_ago(now - 10, now), "just now");
        assert_eq!(time_ago(now + 500, now), "just now");
        assert_eq!(time_ago(now - 300, now), "5m ago");
        assert_eq!(time_ago(now - 3 * 3600, now), "3h ago");
        assert_eq!(time_ago(now - 7 * 86400, now), "7d ago");
    }
}
