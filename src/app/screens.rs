//! Static per-screen view configuration.
//!
//! Every dashboard list screen is described by a [`ScreenConfig`]: its tab
//! table (each tab a fixed status predicate), the fields free-text search
//! looks at, and the optional categorical field behind the secondary filter
//! dropdown. Tab tables are static, not data-driven.
//!
//! # Example
//!
//! ```rust
//! use hireflow::app::screens::ADMIN_USERS;
//! use hireflow::domain::UserStatus;
//!
//! let suspended_tab = &ADMIN_USERS.tabs[3];
//! assert_eq!(suspended_tab.label, "Suspended");
//! assert!(suspended_tab.admits(UserStatus::Suspended));
//! ```

use crate::domain::status::{
    ApplicationStatus, CompanyStatus, InterviewStatus, JobStatus, Lifecycle, NotificationStatus,
    UserStatus,
};

/// One tab of a list screen.
///
/// An empty status list is the "All" tab and imposes no status predicate.
#[derive(Debug)]
pub struct TabSpec<S: 'static> {
    /// Label shown on the tab.
    pub label: &'static str,
    /// Statuses the tab shows.
    pub statuses: &'static [S],
}

impl<S: Lifecycle> TabSpec<S> {
    /// Whether an entity in `status` belongs on this tab.
    #[must_use]
    pub fn admits(&self, status: S) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&status)
    }
}

/// Static configuration of a list screen.
#[derive(Debug)]
pub struct ScreenConfig<S: 'static> {
    /// Stable identifier, used in configuration files.
    pub name: &'static str,
    /// Heading shown above the table.
    pub title: &'static str,
    /// Tab table; index 0 is conventionally "All".
    pub tabs: &'static [TabSpec<S>],
    /// Fields matched by free-text search.
    pub search_fields: &'static [&'static str],
    /// Field behind the secondary categorical filter, if the screen has one.
    pub category_field: Option<&'static str>,
}

impl<S: Lifecycle> ScreenConfig<S> {
    /// Looks up a tab by index.
    #[must_use]
    pub fn tab(&self, index: usize) -> Option<&TabSpec<S>> {
        self.tabs.get(index)
    }
}

/// Admin: user management.
pub static ADMIN_USERS: ScreenConfig<UserStatus> = ScreenConfig {
    name: "admin-users",
    title: "User Management",
    tabs: &[
        TabSpec { label: "All", statuses: &[] },
        TabSpec { label: "Active", statuses: &[UserStatus::Active] },
        TabSpec { label: "Inactive", statuses: &[UserStatus::Inactive] },
        TabSpec { label: "Suspended", statuses: &[UserStatus::Suspended] },
    ],
    search_fields: &["full_name", "email"],
    category_field: Some("role"),
};

/// Admin: company verification.
pub static ADMIN_COMPANIES: ScreenConfig<CompanyStatus> = ScreenConfig {
    name: "admin-companies",
    title: "Companies",
    tabs: &[
        TabSpec { label: "All", statuses: &[] },
        TabSpec { label: "Pending", statuses: &[CompanyStatus::Pending] },
        TabSpec { label: "Verified", statuses: &[CompanyStatus::Verified] },
        TabSpec { label: "Suspended", statuses: &[CompanyStatus::Suspended] },
    ],
    search_fields: &["name", "email", "location"],
    category_field: Some("industry"),
};

/// Admin: moderation of every job posting.
pub static ADMIN_JOBS: ScreenConfig<JobStatus> = ScreenConfig {
    name: "admin-jobs",
    title: "Job Moderation",
    tabs: &[
        TabSpec { label: "All", statuses: &[] },
        TabSpec { label: "Draft", statuses: &[JobStatus::Draft] },
        TabSpec { label: "Active", statuses: &[JobStatus::Active] },
        TabSpec { label: "Paused", statuses: &[JobStatus::Paused] },
        TabSpec { label: "Closed", statuses: &[JobStatus::Closed] },
        TabSpec { label: "Archived", statuses: &[JobStatus::Archived] },
    ],
    search_fields: &["title", "company", "location"],
    category_field: Some("job_type"),
};

/// Recruiter: own job postings.
pub static RECRUITER_JOBS: ScreenConfig<JobStatus> = ScreenConfig {
    name: "recruiter-jobs",
    title: "My Job Postings",
    tabs: &[
        TabSpec { label: "All", statuses: &[] },
        TabSpec { label: "Active", statuses: &[JobStatus::Active] },
        TabSpec { label: "Drafts", statuses: &[JobStatus::Draft] },
        TabSpec { label: "Paused", statuses: &[JobStatus::Paused] },
        TabSpec { label: "Closed", statuses: &[JobStatus::Closed, JobStatus::Archived] },
    ],
    search_fields: &["title", "location"],
    category_field: Some("job_type"),
};

/// Recruiter: candidate pipeline.
pub static RECRUITER_CANDIDATES: ScreenConfig<ApplicationStatus> = ScreenConfig {
    name: "recruiter-candidates",
    title: "Candidates",
    tabs: &[
        TabSpec { label: "All", statuses: &[] },
        TabSpec { label: "New", statuses: &[ApplicationStatus::Pending] },
        TabSpec { label: "Reviewed", statuses: &[ApplicationStatus::Reviewed] },
        TabSpec { label: "Shortlisted", statuses: &[ApplicationStatus::Shortlisted] },
        TabSpec { label: "Interview", statuses: &[ApplicationStatus::Interview] },
        TabSpec { label: "Hired", statuses: &[ApplicationStatus::Hired] },
        TabSpec { label: "Rejected", statuses: &[ApplicationStatus::Rejected] },
    ],
    search_fields: &["candidate_name", "email", "job_title"],
    category_field: Some("job_title"),
};

/// Applicant: own applications.
pub static APPLICANT_APPLICATIONS: ScreenConfig<ApplicationStatus> = ScreenConfig {
    name: "applicant-applications",
    title: "My Applications",
    tabs: &[
        TabSpec { label: "All", statuses: &[] },
        TabSpec {
            label: "In Progress",
            statuses: &[
                ApplicationStatus::Pending,
                ApplicationStatus::Reviewed,
                ApplicationStatus::Shortlisted,
            ],
        },
        TabSpec { label: "Interviews", statuses: &[ApplicationStatus::Interview] },
        TabSpec { label: "Offers", statuses: &[ApplicationStatus::Hired] },
        TabSpec { label: "Rejected", statuses: &[ApplicationStatus::Rejected] },
    ],
    search_fields: &["job_title"],
    category_field: None,
};

/// Recruiter: interview calendar list.
pub static RECRUITER_INTERVIEWS: ScreenConfig<InterviewStatus> = ScreenConfig {
    name: "recruiter-interviews",
    title: "Interviews",
    tabs: &[
        TabSpec { label: "All", statuses: &[] },
        TabSpec {
            label: "Upcoming",
            statuses: &[InterviewStatus::Scheduled, InterviewStatus::Rescheduled],
        },
        TabSpec { label: "Completed", statuses: &[InterviewStatus::Completed] },
        TabSpec { label: "Cancelled", statuses: &[InterviewStatus::Cancelled] },
    ],
    search_fields: &["candidate_name", "job_title", "interviewer"],
    category_field: Some("mode"),
};

/// Admin: broadcast notifications.
pub static ADMIN_NOTIFICATIONS: ScreenConfig<NotificationStatus> = ScreenConfig {
    name: "admin-notifications",
    title: "Notifications",
    tabs: &[
        TabSpec { label: "All", statuses: &[] },
        TabSpec { label: "Drafts", statuses: &[NotificationStatus::Draft] },
        TabSpec { label: "Scheduled", statuses: &[NotificationStatus::Scheduled] },
        TabSpec { label: "Sent", statuses: &[NotificationStatus::Sent] },
        TabSpec { label: "Failed", statuses: &[NotificationStatus::Failed] },
    ],
    search_fields: &["title"],
    category_field: Some("audience"),
};

/// Names of every built-in screen, as accepted by the `screen` config key.
pub const SCREEN_NAMES: &[&str] = &[
    "admin-users",
    "admin-companies",
    "admin-jobs",
    "recruiter-jobs",
    "recruiter-candidates",
    "applicant-applications",
    "recruiter-interviews",
    "admin-notifications",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed<S: Lifecycle>(screen: &ScreenConfig<S>) {
        assert!(SCREEN_NAMES.contains(&screen.name));
        let first = screen.tab(0).unwrap();
        assert!(first.statuses.is_empty(), "{} tab 0 must be All", screen.name);
        assert!(!screen.search_fields.is_empty());
        for tab in &screen.tabs[1..] {
            assert!(!tab.statuses.is_empty(), "{} tab {}", screen.name, tab.label);
        }
    }

    #[test]
    fn built_in_screens_are_well_formed() {
        well_formed(&ADMIN_USERS);
        well_formed(&ADMIN_COMPANIES);
        well_formed(&ADMIN_JOBS);
        well_formed(&RECRUITER_JOBS);
        well_formed(&RECRUITER_CANDIDATES);
        well_formed(&APPLICANT_APPLICATIONS);
        well_formed(&RECRUITER_INTERVIEWS);
        well_formed(&ADMIN_NOTIFICATIONS);
    }

    #[test]
    fn all_tab_admits_every_status() {
        let all = ADMIN_JOBS.tab(0).unwrap();
        assert!(JobStatus::ALL.iter().all(|s| all.admits(*s)));
    }

    #[test]
    fn out_of_range_tab_is_none() {
        assert!(ADMIN_USERS.tab(4).is_none());
    }
}
