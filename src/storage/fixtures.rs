//! Built-in sample data.
//!
//! Used when no seed file exists yet, and by tests. Timestamps are fixed so
//! that rendered ages are reproducible.

use crate::domain::entity::{Application, Company, Interview, Job, Notification, User};
use crate::domain::status::{
    ApplicationStatus, CompanyStatus, InterviewStatus, JobStatus, NotificationStatus, UserStatus,
};
use crate::storage::models::{SeedData, SEED_FORMAT_VERSION};

const EPOCH: i64 = 1_700_000_000;
const DAY: i64 = 86_400;

fn user(n: u32, status: UserStatus, name: &str, role: &str) -> User {
    let handle = name.to_lowercase().replace(' ', ".");
    User {
        id: format!("u-{n}"),
        created_at: EPOCH - i64::from(n) * DAY,
        status,
        full_name: name.to_string(),
        email: format!("{handle}@example.com"),
        role: role.to_string(),
        phone: None,
    }
}

fn job(n: u32, status: JobStatus, title: &str, company: &str, location: &str, job_type: &str) -> Job {
    Job {
        id: format!("j-{n}"),
        created_at: EPOCH - i64::from(n) * 2 * DAY,
        status,
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        job_type: job_type.to_string(),
        salary: None,
        applicants: n * 7 % 40,
    }
}

fn application(n: u32, status: ApplicationStatus, candidate: &str, job: &Job) -> Application {
    let handle = candidate.to_lowercase().replace(' ', ".");
    Application {
        id: format!("a-{n}"),
        created_at: EPOCH - i64::from(n) * 3600,
        status,
        candidate_name: candidate.to_string(),
        email: format!("{handle}@mail.com"),
        job_id: job.id.clone(),
        job_title: job.title.clone(),
        experience: Some(format!("{} years", n % 8 + 1)),
    }
}

fn company(n: u32, status: CompanyStatus, name: &str, industry: &str, location: &str) -> Company {
    let domain = name.to_lowercase().replace(' ', "");
    Company {
        id: format!("c-{n}"),
        created_at: EPOCH - i64::from(n) * 5 * DAY,
        status,
        name: name.to_string(),
        industry: industry.to_string(),
        location: location.to_string(),
        email: format!("hr@{domain}.com"),
    }
}

impl SeedData {
    /// The sample collections shown by a fresh install.
    #[must_use]
    pub fn builtin() -> Self {
        let jobs = vec![
            job(1, JobStatus::Active, "Senior Frontend Developer", "TechCorp", "San Francisco", "full-time"),
            job(2, JobStatus::Active, "Backend Engineer", "TechCorp", "Remote", "remote"),
            job(3, JobStatus::Draft, "Product Designer", "Designly", "New York", "full-time"),
            job(4, JobStatus::Paused, "Data Analyst", "Numbers Inc", "Chicago", "contract"),
            job(5, JobStatus::Closed, "QA Intern", "TechCorp", "Austin", "internship"),
            job(6, JobStatus::Archived, "Support Specialist", "HelpDesk", "Remote", "part-time"),
            job(7, JobStatus::Active, "DevOps Engineer", "CloudNine", "Seattle", "full-time"),
        ];

        let applications = vec![
            application(1, ApplicationStatus::Pending, "John Smith", &jobs[0]),
            application(2, ApplicationStatus::Reviewed, "Sarah Johnson", &jobs[0]),
            application(3, ApplicationStatus::Shortlisted, "Mike Chen", &jobs[1]),
            application(4, ApplicationStatus::Interview, "Emily Davis", &jobs[1]),
            application(5, ApplicationStatus::Hired, "David Wilson", &jobs[6]),
            application(6, ApplicationStatus::Rejected, "Lisa Brown", &jobs[3]),
            application(7, ApplicationStatus::Pending, "Tom Garcia", &jobs[6]),
        ];

        let interviews = vec![
            Interview {
                id: "i-1".to_string(),
                created_at: EPOCH - DAY,
                status: InterviewStatus::Scheduled,
                candidate_name: "Emily Davis".to_string(),
                job_title: "Backend Engineer".to_string(),
                interviewer: "Alex Morgan".to_string(),
                mode: "video".to_string(),
                scheduled_for: EPOCH + 2 * DAY,
            },
            Interview {
                id: "i-2".to_string(),
                created_at: EPOCH - 3 * DAY,
                status: InterviewStatus::Completed,
                candidate_name: "David Wilson".to_string(),
                job_title: "DevOps Engineer".to_string(),
                interviewer: "Priya Shah".to_string(),
                mode: "onsite".to_string(),
                scheduled_for: EPOCH - DAY,
            },
            Interview {
                id: "i-3".to_string(),
                created_at: EPOCH - 2 * DAY,
                status: InterviewStatus::Rescheduled,
                candidate_name: "Mike Chen".to_string(),
                job_title: "Backend Engineer".to_string(),
                interviewer: "Alex Morgan".to_string(),
                mode: "phone".to_string(),
                scheduled_for: EPOCH + 4 * DAY,
            },
            Interview {
                id: "i-4".to_string(),
                created_at: EPOCH - 6 * DAY,
                status: InterviewStatus::Cancelled,
                candidate_name: "Lisa Brown".to_string(),
                job_title: "Data Analyst".to_string(),
                interviewer: "Sam Reed".to_string(),
                mode: "video".to_string(),
                scheduled_for: EPOCH - 4 * DAY,
            },
        ];

        let notifications = vec![
            Notification {
                id: "n-1".to_string(),
                created_at: EPOCH - 2 * DAY,
                status: NotificationStatus::Sent,
                title: "Platform maintenance completed".to_string(),
                audience: "all".to_string(),
                channel: "email".to_string(),
                scheduled_for: None,
            },
            Notification {
                id: "n-2".to_string(),
                created_at: EPOCH - DAY,
                status: NotificationStatus::Scheduled,
                title: "New recruiter tools".to_string(),
                audience: "recruiters".to_string(),
                channel: "in-app".to_string(),
                scheduled_for: Some(EPOCH + DAY),
            },
            Notification {
                id: "n-3".to_string(),
                created_at: EPOCH - 3600,
                status: NotificationStatus::Draft,
                title: "Profile completion reminder".to_string(),
                audience: "applicants".to_string(),
                channel: "push".to_string(),
                scheduled_for: None,
            },
            Notification {
                id: "n-4".to_string(),
                created_at: EPOCH - 4 * DAY,
                status: NotificationStatus::Failed,
                title: "Quarterly report".to_string(),
                audience: "admins".to_string(),
                channel: "email".to_string(),
                scheduled_for: Some(EPOCH - 3 * DAY),
            },
        ];

        Self {
            version: SEED_FORMAT_VERSION,
            users: vec![
                user(1, UserStatus::Active, "John Smith", "applicant"),
                user(2, UserStatus::Active, "Sarah Johnson", "applicant"),
                user(3, UserStatus::Inactive, "Mike Chen", "applicant"),
                user(4, UserStatus::Active, "Jane Cooper", "recruiter"),
                user(5, UserStatus::Suspended, "Robert Fox", "recruiter"),
                user(6, UserStatus::Active, "Admin User", "admin"),
            ],
            jobs,
            applications,
            companies: vec![
                company(1, CompanyStatus::Verified, "TechCorp", "Technology", "San Francisco"),
                company(2, CompanyStatus::Pending, "Designly", "Design", "New York"),
                company(3, CompanyStatus::Verified, "Numbers Inc", "Finance", "Chicago"),
                company(4, CompanyStatus::Suspended, "HelpDesk", "Services", "Remote"),
                company(5, CompanyStatus::Pending, "CloudNine", "Technology", "Seattle"),
            ],
            interviews,
            notifications,
        }
    }
}
