//! Domain layer for hireflow.
//!
//! This module contains the entity and status model and the transition engine,
//! independent of screens, backends or rendering.
//!
//! # Organization
//!
//! - [`action`]: Named dashboard actions and actor roles
//! - [`entity`]: Entity records and the [`Entity`] trait
//! - [`error`]: Error types and result aliases
//! - [`status`]: Status enumerations and transition tables
//! - [`transition`]: Transition validation

pub mod action;
pub mod entity;
pub mod error;
pub mod status;
pub mod transition;

pub use action::{ActionName, Actor};
pub use entity::{
    time_ago, Application, Company, Entity, Interview, Job, Notification, Record, User,
};
pub use error::{PortalError, Result};
pub use status::{
    is_terminal, valid_statuses, ApplicationStatus, CompanyStatus, EntityKind, InterviewStatus,
    JobStatus, Lifecycle, NotificationStatus, UserStatus,
};
pub use transition::{check_transition, request_transition, transition_table};
