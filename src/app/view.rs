//! Filter, search and tab engine.
//!
//! A [`ViewSpec`] holds what the user picked (active tab, status and category
//! filters, search text). [`View::compile`] checks it against a screen's static
//! configuration and produces a [`View`], a composite predicate that is the
//! conjunction of:
//!
//! 1. the tab's status predicate (never overridden by the filters),
//! 2. the optional status equality filter,
//! 3. the optional category equality filter,
//! 4. a case-insensitive substring search over the screen's search fields.
//!
//! [`apply_view`] keeps source order and never clones entities.

use crate::app::screens::{ScreenConfig, TabSpec};
use crate::domain::entity::Entity;
use crate::domain::error::{PortalError, Result};
use crate::domain::status::Lifecycle;

/// Filter value that disables a predicate.
pub const ALL_SENTINEL: &str = "all";

/// User-selected view parameters for one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSpec<S> {
    /// Active tab index; 0 is "All".
    pub tab: usize,
    /// Optional status equality filter.
    pub status_filter: Option<S>,
    /// Optional equality filter on the screen's category field.
    pub category_filter: Option<String>,
    /// Free-text search, matched verbatim including surrounding spaces;
    /// empty matches everything.
    pub search_query: String,
}

impl<S> Default for ViewSpec<S> {
    fn default() -> Self {
        Self {
            tab: 0,
            status_filter: None,
            category_filter: None,
            search_query: String::new(),
        }
    }
}

impl<S: Lifecycle> ViewSpec<S> {
    /// Parses a status filter value; the `"all"` sentinel (or blank) disables it.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::UnknownStatus`] for a name that is neither the
    /// sentinel nor a status of `S`.
    pub fn parse_status_filter(value: &str) -> Result<Option<S>> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(None);
        }
        S::parse(value).map(Some)
    }

    /// Parses a category filter value; the `"all"` sentinel (or blank) disables it.
    #[must_use]
    pub fn parse_category_filter(value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) {
            None
        } else {
            Some(value.to_string())
        }
    }
}

/// A compiled, ready-to-apply view over one screen.
#[derive(Debug)]
pub struct View<'s, S: 'static> {
    tab: &'s TabSpec<S>,
    status_filter: Option<S>,
    category: Option<(&'static str, String)>,
    needle: Option<String>,
    search_fields: &'static [&'static str],
}

impl<'s, S: Lifecycle> View<'s, S> {
    /// Validates `spec` against `screen` and builds the composite predicate.
    ///
    /// # Errors
    ///
    /// - [`PortalError::UnknownTab`] when `spec.tab` is out of range.
    /// - [`PortalError::Config`] when a category filter is set on a screen
    ///   that has no category field.
    pub fn compile(screen: &'s ScreenConfig<S>, spec: &ViewSpec<S>) -> Result<Self> {
        let tab = screen.tab(spec.tab).ok_or(PortalError::UnknownTab {
            screen: screen.name,
            tab: spec.tab,
        })?;

        let category = match (&spec.category_filter, screen.category_field) {
            (None, _) => None,
            (Some(value), Some(field)) => Some((field, value.clone())),
            (Some(_), None) => {
                return Err(PortalError::Config(format!(
                    "screen {} has no category filter",
                    screen.name
                )))
            }
        };

        let query = spec.search_query.as_str();
        let needle = (!query.is_empty()).then(|| query.to_lowercase());

        Ok(Self {
            tab,
            status_filter: spec.status_filter,
            category,
            needle,
            search_fields: screen.search_fields,
        })
    }

    /// Whether `entity` passes every predicate of the view.
    pub fn matches<E: Entity<Status = S>>(&self, entity: &E) -> bool {
        let status = entity.status();
        if !self.tab.admits(status) {
            return false;
        }
        if self.status_filter.is_some_and(|wanted| wanted != status) {
            return false;
        }
        if let Some((field, wanted)) = &self.category {
            // missing field is a non-match
            let Some(value) = entity.field(field) else {
                return false;
            };
            if !value.eq_ignore_ascii_case(wanted) {
                return false;
            }
        }
        match &self.needle {
            None => true,
            Some(needle) => self.search_fields.iter().any(|name| {
                entity
                    .field(name)
                    .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
            }),
        }
    }
}

/// Applies `view` to `items`, keeping source order.
pub fn apply_view<'a, E, I>(items: I, view: &View<'_, E::Status>) -> Vec<&'a E>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let visible: Vec<&E> = items.into_iter().filter(|e| view.matches(*e)).collect();
    tracing::debug!(visible = visible.len(), "view applied");
    visible
}

/// Counts the raw collection per tab, ignoring filters and search.
pub fn tab_counts<E: Entity>(items: &[E], screen: &ScreenConfig<E::Status>) -> Vec<usize> {
    screen
        .tabs
        .iter()
        .map(|tab| items.iter().filter(|e| tab.admits(e.status())).count())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::{ADMIN_JOBS, ADMIN_USERS, APPLICANT_APPLICATIONS};
    use crate::domain::entity::{Job, User};
    use crate::domain::status::{JobStatus, UserStatus};
    use rstest::rstest;
    use std::collections::HashSet;

    fn user(id: &str, name: &str, email: &str, role: &str, status: UserStatus) -> User {
        User {
            id: id.to_string(),
            created_at: 0,
            status,
            full_name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            phone: None,
        }
    }

    fn users() -> Vec<User> {
        vec![
            user("u1", "John Carter", "JOHN@x.com", "applicant", UserStatus::Active),
            user("u2", "Jane Doe", "jane@x.com", "recruiter", UserStatus::Suspended),
            user("u3", "Sam Lee", "sam@x.com", "admin", UserStatus::Inactive),
            user("u4", "Johnny Park", "jp@x.com", "recruiter", UserStatus::Active),
        ]
    }

    fn job(id: &str, status: JobStatus) -> Job {
        Job {
            id: id.to_string(),
            created_at: 0,
            status,
            title: format!("Job {id}"),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: "full-time".to_string(),
            salary: None,
            applicants: 0,
        }
    }

    fn ids<E: Entity>(items: &[&E]) -> Vec<String> {
        items.iter().map(|e| e.id().to_string()).collect()
    }

    #[test]
    fn active_tab_selects_only_active_jobs() {
        let jobs = vec![
            job("j1", JobStatus::Draft),
            job("j2", JobStatus::Active),
            job("j3", JobStatus::Closed),
        ];
        let spec = ViewSpec { tab: 2, ..ViewSpec::default() };
        let view = View::compile(&ADMIN_JOBS, &spec).unwrap();
        assert_eq!(ids(&apply_view(&jobs, &view)), ["j2"]);
    }

    #[test]
    fn search_is_case_insensitive_over_any_field() {
        let users = users();
        let spec = ViewSpec { search_query: "john".to_string(), ..ViewSpec::default() };
        let view = View::compile(&ADMIN_USERS, &spec).unwrap();
        assert_eq!(ids(&apply_view(&users, &view)), ["u1", "u4"]);
    }

    #[rstest]
    #[case("john ", &["u1"])]
    #[case(" john", &[])]
    #[case(" ", &["u1", "u2", "u3", "u4"])]
    fn search_spaces_are_significant(#[case] query: &str, #[case] expected: &[&str]) {
        let users = users();
        let spec = ViewSpec { search_query: query.to_string(), ..ViewSpec::default() };
        let view = View::compile(&ADMIN_USERS, &spec).unwrap();
        assert_eq!(ids(&apply_view(&users, &view)), expected);
    }

    #[test]
    fn tab_predicate_is_not_overridden_by_status_filter() {
        let users = users();
        // Suspended tab with an "active" status filter can never match.
        let spec = ViewSpec {
            tab: 3,
            status_filter: Some(UserStatus::Active),
            ..ViewSpec::default()
        };
        let view = View::compile(&ADMIN_USERS, &spec).unwrap();
        assert!(apply_view(&users, &view).is_empty());
    }

    #[test]
    fn category_filter_matches_field_value() {
        let users = users();
        let spec = ViewSpec {
            category_filter: ViewSpec::<UserStatus>::parse_category_filter("Recruiter"),
            ..ViewSpec::default()
        };
        let view = View::compile(&ADMIN_USERS, &spec).unwrap();
        assert_eq!(ids(&apply_view(&users, &view)), ["u2", "u4"]);
    }

    #[rstest]
    #[case("all")]
    #[case("ALL")]
    #[case("  ")]
    fn sentinel_disables_filters(#[case] value: &str) {
        assert_eq!(ViewSpec::<UserStatus>::parse_status_filter(value).unwrap(), None);
        assert_eq!(ViewSpec::<UserStatus>::parse_category_filter(value), None);
    }

    #[test]
    fn unknown_status_filter_is_rejected() {
        let err = ViewSpec::<UserStatus>::parse_status_filter("banned").unwrap_err();
        assert_eq!(err.reason(), "unknown-status");
    }

    #[test]
    fn out_of_range_tab_is_rejected() {
        let spec = ViewSpec::<UserStatus> { tab: 9, ..ViewSpec::default() };
        let err = View::compile(&ADMIN_USERS, &spec).unwrap_err();
        assert!(matches!(err, PortalError::UnknownTab { tab: 9, .. }));
    }

    #[test]
    fn category_filter_without_field_is_rejected() {
        let spec = ViewSpec {
            category_filter: Some("x".to_string()),
            ..ViewSpec::default()
        };
        assert!(View::compile(&APPLICANT_APPLICATIONS, &spec).is_err());
    }

    #[test]
    fn missing_search_field_is_a_non_match() {
        let mut users = users();
        users.truncate(1);
        // "phone" is unset on every user; searching a digit finds nothing.
        let spec = ViewSpec { search_query: "555".to_string(), ..ViewSpec::default() };
        let view = View::compile(&ADMIN_USERS, &spec).unwrap();
        assert!(apply_view(&users, &view).is_empty());
    }

    #[rstest]
    #[case(ViewSpec::default())]
    #[case(ViewSpec { tab: 1, ..ViewSpec::default() })]
    #[case(ViewSpec { search_query: "J".to_string(), ..ViewSpec::default() })]
    #[case(ViewSpec {
        tab: 1,
        category_filter: Some("recruiter".to_string()),
        search_query: "park".to_string(),
        ..ViewSpec::default()
    })]
    fn view_conserves_ids_and_is_idempotent(#[case] spec: ViewSpec<UserStatus>) {
        let users = users();
        let view = View::compile(&ADMIN_USERS, &spec).unwrap();
        let once = apply_view(&users, &view);

        let source: HashSet<&str> = users.iter().map(User::id).collect();
        let seen: HashSet<&str> = once.iter().map(|u| u.id()).collect();
        assert_eq!(seen.len(), once.len(), "duplicated id");
        assert!(seen.is_subset(&source), "introduced id");

        let twice = apply_view(once.iter().copied(), &view);
        assert_eq!(ids(&twice), ids(&once));
    }

    #[test]
    fn tab_counts_use_raw_collection() {
        let users = users();
        assert_eq!(tab_counts(&users, &ADMIN_USERS), vec![4, 2, 1, 1]);
    }
}
