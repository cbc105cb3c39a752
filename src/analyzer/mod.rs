//! # Analyzer
//!
//! Pure decision functions over a subject's roles and permissions.
//!
//! Every function takes the subject as `Option<&S>` and fails closed: an
//! absent subject, an absent or empty list, or a list holding only absent
//! entries all produce `false` (or an empty `Vec`). Nothing here logs,
//! caches, or mutates its inputs, so the functions are safe to call from any
//! number of threads at once.
//!
//! ## Role checks
//!
//! | Function | `!` prefix | Empty requirement |
//! |----------|------------|-------------------|
//! | [`check_role`] | negation | `false` |
//! | [`has_all_roles`] | literal character | `false` |
//! | [`has_role`] | literal character | n/a |
//!
//! ## Permission checks
//!
//! - [`check_regex_pattern`]: whole-string regex match
//! - [`check_pattern_equality`]: exact, case-sensitive equality

mod requirement;

pub use requirement::RoleRequirement;

use crate::pattern::PermissionPattern;
use crate::subject::{Permission, Role, Subject};

/// Iterates the present entries of an optional list, skipping absent ones
fn present<'a, T>(entries: Option<&'a [Option<T>]>) -> impl Iterator<Item = &'a T> + Clone {
    entries.into_iter().flatten().flatten()
}

/// Checks a role restriction where entries may be negated with `!`
///
/// Every entry must hold: `"admin"` requires a role named `admin`,
/// `"!editor"` requires that no role is named `editor`. An empty restriction
/// is never satisfied.
///
/// # Examples
///
/// ```
/// use authz_analyzer::{analyzer, Principal};
///
/// let subject = Principal::new("user:alice").with_roles(["admin", "editor"]);
///
/// assert!(analyzer::check_role(Some(&subject), &["admin", "editor"]));
/// assert!(!analyzer::check_role(Some(&subject), &["admin", "!editor"]));
/// assert!(analyzer::check_role(Some(&subject), &["admin", "!manager"]));
/// assert!(!analyzer::check_role(Some(&subject), &[] as &[&str]));
/// ```
pub fn check_role<S, R>(subject: Option<&S>, required_role_names: &[R]) -> bool
where
    S: Subject + ?Sized,
    R: AsRef<str>,
{
    let Some(subject) = subject else {
        return false;
    };

    let held = present(subject.roles()).map(Role::name);
    if held.clone().next().is_none() || required_role_names.is_empty() {
        return false;
    }

    required_role_names
        .iter()
        .map(|entry| RoleRequirement::parse(entry.as_ref()))
        .all(|requirement| requirement.is_satisfied_by(held.clone()))
}

/// Checks several role restrictions, any one of which grants access
///
/// Each group is evaluated with [`check_role`]. No groups means no access.
pub fn check_role_groups<S, G, R>(subject: Option<&S>, groups: &[G]) -> bool
where
    S: Subject + ?Sized,
    G: AsRef<[R]>,
    R: AsRef<str>,
{
    groups
        .iter()
        .any(|group| check_role(subject, group.as_ref()))
}

/// Returns the names of every present role, in list order
///
/// Never fails; an absent subject or role list yields an empty `Vec`.
pub fn role_names<S>(subject: Option<&S>) -> Vec<String>
where
    S: Subject + ?Sized,
{
    subject
        .map(|s| present(s.roles()).map(|r| r.name().to_string()).collect())
        .unwrap_or_default()
}

/// Checks whether the subject holds a role named exactly `role_name`
pub fn has_role<S>(subject: Option<&S>, role_name: &str) -> bool
where
    S: Subject + ?Sized,
{
    subject.is_some_and(|s| present(s.roles()).any(|r| r.name() == role_name))
}

/// Checks whether the subject holds every role in `role_names`
///
/// Unlike [`check_role`], entries are compared literally: `"!editor"` only
/// matches a role whose name is `!editor`.
pub fn has_all_roles<S, R>(subject: Option<&S>, role_names: &[R]) -> bool
where
    S: Subject + ?Sized,
    R: AsRef<str>,
{
    let Some(subject) = subject else {
        return false;
    };

    let held = present(subject.roles()).map(Role::name);
    if held.clone().next().is_none() || role_names.is_empty() {
        return false;
    }

    role_names
        .iter()
        .all(|wanted| held.clone().any(|name| name == wanted.as_ref()))
}

/// Checks whether any present permission fully matches `pattern`
pub fn check_regex_pattern<S>(subject: Option<&S>, pattern: Option<&PermissionPattern>) -> bool
where
    S: Subject + ?Sized,
{
    let (Some(subject), Some(pattern)) = (subject, pattern) else {
        return false;
    };

    present(subject.permissions()).any(|p| pattern.is_match(p.value()))
}

/// Checks whether any present permission equals `value` exactly
pub fn check_pattern_equality<S>(subject: Option<&S>, value: Option<&str>) -> bool
where
    S: Subject + ?Sized,
{
    let (Some(subject), Some(value)) = (subject, value) else {
        return false;
    };

    present(subject.permissions()).any(|p| p.value() == value)
}
