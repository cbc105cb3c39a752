//! Application hook for dynamic constraints and custom patterns

use crate::subject::Subject;

/// Decides constraints the analyzer cannot decide on its own
///
/// Used by [`Constraint::Dynamic`](super::Constraint::Dynamic) and by
/// [`PatternType::Custom`](crate::PatternType::Custom) patterns. Handlers
/// receive the subject as supplied, including `None`, and should fail closed.
///
/// # Example Implementation
///
/// ```
/// use authz_analyzer::{analyzer, DynamicResourceHandler, Principal};
///
/// struct OwnerHandler;
///
/// impl DynamicResourceHandler<Principal> for OwnerHandler {
///     fn is_allowed(&self, name: &str, meta: Option<&str>, subject: Option<&Principal>) -> bool {
///         name == "owner" && subject.zip(meta).is_some_and(|(s, owner)| s.id == owner)
///     }
///
///     fn check_permission(
///         &self,
///         value: &str,
///         _meta: Option<&str>,
///         subject: Option<&Principal>,
///     ) -> bool {
///         analyzer::has_role(subject, "admin") && value.starts_with("printers.")
///     }
/// }
/// ```
pub trait DynamicResourceHandler<S: Subject + ?Sized> {
    /// Decides a named dynamic constraint
    fn is_allowed(&self, name: &str, meta: Option<&str>, subject: Option<&S>) -> bool;

    /// Decides a custom permission pattern
    fn check_permission(&self, value: &str, meta: Option<&str>, subject: Option<&S>) -> bool;
}
