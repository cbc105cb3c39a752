//! Role requirement entries with `!` negation

use std::fmt;

const NEGATION_PREFIX: char = '!';

/// A single parsed entry of a role restriction
///
/// `"admin"` requires the role to be held; `"!editor"` requires it to be
/// absent. Only the first `!` is treated as negation, so `"!!x"` requires the
/// role `"!x"` to be absent.
///
/// # Examples
///
/// ```
/// use authz_analyzer::RoleRequirement;
///
/// let required = RoleRequirement::parse("admin");
/// assert!(!required.is_negated());
/// assert!(required.is_satisfied_by(["admin", "editor"]));
///
/// let forbidden = RoleRequirement::parse("!editor");
/// assert!(forbidden.is_negated());
/// assert_eq!(forbidden.name(), "editor");
/// assert!(!forbidden.is_satisfied_by(["admin", "editor"]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleRequirement<'a> {
    name: &'a str,
    negated: bool,
}

impl<'a> RoleRequirement<'a> {
    pub fn parse(entry: &'a str) -> Self {
        match entry.strip_prefix(NEGATION_PREFIX) {
            Some(name) => Self {
                name,
                negated: true,
            },
            None => Self {
                name: entry,
                negated: false,
            },
        }
    }

    /// Role name with any negation prefix removed
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Evaluates the entry against the names of the roles a subject holds
    pub fn is_satisfied_by<I, N>(&self, held: I) -> bool
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let held = held.into_iter().any(|n| n.as_ref() == self.name);
        held != self.negated
    }
}

impl fmt::Display for RoleRequirement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}{}", NEGATION_PREFIX, self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}
