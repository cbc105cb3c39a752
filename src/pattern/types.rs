//! Pattern types and compilation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AuthzError, Result};

/// How a permission pattern is compared against a subject's permissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Exact, case-sensitive equality with a permission value
    #[default]
    Equality,
    /// Whole-string regular expression match against a permission value
    Regex,
    /// Delegated to the application's dynamic resource handler
    Custom,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Equality => "equality",
            PatternType::Regex => "regex",
            PatternType::Custom => "custom",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiled regular expression matched against entire permission values
///
/// The source expression is wrapped as `^(?:expr)$`, so `.*\.edit` matches
/// `"printers.edit"` but `edit` alone does not.
///
/// Expressions use the syntax of the `regex` crate. Lookaround and
/// backreferences are not supported and are rejected with
/// `AuthzError::InvalidPattern`, so patterns written for backtracking engines
/// may need rewriting.
///
/// # Examples
///
/// ```
/// use authz_analyzer::PermissionPattern;
///
/// let pattern = PermissionPattern::new(r".*\.edit").unwrap();
/// assert!(pattern.is_match("printers.edit"));
/// assert!(!pattern.is_match("printers.edit.all"));
/// assert_eq!(pattern.as_str(), r".*\.edit");
/// ```
#[derive(Debug, Clone)]
pub struct PermissionPattern {
    source: String,
    regex: Regex,
}

impl PermissionPattern {
    /// Compiles a pattern from a regular expression
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::InvalidPattern` if the expression does not compile
    /// on its own, before anchoring
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let source = pattern.into();
        let invalid = |e: regex::Error| AuthzError::InvalidPattern {
            pattern: source.clone(),
            reason: e.to_string(),
        };

        // An unbalanced `)` in the source would otherwise close the anchoring group
        Regex::new(&source).map_err(invalid)?;
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(invalid)?;

        Ok(Self { source, regex })
    }

    /// Builds a pattern matching exactly `value`, with metacharacters escaped
    ///
    /// Only fails when the escaped value exceeds the regex size limit.
    pub fn literal(value: &str) -> Result<Self> {
        Self::new(regex::escape(value))
    }

    /// Returns the source expression as supplied by the caller
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Checks whether `value` matches the pattern in its entirety
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl FromStr for PermissionPattern {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for PermissionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl PartialEq for PermissionPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PermissionPattern {}
