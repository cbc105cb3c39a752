//! Declarative constraint definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthzError, Result};
use crate::pattern::PatternType;

/// An access constraint declared on a protected operation
///
/// Constraints are plain data; a [`ConstraintEvaluator`](super::ConstraintEvaluator)
/// decides them against a subject. They load from JSON with an internal
/// `"type"` tag:
///
/// ```
/// use authz_analyzer::Constraint;
///
/// let constraint = Constraint::from_json(
///     r#"{"type": "restrict", "groups": [["admin"], ["editor", "!banned"]]}"#,
/// )
/// .unwrap();
/// assert_eq!(constraint.kind(), "restrict");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// Grants access to any present subject
    SubjectPresent,

    /// Grants access only when there is no subject
    SubjectNotPresent,

    /// Grants access when any group of role entries is satisfied
    Restrict { groups: Vec<Vec<String>> },

    /// Grants access when a permission matches `value`
    Pattern {
        value: String,
        #[serde(default)]
        pattern_type: PatternType,
        /// Flips the outcome for a present subject
        #[serde(default)]
        invert: bool,
        /// Passed through to the handler for custom patterns
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meta: Option<String>,
    },

    /// Delegates the decision to the application's handler
    Dynamic {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meta: Option<String>,
    },
}

impl Constraint {
    /// Restriction with a single group of role entries
    pub fn restrict<I, N>(roles: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Constraint::Restrict {
            groups: vec![roles.into_iter().map(Into::into).collect()],
        }
    }

    /// Non-inverted pattern constraint
    pub fn pattern(value: impl Into<String>, pattern_type: PatternType) -> Self {
        Constraint::Pattern {
            value: value.into(),
            pattern_type,
            invert: false,
            meta: None,
        }
    }

    pub fn dynamic(name: impl Into<String>, meta: Option<String>) -> Self {
        Constraint::Dynamic {
            name: name.into(),
            meta,
        }
    }

    /// Parses and validates a constraint from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let constraint: Constraint = serde_json::from_str(json)?;
        constraint.validate()?;
        Ok(constraint)
    }

    /// Parses and validates a list of constraints from a JSON array
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        let constraints: Vec<Constraint> = serde_json::from_str(json)?;
        for constraint in &constraints {
            constraint.validate()?;
        }
        Ok(constraints)
    }

    /// Tag name of the constraint, as used in JSON
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::SubjectPresent => "subject_present",
            Constraint::SubjectNotPresent => "subject_not_present",
            Constraint::Restrict { .. } => "restrict",
            Constraint::Pattern { .. } => "pattern",
            Constraint::Dynamic { .. } => "dynamic",
        }
    }

    /// Rejects constraints that could never be meaningfully evaluated
    ///
    /// An empty restriction group would always deny; it is treated as a
    /// declaration mistake rather than silently accepted.
    pub fn validate(&self) -> Result<()> {
        match self {
            Constraint::Restrict { groups } => {
                if groups.is_empty() {
                    return Err(AuthzError::InvalidConstraint {
                        reason: "restrict constraint must have at least one group".to_string(),
                    });
                }
                if let Some(index) = groups.iter().position(Vec::is_empty) {
                    return Err(AuthzError::InvalidConstraint {
                        reason: format!("restrict group {} is empty", index),
                    });
                }
                Ok(())
            }
            Constraint::Pattern { value, .. } if value.is_empty() => {
                Err(AuthzError::InvalidConstraint {
                    reason: "pattern value cannot be empty".to_string(),
                })
            }
            Constraint::Dynamic { name, .. } if name.is_empty() => {
                Err(AuthzError::InvalidConstraint {
                    reason: "dynamic constraint name cannot be empty".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::SubjectPresent | Constraint::SubjectNotPresent => {
                write!(f, "{}", self.kind())
            }
            Constraint::Restrict { groups } => {
                let groups: Vec<String> = groups.iter().map(|g| g.join(",")).collect();
                write!(f, "restrict:[{}]", groups.join("|"))
            }
            Constraint::Pattern {
                value,
                pattern_type,
                invert,
                ..
            } => {
                let bang = if *invert { "!" } else { "" };
                write!(f, "pattern:{}{}:{}", bang, pattern_type, value)
            }
            Constraint::Dynamic { name, .. } => write!(f, "dynamic:{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pattern_defaults() {
        let constraint = Constraint::from_json(r#"{"type": "pattern", "value": "printers.edit"}"#)
            .unwrap();
        assert_eq!(
            constraint,
            Constraint::pattern("printers.edit", PatternType::Equality)
        );
    }

    #[test]
    fn test_deserialize_regex_inverted() {
        let constraint = Constraint::from_json(
            r#"{"type": "pattern", "value": ".*\\.edit", "pattern_type": "regex", "invert": true}"#,
        )
        .unwrap();
        match constraint {
            Constraint::Pattern {
                value,
                pattern_type,
                invert,
                meta,
            } => {
                assert!(meta.is_none());
                assert_eq!(value, r".*\.edit");
                assert_eq!(pattern_type, PatternType::Regex);
                assert!(invert);
            }
            other => panic!("unexpected constraint {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_list() {
        let constraints = Constraint::list_from_json(
            r#"[
                {"type": "subject_present"},
                {"type": "dynamic", "name": "pure_luck", "meta": "50"}
            ]"#,
        )
        .unwrap();
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0], Constraint::SubjectPresent);
        assert_eq!(
            constraints[1],
            Constraint::dynamic("pure_luck", Some("50".to_string()))
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = Constraint::from_json(r#"{"type": "telepathy"}"#);
        assert!(matches!(result, Err(AuthzError::Serialization(_))));
    }

    #[test]
    fn test_validate_empty_restrict() {
        let no_groups = Constraint::Restrict { groups: vec![] };
        assert!(matches!(
            no_groups.validate(),
            Err(AuthzError::InvalidConstraint { .. })
        ));

        let empty_group = Constraint::Restrict {
            groups: vec![vec!["admin".to_string()], vec![]],
        };
        let err = empty_group.validate().unwrap_err();
        assert!(err.to_string().contains("group 1 is empty"));
    }

    #[test]
    fn test_validate_empty_values() {
        assert!(Constraint::pattern("", PatternType::Regex).validate().is_err());
        assert!(Constraint::dynamic("", None).validate().is_err());
        assert!(Constraint::restrict(["admin"]).validate().is_ok());
    }

    #[test]
    fn test_display() {
        let restrict = Constraint::Restrict {
            groups: vec![
                vec!["admin".to_string()],
                vec!["editor".to_string(), "!banned".to_string()],
            ],
        };
        assert_eq!(restrict.to_string(), "restrict:[admin|editor,!banned]");

        let pattern = Constraint::Pattern {
            value: "printers.edit".to_string(),
            pattern_type: PatternType::Equality,
            invert: true,
            meta: None,
        };
        assert_eq!(pattern.to_string(), "pattern:!equality:printers.edit");
        assert_eq!(Constraint::SubjectPresent.to_string(), "subject_present");
    }

    #[test]
    fn test_serialize_dynamic_omits_meta() {
        let value = serde_json::to_value(Constraint::dynamic("pure_luck", None)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "dynamic", "name": "pure_luck"})
        );
    }
}
