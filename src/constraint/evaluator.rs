//! Constraint evaluation against a subject

use serde::Deserialize;

use super::handler::DynamicResourceHandler;
use super::types::Constraint;
use crate::analyzer;
use crate::error::{AuthzError, Result};
use crate::pattern::{CacheConfig, PatternCache, PatternType};
use crate::subject::Subject;

/// Evaluator configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Compiled regex cache configuration
    pub cache: CacheConfig,
}

/// Decides declarative constraints using the analyzer
///
/// Holds only a compiled pattern cache; decisions themselves are never
/// cached. Share one evaluator across requests (e.g., behind an `Arc`).
///
/// # Examples
///
/// ```
/// use authz_analyzer::{Constraint, ConstraintEvaluator, EvaluatorConfig, PatternType, Principal};
///
/// let evaluator = ConstraintEvaluator::new(EvaluatorConfig::default());
/// let subject = Principal::new("user:alice")
///     .with_role("editor")
///     .with_permission("printers.edit");
///
/// let restrict = Constraint::restrict(["editor", "!banned"]);
/// assert!(evaluator.evaluate(&restrict, Some(&subject), None).unwrap());
///
/// let pattern = Constraint::pattern(r"printers\..*", PatternType::Regex);
/// assert!(evaluator.evaluate(&pattern, Some(&subject), None).unwrap());
/// ```
pub struct ConstraintEvaluator {
    patterns: PatternCache,
}

impl ConstraintEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            patterns: PatternCache::new(config.cache),
        }
    }

    /// Returns the compiled pattern cache
    pub fn pattern_cache(&self) -> &PatternCache {
        &self.patterns
    }

    /// Evaluates a single constraint
    ///
    /// # Errors
    ///
    /// - `AuthzError::InvalidPattern` if a regex pattern does not compile
    /// - `AuthzError::MissingHandler` if a dynamic constraint or custom
    ///   pattern is evaluated without a handler
    pub fn evaluate<S>(
        &self,
        constraint: &Constraint,
        subject: Option<&S>,
        handler: Option<&dyn DynamicResourceHandler<S>>,
    ) -> Result<bool>
    where
        S: Subject + ?Sized,
    {
        let allowed = match constraint {
            Constraint::SubjectPresent => subject.is_some(),
            Constraint::SubjectNotPresent => subject.is_none(),
            Constraint::Restrict { groups } => {
                analyzer::check_role_groups(subject, groups.as_slice())
            }
            Constraint::Pattern {
                value,
                pattern_type,
                invert,
                meta,
            } => {
                if subject.is_none() {
                    false
                } else {
                    let matched = match pattern_type {
                        PatternType::Equality => {
                            analyzer::check_pattern_equality(subject, Some(value.as_str()))
                        }
                        PatternType::Regex => {
                            let pattern = self.patterns.get_or_compile(value)?;
                            analyzer::check_regex_pattern(subject, Some(&pattern))
                        }
                        PatternType::Custom => require_handler(handler, constraint)?
                            .check_permission(value, meta.as_deref(), subject),
                    };
                    matched != *invert
                }
            }
            Constraint::Dynamic { name, meta } => {
                require_handler(handler, constraint)?.is_allowed(name, meta.as_deref(), subject)
            }
        };

        tracing::debug!(
            constraint = %constraint,
            subject = subject.map(|s| s.identifier()).unwrap_or("<none>"),
            allowed,
            "constraint evaluated"
        );

        Ok(allowed)
    }

    /// Evaluates constraints that must all hold
    ///
    /// An empty list denies. Evaluation stops at the first denial.
    pub fn evaluate_all<S>(
        &self,
        constraints: &[Constraint],
        subject: Option<&S>,
        handler: Option<&dyn DynamicResourceHandler<S>>,
    ) -> Result<bool>
    where
        S: Subject + ?Sized,
    {
        if constraints.is_empty() {
            return Ok(false);
        }

        for constraint in constraints {
            if !self.evaluate(constraint, subject, handler)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl Default for ConstraintEvaluator {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

fn require_handler<'h, S>(
    handler: Option<&'h dyn DynamicResourceHandler<S>>,
    constraint: &Constraint,
) -> Result<&'h dyn DynamicResourceHandler<S>>
where
    S: Subject + ?Sized,
{
    handler.ok_or_else(|| {
        tracing::warn!(constraint = %constraint, "no dynamic resource handler configured");
        AuthzError::MissingHandler {
            constraint: constraint.to_string(),
        }
    })
}
