//! # Subject Authorization Analyzer (authz-analyzer)
//!
//! Decides whether an authenticated subject satisfies a declared access
//! requirement:
//! - Role restrictions with `!` negation
//! - Permission values matched by equality or regular expression
//! - Declarative constraints loadable from JSON
//! - Compiled pattern caching for repeated regex checks
//!
//! Absence is never an error. A missing subject, a missing role or permission
//! list, or absent entries inside those lists all resolve to "no match".
//!
//! ## Example
//!
//! ```rust
//! use authz_analyzer::analyzer;
//! use authz_analyzer::{PermissionPattern, Principal};
//!
//! let subject = Principal::new("user:alice")
//!     .with_role("admin")
//!     .with_role("editor")
//!     .with_permission("printers.edit");
//!
//! assert!(analyzer::check_role(Some(&subject), &["admin", "editor"]));
//! assert!(!analyzer::check_role(Some(&subject), &["admin", "!editor"]));
//!
//! let pattern = PermissionPattern::new(r".*\.edit").unwrap();
//! assert!(analyzer::check_regex_pattern(Some(&subject), Some(&pattern)));
//! ```

pub mod analyzer;
pub mod constraint;
pub mod error;
pub mod pattern;
pub mod subject;

pub use analyzer::RoleRequirement;
pub use constraint::{Constraint, ConstraintEvaluator, DynamicResourceHandler, EvaluatorConfig};
pub use error::{AuthzError, Result};
pub use pattern::{CacheConfig, CacheStats, PatternCache, PatternType, PermissionPattern};
pub use subject::{NamedRole, Permission, PermissionValue, Principal, Role, Subject};
