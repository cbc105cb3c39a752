//! # Constraint Module
//!
//! Declarative access constraints and their evaluation.
//!
//! ## Constraint kinds
//!
//! - **subject_present / subject_not_present**: presence of an authenticated subject
//! - **restrict**: OR of role groups, each an AND of entries with `!` negation
//! - **pattern**: permission equality, whole-string regex, or custom handler check
//! - **dynamic**: named check delegated to a [`DynamicResourceHandler`]
//!
//! ## Example
//!
//! ```rust
//! use authz_analyzer::{Constraint, ConstraintEvaluator, Principal};
//!
//! let constraints = Constraint::list_from_json(r#"[
//!     {"type": "subject_present"},
//!     {"type": "restrict", "groups": [["admin"], ["editor", "!banned"]]},
//!     {"type": "pattern", "value": "printers\\..*", "pattern_type": "regex"}
//! ]"#).unwrap();
//!
//! let evaluator = ConstraintEvaluator::default();
//! let subject = Principal::new("user:alice")
//!     .with_role("editor")
//!     .with_permission("printers.edit");
//!
//! assert!(evaluator.evaluate_all(&constraints, Some(&subject), None).unwrap());
//! ```

mod evaluator;
mod handler;
mod types;

pub use evaluator::{ConstraintEvaluator, EvaluatorConfig};
pub use handler::DynamicResourceHandler;
pub use types::Constraint;
