//! Error types for the authorization analyzer

use thiserror::Error;

/// Result type alias for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Errors raised outside the analyzer's absence-tolerant core
///
/// The analyzer functions themselves never fail. These variants cover pattern
/// compilation, declarative constraint loading, and constraints that need an
/// application handler.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Regular expression failed to compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Constraint requires a dynamic resource handler but none was supplied
    #[error("Constraint '{constraint}' requires a dynamic resource handler")]
    MissingHandler { constraint: String },

    /// Structurally invalid declarative constraint
    #[error("Invalid constraint: {reason}")]
    InvalidConstraint { reason: String },

    /// Constraint document failed to (de)serialize
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
