//! Error types for rule registration and access.
//!
//! Every failure is synchronous and surfaces at the call that caused it.
//! Nothing is retried or swallowed.

use thiserror::Error;

use crate::core::RuleKind;

/// Boxed error returned by a failing observer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the rule registry and its accessors.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A rule with this name is already registered.
    #[error("rule '{name}' is already registered")]
    DuplicateName { name: String },

    /// No rule with this name exists in the registry.
    #[error("no such rule '{name}'")]
    UnknownRule { name: String },

    /// The rule exists but holds a different kind of value.
    #[error("type mismatch for rule '{name}': expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    /// The name cannot be used as a rule name.
    #[error("invalid rule name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// The default value is not acceptable for this kind of rule.
    #[error("invalid default for {kind} rule '{name}': must be a finite number")]
    InvalidDefault { name: String, kind: RuleKind },

    /// An observer failed while being notified of a change.
    #[error("change observer for rule '{name}' failed: {source}")]
    Observer {
        name: String,
        #[source]
        source: BoxError,
    },
}

impl RuleError {
    pub(crate) fn unknown(name: impl Into<String>) -> Self {
        RuleError::UnknownRule { name: name.into() }
    }

    pub(crate) fn mismatch(
        name: impl Into<String>,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        RuleError::TypeMismatch {
            name: name.into(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// The rule name this error refers to.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        match self {
            RuleError::DuplicateName { name }
            | RuleError::UnknownRule { name }
            | RuleError::TypeMismatch { name, .. }
            | RuleError::InvalidName { name, .. }
            | RuleError::InvalidDefault { name, .. }
            | RuleError::Observer { name, .. } => name,
        }
    }

    /// Whether the failure came from caller code rather than the registry.
    #[must_use]
    pub fn is_observer_failure(&self) -> bool {
        matches!(self, RuleError::Observer { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RuleError>;
