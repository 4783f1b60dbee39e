//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing callers to use String
//! errors.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (caller-supplied value violates a documented
    /// constraint); carries the offending field
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A requested action violates a game rule
    #[error("Rule violation: {0}")]
    Rule(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reference data that must exist for a supported class/level is absent.
    /// Never defaulted: a defaulted sheet would look plausible but be wrong.
    #[error("Class data missing for {class} level {level}")]
    ClassDataMissing { class: String, level: u8 },
}

impl DomainError {
    /// Creates a validation error naming the offending field.
    ///
    /// Use this when a documented input constraint is violated:
    /// - Ability scores outside 3..=18
    /// - Spell slot levels outside 1..=9
    /// - Empty required strings
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a domain-rule rejection naming the rule that failed.
    pub fn rule(msg: impl Into<String>) -> Self {
        Self::Rule(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an internal data error for an absent class/level row
    pub fn class_data_missing(class: impl Into<String>, level: u8) -> Self {
        Self::ClassDataMissing {
            class: class.into(),
            level,
        }
    }
}
