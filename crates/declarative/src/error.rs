//! Error types for resource reconciliation.
//!
//! Every error here is scoped to a single resource: the executor records it
//! against that resource and moves on to its siblings. Failures resolving the
//! device target itself belong to `devicekit` and never show up here.

use crate::report::Violation;
use thiserror::Error;

/// Errors raised while canonicalizing, fetching, or applying one resource.
#[derive(Debug, Error)]
pub enum Error {
    /// Attribute not declared by the resource type's schema
    #[error("{resource_type} has no attribute named '{attribute}'")]
    UnknownAttribute {
        resource_type: String,
        attribute: String,
    },

    /// Attribute value could not be coerced to the declared kind
    #[error("invalid value '{value}' for {resource_type}.{attribute}: expected {expected}")]
    InvalidValue {
        resource_type: String,
        attribute: String,
        value: String,
        expected: String,
    },

    /// No provider registered for the resource type
    #[error("unknown resource type '{0}'")]
    UnknownType(String),

    /// Resource title is empty or otherwise unusable
    #[error("invalid resource title: '{0}'")]
    InvalidTitle(String),

    /// Resource does not exist on the target
    #[error("{resource_type}[{id}] not found")]
    NotFound { resource_type: String, id: String },

    /// Connection, authentication, or I/O failure talking to the target
    #[error("transport error: {0}")]
    Transport(String),

    /// The target returned values that are not in canonical form
    #[error("{0}")]
    CanonicalizationViolation(Box<Violation>),
}

impl Error {
    /// Create a not-found error for a resource.
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Create a transport error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport(cause.to_string())
    }

    /// Returns true if the resource is simply absent.
    ///
    /// Absence is not a failure: the reconciler treats it as `ensure => absent`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for reconciliation operations
pub type Result<T> = std::result::Result<T, Error>;
