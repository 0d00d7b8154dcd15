// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use gleaner::CoreError;
use gleaner_domain::DomainError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The resource changed underneath the request. The caller may reload and retry.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown status '{status}'"),
        },
        DomainError::InvalidEventType { event_type } => ApiError::InvalidInput {
            field: String::from("event_type"),
            message: format!("Unknown event type '{event_type}'"),
        },
        DomainError::InvalidTransition { from, to, reason } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: format!("Cannot change status from {from} to {to}: {reason}"),
        },
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        err @ DomainError::InvalidSchedule { .. } => ApiError::InvalidInput {
            field: String::from("end"),
            message: err.to_string(),
        },
        DomainError::InvalidExpectedVolunteers { count } => ApiError::InvalidInput {
            field: String::from("expected_volunteers"),
            message: format!("Invalid expected volunteer count: {count}. Must be greater than 0"),
        },
        err @ DomainError::VolunteerAlreadyRegistered { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_registration"),
            message: err.to_string(),
        },
        err @ DomainError::VolunteerNotRegistered { .. } => ApiError::DomainRuleViolation {
            rule: String::from("registration_exists"),
            message: err.to_string(),
        },
        err @ DomainError::EventClosed { .. } => ApiError::DomainRuleViolation {
            rule: String::from("event_open"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::NotFound(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event {event_id} does not exist"),
        },
        CoreError::InvalidStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown status '{status}'"),
        },
        CoreError::InvalidTransition { from, to, reason } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: format!("Cannot change status from {from} to {to}: {reason}"),
        },
        err @ CoreError::ConcurrentModification { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        err @ (CoreError::EvaluationFailure { .. } | CoreError::Storage(_)) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
