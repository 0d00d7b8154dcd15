// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use gleaner_domain::{DomainError, EventId, EventStatus};

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The referenced event does not exist.
    #[error("Event {0} not found")]
    NotFound(EventId),
    /// A manual change requested an unknown status value.
    #[error("Invalid status: '{0}'")]
    InvalidStatus(String),
    /// A manual change violated a business rule.
    #[error("Invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The current status.
        from: EventStatus,
        /// The requested status.
        to: EventStatus,
        /// Why the change was refused.
        reason: String,
    },
    /// Re-evaluating an event failed before a status could be committed.
    #[error("Evaluation of event {event_id} failed: {message}")]
    EvaluationFailure {
        /// The event.
        event_id: EventId,
        /// What went wrong.
        message: String,
    },
    /// Another writer changed the event between load and write.
    #[error(
        "Event {event_id} was modified concurrently (expected version {expected_version}, found {actual_version})"
    )]
    ConcurrentModification {
        /// The event.
        event_id: EventId,
        /// The version that was loaded.
        expected_version: i64,
        /// The version found at write time.
        actual_version: i64,
    },
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(DomainError),
    /// The store failed outside of an evaluation.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Re-labels backend failures that happened while evaluating `event_id`.
    pub(crate) fn during_evaluation(self, event_id: EventId) -> Self {
        match self {
            Self::Storage(message) => Self::EvaluationFailure { event_id, message },
            other => other,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidStatus { status } => Self::InvalidStatus(status),
            DomainError::InvalidTransition { from, to, reason } => {
                Self::InvalidTransition { from, to, reason }
            }
            other => Self::DomainViolation(other),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(event_id) => Self::NotFound(event_id),
            StoreError::VersionConflict {
                event_id,
                expected,
                actual,
            } => Self::ConcurrentModification {
                event_id,
                expected_version: expected,
                actual_version: actual,
            },
            StoreError::Backend(message) => Self::Storage(message),
        }
    }
}
