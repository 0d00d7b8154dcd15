// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event status values.
//!
//! The evaluator moves events between the non-terminal states. `Cancelled`
//! and `Finished` are only ever reached through a manual change.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Operational status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Capacity requirements are not met yet.
    Incomplete,
    /// Capacity requirements are met and the event has not started.
    Ready,
    /// The current time lies within the event schedule.
    InProgress,
    /// Called off by an administrator.
    Cancelled,
    /// Closed by an administrator after the scheduled end.
    Finished,
}

impl EventStatus {
    /// Every status value, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Incomplete,
        Self::Ready,
        Self::InProgress,
        Self::Cancelled,
        Self::Finished,
    ];

    /// Statuses the evaluator still recomputes.
    pub const ACTIVE: [Self; 3] = [Self::Incomplete, Self::Ready, Self::InProgress];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Ready => "ready",
            Self::InProgress => "in_progress",
            Self::Cancelled => "cancelled",
            Self::Finished => "finished",
        }
    }

    /// Returns true if the evaluator never recomputes this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Finished)
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incomplete" => Ok(Self::Incomplete),
            "ready" => Ok(Self::Ready),
            "in_progress" => Ok(Self::InProgress),
            "cancelled" => Ok(Self::Cancelled),
            "finished" => Ok(Self::Finished),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
