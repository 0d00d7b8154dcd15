// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an event's readiness is gated before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityRule {
    /// Needs the expected volunteer headcount and at least one merchant.
    VolunteersAndMerchant,
    /// Needs the expected volunteer headcount only.
    VolunteersOnly,
    /// Always ready once scheduled.
    Ungated,
}

/// The kind of event being organized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Merchants donate goods that volunteers collect.
    Collection,
    /// Distribution to beneficiaries.
    Market,
    /// Internal meeting.
    Meeting,
    /// Volunteer training session.
    Training,
}

impl EventType {
    /// Every event type.
    pub const ALL: [Self; 4] = [Self::Collection, Self::Market, Self::Meeting, Self::Training];

    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Market => "market",
            Self::Meeting => "meeting",
            Self::Training => "training",
        }
    }

    /// The capacity rule that applies to this event type.
    ///
    /// Adding a variant forces a decision here; there is no fallback arm.
    #[must_use]
    pub const fn capacity_rule(&self) -> CapacityRule {
        match self {
            Self::Collection => CapacityRule::VolunteersAndMerchant,
            Self::Market => CapacityRule::VolunteersOnly,
            Self::Meeting | Self::Training => CapacityRule::Ungated,
        }
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collection" => Ok(Self::Collection),
            "market" => Ok(Self::Market),
            "meeting" => Ok(Self::Meeting),
            "training" => Ok(Self::Training),
            _ => Err(DomainError::InvalidEventType {
                event_type: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
