// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

/// Errors produced while decoding audit values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditError {
    /// The stored actor kind is not one of the known kinds.
    #[error("Unknown actor kind: '{0}'")]
    UnknownActorKind(String),
}

/// The kind of entity that initiated a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// An organization administrator.
    Administrator,
    /// A volunteer acting on their own registration.
    Volunteer,
    /// A merchant acting on their own donation.
    Merchant,
    /// An automated trigger such as the scheduled sweep.
    System,
}

impl ActorKind {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Volunteer => "volunteer",
            Self::Merchant => "merchant",
            Self::System => "system",
        }
    }
}

impl FromStr for ActorKind {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(Self::Administrator),
            "volunteer" => Ok(Self::Volunteer),
            "merchant" => Ok(Self::Merchant),
            "system" => Ok(Self::System),
            _ => Err(AuditError::UnknownActorKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the entity performing an action.
///
/// Every manual status change carries an actor. Automatic re-evaluations
/// carry one only when a user action triggered them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// What kind of actor this is.
    pub kind: ActorKind,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `kind` - The kind of actor
    #[must_use]
    pub const fn new(id: String, kind: ActorKind) -> Self {
        Self { id, kind }
    }

    /// The actor used for changes made by the scheduled sweep.
    #[must_use]
    pub fn system(id: &str) -> Self {
        Self::new(id.to_string(), ActorKind::System)
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
