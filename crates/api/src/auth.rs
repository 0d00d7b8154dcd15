// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use gleaner_audit::{Actor, ActorKind};
use gleaner_domain::{MerchantId, VolunteerId};
use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Organization staff with structural and corrective authority.
    ///
    /// Administrators may:
    /// - create events
    /// - override event status
    /// - trigger the sweep and the history backfill
    /// - manage any participation on behalf of others
    Administrator,
    /// A volunteer acting on their own registrations.
    ///
    /// The actor id must equal the volunteer id being managed.
    Volunteer,
    /// A merchant acting on their own donations.
    ///
    /// The actor id must equal the merchant id being attached.
    Merchant,
}

impl Role {
    /// Returns the string representation used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Volunteer => "volunteer",
            Self::Merchant => "merchant",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "administrator" | "admin" => Ok(Self::Administrator),
            "volunteer" => Ok(Self::Volunteer),
            "merchant" => Ok(Self::Merchant),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!(
                    "Invalid role: '{s}'. Must be 'administrator', 'volunteer' or 'merchant'"
                ),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into the actor recorded in status history.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let kind: ActorKind = match self.role {
            Role::Administrator => ActorKind::Administrator,
            Role::Volunteer => ActorKind::Volunteer,
            Role::Merchant => ActorKind::Merchant,
        };
        Actor::new(self.id.clone(), kind)
    }

    fn is(&self, role: Role, subject: i64) -> bool {
        self.role == role && self.id == subject.to_string()
    }
}

/// Stub authentication function.
///
/// Accepts any non-empty actor id. Credential checks belong to the
/// surrounding platform.
///
/// # Errors
///
/// Returns an error if the actor id is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_administrator(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Administrator => Ok(()),
            Role::Volunteer | Role::Merchant => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Administrator"),
            }),
        }
    }

    /// Only administrators may create events.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an administrator.
    pub fn authorize_create_event(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_administrator(actor, "create_event")
    }

    /// Only administrators may override an event's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an administrator.
    pub fn authorize_change_status(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_administrator(actor, "change_event_status")
    }

    /// Only administrators may trigger a sweep or list finish candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an administrator.
    pub fn authorize_sweep(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_administrator(actor, "sweep")
    }

    /// Only administrators may backfill status history.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an administrator.
    pub fn authorize_backfill(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_administrator(actor, "backfill_status_history")
    }

    /// Volunteers manage their own registration; administrators manage anyone's.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither an administrator nor the volunteer.
    pub fn authorize_manage_volunteer(
        actor: &AuthenticatedActor,
        volunteer_id: VolunteerId,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Administrator || actor.is(Role::Volunteer, volunteer_id.value()) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: format!("manage_volunteer:{volunteer_id}"),
            required_role: String::from("Administrator or the volunteer"),
        })
    }

    /// Merchants attach their own donations; administrators attach anyone's.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither an administrator nor the merchant.
    pub fn authorize_attach_donation(
        actor: &AuthenticatedActor,
        merchant_id: MerchantId,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Administrator || actor.is(Role::Merchant, merchant_id.value()) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: format!("attach_donation:{merchant_id}"),
            required_role: String::from("Administrator or the merchant"),
        })
    }
}
