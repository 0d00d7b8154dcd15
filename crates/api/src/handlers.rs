// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler authorizes the actor first, converts the request into
//! domain values, calls the engine and translates the outcome into DTOs.

use gleaner::{Clock, EventStore, StatusEngine, SweepReport};
use gleaner_audit::Actor;
use gleaner_domain::{Event, EventId, EventType, MerchantId, NewEvent, VolunteerId};
use num_traits::cast::ToPrimitive;
use std::str::FromStr;
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AttachDonationRequest, BackfillResponse, ChangeEventStatusRequest, CreateEventRequest,
    EventInfo, ListFinishableResponse, SweepResponse, VolunteerRequest,
};

/// Creates an event in `incomplete` status.
///
/// # Errors
///
/// - `ApiError::Unauthorized` unless the actor is an administrator
/// - `ApiError::InvalidInput` for an unknown event type, a blank title,
///   an end before the start or a non-positive volunteer count
/// - `ApiError::ResourceNotFound` if the parent event does not exist
pub fn create_event<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    request: &CreateEventRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EventInfo, ApiError> {
    AuthorizationService::authorize_create_event(authenticated_actor)?;

    let event_type: EventType =
        EventType::from_str(&request.event_type).map_err(translate_domain_error)?;
    let expected_volunteers: u32 =
        request
            .expected_volunteers
            .to_u32()
            .ok_or_else(|| ApiError::InvalidInput {
                field: String::from("expected_volunteers"),
                message: format!(
                    "Invalid expected volunteer count: {}. Must be greater than 0",
                    request.expected_volunteers
                ),
            })?;

    let parent_event_id: Option<EventId> = match request.parent_event_id {
        Some(raw) => {
            let parent: Event = engine
                .get_event(EventId::new(raw))
                .map_err(translate_core_error)?;
            Some(parent.id)
        }
        None => None,
    };

    let new_event: NewEvent = NewEvent {
        title: request.title.clone(),
        event_type,
        start: request.start,
        end: request.end,
        expected_volunteers,
        parent_event_id,
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let event: Event = engine
        .create_event(new_event, &actor)
        .map_err(translate_core_error)?;
    Ok(EventInfo::from(&event))
}

/// Returns an event with its participants and full status history.
///
/// Any authenticated actor may read events.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the event does not exist.
pub fn get_event<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    event_id: i64,
    _authenticated_actor: &AuthenticatedActor,
) -> Result<EventInfo, ApiError> {
    let event: Event = engine
        .get_event(EventId::new(event_id))
        .map_err(translate_core_error)?;
    Ok(EventInfo::from(&event))
}

/// Re-evaluates a single event now.
///
/// Any authenticated actor may trigger a check.
///
/// # Errors
///
/// - `ApiError::ResourceNotFound` if the event does not exist
/// - `ApiError::Conflict` if the event changed while it was evaluated
/// - `ApiError::Internal` if the evaluation failed
pub fn check_event_status<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    event_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EventInfo, ApiError> {
    let actor: Actor = authenticated_actor.to_audit_actor();
    let event: Event = engine
        .check_and_update(EventId::new(event_id), Some(&actor))
        .map_err(translate_core_error)?;
    Ok(EventInfo::from(&event))
}

/// Overrides an event's status.
///
/// # Errors
///
/// - `ApiError::Unauthorized` unless the actor is an administrator
/// - `ApiError::InvalidInput` for an unknown status
/// - `ApiError::ResourceNotFound` if the event does not exist
/// - `ApiError::DomainRuleViolation` when finishing before the scheduled end
/// - `ApiError::Conflict` if the event changed while it was being updated
pub fn change_event_status<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    event_id: i64,
    request: &ChangeEventStatusRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EventInfo, ApiError> {
    AuthorizationService::authorize_change_status(authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let event: Event = engine
        .change_status(
            EventId::new(event_id),
            &request.status,
            &actor,
            request.reason.as_deref(),
        )
        .map_err(translate_core_error)?;
    Ok(EventInfo::from(&event))
}

/// Registers a volunteer for an event.
///
/// # Errors
///
/// - `ApiError::Unauthorized` unless the actor is an administrator or the volunteer
/// - `ApiError::ResourceNotFound` if the event does not exist
/// - `ApiError::DomainRuleViolation` if the event is closed or the volunteer
///   is already registered
pub fn register_volunteer<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    event_id: i64,
    request: VolunteerRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EventInfo, ApiError> {
    let volunteer_id: VolunteerId = VolunteerId::new(request.volunteer_id);
    AuthorizationService::authorize_manage_volunteer(authenticated_actor, volunteer_id)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let event: Event = engine
        .register_volunteer(EventId::new(event_id), volunteer_id, &actor)
        .map_err(translate_core_error)?;
    Ok(EventInfo::from(&event))
}

/// Withdraws a volunteer from an event.
///
/// # Errors
///
/// - `ApiError::Unauthorized` unless the actor is an administrator or the volunteer
/// - `ApiError::ResourceNotFound` if the event does not exist
/// - `ApiError::DomainRuleViolation` if the event is closed or the volunteer
///   is not registered
pub fn unregister_volunteer<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    event_id: i64,
    request: VolunteerRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EventInfo, ApiError> {
    let volunteer_id: VolunteerId = VolunteerId::new(request.volunteer_id);
    AuthorizationService::authorize_manage_volunteer(authenticated_actor, volunteer_id)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let event: Event = engine
        .unregister_volunteer(EventId::new(event_id), volunteer_id, &actor)
        .map_err(translate_core_error)?;
    Ok(EventInfo::from(&event))
}

/// Attaches a merchant's donation to an event.
///
/// # Errors
///
/// - `ApiError::Unauthorized` unless the actor is an administrator or the merchant
/// - `ApiError::ResourceNotFound` if the event does not exist
/// - `ApiError::DomainRuleViolation` if the event is closed
pub fn attach_merchant_donation<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    event_id: i64,
    request: &AttachDonationRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EventInfo, ApiError> {
    let merchant_id: MerchantId = MerchantId::new(request.merchant_id);
    AuthorizationService::authorize_attach_donation(authenticated_actor, merchant_id)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let event: Event = engine
        .attach_merchant_donation(
            EventId::new(event_id),
            merchant_id,
            request.note.as_deref(),
            &actor,
        )
        .map_err(translate_core_error)?;
    Ok(EventInfo::from(&event))
}

/// Re-evaluates every active event that has not ended.
///
/// # Errors
///
/// - `ApiError::Unauthorized` unless the actor is an administrator
/// - `ApiError::Internal` if the candidate events cannot be queried
pub fn sweep<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SweepResponse, ApiError> {
    AuthorizationService::authorize_sweep(authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let report: SweepReport = engine
        .sweep_all(Some(&actor))
        .map_err(translate_core_error)?;
    info!(
        actor = %actor,
        examined = report.examined,
        changed = report.changed,
        "Manual sweep completed"
    );
    Ok(SweepResponse::from(&report))
}

/// Lists active events whose scheduled end has passed.
///
/// # Errors
///
/// - `ApiError::Unauthorized` unless the actor is an administrator
/// - `ApiError::Internal` if the events cannot be queried
pub fn list_finishable<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListFinishableResponse, ApiError> {
    AuthorizationService::authorize_sweep(authenticated_actor)?;

    let events: Vec<Event> = engine
        .suggest_finishable()
        .map_err(translate_core_error)?;
    Ok(ListFinishableResponse {
        events: events.iter().map(EventInfo::from).collect(),
    })
}

/// Gives every event without status history an initial entry.
///
/// # Errors
///
/// - `ApiError::Unauthorized` unless the actor is an administrator
/// - `ApiError::Internal` if the events cannot be queried
pub fn backfill_status_history<S: EventStore, C: Clock>(
    engine: &mut StatusEngine<S, C>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<BackfillResponse, ApiError> {
    AuthorizationService::authorize_backfill(authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let backfilled: usize = engine
        .backfill_status_history(&actor)
        .map_err(translate_core_error)?;
    Ok(BackfillResponse {
        backfilled,
        message: format!("Backfilled status history for {backfilled} event(s)"),
    })
}
