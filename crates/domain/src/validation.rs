// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::event::{Event, NewEvent};
use crate::types::VolunteerId;

/// Validates an event before it is created.
///
/// # Errors
///
/// Returns an error if:
/// - The title is blank
/// - The start is after the end
/// - The expected volunteer count is zero
pub fn validate_new_event(new_event: &NewEvent) -> Result<(), DomainError> {
    if new_event.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    if new_event.start > new_event.end {
        return Err(DomainError::InvalidSchedule {
            start: new_event.start,
            end: new_event.end,
        });
    }

    if new_event.expected_volunteers == 0 {
        return Err(DomainError::InvalidExpectedVolunteers {
            count: new_event.expected_volunteers,
        });
    }

    Ok(())
}

fn ensure_open(event: &Event) -> Result<(), DomainError> {
    if event.status.is_terminal() {
        return Err(DomainError::EventClosed {
            event_id: event.id,
            status: event.status,
        });
    }
    Ok(())
}

/// Validates that a volunteer may sign up for an event.
///
/// # Errors
///
/// Returns an error if the event is terminal or the volunteer is already registered.
pub fn validate_volunteer_registration(
    event: &Event,
    volunteer_id: VolunteerId,
) -> Result<(), DomainError> {
    ensure_open(event)?;
    if event.volunteers.contains(&volunteer_id) {
        return Err(DomainError::VolunteerAlreadyRegistered {
            event_id: event.id,
            volunteer_id,
        });
    }
    Ok(())
}

/// Validates that a volunteer may withdraw from an event.
///
/// # Errors
///
/// Returns an error if the event is terminal or the volunteer is not registered.
pub fn validate_volunteer_unregistration(
    event: &Event,
    volunteer_id: VolunteerId,
) -> Result<(), DomainError> {
    ensure_open(event)?;
    if !event.volunteers.contains(&volunteer_id) {
        return Err(DomainError::VolunteerNotRegistered {
            event_id: event.id,
            volunteer_id,
        });
    }
    Ok(())
}

/// Validates that a merchant donation may be attached to an event.
///
/// Attaching for a merchant that already participates is allowed.
///
/// # Errors
///
/// Returns an error if the event is terminal.
pub fn validate_merchant_attachment(event: &Event) -> Result<(), DomainError> {
    ensure_open(event)
}
