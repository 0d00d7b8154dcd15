// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event_status::EventStatus;
use crate::types::{EventId, VolunteerId};
use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The requested status is not one of the known status values.
    #[error("Invalid event status: '{status}'")]
    InvalidStatus {
        /// The rejected status string.
        status: String,
    },
    /// The event type is not one of the known event types.
    #[error("Invalid event type: '{event_type}'")]
    InvalidEventType {
        /// The rejected event type string.
        event_type: String,
    },
    /// A status change violates a business rule.
    #[error("Invalid status transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The current status.
        from: EventStatus,
        /// The requested status.
        to: EventStatus,
        /// Why the transition was refused.
        reason: String,
    },
    /// Event title is empty or invalid.
    #[error("Invalid title: {0}")]
    InvalidTitle(String),
    /// The event ends before it starts.
    #[error("Invalid schedule: start {start} is after end {end}")]
    InvalidSchedule {
        /// The scheduled start.
        start: OffsetDateTime,
        /// The scheduled end.
        end: OffsetDateTime,
    },
    /// Expected volunteer count must be positive.
    #[error("Invalid expected volunteer count: {count}. Must be greater than 0")]
    InvalidExpectedVolunteers {
        /// The invalid count value.
        count: u32,
    },
    /// The volunteer is already signed up for the event.
    #[error("Volunteer {volunteer_id} is already registered for event {event_id}")]
    VolunteerAlreadyRegistered {
        /// The event.
        event_id: EventId,
        /// The volunteer.
        volunteer_id: VolunteerId,
    },
    /// The volunteer is not signed up for the event.
    #[error("Volunteer {volunteer_id} is not registered for event {event_id}")]
    VolunteerNotRegistered {
        /// The event.
        event_id: EventId,
        /// The volunteer.
        volunteer_id: VolunteerId,
    },
    /// The event is finished or cancelled and no longer accepts participation changes.
    #[error("Event {event_id} is {status} and no longer accepts changes")]
    EventClosed {
        /// The event.
        event_id: EventId,
        /// The terminal status it is in.
        status: EventStatus,
    },
}
