// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence port used by the engine.

use gleaner_domain::{
    Event, EventId, EventStatus, MerchantId, NewEvent, StatusHistoryEntry, VolunteerId,
};
use time::OffsetDateTime;

/// Errors reported by an [`EventStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No event exists with this id.
    #[error("Event {0} not found")]
    NotFound(EventId),
    /// The event was written by someone else since it was loaded.
    #[error("Event {event_id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        /// The event.
        event_id: EventId,
        /// The version the writer loaded.
        expected: i64,
        /// The version currently stored.
        actual: i64,
    },
    /// The backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Constraint on an event's scheduled end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndBound {
    /// No constraint.
    Any,
    /// `end >= instant`.
    OnOrAfter(OffsetDateTime),
    /// `end < instant`.
    Before(OffsetDateTime),
}

impl EndBound {
    /// Returns true if `end` satisfies the bound.
    #[must_use]
    pub fn admits(&self, end: OffsetDateTime) -> bool {
        match self {
            Self::Any => true,
            Self::OnOrAfter(instant) => end >= *instant,
            Self::Before(instant) => end < *instant,
        }
    }
}

/// Selection of events by status membership and scheduled end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    /// Events whose status is one of these.
    pub statuses: Vec<EventStatus>,
    /// Constraint on the scheduled end.
    pub end: EndBound,
}

impl EventFilter {
    /// Every event.
    #[must_use]
    pub fn all() -> Self {
        Self {
            statuses: EventStatus::ALL.to_vec(),
            end: EndBound::Any,
        }
    }

    /// Non-terminal events that have not ended by `now`.
    #[must_use]
    pub fn sweepable(now: OffsetDateTime) -> Self {
        Self {
            statuses: EventStatus::ACTIVE.to_vec(),
            end: EndBound::OnOrAfter(now),
        }
    }

    /// Non-terminal events whose end is strictly before `now`.
    #[must_use]
    pub fn finishable(now: OffsetDateTime) -> Self {
        Self {
            statuses: EventStatus::ACTIVE.to_vec(),
            end: EndBound::Before(now),
        }
    }

    /// Returns true if `event` is selected by this filter.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        self.statuses.contains(&event.status) && self.end.admits(event.end)
    }
}

/// Storage for events, their participants and their status history.
///
/// Every write bumps the event's `version`. `save_status` is conditional on
/// the caller's loaded version, so a status computed from stale data is
/// rejected instead of committed.
pub trait EventStore {
    /// Stores a new event with `initial` as its first history entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn insert_event(
        &mut self,
        new_event: &NewEvent,
        initial: &StatusHistoryEntry,
    ) -> Result<Event, StoreError>;

    /// Loads an event with its participants and full history.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the event does not exist.
    fn load_event(&mut self, event_id: EventId) -> Result<Event, StoreError>;

    /// Atomically sets the status to `entry.value` and appends `entry` to the history.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::VersionConflict` if the stored version differs from
    /// `expected_version`; nothing is written in that case.
    fn save_status(
        &mut self,
        event_id: EventId,
        expected_version: i64,
        entry: &StatusHistoryEntry,
    ) -> Result<Event, StoreError>;

    /// Loads every event matching `filter`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn query_events(&mut self, filter: &EventFilter) -> Result<Vec<Event>, StoreError>;

    /// Adds a volunteer to an event.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the event does not exist.
    fn add_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
        registered_at: OffsetDateTime,
    ) -> Result<Event, StoreError>;

    /// Removes a volunteer from an event.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the event does not exist.
    fn remove_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
    ) -> Result<Event, StoreError>;

    /// Records a merchant donation for an event.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the event does not exist.
    fn add_merchant(
        &mut self,
        event_id: EventId,
        merchant_id: MerchantId,
        note: Option<&str>,
        attached_at: OffsetDateTime,
    ) -> Result<Event, StoreError>;
}
