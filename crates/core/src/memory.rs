// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{EventFilter, EventStore, StoreError};
use gleaner_domain::{Event, EventId, MerchantId, NewEvent, StatusHistoryEntry, VolunteerId};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// An [`EventStore`] held entirely in memory.
///
/// Used by tests and by callers that do not need durability.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: BTreeMap<EventId, Event>,
    donation_notes: BTreeMap<(EventId, MerchantId), String>,
    last_id: i64,
}

impl InMemoryEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The note recorded with a merchant's donation, if any.
    #[must_use]
    pub fn donation_note(&self, event_id: EventId, merchant_id: MerchantId) -> Option<&str> {
        self.donation_notes
            .get(&(event_id, merchant_id))
            .map(String::as_str)
    }

    /// Replaces a stored event as-is, bypassing version checks.
    ///
    /// Lets callers seed records that were written by older software,
    /// such as events without any status history.
    pub fn put_event(&mut self, event: Event) {
        self.last_id = self.last_id.max(event.id.value());
        self.events.insert(event.id, event);
    }

    fn event_mut(&mut self, event_id: EventId) -> Result<&mut Event, StoreError> {
        self.events
            .get_mut(&event_id)
            .ok_or(StoreError::NotFound(event_id))
    }
}

impl EventStore for InMemoryEventStore {
    fn insert_event(
        &mut self,
        new_event: &NewEvent,
        initial: &StatusHistoryEntry,
    ) -> Result<Event, StoreError> {
        self.last_id += 1;
        let id: EventId = EventId::new(self.last_id);
        let event: Event = Event::from_new(id, new_event.clone(), initial.clone());
        self.events.insert(id, event.clone());
        Ok(event)
    }

    fn load_event(&mut self, event_id: EventId) -> Result<Event, StoreError> {
        self.events
            .get(&event_id)
            .cloned()
            .ok_or(StoreError::NotFound(event_id))
    }

    fn save_status(
        &mut self,
        event_id: EventId,
        expected_version: i64,
        entry: &StatusHistoryEntry,
    ) -> Result<Event, StoreError> {
        let event: &mut Event = self.event_mut(event_id)?;
        if event.version != expected_version {
            return Err(StoreError::VersionConflict {
                event_id,
                expected: expected_version,
                actual: event.version,
            });
        }
        event.record_status(entry.clone());
        event.version += 1;
        Ok(event.clone())
    }

    fn query_events(&mut self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        Ok(self
            .events
            .values()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect())
    }

    fn add_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
        _registered_at: OffsetDateTime,
    ) -> Result<Event, StoreError> {
        let event: &mut Event = self.event_mut(event_id)?;
        if event.volunteers.insert(volunteer_id) {
            event.version += 1;
        }
        Ok(event.clone())
    }

    fn remove_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
    ) -> Result<Event, StoreError> {
        let event: &mut Event = self.event_mut(event_id)?;
        if event.volunteers.remove(&volunteer_id) {
            event.version += 1;
        }
        Ok(event.clone())
    }

    fn add_merchant(
        &mut self,
        event_id: EventId,
        merchant_id: MerchantId,
        note: Option<&str>,
        _attached_at: OffsetDateTime,
    ) -> Result<Event, StoreError> {
        let event: &mut Event = self.event_mut(event_id)?;
        let added: bool = event.merchants.insert(merchant_id);
        if added {
            event.version += 1;
        }
        let snapshot: Event = event.clone();
        if let (true, Some(note)) = (added, note) {
            self.donation_notes
                .insert((event_id, merchant_id), note.to_string());
        }
        Ok(snapshot)
    }
}
