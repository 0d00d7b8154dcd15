// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EventFilter, EventStore, FixedClock, InMemoryEventStore, StatusEngine, StoreError};
use gleaner_audit::{Actor, ActorKind};
use gleaner_domain::{
    Event, EventId, EventType, MerchantId, NewEvent, StatusHistoryEntry, VolunteerId,
};
use std::collections::BTreeSet;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub const EVENT_START: OffsetDateTime = datetime!(2026-05-09 09:00 UTC);
pub const EVENT_END: OffsetDateTime = datetime!(2026-05-09 17:00 UTC);
pub const BEFORE_START: OffsetDateTime = datetime!(2026-05-01 12:00 UTC);

pub type TestEngine = StatusEngine<InMemoryEventStore, FixedClock>;

pub fn create_test_admin() -> Actor {
    Actor::new(String::from("admin-1"), ActorKind::Administrator)
}

pub fn create_test_volunteer_actor(id: i64) -> Actor {
    Actor::new(format!("volunteer-{id}"), ActorKind::Volunteer)
}

pub fn create_test_merchant_actor(id: i64) -> Actor {
    Actor::new(format!("merchant-{id}"), ActorKind::Merchant)
}

pub fn create_test_new_event(event_type: EventType, expected_volunteers: u32) -> NewEvent {
    NewEvent {
        title: String::from("Saturday food drive"),
        event_type,
        start: EVENT_START,
        end: EVENT_END,
        expected_volunteers,
        parent_event_id: None,
    }
}

pub fn create_test_engine() -> TestEngine {
    StatusEngine::new(InMemoryEventStore::new(), FixedClock::new(BEFORE_START))
}

/// Creates an event and returns its id.
pub fn create_event(engine: &mut TestEngine, event_type: EventType, expected: u32) -> EventId {
    engine
        .create_event(
            create_test_new_event(event_type, expected),
            &create_test_admin(),
        )
        .unwrap()
        .id
}

/// Writes participants straight into the store, skipping the re-evaluation hooks.
pub fn seed_participants(
    engine: &mut TestEngine,
    event_id: EventId,
    volunteers: i64,
    merchants: i64,
) {
    for id in 1..=volunteers {
        engine
            .store_mut()
            .add_volunteer(event_id, VolunteerId::new(id), BEFORE_START)
            .unwrap();
    }
    for id in 1..=merchants {
        engine
            .store_mut()
            .add_merchant(event_id, MerchantId::new(id), None, BEFORE_START)
            .unwrap();
    }
}

pub fn set_now(engine: &mut TestEngine, now: OffsetDateTime) {
    engine.clock_mut().set(now);
}

pub fn one_second() -> Duration {
    Duration::seconds(1)
}

pub fn history_reasons(event: &Event) -> Vec<String> {
    event
        .status_history
        .iter()
        .map(|entry| entry.reason.clone())
        .collect()
}

/// A store that fails every operation on selected events.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub inner: InMemoryEventStore,
    pub failing: BTreeSet<EventId>,
}

impl FailingStore {
    fn check(&self, event_id: EventId) -> Result<(), StoreError> {
        if self.failing.contains(&event_id) {
            return Err(StoreError::Backend(format!("disk unavailable for event {event_id}")));
        }
        Ok(())
    }
}

impl EventStore for FailingStore {
    fn insert_event(
        &mut self,
        new_event: &NewEvent,
        initial: &StatusHistoryEntry,
    ) -> Result<Event, StoreError> {
        self.inner.insert_event(new_event, initial)
    }

    fn load_event(&mut self, event_id: EventId) -> Result<Event, StoreError> {
        self.check(event_id)?;
        self.inner.load_event(event_id)
    }

    fn save_status(
        &mut self,
        event_id: EventId,
        expected_version: i64,
        entry: &StatusHistoryEntry,
    ) -> Result<Event, StoreError> {
        self.check(event_id)?;
        self.inner.save_status(event_id, expected_version, entry)
    }

    fn query_events(&mut self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        self.inner.query_events(filter)
    }

    fn add_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
        registered_at: OffsetDateTime,
    ) -> Result<Event, StoreError> {
        self.inner.add_volunteer(event_id, volunteer_id, registered_at)
    }

    fn remove_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
    ) -> Result<Event, StoreError> {
        self.inner.remove_volunteer(event_id, volunteer_id)
    }

    fn add_merchant(
        &mut self,
        event_id: EventId,
        merchant_id: MerchantId,
        note: Option<&str>,
        attached_at: OffsetDateTime,
    ) -> Result<Event, StoreError> {
        self.inner.add_merchant(event_id, merchant_id, note, attached_at)
    }
}

/// A store where another writer registers a volunteer between every load and status save.
#[derive(Debug, Default)]
pub struct RacingStore {
    pub inner: InMemoryEventStore,
    next_rival: i64,
}

impl EventStore for RacingStore {
    fn insert_event(
        &mut self,
        new_event: &NewEvent,
        initial: &StatusHistoryEntry,
    ) -> Result<Event, StoreError> {
        self.inner.insert_event(new_event, initial)
    }

    fn load_event(&mut self, event_id: EventId) -> Result<Event, StoreError> {
        self.inner.load_event(event_id)
    }

    fn save_status(
        &mut self,
        event_id: EventId,
        expected_version: i64,
        entry: &StatusHistoryEntry,
    ) -> Result<Event, StoreError> {
        self.next_rival += 1;
        self.inner
            .add_volunteer(event_id, VolunteerId::new(1000 + self.next_rival), BEFORE_START)?;
        self.inner.save_status(event_id, expected_version, entry)
    }

    fn query_events(&mut self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        self.inner.query_events(filter)
    }

    fn add_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
        registered_at: OffsetDateTime,
    ) -> Result<Event, StoreError> {
        self.inner.add_volunteer(event_id, volunteer_id, registered_at)
    }

    fn remove_volunteer(
        &mut self,
        event_id: EventId,
        volunteer_id: VolunteerId,
    ) -> Result<Event, StoreError> {
        self.inner.remove_volunteer(event_id, volunteer_id)
    }

    fn add_merchant(
        &mut self,
        event_id: EventId,
        merchant_id: MerchantId,
        note: Option<&str>,
        attached_at: OffsetDateTime,
    ) -> Result<Event, StoreError> {
        self.inner.add_merchant(event_id, merchant_id, note, attached_at)
    }
}
