// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::Persistence;
use gleaner::EventStore;
use gleaner_audit::{Actor, ActorKind};
use gleaner_domain::{Event, EventStatus, EventType, NewEvent, StatusHistoryEntry};
use time::OffsetDateTime;
use time::macros::datetime;

pub const EVENT_START: OffsetDateTime = datetime!(2026-05-09 09:00 UTC);
pub const EVENT_END: OffsetDateTime = datetime!(2026-05-09 17:00 UTC);
pub const CREATED_AT: OffsetDateTime = datetime!(2026-04-01 12:00 UTC);

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_admin() -> Actor {
    Actor::new(String::from("admin-1"), ActorKind::Administrator)
}

pub fn create_test_new_event(event_type: EventType, expected_volunteers: u32) -> NewEvent {
    NewEvent {
        title: String::from("Harvest market"),
        event_type,
        start: EVENT_START,
        end: EVENT_END,
        expected_volunteers,
        parent_event_id: None,
    }
}

pub fn create_test_entry(
    status: EventStatus,
    at: OffsetDateTime,
    reason: &str,
) -> StatusHistoryEntry {
    StatusHistoryEntry::new(status, at, Some(create_test_admin()), reason.to_string())
}

/// Stores an `incomplete` event with an `initial` history entry.
pub fn insert_test_event(
    persistence: &mut Persistence,
    event_type: EventType,
    expected_volunteers: u32,
) -> Event {
    persistence
        .insert_event(
            &create_test_new_event(event_type, expected_volunteers),
            &create_test_entry(EventStatus::Incomplete, CREATED_AT, "initial"),
        )
        .unwrap()
}
