// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use gleaner::{FixedClock, InMemoryEventStore, StatusEngine};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{AuthenticatedActor, CreateEventRequest, Role, create_event};

pub const EVENT_START: OffsetDateTime = datetime!(2026-06-13 10:00 UTC);
pub const EVENT_END: OffsetDateTime = datetime!(2026-06-13 14:00 UTC);
pub const BEFORE_START: OffsetDateTime = datetime!(2026-06-01 08:00 UTC);

pub type TestEngine = StatusEngine<InMemoryEventStore, FixedClock>;

pub fn create_test_engine() -> TestEngine {
    StatusEngine::new(InMemoryEventStore::new(), FixedClock::new(BEFORE_START))
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Administrator)
}

pub fn create_test_volunteer(id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(id.to_string(), Role::Volunteer)
}

pub fn create_test_merchant(id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(id.to_string(), Role::Merchant)
}

pub fn create_valid_request(event_type: &str, expected_volunteers: i64) -> CreateEventRequest {
    CreateEventRequest {
        title: String::from("Community pantry restock"),
        event_type: event_type.to_string(),
        start: EVENT_START,
        end: EVENT_END,
        expected_volunteers,
        parent_event_id: None,
    }
}

/// Creates an event as the test administrator and returns its id.
pub fn create_test_event(engine: &mut TestEngine, event_type: &str, expected: i64) -> i64 {
    create_event(
        engine,
        &create_valid_request(event_type, expected),
        &create_test_admin(),
    )
    .unwrap()
    .event_id
}
