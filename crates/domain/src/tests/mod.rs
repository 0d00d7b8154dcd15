// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{
    Event, EventId, EventStatus, EventType, MerchantId, NewEvent, StatusHistoryEntry, VolunteerId,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const EVENT_START: OffsetDateTime = datetime!(2026-05-09 09:00 UTC);
pub const EVENT_END: OffsetDateTime = datetime!(2026-05-09 17:00 UTC);

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

pub fn create_test_event(
    event_type: EventType,
    expected_volunteers: u32,
    volunteers: i64,
    merchants: i64,
) -> Event {
    let initial: StatusHistoryEntry = StatusHistoryEntry::new(
        EventStatus::Incomplete,
        datetime!(2026-04-01 12:00 UTC),
        None,
        String::from("initial"),
    );
    let mut event: Event = Event::from_new(
        EventId::new(1),
        create_test_new_event(event_type, expected_volunteers),
        initial,
    );
    event.volunteers = (1..=volunteers).map(VolunteerId::new).collect();
    event.merchants = (1..=merchants).map(MerchantId::new).collect();
    event
}
