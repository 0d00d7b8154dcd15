// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event_status::EventStatus;
use crate::event_type::EventType;
use crate::types::{EventId, MerchantId, VolunteerId};
use gleaner_audit::{History, HistoryEntry};
use std::collections::BTreeSet;
use time::OffsetDateTime;

/// Append-only record of every status an event has held.
pub type StatusHistory = History<EventStatus>;

/// One recorded status change.
pub type StatusHistoryEntry = HistoryEntry<EventStatus>;

/// Input for creating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Display name.
    pub title: String,
    /// Which capacity rule applies.
    pub event_type: EventType,
    /// Scheduled start.
    pub start: OffsetDateTime,
    /// Scheduled end, never before `start`.
    pub end: OffsetDateTime,
    /// Volunteer headcount the event needs.
    pub expected_volunteers: u32,
    /// The recurring series this occurrence belongs to, if any.
    pub parent_event_id: Option<EventId>,
}

/// A scheduled event with its participation and status history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Storage-assigned identifier.
    pub id: EventId,
    /// Display name.
    pub title: String,
    /// Which capacity rule applies.
    pub event_type: EventType,
    /// Scheduled start.
    pub start: OffsetDateTime,
    /// Scheduled end.
    pub end: OffsetDateTime,
    /// Volunteer headcount the event needs.
    pub expected_volunteers: u32,
    /// Registered volunteers.
    pub volunteers: BTreeSet<VolunteerId>,
    /// Merchants that attached a donation.
    pub merchants: BTreeSet<MerchantId>,
    /// Current authoritative status.
    pub status: EventStatus,
    /// Every status change, oldest first. The last entry matches `status`.
    pub status_history: StatusHistory,
    /// The recurring series this occurrence belongs to, if any.
    pub parent_event_id: Option<EventId>,
    /// Write counter used for conditional updates.
    pub version: i64,
}

impl Event {
    /// Builds a freshly created event: `incomplete`, with `initial` as its only history entry.
    #[must_use]
    pub fn from_new(id: EventId, new_event: NewEvent, initial: StatusHistoryEntry) -> Self {
        let mut status_history: StatusHistory = StatusHistory::new();
        let status: EventStatus = initial.value;
        status_history.append(initial);
        Self {
            id,
            title: new_event.title,
            event_type: new_event.event_type,
            start: new_event.start,
            end: new_event.end,
            expected_volunteers: new_event.expected_volunteers,
            volunteers: BTreeSet::new(),
            merchants: BTreeSet::new(),
            status,
            status_history,
            parent_event_id: new_event.parent_event_id,
            version: 1,
        }
    }

    /// Records a status change: sets the status and appends the entry.
    ///
    /// This keeps the last history entry and `status` in agreement.
    pub fn record_status(&mut self, entry: StatusHistoryEntry) {
        self.status = entry.value;
        self.status_history.append(entry);
    }

    /// Returns true if `now` lies within `[start, end]`.
    #[must_use]
    pub fn is_running_at(&self, now: OffsetDateTime) -> bool {
        now >= self.start && now <= self.end
    }

    /// Returns true if the scheduled end is strictly before `now`.
    #[must_use]
    pub fn has_ended_by(&self, now: OffsetDateTime) -> bool {
        self.end < now
    }

    /// Returns true if enough volunteers are registered.
    #[must_use]
    pub fn has_enough_volunteers(&self) -> bool {
        usize::try_from(self.expected_volunteers)
            .is_ok_and(|expected| self.volunteers.len() >= expected)
    }

    /// Returns true if at least one merchant is participating.
    #[must_use]
    pub fn has_merchant(&self) -> bool {
        !self.merchants.is_empty()
    }
}
