// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use gleaner::{SweepFailure, SweepReport};
use gleaner_domain::{Event, StatusHistoryEntry};
use time::OffsetDateTime;

/// API request to create a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    /// Display name.
    pub title: String,
    /// One of `collection`, `market`, `meeting`, `training`.
    pub event_type: String,
    /// Scheduled start.
    pub start: OffsetDateTime,
    /// Scheduled end.
    pub end: OffsetDateTime,
    /// Volunteer headcount the event needs. Must be positive.
    pub expected_volunteers: i64,
    /// The recurring series this occurrence belongs to.
    pub parent_event_id: Option<i64>,
}

/// API request to override an event's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEventStatusRequest {
    /// The requested status, e.g. `finished`.
    pub status: String,
    /// Why the status is being overridden.
    pub reason: Option<String>,
}

/// API request to register or unregister a volunteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolunteerRequest {
    /// The volunteer being (un)registered.
    pub volunteer_id: i64,
}

/// API request to attach a merchant's donation to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachDonationRequest {
    /// The donating merchant.
    pub merchant_id: i64,
    /// Free-form description of the donation.
    pub note: Option<String>,
}

/// One entry of an event's status history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatusHistoryInfo {
    /// The status that was set.
    pub status: String,
    /// When it was set.
    #[serde(with = "time::serde::rfc3339")]
    pub changed_at: OffsetDateTime,
    /// Who set it, as `kind:id`. Absent for unattributed recomputations.
    pub changed_by: Option<String>,
    /// Why it was set.
    pub reason: String,
}

impl From<&StatusHistoryEntry> for StatusHistoryInfo {
    fn from(entry: &StatusHistoryEntry) -> Self {
        Self {
            status: entry.value.as_str().to_string(),
            changed_at: entry.changed_at,
            changed_by: entry.changed_by.as_ref().map(ToString::to_string),
            reason: entry.reason.clone(),
        }
    }
}

/// An event as returned by every event-producing operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventInfo {
    /// The event identifier.
    pub event_id: i64,
    /// Display name.
    pub title: String,
    /// The event type.
    pub event_type: String,
    /// Scheduled start.
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    /// Scheduled end.
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    /// Volunteer headcount the event needs.
    pub expected_volunteers: u32,
    /// Registered volunteer ids, ascending.
    pub volunteers: Vec<i64>,
    /// Merchant ids with an attached donation, ascending.
    pub merchants: Vec<i64>,
    /// Current status.
    pub status: String,
    /// Write counter. Changes with every committed write.
    pub version: i64,
    /// The recurring series this occurrence belongs to.
    pub parent_event_id: Option<i64>,
    /// Every status the event has held, oldest first.
    pub status_history: Vec<StatusHistoryInfo>,
}

impl From<&Event> for EventInfo {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event.id.value(),
            title: event.title.clone(),
            event_type: event.event_type.as_str().to_string(),
            start: event.start,
            end: event.end,
            expected_volunteers: event.expected_volunteers,
            volunteers: event.volunteers.iter().map(|id| id.value()).collect(),
            merchants: event.merchants.iter().map(|id| id.value()).collect(),
            status: event.status.as_str().to_string(),
            version: event.version,
            parent_event_id: event.parent_event_id.map(|id| id.value()),
            status_history: event
                .status_history
                .iter()
                .map(StatusHistoryInfo::from)
                .collect(),
        }
    }
}

/// A per-event sweep failure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SweepFailureInfo {
    /// The event that could not be updated.
    pub event_id: i64,
    /// What went wrong.
    pub message: String,
}

impl From<&SweepFailure> for SweepFailureInfo {
    fn from(failure: &SweepFailure) -> Self {
        Self {
            event_id: failure.event_id.value(),
            message: failure.error.to_string(),
        }
    }
}

/// API response for a sweep run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SweepResponse {
    /// Events the sweep looked at.
    pub examined: usize,
    /// Events whose status changed.
    pub changed: usize,
    /// Events that could not be updated. The sweep continued past each.
    pub failures: Vec<SweepFailureInfo>,
}

impl From<&SweepReport> for SweepResponse {
    fn from(report: &SweepReport) -> Self {
        Self {
            examined: report.examined,
            changed: report.changed,
            failures: report.failures.iter().map(SweepFailureInfo::from).collect(),
        }
    }
}

/// API response listing events that ended but are still active.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListFinishableResponse {
    /// Candidates for a manual `finished` override, ascending by id.
    pub events: Vec<EventInfo>,
}

/// API response for a history backfill.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BackfillResponse {
    /// How many events received an initial history entry.
    pub backfilled: usize,
    /// A success message.
    pub message: String,
}
