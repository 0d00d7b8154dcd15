// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and conversions between rows and domain values.
//!
//! Timestamps are stored as Unix nanoseconds in `BIGINT` columns, so a
//! stored instant compares exactly like the `OffsetDateTime` it came from.

use diesel::prelude::*;
use gleaner_audit::{Actor, ActorKind};
use gleaner_domain::{
    Event, EventId, EventStatus, EventType, MerchantId, StatusHistory, StatusHistoryEntry,
    VolunteerId,
};
use num_traits::ToPrimitive;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use time::OffsetDateTime;

use crate::diesel_schema::{event_merchants, event_status_history, event_volunteers, events};
use crate::error::PersistenceError;

/// Diesel Queryable struct for event rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = events)]
pub struct EventRow {
    pub event_id: i64,
    pub title: String,
    pub event_type: String,
    pub starts_at: i64,
    pub ends_at: i64,
    pub expected_volunteers: i32,
    pub status: String,
    pub version: i64,
    pub parent_event_id: Option<i64>,
}

/// Insertable event row.
#[derive(Insertable)]
#[diesel(table_name = events)]
pub struct NewEventRow<'a> {
    pub title: &'a str,
    pub event_type: &'a str,
    pub starts_at: i64,
    pub ends_at: i64,
    pub expected_volunteers: i32,
    pub status: &'a str,
    pub version: i64,
    pub parent_event_id: Option<i64>,
    pub created_at: i64,
}

/// Diesel Queryable struct for volunteer registrations.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = event_volunteers)]
pub struct VolunteerRow {
    pub event_id: i64,
    pub volunteer_id: i64,
}

/// Diesel Queryable struct for merchant donations.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = event_merchants)]
pub struct MerchantRow {
    pub event_id: i64,
    pub merchant_id: i64,
}

/// Diesel Queryable struct for status history rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = event_status_history)]
pub struct HistoryRow {
    pub event_id: i64,
    pub status: String,
    pub changed_at: i64,
    pub changed_by_id: Option<String>,
    pub changed_by_kind: Option<String>,
    pub reason: String,
}

/// Insertable status history row.
#[derive(Insertable)]
#[diesel(table_name = event_status_history)]
pub struct NewHistoryRow<'a> {
    pub event_id: i64,
    pub entry_index: i32,
    pub status: &'a str,
    pub changed_at: i64,
    pub changed_by_id: Option<&'a str>,
    pub changed_by_kind: Option<&'a str>,
    pub reason: &'a str,
}

impl<'a> NewHistoryRow<'a> {
    /// Builds the row for `entry` at position `entry_index` of the event's history.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry's timestamp cannot be stored.
    pub fn from_entry(
        event_id: i64,
        entry_index: i32,
        entry: &'a StatusHistoryEntry,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            event_id,
            entry_index,
            status: entry.value.as_str(),
            changed_at: unix_nanos(entry.changed_at)?,
            changed_by_id: entry.changed_by.as_ref().map(|actor| actor.id.as_str()),
            changed_by_kind: entry.changed_by.as_ref().map(|actor| actor.kind.as_str()),
            reason: &entry.reason,
        })
    }
}

/// Converts a timestamp to its stored Unix nanoseconds.
///
/// # Errors
///
/// Returns an error if the instant lies outside the `i64` nanosecond range
/// (before 1677 or after 2262).
pub fn unix_nanos(instant: OffsetDateTime) -> Result<i64, PersistenceError> {
    instant.unix_timestamp_nanos().to_i64().ok_or_else(|| {
        PersistenceError::QueryFailed(format!("Timestamp {instant} out of storable range"))
    })
}

/// Converts stored Unix nanoseconds back into a timestamp.
///
/// # Errors
///
/// Returns an error if the value is out of range.
pub fn from_unix_nanos(nanos: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos))
        .map_err(|e| PersistenceError::ReconstructionError(format!("timestamp {nanos}: {e}")))
}

/// Converts an expected volunteer count to its column type.
///
/// # Errors
///
/// Returns an error if the count does not fit.
pub fn expected_volunteers_column(count: u32) -> Result<i32, PersistenceError> {
    count.to_i32().ok_or_else(|| {
        PersistenceError::QueryFailed(format!("Expected volunteer count {count} out of range"))
    })
}

fn history_entry_from_row(row: HistoryRow) -> Result<StatusHistoryEntry, PersistenceError> {
    let value: EventStatus = EventStatus::from_str(&row.status)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    let changed_by: Option<Actor> = match (row.changed_by_id, row.changed_by_kind) {
        (Some(id), Some(kind)) => {
            let kind: ActorKind = ActorKind::from_str(&kind)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
            Some(Actor::new(id, kind))
        }
        _ => None,
    };
    Ok(StatusHistoryEntry::new(
        value,
        from_unix_nanos(row.changed_at)?,
        changed_by,
        row.reason,
    ))
}

fn event_from_row(
    row: EventRow,
    volunteers: BTreeSet<VolunteerId>,
    merchants: BTreeSet<MerchantId>,
    history: Vec<StatusHistoryEntry>,
) -> Result<Event, PersistenceError> {
    let event_type: EventType = EventType::from_str(&row.event_type)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    let status: EventStatus = EventStatus::from_str(&row.status)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    let expected_volunteers: u32 = row.expected_volunteers.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!(
            "Negative expected volunteer count for event {}",
            row.event_id
        ))
    })?;

    Ok(Event {
        id: EventId::new(row.event_id),
        title: row.title,
        event_type,
        start: from_unix_nanos(row.starts_at)?,
        end: from_unix_nanos(row.ends_at)?,
        expected_volunteers,
        volunteers,
        merchants,
        status,
        status_history: StatusHistory::from_entries(history),
        parent_event_id: row.parent_event_id.map(EventId::new),
        version: row.version,
    })
}

/// Assembles domain events from their rows.
///
/// Child rows are grouped by event id. History rows must be ordered by
/// `entry_index` within each event; the result follows `event_rows` order.
///
/// # Errors
///
/// Returns an error if any stored value cannot be converted.
pub fn assemble_events(
    event_rows: Vec<EventRow>,
    volunteer_rows: Vec<VolunteerRow>,
    merchant_rows: Vec<MerchantRow>,
    history_rows: Vec<HistoryRow>,
) -> Result<Vec<Event>, PersistenceError> {
    let mut volunteers: BTreeMap<i64, BTreeSet<VolunteerId>> = BTreeMap::new();
    for row in volunteer_rows {
        volunteers
            .entry(row.event_id)
            .or_default()
            .insert(VolunteerId::new(row.volunteer_id));
    }

    let mut merchants: BTreeMap<i64, BTreeSet<MerchantId>> = BTreeMap::new();
    for row in merchant_rows {
        merchants
            .entry(row.event_id)
            .or_default()
            .insert(MerchantId::new(row.merchant_id));
    }

    let mut histories: BTreeMap<i64, Vec<StatusHistoryEntry>> = BTreeMap::new();
    for row in history_rows {
        let event_id: i64 = row.event_id;
        histories
            .entry(event_id)
            .or_default()
            .push(history_entry_from_row(row)?);
    }

    event_rows
        .into_iter()
        .map(|row| {
            let id: i64 = row.event_id;
            event_from_row(
                row,
                volunteers.remove(&id).unwrap_or_default(),
                merchants.remove(&id).unwrap_or_default(),
                histories.remove(&id).unwrap_or_default(),
            )
        })
        .collect()
}
