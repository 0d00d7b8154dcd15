// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event queries.
//!
//! Events are loaded together with their volunteers, merchants and status
//! history. Child rows for a batch of events are fetched with one query per
//! table and grouped in memory.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use gleaner::EndBound;
use gleaner_domain::Event;
use tracing::debug;

use crate::data_models::{
    EventRow, HistoryRow, MerchantRow, VolunteerRow, assemble_events, unix_nanos,
};
use crate::diesel_schema::{event_merchants, event_status_history, event_volunteers, events};
use crate::error::PersistenceError;

backend_fn! {
/// Loads a single event with its participants and history.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no event has this id.
pub fn load_event(conn: &mut _, event_id: i64) -> Result<Event, PersistenceError> {
    debug!("Loading event ID: {}", event_id);

    let event_rows: Vec<EventRow> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .load(conn)?;
    if event_rows.is_empty() {
        return Err(PersistenceError::EventNotFound(event_id));
    }

    let volunteer_rows: Vec<VolunteerRow> = event_volunteers::table
        .filter(event_volunteers::event_id.eq(event_id))
        .select(VolunteerRow::as_select())
        .load(conn)?;
    let merchant_rows: Vec<MerchantRow> = event_merchants::table
        .filter(event_merchants::event_id.eq(event_id))
        .select(MerchantRow::as_select())
        .load(conn)?;
    let history_rows: Vec<HistoryRow> = event_status_history::table
        .filter(event_status_history::event_id.eq(event_id))
        .order(event_status_history::entry_index.asc())
        .select(HistoryRow::as_select())
        .load(conn)?;

    assemble_events(event_rows, volunteer_rows, merchant_rows, history_rows)?
        .pop()
        .ok_or(PersistenceError::EventNotFound(event_id))
}
}

backend_fn! {
/// Loads every event whose status is in `statuses` and whose end satisfies `end`.
///
/// Results are ordered by event id.
///
/// # Errors
///
/// Returns an error if a query fails or a stored row cannot be converted.
pub fn load_events(
    conn: &mut _,
    statuses: &[String],
    end: EndBound,
) -> Result<Vec<Event>, PersistenceError> {
    let base = events::table
        .filter(events::status.eq_any(statuses))
        .order(events::event_id.asc())
        .select(EventRow::as_select());
    let event_rows: Vec<EventRow> = match end {
        EndBound::Any => base.load(conn)?,
        EndBound::OnOrAfter(instant) => base
            .filter(events::ends_at.ge(unix_nanos(instant)?))
            .load(conn)?,
        EndBound::Before(instant) => base
            .filter(events::ends_at.lt(unix_nanos(instant)?))
            .load(conn)?,
    };
    debug!("Loaded {} events for status filter {:?}", event_rows.len(), statuses);

    let ids: Vec<i64> = event_rows.iter().map(|row| row.event_id).collect();
    let volunteer_rows: Vec<VolunteerRow> = event_volunteers::table
        .filter(event_volunteers::event_id.eq_any(&ids))
        .select(VolunteerRow::as_select())
        .load(conn)?;
    let merchant_rows: Vec<MerchantRow> = event_merchants::table
        .filter(event_merchants::event_id.eq_any(&ids))
        .select(MerchantRow::as_select())
        .load(conn)?;
    let history_rows: Vec<HistoryRow> = event_status_history::table
        .filter(event_status_history::event_id.eq_any(&ids))
        .order((
            event_status_history::event_id.asc(),
            event_status_history::entry_index.asc(),
        ))
        .select(HistoryRow::as_select())
        .load(conn)?;

    assemble_events(event_rows, volunteer_rows, merchant_rows, history_rows)
}
}

backend_fn! {
/// Retrieves the note recorded with a merchant's donation.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if there is no donation or it has no note.
pub fn get_donation_note(
    conn: &mut _,
    event_id: i64,
    merchant_id: i64,
) -> Result<Option<String>, PersistenceError> {
    let note: Option<Option<String>> = event_merchants::table
        .filter(event_merchants::event_id.eq(event_id))
        .filter(event_merchants::merchant_id.eq(merchant_id))
        .select(event_merchants::donation_note)
        .first(conn)
        .optional()?;
    Ok(note.flatten())
}
}
