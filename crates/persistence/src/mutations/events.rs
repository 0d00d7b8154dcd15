// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event mutations.
//!
//! Every mutation that changes an event bumps its `version`. Status writes
//! are conditional on the caller's version and append exactly one history
//! row in the same transaction.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use gleaner_domain::{NewEvent, StatusHistoryEntry};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewEventRow, NewHistoryRow, expected_volunteers_column, unix_nanos};
use crate::diesel_schema::{event_merchants, event_status_history, event_volunteers, events};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts an event and its first history entry.
///
/// The event takes its status from `initial` and starts at version 1.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if either insert fails; nothing is written in that case.
pub fn insert_event(
    conn: &mut _,
    new_event: &NewEvent,
    initial: &StatusHistoryEntry,
) -> Result<i64, PersistenceError> {
    let expected_volunteers: i32 = expected_volunteers_column(new_event.expected_volunteers)?;
    let starts_at: i64 = unix_nanos(new_event.start)?;
    let ends_at: i64 = unix_nanos(new_event.end)?;
    let created_at: i64 = unix_nanos(initial.changed_at)?;
    let initial_row: NewHistoryRow<'_> = NewHistoryRow::from_entry(0, 0, initial)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(events::table)
            .values(&NewEventRow {
                title: &new_event.title,
                event_type: new_event.event_type.as_str(),
                starts_at,
                ends_at,
                expected_volunteers,
                status: initial.value.as_str(),
                version: 1,
                parent_event_id: new_event.parent_event_id.map(|id| id.value()),
                created_at,
            })
            .execute(conn)?;

        let event_id: i64 = conn.get_last_insert_rowid()?;

        diesel::insert_into(event_status_history::table)
            .values(&NewHistoryRow {
                event_id,
                ..initial_row
            })
            .execute(conn)?;

        info!("Created event with ID: {}", event_id);
        Ok(event_id)
    })
}
}

backend_fn! {
/// Sets an event's status and appends a history row, if the version matches.
///
/// # Errors
///
/// - `PersistenceError::EventNotFound` if the event does not exist
/// - `PersistenceError::VersionConflict` if the stored version is not `expected_version`
pub fn save_status(
    conn: &mut _,
    event_id: i64,
    expected_version: i64,
    entry: &StatusHistoryEntry,
) -> Result<(), PersistenceError> {
    let row: NewHistoryRow<'_> = NewHistoryRow::from_entry(event_id, 0, entry)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::update(events::table)
            .filter(events::event_id.eq(event_id))
            .filter(events::version.eq(expected_version))
            .set((
                events::status.eq(entry.value.as_str()),
                events::version.eq(events::version + 1),
            ))
            .execute(conn)?;

        if rows_affected == 0 {
            let actual: Option<i64> = events::table
                .filter(events::event_id.eq(event_id))
                .select(events::version)
                .first(conn)
                .optional()?;
            return Err(actual.map_or(
                PersistenceError::EventNotFound(event_id),
                |actual| PersistenceError::VersionConflict {
                    event_id,
                    expected: expected_version,
                    actual,
                },
            ));
        }

        let last_index: Option<i32> = event_status_history::table
            .filter(event_status_history::event_id.eq(event_id))
            .select(diesel::dsl::max(event_status_history::entry_index))
            .first(conn)?;
        let entry_index: i32 = last_index.map_or(0, |index| index + 1);

        diesel::insert_into(event_status_history::table)
            .values(&NewHistoryRow { entry_index, ..row })
            .execute(conn)?;

        debug!(
            "Event {} status set to {} at version {}",
            event_id,
            entry.value,
            expected_version + 1
        );
        Ok(())
    })
}
}

backend_fn! {
/// Registers a volunteer for an event.
///
/// Registering an already registered volunteer changes nothing.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if the event does not exist.
pub fn add_volunteer(
    conn: &mut _,
    event_id: i64,
    volunteer_id: i64,
    registered_at: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let exists: Option<i64> = events::table
            .filter(events::event_id.eq(event_id))
            .select(events::event_id)
            .first(conn)
            .optional()?;
        if exists.is_none() {
            return Err(PersistenceError::EventNotFound(event_id));
        }

        let inserted: usize = diesel::insert_or_ignore_into(event_volunteers::table)
            .values((
                event_volunteers::event_id.eq(event_id),
                event_volunteers::volunteer_id.eq(volunteer_id),
                event_volunteers::registered_at.eq(registered_at),
            ))
            .execute(conn)?;
        if inserted > 0 {
            diesel::update(events::table)
                .filter(events::event_id.eq(event_id))
                .set(events::version.eq(events::version + 1))
                .execute(conn)?;
        }
        Ok(())
    })
}
}

backend_fn! {
/// Removes a volunteer from an event.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if the event does not exist.
pub fn remove_volunteer(
    conn: &mut _,
    event_id: i64,
    volunteer_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let exists: Option<i64> = events::table
            .filter(events::event_id.eq(event_id))
            .select(events::event_id)
            .first(conn)
            .optional()?;
        if exists.is_none() {
            return Err(PersistenceError::EventNotFound(event_id));
        }

        let deleted: usize = diesel::delete(event_volunteers::table)
            .filter(event_volunteers::event_id.eq(event_id))
            .filter(event_volunteers::volunteer_id.eq(volunteer_id))
            .execute(conn)?;
        if deleted > 0 {
            diesel::update(events::table)
                .filter(events::event_id.eq(event_id))
                .set(events::version.eq(events::version + 1))
                .execute(conn)?;
        }
        Ok(())
    })
}
}

backend_fn! {
/// Records a merchant donation for an event.
///
/// A merchant that already donated keeps its original note.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if the event does not exist.
pub fn add_merchant(
    conn: &mut _,
    event_id: i64,
    merchant_id: i64,
    note: Option<&str>,
    attached_at: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let exists: Option<i64> = events::table
            .filter(events::event_id.eq(event_id))
            .select(events::event_id)
            .first(conn)
            .optional()?;
        if exists.is_none() {
            return Err(PersistenceError::EventNotFound(event_id));
        }

        let inserted: usize = diesel::insert_or_ignore_into(event_merchants::table)
            .values((
                event_merchants::event_id.eq(event_id),
                event_merchants::merchant_id.eq(merchant_id),
                event_merchants::attached_at.eq(attached_at),
                event_merchants::donation_note.eq(note),
            ))
            .execute(conn)?;
        if inserted > 0 {
            diesel::update(events::table)
                .filter(events::event_id.eq(event_id))
                .set(events::version.eq(events::version + 1))
                .execute(conn)?;
        }
        Ok(())
    })
}
}
