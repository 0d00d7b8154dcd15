// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test also exercises connection setup, migrations
//! and foreign key enforcement through `Persistence::new_in_memory()`.

use gleaner::{EventFilter, EventStore};
use gleaner_domain::EventType;
use std::sync::atomic::{AtomicU64, Ordering};

use super::insert_test_event;
use crate::{Persistence, PersistenceError};

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    insert_test_event(&mut db1, EventType::Market, 1);

    assert_eq!(db1.query_events(&EventFilter::all()).unwrap().len(), 1);
    assert!(db2.query_events(&EventFilter::all()).unwrap().is_empty());
}

#[test]
fn test_file_database_persists_across_connections() {
    let path = std::env::temp_dir().join(format!(
        "gleaner_init_test_{}_{}.db",
        std::process::id(),
        FILE_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));

    let event_id = {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        insert_test_event(&mut persistence, EventType::Training, 2).id
    };
    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let event = reopened.load_event(event_id).unwrap();

    assert_eq!(event.event_type, EventType::Training);
    assert_eq!(event.status_history.len(), 1);

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
