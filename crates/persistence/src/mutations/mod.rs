// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Mutations use Diesel DSL, with backend-specific helpers (e.g. the last
//! inserted row id) reached through the `PersistenceBackend` trait.

pub mod events;

pub use events::{
    add_merchant_mysql, add_merchant_sqlite, add_volunteer_mysql, add_volunteer_sqlite,
    insert_event_mysql, insert_event_sqlite, remove_volunteer_mysql, remove_volunteer_sqlite,
    save_status_mysql, save_status_sqlite,
};
