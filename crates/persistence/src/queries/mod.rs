// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic read-only queries.
//!
//! All queries use Diesel DSL and are generated for both backends via
//! `backend_fn!`.

pub mod events;

pub use events::{
    get_donation_note_mysql, get_donation_note_sqlite, load_event_mysql, load_event_sqlite,
    load_events_mysql, load_events_sqlite,
};
