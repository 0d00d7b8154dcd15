// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-backend connection plumbing.
//!
//! Event queries and mutations are written once in Diesel DSL and expanded
//! per backend by `backend_fn!`. What cannot be written that way lives here:
//! opening a connection, applying the embedded migrations, reading the id
//! of a freshly inserted event and confirming that foreign keys are
//! enforced, since volunteer, merchant and history rows all hang off
//! `events`.
//!
//! `sqlite` is the default backend. `mysql` covers `MariaDB` and is only
//! exercised by the opt-in validation tests.

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// Operations the event mutations need that differ between backends.
pub trait PersistenceBackend: Connection {
    /// Short backend name used in logs and `Debug` output.
    const NAME: &'static str;

    /// Id of the event row inserted last on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Fails unless the connection enforces foreign keys.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    const NAME: &'static str = "sqlite";

    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

impl PersistenceBackend for MysqlConnection {
    const NAME: &'static str = "mysql";

    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
