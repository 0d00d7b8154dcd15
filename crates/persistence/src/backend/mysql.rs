// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! MySQL/MariaDB-specific persistence utilities.
//!
//! Connection initialization, migrations and validation for `MariaDB`.
//! `SQLite` remains the default backend for development and tests; this
//! module is exercised by the `#[ignore]`d validation tests that
//! `cargo xtask test-mariadb` runs against a throwaway container, with
//! `DATABASE_URL` and `GLEANER_TEST_BACKEND=mariadb` set.
//!
//! ## Schema Parity
//!
//! `migrations_mysql/` must stay schema-equivalent to `migrations/`: same
//! tables, columns, constraints, foreign keys and indexes, in
//! backend-appropriate syntax. Change both directories together.

use diesel::dsl::sql;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

/// Result type for foreign key check query.
#[derive(QueryableByName)]
struct ForeignKeyCheck {
    #[diesel(sql_type = Integer)]
    fk_checks: i32,
}

/// Returns the auto-increment id of the row most recently inserted on `conn`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut MysqlConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("LAST_INSERT_ID()")).get_result(conn)?)
}

/// `MySQL`-specific migrations, embedded from `migrations_mysql/`.
pub const MYSQL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations_mysql");

/// Connects to `database_url` and applies pending migrations.
///
/// The URL is not logged since it usually carries credentials.
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<MysqlConnection, PersistenceError> {
    info!("Initializing MySQL database");

    let mut conn: MysqlConnection = MysqlConnection::establish(database_url)?;

    run_migrations(&mut conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Applies pending `migrations_mysql/` migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub fn run_migrations(
    conn: &mut MysqlConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Running MySQL database migrations");
    conn.run_pending_migrations(MYSQL_MIGRATIONS)?;
    Ok(())
}

/// Checks `@@foreign_key_checks`, which `InnoDB` honors for the event tables.
///
/// # Errors
///
/// Returns an error if enforcement is off or the check cannot be run.
pub fn verify_foreign_key_enforcement(conn: &mut MysqlConnection) -> Result<(), PersistenceError> {
    // NOTE: raw SQL, Diesel has no DSL for system variables
    let check: ForeignKeyCheck = diesel::sql_query("SELECT @@foreign_key_checks AS fk_checks")
        .get_result(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("Failed to verify foreign key enforcement: {e}"))
        })?;

    if check.fk_checks != 1 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    info!("MySQL foreign key enforcement is enabled");
    Ok(())
}
