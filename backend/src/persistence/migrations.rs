//! Embedded schema migrations applied at startup.
//!
//! Migrations are compiled into the binary so a fresh database file is
//! provisioned without external tooling. The Diesel migration harness is
//! synchronous, so it runs on the blocking thread pool with a dedicated
//! connection rather than a pooled async connection.

use diesel::{Connection, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

/// Migrations embedded from the crate's migrations directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying embedded migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Opening the database connection failed.
    #[error("failed to open database for migrations: {message}")]
    Connection { message: String },

    /// Applying pending migrations failed.
    #[error("failed to apply migrations: {message}")]
    Migration { message: String },
}

impl MigrationError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a migration error with the given message.
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration {
            message: message.into(),
        }
    }
}

/// Apply any pending migrations to the database at `database_url`.
///
/// Safe to call on every startup; already-applied migrations are skipped.
///
/// # Errors
///
/// Returns `MigrationError::Connection` when the database cannot be opened
/// and `MigrationError::Migration` when the harness fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = SqliteConnection::establish(&database_url)
            .map_err(|err| MigrationError::connection(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|err| MigrationError::migration(err.to_string()))
    })
    .await
    .map_err(|err| MigrationError::migration(format!("migration task failed: {err}")))?
}
