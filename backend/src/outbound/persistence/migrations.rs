//! Embedded schema migrations applied at startup.
//!
//! Diesel's migration harness needs a synchronous connection, so migrations
//! run on a blocking thread with a dedicated `PgConnection`.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Could not open the migration connection.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply any pending migrations to the database at `database_url`.
///
/// # Errors
///
/// Returns [`MigrationError`] when the connection cannot be established or a
/// migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url).map_err(|err| MigrationError::Connection {
            message: err.to_string(),
        })?;
        let applied =
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|err| MigrationError::Apply {
                    message: err.to_string(),
                })?;
        info!(count = applied.len(), "database migrations applied");
        Ok::<(), MigrationError>(())
    })
    .await
    .map_err(|err| MigrationError::Apply {
        message: err.to_string(),
    })?
}
