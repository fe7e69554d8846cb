//! PostgreSQL-backed `RegistrationRepository` using Diesel.
//!
//! The `users` table is keyed by email, so an upsert is a single
//! `INSERT ... ON CONFLICT (email) DO UPDATE` statement.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RegistrationPersistenceError, RegistrationRepository};
use crate::domain::{EmailAddress, FullName, PasswordHash, UserRecord};

use super::models::{NewUserRow, UserOverwrite, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`RegistrationRepository`] port.
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Look up the record stored under `email`.
    ///
    /// Registration never reads records back; this exists for operational
    /// checks and tests.
    pub async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, RegistrationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }
}

fn map_pool_error(error: PoolError) -> RegistrationPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RegistrationPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RegistrationPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RegistrationPersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => {
            RegistrationPersistenceError::query("database query error")
        }
        _ => RegistrationPersistenceError::query("database error"),
    }
}

fn row_to_record(row: UserRow) -> Result<UserRecord, RegistrationPersistenceError> {
    let name = FullName::new(row.name)
        .map_err(|err| RegistrationPersistenceError::query(format!("stored name: {err}")))?;
    let email = EmailAddress::new(row.email)
        .map_err(|err| RegistrationPersistenceError::query(format!("stored email: {err}")))?;
    Ok(UserRecord::new(
        name,
        email,
        PasswordHash::new(row.password_hash),
    ))
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn upsert(&self, record: &UserRecord) -> Result<(), RegistrationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            email: record.email().as_ref(),
            name: record.name().as_ref(),
            password_hash: record.password_hash().as_ref(),
        };
        let overwrite = UserOverwrite {
            name: record.name().as_ref(),
            password_hash: record.password_hash().as_ref(),
            updated_at: Utc::now(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::email)
            .do_update()
            .set(&overwrite)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
