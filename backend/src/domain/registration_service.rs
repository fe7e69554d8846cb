//! Registration use-case.
//!
//! Hashes the password on a blocking thread, then upserts the record into the
//! `users` collection keyed by email. Backend failures are logged here with
//! the attempted operation and returned as domain errors; their messages
//! never reach the client.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, RegistrationCommand, RegistrationPersistenceError,
    RegistrationRepository, USERS_COLLECTION,
};
use crate::domain::{Error, Password, PasswordHash, RegisteredUser, Registration, UserRecord};

/// Registration service implementing [`RegistrationCommand`].
pub struct RegistrationService<R, H> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> Clone for RegistrationService<R, H> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<R, H> RegistrationService<R, H> {
    /// Create a service over the given store and hasher.
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }
}

impl<R, H> RegistrationService<R, H>
where
    R: RegistrationRepository,
    H: PasswordHasher + 'static,
{
    async fn hash_password(&self, password: Password) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| {
                error!(error = %err, "password hashing task did not complete");
                Error::internal("password hashing task failed")
            })?
            .map_err(map_hash_error)
    }
}

fn map_hash_error(err: PasswordHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal(err.to_string())
}

fn map_persistence_error(record: &UserRecord, err: RegistrationPersistenceError) -> Error {
    error!(
        operation = "upsert",
        collection = USERS_COLLECTION,
        document_id = %record.email(),
        error = %err,
        "failed to store registration"
    );
    match err {
        RegistrationPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("registration store unavailable: {message}"))
        }
        RegistrationPersistenceError::Query { message } => {
            Error::internal(format!("registration store error: {message}"))
        }
    }
}

#[async_trait]
impl<R, H> RegistrationCommand for RegistrationService<R, H>
where
    R: RegistrationRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: Registration) -> Result<RegisteredUser, Error> {
        let (name, email, password) = registration.into_parts();
        let password_hash = self.hash_password(password).await?;
        let record = UserRecord::new(name, email, password_hash);

        self.repository
            .upsert(&record)
            .await
            .map_err(|err| map_persistence_error(&record, err))?;

        info!(
            collection = USERS_COLLECTION,
            document_id = %record.email(),
            "user registered"
        );
        Ok(RegisteredUser::from(record))
    }
}
