//! Driven port for persisting registration records.
//!
//! The store behaves like a document collection: records live in
//! [`USERS_COLLECTION`] under their email address, and writing an existing
//! address replaces the previous record.

use async_trait::async_trait;

use crate::domain::UserRecord;

use super::define_port_error;

/// Collection (table) holding registration records.
pub const USERS_COLLECTION: &str = "users";

define_port_error! {
    /// Persistence errors raised by registration store adapters.
    pub enum RegistrationPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "registration store connection failed: {message}",
        /// The write was attempted and failed.
        Query { message: String } => "registration store query failed: {message}",
    }
}

/// Create-or-overwrite access to the `users` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert the record, or replace the record stored under the same email.
    async fn upsert(&self, record: &UserRecord) -> Result<(), RegistrationPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        RegistrationPersistenceError::connection("refused"),
        "registration store connection failed: refused"
    )]
    #[case(
        RegistrationPersistenceError::query("deadlock detected"),
        "registration store query failed: deadlock detected"
    )]
    fn errors_render_context(#[case] error: RegistrationPersistenceError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
