//! Driving port for the registration use-case.
//!
//! Inbound adapters validate a submission into a [`Registration`] and hand it
//! to this port; they never touch the store or the hasher directly.

use async_trait::async_trait;

use crate::domain::{Error, PasswordHash, RegisteredUser, Registration, UserRecord};

/// Domain use-case port for registering a user.
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Persist `registration`, replacing any record under the same email.
    async fn register(&self, registration: Registration) -> Result<RegisteredUser, Error>;
}

/// Registration command that accepts every submission without storing it.
///
/// Useful for exercising inbound adapters without a store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistrationCommand;

#[async_trait]
impl RegistrationCommand for FixtureRegistrationCommand {
    async fn register(&self, registration: Registration) -> Result<RegisteredUser, Error> {
        let (name, email, _password) = registration.into_parts();
        let record = UserRecord::new(name, email, PasswordHash::new("fixture"));
        Ok(RegisteredUser::from(record))
    }
}
