//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod password_hasher;
mod registration_command;
mod registration_repository;

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use registration_command::{FixtureRegistrationCommand, RegistrationCommand};
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{
    RegistrationPersistenceError, RegistrationRepository, USERS_COLLECTION,
};
