//! Driven port for one-way password hashing.
//!
//! Hashing is CPU bound; callers on an async runtime should run it on a
//! blocking thread.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Failures raised while hashing a password.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its input or parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted one-way hash applied before a password is persisted.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;
}
