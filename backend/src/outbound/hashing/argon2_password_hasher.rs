//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Each hash gets a fresh 16-byte salt from the operating system RNG and is
//! encoded as a PHC string (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! the parameters travel with the hash and verification needs no extra state.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Argon2id password hasher.
///
/// # Examples
/// ```
/// use registration::domain::Password;
/// use registration::domain::ports::PasswordHasher;
/// use registration::outbound::hashing::Argon2PasswordHasher;
///
/// let params = argon2::Params::new(argon2::Params::MIN_M_COST, 1, 1, None).unwrap();
/// let hasher = Argon2PasswordHasher::new(params);
/// let password = Password::new("Abc123").unwrap();
/// let hash = hasher.hash(&password).unwrap();
/// assert!(hash.as_ref().starts_with("$argon2id$"));
/// assert!(hasher.verify("Abc123", &hash).unwrap());
/// ```
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher using explicit cost parameters.
    pub fn new(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Check `candidate` against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when `hash` is not a valid PHC
    /// string.
    pub fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcString::new(hash.as_ref())
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(self
            .argon2
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok())
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|phc| PasswordHash::new(phc.to_string()))
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }
}
