//! Process-local `RegistrationRepository` used when no database is configured.
//!
//! Records are lost on restart. Upserts never fail.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::UserRecord;
use crate::domain::ports::{RegistrationPersistenceError, RegistrationRepository};

/// In-memory `users` collection keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryRegistrationRepository {
    records: Mutex<HashMap<String, UserRecord>>,
}

impl InMemoryRegistrationRepository {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record stored under `email`, if any.
    pub fn get(&self, email: &str) -> Option<UserRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn upsert(&self, record: &UserRecord) -> Result<(), RegistrationPersistenceError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.email().as_ref().to_owned(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, FullName, PasswordHash};
    use rstest::rstest;

    fn record(name: &str, email: &str) -> UserRecord {
        UserRecord::new(
            FullName::new(name).expect("name"),
            EmailAddress::new(email).expect("email"),
            PasswordHash::new(format!("$argon2id${name}")),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn last_write_wins_per_email() {
        let repo = InMemoryRegistrationRepository::new();
        repo.upsert(&record("Ann", "ann@x.com"))
            .await
            .expect("first");
        repo.upsert(&record("Annie", "ann@x.com"))
            .await
            .expect("second");

        assert_eq!(repo.len(), 1);
        let stored = repo.get("ann@x.com").expect("stored");
        assert_eq!(stored.name().as_ref(), "Annie");
        assert_eq!(stored.password_hash().as_ref(), "$argon2id$Annie");
    }

    #[rstest]
    #[tokio::test]
    async fn distinct_emails_are_kept_apart() {
        let repo = InMemoryRegistrationRepository::new();
        repo.upsert(&record("Ann", "ann@x.com")).await.expect("ann");
        repo.upsert(&record("Bob", "bob@x.com")).await.expect("bob");

        assert_eq!(repo.len(), 2);
        assert!(repo.get("carol@x.com").is_none());
    }

    #[rstest]
    fn starts_empty() {
        assert!(InMemoryRegistrationRepository::new().is_empty());
    }
}
