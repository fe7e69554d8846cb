//! Integration tests for `DieselRegistrationRepository` against PostgreSQL.
//!
//! Set `REGISTRATION_TEST_DATABASE_URL` to a disposable database to run
//! them; they pass vacuously otherwise. Each test writes under a fresh email
//! so runs do not interfere.

use registration::domain::ports::RegistrationRepository;
use registration::domain::{EmailAddress, FullName, PasswordHash, UserRecord};
use registration::outbound::persistence::{
    DbPool, DieselRegistrationRepository, PoolConfig, run_pending_migrations,
};
use rstest::{fixture, rstest};

const DATABASE_URL_VAR: &str = "REGISTRATION_TEST_DATABASE_URL";

#[fixture]
fn unique_email() -> EmailAddress {
    EmailAddress::new(format!("{}@example.com", uuid::Uuid::new_v4())).expect("valid email")
}

fn record(name: &str, email: &EmailAddress, hash: &str) -> UserRecord {
    UserRecord::new(
        FullName::new(name).expect("valid name"),
        email.clone(),
        PasswordHash::new(hash),
    )
}

async fn repository() -> Option<DieselRegistrationRepository> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        eprintln!("{DATABASE_URL_VAR} not set; skipping Diesel repository test");
        return None;
    };
    run_pending_migrations(&url)
        .await
        .expect("migrations apply");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("pool builds");
    Some(DieselRegistrationRepository::new(pool))
}

#[rstest]
#[tokio::test]
async fn upsert_inserts_then_overwrites(unique_email: EmailAddress) {
    let Some(repository) = repository().await else {
        return;
    };

    repository
        .upsert(&record("Ann", &unique_email, "$argon2id$first"))
        .await
        .expect("insert");
    repository
        .upsert(&record("Annie", &unique_email, "$argon2id$second"))
        .await
        .expect("overwrite");

    let stored = repository
        .find_by_email(&unique_email)
        .await
        .expect("lookup")
        .expect("record present");
    assert_eq!(stored.name().as_ref(), "Annie");
    assert_eq!(stored.password_hash().as_ref(), "$argon2id$second");
}

#[rstest]
#[tokio::test]
async fn unknown_email_is_absent(unique_email: EmailAddress) {
    let Some(repository) = repository().await else {
        return;
    };

    let stored = repository
        .find_by_email(&unique_email)
        .await
        .expect("lookup");
    assert!(stored.is_none());
}
