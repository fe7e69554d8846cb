//! Registration store adapters.
//!
//! - [`DieselRegistrationRepository`]: PostgreSQL via Diesel, `diesel-async`
//!   and a `bb8` pool. Row structs (`models.rs`) and table definitions
//!   (`schema.rs`) stay private to this module.
//! - [`InMemoryRegistrationRepository`]: process-local fallback when no
//!   database URL is configured.
//!
//! Adapters only translate between rows and domain types and map driver
//! errors onto [`RegistrationPersistenceError`](crate::domain::ports::RegistrationPersistenceError).
//!
//! # Example
//!
//! ```ignore
//! use registration::outbound::persistence::{
//!     DbPool, DieselRegistrationRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! run_pending_migrations("postgres://localhost/registrations").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registrations")).await?;
//! let repo = DieselRegistrationRepository::new(pool);
//! ```

mod diesel_registration_repository;
mod in_memory_registration_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_registration_repository::DieselRegistrationRepository;
pub use in_memory_registration_repository::InMemoryRegistrationRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
