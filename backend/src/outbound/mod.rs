//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: the registration store (PostgreSQL via Diesel, or an
//!   in-memory fallback)
//! - **hashing**: Argon2id password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod hashing;
pub mod persistence;
