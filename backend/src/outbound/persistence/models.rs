//! Internal Diesel row structs. Never exposed outside the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::users;

/// Row read back from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Insertable row for a new registration.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
}

/// Columns overwritten when the email is already registered.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserOverwrite<'a> {
    pub name: &'a str,
    pub password_hash: &'a str,
    pub updated_at: DateTime<Utc>,
}
