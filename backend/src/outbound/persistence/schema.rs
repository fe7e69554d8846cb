//! Diesel table definitions; must match `backend/migrations`.

diesel::table! {
    /// Registration records, one row per email address.
    users (email) {
        /// Document identifier.
        email -> Varchar,
        name -> Varchar,
        /// Argon2id PHC string; plaintext is never stored.
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
