//! Diesel table definitions.
//!
//! Kept in sync with `backend/migrations` by hand; the migration is the
//! source of truth for constraints.

diesel::table! {
    /// Registered users. `name` and `email` each carry a UNIQUE constraint
    /// (`users_name_key`, `users_email_key`).
    users (id) {
        /// SERIAL primary key assigned by the database.
        id -> Int4,
        /// Display name, at most 255 characters.
        name -> Varchar,
        /// Contact email, at most 255 characters.
        email -> Varchar,
    }
}
