//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; the repository converts them to
//! domain types before returning.

use diesel::prelude::*;

use super::schema::users;

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Values for a new `users` row; `id` comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Changeset replacing both mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
}
