//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! Single-row lookups use `.optional()` so "no rows" becomes `Ok(None)`.
//! Unique violations are reported with the offending column, resolved from
//! the constraint name Postgres attaches to the error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UniqueField, UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserDetails, UserId, UserName};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const NAME_CONSTRAINT: &str = "users_name_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

/// Work out which column a unique violation refers to.
fn unique_field(info: &(dyn DatabaseErrorInformation + Send + Sync)) -> Option<UniqueField> {
    match info.constraint_name() {
        Some(NAME_CONSTRAINT) => return Some(UniqueField::Name),
        Some(EMAIL_CONSTRAINT) => return Some(UniqueField::Email),
        _ => {}
    }
    let message = info.message();
    if message.contains(EMAIL_CONSTRAINT) {
        Some(UniqueField::Email)
    } else if message.contains(NAME_CONSTRAINT) {
        Some(UniqueField::Name)
    } else {
        None
    }
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            match unique_field(info.as_ref()) {
                Some(field) => UserPersistenceError::unique_violation(field),
                None => UserPersistenceError::query("unexpected unique constraint violation"),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> User {
    User::from_stored(UserId::new(row.id), row.name, row.email)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn find_by_name_or_email(
        &self,
        name: &UserName,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(
                users::name
                    .eq(name.as_ref())
                    .or(users::email.eq(email.as_ref())),
            )
            .order(users::id.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn find_by_email_excluding(
        &self,
        email: &EmailAddress,
        excluded: UserId,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .filter(users::id.ne(excluded.get()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn insert(&self, details: &UserDetails) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            name: details.name.as_ref(),
            email: details.email.as_ref(),
        };
        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_user(row))
    }

    async fn update(
        &self,
        id: UserId,
        details: &UserDetails,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserUpdate {
            name: details.name.as_ref(),
            email: details.email.as_ref(),
        };
        let affected = diesel::update(users::table.find(id.get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: UserId) -> Result<usize, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; queries themselves need a live database.
    use super::*;
    use rstest::rstest;

    struct PgErrorInfo {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for PgErrorInfo {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("users")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        message: &'static str,
        constraint: Option<&'static str>,
    ) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(PgErrorInfo { message, constraint }))
    }

    #[rstest]
    #[case(Some("users_name_key"), "duplicate key", UniqueField::Name)]
    #[case(Some("users_email_key"), "duplicate key", UniqueField::Email)]
    #[case(
        None,
        "duplicate key value violates unique constraint \"users_email_key\"",
        UniqueField::Email
    )]
    #[case(
        None,
        "duplicate key value violates unique constraint \"users_name_key\"",
        UniqueField::Name
    )]
    fn unique_violations_name_the_column(
        #[case] constraint: Option<&'static str>,
        #[case] message: &'static str,
        #[case] field: UniqueField,
    ) {
        let error = database_error(DatabaseErrorKind::UniqueViolation, message, constraint);

        assert_eq!(
            map_diesel_error(error),
            UserPersistenceError::unique_violation(field)
        );
    }

    #[rstest]
    fn unknown_unique_constraint_is_a_query_error() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key",
            Some("users_pkey"),
        );

        assert!(matches!(
            map_diesel_error(error),
            UserPersistenceError::Query { .. }
        ));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = database_error(DatabaseErrorKind::ClosedConnection, "closed", None);

        assert!(matches!(
            map_diesel_error(error),
            UserPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_failures_are_query_errors(#[case] error: DieselError) {
        assert_eq!(
            map_diesel_error(error),
            UserPersistenceError::query("database error")
        );
    }

    #[rstest]
    #[case(NAME_CONSTRAINT, "name")]
    #[case(EMAIL_CONSTRAINT, "email")]
    fn migration_attaches_constraints_to_existing_tables(
        #[case] constraint: &str,
        #[case] column: &str,
    ) {
        let up = include_str!("../../../migrations/2025-01-01-000000_create_users/up.sql");

        assert!(up.contains(&format!("CONSTRAINT {constraint} UNIQUE ({column})")));
        assert!(up.contains(&format!(
            "ALTER TABLE users ADD CONSTRAINT {constraint} UNIQUE ({column})"
        )));
        assert!(up.contains(&format!("WHERE conname = '{constraint}'")));
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            UserPersistenceError::connection("timed out")
        );
    }
}
