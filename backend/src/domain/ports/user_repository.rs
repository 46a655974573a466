//! Driven port for user persistence.
//!
//! The domain talks to the store only through [`UserRepository`]. Adapters
//! translate "no rows" into `Ok(None)` and reserve errors for genuine
//! failures, so callers can tell a missing user from a broken database.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserDetails, UserId, UserName};

/// User attribute guarded by a store-level uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    /// `users.name`
    Name,
    /// `users.email`
    Email,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
        })
    }
}

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// A connection could not be obtained or was lost.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// A uniqueness constraint rejected the write.
    #[error("user repository unique constraint violated on {field}")]
    UniqueViolation { field: UniqueField },
}

impl UserPersistenceError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a unique violation error for `field`.
    pub fn unique_violation(field: UniqueField) -> Self {
        Self::UniqueViolation { field }
    }
}

/// Port for user storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by identifier.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// The user with `id`, if present.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Any user whose name equals `name` or whose email equals `email`.
    async fn find_by_name_or_email(
        &self,
        name: &UserName,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Any user other than `excluded` whose email equals `email`.
    async fn find_by_email_excluding(
        &self,
        email: &EmailAddress,
        excluded: UserId,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new row and return it with its store-assigned identifier.
    async fn insert(&self, details: &UserDetails) -> Result<User, UserPersistenceError>;

    /// Replace name and email of `id`. Returns `false` when no row matched.
    async fn update(
        &self,
        id: UserId,
        details: &UserDetails,
    ) -> Result<bool, UserPersistenceError>;

    /// Delete `id`, returning the number of rows removed.
    async fn delete(&self, id: UserId) -> Result<usize, UserPersistenceError>;
}
