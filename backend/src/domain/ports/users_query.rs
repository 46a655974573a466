//! Driving port for read-only user operations.
//!
//! HTTP handlers depend on this trait rather than on persistence, so they can
//! be exercised against any implementation.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Read use-cases over users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every stored user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user identified by the raw path segment `raw_id`.
    async fn get_user(&self, raw_id: &str) -> Result<User, Error>;
}
