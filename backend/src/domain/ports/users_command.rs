//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft};

/// Write use-cases over users.
///
/// Identifiers arrive as raw path segments; implementations parse them after
/// payload validation so that payload errors take precedence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate `draft` and persist it as a new user.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Validate `draft` and replace the name and email of user `raw_id`.
    async fn update_user(&self, raw_id: &str, draft: UserDraft) -> Result<User, Error>;

    /// Remove user `raw_id`. Missing users are not an error.
    async fn delete_user(&self, raw_id: &str) -> Result<(), Error>;
}
