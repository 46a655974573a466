//! User domain service.
//!
//! Each operation is a short-circuit pipeline: the first failing check
//! decides the response and later checks never run. Store failures become
//! scoped errors for the triggering request; nothing here ends the process.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    UniqueField, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, User, UserDraft, UserId, UserValidationError};

/// Rejection for create payloads failing validation.
pub const INVALID_CREATE_INPUT: &str = "Invalid input: Name is required and Email must be valid";
/// Rejection for update payloads with missing fields.
pub const INVALID_UPDATE_INPUT: &str = "Name and Email are required";
/// Rejection for a path id that is not an integer.
pub const INVALID_USER_ID: &str = "Invalid user id";
/// No row exists for the requested id.
pub const USER_NOT_FOUND: &str = "User not found";
/// Create clashes with an existing name or email.
pub const DUPLICATE_USER: &str = "User with the same name or email already exists";
/// Update would reuse another user's email.
pub const EMAIL_IN_USE: &str = "Email already in use by another user";
/// Update would reuse another user's name.
pub const NAME_IN_USE: &str = "Name already in use by another user";
/// Update submits the stored name and email unchanged.
pub const NO_CHANGES: &str = "No changes detected";

const CHECK_FAILED: &str = "Error checking for existing user";
const CREATE_FAILED: &str = "Error creating user";
const LIST_FAILED: &str = "Error listing users";
const FETCH_FAILED: &str = "Error fetching user";
const UPDATE_FAILED: &str = "Error updating user";
const DELETE_FAILED: &str = "Error deleting user";

fn store_failure(err: UserPersistenceError, message: &'static str) -> Error {
    error!(error = %err, "{message}");
    match err {
        UserPersistenceError::Connection { .. } => Error::service_unavailable(message),
        UserPersistenceError::Query { .. } | UserPersistenceError::UniqueViolation { .. } => {
            Error::internal(message)
        }
    }
}

fn validation_failure(err: &UserValidationError, message: &'static str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

fn parse_id(raw_id: &str) -> Result<UserId, Error> {
    raw_id
        .parse()
        .map_err(|err| validation_failure(&err, INVALID_USER_ID))
}

/// Service implementing [`UsersQuery`] and [`UsersCommand`] over a
/// [`UserRepository`].
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service backed by `users`.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users
            .list()
            .await
            .map_err(|err| store_failure(err, LIST_FAILED))
    }

    async fn get_user(&self, raw_id: &str) -> Result<User, Error> {
        let id = parse_id(raw_id)?;
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(err, FETCH_FAILED))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let details = draft
            .validate_for_create()
            .map_err(|err| validation_failure(&err, INVALID_CREATE_INPUT))?;

        let existing = self
            .users
            .find_by_name_or_email(&details.name, &details.email)
            .await
            .map_err(|err| store_failure(err, CHECK_FAILED))?;
        if let Some(existing) = existing {
            info!(existing_id = %existing.id(), "create rejected: duplicate name or email");
            return Err(Error::conflict(DUPLICATE_USER));
        }

        match self.users.insert(&details).await {
            Ok(user) => {
                info!(user_id = %user.id(), "user created");
                Ok(user)
            }
            Err(UserPersistenceError::UniqueViolation { field }) => {
                info!(%field, "create lost a uniqueness race");
                Err(Error::conflict(DUPLICATE_USER))
            }
            Err(err) => Err(store_failure(err, CREATE_FAILED)),
        }
    }

    async fn update_user(&self, raw_id: &str, draft: UserDraft) -> Result<User, Error> {
        let details = draft
            .validate_for_update()
            .map_err(|err| validation_failure(&err, INVALID_UPDATE_INPUT))?;
        let id = parse_id(raw_id)?;

        let email_owner = self
            .users
            .find_by_email_excluding(&details.email, id)
            .await
            .map_err(|err| store_failure(err, CHECK_FAILED))?;
        if let Some(owner) = email_owner {
            info!(user_id = %id, owner_id = %owner.id(), "update rejected: email in use");
            return Err(Error::conflict(EMAIL_IN_USE));
        }

        let current = self
            .users
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(err, FETCH_FAILED))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        if current.matches(&details) {
            return Err(Error::invalid_request(NO_CHANGES));
        }

        match self.users.update(id, &details).await {
            Ok(true) => {
                info!(user_id = %id, "user updated");
                Ok(User::new(id, details))
            }
            Ok(false) => Err(Error::not_found(USER_NOT_FOUND)),
            Err(UserPersistenceError::UniqueViolation {
                field: UniqueField::Email,
            }) => Err(Error::conflict(EMAIL_IN_USE)),
            Err(UserPersistenceError::UniqueViolation {
                field: UniqueField::Name,
            }) => Err(Error::conflict(NAME_IN_USE)),
            Err(err) => Err(store_failure(err, UPDATE_FAILED)),
        }
    }

    async fn delete_user(&self, raw_id: &str) -> Result<(), Error> {
        let id = parse_id(raw_id)?;
        let removed = self
            .users
            .delete(id)
            .await
            .map_err(|err| store_failure(err, DELETE_FAILED))?;
        debug!(user_id = %id, removed, "delete executed");
        Ok(())
    }
}
