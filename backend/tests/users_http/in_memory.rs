//! In-memory `UserRepository` double enforcing the store's unique columns.

use std::sync::Mutex;

use async_trait::async_trait;
use user_service::domain::ports::{UniqueField, UserPersistenceError, UserRepository};
use user_service::domain::{EmailAddress, User, UserDetails, UserId, UserName};

#[derive(Default)]
struct Rows {
    users: Vec<User>,
    last_id: i32,
    failure: Option<UserPersistenceError>,
}

/// Vec-backed repository. Ids come from a counter, like a SERIAL column.
#[derive(Default)]
pub(crate) struct InMemoryUserRepository {
    rows: Mutex<Rows>,
}

impl InMemoryUserRepository {
    /// Make every subsequent call fail with `failure`.
    pub(crate) fn fail_with(&self, failure: UserPersistenceError) {
        self.rows.lock().expect("rows lock").failure = Some(failure);
    }

    fn with_rows<T>(
        &self,
        op: impl FnOnce(&mut Rows) -> Result<T, UserPersistenceError>,
    ) -> Result<T, UserPersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        if let Some(failure) = rows.failure.clone() {
            return Err(failure);
        }
        op(&mut rows)
    }
}

fn clash(users: &[User], details: &UserDetails, skip: Option<UserId>) -> Option<UniqueField> {
    let others = users.iter().filter(|user| Some(user.id()) != skip);
    for user in others {
        if user.name() == details.name.as_ref() {
            return Some(UniqueField::Name);
        }
        if user.email() == details.email.as_ref() {
            return Some(UniqueField::Email);
        }
    }
    None
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.with_rows(|rows| {
            let mut users = rows.users.clone();
            users.sort_by_key(User::id);
            Ok(users)
        })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.with_rows(|rows| Ok(rows.users.iter().find(|user| user.id() == id).cloned()))
    }

    async fn find_by_name_or_email(
        &self,
        name: &UserName,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.with_rows(|rows| {
            Ok(rows
                .users
                .iter()
                .find(|user| user.name() == name.as_ref() || user.email() == email.as_ref())
                .cloned())
        })
    }

    async fn find_by_email_excluding(
        &self,
        email: &EmailAddress,
        excluded: UserId,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.with_rows(|rows| {
            Ok(rows
                .users
                .iter()
                .find(|user| user.id() != excluded && user.email() == email.as_ref())
                .cloned())
        })
    }

    async fn insert(&self, details: &UserDetails) -> Result<User, UserPersistenceError> {
        self.with_rows(|rows| {
            if let Some(field) = clash(&rows.users, details, None) {
                return Err(UserPersistenceError::unique_violation(field));
            }
            rows.last_id += 1;
            let user = User::new(UserId::new(rows.last_id), details.clone());
            rows.users.push(user.clone());
            Ok(user)
        })
    }

    async fn update(
        &self,
        id: UserId,
        details: &UserDetails,
    ) -> Result<bool, UserPersistenceError> {
        self.with_rows(|rows| {
            if let Some(field) = clash(&rows.users, details, Some(id)) {
                return Err(UserPersistenceError::unique_violation(field));
            }
            match rows.users.iter_mut().find(|user| user.id() == id) {
                Some(user) => {
                    *user = User::new(id, details.clone());
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    async fn delete(&self, id: UserId) -> Result<usize, UserPersistenceError> {
        self.with_rows(|rows| {
            let before = rows.users.len();
            rows.users.retain(|user| user.id() != id);
            Ok(before - rows.users.len())
        })
    }
}
