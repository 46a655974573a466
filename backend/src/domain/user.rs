//! User entity and its validated building blocks.
//!
//! Inbound adapters deserialise request bodies into a [`UserDraft`] and ask
//! the domain to validate it. Create and update apply different rules:
//! creation requires a well-formed email address, updates only require both
//! fields to be present.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Validation failures for user payloads and identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The name is the empty string.
    #[error("name must not be empty")]
    EmptyName,
    /// The email is the empty string.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The email does not look like `local@domain.tld`.
    #[error("email must look like local@domain.tld")]
    MalformedEmail,
    /// The identifier is not a 32-bit integer.
    #[error("user id must be an integer: {0}")]
    InvalidId(#[from] ParseIntError),
}

impl UserValidationError {
    /// Field the failure relates to, for error details.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::MalformedEmail => "email",
            Self::InvalidId(_) => "id",
        }
    }

    /// Machine-readable failure code, for error details.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::EmptyEmail => "empty_email",
            Self::MalformedEmail => "malformed_email",
            Self::InvalidId(_) => "invalid_id",
        }
    }
}

/// Store-assigned user identifier.
///
/// The backing column is a PostgreSQL `SERIAL`, so identifiers are 32-bit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i32, example = 1)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier read from the store.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier for queries.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty user name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Validate and wrap a name. Whitespace-only names are accepted.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Non-empty email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl EmailAddress {
    /// Validate and wrap an email. Only emptiness is checked here.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(email))
    }

    /// Validate and wrap an email that must look like `local@domain.tld`.
    pub fn well_formed(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = Self::new(email)?;
        if !email.is_well_formed() {
            return Err(UserValidationError::MalformedEmail);
        }
        Ok(email)
    }

    /// Whether the address has a local part, a domain and a 2+ letter TLD.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        email_regex().is_match(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Unvalidated `{name, email}` pair as submitted by a client.
///
/// Missing and `null` fields deserialise as empty strings so they fail
/// validation rather than decoding. A client-supplied `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDraft {
    /// Requested display name.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "Ada")]
    pub name: String,
    /// Requested email address.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl UserDraft {
    /// Build a draft from borrowed parts.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Rules for creation: non-empty name and well-formed email.
    pub fn validate_for_create(self) -> Result<UserDetails, UserValidationError> {
        Ok(UserDetails {
            name: UserName::new(self.name)?,
            email: EmailAddress::well_formed(self.email)?,
        })
    }

    /// Rules for update: both fields non-empty.
    pub fn validate_for_update(self) -> Result<UserDetails, UserValidationError> {
        Ok(UserDetails {
            name: UserName::new(self.name)?,
            email: EmailAddress::new(self.email)?,
        })
    }
}

/// Validated mutable attributes of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    /// Validated name.
    pub name: UserName,
    /// Validated email.
    pub email: EmailAddress,
}

/// Persisted user.
///
/// Serialised as `{"id": 1, "name": "Ada", "email": "ada@example.com"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    id: UserId,
    #[schema(example = "Ada")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
}

impl User {
    /// Assemble a user from an identifier and validated details.
    #[must_use]
    pub fn new(id: UserId, details: UserDetails) -> Self {
        Self {
            id,
            name: details.name.into(),
            email: details.email.into(),
        }
    }

    /// Rehydrate a user from raw stored columns.
    ///
    /// Rows predating validation may hold empty strings, so no checks run.
    pub fn from_stored(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether `details` would leave this user unchanged.
    #[must_use]
    pub fn matches(&self, details: &UserDetails) -> bool {
        self.name == details.name.as_ref() && self.email == details.email.as_ref()
    }
}
