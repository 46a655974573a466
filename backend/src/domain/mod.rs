//! Domain primitives, ports and services.
//!
//! Purpose: hold the user entity, its validation rules and the operation
//! pipelines, independent of HTTP and SQL. Adapters in `inbound` and
//! `outbound` translate to and from these types.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `UserDraft`, `UserDetails`, `UserId`, `UserName`,
//!   `EmailAddress`: the user entity and its validated parts.
//! - `UserService`: implementation of the driving ports in [`ports`].
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{EmptyErrorMessage, Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, User, UserDetails, UserDraft, UserId, UserName, UserValidationError,
};
pub use self::user_service::UserService;
