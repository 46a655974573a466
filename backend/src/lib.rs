//! User service library: a JSON CRUD API over PostgreSQL-backed users.
//!
//! Layout follows ports and adapters: [`domain`] holds the entity, its rules
//! and the service; [`inbound`] exposes it over HTTP; [`outbound`] stores it
//! with Diesel; [`server`] wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{JsonContentType, Trace};
