//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user repository using Diesel.
//!
//! Adapters only translate between domain types and storage
//! representations; they hold no business rules.

pub mod persistence;
