//! Request middleware.
//!
//! Purpose: response decoration applied to every route: request trace
//! identifiers and the JSON content type.

pub mod json_content_type;
pub mod trace;

pub use json_content_type::JsonContentType;
pub use trace::Trace;
