//! HTTP inbound adapter exposing the users REST endpoints.

use actix_web::web;

pub mod error;
pub mod state;
pub mod users;

pub use error::ApiResult;

/// JSON extractor settings shared by every handler.
///
/// Bodies are decoded regardless of the request `Content-Type`, and any
/// decode failure becomes a 400 "Invalid request payload".
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(error::json_payload_error)
}
