//! HTTP mapping for domain errors.
//!
//! Purpose: keep [`Error`] transport agnostic while letting Actix handlers
//! return it directly. Clients receive only the human-readable message as a
//! JSON string; the code picks the status and the trace id travels in the
//! `trace-id` header. Also turns JSON extractor failures into the domain's
//! "Invalid request payload" rejection.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use tracing::debug;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned when a request body cannot be decoded.
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if let Ok(record) = serde_json::to_string(self) {
            debug!(error = %record, "responding with error");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self.message())
    }
}

/// `JsonConfig` error handler mapping every decode failure to a 400.
pub fn json_payload_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "rejecting undecodable payload");
    Error::invalid_request(INVALID_PAYLOAD).into()
}

#[cfg(test)]
mod tests;
