//! Common handler helpers
//!
//! Services return [`shared::Result`]; these helpers turn the outcome into a
//! response with the standard error body.

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use shared::dto::{ErrorResponse, PageParams};
use shared::{Error, Result};
use validator::Validate;

/// Map a service error to its HTTP response
///
/// Server-side failures are logged and their details kept out of the body.
pub fn error_response(err: &Error) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if err.is_client_error() {
        tracing::debug!(code = err.code(), "Request failed: {}", err);
        HttpResponse::build(status).json(ErrorResponse::from(err))
    } else {
        tracing::error!("Request failed: {}", err);
        HttpResponse::build(status).json(ErrorResponse::new(
            err.code(),
            "The server failed to process the request",
        ))
    }
}

/// Serialize a successful result with `status`, or map the error
pub fn respond<T: Serialize>(result: Result<T>, status: StatusCode) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::build(status).json(body),
        Err(err) => error_response(&err),
    }
}

/// 204 on success
pub fn no_content(result: Result<()>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}

/// Validate a request struct or return 400 Bad Request
pub fn validate_request<T: Validate>(req: &T) -> std::result::Result<(), HttpResponse> {
    req.validate().map_err(|e| {
        HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_error",
            format!("Validation failed: {}", e),
        ))
    })
}

/// Check `from`/`size` or return 400 Bad Request
pub fn validate_page(page: &PageParams) -> std::result::Result<(), HttpResponse> {
    page.validate().map_err(|msg| {
        HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", msg))
    })
}
