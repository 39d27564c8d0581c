//! Common handler helpers
//!
//! The gateway validates what it can locally and relays everything else.
//! Local rejections and forwarding failures use the service's error body.

use actix_web::{http::header, http::StatusCode, HttpResponse};
use serde::Serialize;
use serde_json::Value;
use shared::dto::{ErrorResponse, PageParams};
use shared::Error;
use validator::Validate;

use crate::client::ForwardResponse;
use crate::error::{GatewayError, GatewayResult};

/// Relay the service's answer, or map a forwarding failure
pub fn relay(result: GatewayResult<ForwardResponse>) -> HttpResponse {
    match result {
        Ok(response) => {
            let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut builder = HttpResponse::build(status);
            if let Some(content_type) = response.content_type {
                builder.insert_header((header::CONTENT_TYPE, content_type));
            }
            builder.body(response.body)
        }
        Err(err) => gateway_error_response(&err),
    }
}

pub fn gateway_error_response(err: &GatewayError) -> HttpResponse {
    tracing::error!("Forwarding failed: {}", err);
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
    HttpResponse::build(status).json(ErrorResponse::new(err.code(), err.to_string()))
}

/// Local rejection of a request that never reaches the service
pub fn reject(err: &Error) -> HttpResponse {
    tracing::debug!(code = err.code(), "Request rejected: {}", err);
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    HttpResponse::build(status).json(ErrorResponse::from(err))
}

/// Validate a request struct or return 400 Bad Request
pub fn validate_request<T: Validate>(req: &T) -> Result<(), HttpResponse> {
    req.validate().map_err(|e| {
        HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_error",
            format!("Validation failed: {}", e),
        ))
    })
}

/// Check `from`/`size` or return 400 Bad Request
pub fn validate_page(page: &PageParams) -> Result<(), HttpResponse> {
    page.validate()
        .map_err(|msg| HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", msg)))
}

/// Serialize a validated body for forwarding
pub fn to_body<T: Serialize>(value: &T) -> Result<Value, HttpResponse> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!("Failed to serialize request body: {}", e);
        HttpResponse::InternalServerError().json(ErrorResponse::new(
            "internal_error",
            "The gateway failed to process the request",
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::json;

    #[actix_web::test]
    async fn test_relay_keeps_status_and_body() {
        let resp = relay(Ok(ForwardResponse::json(409, &json!({"error": "conflict"}))));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"conflict"}"#);
    }

    #[actix_web::test]
    async fn test_relay_empty_no_content() {
        let resp = relay(Ok(ForwardResponse {
            status: 204,
            content_type: None,
            body: vec![],
        }));
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_unreachable_service_maps_to_502() {
        let resp = relay(Err(GatewayError::unavailable("connection refused")));
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "bad_gateway");
    }

    #[actix_web::test]
    async fn test_reject_uses_error_status() {
        let resp = reject(&Error::validation("rangeStart must not be after rangeEnd"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
