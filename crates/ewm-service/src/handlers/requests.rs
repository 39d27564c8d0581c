//! Participation request handlers
//!
//! # Endpoints
//!
//! - `GET /users/{userId}/requests` - Own requests
//! - `POST /users/{userId}/requests?eventId=&groupId=` - Request to join an event
//! - `PATCH /users/{userId}/requests/{requestId}/cancel` - Withdraw own request
//! - `GET /users/{userId}/events/{eventId}/requests` - Requests for own event
//! - `PATCH /users/{userId}/events/{eventId}/requests/{reqId}/confirm`
//! - `PATCH /users/{userId}/events/{eventId}/requests/{reqId}/reject`

use actix_web::{http::StatusCode, web, Responder};
use shared::dto::{ErrorResponse, NewRequestQuery, ParticipationRequestDto};
use shared::DbPool;

use crate::handlers::helpers::respond;
use crate::services::RequestService;

pub async fn list_own_requests(pool: web::Data<DbPool>, path: web::Path<i64>) -> impl Responder {
    respond(
        RequestService::list_own(&pool, path.into_inner()).await,
        StatusCode::OK,
    )
}

/// Request to join an event
#[utoipa::path(
    post,
    path = "/users/{userId}/requests",
    tag = "Private: Requests",
    params(
        ("userId" = i64, Path, description = "Requester id"),
        ("eventId" = i64, Query, description = "Event to join"),
        ("groupId" = Option<i64>, Query, description = "Own group allowed to see the participation")
    ),
    responses(
        (status = 201, description = "Request created", body = ParticipationRequestDto),
        (status = 404, description = "User, event or group not found", body = ErrorResponse),
        (status = 409, description = "Own, unpublished or full event, or a repeated request", body = ErrorResponse)
    )
)]
pub async fn create_request(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    query: web::Query<NewRequestQuery>,
) -> impl Responder {
    respond(
        RequestService::create(&pool, path.into_inner(), query.event_id, query.group_id).await,
        StatusCode::CREATED,
    )
}

pub async fn cancel_request(pool: web::Data<DbPool>, path: web::Path<(i64, i64)>) -> impl Responder {
    let (user_id, request_id) = path.into_inner();
    respond(
        RequestService::cancel(&pool, user_id, request_id).await,
        StatusCode::OK,
    )
}

pub async fn list_event_requests(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
) -> impl Responder {
    let (user_id, event_id) = path.into_inner();
    respond(
        RequestService::list_for_event(&pool, user_id, event_id).await,
        StatusCode::OK,
    )
}

pub async fn confirm_request(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64, i64)>,
) -> impl Responder {
    let (user_id, event_id, request_id) = path.into_inner();
    respond(
        RequestService::confirm(&pool, user_id, event_id, request_id).await,
        StatusCode::OK,
    )
}

pub async fn reject_request(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64, i64)>,
) -> impl Responder {
    let (user_id, event_id, request_id) = path.into_inner();
    respond(
        RequestService::reject(&pool, user_id, event_id, request_id).await,
        StatusCode::OK,
    )
}
