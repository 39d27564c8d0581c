//! Subscription, group and follower handlers
//!
//! # Endpoints
//!
//! - `POST /users/{userId}/subscriptions/{publisherId}` - Ask to subscribe
//! - `GET /users/{userId}/subscriptions/incoming` - Requests addressed to the user
//! - `GET /users/{userId}/subscriptions/outgoing` - Requests sent by the user
//! - `GET /users/{userId}/subscriptions/{subscriptionId}` - One request
//! - `PATCH /users/{userId}/subscriptions/{subscriptionId}/revoke` - Follower withdraws
//! - `PATCH /users/{userId}/subscriptions/{subscriptionId}/cancel` - Publisher declines
//! - `PATCH /users/{userId}/subscriptions/{subscriptionId}/accept` - Publisher accepts
//! - `POST /users/{userId}/groups`, `GET /users/{userId}/groups` - Friendship groups
//! - `GET /users/{userId}/followers` - Accepted followers

use actix_web::{http::StatusCode, web, Responder};
use shared::dto::{
    AcceptSubscriptionQuery, ErrorResponse, GroupDto, NewGroupDto, NewSubscriptionRequest,
    PageParams, SubscriptionRequestDto, SubscriptionsQuery,
};
use shared::models::SubscriptionStatus;
use shared::DbPool;

use crate::handlers::helpers::{respond, validate_page, validate_request};
use crate::services::SubscriptionService;

/// Ask to subscribe to another user
///
/// The body is optional; without it the request is a plain subscription.
#[utoipa::path(
    post,
    path = "/users/{userId}/subscriptions/{publisherId}",
    tag = "Private: Subscriptions",
    params(
        ("userId" = i64, Path, description = "Follower id"),
        ("publisherId" = i64, Path, description = "User to subscribe to")
    ),
    request_body = NewSubscriptionRequest,
    responses(
        (status = 201, description = "Request sent", body = SubscriptionRequestDto),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Self subscription or a request already exists", body = ErrorResponse)
    )
)]
pub async fn add_subscribe(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
    body: Option<web::Json<NewSubscriptionRequest>>,
) -> impl Responder {
    let (follower_id, publisher_id) = path.into_inner();
    let friendship = body.map(|b| b.friendship).unwrap_or(false);

    respond(
        SubscriptionService::add_subscribe(&pool, follower_id, publisher_id, friendship).await,
        StatusCode::CREATED,
    )
}

/// Subscription requests addressed to the user
///
/// `incoming` is named from the user's side: these are requests other users
/// sent asking to follow the user, so the user is their publisher. Clients
/// that read `incoming` as "requests I sent" should call `outgoing` instead.
#[utoipa::path(
    get,
    path = "/users/{userId}/subscriptions/incoming",
    tag = "Private: Subscriptions",
    params(
        ("userId" = i64, Path, description = "Publisher id"),
        ("status" = Option<SubscriptionStatus>, Query, description = "Only requests in this status"),
        ("from" = Option<i64>, Query, description = "Number of items to skip"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Requests the user received, newest first", body = [SubscriptionRequestDto]),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_incoming_subscriptions(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    query: web::Query<SubscriptionsQuery>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    respond(
        SubscriptionService::get_incoming(&pool, path.into_inner(), query.status, *page).await,
        StatusCode::OK,
    )
}

/// Subscription requests sent by the user
///
/// `outgoing` is named from the user's side: these are requests the user sent
/// asking to follow someone, so the user is their follower. Clients that read
/// `outgoing` as "requests sent to me" should call `incoming` instead.
#[utoipa::path(
    get,
    path = "/users/{userId}/subscriptions/outgoing",
    tag = "Private: Subscriptions",
    params(
        ("userId" = i64, Path, description = "Follower id"),
        ("status" = Option<SubscriptionStatus>, Query, description = "Only requests in this status"),
        ("from" = Option<i64>, Query, description = "Number of items to skip"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Requests the user sent, newest first", body = [SubscriptionRequestDto]),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_outgoing_subscriptions(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    query: web::Query<SubscriptionsQuery>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    respond(
        SubscriptionService::get_outgoing(&pool, path.into_inner(), query.status, *page).await,
        StatusCode::OK,
    )
}

pub async fn get_subscription(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
) -> impl Responder {
    let (user_id, subscription_id) = path.into_inner();
    respond(
        SubscriptionService::get_subscription(&pool, user_id, subscription_id).await,
        StatusCode::OK,
    )
}

pub async fn revoke_subscription(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
) -> impl Responder {
    let (user_id, subscription_id) = path.into_inner();
    respond(
        SubscriptionService::revoke_request_by_subscriber(&pool, user_id, subscription_id).await,
        StatusCode::OK,
    )
}

pub async fn cancel_subscription(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
) -> impl Responder {
    let (user_id, subscription_id) = path.into_inner();
    respond(
        SubscriptionService::cancel_request_by_publisher(&pool, user_id, subscription_id).await,
        StatusCode::OK,
    )
}

/// Accept a waiting subscription request
#[utoipa::path(
    patch,
    path = "/users/{userId}/subscriptions/{subscriptionId}/accept",
    tag = "Private: Subscriptions",
    params(
        ("userId" = i64, Path, description = "Publisher id"),
        ("subscriptionId" = i64, Path, description = "Subscription request id"),
        ("friendship" = Option<bool>, Query, description = "Accept as a friend"),
        ("group" = Option<String>, Query, description = "Friendship group title")
    ),
    responses(
        (status = 200, description = "Request accepted", body = SubscriptionRequestDto),
        (status = 404, description = "No waiting request or unknown group", body = ErrorResponse)
    )
)]
pub async fn accept_subscription(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
    query: web::Query<AcceptSubscriptionQuery>,
) -> impl Responder {
    let (user_id, subscription_id) = path.into_inner();
    respond(
        SubscriptionService::accept_subscribe(&pool, user_id, subscription_id, &query).await,
        StatusCode::OK,
    )
}

/// Create a friendship group
#[utoipa::path(
    post,
    path = "/users/{userId}/groups",
    tag = "Private: Subscriptions",
    params(("userId" = i64, Path, description = "Group owner id")),
    request_body = NewGroupDto,
    responses(
        (status = 201, description = "Group created", body = GroupDto),
        (status = 409, description = "Title already used", body = ErrorResponse)
    )
)]
pub async fn create_group(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    req: web::Json<NewGroupDto>,
) -> impl Responder {
    if let Err(resp) = validate_request(&*req) {
        return resp;
    }

    respond(
        SubscriptionService::add_new_group(&pool, path.into_inner(), &req).await,
        StatusCode::CREATED,
    )
}

pub async fn list_groups(pool: web::Data<DbPool>, path: web::Path<i64>) -> impl Responder {
    respond(
        SubscriptionService::list_groups(&pool, path.into_inner()).await,
        StatusCode::OK,
    )
}

pub async fn list_followers(pool: web::Data<DbPool>, path: web::Path<i64>) -> impl Responder {
    respond(
        SubscriptionService::list_followers(&pool, path.into_inner()).await,
        StatusCode::OK,
    )
}
