//! Event handlers
//!
//! # Endpoints
//!
//! Initiator:
//! - `GET /users/{userId}/events` - Own events
//! - `POST /users/{userId}/events` - Create an event
//! - `PATCH /users/{userId}/events` - Edit an event named in the body
//! - `GET /users/{userId}/events/{eventId}` - Own event
//! - `PATCH /users/{userId}/events/{eventId}` - Cancel own event
//!
//! Administrator:
//! - `GET /admin/events` - Search events
//! - `PUT /admin/events/{eventId}` - Edit any event
//! - `PATCH /admin/events/{eventId}/publish` - Publish
//! - `PATCH /admin/events/{eventId}/reject` - Reject
//!
//! Public:
//! - `GET /events` - Search published events
//! - `GET /events/{id}` - Published event
//!
//! Friends:
//! - `GET /users/{userId}/friends/{friendId}/events` - Events the friend created
//! - `GET /users/{userId}/friends/{friendId}/participation` - Events the friend joins

use actix_web::{http::StatusCode, web, Responder};
use shared::dto::{
    AdminEventsQuery, AdminUpdateEventRequest, ErrorResponse, EventFullDto, EventShortDto,
    FriendEventsQuery, NewEventDto, PageParams, PublicEventsQuery, UpdateEventRequest,
};
use shared::DbPool;

use crate::handlers::helpers::{respond, validate_page, validate_request};
use crate::services::EventService;

// ============================================================================
// Initiator
// ============================================================================

pub async fn list_own_events(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    respond(
        EventService::list_own(&pool, path.into_inner(), *page).await,
        StatusCode::OK,
    )
}

/// Create an event
#[utoipa::path(
    post,
    path = "/users/{userId}/events",
    tag = "Private: Events",
    params(("userId" = i64, Path, description = "Initiator id")),
    request_body = NewEventDto,
    responses(
        (status = 201, description = "Event created", body = EventFullDto),
        (status = 400, description = "Validation error or event date too soon", body = ErrorResponse),
        (status = 404, description = "User or category not found", body = ErrorResponse)
    )
)]
pub async fn create_event(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    req: web::Json<NewEventDto>,
) -> impl Responder {
    if let Err(resp) = validate_request(&*req) {
        return resp;
    }

    respond(
        EventService::create(&pool, path.into_inner(), &req).await,
        StatusCode::CREATED,
    )
}

pub async fn update_own_event(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    req: web::Json<UpdateEventRequest>,
) -> impl Responder {
    if let Err(resp) = validate_request(&*req) {
        return resp;
    }

    respond(
        EventService::update_own(&pool, path.into_inner(), &req).await,
        StatusCode::OK,
    )
}

pub async fn get_own_event(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
) -> impl Responder {
    let (user_id, event_id) = path.into_inner();
    respond(
        EventService::get_own(&pool, user_id, event_id).await,
        StatusCode::OK,
    )
}

pub async fn cancel_own_event(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
) -> impl Responder {
    let (user_id, event_id) = path.into_inner();
    respond(
        EventService::cancel_own(&pool, user_id, event_id).await,
        StatusCode::OK,
    )
}

// ============================================================================
// Administrator
// ============================================================================

/// Search events of any state
#[utoipa::path(
    get,
    path = "/admin/events",
    tag = "Admin: Events",
    params(
        ("users" = Option<String>, Query, description = "Comma-separated initiator ids"),
        ("states" = Option<String>, Query, description = "Comma-separated states"),
        ("categories" = Option<String>, Query, description = "Comma-separated category ids"),
        ("rangeStart" = Option<String>, Query, description = "yyyy-MM-dd HH:mm:ss"),
        ("rangeEnd" = Option<String>, Query, description = "yyyy-MM-dd HH:mm:ss"),
        ("from" = Option<i64>, Query, description = "Number of items to skip"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Events", body = Vec<EventFullDto>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn admin_search_events(
    pool: web::Data<DbPool>,
    query: web::Query<AdminEventsQuery>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    respond(
        EventService::admin_search(&pool, &query, *page).await,
        StatusCode::OK,
    )
}

pub async fn admin_update_event(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    req: web::Json<AdminUpdateEventRequest>,
) -> impl Responder {
    if let Err(resp) = validate_request(&*req) {
        return resp;
    }

    respond(
        EventService::admin_update(&pool, path.into_inner(), &req).await,
        StatusCode::OK,
    )
}

/// Publish a pending event
#[utoipa::path(
    patch,
    path = "/admin/events/{eventId}/publish",
    tag = "Admin: Events",
    params(("eventId" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event published", body = EventFullDto),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Not pending or starts within an hour", body = ErrorResponse)
    )
)]
pub async fn publish_event(pool: web::Data<DbPool>, path: web::Path<i64>) -> impl Responder {
    respond(
        EventService::publish(&pool, path.into_inner()).await,
        StatusCode::OK,
    )
}

pub async fn reject_event(pool: web::Data<DbPool>, path: web::Path<i64>) -> impl Responder {
    respond(
        EventService::reject(&pool, path.into_inner()).await,
        StatusCode::OK,
    )
}

// ============================================================================
// Public
// ============================================================================

/// Search published events
#[utoipa::path(
    get,
    path = "/events",
    tag = "Public",
    params(
        ("text" = Option<String>, Query, description = "Text in annotation or description"),
        ("categories" = Option<String>, Query, description = "Comma-separated category ids"),
        ("paid" = Option<bool>, Query, description = "Paid events only, or free only"),
        ("rangeStart" = Option<String>, Query, description = "yyyy-MM-dd HH:mm:ss"),
        ("rangeEnd" = Option<String>, Query, description = "yyyy-MM-dd HH:mm:ss"),
        ("onlyAvailable" = Option<bool>, Query, description = "Only events with free slots"),
        ("sort" = Option<String>, Query, description = "EVENT_DATE or VIEWS"),
        ("from" = Option<i64>, Query, description = "Number of items to skip"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Events", body = Vec<EventShortDto>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn public_search_events(
    pool: web::Data<DbPool>,
    query: web::Query<PublicEventsQuery>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    respond(
        EventService::public_search(&pool, &query, *page).await,
        StatusCode::OK,
    )
}

/// Published event by id
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "Public",
    params(("id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event", body = EventFullDto),
        (status = 404, description = "No published event with this id", body = ErrorResponse)
    )
)]
pub async fn public_get_event(pool: web::Data<DbPool>, path: web::Path<i64>) -> impl Responder {
    respond(
        EventService::public_get(&pool, path.into_inner()).await,
        StatusCode::OK,
    )
}

// ============================================================================
// Friends
// ============================================================================

pub async fn friend_created_events(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
    query: web::Query<FriendEventsQuery>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }
    let (viewer_id, friend_id) = path.into_inner();

    respond(
        EventService::events_where_creator(&pool, viewer_id, friend_id, &query, *page).await,
        StatusCode::OK,
    )
}

pub async fn friend_participation_events(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
    query: web::Query<FriendEventsQuery>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }
    let (viewer_id, friend_id) = path.into_inner();

    respond(
        EventService::events_where_participant(&pool, viewer_id, friend_id, &query, *page).await,
        StatusCode::OK,
    )
}
