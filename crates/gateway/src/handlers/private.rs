//! Endpoints under `/users/{userId}`
//!
//! Own events, participation requests, subscriptions, friendship groups
//! and friends' events.

use actix_web::{web, HttpRequest, HttpResponse};
use shared::dto::{
    ensure_range, parse_id_list, AcceptSubscriptionQuery, FriendEventsQuery, NewEventDto,
    NewGroupDto, NewRequestQuery, NewSubscriptionRequest, PageParams, SubscriptionsQuery,
    UpdateEventRequest,
};

use super::helpers::{reject, relay, to_body, validate_page, validate_request};
use crate::client::Clients;

// ============================================================================
// Own events
// ============================================================================

pub async fn list_own_events(
    clients: web::Data<Clients>,
    req: HttpRequest,
    path: web::Path<i64>,
    page: web::Query<PageParams>,
) -> HttpResponse {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    relay(
        clients
            .users
            .get(&format!("/{}/events", path.into_inner()), req.query_string())
            .await,
    )
}

pub async fn create_event(
    clients: web::Data<Clients>,
    path: web::Path<i64>,
    body: web::Json<NewEventDto>,
) -> HttpResponse {
    if let Err(resp) = validate_request(&*body) {
        return resp;
    }
    let body = match to_body(&*body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    relay(
        clients
            .users
            .post(&format!("/{}/events", path.into_inner()), "", Some(body))
            .await,
    )
}

pub async fn update_own_event(
    clients: web::Data<Clients>,
    path: web::Path<i64>,
    body: web::Json<UpdateEventRequest>,
) -> HttpResponse {
    if let Err(resp) = validate_request(&*body) {
        return resp;
    }
    let body = match to_body(&*body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    relay(
        clients
            .users
            .patch(&format!("/{}/events", path.into_inner()), "", Some(body))
            .await,
    )
}

pub async fn get_own_event(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (user_id, event_id) = path.into_inner();
    relay(
        clients
            .users
            .get(&format!("/{}/events/{}", user_id, event_id), "")
            .await,
    )
}

pub async fn cancel_own_event(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (user_id, event_id) = path.into_inner();
    relay(
        clients
            .users
            .patch(&format!("/{}/events/{}", user_id, event_id), "", None)
            .await,
    )
}

pub async fn list_event_requests(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (user_id, event_id) = path.into_inner();
    relay(
        clients
            .users
            .get(&format!("/{}/events/{}/requests", user_id, event_id), "")
            .await,
    )
}

pub async fn confirm_request(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64, i64)>,
) -> HttpResponse {
    let (user_id, event_id, req_id) = path.into_inner();
    relay(
        clients
            .users
            .patch(
                &format!("/{}/events/{}/requests/{}/confirm", user_id, event_id, req_id),
                "",
                None,
            )
            .await,
    )
}

pub async fn reject_request(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64, i64)>,
) -> HttpResponse {
    let (user_id, event_id, req_id) = path.into_inner();
    relay(
        clients
            .users
            .patch(
                &format!("/{}/events/{}/requests/{}/reject", user_id, event_id, req_id),
                "",
                None,
            )
            .await,
    )
}

// ============================================================================
// Own participation requests
// ============================================================================

pub async fn list_own_requests(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .users
            .get(&format!("/{}/requests", path.into_inner()), "")
            .await,
    )
}

pub async fn create_request(
    clients: web::Data<Clients>,
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<NewRequestQuery>,
) -> HttpResponse {
    if query.event_id < 1 {
        return reject(&shared::Error::validation("eventId must be positive"));
    }

    relay(
        clients
            .users
            .post(&format!("/{}/requests", path.into_inner()), req.query_string(), None)
            .await,
    )
}

pub async fn cancel_request(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (user_id, request_id) = path.into_inner();
    relay(
        clients
            .users
            .patch(&format!("/{}/requests/{}/cancel", user_id, request_id), "", None)
            .await,
    )
}

// ============================================================================
// Subscriptions
// ============================================================================

pub async fn add_subscribe(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
    body: Option<web::Json<NewSubscriptionRequest>>,
) -> HttpResponse {
    let (user_id, publisher_id) = path.into_inner();
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let body = match to_body(&body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    relay(
        clients
            .users
            .post(
                &format!("/{}/subscriptions/{}", user_id, publisher_id),
                "",
                Some(body),
            )
            .await,
    )
}

pub async fn get_incoming_subscriptions(
    clients: web::Data<Clients>,
    req: HttpRequest,
    path: web::Path<i64>,
    _query: web::Query<SubscriptionsQuery>,
    page: web::Query<PageParams>,
) -> HttpResponse {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    relay(
        clients
            .users
            .get(
                &format!("/{}/subscriptions/incoming", path.into_inner()),
                req.query_string(),
            )
            .await,
    )
}

pub async fn get_outgoing_subscriptions(
    clients: web::Data<Clients>,
    req: HttpRequest,
    path: web::Path<i64>,
    _query: web::Query<SubscriptionsQuery>,
    page: web::Query<PageParams>,
) -> HttpResponse {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    relay(
        clients
            .users
            .get(
                &format!("/{}/subscriptions/outgoing", path.into_inner()),
                req.query_string(),
            )
            .await,
    )
}

pub async fn get_subscription(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (user_id, subscription_id) = path.into_inner();
    relay(
        clients
            .users
            .get(&format!("/{}/subscriptions/{}", user_id, subscription_id), "")
            .await,
    )
}

pub async fn revoke_subscription(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (user_id, subscription_id) = path.into_inner();
    relay(
        clients
            .users
            .patch(
                &format!("/{}/subscriptions/{}/revoke", user_id, subscription_id),
                "",
                None,
            )
            .await,
    )
}

pub async fn cancel_subscription(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (user_id, subscription_id) = path.into_inner();
    relay(
        clients
            .users
            .patch(
                &format!("/{}/subscriptions/{}/cancel", user_id, subscription_id),
                "",
                None,
            )
            .await,
    )
}

pub async fn accept_subscription(
    clients: web::Data<Clients>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    _query: web::Query<AcceptSubscriptionQuery>,
) -> HttpResponse {
    let (user_id, subscription_id) = path.into_inner();
    relay(
        clients
            .users
            .patch(
                &format!("/{}/subscriptions/{}/accept", user_id, subscription_id),
                req.query_string(),
                None,
            )
            .await,
    )
}

// ============================================================================
// Groups and followers
// ============================================================================

pub async fn create_group(
    clients: web::Data<Clients>,
    path: web::Path<i64>,
    body: web::Json<NewGroupDto>,
) -> HttpResponse {
    if let Err(resp) = validate_request(&*body) {
        return resp;
    }
    let body = match to_body(&*body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    relay(
        clients
            .users
            .post(&format!("/{}/groups", path.into_inner()), "", Some(body))
            .await,
    )
}

pub async fn list_groups(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .users
            .get(&format!("/{}/groups", path.into_inner()), "")
            .await,
    )
}

pub async fn list_followers(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .users
            .get(&format!("/{}/followers", path.into_inner()), "")
            .await,
    )
}

// ============================================================================
// Friends' events
// ============================================================================

pub async fn friend_created_events(
    clients: web::Data<Clients>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    query: web::Query<FriendEventsQuery>,
    page: web::Query<PageParams>,
) -> HttpResponse {
    friend_events(clients, req, path, query, page, "events").await
}

pub async fn friend_participation_events(
    clients: web::Data<Clients>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    query: web::Query<FriendEventsQuery>,
    page: web::Query<PageParams>,
) -> HttpResponse {
    friend_events(clients, req, path, query, page, "participation").await
}

async fn friend_events(
    clients: web::Data<Clients>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    query: web::Query<FriendEventsQuery>,
    page: web::Query<PageParams>,
    kind: &str,
) -> HttpResponse {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }
    let checks = ensure_range(query.range_start, query.range_end)
        .and_then(|_| parse_id_list(query.categories.as_deref()));
    if let Err(err) = checks {
        return reject(&err);
    }

    let (user_id, friend_id) = path.into_inner();
    relay(
        clients
            .users
            .get(
                &format!("/{}/friends/{}/{}", user_id, friend_id, kind),
                req.query_string(),
            )
            .await,
    )
}
