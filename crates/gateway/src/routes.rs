//! Route configuration for the gateway
//!
//! Paths mirror the service one to one.

use actix_web::{error, web, HttpResponse};
use shared::dto::ErrorResponse;

use crate::handlers::{admin, health_check, private, public};

/// Configure all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config());

    cfg.route("/health", web::get().to(health_check));

    cfg.service(
        web::scope("/admin")
            .service(
                web::scope("/users")
                    .route("", web::get().to(admin::list_users))
                    .route("", web::post().to(admin::create_user))
                    .route("/{userId}", web::delete().to(admin::delete_user)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::post().to(admin::create_category))
                    .route("", web::patch().to(admin::update_category))
                    .route("/{catId}", web::delete().to(admin::delete_category)),
            )
            .service(
                web::scope("/events")
                    .route("", web::get().to(admin::search_events))
                    .route("/{eventId}", web::put().to(admin::update_event))
                    .route("/{eventId}/publish", web::patch().to(admin::publish_event))
                    .route("/{eventId}/reject", web::patch().to(admin::reject_event)),
            )
            .service(
                web::scope("/compilations")
                    .route("", web::post().to(admin::create_compilation))
                    .route("/{compId}", web::delete().to(admin::delete_compilation))
                    .route(
                        "/{compId}/events/{eventId}",
                        web::delete().to(admin::remove_compilation_event),
                    )
                    .route(
                        "/{compId}/events/{eventId}",
                        web::patch().to(admin::add_compilation_event),
                    )
                    .route("/{compId}/pin", web::delete().to(admin::unpin_compilation))
                    .route("/{compId}/pin", web::patch().to(admin::pin_compilation)),
            ),
    );

    cfg.service(
        web::scope("/users/{userId}")
            .route("/events", web::get().to(private::list_own_events))
            .route("/events", web::post().to(private::create_event))
            .route("/events", web::patch().to(private::update_own_event))
            .route("/events/{eventId}", web::get().to(private::get_own_event))
            .route("/events/{eventId}", web::patch().to(private::cancel_own_event))
            .route(
                "/events/{eventId}/requests",
                web::get().to(private::list_event_requests),
            )
            .route(
                "/events/{eventId}/requests/{reqId}/confirm",
                web::patch().to(private::confirm_request),
            )
            .route(
                "/events/{eventId}/requests/{reqId}/reject",
                web::patch().to(private::reject_request),
            )
            .route("/requests", web::get().to(private::list_own_requests))
            .route("/requests", web::post().to(private::create_request))
            .route(
                "/requests/{requestId}/cancel",
                web::patch().to(private::cancel_request),
            )
            .route(
                "/subscriptions/incoming",
                web::get().to(private::get_incoming_subscriptions),
            )
            .route(
                "/subscriptions/outgoing",
                web::get().to(private::get_outgoing_subscriptions),
            )
            .route(
                "/subscriptions/{subscriptionId}",
                web::get().to(private::get_subscription),
            )
            .route(
                "/subscriptions/{publisherId}",
                web::post().to(private::add_subscribe),
            )
            .route(
                "/subscriptions/{subscriptionId}/revoke",
                web::patch().to(private::revoke_subscription),
            )
            .route(
                "/subscriptions/{subscriptionId}/cancel",
                web::patch().to(private::cancel_subscription),
            )
            .route(
                "/subscriptions/{subscriptionId}/accept",
                web::patch().to(private::accept_subscription),
            )
            .route("/groups", web::get().to(private::list_groups))
            .route("/groups", web::post().to(private::create_group))
            .route("/followers", web::get().to(private::list_followers))
            .route(
                "/friends/{friendId}/events",
                web::get().to(private::friend_created_events),
            )
            .route(
                "/friends/{friendId}/participation",
                web::get().to(private::friend_participation_events),
            ),
    );

    cfg.route("/events", web::get().to(public::search_events))
        .route("/events/{id}", web::get().to(public::get_event))
        .route("/compilations", web::get().to(public::list_compilations))
        .route("/compilations/{compId}", web::get().to(public::get_compilation))
        .route("/categories", web::get().to(public::list_categories))
        .route("/categories/{catId}", web::get().to(public::get_category));
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
}

/// Malformed JSON bodies are rejected before forwarding
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = bad_request(err.to_string());
        error::InternalError::from_response(err, response).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = bad_request(err.to_string());
        error::InternalError::from_response(err, response).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = bad_request(err.to_string());
        error::InternalError::from_response(err, response).into()
    })
}
