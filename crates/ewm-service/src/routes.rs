//! Route configuration for the service

use actix_web::{error, web, HttpResponse};
use shared::dto::ErrorResponse;

use crate::handlers;

/// Configure all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config());

    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/openapi.json", web::get().to(handlers::openapi_json));

    cfg.service(
        web::scope("/admin")
            .service(
                web::scope("/users")
                    .route("", web::get().to(handlers::list_users))
                    .route("", web::post().to(handlers::create_user))
                    .route("/{userId}", web::delete().to(handlers::delete_user)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::post().to(handlers::create_category))
                    .route("", web::patch().to(handlers::update_category))
                    .route("/{catId}", web::delete().to(handlers::delete_category)),
            )
            .service(
                web::scope("/events")
                    .route("", web::get().to(handlers::admin_search_events))
                    .route("/{eventId}", web::put().to(handlers::admin_update_event))
                    .route("/{eventId}/publish", web::patch().to(handlers::publish_event))
                    .route("/{eventId}/reject", web::patch().to(handlers::reject_event)),
            )
            .service(
                web::scope("/compilations")
                    .route("", web::post().to(handlers::create_compilation))
                    .route("/{compId}", web::delete().to(handlers::delete_compilation))
                    .route(
                        "/{compId}/events/{eventId}",
                        web::delete().to(handlers::remove_compilation_event),
                    )
                    .route(
                        "/{compId}/events/{eventId}",
                        web::patch().to(handlers::add_compilation_event),
                    )
                    .route("/{compId}/pin", web::delete().to(handlers::unpin_compilation))
                    .route("/{compId}/pin", web::patch().to(handlers::pin_compilation)),
            ),
    );

    cfg.service(
        web::scope("/users/{userId}")
            // Own events
            .route("/events", web::get().to(handlers::list_own_events))
            .route("/events", web::post().to(handlers::create_event))
            .route("/events", web::patch().to(handlers::update_own_event))
            .route("/events/{eventId}", web::get().to(handlers::get_own_event))
            .route("/events/{eventId}", web::patch().to(handlers::cancel_own_event))
            .route(
                "/events/{eventId}/requests",
                web::get().to(handlers::list_event_requests),
            )
            .route(
                "/events/{eventId}/requests/{reqId}/confirm",
                web::patch().to(handlers::confirm_request),
            )
            .route(
                "/events/{eventId}/requests/{reqId}/reject",
                web::patch().to(handlers::reject_request),
            )
            // Own participation requests
            .route("/requests", web::get().to(handlers::list_own_requests))
            .route("/requests", web::post().to(handlers::create_request))
            .route(
                "/requests/{requestId}/cancel",
                web::patch().to(handlers::cancel_request),
            )
            // Subscriptions; the fixed segments go before `{subscriptionId}`
            .route(
                "/subscriptions/incoming",
                web::get().to(handlers::get_incoming_subscriptions),
            )
            .route(
                "/subscriptions/outgoing",
                web::get().to(handlers::get_outgoing_subscriptions),
            )
            .route(
                "/subscriptions/{subscriptionId}",
                web::get().to(handlers::get_subscription),
            )
            .route(
                "/subscriptions/{publisherId}",
                web::post().to(handlers::add_subscribe),
            )
            .route(
                "/subscriptions/{subscriptionId}/revoke",
                web::patch().to(handlers::revoke_subscription),
            )
            .route(
                "/subscriptions/{subscriptionId}/cancel",
                web::patch().to(handlers::cancel_subscription),
            )
            .route(
                "/subscriptions/{subscriptionId}/accept",
                web::patch().to(handlers::accept_subscription),
            )
            // Groups and followers
            .route("/groups", web::get().to(handlers::list_groups))
            .route("/groups", web::post().to(handlers::create_group))
            .route("/followers", web::get().to(handlers::list_followers))
            // Friends' events
            .route(
                "/friends/{friendId}/events",
                web::get().to(handlers::friend_created_events),
            )
            .route(
                "/friends/{friendId}/participation",
                web::get().to(handlers::friend_participation_events),
            ),
    );

    cfg.route("/events", web::get().to(handlers::public_search_events))
        .route("/events/{id}", web::get().to(handlers::public_get_event))
        .route("/compilations", web::get().to(handlers::list_compilations))
        .route("/compilations/{compId}", web::get().to(handlers::get_compilation))
        .route("/categories", web::get().to(handlers::list_categories))
        .route("/categories/{catId}", web::get().to(handlers::get_category));
}

/// Malformed JSON bodies answer with the standard error body
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .json(ErrorResponse::new("validation_error", err.to_string()));
        error::InternalError::from_response(err, response).into()
    })
}

/// Malformed query strings answer with the standard error body
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .json(ErrorResponse::new("validation_error", err.to_string()));
        error::InternalError::from_response(err, response).into()
    })
}

/// Non-numeric ids in the path answer with the standard error body
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .json(ErrorResponse::new("validation_error", err.to_string()));
        error::InternalError::from_response(err, response).into()
    })
}
