//! OpenAPI documentation configuration
//!
//! The document is generated with utoipa from the DTO schemas and the
//! handler annotations, and served at `/openapi.json`.

use utoipa::OpenApi;

use crate::handlers;
use crate::handlers::health::HealthResponse;
use shared::dto;
use shared::models::{EventSort, EventState, RequestStatus, SubscriptionStatus};

/// OpenAPI documentation for the Explore With Me service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Explore With Me API",
        version = "1.0.0",
        description = "Share events, join them, and follow friends to see where they go.\n\nDate-times use the `yyyy-MM-dd HH:mm:ss` format. List endpoints take `from` and `size` paging parameters.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Gateway"),
        (url = "http://localhost:9090", description = "Service")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Admin: Users", description = "User administration"),
        (name = "Admin: Categories", description = "Category administration"),
        (name = "Admin: Events", description = "Event moderation"),
        (name = "Admin: Compilations", description = "Compilation administration"),
        (name = "Private: Events", description = "Events of the acting user"),
        (name = "Private: Requests", description = "Participation requests"),
        (name = "Private: Subscriptions", description = "Subscriptions, groups and followers"),
        (name = "Public", description = "Published events, compilations and categories")
    ),
    paths(
        // Health
        handlers::health_check,
        // Admin
        handlers::list_users,
        handlers::create_user,
        handlers::delete_user,
        handlers::create_category,
        handlers::update_category,
        handlers::admin_search_events,
        handlers::publish_event,
        handlers::create_compilation,
        // Private
        handlers::create_event,
        handlers::create_request,
        handlers::add_subscribe,
        handlers::get_incoming_subscriptions,
        handlers::get_outgoing_subscriptions,
        handlers::accept_subscription,
        handlers::create_group,
        // Public
        handlers::public_search_events,
        handlers::public_get_event,
        handlers::list_compilations,
        handlers::list_categories,
    ),
    components(
        schemas(
            HealthResponse,
            dto::ErrorResponse,
            // Users and categories
            dto::NewUserRequest,
            dto::UserDto,
            dto::UserShortDto,
            dto::NewCategoryDto,
            dto::CategoryDto,
            // Events
            dto::LocationDto,
            dto::NewEventDto,
            dto::UpdateEventRequest,
            dto::AdminUpdateEventRequest,
            dto::EventFullDto,
            dto::EventShortDto,
            EventState,
            EventSort,
            // Requests
            dto::ParticipationRequestDto,
            RequestStatus,
            // Compilations
            dto::NewCompilationDto,
            dto::CompilationDto,
            // Subscriptions
            dto::NewSubscriptionRequest,
            dto::SubscriptionRequestDto,
            SubscriptionStatus,
            dto::NewGroupDto,
            dto::GroupDto,
            dto::FollowerDto,
        )
    )
)]
pub struct ApiDoc;
