//! Administrator endpoints
//!
//! - `/admin/users`
//! - `/admin/categories`
//! - `/admin/events`
//! - `/admin/compilations`

use actix_web::{web, HttpRequest, HttpResponse};
use shared::dto::{
    ensure_range, parse_id_list, AdminEventsQuery, AdminUpdateEventRequest, CategoryDto,
    NewCategoryDto, NewCompilationDto, NewUserRequest, PageParams, UsersQuery,
};

use super::helpers::{reject, relay, to_body, validate_page, validate_request};
use crate::client::Clients;

// ============================================================================
// Users
// ============================================================================

pub async fn list_users(
    clients: web::Data<Clients>,
    req: HttpRequest,
    query: web::Query<UsersQuery>,
    page: web::Query<PageParams>,
) -> HttpResponse {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }
    if let Err(err) = parse_id_list(query.ids.as_deref()) {
        return reject(&err);
    }

    relay(clients.admin_users.get("", req.query_string()).await)
}

pub async fn create_user(
    clients: web::Data<Clients>,
    body: web::Json<NewUserRequest>,
) -> HttpResponse {
    if let Err(resp) = validate_request(&*body) {
        return resp;
    }
    let body = match to_body(&*body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    relay(clients.admin_users.post("", "", Some(body)).await)
}

pub async fn delete_user(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .admin_users
            .delete(&format!("/{}", path.into_inner()))
            .await,
    )
}

// ============================================================================
// Categories
// ============================================================================

pub async fn create_category(
    clients: web::Data<Clients>,
    body: web::Json<NewCategoryDto>,
) -> HttpResponse {
    if let Err(resp) = validate_request(&*body) {
        return resp;
    }
    let body = match to_body(&*body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    relay(clients.admin_categories.post("", "", Some(body)).await)
}

pub async fn update_category(
    clients: web::Data<Clients>,
    body: web::Json<CategoryDto>,
) -> HttpResponse {
    if let Err(resp) = validate_request(&*body) {
        return resp;
    }
    let body = match to_body(&*body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    relay(clients.admin_categories.patch("", "", Some(body)).await)
}

pub async fn delete_category(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .admin_categories
            .delete(&format!("/{}", path.into_inner()))
            .await,
    )
}

// ============================================================================
// Events
// ============================================================================

pub async fn search_events(
    clients: web::Data<Clients>,
    req: HttpRequest,
    query: web::Query<AdminEventsQuery>,
    page: web::Query<PageParams>,
) -> HttpResponse {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }
    let checks = ensure_range(query.range_start, query.range_end)
        .and_then(|_| parse_id_list(query.users.as_deref()))
        .and_then(|_| parse_id_list(query.categories.as_deref()))
        .and_then(|_| query.parse_states());
    if let Err(err) = checks {
        return reject(&err);
    }

    relay(clients.admin_events.get("", req.query_string()).await)
}

pub async fn update_event(
    clients: web::Data<Clients>,
    path: web::Path<i64>,
    body: web::Json<AdminUpdateEventRequest>,
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
            .admin_events
            .put(&format!("/{}", path.into_inner()), body)
            .await,
    )
}

pub async fn publish_event(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .admin_events
            .patch(&format!("/{}/publish", path.into_inner()), "", None)
            .await,
    )
}

pub async fn reject_event(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .admin_events
            .patch(&format!("/{}/reject", path.into_inner()), "", None)
            .await,
    )
}

// ============================================================================
// Compilations
// ============================================================================

pub async fn create_compilation(
    clients: web::Data<Clients>,
    body: web::Json<NewCompilationDto>,
) -> HttpResponse {
    if let Err(resp) = validate_request(&*body) {
        return resp;
    }
    let body = match to_body(&*body) {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    relay(clients.admin_compilations.post("", "", Some(body)).await)
}

pub async fn delete_compilation(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .admin_compilations
            .delete(&format!("/{}", path.into_inner()))
            .await,
    )
}

pub async fn add_compilation_event(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (comp_id, event_id) = path.into_inner();
    relay(
        clients
            .admin_compilations
            .patch(&format!("/{}/events/{}", comp_id, event_id), "", None)
            .await,
    )
}

pub async fn remove_compilation_event(
    clients: web::Data<Clients>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (comp_id, event_id) = path.into_inner();
    relay(
        clients
            .admin_compilations
            .delete(&format!("/{}/events/{}", comp_id, event_id))
            .await,
    )
}

pub async fn pin_compilation(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .admin_compilations
            .patch(&format!("/{}/pin", path.into_inner()), "", None)
            .await,
    )
}

pub async fn unpin_compilation(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .admin_compilations
            .delete(&format!("/{}/pin", path.into_inner()))
            .await,
    )
}
