//! Public endpoints: published events, compilations and categories

use actix_web::{web, HttpRequest, HttpResponse};
use shared::dto::{ensure_range, parse_id_list, CompilationsQuery, PageParams, PublicEventsQuery};

use super::helpers::{reject, relay, validate_page};
use crate::client::Clients;

pub async fn search_events(
    clients: web::Data<Clients>,
    req: HttpRequest,
    query: web::Query<PublicEventsQuery>,
    page: web::Query<PageParams>,
) -> HttpResponse {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }
    let checks = ensure_range(query.range_start, query.range_end)
        .and_then(|_| parse_id_list(query.categories.as_deref()));
    if let Err(err) = checks {
        return reject(&err);
    }

    relay(clients.events.get("", req.query_string()).await)
}

pub async fn get_event(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .events
            .get(&format!("/{}", path.into_inner()), "")
            .await,
    )
}

pub async fn list_compilations(
    clients: web::Data<Clients>,
    req: HttpRequest,
    _query: web::Query<CompilationsQuery>,
    page: web::Query<PageParams>,
) -> HttpResponse {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    relay(clients.compilations.get("", req.query_string()).await)
}

pub async fn get_compilation(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .compilations
            .get(&format!("/{}", path.into_inner()), "")
            .await,
    )
}

pub async fn list_categories(
    clients: web::Data<Clients>,
    req: HttpRequest,
    page: web::Query<PageParams>,
) -> HttpResponse {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    relay(clients.categories.get("", req.query_string()).await)
}

pub async fn get_category(clients: web::Data<Clients>, path: web::Path<i64>) -> HttpResponse {
    relay(
        clients
            .categories
            .get(&format!("/{}", path.into_inner()), "")
            .await,
    )
}
