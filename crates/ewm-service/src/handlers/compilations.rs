//! Compilation handlers
//!
//! Administrators edit compilations under `/admin/compilations`; anyone can
//! read them under `/compilations`.

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use shared::dto::{CompilationDto, CompilationsQuery, ErrorResponse, NewCompilationDto, PageParams};
use shared::DbPool;

use crate::handlers::helpers::{no_content, respond, validate_page, validate_request};
use crate::services::CompilationService;

/// Create a compilation
#[utoipa::path(
    post,
    path = "/admin/compilations",
    tag = "Admin: Compilations",
    request_body = NewCompilationDto,
    responses(
        (status = 201, description = "Compilation created", body = CompilationDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "An event does not exist", body = ErrorResponse)
    )
)]
pub async fn create_compilation(
    pool: web::Data<DbPool>,
    req: web::Json<NewCompilationDto>,
) -> impl Responder {
    if let Err(resp) = validate_request(&*req) {
        return resp;
    }

    respond(CompilationService::create(&pool, &req).await, StatusCode::CREATED)
}

pub async fn delete_compilation(pool: web::Data<DbPool>, path: web::Path<i64>) -> HttpResponse {
    no_content(CompilationService::delete(&pool, path.into_inner()).await)
}

pub async fn add_compilation_event(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (compilation_id, event_id) = path.into_inner();
    no_content(CompilationService::add_event(&pool, compilation_id, event_id).await)
}

pub async fn remove_compilation_event(
    pool: web::Data<DbPool>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (compilation_id, event_id) = path.into_inner();
    no_content(CompilationService::remove_event(&pool, compilation_id, event_id).await)
}

pub async fn pin_compilation(pool: web::Data<DbPool>, path: web::Path<i64>) -> HttpResponse {
    no_content(CompilationService::set_pinned(&pool, path.into_inner(), true).await)
}

pub async fn unpin_compilation(pool: web::Data<DbPool>, path: web::Path<i64>) -> HttpResponse {
    no_content(CompilationService::set_pinned(&pool, path.into_inner(), false).await)
}

/// List compilations
#[utoipa::path(
    get,
    path = "/compilations",
    tag = "Public",
    params(
        ("pinned" = Option<bool>, Query, description = "Only pinned or only unpinned"),
        ("from" = Option<i64>, Query, description = "Number of items to skip"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses((status = 200, description = "Compilations", body = Vec<CompilationDto>))
)]
pub async fn list_compilations(
    pool: web::Data<DbPool>,
    query: web::Query<CompilationsQuery>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    respond(
        CompilationService::list(&pool, query.pinned, *page).await,
        StatusCode::OK,
    )
}

pub async fn get_compilation(pool: web::Data<DbPool>, path: web::Path<i64>) -> impl Responder {
    respond(
        CompilationService::get(&pool, path.into_inner()).await,
        StatusCode::OK,
    )
}
