//! Category handlers
//!
//! Administrators manage categories under `/admin/categories`; anyone can
//! read them under `/categories`.

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use shared::dto::{CategoryDto, ErrorResponse, NewCategoryDto, PageParams};
use shared::DbPool;

use crate::handlers::helpers::{no_content, respond, validate_page, validate_request};
use crate::services::CategoryService;

/// Create a category
#[utoipa::path(
    post,
    path = "/admin/categories",
    tag = "Admin: Categories",
    request_body = NewCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
pub async fn create_category(
    pool: web::Data<DbPool>,
    req: web::Json<NewCategoryDto>,
) -> impl Responder {
    if let Err(resp) = validate_request(&*req) {
        return resp;
    }

    respond(CategoryService::create(&pool, &req).await, StatusCode::CREATED)
}

/// Rename a category
#[utoipa::path(
    patch,
    path = "/admin/categories",
    tag = "Admin: Categories",
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryDto),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
pub async fn update_category(
    pool: web::Data<DbPool>,
    req: web::Json<CategoryDto>,
) -> impl Responder {
    if let Err(resp) = validate_request(&*req) {
        return resp;
    }

    respond(CategoryService::update(&pool, &req).await, StatusCode::OK)
}

pub async fn delete_category(pool: web::Data<DbPool>, path: web::Path<i64>) -> HttpResponse {
    no_content(CategoryService::delete(&pool, path.into_inner()).await)
}

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Public",
    params(
        ("from" = Option<i64>, Query, description = "Number of items to skip"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses((status = 200, description = "Categories", body = Vec<CategoryDto>))
)]
pub async fn list_categories(
    pool: web::Data<DbPool>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }

    respond(CategoryService::list(&pool, *page).await, StatusCode::OK)
}

pub async fn get_category(pool: web::Data<DbPool>, path: web::Path<i64>) -> impl Responder {
    respond(CategoryService::get(&pool, path.into_inner()).await, StatusCode::OK)
}
