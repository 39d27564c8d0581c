//! Administrator user handlers
//!
//! # Endpoints
//!
//! - `GET /admin/users` - List users, optionally by `ids`
//! - `POST /admin/users` - Register a user
//! - `DELETE /admin/users/{userId}` - Delete a user

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use shared::dto::{parse_id_list, ErrorResponse, NewUserRequest, PageParams, UserDto, UsersQuery};
use shared::DbPool;

use crate::handlers::helpers::{
    error_response, no_content, respond, validate_page, validate_request,
};
use crate::services::UserService;

/// List users
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin: Users",
    params(
        ("ids" = Option<String>, Query, description = "Comma-separated user ids"),
        ("from" = Option<i64>, Query, description = "Number of items to skip"),
        ("size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Users", body = Vec<UserDto>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn list_users(
    pool: web::Data<DbPool>,
    query: web::Query<UsersQuery>,
    page: web::Query<PageParams>,
) -> impl Responder {
    if let Err(resp) = validate_page(&page) {
        return resp;
    }
    let ids = match parse_id_list(query.ids.as_deref()) {
        Ok(ids) => ids,
        Err(err) => return error_response(&err),
    };

    respond(UserService::list(&pool, ids, *page).await, StatusCode::OK)
}

/// Register a user
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "Admin: Users",
    request_body = NewUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    pool: web::Data<DbPool>,
    req: web::Json<NewUserRequest>,
) -> impl Responder {
    if let Err(resp) = validate_request(&*req) {
        return resp;
    }

    respond(UserService::create(&pool, &req).await, StatusCode::CREATED)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/admin/users/{userId}",
    tag = "Admin: Users",
    params(("userId" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(pool: web::Data<DbPool>, path: web::Path<i64>) -> HttpResponse {
    no_content(UserService::delete(&pool, path.into_inner()).await)
}
