//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::not_blank;
use crate::models::User;

/// Request to register a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"name": "Ivan Petrov", "email": "ivan@example.com"}))]
pub struct NewUserRequest {
    #[validate(length(min = 2, max = 250), custom(function = "not_blank"))]
    pub name: String,

    #[validate(email, length(min = 6, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserShortDto {
    pub id: i64,
    pub name: String,
}

/// Query parameters for the admin user listing
#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    /// Comma-separated user ids
    pub ids: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
