//! Category DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::not_blank;
use crate::models::Category;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"name": "Concerts"}))]
pub struct NewCategoryDto {
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub name: String,
}

/// Category as returned to clients; also the body of a category update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryDto {
    #[validate(range(min = 1))]
    pub id: i64,

    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_too_long() {
        let req = NewCategoryDto {
            name: "x".repeat(51),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_category_update_requires_positive_id() {
        let req = CategoryDto {
            id: 0,
            name: "Theatre".to_string(),
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("id"));
    }
}
