//! Category administration and lookup

use shared::dto::{CategoryDto, NewCategoryDto, PageParams};
use shared::{DbPool, Error, Result};
use tracing::info;

use crate::repositories::CategoryRepository;

pub struct CategoryService;

impl CategoryService {
    pub async fn create(pool: &DbPool, req: &NewCategoryDto) -> Result<CategoryDto> {
        let name = req.name.trim();
        if CategoryRepository::name_taken(pool, name, None).await? {
            return Err(Error::conflict(format!("Category '{}' already exists", name)));
        }

        let category = CategoryRepository::create(pool, name).await?;
        info!(category_id = category.id, "Category created");
        Ok(CategoryDto::from(category))
    }

    pub async fn update(pool: &DbPool, req: &CategoryDto) -> Result<CategoryDto> {
        let name = req.name.trim();
        if CategoryRepository::find_by_id(pool, req.id).await?.is_none() {
            return Err(Error::not_found("Category", req.id));
        }
        if CategoryRepository::name_taken(pool, name, Some(req.id)).await? {
            return Err(Error::conflict(format!("Category '{}' already exists", name)));
        }

        let category = CategoryRepository::update(pool, req.id, name)
            .await?
            .ok_or_else(|| Error::not_found("Category", req.id))?;

        info!(category_id = category.id, "Category updated");
        Ok(CategoryDto::from(category))
    }

    /// Delete a category no event refers to
    pub async fn delete(pool: &DbPool, id: i64) -> Result<()> {
        if CategoryRepository::find_by_id(pool, id).await?.is_none() {
            return Err(Error::not_found("Category", id));
        }
        if CategoryRepository::has_events(pool, id).await? {
            return Err(Error::conflict(format!(
                "Category with id={} is used by events",
                id
            )));
        }

        CategoryRepository::delete(pool, id).await?;
        info!(category_id = id, "Category deleted");
        Ok(())
    }

    pub async fn list(pool: &DbPool, page: PageParams) -> Result<Vec<CategoryDto>> {
        let categories = CategoryRepository::list(pool, page).await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    pub async fn get(pool: &DbPool, id: i64) -> Result<CategoryDto> {
        CategoryRepository::find_by_id(pool, id)
            .await?
            .map(CategoryDto::from)
            .ok_or_else(|| Error::not_found("Category", id))
    }
}
