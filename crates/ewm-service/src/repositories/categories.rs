//! Category repository

use anyhow::{Context, Result};
use shared::dto::PageParams;
use shared::models::Category;
use shared::DbPool;

pub struct CategoryRepository;

impl CategoryRepository {
    pub async fn create(pool: &DbPool, name: &str) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await
        .context("Failed to create category")?;

        Ok(category)
    }

    pub async fn update(pool: &DbPool, id: i64, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to update category")?;

        Ok(category)
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to find category")?;

        Ok(category)
    }

    pub async fn list(pool: &DbPool, page: PageParams) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .context("Failed to list categories")?;

        Ok(categories)
    }

    /// Check whether another category already uses `name`
    pub async fn name_taken(pool: &DbPool, name: &str, except_id: Option<i64>) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(except_id)
        .fetch_one(pool)
        .await
        .context("Failed to check category name")?;

        Ok(result)
    }

    pub async fn has_events(pool: &DbPool, id: i64) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM events WHERE category_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .context("Failed to check category usage")?;

        Ok(result)
    }

    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to delete category")?;

        Ok(result.rows_affected() > 0)
    }
}
