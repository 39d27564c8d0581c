//! User repository for database operations

use anyhow::{Context, Result};
use shared::dto::PageParams;
use shared::models::User;
use shared::DbPool;
use sqlx::{Executor, Postgres};

pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create<'e, E>(executor: E, name: &str, email: &str) -> Result<User>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(executor)
        .await
        .context("Failed to create user")?;

        Ok(user)
    }

    /// List users with the given ids, ordered by id
    pub async fn list_by_ids(pool: &DbPool, ids: &[i64], page: PageParams) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE id = ANY($1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(ids)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .context("Failed to list users by ids")?;

        Ok(users)
    }

    /// List all users, ordered by id
    pub async fn list(pool: &DbPool, page: PageParams) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .context("Failed to list users")?;

        Ok(users)
    }

    /// Check if user exists
    pub async fn exists(pool: &DbPool, user_id: i64) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .context("Failed to check if user exists")?;

        Ok(result)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &DbPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await
        .context("Failed to check if email exists")?;

        Ok(result)
    }

    /// Delete a user; returns false when nothing was deleted
    pub async fn delete(pool: &DbPool, user_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to delete user")?;

        Ok(result.rows_affected() > 0)
    }
}
