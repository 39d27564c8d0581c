//! Friendship group repository

use anyhow::{Context, Result};
use shared::models::FriendGroup;
use shared::DbPool;
use sqlx::{Executor, Postgres};

pub struct GroupRepository;

impl GroupRepository {
    pub async fn create<'e, E>(executor: E, user_id: i64, title: &str) -> Result<FriendGroup>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let group = sqlx::query_as::<_, FriendGroup>(
            r#"
            INSERT INTO friend_groups (user_id, title)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(title)
        .fetch_one(executor)
        .await
        .context("Failed to create group")?;

        Ok(group)
    }

    /// Find a user's group by title, ignoring case
    pub async fn find_by_title(
        pool: &DbPool,
        user_id: i64,
        title: &str,
    ) -> Result<Option<FriendGroup>> {
        let group = sqlx::query_as::<_, FriendGroup>(
            r#"
            SELECT * FROM friend_groups
            WHERE user_id = $1 AND UPPER(title) = UPPER($2)
            "#,
        )
        .bind(user_id)
        .bind(title)
        .fetch_optional(pool)
        .await
        .context("Failed to find group by title")?;

        Ok(group)
    }

    pub async fn find_owned(pool: &DbPool, user_id: i64, id: i64) -> Result<Option<FriendGroup>> {
        let group = sqlx::query_as::<_, FriendGroup>(
            "SELECT * FROM friend_groups WHERE user_id = $1 AND id = $2",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to find group")?;

        Ok(group)
    }

    pub async fn list_by_user(pool: &DbPool, user_id: i64) -> Result<Vec<FriendGroup>> {
        let groups = sqlx::query_as::<_, FriendGroup>(
            "SELECT * FROM friend_groups WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .context("Failed to list groups")?;

        Ok(groups)
    }
}
