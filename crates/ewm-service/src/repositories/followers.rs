//! Follower repository

use anyhow::{Context, Result};
use shared::models::Follower;
use shared::DbPool;
use sqlx::{Executor, Postgres};

const FOLLOWER_SELECT: &str = r#"
    SELECT f.id, f.publisher_id, f.follower_id, u.name AS follower_name,
           f.group_id, g.title AS group_title
    FROM followers f
    JOIN users u ON u.id = f.follower_id
    JOIN friend_groups g ON g.id = f.group_id
"#;

pub struct FollowerRepository;

impl FollowerRepository {
    /// File `follower_id` under one of the publisher's groups
    ///
    /// A pair that already exists is moved to the new group.
    pub async fn upsert<'e, E>(
        executor: E,
        publisher_id: i64,
        follower_id: i64,
        group_id: i64,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO followers (publisher_id, follower_id, group_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (publisher_id, follower_id) DO UPDATE SET group_id = EXCLUDED.group_id
            "#,
        )
        .bind(publisher_id)
        .bind(follower_id)
        .bind(group_id)
        .execute(executor)
        .await
        .context("Failed to save follower")?;

        Ok(())
    }

    pub async fn find(
        pool: &DbPool,
        publisher_id: i64,
        follower_id: i64,
    ) -> Result<Option<Follower>> {
        let follower = sqlx::query_as::<_, Follower>(&format!(
            "{} WHERE f.publisher_id = $1 AND f.follower_id = $2",
            FOLLOWER_SELECT
        ))
        .bind(publisher_id)
        .bind(follower_id)
        .fetch_optional(pool)
        .await
        .context("Failed to find follower")?;

        Ok(follower)
    }

    pub async fn list_by_publisher(pool: &DbPool, publisher_id: i64) -> Result<Vec<Follower>> {
        let followers = sqlx::query_as::<_, Follower>(&format!(
            "{} WHERE f.publisher_id = $1 ORDER BY f.id",
            FOLLOWER_SELECT
        ))
        .bind(publisher_id)
        .fetch_all(pool)
        .await
        .context("Failed to list followers")?;

        Ok(followers)
    }
}
