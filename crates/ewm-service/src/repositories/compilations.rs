//! Compilation repository

use anyhow::{Context, Result};
use shared::dto::PageParams;
use shared::models::Compilation;
use shared::DbPool;
use sqlx::{Executor, Postgres};

pub struct CompilationRepository;

impl CompilationRepository {
    pub async fn create<'e, E>(executor: E, title: &str, pinned: bool) -> Result<Compilation>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let compilation = sqlx::query_as::<_, Compilation>(
            r#"
            INSERT INTO compilations (title, pinned)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(pinned)
        .fetch_one(executor)
        .await
        .context("Failed to create compilation")?;

        Ok(compilation)
    }

    /// Link events to a compilation, ignoring links that already exist
    pub async fn add_events<'e, E>(executor: E, compilation_id: i64, event_ids: &[i64]) -> Result<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO compilation_events (compilation_id, event_id)
            SELECT $1, UNNEST($2::BIGINT[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(compilation_id)
        .bind(event_ids)
        .execute(executor)
        .await
        .context("Failed to add events to compilation")?;

        Ok(())
    }

    pub async fn remove_event(pool: &DbPool, compilation_id: i64, event_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM compilation_events WHERE compilation_id = $1 AND event_id = $2",
        )
        .bind(compilation_id)
        .bind(event_id)
        .execute(pool)
        .await
        .context("Failed to remove event from compilation")?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_pinned(pool: &DbPool, id: i64, pinned: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE compilations SET pinned = $1 WHERE id = $2")
            .bind(pinned)
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to pin compilation")?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM compilations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to delete compilation")?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Compilation>> {
        let compilation = sqlx::query_as::<_, Compilation>(
            "SELECT * FROM compilations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to find compilation")?;

        Ok(compilation)
    }

    pub async fn list(
        pool: &DbPool,
        pinned: Option<bool>,
        page: PageParams,
    ) -> Result<Vec<Compilation>> {
        let compilations = sqlx::query_as::<_, Compilation>(
            r#"
            SELECT * FROM compilations
            WHERE ($1::BOOLEAN IS NULL OR pinned = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pinned)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .context("Failed to list compilations")?;

        Ok(compilations)
    }
}
