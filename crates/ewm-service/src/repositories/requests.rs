//! Participation request repository

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use shared::models::{ParticipationRequest, RequestStatus};
use shared::DbPool;
use sqlx::{Executor, Postgres};

pub struct RequestRepository;

impl RequestRepository {
    pub async fn create<'e, E>(
        executor: E,
        event_id: i64,
        requester_id: i64,
        status: RequestStatus,
        created: NaiveDateTime,
        group_id: Option<i64>,
    ) -> Result<ParticipationRequest>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, ParticipationRequest>(
            r#"
            INSERT INTO requests (event_id, requester_id, status, created, group_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(requester_id)
        .bind(status.as_str())
        .bind(created)
        .bind(group_id)
        .fetch_one(executor)
        .await
        .context("Failed to create participation request")?;

        Ok(request)
    }

    /// Lock a request of the event for the rest of the transaction
    pub async fn lock_for_event<'e, E>(
        executor: E,
        id: i64,
        event_id: i64,
    ) -> Result<Option<ParticipationRequest>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, ParticipationRequest>(
            "SELECT * FROM requests WHERE id = $1 AND event_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(event_id)
        .fetch_optional(executor)
        .await
        .context("Failed to lock participation request for event")?;

        Ok(request)
    }

    /// Lock a request filed by `requester_id` for the rest of the transaction
    pub async fn lock_by_requester<'e, E>(
        executor: E,
        id: i64,
        requester_id: i64,
    ) -> Result<Option<ParticipationRequest>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, ParticipationRequest>(
            "SELECT * FROM requests WHERE id = $1 AND requester_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(requester_id)
        .fetch_optional(executor)
        .await
        .context("Failed to lock participation request")?;

        Ok(request)
    }

    /// Find a request filed by a specific user
    pub async fn find_by_requester(
        pool: &DbPool,
        id: i64,
        requester_id: i64,
    ) -> Result<Option<ParticipationRequest>> {
        let request = sqlx::query_as::<_, ParticipationRequest>(
            "SELECT * FROM requests WHERE id = $1 AND requester_id = $2",
        )
        .bind(id)
        .bind(requester_id)
        .fetch_optional(pool)
        .await
        .context("Failed to find participation request by requester")?;

        Ok(request)
    }

    pub async fn list_by_event(pool: &DbPool, event_id: i64) -> Result<Vec<ParticipationRequest>> {
        let requests = sqlx::query_as::<_, ParticipationRequest>(
            "SELECT * FROM requests WHERE event_id = $1 ORDER BY id",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
        .context("Failed to list event requests")?;

        Ok(requests)
    }

    pub async fn list_by_requester(
        pool: &DbPool,
        requester_id: i64,
    ) -> Result<Vec<ParticipationRequest>> {
        let requests = sqlx::query_as::<_, ParticipationRequest>(
            "SELECT * FROM requests WHERE requester_id = $1 ORDER BY id",
        )
        .bind(requester_id)
        .fetch_all(pool)
        .await
        .context("Failed to list user requests")?;

        Ok(requests)
    }

    pub async fn exists(pool: &DbPool, event_id: i64, requester_id: i64) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM requests
                WHERE event_id = $1 AND requester_id = $2
            )
            "#,
        )
        .bind(event_id)
        .bind(requester_id)
        .fetch_one(pool)
        .await
        .context("Failed to check existing request")?;

        Ok(result)
    }

    pub async fn set_status<'e, E>(
        executor: E,
        id: i64,
        status: RequestStatus,
    ) -> Result<ParticipationRequest>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, ParticipationRequest>(
            r#"
            UPDATE requests
            SET status = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_one(executor)
        .await
        .context("Failed to update request status")?;

        Ok(request)
    }

    /// Reject every request of the event that is still pending
    pub async fn reject_all_pending<'e, E>(executor: E, event_id: i64) -> Result<u64>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE requests
            SET status = $1
            WHERE event_id = $2 AND status = $3
            "#,
        )
        .bind(RequestStatus::Rejected.as_str())
        .bind(event_id)
        .bind(RequestStatus::Pending.as_str())
        .execute(executor)
        .await
        .context("Failed to reject pending requests")?;

        Ok(result.rows_affected())
    }

    /// Ids of events where `requester_id` is a confirmed participant and the
    /// participation is visible to `viewer_group_id` or to all friends
    pub async fn visible_participation_event_ids(
        pool: &DbPool,
        requester_id: i64,
        viewer_group_id: i64,
        friends_all_group_id: i64,
    ) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT event_id FROM requests
            WHERE requester_id = $1
              AND status = $2
              AND (group_id IS NULL OR group_id = $3 OR group_id = $4)
            "#,
        )
        .bind(requester_id)
        .bind(RequestStatus::Confirmed.as_str())
        .bind(viewer_group_id)
        .bind(friends_all_group_id)
        .fetch_all(pool)
        .await
        .context("Failed to load visible participations")?;

        Ok(ids)
    }
}
