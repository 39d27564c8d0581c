//! Subscription request repository

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use shared::dto::PageParams;
use shared::models::{SubscriptionRequest, SubscriptionStatus};
use shared::DbPool;
use sqlx::{Executor, Postgres};

pub struct SubscriptionRepository;

impl SubscriptionRepository {
    pub async fn create(
        pool: &DbPool,
        follower_id: i64,
        publisher_id: i64,
        friendship: bool,
        now: NaiveDateTime,
    ) -> Result<SubscriptionRequest> {
        let request = sqlx::query_as::<_, SubscriptionRequest>(
            r#"
            INSERT INTO subscription_requests (
                follower_id, publisher_id, friendship, status, created, updated
            )
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(follower_id)
        .bind(publisher_id)
        .bind(friendship)
        .bind(SubscriptionStatus::Waiting.as_str())
        .bind(now)
        .fetch_one(pool)
        .await
        .context("Failed to create subscription request")?;

        Ok(request)
    }

    /// Every request `follower_id` ever sent to `publisher_id`
    pub async fn list_between(
        pool: &DbPool,
        follower_id: i64,
        publisher_id: i64,
    ) -> Result<Vec<SubscriptionRequest>> {
        let requests = sqlx::query_as::<_, SubscriptionRequest>(
            r#"
            SELECT * FROM subscription_requests
            WHERE follower_id = $1 AND publisher_id = $2
            ORDER BY id DESC
            "#,
        )
        .bind(follower_id)
        .bind(publisher_id)
        .fetch_all(pool)
        .await
        .context("Failed to list subscription requests between users")?;

        Ok(requests)
    }

    /// Request sent by `follower_id` that is still in `status`
    pub async fn find_by_follower_with_status(
        pool: &DbPool,
        id: i64,
        follower_id: i64,
        status: SubscriptionStatus,
    ) -> Result<Option<SubscriptionRequest>> {
        let request = sqlx::query_as::<_, SubscriptionRequest>(
            r#"
            SELECT * FROM subscription_requests
            WHERE id = $1 AND follower_id = $2 AND status = $3
            "#,
        )
        .bind(id)
        .bind(follower_id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await
        .context("Failed to find subscription request by follower")?;

        Ok(request)
    }

    /// Request addressed to `publisher_id` that is still in `status`
    pub async fn find_by_publisher_with_status(
        pool: &DbPool,
        id: i64,
        publisher_id: i64,
        status: SubscriptionStatus,
    ) -> Result<Option<SubscriptionRequest>> {
        let request = sqlx::query_as::<_, SubscriptionRequest>(
            r#"
            SELECT * FROM subscription_requests
            WHERE id = $1 AND publisher_id = $2 AND status = $3
            "#,
        )
        .bind(id)
        .bind(publisher_id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await
        .context("Failed to find subscription request by publisher")?;

        Ok(request)
    }

    /// Request visible to `user_id` from either side
    pub async fn find_for_participant(
        pool: &DbPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<SubscriptionRequest>> {
        let request = sqlx::query_as::<_, SubscriptionRequest>(
            r#"
            SELECT * FROM subscription_requests
            WHERE id = $1 AND (follower_id = $2 OR publisher_id = $2)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("Failed to find subscription request")?;

        Ok(request)
    }

    /// Move a request from `from` to `to`
    ///
    /// Returns `None` when the request is no longer in `from`; the status
    /// check and the update are one statement.
    pub async fn transition<'e, E>(
        executor: E,
        id: i64,
        from: SubscriptionStatus,
        to: SubscriptionStatus,
        updated: NaiveDateTime,
    ) -> Result<Option<SubscriptionRequest>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, SubscriptionRequest>(
            r#"
            UPDATE subscription_requests
            SET status = $1, updated = $2
            WHERE id = $3 AND status = $4
            RETURNING *
            "#,
        )
        .bind(to.as_str())
        .bind(updated)
        .bind(id)
        .bind(from.as_str())
        .fetch_optional(executor)
        .await
        .context("Failed to update subscription request")?;

        Ok(request)
    }

    /// Requests addressed to the publisher, optionally filtered by status
    pub async fn list_by_publisher(
        pool: &DbPool,
        publisher_id: i64,
        status: Option<SubscriptionStatus>,
        page: PageParams,
    ) -> Result<Vec<SubscriptionRequest>> {
        let requests = sqlx::query_as::<_, SubscriptionRequest>(
            r#"
            SELECT * FROM subscription_requests
            WHERE publisher_id = $1 AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(publisher_id)
        .bind(status.map(|s| s.as_str()))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .context("Failed to list incoming subscription requests")?;

        Ok(requests)
    }

    /// Requests sent by the follower, optionally filtered by status
    pub async fn list_by_follower(
        pool: &DbPool,
        follower_id: i64,
        status: Option<SubscriptionStatus>,
        page: PageParams,
    ) -> Result<Vec<SubscriptionRequest>> {
        let requests = sqlx::query_as::<_, SubscriptionRequest>(
            r#"
            SELECT * FROM subscription_requests
            WHERE follower_id = $1 AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(follower_id)
        .bind(status.map(|s| s.as_str()))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .context("Failed to list outgoing subscription requests")?;

        Ok(requests)
    }
}
