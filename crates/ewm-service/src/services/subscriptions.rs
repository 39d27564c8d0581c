//! Subscriptions and friendship groups
//!
//! A follower sends a request to a publisher. While the request is `WAITING`
//! the follower may revoke it and the publisher may decline or accept it.
//! Accepting files the follower under one of the publisher's groups, which
//! later decides what the follower may see.

use metrics::counter;
use shared::dto::{
    AcceptSubscriptionQuery, FollowerDto, GroupDto, NewGroupDto, PageParams,
    SubscriptionRequestDto,
};
use shared::models::{follower_group_title, SubscriptionStatus};
use shared::{datetime, DbPool, Error, Result};
use tracing::info;

use super::users::ensure_user_exists;
use crate::repositories::{FollowerRepository, GroupRepository, SubscriptionRepository};

pub struct SubscriptionService;

impl SubscriptionService {
    /// Send a subscription request from `follower_id` to `publisher_id`
    pub async fn add_subscribe(
        pool: &DbPool,
        follower_id: i64,
        publisher_id: i64,
        friendship: bool,
    ) -> Result<SubscriptionRequestDto> {
        ensure_user_exists(pool, follower_id).await?;
        ensure_user_exists(pool, publisher_id).await?;

        if follower_id == publisher_id {
            return Err(Error::conflict("Cannot subscribe to yourself"));
        }
        let previous = SubscriptionRepository::list_between(pool, follower_id, publisher_id).await?;
        for request in &previous {
            if request.status()?.blocks_new_request() {
                return Err(Error::conflict(format!(
                    "A subscription request to user {} already exists with status {}",
                    publisher_id, request.status
                )));
            }
        }

        let request = SubscriptionRepository::create(
            pool,
            follower_id,
            publisher_id,
            friendship,
            datetime::now(),
        )
        .await?;

        counter!("ewm.subscriptions.requested").increment(1);
        info!(
            subscription_id = request.id,
            follower_id, publisher_id, friendship, "Subscription requested"
        );
        SubscriptionRequestDto::try_from(request)
    }

    /// The follower withdraws a waiting request
    pub async fn revoke_request_by_subscriber(
        pool: &DbPool,
        follower_id: i64,
        subscription_id: i64,
    ) -> Result<SubscriptionRequestDto> {
        ensure_user_exists(pool, follower_id).await?;
        let request = SubscriptionRepository::find_by_follower_with_status(
            pool,
            subscription_id,
            follower_id,
            SubscriptionStatus::Waiting,
        )
        .await?
        .ok_or_else(|| Error::not_found("Subscription request", subscription_id))?;

        let request = SubscriptionRepository::transition(
            pool,
            request.id,
            SubscriptionStatus::Waiting,
            SubscriptionStatus::Revoke,
            datetime::now(),
        )
        .await?
        .ok_or_else(|| Error::not_found("Subscription request", subscription_id))?;

        info!(subscription_id, "Subscription request revoked by follower");
        SubscriptionRequestDto::try_from(request)
    }

    /// The publisher declines a waiting request
    pub async fn cancel_request_by_publisher(
        pool: &DbPool,
        publisher_id: i64,
        subscription_id: i64,
    ) -> Result<SubscriptionRequestDto> {
        ensure_user_exists(pool, publisher_id).await?;
        let request = SubscriptionRepository::find_by_publisher_with_status(
            pool,
            subscription_id,
            publisher_id,
            SubscriptionStatus::Waiting,
        )
        .await?
        .ok_or_else(|| Error::not_found("Subscription request", subscription_id))?;

        let request = SubscriptionRepository::transition(
            pool,
            request.id,
            SubscriptionStatus::Waiting,
            SubscriptionStatus::Canceled,
            datetime::now(),
        )
        .await?
        .ok_or_else(|| Error::not_found("Subscription request", subscription_id))?;

        info!(subscription_id, "Subscription request declined by publisher");
        SubscriptionRequestDto::try_from(request)
    }

    /// The publisher accepts a waiting request and files the follower
    ///
    /// Without friendship the follower lands in `FOLLOWER`; a friend lands in
    /// the named group or, when none is named, in `FRIENDS_ALL`.
    pub async fn accept_subscribe(
        pool: &DbPool,
        publisher_id: i64,
        subscription_id: i64,
        query: &AcceptSubscriptionQuery,
    ) -> Result<SubscriptionRequestDto> {
        ensure_user_exists(pool, publisher_id).await?;
        let request = SubscriptionRepository::find_by_publisher_with_status(
            pool,
            subscription_id,
            publisher_id,
            SubscriptionStatus::Waiting,
        )
        .await?
        .ok_or_else(|| Error::not_found("Subscription request", subscription_id))?;

        let title = follower_group_title(query.friendship, query.group.as_deref());
        let group = GroupRepository::find_by_title(pool, publisher_id, &title)
            .await?
            .ok_or_else(|| Error::not_found("Group", &title))?;

        let mut tx = pool.begin().await?;
        let request = SubscriptionRepository::transition(
            &mut *tx,
            request.id,
            SubscriptionStatus::Waiting,
            SubscriptionStatus::Consider,
            datetime::now(),
        )
        .await?
        .ok_or_else(|| Error::not_found("Subscription request", subscription_id))?;
        FollowerRepository::upsert(&mut *tx, publisher_id, request.follower_id, group.id).await?;
        tx.commit().await?;

        counter!("ewm.subscriptions.accepted").increment(1);
        info!(
            subscription_id,
            follower_id = request.follower_id,
            group = %group.title,
            "Subscription request accepted"
        );
        SubscriptionRequestDto::try_from(request)
    }

    /// Requests addressed to `user_id`
    pub async fn get_incoming(
        pool: &DbPool,
        user_id: i64,
        status: Option<SubscriptionStatus>,
        page: PageParams,
    ) -> Result<Vec<SubscriptionRequestDto>> {
        ensure_user_exists(pool, user_id).await?;

        SubscriptionRepository::list_by_publisher(pool, user_id, status, page)
            .await?
            .into_iter()
            .map(SubscriptionRequestDto::try_from)
            .collect()
    }

    /// Requests sent by `user_id`
    pub async fn get_outgoing(
        pool: &DbPool,
        user_id: i64,
        status: Option<SubscriptionStatus>,
        page: PageParams,
    ) -> Result<Vec<SubscriptionRequestDto>> {
        ensure_user_exists(pool, user_id).await?;

        SubscriptionRepository::list_by_follower(pool, user_id, status, page)
            .await?
            .into_iter()
            .map(SubscriptionRequestDto::try_from)
            .collect()
    }

    pub async fn get_subscription(
        pool: &DbPool,
        user_id: i64,
        subscription_id: i64,
    ) -> Result<SubscriptionRequestDto> {
        ensure_user_exists(pool, user_id).await?;

        let request = SubscriptionRepository::find_for_participant(pool, subscription_id, user_id)
            .await?
            .ok_or_else(|| Error::not_found("Subscription request", subscription_id))?;
        SubscriptionRequestDto::try_from(request)
    }

    /// Create a custom friendship group; titles are stored upper-case
    pub async fn add_new_group(pool: &DbPool, user_id: i64, req: &NewGroupDto) -> Result<GroupDto> {
        ensure_user_exists(pool, user_id).await?;

        let title = req.title.trim().to_uppercase();
        if GroupRepository::find_by_title(pool, user_id, &title)
            .await?
            .is_some()
        {
            return Err(Error::conflict(format!("Group '{}' already exists", title)));
        }

        let group = GroupRepository::create(pool, user_id, &title).await?;
        info!(group_id = group.id, user_id, "Group created");
        Ok(GroupDto::from(group))
    }

    pub async fn list_groups(pool: &DbPool, user_id: i64) -> Result<Vec<GroupDto>> {
        ensure_user_exists(pool, user_id).await?;

        let groups = GroupRepository::list_by_user(pool, user_id).await?;
        Ok(groups.into_iter().map(GroupDto::from).collect())
    }

    pub async fn list_followers(pool: &DbPool, user_id: i64) -> Result<Vec<FollowerDto>> {
        ensure_user_exists(pool, user_id).await?;

        let followers = FollowerRepository::list_by_publisher(pool, user_id).await?;
        Ok(followers.into_iter().map(FollowerDto::from).collect())
    }
}
