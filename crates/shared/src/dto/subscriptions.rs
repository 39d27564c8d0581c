//! Subscription and friendship-group DTOs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::not_blank;
use super::users::UserShortDto;
use crate::error::{Error, Result};
use crate::models::{Follower, FriendGroup, SubscriptionRequest, SubscriptionStatus};

/// Body of a subscription request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewSubscriptionRequest {
    /// Ask to be filed as a friend rather than a plain follower
    #[serde(default)]
    pub friendship: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequestDto {
    pub id: i64,
    pub follower: i64,
    pub publisher: i64,
    pub friendship: bool,
    pub status: SubscriptionStatus,
    #[serde(with = "crate::datetime")]
    #[schema(value_type = String)]
    pub created: NaiveDateTime,
    #[serde(with = "crate::datetime")]
    #[schema(value_type = String)]
    pub updated: NaiveDateTime,
}

/// Query parameters for accepting a subscription
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcceptSubscriptionQuery {
    #[serde(default)]
    pub friendship: bool,
    /// Title of the publisher's group to file the friend under
    pub group: Option<String>,
}

/// Query parameters for listing subscription requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionsQuery {
    pub status: Option<SubscriptionStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"title": "Close friends"}))]
pub struct NewGroupDto {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupDto {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FollowerDto {
    pub follower: UserShortDto,
    pub group: String,
}

impl TryFrom<SubscriptionRequest> for SubscriptionRequestDto {
    type Error = Error;

    fn try_from(request: SubscriptionRequest) -> Result<Self> {
        let status = request.status()?;
        Ok(Self {
            id: request.id,
            follower: request.follower_id,
            publisher: request.publisher_id,
            friendship: request.friendship,
            status,
            created: request.created,
            updated: request.updated,
        })
    }
}

impl From<FriendGroup> for GroupDto {
    fn from(group: FriendGroup) -> Self {
        Self {
            id: group.id,
            title: group.title,
        }
    }
}

impl From<Follower> for FollowerDto {
    fn from(follower: Follower) -> Self {
        Self {
            follower: UserShortDto {
                id: follower.follower_id,
                name: follower.follower_name,
            },
            group: follower.group_title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_query_defaults() {
        let query: AcceptSubscriptionQuery = serde_urlencoded::from_str("").unwrap();
        assert!(!query.friendship);
        assert!(query.group.is_none());

        let query: AcceptSubscriptionQuery =
            serde_urlencoded::from_str("friendship=true&group=close").unwrap();
        assert!(query.friendship);
        assert_eq!(query.group.as_deref(), Some("close"));
    }

    #[test]
    fn test_subscriptions_query_status() {
        let query: SubscriptionsQuery = serde_urlencoded::from_str("status=WAITING").unwrap();
        assert_eq!(query.status, Some(SubscriptionStatus::Waiting));
    }

    #[test]
    fn test_new_group_blank_title() {
        let dto = NewGroupDto {
            title: "\t".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_subscription_dto_from_row() {
        let now = crate::datetime::parse("2030-01-01 12:00:00").unwrap();
        let row = SubscriptionRequest {
            id: 5,
            follower_id: 1,
            publisher_id: 2,
            friendship: true,
            status: "WAITING".to_string(),
            created: now,
            updated: now,
        };
        let dto = SubscriptionRequestDto::try_from(row).unwrap();
        assert_eq!(dto.status, SubscriptionStatus::Waiting);
        assert!(dto.friendship);
    }
}
