//! Data models matching the PostgreSQL database schema
//!
//! Status columns are stored as text; the typed enums below own the
//! transition rules and are converted at the service boundary.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::{Error, Result};

/// Title of the built-in group every accepted plain subscriber lands in
pub const GROUP_FOLLOWER: &str = "FOLLOWER";

/// Title of the built-in group for friends without a more specific tier
pub const GROUP_FRIENDS_ALL: &str = "FRIENDS_ALL";

/// Minimum lead time an initiator must leave before the event starts
pub const INITIATOR_LEAD_HOURS: i64 = 2;

/// Minimum lead time required to publish an event
pub const PUBLISH_LEAD_HOURS: i64 = 1;

// ============================================================================
// Rows
// ============================================================================

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Event category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Stored coordinates, shared between events posted at the same point
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: i64,
    pub lat: f32,
    pub lon: f32,
}

/// Event joined with its category, initiator and location
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub title: String,
    pub annotation: String,
    pub description: String,
    pub category_id: i64,
    pub category_name: String,
    pub initiator_id: i64,
    pub initiator_name: String,
    pub location_id: i64,
    pub lat: f32,
    pub lon: f32,
    pub event_date: NaiveDateTime,
    pub created_on: NaiveDateTime,
    pub published_on: Option<NaiveDateTime>,
    pub paid: bool,
    pub participant_limit: i32,
    pub request_moderation: bool,
    pub state: String,
    pub confirmed_requests: i32,
    pub views: i64,
}

impl EventRow {
    pub fn state(&self) -> Result<EventState> {
        self.state.parse()
    }
}

/// Participation request for an event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParticipationRequest {
    pub id: i64,
    pub event_id: i64,
    pub requester_id: i64,
    pub status: String,
    pub created: NaiveDateTime,
    /// Friendship group of the requester allowed to see this participation
    pub group_id: Option<i64>,
}

impl ParticipationRequest {
    pub fn status(&self) -> Result<RequestStatus> {
        self.status.parse()
    }
}

/// Curated list of events
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Compilation {
    pub id: i64,
    pub title: String,
    pub pinned: bool,
}

/// Friendship tier owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FriendGroup {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

/// Request from `follower_id` to subscribe to `publisher_id`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubscriptionRequest {
    pub id: i64,
    pub follower_id: i64,
    pub publisher_id: i64,
    pub friendship: bool,
    pub status: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

impl SubscriptionRequest {
    pub fn status(&self) -> Result<SubscriptionStatus> {
        self.status.parse()
    }
}

/// Accepted subscription, joined with the group it was filed under
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Follower {
    pub id: i64,
    pub publisher_id: i64,
    pub follower_id: i64,
    pub follower_name: String,
    pub group_id: i64,
    pub group_title: String,
}

impl Follower {
    /// Filed under a friendship group rather than the plain `FOLLOWER` tier
    pub fn is_friend(&self) -> bool {
        self.group_title != GROUP_FOLLOWER
    }
}

// ============================================================================
// Enums
// ============================================================================

macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(Error::validation(format!(
                        "Unknown {}: {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}

/// Lifecycle of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    Pending,
    Published,
    Canceled,
}

text_enum!(EventState {
    Pending => "PENDING",
    Published => "PUBLISHED",
    Canceled => "CANCELED",
});

impl EventState {
    /// The initiator may edit only events that are not live
    pub fn editable_by_initiator(&self) -> bool {
        matches!(self, Self::Pending | Self::Canceled)
    }

    /// State after the initiator cancels the event
    pub fn cancel_by_initiator(&self) -> Result<Self> {
        match self {
            Self::Published => Err(Error::conflict("A published event cannot be canceled")),
            Self::Canceled => Err(Error::conflict("The event is already canceled")),
            Self::Pending => Ok(Self::Canceled),
        }
    }

    /// State after an administrator rejects the event
    pub fn reject_by_admin(&self) -> Result<Self> {
        match self {
            Self::Published => Err(Error::conflict("A published event cannot be rejected")),
            Self::Pending | Self::Canceled => Ok(Self::Canceled),
        }
    }
}

/// Check that an event starts far enough ahead of `now`
pub fn ensure_lead_time(event_date: NaiveDateTime, now: NaiveDateTime, hours: i64) -> Result<()> {
    if event_date < now + Duration::hours(hours) {
        return Err(Error::validation(format!(
            "Event date must be at least {} hour(s) from now, got {}",
            hours,
            crate::datetime::format(&event_date)
        )));
    }
    Ok(())
}

/// Check that an event can be published at `now`
pub fn ensure_publishable(state: EventState, event_date: NaiveDateTime, now: NaiveDateTime) -> Result<()> {
    if state != EventState::Pending {
        return Err(Error::conflict(format!(
            "Only pending events can be published, current state: {}",
            state
        )));
    }
    if event_date < now + Duration::hours(PUBLISH_LEAD_HOURS) {
        return Err(Error::conflict(
            "The event starts in less than an hour and cannot be published",
        ));
    }
    Ok(())
}

/// A limit of zero means unlimited
pub fn has_free_slots(participant_limit: i32, confirmed: i32) -> bool {
    participant_limit == 0 || confirmed < participant_limit
}

/// Status of a participation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Rejected,
    Canceled,
}

text_enum!(RequestStatus {
    Pending => "PENDING",
    Confirmed => "CONFIRMED",
    Rejected => "REJECTED",
    Canceled => "CANCELED",
});

/// Status of a subscription request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    /// Sent, not yet answered
    Waiting,
    /// Accepted by the publisher
    Consider,
    /// Declined by the publisher
    Canceled,
    /// Withdrawn by the follower
    Revoke,
}

text_enum!(SubscriptionStatus {
    Waiting => "WAITING",
    Consider => "CONSIDER",
    Canceled => "CANCELED",
    Revoke => "REVOKE",
});

impl SubscriptionStatus {
    /// Whether an existing request in this status prevents sending a new one
    pub fn blocks_new_request(&self) -> bool {
        !matches!(self, Self::Revoke)
    }
}

/// Ordering of event listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventSort {
    EventDate,
    Views,
}

text_enum!(EventSort {
    EventDate => "EVENT_DATE",
    Views => "VIEWS",
});

impl EventSort {
    pub fn order_by(&self) -> &'static str {
        match self {
            Self::EventDate => "e.event_date ASC, e.id ASC",
            Self::Views => "e.views DESC, e.id ASC",
        }
    }
}

/// Title of the group an accepted subscriber is filed under
pub fn follower_group_title(friendship: bool, requested: Option<&str>) -> String {
    match (friendship, requested.map(str::trim)) {
        (false, _) => GROUP_FOLLOWER.to_string(),
        (true, Some(title)) if !title.is_empty() => title.to_uppercase(),
        (true, _) => GROUP_FRIENDS_ALL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime;

    #[test]
    fn test_event_state_round_trip_text() {
        assert_eq!("published".parse::<EventState>().unwrap(), EventState::Published);
        assert_eq!(EventState::Canceled.as_str(), "CANCELED");
        assert!("ARCHIVED".parse::<EventState>().is_err());
    }

    #[test]
    fn test_editable_by_initiator() {
        assert!(EventState::Pending.editable_by_initiator());
        assert!(EventState::Canceled.editable_by_initiator());
        assert!(!EventState::Published.editable_by_initiator());
    }

    #[test]
    fn test_cancel_by_initiator() {
        assert_eq!(
            EventState::Pending.cancel_by_initiator().unwrap(),
            EventState::Canceled
        );
        assert_eq!(
            EventState::Published.cancel_by_initiator().unwrap_err().status_code(),
            409
        );
        assert_eq!(
            EventState::Canceled.cancel_by_initiator().unwrap_err().status_code(),
            409
        );
    }

    #[test]
    fn test_reject_by_admin() {
        assert!(EventState::Published.reject_by_admin().is_err());
        assert_eq!(
            EventState::Pending.reject_by_admin().unwrap(),
            EventState::Canceled
        );
    }

    #[test]
    fn test_lead_time() {
        let now = datetime::parse("2024-05-01 10:00:00").unwrap();
        let ok = datetime::parse("2024-05-01 12:00:00").unwrap();
        let too_soon = datetime::parse("2024-05-01 11:59:59").unwrap();
        assert!(ensure_lead_time(ok, now, INITIATOR_LEAD_HOURS).is_ok());
        assert_eq!(
            ensure_lead_time(too_soon, now, INITIATOR_LEAD_HOURS)
                .unwrap_err()
                .status_code(),
            400
        );
    }

    #[test]
    fn test_publishable() {
        let now = datetime::parse("2024-05-01 10:00:00").unwrap();
        let later = datetime::parse("2024-05-01 11:30:00").unwrap();
        let soon = datetime::parse("2024-05-01 10:30:00").unwrap();
        assert!(ensure_publishable(EventState::Pending, later, now).is_ok());
        assert!(ensure_publishable(EventState::Pending, soon, now).is_err());
        assert!(ensure_publishable(EventState::Published, later, now).is_err());
        assert!(ensure_publishable(EventState::Canceled, later, now).is_err());
    }

    #[test]
    fn test_free_slots() {
        assert!(has_free_slots(0, 1000));
        assert!(has_free_slots(3, 2));
        assert!(!has_free_slots(3, 3));
    }

    #[test]
    fn test_subscription_blocking_statuses() {
        assert!(SubscriptionStatus::Waiting.blocks_new_request());
        assert!(SubscriptionStatus::Consider.blocks_new_request());
        assert!(SubscriptionStatus::Canceled.blocks_new_request());
        assert!(!SubscriptionStatus::Revoke.blocks_new_request());
    }

    #[test]
    fn test_follower_group_title() {
        assert_eq!(follower_group_title(false, Some("close")), GROUP_FOLLOWER);
        assert_eq!(follower_group_title(true, Some("close")), "CLOSE");
        assert_eq!(follower_group_title(true, Some("  ")), GROUP_FRIENDS_ALL);
        assert_eq!(follower_group_title(true, None), GROUP_FRIENDS_ALL);
    }

    #[test]
    fn test_status_serde_uses_upper_case() {
        let json = serde_json::to_string(&SubscriptionStatus::Consider).unwrap();
        assert_eq!(json, "\"CONSIDER\"");
        let sort: EventSort = serde_json::from_str("\"EVENT_DATE\"").unwrap();
        assert_eq!(sort, EventSort::EventDate);
    }

    #[test]
    fn test_follower_tier_is_not_a_friend() {
        let mut follower = Follower {
            id: 1,
            publisher_id: 7,
            follower_id: 8,
            follower_name: "Ann".to_string(),
            group_id: 3,
            group_title: GROUP_FOLLOWER.to_string(),
        };
        assert!(!follower.is_friend());

        follower.group_title = GROUP_FRIENDS_ALL.to_string();
        assert!(follower.is_friend());
    }
}
