//! Event DTOs
//!
//! Bodies and query parameters use camelCase names and the
//! `yyyy-MM-dd HH:mm:ss` date-time format.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::categories::CategoryDto;
use super::common::not_blank;
use super::users::UserShortDto;
use crate::error::{Error, Result};
use crate::models::{EventRow, EventSort, EventState};

/// Geographic point of an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LocationDto {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f32,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f32,
}

/// Request to create an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEventDto {
    #[validate(length(min = 20, max = 2000), custom(function = "not_blank"))]
    pub annotation: String,

    #[validate(range(min = 1))]
    pub category: i64,

    #[validate(length(min = 20, max = 7000), custom(function = "not_blank"))]
    pub description: String,

    #[serde(with = "crate::datetime")]
    #[schema(value_type = String, example = "2030-12-31 15:10:05")]
    pub event_date: NaiveDateTime,

    #[validate(nested)]
    pub location: LocationDto,

    #[serde(default)]
    pub paid: bool,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub participant_limit: i32,

    #[serde(default = "default_moderation")]
    pub request_moderation: bool,

    #[validate(length(min = 3, max = 120), custom(function = "not_blank"))]
    pub title: String,
}

fn default_moderation() -> bool {
    true
}

/// Initiator's edit of a pending or canceled event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(range(min = 1))]
    pub event_id: i64,

    #[validate(length(min = 20, max = 2000))]
    pub annotation: Option<String>,

    #[validate(range(min = 1))]
    pub category: Option<i64>,

    #[validate(length(min = 20, max = 7000))]
    pub description: Option<String>,

    #[serde(default, with = "crate::datetime::option")]
    #[schema(value_type = Option<String>)]
    pub event_date: Option<NaiveDateTime>,

    pub paid: Option<bool>,

    #[validate(range(min = 0))]
    pub participant_limit: Option<i32>,

    #[validate(length(min = 3, max = 120))]
    pub title: Option<String>,
}

/// Administrator's edit of any event
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateEventRequest {
    #[validate(length(min = 20, max = 2000))]
    pub annotation: Option<String>,

    #[validate(range(min = 1))]
    pub category: Option<i64>,

    #[validate(length(min = 20, max = 7000))]
    pub description: Option<String>,

    #[serde(default, with = "crate::datetime::option")]
    #[schema(value_type = Option<String>)]
    pub event_date: Option<NaiveDateTime>,

    #[validate(nested)]
    pub location: Option<LocationDto>,

    pub paid: Option<bool>,

    #[validate(range(min = 0))]
    pub participant_limit: Option<i32>,

    pub request_moderation: Option<bool>,

    #[validate(length(min = 3, max = 120))]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventFullDto {
    pub id: i64,
    pub annotation: String,
    pub category: CategoryDto,
    pub confirmed_requests: i32,
    #[serde(with = "crate::datetime")]
    #[schema(value_type = String)]
    pub created_on: NaiveDateTime,
    pub description: String,
    #[serde(with = "crate::datetime")]
    #[schema(value_type = String)]
    pub event_date: NaiveDateTime,
    pub initiator: UserShortDto,
    pub location: LocationDto,
    pub paid: bool,
    pub participant_limit: i32,
    #[serde(default, with = "crate::datetime::option")]
    #[schema(value_type = Option<String>)]
    pub published_on: Option<NaiveDateTime>,
    pub request_moderation: bool,
    pub state: EventState,
    pub title: String,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventShortDto {
    pub id: i64,
    pub annotation: String,
    pub category: CategoryDto,
    pub confirmed_requests: i32,
    #[serde(with = "crate::datetime")]
    #[schema(value_type = String)]
    pub event_date: NaiveDateTime,
    pub initiator: UserShortDto,
    pub paid: bool,
    pub title: String,
    pub views: i64,
}

impl TryFrom<EventRow> for EventFullDto {
    type Error = Error;

    fn try_from(row: EventRow) -> Result<Self> {
        let state = row.state()?;
        Ok(Self {
            id: row.id,
            annotation: row.annotation,
            category: CategoryDto {
                id: row.category_id,
                name: row.category_name,
            },
            confirmed_requests: row.confirmed_requests,
            created_on: row.created_on,
            description: row.description,
            event_date: row.event_date,
            initiator: UserShortDto {
                id: row.initiator_id,
                name: row.initiator_name,
            },
            location: LocationDto {
                lat: row.lat,
                lon: row.lon,
            },
            paid: row.paid,
            participant_limit: row.participant_limit,
            published_on: row.published_on,
            request_moderation: row.request_moderation,
            state,
            title: row.title,
            views: row.views,
        })
    }
}

impl From<EventRow> for EventShortDto {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            annotation: row.annotation,
            category: CategoryDto {
                id: row.category_id,
                name: row.category_name,
            },
            confirmed_requests: row.confirmed_requests,
            event_date: row.event_date,
            initiator: UserShortDto {
                id: row.initiator_id,
                name: row.initiator_name,
            },
            paid: row.paid,
            title: row.title,
            views: row.views,
        }
    }
}

/// Query parameters for the administrator's event search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEventsQuery {
    /// Comma-separated initiator ids
    pub users: Option<String>,
    /// Comma-separated states
    pub states: Option<String>,
    /// Comma-separated category ids
    pub categories: Option<String>,
    #[serde(default, with = "crate::datetime::option")]
    pub range_start: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime::option")]
    pub range_end: Option<NaiveDateTime>,
}

impl AdminEventsQuery {
    pub fn parse_states(&self) -> Result<Option<Vec<EventState>>> {
        match self.states.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .split(',')
                .map(str::parse::<EventState>)
                .collect::<Result<Vec<_>>>()
                .map(Some),
        }
    }
}

/// Query parameters for the public event search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicEventsQuery {
    /// Case-insensitive substring of the annotation or description
    pub text: Option<String>,
    /// Comma-separated category ids
    pub categories: Option<String>,
    pub paid: Option<bool>,
    #[serde(default, with = "crate::datetime::option")]
    pub range_start: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime::option")]
    pub range_end: Option<NaiveDateTime>,
    #[serde(default)]
    pub only_available: bool,
    pub sort: Option<EventSort>,
}

/// Query parameters for browsing a friend's events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendEventsQuery {
    /// Comma-separated category ids
    pub categories: Option<String>,
    pub paid: Option<bool>,
    #[serde(default, with = "crate::datetime::option")]
    pub range_start: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime::option")]
    pub range_end: Option<NaiveDateTime>,
    pub sort: Option<EventSort>,
}

/// Reject a range whose start lies after its end
pub fn ensure_range(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(Error::validation("rangeStart must not be after rangeEnd"));
        }
    }
    Ok(())
}
