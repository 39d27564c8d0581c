//! Participation request DTOs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::models::{ParticipationRequest, RequestStatus};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationRequestDto {
    pub id: i64,
    pub event: i64,
    pub requester: i64,
    pub status: RequestStatus,
    #[serde(with = "crate::datetime")]
    #[schema(value_type = String)]
    pub created: NaiveDateTime,
}

/// Query parameters for filing a participation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequestQuery {
    pub event_id: i64,
    /// Own friendship group allowed to see this participation; all friends when absent
    pub group_id: Option<i64>,
}

impl TryFrom<ParticipationRequest> for ParticipationRequestDto {
    type Error = Error;

    fn try_from(request: ParticipationRequest) -> Result<Self> {
        let status = request.status()?;
        Ok(Self {
            id: request.id,
            event: request.event_id,
            requester: request.requester_id,
            status,
            created: request.created,
        })
    }
}
