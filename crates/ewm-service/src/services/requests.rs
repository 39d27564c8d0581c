//! Participation requests
//!
//! Capacity changes run inside a transaction that locks the event row, so two
//! confirmations can never both take the last free slot.

use metrics::counter;
use shared::dto::ParticipationRequestDto;
use shared::models::{has_free_slots, EventState, ParticipationRequest, RequestStatus};
use shared::{datetime, DbPool, Error, Result};
use tracing::info;

use super::users::ensure_user_exists;
use crate::repositories::{EventRepository, GroupRepository, RequestRepository};

pub struct RequestService;

impl RequestService {
    // ------------------------------------------------------------------
    // Requester
    // ------------------------------------------------------------------

    pub async fn list_own(pool: &DbPool, user_id: i64) -> Result<Vec<ParticipationRequestDto>> {
        ensure_user_exists(pool, user_id).await?;

        RequestRepository::list_by_requester(pool, user_id)
            .await?
            .into_iter()
            .map(ParticipationRequestDto::try_from)
            .collect()
    }

    /// Ask to join a published event of another user
    ///
    /// `group_id` names one of the requester's own groups allowed to see the
    /// participation; without it every friend may see it.
    pub async fn create(
        pool: &DbPool,
        user_id: i64,
        event_id: i64,
        group_id: Option<i64>,
    ) -> Result<ParticipationRequestDto> {
        ensure_user_exists(pool, user_id).await?;
        let event = EventRepository::find_by_id(pool, event_id)
            .await?
            .ok_or_else(|| Error::not_found("Event", event_id))?;

        if event.initiator_id == user_id {
            return Err(Error::conflict("The initiator cannot request to join own event"));
        }
        if event.state()? != EventState::Published {
            return Err(Error::conflict("Only published events accept requests"));
        }
        if RequestRepository::exists(pool, event_id, user_id).await? {
            return Err(Error::conflict(format!(
                "User {} already requested to join event {}",
                user_id, event_id
            )));
        }
        if let Some(group_id) = group_id {
            if GroupRepository::find_owned(pool, user_id, group_id).await?.is_none() {
                return Err(Error::not_found("Group", group_id));
            }
        }

        let mut tx = pool.begin().await?;
        let (limit, confirmed) = EventRepository::lock_capacity(&mut *tx, event_id)
            .await?
            .ok_or_else(|| Error::not_found("Event", event_id))?;
        if !has_free_slots(limit, confirmed) {
            return Err(Error::conflict("The participant limit has been reached"));
        }

        let status = initial_status(event.request_moderation, limit);
        let request = RequestRepository::create(
            &mut *tx,
            event_id,
            user_id,
            status,
            datetime::now(),
            group_id,
        )
        .await?;
        if status == RequestStatus::Confirmed {
            EventRepository::add_confirmed(&mut *tx, event_id, 1).await?;
        }
        tx.commit().await?;

        counter!("ewm.requests.created", "status" => status.as_str()).increment(1);
        info!(request_id = request.id, event_id, %status, "Participation request created");

        ParticipationRequestDto::try_from(request)
    }

    /// Withdraw own request; a confirmed one frees its slot
    ///
    /// Locks the event row before the request row, in the same order as
    /// `confirm`.
    pub async fn cancel(
        pool: &DbPool,
        user_id: i64,
        request_id: i64,
    ) -> Result<ParticipationRequestDto> {
        ensure_user_exists(pool, user_id).await?;
        let event_id = RequestRepository::find_by_requester(pool, request_id, user_id)
            .await?
            .ok_or_else(|| Error::not_found("Request", request_id))?
            .event_id;

        let mut tx = pool.begin().await?;
        EventRepository::lock_capacity(&mut *tx, event_id).await?;
        let request = RequestRepository::lock_by_requester(&mut *tx, request_id, user_id)
            .await?
            .ok_or_else(|| Error::not_found("Request", request_id))?;

        let status = request.status()?;
        if status == RequestStatus::Canceled {
            return Err(Error::conflict("The request is already canceled"));
        }
        if status == RequestStatus::Confirmed {
            EventRepository::add_confirmed(&mut *tx, event_id, -1).await?;
        }
        let request = RequestRepository::set_status(&mut *tx, request_id, RequestStatus::Canceled)
            .await?;
        tx.commit().await?;

        info!(request_id, "Participation request canceled");
        ParticipationRequestDto::try_from(request)
    }

    // ------------------------------------------------------------------
    // Initiator
    // ------------------------------------------------------------------

    pub async fn list_for_event(
        pool: &DbPool,
        user_id: i64,
        event_id: i64,
    ) -> Result<Vec<ParticipationRequestDto>> {
        ensure_user_exists(pool, user_id).await?;
        ensure_own_event(pool, user_id, event_id).await?;

        RequestRepository::list_by_event(pool, event_id)
            .await?
            .into_iter()
            .map(ParticipationRequestDto::try_from)
            .collect()
    }

    /// Confirm a pending request
    ///
    /// A full event rejects every pending request and answers 409. Taking
    /// the last free slot rejects the requests still pending.
    pub async fn confirm(
        pool: &DbPool,
        user_id: i64,
        event_id: i64,
        request_id: i64,
    ) -> Result<ParticipationRequestDto> {
        ensure_user_exists(pool, user_id).await?;
        ensure_own_event(pool, user_id, event_id).await?;

        let mut tx = pool.begin().await?;
        let (limit, confirmed) = EventRepository::lock_capacity(&mut *tx, event_id)
            .await?
            .ok_or_else(|| Error::not_found("Event", event_id))?;
        let request = RequestRepository::lock_for_event(&mut *tx, request_id, event_id)
            .await?
            .ok_or_else(|| Error::not_found("Request", request_id))?;
        ensure_pending(&request)?;

        if !has_free_slots(limit, confirmed) {
            let rejected = RequestRepository::reject_all_pending(&mut *tx, event_id).await?;
            tx.commit().await?;
            info!(event_id, rejected, "Participant limit reached, pending requests rejected");
            return Err(Error::conflict("The participant limit has been reached"));
        }

        let confirmed_request =
            RequestRepository::set_status(&mut *tx, request.id, RequestStatus::Confirmed).await?;
        EventRepository::add_confirmed(&mut *tx, event_id, 1).await?;
        if !has_free_slots(limit, confirmed + 1) {
            let rejected = RequestRepository::reject_all_pending(&mut *tx, event_id).await?;
            info!(event_id, rejected, "Last slot taken, pending requests rejected");
        }
        tx.commit().await?;

        info!(request_id, event_id, "Participation request confirmed");
        ParticipationRequestDto::try_from(confirmed_request)
    }

    pub async fn reject(
        pool: &DbPool,
        user_id: i64,
        event_id: i64,
        request_id: i64,
    ) -> Result<ParticipationRequestDto> {
        ensure_user_exists(pool, user_id).await?;
        ensure_own_event(pool, user_id, event_id).await?;

        let mut tx = pool.begin().await?;
        let request = RequestRepository::lock_for_event(&mut *tx, request_id, event_id)
            .await?
            .ok_or_else(|| Error::not_found("Request", request_id))?;
        ensure_pending(&request)?;

        let request =
            RequestRepository::set_status(&mut *tx, request.id, RequestStatus::Rejected).await?;
        tx.commit().await?;

        info!(request_id, event_id, "Participation request rejected");
        ParticipationRequestDto::try_from(request)
    }
}

/// Status of a new request: moderated events with a limit start out pending
fn initial_status(request_moderation: bool, participant_limit: i32) -> RequestStatus {
    if !request_moderation || participant_limit == 0 {
        RequestStatus::Confirmed
    } else {
        RequestStatus::Pending
    }
}

async fn ensure_own_event(pool: &DbPool, user_id: i64, event_id: i64) -> Result<()> {
    if EventRepository::find_by_initiator_and_id(pool, user_id, event_id)
        .await?
        .is_none()
    {
        return Err(Error::not_found("Event", event_id));
    }
    Ok(())
}

/// Only pending requests can be confirmed or rejected
fn ensure_pending(request: &ParticipationRequest) -> Result<()> {
    if request.status()? != RequestStatus::Pending {
        return Err(Error::conflict(format!(
            "Only pending requests can be answered, current status: {}",
            request.status
        )));
    }
    Ok(())
}
