//! Event lifecycle: creation and edits by the initiator, moderation by
//! administrators, public search and browsing a friend's events.

use metrics::counter;
use shared::dto::{
    ensure_range, parse_id_list, AdminEventsQuery, AdminUpdateEventRequest, EventFullDto,
    EventShortDto, FriendEventsQuery, NewEventDto, PageParams, PublicEventsQuery,
    UpdateEventRequest,
};
use shared::models::{
    ensure_lead_time, ensure_publishable, EventRow, EventState, GROUP_FRIENDS_ALL,
    INITIATOR_LEAD_HOURS,
};
use shared::{datetime, DbPool, Error, Result};
use tracing::info;

use super::access;
use super::users::ensure_user_exists;
use crate::repositories::{
    CategoryRepository, EventFilter, EventRecord, EventRepository, FollowerRepository,
    GroupRepository, LocationRepository, RequestRepository,
};

pub struct EventService;

impl EventService {
    // ------------------------------------------------------------------
    // Initiator
    // ------------------------------------------------------------------

    pub async fn list_own(
        pool: &DbPool,
        user_id: i64,
        page: PageParams,
    ) -> Result<Vec<EventShortDto>> {
        ensure_user_exists(pool, user_id).await?;

        let filter = EventFilter {
            initiators: Some(vec![user_id]),
            ..Default::default()
        };
        let events = EventRepository::search(pool, &filter, page).await?;
        Ok(events.into_iter().map(EventShortDto::from).collect())
    }

    /// Create a pending event
    pub async fn create(pool: &DbPool, user_id: i64, req: &NewEventDto) -> Result<EventFullDto> {
        ensure_user_exists(pool, user_id).await?;
        ensure_category_exists(pool, req.category).await?;

        let now = datetime::now();
        ensure_lead_time(req.event_date, now, INITIATOR_LEAD_HOURS)?;

        let mut tx = pool.begin().await?;
        let location =
            LocationRepository::find_or_create(&mut *tx, req.location.lat, req.location.lon)
                .await?;
        let record = EventRecord {
            title: req.title.clone(),
            annotation: req.annotation.clone(),
            description: req.description.clone(),
            category_id: req.category,
            location_id: location.id,
            event_date: req.event_date,
            paid: req.paid,
            participant_limit: req.participant_limit,
            request_moderation: req.request_moderation,
            state: EventState::Pending,
        };
        let event_id = EventRepository::create(&mut *tx, user_id, &record, now).await?;
        tx.commit().await?;

        counter!("ewm.events.created").increment(1);
        info!(event_id, initiator_id = user_id, "Event created");

        load_full(pool, event_id).await
    }

    /// Edit a pending or canceled event; a canceled one goes back to review
    pub async fn update_own(
        pool: &DbPool,
        user_id: i64,
        req: &UpdateEventRequest,
    ) -> Result<EventFullDto> {
        let row = EventRepository::find_by_initiator_and_id(pool, user_id, req.event_id)
            .await?
            .ok_or_else(|| Error::not_found("Event", req.event_id))?;

        let state = row.state()?;
        if !state.editable_by_initiator() {
            return Err(Error::conflict("Only pending or canceled events can be changed"));
        }
        if let Some(category) = req.category {
            ensure_category_exists(pool, category).await?;
        }
        if let Some(event_date) = req.event_date {
            ensure_lead_time(event_date, datetime::now(), INITIATOR_LEAD_HOURS)?;
        }

        let mut record = EventRecord::from_row(&row, state);
        apply_initiator_update(&mut record, req);
        EventRepository::update(pool, row.id, &record).await?;

        info!(event_id = row.id, state = %record.state, "Event updated by initiator");
        load_full(pool, row.id).await
    }

    pub async fn get_own(pool: &DbPool, user_id: i64, event_id: i64) -> Result<EventFullDto> {
        let row = EventRepository::find_by_initiator_and_id(pool, user_id, event_id)
            .await?
            .ok_or_else(|| Error::not_found("Event", event_id))?;

        EventFullDto::try_from(row)
    }

    pub async fn cancel_own(pool: &DbPool, user_id: i64, event_id: i64) -> Result<EventFullDto> {
        ensure_user_exists(pool, user_id).await?;
        let row = EventRepository::find_by_initiator_and_id(pool, user_id, event_id)
            .await?
            .ok_or_else(|| Error::not_found("Event", event_id))?;

        let next = row.state()?.cancel_by_initiator()?;
        EventRepository::set_state(pool, event_id, next, None).await?;

        info!(event_id, "Event canceled by initiator");
        load_full(pool, event_id).await
    }

    // ------------------------------------------------------------------
    // Administrator
    // ------------------------------------------------------------------

    pub async fn admin_search(
        pool: &DbPool,
        query: &AdminEventsQuery,
        page: PageParams,
    ) -> Result<Vec<EventFullDto>> {
        ensure_range(query.range_start, query.range_end)?;

        let filter = EventFilter {
            initiators: parse_id_list(query.users.as_deref())?,
            states: query.parse_states()?,
            categories: parse_id_list(query.categories.as_deref())?,
            range_start: query.range_start,
            range_end: query.range_end,
            ..Default::default()
        };

        EventRepository::search(pool, &filter, page)
            .await?
            .into_iter()
            .map(EventFullDto::try_from)
            .collect()
    }

    /// Overwrite any field of an event; the state is left alone
    pub async fn admin_update(
        pool: &DbPool,
        event_id: i64,
        req: &AdminUpdateEventRequest,
    ) -> Result<EventFullDto> {
        let row = load_row(pool, event_id).await?;
        if let Some(category) = req.category {
            ensure_category_exists(pool, category).await?;
        }

        let mut record = EventRecord::from_row(&row, row.state()?);
        apply_admin_update(&mut record, req);

        let mut tx = pool.begin().await?;
        if let Some(location) = req.location {
            record.location_id =
                LocationRepository::find_or_create(&mut *tx, location.lat, location.lon)
                    .await?
                    .id;
        }
        EventRepository::update(&mut *tx, event_id, &record).await?;
        tx.commit().await?;

        info!(event_id, "Event updated by administrator");
        load_full(pool, event_id).await
    }

    /// Publish a pending event that starts at least an hour from now
    pub async fn publish(pool: &DbPool, event_id: i64) -> Result<EventFullDto> {
        let row = load_row(pool, event_id).await?;
        let now = datetime::now();
        ensure_publishable(row.state()?, row.event_date, now)?;

        EventRepository::set_state(pool, event_id, EventState::Published, Some(now)).await?;

        counter!("ewm.events.published").increment(1);
        info!(event_id, "Event published");
        load_full(pool, event_id).await
    }

    pub async fn reject(pool: &DbPool, event_id: i64) -> Result<EventFullDto> {
        let row = load_row(pool, event_id).await?;
        let next = row.state()?.reject_by_admin()?;

        EventRepository::set_state(pool, event_id, next, None).await?;

        info!(event_id, "Event rejected");
        load_full(pool, event_id).await
    }

    // ------------------------------------------------------------------
    // Public
    // ------------------------------------------------------------------

    /// Search published events; without a range only upcoming events match
    pub async fn public_search(
        pool: &DbPool,
        query: &PublicEventsQuery,
        page: PageParams,
    ) -> Result<Vec<EventShortDto>> {
        ensure_range(query.range_start, query.range_end)?;

        let range_start = match (query.range_start, query.range_end) {
            (None, None) => Some(datetime::now()),
            (start, _) => start,
        };
        let filter = EventFilter {
            states: Some(vec![EventState::Published]),
            categories: parse_id_list(query.categories.as_deref())?,
            paid: query.paid,
            text: query.text.clone(),
            range_start,
            range_end: query.range_end,
            only_available: query.only_available,
            sort: query.sort,
            ..Default::default()
        };

        let events = EventRepository::search(pool, &filter, page).await?;
        Ok(events.into_iter().map(EventShortDto::from).collect())
    }

    /// Published event by id; each successful read counts as a view
    pub async fn public_get(pool: &DbPool, event_id: i64) -> Result<EventFullDto> {
        let row = EventRepository::find_by_id(pool, event_id)
            .await?
            .filter(|row| row.state == EventState::Published.as_str())
            .ok_or_else(|| Error::not_found("Event", event_id))?;

        EventRepository::increment_views(pool, event_id).await?;

        let mut dto = EventFullDto::try_from(row)?;
        dto.views += 1;
        Ok(dto)
    }

    // ------------------------------------------------------------------
    // Friends
    // ------------------------------------------------------------------

    /// Published events created by `target_id`, shown to its subscribers
    pub async fn events_where_creator(
        pool: &DbPool,
        viewer_id: i64,
        target_id: i64,
        query: &FriendEventsQuery,
        page: PageParams,
    ) -> Result<Vec<EventFullDto>> {
        ensure_user_exists(pool, target_id).await?;
        access::ensure_other_user(viewer_id, target_id)?;

        let follower = FollowerRepository::find(pool, target_id, viewer_id).await?;
        access::ensure_can_see_created(follower.as_ref())?;

        let mut filter = friend_filter(query)?;
        filter.initiators = Some(vec![target_id]);

        EventRepository::search(pool, &filter, page)
            .await?
            .into_iter()
            .map(EventFullDto::try_from)
            .collect()
    }

    /// Published events `target_id` takes part in, shown to its friends
    pub async fn events_where_participant(
        pool: &DbPool,
        viewer_id: i64,
        target_id: i64,
        query: &FriendEventsQuery,
        page: PageParams,
    ) -> Result<Vec<EventFullDto>> {
        ensure_user_exists(pool, target_id).await?;
        access::ensure_other_user(viewer_id, target_id)?;

        let follower = FollowerRepository::find(pool, target_id, viewer_id).await?;
        let viewer_group_id = access::friendship_group(follower.as_ref())?;

        let friends_all = GroupRepository::find_by_title(pool, target_id, GROUP_FRIENDS_ALL)
            .await?
            .ok_or_else(|| {
                Error::internal(format!("User {} has no {} group", target_id, GROUP_FRIENDS_ALL))
            })?;

        let event_ids = RequestRepository::visible_participation_event_ids(
            pool,
            target_id,
            viewer_group_id,
            friends_all.id,
        )
        .await?;
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut filter = friend_filter(query)?;
        filter.ids = Some(event_ids);

        EventRepository::search(pool, &filter, page)
            .await?
            .into_iter()
            .map(EventFullDto::try_from)
            .collect()
    }
}

async fn load_row(pool: &DbPool, event_id: i64) -> Result<EventRow> {
    EventRepository::find_by_id(pool, event_id)
        .await?
        .ok_or_else(|| Error::not_found("Event", event_id))
}

async fn load_full(pool: &DbPool, event_id: i64) -> Result<EventFullDto> {
    EventFullDto::try_from(load_row(pool, event_id).await?)
}

async fn ensure_category_exists(pool: &DbPool, category_id: i64) -> Result<()> {
    if CategoryRepository::find_by_id(pool, category_id).await?.is_none() {
        return Err(Error::not_found("Category", category_id));
    }
    Ok(())
}

fn friend_filter(query: &FriendEventsQuery) -> Result<EventFilter> {
    ensure_range(query.range_start, query.range_end)?;

    Ok(EventFilter {
        states: Some(vec![EventState::Published]),
        categories: parse_id_list(query.categories.as_deref())?,
        paid: query.paid,
        range_start: query.range_start,
        range_end: query.range_end,
        sort: query.sort,
        ..Default::default()
    })
}

/// Merge the initiator's changes; a canceled event returns to `PENDING`
fn apply_initiator_update(record: &mut EventRecord, req: &UpdateEventRequest) {
    if let Some(title) = &req.title {
        record.title = title.clone();
    }
    if let Some(annotation) = &req.annotation {
        record.annotation = annotation.clone();
    }
    if let Some(description) = &req.description {
        record.description = description.clone();
    }
    if let Some(category) = req.category {
        record.category_id = category;
    }
    if let Some(event_date) = req.event_date {
        record.event_date = event_date;
    }
    if let Some(paid) = req.paid {
        record.paid = paid;
    }
    if let Some(limit) = req.participant_limit {
        record.participant_limit = limit;
    }
    if record.state == EventState::Canceled {
        record.state = EventState::Pending;
    }
}

/// Merge the administrator's changes; the location is resolved separately
fn apply_admin_update(record: &mut EventRecord, req: &AdminUpdateEventRequest) {
    if let Some(title) = &req.title {
        record.title = title.clone();
    }
    if let Some(annotation) = &req.annotation {
        record.annotation = annotation.clone();
    }
    if let Some(description) = &req.description {
        record.description = description.clone();
    }
    if let Some(category) = req.category {
        record.category_id = category;
    }
    if let Some(event_date) = req.event_date {
        record.event_date = event_date;
    }
    if let Some(paid) = req.paid {
        record.paid = paid;
    }
    if let Some(limit) = req.participant_limit {
        record.participant_limit = limit;
    }
    if let Some(moderation) = req.request_moderation {
        record.request_moderation = moderation;
    }
}
