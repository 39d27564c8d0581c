//! Event repository
//!
//! Every read goes through [`EVENT_SELECT`] so rows come back joined with
//! their category, initiator and location.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use shared::dto::PageParams;
use shared::models::{EventRow, EventSort, EventState};
use shared::DbPool;
use sqlx::{Executor, FromRow, Postgres, QueryBuilder};

const EVENT_SELECT: &str = r#"
    SELECT e.id, e.title, e.annotation, e.description,
           e.category_id, c.name AS category_name,
           e.initiator_id, u.name AS initiator_name,
           e.location_id, l.lat, l.lon,
           e.event_date, e.created_on, e.published_on,
           e.paid, e.participant_limit, e.request_moderation, e.state,
           e.confirmed_requests, e.views
    FROM events e
    JOIN categories c ON c.id = e.category_id
    JOIN users u ON u.id = e.initiator_id
    JOIN locations l ON l.id = e.location_id
"#;

/// Event row tagged with the compilation that lists it
#[derive(Debug, Clone, FromRow)]
pub struct CompilationEventRow {
    pub compilation_id: i64,
    #[sqlx(flatten)]
    pub event: EventRow,
}

/// Column values written on insert and full update
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub title: String,
    pub annotation: String,
    pub description: String,
    pub category_id: i64,
    pub location_id: i64,
    pub event_date: NaiveDateTime,
    pub paid: bool,
    pub participant_limit: i32,
    pub request_moderation: bool,
    pub state: EventState,
}

impl EventRecord {
    /// Current column values of a stored event, with its parsed state
    pub fn from_row(row: &EventRow, state: EventState) -> Self {
        Self {
            title: row.title.clone(),
            annotation: row.annotation.clone(),
            description: row.description.clone(),
            category_id: row.category_id,
            location_id: row.location_id,
            event_date: row.event_date,
            paid: row.paid,
            participant_limit: row.participant_limit,
            request_moderation: row.request_moderation,
            state,
        }
    }
}

/// Search conditions; `None` means "no restriction"
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub ids: Option<Vec<i64>>,
    pub initiators: Option<Vec<i64>>,
    pub states: Option<Vec<EventState>>,
    pub categories: Option<Vec<i64>>,
    pub paid: Option<bool>,
    pub text: Option<String>,
    pub range_start: Option<NaiveDateTime>,
    pub range_end: Option<NaiveDateTime>,
    pub only_available: bool,
    pub sort: Option<EventSort>,
}

pub struct EventRepository;

impl EventRepository {
    /// Insert a new event and return its id
    pub async fn create<'e, E>(
        executor: E,
        initiator_id: i64,
        record: &EventRecord,
        created_on: NaiveDateTime,
    ) -> Result<i64>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO events (
                title, annotation, description, category_id, initiator_id, location_id,
                event_date, created_on, paid, participant_limit, request_moderation, state
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(&record.title)
        .bind(&record.annotation)
        .bind(&record.description)
        .bind(record.category_id)
        .bind(initiator_id)
        .bind(record.location_id)
        .bind(record.event_date)
        .bind(created_on)
        .bind(record.paid)
        .bind(record.participant_limit)
        .bind(record.request_moderation)
        .bind(record.state.as_str())
        .fetch_one(executor)
        .await
        .context("Failed to create event")?;

        Ok(id)
    }

    /// Overwrite the editable columns of an event
    pub async fn update<'e, E>(executor: E, id: i64, record: &EventRecord) -> Result<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE events
            SET title = $1, annotation = $2, description = $3, category_id = $4,
                location_id = $5, event_date = $6, paid = $7, participant_limit = $8,
                request_moderation = $9, state = $10
            WHERE id = $11
            "#,
        )
        .bind(&record.title)
        .bind(&record.annotation)
        .bind(&record.description)
        .bind(record.category_id)
        .bind(record.location_id)
        .bind(record.event_date)
        .bind(record.paid)
        .bind(record.participant_limit)
        .bind(record.request_moderation)
        .bind(record.state.as_str())
        .bind(id)
        .execute(executor)
        .await
        .context("Failed to update event")?;

        Ok(())
    }

    /// Change the state, stamping `published_on` when given
    pub async fn set_state(
        pool: &DbPool,
        id: i64,
        state: EventState,
        published_on: Option<NaiveDateTime>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE events
            SET state = $1, published_on = COALESCE($2, published_on)
            WHERE id = $3
            "#,
        )
        .bind(state.as_str())
        .bind(published_on)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update event state")?;

        Ok(())
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<EventRow>> {
        let event = sqlx::query_as::<_, EventRow>(&format!("{} WHERE e.id = $1", EVENT_SELECT))
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("Failed to find event")?;

        Ok(event)
    }

    /// Find an event only if `initiator_id` created it
    pub async fn find_by_initiator_and_id(
        pool: &DbPool,
        initiator_id: i64,
        id: i64,
    ) -> Result<Option<EventRow>> {
        let event = sqlx::query_as::<_, EventRow>(&format!(
            "{} WHERE e.initiator_id = $1 AND e.id = $2",
            EVENT_SELECT
        ))
        .bind(initiator_id)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to find event by initiator")?;

        Ok(event)
    }

    /// Events included in a compilation, ordered by id
    pub async fn list_by_compilation(pool: &DbPool, compilation_id: i64) -> Result<Vec<EventRow>> {
        let events = sqlx::query_as::<_, EventRow>(&format!(
            "{} JOIN compilation_events ce ON ce.event_id = e.id \
             WHERE ce.compilation_id = $1 ORDER BY e.id",
            EVENT_SELECT
        ))
        .bind(compilation_id)
        .fetch_all(pool)
        .await
        .context("Failed to list compilation events")?;

        Ok(events)
    }

    /// Events of several compilations in one query, grouped by compilation then id
    pub async fn list_by_compilations(
        pool: &DbPool,
        compilation_ids: &[i64],
    ) -> Result<Vec<CompilationEventRow>> {
        let rows = sqlx::query_as::<_, CompilationEventRow>(&format!(
            "SELECT ce.compilation_id, ev.* FROM ({}) ev \
             JOIN compilation_events ce ON ce.event_id = ev.id \
             WHERE ce.compilation_id = ANY($1) ORDER BY ce.compilation_id, ev.id",
            EVENT_SELECT
        ))
        .bind(compilation_ids)
        .fetch_all(pool)
        .await
        .context("Failed to list events of compilations")?;

        Ok(rows)
    }

    /// Check that every id refers to an existing event
    pub async fn count_existing(pool: &DbPool, ids: &[i64]) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM events WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_one(pool)
        .await
        .context("Failed to count events")?;

        Ok(count)
    }

    /// Search events with dynamic conditions
    pub async fn search(
        pool: &DbPool,
        filter: &EventFilter,
        page: PageParams,
    ) -> Result<Vec<EventRow>> {
        let mut builder = QueryBuilder::<Postgres>::new(EVENT_SELECT);
        builder.push(" WHERE TRUE");

        if let Some(ids) = &filter.ids {
            builder.push(" AND e.id = ANY(");
            builder.push_bind(ids.clone());
            builder.push(")");
        }
        if let Some(initiators) = &filter.initiators {
            builder.push(" AND e.initiator_id = ANY(");
            builder.push_bind(initiators.clone());
            builder.push(")");
        }
        if let Some(states) = &filter.states {
            let states: Vec<String> = states.iter().map(|s| s.as_str().to_string()).collect();
            builder.push(" AND e.state = ANY(");
            builder.push_bind(states);
            builder.push(")");
        }
        if let Some(categories) = &filter.categories {
            builder.push(" AND e.category_id = ANY(");
            builder.push_bind(categories.clone());
            builder.push(")");
        }
        if let Some(paid) = filter.paid {
            builder.push(" AND e.paid = ");
            builder.push_bind(paid);
        }
        if let Some(text) = filter.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(text));
            builder.push(" AND (e.annotation ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR e.description ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(start) = filter.range_start {
            builder.push(" AND e.event_date >= ");
            builder.push_bind(start);
        }
        if let Some(end) = filter.range_end {
            builder.push(" AND e.event_date <= ");
            builder.push_bind(end);
        }
        if filter.only_available {
            builder.push(" AND (e.participant_limit = 0 OR e.confirmed_requests < e.participant_limit)");
        }

        builder.push(" ORDER BY ");
        builder.push(match filter.sort {
            Some(sort) => sort.order_by(),
            None => "e.id ASC",
        });
        builder.push(" LIMIT ");
        builder.push_bind(page.limit());
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        let events = builder
            .build_query_as::<EventRow>()
            .fetch_all(pool)
            .await
            .context("Failed to search events")?;

        Ok(events)
    }

    pub async fn increment_views(pool: &DbPool, id: i64) -> Result<()> {
        sqlx::query("UPDATE events SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to increment event views")?;

        Ok(())
    }

    /// Lock the event row and return `(participant_limit, confirmed_requests)`
    pub async fn lock_capacity<'e, E>(executor: E, id: i64) -> Result<Option<(i32, i32)>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let capacity = sqlx::query_as::<_, (i32, i32)>(
            r#"
            SELECT participant_limit, confirmed_requests
            FROM events
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
        .context("Failed to lock event")?;

        Ok(capacity)
    }

    /// Add `delta` (possibly negative) to the confirmed participant counter
    pub async fn add_confirmed<'e, E>(executor: E, id: i64, delta: i32) -> Result<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE events
            SET confirmed_requests = GREATEST(confirmed_requests + $1, 0)
            WHERE id = $2
            "#,
        )
        .bind(delta)
        .bind(id)
        .execute(executor)
        .await
        .context("Failed to update confirmed requests")?;

        Ok(())
    }
}

/// Escape `%`, `_` and `\` so user text matches literally inside ILIKE
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("jazz"), "jazz");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_default_filter_is_unrestricted() {
        let filter = EventFilter::default();
        assert!(filter.ids.is_none());
        assert!(filter.states.is_none());
        assert!(!filter.only_available);
    }
}
