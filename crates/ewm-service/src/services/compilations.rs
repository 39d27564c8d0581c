//! Compilations: curated, optionally pinned lists of events

use std::collections::HashMap;

use shared::dto::{CompilationDto, EventShortDto, NewCompilationDto, PageParams};
use shared::models::Compilation;
use shared::{DbPool, Error, Result};
use tracing::info;

use crate::repositories::{CompilationEventRow, CompilationRepository, EventRepository};

pub struct CompilationService;

impl CompilationService {
    pub async fn create(pool: &DbPool, req: &NewCompilationDto) -> Result<CompilationDto> {
        let event_ids = dedup_ids(&req.events);
        ensure_events_exist(pool, &event_ids).await?;

        let mut tx = pool.begin().await?;
        let compilation = CompilationRepository::create(&mut *tx, req.title.trim(), req.pinned)
            .await?;
        if !event_ids.is_empty() {
            CompilationRepository::add_events(&mut *tx, compilation.id, &event_ids).await?;
        }
        tx.commit().await?;

        info!(compilation_id = compilation.id, events = event_ids.len(), "Compilation created");
        to_dto(pool, compilation).await
    }

    pub async fn delete(pool: &DbPool, id: i64) -> Result<()> {
        if !CompilationRepository::delete(pool, id).await? {
            return Err(Error::not_found("Compilation", id));
        }
        info!(compilation_id = id, "Compilation deleted");
        Ok(())
    }

    pub async fn add_event(pool: &DbPool, id: i64, event_id: i64) -> Result<()> {
        ensure_compilation_exists(pool, id).await?;
        ensure_events_exist(pool, &[event_id]).await?;

        CompilationRepository::add_events(pool, id, &[event_id]).await?;
        info!(compilation_id = id, event_id, "Event added to compilation");
        Ok(())
    }

    pub async fn remove_event(pool: &DbPool, id: i64, event_id: i64) -> Result<()> {
        ensure_compilation_exists(pool, id).await?;

        if !CompilationRepository::remove_event(pool, id, event_id).await? {
            return Err(Error::not_found("Event", event_id));
        }
        info!(compilation_id = id, event_id, "Event removed from compilation");
        Ok(())
    }

    pub async fn set_pinned(pool: &DbPool, id: i64, pinned: bool) -> Result<()> {
        if !CompilationRepository::set_pinned(pool, id, pinned).await? {
            return Err(Error::not_found("Compilation", id));
        }
        info!(compilation_id = id, pinned, "Compilation pin changed");
        Ok(())
    }

    pub async fn get(pool: &DbPool, id: i64) -> Result<CompilationDto> {
        let compilation = CompilationRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| Error::not_found("Compilation", id))?;

        to_dto(pool, compilation).await
    }

    pub async fn list(
        pool: &DbPool,
        pinned: Option<bool>,
        page: PageParams,
    ) -> Result<Vec<CompilationDto>> {
        let compilations = CompilationRepository::list(pool, pinned, page).await?;
        if compilations.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = compilations.iter().map(|c| c.id).collect();
        let rows = EventRepository::list_by_compilations(pool, &ids).await?;
        Ok(attach_events(compilations, rows))
    }
}

/// Pair each compilation with its events, keeping the compilation order
fn attach_events(
    compilations: Vec<Compilation>,
    rows: Vec<CompilationEventRow>,
) -> Vec<CompilationDto> {
    let mut by_compilation: HashMap<i64, Vec<EventShortDto>> = HashMap::new();
    for row in rows {
        by_compilation
            .entry(row.compilation_id)
            .or_default()
            .push(EventShortDto::from(row.event));
    }

    compilations
        .into_iter()
        .map(|compilation| CompilationDto {
            id: compilation.id,
            events: by_compilation.remove(&compilation.id).unwrap_or_default(),
            pinned: compilation.pinned,
            title: compilation.title,
        })
        .collect()
}

async fn to_dto(pool: &DbPool, compilation: Compilation) -> Result<CompilationDto> {
    let events = EventRepository::list_by_compilation(pool, compilation.id).await?;

    Ok(CompilationDto {
        id: compilation.id,
        events: events.into_iter().map(EventShortDto::from).collect(),
        pinned: compilation.pinned,
        title: compilation.title,
    })
}

async fn ensure_compilation_exists(pool: &DbPool, id: i64) -> Result<()> {
    if CompilationRepository::find_by_id(pool, id).await?.is_none() {
        return Err(Error::not_found("Compilation", id));
    }
    Ok(())
}

async fn ensure_events_exist(pool: &DbPool, ids: &[i64]) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found = EventRepository::count_existing(pool, ids).await?;
    if found != ids.len() as i64 {
        let listed: Vec<String> = ids.iter().map(i64::to_string).collect();
        return Err(Error::not_found("Event", listed.join(",")));
    }
    Ok(())
}

/// Keep the first occurrence of every id
fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}
