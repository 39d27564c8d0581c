//! Location repository

use anyhow::{Context, Result};
use shared::models::Location;
use sqlx::{Executor, Postgres};

pub struct LocationRepository;

impl LocationRepository {
    /// Return the stored point with these coordinates, creating it if needed
    pub async fn find_or_create<'e, E>(executor: E, lat: f32, lon: f32) -> Result<Location>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (lat, lon)
            VALUES ($1, $2)
            ON CONFLICT (lat, lon) DO UPDATE SET lat = EXCLUDED.lat
            RETURNING *
            "#,
        )
        .bind(lat)
        .bind(lon)
        .fetch_one(executor)
        .await
        .context("Failed to find or create location")?;

        Ok(location)
    }
}
