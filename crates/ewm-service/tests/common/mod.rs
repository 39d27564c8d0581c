//! Fixtures for tests that run against a real PostgreSQL database
//!
//! Every fixture makes its names unique so tests can share one database and
//! run in parallel without cleaning up.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use shared::dto::{
    CategoryDto, EventFullDto, LocationDto, NewCategoryDto, NewEventDto, NewUserRequest, UserDto,
};
use shared::DbPool;
use sqlx::postgres::PgPoolOptions;

use ewm_service::services::{CategoryService, EventService, UserService};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Connect to `TEST_DATABASE_URL` and bring the schema up to date
///
/// # Environment Variables
///
/// * `TEST_DATABASE_URL` - PostgreSQL connection string for the test database
#[allow(dead_code)]
pub async fn create_test_pool() -> DbPool {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        panic!(
            "TEST_DATABASE_URL environment variable not set. \
             Please set it to run integration tests with a real database."
        )
    };

    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");
    shared::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// A value no other test run has used
pub fn unique(prefix: &str) -> String {
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_micros(),
        SEQUENCE.fetch_add(1, Ordering::Relaxed)
    )
}

#[allow(dead_code)]
pub async fn create_user(pool: &DbPool, name: &str) -> UserDto {
    let request = NewUserRequest {
        name: name.to_string(),
        email: format!("{}@ewm.test", unique(&name.to_lowercase())),
    };
    UserService::create(pool, &request)
        .await
        .expect("Failed to create user")
}

#[allow(dead_code)]
pub async fn create_category(pool: &DbPool) -> CategoryDto {
    let request = NewCategoryDto {
        name: unique("cat"),
    };
    CategoryService::create(pool, &request)
        .await
        .expect("Failed to create category")
}

/// Create an event owned by `initiator_id` and publish it
#[allow(dead_code)]
pub async fn published_event(
    pool: &DbPool,
    initiator_id: i64,
    participant_limit: i32,
    request_moderation: bool,
) -> EventFullDto {
    let category = create_category(pool).await;
    let request = NewEventDto {
        annotation: "An evening walk along the river embankment".to_string(),
        category: category.id,
        description: "We meet at the bridge and walk to the old harbour together".to_string(),
        event_date: shared::datetime::parse("2035-06-01 19:00:00").expect("valid date"),
        location: LocationDto {
            lat: 59.93,
            lon: 30.31,
        },
        paid: false,
        participant_limit,
        request_moderation,
        title: "River walk".to_string(),
    };

    let event = EventService::create(pool, initiator_id, &request)
        .await
        .expect("Failed to create event");
    EventService::publish(pool, event.id)
        .await
        .expect("Failed to publish event")
}
