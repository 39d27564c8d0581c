//! Shared library for the Explore With Me services
//!
//! This crate provides common functionality used by both servers:
//! - Wire DTOs exchanged by clients, the gateway and the backend service
//! - Data models matching the PostgreSQL schema, with their state rules
//! - Database connection pooling and embedded migrations
//! - Error handling types
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod datetime;
pub mod db;
pub mod dto;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, GatewayConfig};
pub use db::DbPool;
pub use error::{Error, Result};

/// Initialize tracing subscriber for structured logging
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shared=debug,ewm_service=debug,gateway=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
