//! Explore With Me backend service
//!
//! Owns the database and implements every business rule; the gateway
//! forwards client requests here.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use ewm_service::routes;
use shared::{db, Config};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    shared::init_tracing();

    tracing::info!("Starting Explore With Me service...");

    let config = Config::from_env().context("Failed to load configuration")?;

    let db_pool = db::create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    db::run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    db::check_health(&db_pool)
        .await
        .context("Database health check failed")?;

    let server_addr = config.server.bind_addr();
    tracing::info!("Service listening on {}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .configure(routes::configure)
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind to {}", server_addr))?
    .run()
    .await
    .context("Server error")?;

    Ok(())
}
