//! Explore With Me gateway

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use gateway::client::{Clients, HttpForwarder};
use gateway::{middleware, routes};
use shared::GatewayConfig;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    shared::init_tracing();

    tracing::info!("Starting Explore With Me gateway...");

    let config = GatewayConfig::from_env().context("Failed to load configuration")?;

    let forwarder =
        HttpForwarder::new(&config).context("Failed to create the service client")?;
    let clients = web::Data::new(Clients::new(Arc::new(forwarder)));

    let server_addr = config.server.bind_addr();
    tracing::info!(
        service = %config.main_server_url,
        "Gateway listening on {}", server_addr
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::cors())
            .app_data(clients.clone())
            .configure(routes::configure)
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind to {}", server_addr))?
    .run()
    .await
    .context("Server error")?;

    Ok(())
}
