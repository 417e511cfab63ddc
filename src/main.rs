// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;
mod test_utils;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_graphs_repository::HttpGraphsRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpGraphsRepository::new(
        &config.upstream.base_url,
        &config.upstream.graphs_path,
        config.upstream.timeout(),
    )?);

    // Create service (application layer)
    let dashboard = DashboardService::new(
        repository,
        config.palette.palette(),
        config.chart.style(),
        config.readiness.timings(),
    );

    // Mount: one fetch, not awaited by startup
    let mounted = dashboard.clone();
    tokio::spawn(async move { mounted.mount().await });

    // Build router (presentation layer)
    let router = create_router(Arc::new(AppState { dashboard }));

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting eip-status-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
