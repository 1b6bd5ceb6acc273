// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use crate::application::catalog_service::CatalogService;
use crate::application::kpi_repository::KpiRepository;
use crate::application::layout_repository::LayoutStore;
use crate::application::session_registry::SessionRegistry;
use crate::infrastructure::config::{load_catalog_config, load_dashboard_config};
use crate::infrastructure::kpi_catalog::CatalogKpiRepository;
use crate::infrastructure::memory_layout_store::MemoryLayoutStore;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

fn memory_store() -> Box<dyn LayoutStore> {
    Box::new(MemoryLayoutStore::new())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let catalog_config = load_catalog_config()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn KpiRepository> =
        Arc::new(CatalogKpiRepository::from_config(&catalog_config));

    // Create services (application layer)
    let catalog_service = CatalogService::new(repository.clone(), config.access.approval_delay());
    let session_limits = config.sessions.limits();
    let sessions = SessionRegistry::new(
        config.grid.editor_settings(),
        repository,
        memory_store,
        session_limits,
    );

    // Create application state
    let state = Arc::new(AppState {
        catalog_service,
        sessions,
    });

    // Sweep idle sessions even when no requests arrive
    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(session_limits.idle_timeout);
        loop {
            interval.tick().await;
            let evicted = sweeper.sessions.evict_idle(Instant::now());
            if evicted > 0 {
                tracing::info!("Evicted {} idle dashboard sessions", evicted);
            }
        }
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = config.socket_addr()?;
    tracing::info!(
        "Starting kpi-dashboard service on {} with {} KPIs",
        addr,
        catalog_config.kpis.len()
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
