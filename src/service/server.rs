use super::handlers::{
    handle_count_by_category_and_years, handle_count_by_motivation_keyword,
    handle_details_by_name, handle_stats,
};
use super::local::LocalService;
use super::protocol::{
    ENDPOINT_COUNT_BY_CATEGORY_AND_YEARS, ENDPOINT_COUNT_BY_MOTIVATION_KEYWORD,
    ENDPOINT_DETAILS_BY_NAME, ENDPOINT_STATS,
};
use crate::config::ServiceConfig;
use crate::ingestion::source::load_store;
use axum::Router;
use axum::routing::{get, post};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;

/// Shared state behind every handler.
pub struct AppState {
    pub service: LocalService,
    pub config: ServiceConfig,
    /// Bounds the number of queries executing at once.
    pub limiter: Semaphore,
}

impl AppState {
    pub fn new(service: LocalService, config: ServiceConfig) -> Arc<Self> {
        let permits = config.max_concurrent_requests.max(1);
        Arc::new(Self {
            service,
            config,
            limiter: Semaphore::new(permits),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            ENDPOINT_COUNT_BY_CATEGORY_AND_YEARS,
            post(handle_count_by_category_and_years),
        )
        .route(
            ENDPOINT_COUNT_BY_MOTIVATION_KEYWORD,
            post(handle_count_by_motivation_keyword),
        )
        .route(ENDPOINT_DETAILS_BY_NAME, post(handle_details_by_name))
        .route(ENDPOINT_STATS, get(handle_stats))
        .with_state(state)
}

/// Serves the RPC routes on `listener` until `shutdown` resolves.
pub async fn serve<S>(listener: TcpListener, state: Arc<AppState>, shutdown: S) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    tracing::info!(
        "Laureate service listening on {} ({} workers)",
        listener.local_addr()?,
        state.config.max_concurrent_requests
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Periodically re-ingests the source and publishes a fresh snapshot.
///
/// A failed pass keeps the current snapshot in service.
pub fn spawn_refresh(state: Arc<AppState>) -> Option<tokio::task::JoinHandle<()>> {
    let period = state.config.refresh_interval()?;

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately; the initial snapshot is already loaded.
        interval.tick().await;

        loop {
            interval.tick().await;

            match load_store(&state.config.source, &state.config.year_bounds).await {
                Ok(store) => {
                    if let Err(e) = state.service.snapshots().publish(store) {
                        tracing::error!("Failed to publish refreshed snapshot: {}", e);
                    }
                }
                Err(e) => {
                    tracing::error!("Snapshot refresh failed, keeping current data: {:#}", e);
                }
            }
        }
    }))
}
