//! HTTP server for the FAQ assistant.

use crate::page::HomePage;
use crate::routes;
use anyhow::Result;
use axum::Router;
use faq_knowledge::{InteractionLog, KnowledgeStore, Resolver};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    pub resolver: Resolver,
    pub knowledge: Arc<dyn KnowledgeStore>,
    pub log: Arc<dyn InteractionLog>,
    pub home: HomePage,
}

impl AppState {
    pub fn new(
        resolver: Resolver,
        knowledge: Arc<dyn KnowledgeStore>,
        log: Arc<dyn InteractionLog>,
        home: HomePage,
    ) -> Self {
        Self {
            resolver,
            knowledge,
            log,
            home,
        }
    }
}

/// Build the router with every route mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::page_routes())
        .merge(routes::ask_routes())
        .merge(routes::admin_routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until it fails.
pub async fn run(state: AppState, addr: &str) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
