use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::agent::ResearchAgent;

pub mod handlers;
pub mod models;

pub fn create_router(agent: Arc<ResearchAgent>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/research", post(handlers::research_handler))
        .with_state(agent)
        .layer(cors)
}

pub async fn serve(agent: Arc<ResearchAgent>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("research agent API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(agent))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;
    Ok(())
}
