//! Briefwire server
//!
//! Hosts the data agents and pipeline stages behind one HTTP seam so
//! remote callers can list them and invoke their operations.

mod handlers;
mod models;
mod state;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use briefwire_core::{init_logging, load_config_or_default, LogConfig};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config_or_default("briefwire.toml");

    init_logging(LogConfig {
        level: config.logging.level.clone(),
        json: config.logging.json,
    });

    let state = AppState::build(&config)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handlers::health))
        .route("/agents", get(handlers::list_agents))
        .route("/agents/{agent_id}", get(handlers::get_agent))
        .route(
            "/agents/{agent_id}/operations/{operation}",
            post(handlers::invoke_operation),
        )
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Briefwire server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
