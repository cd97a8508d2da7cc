//! Remember Me skill server

use remember_me::api::{create_router, AppState};
use remember_me::config::{GameConfig, ServerConfig};
use remember_me::dialog::DialogEngine;
use remember_me::platform::SkillHandler;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remember_me=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let game = GameConfig::from_env()?;
    let server = ServerConfig::from_env()?;

    // Fails here, not per request, when the vocabulary is too small
    let context = game.build_context()?;
    tracing::info!(
        vocabulary_size = context.pool.len(),
        min_count = context.min_count,
        max_count = context.max_count,
        seeded = game.seed.is_some(),
        "Game configured"
    );

    let engine = match game.seed {
        Some(seed) => DialogEngine::with_seed(context, seed),
        None => DialogEngine::new(context),
    };

    if server.application_id.is_none() {
        tracing::warn!("REMEMBER_ME_APPLICATION_ID not set, accepting requests for any application");
    }
    let skill = SkillHandler::new(engine, server.application_id);

    let app = create_router(AppState::new(skill)).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], server.port));
    tracing::info!("Remember Me listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
