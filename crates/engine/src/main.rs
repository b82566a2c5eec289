//! Blackwood Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blackwood_domain::AvailabilityPolicy;
use blackwood_engine::app::App;
use blackwood_engine::infrastructure::{
    ollama::OllamaClient,
    snapshot::JsonSnapshotStore,
    timeboxed_llm::TimeboxedLlm,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from the working directory, if a .env is present.
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blackwood_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Blackwood Engine");

    // Load configuration
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);
    let availability: AvailabilityPolicy = std::env::var("AVAILABILITY_POLICY")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();

    // LLM relay: Ollama adapter behind the pipeline-visible deadline.
    let ollama = Arc::new(OllamaClient::from_env());
    let llm = Arc::new(TimeboxedLlm::from_env(ollama));

    // Durable state snapshot.
    let snapshot = Arc::new(JsonSnapshotStore::from_env());
    tracing::info!(path = %snapshot.path().display(), "using state file");

    let app = Arc::new(App::new(llm, snapshot, availability));
    tracing::info!(?availability, suspects = app.case.character_ids().len(), "case loaded");

    // Build the router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = blackwood_engine::api::http::routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app);

    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
