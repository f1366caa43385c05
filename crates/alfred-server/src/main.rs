mod configuration;
mod error;
mod routes;
mod state;

use alfred::{
    agent::Agent, completion::ChatService, fetcher::HttpImageFetcher,
    providers::factory::get_provider,
};
use configuration::Settings;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let settings = Settings::new()?;
    let addr = settings.server.socket_addr()?;

    // Build the agent in front of the configured provider
    let provider = get_provider(settings.provider.into_config())?;
    let agent = Agent::new(provider);
    let service = ChatService::new(Arc::new(agent), Arc::new(HttpImageFetcher::new()?));

    // Create app state
    let state = AppState::new(service);

    // Create router with CORS support
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
