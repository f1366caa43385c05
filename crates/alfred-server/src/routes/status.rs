use alfred::agent::ALFRED_MODEL_ID;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Alfred OpenAI-Compatible API",
        "version": env!("CARGO_PKG_VERSION"),
        "agent": "Alfred - The Butler",
        "model": ALFRED_MODEL_ID,
        "endpoints": {
            "models": "/v1/models",
            "chat": "/v1/chat/completions"
        },
        "features": {
            "multimodal": true,
            "streaming": false
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "agent": "alfred" }))
}

pub fn routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
