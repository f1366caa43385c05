use crate::error::ApiError;
use alfred::{
    agent::{Agent, ALFRED_MODEL_ID},
    models::chat::{ModelCard, ModelList},
};
use axum::{extract::Path, routing::get, Json, Router};

async fn list_models() -> Json<ModelList> {
    Json(ModelList::new(vec![Agent::model_card()]))
}

async fn get_model(Path(model_id): Path<String>) -> Result<Json<ModelCard>, ApiError> {
    if model_id == ALFRED_MODEL_ID {
        Ok(Json(Agent::model_card()))
    } else {
        Err(ApiError::not_found("Model not found"))
    }
}

pub fn routes() -> Router {
    Router::new()
        .route("/v1/models", get(list_models))
        .route("/v1/models/:model_id", get(get_model))
}
