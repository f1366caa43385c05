// Export route modules
pub mod chat;
pub mod models;
pub mod status;

use crate::state::AppState;
use axum::Router;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(models::routes())
        .merge(chat::routes(state))
}
