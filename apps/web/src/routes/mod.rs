pub mod api;
pub mod health;
pub mod shell;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Browser shell
        .route("/", get(shell::handle_index))
        .route("/login", post(shell::handle_login))
        .route("/logout", post(shell::handle_logout))
        .route("/roadmap", post(shell::handle_roadmap_form))
        .route("/search", post(shell::handle_search_form))
        // JSON API
        .route("/api/v1/session", get(api::handle_get_session))
        .route("/api/v1/session/login", post(api::handle_api_login))
        .route("/api/v1/session/logout", post(api::handle_api_logout))
        .route("/api/v1/dashboard", get(api::handle_get_dashboard))
        .route("/api/v1/roadmap", post(api::handle_generate_roadmap))
        .route("/api/v1/search", post(api::handle_search))
        .with_state(state)
}
