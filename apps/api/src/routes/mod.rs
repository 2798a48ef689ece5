pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::profile::handlers as profile_handlers;
use crate::rewrite::handlers as rewrite_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/optimize", post(rewrite_handlers::handle_optimize))
        .route(
            "/api/v1/optimize/upload",
            post(rewrite_handlers::handle_optimize_upload),
        )
        .route(
            "/api/v1/profiles/retrieve",
            post(profile_handlers::handle_retrieve_profile),
        )
        .with_state(state)
}
