pub mod customize;
pub mod health;
pub mod render;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resume/customize",
            post(customize::handle_customize),
        )
        .route("/api/v1/resume/render", post(render::handle_render))
        .with_state(state)
}
