pub mod health;
pub mod parse;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Grouped extraction endpoints, one per section priority tier
        .route("/parse-resume", post(parse::handle_parse_resume))
        .route(
            "/parse-second-priority",
            post(parse::handle_parse_second_priority),
        )
        .route(
            "/parse-third-priority",
            post(parse::handle_parse_third_priority),
        )
        .with_state(state)
}
