use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/users", post(handlers::register))
        .route("/api/users/:username/progress", get(handlers::get_progress))
        .route("/api/users/:username/login", post(handlers::login))
        .route(
            "/api/users/:username/challenges",
            get(handlers::today_challenges),
        )
        .route(
            "/api/users/:username/challenges/complete",
            post(handlers::complete_challenge),
        )
        .route("/api/leaderboard", get(handlers::leaderboard))
        .route("/api/emissions/estimate", post(handlers::estimate_emissions))
        .with_state(state)
}
