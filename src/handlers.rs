use crate::challenges::ensure_daily_set;
use crate::emissions::summarize;
use crate::errors::AppError;
use crate::leaderboard::rank_users;
use crate::models::{
    ChallengesResponse, CompleteRequest, CompleteResponse, EmissionsRequest, EmissionsResponse,
    LeaderboardResponse, ProgressResponse, RegisterRequest,
};
use crate::progression;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub user: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Html<String> {
    let board = rank_users(state.store.list_all_users().await);
    let viewer = match params.user {
        Some(name) => state
            .store
            .get_user_progress(&name)
            .await
            .ok()
            .map(|progress| (name, progress)),
        None => None,
    };
    Html(render_index(&board, viewer.as_ref()))
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::bad_request("username must not be empty"));
    }

    let progress = progression::register_user(&state.store, username).await?;
    Ok(Json(ProgressResponse::from_progress(
        username.to_string(),
        progress,
    )))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ProgressResponse>, AppError> {
    let progress = state.store.get_user_progress(&username).await?;
    Ok(Json(ProgressResponse::from_progress(username, progress)))
}

pub async fn login(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ProgressResponse>, AppError> {
    let progress = progression::record_login(&state.store, &username, today()).await?;
    Ok(Json(ProgressResponse::from_progress(username, progress)))
}

pub async fn today_challenges(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ChallengesResponse>, AppError> {
    let date = today();
    let challenges = ensure_daily_set(&state.store, &username, date).await?;
    Ok(Json(ChallengesResponse { date, challenges }))
}

pub async fn complete_challenge(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<CompleteRequest>,
) -> Result<Json<CompleteResponse>, AppError> {
    let challenge = payload.challenge.trim();
    if challenge.is_empty() {
        return Err(AppError::bad_request("challenge must not be empty"));
    }

    let outcome =
        progression::complete_challenge(&state.store, &username, challenge, today()).await?;
    Ok(Json(CompleteResponse {
        challenge: challenge.to_string(),
        coins: outcome.progress.coins,
        level: outcome.progress.level,
        leveled_up: outcome.leveled_up,
        streak: outcome.progress.streak,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub user: Option<String>,
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let board = rank_users(state.store.list_all_users().await);
    let your_rank = params.user.as_deref().and_then(|user| board.rank_of(user));
    Ok(Json(LeaderboardResponse {
        podium: board.podium,
        rest: board.rest,
        your_rank,
    }))
}

pub async fn estimate_emissions(
    Json(payload): Json<EmissionsRequest>,
) -> Result<Json<EmissionsResponse>, AppError> {
    Ok(Json(summarize(&payload.sessions)))
}
