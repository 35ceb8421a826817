//! Standings and leaderboard routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::reports::{LeaderboardParams, LeaderboardReport, StandingsGroup, StandingsParams},
    error::AppError,
    services::report_service,
    state::SharedState,
};

/// Configure the report routes subtree.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/standings", get(standings))
        .route("/leaderboard", get(leaderboard))
}

/// Ranked standings per league/season, newest season first.
#[utoipa::path(
    get,
    path = "/standings",
    tag = "reports",
    params(StandingsParams),
    responses((status = 200, description = "Standings groups", body = [StandingsGroup]))
)]
pub async fn standings(
    State(state): State<SharedState>,
    Query(params): Query<StandingsParams>,
) -> Result<Json<Vec<StandingsGroup>>, AppError> {
    Ok(Json(report_service::standings(&state, params).await?))
}

/// Aggregated per-player leaderboards for one season slice.
#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "reports",
    params(LeaderboardParams),
    responses((status = 200, description = "Leaderboard", body = LeaderboardReport))
)]
pub async fn leaderboard(
    State(state): State<SharedState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardReport>, AppError> {
    Ok(Json(report_service::leaderboard(&state, params).await?))
}
