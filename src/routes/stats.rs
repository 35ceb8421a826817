//! Stat-line routes: CRUD in two creation forms, the filtered batch fetch,
//! and the player-and-game lookup.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::{
        common::{ApiResponse, ListParams, VersionParams, VisibilityParams},
        stats::{
            BatchStatsParams, CreateStatsByIdRequest, CreateStatsRequest, PlayerStatsOut,
            StatsLookupParams, UpdateStatsRequest,
        },
    },
    error::AppError,
    services::stats_service,
    state::SharedState,
};

/// Configure the stats routes subtree.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/stats", get(list_stats).post(create_stats))
        .route("/stats/by-id", post(create_stats_by_id))
        .route("/stats/batch", get(batch_stats))
        .route("/stats/lookup", get(lookup_stats))
        .route(
            "/stats/{id}",
            get(get_stats).put(update_stats).delete(delete_stats),
        )
}

/// Record a stat line, locating the game by week/season/league and both
/// participant names.
#[utoipa::path(
    post,
    path = "/stats",
    tag = "stats",
    request_body = CreateStatsRequest,
    responses(
        (status = 200, description = "Stats created", body = ApiResponse<PlayerStatsOut>),
        (status = 403, description = "Game already completed"),
        (status = 404, description = "Player or game not found")
    )
)]
pub async fn create_stats(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateStatsRequest>>,
) -> Result<Json<ApiResponse<PlayerStatsOut>>, AppError> {
    let stats = stats_service::create_stats(&state, payload).await?;
    Ok(Json(ApiResponse::ok(stats, "Stats created successfully")))
}

/// Record a stat line by player and game id. Stale player references are
/// re-resolved against the game's season.
#[utoipa::path(
    post,
    path = "/stats/by-id",
    tag = "stats",
    request_body = CreateStatsByIdRequest,
    responses(
        (status = 200, description = "Stats created", body = ApiResponse<PlayerStatsOut>),
        (status = 403, description = "Game already completed"),
        (status = 404, description = "Player or game not found")
    )
)]
pub async fn create_stats_by_id(
    State(state): State<SharedState>,
    Json(payload): Json<CreateStatsByIdRequest>,
) -> Result<Json<ApiResponse<PlayerStatsOut>>, AppError> {
    let stats = stats_service::create_stats_by_id(&state, payload).await?;
    Ok(Json(ApiResponse::ok(stats, "Stats created successfully")))
}

/// List stat lines with pagination; inactive rows only on request.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    params(ListParams),
    responses((status = 200, description = "Stat lines", body = [PlayerStatsOut]))
)]
pub async fn list_stats(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PlayerStatsOut>>, AppError> {
    Ok(Json(stats_service::list_stats(&state, params).await?))
}

/// Batch fetch filtered by game, week, and/or season; at least one filter is
/// required.
#[utoipa::path(
    get,
    path = "/stats/batch",
    tag = "stats",
    params(BatchStatsParams),
    responses(
        (status = 200, description = "Stat lines", body = [PlayerStatsOut]),
        (status = 400, description = "No filter supplied")
    )
)]
pub async fn batch_stats(
    State(state): State<SharedState>,
    Query(params): Query<BatchStatsParams>,
) -> Result<Json<Vec<PlayerStatsOut>>, AppError> {
    Ok(Json(stats_service::batch_stats(&state, params).await?))
}

/// Look up the stat line recorded for one player in one game.
#[utoipa::path(
    get,
    path = "/stats/lookup",
    tag = "stats",
    params(StatsLookupParams),
    responses(
        (status = 200, description = "Stat line", body = ApiResponse<PlayerStatsOut>),
        (status = 404, description = "No line for this player and game")
    )
)]
pub async fn lookup_stats(
    State(state): State<SharedState>,
    Query(params): Query<StatsLookupParams>,
) -> Result<Json<ApiResponse<PlayerStatsOut>>, AppError> {
    let stats = stats_service::lookup_stats(&state, params).await?;
    Ok(Json(ApiResponse::data(stats)))
}

/// Fetch one stat line.
#[utoipa::path(
    get,
    path = "/stats/{id}",
    tag = "stats",
    params(("id" = i64, Path, description = "Stat-line id"), VisibilityParams),
    responses(
        (status = 200, description = "Stat line", body = ApiResponse<PlayerStatsOut>),
        (status = 404, description = "Stats not found")
    )
)]
pub async fn get_stats(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VisibilityParams>,
) -> Result<Json<ApiResponse<PlayerStatsOut>>, AppError> {
    let stats = stats_service::get_stats(&state, id, params.include_inactive).await?;
    Ok(Json(ApiResponse::data(stats)))
}

/// Partially update a stat line's counters; requires the last observed
/// version and an uncompleted game.
#[utoipa::path(
    put,
    path = "/stats/{id}",
    tag = "stats",
    params(("id" = i64, Path, description = "Stat-line id"), VersionParams),
    request_body = UpdateStatsRequest,
    responses(
        (status = 200, description = "Stats updated", body = ApiResponse<PlayerStatsOut>),
        (status = 403, description = "Game already completed"),
        (status = 404, description = "Stats not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn update_stats(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VersionParams>,
    Json(payload): Json<UpdateStatsRequest>,
) -> Result<Json<ApiResponse<PlayerStatsOut>>, AppError> {
    let stats = stats_service::update_stats(&state, id, params.version, payload).await?;
    Ok(Json(ApiResponse::ok(stats, "Stats updated successfully")))
}

/// Soft-delete a stat line; requires the last observed version and an
/// uncompleted game.
#[utoipa::path(
    delete,
    path = "/stats/{id}",
    tag = "stats",
    params(("id" = i64, Path, description = "Stat-line id"), VersionParams),
    responses(
        (status = 200, description = "Stats deleted", body = ApiResponse<PlayerStatsOut>),
        (status = 403, description = "Game already completed"),
        (status = 404, description = "Stats not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn delete_stats(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VersionParams>,
) -> Result<Json<ApiResponse<PlayerStatsOut>>, AppError> {
    stats_service::delete_stats(&state, id, params.version).await?;
    Ok(Json(ApiResponse::message("Stats deleted successfully")))
}
