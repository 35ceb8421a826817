//! Player CRUD routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use axum_valid::Valid;

use crate::{
    dto::{
        common::{ApiResponse, ListParams, VersionParams, VisibilityParams},
        player::{CreatePlayerRequest, PlayerOut, UpdatePlayerRequest},
    },
    error::AppError,
    services::player_service,
    state::SharedState,
};

/// Configure the player routes subtree.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
}

/// Create a player on a team's seasonal roster.
#[utoipa::path(
    post,
    path = "/players",
    tag = "players",
    request_body = CreatePlayerRequest,
    responses(
        (status = 200, description = "Player created", body = ApiResponse<PlayerOut>),
        (status = 404, description = "Team not found")
    )
)]
pub async fn create_player(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreatePlayerRequest>>,
) -> Result<Json<ApiResponse<PlayerOut>>, AppError> {
    let player = player_service::create_player(&state, payload).await?;
    Ok(Json(ApiResponse::ok(player, "Player created successfully")))
}

/// List players with pagination; inactive rows only on request.
#[utoipa::path(
    get,
    path = "/players",
    tag = "players",
    params(ListParams),
    responses((status = 200, description = "Players", body = [PlayerOut]))
)]
pub async fn list_players(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PlayerOut>>, AppError> {
    Ok(Json(player_service::list_players(&state, params).await?))
}

/// Fetch one player.
#[utoipa::path(
    get,
    path = "/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player id"), VisibilityParams),
    responses(
        (status = 200, description = "Player", body = ApiResponse<PlayerOut>),
        (status = 404, description = "Player not found")
    )
)]
pub async fn get_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VisibilityParams>,
) -> Result<Json<ApiResponse<PlayerOut>>, AppError> {
    let player = player_service::get_player(&state, id, params.include_inactive).await?;
    Ok(Json(ApiResponse::data(player)))
}

/// Partially update a player; requires the last observed version.
#[utoipa::path(
    put,
    path = "/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player id"), VersionParams),
    request_body = UpdatePlayerRequest,
    responses(
        (status = 200, description = "Player updated", body = ApiResponse<PlayerOut>),
        (status = 404, description = "Player not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn update_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VersionParams>,
    Json(payload): Json<UpdatePlayerRequest>,
) -> Result<Json<ApiResponse<PlayerOut>>, AppError> {
    let player = player_service::update_player(&state, id, params.version, payload).await?;
    Ok(Json(ApiResponse::ok(player, "Player updated successfully")))
}

/// Soft-delete a player; requires the last observed version.
#[utoipa::path(
    delete,
    path = "/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player id"), VersionParams),
    responses(
        (status = 200, description = "Player deleted", body = ApiResponse<PlayerOut>),
        (status = 404, description = "Player not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn delete_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VersionParams>,
) -> Result<Json<ApiResponse<PlayerOut>>, AppError> {
    player_service::delete_player(&state, id, params.version).await?;
    Ok(Json(ApiResponse::message("Player deleted successfully")))
}
