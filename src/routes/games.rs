//! Game CRUD routes plus the completion endpoint.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::{
        common::{ApiResponse, ListParams, VersionParams, VisibilityParams},
        game::{CreateGameRequest, GameOut, UpdateGameRequest},
    },
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Configure the game routes subtree.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", get(list_games).post(create_game))
        .route(
            "/games/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        .route("/games/{id}/complete", post(complete_game))
}

/// Create a game between two named teams; an optional winner must hold the
/// strictly higher score.
#[utoipa::path(
    post,
    path = "/games",
    tag = "games",
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created", body = ApiResponse<GameOut>),
        (status = 400, description = "Winner/score mismatch"),
        (status = 404, description = "Participant not found")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateGameRequest>>,
) -> Result<Json<ApiResponse<GameOut>>, AppError> {
    let game = game_service::create_game(&state, payload).await?;
    Ok(Json(ApiResponse::ok(game, "Game created successfully")))
}

/// List games with pagination; inactive rows only on request.
#[utoipa::path(
    get,
    path = "/games",
    tag = "games",
    params(ListParams),
    responses((status = 200, description = "Games", body = [GameOut]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<GameOut>>, AppError> {
    Ok(Json(game_service::list_games(&state, params).await?))
}

/// Fetch one game.
#[utoipa::path(
    get,
    path = "/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Game id"), VisibilityParams),
    responses(
        (status = 200, description = "Game", body = ApiResponse<GameOut>),
        (status = 404, description = "Game not found")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VisibilityParams>,
) -> Result<Json<ApiResponse<GameOut>>, AppError> {
    let game = game_service::get_game(&state, id, params.include_inactive).await?;
    Ok(Json(ApiResponse::data(game)))
}

/// Partially update a game; requires the last observed version.
#[utoipa::path(
    put,
    path = "/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Game id"), VersionParams),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = ApiResponse<GameOut>),
        (status = 400, description = "Winner/score mismatch"),
        (status = 404, description = "Game not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VersionParams>,
    Json(payload): Json<UpdateGameRequest>,
) -> Result<Json<ApiResponse<GameOut>>, AppError> {
    let game = game_service::update_game(&state, id, params.version, payload).await?;
    Ok(Json(ApiResponse::ok(game, "Game updated successfully")))
}

/// Mark a game completed, freezing its stats. There is no way back.
#[utoipa::path(
    post,
    path = "/games/{id}/complete",
    tag = "games",
    params(("id" = i64, Path, description = "Game id"), VersionParams),
    responses(
        (status = 200, description = "Game completed", body = ApiResponse<GameOut>),
        (status = 404, description = "Game not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn complete_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VersionParams>,
) -> Result<Json<ApiResponse<GameOut>>, AppError> {
    let game = game_service::mark_game_complete(&state, id, params.version).await?;
    Ok(Json(ApiResponse::ok(game, "Game marked as completed")))
}

/// Soft-delete a game; requires the last observed version.
#[utoipa::path(
    delete,
    path = "/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Game id"), VersionParams),
    responses(
        (status = 200, description = "Game deleted", body = ApiResponse<GameOut>),
        (status = 404, description = "Game not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VersionParams>,
) -> Result<Json<ApiResponse<GameOut>>, AppError> {
    game_service::delete_game(&state, id, params.version).await?;
    Ok(Json(ApiResponse::message("Game deleted successfully")))
}
