//! Team CRUD routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use axum_valid::Valid;

use crate::{
    dto::{
        common::{ApiResponse, ListParams, VersionParams, VisibilityParams},
        team::{CreateTeamRequest, TeamOut, UpdateTeamRequest},
    },
    error::AppError,
    services::team_service,
    state::SharedState,
};

/// Configure the team routes subtree.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route(
            "/teams/{id}",
            get(get_team).put(update_team).delete(delete_team),
        )
}

/// Create a team.
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Team created", body = ApiResponse<TeamOut>),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Duplicate (name, season, league)")
    )
)]
pub async fn create_team(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateTeamRequest>>,
) -> Result<Json<ApiResponse<TeamOut>>, AppError> {
    let team = team_service::create_team(&state, payload).await?;
    Ok(Json(ApiResponse::ok(team, "Team created successfully")))
}

/// List teams with pagination; inactive rows only on request.
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    params(ListParams),
    responses((status = 200, description = "Teams", body = [TeamOut]))
)]
pub async fn list_teams(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<TeamOut>>, AppError> {
    Ok(Json(team_service::list_teams(&state, params).await?))
}

/// Fetch one team with its roster.
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i64, Path, description = "Team id"), VisibilityParams),
    responses(
        (status = 200, description = "Team", body = ApiResponse<TeamOut>),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_team(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VisibilityParams>,
) -> Result<Json<ApiResponse<TeamOut>>, AppError> {
    let team = team_service::get_team(&state, id, params.include_inactive).await?;
    Ok(Json(ApiResponse::ok(team, "Team retrieved successfully")))
}

/// Partially update a team; requires the last observed version.
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i64, Path, description = "Team id"), VersionParams),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = ApiResponse<TeamOut>),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn update_team(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VersionParams>,
    Json(payload): Json<UpdateTeamRequest>,
) -> Result<Json<ApiResponse<TeamOut>>, AppError> {
    let team = team_service::update_team(&state, id, params.version, payload).await?;
    Ok(Json(ApiResponse::ok(team, "Team updated successfully")))
}

/// Soft-delete a team; requires the last observed version.
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i64, Path, description = "Team id"), VersionParams),
    responses(
        (status = 200, description = "Team deleted", body = ApiResponse<TeamOut>),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Version conflict")
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(params): Query<VersionParams>,
) -> Result<Json<ApiResponse<TeamOut>>, AppError> {
    team_service::delete_team(&state, id, params.version).await?;
    Ok(Json(ApiResponse::message("Team deleted successfully")))
}
