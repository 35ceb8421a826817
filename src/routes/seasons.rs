//! Season rollover routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use axum_valid::Valid;

use crate::{
    dto::season::{CopyTeamsRequest, CopyTeamsSummary, EndSeasonSummary},
    error::AppError,
    services::season_service,
    state::SharedState,
};

/// Configure the season routes subtree.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/seasons/{season}/end", post(end_season))
        .route("/seasons/copy-teams", post(copy_teams))
}

/// Deactivate every active team and player of a season. Safe to repeat; a
/// second call reports zero affected rows.
#[utoipa::path(
    post,
    path = "/seasons/{season}/end",
    tag = "seasons",
    params(("season" = i64, Path, description = "Season to end")),
    responses((status = 200, description = "Season ended", body = EndSeasonSummary))
)]
pub async fn end_season(
    State(state): State<SharedState>,
    Path(season): Path<i64>,
) -> Result<Json<EndSeasonSummary>, AppError> {
    Ok(Json(season_service::end_season(&state, season).await?))
}

/// Copy a season's teams into a new season with reset records. Failures are
/// reported per team without aborting the batch.
#[utoipa::path(
    post,
    path = "/seasons/copy-teams",
    tag = "seasons",
    request_body = CopyTeamsRequest,
    responses(
        (status = 200, description = "Copy summary", body = CopyTeamsSummary),
        (status = 400, description = "Source and destination season identical")
    )
)]
pub async fn copy_teams(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CopyTeamsRequest>>,
) -> Result<Json<CopyTeamsSummary>, AppError> {
    Ok(Json(season_service::copy_teams(&state, payload).await?))
}
