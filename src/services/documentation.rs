//! OpenAPI documentation aggregation.

use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the flag-football league backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::teams::create_team,
        crate::routes::teams::list_teams,
        crate::routes::teams::get_team,
        crate::routes::teams::update_team,
        crate::routes::teams::delete_team,
        crate::routes::players::create_player,
        crate::routes::players::list_players,
        crate::routes::players::get_player,
        crate::routes::players::update_player,
        crate::routes::players::delete_player,
        crate::routes::games::create_game,
        crate::routes::games::list_games,
        crate::routes::games::get_game,
        crate::routes::games::update_game,
        crate::routes::games::complete_game,
        crate::routes::games::delete_game,
        crate::routes::stats::create_stats,
        crate::routes::stats::create_stats_by_id,
        crate::routes::stats::list_stats,
        crate::routes::stats::batch_stats,
        crate::routes::stats::lookup_stats,
        crate::routes::stats::get_stats,
        crate::routes::stats::update_stats,
        crate::routes::stats::delete_stats,
        crate::routes::seasons::end_season,
        crate::routes::seasons::copy_teams,
        crate::routes::reports::standings,
        crate::routes::reports::leaderboard,
    ),
    components(
        schemas(
            crate::dto::common::ApiResponse<crate::dto::team::TeamOut>,
            crate::dto::common::ApiResponse<crate::dto::player::PlayerOut>,
            crate::dto::common::ApiResponse<crate::dto::game::GameOut>,
            crate::dto::common::ApiResponse<crate::dto::stats::PlayerStatsOut>,
            crate::dto::health::HealthResponse,
            crate::dto::team::CreateTeamRequest,
            crate::dto::team::UpdateTeamRequest,
            crate::dto::team::TeamOut,
            crate::dto::team::TeamPlayerSummary,
            crate::dto::player::CreatePlayerRequest,
            crate::dto::player::UpdatePlayerRequest,
            crate::dto::player::PlayerOut,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::UpdateGameRequest,
            crate::dto::game::GameOut,
            crate::dto::stats::StatCountersDto,
            crate::dto::stats::CreateStatsRequest,
            crate::dto::stats::CreateStatsByIdRequest,
            crate::dto::stats::UpdateStatsRequest,
            crate::dto::stats::PlayerStatsOut,
            crate::dto::season::EndSeasonSummary,
            crate::dto::season::CopyTeamsRequest,
            crate::dto::season::CopyTeamsSummary,
            crate::dto::season::CopyFailure,
            crate::dto::reports::StandingsGroup,
            crate::dto::reports::StandingsEntry,
            crate::dto::reports::LeaderboardScope,
            crate::dto::reports::LeaderboardReport,
            crate::dto::reports::PassingLeader,
            crate::dto::reports::RushingLeader,
            crate::dto::reports::ReceivingLeader,
            crate::dto::reports::DefenseLeader,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "teams", description = "Team management"),
        (name = "players", description = "Roster management"),
        (name = "games", description = "Game scheduling and completion"),
        (name = "stats", description = "Per-player per-game statistics"),
        (name = "seasons", description = "Season rollover"),
        (name = "reports", description = "Standings and leaderboards"),
    )
)]
pub struct ApiDoc;
