//! Stat-line request/response payloads. The seventeen counters travel as a
//! flattened block so the JSON stays flat like the rest of the API.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dao::models::{StatCounters, StatDetailRow, StatPatch};

/// The per-game counter block shared by stat requests and responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StatCountersDto {
    /// Passing touchdowns thrown.
    #[serde(default)]
    pub passing_tds: i64,
    /// Completed passes.
    #[serde(default)]
    pub passes_completed: i64,
    /// Attempted passes.
    #[serde(default)]
    pub passes_attempted: i64,
    /// Interceptions thrown.
    #[serde(default)]
    pub interceptions_thrown: i64,
    /// Rushing touchdowns scored as the passer.
    #[serde(default)]
    pub qb_rushing_tds: i64,
    /// Receptions.
    #[serde(default)]
    pub receptions: i64,
    /// Targets.
    #[serde(default)]
    pub targets: i64,
    /// Receiving touchdowns.
    #[serde(default)]
    pub receiving_tds: i64,
    /// Dropped passes.
    #[serde(default)]
    pub drops: i64,
    /// First downs gained.
    #[serde(default)]
    pub first_downs: i64,
    /// Rushing touchdowns.
    #[serde(default)]
    pub rushing_tds: i64,
    /// Rush attempts.
    #[serde(default)]
    pub rush_attempts: i64,
    /// Flag pulls on defense.
    #[serde(default)]
    pub flag_pulls: i64,
    /// Interceptions caught on defense.
    #[serde(default)]
    pub interceptions: i64,
    /// Sacks.
    #[serde(default)]
    pub sacks: i64,
    /// Pass breakups.
    #[serde(default)]
    pub pass_breakups: i64,
    /// Defensive touchdowns.
    #[serde(default)]
    pub def_td: i64,
}

impl From<StatCountersDto> for StatCounters {
    fn from(dto: StatCountersDto) -> Self {
        StatCounters {
            passing_tds: dto.passing_tds,
            passes_completed: dto.passes_completed,
            passes_attempted: dto.passes_attempted,
            interceptions_thrown: dto.interceptions_thrown,
            qb_rushing_tds: dto.qb_rushing_tds,
            receptions: dto.receptions,
            targets: dto.targets,
            receiving_tds: dto.receiving_tds,
            drops: dto.drops,
            first_downs: dto.first_downs,
            rushing_tds: dto.rushing_tds,
            rush_attempts: dto.rush_attempts,
            flag_pulls: dto.flag_pulls,
            interceptions: dto.interceptions,
            sacks: dto.sacks,
            pass_breakups: dto.pass_breakups,
            def_td: dto.def_td,
        }
    }
}

impl From<StatCounters> for StatCountersDto {
    fn from(counters: StatCounters) -> Self {
        StatCountersDto {
            passing_tds: counters.passing_tds,
            passes_completed: counters.passes_completed,
            passes_attempted: counters.passes_attempted,
            interceptions_thrown: counters.interceptions_thrown,
            qb_rushing_tds: counters.qb_rushing_tds,
            receptions: counters.receptions,
            targets: counters.targets,
            receiving_tds: counters.receiving_tds,
            drops: counters.drops,
            first_downs: counters.first_downs,
            rushing_tds: counters.rushing_tds,
            rush_attempts: counters.rush_attempts,
            flag_pulls: counters.flag_pulls,
            interceptions: counters.interceptions,
            sacks: counters.sacks,
            pass_breakups: counters.pass_breakups,
            def_td: counters.def_td,
        }
    }
}

/// Name-form creation payload, as submitted by the stat-entry dashboard: the
/// game is located by week/season/league plus both participant names.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateStatsRequest {
    /// Player name; resolved within the game's season.
    #[validate(length(min = 1, message = "player_name must not be empty"))]
    pub player_name: String,
    /// Week of the game the line belongs to.
    #[validate(range(min = 1, message = "game_week must be positive"))]
    pub game_week: i64,
    /// Season of the game.
    #[validate(range(min = 1, message = "game_season must be positive"))]
    pub game_season: i64,
    /// League of the game.
    #[validate(length(min = 1, message = "league must not be empty"))]
    pub league: String,
    /// First participant's name.
    #[validate(length(min = 1, message = "team1_name must not be empty"))]
    pub team1_name: String,
    /// Second participant's name.
    #[validate(length(min = 1, message = "team2_name must not be empty"))]
    pub team2_name: String,
    /// Counter values.
    #[serde(flatten)]
    pub counters: StatCountersDto,
}

/// Id-form creation payload. Stale player references are re-resolved against
/// the game's season before insertion.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStatsByIdRequest {
    /// Referenced player row.
    pub player_id: i64,
    /// Referenced game row.
    pub game_id: i64,
    /// Counter values.
    #[serde(flatten)]
    pub counters: StatCountersDto,
}

/// Partial counter update; absent counters stay as stored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateStatsRequest {
    /// New passing touchdown count.
    pub passing_tds: Option<i64>,
    /// New completed-pass count.
    pub passes_completed: Option<i64>,
    /// New attempted-pass count.
    pub passes_attempted: Option<i64>,
    /// New interceptions-thrown count.
    pub interceptions_thrown: Option<i64>,
    /// New QB rushing touchdown count.
    pub qb_rushing_tds: Option<i64>,
    /// New reception count.
    pub receptions: Option<i64>,
    /// New target count.
    pub targets: Option<i64>,
    /// New receiving touchdown count.
    pub receiving_tds: Option<i64>,
    /// New drop count.
    pub drops: Option<i64>,
    /// New first-down count.
    pub first_downs: Option<i64>,
    /// New rushing touchdown count.
    pub rushing_tds: Option<i64>,
    /// New rush-attempt count.
    pub rush_attempts: Option<i64>,
    /// New flag-pull count.
    pub flag_pulls: Option<i64>,
    /// New defensive interception count.
    pub interceptions: Option<i64>,
    /// New sack count.
    pub sacks: Option<i64>,
    /// New pass-breakup count.
    pub pass_breakups: Option<i64>,
    /// New defensive touchdown count.
    pub def_td: Option<i64>,
}

impl From<UpdateStatsRequest> for StatPatch {
    fn from(request: UpdateStatsRequest) -> Self {
        StatPatch {
            passing_tds: request.passing_tds,
            passes_completed: request.passes_completed,
            passes_attempted: request.passes_attempted,
            interceptions_thrown: request.interceptions_thrown,
            qb_rushing_tds: request.qb_rushing_tds,
            receptions: request.receptions,
            targets: request.targets,
            receiving_tds: request.receiving_tds,
            drops: request.drops,
            first_downs: request.first_downs,
            rushing_tds: request.rushing_tds,
            rush_attempts: request.rush_attempts,
            flag_pulls: request.flag_pulls,
            interceptions: request.interceptions,
            sacks: request.sacks,
            pass_breakups: request.pass_breakups,
            def_td: request.def_td,
        }
    }
}

/// Filters for the batch stat fetch. At least one of `game_id`, `week`, or
/// `season` is required.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BatchStatsParams {
    /// Limit to one game.
    pub game_id: Option<i64>,
    /// Limit to games of one week.
    pub week: Option<i64>,
    /// Limit to games of one season.
    pub season: Option<i64>,
    /// Include soft-deleted rows.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Parameters for the player-and-game stat lookup.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsLookupParams {
    /// Player to look up.
    pub player_id: i64,
    /// Game to look up.
    pub game_id: i64,
}

/// A stat line as returned by the API, with joined player/game context.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerStatsOut {
    /// Stat-line id.
    pub id: i64,
    /// Referenced player id.
    pub player_id: i64,
    /// Referenced player name.
    pub player_name: String,
    /// Referenced game id.
    pub game_id: i64,
    /// Week of the game.
    pub game_week: i64,
    /// Season of the game.
    pub game_season: i64,
    /// League of the game.
    pub league: String,
    /// First participant's name.
    pub team1_name: Option<String>,
    /// Second participant's name.
    pub team2_name: Option<String>,
    /// Counter values.
    #[serde(flatten)]
    pub counters: StatCountersDto,
    /// Current record version.
    pub version: i64,
    /// Visibility flag.
    pub active: bool,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Last mutation time.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
    /// Soft-delete time, when deleted.
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>)]
    pub deleted_at: Option<OffsetDateTime>,
}

impl From<StatDetailRow> for PlayerStatsOut {
    fn from(row: StatDetailRow) -> Self {
        Self {
            id: row.id,
            player_id: row.player_id,
            player_name: row.player_name,
            game_id: row.game_id,
            game_week: row.game_week,
            game_season: row.game_season,
            league: row.league,
            team1_name: row.team1_name,
            team2_name: row.team2_name,
            counters: row.counters.into(),
            version: row.version,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_flatten_into_the_payload() {
        let json = serde_json::json!({
            "player_name": "Jon",
            "game_week": 1,
            "game_season": 1,
            "league": "A",
            "team1_name": "Eagles",
            "team2_name": "Hawks",
            "passing_tds": 3
        });
        let request: CreateStatsRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.counters.passing_tds, 3);
        // Absent counters default to zero.
        assert_eq!(request.counters.receptions, 0);
    }
}
