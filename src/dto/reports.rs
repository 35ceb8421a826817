//! Standings and leaderboard payloads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Filters for the standings report; both are optional.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StandingsParams {
    /// Limit to one season.
    pub season: Option<i64>,
    /// Limit to one league.
    pub league: Option<String>,
}

/// One ranked row of a standings table.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct StandingsEntry {
    /// Displayed rank, `"T-n"` when tied.
    pub rank: String,
    /// Team name.
    pub team: String,
    /// Win counter.
    pub wins: i64,
    /// Loss counter.
    pub losses: i64,
    /// Tie counter.
    pub ties: i64,
    /// Win percentage with ties weighted half, rounded to three decimals;
    /// exactly 0.0 with no games played.
    pub win_pct: f64,
    /// Games played.
    pub games_played: i64,
}

/// Standings for one league/season pairing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandingsGroup {
    /// League label.
    pub league: String,
    /// Season number.
    pub season: i64,
    /// Ranked entries, best first.
    pub entries: Vec<StandingsEntry>,
}

/// Which slice of the season a leaderboard covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardScope {
    /// All weeks except the configured playoff weeks.
    #[default]
    Regular,
    /// Only the configured playoff weeks.
    Playoffs,
    /// Every week.
    Full,
}

/// Query parameters for the leaderboard report.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardParams {
    /// Season to aggregate.
    pub season: i64,
    /// Slice of the season to cover.
    #[serde(default)]
    pub scope: LeaderboardScope,
}

/// Aggregated passing line for one player.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct PassingLeader {
    /// Player name.
    pub player: String,
    /// Total completed passes.
    pub passes_completed: i64,
    /// Total attempted passes.
    pub passes_attempted: i64,
    /// Completion percentage, one decimal; 0.0 with no attempts.
    pub completion_pct: f64,
    /// Total passing touchdowns.
    pub passing_tds: i64,
    /// Total rushing touchdowns as the passer.
    pub qb_rushing_tds: i64,
    /// Total interceptions thrown.
    pub interceptions_thrown: i64,
}

/// Aggregated rushing line for one player.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct RushingLeader {
    /// Player name.
    pub player: String,
    /// Total rush attempts.
    pub rush_attempts: i64,
    /// Total rushing touchdowns.
    pub rushing_tds: i64,
    /// Total first downs.
    pub first_downs: i64,
}

/// Aggregated receiving line for one player.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct ReceivingLeader {
    /// Player name.
    pub player: String,
    /// Total receptions.
    pub receptions: i64,
    /// Total targets.
    pub targets: i64,
    /// Total receiving touchdowns.
    pub receiving_tds: i64,
    /// Total drops.
    pub drops: i64,
    /// Total first downs.
    pub first_downs: i64,
}

/// Aggregated defensive line for one player.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct DefenseLeader {
    /// Player name.
    pub player: String,
    /// Total interceptions.
    pub interceptions: i64,
    /// Total sacks.
    pub sacks: i64,
    /// Total defensive touchdowns.
    pub def_td: i64,
    /// Total flag pulls.
    pub flag_pulls: i64,
    /// Total pass breakups.
    pub pass_breakups: i64,
}

/// The four leaderboard sections for one season slice.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardReport {
    /// Season covered.
    pub season: i64,
    /// Slice covered.
    pub scope: LeaderboardScope,
    /// Passing section, sorted by passing then QB rushing touchdowns.
    pub passing: Vec<PassingLeader>,
    /// Rushing section, sorted by rushing touchdowns.
    pub rushing: Vec<RushingLeader>,
    /// Receiving section, sorted by receptions.
    pub receiving: Vec<ReceivingLeader>,
    /// Defense section, sorted by flag pulls.
    pub defense: Vec<DefenseLeader>,
}
