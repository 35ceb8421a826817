//! Team request/response payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::{NewTeam, PlayerRow, TeamPatch, TeamRow};

fn default_active() -> bool {
    true
}

/// Payload for creating a team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    /// Franchise name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Season the team plays in.
    #[validate(range(min = 1, message = "season must be positive"))]
    pub season: i64,
    /// League label.
    #[validate(length(min = 1, message = "league must not be empty"))]
    pub league: String,
    /// Initial win counter.
    #[serde(default)]
    pub wins: i64,
    /// Initial loss counter.
    #[serde(default)]
    pub losses: i64,
    /// Initial tie counter.
    #[serde(default)]
    pub ties: i64,
    /// Initial visibility.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl From<CreateTeamRequest> for NewTeam {
    fn from(request: CreateTeamRequest) -> Self {
        NewTeam {
            name: request.name,
            season: request.season,
            league: request.league,
            wins: request.wins,
            losses: request.losses,
            ties: request.ties,
            active: request.active,
        }
    }
}

/// Partial update payload; absent fields stay as stored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTeamRequest {
    /// New franchise name.
    pub name: Option<String>,
    /// New season number.
    pub season: Option<i64>,
    /// New league label.
    pub league: Option<String>,
    /// New win counter.
    pub wins: Option<i64>,
    /// New loss counter.
    pub losses: Option<i64>,
    /// New tie counter.
    pub ties: Option<i64>,
    /// New visibility flag.
    pub active: Option<bool>,
}

impl From<UpdateTeamRequest> for TeamPatch {
    fn from(request: UpdateTeamRequest) -> Self {
        TeamPatch {
            name: request.name,
            season: request.season,
            league: request.league,
            wins: request.wins,
            losses: request.losses,
            ties: request.ties,
            active: request.active,
        }
    }
}

/// Roster entry embedded in a team response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamPlayerSummary {
    /// Player id.
    pub id: i64,
    /// Player name.
    pub name: String,
    /// Jersey label, when assigned.
    pub jersey_number: Option<String>,
}

impl From<PlayerRow> for TeamPlayerSummary {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            jersey_number: row.jersey_number,
        }
    }
}

/// A team as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamOut {
    /// Team id.
    pub id: i64,
    /// Franchise name.
    pub name: String,
    /// Name decorated with the season, as shown in pickers.
    pub display_name: String,
    /// Season number.
    pub season: i64,
    /// League label.
    pub league: String,
    /// Win counter.
    pub wins: i64,
    /// Loss counter.
    pub losses: i64,
    /// Tie counter.
    pub ties: i64,
    /// Active roster entries.
    pub players: Vec<TeamPlayerSummary>,
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

impl TeamOut {
    /// Build the response from a row and its (possibly empty) roster.
    pub fn from_row(row: TeamRow, players: Vec<PlayerRow>) -> Self {
        Self {
            display_name: format!("{} (Season {})", row.name, row.season),
            id: row.id,
            name: row.name,
            season: row.season,
            league: row.league,
            wins: row.wins,
            losses: row.losses,
            ties: row.ties,
            players: players.into_iter().map(TeamPlayerSummary::from).collect(),
            version: row.version,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}
