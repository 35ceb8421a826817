//! Player request/response payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::PlayerDetailRow;

fn default_active() -> bool {
    true
}

/// Payload for creating a player. The team is referenced by name; the service
/// resolves it within the player's season.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePlayerRequest {
    /// Player name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Name of the owning team.
    #[validate(length(min = 1, message = "team_name must not be empty"))]
    pub team_name: String,
    /// Season the roster entry belongs to.
    #[validate(range(min = 1, message = "season must be positive"))]
    pub season: i64,
    /// Optional jersey label.
    pub jersey_number: Option<String>,
    /// Initial visibility.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Partial update payload.
///
/// `jersey_number` distinguishes "absent" from "null": omit the field to keep
/// the label, send `null` to clear it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePlayerRequest {
    /// New player name.
    pub name: Option<String>,
    /// New owning team, referenced by name.
    pub team_name: Option<String>,
    /// New season number.
    pub season: Option<i64>,
    /// New jersey label (`null` clears it).
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub jersey_number: Option<Option<String>>,
    /// New visibility flag.
    pub active: Option<bool>,
}

/// A player as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerOut {
    /// Player id.
    pub id: i64,
    /// Player name.
    pub name: String,
    /// Name decorated with the season, as shown in pickers.
    pub display_name: String,
    /// Season number.
    pub season: i64,
    /// Owning team id.
    pub team_id: i64,
    /// Owning team name.
    pub team_name: String,
    /// Jersey label, when assigned.
    pub jersey_number: Option<String>,
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

impl From<PlayerDetailRow> for PlayerOut {
    fn from(row: PlayerDetailRow) -> Self {
        Self {
            display_name: format!("{} (Season {})", row.name, row.season),
            id: row.id,
            name: row.name,
            season: row.season,
            team_id: row.team_id,
            team_name: row.team_name,
            jersey_number: row.jersey_number,
            version: row.version,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}
