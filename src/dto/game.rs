//! Game request/response payloads, including the winner/score coherence check
//! that runs before any lookup.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dao::models::GameDetailRow;

/// Payload for creating a game. Participants are referenced by name and
/// resolved within the game's season.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    /// Week number within the season.
    pub week: i64,
    /// League label.
    pub league: String,
    /// Season number.
    pub season: i64,
    /// First participant's name.
    pub team1_name: String,
    /// First participant's score.
    #[serde(default)]
    pub team1_score: i64,
    /// Second participant's name.
    pub team2_name: String,
    /// Second participant's score.
    #[serde(default)]
    pub team2_score: i64,
    /// Winner's name, when already decided.
    pub winning_team_name: Option<String>,
}

impl Validate for CreateGameRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.week < 1 {
            errors.add("week", simple_error("week", "week must be positive"));
        }
        if self.season < 1 {
            errors.add("season", simple_error("season", "season must be positive"));
        }
        if self.league.is_empty() {
            errors.add("league", simple_error("league", "league must not be empty"));
        }
        if self.team1_name.is_empty() || self.team2_name.is_empty() {
            errors.add(
                "team1_name",
                simple_error("teams", "both team names are required"),
            );
        }
        if self.team1_score < 0 || self.team2_score < 0 {
            errors.add(
                "team1_score",
                simple_error("scores", "scores must not be negative"),
            );
        }

        if let Some(winner) = &self.winning_team_name {
            if let Err(err) = validate_winner(
                winner,
                &self.team1_name,
                self.team1_score,
                &self.team2_name,
                self.team2_score,
            ) {
                errors.add("winning_team_name", err);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn simple_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Check that the declared winner is one of the two participants and holds
/// the strictly higher score.
pub fn validate_winner(
    winner: &str,
    team1_name: &str,
    team1_score: i64,
    team2_name: &str,
    team2_score: i64,
) -> Result<(), ValidationError> {
    if winner != team1_name && winner != team2_name {
        let mut err = ValidationError::new("winner_not_participant");
        err.message = Some("Winning team must be one of the two participants".into());
        return Err(err);
    }

    let (winner_score, loser_score) = if winner == team1_name {
        (team1_score, team2_score)
    } else {
        (team2_score, team1_score)
    };
    if winner_score <= loser_score {
        let mut err = ValidationError::new("winner_score");
        err.message = Some("Winning team score must be higher than losing team score".into());
        return Err(err);
    }
    Ok(())
}

/// Partial update payload.
///
/// `winning_team_name` distinguishes "absent" from "null": omit to keep the
/// stored winner, send `null` to clear it. The completion flag is only
/// reachable through the dedicated complete endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateGameRequest {
    /// New week number.
    pub week: Option<i64>,
    /// New league label.
    pub league: Option<String>,
    /// New season number.
    pub season: Option<i64>,
    /// New first participant, referenced by name.
    pub team1_name: Option<String>,
    /// New first participant score.
    pub team1_score: Option<i64>,
    /// New second participant, referenced by name.
    pub team2_name: Option<String>,
    /// New second participant score.
    pub team2_score: Option<i64>,
    /// New winner by name (`null` clears it).
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub winning_team_name: Option<Option<String>>,
}

/// A game as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameOut {
    /// Game id.
    pub id: i64,
    /// Week number within the season.
    pub week: i64,
    /// League label.
    pub league: String,
    /// Season number.
    pub season: i64,
    /// First participant id, when the team still exists.
    pub team1_id: Option<i64>,
    /// First participant name.
    pub team1_name: Option<String>,
    /// First participant score.
    pub team1_score: i64,
    /// Second participant id.
    pub team2_id: Option<i64>,
    /// Second participant name.
    pub team2_name: Option<String>,
    /// Second participant score.
    pub team2_score: i64,
    /// Winner id, when recorded.
    pub winning_team_id: Option<i64>,
    /// Winner name, when recorded.
    pub winning_team_name: Option<String>,
    /// Whether the game is completed; completed games freeze their stats.
    pub completed: bool,
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

impl From<GameDetailRow> for GameOut {
    fn from(row: GameDetailRow) -> Self {
        Self {
            id: row.id,
            week: row.week,
            league: row.league,
            season: row.season,
            team1_id: row.team1_id,
            team1_name: row.team1_name,
            team1_score: row.team1_score,
            team2_id: row.team2_id,
            team2_name: row.team2_name,
            team2_score: row.team2_score,
            winning_team_id: row.winning_team_id,
            winning_team_name: row.winning_team_name,
            completed: row.completed,
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

    fn request(winner: Option<&str>, team1_score: i64, team2_score: i64) -> CreateGameRequest {
        CreateGameRequest {
            week: 1,
            league: "A".into(),
            season: 1,
            team1_name: "Eagles".into(),
            team1_score,
            team2_name: "Hawks".into(),
            team2_score,
            winning_team_name: winner.map(String::from),
        }
    }

    #[test]
    fn winner_with_higher_score_passes() {
        assert!(request(Some("Eagles"), 21, 14).validate().is_ok());
        assert!(request(Some("Hawks"), 14, 21).validate().is_ok());
        assert!(request(None, 14, 14).validate().is_ok());
    }

    #[test]
    fn winner_without_higher_score_fails() {
        assert!(request(Some("Eagles"), 14, 21).validate().is_err());
        assert!(request(Some("Eagles"), 14, 14).validate().is_err());
    }

    #[test]
    fn winner_must_be_a_participant() {
        assert!(request(Some("Sharks"), 21, 14).validate().is_err());
    }

    #[test]
    fn negative_scores_fail() {
        assert!(request(None, -7, 0).validate().is_err());
    }
}
