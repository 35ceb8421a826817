//! Season rollover payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Summary returned after ending a season.
#[derive(Debug, Serialize, ToSchema)]
pub struct EndSeasonSummary {
    /// The season that was ended.
    pub season: i64,
    /// Teams flipped to inactive by this call.
    pub teams_deactivated: u64,
    /// Players flipped to inactive by this call.
    pub players_deactivated: u64,
}

/// Request to copy a season's teams forward into a new season.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CopyTeamsRequest {
    /// Season to copy teams from.
    pub from_season: i64,
    /// Season to create the copies in.
    pub to_season: i64,
}

impl Validate for CopyTeamsRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.from_season < 1 || self.to_season < 1 {
            let mut err = ValidationError::new("season");
            err.message = Some("seasons must be positive".into());
            errors.add("from_season", err);
        }
        if self.from_season == self.to_season {
            let mut err = ValidationError::new("same_season");
            err.message = Some("source and destination season must differ".into());
            errors.add("to_season", err);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// One team that could not be copied.
#[derive(Debug, Serialize, ToSchema)]
pub struct CopyFailure {
    /// Franchise name of the failed copy.
    pub name: String,
    /// League of the failed copy.
    pub league: String,
    /// Why the copy failed.
    pub reason: String,
}

/// Outcome of a season copy. Partial completion is expected and visible:
/// committed copies stay even when later rows fail.
#[derive(Debug, Serialize, ToSchema)]
pub struct CopyTeamsSummary {
    /// Season the teams were copied from.
    pub from_season: i64,
    /// Season the copies were created in.
    pub to_season: i64,
    /// Names of the teams copied successfully.
    pub copied: Vec<String>,
    /// Rows that failed, with reasons.
    pub failed: Vec<CopyFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_into_same_season_fails_validation() {
        let request = CopyTeamsRequest {
            from_season: 2,
            to_season: 2,
        };
        assert!(request.validate().is_err());

        let request = CopyTeamsRequest {
            from_season: 1,
            to_season: 2,
        };
        assert!(request.validate().is_ok());
    }
}
