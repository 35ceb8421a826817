//! Season rollover: bulk deactivation at season end and copying teams
//! forward into a new season.
//!
//! Neither operation is atomic across the batch. Rows that commit stay
//! committed; per-row failures are collected into the returned summary.

use tracing::{info, warn};

use crate::{
    dao::{models::NewTeam, storage::StorageError},
    dto::season::{CopyFailure, CopyTeamsRequest, CopyTeamsSummary, EndSeasonSummary},
    error::ServiceError,
    state::SharedState,
};

/// Deactivate every active team and player of a season. Idempotent: a second
/// call reports zero affected rows.
pub async fn end_season(
    state: &SharedState,
    season: i64,
) -> Result<EndSeasonSummary, ServiceError> {
    let teams_deactivated = state.store().deactivate_teams_in_season(season).await?;
    let players_deactivated = state.store().deactivate_players_in_season(season).await?;
    state.invalidate_reports().await;

    info!(
        season,
        teams = teams_deactivated,
        players = players_deactivated,
        "season ended"
    );
    Ok(EndSeasonSummary {
        season,
        teams_deactivated,
        players_deactivated,
    })
}

/// Copy every team of the source season into the destination with a reset
/// record and a fresh version. Duplicate franchises fail individually
/// without aborting the rest of the batch.
pub async fn copy_teams(
    state: &SharedState,
    request: CopyTeamsRequest,
) -> Result<CopyTeamsSummary, ServiceError> {
    let source_teams = state
        .store()
        .list_teams_in_season(request.from_season, false)
        .await?;

    let mut copied = Vec::new();
    let mut failed = Vec::new();
    for team in source_teams {
        let new_team = NewTeam {
            name: team.name.clone(),
            season: request.to_season,
            league: team.league.clone(),
            wins: 0,
            losses: 0,
            ties: 0,
            active: true,
        };
        match state.store().insert_team(new_team).await {
            Ok(row) => copied.push(row.name),
            Err(err @ StorageError::Duplicate(_)) => {
                failed.push(CopyFailure {
                    name: team.name,
                    league: team.league,
                    reason: err.to_string(),
                });
            }
            Err(err) => {
                warn!(team = %team.name, error = %err, "team copy failed");
                failed.push(CopyFailure {
                    name: team.name,
                    league: team.league,
                    reason: err.to_string(),
                });
            }
        }
    }
    state.invalidate_standings().await;

    info!(
        from = request.from_season,
        to = request.to_season,
        copied = copied.len(),
        failed = failed.len(),
        "season copy finished"
    );
    Ok(CopyTeamsSummary {
        from_season: request.from_season,
        to_season: request.to_season,
        copied,
        failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dao::models::{NewPlayer, NewTeam},
        dao::sqlite::{LeagueStore, ListFilter, schema::ensure_schema},
        state::AppState,
    };

    async fn seeded_state() -> SharedState {
        let store = LeagueStore::connect("sqlite::memory:").await.unwrap();
        ensure_schema(&store).await.unwrap();
        for name in ["Eagles", "Hawks"] {
            let team = store
                .insert_team(NewTeam {
                    name: name.into(),
                    season: 1,
                    league: "A".into(),
                    wins: 3,
                    losses: 1,
                    ties: 0,
                    active: true,
                })
                .await
                .unwrap();
            store
                .insert_player(NewPlayer {
                    name: format!("{name} QB"),
                    season: 1,
                    team_id: team.id,
                    jersey_number: None,
                    active: true,
                })
                .await
                .unwrap();
        }
        AppState::new(store, AppConfig::default())
    }

    #[tokio::test]
    async fn end_season_deactivates_and_is_idempotent() {
        let state = seeded_state().await;

        let first = end_season(&state, 1).await.unwrap();
        assert_eq!(first.teams_deactivated, 2);
        assert_eq!(first.players_deactivated, 2);

        let second = end_season(&state, 1).await.unwrap();
        assert_eq!(second.teams_deactivated, 0);
        assert_eq!(second.players_deactivated, 0);

        let filter = ListFilter {
            skip: 0,
            limit: 10,
            include_inactive: false,
        };
        assert!(state.store().list_teams(filter).await.unwrap().is_empty());
        assert!(state.store().list_players(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn copy_resets_records_and_versions() {
        let state = seeded_state().await;
        end_season(&state, 1).await.unwrap();

        let summary = copy_teams(
            &state,
            CopyTeamsRequest {
                from_season: 1,
                to_season: 2,
            },
        )
        .await
        .unwrap();
        assert_eq!(summary.copied, vec!["Eagles", "Hawks"]);
        assert!(summary.failed.is_empty());

        let copies = state.store().list_teams_in_season(2, true).await.unwrap();
        assert_eq!(copies.len(), 2);
        for copy in copies {
            assert_eq!(copy.wins, 0);
            assert_eq!(copy.losses, 0);
            assert_eq!(copy.version, 1);
            assert!(copy.active);
        }

        // Players stay behind; copying rosters is a separate manual flow.
        let season_two_players = state
            .store()
            .list_players(ListFilter {
                skip: 0,
                limit: 50,
                include_inactive: true,
            })
            .await
            .unwrap()
            .into_iter()
            .filter(|p| p.season == 2)
            .count();
        assert_eq!(season_two_players, 0);
    }

    #[tokio::test]
    async fn duplicate_copy_fails_per_row_not_per_batch() {
        let state = seeded_state().await;

        // Occupy the Eagles slot in the destination season up front.
        state
            .store()
            .insert_team(NewTeam {
                name: "Eagles".into(),
                season: 2,
                league: "A".into(),
                wins: 0,
                losses: 0,
                ties: 0,
                active: true,
            })
            .await
            .unwrap();

        let summary = copy_teams(
            &state,
            CopyTeamsRequest {
                from_season: 1,
                to_season: 2,
            },
        )
        .await
        .unwrap();
        assert_eq!(summary.copied, vec!["Hawks"]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].name, "Eagles");
    }
}
