//! Game operations: creation and updates resolve participant names within the
//! game's season and hold the winner/score invariant over every mutation.

use crate::{
    dao::models::{GamePatch, NewGame, TeamRow},
    dto::{
        common::ListParams,
        game::{CreateGameRequest, GameOut, UpdateGameRequest},
    },
    error::ServiceError,
    state::SharedState,
};

async fn resolve_team(
    state: &SharedState,
    name: &str,
    season: i64,
) -> Result<TeamRow, ServiceError> {
    state
        .store()
        .find_team_by_name(name, season)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Team {name} not found in season {season}"))
        })
}

/// The invariant every stored game must satisfy: a recorded winner is one of
/// the two participants and holds the strictly higher score.
fn check_winner(
    winning_team_id: Option<i64>,
    team1_id: Option<i64>,
    team1_score: i64,
    team2_id: Option<i64>,
    team2_score: i64,
) -> Result<(), ServiceError> {
    let Some(winner) = winning_team_id else {
        return Ok(());
    };

    let (winner_score, loser_score) = if Some(winner) == team1_id {
        (team1_score, team2_score)
    } else if Some(winner) == team2_id {
        (team2_score, team1_score)
    } else {
        return Err(ServiceError::InvalidInput(
            "Winning team must be one of the two participants".into(),
        ));
    };

    if winner_score <= loser_score {
        return Err(ServiceError::InvalidInput(
            "Winning team score must be higher than losing team score".into(),
        ));
    }
    Ok(())
}

pub async fn create_game(
    state: &SharedState,
    payload: CreateGameRequest,
) -> Result<GameOut, ServiceError> {
    let team1 = resolve_team(state, &payload.team1_name, payload.season).await?;
    let team2 = resolve_team(state, &payload.team2_name, payload.season).await?;

    let winning_team_id = match payload.winning_team_name.as_deref() {
        Some(winner) if winner == payload.team1_name => Some(team1.id),
        Some(winner) if winner == payload.team2_name => Some(team2.id),
        Some(_) => {
            return Err(ServiceError::InvalidInput(
                "Winning team must be one of the two participants".into(),
            ));
        }
        None => None,
    };

    check_winner(
        winning_team_id,
        Some(team1.id),
        payload.team1_score,
        Some(team2.id),
        payload.team2_score,
    )?;

    let row = state
        .store()
        .insert_game(NewGame {
            week: payload.week,
            league: payload.league,
            season: payload.season,
            team1_id: team1.id,
            team1_score: payload.team1_score,
            team2_id: team2.id,
            team2_score: payload.team2_score,
            winning_team_id,
        })
        .await?;
    state.invalidate_reports().await;
    Ok(row.into())
}

pub async fn list_games(
    state: &SharedState,
    params: ListParams,
) -> Result<Vec<GameOut>, ServiceError> {
    let rows = state.store().list_games(params.into()).await?;
    Ok(rows.into_iter().map(GameOut::from).collect())
}

pub async fn get_game(
    state: &SharedState,
    id: i64,
    include_inactive: bool,
) -> Result<GameOut, ServiceError> {
    let row = state
        .store()
        .get_game_detail(id, include_inactive)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Game {id} not found")))?;
    Ok(row.into())
}

pub async fn update_game(
    state: &SharedState,
    id: i64,
    version: i64,
    payload: UpdateGameRequest,
) -> Result<GameOut, ServiceError> {
    let current = state
        .store()
        .get_game_detail(id, false)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Game {id} not found")))?;

    let season = payload.season.unwrap_or(current.season);

    let team1_id = match &payload.team1_name {
        Some(name) => Some(resolve_team(state, name, season).await?.id),
        None => None,
    };
    let team2_id = match &payload.team2_name {
        Some(name) => Some(resolve_team(state, name, season).await?.id),
        None => None,
    };

    // Merge before validating: the invariant holds over the resulting row,
    // not the payload alone.
    let merged_team1 = team1_id.or(current.team1_id);
    let merged_team2 = team2_id.or(current.team2_id);
    let merged_score1 = payload.team1_score.unwrap_or(current.team1_score);
    let merged_score2 = payload.team2_score.unwrap_or(current.team2_score);

    let winning_team_id = match &payload.winning_team_name {
        None => None,
        Some(None) => Some(None),
        Some(Some(winner)) => {
            let resolved = resolve_team(state, winner, season).await?;
            Some(Some(resolved.id))
        }
    };
    let merged_winner = match winning_team_id {
        Some(winner) => winner,
        None => current.winning_team_id,
    };

    check_winner(
        merged_winner,
        merged_team1,
        merged_score1,
        merged_team2,
        merged_score2,
    )?;

    let patch = GamePatch {
        week: payload.week,
        league: payload.league,
        season: payload.season,
        team1_id,
        team1_score: payload.team1_score,
        team2_id,
        team2_score: payload.team2_score,
        winning_team_id,
        completed: None,
    };
    let row = state.store().update_game(id, version, &patch).await?;
    state.invalidate_reports().await;
    Ok(row.into())
}

/// Flip a game to completed through the version gate. There is no way back;
/// stat mutations for the game are rejected from here on.
pub async fn mark_game_complete(
    state: &SharedState,
    id: i64,
    version: i64,
) -> Result<GameOut, ServiceError> {
    let patch = GamePatch {
        completed: Some(true),
        ..GamePatch::default()
    };
    let row = state.store().update_game(id, version, &patch).await?;
    state.invalidate_reports().await;
    Ok(row.into())
}

pub async fn delete_game(state: &SharedState, id: i64, version: i64) -> Result<(), ServiceError> {
    state.store().soft_delete_game(id, version).await?;
    state.invalidate_reports().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            models::NewTeam,
            sqlite::{LeagueStore, schema::ensure_schema},
        },
        state::AppState,
    };

    async fn state_with_teams() -> SharedState {
        let store = LeagueStore::connect("sqlite::memory:").await.unwrap();
        ensure_schema(&store).await.unwrap();
        for name in ["Eagles", "Hawks"] {
            store
                .insert_team(NewTeam {
                    name: name.into(),
                    season: 1,
                    league: "A".into(),
                    wins: 0,
                    losses: 0,
                    ties: 0,
                    active: true,
                })
                .await
                .unwrap();
        }
        AppState::new(store, AppConfig::default())
    }

    fn week_one() -> CreateGameRequest {
        CreateGameRequest {
            week: 1,
            league: "A".into(),
            season: 1,
            team1_name: "Eagles".into(),
            team1_score: 21,
            team2_name: "Hawks".into(),
            team2_score: 14,
            winning_team_name: Some("Eagles".into()),
        }
    }

    #[tokio::test]
    async fn create_records_the_winner() {
        let state = state_with_teams().await;
        let game = create_game(&state, week_one()).await.unwrap();
        assert_eq!(game.winning_team_name.as_deref(), Some("Eagles"));
        assert!(!game.completed);
    }

    #[tokio::test]
    async fn unknown_participant_fails_before_any_write() {
        let state = state_with_teams().await;
        let mut payload = week_one();
        payload.team2_name = "Sharks".into();
        let err = create_game(&state, payload).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let games = list_games(
            &state,
            ListParams {
                skip: 0,
                limit: 10,
                include_inactive: true,
            },
        )
        .await
        .unwrap();
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn score_update_cannot_break_the_winner_invariant() {
        let state = state_with_teams().await;
        let game = create_game(&state, week_one()).await.unwrap();

        // Dropping the winner's score below the loser's must be rejected.
        let payload = UpdateGameRequest {
            team1_score: Some(7),
            ..UpdateGameRequest::default()
        };
        let err = update_game(&state, game.id, 1, payload).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        // Clearing the winner first makes the same score change legal.
        let payload = UpdateGameRequest {
            team1_score: Some(7),
            winning_team_name: Some(None),
            ..UpdateGameRequest::default()
        };
        let updated = update_game(&state, game.id, 1, payload).await.unwrap();
        assert_eq!(updated.winning_team_id, None);
        assert_eq!(updated.team1_score, 7);
    }

    #[tokio::test]
    async fn completion_flows_through_the_gate() {
        let state = state_with_teams().await;
        let game = create_game(&state, week_one()).await.unwrap();

        let done = mark_game_complete(&state, game.id, 1).await.unwrap();
        assert!(done.completed);
        assert_eq!(done.version, 2);

        let err = mark_game_complete(&state, game.id, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
