//! Player operations. Team references arrive as names and are resolved
//! within the player's season before anything is written.

use crate::{
    dao::models::{NewPlayer, PlayerPatch, TeamRow},
    dto::{
        common::ListParams,
        player::{CreatePlayerRequest, PlayerOut, UpdatePlayerRequest},
    },
    error::ServiceError,
    state::SharedState,
};

/// Resolve an active team by name within a season, or fail naming the team.
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

pub async fn create_player(
    state: &SharedState,
    payload: CreatePlayerRequest,
) -> Result<PlayerOut, ServiceError> {
    let team = resolve_team(state, &payload.team_name, payload.season).await?;
    let row = state
        .store()
        .insert_player(NewPlayer {
            name: payload.name,
            season: payload.season,
            team_id: team.id,
            jersey_number: payload.jersey_number,
            active: payload.active,
        })
        .await?;
    Ok(row.into())
}

pub async fn list_players(
    state: &SharedState,
    params: ListParams,
) -> Result<Vec<PlayerOut>, ServiceError> {
    let rows = state.store().list_players(params.into()).await?;
    Ok(rows.into_iter().map(PlayerOut::from).collect())
}

pub async fn get_player(
    state: &SharedState,
    id: i64,
    include_inactive: bool,
) -> Result<PlayerOut, ServiceError> {
    let row = state
        .store()
        .get_player(id, include_inactive)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Player {id} not found")))?;
    Ok(row.into())
}

pub async fn update_player(
    state: &SharedState,
    id: i64,
    version: i64,
    payload: UpdatePlayerRequest,
) -> Result<PlayerOut, ServiceError> {
    let current = state
        .store()
        .get_player(id, false)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Player {id} not found")))?;

    // A moved player resolves against the season the update lands in.
    let season = payload.season.unwrap_or(current.season);
    let team_id = match &payload.team_name {
        Some(team_name) => Some(resolve_team(state, team_name, season).await?.id),
        None => None,
    };

    let patch = PlayerPatch {
        name: payload.name,
        season: payload.season,
        team_id,
        jersey_number: payload.jersey_number,
        active: payload.active,
    };
    let row = state.store().update_player(id, version, &patch).await?;
    Ok(row.into())
}

pub async fn delete_player(state: &SharedState, id: i64, version: i64) -> Result<(), ServiceError> {
    state.store().soft_delete_player(id, version).await?;
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
        for (name, season) in [("Eagles", 1), ("Eagles", 2), ("Hawks", 1)] {
            store
                .insert_team(NewTeam {
                    name: name.into(),
                    season,
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

    fn jon() -> CreatePlayerRequest {
        CreatePlayerRequest {
            name: "Jon".into(),
            team_name: "Eagles".into(),
            season: 1,
            jersey_number: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn create_resolves_team_within_season() {
        let state = state_with_teams().await;
        let player = create_player(&state, jon()).await.unwrap();
        assert_eq!(player.team_name, "Eagles");
        assert_eq!(player.season, 1);
    }

    #[tokio::test]
    async fn unknown_team_is_named_in_the_error() {
        let state = state_with_teams().await;
        let mut payload = jon();
        payload.team_name = "Sharks".into();
        let err = create_player(&state, payload).await.unwrap_err();
        match err {
            ServiceError::NotFound(message) => assert!(message.contains("Sharks")),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn moving_seasons_resolves_team_in_the_new_season() {
        let state = state_with_teams().await;
        let player = create_player(&state, jon()).await.unwrap();

        let payload = UpdatePlayerRequest {
            season: Some(2),
            team_name: Some("Eagles".into()),
            ..UpdatePlayerRequest::default()
        };
        let moved = update_player(&state, player.id, 1, payload).await.unwrap();
        assert_eq!(moved.season, 2);
        assert_eq!(moved.version, 2);

        // Hawks have no season-2 row, so the move fails cleanly.
        let payload = UpdatePlayerRequest {
            season: Some(2),
            team_name: Some("Hawks".into()),
            ..UpdatePlayerRequest::default()
        };
        let err = update_player(&state, player.id, 2, payload)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
