//! Team operations. Responses embed the active roster, and every mutation
//! invalidates the cached standings.

use std::collections::HashMap;

use crate::{
    dao::models::PlayerRow,
    dto::{
        common::ListParams,
        team::{CreateTeamRequest, TeamOut, UpdateTeamRequest},
    },
    error::ServiceError,
    state::SharedState,
};

pub async fn create_team(
    state: &SharedState,
    payload: CreateTeamRequest,
) -> Result<TeamOut, ServiceError> {
    let row = state.store().insert_team(payload.into()).await?;
    state.invalidate_standings().await;
    Ok(TeamOut::from_row(row, Vec::new()))
}

pub async fn list_teams(
    state: &SharedState,
    params: ListParams,
) -> Result<Vec<TeamOut>, ServiceError> {
    let rows = state.store().list_teams(params.into()).await?;
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut rosters = group_by_team(state.store().players_for_teams(&ids).await?);

    Ok(rows
        .into_iter()
        .map(|row| {
            let players = rosters.remove(&row.id).unwrap_or_default();
            TeamOut::from_row(row, players)
        })
        .collect())
}

pub async fn get_team(
    state: &SharedState,
    id: i64,
    include_inactive: bool,
) -> Result<TeamOut, ServiceError> {
    let row = state
        .store()
        .get_team(id, include_inactive)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Team {id} not found")))?;
    let players = state.store().players_for_teams(&[row.id]).await?;
    Ok(TeamOut::from_row(row, players))
}

pub async fn update_team(
    state: &SharedState,
    id: i64,
    version: i64,
    payload: UpdateTeamRequest,
) -> Result<TeamOut, ServiceError> {
    let row = state
        .store()
        .update_team(id, version, &payload.into())
        .await?;
    state.invalidate_standings().await;
    let players = state.store().players_for_teams(&[row.id]).await?;
    Ok(TeamOut::from_row(row, players))
}

pub async fn delete_team(state: &SharedState, id: i64, version: i64) -> Result<(), ServiceError> {
    state.store().soft_delete_team(id, version).await?;
    state.invalidate_standings().await;
    Ok(())
}

fn group_by_team(players: Vec<PlayerRow>) -> HashMap<i64, Vec<PlayerRow>> {
    let mut rosters: HashMap<i64, Vec<PlayerRow>> = HashMap::new();
    for player in players {
        rosters.entry(player.team_id).or_default().push(player);
    }
    rosters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dao::sqlite::{LeagueStore, schema::ensure_schema},
        state::AppState,
    };

    async fn shared_state() -> SharedState {
        let store = LeagueStore::connect("sqlite::memory:").await.unwrap();
        ensure_schema(&store).await.unwrap();
        AppState::new(store, AppConfig::default())
    }

    fn eagles() -> CreateTeamRequest {
        CreateTeamRequest {
            name: "Eagles".into(),
            season: 1,
            league: "A".into(),
            wins: 0,
            losses: 0,
            ties: 0,
            active: true,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let state = shared_state().await;
        let created = create_team(&state, eagles()).await.unwrap();
        assert_eq!(created.display_name, "Eagles (Season 1)");

        let fetched = get_team(&state, created.id, false).await.unwrap();
        assert_eq!(fetched.name, "Eagles");
        assert_eq!(fetched.version, 1);
    }

    #[tokio::test]
    async fn deleted_team_needs_include_inactive() {
        let state = shared_state().await;
        let created = create_team(&state, eagles()).await.unwrap();
        delete_team(&state, created.id, 1).await.unwrap();

        let err = get_team(&state, created.id, false).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let found = get_team(&state, created.id, true).await.unwrap();
        assert!(!found.active);
    }

    #[tokio::test]
    async fn stale_update_is_a_conflict() {
        let state = shared_state().await;
        let created = create_team(&state, eagles()).await.unwrap();

        let payload = UpdateTeamRequest {
            wins: Some(1),
            ..UpdateTeamRequest::default()
        };
        update_team(&state, created.id, 1, payload).await.unwrap();

        let payload = UpdateTeamRequest {
            wins: Some(2),
            ..UpdateTeamRequest::default()
        };
        let err = update_team(&state, created.id, 1, payload)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
