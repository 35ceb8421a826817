//! Stat-line operations: creation in both name and id form, the batch fetch,
//! and the completed-game immutability rule.

use tracing::debug;

use crate::{
    dao::{
        models::{NewStatLine, PlayerRow, StatLineRow},
        sqlite::StatQuery,
    },
    dto::{
        common::ListParams,
        stats::{
            BatchStatsParams, CreateStatsByIdRequest, CreateStatsRequest, PlayerStatsOut,
            StatsLookupParams, UpdateStatsRequest,
        },
    },
    error::ServiceError,
    state::SharedState,
};

/// Reject mutations against a completed game; reads stay available.
async fn ensure_game_mutable(state: &SharedState, game_id: i64) -> Result<(), ServiceError> {
    let game = state
        .store()
        .get_game_detail(game_id, true)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Game {game_id} not found")))?;
    if game.completed {
        return Err(ServiceError::Forbidden(
            "Stats for a completed game cannot be modified".into(),
        ));
    }
    Ok(())
}

/// Resolution step for stale player references: when the referenced row is
/// inactive or rostered for another season, prefer the active row carrying
/// the same name in the game's season. Falls back to the referenced row so a
/// deliberate cross-season entry still lands somewhere visible to the caller.
pub async fn resolve_player_for_game(
    state: &SharedState,
    player_id: i64,
    game_season: i64,
) -> Result<PlayerRow, ServiceError> {
    let referenced = state
        .store()
        .get_player_row(player_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Player {player_id} not found")))?;

    if referenced.active && referenced.season == game_season {
        return Ok(referenced);
    }

    match state
        .store()
        .find_player_by_name_season(&referenced.name, game_season)
        .await?
    {
        Some(current) => {
            debug!(
                stale_id = player_id,
                resolved_id = current.id,
                season = game_season,
                "re-resolved stale player reference by name"
            );
            Ok(current)
        }
        None => Ok(referenced),
    }
}

/// Resolve the player named at stat entry, preferring the game's season.
async fn resolve_player_by_name(
    state: &SharedState,
    name: &str,
    game_season: i64,
) -> Result<PlayerRow, ServiceError> {
    if let Some(row) = state
        .store()
        .find_player_by_name_season(name, game_season)
        .await?
    {
        return Ok(row);
    }
    state
        .store()
        .find_player_by_name(name)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Player '{name}' not found")))
}

pub async fn create_stats(
    state: &SharedState,
    payload: CreateStatsRequest,
) -> Result<PlayerStatsOut, ServiceError> {
    let game = state
        .store()
        .find_game_by_descriptor(
            payload.game_week,
            payload.game_season,
            &payload.league,
            &payload.team1_name,
            &payload.team2_name,
        )
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "Game not found for week {}, season {}, league {} between {} and {}",
                payload.game_week,
                payload.game_season,
                payload.league,
                payload.team1_name,
                payload.team2_name
            ))
        })?;

    ensure_game_mutable(state, game.id).await?;
    let player = resolve_player_by_name(state, &payload.player_name, game.season).await?;

    let row = state
        .store()
        .insert_stat(NewStatLine {
            player_id: player.id,
            game_id: game.id,
            counters: payload.counters.into(),
        })
        .await?;
    state.invalidate_reports().await;
    Ok(row.into())
}

pub async fn create_stats_by_id(
    state: &SharedState,
    payload: CreateStatsByIdRequest,
) -> Result<PlayerStatsOut, ServiceError> {
    let game = state
        .store()
        .get_game_row(payload.game_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Game {} not found", payload.game_id)))?;

    ensure_game_mutable(state, game.id).await?;
    let player = resolve_player_for_game(state, payload.player_id, game.season).await?;

    let row = state
        .store()
        .insert_stat(NewStatLine {
            player_id: player.id,
            game_id: game.id,
            counters: payload.counters.into(),
        })
        .await?;
    state.invalidate_reports().await;
    Ok(row.into())
}

pub async fn list_stats(
    state: &SharedState,
    params: ListParams,
) -> Result<Vec<PlayerStatsOut>, ServiceError> {
    let rows = state.store().list_stats(params.into()).await?;
    Ok(rows.into_iter().map(PlayerStatsOut::from).collect())
}

pub async fn get_stats(
    state: &SharedState,
    id: i64,
    include_inactive: bool,
) -> Result<PlayerStatsOut, ServiceError> {
    let row = state
        .store()
        .get_stat_detail(id, include_inactive)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Stats {id} not found")))?;
    Ok(row.into())
}

/// Batch fetch; an unfiltered batch over the whole table is a caller mistake
/// and is rejected.
pub async fn batch_stats(
    state: &SharedState,
    params: BatchStatsParams,
) -> Result<Vec<PlayerStatsOut>, ServiceError> {
    if params.game_id.is_none() && params.week.is_none() && params.season.is_none() {
        return Err(ServiceError::InvalidInput(
            "at least one of game_id, week, or season is required".into(),
        ));
    }
    let rows = state
        .store()
        .query_stats(StatQuery {
            game_id: params.game_id,
            week: params.week,
            season: params.season,
            include_inactive: params.include_inactive,
        })
        .await?;
    Ok(rows.into_iter().map(PlayerStatsOut::from).collect())
}

pub async fn lookup_stats(
    state: &SharedState,
    params: StatsLookupParams,
) -> Result<PlayerStatsOut, ServiceError> {
    let row = state
        .store()
        .find_stat_by_player_game(params.player_id, params.game_id)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "Stats not found for player {} in game {}",
                params.player_id, params.game_id
            ))
        })?;
    Ok(row.into())
}

async fn load_stat_row(state: &SharedState, id: i64) -> Result<StatLineRow, ServiceError> {
    state
        .store()
        .get_stat_row(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Stats {id} not found")))
}

pub async fn update_stats(
    state: &SharedState,
    id: i64,
    version: i64,
    payload: UpdateStatsRequest,
) -> Result<PlayerStatsOut, ServiceError> {
    let current = load_stat_row(state, id).await?;
    ensure_game_mutable(state, current.game_id).await?;

    let row = state
        .store()
        .update_stat(id, version, &payload.into())
        .await?;
    state.invalidate_reports().await;
    Ok(row.into())
}

pub async fn delete_stats(state: &SharedState, id: i64, version: i64) -> Result<(), ServiceError> {
    let current = load_stat_row(state, id).await?;
    ensure_game_mutable(state, current.game_id).await?;

    state.store().soft_delete_stat(id, version).await?;
    state.invalidate_reports().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dao::models::{NewGame, NewPlayer, NewTeam},
        dao::sqlite::{LeagueStore, schema::ensure_schema},
        dto::stats::StatCountersDto,
        services::game_service,
        state::AppState,
    };

    struct Fixture {
        state: SharedState,
        game_id: i64,
        player_id: i64,
    }

    async fn fixture() -> Fixture {
        let store = LeagueStore::connect("sqlite::memory:").await.unwrap();
        ensure_schema(&store).await.unwrap();
        let mut team_ids = Vec::new();
        for name in ["Eagles", "Hawks"] {
            let team = store
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
            team_ids.push(team.id);
        }
        let player = store
            .insert_player(NewPlayer {
                name: "Jon".into(),
                season: 1,
                team_id: team_ids[0],
                jersey_number: None,
                active: true,
            })
            .await
            .unwrap();
        let game = store
            .insert_game(NewGame {
                week: 1,
                league: "A".into(),
                season: 1,
                team1_id: team_ids[0],
                team1_score: 21,
                team2_id: team_ids[1],
                team2_score: 14,
                winning_team_id: Some(team_ids[0]),
            })
            .await
            .unwrap();
        Fixture {
            state: AppState::new(store, AppConfig::default()),
            game_id: game.id,
            player_id: player.id,
        }
    }

    fn name_form() -> CreateStatsRequest {
        CreateStatsRequest {
            player_name: "Jon".into(),
            game_week: 1,
            game_season: 1,
            league: "A".into(),
            team1_name: "Eagles".into(),
            team2_name: "Hawks".into(),
            counters: StatCountersDto {
                passing_tds: 3,
                ..StatCountersDto::default()
            },
        }
    }

    #[tokio::test]
    async fn name_form_resolves_player_and_game() {
        let f = fixture().await;
        let line = create_stats(&f.state, name_form()).await.unwrap();
        assert_eq!(line.player_id, f.player_id);
        assert_eq!(line.game_id, f.game_id);
        assert_eq!(line.counters.passing_tds, 3);
    }

    #[tokio::test]
    async fn missing_game_names_every_descriptor_part() {
        let f = fixture().await;
        let mut payload = name_form();
        payload.game_week = 9;
        let err = create_stats(&f.state, payload).await.unwrap_err();
        match err {
            ServiceError::NotFound(message) => {
                assert!(message.contains("week 9"));
                assert!(message.contains("Eagles"));
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn completed_game_freezes_its_stats() {
        let f = fixture().await;
        let line = create_stats(&f.state, name_form()).await.unwrap();

        game_service::mark_game_complete(&f.state, f.game_id, 1)
            .await
            .unwrap();

        let err = create_stats(&f.state, name_form()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = update_stats(&f.state, line.id, 1, UpdateStatsRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = delete_stats(&f.state, line.id, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        // Reads stay open.
        let fetched = get_stats(&f.state, line.id, false).await.unwrap();
        assert_eq!(fetched.counters.passing_tds, 3);
    }

    #[tokio::test]
    async fn stale_player_reference_resolves_by_name() {
        let f = fixture().await;

        // Retire the season-1 row and roster Jon again for season 1 under a
        // fresh id, as a rollover-and-recreate would.
        let store = f.state.store();
        store.soft_delete_player(f.player_id, 1).await.unwrap();
        let eagles = store.find_team_by_name("Eagles", 1).await.unwrap().unwrap();
        let fresh = store
            .insert_player(NewPlayer {
                name: "Jon".into(),
                season: 1,
                team_id: eagles.id,
                jersey_number: None,
                active: true,
            })
            .await
            .unwrap();

        let resolved = resolve_player_for_game(&f.state, f.player_id, 1)
            .await
            .unwrap();
        assert_eq!(resolved.id, fresh.id);

        // With no same-name replacement the referenced row is kept.
        store.soft_delete_player(fresh.id, 1).await.unwrap();
        let resolved = resolve_player_for_game(&f.state, f.player_id, 1)
            .await
            .unwrap();
        assert_eq!(resolved.id, f.player_id);
    }

    #[tokio::test]
    async fn batch_requires_a_filter() {
        let f = fixture().await;
        let err = batch_stats(&f.state, BatchStatsParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        create_stats(&f.state, name_form()).await.unwrap();
        let rows = batch_stats(
            &f.state,
            BatchStatsParams {
                season: Some(1),
                ..BatchStatsParams::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn lookup_by_player_and_game() {
        let f = fixture().await;
        create_stats(&f.state, name_form()).await.unwrap();

        let found = lookup_stats(
            &f.state,
            StatsLookupParams {
                player_id: f.player_id,
                game_id: f.game_id,
            },
        )
        .await
        .unwrap();
        assert_eq!(found.player_name, "Jon");

        let err = lookup_stats(
            &f.state,
            StatsLookupParams {
                player_id: f.player_id,
                game_id: f.game_id + 1,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
