//! Stat-line queries: CRUD plus the filtered batch fetch feeding leaderboards
//! and box scores.

use super::{LeagueStore, ListFilter, now};
use crate::dao::{
    models::{NewStatLine, StatCounters, StatDetailRow, StatLineRow, StatPatch},
    storage::{StorageError, StorageResult},
};

const STAT_COLUMNS: &str = "id, player_id, game_id, \
     passing_tds, passes_completed, passes_attempted, interceptions_thrown, qb_rushing_tds, \
     receptions, targets, receiving_tds, drops, first_downs, \
     rushing_tds, rush_attempts, \
     flag_pulls, interceptions, sacks, pass_breakups, def_td, \
     version, active, created_at, updated_at, deleted_at";

const STAT_DETAIL_SELECT: &str = "SELECT s.id, s.player_id, p.name AS player_name, \
     s.game_id, g.week AS game_week, g.season AS game_season, g.league AS league, \
     t1.name AS team1_name, t2.name AS team2_name, \
     s.passing_tds, s.passes_completed, s.passes_attempted, s.interceptions_thrown, \
     s.qb_rushing_tds, s.receptions, s.targets, s.receiving_tds, s.drops, s.first_downs, \
     s.rushing_tds, s.rush_attempts, s.flag_pulls, s.interceptions, s.sacks, \
     s.pass_breakups, s.def_td, \
     s.version, s.active, s.created_at, s.updated_at, s.deleted_at \
     FROM player_stats s \
     JOIN players p ON p.id = s.player_id \
     JOIN games g ON g.id = s.game_id \
     LEFT JOIN teams t1 ON t1.id = g.team1_id \
     LEFT JOIN teams t2 ON t2.id = g.team2_id";

/// Filter for the batch stat fetch. At least one of the three criteria must
/// be present; the service layer enforces that.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatQuery {
    /// Limit to one game.
    pub game_id: Option<i64>,
    /// Limit to games of one week.
    pub week: Option<i64>,
    /// Limit to games of one season.
    pub season: Option<i64>,
    /// Include soft-deleted lines and lines of soft-deleted games.
    pub include_inactive: bool,
}

impl LeagueStore {
    /// Insert a stat line; references are already resolved.
    pub async fn insert_stat(&self, new: NewStatLine) -> StorageResult<StatDetailRow> {
        let created = now();
        let c = &new.counters;
        let result = sqlx::query(
            "INSERT INTO player_stats (player_id, game_id, \
             passing_tds, passes_completed, passes_attempted, interceptions_thrown, qb_rushing_tds, \
             receptions, targets, receiving_tds, drops, first_downs, \
             rushing_tds, rush_attempts, flag_pulls, interceptions, sacks, pass_breakups, def_td, \
             created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, \
             ?17, ?18, ?19, ?20, ?20)",
        )
        .bind(new.player_id)
        .bind(new.game_id)
        .bind(c.passing_tds)
        .bind(c.passes_completed)
        .bind(c.passes_attempted)
        .bind(c.interceptions_thrown)
        .bind(c.qb_rushing_tds)
        .bind(c.receptions)
        .bind(c.targets)
        .bind(c.receiving_tds)
        .bind(c.drops)
        .bind(c.first_downs)
        .bind(c.rushing_tds)
        .bind(c.rush_attempts)
        .bind(c.flag_pulls)
        .bind(c.interceptions)
        .bind(c.sacks)
        .bind(c.pass_breakups)
        .bind(c.def_td)
        .bind(created)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let row = self
            .get_stat_detail(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Stats {id} not found")))?;
        Ok(row)
    }

    /// Page through stat lines in insertion order.
    pub async fn list_stats(&self, filter: ListFilter) -> StorageResult<Vec<StatDetailRow>> {
        let sql = if filter.include_inactive {
            format!("{STAT_DETAIL_SELECT} ORDER BY s.id LIMIT ?1 OFFSET ?2")
        } else {
            format!("{STAT_DETAIL_SELECT} WHERE s.active = 1 ORDER BY s.id LIMIT ?1 OFFSET ?2")
        };
        let rows = sqlx::query_as::<_, StatDetailRow>(&sql)
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Fetch one stat line with player/game context.
    pub async fn get_stat_detail(
        &self,
        id: i64,
        include_inactive: bool,
    ) -> StorageResult<Option<StatDetailRow>> {
        let sql = if include_inactive {
            format!("{STAT_DETAIL_SELECT} WHERE s.id = ?1")
        } else {
            format!("{STAT_DETAIL_SELECT} WHERE s.id = ?1 AND s.active = 1")
        };
        let row = sqlx::query_as::<_, StatDetailRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch the raw active row for the update gate.
    pub async fn get_stat_row(&self, id: i64) -> StorageResult<Option<StatLineRow>> {
        let sql = format!("SELECT {STAT_COLUMNS} FROM player_stats WHERE id = ?1 AND active = 1");
        let row = sqlx::query_as::<_, StatLineRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// The single line recorded for a player in a game, if any. The stat-entry
    /// form uses this to prefill.
    pub async fn find_stat_by_player_game(
        &self,
        player_id: i64,
        game_id: i64,
    ) -> StorageResult<Option<StatDetailRow>> {
        let sql = format!(
            "{STAT_DETAIL_SELECT} WHERE s.player_id = ?1 AND s.game_id = ?2 AND s.active = 1 \
             ORDER BY s.id LIMIT 1"
        );
        let row = sqlx::query_as::<_, StatDetailRow>(&sql)
            .bind(player_id)
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Batch fetch by any combination of game, week, and season.
    pub async fn query_stats(&self, query: StatQuery) -> StorageResult<Vec<StatDetailRow>> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(STAT_DETAIL_SELECT);
        builder.push(" WHERE 1 = 1");
        if !query.include_inactive {
            builder.push(" AND s.active = 1 AND g.active = 1");
        }
        if let Some(game_id) = query.game_id {
            builder.push(" AND s.game_id = ").push_bind(game_id);
        }
        if let Some(week) = query.week {
            builder.push(" AND g.week = ").push_bind(week);
        }
        if let Some(season) = query.season {
            builder.push(" AND g.season = ").push_bind(season);
        }
        builder.push(" ORDER BY s.id");
        let rows = builder
            .build_query_as::<StatDetailRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Version-gated counter update. Only counters are mutable; the player
    /// and game references are fixed at creation.
    pub async fn update_stat(
        &self,
        id: i64,
        expected_version: i64,
        patch: &StatPatch,
    ) -> StorageResult<StatDetailRow> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {STAT_COLUMNS} FROM player_stats WHERE id = ?1 AND active = 1");
        let mut row = sqlx::query_as::<_, StatLineRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Stats {id} not found")))?;

        if row.version != expected_version {
            return Err(StorageError::VersionConflict {
                expected: expected_version,
                actual: row.version,
            });
        }

        patch.apply(&mut row.counters);
        let c = &row.counters;
        let updated = now();
        sqlx::query(
            "UPDATE player_stats SET passing_tds = ?1, passes_completed = ?2, \
             passes_attempted = ?3, interceptions_thrown = ?4, qb_rushing_tds = ?5, \
             receptions = ?6, targets = ?7, receiving_tds = ?8, drops = ?9, first_downs = ?10, \
             rushing_tds = ?11, rush_attempts = ?12, flag_pulls = ?13, interceptions = ?14, \
             sacks = ?15, pass_breakups = ?16, def_td = ?17, \
             version = version + 1, updated_at = ?18 WHERE id = ?19 AND version = ?20",
        )
        .bind(c.passing_tds)
        .bind(c.passes_completed)
        .bind(c.passes_attempted)
        .bind(c.interceptions_thrown)
        .bind(c.qb_rushing_tds)
        .bind(c.receptions)
        .bind(c.targets)
        .bind(c.receiving_tds)
        .bind(c.drops)
        .bind(c.first_downs)
        .bind(c.rushing_tds)
        .bind(c.rush_attempts)
        .bind(c.flag_pulls)
        .bind(c.interceptions)
        .bind(c.sacks)
        .bind(c.pass_breakups)
        .bind(c.def_td)
        .bind(updated)
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        let detail = self
            .get_stat_detail(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Stats {id} not found")))?;
        Ok(detail)
    }

    /// Version-gated soft delete.
    pub async fn soft_delete_stat(
        &self,
        id: i64,
        expected_version: i64,
    ) -> StorageResult<StatDetailRow> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {STAT_COLUMNS} FROM player_stats WHERE id = ?1 AND active = 1");
        let row = sqlx::query_as::<_, StatLineRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Stats {id} not found")))?;

        if row.version != expected_version {
            return Err(StorageError::VersionConflict {
                expected: expected_version,
                actual: row.version,
            });
        }

        let deleted = now();
        sqlx::query(
            "UPDATE player_stats SET active = 0, deleted_at = ?1, version = version + 1, \
             updated_at = ?1 WHERE id = ?2 AND version = ?3",
        )
        .bind(deleted)
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        let detail = self
            .get_stat_detail(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Stats {id} not found")))?;
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{
        models::{NewGame, NewPlayer, NewTeam},
        sqlite::schema::ensure_schema,
    };

    struct Fixture {
        store: LeagueStore,
        player_id: i64,
        game_id: i64,
    }

    async fn fixture() -> Fixture {
        let store = LeagueStore::connect("sqlite::memory:").await.unwrap();
        ensure_schema(&store).await.unwrap();
        let eagles = store
            .insert_team(NewTeam {
                name: "Eagles".into(),
                season: 1,
                league: "A".into(),
                wins: 0,
                losses: 0,
                ties: 0,
                active: true,
            })
            .await
            .unwrap();
        let hawks = store
            .insert_team(NewTeam {
                name: "Hawks".into(),
                season: 1,
                league: "A".into(),
                wins: 0,
                losses: 0,
                ties: 0,
                active: true,
            })
            .await
            .unwrap();
        let player = store
            .insert_player(NewPlayer {
                name: "Jon".into(),
                season: 1,
                team_id: eagles.id,
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
                team1_id: eagles.id,
                team1_score: 21,
                team2_id: hawks.id,
                team2_score: 14,
                winning_team_id: Some(eagles.id),
            })
            .await
            .unwrap();
        Fixture {
            store,
            player_id: player.id,
            game_id: game.id,
        }
    }

    fn three_tds(player_id: i64, game_id: i64) -> NewStatLine {
        NewStatLine {
            player_id,
            game_id,
            counters: StatCounters {
                passing_tds: 3,
                passes_completed: 10,
                passes_attempted: 15,
                ..StatCounters::default()
            },
        }
    }

    #[tokio::test]
    async fn insert_carries_joined_context() {
        let f = fixture().await;
        let row = f
            .store
            .insert_stat(three_tds(f.player_id, f.game_id))
            .await
            .unwrap();
        assert_eq!(row.player_name, "Jon");
        assert_eq!(row.game_week, 1);
        assert_eq!(row.team1_name.as_deref(), Some("Eagles"));
        assert_eq!(row.counters.passing_tds, 3);
    }

    #[tokio::test]
    async fn batch_query_filters_by_week_and_season() {
        let f = fixture().await;
        f.store
            .insert_stat(three_tds(f.player_id, f.game_id))
            .await
            .unwrap();

        let by_season = f
            .store
            .query_stats(StatQuery {
                season: Some(1),
                ..StatQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(by_season.len(), 1);

        let wrong_week = f
            .store
            .query_stats(StatQuery {
                week: Some(9),
                ..StatQuery::default()
            })
            .await
            .unwrap();
        assert!(wrong_week.is_empty());
    }

    #[tokio::test]
    async fn lookup_by_player_and_game() {
        let f = fixture().await;
        f.store
            .insert_stat(three_tds(f.player_id, f.game_id))
            .await
            .unwrap();

        let found = f
            .store
            .find_stat_by_player_game(f.player_id, f.game_id)
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = f
            .store
            .find_stat_by_player_game(f.player_id + 99, f.game_id)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn counter_update_respects_the_gate() {
        let f = fixture().await;
        let row = f
            .store
            .insert_stat(three_tds(f.player_id, f.game_id))
            .await
            .unwrap();

        let patch = StatPatch {
            passing_tds: Some(4),
            ..StatPatch::default()
        };
        let updated = f.store.update_stat(row.id, 1, &patch).await.unwrap();
        assert_eq!(updated.counters.passing_tds, 4);
        // Untouched counters survive the merge.
        assert_eq!(updated.counters.passes_completed, 10);
        assert_eq!(updated.version, 2);

        let err = f.store.update_stat(row.id, 1, &patch).await.unwrap_err();
        assert!(matches!(err, StorageError::VersionConflict { .. }));
    }

    #[tokio::test]
    async fn soft_deleted_lines_leave_the_batch() {
        let f = fixture().await;
        let row = f
            .store
            .insert_stat(three_tds(f.player_id, f.game_id))
            .await
            .unwrap();

        f.store.soft_delete_stat(row.id, 1).await.unwrap();
        let remaining = f
            .store
            .query_stats(StatQuery {
                game_id: Some(f.game_id),
                ..StatQuery::default()
            })
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }
}
