//! Game queries. Reads return the joined projection carrying participant and
//! winner names.

use super::{LeagueStore, ListFilter, now};
use crate::dao::{
    models::{GameDetailRow, GamePatch, GameRow, NewGame},
    storage::{StorageError, StorageResult},
};

const GAME_COLUMNS: &str = "id, week, league, season, team1_id, team1_score, \
     team2_id, team2_score, winning_team_id, completed, \
     version, active, created_at, updated_at, deleted_at";

const GAME_DETAIL_SELECT: &str = "SELECT g.id, g.week, g.league, g.season, \
     g.team1_id, t1.name AS team1_name, g.team1_score, \
     g.team2_id, t2.name AS team2_name, g.team2_score, \
     g.winning_team_id, tw.name AS winning_team_name, g.completed, \
     g.version, g.active, g.created_at, g.updated_at, g.deleted_at \
     FROM games g \
     LEFT JOIN teams t1 ON t1.id = g.team1_id \
     LEFT JOIN teams t2 ON t2.id = g.team2_id \
     LEFT JOIN teams tw ON tw.id = g.winning_team_id";

impl LeagueStore {
    /// Insert a game; participants are already resolved to team ids.
    pub async fn insert_game(&self, new: NewGame) -> StorageResult<GameDetailRow> {
        let created = now();
        let result = sqlx::query(
            "INSERT INTO games (week, league, season, team1_id, team1_score, team2_id, \
             team2_score, winning_team_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        )
        .bind(new.week)
        .bind(&new.league)
        .bind(new.season)
        .bind(new.team1_id)
        .bind(new.team1_score)
        .bind(new.team2_id)
        .bind(new.team2_score)
        .bind(new.winning_team_id)
        .bind(created)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let row = self
            .get_game_detail(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Game {id} not found")))?;
        Ok(row)
    }

    /// Page through games in insertion order.
    pub async fn list_games(&self, filter: ListFilter) -> StorageResult<Vec<GameDetailRow>> {
        let sql = if filter.include_inactive {
            format!("{GAME_DETAIL_SELECT} ORDER BY g.id LIMIT ?1 OFFSET ?2")
        } else {
            format!("{GAME_DETAIL_SELECT} WHERE g.active = 1 ORDER BY g.id LIMIT ?1 OFFSET ?2")
        };
        let rows = sqlx::query_as::<_, GameDetailRow>(&sql)
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Fetch one game with name context.
    pub async fn get_game_detail(
        &self,
        id: i64,
        include_inactive: bool,
    ) -> StorageResult<Option<GameDetailRow>> {
        let sql = if include_inactive {
            format!("{GAME_DETAIL_SELECT} WHERE g.id = ?1")
        } else {
            format!("{GAME_DETAIL_SELECT} WHERE g.id = ?1 AND g.active = 1")
        };
        let row = sqlx::query_as::<_, GameDetailRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch the raw active row; stat mutations consult this for the
    /// completed flag.
    pub async fn get_game_row(&self, id: i64) -> StorageResult<Option<GameRow>> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1 AND active = 1");
        let row = sqlx::query_as::<_, GameRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Locate a game by the name-form descriptor used at stat entry:
    /// week + season + league + both participant names.
    pub async fn find_game_by_descriptor(
        &self,
        week: i64,
        season: i64,
        league: &str,
        team1_name: &str,
        team2_name: &str,
    ) -> StorageResult<Option<GameRow>> {
        let sql = format!(
            "SELECT g.{} FROM games g \
             JOIN teams t1 ON t1.id = g.team1_id \
             JOIN teams t2 ON t2.id = g.team2_id \
             WHERE g.week = ?1 AND g.season = ?2 AND g.league = ?3 \
             AND t1.name = ?4 AND t2.name = ?5 AND g.active = 1",
            GAME_COLUMNS.replace(", ", ", g.")
        );
        let row = sqlx::query_as::<_, GameRow>(&sql)
            .bind(week)
            .bind(season)
            .bind(league)
            .bind(team1_name)
            .bind(team2_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Version-gated partial update; the caller validates the winner/score
    /// invariant on the merged row before calling in.
    pub async fn update_game(
        &self,
        id: i64,
        expected_version: i64,
        patch: &GamePatch,
    ) -> StorageResult<GameDetailRow> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1 AND active = 1");
        let mut row = sqlx::query_as::<_, GameRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Game {id} not found")))?;

        if row.version != expected_version {
            return Err(StorageError::VersionConflict {
                expected: expected_version,
                actual: row.version,
            });
        }

        patch.apply(&mut row);
        let updated = now();
        sqlx::query(
            "UPDATE games SET week = ?1, league = ?2, season = ?3, team1_id = ?4, \
             team1_score = ?5, team2_id = ?6, team2_score = ?7, winning_team_id = ?8, \
             completed = ?9, version = version + 1, updated_at = ?10 \
             WHERE id = ?11 AND version = ?12",
        )
        .bind(row.week)
        .bind(&row.league)
        .bind(row.season)
        .bind(row.team1_id)
        .bind(row.team1_score)
        .bind(row.team2_id)
        .bind(row.team2_score)
        .bind(row.winning_team_id)
        .bind(row.completed)
        .bind(updated)
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        let detail = self
            .get_game_detail(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Game {id} not found")))?;
        Ok(detail)
    }

    /// Version-gated soft delete.
    pub async fn soft_delete_game(
        &self,
        id: i64,
        expected_version: i64,
    ) -> StorageResult<GameDetailRow> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1 AND active = 1");
        let row = sqlx::query_as::<_, GameRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Game {id} not found")))?;

        if row.version != expected_version {
            return Err(StorageError::VersionConflict {
                expected: expected_version,
                actual: row.version,
            });
        }

        let deleted = now();
        sqlx::query(
            "UPDATE games SET active = 0, deleted_at = ?1, version = version + 1, \
             updated_at = ?1 WHERE id = ?2 AND version = ?3",
        )
        .bind(deleted)
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        let detail = self
            .get_game_detail(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Game {id} not found")))?;
        Ok(detail)
    }
}
