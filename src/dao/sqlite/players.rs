//! Player queries. Reads return the joined projection carrying the team name;
//! the raw row is used by the update gate.

use super::{LeagueStore, ListFilter, now};
use crate::dao::{
    models::{NewPlayer, PlayerDetailRow, PlayerPatch, PlayerRow},
    storage::{StorageError, StorageResult},
};

const PLAYER_COLUMNS: &str = "id, name, season, team_id, jersey_number, \
     version, active, created_at, updated_at, deleted_at";

const PLAYER_DETAIL_SELECT: &str = "SELECT p.id, p.name, p.season, p.team_id, \
     t.name AS team_name, p.jersey_number, p.version, p.active, \
     p.created_at, p.updated_at, p.deleted_at \
     FROM players p JOIN teams t ON t.id = p.team_id";

impl LeagueStore {
    /// Insert a player row for one season's roster.
    pub async fn insert_player(&self, new: NewPlayer) -> StorageResult<PlayerDetailRow> {
        let created = now();
        let result = sqlx::query(
            "INSERT INTO players (name, season, team_id, jersey_number, active, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        )
        .bind(&new.name)
        .bind(new.season)
        .bind(new.team_id)
        .bind(&new.jersey_number)
        .bind(new.active)
        .bind(created)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let row = self
            .get_player(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Player {id} not found")))?;
        Ok(row)
    }

    /// Page through players in insertion order.
    pub async fn list_players(&self, filter: ListFilter) -> StorageResult<Vec<PlayerDetailRow>> {
        let sql = if filter.include_inactive {
            format!("{PLAYER_DETAIL_SELECT} ORDER BY p.id LIMIT ?1 OFFSET ?2")
        } else {
            format!("{PLAYER_DETAIL_SELECT} WHERE p.active = 1 ORDER BY p.id LIMIT ?1 OFFSET ?2")
        };
        let rows = sqlx::query_as::<_, PlayerDetailRow>(&sql)
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Fetch one player with team context.
    pub async fn get_player(
        &self,
        id: i64,
        include_inactive: bool,
    ) -> StorageResult<Option<PlayerDetailRow>> {
        let sql = if include_inactive {
            format!("{PLAYER_DETAIL_SELECT} WHERE p.id = ?1")
        } else {
            format!("{PLAYER_DETAIL_SELECT} WHERE p.id = ?1 AND p.active = 1")
        };
        let row = sqlx::query_as::<_, PlayerDetailRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch the raw row regardless of visibility. The stat-entry resolution
    /// step needs stale rows too.
    pub async fn get_player_row(&self, id: i64) -> StorageResult<Option<PlayerRow>> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");
        let row = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// The active roster entry for `name` in `season`, if any.
    pub async fn find_player_by_name_season(
        &self,
        name: &str,
        season: i64,
    ) -> StorageResult<Option<PlayerRow>> {
        let sql = format!(
            "SELECT {PLAYER_COLUMNS} FROM players \
             WHERE name = ?1 AND season = ?2 AND active = 1 ORDER BY id LIMIT 1"
        );
        let row = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(name)
            .bind(season)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// The most recent active roster entry for `name` across seasons.
    pub async fn find_player_by_name(&self, name: &str) -> StorageResult<Option<PlayerRow>> {
        let sql = format!(
            "SELECT {PLAYER_COLUMNS} FROM players \
             WHERE name = ?1 AND active = 1 ORDER BY season DESC, id DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Active players of the given teams, for embedding rosters in team
    /// responses without a per-team query.
    pub async fn players_for_teams(&self, team_ids: &[i64]) -> StorageResult<Vec<PlayerRow>> {
        if team_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE active = 1 AND team_id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in team_ids {
            separated.push_bind(*id);
        }
        builder.push(") ORDER BY id");
        let rows = builder
            .build_query_as::<PlayerRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Version-gated partial update; same transaction discipline as teams.
    pub async fn update_player(
        &self,
        id: i64,
        expected_version: i64,
        patch: &PlayerPatch,
    ) -> StorageResult<PlayerDetailRow> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1 AND active = 1");
        let mut row = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Player {id} not found")))?;

        if row.version != expected_version {
            return Err(StorageError::VersionConflict {
                expected: expected_version,
                actual: row.version,
            });
        }

        patch.apply(&mut row);
        let updated = now();
        sqlx::query(
            "UPDATE players SET name = ?1, season = ?2, team_id = ?3, jersey_number = ?4, \
             active = ?5, version = version + 1, updated_at = ?6 WHERE id = ?7 AND version = ?8",
        )
        .bind(&row.name)
        .bind(row.season)
        .bind(row.team_id)
        .bind(&row.jersey_number)
        .bind(row.active)
        .bind(updated)
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        let detail = self
            .get_player(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Player {id} not found")))?;
        Ok(detail)
    }

    /// Version-gated soft delete.
    pub async fn soft_delete_player(
        &self,
        id: i64,
        expected_version: i64,
    ) -> StorageResult<PlayerDetailRow> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1 AND active = 1");
        let row = sqlx::query_as::<_, PlayerRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Player {id} not found")))?;

        if row.version != expected_version {
            return Err(StorageError::VersionConflict {
                expected: expected_version,
                actual: row.version,
            });
        }

        let deleted = now();
        sqlx::query(
            "UPDATE players SET active = 0, deleted_at = ?1, version = version + 1, \
             updated_at = ?1 WHERE id = ?2 AND version = ?3",
        )
        .bind(deleted)
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        let detail = self
            .get_player(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Player {id} not found")))?;
        Ok(detail)
    }

    /// Deactivate every active player rostered for the season.
    pub async fn deactivate_players_in_season(&self, season: i64) -> StorageResult<u64> {
        let updated = now();
        let result = sqlx::query(
            "UPDATE players SET active = 0, version = version + 1, updated_at = ?1 \
             WHERE season = ?2 AND active = 1",
        )
        .bind(updated)
        .bind(season)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{models::NewTeam, sqlite::schema::ensure_schema};

    async fn store_with_team() -> (LeagueStore, i64) {
        let store = LeagueStore::connect("sqlite::memory:").await.unwrap();
        ensure_schema(&store).await.unwrap();
        let team = store
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
        (store, team.id)
    }

    fn jon(team_id: i64) -> NewPlayer {
        NewPlayer {
            name: "Jon".into(),
            season: 1,
            team_id,
            jersey_number: Some("12".into()),
            active: true,
        }
    }

    #[tokio::test]
    async fn insert_joins_team_name() {
        let (store, team_id) = store_with_team().await;
        let row = store.insert_player(jon(team_id)).await.unwrap();
        assert_eq!(row.team_name, "Eagles");
        assert_eq!(row.version, 1);
    }

    #[tokio::test]
    async fn name_lookup_prefers_requested_season() {
        let (store, team_id) = store_with_team().await;
        store.insert_player(jon(team_id)).await.unwrap();
        let mut second = jon(team_id);
        second.season = 2;
        let second = store.insert_player(second).await.unwrap();

        let found = store
            .find_player_by_name_season("Jon", 2)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, second.id);

        // Cross-season fallback picks the newest season.
        let latest = store.find_player_by_name("Jon").await.unwrap().unwrap();
        assert_eq!(latest.season, 2);

        assert!(
            store
                .find_player_by_name_season("Jon", 3)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn jersey_label_cleared_by_patch() {
        let (store, team_id) = store_with_team().await;
        let row = store.insert_player(jon(team_id)).await.unwrap();

        let patch = PlayerPatch {
            jersey_number: Some(None),
            ..PlayerPatch::default()
        };
        let updated = store.update_player(row.id, 1, &patch).await.unwrap();
        assert_eq!(updated.jersey_number, None);
        assert_eq!(updated.version, 2);
    }

    #[tokio::test]
    async fn soft_delete_requires_matching_version() {
        let (store, team_id) = store_with_team().await;
        let row = store.insert_player(jon(team_id)).await.unwrap();

        let err = store.soft_delete_player(row.id, 5).await.unwrap_err();
        assert!(matches!(err, StorageError::VersionConflict { .. }));

        let gone = store.soft_delete_player(row.id, 1).await.unwrap();
        assert!(!gone.active);
        assert!(store.get_player(row.id, false).await.unwrap().is_none());
    }
}
