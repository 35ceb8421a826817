//! Team queries, including the optimistic-concurrency gate for updates and
//! soft-deletes and the bulk season operations.

use super::{LeagueStore, ListFilter, now};
use crate::dao::{
    models::{NewTeam, TeamPatch, TeamRow},
    storage::{StorageError, StorageResult, map_insert_error},
};

const TEAM_COLUMNS: &str = "id, name, season, league, wins, losses, ties, \
     version, active, created_at, updated_at, deleted_at";

impl LeagueStore {
    /// Insert a team; `(name, season, league)` duplicates surface as
    /// [`StorageError::Duplicate`].
    pub async fn insert_team(&self, new: NewTeam) -> StorageResult<TeamRow> {
        let created = now();
        let result = sqlx::query(
            "INSERT INTO teams (name, season, league, wins, losses, ties, active, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        )
        .bind(&new.name)
        .bind(new.season)
        .bind(&new.league)
        .bind(new.wins)
        .bind(new.losses)
        .bind(new.ties)
        .bind(new.active)
        .bind(created)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            map_insert_error(
                err,
                format!(
                    "Team {} already exists in season {} of league {}",
                    new.name, new.season, new.league
                ),
            )
        })?;

        let id = result.last_insert_rowid();
        let row = self
            .get_team(id, true)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Team {id} not found")))?;
        Ok(row)
    }

    /// Page through teams in insertion order.
    pub async fn list_teams(&self, filter: ListFilter) -> StorageResult<Vec<TeamRow>> {
        let sql = if filter.include_inactive {
            format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY id LIMIT ?1 OFFSET ?2")
        } else {
            format!(
                "SELECT {TEAM_COLUMNS} FROM teams WHERE active = 1 ORDER BY id LIMIT ?1 OFFSET ?2"
            )
        };
        let rows = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Fetch one team by id.
    pub async fn get_team(&self, id: i64, include_inactive: bool) -> StorageResult<Option<TeamRow>> {
        let sql = if include_inactive {
            format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1")
        } else {
            format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1 AND active = 1")
        };
        let row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Find the active team with this name in a season. Name references from
    /// the API resolve through here.
    pub async fn find_team_by_name(
        &self,
        name: &str,
        season: i64,
    ) -> StorageResult<Option<TeamRow>> {
        let sql = format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE name = ?1 AND season = ?2 AND active = 1"
        );
        let row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(name)
            .bind(season)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Every team of a season, regardless of visibility unless `active_only`.
    pub async fn list_teams_in_season(
        &self,
        season: i64,
        active_only: bool,
    ) -> StorageResult<Vec<TeamRow>> {
        let sql = if active_only {
            format!(
                "SELECT {TEAM_COLUMNS} FROM teams WHERE season = ?1 AND active = 1 ORDER BY id"
            )
        } else {
            format!("SELECT {TEAM_COLUMNS} FROM teams WHERE season = ?1 ORDER BY id")
        };
        let rows = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(season)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// All active teams, optionally narrowed by season and league, for the
    /// standings computation.
    pub async fn list_active_teams(
        &self,
        season: Option<i64>,
        league: Option<&str>,
    ) -> StorageResult<Vec<TeamRow>> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE active = 1"
        ));
        if let Some(season) = season {
            builder.push(" AND season = ").push_bind(season);
        }
        if let Some(league) = league {
            builder.push(" AND league = ").push_bind(league);
        }
        builder.push(" ORDER BY id");
        let rows = builder
            .build_query_as::<TeamRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Version-gated partial update. The whole load-check-write sequence runs
    /// in one transaction so concurrent writers cannot both pass the check.
    pub async fn update_team(
        &self,
        id: i64,
        expected_version: i64,
        patch: &TeamPatch,
    ) -> StorageResult<TeamRow> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1 AND active = 1");
        let mut row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Team {id} not found")))?;

        if row.version != expected_version {
            return Err(StorageError::VersionConflict {
                expected: expected_version,
                actual: row.version,
            });
        }

        patch.apply(&mut row);
        let updated = now();
        sqlx::query(
            "UPDATE teams SET name = ?1, season = ?2, league = ?3, wins = ?4, losses = ?5, \
             ties = ?6, active = ?7, version = version + 1, updated_at = ?8 \
             WHERE id = ?9 AND version = ?10",
        )
        .bind(&row.name)
        .bind(row.season)
        .bind(&row.league)
        .bind(row.wins)
        .bind(row.losses)
        .bind(row.ties)
        .bind(row.active)
        .bind(updated)
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            map_insert_error(
                err,
                format!(
                    "Team {} already exists in season {} of league {}",
                    row.name, row.season, row.league
                ),
            )
        })?;

        tx.commit().await?;
        row.version += 1;
        row.updated_at = updated;
        Ok(row)
    }

    /// Version-gated soft delete: flips the flag, stamps `deleted_at`, bumps
    /// the version.
    pub async fn soft_delete_team(&self, id: i64, expected_version: i64) -> StorageResult<TeamRow> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1 AND active = 1");
        let mut row = sqlx::query_as::<_, TeamRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Team {id} not found")))?;

        if row.version != expected_version {
            return Err(StorageError::VersionConflict {
                expected: expected_version,
                actual: row.version,
            });
        }

        let deleted = now();
        sqlx::query(
            "UPDATE teams SET active = 0, deleted_at = ?1, version = version + 1, updated_at = ?1 \
             WHERE id = ?2 AND version = ?3",
        )
        .bind(deleted)
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        row.active = false;
        row.deleted_at = Some(deleted);
        row.updated_at = deleted;
        row.version += 1;
        Ok(row)
    }

    /// Deactivate every active team in the season; returns the rows touched.
    /// Naturally idempotent.
    pub async fn deactivate_teams_in_season(&self, season: i64) -> StorageResult<u64> {
        let updated = now();
        let result = sqlx::query(
            "UPDATE teams SET active = 0, version = version + 1, updated_at = ?1 \
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
    use crate::dao::sqlite::schema::ensure_schema;

    async fn store() -> LeagueStore {
        let store = LeagueStore::connect("sqlite::memory:").await.unwrap();
        ensure_schema(&store).await.unwrap();
        store
    }

    fn eagles() -> NewTeam {
        NewTeam {
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
    async fn insert_starts_at_version_one() {
        let store = store().await;
        let row = store.insert_team(eagles()).await.unwrap();
        assert_eq!(row.version, 1);
        assert!(row.active);
        assert_eq!(row.wins, 0);
    }

    #[tokio::test]
    async fn duplicate_franchise_is_rejected() {
        let store = store().await;
        store.insert_team(eagles()).await.unwrap();
        let err = store.insert_team(eagles()).await.unwrap_err();
        assert!(matches!(err, StorageError::Duplicate(_)));

        // Same name in another season is fine.
        let mut next = eagles();
        next.season = 2;
        store.insert_team(next).await.unwrap();
    }

    #[tokio::test]
    async fn stale_version_is_rejected_without_mutation() {
        let store = store().await;
        let row = store.insert_team(eagles()).await.unwrap();

        let patch = TeamPatch {
            wins: Some(5),
            ..TeamPatch::default()
        };
        let err = store.update_team(row.id, 99, &patch).await.unwrap_err();
        assert!(matches!(err, StorageError::VersionConflict { actual: 1, .. }));

        let unchanged = store.get_team(row.id, false).await.unwrap().unwrap();
        assert_eq!(unchanged.wins, 0);
        assert_eq!(unchanged.version, 1);
    }

    #[tokio::test]
    async fn update_bumps_version_by_one() {
        let store = store().await;
        let row = store.insert_team(eagles()).await.unwrap();

        let patch = TeamPatch {
            wins: Some(3),
            ties: Some(1),
            ..TeamPatch::default()
        };
        let updated = store.update_team(row.id, 1, &patch).await.unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(updated.wins, 3);
        assert_eq!(updated.ties, 1);
        assert_eq!(updated.losses, 0);
    }

    #[tokio::test]
    async fn soft_delete_hides_row_from_default_reads() {
        let store = store().await;
        let row = store.insert_team(eagles()).await.unwrap();

        let deleted = store.soft_delete_team(row.id, 1).await.unwrap();
        assert!(!deleted.active);
        assert_eq!(deleted.version, 2);
        assert!(deleted.deleted_at.is_some());

        assert!(store.get_team(row.id, false).await.unwrap().is_none());
        assert!(store.get_team(row.id, true).await.unwrap().is_some());

        let filter = ListFilter {
            skip: 0,
            limit: 10,
            include_inactive: false,
        };
        assert!(store.list_teams(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deactivation_is_idempotent() {
        let store = store().await;
        store.insert_team(eagles()).await.unwrap();
        let mut hawks = eagles();
        hawks.name = "Hawks".into();
        store.insert_team(hawks).await.unwrap();

        assert_eq!(store.deactivate_teams_in_season(1).await.unwrap(), 2);
        assert_eq!(store.deactivate_teams_in_season(1).await.unwrap(), 0);
    }
}
