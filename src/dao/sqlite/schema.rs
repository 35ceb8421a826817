//! Schema setup. Deliberately drop/create only — there is no migration
//! machinery in this system.

use tracing::info;

use super::LeagueStore;
use crate::dao::storage::{StorageError, StorageResult};

const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS teams (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        season INTEGER NOT NULL,
        league TEXT NOT NULL,
        wins INTEGER NOT NULL DEFAULT 0,
        losses INTEGER NOT NULL DEFAULT 0,
        ties INTEGER NOT NULL DEFAULT 0,
        version INTEGER NOT NULL DEFAULT 1,
        active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT,
        UNIQUE (name, season, league)
    )",
    "CREATE TABLE IF NOT EXISTS players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        season INTEGER NOT NULL,
        team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
        jersey_number TEXT,
        version INTEGER NOT NULL DEFAULT 1,
        active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT
    )",
    "CREATE TABLE IF NOT EXISTS games (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        week INTEGER NOT NULL,
        league TEXT NOT NULL,
        season INTEGER NOT NULL,
        team1_id INTEGER REFERENCES teams(id) ON DELETE SET NULL,
        team1_score INTEGER NOT NULL DEFAULT 0,
        team2_id INTEGER REFERENCES teams(id) ON DELETE SET NULL,
        team2_score INTEGER NOT NULL DEFAULT 0,
        winning_team_id INTEGER REFERENCES teams(id) ON DELETE SET NULL,
        completed INTEGER NOT NULL DEFAULT 0,
        version INTEGER NOT NULL DEFAULT 1,
        active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT
    )",
    "CREATE TABLE IF NOT EXISTS player_stats (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        player_id INTEGER NOT NULL REFERENCES players(id) ON DELETE CASCADE,
        game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
        passing_tds INTEGER NOT NULL DEFAULT 0,
        passes_completed INTEGER NOT NULL DEFAULT 0,
        passes_attempted INTEGER NOT NULL DEFAULT 0,
        interceptions_thrown INTEGER NOT NULL DEFAULT 0,
        qb_rushing_tds INTEGER NOT NULL DEFAULT 0,
        receptions INTEGER NOT NULL DEFAULT 0,
        targets INTEGER NOT NULL DEFAULT 0,
        receiving_tds INTEGER NOT NULL DEFAULT 0,
        drops INTEGER NOT NULL DEFAULT 0,
        first_downs INTEGER NOT NULL DEFAULT 0,
        rushing_tds INTEGER NOT NULL DEFAULT 0,
        rush_attempts INTEGER NOT NULL DEFAULT 0,
        flag_pulls INTEGER NOT NULL DEFAULT 0,
        interceptions INTEGER NOT NULL DEFAULT 0,
        sacks INTEGER NOT NULL DEFAULT 0,
        pass_breakups INTEGER NOT NULL DEFAULT 0,
        def_td INTEGER NOT NULL DEFAULT 0,
        version INTEGER NOT NULL DEFAULT 1,
        active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT
    )",
];

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS ix_teams_name ON teams (name)",
    "CREATE INDEX IF NOT EXISTS ix_teams_season ON teams (season)",
    "CREATE INDEX IF NOT EXISTS ix_players_name ON players (name)",
    "CREATE INDEX IF NOT EXISTS ix_players_team ON players (team_id)",
    "CREATE INDEX IF NOT EXISTS ix_players_season ON players (season)",
    "CREATE INDEX IF NOT EXISTS ix_games_season ON games (season)",
    "CREATE INDEX IF NOT EXISTS ix_player_stats_player ON player_stats (player_id)",
    "CREATE INDEX IF NOT EXISTS ix_player_stats_game ON player_stats (game_id)",
];

// Reverse dependency order so foreign keys never dangle mid-drop.
const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS player_stats",
    "DROP TABLE IF EXISTS players",
    "DROP TABLE IF EXISTS games",
    "DROP TABLE IF EXISTS teams",
];

/// Create any missing tables and indexes.
pub async fn ensure_schema(store: &LeagueStore) -> StorageResult<()> {
    for statement in CREATE_TABLES.iter().chain(CREATE_INDEXES) {
        sqlx::query(statement)
            .execute(store.pool())
            .await
            .map_err(|err| StorageError::backend("creating schema", err))?;
    }
    Ok(())
}

/// Drop all four tables and recreate them empty.
pub async fn recreate_schema(store: &LeagueStore) -> StorageResult<()> {
    for statement in DROP_TABLES {
        sqlx::query(statement)
            .execute(store.pool())
            .await
            .map_err(|err| StorageError::backend("dropping schema", err))?;
    }
    info!("dropped existing tables");
    ensure_schema(store).await
}
