//! Shared application state: the store handle, runtime configuration, and the
//! report caches, constructed once in `main` and passed to every handler.

/// TTL cache for report responses.
pub mod cache;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    dao::sqlite::LeagueStore,
    dto::reports::{LeaderboardReport, LeaderboardScope, StandingsGroup},
    state::cache::TtlCache,
};

/// Cheaply clonable handle to [`AppState`].
pub type SharedState = Arc<AppState>;

/// Cache key for a standings query.
pub type StandingsKey = (Option<i64>, Option<String>);
/// Cache key for a leaderboard query.
pub type LeaderboardKey = (i64, LeaderboardScope);

/// Central application state carrying the database handle and caches.
pub struct AppState {
    store: LeagueStore,
    config: AppConfig,
    standings_cache: TtlCache<StandingsKey, Vec<StandingsGroup>>,
    leaderboard_cache: TtlCache<LeaderboardKey, LeaderboardReport>,
}

impl AppState {
    /// Construct the shared state around an already-connected store.
    pub fn new(store: LeagueStore, config: AppConfig) -> SharedState {
        let ttl = config.report_cache_ttl();
        Arc::new(Self {
            store,
            config,
            standings_cache: TtlCache::new(ttl),
            leaderboard_cache: TtlCache::new(ttl),
        })
    }

    /// Borrow the store handle.
    pub fn store(&self) -> &LeagueStore {
        &self.store
    }

    /// Borrow the runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Borrow the standings cache.
    pub fn standings_cache(&self) -> &TtlCache<StandingsKey, Vec<StandingsGroup>> {
        &self.standings_cache
    }

    /// Borrow the leaderboard cache.
    pub fn leaderboard_cache(&self) -> &TtlCache<LeaderboardKey, LeaderboardReport> {
        &self.leaderboard_cache
    }

    /// Drop cached standings after a team mutation.
    pub async fn invalidate_standings(&self) {
        self.standings_cache.clear().await;
    }

    /// Drop every cached report after a game, stat, or season mutation.
    pub async fn invalidate_reports(&self) {
        self.standings_cache.clear().await;
        self.leaderboard_cache.clear().await;
    }
}
