//! Route trees per resource, composed into the application router.

use axum::Router;

use crate::state::SharedState;

/// Swagger UI routes.
pub mod docs;
/// Game routes.
pub mod games;
/// Health route.
pub mod health;
/// Player routes.
pub mod players;
/// Standings and leaderboard routes.
pub mod reports;
/// Season rollover routes.
pub mod seasons;
/// Stat-line routes.
pub mod stats;
/// Team routes.
pub mod teams;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(teams::router())
        .merge(players::router())
        .merge(games::router())
        .merge(stats::router())
        .merge(seasons::router())
        .merge(reports::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
