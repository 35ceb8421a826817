//! Business logic behind the REST routes.

/// OpenAPI documentation aggregation.
pub mod documentation;
/// Game CRUD and completion.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Player CRUD and name resolution.
pub mod player_service;
/// Standings and leaderboard computation.
pub mod report_service;
/// Season rollover operations.
pub mod season_service;
/// Stat-line CRUD, batch queries, and the completed-game rule.
pub mod stats_service;
/// Team CRUD.
pub mod team_service;
