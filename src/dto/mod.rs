//! Request/response types for the REST API, separated from the storage rows.

/// Envelope and query-parameter types shared across resources.
pub mod common;
/// Game payloads.
pub mod game;
/// Health payload.
pub mod health;
/// Player payloads.
pub mod player;
/// Standings and leaderboard payloads.
pub mod reports;
/// Season rollover payloads.
pub mod season;
/// Stat-line payloads.
pub mod stats;
/// Team payloads.
pub mod team;
