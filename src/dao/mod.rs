//! Persistence layer: row types, storage errors, and the SQLite-backed store.

/// Database row definitions and partial-update patches.
pub mod models;
/// SQLite store handle and per-entity queries.
pub mod sqlite;
/// Storage error and result types shared by all queries.
pub mod storage;
