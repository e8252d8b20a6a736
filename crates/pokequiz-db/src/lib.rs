//! `PostgreSQL` data layer for the Pokequiz trivia engine.
//!
//! The reference catalog (species, stats, types, abilities, egg groups) is
//! read-only at runtime. Each answered round is written to its mode's detail
//! table and, for registered modes, to `leaderboard_general` in the same
//! transaction.
//!
//! # Modules
//!
//! - [`postgres`] -- connection pool, configuration and migrations
//! - [`catalog_store`] -- random eligible species, name lookup, solution sets
//! - [`mode_store`] -- the `game_modes` registry
//! - [`round_store`] -- transactional round persistence
//! - [`leaderboard_store`] -- aggregated standings and per-mode round boards
//! - [`quiz_store`] -- the engine-facing [`PgQuizStore`]
//! - [`error`] -- shared error types

pub mod catalog_store;
pub mod error;
pub mod leaderboard_store;
pub mod mode_store;
pub mod postgres;
pub mod quiz_store;
pub mod round_store;

pub use catalog_store::{CatalogStore, SpeciesRefRow, SpeciesRow};
pub use error::DbError;
pub use leaderboard_store::{DEFAULT_STANDINGS_LIMIT, LeaderboardStore, RoundEntryRow, StandingRow};
pub use mode_store::{ModeRow, ModeStore};
pub use postgres::{PostgresConfig, PostgresPool};
pub use quiz_store::PgQuizStore;
pub use round_store::RoundStore;
