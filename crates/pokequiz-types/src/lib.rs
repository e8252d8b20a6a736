//! Shared type definitions for the Pokequiz trivia engine.
//!
//! This crate is the single source of truth for the types that flow between
//! the quiz engine (`pokequiz-core`), its `PostgreSQL` backend
//! (`pokequiz-db`) and the terminal binary.
//!
//! # Modules
//!
//! - [`ids`] -- Typed wrappers for catalog keys and the session id
//! - [`enums`] -- Quiz modes and small choice enums
//! - [`structs`] -- Reference catalog records and round results

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{AbilitySlot, Pick, QuizMode};
pub use ids::{AbilityId, EggGroupId, ModeId, SessionId, SpeciesId, TypeId, UserId};
pub use structs::{
    Ability, AbilitySlots, BaseStats, EggGroup, EggGroups, GeneralLeaderboardEntry, ModeInfo,
    PokemonType, RoundDetail, RoundEntry, RoundResult, Species, SpeciesRef, Standing, Typing,
};
