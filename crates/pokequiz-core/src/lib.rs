//! Quiz round engine for the Pokequiz trivia game.
//!
//! One round is: sample a question, read the player's answer, judge it,
//! score it and record it. [`session::QuizSession`] drives those rounds for
//! one mode until the player stops. Everything that differs between the
//! seven modes lives in the [`modes`] descriptor table.
//!
//! # Modules
//!
//! - [`store`] -- Collaborator traits for reference reads and round writes.
//! - [`modes`] -- Per-mode descriptor table and discrete choice parsing.
//! - [`sampler`] -- Random eligible question draws.
//! - [`evaluator`] -- Answer judging and free-text guess resolution.
//! - [`scoring`] -- Fixed point table.
//! - [`recorder`] -- Failure-atomic round persistence.
//! - [`player`] -- [`Player`] trait and [`ScriptedPlayer`].
//! - [`session`] -- The quiz loop state machine.
//! - [`config`] -- Configuration loading from `pokequiz-config.yaml`.
//! - [`memory`] -- In-memory store used by tests.
//!
//! [`Player`]: player::Player
//! [`ScriptedPlayer`]: player::ScriptedPlayer

pub mod config;
pub mod evaluator;
pub mod memory;
pub mod modes;
pub mod player;
pub mod recorder;
pub mod sampler;
pub mod scoring;
pub mod session;
pub mod store;

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod fixtures;
