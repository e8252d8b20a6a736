//! Collaborator traits the quiz engine reads from and writes to.
//!
//! The engine never talks to a database directly. It asks a
//! [`ReferenceStore`] for random eligible species, solution sets and
//! name lookups, asks a [`ModeRegistry`] whether a mode is registered for
//! the general leaderboard, and hands finished rounds to a [`RoundSink`].
//!
//! `pokequiz-db` implements all three over `PostgreSQL`;
//! [`crate::memory::MemoryStore`] implements them in memory for tests.

use std::future::Future;

use pokequiz_types::{
    AbilityId, ModeId, QuizMode, RoundResult, Species, SpeciesRef, TypeId,
};

/// Errors surfaced by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading reference data failed.
    #[error("reference read failed: {0}")]
    Read(String),

    /// Writing a round failed; nothing from the round was persisted.
    #[error("round write failed: {0}")]
    Write(String),
}

/// Data-completeness predicate a species must satisfy to be drawn for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eligibility {
    /// Has a recorded weight.
    HasWeight,
    /// Has a base stats row.
    HasStats,
    /// Has a non-empty species-group label.
    HasSpeciesGroup,
    /// Has egg-group data.
    HasEggGroups,
    /// Has a dex number.
    HasDexNumber,
    /// Has at least one ability.
    HasAbilities,
    /// Has at least one type.
    HasTyping,
}

impl Eligibility {
    /// Whether `species` satisfies this predicate.
    pub fn admits(self, species: &Species) -> bool {
        match self {
            Self::HasWeight => species.weight.is_some(),
            Self::HasStats => species.stats.is_some(),
            Self::HasSpeciesGroup => species
                .species_group
                .as_deref()
                .is_some_and(|label| !label.trim().is_empty()),
            Self::HasEggGroups => species.egg_groups.is_some(),
            Self::HasDexNumber => species.dex_number.is_some(),
            Self::HasAbilities => species.abilities.is_some(),
            Self::HasTyping => species.typing.is_some(),
        }
    }
}

/// What defines the solution set of a set-membership question.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SolutionCriterion {
    /// Species whose group label matches, case-insensitively.
    SpeciesGroup(String),
    /// Species carrying the ability in any slot.
    Ability(AbilityId),
    /// Species matching the typing.
    ///
    /// With a second type, both types must be present in either slot order.
    /// Without one, the type may sit in either slot.
    Typing {
        /// First type of the question.
        primary: TypeId,
        /// Second type of the question, if any.
        secondary: Option<TypeId>,
    },
}

/// Acknowledgement of a recorded round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordAck {
    /// Whether a general leaderboard row was written alongside the detail row.
    pub general_written: bool,
}

/// Read-only access to the species reference catalog.
pub trait ReferenceStore {
    /// Draw up to `count` distinct random species satisfying `eligibility`.
    ///
    /// Sampling is with replacement across calls; only the species within a
    /// single draw are distinct. Returns fewer rows when the eligible set is
    /// smaller than `count`.
    fn sample_species(
        &self,
        eligibility: Eligibility,
        count: usize,
    ) -> impl Future<Output = Result<Vec<Species>, StoreError>> + Send;

    /// Look a species up by name, ignoring case and surrounding whitespace.
    fn find_species_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<SpeciesRef>, StoreError>> + Send;

    /// Every species that answers a set-membership question correctly.
    fn solution_set(
        &self,
        criterion: &SolutionCriterion,
    ) -> impl Future<Output = Result<Vec<SpeciesRef>, StoreError>> + Send;
}

/// The static catalog of registered quiz modes.
pub trait ModeRegistry {
    /// The registered id of `mode`, or `None` when the mode is unregistered.
    fn mode_id(
        &self,
        mode: QuizMode,
    ) -> impl Future<Output = Result<Option<ModeId>, StoreError>> + Send;
}

/// Durable destination of finished rounds.
pub trait RoundSink {
    /// Persist one round.
    ///
    /// Writes the mode-specific detail row and, when `mode_id` is present,
    /// the general leaderboard row. Both writes form one failure-atomic unit:
    /// on error neither is visible.
    fn record_round(
        &self,
        result: &RoundResult,
        mode_id: Option<ModeId>,
    ) -> impl Future<Output = Result<RecordAck, StoreError>> + Send;
}

#[cfg(test)]
mod tests {
    use pokequiz_types::SpeciesId;

    use super::*;

    #[test]
    fn blank_species_group_is_not_eligible() {
        let mut species = Species::bare(SpeciesId(1), "Bulbasaur");
        assert!(!Eligibility::HasSpeciesGroup.admits(&species));

        species.species_group = Some("   ".to_owned());
        assert!(!Eligibility::HasSpeciesGroup.admits(&species));

        species.species_group = Some("Seed Pokémon".to_owned());
        assert!(Eligibility::HasSpeciesGroup.admits(&species));
    }

    #[test]
    fn bare_species_only_misses_data_predicates() {
        let species = Species::bare(SpeciesId(1), "Bulbasaur");
        for eligibility in [
            Eligibility::HasWeight,
            Eligibility::HasStats,
            Eligibility::HasEggGroups,
            Eligibility::HasDexNumber,
            Eligibility::HasAbilities,
            Eligibility::HasTyping,
        ] {
            assert!(!eligibility.admits(&species), "{eligibility:?}");
        }
    }
}
