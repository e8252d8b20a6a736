//! Question sampler.
//!
//! Draws one or two random eligible species per round and shapes them into
//! a [`Question`] for the round's mode. Set-membership modes additionally
//! load the question's solution set so the evaluator can judge any valid
//! example, not only the sampled one.

use std::collections::BTreeSet;

use pokequiz_types::{
    Ability, AbilitySlot, BaseStats, EggGroups, QuizMode, Species, SpeciesRef, Typing,
};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use tracing::debug;

use crate::modes;
use crate::store::{ReferenceStore, SolutionCriterion, StoreError};

/// Errors that end sampling for a mode.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// The eligible set is empty, or too small for a two-species draw.
    #[error("no eligible data for {mode}")]
    NoEligibleData {
        /// The mode that could not be served.
        mode: QuizMode,
    },

    /// The reference store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A species shown in a weight comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeighIn {
    /// The species.
    pub species: SpeciesRef,
    /// Its weight in kilograms.
    pub weight: Decimal,
}

/// A species shown in an egg-group comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EggCard {
    /// The species.
    pub species: SpeciesRef,
    /// Its egg groups.
    pub groups: EggGroups,
}

/// One sampled question, shaped per mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    /// Which of the two is heavier.
    Weight {
        /// Shown as option `1`.
        first: WeighIn,
        /// Shown as option `2`.
        second: WeighIn,
    },
    /// Name the species with these stats.
    Stats {
        /// The species to name.
        target: SpeciesRef,
        /// Its stats.
        stats: BaseStats,
    },
    /// Name any species with this species-group label.
    SpeciesGroup {
        /// The label shown.
        label: String,
        /// The sampled species.
        anchor: SpeciesRef,
        /// Every species carrying the label.
        solution: Vec<SpeciesRef>,
    },
    /// Do these two share an egg group.
    EggGroup {
        /// First species shown.
        first: EggCard,
        /// Second species shown.
        second: EggCard,
    },
    /// Name the species with this dex number.
    DexNumber {
        /// The species to name.
        target: SpeciesRef,
        /// Its dex number.
        dex_number: i32,
    },
    /// Name any species with this ability.
    Ability {
        /// The ability shown.
        ability: Ability,
        /// Which slot of the sampled species it came from.
        slot: AbilitySlot,
        /// The sampled species.
        anchor: SpeciesRef,
        /// Every species with the ability.
        solution: Vec<SpeciesRef>,
    },
    /// Name any species with this typing.
    Type {
        /// The typing shown.
        typing: Typing,
        /// The sampled species.
        anchor: SpeciesRef,
        /// Every species matching the typing.
        solution: Vec<SpeciesRef>,
    },
}

impl Question {
    /// The mode this question belongs to.
    pub const fn mode(&self) -> QuizMode {
        match self {
            Self::Weight { .. } => QuizMode::Weight,
            Self::Stats { .. } => QuizMode::Stats,
            Self::SpeciesGroup { .. } => QuizMode::SpeciesGroup,
            Self::EggGroup { .. } => QuizMode::EggGroup,
            Self::DexNumber { .. } => QuizMode::DexNumber,
            Self::Ability { .. } => QuizMode::Ability,
            Self::Type { .. } => QuizMode::Type,
        }
    }
}

/// Draw a fresh question for `mode`.
///
/// # Errors
///
/// Returns [`SampleError::NoEligibleData`] when the store cannot supply
/// enough distinct eligible species, and [`SampleError::Store`] when the
/// store itself fails.
pub async fn draw<S, R>(store: &S, mode: QuizMode, rng: &mut R) -> Result<Question, SampleError>
where
    S: ReferenceStore,
    R: Rng + ?Sized,
{
    let descriptor = modes::descriptor(mode);
    let drawn = store
        .sample_species(descriptor.eligibility, descriptor.draw)
        .await?;
    let drawn = distinct_eligible(drawn, descriptor.eligibility);

    if drawn.len() < descriptor.draw {
        debug!(%mode, drawn = drawn.len(), wanted = descriptor.draw, "Not enough eligible species");
        return Err(SampleError::NoEligibleData { mode });
    }

    let mut drawn = drawn.into_iter();
    let no_data = || SampleError::NoEligibleData { mode };

    match mode {
        QuizMode::Weight => {
            let (Some(first), Some(second)) = (drawn.next(), drawn.next()) else {
                return Err(no_data());
            };
            let (Some(first), Some(second)) = (weigh_in(first), weigh_in(second)) else {
                return Err(no_data());
            };
            Ok(Question::Weight { first, second })
        }
        QuizMode::EggGroup => {
            let (Some(first), Some(second)) = (drawn.next(), drawn.next()) else {
                return Err(no_data());
            };
            let (Some(first), Some(second)) = (egg_card(first), egg_card(second)) else {
                return Err(no_data());
            };
            Ok(Question::EggGroup { first, second })
        }
        QuizMode::Stats => {
            let species = drawn.next().ok_or_else(no_data)?;
            let stats = species.stats.ok_or_else(no_data)?;
            Ok(Question::Stats {
                target: species.to_ref(),
                stats,
            })
        }
        QuizMode::DexNumber => {
            let species = drawn.next().ok_or_else(no_data)?;
            let dex_number = species.dex_number.ok_or_else(no_data)?;
            Ok(Question::DexNumber {
                target: species.to_ref(),
                dex_number,
            })
        }
        QuizMode::SpeciesGroup => {
            let species = drawn.next().ok_or_else(no_data)?;
            let anchor = species.to_ref();
            let label = species.species_group.ok_or_else(no_data)?;
            let solution = store
                .solution_set(&SolutionCriterion::SpeciesGroup(label.clone()))
                .await?;
            Ok(Question::SpeciesGroup {
                label,
                solution: with_anchor(solution, &anchor),
                anchor,
            })
        }
        QuizMode::Ability => {
            let species = drawn.next().ok_or_else(no_data)?;
            let anchor = species.to_ref();
            let slots = species.abilities.ok_or_else(no_data)?;
            let (slot, ability) = slots
                .filled()
                .choose(rng)
                .map(|(slot, ability)| (*slot, (*ability).clone()))
                .ok_or_else(no_data)?;
            let solution = store
                .solution_set(&SolutionCriterion::Ability(ability.id))
                .await?;
            Ok(Question::Ability {
                ability,
                slot,
                solution: with_anchor(solution, &anchor),
                anchor,
            })
        }
        QuizMode::Type => {
            let species = drawn.next().ok_or_else(no_data)?;
            let anchor = species.to_ref();
            let typing = species.typing.ok_or_else(no_data)?;
            let criterion = SolutionCriterion::Typing {
                primary: typing.primary.id,
                secondary: typing.secondary.as_ref().map(|t| t.id),
            };
            let solution = store.solution_set(&criterion).await?;
            Ok(Question::Type {
                typing,
                solution: with_anchor(solution, &anchor),
                anchor,
            })
        }
    }
}

/// Drop rows that fail the predicate or repeat an id already drawn.
fn distinct_eligible(
    drawn: Vec<Species>,
    eligibility: crate::store::Eligibility,
) -> Vec<Species> {
    let mut seen = BTreeSet::new();
    drawn
        .into_iter()
        .filter(|species| eligibility.admits(species) && seen.insert(species.id))
        .collect()
}

fn weigh_in(species: Species) -> Option<WeighIn> {
    let weight = species.weight?;
    Some(WeighIn {
        species: SpeciesRef::new(species.id, species.name),
        weight,
    })
}

fn egg_card(species: Species) -> Option<EggCard> {
    let groups = species.egg_groups?;
    Some(EggCard {
        species: SpeciesRef::new(species.id, species.name),
        groups,
    })
}

/// The sampled species always answers its own question.
fn with_anchor(mut solution: Vec<SpeciesRef>, anchor: &SpeciesRef) -> Vec<SpeciesRef> {
    if !solution.iter().any(|member| member.id == anchor.id) {
        solution.push(anchor.clone());
    }
    solution
}
