//! Reference catalog records and round result types.
//!
//! The catalog side ([`Species`] and its attached [`BaseStats`], [`Typing`],
//! [`AbilitySlots`] and [`EggGroups`]) is read-only from the engine's point of
//! view. The result side ([`RoundResult`], [`RoundDetail`],
//! [`GeneralLeaderboardEntry`]) is produced once per round and written once.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{AbilitySlot, QuizMode};
use crate::ids::{AbilityId, EggGroupId, ModeId, SpeciesId, TypeId, UserId};

// ---------------------------------------------------------------------------
// Reference catalog
// ---------------------------------------------------------------------------

/// The minimal view of a species: its id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeciesRef {
    /// Catalog id.
    pub id: SpeciesId,
    /// Display name, unique case-insensitively.
    pub name: String,
}

impl SpeciesRef {
    /// Build a reference from an id and a name.
    pub fn new(id: SpeciesId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Six base stats plus their precomputed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    /// Hit points.
    pub hp: i32,
    /// Physical attack.
    pub attack: i32,
    /// Physical defense.
    pub defense: i32,
    /// Special attack.
    pub sp_atk: i32,
    /// Special defense.
    pub sp_def: i32,
    /// Speed.
    pub speed: i32,
    /// Sum of the six stats as stored in the catalog.
    pub total: i32,
}

/// An elemental type label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokemonType {
    /// Catalog id.
    pub id: TypeId,
    /// Display name.
    pub name: String,
}

/// One or two type labels of a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typing {
    /// Slot 1, always present.
    pub primary: PokemonType,
    /// Slot 2, absent for single-typed species.
    pub secondary: Option<PokemonType>,
}

/// An ability label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ability {
    /// Catalog id.
    pub id: AbilityId,
    /// Display name.
    pub name: String,
}

/// Up to three ability slots of a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlots {
    /// Primary ability, always present.
    pub primary: Ability,
    /// Optional secondary ability.
    pub secondary: Option<Ability>,
    /// Optional hidden ability.
    pub hidden: Option<Ability>,
}

impl AbilitySlots {
    /// The filled slots in slot order.
    pub fn filled(&self) -> Vec<(AbilitySlot, &Ability)> {
        let mut slots = vec![(AbilitySlot::Primary, &self.primary)];
        if let Some(ref secondary) = self.secondary {
            slots.push((AbilitySlot::Secondary, secondary));
        }
        if let Some(ref hidden) = self.hidden {
            slots.push((AbilitySlot::Hidden, hidden));
        }
        slots
    }
}

/// An egg group label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EggGroup {
    /// Catalog id.
    pub id: EggGroupId,
    /// Display name.
    pub name: String,
}

/// One or two egg groups of a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggGroups {
    /// First group, always present.
    pub first: EggGroup,
    /// Optional second group.
    pub second: Option<EggGroup>,
}

impl EggGroups {
    /// Ids of the groups this species belongs to.
    pub fn ids(&self) -> Vec<EggGroupId> {
        let mut ids = vec![self.first.id];
        if let Some(ref second) = self.second {
            ids.push(second.id);
        }
        ids
    }

    /// Whether the two group sets intersect.
    pub fn shares_with(&self, other: &Self) -> bool {
        let theirs = other.ids();
        self.ids().iter().any(|id| theirs.contains(id))
    }
}

/// A species with every piece of reference data the quiz modes draw on.
///
/// Everything beyond id and name is optional because the catalog is
/// incomplete for some species; each mode's eligibility predicate decides
/// which of these must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    /// Catalog id.
    pub id: SpeciesId,
    /// Display name.
    pub name: String,
    /// Species-group label such as "Seed Pokémon".
    pub species_group: Option<String>,
    /// Weight in kilograms.
    pub weight: Option<Decimal>,
    /// National dex number.
    pub dex_number: Option<i32>,
    /// Base stats row.
    pub stats: Option<BaseStats>,
    /// Type slots.
    pub typing: Option<Typing>,
    /// Ability slots.
    pub abilities: Option<AbilitySlots>,
    /// Egg groups.
    pub egg_groups: Option<EggGroups>,
}

impl Species {
    /// A species with only an id and a name.
    pub fn bare(id: SpeciesId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            species_group: None,
            weight: None,
            dex_number: None,
            stats: None,
            typing: None,
            abilities: None,
            egg_groups: None,
        }
    }

    /// The id/name view of this species.
    pub fn to_ref(&self) -> SpeciesRef {
        SpeciesRef::new(self.id, self.name.clone())
    }
}

/// A registered quiz mode as listed in the `game_modes` catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeInfo {
    /// Catalog id.
    pub id: ModeId,
    /// Catalog tag.
    pub name: String,
    /// Human-readable description.
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Round results
// ---------------------------------------------------------------------------

/// Mode-specific fields of one round, one variant per detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoundDetail {
    /// Heavier-of-two round.
    Weight {
        /// First species shown.
        pokemon1: SpeciesId,
        /// Second species shown.
        pokemon2: SpeciesId,
        /// The species the player picked.
        user_choice: SpeciesId,
        /// The species counted as heavier.
        correct_pokemon: SpeciesId,
    },
    /// Guess-from-stats round.
    Stats {
        /// The species whose stats were shown.
        pokemon: SpeciesId,
        /// The resolved guess.
        guessed_pokemon: SpeciesId,
    },
    /// Species-group round.
    SpeciesGroup {
        /// The label shown to the player.
        given_species: String,
        /// The resolved guess.
        guessed_pokemon: SpeciesId,
    },
    /// Shared-egg-group round.
    EggGroup {
        /// First species shown.
        pokemon1: SpeciesId,
        /// Second species shown.
        pokemon2: SpeciesId,
        /// Whether the two actually share a group.
        share_egg_group: bool,
        /// What the player answered.
        user_answer: bool,
    },
    /// Dex-number round.
    DexNumber {
        /// The dex number shown.
        shown_dex: i32,
        /// The resolved guess.
        user_choice: SpeciesId,
        /// The species with that dex number.
        correct_pokemon: SpeciesId,
    },
    /// Ability round.
    Ability {
        /// The ability shown.
        ability: AbilityId,
        /// The resolved guess.
        guessed_pokemon: SpeciesId,
    },
    /// Typing round.
    Type {
        /// First type shown.
        type1: TypeId,
        /// Second type shown, if the question was dual-typed.
        type2: Option<TypeId>,
        /// The resolved guess.
        guessed_pokemon: SpeciesId,
    },
}

impl RoundDetail {
    /// The mode this detail row belongs to.
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

/// The outcome of one completed round, written once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// The player who answered.
    pub user_id: UserId,
    /// Mode-specific fields.
    pub detail: RoundDetail,
    /// Whether the answer was accepted.
    pub is_correct: bool,
    /// Points awarded.
    pub score: u32,
    /// When the round was scored.
    pub played_at: DateTime<Utc>,
}

impl RoundResult {
    /// The mode of this round.
    pub const fn mode(&self) -> QuizMode {
        self.detail.mode()
    }

    /// Project this round onto the general leaderboard.
    pub const fn general_entry(&self, mode_id: ModeId) -> GeneralLeaderboardEntry {
        GeneralLeaderboardEntry {
            user_id: self.user_id,
            mode_id,
            score: self.score,
            correct: if self.is_correct { 1 } else { 0 },
            incorrect: if self.is_correct { 0 } else { 1 },
        }
    }
}

/// Denormalized cross-mode projection of a [`RoundResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralLeaderboardEntry {
    /// The player.
    pub user_id: UserId,
    /// Registered mode id.
    pub mode_id: ModeId,
    /// Points awarded.
    pub score: u32,
    /// 1 when the round was won.
    pub correct: u8,
    /// 1 when the round was lost.
    pub incorrect: u8,
}

/// One aggregated leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// The player.
    pub user_id: UserId,
    /// Player display name.
    pub username: String,
    /// Rounds played.
    pub rounds: i64,
    /// Sum of scores.
    pub total_score: i64,
    /// Rounds won.
    pub correct: i64,
    /// Rounds lost.
    pub incorrect: i64,
}

/// One round as listed on its mode's own leaderboard.
///
/// `question` and `guess` are already rendered to display names, so a row
/// reads the same whatever mode produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEntry {
    /// Detail row id.
    pub entry_id: i64,
    /// Player display name.
    pub username: String,
    /// What was asked.
    pub question: String,
    /// What the player answered.
    pub guess: String,
    /// Whether the answer was accepted.
    pub is_correct: bool,
    /// Points awarded.
    pub score: i32,
    /// When the round was recorded.
    pub played_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn egg(id: i32, name: &str) -> EggGroup {
        EggGroup {
            id: EggGroupId(id),
            name: name.to_owned(),
        }
    }

    #[test]
    fn egg_groups_intersect_on_either_slot() {
        let monster_grass = EggGroups {
            first: egg(1, "Monster"),
            second: Some(egg(2, "Grass")),
        };
        let grass_only = EggGroups {
            first: egg(2, "Grass"),
            second: None,
        };
        let field = EggGroups {
            first: egg(5, "Field"),
            second: None,
        };
        assert!(monster_grass.shares_with(&grass_only));
        assert!(grass_only.shares_with(&monster_grass));
        assert!(!field.shares_with(&monster_grass));
    }

    #[test]
    fn filled_ability_slots_skip_empty_ones() {
        let slots = AbilitySlots {
            primary: Ability {
                id: AbilityId(1),
                name: "Overgrow".to_owned(),
            },
            secondary: None,
            hidden: Some(Ability {
                id: AbilityId(2),
                name: "Chlorophyll".to_owned(),
            }),
        };
        let filled = slots.filled();
        assert_eq!(filled.len(), 2);
        assert_eq!(filled.last().map(|(slot, _)| *slot), Some(AbilitySlot::Hidden));
    }

    #[test]
    fn general_entry_counts_one_side() {
        let result = RoundResult {
            user_id: UserId(4),
            detail: RoundDetail::Stats {
                pokemon: SpeciesId(25),
                guessed_pokemon: SpeciesId(26),
            },
            is_correct: false,
            score: 0,
            played_at: Utc::now(),
        };
        let entry = result.general_entry(ModeId(2));
        assert_eq!(entry.correct, 0);
        assert_eq!(entry.incorrect, 1);
        assert_eq!(entry.mode_id, ModeId(2));
        assert_eq!(result.mode(), QuizMode::Stats);
    }
}
