//! Enumeration types for the quiz engine.

use serde::{Deserialize, Serialize};

/// One distinct quiz variant.
///
/// The string returned by [`QuizMode::tag`] is the `mode_name` stored in the
/// `game_modes` catalog and is how a mode is looked up for the general
/// leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    /// Pick the heavier of two species.
    Weight,
    /// Name the species from its base stats.
    Stats,
    /// Name any species sharing the shown species label.
    SpeciesGroup,
    /// Decide whether two species share an egg group.
    EggGroup,
    /// Name the species with the shown dex number.
    DexNumber,
    /// Name any species that can have the shown ability.
    Ability,
    /// Name any species with the shown typing.
    Type,
}

impl QuizMode {
    /// Every mode, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Stats,
        Self::Weight,
        Self::SpeciesGroup,
        Self::EggGroup,
        Self::DexNumber,
        Self::Ability,
        Self::Type,
    ];

    /// The catalog tag for this mode.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Weight => "guess_weight",
            Self::Stats => "guess_stats",
            Self::SpeciesGroup => "guess_species",
            Self::EggGroup => "guess_egg_group",
            Self::DexNumber => "guess_dexnum",
            Self::Ability => "guess_ability",
            Self::Type => "guess_type",
        }
    }

    /// Look a mode up by its catalog tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.tag() == tag)
    }
}

impl core::fmt::Display for QuizMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which of two sampled species the player picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pick {
    /// The first species shown (input `1`).
    First,
    /// The second species shown (input `2`).
    Second,
}

/// Where the ability in an ability question came from on the sampled species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilitySlot {
    /// The always-present primary ability.
    Primary,
    /// The optional secondary ability.
    Secondary,
    /// The optional hidden ability.
    Hidden,
}
