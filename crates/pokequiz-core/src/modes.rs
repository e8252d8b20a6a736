//! Mode descriptor table.
//!
//! Every quiz mode runs through the same driver. What differs between
//! modes is captured here as data: which species are eligible, how many are
//! drawn per round, which answer policy judges the reply, and how many
//! points a correct reply earns.

use pokequiz_types::{Pick, QuizMode};

use crate::scoring;
use crate::store::Eligibility;

/// A discrete set of accepted inputs for binary-choice modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceSet {
    /// `1` for the first species, `2` for the second.
    FirstOrSecond,
    /// `yes`/`y` or `no`/`n`.
    YesNo,
}

/// A parsed discrete choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    /// One of the two species shown.
    Pick(Pick),
    /// A yes/no reply.
    YesNo(bool),
}

impl ChoiceSet {
    /// Inputs accepted by this set, for prompts.
    pub const fn valid_inputs(self) -> &'static [&'static str] {
        match self {
            Self::FirstOrSecond => &["1", "2"],
            Self::YesNo => &["yes", "no"],
        }
    }

    /// Parse raw input, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything outside the set so the caller can
    /// re-prompt.
    pub fn parse(self, raw: &str) -> Option<Choice> {
        let input = raw.trim().to_lowercase();
        match (self, input.as_str()) {
            (Self::FirstOrSecond, "1") => Some(Choice::Pick(Pick::First)),
            (Self::FirstOrSecond, "2") => Some(Choice::Pick(Pick::Second)),
            (Self::YesNo, "yes" | "y") => Some(Choice::YesNo(true)),
            (Self::YesNo, "no" | "n") => Some(Choice::YesNo(false)),
            _ => None,
        }
    }
}

/// How a reply is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerPolicy {
    /// Free text that must name the one target species.
    ExactIdentity,
    /// Free text that must name any member of the solution set.
    SetMembership,
    /// A discrete choice compared against precomputed ground truth.
    BinaryChoice(ChoiceSet),
}

/// Everything that distinguishes one quiz mode from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDescriptor {
    /// The mode described.
    pub mode: QuizMode,
    /// Banner shown when the mode starts.
    pub title: &'static str,
    /// Predicate the drawn species must satisfy.
    pub eligibility: Eligibility,
    /// Number of distinct species drawn per round.
    pub draw: usize,
    /// How replies are judged.
    pub policy: AnswerPolicy,
    /// Points for a correct reply.
    pub points: u32,
}

static WEIGHT: ModeDescriptor = ModeDescriptor {
    mode: QuizMode::Weight,
    title: "Which Pokémon weighs more?",
    eligibility: Eligibility::HasWeight,
    draw: 2,
    policy: AnswerPolicy::BinaryChoice(ChoiceSet::FirstOrSecond),
    points: scoring::points(QuizMode::Weight),
};

static STATS: ModeDescriptor = ModeDescriptor {
    mode: QuizMode::Stats,
    title: "Guess the Pokémon from its stats",
    eligibility: Eligibility::HasStats,
    draw: 1,
    policy: AnswerPolicy::ExactIdentity,
    points: scoring::points(QuizMode::Stats),
};

static SPECIES_GROUP: ModeDescriptor = ModeDescriptor {
    mode: QuizMode::SpeciesGroup,
    title: "Guess the Pokémon from its species",
    eligibility: Eligibility::HasSpeciesGroup,
    draw: 1,
    policy: AnswerPolicy::SetMembership,
    points: scoring::points(QuizMode::SpeciesGroup),
};

static EGG_GROUP: ModeDescriptor = ModeDescriptor {
    mode: QuizMode::EggGroup,
    title: "Do these Pokémon share an egg group?",
    eligibility: Eligibility::HasEggGroups,
    draw: 2,
    policy: AnswerPolicy::BinaryChoice(ChoiceSet::YesNo),
    points: scoring::points(QuizMode::EggGroup),
};

static DEX_NUMBER: ModeDescriptor = ModeDescriptor {
    mode: QuizMode::DexNumber,
    title: "Guess the Pokémon from its dex number",
    eligibility: Eligibility::HasDexNumber,
    draw: 1,
    policy: AnswerPolicy::ExactIdentity,
    points: scoring::points(QuizMode::DexNumber),
};

static ABILITY: ModeDescriptor = ModeDescriptor {
    mode: QuizMode::Ability,
    title: "Name a Pokémon with the given ability",
    eligibility: Eligibility::HasAbilities,
    draw: 1,
    policy: AnswerPolicy::SetMembership,
    points: scoring::points(QuizMode::Ability),
};

static TYPE: ModeDescriptor = ModeDescriptor {
    mode: QuizMode::Type,
    title: "Name a Pokémon with the given type(s)",
    eligibility: Eligibility::HasTyping,
    draw: 1,
    policy: AnswerPolicy::SetMembership,
    points: scoring::points(QuizMode::Type),
};

/// The descriptor of `mode`.
pub fn descriptor(mode: QuizMode) -> &'static ModeDescriptor {
    match mode {
        QuizMode::Weight => &WEIGHT,
        QuizMode::Stats => &STATS,
        QuizMode::SpeciesGroup => &SPECIES_GROUP,
        QuizMode::EggGroup => &EGG_GROUP,
        QuizMode::DexNumber => &DEX_NUMBER,
        QuizMode::Ability => &ABILITY,
        QuizMode::Type => &TYPE,
    }
}
