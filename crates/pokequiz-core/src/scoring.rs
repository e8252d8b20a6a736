//! Fixed point table per quiz mode.
//!
//! Scoring is a lookup, not a formula: a correct answer earns the mode's
//! fixed value and a wrong answer earns nothing. There is no partial credit,
//! streak bonus or time decay.

use pokequiz_types::QuizMode;

/// Points a correct answer earns in `mode`.
pub const fn points(mode: QuizMode) -> u32 {
    match mode {
        QuizMode::Weight | QuizMode::EggGroup => 100,
        QuizMode::SpeciesGroup => 200,
        QuizMode::Ability => 250,
        QuizMode::DexNumber | QuizMode::Type => 300,
        QuizMode::Stats => 600,
    }
}

/// Score of one round.
pub const fn score(mode: QuizMode, is_correct: bool) -> u32 {
    if is_correct { points(mode) } else { 0 }
}
