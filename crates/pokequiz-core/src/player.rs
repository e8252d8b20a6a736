//! The player seam: how the session talks to whoever answers.
//!
//! The session never touches a terminal. It presents questions, asks for a
//! line of input and reports notices and outcomes through [`Player`], so the
//! same loop runs against stdin/stdout in the binary and against a
//! [`ScriptedPlayer`] in tests.

use std::collections::VecDeque;

use pokequiz_types::QuizMode;

use crate::evaluator::Reveal;
use crate::modes::ChoiceSet;
use crate::sampler::Question;

/// Errors raised while talking to the player.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// Reading input or writing output failed.
    #[error("player I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// What kind of line the session is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRequest {
    /// A free-text species name.
    Guess,
    /// One entry of a discrete choice set.
    Choice(ChoiceSet),
    /// Whether to play another round.
    Replay,
}

/// Something the player should be told outside a round's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The mode has nothing to ask; the session ends.
    NoEligibleData {
        /// The mode that could not be served.
        mode: QuizMode,
    },
    /// The reply was not in the choice set; the question is asked again.
    InvalidChoice {
        /// The set the reply should have come from.
        choices: ChoiceSet,
    },
    /// The round was scored but could not be saved.
    NotRecorded {
        /// Why the write failed.
        reason: String,
    },
    /// Reference data could not be read; the session ends.
    StoreUnavailable {
        /// Why the read failed.
        reason: String,
    },
}

/// The result of one round as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// The mode played.
    pub mode: QuizMode,
    /// Whether the reply was accepted.
    pub is_correct: bool,
    /// Points awarded.
    pub score: u32,
    /// The correct answer, or an example of one.
    pub reveal: Reveal,
    /// Whether the round was persisted.
    pub recorded: bool,
}

/// Whoever answers the questions.
pub trait Player {
    /// Show a freshly sampled question.
    fn present(&mut self, question: &Question);

    /// Read one line of input.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError`] when the underlying channel fails.
    fn read_input(&mut self, request: InputRequest) -> Result<Option<String>, PlayerError>;

    /// Show a notice.
    fn notify(&mut self, notice: &Notice);

    /// Show the outcome of a round.
    fn show_outcome(&mut self, outcome: &RoundOutcome);
}

/// A player that replays a fixed list of input lines and keeps a log of
/// everything it was shown.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlayer {
    inputs: VecDeque<String>,
    /// Questions presented, in order.
    pub presented: Vec<Question>,
    /// Input requests made, in order.
    pub requests: Vec<InputRequest>,
    /// Notices shown, in order.
    pub notices: Vec<Notice>,
    /// Outcomes shown, in order.
    pub outcomes: Vec<RoundOutcome>,
}

impl ScriptedPlayer {
    /// Create a player that will answer with `inputs`, one per request.
    pub fn new<I, L>(inputs: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Input lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Player for ScriptedPlayer {
    fn present(&mut self, question: &Question) {
        self.presented.push(question.clone());
    }

    fn read_input(&mut self, request: InputRequest) -> Result<Option<String>, PlayerError> {
        self.requests.push(request);
        Ok(self.inputs.pop_front())
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn show_outcome(&mut self, outcome: &RoundOutcome) {
        self.outcomes.push(outcome.clone());
    }
}
