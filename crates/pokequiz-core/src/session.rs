//! Quiz loop driver.
//!
//! [`QuizSession::play`] runs repeated rounds of one mode for one player
//! until the player stops, the mode runs out of eligible data, reference
//! data cannot be read, or input is exhausted. Each round moves through
//! sampling, answering, scoring and recording before the player is asked
//! whether to continue.
//!
//! No failure inside a session escapes it. A failed write is reported to the
//! player and the loop carries on; everything else ends the session with a
//! [`SessionEnd`] describing why.

use chrono::Utc;
use pokequiz_types::{QuizMode, RoundResult, SessionId, UserId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::evaluator::{self, Answer, Reveal};
use crate::modes::{self, AnswerPolicy, Choice};
use crate::player::{InputRequest, Notice, Player, PlayerError, RoundOutcome};
use crate::recorder;
use crate::sampler::{self, Question, SampleError};
use crate::scoring;
use crate::store::{ModeRegistry, ReferenceStore, RoundSink};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player declined another round.
    PlayerQuit,
    /// The mode had nothing to ask.
    NoEligibleData,
    /// Reference data could not be read.
    StoreUnavailable,
    /// Input ran out or could not be read.
    InputClosed,
}

/// Totals for one finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Correlates the session's log lines.
    pub session_id: SessionId,
    /// The mode played.
    pub mode: QuizMode,
    /// Rounds scored.
    pub rounds: u32,
    /// Rounds answered correctly.
    pub correct: u32,
    /// Points earned.
    pub points: u64,
    /// Rounds scored but not persisted.
    pub unrecorded: u32,
    /// Why the session stopped.
    pub end: SessionEnd,
}

/// A scored round on its way to the sink.
#[derive(Debug)]
struct ScoredRound {
    result: RoundResult,
    reveal: Reveal,
}

#[derive(Debug)]
enum Phase {
    Sampling,
    AwaitingAnswer(Box<Question>),
    Scoring(Box<Question>, Answer),
    Recording(Box<ScoredRound>),
    AskReplay,
    Done(SessionEnd),
}

/// One player's run through a single quiz mode.
pub struct QuizSession<'a, S, R = StdRng> {
    store: &'a S,
    player: &'a mut dyn Player,
    user_id: UserId,
    rng: R,
}

impl<'a, S> QuizSession<'a, S, StdRng> {
    /// Create a session seeded from the operating system.
    pub fn new(store: &'a S, player: &'a mut dyn Player, user_id: UserId) -> Self {
        Self {
            store,
            player,
            user_id,
            rng: StdRng::from_os_rng(),
        }
    }
}

impl<'a, S, R> QuizSession<'a, S, R>
where
    S: ReferenceStore + ModeRegistry + RoundSink,
    R: Rng,
{
    /// Replace the random source used for slot selection.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> QuizSession<'a, S, R2> {
        QuizSession {
            store: self.store,
            player: self.player,
            user_id: self.user_id,
            rng,
        }
    }

    /// Play rounds of `mode` until the session ends.
    pub async fn play(&mut self, mode: QuizMode) -> SessionSummary {
        let session_id = SessionId::new();
        let descriptor = modes::descriptor(mode);

        info!(
            session = %session_id,
            %mode,
            user = %self.user_id,
            "Quiz session starting"
        );

        // Resolved once; an unregistered mode still records its detail rows.
        // A failed lookup cannot tell registered from unregistered, so no
        // round is played.
        let (mode_id, mut phase) = match self.store.mode_id(mode).await {
            Ok(mode_id) => {
                if mode_id.is_none() {
                    debug!(
                        session = %session_id,
                        %mode,
                        "Mode not registered, general leaderboard skipped"
                    );
                }
                (mode_id, Phase::Sampling)
            }
            Err(e) => {
                warn!(session = %session_id, %mode, error = %e, "Mode lookup failed");
                self.player.notify(&Notice::StoreUnavailable {
                    reason: e.to_string(),
                });
                (None, Phase::Done(SessionEnd::StoreUnavailable))
            }
        };

        let mut rounds: u32 = 0;
        let mut correct: u32 = 0;
        let mut points: u64 = 0;
        let mut unrecorded: u32 = 0;

        let end = loop {
            phase = match phase {
                Phase::Sampling => match sampler::draw(self.store, mode, &mut self.rng).await {
                    Ok(question) => {
                        self.player.present(&question);
                        Phase::AwaitingAnswer(Box::new(question))
                    }
                    Err(SampleError::NoEligibleData { mode }) => {
                        info!(session = %session_id, %mode, "No eligible data");
                        self.player.notify(&Notice::NoEligibleData { mode });
                        Phase::Done(SessionEnd::NoEligibleData)
                    }
                    Err(SampleError::Store(e)) => {
                        warn!(session = %session_id, %mode, error = %e, "Sampling failed");
                        self.player.notify(&Notice::StoreUnavailable {
                            reason: e.to_string(),
                        });
                        Phase::Done(SessionEnd::StoreUnavailable)
                    }
                },

                Phase::AwaitingAnswer(question) => match self.read_answer(descriptor.policy) {
                    Ok(Some(answer)) => Phase::Scoring(question, answer),
                    Ok(None) => Phase::Done(SessionEnd::InputClosed),
                    Err(e) => {
                        warn!(session = %session_id, error = %e, "Reading answer failed");
                        Phase::Done(SessionEnd::InputClosed)
                    }
                },

                Phase::Scoring(question, answer) => {
                    let verdict = evaluator::evaluate(self.store, &question, &answer).await;
                    let score = scoring::score(mode, verdict.is_correct);
                    debug!(
                        session = %session_id,
                        %mode,
                        correct = verdict.is_correct,
                        score,
                        "Round scored"
                    );
                    Phase::Recording(Box::new(ScoredRound {
                        result: RoundResult {
                            user_id: self.user_id,
                            detail: verdict.detail,
                            is_correct: verdict.is_correct,
                            score,
                            played_at: Utc::now(),
                        },
                        reveal: verdict.reveal,
                    }))
                }

                Phase::Recording(round) => {
                    let written = recorder::record(self.store, &round.result, mode_id).await;
                    let recorded = match written {
                        Ok(_) => true,
                        Err(e) => {
                            self.player.notify(&Notice::NotRecorded {
                                reason: e.to_string(),
                            });
                            false
                        }
                    };

                    rounds = rounds.saturating_add(1);
                    if round.result.is_correct {
                        correct = correct.saturating_add(1);
                    }
                    points = points.saturating_add(u64::from(round.result.score));
                    if !recorded {
                        unrecorded = unrecorded.saturating_add(1);
                    }

                    let ScoredRound { result, reveal } = *round;
                    self.player.show_outcome(&RoundOutcome {
                        mode,
                        is_correct: result.is_correct,
                        score: result.score,
                        reveal,
                        recorded,
                    });
                    Phase::AskReplay
                }

                Phase::AskReplay => match self.player.read_input(InputRequest::Replay) {
                    Ok(Some(line)) if wants_replay(&line) => Phase::Sampling,
                    Ok(Some(_)) => Phase::Done(SessionEnd::PlayerQuit),
                    Ok(None) => Phase::Done(SessionEnd::InputClosed),
                    Err(e) => {
                        warn!(session = %session_id, error = %e, "Reading replay choice failed");
                        Phase::Done(SessionEnd::InputClosed)
                    }
                },

                Phase::Done(end) => break end,
            };
        };

        info!(
            session = %session_id,
            %mode,
            user = %self.user_id,
            rounds,
            correct,
            score = points,
            unrecorded,
            end = ?end,
            "Quiz session ended"
        );

        SessionSummary {
            session_id,
            mode,
            rounds,
            correct,
            points,
            unrecorded,
            end,
        }
    }

    /// Read one answer shaped for `policy`.
    ///
    /// Free text is taken as-is. Discrete choices re-prompt until the reply
    /// parses or input ends.
    fn read_answer(&mut self, policy: AnswerPolicy) -> Result<Option<Answer>, PlayerError> {
        let choices = match policy {
            AnswerPolicy::ExactIdentity | AnswerPolicy::SetMembership => {
                return Ok(self
                    .player
                    .read_input(InputRequest::Guess)?
                    .map(Answer::Text));
            }
            AnswerPolicy::BinaryChoice(choices) => choices,
        };

        loop {
            let Some(line) = self.player.read_input(InputRequest::Choice(choices))? else {
                return Ok(None);
            };
            match choices.parse(&line) {
                Some(choice) => return Ok(Some(to_answer(choice))),
                None => self.player.notify(&Notice::InvalidChoice { choices }),
            }
        }
    }
}

const fn to_answer(choice: Choice) -> Answer {
    match choice {
        Choice::Pick(pick) => Answer::Pick(pick),
        Choice::YesNo(said) => Answer::YesNo(said),
    }
}

/// `y` or `yes` continues; anything else stops.
fn wants_replay(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
