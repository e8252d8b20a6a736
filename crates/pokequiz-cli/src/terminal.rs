//! Line-oriented terminal player.
//!
//! [`TerminalPlayer`] renders questions, notices and outcomes as plain text
//! and reads one line per request. It is generic over its reader and writer
//! so tests can drive it with in-memory buffers.

use std::io::{self, BufRead, Write};

use pokequiz_core::evaluator::Reveal;
use pokequiz_core::modes::{self, ChoiceSet};
use pokequiz_core::player::{InputRequest, Notice, Player, PlayerError, RoundOutcome};
use pokequiz_core::sampler::Question;
use pokequiz_types::Typing;

/// A [`Player`] over a line reader and a text writer.
pub struct TerminalPlayer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPlayer<R, W> {
    /// Create a player reading from `input` and writing to `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `prompt`, then read one line without its line ending.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    /// Write a block of text followed by a newline.
    pub fn write_block(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Consume the player, returning its writer.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.write_block(text) {
            tracing::warn!(error = %e, "Terminal write failed");
        }
    }
}

impl<R: BufRead, W: Write> Player for TerminalPlayer<R, W> {
    fn present(&mut self, question: &Question) {
        let text = render_question(question);
        self.emit(&text);
    }

    fn read_input(&mut self, request: InputRequest) -> Result<Option<String>, PlayerError> {
        self.read_line(&prompt(request)).map_err(PlayerError::from)
    }

    fn notify(&mut self, notice: &Notice) {
        let text = render_notice(notice);
        self.emit(&text);
    }

    fn show_outcome(&mut self, outcome: &RoundOutcome) {
        let text = render_outcome(outcome);
        self.emit(&text);
    }
}

fn prompt(request: InputRequest) -> String {
    match request {
        InputRequest::Guess => "Your guess: ".to_owned(),
        InputRequest::Choice(choices) => format!("Answer ({}): ", choices.valid_inputs().join("/")),
        InputRequest::Replay => "Play again? (y/n): ".to_owned(),
    }
}

/// `Primary` or `Primary/Secondary`.
pub fn typing_label(typing: &Typing) -> String {
    typing.secondary.as_ref().map_or_else(
        || typing.primary.name.clone(),
        |secondary| format!("{}/{}", typing.primary.name, secondary.name),
    )
}

/// Render a question as shown before the prompt.
pub fn render_question(question: &Question) -> String {
    let title = modes::descriptor(question.mode()).title;
    let body = match question {
        Question::Weight { first, second } => format!(
            "  1) {}\n  2) {}",
            first.species.name, second.species.name
        ),
        Question::Stats { stats, .. } => format!(
            "  HP {} | Atk {} | Def {} | SpA {} | SpD {} | Spe {} | Total {}\nWhich Pokémon has these base stats?",
            stats.hp, stats.attack, stats.defense, stats.sp_atk, stats.sp_def, stats.speed, stats.total
        ),
        Question::SpeciesGroup { label, .. } => {
            format!("Name a Pokémon classified as the {label}.")
        }
        Question::EggGroup { first, second } => format!(
            "Do {} and {} share an egg group?",
            first.species.name, second.species.name
        ),
        Question::DexNumber { dex_number, .. } => {
            format!("Which Pokémon is #{dex_number:03}?")
        }
        Question::Ability { ability, .. } => {
            format!("Name a Pokémon that can have {}.", ability.name)
        }
        Question::Type { typing, .. } => {
            format!("Name a Pokémon with the {} typing.", typing_label(typing))
        }
    };
    format!("\n{title}\n{body}")
}

/// Render a notice.
pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::NoEligibleData { mode } => {
            format!("No questions are available for {mode} right now.")
        }
        Notice::InvalidChoice { choices } => match choices {
            ChoiceSet::FirstOrSecond => "Please answer 1 or 2.".to_owned(),
            ChoiceSet::YesNo => "Please answer yes or no.".to_owned(),
        },
        Notice::NotRecorded { reason } => {
            format!("This round could not be saved to the leaderboard ({reason}).")
        }
        Notice::StoreUnavailable { reason } => {
            format!("The Pokémon catalog is unavailable ({reason}).")
        }
    }
}

/// Render the outcome of a round.
pub fn render_outcome(outcome: &RoundOutcome) -> String {
    let verdict = if outcome.is_correct {
        format!("Correct! +{} points.", outcome.score)
    } else {
        "Wrong!".to_owned()
    };
    let reveal = match &outcome.reveal {
        Reveal::Heavier(species) => format!("{} is heavier.", species.name),
        Reveal::Target(species) => format!("The answer was {}.", species.name),
        Reveal::Example(species) => format!("One valid answer: {}.", species.name),
        Reveal::EggGroups { share: true } => "They share an egg group.".to_owned(),
        Reveal::EggGroups { share: false } => "They do not share an egg group.".to_owned(),
    };
    format!("{verdict} {reveal}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use pokequiz_core::memory::MemoryStore;
    use pokequiz_core::sampler::WeighIn;
    use pokequiz_core::session::{QuizSession, SessionEnd};
    use pokequiz_types::{PokemonType, QuizMode, Species, SpeciesId, SpeciesRef, TypeId, UserId};
    use rust_decimal::Decimal;

    use super::*;

    fn player(input: &str) -> TerminalPlayer<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPlayer::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(player: TerminalPlayer<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(player.into_output()).unwrap()
    }

    #[test]
    fn reads_lines_until_end_of_input() {
        let mut terminal = player("Pikachu\r\n  snorlax \n");
        assert_eq!(
            terminal.read_input(InputRequest::Guess).unwrap().as_deref(),
            Some("Pikachu")
        );
        // Only the line ending is stripped; the evaluator trims the rest.
        assert_eq!(
            terminal.read_input(InputRequest::Guess).unwrap().as_deref(),
            Some("  snorlax ")
        );
        assert_eq!(terminal.read_input(InputRequest::Guess).unwrap(), None);
        assert_eq!(written(terminal).matches("Your guess: ").count(), 3);
    }

    #[test]
    fn choice_prompt_lists_valid_inputs() {
        let mut terminal = player("2\n");
        terminal
            .read_input(InputRequest::Choice(ChoiceSet::FirstOrSecond))
            .unwrap();
        assert_eq!(written(terminal), "Answer (1/2): ");
    }

    #[test]
    fn weight_question_hides_weights() {
        let question = Question::Weight {
            first: WeighIn {
                species: SpeciesRef::new(SpeciesId(25), "Pikachu"),
                weight: Decimal::new(60, 1),
            },
            second: WeighIn {
                species: SpeciesRef::new(SpeciesId(143), "Snorlax"),
                weight: Decimal::new(4600, 1),
            },
        };
        let mut terminal = player("");
        terminal.present(&question);
        let text = written(terminal);
        assert!(text.contains("1) Pikachu"));
        assert!(text.contains("2) Snorlax"));
        assert!(!text.contains("460"));
    }

    #[test]
    fn dual_typing_is_joined_with_a_slash() {
        let question = Question::Type {
            typing: Typing {
                primary: PokemonType {
                    id: TypeId(4),
                    name: "Grass".to_owned(),
                },
                secondary: Some(PokemonType {
                    id: TypeId(6),
                    name: "Poison".to_owned(),
                }),
            },
            anchor: SpeciesRef::new(SpeciesId(1), "Bulbasaur"),
            solution: vec![SpeciesRef::new(SpeciesId(1), "Bulbasaur")],
        };
        let text = render_question(&question);
        assert!(text.contains("Grass/Poison"));
        assert!(!text.contains("Bulbasaur"));
    }

    #[test]
    fn dex_numbers_are_zero_padded() {
        let question = Question::DexNumber {
            target: SpeciesRef::new(SpeciesId(25), "Pikachu"),
            dex_number: 25,
        };
        assert!(render_question(&question).contains("#025"));
    }

    #[test]
    fn outcome_reveals_the_answer() {
        let won = RoundOutcome {
            mode: QuizMode::DexNumber,
            is_correct: true,
            score: 300,
            reveal: Reveal::Target(SpeciesRef::new(SpeciesId(25), "Pikachu")),
            recorded: true,
        };
        assert_eq!(
            render_outcome(&won),
            "Correct! +300 points. The answer was Pikachu."
        );

        let lost = RoundOutcome {
            mode: QuizMode::EggGroup,
            is_correct: false,
            score: 0,
            reveal: Reveal::EggGroups { share: true },
            recorded: false,
        };
        assert_eq!(render_outcome(&lost), "Wrong! They share an egg group.");
    }

    #[test]
    fn invalid_choice_names_the_expected_inputs() {
        let text = render_notice(&Notice::InvalidChoice {
            choices: ChoiceSet::YesNo,
        });
        assert!(text.contains("yes or no"));
    }

    #[tokio::test]
    async fn plays_a_weight_session_end_to_end() {
        let mut light = Species::bare(SpeciesId(25), "Pikachu");
        light.weight = Some(Decimal::new(60, 1));
        let mut heavy = Species::bare(SpeciesId(143), "Snorlax");
        heavy.weight = Some(Decimal::new(4600, 1));
        let store = MemoryStore::new(vec![light, heavy]).with_registered_modes();

        let mut terminal = player("maybe\n1\nn\n");
        let summary = QuizSession::new(&store, &mut terminal, UserId(1))
            .play(QuizMode::Weight)
            .await;

        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.end, SessionEnd::PlayerQuit);
        assert_eq!(store.general_rows().len(), 1);

        let text = written(terminal);
        assert!(text.contains("Please answer 1 or 2."));
        assert!(text.contains("Snorlax is heavier."));
        assert!(text.contains("Play again? (y/n): "));
    }
}
