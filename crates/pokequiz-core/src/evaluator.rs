//! Answer evaluator.
//!
//! Turns a player's reply into a correctness verdict and the mode-specific
//! detail fields of the round. Free-text replies are resolved against the
//! question's own solution first and the catalog second; a reply that names
//! no known species is recorded against a fallback species so every detail
//! row references a real species id.

use pokequiz_types::{Pick, RoundDetail, SpeciesRef};
use tracing::{debug, warn};

use crate::sampler::Question;
use crate::store::ReferenceStore;

/// A player's reply, already parsed to the shape its mode expects.
///
/// Free-text modes take [`Answer::Text`]; the weight comparison takes
/// [`Answer::Pick`]; the egg-group comparison takes [`Answer::YesNo`]. A
/// reply of the wrong shape is judged wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// A free-text species name.
    Text(String),
    /// One of two shown species.
    Pick(Pick),
    /// A yes/no reply.
    YesNo(bool),
}

/// Where a resolved guess came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessSource {
    /// Matched a member of the solution set.
    Solution,
    /// Named a catalog species outside the solution set.
    Catalog,
    /// Named nothing known; the fallback species is recorded.
    Fallback,
}

/// A free-text guess mapped to a species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the guess is in the solution set.
    pub is_correct: bool,
    /// The species recorded as the guess.
    pub guess: SpeciesRef,
    /// How the guess was resolved.
    pub source: GuessSource,
}

/// What to show the player after a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    /// The heavier of the two species.
    Heavier(SpeciesRef),
    /// The one species the question was about.
    Target(SpeciesRef),
    /// One valid answer out of possibly many.
    Example(SpeciesRef),
    /// Whether the two species share an egg group.
    EggGroups {
        /// Ground truth.
        share: bool,
    },
}

/// The judged outcome of one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the reply was accepted.
    pub is_correct: bool,
    /// Mode-specific fields for the detail row.
    pub detail: RoundDetail,
    /// What to show the player.
    pub reveal: Reveal,
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Resolve a free-text guess against a solution set.
///
/// Matching ignores case and surrounding whitespace. A guess naming a
/// member of `solution` is correct. A guess naming any other catalog
/// species is wrong and recorded as that species. Anything else, including
/// an empty reply or a failed lookup, is wrong and recorded as `fallback`.
pub async fn resolve_guess<S: ReferenceStore>(
    store: &S,
    raw: &str,
    solution: &[SpeciesRef],
    fallback: &SpeciesRef,
) -> Resolution {
    let wanted = normalize(raw);
    let miss = || Resolution {
        is_correct: false,
        guess: fallback.clone(),
        source: GuessSource::Fallback,
    };

    if wanted.is_empty() {
        return miss();
    }

    if let Some(member) = solution.iter().find(|m| normalize(&m.name) == wanted) {
        return Resolution {
            is_correct: true,
            guess: member.clone(),
            source: GuessSource::Solution,
        };
    }

    match store.find_species_by_name(&wanted).await {
        Ok(Some(found)) => Resolution {
            is_correct: solution.iter().any(|m| m.id == found.id),
            guess: found,
            source: GuessSource::Catalog,
        },
        Ok(None) => {
            debug!(guess = %wanted, "Guess names no known species");
            miss()
        }
        Err(e) => {
            warn!(error = %e, guess = %wanted, "Name lookup failed, recording fallback");
            miss()
        }
    }
}

fn text(answer: &Answer) -> &str {
    match answer {
        Answer::Text(raw) => raw,
        Answer::Pick(_) | Answer::YesNo(_) => "",
    }
}

/// Judge `answer` against `question`.
pub async fn evaluate<S: ReferenceStore>(store: &S, question: &Question, answer: &Answer) -> Verdict {
    match question {
        Question::Weight { first, second } => {
            // Ties go to the second species.
            let (heavier, lighter) = if first.weight > second.weight {
                (first, second)
            } else {
                (second, first)
            };
            let chosen = match answer {
                Answer::Pick(Pick::First) => first,
                Answer::Pick(Pick::Second) => second,
                Answer::Text(_) | Answer::YesNo(_) => lighter,
            };
            let is_correct = chosen.species.id == heavier.species.id;
            Verdict {
                is_correct,
                detail: RoundDetail::Weight {
                    pokemon1: first.species.id,
                    pokemon2: second.species.id,
                    user_choice: chosen.species.id,
                    correct_pokemon: heavier.species.id,
                },
                reveal: Reveal::Heavier(heavier.species.clone()),
            }
        }
        Question::EggGroup { first, second } => {
            let share = first.groups.shares_with(&second.groups);
            let user_answer = match answer {
                Answer::YesNo(said) => *said,
                Answer::Text(_) | Answer::Pick(_) => !share,
            };
            Verdict {
                is_correct: user_answer == share,
                detail: RoundDetail::EggGroup {
                    pokemon1: first.species.id,
                    pokemon2: second.species.id,
                    share_egg_group: share,
                    user_answer,
                },
                reveal: Reveal::EggGroups { share },
            }
        }
        Question::Stats { target, .. } => {
            let resolution =
                resolve_guess(store, text(answer), core::slice::from_ref(target), target).await;
            Verdict {
                is_correct: resolution.is_correct,
                detail: RoundDetail::Stats {
                    pokemon: target.id,
                    guessed_pokemon: resolution.guess.id,
                },
                reveal: Reveal::Target(target.clone()),
            }
        }
        Question::DexNumber { target, dex_number } => {
            let resolution =
                resolve_guess(store, text(answer), core::slice::from_ref(target), target).await;
            Verdict {
                is_correct: resolution.is_correct,
                detail: RoundDetail::DexNumber {
                    shown_dex: *dex_number,
                    user_choice: resolution.guess.id,
                    correct_pokemon: target.id,
                },
                reveal: Reveal::Target(target.clone()),
            }
        }
        Question::SpeciesGroup {
            label,
            anchor,
            solution,
        } => {
            let resolution = resolve_guess(store, text(answer), solution, anchor).await;
            Verdict {
                is_correct: resolution.is_correct,
                detail: RoundDetail::SpeciesGroup {
                    given_species: label.clone(),
                    guessed_pokemon: resolution.guess.id,
                },
                reveal: Reveal::Example(anchor.clone()),
            }
        }
        Question::Ability {
            ability,
            anchor,
            solution,
            ..
        } => {
            let resolution = resolve_guess(store, text(answer), solution, anchor).await;
            Verdict {
                is_correct: resolution.is_correct,
                detail: RoundDetail::Ability {
                    ability: ability.id,
                    guessed_pokemon: resolution.guess.id,
                },
                reveal: Reveal::Example(anchor.clone()),
            }
        }
        Question::Type {
            typing,
            anchor,
            solution,
        } => {
            let resolution = resolve_guess(store, text(answer), solution, anchor).await;
            Verdict {
                is_correct: resolution.is_correct,
                detail: RoundDetail::Type {
                    type1: typing.primary.id,
                    type2: typing.secondary.as_ref().map(|t| t.id),
                    guessed_pokemon: resolution.guess.id,
                },
                reveal: Reveal::Example(anchor.clone()),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pokequiz_types::{
        Ability, AbilityId, AbilitySlot, PokemonType, QuizMode, SpeciesId, TypeId, Typing,
    };
    use rust_decimal::Decimal;

    use super::*;
    use crate::fixtures;
    use crate::memory::MemoryStore;
    use crate::sampler::{EggCard, WeighIn};

    fn store() -> MemoryStore {
        MemoryStore::new(fixtures::catalog())
    }

    fn species(name: &str) -> SpeciesRef {
        fixtures::catalog()
            .into_iter()
            .find(|s| s.name == name)
            .map(|s| s.to_ref())
            .unwrap()
    }

    fn eevee_group() -> Question {
        Question::SpeciesGroup {
            label: "Evolution Pokémon".to_owned(),
            anchor: species("Eevee"),
            solution: vec![species("Eevee"), species("Sylveon"), species("Vaporeon")],
        }
    }

    fn weigh(name: &str, kg: i64) -> WeighIn {
        WeighIn {
            species: species(name),
            weight: Decimal::new(kg, 1),
        }
    }

    #[tokio::test]
    async fn any_member_of_the_solution_set_is_accepted() {
        let verdict = evaluate(&store(), &eevee_group(), &Answer::Text("VAPOREON".into())).await;
        assert!(verdict.is_correct);
        assert_eq!(
            verdict.detail,
            RoundDetail::SpeciesGroup {
                given_species: "Evolution Pokémon".to_owned(),
                guessed_pokemon: species("Vaporeon").id,
            }
        );
    }

    #[tokio::test]
    async fn catalog_guess_outside_the_set_is_recorded_as_named() {
        let verdict = evaluate(&store(), &eevee_group(), &Answer::Text("Pikachu".into())).await;
        assert!(!verdict.is_correct);
        assert_eq!(
            verdict.detail,
            RoundDetail::SpeciesGroup {
                given_species: "Evolution Pokémon".to_owned(),
                guessed_pokemon: SpeciesId(25),
            }
        );
    }

    fn grass_poison() -> Question {
        let kind = |id: i32, name: &str| PokemonType {
            id: TypeId(id),
            name: name.to_owned(),
        };
        Question::Type {
            typing: Typing {
                primary: kind(fixtures::GRASS, "Grass"),
                secondary: Some(kind(fixtures::POISON, "Poison")),
            },
            anchor: species("Bulbasaur"),
            solution: vec![species("Bulbasaur"), species("Ivysaur")],
        }
    }

    #[tokio::test]
    async fn type_guess_ignores_case_and_padding() {
        let verdict = evaluate(&store(), &grass_poison(), &Answer::Text("  iVySaUr ".into())).await;
        assert!(verdict.is_correct);
        assert_eq!(
            verdict.detail,
            RoundDetail::Type {
                type1: TypeId(fixtures::GRASS),
                type2: Some(TypeId(fixtures::POISON)),
                guessed_pokemon: SpeciesId(2),
            }
        );
        assert_eq!(verdict.reveal, Reveal::Example(species("Bulbasaur")));
        assert_eq!(crate::scoring::score(QuizMode::Type, verdict.is_correct), 300);
    }

    #[tokio::test]
    async fn type_guess_sharing_one_type_is_wrong() {
        let verdict = evaluate(&store(), &grass_poison(), &Answer::Text("Gengar".into())).await;
        assert!(!verdict.is_correct);
        let RoundDetail::Type {
            guessed_pokemon, ..
        } = verdict.detail
        else {
            panic!("expected a type detail");
        };
        assert_eq!(guessed_pokemon, SpeciesId(94));
    }

    #[tokio::test]
    async fn wrong_ability_guess_is_recorded_as_the_named_species() {
        let question = Question::Ability {
            ability: Ability {
                id: AbilityId(fixtures::CHLOROPHYLL),
                name: "Chlorophyll".to_owned(),
            },
            slot: AbilitySlot::Hidden,
            anchor: species("Bulbasaur"),
            solution: vec![species("Bulbasaur"), species("Ivysaur")],
        };

        let wrong = evaluate(&store(), &question, &Answer::Text("snorlax".into())).await;
        assert!(!wrong.is_correct);
        assert_eq!(
            wrong.detail,
            RoundDetail::Ability {
                ability: AbilityId(fixtures::CHLOROPHYLL),
                guessed_pokemon: SpeciesId(143),
            }
        );
        assert_eq!(wrong.reveal, Reveal::Example(species("Bulbasaur")));
        assert_eq!(crate::scoring::score(QuizMode::Ability, wrong.is_correct), 0);

        let right = evaluate(&store(), &question, &Answer::Text("IVYSAUR".into())).await;
        assert!(right.is_correct);
        assert_eq!(crate::scoring::score(QuizMode::Ability, right.is_correct), 250);
    }

    #[tokio::test]
    async fn heavier_of_two() {
        let question = Question::Weight {
            first: weigh("Pikachu", 60),
            second: weigh("Raichu", 300),
        };
        let right = evaluate(&store(), &question, &Answer::Pick(Pick::Second)).await;
        assert!(right.is_correct);
        assert_eq!(right.reveal, Reveal::Heavier(species("Raichu")));

        let wrong = evaluate(&store(), &question, &Answer::Pick(Pick::First)).await;
        assert!(!wrong.is_correct);
        let RoundDetail::Weight {
            user_choice,
            correct_pokemon,
            ..
        } = wrong.detail
        else {
            panic!("expected a weight detail");
        };
        assert_eq!(user_choice, SpeciesId(25));
        assert_eq!(correct_pokemon, SpeciesId(26));
    }

    #[tokio::test]
    async fn equal_weights_favor_the_second_species() {
        let question = Question::Weight {
            first: weigh("Pikachu", 60),
            second: weigh("Raichu", 60),
        };
        let verdict = evaluate(&store(), &question, &Answer::Pick(Pick::Second)).await;
        assert!(verdict.is_correct);
    }

    #[tokio::test]
    async fn dex_number_by_name() {
        let question = Question::DexNumber {
            target: species("Pikachu"),
            dex_number: 25,
        };
        let right = evaluate(&store(), &question, &Answer::Text("pikachu".into())).await;
        assert!(right.is_correct);
        assert_eq!(crate::scoring::score(question.mode(), right.is_correct), 300);

        let wrong = evaluate(&store(), &question, &Answer::Text("Raichu".into())).await;
        assert!(!wrong.is_correct);
        assert_eq!(
            wrong.detail,
            RoundDetail::DexNumber {
                shown_dex: 25,
                user_choice: SpeciesId(26),
                correct_pokemon: SpeciesId(25),
            }
        );
    }

    #[tokio::test]
    async fn unknown_name_falls_back_to_the_target() {
        let question = Question::Stats {
            target: species("Snorlax"),
            stats: fixtures::catalog()
                .into_iter()
                .find(|s| s.name == "Snorlax")
                .and_then(|s| s.stats)
                .unwrap(),
        };
        let verdict = evaluate(&store(), &question, &Answer::Text("Missingno".into())).await;
        assert!(!verdict.is_correct);
        assert_eq!(
            verdict.detail,
            RoundDetail::Stats {
                pokemon: species("Snorlax").id,
                guessed_pokemon: species("Snorlax").id,
            }
        );
    }

    #[tokio::test]
    async fn failed_lookup_falls_back() {
        let store = store();
        store.fail_reads(true);
        let anchor = species("Eevee");
        let resolution = resolve_guess(&store, "Pikachu", &[anchor.clone()], &anchor).await;
        assert_eq!(resolution.source, GuessSource::Fallback);
        assert_eq!(resolution.guess, anchor);
        assert!(!resolution.is_correct);
    }

    #[tokio::test]
    async fn solution_match_skips_the_catalog() {
        let store = store();
        store.fail_reads(true);
        let anchor = species("Eevee");
        let resolution = resolve_guess(&store, "  eevee ", &[anchor.clone()], &anchor).await;
        assert_eq!(resolution.source, GuessSource::Solution);
        assert!(resolution.is_correct);
    }

    #[tokio::test]
    async fn egg_group_truth_is_compared_with_the_reply() {
        let catalog = fixtures::catalog();
        let card = |name: &str| {
            let species = catalog.iter().find(|s| s.name == name).unwrap();
            EggCard {
                species: species.to_ref(),
                groups: species.egg_groups.clone().unwrap(),
            }
        };
        let question = Question::EggGroup {
            first: card("Bulbasaur"),
            second: card("Charmander"),
        };
        let yes = evaluate(&store(), &question, &Answer::YesNo(true)).await;
        assert!(yes.is_correct);
        assert_eq!(yes.reveal, Reveal::EggGroups { share: true });

        let mismatched = evaluate(&store(), &question, &Answer::Text("yes".into())).await;
        assert!(!mismatched.is_correct);
    }
}
