//! In-memory implementation of the collaborator traits.
//!
//! Holds a species catalog, a mode registry and the two result tables in
//! process memory. Reads and each of the two writes can be made to fail on
//! demand, which is how the engine's recovery paths are exercised without a
//! database.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use pokequiz_types::{GeneralLeaderboardEntry, ModeId, QuizMode, RoundResult, Species, SpeciesRef};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::store::{
    Eligibility, ModeRegistry, RecordAck, ReferenceStore, RoundSink, SolutionCriterion,
    StoreError,
};

#[derive(Debug, Default)]
struct Tables {
    detail: Vec<RoundResult>,
    general: Vec<GeneralLeaderboardEntry>,
}

/// A catalog and result tables kept in memory.
#[derive(Debug)]
pub struct MemoryStore {
    species: Vec<Species>,
    modes: BTreeMap<QuizMode, ModeId>,
    tables: Mutex<Tables>,
    rng: Mutex<StdRng>,
    fail_reads: AtomicBool,
    fail_mode_lookups: AtomicBool,
    fail_detail_writes: AtomicBool,
    fail_general_writes: AtomicBool,
}

impl MemoryStore {
    /// Create a store over `species` with no registered modes.
    pub fn new(species: Vec<Species>) -> Self {
        Self {
            species,
            modes: BTreeMap::new(),
            tables: Mutex::new(Tables::default()),
            rng: Mutex::new(StdRng::seed_from_u64(0x5eed)),
            fail_reads: AtomicBool::new(false),
            fail_mode_lookups: AtomicBool::new(false),
            fail_detail_writes: AtomicBool::new(false),
            fail_general_writes: AtomicBool::new(false),
        }
    }

    /// Register every mode, numbered in menu order from 1.
    #[must_use]
    pub fn with_registered_modes(mut self) -> Self {
        for (mode_id, mode) in (1..).zip(QuizMode::ALL) {
            self.modes.insert(mode, ModeId(mode_id));
        }
        self
    }

    /// Register one mode under `id`.
    #[must_use]
    pub fn with_mode(mut self, mode: QuizMode, id: ModeId) -> Self {
        self.modes.insert(mode, id);
        self
    }

    /// Make every read fail until switched off.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make mode registry lookups fail until switched off.
    pub fn fail_mode_lookups(&self, fail: bool) {
        self.fail_mode_lookups.store(fail, Ordering::SeqCst);
    }

    /// Make detail-row writes fail until switched off.
    pub fn fail_detail_writes(&self, fail: bool) {
        self.fail_detail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make general-leaderboard writes fail until switched off.
    pub fn fail_general_writes(&self, fail: bool) {
        self.fail_general_writes.store(fail, Ordering::SeqCst);
    }

    /// Committed detail rows.
    pub fn detail_rows(&self) -> Vec<RoundResult> {
        self.lock_tables().detail.clone()
    }

    /// Committed general leaderboard rows.
    pub fn general_rows(&self) -> Vec<GeneralLeaderboardEntry> {
        self.lock_tables().general.clone()
    }

    fn lock_tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("reference data unavailable".to_owned()));
        }
        Ok(())
    }

    fn satisfies(species: &Species, criterion: &SolutionCriterion) -> bool {
        match criterion {
            SolutionCriterion::SpeciesGroup(label) => species
                .species_group
                .as_deref()
                .is_some_and(|own| own.trim().to_lowercase() == label.trim().to_lowercase()),
            SolutionCriterion::Ability(ability) => species
                .abilities
                .as_ref()
                .is_some_and(|slots| slots.filled().iter().any(|(_, a)| a.id == *ability)),
            SolutionCriterion::Typing { primary, secondary } => {
                let Some(typing) = species.typing.as_ref() else {
                    return false;
                };
                let own = (typing.primary.id, typing.secondary.as_ref().map(|t| t.id));
                match secondary {
                    Some(secondary) => {
                        own == (*primary, Some(*secondary)) || own == (*secondary, Some(*primary))
                    }
                    None => own.0 == *primary || own.1 == Some(*primary),
                }
            }
        }
    }
}

impl ReferenceStore for MemoryStore {
    async fn sample_species(
        &self,
        eligibility: Eligibility,
        count: usize,
    ) -> Result<Vec<Species>, StoreError> {
        self.check_reads()?;
        let eligible: Vec<&Species> = self
            .species
            .iter()
            .filter(|species| eligibility.admits(species))
            .collect();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(eligible
            .choose_multiple(&mut *rng, count)
            .map(|species| (*species).clone())
            .collect())
    }

    async fn find_species_by_name(&self, name: &str) -> Result<Option<SpeciesRef>, StoreError> {
        self.check_reads()?;
        let wanted = name.trim().to_lowercase();
        Ok(self
            .species
            .iter()
            .find(|species| species.name.to_lowercase() == wanted)
            .map(Species::to_ref))
    }

    async fn solution_set(
        &self,
        criterion: &SolutionCriterion,
    ) -> Result<Vec<SpeciesRef>, StoreError> {
        self.check_reads()?;
        Ok(self
            .species
            .iter()
            .filter(|species| Self::satisfies(species, criterion))
            .map(Species::to_ref)
            .collect())
    }
}

impl ModeRegistry for MemoryStore {
    async fn mode_id(&self, mode: QuizMode) -> Result<Option<ModeId>, StoreError> {
        self.check_reads()?;
        if self.fail_mode_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::Read(format!("mode registry unavailable for {mode}")));
        }
        Ok(self.modes.get(&mode).copied())
    }
}

impl RoundSink for MemoryStore {
    async fn record_round(
        &self,
        result: &RoundResult,
        mode_id: Option<ModeId>,
    ) -> Result<RecordAck, StoreError> {
        // Stage both writes and commit only when neither failed.
        if self.fail_detail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("detail insert failed".to_owned()));
        }
        let general = match mode_id {
            Some(mode_id) => {
                if self.fail_general_writes.load(Ordering::SeqCst) {
                    return Err(StoreError::Write(format!(
                        "general insert failed for mode {mode_id}"
                    )));
                }
                Some(result.general_entry(mode_id))
            }
            None => None,
        };

        let mut tables = self.lock_tables();
        tables.detail.push(result.clone());
        let general_written = general.is_some();
        if let Some(entry) = general {
            tables.general.push(entry);
        }
        Ok(RecordAck { general_written })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use pokequiz_types::{AbilityId, TypeId};

    use super::*;
    use crate::fixtures;

    fn names(refs: &[SpeciesRef]) -> Vec<&str> {
        let mut names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[tokio::test]
    async fn sampling_respects_count_and_eligibility() {
        let store = MemoryStore::new(fixtures::catalog());
        let drawn = store
            .sample_species(Eligibility::HasDexNumber, 2)
            .await
            .unwrap();
        assert_eq!(drawn.len(), 2);
        assert_ne!(drawn[0].id, drawn[1].id);
        assert!(drawn.iter().all(|s| s.dex_number.is_some()));
    }

    #[tokio::test]
    async fn name_lookup_ignores_case() {
        let store = MemoryStore::new(fixtures::catalog());
        let found = store.find_species_by_name("  sNoRlAx ").await.unwrap();
        assert_eq!(found.map(|s| s.name), Some("Snorlax".to_owned()));
        assert_eq!(store.find_species_by_name("Agumon").await.unwrap(), None);
    }

    #[tokio::test]
    async fn dual_typing_matches_either_order() {
        let store = MemoryStore::new(fixtures::catalog());
        let grass_poison = SolutionCriterion::Typing {
            primary: TypeId(fixtures::POISON),
            secondary: Some(TypeId(fixtures::GRASS)),
        };
        let found = store.solution_set(&grass_poison).await.unwrap();
        assert_eq!(names(&found), ["Bulbasaur", "Ivysaur"]);
    }

    #[tokio::test]
    async fn single_typing_matches_either_slot() {
        let store = MemoryStore::new(fixtures::catalog());
        let poison = SolutionCriterion::Typing {
            primary: TypeId(fixtures::POISON),
            secondary: None,
        };
        let found = store.solution_set(&poison).await.unwrap();
        assert_eq!(names(&found), ["Bulbasaur", "Gengar", "Ivysaur"]);
    }

    #[tokio::test]
    async fn ability_matches_any_slot() {
        let store = MemoryStore::new(fixtures::catalog());
        let found = store
            .solution_set(&SolutionCriterion::Ability(AbilityId(fixtures::CHLOROPHYLL)))
            .await
            .unwrap();
        assert_eq!(names(&found), ["Bulbasaur", "Ivysaur"]);
    }

    #[tokio::test]
    async fn registered_modes_are_numbered_in_order() {
        let store = MemoryStore::new(Vec::new()).with_registered_modes();
        assert_eq!(store.mode_id(QuizMode::Stats).await.unwrap(), Some(ModeId(1)));
        assert_eq!(store.mode_id(QuizMode::Type).await.unwrap(), Some(ModeId(7)));
        let bare = MemoryStore::new(Vec::new()).with_mode(QuizMode::Weight, ModeId(9));
        assert_eq!(bare.mode_id(QuizMode::Weight).await.unwrap(), Some(ModeId(9)));
        assert_eq!(bare.mode_id(QuizMode::Stats).await.unwrap(), None);
    }
}
