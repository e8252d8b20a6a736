//! The engine-facing store.
//!
//! [`PgQuizStore`] implements the three collaborator traits of
//! `pokequiz-core` on top of the per-table stores, folding [`DbError`] into
//! [`StoreError`] at the boundary.

use pokequiz_core::store::{
    Eligibility, ModeRegistry, RecordAck, ReferenceStore, RoundSink, SolutionCriterion,
    StoreError,
};
use pokequiz_types::{ModeId, QuizMode, RoundResult, Species, SpeciesRef};

use crate::catalog_store::CatalogStore;
use crate::error::DbError;
use crate::mode_store::ModeStore;
use crate::postgres::PostgresPool;
use crate::round_store::RoundStore;

/// `PostgreSQL`-backed reference store, mode registry and round sink.
#[derive(Clone)]
pub struct PgQuizStore {
    pool: PostgresPool,
}

impl PgQuizStore {
    /// Wrap a connected pool.
    pub const fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub const fn pool(&self) -> &PostgresPool {
        &self.pool
    }
}

impl ReferenceStore for PgQuizStore {
    async fn sample_species(
        &self,
        eligibility: Eligibility,
        count: usize,
    ) -> Result<Vec<Species>, StoreError> {
        CatalogStore::new(self.pool.pool())
            .sample(eligibility, count)
            .await
            .map_err(DbError::into_read)
    }

    async fn find_species_by_name(&self, name: &str) -> Result<Option<SpeciesRef>, StoreError> {
        CatalogStore::new(self.pool.pool())
            .find_by_name(name)
            .await
            .map_err(DbError::into_read)
    }

    async fn solution_set(
        &self,
        criterion: &SolutionCriterion,
    ) -> Result<Vec<SpeciesRef>, StoreError> {
        CatalogStore::new(self.pool.pool())
            .solution_set(criterion)
            .await
            .map_err(DbError::into_read)
    }
}

impl ModeRegistry for PgQuizStore {
    async fn mode_id(&self, mode: QuizMode) -> Result<Option<ModeId>, StoreError> {
        ModeStore::new(self.pool.pool())
            .mode_id(mode)
            .await
            .map_err(DbError::into_read)
    }
}

impl RoundSink for PgQuizStore {
    async fn record_round(
        &self,
        result: &RoundResult,
        mode_id: Option<ModeId>,
    ) -> Result<RecordAck, StoreError> {
        let general_written = RoundStore::new(self.pool.pool())
            .record(result, mode_id)
            .await
            .map_err(DbError::into_write)?;

        Ok(RecordAck { general_written })
    }
}
