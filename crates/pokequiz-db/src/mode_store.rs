//! The `game_modes` registry.

use pokequiz_types::{ModeId, ModeInfo, QuizMode};
use sqlx::PgPool;

use crate::error::DbError;

/// A row from `game_modes`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ModeRow {
    /// Registered id.
    pub mode_id: i32,
    /// Mode tag, e.g. `guess_weight`.
    pub mode_name: String,
    /// Menu description.
    pub description: Option<String>,
}

impl From<ModeRow> for ModeInfo {
    fn from(row: ModeRow) -> Self {
        Self {
            id: ModeId(row.mode_id),
            name: row.mode_name,
            description: row.description,
        }
    }
}

/// Read operations on the mode registry.
pub struct ModeStore<'a> {
    pool: &'a PgPool,
}

impl<'a> ModeStore<'a> {
    /// Create a new mode store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The registered id of `mode`, or `None` if it has no `game_modes` row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn mode_id(&self, mode: QuizMode) -> Result<Option<ModeId>, DbError> {
        let id: Option<(i32,)> =
            sqlx::query_as("SELECT mode_id FROM game_modes WHERE mode_name = $1")
                .bind(mode.tag())
                .fetch_optional(self.pool)
                .await?;

        Ok(id.map(|(id,)| ModeId(id)))
    }

    /// Every registered mode, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list_modes(&self) -> Result<Vec<ModeInfo>, DbError> {
        let rows = sqlx::query_as::<_, ModeRow>(
            "SELECT mode_id, mode_name, description FROM game_modes ORDER BY mode_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ModeInfo::from).collect())
    }
}
