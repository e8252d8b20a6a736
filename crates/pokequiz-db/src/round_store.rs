//! Round persistence.
//!
//! Each round writes one row into its mode's detail table and, when the mode
//! is registered, one row into `leaderboard_general`. Both inserts run in a
//! single transaction: if either fails the transaction is rolled back and
//! neither row is visible.

use pokequiz_types::{ModeId, QuizMode, RoundDetail, RoundResult, UserId};
use sqlx::{PgConnection, PgPool};

use crate::error::DbError;

/// The detail table a mode's rounds are written to.
pub const fn detail_table(mode: QuizMode) -> &'static str {
    match mode {
        QuizMode::Weight => "leaderboard_guess_weight",
        QuizMode::Stats => "leaderboard_guess_stats",
        QuizMode::SpeciesGroup => "leaderboard_guess_species",
        QuizMode::EggGroup => "leaderboard_guess_egg_group",
        QuizMode::DexNumber => "leaderboard_guess_dexnum",
        QuizMode::Ability => "leaderboard_guess_ability",
        QuizMode::Type => "leaderboard_guess_type",
    }
}

fn score_column(score: u32) -> i32 {
    i32::try_from(score).unwrap_or(i32::MAX)
}

/// Write operations on the round result tables.
pub struct RoundStore<'a> {
    pool: &'a PgPool,
}

impl<'a> RoundStore<'a> {
    /// Create a new round store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist one round as a single transaction.
    ///
    /// Returns whether a general leaderboard row was written.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if either insert or the commit fails.
    /// The transaction has been rolled back by then.
    pub async fn record(
        &self,
        result: &RoundResult,
        mode_id: Option<ModeId>,
    ) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        match write_round(&mut *tx, result, mode_id).await {
            Ok(general_written) => {
                tx.commit().await?;
                tracing::debug!(
                    mode = %result.mode(),
                    user = %result.user_id,
                    general = general_written,
                    "Round committed"
                );
                Ok(general_written)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "Rollback failed");
                }
                tracing::warn!(mode = %result.mode(), error = %e, "Round rolled back");
                Err(e)
            }
        }
    }

    /// Count detail rows for `user` in `mode`'s table.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn count_rounds(&self, mode: QuizMode, user: UserId) -> Result<i64, DbError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE user_id = $1",
            detail_table(mode)
        );
        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(user.into_inner())
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

/// Insert the detail row and, for a registered mode, the general row.
///
/// Runs on whatever connection it is handed; [`RoundStore::record`] hands it
/// an open transaction.
///
/// # Errors
///
/// Returns [`DbError::Postgres`] if either insert fails.
pub async fn write_round(
    conn: &mut PgConnection,
    result: &RoundResult,
    mode_id: Option<ModeId>,
) -> Result<bool, DbError> {
    insert_detail(conn, result).await?;

    let Some(mode_id) = mode_id else {
        return Ok(false);
    };
    let entry = result.general_entry(mode_id);
    sqlx::query(
        r"INSERT INTO leaderboard_general (user_id, mode_id, score, correct, incorrect, created_at)
          VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(entry.user_id.into_inner())
    .bind(entry.mode_id.into_inner())
    .bind(score_column(entry.score))
    .bind(i16::from(entry.correct))
    .bind(i16::from(entry.incorrect))
    .bind(result.played_at)
    .execute(&mut *conn)
    .await?;

    Ok(true)
}

async fn insert_detail(conn: &mut PgConnection, result: &RoundResult) -> Result<(), DbError> {
    let user = result.user_id.into_inner();
    let score = score_column(result.score);

    let query = match &result.detail {
        RoundDetail::Weight {
            pokemon1,
            pokemon2,
            user_choice,
            correct_pokemon,
        } => sqlx::query(
            r"INSERT INTO leaderboard_guess_weight
                (user_id, pokemon1_id, pokemon2_id, user_choice_id, correct_pokemon_id, is_correct, score, created_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(user)
        .bind(pokemon1.into_inner())
        .bind(pokemon2.into_inner())
        .bind(user_choice.into_inner())
        .bind(correct_pokemon.into_inner()),

        RoundDetail::Stats {
            pokemon,
            guessed_pokemon,
        } => sqlx::query(
            r"INSERT INTO leaderboard_guess_stats
                (user_id, pokemon_id, guessed_pokemon_id, is_correct, score, created_at)
              VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user)
        .bind(pokemon.into_inner())
        .bind(guessed_pokemon.into_inner()),

        RoundDetail::SpeciesGroup {
            given_species,
            guessed_pokemon,
        } => sqlx::query(
            r"INSERT INTO leaderboard_guess_species
                (user_id, given_species, guessed_pokemon_id, is_correct, score, created_at)
              VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user)
        .bind(given_species.as_str())
        .bind(guessed_pokemon.into_inner()),

        RoundDetail::EggGroup {
            pokemon1,
            pokemon2,
            share_egg_group,
            user_answer,
        } => sqlx::query(
            r"INSERT INTO leaderboard_guess_egg_group
                (user_id, pokemon1_id, pokemon2_id, share_egg_group, user_answer, is_correct, score, created_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(user)
        .bind(pokemon1.into_inner())
        .bind(pokemon2.into_inner())
        .bind(*share_egg_group)
        .bind(*user_answer),

        RoundDetail::DexNumber {
            shown_dex,
            user_choice,
            correct_pokemon,
        } => sqlx::query(
            r"INSERT INTO leaderboard_guess_dexnum
                (user_id, shown_dex, user_choice_id, correct_pokemon_id, is_correct, score, created_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user)
        .bind(*shown_dex)
        .bind(user_choice.into_inner())
        .bind(correct_pokemon.into_inner()),

        RoundDetail::Ability {
            ability,
            guessed_pokemon,
        } => sqlx::query(
            r"INSERT INTO leaderboard_guess_ability
                (user_id, ability_id, guessed_pokemon_id, is_correct, score, created_at)
              VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user)
        .bind(ability.into_inner())
        .bind(guessed_pokemon.into_inner()),

        RoundDetail::Type {
            type1,
            type2,
            guessed_pokemon,
        } => sqlx::query(
            r"INSERT INTO leaderboard_guess_type
                (user_id, type1_id, type2_id, guessed_pokemon_id, is_correct, score, created_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user)
        .bind(type1.into_inner())
        .bind(type2.map(pokequiz_types::TypeId::into_inner))
        .bind(guessed_pokemon.into_inner()),
    };

    // Every detail table ends with the same three columns.
    query
        .bind(result.is_correct)
        .bind(score)
        .bind(result.played_at)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_its_own_table() {
        let mut tables: Vec<&str> = QuizMode::ALL.iter().map(|m| detail_table(*m)).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), QuizMode::ALL.len());
        assert!(tables.iter().all(|t| t.starts_with("leaderboard_guess_")));
    }

    #[test]
    fn oversized_score_saturates() {
        assert_eq!(score_column(600), 600);
        assert_eq!(score_column(u32::MAX), i32::MAX);
    }
}
