//! Leaderboard standings and per-mode round boards.
//!
//! Standings aggregate `leaderboard_general` per player: rounds played,
//! total score and the won/lost split. Players rank by total score, then by
//! rounds played.
//!
//! Round boards read a mode's own detail table instead, so they also list
//! rounds of modes without a general leaderboard registration. Rounds rank
//! by score, newest first among equal scores.

use chrono::{DateTime, Utc};
use pokequiz_types::{QuizMode, RoundEntry, Standing, UserId};
use sqlx::PgPool;

use crate::error::DbError;
use crate::round_store::detail_table;

/// Default number of rows shown on a leaderboard.
pub const DEFAULT_STANDINGS_LIMIT: u32 = 10;

/// One aggregated leaderboard row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StandingRow {
    /// Player id.
    pub user_id: i32,
    /// Player display name.
    pub username: String,
    /// Rounds played.
    pub rounds: i64,
    /// Sum of scores.
    pub total_score: i64,
    /// Rounds won.
    pub correct: i64,
    /// Rounds lost.
    pub incorrect: i64,
}

impl From<StandingRow> for Standing {
    fn from(row: StandingRow) -> Self {
        Self {
            user_id: UserId(row.user_id),
            username: row.username,
            rounds: row.rounds,
            total_score: row.total_score,
            correct: row.correct,
            incorrect: row.incorrect,
        }
    }
}

/// One detail-table row with names resolved.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoundEntryRow {
    /// Detail row id.
    pub entry_id: i64,
    /// Player display name.
    pub username: String,
    /// What was asked, rendered.
    pub question: String,
    /// What the player answered, rendered.
    pub guess: String,
    /// Whether the answer was accepted.
    pub is_correct: bool,
    /// Points awarded.
    pub score: i32,
    /// Insert time.
    pub played_at: DateTime<Utc>,
}

impl From<RoundEntryRow> for RoundEntry {
    fn from(row: RoundEntryRow) -> Self {
        Self {
            entry_id: row.entry_id,
            username: row.username,
            question: row.question,
            guess: row.guess,
            is_correct: row.is_correct,
            score: row.score,
            played_at: row.played_at,
        }
    }
}

const STANDINGS_SELECT: &str = r"
SELECT
    u.user_id,
    u.username,
    COUNT(lg.entry_id) AS rounds,
    COALESCE(SUM(lg.score), 0)::BIGINT AS total_score,
    COALESCE(SUM(lg.correct), 0)::BIGINT AS correct,
    COALESCE(SUM(lg.incorrect), 0)::BIGINT AS incorrect
FROM leaderboard_general lg
JOIN users u ON u.user_id = lg.user_id";

const STANDINGS_ORDER: &str = r"
GROUP BY u.user_id, u.username
ORDER BY total_score DESC, rounds DESC, u.user_id
LIMIT $1";

/// Mode-specific `question` and `guess` columns and the joins they need.
///
/// The detail table is aliased `d` and the player row `u`.
const fn round_board_columns(mode: QuizMode) -> (&'static str, &'static str) {
    match mode {
        QuizMode::Weight => (
            "p1.name || ' vs ' || p2.name AS question, g.name AS guess",
            "JOIN pokemon p1 ON p1.pokemon_id = d.pokemon1_id
JOIN pokemon p2 ON p2.pokemon_id = d.pokemon2_id
JOIN pokemon g ON g.pokemon_id = d.user_choice_id",
        ),
        QuizMode::Stats => (
            "'Base stats of ' || t.name AS question, g.name AS guess",
            "JOIN pokemon t ON t.pokemon_id = d.pokemon_id
JOIN pokemon g ON g.pokemon_id = d.guessed_pokemon_id",
        ),
        QuizMode::SpeciesGroup => (
            "d.given_species AS question, g.name AS guess",
            "JOIN pokemon g ON g.pokemon_id = d.guessed_pokemon_id",
        ),
        QuizMode::EggGroup => (
            "p1.name || ' & ' || p2.name AS question,
    CASE WHEN d.user_answer THEN 'yes' ELSE 'no' END AS guess",
            "JOIN pokemon p1 ON p1.pokemon_id = d.pokemon1_id
JOIN pokemon p2 ON p2.pokemon_id = d.pokemon2_id",
        ),
        QuizMode::DexNumber => (
            "'#' || LPAD(d.shown_dex::TEXT, 3, '0') AS question, g.name AS guess",
            "JOIN pokemon g ON g.pokemon_id = d.user_choice_id",
        ),
        QuizMode::Ability => (
            "a.ability_name AS question, g.name AS guess",
            "JOIN abilities a ON a.ability_id = d.ability_id
JOIN pokemon g ON g.pokemon_id = d.guessed_pokemon_id",
        ),
        QuizMode::Type => (
            "t1.type_name || COALESCE('/' || t2.type_name, '') AS question, g.name AS guess",
            "JOIN types t1 ON t1.type_id = d.type1_id
LEFT JOIN types t2 ON t2.type_id = d.type2_id
JOIN pokemon g ON g.pokemon_id = d.guessed_pokemon_id",
        ),
    }
}

/// The round board query for `mode`, taking the row limit as `$1`.
fn round_board_sql(mode: QuizMode) -> String {
    let (columns, joins) = round_board_columns(mode);
    format!(
        "SELECT d.entry_id, u.username, {columns},
    d.is_correct, d.score, d.created_at AS played_at
FROM {table} d
JOIN users u ON u.user_id = d.user_id
{joins}
ORDER BY d.score DESC, d.created_at DESC, d.entry_id DESC
LIMIT $1",
        table = detail_table(mode)
    )
}

/// Read operations on the leaderboards.
pub struct LeaderboardStore<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardStore<'a> {
    /// Create a new leaderboard store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Top `limit` players across every mode.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn general_standings(&self, limit: u32) -> Result<Vec<Standing>, DbError> {
        let sql = format!("{STANDINGS_SELECT}{STANDINGS_ORDER}");
        let rows = sqlx::query_as::<_, StandingRow>(&sql)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Standing::from).collect())
    }

    /// Top `limit` players in one mode.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn mode_standings(
        &self,
        mode: QuizMode,
        limit: u32,
    ) -> Result<Vec<Standing>, DbError> {
        let sql = format!(
            "{STANDINGS_SELECT}\nJOIN game_modes gm ON gm.mode_id = lg.mode_id\nWHERE gm.mode_name = $2{STANDINGS_ORDER}"
        );
        let rows = sqlx::query_as::<_, StandingRow>(&sql)
            .bind(i64::from(limit))
            .bind(mode.tag())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Standing::from).collect())
    }

    /// Top `limit` rounds from `mode`'s own detail table.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn mode_rounds(&self, mode: QuizMode, limit: u32) -> Result<Vec<RoundEntry>, DbError> {
        let rows = sqlx::query_as::<_, RoundEntryRow>(&round_board_sql(mode))
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(RoundEntry::from).collect())
    }

    /// One player's totals across every mode, if they have played.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn player_totals(&self, user: UserId) -> Result<Option<Standing>, DbError> {
        let sql = format!(
            "{STANDINGS_SELECT}\nWHERE lg.user_id = $2{STANDINGS_ORDER}"
        );
        let row = sqlx::query_as::<_, StandingRow>(&sql)
            .bind(1_i64)
            .bind(user.into_inner())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Standing::from))
    }
}
