//! Terminal entry point for the Pokequiz trivia engine.
//!
//! Loads configuration, connects to `PostgreSQL` (running the embedded
//! migrations when enabled) and runs a menu loop over stdin/stdout. Each
//! menu pick of a mode starts a [`QuizSession`] that plays rounds until the
//! player declines a replay.
//!
//! # Architecture
//!
//! ```text
//! stdin --> TerminalPlayer --> QuizSession --> PgQuizStore --> PostgreSQL
//!                  ^                |
//!                  +--- stdout <----+
//! ```
//!
//! Logs go to stderr so they never interleave with the prompts.

mod error;
mod menu;
mod terminal;

use std::io;
use std::path::Path;

use pokequiz_core::config::QuizConfig;
use pokequiz_core::session::{QuizSession, SessionEnd};
use pokequiz_db::{
    CatalogStore, DEFAULT_STANDINGS_LIMIT, LeaderboardStore, ModeStore, PgQuizStore,
    PostgresConfig, PostgresPool,
};
use pokequiz_types::{QuizMode, UserId};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::menu::MenuChoice;
use crate::terminal::TerminalPlayer;

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "POKEQUIZ_CONFIG";

/// Configuration file used when `POKEQUIZ_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "pokequiz-config.yaml";

/// Rows shown on the per-mode board after a session.
const MODE_STANDINGS_LIMIT: u32 = 5;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the database connection or the
/// terminal fails.
#[tokio::main]
async fn main() -> Result<(), CliError> {
    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    info!(
        max_connections = config.database.max_connections,
        run_migrations = config.database.run_migrations,
        user = %config.session.user_id,
        "pokequiz starting"
    );

    let pool = PostgresPool::connect(&PostgresConfig::from(&config.database)).await?;
    if config.database.run_migrations {
        pool.run_migrations().await?;
    }

    let stdin = io::stdin();
    let mut terminal = TerminalPlayer::new(stdin.lock(), io::stdout());
    let result = run_menu(&pool, &mut terminal, config.session.user_id).await;

    pool.close().await;
    result
}

/// Read the configuration file, or fall back to defaults when it is absent.
fn load_config() -> Result<QuizConfig, CliError> {
    load_config_with(|key| std::env::var(key).ok())
}

/// A file named by `POKEQUIZ_CONFIG` must exist; only the default path may
/// be missing.
fn load_config_with<F>(env: F) -> Result<QuizConfig, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(explicit) = env(CONFIG_PATH_ENV) {
        return QuizConfig::from_file(Path::new(&explicit)).map_err(CliError::from);
    }

    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() {
        return QuizConfig::from_file(path).map_err(CliError::from);
    }

    let mut config = QuizConfig::default();
    config.apply_overrides(env)?;
    Ok(config)
}

async fn run_menu<R, W>(
    pool: &PostgresPool,
    terminal: &mut TerminalPlayer<R, W>,
    user: UserId,
) -> Result<(), CliError>
where
    R: io::BufRead,
    W: io::Write,
{
    let store = PgQuizStore::new(pool.clone());

    loop {
        terminal.write_block(&menu::render_menu())?;
        let Some(line) = terminal.read_line("> ")? else {
            break;
        };

        match menu::parse(&line) {
            Some(MenuChoice::ViewModes) => {
                let text = match ModeStore::new(pool.pool()).list_modes().await {
                    Ok(modes) => menu::render_modes(&modes),
                    Err(e) => {
                        warn!(error = %e, "Listing modes failed");
                        "Game modes are unavailable right now.".to_owned()
                    }
                };
                terminal.write_block(&text)?;
            }
            Some(MenuChoice::Play(mode)) => {
                let summary = QuizSession::new(&store, &mut *terminal, user).play(mode).await;
                terminal.write_block(&menu::render_summary(&summary))?;
                if summary.rounds > 0 {
                    show_mode_standings(pool, terminal, mode).await?;
                }
                if summary.end == SessionEnd::InputClosed {
                    break;
                }
            }
            Some(MenuChoice::Leaderboard) => {
                show_general_standings(pool, terminal, user).await?;
            }
            Some(MenuChoice::ModeBoards) => {
                terminal.write_block(&menu::render_board_menu())?;
                let Some(line) = terminal.read_line("> ")? else {
                    break;
                };
                match menu::parse_board(&line) {
                    Some(mode) => show_round_board(pool, terminal, mode).await?,
                    None if matches!(line.trim(), "" | "0") => {}
                    None => terminal.write_block("Unknown option.")?,
                }
            }
            Some(MenuChoice::Search) => {
                let Some(name) = terminal.read_line("Pokémon name: ")? else {
                    break;
                };
                show_species(pool, terminal, &name).await?;
            }
            Some(MenuChoice::Quit) => break,
            None => terminal.write_block("Unknown option.")?,
        }
    }

    Ok(())
}

async fn show_general_standings<R, W>(
    pool: &PostgresPool,
    terminal: &mut TerminalPlayer<R, W>,
    user: UserId,
) -> io::Result<()>
where
    R: io::BufRead,
    W: io::Write,
{
    let leaderboard = LeaderboardStore::new(pool.pool());

    match leaderboard.general_standings(DEFAULT_STANDINGS_LIMIT).await {
        Ok(standings) => {
            terminal.write_block(&menu::render_standings("Top trainers", &standings))?;
        }
        Err(e) => {
            warn!(error = %e, "Loading standings failed");
            terminal.write_block("The leaderboard is unavailable right now.")?;
            return Ok(());
        }
    }

    match leaderboard.player_totals(user).await {
        Ok(Some(totals)) => terminal.write_block(&format!(
            "You: {} pts over {} rounds ({}W/{}L).",
            totals.total_score, totals.rounds, totals.correct, totals.incorrect
        )),
        Ok(None) => terminal.write_block("You have not played a round yet."),
        Err(e) => {
            warn!(error = %e, "Loading player totals failed");
            Ok(())
        }
    }
}

async fn show_mode_standings<R, W>(
    pool: &PostgresPool,
    terminal: &mut TerminalPlayer<R, W>,
    mode: QuizMode,
) -> io::Result<()>
where
    R: io::BufRead,
    W: io::Write,
{
    match LeaderboardStore::new(pool.pool())
        .mode_standings(mode, MODE_STANDINGS_LIMIT)
        .await
    {
        Ok(standings) => {
            let title = format!("Top {mode} trainers");
            terminal.write_block(&menu::render_standings(&title, &standings))
        }
        Err(e) => {
            warn!(%mode, error = %e, "Loading mode standings failed");
            Ok(())
        }
    }
}

async fn show_round_board<R, W>(
    pool: &PostgresPool,
    terminal: &mut TerminalPlayer<R, W>,
    mode: QuizMode,
) -> io::Result<()>
where
    R: io::BufRead,
    W: io::Write,
{
    match LeaderboardStore::new(pool.pool())
        .mode_rounds(mode, DEFAULT_STANDINGS_LIMIT)
        .await
    {
        Ok(entries) => terminal.write_block(&menu::render_round_board(mode, &entries)),
        Err(e) => {
            warn!(%mode, error = %e, "Loading round board failed");
            terminal.write_block("The leaderboard is unavailable right now.")
        }
    }
}

async fn show_species<R, W>(
    pool: &PostgresPool,
    terminal: &mut TerminalPlayer<R, W>,
    name: &str,
) -> io::Result<()>
where
    R: io::BufRead,
    W: io::Write,
{
    if name.trim().is_empty() {
        return Ok(());
    }

    let catalog = CatalogStore::new(pool.pool());
    let found = match catalog.find_by_name(name).await {
        Ok(Some(found)) => catalog.species(found.id).await,
        Ok(None) => Ok(None),
        Err(e) => Err(e),
    };

    match found {
        Ok(Some(species)) => terminal.write_block(&menu::render_species(&species)),
        Ok(None) => terminal.write_block(&format!("No Pokémon named \"{}\".", name.trim())),
        Err(e) => {
            warn!(error = %e, "Species search failed");
            terminal.write_block("The Pokémon catalog is unavailable right now.")
        }
    }
}

#[cfg(test)]
mod tests {
    use pokequiz_core::config::ConfigError;

    use super::*;

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = load_config_with(|key| {
            (key == CONFIG_PATH_ENV).then(|| "/nonexistent/pokequiz-config.yaml".to_owned())
        });
        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::Io { .. }))
        ));
    }
}
